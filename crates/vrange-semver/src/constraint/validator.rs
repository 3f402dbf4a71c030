//! Grammar checks over a lexed token stream
//!
//! Runs before desugaring so that every group of tokens between join
//! operators has one of the shapes the desugarer knows how to turn into a
//! range.

use super::constraint::ConstraintError;
use super::token::{render, Token, TokenKind};

fn grammar(tokens: &[Token], positions: Vec<usize>, message: &str) -> ConstraintError {
    ConstraintError::InvalidGrammar {
        message: message.to_string(),
        rendering: render(tokens, &positions),
        positions,
    }
}

fn is_unsupported(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Illegal | TokenKind::OpenParen | TokenKind::CloseParen | TokenKind::Not
    )
}

/// Validate a token stream framed by start and end tokens
pub fn validate(tokens: &[Token]) -> Result<(), ConstraintError> {
    let illegal: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| is_unsupported(t.kind))
        .map(|(i, _)| i)
        .collect();
    if !illegal.is_empty() {
        return Err(ConstraintError::IllegalToken {
            rendering: render(tokens, &illegal),
            positions: illegal,
        });
    }

    // index of the equality-anchored static version in the current AND run
    let mut anchored_static: Option<usize> = None;

    for i in 1..tokens.len() {
        let token = &tokens[i];
        let previous = &tokens[i - 1];

        if token.kind.is_join() && previous.is(TokenKind::Start) {
            return Err(grammar(tokens, vec![i], "join operator at the start of the constraint"));
        }

        if token.is(TokenKind::End) && previous.kind.is_join() {
            return Err(grammar(tokens, vec![i - 1], "join operator at the end of the constraint"));
        }

        if token.kind.is_range_or_equality() && previous.kind.is_range_or_equality() {
            return Err(grammar(tokens, vec![i - 1, i], "two subsequent range or equality operators"));
        }

        if token.kind.is_join() && previous.kind.is_join() {
            return Err(grammar(tokens, vec![i - 1, i], "two subsequent join operators"));
        }

        if token.is_static_version() && previous.is_static_version() {
            return Err(grammar(
                tokens,
                vec![i - 1, i],
                "two subsequent static versions without a join or range operator",
            ));
        }

        if token.is_version() {
            check_version_context(tokens, i)?;
        }

        if previous.kind.is_range_or_equality()
            && !previous.is(TokenKind::Hyphen)
            && !token.is_version()
        {
            return Err(grammar(tokens, vec![i - 1], "operator without a version"));
        }

        if token.is_static_version() && previous.is(TokenKind::Eq) {
            if let Some(earlier) = anchored_static {
                return Err(grammar(
                    tokens,
                    vec![earlier, i],
                    "two exact versions joined by &&, which can never both hold",
                ));
            }
            anchored_static = Some(i);
        }

        if token.is(TokenKind::Or) {
            anchored_static = None;
        }

        if token.is(TokenKind::Hyphen) {
            check_hyphen(tokens, i)?;
        }
    }

    check_group_shapes(tokens)
}

fn check_version_context(tokens: &[Token], i: usize) -> Result<(), ConstraintError> {
    let token = &tokens[i];
    let previous = &tokens[i - 1];
    let next_is_hyphen = tokens.get(i + 1).is_some_and(|t| t.is(TokenKind::Hyphen));

    if previous.is_version() {
        return Err(grammar(
            tokens,
            vec![i - 1, i],
            "two subsequent versions without a join or range operator",
        ));
    }

    let preceded_by_operator = previous.kind.is_range_or_equality() || previous.kind.is_join();
    if !preceded_by_operator && !next_is_hyphen && token.is_static_version() {
        return Err(grammar(
            tokens,
            vec![i],
            "version without a preceding range, equality or join operator",
        ));
    }

    if i >= 3 && tokens[i - 2].is_version() {
        let between = tokens[i - 1].kind;
        let before = tokens[i - 3].kind;
        if !(between.is_range() || between.is_join()) && !(before.is_range() || before.is_join()) {
            return Err(grammar(
                tokens,
                vec![i - 2, i],
                "two versions that are not joined by a join or range operator",
            ));
        }
    }

    Ok(())
}

fn is_static_or_partial(token: &Token) -> bool {
    token.is_static_version() || token.is_partial_version()
}

fn check_hyphen(tokens: &[Token], i: usize) -> Result<(), ConstraintError> {
    let previous = &tokens[i - 1];
    if !previous.is_version() {
        return Err(grammar(tokens, vec![i], "hyphen range without a start version"));
    }
    if !is_static_or_partial(previous) {
        return Err(grammar(
            tokens,
            vec![i - 1, i],
            "hyphen range start version must be a plain or partial version",
        ));
    }
    if i >= 2 && tokens[i - 2].kind.is_range_or_equality() {
        return Err(grammar(
            tokens,
            vec![i - 2, i],
            "operator out of place in hyphen range",
        ));
    }

    match tokens.get(i + 1) {
        Some(next) if next.is_version() => {
            if is_static_or_partial(next) {
                Ok(())
            } else {
                Err(grammar(
                    tokens,
                    vec![i, i + 1],
                    "hyphen range end version must be a plain or partial version",
                ))
            }
        }
        _ => Err(grammar(tokens, vec![i], "hyphen range without an end version")),
    }
}

/// Check that every group between join operators is a shape the desugarer accepts
fn check_group_shapes(tokens: &[Token]) -> Result<(), ConstraintError> {
    let mut group_start = 1;

    for i in 1..tokens.len() {
        let kind = tokens[i].kind;
        if !(kind.is_join() || kind == TokenKind::End) {
            continue;
        }

        let group = &tokens[group_start..i];
        if !is_known_shape(group) {
            return Err(grammar(
                tokens,
                (group_start..i).collect(),
                "unsupported range expression",
            ));
        }
        group_start = i + 1;
    }

    Ok(())
}

fn is_known_shape(group: &[Token]) -> bool {
    let kinds: Vec<TokenKind> = group.iter().map(|t| t.kind).collect();
    match kinds.as_slice() {
        [] => true,
        [TokenKind::Version] => true,
        [TokenKind::Version, TokenKind::Hyphen, TokenKind::Version] => true,
        [op, TokenKind::Version] => {
            matches!(op, TokenKind::Caret | TokenKind::Tilde | TokenKind::Eq) || op.is_comparison()
        }
        [op1, TokenKind::Version, op2, TokenKind::Version] => {
            op1.is_comparison() && op2.is_comparison()
        }
        _ => false,
    }
}
