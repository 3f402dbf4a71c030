//! Constraint lexer
//!
//! Turns a constraint string into a flat token stream framed by
//! [`TokenKind::Start`] and [`TokenKind::End`]. Lexing never fails: characters
//! that cannot start a token become [`TokenKind::Illegal`] and are reported by
//! the validator.

use std::iter::Peekable;
use std::str::Chars;

use super::token::{render, Token, TokenKind};

const OPERATOR_START: &[char] = &['=', '<', '>', '!', '&', '|', '-', '^', '~', '(', ')'];
const VERSION_UNSAFE: &[char] = &['=', '<', '>', '!', '&', '|', '^', '~', '(', ')'];

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

fn is_operator_start(ch: char) -> bool {
    OPERATOR_START.contains(&ch)
}

fn is_version_unsafe(ch: char) -> bool {
    VERSION_UNSAFE.contains(&ch)
}

/// Single pass scanner with one character of lookahead
struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Lexer {
            chars: input.chars().peekable(),
        }
    }

    fn scan_whole(mut self) -> Vec<Token> {
        let mut tokens = vec![Token::start()];
        while let Some(token) = self.scan_one() {
            tokens.push(token);
        }
        tokens.push(Token::end());
        tokens
    }

    fn scan_one(&mut self) -> Option<Token> {
        let ch = *self.chars.peek()?;

        let token = if is_whitespace(ch) {
            self.scan_while(TokenKind::Whitespace, is_whitespace)
        } else if ch.is_ascii_digit() {
            self.scan_version()
        } else if is_operator_start(ch) {
            self.scan_operator()
        } else if ch.is_ascii_alphabetic() || ch == '*' {
            self.scan_version()
        } else {
            self.chars.next();
            Token::new(TokenKind::Illegal, ch.to_string())
        };

        Some(token)
    }

    fn scan_while(&mut self, kind: TokenKind, accept: impl Fn(char) -> bool) -> Token {
        let mut literal = String::new();
        while let Some(&ch) = self.chars.peek() {
            if !accept(ch) {
                break;
            }
            literal.push(ch);
            self.chars.next();
        }
        Token::new(kind, literal)
    }

    fn scan_version(&mut self) -> Token {
        self.scan_while(TokenKind::Version, |ch| {
            !is_whitespace(ch) && !is_version_unsafe(ch)
        })
    }

    fn scan_operator(&mut self) -> Token {
        let mut literal = String::new();
        while let Some(&ch) = self.chars.peek() {
            if !is_operator_start(ch) {
                break;
            }
            literal.push(ch);
            self.chars.next();
            if ch == '(' || ch == ')' {
                break;
            }
        }
        Token::new(TokenKind::from_operator(&literal), literal)
    }
}

/// Lex a constraint string into its post-processed token stream
pub fn tokenize(input: &str) -> Vec<Token> {
    let raw = Lexer::new(input).scan_whole();
    log::trace!("raw tokens for {:?}: {}", input, render(&raw, &[]));

    let tokens = strip_whitespace(raw);
    if tokens.iter().any(|t| t.is(TokenKind::Illegal)) {
        return tokens;
    }

    let tokens = remove_superfluous_and(tokens);
    log::trace!("after AND removal: {}", render(&tokens, &[]));

    let tokens = insert_implicit_equality(tokens);
    log::trace!("after implicit equality: {}", render(&tokens, &[]));

    tokens
}

fn strip_whitespace(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .filter(|t| !t.is(TokenKind::Whitespace))
        .collect()
}

/// Drop an `&&` that splits a two-sided comparator range, so that
/// `>=1.0.0 && <2.0.0` lexes like `>=1.0.0 <2.0.0`.
///
/// The pattern is checked against the tokens already emitted, so in
/// `>1 && <5 && >2 && <4` only the first and third `&&` go.
fn remove_superfluous_and(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());

    for (i, token) in tokens.iter().enumerate() {
        if token.is(TokenKind::And) && splits_comparator_pair(&out, &tokens[i + 1..]) {
            continue;
        }
        out.push(token.clone());
    }

    out
}

fn splits_comparator_pair(emitted: &[Token], rest: &[Token]) -> bool {
    let [.., anchor, op, version] = emitted else {
        return false;
    };
    let [next_op, next_version, ..] = rest else {
        return false;
    };

    (anchor.is(TokenKind::Start) || anchor.kind.is_join())
        && op.kind.is_comparison()
        && version.is_version()
        && next_op.kind.is_comparison()
        && next_version.is_version()
}

/// Put an `=` in front of every bare fully specified version, so that
/// `5.0.0` means `=5.0.0`. Versions on either side of a hyphen are left alone.
fn insert_implicit_equality(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len() + 2);

    for (i, token) in tokens.iter().enumerate() {
        let previous = i.checked_sub(1).map(|p| tokens[p].kind);
        let next = tokens.get(i + 1).map(|t| t.kind);

        let anchored = previous.is_some_and(|kind| kind.is_range_or_equality());
        let hyphenated =
            previous == Some(TokenKind::Hyphen) || next == Some(TokenKind::Hyphen);

        if token.is_static_version() && !anchored && !hyphenated {
            out.push(Token::new(TokenKind::Eq, "="));
        }
        out.push(token.clone());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).iter().map(|t| t.kind).collect()
    }

    fn literals(input: &str) -> Vec<String> {
        tokenize(input).into_iter().map(|t| t.literal).collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds(""), vec![Start, End]);
        assert_eq!(kinds("   "), vec![Start, End]);
    }

    #[test]
    fn test_operators() {
        assert_eq!(kinds(">= 1.0"), vec![Start, Ge, Version, End]);
        assert_eq!(kinds("<=1.0"), vec![Start, Le, Version, End]);
        assert_eq!(kinds("<1"), vec![Start, Lt, Version, End]);
        assert_eq!(kinds(">1"), vec![Start, Gt, Version, End]);
        assert_eq!(kinds("~1.2"), vec![Start, Tilde, Version, End]);
        assert_eq!(kinds("^1.2"), vec![Start, Caret, Version, End]);
        assert_eq!(kinds("=1.x"), vec![Start, Eq, Version, End]);
        assert_eq!(
            kinds("1 || 2"),
            vec![Start, Version, Or, Version, End]
        );
    }

    #[test]
    fn test_version_expression_literals() {
        assert_eq!(
            literals(">=1.2.3-beta.1+build.5"),
            vec!["", ">=", "1.2.3-beta.1+build.5", ""]
        );
        assert_eq!(literals("ANY"), vec!["", "ANY", ""]);
        assert_eq!(literals("*"), vec!["", "*", ""]);
        assert_eq!(literals("1.x"), vec!["", "1.x", ""]);
    }

    #[test]
    fn test_hyphen_range() {
        assert_eq!(
            kinds("1.2.3 - 2.3.4"),
            vec![Start, Version, Hyphen, Version, End]
        );
        // without spaces the hyphen is a pre-release separator
        assert_eq!(literals("1.2.3-2.3.4"), vec!["", "=", "1.2.3-2.3.4", ""]);
    }

    #[test]
    fn test_illegal_characters() {
        assert_eq!(kinds("!1.0.0"), vec![Start, Illegal, Version, End]);
        assert_eq!(kinds("!=1.0.0"), vec![Start, Illegal, Version, End]);
        assert_eq!(kinds("~>1.0"), vec![Start, Illegal, Version, End]);
        assert_eq!(kinds("1.0 # x"), vec![Start, Version, Illegal, Version, End]);
        assert_eq!(kinds("&5.0.0"), vec![Start, Illegal, Version, End]);
    }

    #[test]
    fn test_illegal_token_skips_augmentation() {
        // no EQ is inserted once an illegal token is present
        assert_eq!(kinds("5.0.0 $"), vec![Start, Version, Illegal, End]);
    }

    #[test]
    fn test_parentheses_are_single_tokens() {
        assert_eq!(
            kinds("((1.0"),
            vec![Start, OpenParen, OpenParen, Version, End]
        );
        assert_eq!(kinds("1.0)"), vec![Start, Version, CloseParen, End]);
    }

    #[test]
    fn test_implicit_equality() {
        assert_eq!(kinds("5.0.0"), vec![Start, Eq, Version, End]);
        assert_eq!(kinds("=5.0.0"), vec![Start, Eq, Version, End]);
        assert_eq!(kinds("5.0"), vec![Start, Version, End]);
        assert_eq!(kinds("5.0.x"), vec![Start, Version, End]);
        assert_eq!(
            kinds("1.0.0 || 2.0.0"),
            vec![Start, Eq, Version, Or, Eq, Version, End]
        );
        assert_eq!(kinds(">5.0.0"), vec![Start, Gt, Version, End]);
    }

    #[test]
    fn test_superfluous_and_removed() {
        assert_eq!(
            kinds(">=1.0.0 && <2.0.0"),
            vec![Start, Ge, Version, Lt, Version, End]
        );
        assert_eq!(
            kinds("1.0.0 || >1.0.0 && <=2.0.0"),
            vec![Start, Eq, Version, Or, Gt, Version, Le, Version, End]
        );
    }

    #[test]
    fn test_superfluous_and_chain() {
        assert_eq!(
            kinds(">1.0.0 && <5.0.0 && >2.0.0 && <4.0.0"),
            vec![
                Start, Gt, Version, Lt, Version, And, Gt, Version, Lt, Version, End
            ]
        );
    }

    #[test]
    fn test_and_kept_between_other_ranges() {
        assert_eq!(
            kinds("^1.0.0 && <2.0.0"),
            vec![Start, Caret, Version, And, Lt, Version, End]
        );
        assert_eq!(
            kinds(">=1.0.0 && 2.0.0"),
            vec![Start, Ge, Version, And, Eq, Version, End]
        );
    }
}
