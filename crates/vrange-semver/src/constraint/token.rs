//! Token types produced by the constraint lexer

use std::fmt;

use crate::version_parser::{is_partial_version, is_static_version};

/// Kind of a lexed constraint token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Start,
    End,
    Whitespace,
    Illegal,
    /// `=`
    Eq,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `!`, reserved and never produced by the lexer
    Not,
    /// `~`
    Tilde,
    /// `^`
    Caret,
    OpenParen,
    CloseParen,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `-` between two versions
    Hyphen,
    /// A version expression such as `1.2.3`, `1.x` or `ANY`
    Version,
}

impl TokenKind {
    /// Operators that open a range: `<`, `<=`, `>`, `>=`, `~`, `^` and the hyphen
    pub fn is_range(self) -> bool {
        matches!(
            self,
            TokenKind::Lt
                | TokenKind::Le
                | TokenKind::Gt
                | TokenKind::Ge
                | TokenKind::Tilde
                | TokenKind::Caret
                | TokenKind::Hyphen
        )
    }

    pub fn is_equality(self) -> bool {
        self == TokenKind::Eq
    }

    pub fn is_join(self) -> bool {
        matches!(self, TokenKind::And | TokenKind::Or)
    }

    /// Plain comparison operators that may form a two-sided range
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            TokenKind::Lt | TokenKind::Le | TokenKind::Gt | TokenKind::Ge
        )
    }

    pub fn is_range_or_equality(self) -> bool {
        self.is_range() || self.is_equality()
    }

    /// Classify an operator run collected by the lexer
    pub fn from_operator(text: &str) -> TokenKind {
        match text {
            "&&" => TokenKind::And,
            "||" => TokenKind::Or,
            "=" => TokenKind::Eq,
            "<=" => TokenKind::Le,
            ">=" => TokenKind::Ge,
            "<" => TokenKind::Lt,
            ">" => TokenKind::Gt,
            "~" => TokenKind::Tilde,
            "^" => TokenKind::Caret,
            "(" => TokenKind::OpenParen,
            ")" => TokenKind::CloseParen,
            "-" => TokenKind::Hyphen,
            _ => TokenKind::Illegal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Start => "START",
            TokenKind::End => "END",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eq => "EQ",
            TokenKind::Lt => "LT",
            TokenKind::Le => "LE",
            TokenKind::Gt => "GT",
            TokenKind::Ge => "GE",
            TokenKind::Not => "NOT",
            TokenKind::Tilde => "TILDE",
            TokenKind::Caret => "CARET",
            TokenKind::OpenParen => "OPEN_PAREN",
            TokenKind::CloseParen => "CLOSE_PAREN",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Hyphen => "HYPHEN",
            TokenKind::Version => "VERSION",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token together with the exact text it was lexed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Token {
            kind,
            literal: literal.into(),
        }
    }

    pub fn start() -> Self {
        Token::new(TokenKind::Start, "")
    }

    pub fn end() -> Self {
        Token::new(TokenKind::End, "")
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_version(&self) -> bool {
        self.kind == TokenKind::Version
    }

    /// A fully specified `major.minor.patch` version expression
    pub fn is_static_version(&self) -> bool {
        self.is_version() && is_static_version(&self.literal)
    }

    /// A `major` or `major.minor` version expression
    pub fn is_partial_version(&self) -> bool {
        self.is_version() && is_partial_version(&self.literal)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Start | TokenKind::End => write!(f, "{}", self.kind),
            _ => write!(f, "{}({})", self.kind, self.literal),
        }
    }
}

/// Render a token stream on one line, marking the tokens at `positions`
/// with `>>` and `<<`.
pub fn render(tokens: &[Token], positions: &[usize]) -> String {
    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            if positions.contains(&i) {
                format!(">>{}<<", token)
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_operator() {
        assert_eq!(TokenKind::from_operator("&&"), TokenKind::And);
        assert_eq!(TokenKind::from_operator("||"), TokenKind::Or);
        assert_eq!(TokenKind::from_operator(">="), TokenKind::Ge);
        assert_eq!(TokenKind::from_operator("-"), TokenKind::Hyphen);
        assert_eq!(TokenKind::from_operator("!"), TokenKind::Illegal);
        assert_eq!(TokenKind::from_operator("!="), TokenKind::Illegal);
        assert_eq!(TokenKind::from_operator("=="), TokenKind::Illegal);
        assert_eq!(TokenKind::from_operator("&"), TokenKind::Illegal);
    }

    #[test]
    fn test_classification() {
        assert!(TokenKind::Hyphen.is_range());
        assert!(TokenKind::Caret.is_range());
        assert!(!TokenKind::Eq.is_range());
        assert!(TokenKind::Eq.is_range_or_equality());
        assert!(TokenKind::Or.is_join());
        assert!(!TokenKind::Tilde.is_comparison());
        assert!(TokenKind::Le.is_comparison());
    }

    #[test]
    fn test_version_token_helpers() {
        assert!(Token::new(TokenKind::Version, "1.2.3").is_static_version());
        assert!(Token::new(TokenKind::Version, "1.2").is_partial_version());
        assert!(!Token::new(TokenKind::Version, "1.x").is_static_version());
        assert!(!Token::new(TokenKind::Version, "1.x").is_partial_version());
        assert!(!Token::new(TokenKind::Illegal, "1.2.3").is_static_version());
    }

    #[test]
    fn test_render() {
        let tokens = vec![
            Token::start(),
            Token::new(TokenKind::And, "&&"),
            Token::new(TokenKind::Version, "5.0.0"),
            Token::end(),
        ];
        assert_eq!(
            render(&tokens, &[1]),
            "START >>AND(&&)<< VERSION(5.0.0) END"
        );
    }
}
