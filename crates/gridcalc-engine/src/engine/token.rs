//! Formula tokenizer.
//!
//! Splits a formula body at every operator and parenthesis, keeping the
//! split characters as their own tokens. Runs of anything else become a
//! single [`Token::Operand`]; deciding whether an operand is a literal or a
//! reference is left to the parser.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Binary arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Operator(Operator),
    LParen,
    RParen,
    Operand(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operator(op) => write!(f, "{}", op.as_char()),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Operand(s) => write!(f, "{}", s),
        }
    }
}

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[()+*/-]|[^()+*/-]+").unwrap())
}

/// Tokenize a formula body (the text after `=`).
///
/// An empty body yields no tokens.
pub fn tokenize(body: &str) -> Vec<Token> {
    token_re()
        .find_iter(body)
        .map(|m| {
            let text = m.as_str();
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some('('), None) => Token::LParen,
                (Some(')'), None) => Token::RParen,
                (Some(c), None) => match Operator::from_char(c) {
                    Some(op) => Token::Operator(op),
                    None => Token::Operand(text.to_string()),
                },
                _ => Token::Operand(text.to_string()),
            }
        })
        .collect()
}

/// True if any token is one of the four arithmetic operators.
pub fn has_operator(tokens: &[Token]) -> bool {
    tokens.iter().any(|t| matches!(t, Token::Operator(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn operand(s: &str) -> Token {
        Token::Operand(s.to_string())
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_simple() {
        assert_eq!(
            tokenize("A1+3"),
            vec![operand("A1"), Token::Operator(Operator::Add), operand("3")]
        );
    }

    #[test]
    fn test_tokenize_keeps_parens_and_operators() {
        assert_eq!(
            tokenize("(2+B3)*4"),
            vec![
                Token::LParen,
                operand("2"),
                Token::Operator(Operator::Add),
                operand("B3"),
                Token::RParen,
                Token::Operator(Operator::Mul),
                operand("4"),
            ]
        );
    }

    #[test]
    fn test_tokenize_adjacent_operators() {
        assert_eq!(
            tokenize("1+-2"),
            vec![
                operand("1"),
                Token::Operator(Operator::Add),
                Token::Operator(Operator::Sub),
                operand("2"),
            ]
        );
    }

    #[test]
    fn test_tokenize_does_not_split_operands() {
        assert_eq!(
            tokenize("[]/x1y"),
            vec![operand("[]"), Token::Operator(Operator::Div), operand("x1y")]
        );
    }

    #[test]
    fn test_token_display_round_trips_body() {
        let body = "((A1-2)/B7)*[]";
        let rebuilt: String = tokenize(body).iter().map(Token::to_string).collect();
        assert_eq!(rebuilt, body);
    }

    #[test]
    fn test_has_operator() {
        assert!(!has_operator(&tokenize("A1")));
        assert!(!has_operator(&tokenize("(A1)")));
        assert!(has_operator(&tokenize("A1/2")));
    }
}
