//! Expression parsing and evaluation.
//!
//! Tokens are parsed into an [`Expr`] tree by precedence climbing (`*` and
//! `/` bind tighter than `+` and `-`, equal precedence associates left), then
//! the tree is reduced to an `i64`. Cell values are only ever read through
//! the resolver passed to [`Expr::eval`].

use super::ErrorCode;
use super::cell::EMPTY_MARKER;
use super::cell_ref::{CellRef, reference_re};
use super::token::{Operator, Token, has_operator};

/// Parsed formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Literal(i64),
    Ref(CellRef),
    /// The `[]` marker used as an operand; always zero.
    Empty,
    Binary(Box<Expr>, Operator, Box<Expr>),
}

impl Expr {
    /// Cells this expression reads, left to right, duplicates kept.
    pub fn references(&self) -> Vec<CellRef> {
        let mut refs = Vec::new();
        self.collect_references(&mut refs);
        refs
    }

    fn collect_references(&self, refs: &mut Vec<CellRef>) {
        match self {
            Expr::Ref(cell_ref) => refs.push(*cell_ref),
            Expr::Binary(lhs, _, rhs) => {
                lhs.collect_references(refs);
                rhs.collect_references(refs);
            }
            Expr::Literal(_) | Expr::Empty => {}
        }
    }

    /// Reduce the expression. Operands are evaluated left to right and the
    /// first error wins.
    pub fn eval<F>(&self, resolve: &mut F) -> Result<i64, ErrorCode>
    where
        F: FnMut(CellRef) -> Result<i64, ErrorCode>,
    {
        match self {
            Expr::Literal(n) => Ok(*n),
            Expr::Empty => Ok(0),
            Expr::Ref(cell_ref) => resolve(*cell_ref),
            Expr::Binary(lhs, op, rhs) => {
                let l = lhs.eval(resolve)?;
                let r = rhs.eval(resolve)?;
                apply(*op, l, r)
            }
        }
    }
}

fn apply(op: Operator, l: i64, r: i64) -> Result<i64, ErrorCode> {
    let result = match op {
        Operator::Add => l.checked_add(r),
        Operator::Sub => l.checked_sub(r),
        Operator::Mul => l.checked_mul(r),
        Operator::Div => {
            if r == 0 {
                return Err(ErrorCode::DivByZero);
            }
            l.checked_div(r)
        }
    };
    result.ok_or(ErrorCode::GenericError)
}

/// Parse a token sequence into an expression tree.
///
/// Structural problems (missing operands, an operator at the start of a
/// group, unbalanced parentheses, trailing tokens) are
/// [`ErrorCode::GenericError`]; operands that are neither digits, a
/// reference nor `[]` are [`ErrorCode::InvalidInput`].
pub fn parse(tokens: &[Token]) -> Result<Expr, ErrorCode> {
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_expr(1)?;
    if parser.pos != tokens.len() {
        return Err(ErrorCode::GenericError);
    }
    Ok(expr)
}

/// Check and parse a tokenized formula body.
///
/// A body without any arithmetic operator is [`ErrorCode::MissingOperator`],
/// even when it would otherwise parse (`=A1`, `=(5)`).
pub fn compile(tokens: &[Token]) -> Result<Expr, ErrorCode> {
    if !has_operator(tokens) {
        return Err(ErrorCode::MissingOperator);
    }
    parse(tokens)
}

/// Evaluate a tokenized formula body.
pub fn evaluate<F>(tokens: &[Token], resolve: &mut F) -> Result<i64, ErrorCode>
where
    F: FnMut(CellRef) -> Result<i64, ErrorCode>,
{
    compile(tokens)?.eval(resolve)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn peek_operator(&self) -> Option<Operator> {
        match self.tokens.get(self.pos) {
            Some(Token::Operator(op)) => Some(*op),
            _ => None,
        }
    }

    fn parse_expr(&mut self, min_precedence: u8) -> Result<Expr, ErrorCode> {
        let mut lhs = self.parse_primary()?;

        while let Some(op) = self.peek_operator() {
            if op.precedence() < min_precedence {
                break;
            }
            self.pos += 1;
            let rhs = self.parse_expr(op.precedence() + 1)?;
            lhs = Expr::Binary(Box::new(lhs), op, Box::new(rhs));
        }

        Ok(lhs)
    }

    fn parse_primary(&mut self) -> Result<Expr, ErrorCode> {
        match self.next() {
            Some(Token::Operand(text)) => parse_operand(text),
            Some(Token::LParen) => {
                let inner = self.parse_expr(1)?;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(ErrorCode::GenericError),
                }
            }
            // Operator where an operand belongs, stray ')' or nothing left.
            Some(Token::Operator(_)) | Some(Token::RParen) | None => Err(ErrorCode::GenericError),
        }
    }
}

fn parse_operand(text: &str) -> Result<Expr, ErrorCode> {
    if text.bytes().all(|b| b.is_ascii_digit()) {
        return text
            .parse::<i64>()
            .map(Expr::Literal)
            .map_err(|_| ErrorCode::GenericError);
    }

    if reference_re().is_match(text) {
        return CellRef::parse_a1(text).map(Expr::Ref);
    }

    if text == EMPTY_MARKER {
        return Ok(Expr::Empty);
    }

    Err(ErrorCode::InvalidInput)
}
