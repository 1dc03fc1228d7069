//! Recursive-descent parser producing the expression AST.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr   := term (("+" | "-") term)*
//! term   := factor (("*" | "/" | "//" | "%") factor)*
//! factor := ("+" | "-") factor | power
//! power  := atom ("**" factor)?
//! atom   := NUMBER | IDENT | IDENT "(" args ")" | "(" expr ")"
//! args   := [expr ("," expr)*]
//! ```
//!
//! `**` is right-associative and its right operand re-enters `factor`, so
//! `2**-1` parses and `-2**2` negates the power.

use super::lexer::{SpannedToken, Token};
use super::EvalError;
use crate::math::number::Number;
use crate::math::MAX_PARSE_DEPTH;

/// Expression AST node.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Expr {
    Number(Number),
    Ident(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum UnaryOp {
    Neg,
    Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

/// Parse a token stream into an AST, consuming all tokens.
pub(super) fn parse(tokens: Vec<SpannedToken>) -> Result<Expr, EvalError> {
    let mut parser = Parser { tokens, pos: 0, depth: 0 };
    let expr = parser.parse_expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(tok) => Err(EvalError::Syntax(format!(
            "Unexpected token '{}' at position {}",
            tok.token, tok.pos
        ))),
    }
}

struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<SpannedToken> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// Consume the next token if it matches, without consuming on mismatch.
    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek().map(|t| &t.token) == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek().map(|t| &t.token) {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_term()?;
            left = Expr::Binary { op, left: Box::new(left), right: Box::new(right) };
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.peek().map(|t| &t.token) {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::DoubleSlash) => BinaryOp::FloorDiv,
                Some(Token::Percent) => BinaryOp::Mod,
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_factor()?;
            left = Expr::Binary { op, left: Box::new(left), right: Box::new(right) };
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr, EvalError> {
        self.depth += 1;
        if self.depth > MAX_PARSE_DEPTH {
            return Err(EvalError::Syntax("Expression too deeply nested".to_string()));
        }
        let result = match self.peek().map(|t| &t.token) {
            Some(Token::Minus) => {
                self.pos += 1;
                let operand = self.parse_factor()?;
                Ok(Expr::Unary { op: UnaryOp::Neg, operand: Box::new(operand) })
            }
            Some(Token::Plus) => {
                self.pos += 1;
                let operand = self.parse_factor()?;
                Ok(Expr::Unary { op: UnaryOp::Pos, operand: Box::new(operand) })
            }
            _ => self.parse_power(),
        };
        self.depth -= 1;
        result
    }

    fn parse_power(&mut self) -> Result<Expr, EvalError> {
        let base = self.parse_atom()?;
        if self.eat(&Token::DoubleStar) {
            // the exponent re-enters factor so unary signs bind to it
            let exponent = self.parse_factor()?;
            return Ok(Expr::Binary {
                op: BinaryOp::Pow,
                left: Box::new(base),
                right: Box::new(exponent),
            });
        }
        Ok(base)
    }

    fn parse_atom(&mut self) -> Result<Expr, EvalError> {
        let tok = match self.advance() {
            Some(tok) => tok,
            None => return Err(EvalError::Syntax("Unexpected end of expression".to_string())),
        };
        match tok.token {
            Token::Number(value) => Ok(Expr::Number(value)),
            Token::Ident(name) => {
                if self.eat(&Token::LParen) {
                    let args = self.parse_args()?;
                    Ok(Expr::Call { name, args })
                } else {
                    Ok(Expr::Ident(name))
                }
            }
            Token::LParen => {
                let inner = self.parse_expr()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            other => Err(EvalError::Syntax(format!(
                "Unexpected token '{}' at position {}",
                other, tok.pos
            ))),
        }
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, EvalError> {
        let mut args = Vec::new();
        if self.eat(&Token::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            if self.eat(&Token::Comma) {
                continue;
            }
            self.expect_rparen()?;
            return Ok(args);
        }
    }

    fn expect_rparen(&mut self) -> Result<(), EvalError> {
        match self.advance() {
            Some(SpannedToken { token: Token::RParen, .. }) => Ok(()),
            Some(tok) => Err(EvalError::Syntax(format!(
                "Expected ')' but found '{}' at position {}",
                tok.token, tok.pos
            ))),
            None => Err(EvalError::Syntax("Expected ')' before end of expression".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::lexer::tokenize;
    use super::*;
    use num_bigint::BigInt;

    fn parse_str(input: &str) -> Result<Expr, EvalError> {
        parse(tokenize(input)?)
    }

    fn num(v: i64) -> Expr {
        Expr::Number(Number::Int(BigInt::from(v)))
    }

    #[test]
    fn test_precedence() {
        // 2 + 3 * 4 parses as 2 + (3 * 4)
        let expr = parse_str("2 + 3 * 4").unwrap();
        assert_eq!(
            expr,
            Expr::Binary {
                op: BinaryOp::Add,
                left: Box::new(num(2)),
                right: Box::new(Expr::Binary {
                    op: BinaryOp::Mul,
                    left: Box::new(num(3)),
                    right: Box::new(num(4)),
                }),
            }
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        let expr = parse_str("2**3**2").unwrap();
        assert_eq!(
            expr,
            Expr::Binary {
                op: BinaryOp::Pow,
                left: Box::new(num(2)),
                right: Box::new(Expr::Binary {
                    op: BinaryOp::Pow,
                    left: Box::new(num(3)),
                    right: Box::new(num(2)),
                }),
            }
        );
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        let expr = parse_str("-2**2").unwrap();
        assert_eq!(
            expr,
            Expr::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(Expr::Binary {
                    op: BinaryOp::Pow,
                    left: Box::new(num(2)),
                    right: Box::new(num(2)),
                }),
            }
        );
    }

    #[test]
    fn test_call_with_arguments() {
        let expr = parse_str("atan2(1, 2)").unwrap();
        assert_eq!(
            expr,
            Expr::Call { name: "atan2".to_string(), args: vec![num(1), num(2)] }
        );
    }

    #[test]
    fn test_call_with_no_arguments() {
        let expr = parse_str("f()").unwrap();
        assert_eq!(expr, Expr::Call { name: "f".to_string(), args: vec![] });
    }

    #[test]
    fn test_bare_identifier() {
        assert_eq!(parse_str("pi").unwrap(), Expr::Ident("pi".to_string()));
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse_str("1 2").unwrap_err();
        assert_eq!(
            err,
            EvalError::Syntax("Unexpected token '2' at position 2".to_string())
        );
    }

    #[test]
    fn test_missing_operand() {
        let err = parse_str("2 +").unwrap_err();
        assert_eq!(err, EvalError::Syntax("Unexpected end of expression".to_string()));
    }

    #[test]
    fn test_unbalanced_parens() {
        let err = parse_str("(1 + 2").unwrap_err();
        assert_eq!(
            err,
            EvalError::Syntax("Expected ')' before end of expression".to_string())
        );
    }

    #[test]
    fn test_depth_limit() {
        let ok = format!("{}1{}", "(".repeat(40), ")".repeat(40));
        assert!(parse_str(&ok).is_ok());

        let too_deep = format!("{}1{}", "(".repeat(80), ")".repeat(80));
        let err = parse_str(&too_deep).unwrap_err();
        assert_eq!(err, EvalError::Syntax("Expression too deeply nested".to_string()));
    }
}
