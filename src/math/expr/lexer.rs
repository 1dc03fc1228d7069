//! Tokenizer for arithmetic expressions.

use num_bigint::BigInt;

use super::EvalError;
use crate::math::number::Number;

/// A single lexical token.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Token {
    Number(Number),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    DoubleSlash,
    Percent,
    DoubleStar,
    LParen,
    RParen,
    Comma,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Ident(name) => write!(f, "{}", name),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::DoubleSlash => write!(f, "//"),
            Token::Percent => write!(f, "%"),
            Token::DoubleStar => write!(f, "**"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
        }
    }
}

/// A token together with the character offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SpannedToken {
    pub token: Token,
    pub pos: usize,
}

/// Split an expression into tokens. Offsets in diagnostics are zero-based
/// character positions.
pub(super) fn tokenize(input: &str) -> Result<Vec<SpannedToken>, EvalError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                pos += 1;
            }
            '+' => {
                tokens.push(SpannedToken { token: Token::Plus, pos });
                pos += 1;
            }
            '-' => {
                tokens.push(SpannedToken { token: Token::Minus, pos });
                pos += 1;
            }
            '*' => {
                if chars.get(pos + 1) == Some(&'*') {
                    tokens.push(SpannedToken { token: Token::DoubleStar, pos });
                    pos += 2;
                } else {
                    tokens.push(SpannedToken { token: Token::Star, pos });
                    pos += 1;
                }
            }
            '/' => {
                if chars.get(pos + 1) == Some(&'/') {
                    tokens.push(SpannedToken { token: Token::DoubleSlash, pos });
                    pos += 2;
                } else {
                    tokens.push(SpannedToken { token: Token::Slash, pos });
                    pos += 1;
                }
            }
            '%' => {
                tokens.push(SpannedToken { token: Token::Percent, pos });
                pos += 1;
            }
            '(' => {
                tokens.push(SpannedToken { token: Token::LParen, pos });
                pos += 1;
            }
            ')' => {
                tokens.push(SpannedToken { token: Token::RParen, pos });
                pos += 1;
            }
            ',' => {
                tokens.push(SpannedToken { token: Token::Comma, pos });
                pos += 1;
            }
            _ if c.is_ascii_digit() || (c == '.' && next_is_digit(&chars, pos + 1)) => {
                let (token, next) = lex_number(&chars, pos)?;
                tokens.push(SpannedToken { token, pos });
                pos = next;
            }
            _ if c.is_alphabetic() || c == '_' => {
                let start = pos;
                while pos < chars.len() && (chars[pos].is_alphanumeric() || chars[pos] == '_') {
                    pos += 1;
                }
                let name: String = chars[start..pos].iter().collect();
                tokens.push(SpannedToken { token: Token::Ident(name), pos: start });
            }
            _ => {
                return Err(EvalError::Syntax(format!(
                    "Unexpected character '{}' at position {}",
                    c, pos
                )));
            }
        }
    }

    Ok(tokens)
}

fn next_is_digit(chars: &[char], pos: usize) -> bool {
    chars.get(pos).is_some_and(|c| c.is_ascii_digit())
}

/// Lex a numeric literal starting at `start`. A literal containing a decimal
/// point or exponent is a float; a bare digit run is an exact integer. An
/// `e`/`E` is only consumed as an exponent marker when digits follow it, so
/// `2e` lexes as the integer `2` followed by the identifier `e`.
fn lex_number(chars: &[char], start: usize) -> Result<(Token, usize), EvalError> {
    let mut pos = start;
    let mut is_float = false;

    while pos < chars.len() && chars[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos < chars.len() && chars[pos] == '.' {
        is_float = true;
        pos += 1;
        while pos < chars.len() && chars[pos].is_ascii_digit() {
            pos += 1;
        }
    }
    if pos < chars.len() && (chars[pos] == 'e' || chars[pos] == 'E') {
        let mut after = pos + 1;
        if after < chars.len() && (chars[after] == '+' || chars[after] == '-') {
            after += 1;
        }
        if next_is_digit(chars, after) {
            is_float = true;
            pos = after;
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
            }
        }
    }

    let lexeme: String = chars[start..pos].iter().collect();
    let token = if is_float {
        let value: f64 = lexeme.parse().map_err(|_| {
            EvalError::Syntax(format!("Invalid number '{}' at position {}", lexeme, start))
        })?;
        Token::Number(Number::Float(value))
    } else {
        let value: BigInt = lexeme.parse().map_err(|_| {
            EvalError::Syntax(format!("Invalid number '{}' at position {}", lexeme, start))
        })?;
        Token::Number(Number::Int(value))
    };
    Ok((token, pos))
}
