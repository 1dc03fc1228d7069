//! Safe expression evaluation over a closed namespace.
//!
//! An expression is tokenized, parsed by a recursive-descent parser into an
//! AST, and walked by an interpreter that resolves identifiers only against
//! a fixed allow-list of functions and the constants `pi` and `e`. There is
//! no general symbol table and no access to anything outside the allow-list,
//! so hostile input fails closed with an unknown-identifier error.
//!
//! Operator semantics follow the usual conventions for mixed
//! integer/float arithmetic: integers are exact and unbounded, `/` always
//! yields a float, `//` and `%` use floor semantics, and `**` is
//! right-associative and binds tighter than unary minus on its left
//! (`-2**2` is `-4`, `2**-1` is `0.5`).
//!
//! # Example
//!
//! ```
//! use satchel::math::expr::evaluate;
//! use satchel::math::number::Number;
//!
//! let result = evaluate("sqrt(16) + 2**3").unwrap();
//! assert_eq!(result, Number::Float(12.0));
//! ```

mod eval;
mod lexer;
mod parser;

use crate::math::number::Number;

/// Failures from expression evaluation. The display strings are the
/// messages surfaced in error envelopes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// Zero divisor encountered while evaluating.
    #[error("Division by zero")]
    DivisionByZero,
    /// The expression could not be parsed; carries the parser diagnostic.
    #[error("Invalid expression syntax: {0}")]
    Syntax(String),
    /// Any other evaluation failure: unknown identifier, wrong arity,
    /// domain violation, overflow.
    #[error("Evaluation error: {0}")]
    Eval(String),
}

/// Evaluate a single expression against the closed namespace.
pub fn evaluate(expression: &str) -> Result<Number, EvalError> {
    let tokens = lexer::tokenize(expression)?;
    let ast = parser::parse(tokens)?;
    eval::eval(&ast)
}
