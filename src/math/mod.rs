//! Arithmetic tools, numeric normalization, and the expression evaluator.
//!
//! # Module Structure
//!
//! - [`number`](crate::math::number) - Canonical numeric values (exact
//!   big integers or floats) and the input normalizer
//! - [`expr`](crate::math::expr) - The safe expression evaluator: lexer,
//!   recursive-descent parser, and tree-walking interpreter over a closed
//!   namespace
//! - [`tools`](crate::math::tools) - The arithmetic tool set (`calculate`,
//!   `add`, `divide`, `factorial`, ...)
//!
//! # Numeric model
//!
//! Integers are arbitrary precision and arithmetic on them is exact;
//! anything fractional is an `f64`. Promotion to float happens only at
//! explicit points: true division, mixed-type operators, and float-only
//! functions. There is no process-global precision setting.

pub mod expr;
pub mod number;
pub mod tools;

/// Largest accepted factorial operand.
pub const MAX_FACTORIAL: u32 = 10_000;

/// Upper bound on the bit length of an exact integer power result.
pub const MAX_POW_RESULT_BITS: u64 = 1 << 22;

/// Longest accepted `calculate` expression, in characters.
pub const MAX_EXPRESSION_LEN: usize = 4_096;

/// Deepest nesting the expression parser accepts.
pub const MAX_PARSE_DEPTH: usize = 64;

/// Largest base-10 exponent magnitude the normalizer will materialize.
pub const MAX_TEXT_EXPONENT: i64 = 10_000;
