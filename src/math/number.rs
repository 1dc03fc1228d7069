//! Canonical numeric values and the input normalizer.
//!
//! Tool arguments arrive as JSON numbers or numeric strings. Normalization
//! reduces every accepted input to a [`Number`]: an exact arbitrary-precision
//! integer when the value has no fractional part, an `f64` otherwise.
//! String inputs without a decimal point or exponent parse as integers
//! directly; anything else parses as an exact decimal first, so `"2.5e10"`
//! and `"3.00"` normalize to integers while `"1.5"` stays a float.

use crate::math::{MAX_POW_RESULT_BITS, MAX_TEXT_EXPONENT};
use crate::types::{AppError, Result};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

// ============= Input Shapes =============

/// A numeric tool operand as it appears on the wire: a JSON number or a
/// numeric string. Very large integers should be passed as strings since
/// JSON interchange is lossy beyond 64 bits.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Operand {
    /// A JSON integer.
    Int(i64),
    /// A JSON float.
    Float(f64),
    /// A numeric string such as `"42"`, `"1.5"`, or `"2.5e10"`.
    Text(String),
}

// ============= Canonical Values =============

/// Canonical numeric value: an exact arbitrary-precision integer or an
/// `f64`. All arithmetic tools and the expression evaluator operate on
/// this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// Exact integer of unbounded size.
    Int(BigInt),
    /// Finite-precision float.
    Float(f64),
}

/// Failures raised by numeric operations themselves, independent of which
/// tool invoked them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumericError {
    /// Zero divisor in `/`, `//`, or `%`, or zero base with negative exponent.
    #[error("Division by zero")]
    DivisionByZero,
    /// Result exceeds the representable or configured size bounds.
    #[error("Result too large to compute")]
    Overflow,
    /// Input outside the function's mathematical domain.
    #[error("math domain error")]
    Domain,
}

impl Number {
    /// Normalize a JSON argument into a canonical numeric value.
    ///
    /// JSON integers stay exact; JSON floats stay floats; strings go
    /// through text parsing. Everything else is a validation error naming
    /// the offending literal.
    pub fn normalize(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Number::Int(BigInt::from(i)))
                } else if let Some(u) = n.as_u64() {
                    Ok(Number::Int(BigInt::from(u)))
                } else if let Some(f) = n.as_f64() {
                    Ok(Number::Float(f))
                } else {
                    Err(convert_error(value))
                }
            }
            Value::String(s) => Self::parse_text(s),
            _ => Err(convert_error(value)),
        }
    }

    /// Parse a numeric string.
    ///
    /// No decimal point and no exponent marker means arbitrary-precision
    /// integer. Otherwise the text parses as an exact decimal; a fractional
    /// part of exactly zero reduces to an integer, anything else converts
    /// to `f64`.
    pub fn parse_text(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(text_error(text));
        }
        let has_exponent = trimmed.bytes().any(|b| b == b'e' || b == b'E');
        if !trimmed.contains('.') && !has_exponent {
            return trimmed
                .parse::<BigInt>()
                .map(Number::Int)
                .map_err(|_| text_error(text));
        }
        parse_decimal(trimmed).ok_or_else(|| text_error(text))
    }

    /// True for the integer variant.
    pub fn is_int(&self) -> bool {
        matches!(self, Number::Int(_))
    }

    /// True when the value equals zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Number::Int(i) => i.is_zero(),
            Number::Float(f) => *f == 0.0,
        }
    }

    /// True when the value is strictly negative.
    pub fn is_negative(&self) -> bool {
        match self {
            Number::Int(i) => i.is_negative(),
            Number::Float(f) => *f < 0.0,
        }
    }

    /// True when the value is strictly positive.
    pub fn is_positive(&self) -> bool {
        match self {
            Number::Int(i) => i.is_positive(),
            Number::Float(f) => *f > 0.0,
        }
    }

    /// The value as `f64`. Integers too large for a finite float are an
    /// overflow rather than a silent infinity.
    pub fn to_f64(&self) -> std::result::Result<f64, NumericError> {
        match self {
            Number::Int(i) => {
                let f = i.to_f64().unwrap_or(f64::INFINITY);
                if f.is_finite() {
                    Ok(f)
                } else {
                    Err(NumericError::Overflow)
                }
            }
            Number::Float(f) => Ok(*f),
        }
    }

    /// The exact integer value, accepting floats with zero fractional part.
    /// `None` for anything fractional or non-finite.
    pub fn to_integer(&self) -> Option<BigInt> {
        match self {
            Number::Int(i) => Some(i.clone()),
            Number::Float(f) if f.is_finite() && f.fract() == 0.0 => BigInt::from_f64(*f),
            Number::Float(_) => None,
        }
    }

    /// Natural logarithm. Integers beyond `f64` range are computed from the
    /// bit length, so `log` stays usable on exact big-integer results.
    pub fn ln(&self) -> std::result::Result<f64, NumericError> {
        match self {
            Number::Int(i) => {
                if !i.is_positive() {
                    return Err(NumericError::Domain);
                }
                match i.to_f64().filter(|f| f.is_finite()) {
                    Some(f) => Ok(f.ln()),
                    None => {
                        let shift = i.bits().saturating_sub(64);
                        let top = (i >> shift).to_f64().unwrap_or(f64::MAX);
                        Ok(top.ln() + shift as f64 * std::f64::consts::LN_2)
                    }
                }
            }
            Number::Float(f) => {
                if *f <= 0.0 {
                    return Err(NumericError::Domain);
                }
                Ok(f.ln())
            }
        }
    }

    // ============= Arithmetic =============

    /// Exact on integers, float otherwise.
    pub fn add(&self, other: &Number) -> std::result::Result<Number, NumericError> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Ok(Number::Int(a + b)),
            _ => Ok(Number::Float(self.to_f64()? + other.to_f64()?)),
        }
    }

    /// Exact on integers, float otherwise.
    pub fn sub(&self, other: &Number) -> std::result::Result<Number, NumericError> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Ok(Number::Int(a - b)),
            _ => Ok(Number::Float(self.to_f64()? - other.to_f64()?)),
        }
    }

    /// Exact on integers, float otherwise.
    pub fn mul(&self, other: &Number) -> std::result::Result<Number, NumericError> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Ok(Number::Int(a * b)),
            _ => Ok(Number::Float(self.to_f64()? * other.to_f64()?)),
        }
    }

    /// True division: always a float, zero divisor rejected.
    pub fn div(&self, other: &Number) -> std::result::Result<Number, NumericError> {
        if other.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Number::Float(self.to_f64()? / other.to_f64()?))
    }

    /// Floor division; integer operands stay exact, result sign follows
    /// the divisor.
    pub fn floordiv(&self, other: &Number) -> std::result::Result<Number, NumericError> {
        if other.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Ok(Number::Int(a.div_floor(b))),
            _ => Ok(Number::Float((self.to_f64()? / other.to_f64()?).floor())),
        }
    }

    /// Floor-style modulo, result sign follows the divisor.
    pub fn rem(&self, other: &Number) -> std::result::Result<Number, NumericError> {
        if other.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Ok(Number::Int(a.mod_floor(b))),
            _ => {
                let a = self.to_f64()?;
                let b = other.to_f64()?;
                Ok(Number::Float(a - b * (a / b).floor()))
            }
        }
    }

    /// Exponentiation. Integer base with non-negative integer exponent is
    /// exact, guarded by [`MAX_POW_RESULT_BITS`]; everything else goes
    /// through `f64::powf`.
    pub fn pow(&self, exponent: &Number) -> std::result::Result<Number, NumericError> {
        if let (Number::Int(base), Number::Int(exp)) = (self, exponent) {
            if !exp.is_negative() {
                // 0, 1, -1 short-circuit so the bit guard never rejects them
                if base.abs() <= BigInt::one() {
                    let result = if base.is_zero() {
                        if exp.is_zero() {
                            BigInt::one()
                        } else {
                            BigInt::zero()
                        }
                    } else if base.is_one() || exp.is_even() {
                        BigInt::one()
                    } else {
                        -BigInt::one()
                    };
                    return Ok(Number::Int(result));
                }
                let exp_u32 = exp.to_u32().ok_or(NumericError::Overflow)?;
                let result_bits = base.bits().saturating_mul(exp_u32 as u64);
                if result_bits > MAX_POW_RESULT_BITS {
                    return Err(NumericError::Overflow);
                }
                return Ok(Number::Int(num_traits::pow(base.clone(), exp_u32 as usize)));
            }
        }
        let base = self.to_f64()?;
        let exp = exponent.to_f64()?;
        if base == 0.0 && exp < 0.0 {
            return Err(NumericError::DivisionByZero);
        }
        let result = base.powf(exp);
        if result.is_finite() {
            Ok(Number::Float(result))
        } else if base < 0.0 && exp.fract() != 0.0 {
            Err(NumericError::Domain)
        } else {
            Err(NumericError::Overflow)
        }
    }

    /// Negation, preserving the variant.
    pub fn neg(&self) -> Number {
        match self {
            Number::Int(i) => Number::Int(-i),
            Number::Float(f) => Number::Float(-f),
        }
    }

    /// Absolute value, preserving the variant.
    pub fn abs(&self) -> Number {
        match self {
            Number::Int(i) => Number::Int(i.abs()),
            Number::Float(f) => Number::Float(f.abs()),
        }
    }

    /// Largest integer ≤ the value; integers pass through.
    pub fn floor(&self) -> std::result::Result<Number, NumericError> {
        match self {
            Number::Int(i) => Ok(Number::Int(i.clone())),
            Number::Float(f) => big_from_f64(f.floor()).map(Number::Int),
        }
    }

    /// Smallest integer ≥ the value; integers pass through.
    pub fn ceil(&self) -> std::result::Result<Number, NumericError> {
        match self {
            Number::Int(i) => Ok(Number::Int(i.clone())),
            Number::Float(f) => big_from_f64(f.ceil()).map(Number::Int),
        }
    }

    /// Truncation toward zero; integers pass through.
    pub fn trunc(&self) -> std::result::Result<Number, NumericError> {
        match self {
            Number::Int(i) => Ok(Number::Int(i.clone())),
            Number::Float(f) => big_from_f64(f.trunc()).map(Number::Int),
        }
    }

    // ============= JSON Encoding =============

    /// Encode for the wire. Integers within 64-bit range become JSON
    /// numbers, larger ones decimal strings; non-finite floats become
    /// `"Infinity"`/`"-Infinity"`/`"NaN"` strings.
    pub fn into_json(self) -> Value {
        match self {
            Number::Int(i) => {
                if let Some(v) = i.to_i64() {
                    json!(v)
                } else if let Some(v) = i.to_u64() {
                    json!(v)
                } else {
                    Value::String(i.to_string())
                }
            }
            Number::Float(f) => match serde_json::Number::from_f64(f) {
                Some(n) => Value::Number(n),
                None if f.is_nan() => Value::String("NaN".to_string()),
                None if f > 0.0 => Value::String("Infinity".to_string()),
                None => Value::String("-Infinity".to_string()),
            },
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(v) => write!(f, "{}", v),
        }
    }
}

// ============= Shared Helpers =============

/// `n!` as an exact integer. Callers enforce the configured bound.
pub fn factorial(n: u32) -> BigInt {
    let mut acc = BigInt::one();
    for k in 2..=n {
        acc *= k;
    }
    acc
}

/// Round an integer to a multiple of `10^scale_digits`, ties to even.
pub(crate) fn round_int_to_scale(value: &BigInt, scale_digits: u32) -> BigInt {
    let scale = num_traits::pow(BigInt::from(10), scale_digits as usize);
    let (quotient, remainder) = value.div_mod_floor(&scale);
    let twice = &remainder * 2;
    let rounded = if twice > scale || (twice == scale && quotient.is_odd()) {
        quotient + 1
    } else {
        quotient
    };
    rounded * scale
}

fn big_from_f64(f: f64) -> std::result::Result<BigInt, NumericError> {
    BigInt::from_f64(f).ok_or(NumericError::Domain)
}

fn convert_error(value: &Value) -> AppError {
    let shown = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    AppError::Validation(format!("Cannot convert '{}' to number", shown))
}

fn text_error(text: &str) -> AppError {
    AppError::Validation(format!("Cannot convert '{}' to number", text))
}

/// Exact decimal parse: significand digits plus a base-10 scale, reduced
/// to an integer when the fractional part is exactly zero.
fn parse_decimal(text: &str) -> Option<Number> {
    let (mantissa, exp_part) = match text.find(['e', 'E']) {
        Some(pos) => (&text[..pos], Some(&text[pos + 1..])),
        None => (text, None),
    };
    let exponent: i64 = match exp_part {
        Some(e) if !e.is_empty() => e.parse().ok()?,
        Some(_) => return None,
        None => 0,
    };
    if exponent.abs() > MAX_TEXT_EXPONENT {
        return None;
    }

    let (negative, unsigned) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (unsigned, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let mut digits: BigInt = format!("{}{}", int_part, frac_part).parse().ok()?;
    if negative {
        digits = -digits;
    }
    let mut scale = frac_part.len() as i64 - exponent;

    let ten = BigInt::from(10);
    while scale > 0 && !digits.is_zero() && (&digits % &ten).is_zero() {
        digits /= &ten;
        scale -= 1;
    }
    if digits.is_zero() {
        scale = 0;
    }

    if scale <= 0 {
        let shifted = digits * num_traits::pow(ten, (-scale) as usize);
        Some(Number::Int(shifted))
    } else {
        text.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Number::Float)
    }
}
