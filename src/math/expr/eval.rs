//! Tree-walking interpreter over the closed namespace.
//!
//! Identifiers resolve against a fixed table: the constants `pi` and `e`
//! plus the allow-listed functions below. Anything else is an evaluation
//! error, which is what keeps arbitrary input from reaching past the
//! arithmetic surface.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive};

use super::parser::{BinaryOp, Expr, UnaryOp};
use super::EvalError;
use crate::math::number::{factorial, round_int_to_scale, Number, NumericError};
use crate::math::MAX_FACTORIAL;

/// Names resolvable in call position.
const FUNCTIONS: &[&str] = &[
    "abs", "round", "min", "max", "sum", "int", "float", "pow", "sqrt", "cbrt",
    "exp", "log", "log10", "log2", "sin", "cos", "tan", "asin", "acos", "atan",
    "atan2", "sinh", "cosh", "tanh", "ceil", "floor", "trunc", "degrees",
    "radians", "factorial", "gcd", "lcm",
];

impl From<NumericError> for EvalError {
    fn from(err: NumericError) -> Self {
        match err {
            NumericError::DivisionByZero => EvalError::DivisionByZero,
            other => EvalError::Eval(other.to_string()),
        }
    }
}

/// Evaluate an AST to a single numeric value.
pub(super) fn eval(expr: &Expr) -> Result<Number, EvalError> {
    match expr {
        Expr::Number(value) => Ok(value.clone()),
        Expr::Ident(name) => lookup_name(name),
        Expr::Unary { op, operand } => {
            let value = eval(operand)?;
            match op {
                UnaryOp::Neg => Ok(value.neg()),
                UnaryOp::Pos => Ok(value),
            }
        }
        Expr::Binary { op, left, right } => {
            let lhs = eval(left)?;
            let rhs = eval(right)?;
            let result = match op {
                BinaryOp::Add => lhs.add(&rhs),
                BinaryOp::Sub => lhs.sub(&rhs),
                BinaryOp::Mul => lhs.mul(&rhs),
                BinaryOp::Div => lhs.div(&rhs),
                BinaryOp::FloorDiv => lhs.floordiv(&rhs),
                BinaryOp::Mod => lhs.rem(&rhs),
                BinaryOp::Pow => lhs.pow(&rhs),
            };
            Ok(result?)
        }
        Expr::Call { name, args } => {
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval(arg)?);
            }
            call_function(name, &values)
        }
    }
}

fn lookup_name(name: &str) -> Result<Number, EvalError> {
    match name {
        "pi" => Ok(Number::Float(std::f64::consts::PI)),
        "e" => Ok(Number::Float(std::f64::consts::E)),
        _ if FUNCTIONS.contains(&name) => Err(EvalError::Eval(format!(
            "'{}' is a function; call it with arguments",
            name
        ))),
        _ => Err(EvalError::Eval(format!("Unknown identifier '{}'", name))),
    }
}

fn call_function(name: &str, args: &[Number]) -> Result<Number, EvalError> {
    match name {
        "abs" => {
            exactly(name, args, 1)?;
            Ok(args[0].abs())
        }
        "round" => round_args(args),
        "min" => extremum(name, args, false),
        "max" => extremum(name, args, true),
        "sum" => {
            at_least_one(name, args)?;
            let mut total = args[0].clone();
            for value in &args[1..] {
                total = total.add(value)?;
            }
            Ok(total)
        }
        "int" => {
            exactly(name, args, 1)?;
            Ok(args[0].trunc()?)
        }
        "float" => {
            exactly(name, args, 1)?;
            Ok(Number::Float(args[0].to_f64()?))
        }
        "pow" => {
            exactly(name, args, 2)?;
            Ok(args[0].pow(&args[1])?)
        }
        "sqrt" => {
            let x = float_arg(name, args)?;
            if x < 0.0 {
                return Err(domain_error());
            }
            Ok(Number::Float(x.sqrt()))
        }
        "cbrt" => {
            let x = float_arg(name, args)?;
            Ok(Number::Float(x.cbrt()))
        }
        "exp" => range_checked(name, args, f64::exp),
        "log" => log_args(args),
        "log10" => scaled_log(name, args, std::f64::consts::LN_10),
        "log2" => scaled_log(name, args, std::f64::consts::LN_2),
        "sin" => finite_input(name, args, f64::sin),
        "cos" => finite_input(name, args, f64::cos),
        "tan" => finite_input(name, args, f64::tan),
        "asin" => unit_interval(name, args, f64::asin),
        "acos" => unit_interval(name, args, f64::acos),
        "atan" => {
            let x = float_arg(name, args)?;
            Ok(Number::Float(x.atan()))
        }
        "atan2" => {
            exactly(name, args, 2)?;
            let y = args[0].to_f64()?;
            let x = args[1].to_f64()?;
            Ok(Number::Float(y.atan2(x)))
        }
        "sinh" => range_checked(name, args, f64::sinh),
        "cosh" => range_checked(name, args, f64::cosh),
        "tanh" => {
            let x = float_arg(name, args)?;
            Ok(Number::Float(x.tanh()))
        }
        "ceil" => {
            exactly(name, args, 1)?;
            Ok(args[0].ceil()?)
        }
        "floor" => {
            exactly(name, args, 1)?;
            Ok(args[0].floor()?)
        }
        "trunc" => {
            exactly(name, args, 1)?;
            Ok(args[0].trunc()?)
        }
        "degrees" => {
            let x = float_arg(name, args)?;
            Ok(Number::Float(x.to_degrees()))
        }
        "radians" => {
            let x = float_arg(name, args)?;
            Ok(Number::Float(x.to_radians()))
        }
        "factorial" => factorial_args(args),
        "gcd" => {
            let (a, b) = int_pair(name, args)?;
            Ok(Number::Int(a.gcd(&b)))
        }
        "lcm" => {
            let (a, b) = int_pair(name, args)?;
            Ok(Number::Int(a.lcm(&b)))
        }
        "pi" | "e" => Err(EvalError::Eval(format!("'{}' is not callable", name))),
        _ => Err(EvalError::Eval(format!("Unknown function '{}'", name))),
    }
}

// ============= Argument Helpers =============

fn exactly(name: &str, args: &[Number], count: usize) -> Result<(), EvalError> {
    if args.len() == count {
        Ok(())
    } else {
        let plural = if count == 1 { "" } else { "s" };
        Err(EvalError::Eval(format!(
            "{}() takes exactly {} argument{} ({} given)",
            name,
            count,
            plural,
            args.len()
        )))
    }
}

fn at_least_one(name: &str, args: &[Number]) -> Result<(), EvalError> {
    if args.is_empty() {
        Err(EvalError::Eval(format!(
            "{}() expected at least 1 argument (0 given)",
            name
        )))
    } else {
        Ok(())
    }
}

fn float_arg(name: &str, args: &[Number]) -> Result<f64, EvalError> {
    exactly(name, args, 1)?;
    Ok(args[0].to_f64()?)
}

fn int_pair(name: &str, args: &[Number]) -> Result<(BigInt, BigInt), EvalError> {
    exactly(name, args, 2)?;
    match (&args[0], &args[1]) {
        (Number::Int(a), Number::Int(b)) => Ok((a.clone(), b.clone())),
        _ => Err(EvalError::Eval(format!(
            "{}() requires integer arguments",
            name
        ))),
    }
}

fn domain_error() -> EvalError {
    EvalError::Eval("math domain error".to_string())
}

fn range_error() -> EvalError {
    EvalError::Eval("math range error".to_string())
}

// ============= Function Families =============

/// Trig functions reject infinite inputs; NaN passes through.
fn finite_input(name: &str, args: &[Number], f: fn(f64) -> f64) -> Result<Number, EvalError> {
    let x = float_arg(name, args)?;
    if x.is_infinite() {
        return Err(domain_error());
    }
    Ok(Number::Float(f(x)))
}

/// Inverse trig defined on [-1, 1].
fn unit_interval(name: &str, args: &[Number], f: fn(f64) -> f64) -> Result<Number, EvalError> {
    let x = float_arg(name, args)?;
    if x > 1.0 || x < -1.0 {
        return Err(domain_error());
    }
    Ok(Number::Float(f(x)))
}

/// Logarithm with a fixed base, via the natural log. [`Number::ln`] keeps
/// working on integers beyond `f64` range.
fn scaled_log(name: &str, args: &[Number], divisor: f64) -> Result<Number, EvalError> {
    exactly(name, args, 1)?;
    let ln = args[0].ln()?;
    Ok(Number::Float(ln / divisor))
}

/// Functions that overflow to infinity on large finite inputs.
fn range_checked(name: &str, args: &[Number], f: fn(f64) -> f64) -> Result<Number, EvalError> {
    let x = float_arg(name, args)?;
    let result = f(x);
    if x.is_finite() && !result.is_finite() {
        return Err(range_error());
    }
    Ok(Number::Float(result))
}

fn log_args(args: &[Number]) -> Result<Number, EvalError> {
    if args.is_empty() || args.len() > 2 {
        return Err(EvalError::Eval(format!(
            "log() takes 1 or 2 arguments ({} given)",
            args.len()
        )));
    }
    let ln_x = args[0].ln()?;
    match args.get(1) {
        None => Ok(Number::Float(ln_x)),
        Some(base) => {
            let ln_base = base.ln()?;
            if ln_base == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(Number::Float(ln_x / ln_base))
        }
    }
}

fn round_args(args: &[Number]) -> Result<Number, EvalError> {
    if args.is_empty() || args.len() > 2 {
        return Err(EvalError::Eval(format!(
            "round() takes 1 or 2 arguments ({} given)",
            args.len()
        )));
    }
    let ndigits = match args.get(1) {
        None => None,
        Some(n) => {
            let big = n
                .to_integer()
                .ok_or_else(|| EvalError::Eval("round() ndigits must be an integer".to_string()))?;
            let clamped = big
                .to_i64()
                .unwrap_or(if big.is_negative() { i64::MIN + 1 } else { i64::MAX })
                .clamp(-1_000_000, 1_000_000);
            Some(clamped)
        }
    };
    round_number(&args[0], ndigits)
}

/// Round with ties to even. Without `ndigits` the result is an integer;
/// with `ndigits` the input variant is preserved.
fn round_number(value: &Number, ndigits: Option<i64>) -> Result<Number, EvalError> {
    match (value, ndigits) {
        (Number::Int(i), None) => Ok(Number::Int(i.clone())),
        (Number::Int(i), Some(n)) => {
            if n >= 0 {
                return Ok(Number::Int(i.clone()));
            }
            // a scale wider than the value rounds to zero, so cap it there
            let width = i.abs().to_string().len() as i64 + 1;
            let scale = (-n).min(width) as u32;
            Ok(Number::Int(round_int_to_scale(i, scale)))
        }
        (Number::Float(f), None) => Ok(Number::Float(f.round_ties_even()).trunc()?),
        (Number::Float(f), Some(n)) => {
            if !f.is_finite() {
                return Ok(Number::Float(*f));
            }
            // beyond these bounds the scale factor degenerates in f64
            if n >= 16 || (n >= 0 && f.abs() >= 1e16) {
                return Ok(Number::Float(*f));
            }
            if n < -323 {
                return Ok(Number::Float(0.0));
            }
            let scale = 10f64.powi(n as i32);
            Ok(Number::Float((f * scale).round_ties_even() / scale))
        }
    }
}

/// First minimal (or maximal) argument; all-integer inputs compare exactly.
fn extremum(name: &str, args: &[Number], want_max: bool) -> Result<Number, EvalError> {
    at_least_one(name, args)?;
    if args.iter().all(Number::is_int) {
        let mut best = 0;
        for (i, candidate) in args.iter().enumerate().skip(1) {
            if let (Number::Int(a), Number::Int(b)) = (candidate, &args[best]) {
                let replace = if want_max { a > b } else { a < b };
                if replace {
                    best = i;
                }
            }
        }
        return Ok(args[best].clone());
    }
    let mut best = 0;
    let mut best_value = args[0].to_f64()?;
    for (i, candidate) in args.iter().enumerate().skip(1) {
        let value = candidate.to_f64()?;
        let replace = if want_max { value > best_value } else { value < best_value };
        if replace {
            best = i;
            best_value = value;
        }
    }
    Ok(args[best].clone())
}

fn factorial_args(args: &[Number]) -> Result<Number, EvalError> {
    exactly("factorial", args, 1)?;
    let n = match &args[0] {
        Number::Int(i) => i.clone(),
        Number::Float(_) => {
            return Err(EvalError::Eval("factorial() requires an integer".to_string()));
        }
    };
    if n.is_negative() {
        return Err(EvalError::Eval(
            "factorial() not defined for negative values".to_string(),
        ));
    }
    match n.to_u32() {
        Some(v) if v <= MAX_FACTORIAL => Ok(Number::Int(factorial(v))),
        _ => Err(EvalError::Eval(format!(
            "factorial() argument too large (max {})",
            MAX_FACTORIAL
        ))),
    }
}
