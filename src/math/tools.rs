//! Arithmetic tool surface.
//!
//! `calculate` runs whole expressions through the safe evaluator; the
//! remaining tools are single operations over the canonical numeric type.
//! Every numeric argument accepts a JSON number or a numeric string, so
//! callers can pass values beyond what 64-bit JSON numbers can carry.

use crate::math::expr::evaluate;
use crate::math::number::{factorial, Number, NumericError};
use crate::math::{MAX_EXPRESSION_LEN, MAX_FACTORIAL};
use crate::tools::registry::Tool;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use num_traits::{Signed, ToPrimitive};
use serde_json::{json, Value};

// ============= Argument Helpers =============

fn require_number(args: &Value, key: &str) -> Result<Number> {
    match args.get(key) {
        None | Some(Value::Null) => Err(AppError::Validation(format!("{} is required", key))),
        Some(value) => Number::normalize(value),
    }
}

fn math_error(prefix: &str, err: NumericError) -> AppError {
    AppError::Math(format!("{}: {}", prefix, err))
}

fn operand_schema(description: &str) -> Value {
    json!({ "type": ["number", "string"], "description": description })
}

fn result_of(value: Number) -> Value {
    json!({ "result": value.into_json() })
}

fn unit_is_degrees(args: &Value) -> bool {
    args.get("unit")
        .and_then(Value::as_str)
        .is_some_and(|u| u.eq_ignore_ascii_case("degrees"))
}

fn angle_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "angle": operand_schema("Angle value"),
            "unit": {
                "type": "string",
                "enum": ["radians", "degrees"],
                "description": "Angle unit",
                "default": "radians"
            }
        },
        "required": ["angle"]
    })
}

fn pair_schema(first: &str, second: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "a": operand_schema(first),
            "b": operand_schema(second)
        },
        "required": ["a", "b"]
    })
}

// ============= Expression Evaluation =============

/// Full expression evaluation through the lexer, parser, and interpreter.
pub struct CalculateTool;

#[async_trait]
impl Tool for CalculateTool {
    fn name(&self) -> &str {
        "calculate"
    }

    fn description(&self) -> &str {
        "Evaluate any mathematical expression. Supports all standard operations, \
         functions (sin, cos, log, sqrt, etc.), and constants (pi, e). Handles \
         integers, floats, and large numbers."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "expression": {
                    "type": "string",
                    "description": "Expression to evaluate, e.g. \"sqrt(16) + 2**10\""
                }
            },
            "required": ["expression"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let expression = args.get("expression").and_then(Value::as_str).unwrap_or("");
        let trimmed = expression.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation("Expression cannot be empty".to_string()));
        }
        if trimmed.len() > MAX_EXPRESSION_LEN {
            return Err(AppError::Validation(format!(
                "Expression too long (max {} characters)",
                MAX_EXPRESSION_LEN
            )));
        }
        let value = evaluate(trimmed).map_err(|e| AppError::Math(e.to_string()))?;
        Ok(result_of(value))
    }
}

// ============= Binary Operations =============

/// Addition; integer operands stay exact at any size.
pub struct AddTool;

#[async_trait]
impl Tool for AddTool {
    fn name(&self) -> &str {
        "add"
    }

    fn description(&self) -> &str {
        "Add two numbers. Supports any numeric value regardless of size."
    }

    fn parameters_schema(&self) -> Value {
        pair_schema("First addend", "Second addend")
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let a = require_number(&args, "a")?;
        let b = require_number(&args, "b")?;
        let result = a.add(&b).map_err(|e| math_error("Addition error", e))?;
        Ok(result_of(result))
    }
}

/// Subtraction; integer operands stay exact at any size.
pub struct SubtractTool;

#[async_trait]
impl Tool for SubtractTool {
    fn name(&self) -> &str {
        "subtract"
    }

    fn description(&self) -> &str {
        "Subtract two numbers. Supports any numeric value regardless of size."
    }

    fn parameters_schema(&self) -> Value {
        pair_schema("Minuend", "Subtrahend")
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let a = require_number(&args, "a")?;
        let b = require_number(&args, "b")?;
        let result = a.sub(&b).map_err(|e| math_error("Subtraction error", e))?;
        Ok(result_of(result))
    }
}

/// Multiplication; integer operands stay exact at any size.
pub struct MultiplyTool;

#[async_trait]
impl Tool for MultiplyTool {
    fn name(&self) -> &str {
        "multiply"
    }

    fn description(&self) -> &str {
        "Multiply two numbers. Supports any numeric value regardless of size."
    }

    fn parameters_schema(&self) -> Value {
        pair_schema("First factor", "Second factor")
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let a = require_number(&args, "a")?;
        let b = require_number(&args, "b")?;
        let result = a.mul(&b).map_err(|e| math_error("Multiplication error", e))?;
        Ok(result_of(result))
    }
}

/// True division; the result is always a float.
pub struct DivideTool;

#[async_trait]
impl Tool for DivideTool {
    fn name(&self) -> &str {
        "divide"
    }

    fn description(&self) -> &str {
        "Divide two numbers. Supports any numeric value regardless of size."
    }

    fn parameters_schema(&self) -> Value {
        pair_schema("Dividend", "Divisor")
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let a = require_number(&args, "a")?;
        let b = require_number(&args, "b")?;
        if b.is_zero() {
            return Err(AppError::Math("Division by zero is not allowed".to_string()));
        }
        let result = a.div(&b).map_err(|e| math_error("Division error", e))?;
        Ok(result_of(result))
    }
}

/// Exponentiation; integer base and non-negative integer exponent stay
/// exact, bounded by the result-size guard.
pub struct PowerTool;

#[async_trait]
impl Tool for PowerTool {
    fn name(&self) -> &str {
        "power"
    }

    fn description(&self) -> &str {
        "Raise base to the power of exponent. Supports any numeric value."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "base": operand_schema("Base value"),
                "exponent": operand_schema("Exponent value")
            },
            "required": ["base", "exponent"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let base = require_number(&args, "base")?;
        let exponent = require_number(&args, "exponent")?;
        let result = base.pow(&exponent).map_err(|e| match e {
            NumericError::Overflow => AppError::Math(e.to_string()),
            other => AppError::Math(format!("Power operation error: {}", other)),
        })?;
        Ok(result_of(result))
    }
}

// ============= Unary Operations =============

/// Square root over non-negative values.
pub struct SqrtTool;

#[async_trait]
impl Tool for SqrtTool {
    fn name(&self) -> &str {
        "sqrt"
    }

    fn description(&self) -> &str {
        "Calculate square root. Supports any positive numeric value."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "value": operand_schema("Value to take the square root of")
            },
            "required": ["value"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let value = require_number(&args, "value")?;
        if value.is_negative() {
            return Err(AppError::Math(
                "Square root of negative number is not a real number".to_string(),
            ));
        }
        let x = value
            .to_f64()
            .map_err(|e| math_error("Square root error", e))?;
        Ok(result_of(Number::Float(x.sqrt())))
    }
}

/// Factorial of a non-negative integer, bounded by [`MAX_FACTORIAL`].
pub struct FactorialTool;

#[async_trait]
impl Tool for FactorialTool {
    fn name(&self) -> &str {
        "factorial"
    }

    fn description(&self) -> &str {
        "Calculate factorial of a non-negative integer. Supports large integers."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "n": operand_schema("Non-negative integer")
            },
            "required": ["n"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let value = require_number(&args, "n")?;
        let n = match value.to_integer() {
            Some(n) => n,
            None => {
                return Err(AppError::Validation("Factorial requires an integer".to_string()));
            }
        };
        if n.is_negative() {
            return Err(AppError::Math(
                "Factorial of negative number is undefined".to_string(),
            ));
        }
        match n.to_u32() {
            Some(v) if v <= MAX_FACTORIAL => Ok(result_of(Number::Int(factorial(v)))),
            _ => Err(AppError::Math(format!(
                "Factorial too large (max {})",
                MAX_FACTORIAL
            ))),
        }
    }
}

/// Logarithm with an optional base; natural log by default.
pub struct LogTool;

#[async_trait]
impl Tool for LogTool {
    fn name(&self) -> &str {
        "log"
    }

    fn description(&self) -> &str {
        "Calculate logarithm. Default is natural log (base e)."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "value": operand_schema("Value to take the logarithm of"),
                "base": {
                    "type": ["number", "string"],
                    "description": "Logarithm base; omit or pass \"e\" for natural log"
                }
            },
            "required": ["value"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let value = require_number(&args, "value")?;
        let ln_value = value
            .ln()
            .map_err(|_| AppError::Math("Logarithm requires positive number".to_string()))?;
        let result = match args.get("base") {
            None | Some(Value::Null) => ln_value,
            Some(Value::String(s)) if s == "e" => ln_value,
            Some(raw) => {
                let base = Number::normalize(raw)?;
                if base == Number::Float(std::f64::consts::E) {
                    ln_value
                } else {
                    match base.ln() {
                        Ok(ln_base) if ln_base != 0.0 => ln_value / ln_base,
                        _ => {
                            return Err(AppError::Math(
                                "Logarithm base must be positive and not equal to 1".to_string(),
                            ));
                        }
                    }
                }
            }
        };
        Ok(result_of(Number::Float(result)))
    }
}

// ============= Trigonometry =============

/// Sine of an angle in radians or degrees.
pub struct SinTool;

#[async_trait]
impl Tool for SinTool {
    fn name(&self) -> &str {
        "sin"
    }

    fn description(&self) -> &str {
        "Calculate sine. Angle can be in radians (default) or degrees."
    }

    fn parameters_schema(&self) -> Value {
        angle_schema()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let angle = require_number(&args, "angle")?;
        let mut x = angle.to_f64().map_err(|e| math_error("Sine error", e))?;
        if unit_is_degrees(&args) {
            x = x.to_radians();
        }
        Ok(result_of(Number::Float(x.sin())))
    }
}

/// Cosine of an angle in radians or degrees.
pub struct CosTool;

#[async_trait]
impl Tool for CosTool {
    fn name(&self) -> &str {
        "cos"
    }

    fn description(&self) -> &str {
        "Calculate cosine. Angle can be in radians (default) or degrees."
    }

    fn parameters_schema(&self) -> Value {
        angle_schema()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let angle = require_number(&args, "angle")?;
        let mut x = angle.to_f64().map_err(|e| math_error("Cosine error", e))?;
        if unit_is_degrees(&args) {
            x = x.to_radians();
        }
        Ok(result_of(Number::Float(x.cos())))
    }
}

/// Tangent of an angle in radians or degrees.
pub struct TanTool;

#[async_trait]
impl Tool for TanTool {
    fn name(&self) -> &str {
        "tan"
    }

    fn description(&self) -> &str {
        "Calculate tangent. Angle can be in radians (default) or degrees."
    }

    fn parameters_schema(&self) -> Value {
        angle_schema()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let angle = require_number(&args, "angle")?;
        let mut x = angle.to_f64().map_err(|e| math_error("Tangent error", e))?;
        if unit_is_degrees(&args) {
            x = x.to_radians();
        }
        Ok(result_of(Number::Float(x.tan())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run(tool: &dyn Tool, args: Value) -> Result<Value> {
        tool.execute(args).await
    }

    fn result_field(value: &Value) -> &Value {
        &value["result"]
    }

    #[tokio::test]
    async fn test_add_small_integers() {
        let out = run(&AddTool, json!({ "a": 2, "b": 3 })).await.unwrap();
        assert_eq!(result_field(&out), &json!(5));
    }

    #[tokio::test]
    async fn test_add_huge_integers_stay_exact() {
        let out = run(&AddTool, json!({ "a": "99999999999999999999999999", "b": 1 }))
            .await
            .unwrap();
        assert_eq!(result_field(&out), &json!("100000000000000000000000000"));
    }

    #[tokio::test]
    async fn test_add_integer_result_iff_both_integers() {
        let out = run(&AddTool, json!({ "a": "2.0", "b": 1 })).await.unwrap();
        assert_eq!(result_field(&out), &json!(3));

        let out = run(&AddTool, json!({ "a": 2.5, "b": 1 })).await.unwrap();
        assert_eq!(result_field(&out), &json!(3.5));
    }

    #[tokio::test]
    async fn test_add_missing_argument() {
        let err = run(&AddTool, json!({ "a": 1 })).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.message(), "b is required");
    }

    #[tokio::test]
    async fn test_add_rejects_garbage() {
        let err = run(&AddTool, json!({ "a": "abc", "b": 1 })).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.message(), "Cannot convert 'abc' to number");
    }

    #[tokio::test]
    async fn test_subtract_and_multiply() {
        let out = run(&SubtractTool, json!({ "a": 10, "b": 4 })).await.unwrap();
        assert_eq!(result_field(&out), &json!(6));

        let out = run(&MultiplyTool, json!({ "a": "123456789123456789", "b": "1000000000" }))
            .await
            .unwrap();
        assert_eq!(result_field(&out), &json!("123456789123456789000000000"));
    }

    #[tokio::test]
    async fn test_divide_always_float() {
        let out = run(&DivideTool, json!({ "a": 10, "b": 4 })).await.unwrap();
        assert_eq!(result_field(&out), &json!(2.5));

        let out = run(&DivideTool, json!({ "a": 10, "b": 2 })).await.unwrap();
        assert_eq!(result_field(&out), &json!(5.0));
    }

    #[tokio::test]
    async fn test_divide_by_zero_in_both_forms() {
        for zero in [json!(0), json!("0"), json!(0.0)] {
            let err = run(&DivideTool, json!({ "a": 5, "b": zero })).await.unwrap_err();
            assert!(matches!(err, AppError::Math(_)));
            assert_eq!(err.message(), "Division by zero is not allowed");
        }
    }

    #[tokio::test]
    async fn test_power_exact_and_guarded() {
        let out = run(&PowerTool, json!({ "base": 2, "exponent": 10 })).await.unwrap();
        assert_eq!(result_field(&out), &json!(1024));

        let out = run(&PowerTool, json!({ "base": 2, "exponent": 1000 })).await.unwrap();
        let digits = result_field(&out).as_str().map(str::len);
        assert_eq!(digits, Some(302));

        let err = run(&PowerTool, json!({ "base": "10", "exponent": "10000000" }))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Result too large to compute");
    }

    #[tokio::test]
    async fn test_sqrt_domain() {
        let out = run(&SqrtTool, json!({ "value": 16 })).await.unwrap();
        assert_eq!(result_field(&out), &json!(4.0));

        let out = run(&SqrtTool, json!({ "value": "0" })).await.unwrap();
        assert_eq!(result_field(&out), &json!(0.0));

        let err = run(&SqrtTool, json!({ "value": -1 })).await.unwrap_err();
        assert_eq!(
            err.message(),
            "Square root of negative number is not a real number"
        );
    }

    #[tokio::test]
    async fn test_factorial_rules() {
        let out = run(&FactorialTool, json!({ "n": 5 })).await.unwrap();
        assert_eq!(result_field(&out), &json!(120));

        // float with zero fraction is accepted as an integer
        let out = run(&FactorialTool, json!({ "n": 5.0 })).await.unwrap();
        assert_eq!(result_field(&out), &json!(120));

        let err = run(&FactorialTool, json!({ "n": 2.5 })).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.message(), "Factorial requires an integer");

        let err = run(&FactorialTool, json!({ "n": -1 })).await.unwrap_err();
        assert!(matches!(err, AppError::Math(_)));
        assert_eq!(err.message(), "Factorial of negative number is undefined");

        let err = run(&FactorialTool, json!({ "n": 10001 })).await.unwrap_err();
        assert_eq!(err.message(), "Factorial too large (max 10000)");
    }

    #[tokio::test]
    async fn test_log_variants() {
        let out = run(&LogTool, json!({ "value": 8, "base": 2 })).await.unwrap();
        let v = result_field(&out).as_f64().unwrap();
        assert!((v - 3.0).abs() < 1e-12);

        let out = run(&LogTool, json!({ "value": 100, "base": "e" })).await.unwrap();
        let v = result_field(&out).as_f64().unwrap();
        assert!((v - 100f64.ln()).abs() < 1e-12);

        let err = run(&LogTool, json!({ "value": 0 })).await.unwrap_err();
        assert_eq!(err.message(), "Logarithm requires positive number");

        let err = run(&LogTool, json!({ "value": 8, "base": 1 })).await.unwrap_err();
        assert_eq!(
            err.message(),
            "Logarithm base must be positive and not equal to 1"
        );

        let err = run(&LogTool, json!({ "value": 8, "base": -2 })).await.unwrap_err();
        assert_eq!(
            err.message(),
            "Logarithm base must be positive and not equal to 1"
        );
    }

    #[tokio::test]
    async fn test_trig_units() {
        let out = run(&SinTool, json!({ "angle": 90, "unit": "degrees" })).await.unwrap();
        let v = result_field(&out).as_f64().unwrap();
        assert!((v - 1.0).abs() < 1e-12);

        let out = run(&SinTool, json!({ "angle": 90, "unit": "DEGREES" })).await.unwrap();
        let v = result_field(&out).as_f64().unwrap();
        assert!((v - 1.0).abs() < 1e-12);

        let out = run(&CosTool, json!({ "angle": 0 })).await.unwrap();
        assert_eq!(result_field(&out), &json!(1.0));

        let out = run(&TanTool, json!({ "angle": 45, "unit": "degrees" })).await.unwrap();
        let v = result_field(&out).as_f64().unwrap();
        assert!((v - 1.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_calculate_basics() {
        let out = run(&CalculateTool, json!({ "expression": "2+2" })).await.unwrap();
        assert_eq!(result_field(&out), &json!(4));

        let out = run(&CalculateTool, json!({ "expression": "2.0 + 1" })).await.unwrap();
        assert_eq!(result_field(&out), &json!(3.0));

        let out = run(&CalculateTool, json!({ "expression": "-2**2" })).await.unwrap();
        assert_eq!(result_field(&out), &json!(-4));
    }

    #[tokio::test]
    async fn test_calculate_empty_and_oversized() {
        for empty in ["", "   "] {
            let err = run(&CalculateTool, json!({ "expression": empty })).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
            assert_eq!(err.message(), "Expression cannot be empty");
        }

        let long = "1+".repeat(3000) + "1";
        let err = run(&CalculateTool, json!({ "expression": long })).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.message().starts_with("Expression too long"));
    }

    #[tokio::test]
    async fn test_calculate_error_mapping() {
        let err = run(&CalculateTool, json!({ "expression": "1/0" })).await.unwrap_err();
        assert!(matches!(err, AppError::Math(_)));
        assert_eq!(err.message(), "Division by zero");

        let err = run(&CalculateTool, json!({ "expression": "2 +" })).await.unwrap_err();
        assert!(matches!(err, AppError::Math(_)));
        assert!(err.message().starts_with("Invalid expression syntax:"));

        let err = run(&CalculateTool, json!({ "expression": "__import__('os')" }))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Math(_)));

        let err = run(&CalculateTool, json!({ "expression": "sin(pi" })).await.unwrap_err();
        assert!(matches!(err, AppError::Math(_)));
    }
}
