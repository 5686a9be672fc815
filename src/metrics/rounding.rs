//! Ratio arithmetic and rounding

use serde_json::{Number, Value};
use crate::config::RoundingPolicy;

/// `numerator / denominator * scale`, or 0 when either side is missing or zero
pub fn ratio(numerator: Option<f64>, denominator: Option<f64>, scale: f64) -> f64 {
    match (numerator, denominator) {
        (Some(n), Some(d)) if n != 0.0 && d != 0.0 => {
            let value = n / d * scale;
            if value.is_finite() { value } else { 0.0 }
        }
        _ => 0.0,
    }
}

/// Render a derived value as a result cell
pub fn round_value(value: f64, policy: RoundingPolicy) -> Value {
    if !value.is_finite() {
        return Value::from(0);
    }
    match policy {
        RoundingPolicy::Mixed if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
            Value::from(value as i64)
        }
        RoundingPolicy::Mixed | RoundingPolicy::TwoDecimals => float(round2(value)),
        RoundingPolicy::Raw => float(value),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn float(value: f64) -> Value {
    Number::from_f64(value).map(Value::Number).unwrap_or_else(|| Value::from(0))
}
