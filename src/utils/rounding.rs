// src/utils/rounding.rs

/// Decimal places kept for every floating-point metric.
pub const METRIC_DECIMALS: i32 = 4;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn round_metric(value: f64) -> f64 {
    round_to(value, METRIC_DECIMALS)
}
