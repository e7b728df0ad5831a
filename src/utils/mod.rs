// src/utils/mod.rs
pub mod rounding;

pub use rounding::round_metric;
