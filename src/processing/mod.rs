// src/processing/mod.rs
pub mod labeling;
pub mod metrics;
pub mod morphology;
pub mod parallel;

// Re-export main components
pub use labeling::{label_components, label_patches, Connectivity, PatchLabels};
pub use metrics::{
    calculate_local_metrics, calculate_local_metrics_from_rows, calculate_local_metrics_masked,
    ClassMetricRow, LandscapeMetrics, LandscapeSummary,
};
pub use parallel::{FileOptions, MetricsProcessor};
