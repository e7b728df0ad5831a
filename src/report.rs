// src/report.rs
use serde::{Deserialize, Serialize};

use crate::legend::Legend;
use crate::processing::metrics::{ClassMetricRow, LandscapeMetrics, LandscapeSummary};

/// Class metrics annotated with the class name, as written to CSV / JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub class: i64,
    /// Legend name, empty when unknown
    pub name: String,
    pub ca: f64,
    pub pland: f64,
    pub np: usize,
    pub area_mn: f64,
    pub te: f64,
    pub ed: f64,
}

impl ReportRow {
    pub fn new(row: &ClassMetricRow, legend: Option<&Legend>) -> Self {
        let name = legend
            .and_then(|l| l.class_name(row.class))
            .unwrap_or_default()
            .to_string();

        Self {
            class: row.class,
            name,
            ca: row.ca,
            pland: row.pland,
            np: row.np,
            area_mn: row.area_mn,
            te: row.te,
            ed: row.ed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Input the metrics were computed from
    pub source: String,
    pub classes: Vec<ReportRow>,
    pub landscape: LandscapeSummary,
}

impl Report {
    pub fn new(source: impl Into<String>, metrics: &LandscapeMetrics, legend: Option<&Legend>) -> Self {
        Self {
            source: source.into(),
            classes: metrics
                .classes
                .iter()
                .map(|row| ReportRow::new(row, legend))
                .collect(),
            landscape: metrics.summary.clone(),
        }
    }
}
