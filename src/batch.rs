// src/batch.rs
use anyhow::{bail, Context, Result};
use log::{error, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::io::{write_report, OutputFormat};
use crate::processing::{FileOptions, MetricsProcessor};

#[derive(Deserialize, Serialize, Debug)]
pub struct BatchConfig {
    #[serde(default)]
    pub global: GlobalParams,
    pub operations: Vec<Operation>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct GlobalParams {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub nodata: Option<i64>,
    #[serde(default)]
    pub dataset: Option<String>,
    #[serde(default)]
    pub threads: Option<usize>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct Operation {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: Option<OutputFormat>,
    pub nodata: Option<i64>,
    pub dataset: Option<String>,
    pub patches: Option<PathBuf>,
}

impl BatchConfig {
    pub fn from_json(content: &str) -> Result<Self> {
        let config: BatchConfig = serde_json::from_str(content)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch config {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid batch config {}", path.display()))
    }

    /// Output format and file options of `op`, falling back to the globals.
    pub fn resolve(&self, op: &Operation) -> (OutputFormat, FileOptions) {
        let format = op.format.unwrap_or(self.global.format);
        let options = FileOptions {
            nodata: op.nodata.or(self.global.nodata),
            dataset: op.dataset.clone().or_else(|| self.global.dataset.clone()),
            patches: op.patches.clone(),
        };
        (format, options)
    }
}

pub fn process_batch(config_path: &Path, threads: Option<usize>) -> Result<()> {
    let config = BatchConfig::from_file(config_path)?;
    let processor = MetricsProcessor::new(threads.or(config.global.threads))?;
    run_batch(&processor, &config)
}

/// Run every operation of `config` concurrently. All operations are
/// attempted; the error lists those that failed.
pub fn run_batch(processor: &MetricsProcessor, config: &BatchConfig) -> Result<()> {
    let total = config.operations.len();
    info!("Starting batch processing with {} operations...", total);

    let (tx, rx) = flume::unbounded();
    let mut failures = Vec::new();

    std::thread::scope(|scope| {
        scope.spawn(|| {
            processor.install(|| {
                config
                    .operations
                    .par_iter()
                    .enumerate()
                    .for_each_with(tx, |tx, (i, op)| {
                        // the receiver outlives every sender
                        let _ = tx.send((i, run_operation(processor, config, op)));
                    });
            });
        });

        for (done, (i, result)) in rx.iter().enumerate() {
            let op = &config.operations[i];
            match result {
                Ok(()) => info!(
                    "[{}/{}] {} -> {}",
                    done + 1,
                    total,
                    op.input.display(),
                    op.output.display()
                ),
                Err(e) => {
                    error!("[{}/{}] {} failed: {:#}", done + 1, total, op.input.display(), e);
                    failures.push(format!("{}: {:#}", op.input.display(), e));
                }
            }
        }
    });

    if !failures.is_empty() {
        failures.sort();
        bail!(
            "{} of {} operations failed:\n  {}",
            failures.len(),
            total,
            failures.join("\n  ")
        );
    }

    info!("Batch processing complete!");
    Ok(())
}

fn run_operation(processor: &MetricsProcessor, config: &BatchConfig, op: &Operation) -> Result<()> {
    let (format, options) = config.resolve(op);
    let report = processor.process_file(&op.input, &options)?;
    write_report(Some(&op.output), format, &report)
        .with_context(|| format!("Failed to write {}", op.output.display()))?;
    Ok(())
}
