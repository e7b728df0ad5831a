// src/processing/parallel.rs
use log::{debug, info};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::path::{Path, PathBuf};

use super::labeling::label_patches;
use super::metrics::{calculate_local_metrics, LandscapeMetrics};
use crate::error::Result;
use crate::io::{read_classified_raster, write_patch_raster};
use crate::legend::Legend;
use crate::raster::ClassifiedRaster;
use crate::report::Report;

/// Per-file options for [`MetricsProcessor::process_file`]
#[derive(Debug, Clone, Default)]
pub struct FileOptions {
    /// Replaces the nodata value stored in the raster
    pub nodata: Option<i64>,
    /// Dataset id used to look up class names
    pub dataset: Option<String>,
    /// Where to write the patch-id GeoTIFF
    pub patches: Option<PathBuf>,
}

/// Runs the metrics engine on a dedicated rayon pool.
///
/// Holds no state besides the pool; every call works on its own buffers.
pub struct MetricsProcessor {
    pool: ThreadPool,
}

impl MetricsProcessor {
    pub fn new(threads: Option<usize>) -> Result<Self> {
        let threads = threads.unwrap_or_else(num_cpus::get).max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("metrics-{i}"))
            .build()?;

        debug!("Created metrics processor with {} threads", threads);
        Ok(Self { pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn compute(&self, raster: &ClassifiedRaster) -> LandscapeMetrics {
        self.pool.install(|| calculate_local_metrics(raster))
    }

    /// Run `op` inside the processor's pool.
    pub fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        self.pool.install(op)
    }

    /// Read a classified raster, compute its metrics and optionally export
    /// its patches.
    pub fn process_file(&self, input: &Path, options: &FileOptions) -> Result<Report> {
        let (raster, geo_info) = read_classified_raster(input, options.nodata)?;
        info!(
            "Processing {} ({}x{}, {} m pixels)",
            input.display(),
            raster.cols(),
            raster.rows(),
            raster.resolution()
        );

        let metrics = self.compute(&raster);

        if let Some(patch_path) = &options.patches {
            let patches = self.pool.install(|| label_patches(&raster))?;
            write_patch_raster(patch_path, &patches, &geo_info)?;
            info!("Wrote {} patches to {}", patches.count, patch_path.display());
        }

        let legend = options.dataset.as_deref().and_then(Legend::for_dataset);
        Ok(Report::new(input.display().to_string(), &metrics, legend.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_in_pool_matches_direct_call() {
        let raster = ClassifiedRaster::from_rows(
            &[vec![1, 1, 2], vec![3, 2, 2], vec![1, 3, 3]],
            30.0,
            None,
        )
        .unwrap();

        let processor = MetricsProcessor::new(Some(2)).unwrap();
        assert_eq!(processor.threads(), 2);
        assert_eq!(processor.compute(&raster), calculate_local_metrics(&raster));
    }
}
