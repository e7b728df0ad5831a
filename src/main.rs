// src/main.rs
use anyhow::{bail, Result};
use clap::Parser;
use env_logger::Env;

use landscape_metrics::batch::process_batch;
use landscape_metrics::cli::{Cli, Commands};
use landscape_metrics::io::write_report;
use landscape_metrics::legend::Legend;
use landscape_metrics::processing::{FileOptions, MetricsProcessor};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Metrics {
            input,
            output,
            format,
            nodata,
            dataset,
            patches,
        } => {
            let processor = MetricsProcessor::new(cli.threads)?;
            let options = FileOptions {
                nodata,
                dataset,
                patches,
            };

            let report = processor.process_file(&input, &options)?;
            write_report(output.as_deref(), format, &report)?;

            let summary = &report.landscape;
            eprintln!(
                "Classes: {}, SHDI: {:.4}, total area: {:.4} ha",
                summary.richness, summary.shdi, summary.total_area_ha
            );
            if let Some(output) = output {
                eprintln!("Processing complete: {}", output.display());
            }
        }
        Commands::Batch { config } => {
            process_batch(&config, cli.threads)?;
        }
        Commands::Classes { dataset } => {
            let Some(legend) = Legend::for_dataset(&dataset) else {
                bail!("No class legend known for dataset '{}'", dataset);
            };

            println!("{}", legend.name());
            for (class, name) in legend.iter() {
                println!("{class:>5}  {name}");
            }
        }
    }

    Ok(())
}
