//! Sample command - write the bundled sample RFP to disk.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use rfpscan_core::models::embedded::{SAMPLE_RFP, SAMPLE_RFP_NAME};

/// Arguments for the sample command.
#[derive(Args)]
pub struct SampleArgs {
    /// Output path (default: ./sample_rfp_oilgas.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub fn run(args: SampleArgs) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| PathBuf::from(SAMPLE_RFP_NAME));

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            output_path.display()
        );
    }

    fs::write(&output_path, SAMPLE_RFP)?;

    println!(
        "{} Sample RFP written to {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}
