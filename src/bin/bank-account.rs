use std::fs::File;

use anyhow::{Context, Result};
use bank_account::{bin_utils::Service, processor::ProcessError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive("bank_account=warn".parse()?)
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let filename = std::env::args()
        .nth(1)
        .context("Expected a scenario file name as the first argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        error_printer: Box::new(|line, err| match err {
            ProcessError::CommandErr(err) => eprintln!("Error at line {line}: {err}"),
            // rejected operations are part of a scenario, not a failure of the run
            ProcessError::AccountErr(err) => tracing::info!(line, %err, "operation rejected"),
        }),
    };
    service.run()
}
