use std::path::PathBuf;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::CliResult;
use crate::pipeline;

pub fn execute(config_path: PathBuf) -> CliResult<()> {
    info!("Loading pipeline config from {}", config_path.display());
    let config = PipelineConfig::load(&config_path)?;

    let report = pipeline::run(&config)?;
    super::print_report(&report);
    Ok(())
}
