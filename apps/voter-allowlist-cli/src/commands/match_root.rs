use std::path::PathBuf;
use voter_allowlist_merkle::{InvalidAddressPolicy, Strategy};

use crate::config::PipelineConfig;
use crate::error::CliResult;
use crate::pipeline;

pub fn execute(
    address_files: Vec<PathBuf>,
    target_root: String,
    candidates: Vec<Strategy>,
    output_dir: PathBuf,
    invalid_addresses: InvalidAddressPolicy,
    dry_run: bool,
) -> CliResult<()> {
    let config = PipelineConfig {
        address_files,
        output_dir,
        strategy: None,
        target_root: Some(target_root),
        candidates: (!candidates.is_empty()).then_some(candidates),
        invalid_addresses,
        write_artifacts: !dry_run,
    };

    let report = pipeline::run(&config)?;
    super::print_report(&report);
    Ok(())
}
