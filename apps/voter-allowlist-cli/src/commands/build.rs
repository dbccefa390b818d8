use std::path::PathBuf;
use voter_allowlist_merkle::{InvalidAddressPolicy, Strategy};

use crate::config::PipelineConfig;
use crate::error::CliResult;
use crate::pipeline;

pub fn execute(
    address_file: PathBuf,
    strategy: Strategy,
    expect_root: Option<String>,
    output_dir: PathBuf,
    invalid_addresses: InvalidAddressPolicy,
    dry_run: bool,
) -> CliResult<()> {
    let config = PipelineConfig {
        address_files: vec![address_file],
        output_dir,
        strategy: Some(strategy),
        target_root: expect_root,
        candidates: None,
        invalid_addresses,
        write_artifacts: !dry_run,
    };

    let report = pipeline::run(&config)?;
    super::print_report(&report);
    Ok(())
}
