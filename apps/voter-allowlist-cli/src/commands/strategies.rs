use voter_allowlist_merkle::DEFAULT_CANDIDATES;

use crate::error::CliResult;

pub fn execute() -> CliResult<()> {
    println!("Default candidate strategies, in search order:");
    for (position, strategy) in DEFAULT_CANDIDATES.iter().enumerate() {
        println!("  {}. {}", position + 1, strategy);
    }
    Ok(())
}
