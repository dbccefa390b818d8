pub mod build;
pub mod match_root;
pub mod proof;
pub mod run;
pub mod strategies;
pub mod verify;

use voter_allowlist_merkle::digest_to_hex;

use crate::pipeline::PipelineReport;

fn print_report(report: &PipelineReport) {
    if report.matched {
        println!("✅ Matched strategy: {}", report.strategy);
    } else {
        println!("✅ Built with strategy: {}", report.strategy);
    }
    println!("   Address list: {}", report.source);
    println!("   Merkle root: {}", digest_to_hex(&report.root));
    println!("   Leaves: {}", report.leaf_count);
    if report.rejected > 0 || report.duplicates > 0 {
        println!(
            "   Skipped: {} invalid, {} duplicate",
            report.rejected, report.duplicates
        );
    }

    match &report.artifacts {
        Some(paths) => {
            println!("📁 Artifacts:");
            println!("   {}", paths.merkle_root.display());
            println!("   {}", paths.proofs.display());
            println!("   {}", paths.manifest.display());
        }
        None => println!("📁 Artifacts not written"),
    }
}
