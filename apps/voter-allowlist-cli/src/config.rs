use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use voter_allowlist_merkle::{parse_digest, Digest, InvalidAddressPolicy, Strategy, DEFAULT_CANDIDATES};

use crate::error::{CliError, CliResult};

/// Pipeline configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Address list files (JSON or CSV), tried in order when matching
    pub address_files: Vec<PathBuf>,

    /// Directory receiving merkle_root.txt, proofs.json and manifest.json
    pub output_dir: PathBuf,

    /// Known construction strategy
    #[serde(default)]
    pub strategy: Option<Strategy>,

    /// Published root to reproduce (0x + 64 hex)
    #[serde(default)]
    pub target_root: Option<String>,

    /// Strategies to search when only `target_root` is given
    #[serde(default)]
    pub candidates: Option<Vec<Strategy>>,

    #[serde(default)]
    pub invalid_addresses: InvalidAddressPolicy,

    #[serde(default = "default_write_artifacts")]
    pub write_artifacts: bool,
}

/// What the pipeline does with the normalized address lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineMode {
    /// Build with a known strategy, optionally asserting the resulting root.
    Build {
        strategy: Strategy,
        expected_root: Option<Digest>,
    },
    /// Search for the strategy (and address list version) behind a root.
    Match {
        target_root: Digest,
        candidates: Vec<Strategy>,
    },
}

impl PipelineConfig {
    /// Load a YAML config. Relative paths are resolved against the config
    /// file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> CliResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let mut config: PipelineConfig = serde_yaml::from_str(&contents)?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for file in &mut self.address_files {
            if file.is_relative() {
                *file = base.join(&*file);
            }
        }
        if self.output_dir.is_relative() {
            self.output_dir = base.join(&self.output_dir);
        }
    }

    /// Validate the config and decide the pipeline mode.
    pub fn mode(&self) -> CliResult<PipelineMode> {
        if self.address_files.is_empty() {
            return Err(CliError::InvalidConfig(
                "address_files must name at least one address list".to_string(),
            ));
        }

        let target_root = self
            .target_root
            .as_deref()
            .map(parse_digest)
            .transpose()
            .map_err(|e| CliError::InvalidConfig(format!("target_root: {}", e)))?;

        match (self.strategy, target_root) {
            (None, None) => Err(CliError::InvalidConfig(
                "set either strategy or target_root".to_string(),
            )),
            (Some(strategy), expected_root) => {
                if self.address_files.len() > 1 {
                    return Err(CliError::InvalidConfig(
                        "building with a known strategy takes exactly one address file"
                            .to_string(),
                    ));
                }
                if self.candidates.is_some() {
                    warn!("candidates are ignored when a strategy is given");
                }
                Ok(PipelineMode::Build {
                    strategy,
                    expected_root,
                })
            }
            (None, Some(target_root)) => {
                let candidates = self
                    .candidates
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CANDIDATES.to_vec());
                if candidates.is_empty() {
                    return Err(CliError::InvalidConfig(
                        "candidates must not be empty".to_string(),
                    ));
                }
                Ok(PipelineMode::Match {
                    target_root,
                    candidates,
                })
            }
        }
    }
}

fn default_write_artifacts() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use voter_allowlist_merkle::{LeafEncoding, LeafHashArity, PairOrder};

    fn parse(yaml: &str) -> PipelineConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_match_mode_with_default_candidates() {
        let config = parse(&format!(
            "address_files: [data/whitelist.json]\noutput_dir: data/proofs\ntarget_root: \"0x{}\"\n",
            "ab".repeat(32)
        ));

        assert_eq!(config.invalid_addresses, InvalidAddressPolicy::Skip);
        assert!(config.write_artifacts);
        assert_eq!(
            config.mode().unwrap(),
            PipelineMode::Match {
                target_root: [0xab; 32],
                candidates: DEFAULT_CANDIDATES.to_vec(),
            }
        );
    }

    #[test]
    fn test_build_mode_with_strategy_aliases() {
        let config = parse(
            "address_files: [voters.csv]\n\
             output_dir: out\n\
             strategy: raw/single/fixed\n\
             invalid_addresses: strict\n\
             write_artifacts: false\n",
        );

        assert_eq!(config.invalid_addresses, InvalidAddressPolicy::Strict);
        assert!(!config.write_artifacts);
        assert_eq!(
            config.mode().unwrap(),
            PipelineMode::Build {
                strategy: Strategy::new(
                    LeafEncoding::RawBytes,
                    LeafHashArity::Single,
                    PairOrder::Fixed
                ),
                expected_root: None,
            }
        );
    }

    #[test]
    fn test_strategy_and_root_asserts_root() {
        let config = parse(&format!(
            "address_files: [a.json]\noutput_dir: out\nstrategy: abi-encoded-tuple/double/sorted-ascending\ntarget_root: \"0x{}\"\n",
            "01".repeat(32)
        ));

        assert_eq!(
            config.mode().unwrap(),
            PipelineMode::Build {
                strategy: Strategy::standard(),
                expected_root: Some([0x01; 32]),
            }
        );
    }

    #[test]
    fn test_neither_strategy_nor_root() {
        let config = parse("address_files: [a.json]\noutput_dir: out\n");
        assert!(matches!(config.mode(), Err(CliError::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_root = parse("address_files: [a.json]\noutput_dir: out\ntarget_root: \"0x1234\"\n");
        assert!(matches!(bad_root.mode(), Err(CliError::InvalidConfig(_))));

        let no_files = parse("address_files: []\noutput_dir: out\nstrategy: abi/double/sorted\n");
        assert!(matches!(no_files.mode(), Err(CliError::InvalidConfig(_))));

        let empty_candidates = parse(&format!(
            "address_files: [a.json]\noutput_dir: out\ntarget_root: \"0x{}\"\ncandidates: []\n",
            "00".repeat(32)
        ));
        assert!(matches!(
            empty_candidates.mode(),
            Err(CliError::InvalidConfig(_))
        ));

        assert!(serde_yaml::from_str::<PipelineConfig>(
            "address_files: [a.json]\noutput_dir: out\nstrategy: keccak/triple/sorted\n"
        )
        .is_err());
    }

    #[test]
    fn test_several_files_only_when_matching() {
        let config = parse(
            "address_files: [v1.json, v2.json]\noutput_dir: out\nstrategy: abi/double/sorted\n",
        );
        assert!(matches!(config.mode(), Err(CliError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("allowlist.yaml");
        fs::write(
            &config_path,
            "address_files: [data/whitelist.json, /abs/old.json]\noutput_dir: proofs\nstrategy: abi/double/sorted\n",
        )
        .unwrap();

        let config = PipelineConfig::load(&config_path).unwrap();
        assert_eq!(config.address_files[0], dir.path().join("data/whitelist.json"));
        assert_eq!(config.address_files[1], PathBuf::from("/abs/old.json"));
        assert_eq!(config.output_dir, dir.path().join("proofs"));
    }
}
