/*!
# Artifact Schema Definitions

The files exchanged between the allowlist pipeline and its consumers:

- address lists (input): a JSON array of address strings, or a CSV file with
  an `address` column
- `merkle_root.txt`, `proofs.json` and `manifest.json` (output), written
  together by [`crate::ProofStore`]

Addresses are always keyed by their canonical lowercase form; digests are
`0x` + 64 lowercase hex digits.
*/

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use voter_allowlist_merkle::{digest_to_hex, parse_digest, Digest, Strategy};

pub const MERKLE_ROOT_FILE: &str = "merkle_root.txt";
pub const PROOFS_FILE: &str = "proofs.json";
pub const MANIFEST_FILE: &str = "manifest.json";

// ================================================================================================
// Address List Schema
// ================================================================================================

/// Column holding the address in CSV address lists. Other columns are ignored.
pub const ADDRESS_CSV_HEADER: &str = "address";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddressRow {
    pub address: String,
}

// ================================================================================================
// Proofs Schema
// ================================================================================================

/// Contents of `proofs.json`: canonical address to sibling path, keys sorted.
pub type ProofsFile = BTreeMap<String, Vec<String>>;

// ================================================================================================
// Manifest Schema
// ================================================================================================

/// Contents of `manifest.json`.
///
/// Records everything needed to re-verify the stored proofs without the
/// source address list. `leaf_indices` locates each leaf in tree order,
/// which fixed-order proofs depend on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    #[serde(
        deserialize_with = "deserialize_digest",
        serialize_with = "serialize_digest"
    )]
    pub root: Digest,

    pub strategy: Strategy,

    pub leaf_count: usize,

    pub leaf_indices: BTreeMap<String, usize>,
}

// ================================================================================================
// Custom Serde Functions
// ================================================================================================

fn deserialize_digest<'de, D>(deserializer: D) -> Result<Digest, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_digest(&s).map_err(serde::de::Error::custom)
}

fn serialize_digest<S>(digest: &Digest, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&digest_to_hex(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_json_shape() {
        let mut leaf_indices = BTreeMap::new();
        leaf_indices.insert("0x52908400098527886e0f7030069857d2e4169ee7".to_string(), 0);

        let manifest = Manifest {
            root: [0xab; 32],
            strategy: Strategy::standard(),
            leaf_count: 1,
            leaf_indices,
        };

        let json: serde_json::Value = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["root"], format!("0x{}", "ab".repeat(32)));
        assert_eq!(json["strategy"], "abi-encoded-tuple/double/sorted-ascending");
        assert_eq!(json["leaf_count"], 1);

        let parsed: Manifest = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, manifest);
    }

    #[test]
    fn test_manifest_rejects_short_root() {
        let json = r#"{
            "root": "0x1234",
            "strategy": "raw-bytes/single/fixed",
            "leaf_count": 0,
            "leaf_indices": {}
        }"#;
        assert!(serde_json::from_str::<Manifest>(json).is_err());
    }

    #[test]
    fn test_address_row_ignores_extra_columns() {
        let data = "label,address\nalice,0x52908400098527886e0f7030069857d2e4169ee7\n";
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let row: AddressRow = rdr.deserialize().next().unwrap().unwrap();
        assert_eq!(row.address, "0x52908400098527886e0f7030069857d2e4169ee7");
    }
}
