/*!
# Address List Input

Reads the raw entries of an allowlist file. Entries are returned as written;
normalization and deduplication happen in
[`voter_allowlist_merkle::normalize_batch`].
*/

use crate::{
    errors::{ArtifactError, ArtifactResult},
    schemas::{AddressRow, ADDRESS_CSV_HEADER},
};
use csv::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Read an address list.
///
/// Files with a `.csv` extension must have an `address` header column; any
/// other file is parsed as a JSON array of strings.
pub fn read_address_list<P: AsRef<Path>>(path: P) -> ArtifactResult<Vec<String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ArtifactError::MissingArtifact(path.to_path_buf()));
    }

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let entries = if is_csv {
        read_csv_list(path)?
    } else {
        read_json_list(path)?
    };

    debug!("Read {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

fn read_json_list(path: &Path) -> ArtifactResult<Vec<String>> {
    let file = File::open(path)?;
    let entries: Vec<String> = serde_json::from_reader(BufReader::new(file))?;
    Ok(entries)
}

fn read_csv_list(path: &Path) -> ArtifactResult<Vec<String>> {
    let file = File::open(path)?;
    let mut rdr = Reader::from_reader(file);

    let headers = rdr.headers()?;
    if !headers.iter().any(|header| header == ADDRESS_CSV_HEADER) {
        return Err(ArtifactError::Schema(format!(
            "{}: missing '{}' column",
            path.display(),
            ADDRESS_CSV_HEADER
        )));
    }

    let mut entries = Vec::new();
    for result in rdr.deserialize() {
        let row: AddressRow = result?;
        entries.push(row.address);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn temp_with_suffix(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_json_list_keeps_entries_verbatim() {
        let file = temp_with_suffix(
            ".json",
            r#"["0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed", "not-an-address"]"#,
        );

        let entries = read_address_list(file.path()).unwrap();
        assert_eq!(
            entries,
            vec![
                "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".to_string(),
                "not-an-address".to_string()
            ]
        );
    }

    #[test]
    fn test_read_csv_list_by_header() {
        let file = temp_with_suffix(
            ".csv",
            "name,address\nalice,0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359\nbob,0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB\n",
        );

        let entries = read_address_list(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB");
    }

    #[test]
    fn test_csv_without_address_column() {
        let file = temp_with_suffix(".csv", "wallet\n0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359\n");

        let result = read_address_list(file.path());
        assert!(matches!(result, Err(ArtifactError::Schema(_))));
    }

    #[test]
    fn test_json_must_be_array_of_strings() {
        let file = temp_with_suffix(".json", r#"{"address": "0x00"}"#);
        assert!(matches!(
            read_address_list(file.path()),
            Err(ArtifactError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("whitelist.json");
        assert!(matches!(
            read_address_list(&missing),
            Err(ArtifactError::MissingArtifact(path)) if path == missing
        ));
    }
}
