use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::io::write_records;
use crate::models::MergedContact;

/// Configuration for Stage 3 writing
#[derive(Debug, Clone)]
pub struct Stage3Config {
    /// Field delimiter (single byte)
    pub delimiter: u8,
}

impl Default for Stage3Config {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Result of Stage 3 writing
#[derive(Debug)]
pub struct Stage3Result {
    pub path: PathBuf,
    pub records_written: usize,
    pub bytes_written: usize,
}

/// Execute Stage 3: write the merged contacts, one record per line, no header
pub fn execute_stage3(
    contacts: &[MergedContact],
    path: &Path,
    config: &Stage3Config,
) -> Result<Stage3Result> {
    info!("Writing {} contacts to {:?}", contacts.len(), path);
    let records: Vec<Vec<String>> = contacts.iter().map(MergedContact::to_record).collect();
    let bytes_written = write_records(path, &records, config.delimiter)?;

    Ok(Stage3Result {
        path: path.to_path_buf(),
        records_written: records.len(),
        bytes_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MergeKey, Remainder};

    #[test]
    fn test_writes_one_line_per_contact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phonebook.csv");
        let contacts = vec![MergedContact {
            key: MergeKey {
                first: "Ivan".to_string(),
                last: "Petrov".to_string(),
            },
            remainder: Remainder {
                phone: "+79161234567".to_string(),
                ..Default::default()
            },
        }];

        let result = execute_stage3(&contacts, &path, &Stage3Config::default()).unwrap();

        assert_eq!(result.records_written, 1);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Ivan,Petrov,,,,+79161234567,\n"
        );
    }
}
