use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::io::read_raw_rows;
use crate::models::RawRow;

/// Configuration for Stage 0 loading
#[derive(Debug, Clone)]
pub struct Stage0Config {
    /// Field delimiter (single byte)
    pub delimiter: u8,
}

impl Default for Stage0Config {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Execute Stage 0: read the raw rows of the input file.
///
/// Row shape is not checked here; rows of any width pass through.
pub fn execute_stage0(path: &Path, config: &Stage0Config) -> Result<Vec<RawRow>> {
    info!("Loading contacts from {:?}", path);
    let rows = read_raw_rows(path, config.delimiter)?;
    info!("Loaded {} raw rows", rows.len());
    Ok(rows)
}
