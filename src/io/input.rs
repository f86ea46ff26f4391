use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::error::{PipelineError, Result};
use crate::models::RawRow;

/// Read a delimited file into raw rows, fields kept verbatim
pub fn read_raw_rows(path: &Path, delimiter: u8) -> Result<Vec<RawRow>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PipelineError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => PipelineError::UnreadableInput {
            path: path.to_path_buf(),
            source: e.into(),
        },
    })?;

    parse_raw_rows(file, delimiter).map_err(|source| PipelineError::UnreadableInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse delimited text from any reader.
///
/// There is no header row and rows may have any number of fields.
/// Blank lines are skipped and do not consume a row index.
pub fn parse_raw_rows<R: Read>(reader: R, delimiter: u8) -> csv::Result<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        rows.push(RawRow::new(
            index,
            record.iter().map(str::to_string).collect(),
        ));
    }

    Ok(rows)
}
