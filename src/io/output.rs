use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;

use crate::error::{PipelineError, Result};

/// Serialize records to delimited text in memory.
///
/// No header is emitted; fields are quoted only when they need it.
pub fn render_records(records: &[Vec<String>], delimiter: u8) -> std::io::Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Necessary)
        .delimiter(delimiter)
        .from_writer(Vec::new());

    for record in records {
        writer.write_record(record)?;
    }

    writer.into_inner().map_err(|e| e.into_error())
}

/// Write records to `path`, replacing any existing file.
///
/// The whole file is rendered before the destination is opened.
pub fn write_records(path: &Path, records: &[Vec<String>], delimiter: u8) -> Result<usize> {
    let unwritable = |source| PipelineError::UnwritableOutput {
        path: path.to_path_buf(),
        source,
    };

    let bytes = render_records(records, delimiter).map_err(unwritable)?;
    std::fs::write(path, &bytes).map_err(unwritable)?;
    Ok(bytes.len())
}

/// Serialize a value as pretty JSON destined for `path`
pub fn render_json<T: Serialize>(path: &Path, value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| PipelineError::Report {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write already rendered JSON to `path`
pub fn write_rendered_json(path: &Path, json: &str) -> Result<()> {
    std::fs::write(path, json).map_err(|e| PipelineError::Report {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
