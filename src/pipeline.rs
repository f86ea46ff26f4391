use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::io::{render_json, write_rendered_json};
use crate::models::MergedContact;
use crate::stages::{
    Stage0Config, Stage3Config, execute_stage0, execute_stage1, execute_stage2, execute_stage3,
};

/// Input file name used when none is given
pub const DEFAULT_INPUT: &str = "phonebook_raw.csv";
/// Output file name, placed next to the input
pub const DEFAULT_OUTPUT_NAME: &str = "phonebook.csv";

/// Configuration for a full pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Delimiter shared by the loader and the writer
    pub delimiter: u8,
    /// Optional JSON summary destination
    pub report: Option<PathBuf>,
}

impl PipelineConfig {
    /// Config for `input` with the output written beside it
    pub fn for_input(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let output = default_output_for(&input);
        Self {
            input,
            output,
            delimiter: b',',
            report: None,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::for_input(DEFAULT_INPUT)
    }
}

/// `phonebook.csv` in the same directory as `input`
pub fn default_output_for(input: &Path) -> PathBuf {
    input.with_file_name(DEFAULT_OUTPUT_NAME)
}

/// Counters from one run. Contains nothing run-specific beyond the paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub raw_rows: usize,
    pub contacts: usize,
    pub merged_contacts: usize,
    pub duplicates_merged: usize,
    pub fields_updated: usize,
    pub phones_canonicalized: usize,
    pub phones_passed_through: usize,
}

/// Outcome of the in-memory stages, before anything is written
#[derive(Debug)]
pub struct Analysis {
    pub contacts: Vec<MergedContact>,
    pub summary: PipelineSummary,
}

/// Load, recast and merge without touching the filesystem beyond the read
pub fn analyze(input: &Path, delimiter: u8) -> Result<Analysis> {
    let rows = execute_stage0(input, &Stage0Config { delimiter })?;
    let recast = execute_stage1(&rows)?;
    let contacts_count = recast.contacts.len();
    let merged = execute_stage2(recast.contacts);

    Ok(Analysis {
        summary: PipelineSummary {
            input: input.to_path_buf(),
            output: None,
            raw_rows: rows.len(),
            contacts: contacts_count,
            merged_contacts: merged.contacts.len(),
            duplicates_merged: merged.duplicates_merged,
            fields_updated: merged.fields_updated,
            phones_canonicalized: recast.phones_canonicalized,
            phones_passed_through: recast.phones_passed_through,
        },
        contacts: merged.contacts,
    })
}

/// Run Loader, Recaster, Merger and Writer in order.
///
/// Any failure aborts the run before the output file is created. The run
/// report is rendered up front so that only its file write can follow the CSV.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineSummary> {
    let Analysis {
        contacts,
        mut summary,
    } = analyze(&config.input, config.delimiter)?;
    summary.output = Some(config.output.clone());

    let report = match &config.report {
        Some(path) => Some((path, render_json(path, &summary)?)),
        None => None,
    };

    let written = execute_stage3(
        &contacts,
        &config.output,
        &Stage3Config {
            delimiter: config.delimiter,
        },
    )?;
    info!(
        "Wrote {} records ({} bytes) to {:?}",
        written.records_written, written.bytes_written, written.path
    );

    if let Some((path, json)) = report {
        info!("Writing run report to {:?}", path);
        write_rendered_json(path, &json)?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    const RAW: &str = "\
Ivan,,Petrov,Acme,Sales,+7(916) 123-45-67
Anna Maria,Ivanova,,Globex,,not-a-number,anna@example.com
Ivan,Sergeyevich,Petrov,,Sales,8 916 123 45 67 доп.12
Boris,,Alekseev,,,\"8 (495) 913-04-78\"
";

    fn config_in(dir: &Path) -> PipelineConfig {
        let input = dir.join(DEFAULT_INPUT);
        std::fs::write(&input, RAW).unwrap();
        PipelineConfig::for_input(input)
    }

    #[test]
    fn test_default_output_is_sibling() {
        assert_eq!(
            default_output_for(Path::new("data/phonebook_raw.csv")),
            PathBuf::from("data/phonebook.csv")
        );
    }

    #[test]
    fn test_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let summary = run_pipeline(&config).unwrap();

        assert_eq!(
            std::fs::read_to_string(&config.output).unwrap(),
            "\
Anna,Ivanova,Maria,Globex,,not-a-number,anna@example.com
Boris,Alekseev,,,,+74959130478,
Ivan,Petrov,Sergeyevich,Acme,Sales,+79161234567 доп.12,
"
        );
        assert_eq!(summary.raw_rows, 4);
        assert_eq!(summary.merged_contacts, 3);
        assert_eq!(summary.duplicates_merged, 1);
        assert_eq!(summary.phones_canonicalized, 3);
        assert_eq!(summary.phones_passed_through, 1);
    }

    #[test]
    fn test_rerun_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.report = Some(dir.path().join("report.json"));

        let first_summary = run_pipeline(&config).unwrap();
        let first_csv = std::fs::read(&config.output).unwrap();
        let first_report = std::fs::read(config.report.as_ref().unwrap()).unwrap();

        let second_summary = run_pipeline(&config).unwrap();

        assert_eq!(first_summary, second_summary);
        assert_eq!(first_csv, std::fs::read(&config.output).unwrap());
        assert_eq!(
            first_report,
            std::fs::read(config.report.as_ref().unwrap()).unwrap()
        );
    }

    #[test]
    fn test_malformed_row_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join(DEFAULT_INPUT);
        std::fs::write(&input, "Ivan,,Petrov,,,\nAnna,,Ivanova\n").unwrap();
        let config = PipelineConfig::for_input(&input);

        let err = run_pipeline(&config).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::MalformedRow {
                row_index: 1,
                field_count: 3,
                ..
            }
        ));
        assert!(!config.output.exists());
    }

    #[test]
    fn test_seventh_column_survives_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join(DEFAULT_INPUT);
        std::fs::write(
            &input,
            "Ivan,,Petrov,Acme,Sales,+7 916 123 45 67,ivan@example.com\n",
        )
        .unwrap();
        let config = PipelineConfig::for_input(&input);

        run_pipeline(&config).unwrap();

        assert_eq!(
            std::fs::read_to_string(&config.output).unwrap(),
            "Ivan,Petrov,,Acme,Sales,+79161234567,ivan@example.com\n"
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_unserializable_report_writes_no_csv() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join(OsStr::from_bytes(b"raw-\xff.csv"));
        std::fs::write(&input, RAW).unwrap();
        let mut config = PipelineConfig::for_input(&input);
        config.report = Some(dir.path().join("report.json"));

        let err = run_pipeline(&config).unwrap_err();

        assert!(matches!(err, PipelineError::Report { .. }));
        assert!(!config.output.exists());
        assert!(!config.report.as_ref().unwrap().exists());
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::for_input(dir.path().join("nope.csv"));

        assert!(matches!(
            run_pipeline(&config),
            Err(PipelineError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_empty_input_writes_empty_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join(DEFAULT_INPUT);
        std::fs::write(&input, "").unwrap();
        let config = PipelineConfig::for_input(&input);

        let summary = run_pipeline(&config).unwrap();

        assert_eq!(summary.merged_contacts, 0);
        assert_eq!(std::fs::read_to_string(&config.output).unwrap(), "");
    }
}
