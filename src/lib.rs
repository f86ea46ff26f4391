pub mod error;
pub mod io;
pub mod models;
pub mod phone;
pub mod pipeline;
pub mod stages;

pub use error::PipelineError;
pub use io::{
    parse_raw_rows, read_raw_rows, render_json, render_records, write_records, write_rendered_json,
};
pub use models::{Contact, MergeKey, MergedContact, RawRow, Remainder};
pub use phone::{canonicalize_phone, is_recognized_phone};
pub use pipeline::{Analysis, PipelineConfig, PipelineSummary, analyze, run_pipeline};
pub use stages::{
    Stage0Config, Stage3Config, execute_stage0, execute_stage1, execute_stage2, execute_stage3,
};
