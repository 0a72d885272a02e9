//! Post-build checks that shell out to `file` and `readelf`.

pub mod linkage;
pub mod size;

use std::path::PathBuf;

use thiserror::Error;

pub use linkage::{
    classify_file_output, inspect_linkage, parse_needed_libraries, refine_dynamic, Linkage,
    LinkageReport,
};
pub use size::{human_size, size_report, SizeEntry, SizeReport};

#[derive(Debug, Error)]
pub enum DiagnosticError {
    #[error("'{}' is not a regular file", .0.display())]
    MissingFile(PathBuf),
    #[error("failed to run {program}: {source}")]
    Tool {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} failed: {stderr}")]
    ToolFailed { program: String, stderr: String },
}
