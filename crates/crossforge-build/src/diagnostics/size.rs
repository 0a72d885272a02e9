use std::path::{Path, PathBuf};

use serde::Serialize;

use super::DiagnosticError;

const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SizeEntry {
    pub path: PathBuf,
    pub bytes: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SizeReport {
    pub entries: Vec<SizeEntry>,
    pub total_bytes: u64,
}

impl SizeReport {
    pub fn render(&self) -> String {
        let mut output = String::new();
        for entry in &self.entries {
            output.push_str(&format!(
                "{:>10}  {}\n",
                human_size(entry.bytes),
                entry.path.display()
            ));
        }
        output.push_str(&format!("{:>10}  total\n", human_size(self.total_bytes)));
        output
    }
}

pub fn size_report<P: AsRef<Path>>(paths: &[P]) -> Result<SizeReport, DiagnosticError> {
    let mut report = SizeReport::default();
    for path in paths {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)
            .map_err(|_| DiagnosticError::MissingFile(path.to_path_buf()))?;
        if !metadata.is_file() {
            return Err(DiagnosticError::MissingFile(path.to_path_buf()));
        }
        report.total_bytes += metadata.len();
        report.entries.push(SizeEntry {
            path: path.to_path_buf(),
            bytes: metadata.len(),
        });
    }
    Ok(report)
}

pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
