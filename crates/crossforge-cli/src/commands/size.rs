use std::path::PathBuf;

use crossforge_build::diagnostics::{size_report, SizeReport};

pub struct SizeArgs {
    pub files: Vec<PathBuf>,
}

pub fn run(args: SizeArgs) -> Result<SizeReport, String> {
    if args.files.is_empty() {
        return Err("no files given".to_string());
    }
    size_report(&args.files).map_err(|err| err.to_string())
}
