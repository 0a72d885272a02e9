use std::path::PathBuf;

use crossforge_build::diagnostics::{inspect_linkage, LinkageReport};

pub struct CheckStaticArgs {
    pub files: Vec<PathBuf>,
}

pub struct CheckStaticOutcome {
    pub reports: Vec<LinkageReport>,
}

impl CheckStaticOutcome {
    pub fn all_static(&self) -> bool {
        !self.reports.iter().any(LinkageReport::is_dynamic)
    }
}

pub fn run(args: CheckStaticArgs) -> Result<CheckStaticOutcome, String> {
    if args.files.is_empty() {
        return Err("no files given".to_string());
    }
    let reports = args
        .files
        .iter()
        .map(|path| inspect_linkage(path).map_err(|err| err.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CheckStaticOutcome { reports })
}
