use std::path::PathBuf;

use crossforge_core::project::{detect, scan_markers, MarkerSet, ProjectClassification};

pub struct DetectArgs {
    pub project_dir: PathBuf,
}

pub struct DetectOutcome {
    pub classification: ProjectClassification,
    pub markers: MarkerSet,
}

pub fn run(args: DetectArgs) -> Result<DetectOutcome, String> {
    let markers = scan_markers(&args.project_dir).map_err(|err| {
        format!(
            "failed to scan '{}': {}",
            args.project_dir.display(),
            err
        )
    })?;
    let classification = detect(&markers);
    Ok(DetectOutcome {
        classification,
        markers,
    })
}
