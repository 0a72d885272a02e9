pub mod detect;
pub mod scan;

pub use detect::{detect, ContentHint, MarkerSet, ProjectClassification, MARKER_FILES};
pub use scan::{cargo_targets_wasm, scan_markers};
