pub mod builder;
pub mod diagnostics;
pub mod dry_run;
pub mod process;

pub use builder::{BuildError, BuildExecutor, BuildResult, StepReport};
pub use dry_run::DryRunExecutor;
pub use process::ProcessExecutor;
