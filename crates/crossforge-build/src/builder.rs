use std::path::Path;

use crossforge_core::build_plan::{BuildPlan, BuildStep};
use crossforge_core::resolve::ResolvedEnvironment;
use thiserror::Error;

pub type BuildResult<T> = Result<T, BuildError>;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("plan has no steps")]
    EmptyPlan,
    #[error("'{program}' could not be started: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("step '{step}' exited with status {status}")]
    StepFailed { step: String, status: String },
}

/// Outcome of one executed (or rendered) step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub step: BuildStep,
    pub rendered: String,
    pub exit_code: Option<i32>,
}

/// Runs a [`BuildPlan`] with a [`ResolvedEnvironment`] applied to each step.
///
/// `env` is `None` for host builds. Implementations stop at the first failing
/// step.
pub trait BuildExecutor {
    fn execute(
        &self,
        plan: &BuildPlan,
        env: Option<&ResolvedEnvironment>,
        working_dir: &Path,
    ) -> BuildResult<Vec<StepReport>>;
}
