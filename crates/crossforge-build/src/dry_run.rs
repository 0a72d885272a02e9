use std::path::Path;

use crossforge_core::build_plan::BuildPlan;
use crossforge_core::resolve::ResolvedEnvironment;

use crate::builder::{BuildError, BuildExecutor, BuildResult, StepReport};

/// Renders steps without running anything.
#[derive(Clone, Debug, Default)]
pub struct DryRunExecutor;

impl DryRunExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl BuildExecutor for DryRunExecutor {
    fn execute(
        &self,
        plan: &BuildPlan,
        env: Option<&ResolvedEnvironment>,
        working_dir: &Path,
    ) -> BuildResult<Vec<StepReport>> {
        if plan.steps.is_empty() {
            return Err(BuildError::EmptyPlan);
        }
        if let Some(env) = env {
            tracing::debug!(
                target_id = %env.target(),
                fingerprint = %env.fingerprint(),
                "dry run with resolved environment"
            );
        }
        Ok(plan
            .steps
            .iter()
            .map(|step| {
                tracing::info!(step = %step, dir = %working_dir.display(), "would run");
                StepReport {
                    step: step.clone(),
                    rendered: step.to_string(),
                    exit_code: None,
                }
            })
            .collect())
    }
}
