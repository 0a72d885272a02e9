use std::path::Path;
use std::process::{Command, Stdio};

use crossforge_core::build_plan::{BuildEnvVar, BuildPlan, BuildStep};
use crossforge_core::resolve::ResolvedEnvironment;

use crate::builder::{BuildError, BuildExecutor, BuildResult, StepReport};

/// Spawns each step as a child process. The resolved environment is applied to
/// the child only; the current process environment is left untouched.
#[derive(Clone, Debug, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl BuildExecutor for ProcessExecutor {
    fn execute(
        &self,
        plan: &BuildPlan,
        env: Option<&ResolvedEnvironment>,
        working_dir: &Path,
    ) -> BuildResult<Vec<StepReport>> {
        if plan.steps.is_empty() {
            return Err(BuildError::EmptyPlan);
        }
        let mut reports = Vec::with_capacity(plan.steps.len());
        for step in &plan.steps {
            let mut command = Command::new(step.program());
            command
                .args(step.argv.iter().skip(1))
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .current_dir(working_dir);
            if let Some(env) = env {
                apply_resolved(env, &mut command);
            }
            apply_env(&step.env, &mut command);

            tracing::info!(step = %step, dir = %working_dir.display(), "running build step");
            let status = command.status().map_err(|source| BuildError::Spawn {
                program: step.program().to_string(),
                source,
            })?;
            if !status.success() {
                return Err(BuildError::StepFailed {
                    step: step.to_string(),
                    status: status.to_string(),
                });
            }
            reports.push(report(step, status.code()));
        }
        Ok(reports)
    }
}

fn report(step: &BuildStep, exit_code: Option<i32>) -> StepReport {
    StepReport {
        step: step.clone(),
        rendered: step.to_string(),
        exit_code,
    }
}

fn apply_resolved(env: &ResolvedEnvironment, command: &mut Command) {
    for (key, value) in env.iter() {
        command.env(key, value);
    }
}

fn apply_env(values: &[BuildEnvVar], command: &mut Command) {
    for entry in values {
        command.env(&entry.key, &entry.value);
    }
}
