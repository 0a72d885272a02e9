use std::path::PathBuf;

use crossforge_build::{BuildExecutor, DryRunExecutor, ProcessExecutor, StepReport};
use crossforge_core::build_plan::{plan_for, BuildPlan};
use crossforge_core::config::ProjectConfig;
use crossforge_core::resolve::{resolve_target, ResolvedEnvironment};

use super::detect::{self, DetectArgs};
use super::EnvSettings;

pub struct BuildArgs {
    pub project_dir: PathBuf,
    pub target: Option<String>,
    pub settings: EnvSettings,
    pub dry_run: bool,
}

pub struct BuildOutcome {
    pub plan: BuildPlan,
    pub environment: Option<ResolvedEnvironment>,
    pub reports: Vec<StepReport>,
}

pub fn run(args: BuildArgs) -> Result<BuildOutcome, String> {
    let project_dir = args.project_dir;
    let config = super::load_config(&project_dir)?;
    let target = super::select_target(args.target.as_deref(), &config)?;
    let detected = detect::run(DetectArgs {
        project_dir: project_dir.clone(),
    })?;
    let plan = plan_for(detected.classification, target).map_err(|err| err.to_string())?;

    let environment = match target {
        Some(target) => {
            let overrides = args.settings.overrides(&config)?;
            let options = args.settings.resolve_options(&config);
            Some(resolve_target(target, &overrides, &options))
        }
        None => {
            let ignored = ignored_host_settings(&args.settings, &config);
            if !ignored.is_empty() {
                tracing::warn!(
                    ignored = %ignored.join(", "),
                    "no target selected; host build ignores resolution settings"
                );
            }
            None
        }
    };

    let executor: Box<dyn BuildExecutor> = if args.dry_run {
        Box::new(DryRunExecutor::new())
    } else {
        Box::new(ProcessExecutor::new())
    };
    let reports = executor
        .execute(&plan, environment.as_ref(), &project_dir)
        .map_err(|err| format!("build failed: {}", err))?;

    Ok(BuildOutcome {
        plan,
        environment,
        reports,
    })
}

/// Settings that only feed environment resolution and so have no effect on a host build.
pub fn ignored_host_settings(settings: &EnvSettings, config: &ProjectConfig) -> Vec<&'static str> {
    let mut ignored = Vec::new();
    if !settings.overrides.is_empty() {
        ignored.push("--set");
    }
    if settings.ccache.is_some() {
        ignored.push("--no-ccache");
    }
    if settings.sccache.is_some() {
        ignored.push("--sccache");
    }
    if settings.mold.is_some() {
        ignored.push("--mold");
    }
    if settings.static_link.is_some() {
        ignored.push("--no-static");
    }
    if config.cache.is_some() || config.mold.is_some() || config.static_link.is_some() {
        ignored.push("crossforge.yaml resolution settings");
    }
    if !config.env.is_empty() {
        ignored.push("crossforge.yaml env");
    }
    ignored
}
