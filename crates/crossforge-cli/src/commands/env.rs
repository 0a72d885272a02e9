use std::path::PathBuf;

use serde::Serialize;

use crossforge_core::resolve::{resolve_target, ResolvedEnvironment};

use super::EnvSettings;

pub struct EnvArgs {
    pub project_dir: PathBuf,
    pub target: Option<String>,
    pub settings: EnvSettings,
    pub json: bool,
}

pub struct EnvOutcome {
    pub environment: ResolvedEnvironment,
    pub rendered: String,
}

#[derive(Serialize)]
struct EnvReport<'a> {
    #[serde(flatten)]
    environment: &'a ResolvedEnvironment,
    fingerprint: String,
}

pub fn run(args: EnvArgs) -> Result<EnvOutcome, String> {
    let config = super::load_config(&args.project_dir)?;
    let target = super::select_target(args.target.as_deref(), &config)?.ok_or_else(|| {
        "no target given; pass --target, set CROSSFORGE_TARGET or add target to crossforge.yaml"
            .to_string()
    })?;
    let overrides = args.settings.overrides(&config)?;
    let options = args.settings.resolve_options(&config);
    let environment = resolve_target(target, &overrides, &options);

    let rendered = if args.json {
        super::to_json(&EnvReport {
            environment: &environment,
            fingerprint: environment.fingerprint(),
        })?
    } else {
        environment.to_shell_exports()
    };
    Ok(EnvOutcome {
        environment,
        rendered,
    })
}
