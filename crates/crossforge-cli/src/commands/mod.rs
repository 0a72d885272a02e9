pub mod build;
pub mod check_static;
pub mod detect;
pub mod env;
pub mod plan;
pub mod size;
pub mod targets;

use std::collections::BTreeMap;
use std::path::Path;

use crossforge_core::config::{load_project_config, ProjectConfig};
use crossforge_core::resolve::ResolveOptions;
use crossforge_core::target::TargetId;

/// Resolution switches given on the command line. `None` leaves the
/// `crossforge.yaml` value (or the built-in default) in place.
#[derive(Clone, Debug, Default)]
pub struct EnvSettings {
    pub ccache: Option<bool>,
    pub sccache: Option<bool>,
    pub mold: Option<bool>,
    pub static_link: Option<bool>,
    /// Raw `KEY=VALUE` pairs from `--set`.
    pub overrides: Vec<String>,
    pub ambient_pkg_config_path: Option<String>,
}

impl EnvSettings {
    pub fn resolve_options(&self, config: &ProjectConfig) -> ResolveOptions {
        let mut options = config.resolve_options();
        if let Some(ccache) = self.ccache {
            options.use_ccache = ccache;
        }
        if let Some(sccache) = self.sccache {
            options.use_sccache = sccache;
        }
        if let Some(mold) = self.mold {
            options.use_mold = mold;
        }
        if let Some(static_link) = self.static_link {
            options.enable_static = static_link;
        }
        options.ambient_pkg_config_path = self.ambient_pkg_config_path.clone();
        options
    }

    /// Config-file overrides first, then `--set` pairs on top.
    pub fn overrides(&self, config: &ProjectConfig) -> Result<BTreeMap<String, String>, String> {
        let mut merged = config.env.clone();
        for pair in &self.overrides {
            let (key, value) = parse_override(pair)?;
            merged.insert(key, value);
        }
        Ok(merged)
    }
}

pub fn parse_override(pair: &str) -> Result<(String, String), String> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| format!("invalid override '{}'; expected KEY=VALUE", pair))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid override '{}'; key is empty", pair));
    }
    Ok((key.to_string(), value.to_string()))
}

pub(crate) fn load_config(project_dir: &Path) -> Result<ProjectConfig, String> {
    load_project_config(project_dir).map_err(|err| err.to_string())
}

/// `--target` (or `CROSSFORGE_TARGET`) wins over the config file.
pub(crate) fn select_target(
    requested: Option<&str>,
    config: &ProjectConfig,
) -> Result<Option<TargetId>, String> {
    match requested {
        Some(name) => name
            .parse::<TargetId>()
            .map(Some)
            .map_err(|err| err.to_string()),
        None => Ok(config.target),
    }
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| format!("failed to encode JSON: {}", err))
}
