use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::resolve::ResolveOptions;
use crate::target::{TargetId, UnknownTargetError};

pub const CONFIG_FILE_NAME: &str = "crossforge.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config '{path}': {source}")]
    Yaml {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("invalid target in '{path}': {source}")]
    InvalidTarget {
        path: String,
        source: UnknownTargetError,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheSetting {
    #[default]
    Ccache,
    Sccache,
    None,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawProjectConfig {
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    cache: Option<CacheSetting>,
    #[serde(default)]
    mold: Option<bool>,
    #[serde(default, rename = "static")]
    static_link: Option<bool>,
    #[serde(default)]
    env: BTreeMap<String, String>,
}

/// Per-project defaults read from `crossforge.yaml`. Every field is optional;
/// command-line flags take precedence over anything set here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    pub target: Option<TargetId>,
    pub cache: Option<CacheSetting>,
    pub mold: Option<bool>,
    pub static_link: Option<bool>,
    pub env: BTreeMap<String, String>,
}

impl ProjectConfig {
    /// Applies file settings on top of the built-in defaults.
    pub fn resolve_options(&self) -> ResolveOptions {
        let mut options = ResolveOptions::default();
        match self.cache {
            Some(CacheSetting::Ccache) | None => {}
            Some(CacheSetting::Sccache) => options.use_sccache = true,
            Some(CacheSetting::None) => options.use_ccache = false,
        }
        if let Some(mold) = self.mold {
            options.use_mold = mold;
        }
        if let Some(static_link) = self.static_link {
            options.enable_static = static_link;
        }
        options
    }
}

pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let (path, contents) = match read_optional_config(project_dir)? {
        Some(value) => value,
        None => return Ok(ProjectConfig::default()),
    };
    parse_project_config(&path, &contents)
}

pub fn parse_project_config(path: &str, contents: &str) -> Result<ProjectConfig, ConfigError> {
    let raw: RawProjectConfig = if contents.trim().is_empty() {
        RawProjectConfig::default()
    } else {
        serde_yaml::from_str(contents).map_err(|source| ConfigError::Yaml {
            path: path.to_string(),
            source,
        })?
    };
    let target = raw
        .target
        .map(|value| value.parse::<TargetId>())
        .transpose()
        .map_err(|source| ConfigError::InvalidTarget {
            path: path.to_string(),
            source,
        })?;
    Ok(ProjectConfig {
        target,
        cache: raw.cache,
        mold: raw.mold,
        static_link: raw.static_link,
        env: raw.env,
    })
}

fn read_optional_config(project_dir: &Path) -> Result<Option<(String, String)>, ConfigError> {
    let yaml_path = project_dir.join(CONFIG_FILE_NAME);
    if !yaml_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&yaml_path)?;
    Ok(Some((
        yaml_path.to_str().unwrap_or(CONFIG_FILE_NAME).to_string(),
        contents,
    )))
}
