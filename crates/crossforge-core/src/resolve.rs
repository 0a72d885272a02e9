use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::target::{StaticLinkSupport, TargetAvailability, TargetId, UnknownTargetError};

pub const STATIC_LINK_FLAG: &str = "-static";
pub const MOLD_LINKER_FLAG: &str = "-fuse-ld=mold";

const FINGERPRINT_VERSION: &str = "e1";

#[cfg(windows)]
pub const PATH_LIST_SEPARATOR: &str = ";";
#[cfg(not(windows))]
pub const PATH_LIST_SEPARATOR: &str = ":";

/// Variables every resolved environment carries, regardless of target.
pub const REQUIRED_VARS: &[&str] = &[
    "CC",
    "CXX",
    "AR",
    "RANLIB",
    "STRIP",
    "PKG_CONFIG_PATH",
    "CFLAGS",
    "CXXFLAGS",
    "LDFLAGS",
    "CROSS_TARGET",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveOptions {
    pub use_ccache: bool,
    pub use_sccache: bool,
    pub use_mold: bool,
    pub enable_static: bool,
    /// `PKG_CONFIG_PATH` already set by the caller; kept ahead of profile paths.
    pub ambient_pkg_config_path: Option<String>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            use_ccache: true,
            use_sccache: false,
            use_mold: false,
            enable_static: true,
            ambient_pkg_config_path: None,
        }
    }
}

impl ResolveOptions {
    pub fn cache_wrapper(&self) -> Option<CacheWrapper> {
        if self.use_sccache {
            Some(CacheWrapper::Sccache)
        } else if self.use_ccache {
            Some(CacheWrapper::Ccache)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheWrapper {
    Ccache,
    Sccache,
}

impl CacheWrapper {
    pub fn command(self) -> &'static str {
        match self {
            CacheWrapper::Ccache => "ccache",
            CacheWrapper::Sccache => "sccache",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolveWarning {
    AliasedTarget {
        requested: TargetId,
        substitute: TargetId,
    },
    StaticUnsupported {
        target: TargetId,
        support: StaticLinkSupport,
    },
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveWarning::AliasedTarget {
                requested,
                substitute,
            } => write!(
                f,
                "no dedicated toolchain for {}; using {} tools",
                requested, substitute
            ),
            ResolveWarning::StaticUnsupported { target, support } => write!(
                f,
                "static linking is {} on {}; static flags omitted",
                support, target
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedEnvironment {
    target: TargetId,
    vars: BTreeMap<String, String>,
    warnings: Vec<ResolveWarning>,
}

impl ResolvedEnvironment {
    pub fn target(&self) -> TargetId {
        self.target
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn warnings(&self) -> &[ResolveWarning] {
        &self.warnings
    }

    /// POSIX shell `export` lines, single-quoted, sorted by name.
    pub fn to_shell_exports(&self) -> String {
        let mut output = String::new();
        for (key, value) in self.iter() {
            output.push_str(&format!("export {}={}\n", key, shell_quote(value)));
        }
        output
    }

    /// Stable content hash of the variables, usable as a cache key.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for (key, value) in self.iter() {
            hasher.update(key.as_bytes());
            hasher.update(b"=");
            hasher.update(value.as_bytes());
            hasher.update(b"\n");
        }
        format!("{}-{}", FINGERPRINT_VERSION, hex::encode(hasher.finalize()))
    }
}

/// Resolves `target` by name. Unknown names fail; nothing falls back to a default.
pub fn resolve(
    target: &str,
    overrides: &BTreeMap<String, String>,
    options: &ResolveOptions,
) -> Result<ResolvedEnvironment, UnknownTargetError> {
    let id: TargetId = target.parse()?;
    Ok(resolve_target(id, overrides, options))
}

pub fn resolve_target(
    target: TargetId,
    overrides: &BTreeMap<String, String>,
    options: &ResolveOptions,
) -> ResolvedEnvironment {
    let descriptor = target.descriptor();
    let profile = descriptor.profile();
    let mut warnings = Vec::new();

    if let TargetAvailability::Aliased { substitute } = descriptor.availability {
        warnings.push(ResolveWarning::AliasedTarget {
            requested: target,
            substitute,
        });
    }

    let mut vars = BTreeMap::new();
    vars.insert("CROSS_TARGET".to_string(), target.to_string());
    vars.insert("CC".to_string(), profile.compiler_c_command());
    vars.insert("CXX".to_string(), profile.compiler_cxx_command());
    vars.insert("AR".to_string(), profile.archiver.to_string());
    vars.insert("RANLIB".to_string(), profile.ranlib.to_string());
    vars.insert("STRIP".to_string(), profile.strip_tool.to_string());
    vars.insert(
        "CFLAGS".to_string(),
        profile.default_compile_flags.join(" "),
    );
    vars.insert(
        "CXXFLAGS".to_string(),
        profile.default_compile_flags.join(" "),
    );
    vars.insert("LDFLAGS".to_string(), profile.default_linker_flags.join(" "));

    let mut search_path: Vec<&str> = Vec::new();
    if let Some(ambient) = options.ambient_pkg_config_path.as_deref() {
        if !ambient.is_empty() {
            search_path.push(ambient);
        }
    }
    search_path.extend(profile.sysroot_pkg_config_path.iter().copied());
    vars.insert(
        "PKG_CONFIG_PATH".to_string(),
        search_path.join(PATH_LIST_SEPARATOR),
    );
    if let Some(sysroot) = profile.sysroot {
        vars.insert("PKG_CONFIG_SYSROOT_DIR".to_string(), sysroot.to_string());
        vars.insert("PKG_CONFIG_ALLOW_CROSS".to_string(), "1".to_string());
    }

    if options.enable_static {
        if profile.static_link_support == StaticLinkSupport::Full {
            append_flag(&mut vars, "LDFLAGS", STATIC_LINK_FLAG);
            append_flag(&mut vars, "CFLAGS", STATIC_LINK_FLAG);
        } else {
            warnings.push(ResolveWarning::StaticUnsupported {
                target,
                support: profile.static_link_support,
            });
        }
    }

    if let Some(wrapper) = options.cache_wrapper() {
        for key in ["CC", "CXX"] {
            if let Some(value) = vars.get_mut(key) {
                *value = format!("{} {}", wrapper.command(), value);
            }
        }
    }

    if options.use_mold {
        append_flag(&mut vars, "LDFLAGS", MOLD_LINKER_FLAG);
    }

    for (key, value) in overrides {
        vars.insert(key.clone(), value.clone());
    }

    for warning in &warnings {
        tracing::warn!(target_id = %target, "{}", warning);
    }
    tracing::debug!(
        target_id = %target,
        cache = ?options.cache_wrapper(),
        mold = options.use_mold,
        overrides = overrides.len(),
        "resolved build environment"
    );

    ResolvedEnvironment {
        target,
        vars,
        warnings,
    }
}

fn append_flag(vars: &mut BTreeMap<String, String>, key: &str, flag: &str) {
    let entry = vars.entry(key.to_string()).or_default();
    if entry.is_empty() {
        entry.push_str(flag);
    } else {
        entry.push(' ');
        entry.push_str(flag);
    }
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}
