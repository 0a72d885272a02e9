use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

use super::registry::{registry, TargetAvailability, TargetDescriptor};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetId {
    LinuxAmd64,
    LinuxArm64,
    LinuxArmv7,
    Linux386,
    LinuxRiscv64,
    LinuxPpc64le,
    LinuxS390x,
    WindowsAmd64,
    Windows386,
    WindowsArm64,
    DarwinAmd64,
    DarwinArm64,
    FreebsdAmd64,
    FreebsdArm64,
    NetbsdAmd64,
    OpenbsdAmd64,
    IllumosAmd64,
    AndroidArm64,
    AndroidArmv7,
    AndroidAmd64,
    Wasi,
    Emscripten,
    Cosmo,
}

impl TargetId {
    pub fn as_str(self) -> &'static str {
        self.descriptor().key_str
    }

    pub fn family(self) -> TargetFamily {
        self.descriptor().family
    }

    pub fn availability(self) -> TargetAvailability {
        self.descriptor().availability
    }

    /// The target whose toolchain is used in place of this one, if any.
    pub fn alias_of(self) -> Option<TargetId> {
        match self.availability() {
            TargetAvailability::Native(_) => None,
            TargetAvailability::Aliased { substitute } => Some(substitute),
        }
    }

    pub fn descriptor(self) -> &'static TargetDescriptor {
        registry()
            .iter()
            .find(|entry| entry.id == self)
            .expect("target id missing from registry")
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetId {
    type Err = UnknownTargetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        registry()
            .iter()
            .find(|entry| entry.key_str == value)
            .map(|entry| entry.id)
            .ok_or_else(|| UnknownTargetError::new(value))
    }
}

impl Serialize for TargetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Display grouping used when listing targets. Declaration order is listing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFamily {
    Linux,
    Windows,
    Macos,
    Bsd,
    Illumos,
    Android,
    Webassembly,
    Universal,
}

impl TargetFamily {
    pub fn label(self) -> &'static str {
        match self {
            TargetFamily::Linux => "Linux",
            TargetFamily::Windows => "Windows",
            TargetFamily::Macos => "macOS",
            TargetFamily::Bsd => "BSD",
            TargetFamily::Illumos => "illumos",
            TargetFamily::Android => "Android",
            TargetFamily::Webassembly => "WebAssembly",
            TargetFamily::Universal => "Universal",
        }
    }
}

impl fmt::Display for TargetFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown target '{input}'; valid targets: {}", .valid.join(", "))]
pub struct UnknownTargetError {
    pub input: String,
    pub valid: Vec<String>,
}

impl UnknownTargetError {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            valid: registry()
                .iter()
                .map(|entry| entry.key_str.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_id_round_trips() {
        let id = TargetId::LinuxArm64;
        let encoded = id.to_string();
        let decoded: TargetId = encoded.parse().expect("should parse");
        assert_eq!(decoded, id);
    }

    #[test]
    fn single_word_targets_parse() {
        assert_eq!("cosmo".parse::<TargetId>(), Ok(TargetId::Cosmo));
        assert_eq!("wasi".parse::<TargetId>(), Ok(TargetId::Wasi));
    }

    #[test]
    fn unknown_target_carries_input_and_valid_list() {
        let error = "bogus-target".parse::<TargetId>().expect_err("error");
        assert_eq!(error.input, "bogus-target");
        assert!(error.valid.contains(&"linux-amd64".to_string()));
        assert!(error.to_string().contains("unknown target 'bogus-target'"));
    }

    #[test]
    fn target_ids_are_case_sensitive() {
        assert!("Linux-AMD64".parse::<TargetId>().is_err());
    }

    #[test]
    fn surrounding_whitespace_is_rejected() {
        let error = " linux-amd64".parse::<TargetId>().expect_err("error");
        assert_eq!(error.input, " linux-amd64");
        assert!("linux-amd64\n".parse::<TargetId>().is_err());
    }

    #[test]
    fn windows_arm64_is_an_alias() {
        assert_eq!(TargetId::WindowsArm64.alias_of(), Some(TargetId::WindowsAmd64));
        assert_eq!(TargetId::WindowsAmd64.alias_of(), None);
    }

    #[test]
    fn serializes_as_canonical_string() {
        let json = serde_json::to_string(&TargetId::DarwinArm64).expect("json");
        assert_eq!(json, "\"darwin-arm64\"");
    }
}
