//! Translation from generic target ids to toolchain-native target names.
//!
//! Each ecosystem has its own table. A target missing from a table, or listed
//! with no mapping, is unsupported for that ecosystem and produces an
//! [`UnmappedEcosystemTargetError`] instead of falling back to the host.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::build_plan::BuildEnvVar;
use crate::target::TargetId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Rust,
    Go,
    Zig,
    Dart,
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Ecosystem::Rust => "rust",
            Ecosystem::Go => "go",
            Ecosystem::Zig => "zig",
            Ecosystem::Dart => "dart",
        };
        f.write_str(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("target '{target}' has no {ecosystem} equivalent")]
pub struct UnmappedEcosystemTargetError {
    pub ecosystem: Ecosystem,
    pub target: TargetId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoTarget {
    pub goos: &'static str,
    pub goarch: &'static str,
    pub goarm: Option<&'static str>,
}

impl GoTarget {
    pub fn env(&self) -> Vec<BuildEnvVar> {
        let mut env = vec![
            BuildEnvVar::new("GOOS", self.goos),
            BuildEnvVar::new("GOARCH", self.goarch),
        ];
        if let Some(goarm) = self.goarm {
            env.push(BuildEnvVar::new("GOARM", goarm));
        }
        env
    }
}

/// `dart compile exe` only cross-compiles to Linux.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DartTarget {
    pub os: &'static str,
    pub arch: &'static str,
}

impl DartTarget {
    pub fn args(&self) -> [String; 2] {
        [
            format!("--target-os={}", self.os),
            format!("--target-arch={}", self.arch),
        ]
    }
}

const fn dart(os: &'static str, arch: &'static str) -> Option<DartTarget> {
    Some(DartTarget { os, arch })
}

const fn go(goos: &'static str, goarch: &'static str) -> Option<GoTarget> {
    Some(GoTarget {
        goos,
        goarch,
        goarm: None,
    })
}

const fn go_arm(goos: &'static str, goarm: &'static str) -> Option<GoTarget> {
    Some(GoTarget {
        goos,
        goarch: "arm",
        goarm: Some(goarm),
    })
}

// s390x has no musl std in rustup, so it falls back to the glibc triple.
static RUST_TARGETS: &[(TargetId, Option<&str>)] = &[
    (TargetId::LinuxAmd64, Some("x86_64-unknown-linux-musl")),
    (TargetId::LinuxArm64, Some("aarch64-unknown-linux-musl")),
    (TargetId::LinuxArmv7, Some("armv7-unknown-linux-musleabihf")),
    (TargetId::Linux386, Some("i686-unknown-linux-musl")),
    (TargetId::LinuxRiscv64, Some("riscv64gc-unknown-linux-musl")),
    (TargetId::LinuxPpc64le, Some("powerpc64le-unknown-linux-musl")),
    (TargetId::LinuxS390x, Some("s390x-unknown-linux-gnu")),
    (TargetId::WindowsAmd64, Some("x86_64-pc-windows-gnu")),
    (TargetId::Windows386, Some("i686-pc-windows-gnu")),
    (TargetId::WindowsArm64, Some("aarch64-pc-windows-gnullvm")),
    (TargetId::DarwinAmd64, Some("x86_64-apple-darwin")),
    (TargetId::DarwinArm64, Some("aarch64-apple-darwin")),
    (TargetId::FreebsdAmd64, Some("x86_64-unknown-freebsd")),
    (TargetId::FreebsdArm64, None),
    (TargetId::NetbsdAmd64, Some("x86_64-unknown-netbsd")),
    (TargetId::OpenbsdAmd64, None),
    (TargetId::IllumosAmd64, Some("x86_64-unknown-illumos")),
    (TargetId::AndroidArm64, Some("aarch64-linux-android")),
    (TargetId::AndroidArmv7, Some("armv7-linux-androideabi")),
    (TargetId::AndroidAmd64, Some("x86_64-linux-android")),
    (TargetId::Wasi, Some("wasm32-wasip1")),
    (TargetId::Emscripten, Some("wasm32-unknown-emscripten")),
    (TargetId::Cosmo, None),
];

static GO_TARGETS: &[(TargetId, Option<GoTarget>)] = &[
    (TargetId::LinuxAmd64, go("linux", "amd64")),
    (TargetId::LinuxArm64, go("linux", "arm64")),
    (TargetId::LinuxArmv7, go_arm("linux", "7")),
    (TargetId::Linux386, go("linux", "386")),
    (TargetId::LinuxRiscv64, go("linux", "riscv64")),
    (TargetId::LinuxPpc64le, go("linux", "ppc64le")),
    (TargetId::LinuxS390x, go("linux", "s390x")),
    (TargetId::WindowsAmd64, go("windows", "amd64")),
    (TargetId::Windows386, go("windows", "386")),
    (TargetId::WindowsArm64, go("windows", "arm64")),
    (TargetId::DarwinAmd64, go("darwin", "amd64")),
    (TargetId::DarwinArm64, go("darwin", "arm64")),
    (TargetId::FreebsdAmd64, go("freebsd", "amd64")),
    (TargetId::FreebsdArm64, go("freebsd", "arm64")),
    (TargetId::NetbsdAmd64, go("netbsd", "amd64")),
    (TargetId::OpenbsdAmd64, go("openbsd", "amd64")),
    (TargetId::IllumosAmd64, None),
    (TargetId::AndroidArm64, go("android", "arm64")),
    (TargetId::AndroidArmv7, go_arm("android", "7")),
    (TargetId::AndroidAmd64, go("android", "amd64")),
    (TargetId::Wasi, go("wasip1", "wasm")),
    (TargetId::Emscripten, None),
    (TargetId::Cosmo, None),
];

static ZIG_TARGETS: &[(TargetId, Option<&str>)] = &[
    (TargetId::LinuxAmd64, Some("x86_64-linux-musl")),
    (TargetId::LinuxArm64, Some("aarch64-linux-musl")),
    (TargetId::LinuxArmv7, Some("arm-linux-musleabihf")),
    (TargetId::Linux386, Some("x86-linux-musl")),
    (TargetId::LinuxRiscv64, Some("riscv64-linux-musl")),
    (TargetId::LinuxPpc64le, Some("powerpc64le-linux-musl")),
    (TargetId::LinuxS390x, Some("s390x-linux-musl")),
    (TargetId::WindowsAmd64, Some("x86_64-windows-gnu")),
    (TargetId::Windows386, Some("x86-windows-gnu")),
    (TargetId::WindowsArm64, Some("aarch64-windows-gnu")),
    (TargetId::DarwinAmd64, Some("x86_64-macos")),
    (TargetId::DarwinArm64, Some("aarch64-macos")),
    (TargetId::FreebsdAmd64, Some("x86_64-freebsd")),
    (TargetId::FreebsdArm64, Some("aarch64-freebsd")),
    (TargetId::NetbsdAmd64, Some("x86_64-netbsd")),
    (TargetId::OpenbsdAmd64, None),
    (TargetId::IllumosAmd64, None),
    (TargetId::AndroidArm64, None),
    (TargetId::AndroidArmv7, None),
    (TargetId::AndroidAmd64, None),
    (TargetId::Wasi, Some("wasm32-wasi")),
    (TargetId::Emscripten, Some("wasm32-emscripten")),
    (TargetId::Cosmo, None),
];

static DART_TARGETS: &[(TargetId, Option<DartTarget>)] = &[
    (TargetId::LinuxAmd64, dart("linux", "x64")),
    (TargetId::LinuxArm64, dart("linux", "arm64")),
    (TargetId::LinuxArmv7, dart("linux", "arm")),
    (TargetId::Linux386, None),
    (TargetId::LinuxRiscv64, dart("linux", "riscv64")),
    (TargetId::LinuxPpc64le, None),
    (TargetId::LinuxS390x, None),
    (TargetId::WindowsAmd64, None),
    (TargetId::Windows386, None),
    (TargetId::WindowsArm64, None),
    (TargetId::DarwinAmd64, None),
    (TargetId::DarwinArm64, None),
    (TargetId::FreebsdAmd64, None),
    (TargetId::FreebsdArm64, None),
    (TargetId::NetbsdAmd64, None),
    (TargetId::OpenbsdAmd64, None),
    (TargetId::IllumosAmd64, None),
    (TargetId::AndroidArm64, None),
    (TargetId::AndroidArmv7, None),
    (TargetId::AndroidAmd64, None),
    (TargetId::Wasi, None),
    (TargetId::Emscripten, None),
    (TargetId::Cosmo, None),
];

fn find<T: Copy>(
    table: &[(TargetId, Option<T>)],
    ecosystem: Ecosystem,
    target: TargetId,
) -> Result<T, UnmappedEcosystemTargetError> {
    table
        .iter()
        .find(|(id, _)| *id == target)
        .and_then(|(_, mapping)| *mapping)
        .ok_or(UnmappedEcosystemTargetError { ecosystem, target })
}

pub fn rust_triple(target: TargetId) -> Result<&'static str, UnmappedEcosystemTargetError> {
    find(RUST_TARGETS, Ecosystem::Rust, target)
}

pub fn go_target(target: TargetId) -> Result<GoTarget, UnmappedEcosystemTargetError> {
    find(GO_TARGETS, Ecosystem::Go, target)
}

pub fn zig_triple(target: TargetId) -> Result<&'static str, UnmappedEcosystemTargetError> {
    find(ZIG_TARGETS, Ecosystem::Zig, target)
}

pub fn dart_target(target: TargetId) -> Result<DartTarget, UnmappedEcosystemTargetError> {
    find(DART_TARGETS, Ecosystem::Dart, target)
}

/// Whether `target` can be built by `ecosystem` at all.
pub fn is_mapped(ecosystem: Ecosystem, target: TargetId) -> bool {
    match ecosystem {
        Ecosystem::Rust => rust_triple(target).is_ok(),
        Ecosystem::Go => go_target(target).is_ok(),
        Ecosystem::Zig => zig_triple(target).is_ok(),
        Ecosystem::Dart => dart_target(target).is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::list_targets;

    #[test]
    fn linux_arm64_maps_to_musl_triple() {
        assert_eq!(
            rust_triple(TargetId::LinuxArm64),
            Ok("aarch64-unknown-linux-musl")
        );
    }

    #[test]
    fn go_linux_arm64_sets_goos_and_goarch() {
        let target = go_target(TargetId::LinuxArm64).expect("mapped");
        assert_eq!(target.goos, "linux");
        assert_eq!(target.goarch, "arm64");
        assert_eq!(target.goarm, None);
    }

    #[test]
    fn go_armv7_sets_goarm() {
        let env = go_target(TargetId::LinuxArmv7).expect("mapped").env();
        assert!(env.contains(&BuildEnvVar::new("GOARCH", "arm")));
        assert!(env.contains(&BuildEnvVar::new("GOARM", "7")));
    }

    #[test]
    fn go_illumos_is_unmapped() {
        let error = go_target(TargetId::IllumosAmd64).expect_err("unmapped");
        assert_eq!(error.ecosystem, Ecosystem::Go);
        assert_eq!(error.target, TargetId::IllumosAmd64);
        assert_eq!(
            error.to_string(),
            "target 'illumos-amd64' has no go equivalent"
        );
    }

    #[test]
    fn dart_only_maps_linux_targets() {
        let target = dart_target(TargetId::LinuxArm64).expect("mapped");
        assert_eq!(target.args(), ["--target-os=linux", "--target-arch=arm64"]);
        let error = dart_target(TargetId::DarwinArm64).expect_err("unmapped");
        assert_eq!(error.to_string(), "target 'darwin-arm64' has no dart equivalent");
    }

    #[test]
    fn cosmo_is_unmapped_everywhere() {
        for ecosystem in [Ecosystem::Rust, Ecosystem::Go, Ecosystem::Zig, Ecosystem::Dart] {
            assert!(!is_mapped(ecosystem, TargetId::Cosmo));
        }
    }

    #[test]
    fn tables_cover_every_registered_target() {
        for id in list_targets() {
            assert!(RUST_TARGETS.iter().any(|(entry, _)| *entry == id), "rust {}", id);
            assert!(GO_TARGETS.iter().any(|(entry, _)| *entry == id), "go {}", id);
            assert!(ZIG_TARGETS.iter().any(|(entry, _)| *entry == id), "zig {}", id);
            assert!(DART_TARGETS.iter().any(|(entry, _)| *entry == id), "dart {}", id);
        }
    }
}
