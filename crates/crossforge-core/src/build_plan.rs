use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::ecosystem::{self, UnmappedEcosystemTargetError};
use crate::project::ProjectClassification;
use crate::target::{TargetFamily, TargetId};

pub const BUILD_DIR: &str = "build";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    pub classification: ProjectClassification,
    pub target: Option<TargetId>,
    pub steps: Vec<BuildStep>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BuildStep {
    pub argv: Vec<String>,
    pub env: Vec<BuildEnvVar>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BuildEnvVar {
    pub key: String,
    pub value: String,
}

impl BuildEnvVar {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl BuildStep {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            env: Vec::new(),
        }
    }

    pub fn with_env(mut self, env: Vec<BuildEnvVar>) -> Self {
        self.env = env;
        self
    }

    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.env {
            write!(f, "{}={} ", entry.key, entry.value)?;
        }
        f.write_str(&self.argv.join(" "))
    }
}

impl BuildPlan {
    pub fn argvs(&self) -> impl Iterator<Item = &[String]> {
        self.steps.iter().map(|step| step.argv.as_slice())
    }

    /// True if any step carries `key=value` in its step environment.
    pub fn has_env(&self, key: &str, value: &str) -> bool {
        self.steps
            .iter()
            .flat_map(|step| step.env.iter())
            .any(|entry| entry.key == key && entry.value == value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("no build plan for project type '{classification}'")]
pub struct UnsupportedClassificationError {
    pub classification: ProjectClassification,
}

/// The build tool has no way to honor the requested target from this plan.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("project type '{classification}' cannot be built for target '{target}'")]
pub struct UnsupportedCrossTargetError {
    pub classification: ProjectClassification,
    pub target: TargetId,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error(transparent)]
    UnsupportedClassification(#[from] UnsupportedClassificationError),
    #[error(transparent)]
    UnmappedEcosystemTarget(#[from] UnmappedEcosystemTargetError),
    #[error(transparent)]
    UnsupportedCrossTarget(#[from] UnsupportedCrossTargetError),
}

pub fn plan_for(
    classification: ProjectClassification,
    target: Option<TargetId>,
) -> Result<BuildPlan, PlanError> {
    let steps = match classification {
        ProjectClassification::RustCargo => cargo_steps(target)?,
        ProjectClassification::WasmPackRust => {
            host_only(classification, target)?;
            vec![BuildStep::new(["wasm-pack", "build", "--release"])]
        }
        ProjectClassification::GoModules => go_steps(target)?,
        ProjectClassification::ZigBuild => zig_steps(target)?,
        ProjectClassification::CMake => cmake_steps(target),
        ProjectClassification::Meson => {
            // Cross builds need a --cross-file; a bare setup would sanity-check the cross CC as native.
            host_only(classification, target)?;
            vec![
                BuildStep::new(["meson", "setup", BUILD_DIR, "--buildtype=release"]),
                BuildStep::new(["meson", "compile", "-C", BUILD_DIR]),
            ]
        }
        ProjectClassification::AutotoolsConfigure => {
            vec![configure_step(target), make_step()]
        }
        ProjectClassification::AutotoolsAutoreconf => vec![
            BuildStep::new(["autoreconf", "-fi"]),
            configure_step(target),
            make_step(),
        ],
        ProjectClassification::PlainMakefile => vec![make_step()],
        ProjectClassification::GradleAndroid => {
            if let Some(target) = target.filter(|id| id.family() != TargetFamily::Android) {
                return Err(UnsupportedCrossTargetError {
                    classification,
                    target,
                }
                .into());
            }
            vec![BuildStep::new(["./gradlew", "assembleRelease"])]
        }
        ProjectClassification::GradleKotlin => vec![BuildStep::new(["./gradlew", "build"])],
        ProjectClassification::MavenJava => {
            vec![BuildStep::new(["mvn", "-B", "package", "-DskipTests"])]
        }
        ProjectClassification::DartPub => dart_steps(target)?,
        ProjectClassification::Unclassified => {
            return Err(UnsupportedClassificationError { classification }.into());
        }
    };
    tracing::debug!(
        %classification,
        target_id = ?target.map(|id| id.as_str()),
        steps = steps.len(),
        "planned build"
    );
    Ok(BuildPlan {
        classification,
        target,
        steps,
    })
}

fn host_only(
    classification: ProjectClassification,
    target: Option<TargetId>,
) -> Result<(), UnsupportedCrossTargetError> {
    match target {
        Some(target) => Err(UnsupportedCrossTargetError {
            classification,
            target,
        }),
        None => Ok(()),
    }
}

fn dart_steps(target: Option<TargetId>) -> Result<Vec<BuildStep>, PlanError> {
    let mut compile = vec![
        "dart".to_string(),
        "compile".to_string(),
        "exe".to_string(),
        "bin/main.dart".to_string(),
    ];
    if let Some(target) = target {
        compile.extend(ecosystem::dart_target(target)?.args());
    }
    compile.push("-o".to_string());
    compile.push(format!("{}/main", BUILD_DIR));
    Ok(vec![
        BuildStep::new(["dart", "pub", "get"]),
        BuildStep::new(compile),
    ])
}

fn cargo_steps(target: Option<TargetId>) -> Result<Vec<BuildStep>, PlanError> {
    let mut argv = vec!["cargo", "build", "--release"];
    if let Some(target) = target {
        argv.push("--target");
        argv.push(ecosystem::rust_triple(target)?);
    }
    Ok(vec![BuildStep::new(argv)])
}

fn go_steps(target: Option<TargetId>) -> Result<Vec<BuildStep>, PlanError> {
    let step = BuildStep::new(["go", "build", "-trimpath", "./..."]);
    match target {
        Some(target) => Ok(vec![step.with_env(ecosystem::go_target(target)?.env())]),
        None => Ok(vec![step]),
    }
}

fn zig_steps(target: Option<TargetId>) -> Result<Vec<BuildStep>, PlanError> {
    let mut argv = vec![
        "zig".to_string(),
        "build".to_string(),
        "-Doptimize=ReleaseSafe".to_string(),
    ];
    if let Some(target) = target {
        argv.push(format!("-Dtarget={}", ecosystem::zig_triple(target)?));
    }
    Ok(vec![BuildStep::new(argv)])
}

fn cmake_steps(target: Option<TargetId>) -> Vec<BuildStep> {
    let mut configure = vec![
        "cmake".to_string(),
        "-S".to_string(),
        ".".to_string(),
        "-B".to_string(),
        BUILD_DIR.to_string(),
        "-DCMAKE_BUILD_TYPE=Release".to_string(),
    ];
    if let Some(target) = target {
        let profile = target.descriptor().profile();
        configure.push(format!("-DCMAKE_SYSTEM_NAME={}", profile.cmake_system_name));
        configure.push(format!(
            "-DCMAKE_SYSTEM_PROCESSOR={}",
            profile.cmake_system_processor
        ));
        if let Some(sysroot) = profile.sysroot {
            configure.push(format!("-DCMAKE_SYSROOT={}", sysroot));
        }
    }
    vec![
        BuildStep::new(configure),
        BuildStep::new(["cmake", "--build", BUILD_DIR, "--parallel"]),
    ]
}

fn configure_step(target: Option<TargetId>) -> BuildStep {
    let mut argv = vec!["./configure".to_string()];
    if let Some(target) = target {
        argv.push(format!(
            "--host={}",
            target.descriptor().profile().gnu_host_triple
        ));
    }
    BuildStep::new(argv)
}

fn make_step() -> BuildStep {
    BuildStep::new(["make", "-j"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecosystem::Ecosystem;

    #[test]
    fn unclassified_is_unsupported() {
        let error = plan_for(ProjectClassification::Unclassified, None).expect_err("error");
        assert_eq!(
            error,
            PlanError::UnsupportedClassification(UnsupportedClassificationError {
                classification: ProjectClassification::Unclassified,
            })
        );
        let with_target = plan_for(ProjectClassification::Unclassified, Some(TargetId::LinuxAmd64));
        assert!(with_target.is_err());
    }

    #[test]
    fn go_plan_translates_target() {
        let plan = plan_for(ProjectClassification::GoModules, Some(TargetId::LinuxArm64))
            .expect("plan");
        assert!(plan.has_env("GOOS", "linux"));
        assert!(plan.has_env("GOARCH", "arm64"));
        assert_eq!(plan.steps[0].program(), "go");
    }

    #[test]
    fn go_plan_rejects_illumos() {
        let error = plan_for(ProjectClassification::GoModules, Some(TargetId::IllumosAmd64))
            .expect_err("unmapped");
        assert_eq!(
            error,
            PlanError::UnmappedEcosystemTarget(UnmappedEcosystemTargetError {
                ecosystem: Ecosystem::Go,
                target: TargetId::IllumosAmd64,
            })
        );
    }

    #[test]
    fn go_plan_without_target_builds_for_host() {
        let plan = plan_for(ProjectClassification::GoModules, None).expect("plan");
        assert!(plan.steps[0].env.is_empty());
    }

    #[test]
    fn cargo_plan_uses_rust_triple() {
        let plan = plan_for(ProjectClassification::RustCargo, Some(TargetId::LinuxArm64))
            .expect("plan");
        assert_eq!(
            plan.steps[0].argv,
            vec![
                "cargo",
                "build",
                "--release",
                "--target",
                "aarch64-unknown-linux-musl"
            ]
        );
    }

    #[test]
    fn cargo_plan_rejects_cosmo() {
        let result = plan_for(ProjectClassification::RustCargo, Some(TargetId::Cosmo));
        assert!(matches!(result, Err(PlanError::UnmappedEcosystemTarget(_))));
    }

    #[test]
    fn cmake_plan_configures_then_builds() {
        let plan =
            plan_for(ProjectClassification::CMake, Some(TargetId::WindowsAmd64)).expect("plan");
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(&plan.steps[0].argv[..2], ["cmake", "-S"]);
        assert!(plan.steps[0]
            .argv
            .contains(&"-DCMAKE_SYSTEM_NAME=Windows".to_string()));
        assert_eq!(plan.steps[1].argv[..2], ["cmake", "--build"]);
    }

    #[test]
    fn autoreconf_plan_adds_host_triple() {
        let plan = plan_for(
            ProjectClassification::AutotoolsAutoreconf,
            Some(TargetId::LinuxArm64),
        )
        .expect("plan");
        let programs: Vec<&str> = plan.steps.iter().map(BuildStep::program).collect();
        assert_eq!(programs, vec!["autoreconf", "./configure", "make"]);
        assert_eq!(plan.steps[1].argv[1], "--host=aarch64-linux-musl");
    }

    #[test]
    fn zig_plan_passes_target() {
        let plan =
            plan_for(ProjectClassification::ZigBuild, Some(TargetId::DarwinArm64)).expect("plan");
        assert!(plan.steps[0]
            .argv
            .contains(&"-Dtarget=aarch64-macos".to_string()));
    }

    #[test]
    fn dart_plan_translates_linux_target() {
        let plan =
            plan_for(ProjectClassification::DartPub, Some(TargetId::LinuxArm64)).expect("plan");
        assert_eq!(
            plan.steps[1].argv,
            vec![
                "dart",
                "compile",
                "exe",
                "bin/main.dart",
                "--target-os=linux",
                "--target-arch=arm64",
                "-o",
                "build/main"
            ]
        );
    }

    #[test]
    fn dart_plan_rejects_non_linux_target() {
        let error = plan_for(ProjectClassification::DartPub, Some(TargetId::WindowsAmd64))
            .expect_err("unmapped");
        assert_eq!(
            error,
            PlanError::UnmappedEcosystemTarget(UnmappedEcosystemTargetError {
                ecosystem: Ecosystem::Dart,
                target: TargetId::WindowsAmd64,
            })
        );
    }

    #[test]
    fn dart_plan_without_target_builds_for_host() {
        let plan = plan_for(ProjectClassification::DartPub, None).expect("plan");
        assert_eq!(
            plan.steps[1].argv,
            vec!["dart", "compile", "exe", "bin/main.dart", "-o", "build/main"]
        );
    }

    #[test]
    fn meson_and_wasm_pack_refuse_targets() {
        for classification in [ProjectClassification::Meson, ProjectClassification::WasmPackRust] {
            let error = plan_for(classification, Some(TargetId::LinuxArm64)).expect_err("refused");
            assert_eq!(
                error,
                PlanError::UnsupportedCrossTarget(UnsupportedCrossTargetError {
                    classification,
                    target: TargetId::LinuxArm64,
                })
            );
            assert!(plan_for(classification, None).is_ok());
        }
    }

    #[test]
    fn gradle_android_accepts_only_android_targets() {
        let plan = plan_for(ProjectClassification::GradleAndroid, Some(TargetId::AndroidArm64))
            .expect("plan");
        assert_eq!(plan.target, Some(TargetId::AndroidArm64));
        let error = plan_for(ProjectClassification::GradleAndroid, Some(TargetId::LinuxAmd64))
            .expect_err("refused");
        assert_eq!(
            error.to_string(),
            "project type 'gradle-android' cannot be built for target 'linux-amd64'"
        );
    }

    #[test]
    fn step_display_prefixes_env() {
        let step = BuildStep::new(["go", "build"]).with_env(vec![BuildEnvVar::new("GOOS", "linux")]);
        assert_eq!(step.to_string(), "GOOS=linux go build");
    }
}
