#![cfg(unix)]

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use crossforge_build::{BuildError, BuildExecutor, ProcessExecutor};
use crossforge_core::{
    build_plan::{BuildEnvVar, BuildPlan, BuildStep},
    project::ProjectClassification,
    resolve::{resolve_target, ResolveOptions},
    target::TargetId,
};

fn temp_dir(name: &str) -> PathBuf {
    let mut path = env::temp_dir();
    let stamp = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    path.push(format!("crossforge-build-integration-{}-{}", name, stamp));
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

fn shell_plan(scripts: &[&str]) -> BuildPlan {
    BuildPlan {
        classification: ProjectClassification::PlainMakefile,
        target: Some(TargetId::LinuxArm64),
        steps: scripts
            .iter()
            .map(|script| BuildStep::new(["sh", "-c", *script]))
            .collect(),
    }
}

#[test]
fn resolved_environment_reaches_child_process() {
    let dir = temp_dir("env-flow");
    let resolved = resolve_target(
        TargetId::LinuxArm64,
        &BTreeMap::new(),
        &ResolveOptions {
            use_ccache: false,
            ..ResolveOptions::default()
        },
    );
    let mut plan = shell_plan(&["printf '%s' \"$CC\" > cc.txt"]);
    plan.steps.push(
        BuildStep::new(["sh", "-c", "printf '%s' \"$GOARCH\" > arch.txt"])
            .with_env(vec![BuildEnvVar::new("GOARCH", "arm64")]),
    );

    let reports = ProcessExecutor::new()
        .execute(&plan, Some(&resolved), &dir)
        .expect("executor succeeded");
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].exit_code, Some(0));

    let cc = fs::read_to_string(dir.join("cc.txt")).expect("cc output");
    assert_eq!(cc, "/opt/cross/aarch64-linux-musl/bin/aarch64-linux-musl-gcc");
    let arch = fs::read_to_string(dir.join("arch.txt")).expect("arch output");
    assert_eq!(arch, "arm64");
    assert!(env::var("CROSS_TARGET").is_err());
}

#[test]
fn failing_step_stops_the_plan() {
    let dir = temp_dir("fail-flow");
    let plan = shell_plan(&["exit 3", "touch after.txt"]);
    let error = ProcessExecutor::new()
        .execute(&plan, None, &dir)
        .expect_err("step fails");
    match error {
        BuildError::StepFailed { step, .. } => assert_eq!(step, "sh -c exit 3"),
        other => panic!("unexpected error: {}", other),
    }
    assert!(!dir.join("after.txt").exists());
}

#[test]
fn missing_program_is_a_spawn_error() {
    let dir = temp_dir("spawn-flow");
    let plan = BuildPlan {
        classification: ProjectClassification::PlainMakefile,
        target: None,
        steps: vec![BuildStep::new(["crossforge-definitely-missing-tool"])],
    };
    let error = ProcessExecutor::new()
        .execute(&plan, None, &dir)
        .expect_err("spawn fails");
    assert!(matches!(error, BuildError::Spawn { .. }));
}
