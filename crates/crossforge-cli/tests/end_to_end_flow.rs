use std::fs;
use std::path::{Path, PathBuf};

use crossforge_cli::commands::{build, detect, env, plan, size, EnvSettings};
use crossforge_core::project::ProjectClassification;
use crossforge_core::target::TargetId;

fn temp_dir(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    path.push(format!("crossforge-e2e-{}-{}", name, stamp));
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write file");
}

#[test]
fn env_applies_config_then_flags() {
    let dir = temp_dir("env");
    write(
        &dir,
        "crossforge.yaml",
        "target: linux-arm64\ncache: none\nenv:\n  LDFLAGS: -s\n",
    );

    let outcome = env::run(env::EnvArgs {
        project_dir: dir.clone(),
        target: None,
        settings: EnvSettings {
            mold: Some(true),
            overrides: vec!["CFLAGS=-O3".to_string()],
            ..EnvSettings::default()
        },
        json: false,
    })
    .expect("env");

    let environment = &outcome.environment;
    assert_eq!(environment.target(), TargetId::LinuxArm64);
    assert_eq!(environment.get("LDFLAGS"), Some("-s"));
    assert_eq!(environment.get("CFLAGS"), Some("-O3"));
    assert_eq!(
        environment.get("CC"),
        Some("/opt/cross/aarch64-linux-musl/bin/aarch64-linux-musl-gcc")
    );
    assert!(outcome.rendered.contains("export CROSS_TARGET='linux-arm64'\n"));
}

#[test]
fn env_json_carries_fingerprint_and_alias_warning() {
    let dir = temp_dir("env-json");
    let outcome = env::run(env::EnvArgs {
        project_dir: dir,
        target: Some("windows-arm64".to_string()),
        settings: EnvSettings::default(),
        json: true,
    })
    .expect("env");

    let value: serde_json::Value = serde_json::from_str(&outcome.rendered).expect("json");
    assert_eq!(value["target"], "windows-arm64");
    assert_eq!(value["vars"]["CROSS_TARGET"], "windows-arm64");
    assert_eq!(value["warnings"][0]["kind"], "aliased_target");
    assert_eq!(
        value["fingerprint"].as_str(),
        Some(outcome.environment.fingerprint().as_str())
    );
}

#[test]
fn env_without_target_is_an_error() {
    let dir = temp_dir("env-missing");
    let error = env::run(env::EnvArgs {
        project_dir: dir,
        target: None,
        settings: EnvSettings::default(),
        json: false,
    })
    .err()
    .expect("missing target");
    assert!(error.contains("no target given"));
}

#[test]
fn unknown_target_lists_valid_names() {
    let dir = temp_dir("env-unknown");
    let error = env::run(env::EnvArgs {
        project_dir: dir,
        target: Some("amiga-m68k".to_string()),
        settings: EnvSettings::default(),
        json: false,
    })
    .err()
    .expect("unknown target");
    assert!(error.contains("amiga-m68k"));
    assert!(error.contains("linux-amd64"));
}

#[test]
fn detect_and_plan_go_project() {
    let dir = temp_dir("go");
    write(&dir, "go.mod", "module example.com/demo\n");
    write(&dir, "Makefile", "all:\n");

    let detected = detect::run(detect::DetectArgs {
        project_dir: dir.clone(),
    })
    .expect("detect");
    assert_eq!(detected.classification, ProjectClassification::GoModules);

    let outcome = plan::run(plan::PlanArgs {
        project_dir: dir,
        target: Some("darwin-arm64".to_string()),
        json: false,
    })
    .expect("plan");
    assert!(outcome.plan.has_env("GOOS", "darwin"));
    assert!(outcome.plan.has_env("GOARCH", "arm64"));
    assert!(outcome.rendered.starts_with("# go-modules -> darwin-arm64\n"));
}

#[test]
fn plan_rejects_unclassified_project() {
    let dir = temp_dir("empty");
    let error = plan::run(plan::PlanArgs {
        project_dir: dir,
        target: None,
        json: false,
    })
    .err()
    .expect("no plan");
    assert!(error.contains("unclassified"));
}

#[test]
fn plan_reports_unmapped_ecosystem_target() {
    let dir = temp_dir("cargo-cosmo");
    write(&dir, "Cargo.toml", "[package]\nname = \"demo\"\nversion = \"0.1.0\"\n");
    let error = plan::run(plan::PlanArgs {
        project_dir: dir,
        target: Some("cosmo".to_string()),
        json: false,
    })
    .err()
    .expect("unmapped");
    assert!(error.contains("cosmo"));
}

#[test]
fn dry_run_build_renders_cmake_steps() {
    let dir = temp_dir("cmake");
    write(&dir, "CMakeLists.txt", "cmake_minimum_required(VERSION 3.20)\n");
    write(&dir, "crossforge.yaml", "target: windows-amd64\n");

    let outcome = build::run(build::BuildArgs {
        project_dir: dir.clone(),
        target: None,
        settings: EnvSettings::default(),
        dry_run: true,
    })
    .expect("dry run");

    assert_eq!(outcome.plan.classification, ProjectClassification::CMake);
    let environment = outcome.environment.expect("environment");
    assert_eq!(environment.target(), TargetId::WindowsAmd64);
    assert_eq!(outcome.reports.len(), outcome.plan.steps.len());
    assert!(outcome.reports[0].rendered.starts_with("cmake "));
    assert!(outcome
        .reports
        .iter()
        .all(|report| report.exit_code.is_none()));
    assert!(!dir.join("build").exists());
}

#[test]
fn size_reports_totals() {
    let dir = temp_dir("size");
    write(&dir, "a.bin", "abcd");
    write(&dir, "b.bin", "ef");
    let report = size::run(size::SizeArgs {
        files: vec![dir.join("a.bin"), dir.join("b.bin")],
    })
    .expect("size");
    assert_eq!(report.total_bytes, 6);
}

#[test]
fn plan_refuses_meson_cross_build() {
    let dir = temp_dir("meson-cross");
    write(&dir, "meson.build", "project('demo', 'c')\n");
    let error = plan::run(plan::PlanArgs {
        project_dir: dir.clone(),
        target: Some("linux-arm64".to_string()),
        json: false,
    })
    .err()
    .expect("refused");
    assert_eq!(
        error,
        "project type 'meson' cannot be built for target 'linux-arm64'"
    );

    let host = plan::run(plan::PlanArgs {
        project_dir: dir,
        target: None,
        json: false,
    })
    .expect("host plan");
    assert_eq!(host.plan.steps[0].argv[..2], ["meson", "setup"]);
}
