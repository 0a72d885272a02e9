//! Target registry, build-environment resolution and project dispatch for the
//! CrossForge toolchain image.
//!
//! Nothing here touches the process environment or spawns commands: resolution
//! and planning return plain values that an executor applies later.

pub mod build_plan;
pub mod config;
pub mod ecosystem;
pub mod project;
pub mod resolve;
pub mod target;

pub use build_plan::{plan_for, BuildEnvVar, BuildPlan, BuildStep, PlanError};
pub use project::{detect, scan_markers, MarkerSet, ProjectClassification};
pub use resolve::{resolve, resolve_target, ResolveOptions, ResolvedEnvironment, ResolveWarning};
pub use target::{list_targets, lookup, TargetId, ToolchainProfile, UnknownTargetError};
