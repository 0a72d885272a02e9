use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

pub const APP_DIR_MARKER: &str = "app/";

pub const GRADLE_BUILD_FILES: &[&str] = &["build.gradle", "build.gradle.kts"];
pub const GRADLE_SETTINGS_FILES: &[&str] = &["settings.gradle", "settings.gradle.kts"];

/// Every root-level file name the detector looks at.
pub const MARKER_FILES: &[&str] = &[
    "build.gradle",
    "build.gradle.kts",
    "settings.gradle",
    "settings.gradle.kts",
    "pom.xml",
    "Cargo.toml",
    "go.mod",
    "pubspec.yaml",
    "build.zig",
    "CMakeLists.txt",
    "meson.build",
    "configure",
    "configure.ac",
    "Makefile",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ContentHint {
    /// A Gradle build file applies a `com.android.*` plugin.
    AndroidGradlePlugin,
    /// `Cargo.toml` describes a wasm-bindgen cdylib or carries wasm-pack metadata.
    CargoWasmTarget,
}

/// Marker names present at a project root plus hints from content inspection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MarkerSet {
    names: BTreeSet<String>,
    hints: BTreeSet<ContentHint>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            hints: BTreeSet::new(),
        }
    }

    pub fn with_hint(mut self, hint: ContentHint) -> Self {
        self.hints.insert(hint);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn add_hint(&mut self, hint: ContentHint) {
        self.hints.insert(hint);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn contains_any(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.contains(name))
    }

    pub fn has_hint(&self, hint: ContentHint) -> bool {
        self.hints.contains(&hint)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.hints.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectClassification {
    RustCargo,
    GoModules,
    CMake,
    Meson,
    AutotoolsConfigure,
    AutotoolsAutoreconf,
    PlainMakefile,
    GradleAndroid,
    GradleKotlin,
    MavenJava,
    DartPub,
    ZigBuild,
    WasmPackRust,
    Unclassified,
}

impl ProjectClassification {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectClassification::RustCargo => "rust-cargo",
            ProjectClassification::GoModules => "go-modules",
            ProjectClassification::CMake => "cmake",
            ProjectClassification::Meson => "meson",
            ProjectClassification::AutotoolsConfigure => "autotools-configure",
            ProjectClassification::AutotoolsAutoreconf => "autotools-autoreconf",
            ProjectClassification::PlainMakefile => "makefile",
            ProjectClassification::GradleAndroid => "gradle-android",
            ProjectClassification::GradleKotlin => "gradle-kotlin",
            ProjectClassification::MavenJava => "maven-java",
            ProjectClassification::DartPub => "dart-pub",
            ProjectClassification::ZigBuild => "zig-build",
            ProjectClassification::WasmPackRust => "wasm-pack-rust",
            ProjectClassification::Unclassified => "unclassified",
        }
    }
}

impl Serialize for ProjectClassification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for ProjectClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct DetectionRule {
    classification: ProjectClassification,
    matches: fn(&MarkerSet) -> bool,
}

// First match wins. Several markers routinely co-occur (a Cargo project with a
// wrapper Makefile, a CMake project with a generated configure), so this order
// is the tie-break and must not be reshuffled.
static DETECTION_RULES: &[DetectionRule] = &[
    DetectionRule {
        classification: ProjectClassification::GradleAndroid,
        matches: |markers| {
            markers.contains_any(GRADLE_BUILD_FILES)
                && markers.contains_any(GRADLE_SETTINGS_FILES)
                && (markers.contains(APP_DIR_MARKER)
                    || markers.has_hint(ContentHint::AndroidGradlePlugin))
        },
    },
    DetectionRule {
        classification: ProjectClassification::GradleKotlin,
        matches: |markers| markers.contains_any(GRADLE_BUILD_FILES),
    },
    DetectionRule {
        classification: ProjectClassification::MavenJava,
        matches: |markers| markers.contains("pom.xml"),
    },
    DetectionRule {
        classification: ProjectClassification::WasmPackRust,
        matches: |markers| {
            markers.contains("Cargo.toml") && markers.has_hint(ContentHint::CargoWasmTarget)
        },
    },
    DetectionRule {
        classification: ProjectClassification::RustCargo,
        matches: |markers| markers.contains("Cargo.toml"),
    },
    DetectionRule {
        classification: ProjectClassification::GoModules,
        matches: |markers| markers.contains("go.mod"),
    },
    DetectionRule {
        classification: ProjectClassification::DartPub,
        matches: |markers| markers.contains("pubspec.yaml"),
    },
    DetectionRule {
        classification: ProjectClassification::ZigBuild,
        matches: |markers| markers.contains("build.zig"),
    },
    DetectionRule {
        classification: ProjectClassification::CMake,
        matches: |markers| markers.contains("CMakeLists.txt"),
    },
    DetectionRule {
        classification: ProjectClassification::Meson,
        matches: |markers| markers.contains("meson.build"),
    },
    DetectionRule {
        classification: ProjectClassification::AutotoolsConfigure,
        matches: |markers| markers.contains("configure"),
    },
    DetectionRule {
        classification: ProjectClassification::AutotoolsAutoreconf,
        matches: |markers| markers.contains("configure.ac"),
    },
    DetectionRule {
        classification: ProjectClassification::PlainMakefile,
        matches: |markers| markers.contains("Makefile"),
    },
];

pub fn detect(markers: &MarkerSet) -> ProjectClassification {
    let classification = DETECTION_RULES
        .iter()
        .find(|rule| (rule.matches)(markers))
        .map(|rule| rule.classification)
        .unwrap_or(ProjectClassification::Unclassified);
    tracing::debug!(%classification, "classified project markers");
    classification
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers(names: &[&str]) -> MarkerSet {
        MarkerSet::from_names(names.iter().copied())
    }

    #[test]
    fn rust_wins_over_makefile() {
        assert_eq!(
            detect(&markers(&["Cargo.toml", "Makefile"])),
            ProjectClassification::RustCargo
        );
    }

    #[test]
    fn wasm_hint_refines_cargo() {
        let set = markers(&["Cargo.toml"]).with_hint(ContentHint::CargoWasmTarget);
        assert_eq!(detect(&set), ProjectClassification::WasmPackRust);
    }

    #[test]
    fn wasm_hint_without_cargo_is_ignored() {
        let set = markers(&["go.mod"]).with_hint(ContentHint::CargoWasmTarget);
        assert_eq!(detect(&set), ProjectClassification::GoModules);
    }

    #[test]
    fn gradle_with_app_dir_is_android() {
        let set = markers(&["build.gradle.kts", "settings.gradle.kts", "app/"]);
        assert_eq!(detect(&set), ProjectClassification::GradleAndroid);
    }

    #[test]
    fn gradle_with_android_plugin_hint_is_android() {
        let set = markers(&["build.gradle", "settings.gradle"])
            .with_hint(ContentHint::AndroidGradlePlugin);
        assert_eq!(detect(&set), ProjectClassification::GradleAndroid);
    }

    #[test]
    fn gradle_without_settings_is_kotlin() {
        let set = markers(&["build.gradle", "app/"]);
        assert_eq!(detect(&set), ProjectClassification::GradleKotlin);
    }

    #[test]
    fn gradle_outranks_maven_and_cargo() {
        let set = markers(&["build.gradle", "pom.xml", "Cargo.toml"]);
        assert_eq!(detect(&set), ProjectClassification::GradleKotlin);
        assert_eq!(
            detect(&markers(&["pom.xml", "Cargo.toml"])),
            ProjectClassification::MavenJava
        );
    }

    #[test]
    fn cmake_outranks_autotools_and_make() {
        let set = markers(&["CMakeLists.txt", "configure", "Makefile"]);
        assert_eq!(detect(&set), ProjectClassification::CMake);
    }

    #[test]
    fn configure_script_outranks_configure_ac() {
        assert_eq!(
            detect(&markers(&["configure", "configure.ac"])),
            ProjectClassification::AutotoolsConfigure
        );
        assert_eq!(
            detect(&markers(&["configure.ac", "Makefile"])),
            ProjectClassification::AutotoolsAutoreconf
        );
    }

    #[test]
    fn priority_table_matches_documented_order() {
        let cases: &[(&[&str], ProjectClassification)] = &[
            (&["go.mod", "pubspec.yaml"], ProjectClassification::GoModules),
            (&["pubspec.yaml", "build.zig"], ProjectClassification::DartPub),
            (&["build.zig", "CMakeLists.txt"], ProjectClassification::ZigBuild),
            (&["meson.build", "configure"], ProjectClassification::Meson),
            (&["Makefile"], ProjectClassification::PlainMakefile),
        ];
        for (names, expected) in cases {
            assert_eq!(detect(&markers(names)), *expected, "{:?}", names);
        }
    }

    #[test]
    fn empty_set_is_unclassified() {
        assert_eq!(detect(&MarkerSet::new()), ProjectClassification::Unclassified);
        assert_eq!(
            detect(&markers(&["README.md", "LICENSE"])),
            ProjectClassification::Unclassified
        );
    }

    #[test]
    fn detection_is_deterministic() {
        let set = markers(&["Cargo.toml", "go.mod", "Makefile", "CMakeLists.txt"]);
        let first = detect(&set);
        for _ in 0..16 {
            assert_eq!(detect(&set), first);
        }
    }
}
