use std::path::Path;

use super::detect::{
    ContentHint, MarkerSet, APP_DIR_MARKER, GRADLE_BUILD_FILES, MARKER_FILES,
};

const ANDROID_PLUGIN_PREFIX: &str = "com.android.";

/// Reads the marker files present at `dir`. Read-only: existence checks, plus a
/// content look at Gradle build files and `Cargo.toml` for the detector hints.
pub fn scan_markers(dir: &Path) -> std::io::Result<MarkerSet> {
    if !dir.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("project directory '{}' does not exist", dir.display()),
        ));
    }

    let mut markers = MarkerSet::new();
    for name in MARKER_FILES {
        if dir.join(name).is_file() {
            markers.insert(*name);
        }
    }
    let app_dir = dir.join("app");
    if app_dir.is_dir() {
        markers.insert(APP_DIR_MARKER);
    }

    if applies_android_plugin(dir)? || applies_android_plugin(&app_dir)? {
        markers.add_hint(ContentHint::AndroidGradlePlugin);
    }

    let cargo_toml = dir.join("Cargo.toml");
    if cargo_toml.is_file() {
        let contents = read_lossy(&cargo_toml)?;
        if cargo_targets_wasm(&contents) {
            markers.add_hint(ContentHint::CargoWasmTarget);
        }
    }

    tracing::debug!(dir = %dir.display(), markers = ?markers, "scanned project markers");
    Ok(markers)
}

fn applies_android_plugin(dir: &Path) -> std::io::Result<bool> {
    for name in GRADLE_BUILD_FILES {
        let path = dir.join(name);
        if !path.is_file() {
            continue;
        }
        let contents = read_lossy(&path)?;
        if contents.contains(ANDROID_PLUGIN_PREFIX) {
            return Ok(true);
        }
    }
    Ok(false)
}

// Build files are not required to be UTF-8; invalid bytes must not hide the hints.
fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// True when the manifest describes a wasm-pack style crate: a `cdylib` that
/// depends on `wasm-bindgen`, or any `[package.metadata.wasm-pack]` table.
pub fn cargo_targets_wasm(contents: &str) -> bool {
    let manifest: toml::Value = match toml::from_str(contents) {
        Ok(value) => value,
        Err(error) => {
            tracing::debug!(%error, "Cargo.toml did not parse; falling back to text search");
            return contents.contains("wasm-bindgen") && contents.contains("cdylib");
        }
    };

    let has_wasm_pack_metadata = manifest
        .get("package")
        .and_then(|package| package.get("metadata"))
        .and_then(|metadata| metadata.get("wasm-pack"))
        .is_some();
    if has_wasm_pack_metadata {
        return true;
    }

    let is_cdylib = manifest
        .get("lib")
        .and_then(|lib| lib.get("crate-type"))
        .and_then(toml::Value::as_array)
        .map(|types| types.iter().any(|kind| kind.as_str() == Some("cdylib")))
        .unwrap_or(false);
    let uses_wasm_bindgen = ["dependencies", "target"]
        .iter()
        .filter_map(|table| manifest.get(*table))
        .any(|table| mentions_dependency(table, "wasm-bindgen"));

    is_cdylib && uses_wasm_bindgen
}

// Matches both `[dependencies]` and `[target.'cfg(..)'.dependencies]` layouts.
fn mentions_dependency(table: &toml::Value, name: &str) -> bool {
    match table {
        toml::Value::Table(entries) => entries
            .iter()
            .any(|(key, value)| key == name || mentions_dependency(value, name)),
        _ => false,
    }
}
