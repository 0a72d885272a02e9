use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;

use super::DiagnosticError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Linkage {
    Static,
    Dynamic,
    /// Not an ELF executable or shared object (PE, Mach-O, wasm, scripts).
    NotApplicable,
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LinkageReport {
    pub path: PathBuf,
    pub linkage: Linkage,
    pub description: String,
    pub needed: Vec<String>,
}

impl LinkageReport {
    pub fn is_dynamic(&self) -> bool {
        self.linkage == Linkage::Dynamic
    }
}

/// Classifies the one-line output of `file -b`.
pub fn classify_file_output(output: &str) -> Linkage {
    let text = output.trim();
    if text.contains("statically linked") || text.contains("static-pie linked") {
        return Linkage::Static;
    }
    if text.contains("dynamically linked") {
        return Linkage::Dynamic;
    }
    if text.starts_with("ELF") {
        // Relocatable objects and stripped-down ELF files carry no linkage note.
        return Linkage::Unknown;
    }
    let non_elf = ["PE32", "Mach-O", "WebAssembly", "MS-DOS", "script", "text"];
    if non_elf.iter().any(|marker| text.contains(marker)) {
        return Linkage::NotApplicable;
    }
    Linkage::Unknown
}

/// Extracts shared library names from `readelf -d` output.
pub fn parse_needed_libraries(readelf_output: &str) -> Vec<String> {
    readelf_output
        .lines()
        .filter(|line| line.contains("(NEEDED)"))
        .filter_map(|line| {
            let start = line.find('[')?;
            let end = line[start + 1..].find(']')?;
            Some(line[start + 1..start + 1 + end].to_string())
        })
        .collect()
}

/// Older `file` releases report static-pie executables as "dynamically linked".
/// Such a binary has no program interpreter and no `NEEDED` entries.
pub fn refine_dynamic(file_output: &str, needed: &[String]) -> Linkage {
    if needed.is_empty() && !file_output.contains("interpreter") {
        Linkage::Static
    } else {
        Linkage::Dynamic
    }
}

pub fn inspect_linkage(path: &Path) -> Result<LinkageReport, DiagnosticError> {
    if !path.is_file() {
        return Err(DiagnosticError::MissingFile(path.to_path_buf()));
    }
    let description = run_tool("file", &["-b"], path)?;
    let linkage = classify_file_output(&description);
    let (linkage, needed) = if linkage == Linkage::Dynamic {
        match run_tool("readelf", &["-d"], path) {
            Ok(output) => {
                let needed = parse_needed_libraries(&output);
                (refine_dynamic(&description, &needed), needed)
            }
            Err(error) => {
                tracing::warn!(%error, path = %path.display(), "readelf unavailable; NEEDED entries skipped");
                (linkage, Vec::new())
            }
        }
    } else {
        (linkage, Vec::new())
    };
    tracing::debug!(path = %path.display(), ?linkage, "inspected linkage");
    Ok(LinkageReport {
        path: path.to_path_buf(),
        linkage,
        description: description.trim().to_string(),
        needed,
    })
}

fn run_tool(program: &str, args: &[&str], path: &Path) -> Result<String, DiagnosticError> {
    let output = Command::new(program)
        .args(args)
        .arg(path)
        .output()
        .map_err(|source| DiagnosticError::Tool {
            program: program.to_string(),
            source,
        })?;
    if !output.status.success() {
        return Err(DiagnosticError::ToolFailed {
            program: program.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_elf_is_static() {
        let output = "ELF 64-bit LSB executable, x86-64, version 1 (SYSV), statically linked, stripped";
        assert_eq!(classify_file_output(output), Linkage::Static);
    }

    #[test]
    fn static_pie_is_static() {
        let output = "ELF 64-bit LSB pie executable, ARM aarch64, version 1 (SYSV), static-pie linked, stripped";
        assert_eq!(classify_file_output(output), Linkage::Static);
    }

    #[test]
    fn dynamic_elf_is_dynamic() {
        let output = "ELF 64-bit LSB pie executable, x86-64, version 1 (SYSV), dynamically linked, interpreter /lib64/ld-linux-x86-64.so.2, for GNU/Linux 3.2.0, not stripped";
        assert_eq!(classify_file_output(output), Linkage::Dynamic);
    }

    #[test]
    fn legacy_static_pie_report_is_refined_to_static() {
        let output = "ELF 64-bit LSB shared object, x86-64, version 1 (SYSV), dynamically linked, stripped";
        assert_eq!(classify_file_output(output), Linkage::Dynamic);
        assert_eq!(refine_dynamic(output, &[]), Linkage::Static);
    }

    #[test]
    fn interpreter_or_needed_keeps_dynamic() {
        let with_interp = "ELF 64-bit LSB pie executable, x86-64, dynamically linked, interpreter /lib/ld-musl-x86_64.so.1, stripped";
        assert_eq!(refine_dynamic(with_interp, &[]), Linkage::Dynamic);
        let shared = "ELF 64-bit LSB shared object, x86-64, dynamically linked, stripped";
        assert_eq!(
            refine_dynamic(shared, &["libc.so.6".to_string()]),
            Linkage::Dynamic
        );
    }

    #[test]
    fn windows_and_wasm_are_not_applicable() {
        assert_eq!(
            classify_file_output("PE32+ executable (console) x86-64, for MS Windows"),
            Linkage::NotApplicable
        );
        assert_eq!(
            classify_file_output("WebAssembly (wasm) binary module version 0x1 (MVP)"),
            Linkage::NotApplicable
        );
        assert_eq!(
            classify_file_output("Mach-O 64-bit arm64 executable"),
            Linkage::NotApplicable
        );
    }

    #[test]
    fn relocatable_elf_is_unknown() {
        let output = "ELF 64-bit LSB relocatable, x86-64, version 1 (SYSV), not stripped";
        assert_eq!(classify_file_output(output), Linkage::Unknown);
    }

    #[test]
    fn needed_entries_are_extracted() {
        let output = "\
Dynamic section at offset 0x2dc8 contains 27 entries:
  Tag        Type                         Name/Value
 0x0000000000000001 (NEEDED)             Shared library: [libssl.so.3]
 0x0000000000000001 (NEEDED)             Shared library: [libc.so.6]
 0x000000000000000c (INIT)               0x1000
";
        assert_eq!(
            parse_needed_libraries(output),
            vec!["libssl.so.3".to_string(), "libc.so.6".to_string()]
        );
    }

    #[test]
    fn missing_file_is_reported() {
        let error = inspect_linkage(Path::new("/nonexistent/crossforge/binary")).expect_err("error");
        assert!(matches!(error, DiagnosticError::MissingFile(_)));
    }
}
