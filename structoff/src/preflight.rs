//! Pre-flight checks for structoff
//!
//! Validates the target binary and the layout tool before any query runs.
//! Provides clear, actionable error messages when requirements aren't met.

use anyhow::{bail, Context, Result};
use object::{Object, ObjectSection};
use std::path::{Path, PathBuf};

/// Run all pre-flight checks, returning the resolved layout tool path
///
/// # Errors
/// Returns an error if the binary or the tool cannot be used.
pub fn run_preflight_checks(binary: &Path, tool: &Path, quiet: bool) -> Result<PathBuf> {
    check_binary_exists(binary)?;
    check_debug_info(binary, quiet)?;
    locate_tool(tool)
}

/// Check if the target binary exists and is a regular file
fn check_binary_exists(binary: &Path) -> Result<()> {
    if !binary.exists() {
        bail!(
            "Binary not found: {}\n\n\
             Make sure the path is correct and the binary exists.",
            binary.display()
        );
    }
    if !binary.is_file() {
        bail!(
            "Not a file: {}\n\n\
             --bin must point to a compiled binary, not a directory.",
            binary.display()
        );
    }
    Ok(())
}

/// Warn if the binary carries no type information for the layout tool
fn check_debug_info(binary: &Path, quiet: bool) -> Result<()> {
    if quiet {
        return Ok(());
    }

    let file_data = std::fs::read(binary)
        .with_context(|| format!("Failed to read binary: {}", binary.display()))?;

    let Ok(obj) = object::File::parse(&*file_data) else {
        // Not an object file, let the layout tool report it
        return Ok(());
    };

    let has_section = |name: &str| obj.section_by_name(name).is_some_and(|s| s.size() > 0);

    if !has_section(".debug_info") && !has_section(".BTF") {
        eprintln!("warning: no DWARF or BTF type info in {}, lookups will fail", binary.display());
    } else if !has_section(".debug_info") {
        eprintln!("warning: no DWARF debug info in {}, relying on BTF", binary.display());
    }

    Ok(())
}

/// Resolve the layout tool to an executable path
///
/// A path containing a separator must exist as given; a bare name is
/// searched on `PATH`.
fn locate_tool(tool: &Path) -> Result<PathBuf> {
    if tool.components().count() > 1 {
        if tool.is_file() {
            return Ok(tool.to_path_buf());
        }
        bail!("Layout tool not found: {}", tool.display());
    }

    let path_var = std::env::var_os("PATH").unwrap_or_default();
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(tool))
        .find(|p| p.is_file())
        .with_context(|| {
            format!(
                "{} not found on PATH\n\n\
                 Install it (usually packaged as `dwarves`) or pass --pahole <PATH>.",
                tool.display()
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_not_found() {
        let result = check_binary_exists(Path::new("/nonexistent/path/to/binary"));
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Binary not found"));
    }

    #[test]
    fn test_binary_is_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_binary_exists(dir.path()).unwrap_err().to_string();
        assert!(err.contains("Not a file"));
    }

    #[test]
    fn test_non_object_file_passes_debug_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "not an elf").unwrap();
        assert!(check_debug_info(&path, false).is_ok());
    }

    #[test]
    fn test_locate_tool_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("pahole");
        std::fs::write(&tool, "").unwrap();
        assert_eq!(locate_tool(&tool).unwrap(), tool);
        assert!(locate_tool(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_locate_tool_on_path() {
        // `sh` is on PATH on any system that can run the test suite
        assert!(locate_tool(Path::new("sh")).is_ok());
        let err = locate_tool(Path::new("definitely-not-a-real-tool-xyz")).unwrap_err();
        assert!(err.to_string().contains("not found on PATH"));
    }
}
