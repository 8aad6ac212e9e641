//! `pahole` subprocess provider

use super::{find_member, StructLayoutProvider};
use crate::domain::{LayoutError, Member};
use log::debug;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Default tool name, looked up on `PATH`
pub const DEFAULT_TOOL: &str = "pahole";

/// Queries struct layouts by running `<tool> -C <struct> <binary>`
///
/// The binary path is held explicitly and passed to every invocation.
/// Each query blocks until the tool exits; there is no timeout.
#[derive(Debug, Clone)]
pub struct Pahole {
    tool: PathBuf,
    binary: PathBuf,
}

impl Pahole {
    pub fn new(tool: impl Into<PathBuf>, binary: impl Into<PathBuf>) -> Self {
        Self { tool: tool.into(), binary: binary.into() }
    }

    fn query(&self, structure: &str) -> Result<Output, LayoutError> {
        debug!("{} -C {structure} {}", self.tool.display(), self.binary.display());

        Command::new(&self.tool)
            .arg("-C")
            .arg(structure)
            .arg(&self.binary)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| LayoutError::Spawn { tool: self.tool.display().to_string(), source })
    }

    fn failure(&self, structure: &str, output: &Output) -> LayoutError {
        LayoutError::ToolFailed {
            tool: self.tool.display().to_string(),
            structure: structure.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

impl StructLayoutProvider for Pahole {
    fn lookup(&self, structure: &str, field: &str) -> Result<Option<Member>, LayoutError> {
        let output = self.query(structure)?;
        let listing = String::from_utf8_lossy(&output.stdout);

        match find_member(&listing, field) {
            Some(member) => Ok(Some(member)),
            None if !output.status.success() => Err(self.failure(structure, &output)),
            None => Ok(None),
        }
    }

    fn dump(&self, structure: &str) -> Result<String, LayoutError> {
        let output = self.query(structure)?;
        if !output.status.success() {
            return Err(self.failure(structure, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
