//! Structured error types for structoff
//!
//! Using thiserror for automatic Display implementation and error chaining.

use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("{structure}->{field} not found")]
    FieldNotFound { structure: String, field: String },

    #[error("{structure}->{field} overflows the accumulated offset")]
    OffsetOverflow { structure: String, field: String },

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed for struct {structure} ({status}): {stderr}")]
    ToolFailed { tool: String, structure: String, status: ExitStatus, stderr: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FetchArgError {
    #[error("type not found: {0}")]
    MissingType(String),

    #[error("only support u/s/c type: {0}")]
    UnsupportedKind(String),

    #[error("unsupported bit width for {kind} type: {input}")]
    UnsupportedWidth { kind: char, input: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_not_found_display() {
        let err = ResolveError::FieldNotFound {
            structure: "task_struct".to_string(),
            field: "nope".to_string(),
        };
        assert_eq!(err.to_string(), "task_struct->nope not found");
    }

    #[test]
    fn test_offset_overflow_display() {
        let err = ResolveError::OffsetOverflow {
            structure: "thread_info".to_string(),
            field: "flags".to_string(),
        };
        assert!(err.to_string().starts_with("thread_info->flags"));
    }

    #[test]
    fn test_spawn_error_names_tool() {
        let err = LayoutError::Spawn {
            tool: "/opt/bin/pahole".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("/opt/bin/pahole"));
    }
}
