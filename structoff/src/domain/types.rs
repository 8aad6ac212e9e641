//! Domain types for field chain resolution
//!
//! A chain like `task_struct->mm->pgd` is parsed into a [`ChainExpr`], each
//! step resolves to a [`Member`], and the byte offsets accumulate into an
//! [`OffsetChain`] that renders as a nested dereference expression.

use serde::Serialize;
use std::fmt;

/// Placeholder for the base pointer in rendered expressions
pub const DEFAULT_PLACEHOLDER: &str = "_";

/// A struct member as reported by the layout tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub name: String,
    /// Declared type with the `struct ` prefix and pointer suffix stripped
    #[serde(rename = "type")]
    pub type_name: String,
    pub is_pointer: bool,
    /// Byte offset within the enclosing struct
    pub offset: u64,
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Member(name={}, type={}, is_pointer={}, offset={})",
            self.name, self.type_name, self.is_pointer, self.offset
        )
    }
}

/// Parsed `Struct->field1->field2` expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainExpr {
    pub base: String,
    pub fields: Vec<String>,
}

impl ChainExpr {
    /// Split on `->`; the first segment names the base struct.
    ///
    /// Nothing else is validated: `"task_struct"` yields an empty field list.
    #[must_use]
    pub fn parse(expr: &str) -> Self {
        let mut segments = expr.split("->").map(|s| s.trim().to_string());
        let base = segments.next().unwrap_or_default();
        Self { base, fields: segments.collect() }
    }
}

impl fmt::Display for ChainExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        for field in &self.fields {
            write!(f, "->{field}")?;
        }
        Ok(())
    }
}

/// Offsets accumulated along a chain, one element per dereference step
///
/// `[16, 8]` means: load the pointer at `base + 16`, then add 8 to the
/// loaded value. Rendered as `+8(+16(_))`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OffsetChain(Vec<u64>);

impl OffsetChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one resolved member.
    ///
    /// When the previous step was a pointer this starts a new dereference
    /// step, otherwise the offset folds into the current one because the
    /// previous member is embedded inline.
    ///
    /// Returns the offset of the current step, or `None` if folding would
    /// overflow (the chain is left unchanged).
    #[must_use]
    pub fn step(&mut self, offset: u64, after_pointer: bool) -> Option<u64> {
        match self.0.last_mut() {
            Some(last) if !after_pointer => {
                *last = last.checked_add(offset)?;
                Some(*last)
            }
            _ => {
                self.0.push(offset);
                Some(offset)
            }
        }
    }

    /// Render as a nested expression around `placeholder`.
    ///
    /// The first dereference step is the innermost wrapping.
    #[must_use]
    pub fn render(&self, placeholder: &str) -> String {
        self.0.iter().fold(placeholder.to_string(), |inner, offset| format!("+{offset}({inner})"))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u64>> for OffsetChain {
    fn from(offsets: Vec<u64>) -> Self {
        Self(offsets)
    }
}

impl fmt::Display for OffsetChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(DEFAULT_PLACEHOLDER))
    }
}
