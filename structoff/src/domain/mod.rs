//! Domain model for structoff
//!
//! This module contains core domain types and errors that provide:
//! - Self-documenting function signatures (`ChainExpr`, `OffsetChain`)
//! - Structured error handling

pub mod errors;
pub mod types;

// Re-export common types for convenience
pub use types::{ChainExpr, Member, OffsetChain, DEFAULT_PLACEHOLDER};

pub use errors::{FetchArgError, LayoutError, ResolveError};
