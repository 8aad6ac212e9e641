//! # structoff - Struct Field Chain Offsets
//!
//! Turns a chain of nested struct field accesses such as
//! `task_struct->mm->pgd` into a nested dereference expression relative to a
//! pointer to the base struct, e.g. `+80(+2320(_))`. Offsets come from an
//! external layout tool (`pahole`) run against a binary with debug info.
//!
//! ## Pipeline
//!
//! ```text
//! "task_struct->mm->pgd"
//!        │ ChainExpr::parse
//!        ▼
//! base = task_struct, fields = [mm, pgd]
//!        │ Resolver (one layout query per field)
//!        ▼
//! Member(mm, mm_struct *, 2320)  Member(pgd, pgd_t *, 80)
//!        │ OffsetChain::step
//!        ▼
//! [2320, 80]  ──render──▶  +80(+2320(_))
//! ```
//!
//! A pointer member opens a new dereference step. A member reached through
//! an inline (embedded) struct adds to the current step instead, since no
//! load happens in between.
//!
//! ## Module Structure
//!
//! - [`domain`]: `Member`, `ChainExpr`, `OffsetChain` and error types
//! - [`layout`]: `StructLayoutProvider`, listing scanner, `pahole` runner
//! - [`resolver`]: the chain walk
//! - [`fetcharg`]: uprobe fetch-argument types (`+8(%di):u64`)
//! - [`export`]: JSON report
//! - [`preflight`]: binary and tool checks
//! - [`cli`]: command-line arguments

// Expose modules for testing
pub mod cli;
pub mod domain;
pub mod export;
pub mod fetcharg;
pub mod layout;
pub mod preflight;
pub mod resolver;

pub use domain::{ChainExpr, Member, OffsetChain};
pub use layout::{Pahole, StaticLayouts, StructLayoutProvider};
pub use resolver::{Resolution, Resolver};
