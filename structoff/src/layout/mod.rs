//! # Struct Layout Queries
//!
//! Member offsets come from an external layout tool (`pahole`) that reads
//! DWARF or BTF from the target binary and prints each struct as C source
//! annotated with byte offsets:
//!
//! ```text
//! struct task_struct {
//!         struct thread_info         thread_info;          /*     0    24 */
//!         unsigned int               __state;              /*    24     4 */
//!         struct mm_struct *         mm;                   /*  2320     8 */
//!         ...
//! };
//! ```
//!
//! The listing format belongs to the tool. Only the substrings matched by
//! [`listing::parse_member_line`] are relied on.
//!
//! ## Module Structure
//!
//! - **`listing`**: pure text scanning of a member listing
//! - **`pahole`**: spawns the tool, one process per query
//!
//! Callers go through the [`StructLayoutProvider`] trait so tests can swap
//! the tool for [`StaticLayouts`].

pub mod listing;
pub mod pahole;

pub use listing::{find_member, parse_member_line};
pub use pahole::Pahole;

use crate::domain::{LayoutError, Member};
use std::collections::HashMap;

/// Source of struct member layouts
pub trait StructLayoutProvider {
    /// Look up `field` as a direct member of `structure`.
    ///
    /// # Errors
    /// Returns an error if the layout could not be queried at all. A struct
    /// that was listed but has no such member is `Ok(None)`.
    fn lookup(&self, structure: &str, field: &str) -> Result<Option<Member>, LayoutError>;

    /// Full member listing of `structure`, for display.
    ///
    /// # Errors
    /// Returns an error if the layout could not be queried.
    fn dump(&self, structure: &str) -> Result<String, LayoutError>;
}

impl<P: StructLayoutProvider + ?Sized> StructLayoutProvider for &P {
    fn lookup(&self, structure: &str, field: &str) -> Result<Option<Member>, LayoutError> {
        (**self).lookup(structure, field)
    }

    fn dump(&self, structure: &str) -> Result<String, LayoutError> {
        (**self).dump(structure)
    }
}

/// In-memory listings keyed by struct name
///
/// Unknown structs behave like a tool run that printed nothing.
#[derive(Debug, Clone, Default)]
pub struct StaticLayouts {
    listings: HashMap<String, String>,
}

impl StaticLayouts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the listing for `structure`, replacing any previous one.
    #[must_use]
    pub fn with(mut self, structure: impl Into<String>, listing: impl Into<String>) -> Self {
        self.insert(structure, listing);
        self
    }

    pub fn insert(&mut self, structure: impl Into<String>, listing: impl Into<String>) {
        self.listings.insert(structure.into(), listing.into());
    }
}

impl StructLayoutProvider for StaticLayouts {
    fn lookup(&self, structure: &str, field: &str) -> Result<Option<Member>, LayoutError> {
        Ok(self.listings.get(structure).and_then(|listing| find_member(listing, field)))
    }

    fn dump(&self, structure: &str) -> Result<String, LayoutError> {
        Ok(self.listings.get(structure).cloned().unwrap_or_default())
    }
}
