//! Report export
//!
//! Machine-readable output of a resolution for scripts that feed the
//! expression into a tracer.

pub mod report;

pub use report::Report;
