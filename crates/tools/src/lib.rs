//! Developer Tooling: read-only reactor inspection.
//!
//! # Invariants
//! - Inspection never mutates the reactor.

mod inspector;

pub use inspector::{PartInfo, ReactorInspector, ReactorSummary};
