//! Shared value types for the reactor workspace.
//!
//! # Invariants
//! - Colors are plain linear RGB components; nothing here clamps them.
//! - Rotations are accumulated Euler angles and are never normalized.

mod color;
mod types;

pub use color::{Color, ColorParseError};
pub use types::{Axis, Transform};
