//! Overlay: the UI side of the energy register.
//!
//! A slider writes the level, a readout reads it back as NORMAL/CRITICAL.
//! Nothing in this crate touches the scene; the only channel to the renderer
//! is the shared [`reactor_kernel::EnergyState`].
//!
//! # Invariants
//! - The slider clamps to `[0, 100]`; the register itself never does.
//! - The status cutoff is strict: a level equal to the threshold is NORMAL.

mod panel;
mod slider;
mod status;

pub use panel::{CONTROL_TITLE, HEADER_TEXT, HINT_TEXT, Overlay, to_color32};
pub use slider::{EnergySlider, SliderError};
pub use status::{Readout, StatusLevel, StatusReadout};
