//! Reactor Kernel: the per-frame animation and state-update core.
//!
//! # Invariants
//! - The energy register is the only coupling between UI and rendering.
//! - Colors are a pure function of the current energy level; only node
//!   rotations accumulate across frames.
//! - The particle count never changes after construction, and only the y
//!   component of a particle is ever written.
//! - Writes to scene nodes that are not mounted are skipped, never errors.

pub mod animator;
pub mod clock;
pub mod config;
pub mod energy;
pub mod params;
pub mod particles;
pub mod reactor;
pub mod scene;

pub use animator::{CoreAnimator, FrameReport, RING_SPECS, RingSpec};
pub use clock::{FrameClock, FrameTime};
pub use config::{ConfigError, Palette, ParticleConfig, ReactorConfig};
pub use energy::{EnergyState, SubscriptionId};
pub use params::DerivedVisualParams;
pub use particles::ParticleField;
pub use reactor::Reactor;
pub use scene::{Material, ReactorPart, SceneGraph, SceneNode, Shape};
