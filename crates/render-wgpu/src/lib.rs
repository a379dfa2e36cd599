//! wgpu render backend for the reactor.
//!
//! Draws the rings and core as lit meshes and the particle field as a point
//! cloud. The camera orbits the assembly and may auto-rotate.
//!
//! # Invariants
//! - The renderer never mutates reactor state.
//! - Camera motion is view state only and never feeds back into the kernel.
//! - Particles are re-uploaded only when the field reports a change.

mod camera;
mod gpu;
mod mesh;
mod shaders;

pub use camera::OrbitCamera;
pub use gpu::{SceneStyle, WgpuRenderer};
