use reactor_common::Axis;
use serde::Serialize;

use crate::config::Palette;
use crate::params::DerivedVisualParams;
use crate::scene::{ReactorPart, SceneGraph};

/// Rotation rule for one ring.
///
/// The primary axis turns at `speed * multiplier`; the secondary axis drifts at
/// a constant rate that ignores energy entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    pub part: ReactorPart,
    pub primary: Axis,
    pub multiplier: f32,
    pub secondary: Axis,
    pub drift: f32,
}

/// Outer is slowest, inner fastest.
pub const RING_SPECS: [RingSpec; 3] = [
    RingSpec {
        part: ReactorPart::OuterRing,
        primary: Axis::X,
        multiplier: 0.5,
        secondary: Axis::Y,
        drift: 0.1,
    },
    RingSpec {
        part: ReactorPart::MidRing,
        primary: Axis::Y,
        multiplier: 0.8,
        secondary: Axis::Z,
        drift: 0.2,
    },
    RingSpec {
        part: ReactorPart::InnerRing,
        primary: Axis::Z,
        multiplier: 1.2,
        secondary: Axis::X,
        drift: 0.3,
    },
];

/// What one animator pass did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub params: DerivedVisualParams,
    /// Parts that were not mounted and therefore not touched this frame.
    pub skipped: Vec<ReactorPart>,
}

impl FrameReport {
    pub fn all_updated(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Applies energy-derived motion and color to the reactor scene graph.
///
/// Holds no per-frame state: color is recomputed from the level every call and
/// only the node rotations (which live in the scene graph) accumulate.
#[derive(Debug, Clone, Default)]
pub struct CoreAnimator {
    palette: Palette,
}

impl CoreAnimator {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Run one frame against `scene`.
    pub fn animate(
        &self,
        scene: &mut SceneGraph,
        level: f32,
        elapsed: f32,
        delta: f32,
    ) -> FrameReport {
        let params = DerivedVisualParams::compute(level, elapsed, &self.palette);
        let mut skipped = Vec::new();

        match scene.get_mut(ReactorPart::Assembly) {
            Some(node) => node.transform.position.y = params.y_offset,
            None => skipped.push(ReactorPart::Assembly),
        }

        for spec in &RING_SPECS {
            let Some(node) = scene.get_mut(spec.part) else {
                skipped.push(spec.part);
                continue;
            };
            node.transform
                .rotate(spec.primary, delta * params.speed * spec.multiplier);
            node.transform.rotate(spec.secondary, delta * spec.drift);
            node.material.emissive = params.color;
        }

        match scene.get_mut(ReactorPart::Core) {
            Some(node) => {
                node.transform.set_uniform_scale(params.pulse);
                node.material.base_color = params.color;
                node.material.emissive = params.color;
            }
            None => skipped.push(ReactorPart::Core),
        }

        if !skipped.is_empty() {
            tracing::trace!(?skipped, "scene nodes not mounted, skipped this frame");
        }

        FrameReport { params, skipped }
    }
}
