use glam::Vec3;
use reactor_kernel::Reactor;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 30.0),
            target: Vec3::ZERO,
            fov_degrees: 50.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the reactor and a view configuration, then produces
/// output. It never mutates the reactor; the animator is the only writer of
/// scene state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given reactor state and view.
    fn render(&self, reactor: &Reactor, view: &RenderView) -> Self::Output;
}

/// Human-readable dump of the reactor scene.
///
/// Used by the CLI and in tests to exercise the render interface without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Also list the first few particle positions.
    pub sample_particles: usize,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_particle_samples(sample_particles: usize) -> Self {
        Self { sample_particles }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, reactor: &Reactor, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Reactor (frame={}, energy={}) ===\n",
            reactor.frame(),
            reactor.energy().get()
        ));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        if let Some(report) = reactor.last_report() {
            let p = &report.params;
            out.push_str(&format!(
                "Derived: speed={:.3} pulse={:.3} y_offset={:.3} color={}\n",
                p.speed, p.pulse, p.y_offset, p.color
            ));
            if !report.skipped.is_empty() {
                let names: Vec<&str> = report.skipped.iter().map(|p| p.name()).collect();
                out.push_str(&format!("Skipped: {}\n", names.join(", ")));
            }
        }

        out.push_str(&format!("Nodes: {}\n", reactor.scene().len()));
        for (part, node) in reactor.scene().nodes() {
            let t = &node.transform;
            out.push_str(&format!(
                "  [{:<10}] pos=({:.2}, {:.2}, {:.2}) rot=({:.3}, {:.3}, {:.3}) scale={:.3} emissive={}\n",
                part.name(),
                t.position.x,
                t.position.y,
                t.position.z,
                t.rotation.x,
                t.rotation.y,
                t.rotation.z,
                t.scale.x,
                node.material.emissive.to_hex()
            ));
        }

        let particles = reactor.particles();
        let (bottom, top) = particles.y_bounds();
        out.push_str(&format!(
            "Particles: {} (band {:.1}..{:.1})\n",
            particles.len(),
            bottom,
            top
        ));
        for p in particles.positions().iter().take(self.sample_particles) {
            out.push_str(&format!("  ({:.2}, {:.2}, {:.2})\n", p.x, p.y, p.z));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reactor_kernel::{EnergyState, ReactorConfig, ReactorPart};

    fn reactor() -> Reactor {
        Reactor::with_seed(&ReactorConfig::default(), EnergyState::default(), 1).unwrap()
    }

    #[test]
    fn debug_renderer_before_first_frame() {
        let output = DebugTextRenderer::new().render(&reactor(), &RenderView::default());
        assert!(output.contains("frame=0"));
        assert!(output.contains("energy=50"));
        assert!(output.contains("Nodes: 5"));
        assert!(!output.contains("Derived:"));
    }

    #[test]
    fn debug_renderer_after_update() {
        let mut r = reactor();
        r.update(0.0, 0.0);
        let output = DebugTextRenderer::new().render(&r, &RenderView::default());
        assert!(output.contains("speed=1.500"));
        assert!(output.contains("pulse=1.000"));
        assert!(output.contains("outer-ring"));
        assert!(output.contains("Particles: 2000"));
    }

    #[test]
    fn debug_renderer_lists_skipped_parts() {
        let mut r = reactor();
        r.scene_mut().unmount(ReactorPart::InnerRing);
        r.update(0.5, 0.016);
        let output = DebugTextRenderer::new().render(&r, &RenderView::default());
        assert!(output.contains("Skipped: inner-ring"));
        assert!(output.contains("Nodes: 4"));
    }

    #[test]
    fn dump_is_line_per_record() {
        let mut r = reactor();
        r.update(0.5, 0.016);
        let output =
            DebugTextRenderer::with_particle_samples(2).render(&r, &RenderView::default());
        assert!(output.ends_with('\n'));
        // header, camera, derived, node count, 5 nodes, particle count, 2 samples
        assert_eq!(output.lines().count(), 4 + 5 + 1 + 2);
        let node_lines = output
            .lines()
            .skip_while(|l| !l.starts_with("Nodes:"))
            .skip(1)
            .take_while(|l| l.starts_with("  ["))
            .count();
        assert_eq!(node_lines, 5);
    }

    #[test]
    fn particle_samples() {
        let output =
            DebugTextRenderer::with_particle_samples(3).render(&reactor(), &RenderView::default());
        let sample_lines = output
            .lines()
            .skip_while(|l| !l.starts_with("Particles:"))
            .skip(1)
            .count();
        assert_eq!(sample_lines, 3);
    }

    #[test]
    fn render_view_default() {
        let view = RenderView::default();
        assert_eq!(view.fov_degrees, 50.0);
        assert_eq!(view.eye, Vec3::new(0.0, 0.0, 30.0));
    }
}
