use reactor_kernel::{Reactor, ReactorPart};
use serde::Serialize;

/// Reactor inspector for developer tooling.
///
/// Provides read-only queries against the reactor for debugging, the CLI and
/// the desktop side panel.
pub struct ReactorInspector;

impl ReactorInspector {
    /// Produce a summary of the reactor state after the last frame.
    pub fn summary(reactor: &Reactor) -> ReactorSummary {
        let (speed, pulse, y_offset) = reactor
            .last_report()
            .map(|r| (r.params.speed, r.params.pulse, r.params.y_offset))
            .unwrap_or_default();
        let skipped = reactor
            .last_report()
            .map(|r| r.skipped.clone())
            .unwrap_or_default();
        let (band_bottom, band_top) = reactor.particles().y_bounds();
        ReactorSummary {
            frame: reactor.frame(),
            energy: reactor.energy().get(),
            speed,
            pulse,
            y_offset,
            particle_count: reactor.particles().len(),
            band_bottom,
            band_top,
            mounted_parts: reactor.scene().mounted_parts().collect(),
            skipped,
        }
    }

    /// Transform and material of a single mounted part.
    pub fn inspect_part(reactor: &Reactor, part: ReactorPart) -> Option<PartInfo> {
        reactor.scene().get(part).map(|node| {
            let t = &node.transform;
            PartInfo {
                part,
                position: t.position.to_array(),
                rotation: t.rotation.to_array(),
                scale: t.scale.to_array(),
                emissive: node.material.emissive.to_hex(),
                emissive_intensity: node.material.emissive_intensity,
            }
        })
    }

    /// Every mounted part, in scene order.
    pub fn list_parts(reactor: &Reactor) -> Vec<PartInfo> {
        reactor
            .scene()
            .mounted_parts()
            .filter_map(|part| Self::inspect_part(reactor, part))
            .collect()
    }
}

/// Summary of reactor state for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct ReactorSummary {
    pub frame: u64,
    pub energy: f32,
    pub speed: f32,
    pub pulse: f32,
    pub y_offset: f32,
    pub particle_count: usize,
    pub band_bottom: f32,
    pub band_top: f32,
    pub mounted_parts: Vec<ReactorPart>,
    pub skipped: Vec<ReactorPart>,
}

impl std::fmt::Display for ReactorSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Reactor: frame={} energy={} speed={:.3} pulse={:.3} particles={} mounted={} skipped={}",
            self.frame,
            self.energy,
            self.speed,
            self.pulse,
            self.particle_count,
            self.mounted_parts.len(),
            self.skipped.len()
        )
    }
}

/// Detailed info about a single scene part.
#[derive(Debug, Clone, Serialize)]
pub struct PartInfo {
    pub part: ReactorPart,
    pub position: [f32; 3],
    /// Accumulated Euler angles in radians.
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    pub emissive: String,
    pub emissive_intensity: f32,
}

impl std::fmt::Display for PartInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} pos=({:.2}, {:.2}, {:.2}) rot=({:.3}, {:.3}, {:.3}) scale={:.3} emissive={}x{}",
            self.part.name(),
            self.position[0],
            self.position[1],
            self.position[2],
            self.rotation[0],
            self.rotation[1],
            self.rotation[2],
            self.scale[0],
            self.emissive,
            self.emissive_intensity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reactor_kernel::{EnergyState, ReactorConfig};

    fn reactor() -> Reactor {
        Reactor::with_seed(&ReactorConfig::default(), EnergyState::default(), 9).unwrap()
    }

    #[test]
    fn summary_before_first_frame() {
        let summary = ReactorInspector::summary(&reactor());
        assert_eq!(summary.frame, 0);
        assert_eq!(summary.energy, 50.0);
        assert_eq!(summary.speed, 0.0);
        assert_eq!(summary.particle_count, 2000);
        assert_eq!(summary.mounted_parts.len(), 5);
        assert!(summary.skipped.is_empty());
    }

    #[test]
    fn summary_after_frames() {
        let mut r = reactor();
        r.update(0.0, 0.0);
        r.update(0.016, 0.016);
        let summary = ReactorInspector::summary(&r);
        assert_eq!(summary.frame, 2);
        assert!((summary.speed - 1.5).abs() < 1e-6);
        assert_eq!(summary.band_bottom, -20.0);
        assert_eq!(summary.band_top, 20.0);
    }

    #[test]
    fn summary_reports_skipped_parts() {
        let mut r = reactor();
        r.scene_mut().unmount(ReactorPart::Core);
        r.update(0.1, 0.1);
        let summary = ReactorInspector::summary(&r);
        assert_eq!(summary.skipped, vec![ReactorPart::Core]);
        assert_eq!(summary.mounted_parts.len(), 4);
        assert!(summary.to_string().contains("skipped=1"));
    }

    #[test]
    fn inspect_part_found_and_missing() {
        let mut r = reactor();
        let info = ReactorInspector::inspect_part(&r, ReactorPart::Core).unwrap();
        assert_eq!(info.scale, [1.0, 1.0, 1.0]);
        assert_eq!(info.emissive_intensity, 3.0);

        r.scene_mut().unmount(ReactorPart::Core);
        assert!(ReactorInspector::inspect_part(&r, ReactorPart::Core).is_none());
        assert_eq!(ReactorInspector::list_parts(&r).len(), 4);
    }

    #[test]
    fn ring_rotation_visible_after_update() {
        let mut r = reactor();
        r.update(0.0, 0.0);
        r.update(1.0, 1.0);
        let info = ReactorInspector::inspect_part(&r, ReactorPart::OuterRing).unwrap();
        // Outer ring: primary X at 0.5 * speed, secondary Y drift 0.1.
        assert!((info.rotation[0] - 0.75).abs() < 1e-5);
        assert!((info.rotation[1] - 0.1).abs() < 1e-5);
        assert!(info.to_string().starts_with("outer-ring"));
    }

    #[test]
    fn summary_serializes() {
        let mut r = reactor();
        r.update(0.0, 0.0);
        let json = serde_json::to_string(&ReactorInspector::summary(&r)).unwrap();
        assert!(json.contains("\"particle_count\":2000"));
        assert!(json.contains("\"frame\":1"));
    }
}
