use reactor_common::Color;
use serde::Serialize;

use crate::config::Palette;

/// Rotation speed at zero energy.
pub const SPEED_BASE: f32 = 0.5;
/// Extra speed gained per unit of normalized energy.
pub const SPEED_GAIN: f32 = 2.0;
/// Core pulse frequency multiplier, applied on top of `speed`.
pub const PULSE_FREQUENCY: f32 = 5.0;
pub const PULSE_AMPLITUDE: f32 = 0.1;
pub const BOB_FREQUENCY: f32 = 0.5;
pub const BOB_AMPLITUDE: f32 = 0.5;

/// `level / 100`, unclamped.
pub fn normalized_energy(level: f32) -> f32 {
    level / 100.0
}

/// Energy-derived base rotation speed: 0.5 at level 0, 2.5 at level 100.
pub fn speed(level: f32) -> f32 {
    SPEED_BASE + normalized_energy(level) * SPEED_GAIN
}

pub fn pulse_scale(elapsed: f32, speed: f32) -> f32 {
    1.0 + (elapsed * PULSE_FREQUENCY * speed).sin() * PULSE_AMPLITUDE
}

/// Vertical offset of the whole assembly.
pub fn bob_offset(elapsed: f32) -> f32 {
    (elapsed * BOB_FREQUENCY).sin() * BOB_AMPLITUDE
}

/// Everything the animator derives from the energy level for one frame.
///
/// Recomputed from scratch every frame; nothing here is carried over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedVisualParams {
    pub normalized_energy: f32,
    #[serde(serialize_with = "serialize_color")]
    pub color: Color,
    pub speed: f32,
    pub pulse: f32,
    pub y_offset: f32,
}

impl DerivedVisualParams {
    pub fn compute(level: f32, elapsed: f32, palette: &Palette) -> Self {
        let normalized = normalized_energy(level);
        let speed = speed(level);
        Self {
            normalized_energy: normalized,
            color: Color::lerp(palette.safe, palette.danger, normalized),
            speed,
            pulse: pulse_scale(elapsed, speed),
            y_offset: bob_offset(elapsed),
        }
    }
}

fn serialize_color<S: serde::Serializer>(c: &Color, s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(c.to_array())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_endpoints() {
        assert_eq!(speed(0.0), 0.5);
        assert_eq!(speed(50.0), 1.5);
        assert_eq!(speed(100.0), 2.5);
    }

    #[test]
    fn speed_is_linear_in_level() {
        for level in 0..100 {
            let step = speed(level as f32 + 1.0) - speed(level as f32);
            assert!((step - 0.02).abs() < 1e-5, "level {level}: step {step}");
        }
    }

    #[test]
    fn color_endpoints_and_midpoint() {
        let palette = Palette::default();
        let at = |level| DerivedVisualParams::compute(level, 0.0, &palette).color;
        assert_eq!(at(0.0), palette.safe);
        assert_eq!(at(100.0), palette.danger);
        let mid = at(50.0);
        assert_eq!(mid.r, (palette.safe.r + palette.danger.r) / 2.0);
        assert_eq!(mid.g, (palette.safe.g + palette.danger.g) / 2.0);
        assert_eq!(mid.b, (palette.safe.b + palette.danger.b) / 2.0);
    }

    #[test]
    fn out_of_range_level_extrapolates() {
        let palette = Palette::default();
        let p = DerivedVisualParams::compute(120.0, 0.0, &palette);
        assert!((p.normalized_energy - 1.2).abs() < 1e-6);
        assert!((p.speed - 2.9).abs() < 1e-5);
        let expected = |s: f32, d: f32| s + (d - s) * 1.2;
        assert!((p.color.r - expected(palette.safe.r, palette.danger.r)).abs() < 1e-5);
        assert!((p.color.g - expected(palette.safe.g, palette.danger.g)).abs() < 1e-5);
        assert!((p.color.b - expected(palette.safe.b, palette.danger.b)).abs() < 1e-5);
        // Past the danger color: red above 1, green below 0.
        assert!(p.color.r > 1.0);
        assert!(p.color.g < 0.0);
    }

    #[test]
    fn pulse_and_bob_at_time_zero() {
        let p = DerivedVisualParams::compute(50.0, 0.0, &Palette::default());
        assert_eq!(p.pulse, 1.0);
        assert_eq!(p.y_offset, 0.0);
    }

    #[test]
    fn pulse_stays_within_amplitude() {
        for i in 0..500 {
            let t = i as f32 * 0.037;
            let pulse = pulse_scale(t, speed(100.0));
            assert!((0.9 - 1e-6..=1.1 + 1e-6).contains(&pulse));
            assert!(bob_offset(t).abs() <= 0.5 + 1e-6);
        }
    }
}
