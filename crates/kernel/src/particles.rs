use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::{ConfigError, ParticleConfig};

/// Ambient rising particle field.
///
/// Positions are sampled once, uniformly inside the configured box, and the
/// buffer is never resized afterwards. Each tick moves every particle up by
/// `delta * speed`; a particle that passes the top of the band restarts at the
/// bottom. Only `y` is ever written after construction.
#[derive(Debug, Clone)]
pub struct ParticleField {
    positions: Vec<Vec3>,
    half_y: f32,
    speed: f32,
    dirty: bool,
}

impl ParticleField {
    /// Sample a field from OS entropy.
    pub fn new(config: &ParticleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_rng(config, &mut SmallRng::from_entropy()))
    }

    /// Sample a reproducible field.
    pub fn with_seed(config: &ParticleConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_rng(config, &mut SmallRng::seed_from_u64(seed)))
    }

    fn from_rng(config: &ParticleConfig, rng: &mut impl Rng) -> Self {
        let half_xz = config.range / 2.0;
        let half_y = config.y_range / 2.0;
        let positions = (0..config.count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-half_xz..half_xz),
                    rng.gen_range(-half_y..half_y),
                    rng.gen_range(-half_xz..half_xz),
                )
            })
            .collect();
        tracing::debug!(count = config.count, "sampled particle field");
        Self::from_positions(positions, config.y_range, config.speed)
    }

    /// Build a field around existing positions.
    pub fn from_positions(positions: Vec<Vec3>, y_range: f32, speed: f32) -> Self {
        Self {
            positions,
            half_y: y_range / 2.0,
            speed,
            dirty: true,
        }
    }

    /// Advance every particle by one frame of `delta` seconds.
    pub fn tick(&mut self, delta: f32) {
        let rise = delta * self.speed;
        for p in &mut self.positions {
            p.y += rise;
            if p.y > self.half_y {
                p.y = -self.half_y;
            }
        }
        self.dirty = true;
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// `(bottom, top)` of the wrap band.
    pub fn y_bounds(&self) -> (f32, f32) {
        (-self.half_y, self.half_y)
    }

    /// Returns true once after each change, for renderers that re-upload
    /// the buffer only when it moved.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
