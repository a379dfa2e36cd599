use crate::animator::{CoreAnimator, FrameReport};
use crate::config::{ConfigError, ReactorConfig};
use crate::energy::EnergyState;
use crate::particles::ParticleField;
use crate::scene::SceneGraph;

/// The reactor visualization core.
///
/// Owns the scene graph and the particle field and reads the shared energy
/// register once per frame. The host loop drives it through [`Reactor::update`];
/// nothing here spawns threads or blocks.
#[derive(Debug)]
pub struct Reactor {
    energy: EnergyState,
    scene: SceneGraph,
    animator: CoreAnimator,
    particles: ParticleField,
    frame: u64,
    last_report: Option<FrameReport>,
}

impl Reactor {
    /// Build a fully assembled reactor reading from `energy`.
    pub fn new(config: &ReactorConfig, energy: EnergyState) -> Result<Self, ConfigError> {
        config.validate()?;
        let particles = ParticleField::new(&config.particles)?;
        Ok(Self::from_parts(config, energy, particles))
    }

    /// Like [`Reactor::new`] but with a reproducible particle field.
    pub fn with_seed(
        config: &ReactorConfig,
        energy: EnergyState,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let particles = ParticleField::with_seed(&config.particles, seed)?;
        Ok(Self::from_parts(config, energy, particles))
    }

    fn from_parts(config: &ReactorConfig, energy: EnergyState, particles: ParticleField) -> Self {
        tracing::info!(
            particles = particles.len(),
            energy = energy.get(),
            "reactor assembled"
        );
        Self {
            energy,
            scene: SceneGraph::assembled(),
            animator: CoreAnimator::new(config.palette),
            particles,
            frame: 0,
            last_report: None,
        }
    }

    /// Advance one frame: animate the core from the current energy level and
    /// move the particle field.
    pub fn update(&mut self, elapsed: f32, delta: f32) -> &FrameReport {
        let level = self.energy.get();
        let report = self.animator.animate(&mut self.scene, level, elapsed, delta);
        self.particles.tick(delta);
        self.frame += 1;
        self.last_report.insert(report)
    }

    pub fn energy(&self) -> &EnergyState {
        &self.energy
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Mutable scene access, for mounting and unmounting nodes.
    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut ParticleField {
        &mut self.particles
    }

    pub fn animator(&self) -> &CoreAnimator {
        &self.animator
    }

    /// Frames processed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Result of the most recent `update`, if any.
    pub fn last_report(&self) -> Option<&FrameReport> {
        self.last_report.as_ref()
    }
}
