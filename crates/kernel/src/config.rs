use reactor_common::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Energy level the register starts at when nothing else is configured.
pub const DEFAULT_ENERGY_LEVEL: f32 = 50.0;
/// Levels strictly above this read as critical.
pub const DEFAULT_CRITICAL_THRESHOLD: f32 = 80.0;

pub const SAFE_COLOR: Color = Color::from_rgb8(0x00, 0xFF, 0xF0);
pub const DANGER_COLOR: Color = Color::from_rgb8(0xFF, 0x00, 0x55);

/// Errors from loading or validating a [`ReactorConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration. Every section falls back to its defaults, so an
/// empty YAML document is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactorConfig {
    pub energy: EnergyConfig,
    pub particles: ParticleConfig,
    pub palette: Palette,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    /// Value the shared register is created with.
    pub initial: f32,
    /// Status readout switches to critical above this level.
    pub critical_threshold: f32,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            initial: DEFAULT_ENERGY_LEVEL,
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
        }
    }
}

/// Ambient particle field parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// Full width of the x/z spawn box.
    pub range: f32,
    /// Full height of the y band; particles wrap at `y_range / 2`.
    pub y_range: f32,
    /// Rise speed in units per second.
    pub speed: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 2000,
            range: 40.0,
            y_range: 40.0,
            speed: 0.5,
        }
    }
}

impl ParticleConfig {
    /// Count must be non-zero, both ranges positive and finite, speed finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::Invalid("particles.count must be > 0".into()));
        }
        for (name, v) in [("particles.range", self.range), ("particles.y_range", self.y_range)] {
            if !(v.is_finite() && v > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive and finite, got {v}"
                )));
            }
        }
        if !self.speed.is_finite() {
            return Err(ConfigError::Invalid("particles.speed must be finite".into()));
        }
        Ok(())
    }
}

/// The two colors the reactor interpolates between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub safe: Color,
    pub danger: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            safe: SAFE_COLOR,
            danger: DANGER_COLOR,
        }
    }
}

impl ReactorConfig {
    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded reactor config");
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document; treat it as "all defaults".
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.particles.validate()?;
        let e = &self.energy;
        if !(e.initial.is_finite() && e.critical_threshold.is_finite()) {
            return Err(ConfigError::Invalid(
                "energy.initial and energy.critical_threshold must be finite".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reactor_constants() {
        let c = ReactorConfig::default();
        assert_eq!(c.energy.initial, 50.0);
        assert_eq!(c.energy.critical_threshold, 80.0);
        assert_eq!(c.particles.count, 2000);
        assert_eq!(c.particles.y_range, 40.0);
        assert_eq!(c.particles.speed, 0.5);
        assert_eq!(c.palette.safe.to_hex(), "#00FFF0");
        assert_eq!(c.palette.danger.to_hex(), "#FF0055");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(
            ReactorConfig::from_yaml_str("").unwrap(),
            ReactorConfig::default()
        );
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let c = ReactorConfig::from_yaml_str(
            "particles:\n  count: 10\npalette:\n  danger: \"#FF0000\"\n",
        )
        .unwrap();
        assert_eq!(c.particles.count, 10);
        assert_eq!(c.particles.range, 40.0);
        assert_eq!(c.palette.danger.to_hex(), "#FF0000");
        assert_eq!(c.palette.safe, SAFE_COLOR);
    }

    #[test]
    fn yaml_round_trip() {
        let mut c = ReactorConfig::default();
        c.energy.initial = 12.0;
        let text = c.to_yaml_string().unwrap();
        assert!(text.contains("'#00FFF0'") || text.contains("\"#00FFF0\""));
        assert_eq!(ReactorConfig::from_yaml_str(&text).unwrap(), c);
    }

    #[test]
    fn rejects_zero_particles() {
        let err = ReactorConfig::from_yaml_str("particles:\n  count: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_non_positive_range() {
        let err = ReactorConfig::from_yaml_str("particles:\n  y_range: -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_bad_color() {
        let err = ReactorConfig::from_yaml_str("palette:\n  safe: \"#XYZXYZ\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "energy:\n  initial: 75.0").unwrap();
        let c = ReactorConfig::load(file.path()).unwrap();
        assert_eq!(c.energy.initial, 75.0);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReactorConfig::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn load_or_default_without_path() {
        assert_eq!(
            ReactorConfig::load_or_default(None).unwrap(),
            ReactorConfig::default()
        );
    }
}
