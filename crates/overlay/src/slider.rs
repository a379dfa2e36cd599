use reactor_kernel::EnergyState;

/// Errors from interpreting a raw slider value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SliderError {
    #[error("slider value {0:?} is not a number")]
    NotANumber(String),
}

/// The energy slider: an integer control over `[MIN, MAX]` that writes into
/// the shared register.
///
/// The register is the source of truth; the slider's native value is
/// refreshed from it with [`EnergySlider::sync`] before drawing. The range is
/// enforced here, not by the register's setter.
#[derive(Debug, Clone)]
pub struct EnergySlider {
    energy: EnergyState,
    value: i32,
}

impl EnergySlider {
    pub const MIN: i32 = 0;
    pub const MAX: i32 = 100;
    pub const STEP: i32 = 1;

    pub fn new(energy: EnergyState) -> Self {
        let value = Self::native(energy.get());
        Self { energy, value }
    }

    /// The control's current native value.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Mutable native value for immediate-mode widgets. Follow with
    /// [`EnergySlider::commit`] when the widget reports a change.
    pub fn value_mut(&mut self) -> &mut i32 {
        &mut self.value
    }

    /// Pull the register's level into the control.
    pub fn sync(&mut self) {
        self.value = Self::native(self.energy.get());
    }

    /// Handle a change event. Writes to the register only when the value
    /// differs from what the register holds; returns whether it wrote.
    pub fn change(&mut self, raw: i32) -> bool {
        let value = raw.clamp(Self::MIN, Self::MAX);
        self.value = value;
        let level = value as f32;
        if self.energy.get() == level {
            return false;
        }
        self.energy.set(level);
        true
    }

    /// Commit whatever is currently in the native value.
    pub fn commit(&mut self) -> bool {
        self.change(self.value)
    }

    /// Handle a change event carrying the control's string representation.
    pub fn change_str(&mut self, raw: &str) -> Result<bool, SliderError> {
        let parsed: f64 = raw
            .trim()
            .parse()
            .map_err(|_| SliderError::NotANumber(raw.to_string()))?;
        if !parsed.is_finite() {
            return Err(SliderError::NotANumber(raw.to_string()));
        }
        let stepped = parsed.round().clamp(Self::MIN as f64, Self::MAX as f64) as i32;
        Ok(self.change(stepped))
    }

    fn native(level: f32) -> i32 {
        if level.is_finite() {
            (level.round() as i32).clamp(Self::MIN, Self::MAX)
        } else {
            Self::MIN
        }
    }
}
