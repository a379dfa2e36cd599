use reactor_common::Color;
use reactor_kernel::config::DEFAULT_CRITICAL_THRESHOLD;
use reactor_kernel::{EnergyState, Palette, SubscriptionId};
use std::cell::Cell;
use std::fmt;

/// Discrete status shown in the overlay header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusLevel {
    Normal,
    Critical,
}

impl StatusLevel {
    /// Hard cutoff: strictly above `threshold` is critical.
    pub fn classify(level: f32, threshold: f32) -> Self {
        if level > threshold {
            StatusLevel::Critical
        } else {
            StatusLevel::Normal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusLevel::Normal => "NORMAL",
            StatusLevel::Critical => "CRITICAL",
        }
    }

    /// Text color: danger when critical, safe otherwise. Independent of the
    /// continuous interpolation the animator uses.
    pub fn color(self, palette: &Palette) -> Color {
        match self {
            StatusLevel::Normal => palette.safe,
            StatusLevel::Critical => palette.danger,
        }
    }
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single read of the register, formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub level: f32,
    pub status: StatusLevel,
    pub color: Color,
}

impl Readout {
    /// The level as shown next to the slider, e.g. `50%`.
    pub fn percent_text(&self) -> String {
        format!("{}%", self.level)
    }
}

/// Reads the energy register and classifies it against a fixed threshold.
#[derive(Debug, Clone)]
pub struct StatusReadout {
    energy: EnergyState,
    threshold: f32,
    palette: Palette,
}

impl StatusReadout {
    pub fn new(energy: EnergyState, palette: Palette) -> Self {
        Self::with_threshold(energy, palette, DEFAULT_CRITICAL_THRESHOLD)
    }

    pub fn with_threshold(energy: EnergyState, palette: Palette, threshold: f32) -> Self {
        Self {
            energy,
            threshold,
            palette,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn read(&self) -> Readout {
        let level = self.energy.get();
        let status = StatusLevel::classify(level, self.threshold);
        Readout {
            level,
            status,
            color: status.color(&self.palette),
        }
    }

    /// Subscribe a logger that reports NORMAL/CRITICAL transitions.
    pub fn watch_transitions(&self) -> SubscriptionId {
        let threshold = self.threshold;
        let current = Cell::new(StatusLevel::classify(self.energy.get(), threshold));
        self.energy.subscribe(move |level| {
            let next = StatusLevel::classify(level, threshold);
            if next == current.replace(next) {
                return;
            }
            match next {
                StatusLevel::Critical => {
                    tracing::warn!(level, threshold, "reactor status CRITICAL")
                }
                StatusLevel::Normal => tracing::info!(level, "reactor status back to NORMAL"),
            }
        })
    }
}
