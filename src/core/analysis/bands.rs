// src/core/analysis/bands.rs
//
// Brainwave band classification of binaural beat frequencies.
// Section labels and chunk labels both go through `BrainwaveBand::from_beat`.

use serde::{Serialize, Serializer};

/// Brainwave band, by binaural beat frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrainwaveBand {
    /// Below 4 Hz
    Delta,
    /// 4 Hz up to 8 Hz
    Theta,
    /// 8 Hz up to 12 Hz
    Alpha,
    /// 12 Hz up to 30 Hz
    Beta,
    /// 30 Hz and above
    Gamma,
}

/// Casing used when rendering a band name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelCase {
    /// `theta`, used in section labels
    Lower,
    /// `Theta`, used for chunk wave types
    Capitalized,
}

impl BrainwaveBand {
    /// Classify a beat frequency. Upper bounds are exclusive.
    pub fn from_beat(beat_hz: f64) -> Self {
        match beat_hz {
            b if b < 4.0 => Self::Delta,
            b if b < 8.0 => Self::Theta,
            b if b < 12.0 => Self::Alpha,
            b if b < 30.0 => Self::Beta,
            _ => Self::Gamma,
        }
    }

    pub fn name(&self, case: LabelCase) -> &'static str {
        match (self, case) {
            (Self::Delta, LabelCase::Lower) => "delta",
            (Self::Theta, LabelCase::Lower) => "theta",
            (Self::Alpha, LabelCase::Lower) => "alpha",
            (Self::Beta, LabelCase::Lower) => "beta",
            (Self::Gamma, LabelCase::Lower) => "gamma",
            (Self::Delta, LabelCase::Capitalized) => "Delta",
            (Self::Theta, LabelCase::Capitalized) => "Theta",
            (Self::Alpha, LabelCase::Capitalized) => "Alpha",
            (Self::Beta, LabelCase::Capitalized) => "Beta",
            (Self::Gamma, LabelCase::Capitalized) => "Gamma",
        }
    }

    pub fn all() -> [Self; 5] {
        [Self::Delta, Self::Theta, Self::Alpha, Self::Beta, Self::Gamma]
    }
}

impl std::fmt::Display for BrainwaveBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name(LabelCase::Capitalized))
    }
}

impl Serialize for BrainwaveBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name(LabelCase::Capitalized))
    }
}
