// src/config/analysis.rs
//
// Analysis configuration: chunking for section detail, decoding backend and
// optional resampling. Timeline and change-point constants are fixed and not
// part of the configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, Result};

/// Default chunk length for section detail (seconds)
pub const DEFAULT_CHUNK_DURATION: f64 = 30.0;
/// Default overlap between consecutive chunks (seconds)
pub const DEFAULT_OVERLAP: f64 = 15.0;

/// How audio files are turned into PCM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoderBackend {
    /// In-process decoding with symphonia
    #[default]
    Symphonia,
    /// Conversion through an external `ffmpeg` binary
    Ffmpeg,
}

impl DecoderBackend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Symphonia => "symphonia",
            Self::Ffmpeg => "ffmpeg",
        }
    }
}

/// Complete analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Length of each section chunk (seconds)
    pub chunk_duration: f64,
    /// Overlap between consecutive chunks (seconds), must be below `chunk_duration`
    pub overlap: f64,
    /// Analyze windows and chunks on the rayon thread pool
    pub parallel: bool,
    /// Resample decoded audio to this rate before analysis
    pub target_sample_rate: Option<u32>,
    /// Decoding backend
    pub decoder: DecoderBackend,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            chunk_duration: DEFAULT_CHUNK_DURATION,
            overlap: DEFAULT_OVERLAP,
            parallel: true,
            target_sample_rate: None,
            decoder: DecoderBackend::Symphonia,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.chunk_duration.is_finite() || self.chunk_duration <= 0.0 {
            return Err(AnalyzerError::invalid_config("chunk_duration", self.chunk_duration));
        }

        if !self.overlap.is_finite() || self.overlap < 0.0 || self.overlap >= self.chunk_duration {
            return Err(AnalyzerError::invalid_config("overlap", self.overlap));
        }

        if self.target_sample_rate == Some(0) {
            return Err(AnalyzerError::invalid_config("target_sample_rate", 0));
        }

        Ok(())
    }

    /// Distance between consecutive chunk starts (seconds)
    pub fn hop_duration(&self) -> f64 {
        self.chunk_duration - self.overlap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.chunk_duration, 30.0);
        assert_eq!(config.overlap, 15.0);
        assert_eq!(config.hop_duration(), 15.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overlap_must_be_below_chunk_duration() {
        let config = AnalysisConfig {
            chunk_duration: 20.0,
            overlap: 20.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AnalyzerError::InvalidConfig { ref key, .. }) if key == "overlap"
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        for config in [
            AnalysisConfig { chunk_duration: 0.0, ..Default::default() },
            AnalysisConfig { chunk_duration: f64::NAN, ..Default::default() },
            AnalysisConfig { overlap: -1.0, ..Default::default() },
            AnalysisConfig { target_sample_rate: Some(0), ..Default::default() },
        ] {
            assert!(config.validate().is_err(), "{:?}", config);
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{ "chunk_duration": 20, "decoder": "ffmpeg" }"#).unwrap();
        assert_eq!(config.chunk_duration, 20.0);
        assert_eq!(config.overlap, DEFAULT_OVERLAP);
        assert_eq!(config.decoder, DecoderBackend::Ffmpeg);
        assert!(config.parallel);
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("binaural-config-{}.json", uuid::Uuid::new_v4()));
        let config = AnalysisConfig {
            chunk_duration: 12.0,
            overlap: 4.0,
            parallel: false,
            target_sample_rate: Some(22050),
            decoder: DecoderBackend::Symphonia,
        };
        config.save_to_file(&path).unwrap();
        let loaded = AnalysisConfig::from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
