// src/error.rs
//
// Error types for the binaural analyzer library.

use thiserror::Error;

/// Main error type for decoding, validation and analysis
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Failed to decode {path}: {message}")]
    DecodeFailure { path: String, message: String },

    #[error("Audio must be stereo (2 channels), found {channels} channel(s)")]
    InvalidChannelLayout { channels: usize },

    #[error("Channel length mismatch: left has {left} samples, right has {right}")]
    ChannelLengthMismatch { left: usize, right: usize },

    #[error("Invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidConfig { key: String, value: String },

    #[error("FFT processing failed: {0}")]
    Fft(String),

    #[error("Resampling failed: {0}")]
    Resample(String),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using AnalyzerError
pub type Result<T> = std::result::Result<T, AnalyzerError>;

impl AnalyzerError {
    pub(crate) fn decode<P: AsRef<std::path::Path>>(path: P, message: impl Into<String>) -> Self {
        Self::DecodeFailure {
            path: path.as_ref().display().to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_config(key: &str, value: impl ToString) -> Self {
        Self::InvalidConfig {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    /// Whether the failure came from the input file rather than the analysis
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::DecodeFailure { .. }
                | Self::InvalidChannelLayout { .. }
                | Self::ChannelLengthMismatch { .. }
                | Self::InvalidSampleRate(_)
                | Self::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AnalyzerError::InvalidChannelLayout { channels: 1 };
        assert_eq!(err.to_string(), "Audio must be stereo (2 channels), found 1 channel(s)");

        let err = AnalyzerError::decode("track.flac", "unexpected end of stream");
        assert!(err.to_string().contains("track.flac"));
        assert!(err.to_string().contains("unexpected end of stream"));
    }

    #[test]
    fn test_input_error_classification() {
        assert!(AnalyzerError::InvalidChannelLayout { channels: 6 }.is_input_error());
        assert!(!AnalyzerError::invalid_config("overlap", 40).is_input_error());
        assert!(!AnalyzerError::Fft("length mismatch".into()).is_input_error());
    }
}
