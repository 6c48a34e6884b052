// src/core/buffer.rs
//
// Immutable stereo sample buffer shared by reference across all analysis stages.

use crate::error::{AnalyzerError, Result};

/// Decoded stereo audio, normalized to [-1.0, 1.0]
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    left: Vec<f32>,
    right: Vec<f32>,
}

impl AudioBuffer {
    /// Build a buffer from separate channels.
    ///
    /// Fails if the sample rate is zero or the channels differ in length.
    pub fn new(sample_rate: u32, left: Vec<f32>, right: Vec<f32>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(AnalyzerError::InvalidSampleRate(sample_rate));
        }
        if left.len() != right.len() {
            return Err(AnalyzerError::ChannelLengthMismatch {
                left: left.len(),
                right: right.len(),
            });
        }

        Ok(Self {
            sample_rate,
            left,
            right,
        })
    }

    /// Build a buffer from interleaved frames. Anything but two channels is rejected.
    pub fn from_interleaved(samples: &[f32], channels: usize, sample_rate: u32) -> Result<Self> {
        if channels != 2 {
            return Err(AnalyzerError::InvalidChannelLayout { channels });
        }

        let frames = samples.len() / 2;
        let mut left = Vec::with_capacity(frames);
        let mut right = Vec::with_capacity(frames);

        for frame in samples.chunks_exact(2) {
            left.push(frame[0]);
            right.push(frame[1]);
        }

        Self::new(sample_rate, left, right)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn left(&self) -> &[f32] {
        &self.left
    }

    pub fn right(&self) -> &[f32] {
        &self.right
    }

    /// Number of frames per channel
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.left.len() as f64 / self.sample_rate as f64
    }

    /// Convert seconds to a frame index, truncating toward zero
    pub fn seconds_to_samples(&self, seconds: f64) -> usize {
        (seconds * self.sample_rate as f64) as usize
    }

    /// Time in seconds for a frame index
    pub fn time_for_sample(&self, index: usize) -> f64 {
        index as f64 / self.sample_rate as f64
    }

    /// Consume the buffer, returning (left, right)
    pub fn into_channels(self) -> (Vec<f32>, Vec<f32>) {
        (self.left, self.right)
    }
}
