// src/core/analysis/timeline.rs
//
// Coarse frequency timeline over the whole recording: one point per 10 s
// window, advanced in 5 s hops.

use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use super::spectral::SpectralAnalyzer;
use crate::core::buffer::AudioBuffer;
use crate::error::Result;

/// Timeline analysis window (seconds)
pub const TIMELINE_WINDOW_SECS: f64 = 10.0;
/// Timeline hop (seconds)
pub const TIMELINE_HOP_SECS: f64 = 5.0;

/// One timeline window's carrier estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelinePoint {
    /// Window start (seconds)
    pub time: f64,
    pub left_freq: f64,
    pub right_freq: f64,
    /// `|left_freq - right_freq|`
    pub binaural_beat: f64,
    /// Left channel RMS, used as a coarse activity measure
    pub amplitude: f64,
}

/// Builds the coarse timeline used for section detection
#[derive(Debug, Clone, Copy)]
pub struct TimelineBuilder {
    parallel: bool,
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl TimelineBuilder {
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    /// Window start offsets (in frames) for a buffer of `len` frames.
    ///
    /// A window must end strictly before the last frame, so a buffer of
    /// exactly one window yields nothing.
    pub fn window_starts(len: usize, window: usize, hop: usize) -> Vec<usize> {
        if window == 0 || hop == 0 || len <= window {
            return Vec::new();
        }
        (0..len - window).step_by(hop).collect()
    }

    /// Analyze every window of `buffer`. Empty if the buffer is shorter than a window.
    pub fn build(&self, buffer: &AudioBuffer) -> Result<Vec<TimelinePoint>> {
        let window = buffer.seconds_to_samples(TIMELINE_WINDOW_SECS);
        let hop = buffer.seconds_to_samples(TIMELINE_HOP_SECS);
        let starts = Self::window_starts(buffer.len(), window, hop);

        if starts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            "Timeline: {} windows of {} samples (hop {})",
            starts.len(),
            window,
            hop
        );

        let analyzer = SpectralAnalyzer::new(buffer.sample_rate(), window);
        let point_at = |&start: &usize| analyze_window(&analyzer, buffer, start, window);

        if self.parallel {
            starts.par_iter().map(point_at).collect()
        } else {
            starts.iter().map(point_at).collect()
        }
    }
}

fn analyze_window(
    analyzer: &SpectralAnalyzer,
    buffer: &AudioBuffer,
    start: usize,
    window: usize,
) -> Result<TimelinePoint> {
    let left = analyzer.analyze(buffer.left(), start, start + window)?;
    let right = analyzer.analyze(buffer.right(), start, start + window)?;

    Ok(TimelinePoint {
        time: buffer.time_for_sample(start),
        left_freq: left.dominant_frequency,
        right_freq: right.dominant_frequency,
        binaural_beat: (left.dominant_frequency - right.dominant_frequency).abs(),
        amplitude: left.rms_amplitude,
    })
}
