//! Real FFT magnitude spectrum with Hann windowing

use std::sync::Arc;

use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};

use super::windows::hann;
use crate::error::{AnalyzerError, Result};

/// Planned real-to-complex transform for one frame length.
///
/// Holds no mutable state, so one processor can be shared across threads.
#[derive(Clone)]
pub struct FftProcessor {
    fft: Arc<dyn RealToComplex<f64>>,
    window: Vec<f64>,
    frame_len: usize,
}

impl FftProcessor {
    pub fn new(frame_len: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        Self {
            fft: planner.plan_fft_forward(frame_len),
            window: hann(frame_len),
            frame_len,
        }
    }

    /// Magnitude of each bin from 0 Hz to Nyquist (`frame_len / 2 + 1` bins).
    ///
    /// `samples` must be exactly `frame_len` long.
    pub fn magnitude_spectrum(&self, samples: &[f32]) -> Result<Vec<f64>> {
        if samples.len() != self.frame_len {
            return Err(AnalyzerError::Fft(format!(
                "frame of {} samples given to a {}-point transform",
                samples.len(),
                self.frame_len
            )));
        }

        let mut input: Vec<f64> = samples
            .iter()
            .zip(self.window.iter())
            .map(|(&s, &w)| s as f64 * w)
            .collect();
        let mut spectrum: Vec<Complex<f64>> = self.fft.make_output_vec();

        self.fft
            .process(&mut input, &mut spectrum)
            .map_err(|e| AnalyzerError::Fft(e.to_string()))?;

        Ok(spectrum.iter().map(|c| c.norm()).collect())
    }

    pub fn frame_len(&self) -> usize {
        self.frame_len
    }
}

impl std::fmt::Debug for FftProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FftProcessor")
            .field("frame_len", &self.frame_len)
            .finish()
    }
}

/// Centre frequency of bin `k` for an `n`-point transform
pub fn bin_frequency(k: usize, n: usize, sample_rate: u32) -> f64 {
    k as f64 * sample_rate as f64 / n as f64
}
