// src/core/analysis/spectral.rs
//
// Carrier-band spectral analysis of a single channel segment.
// Finds the dominant carrier tone and the strongest secondary peaks.

use serde::{Serialize, Serializer};

use crate::core::dsp::{bin_frequency, find_peaks, rms, FftProcessor};
use crate::error::Result;

/// Lowest carrier frequency considered (Hz, inclusive)
pub const CARRIER_BAND_MIN_HZ: f64 = 50.0;
/// Highest carrier frequency considered (Hz, inclusive)
pub const CARRIER_BAND_MAX_HZ: f64 = 1000.0;
/// Secondary peaks must reach this fraction of the dominant magnitude
pub const SECONDARY_PEAK_RATIO: f64 = 0.3;
/// Maximum number of peaks reported per segment
pub const MAX_PEAKS: usize = 5;

/// A spectral peak, serialized as `[frequency, magnitude]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyPeak {
    pub frequency: f64,
    pub magnitude: f64,
}

impl Serialize for FrequencyPeak {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (self.frequency, self.magnitude).serialize(serializer)
    }
}

/// Result of analyzing one segment of one channel
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpectralSample {
    /// Strongest bin within the carrier band, or 0 when the band is empty
    pub dominant_frequency: f64,
    /// Up to `MAX_PEAKS` local maxima, strongest first
    pub top_peaks: Vec<FrequencyPeak>,
    /// RMS of the raw (unwindowed) segment
    pub rms_amplitude: f64,
}

/// Spectral analyzer with a transform planned for a fixed frame length.
///
/// Segments of other lengths are still accepted and get a one-off plan.
#[derive(Debug, Clone)]
pub struct SpectralAnalyzer {
    sample_rate: u32,
    processor: FftProcessor,
}

impl SpectralAnalyzer {
    pub fn new(sample_rate: u32, frame_len: usize) -> Self {
        Self {
            sample_rate,
            processor: FftProcessor::new(frame_len),
        }
    }

    /// Analyze `channel[start..end]`. The range is clamped to the channel.
    pub fn analyze(&self, channel: &[f32], start: usize, end: usize) -> Result<SpectralSample> {
        let end = end.min(channel.len());
        let start = start.min(end);
        let segment = &channel[start..end];

        let rms_amplitude = rms(segment);

        if segment.len() < 2 {
            return Ok(SpectralSample {
                rms_amplitude,
                ..Default::default()
            });
        }

        let magnitudes = if segment.len() == self.processor.frame_len() {
            self.processor.magnitude_spectrum(segment)?
        } else {
            FftProcessor::new(segment.len()).magnitude_spectrum(segment)?
        };

        let (band_freqs, band_mags) = carrier_band(&magnitudes, segment.len(), self.sample_rate);

        let Some((peak_idx, peak_mag)) = strongest_bin(&band_mags) else {
            return Ok(SpectralSample {
                rms_amplitude,
                ..Default::default()
            });
        };

        let mut top_peaks: Vec<FrequencyPeak> = find_peaks(&band_mags, peak_mag * SECONDARY_PEAK_RATIO)
            .into_iter()
            .map(|i| FrequencyPeak {
                frequency: band_freqs[i],
                magnitude: band_mags[i],
            })
            .collect();
        top_peaks.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
        top_peaks.truncate(MAX_PEAKS);

        Ok(SpectralSample {
            dominant_frequency: band_freqs[peak_idx],
            top_peaks,
            rms_amplitude,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Width of one FFT bin for the planned frame length
    pub fn bin_width(&self) -> f64 {
        self.sample_rate as f64 / self.processor.frame_len() as f64
    }
}

/// Frequencies and magnitudes of the bins inside the carrier band
fn carrier_band(magnitudes: &[f64], n: usize, sample_rate: u32) -> (Vec<f64>, Vec<f64>) {
    magnitudes
        .iter()
        .enumerate()
        .map(|(k, &m)| (bin_frequency(k, n, sample_rate), m))
        .filter(|&(f, _)| (CARRIER_BAND_MIN_HZ..=CARRIER_BAND_MAX_HZ).contains(&f))
        .unzip()
}

/// First index holding the maximum value
fn strongest_bin(values: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best
}
