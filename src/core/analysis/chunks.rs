// src/core/analysis/chunks.rs
//
// Fine-grained re-analysis of a section with overlapping chunks.

use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use super::bands::BrainwaveBand;
use super::sections::Section;
use super::spectral::{FrequencyPeak, SpectralAnalyzer};
use crate::config::AnalysisConfig;
use crate::core::buffer::AudioBuffer;
use crate::core::dsp::mean_by;
use crate::error::Result;

/// One chunk of a section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chunk {
    /// Chunk start (seconds from the start of the recording)
    pub time: f64,
    pub left_freq: f64,
    pub right_freq: f64,
    pub binaural_beat: f64,
    pub wave_type: BrainwaveBand,
    /// Mean of the left and right RMS
    pub amplitude: f64,
    pub left_top_freqs: Vec<FrequencyPeak>,
    pub right_top_freqs: Vec<FrequencyPeak>,
}

/// Mean carrier and beat frequencies over a section's chunks
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FrequencyAverages {
    pub left_freq: f64,
    pub right_freq: f64,
    pub binaural_beat: f64,
}

impl FrequencyAverages {
    /// Averages over `chunks`, all zero when there are none
    pub fn from_chunks(chunks: &[Chunk]) -> Self {
        Self {
            left_freq: mean_by(chunks, |c| c.left_freq),
            right_freq: mean_by(chunks, |c| c.right_freq),
            binaural_beat: mean_by(chunks, |c| c.binaural_beat),
        }
    }
}

/// Chunks and averages for one section
#[derive(Debug, Clone, PartialEq)]
pub struct SectionDetail {
    pub chunks: Vec<Chunk>,
    pub average: FrequencyAverages,
}

/// Splits sections into overlapping chunks and analyzes each
#[derive(Debug, Clone, Copy)]
pub struct SectionAnalyzer {
    chunk_duration: f64,
    overlap: f64,
    parallel: bool,
}

impl Default for SectionAnalyzer {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl SectionAnalyzer {
    pub fn new(chunk_duration: f64, overlap: f64) -> Self {
        Self {
            chunk_duration,
            overlap,
            parallel: true,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            chunk_duration: config.chunk_duration,
            overlap: config.overlap,
            parallel: config.parallel,
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Chunk start offsets within `[start, end)`; no chunk reaches `end`.
    pub fn chunk_starts(start: usize, end: usize, chunk_len: usize, hop: usize) -> Vec<usize> {
        if chunk_len == 0 || hop == 0 || end <= start + chunk_len {
            return Vec::new();
        }
        (start..end - chunk_len).step_by(hop).collect()
    }

    /// Analyze one section of `buffer`
    pub fn analyze(&self, section: &Section, buffer: &AudioBuffer) -> Result<SectionDetail> {
        let start = buffer.seconds_to_samples(section.start_time).min(buffer.len());
        let end = buffer.seconds_to_samples(section.end_time).min(buffer.len());
        let chunk_len = buffer.seconds_to_samples(self.chunk_duration);
        let hop = buffer.seconds_to_samples(self.chunk_duration - self.overlap);

        let starts = Self::chunk_starts(start, end, chunk_len, hop);
        debug!(
            "Section '{}': {} chunk(s) between samples {} and {}",
            section.label,
            starts.len(),
            start,
            end
        );

        let chunks: Vec<Chunk> = if starts.is_empty() {
            Vec::new()
        } else {
            let analyzer = SpectralAnalyzer::new(buffer.sample_rate(), chunk_len);
            let chunk_at = |&chunk_start: &usize| analyze_chunk(&analyzer, buffer, chunk_start, chunk_len);

            if self.parallel {
                starts.par_iter().map(chunk_at).collect::<Result<Vec<Chunk>>>()?
            } else {
                starts.iter().map(chunk_at).collect::<Result<Vec<Chunk>>>()?
            }
        };

        let average = FrequencyAverages::from_chunks(&chunks);
        Ok(SectionDetail { chunks, average })
    }
}

fn analyze_chunk(
    analyzer: &SpectralAnalyzer,
    buffer: &AudioBuffer,
    start: usize,
    len: usize,
) -> Result<Chunk> {
    let left = analyzer.analyze(buffer.left(), start, start + len)?;
    let right = analyzer.analyze(buffer.right(), start, start + len)?;
    let binaural_beat = (left.dominant_frequency - right.dominant_frequency).abs();

    Ok(Chunk {
        time: buffer.time_for_sample(start),
        left_freq: left.dominant_frequency,
        right_freq: right.dominant_frequency,
        binaural_beat,
        wave_type: BrainwaveBand::from_beat(binaural_beat),
        amplitude: (left.rms_amplitude + right.rms_amplitude) / 2.0,
        left_top_freqs: left.top_peaks,
        right_top_freqs: right.top_peaks,
    })
}
