// src/testgen/mod.rs
//
// Synthetic binaural test signal generation.
// Builds stereo buffers from a program of constant-tone segments and writes
// them as 16-bit PCM WAV files for decoder tests and demos.

use std::f64::consts::PI;
use std::path::Path;

use crate::core::buffer::AudioBuffer;
use crate::error::Result;

/// One constant-tone stretch of a binaural program
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSegment {
    /// Length in seconds
    pub duration_secs: f64,
    /// Left carrier (Hz)
    pub left_hz: f64,
    /// Right carrier (Hz)
    pub right_hz: f64,
    /// Peak amplitude of each channel (0.0-1.0)
    pub amplitude: f32,
}

impl ToneSegment {
    pub fn new(duration_secs: f64, left_hz: f64, right_hz: f64) -> Self {
        Self {
            duration_secs,
            left_hz,
            right_hz,
            amplitude: 0.5,
        }
    }

    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Binaural beat produced by this segment
    pub fn beat(&self) -> f64 {
        (self.left_hz - self.right_hz).abs()
    }
}

/// Render a program of tone segments into a stereo buffer.
///
/// Phase is continuous across segment boundaries on each channel.
pub fn generate_binaural(sample_rate: u32, segments: &[ToneSegment]) -> Result<AudioBuffer> {
    let sr = sample_rate as f64;
    let total: usize = segments
        .iter()
        .map(|s| (s.duration_secs * sr).round() as usize)
        .sum();

    let mut left = Vec::with_capacity(total);
    let mut right = Vec::with_capacity(total);
    let mut left_phase = 0.0f64;
    let mut right_phase = 0.0f64;

    for segment in segments {
        let frames = (segment.duration_secs * sr).round() as usize;
        let amplitude = segment.amplitude as f64;
        let left_step = 2.0 * PI * segment.left_hz / sr;
        let right_step = 2.0 * PI * segment.right_hz / sr;

        for n in 0..frames {
            let n = n as f64;
            left.push((amplitude * (left_phase + left_step * n).sin()) as f32);
            right.push((amplitude * (right_phase + right_step * n).sin()) as f32);
        }

        left_phase = (left_phase + left_step * frames as f64) % (2.0 * PI);
        right_phase = (right_phase + right_step * frames as f64) % (2.0 * PI);
    }

    AudioBuffer::new(sample_rate, left, right)
}

/// Write a buffer as a 16-bit stereo WAV file
pub fn write_wav<P: AsRef<Path>>(path: P, buffer: &AudioBuffer) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for (&l, &r) in buffer.left().iter().zip(buffer.right().iter()) {
        writer.write_sample(to_pcm16(l))?;
        writer.write_sample(to_pcm16(r))?;
    }
    writer.finalize()?;
    Ok(())
}

fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}

/// A short guided-session style program: quiet delta intro, theta, alpha and
/// beta stretches on rising carriers, quiet delta outro.
///
/// Every transition moves the carrier by 150 Hz so it survives smoothing.
pub fn demo_program() -> Vec<ToneSegment> {
    vec![
        ToneSegment::new(60.0, 150.0, 153.0).with_amplitude(0.1),
        ToneSegment::new(180.0, 300.0, 306.0),
        ToneSegment::new(180.0, 450.0, 460.0),
        ToneSegment::new(120.0, 600.0, 618.0),
        ToneSegment::new(60.0, 450.0, 453.0).with_amplitude(0.1),
    ]
}

/// Render `demo_program` and write it to `path`
pub fn write_demo<P: AsRef<Path>>(path: P, sample_rate: u32) -> Result<AudioBuffer> {
    let buffer = generate_binaural(sample_rate, &demo_program())?;
    write_wav(path, &buffer)?;
    Ok(buffer)
}
