// src/core/resample.rs
//
// Optional sample-rate conversion applied after in-process decoding.

use log::debug;
use rubato::{FftFixedIn, Resampler};

use super::buffer::AudioBuffer;
use crate::error::{AnalyzerError, Result};

const CHUNK_FRAMES: usize = 1024;
const SUB_CHUNKS: usize = 2;

/// Resample both channels to `target_rate`.
///
/// The output length is `round(len * target / source)`; the resampler's
/// group delay is trimmed from the front.
pub fn resample(buffer: AudioBuffer, target_rate: u32) -> Result<AudioBuffer> {
    if target_rate == 0 {
        return Err(AnalyzerError::InvalidSampleRate(target_rate));
    }
    let source_rate = buffer.sample_rate();
    if source_rate == target_rate || buffer.is_empty() {
        return AudioBuffer::new(target_rate, buffer.left().to_vec(), buffer.right().to_vec());
    }

    let frames = buffer.len();
    let expected = (frames as f64 * target_rate as f64 / source_rate as f64).round() as usize;

    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        target_rate as usize,
        CHUNK_FRAMES,
        SUB_CHUNKS,
        2,
    )
    .map_err(|e| AnalyzerError::Resample(e.to_string()))?;

    let delay = resampler.output_delay();
    let (left, right) = buffer.into_channels();
    let mut out_left = Vec::with_capacity(expected + delay);
    let mut out_right = Vec::with_capacity(expected + delay);

    let mut pos = 0;
    loop {
        let needed = resampler.input_frames_next();
        if pos + needed > frames {
            break;
        }
        let input = [&left[pos..pos + needed], &right[pos..pos + needed]];
        let output = resampler
            .process(&input, None)
            .map_err(|e| AnalyzerError::Resample(e.to_string()))?;
        out_left.extend_from_slice(&output[0]);
        out_right.extend_from_slice(&output[1]);
        pos += needed;
    }

    if pos < frames {
        let input = [&left[pos..], &right[pos..]];
        let output = resampler
            .process_partial(Some(&input[..]), None)
            .map_err(|e| AnalyzerError::Resample(e.to_string()))?;
        out_left.extend_from_slice(&output[0]);
        out_right.extend_from_slice(&output[1]);
    }

    // Flush the delay line
    while out_left.len() < delay + expected {
        let output = resampler
            .process_partial(None::<&[Vec<f32>]>, None)
            .map_err(|e| AnalyzerError::Resample(e.to_string()))?;
        if output[0].is_empty() {
            break;
        }
        out_left.extend_from_slice(&output[0]);
        out_right.extend_from_slice(&output[1]);
    }

    let start = delay.min(out_left.len());
    let end = (delay + expected).min(out_left.len());

    debug!(
        "Resampled {} -> {} Hz: {} -> {} frames",
        source_rate,
        target_rate,
        frames,
        end - start
    );

    AudioBuffer::new(
        target_rate,
        out_left[start..end].to_vec(),
        out_right[start..end].to_vec(),
    )
}
