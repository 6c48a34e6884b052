// src/core/decoder.rs
//
// Audio decoding into an immutable stereo AudioBuffer.
// Uses Symphonia for format-agnostic decoding, or an external ffmpeg process
// that converts to a temporary 16-bit WAV which is then read with hound.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::buffer::AudioBuffer;
use super::resample::resample;
use crate::config::{AnalysisConfig, DecoderBackend};
use crate::error::{AnalyzerError, Result};

/// File extensions picked up when scanning directories
pub const AUDIO_EXTENSIONS: [&str; 8] = ["flac", "wav", "mp3", "ogg", "m4a", "aac", "aiff", "aif"];

/// Decode `path` with the configured backend, resampling if requested
pub fn load_audio(path: &Path, config: &AnalysisConfig) -> Result<AudioBuffer> {
    let buffer = match config.decoder {
        DecoderBackend::Symphonia => {
            let buffer = decode_audio(path)?;
            match config.target_sample_rate {
                Some(rate) if rate != buffer.sample_rate() => resample(buffer, rate)?,
                _ => buffer,
            }
        }
        // ffmpeg resamples during conversion
        DecoderBackend::Ffmpeg => decode_with_ffmpeg(path, config.target_sample_rate)?,
    };

    info!(
        "Loaded {}: {:.1}s, {} Hz, stereo",
        path.display(),
        buffer.duration(),
        buffer.sample_rate()
    );
    Ok(buffer)
}

/// Decode an audio file in-process with symphonia
pub fn decode_audio(path: &Path) -> Result<AudioBuffer> {
    let file = File::open(path)
        .map_err(|e| AnalyzerError::decode(path, format!("Failed to open file: {}", e)))?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let mut probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| AnalyzerError::decode(path, format!("Unsupported or corrupt format: {}", e)))?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AnalyzerError::decode(path, "No supported audio track found"))?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| AnalyzerError::decode(path, "File does not specify sample rate"))?;

    if let Some(channels) = track.codec_params.channels.map(|c| c.count()) {
        if channels != 2 {
            return Err(AnalyzerError::InvalidChannelLayout { channels });
        }
    }

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| AnalyzerError::decode(path, format!("Failed to create decoder: {}", e)))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut channels = 0usize;

    loop {
        let packet = match probed.format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(AnalyzerError::decode(path, e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(buf) => buf,
            Err(SymphoniaError::DecodeError(msg)) => {
                debug!("Skipping undecodable packet in {}: {}", path.display(), msg);
                continue;
            }
            Err(e) => return Err(AnalyzerError::decode(path, e.to_string())),
        };

        if sample_buf.is_none() {
            let spec = *decoded.spec();
            channels = spec.channels.count();
            if channels != 2 {
                return Err(AnalyzerError::InvalidChannelLayout { channels });
            }
            sample_buf = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
        }

        if let Some(ref mut buf) = sample_buf {
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }
    }

    if samples.is_empty() {
        return Err(AnalyzerError::decode(path, "No audio samples decoded from file"));
    }

    AudioBuffer::from_interleaved(&samples, channels, sample_rate)
}

/// Convert through an external `ffmpeg` binary to 16-bit PCM WAV, then read it.
///
/// `sample_rate` asks ffmpeg to resample; otherwise the source rate is kept.
pub fn decode_with_ffmpeg(path: &Path, sample_rate: Option<u32>) -> Result<AudioBuffer> {
    let temp = TempWav::new();

    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-v", "error", "-nostdin", "-i"])
        .arg(path)
        .args(["-acodec", "pcm_s16le"]);
    if let Some(rate) = sample_rate {
        cmd.arg("-ar").arg(rate.to_string());
    }
    cmd.arg("-y").arg(temp.path());

    debug!("Running {:?}", cmd);

    let output = cmd
        .output()
        .map_err(|e| AnalyzerError::decode(path, format!("Failed to run ffmpeg: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AnalyzerError::decode(
            path,
            format!("FFmpeg conversion failed: {}", stderr.trim()),
        ));
    }

    read_wav(temp.path()).map_err(|e| match e {
        AnalyzerError::InvalidChannelLayout { .. } => e,
        other => AnalyzerError::decode(path, other.to_string()),
    })
}

/// Read a PCM WAV file with hound
pub fn read_wav(path: &Path) -> Result<AudioBuffer> {
    let reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    if channels != 2 {
        return Err(AnalyzerError::InvalidChannelLayout { channels });
    }

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    AudioBuffer::from_interleaved(&samples, channels, spec.sample_rate)
}

/// Whether `path` has one of the supported audio extensions
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| AUDIO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Temporary WAV path, removed on drop
struct TempWav {
    path: PathBuf,
}

impl TempWav {
    fn new() -> Self {
        Self {
            path: std::env::temp_dir().join(format!("binaural-{}.wav", uuid::Uuid::new_v4())),
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempWav {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
