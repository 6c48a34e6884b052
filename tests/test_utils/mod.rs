// tests/test_utils/mod.rs
// Shared helpers for integration tests: temp files, WAV fixtures and the CLI binary.
#![allow(dead_code)]

use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use binaural_analyzer::testgen::{generate_binaural, write_wav, ToneSegment};
use binaural_analyzer::AudioBuffer;
use uuid::Uuid;

/// A path under the system temp dir, removed on drop
pub struct TempPath {
    path: PathBuf,
}

impl TempPath {
    pub fn new(extension: &str) -> Self {
        let name = format!("binaural-test-{}.{}", Uuid::new_v4(), extension);
        Self {
            path: std::env::temp_dir().join(name),
        }
    }

    pub fn dir() -> Self {
        let path = std::env::temp_dir().join(format!("binaural-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&path).expect("Failed to create temp dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempPath {
    fn drop(&mut self) {
        if self.path.is_dir() {
            let _ = std::fs::remove_dir_all(&self.path);
        } else {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Render `segments` and write them as a stereo WAV
pub fn write_binaural_wav(path: &Path, sample_rate: u32, segments: &[ToneSegment]) -> AudioBuffer {
    let buffer = generate_binaural(sample_rate, segments).expect("Failed to generate tones");
    write_wav(path, &buffer).expect("Failed to write WAV");
    buffer
}

/// Write a mono 16-bit sine WAV
pub fn write_mono_wav(path: &Path, sample_rate: u32, seconds: f64, freq: f64) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("Failed to create WAV");
    let total = (seconds * sample_rate as f64) as usize;
    for i in 0..total {
        let t = i as f64 / sample_rate as f64;
        let sample = (0.5 * (2.0 * PI * freq * t).sin() * i16::MAX as f64) as i16;
        writer.write_sample(sample).expect("Failed to write sample");
    }
    writer.finalize().expect("Failed to finalize WAV");
}

pub fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_binaural-analyzer"))
}

pub fn run_analyzer<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    Command::new(binary_path())
        .args(args)
        .output()
        .expect("Failed to execute binaural-analyzer")
}
