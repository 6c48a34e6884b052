//! Core analysis modules

pub mod analysis;
pub mod analyzer;
pub mod buffer;
pub mod decoder;
pub mod dsp;
pub mod resample;

pub use analysis::{
    BrainwaveBand, Chunk, FrequencyAverages, FrequencyPeak, Section, SectionDetail,
    SpectralAnalyzer, SpectralSample, TimelinePoint,
};
pub use analyzer::{analyze_buffer, AnalyzerBuilder, BinauralAnalyzer};
pub use buffer::AudioBuffer;
pub use decoder::{decode_audio, decode_with_ffmpeg, is_audio_file, load_audio, read_wav};
pub use resample::resample;
