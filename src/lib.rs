//! Binaural Analyzer - Recover binaural beat structure from stereo recordings
//!
//! Estimates the dominant carrier tone of each channel over time, derives the
//! binaural beat (`|left - right|`), splits the recording into sections where
//! beat and carrier are stable, and labels each section by brainwave band.
//!
//! ## Pipeline
//!
//! 1. **Timeline**: 10 s windows every 5 s, Hann-windowed FFT per channel,
//!    dominant peak within 50-1000 Hz
//! 2. **Change points**: Savitzky-Golay smoothing of beat and left carrier,
//!    sustained jumps only, boundaries at least 30 s apart
//! 3. **Sections**: averages per section, quiet first/last sections become
//!    intro/outro, the rest `section_<n>_<band>`
//! 4. **Chunks**: each section re-analyzed in overlapping chunks
//!    (30 s / 15 s overlap by default)
//!
//! ## Module Structure
//!
//! - `core` - Decoding, DSP and the analysis pipeline
//! - `cli` - Command-line arguments and report rendering
//! - `config` - Analysis configuration
//! - `report` - Serializable analysis results
//! - `testgen` - Synthetic binaural signal generation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use binaural_analyzer::BinauralAnalyzer;
//!
//! let analyzer = BinauralAnalyzer::builder()
//!     .chunk_duration(20.0)
//!     .overlap(10.0)
//!     .build("session.flac")?;
//! let result = analyzer.analyze()?;
//!
//! for section in &result.sections {
//!     println!("{}: {:.1} Hz beat", section.label, section.average.binaural_beat);
//! }
//! ```
//!
//! ## Brainwave Bands
//!
//! | Band  | Beat (Hz)   |
//! |-------|-------------|
//! | Delta | < 4         |
//! | Theta | 4 to < 8    |
//! | Alpha | 8 to < 12   |
//! | Beta  | 12 to < 30  |
//! | Gamma | >= 30       |

// Core analysis functionality
pub mod core;

// Command-line interface
pub mod cli;

// Analysis configuration
pub mod config;

// Error types
pub mod error;

// Analysis result types
pub mod report;

// Synthetic test signals
pub mod testgen;

// Re-export commonly used types at crate root for convenience
pub use config::{AnalysisConfig, DecoderBackend};
pub use self::core::{
    analyze_buffer, AnalyzerBuilder, AudioBuffer, BinauralAnalyzer, BrainwaveBand, Chunk,
    FrequencyAverages, Section, TimelinePoint,
};
pub use error::{AnalyzerError, Result};
pub use report::{AnalysisResult, SectionReport};
