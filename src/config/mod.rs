//! Configuration module for the binaural analyzer

mod analysis;

pub use analysis::{AnalysisConfig, DecoderBackend, DEFAULT_CHUNK_DURATION, DEFAULT_OVERLAP};
