// src/core/analyzer.rs
//
// High-level binaural analysis API with builder pattern.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::analysis::{
    ChangePointDetector, Section, SectionAnalyzer, SectionClassifier, TimelineBuilder,
};
use super::buffer::AudioBuffer;
use super::decoder::load_audio;
use crate::config::{AnalysisConfig, DecoderBackend};
use crate::error::Result;
use crate::report::{AnalysisResult, SectionReport};

/// Builder for BinauralAnalyzer configuration
pub struct AnalyzerBuilder {
    config: AnalysisConfig,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn chunk_duration(mut self, seconds: f64) -> Self {
        self.config.chunk_duration = seconds;
        self
    }

    pub fn overlap(mut self, seconds: f64) -> Self {
        self.config.overlap = seconds;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    pub fn target_sample_rate(mut self, rate: Option<u32>) -> Self {
        self.config.target_sample_rate = rate;
        self
    }

    pub fn decoder(mut self, decoder: DecoderBackend) -> Self {
        self.config.decoder = decoder;
        self
    }

    /// Validate the configuration, then decode `path`
    pub fn build<P: AsRef<Path>>(self, path: P) -> Result<BinauralAnalyzer> {
        BinauralAnalyzer::with_config(path, self.config)
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A decoded recording ready for analysis
pub struct BinauralAnalyzer {
    path: PathBuf,
    audio: AudioBuffer,
    config: AnalysisConfig,
}

impl BinauralAnalyzer {
    /// Create analyzer with default configuration
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        AnalyzerBuilder::new().build(path)
    }

    /// Create analyzer with custom configuration
    pub fn with_config<P: AsRef<Path>>(path: P, config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let audio = load_audio(path.as_ref(), &config)?;
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            audio,
            config,
        })
    }

    /// Create a builder for custom configuration
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Run the full pipeline
    pub fn analyze(&self) -> Result<AnalysisResult> {
        analyze_buffer(self.path.display().to_string(), &self.audio, &self.config)
    }

    /// Get decoded audio
    pub fn audio_data(&self) -> &AudioBuffer {
        &self.audio
    }

    /// Get file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}

/// Segment `buffer` into labeled sections and analyze each one in chunks.
///
/// `source` is only used to name the result.
pub fn analyze_buffer(
    source: impl Into<String>,
    buffer: &AudioBuffer,
    config: &AnalysisConfig,
) -> Result<AnalysisResult> {
    config.validate()?;

    let duration = buffer.duration();
    let mut result = AnalysisResult::new(source, duration, buffer.sample_rate());

    info!("Building frequency timeline ({:.1}s of audio)", duration);
    let timeline = TimelineBuilder::new(config.parallel).build(buffer)?;

    let sections = if timeline.is_empty() {
        warn!(
            "Audio shorter than one analysis window ({:.1}s), reporting a single section",
            duration
        );
        vec![Section::full(duration)]
    } else {
        info!("Detecting change points over {} timeline points", timeline.len());
        let boundaries = ChangePointDetector::new().detect(&timeline);
        for &idx in &boundaries {
            debug!("Boundary at index {} ({:.1}s)", idx, timeline[idx].time);
        }
        SectionClassifier::new().classify(&boundaries, &timeline, duration)
    };

    info!("Analyzing {} section(s)", sections.len());
    let section_analyzer = SectionAnalyzer::from_config(config);

    for section in &sections {
        let detail = section_analyzer.analyze(section, buffer)?;
        debug!(
            "Section {}: {:.1}s-{:.1}s, {} chunks, avg beat {:.2} Hz",
            section.label,
            section.start_time,
            section.end_time,
            detail.chunks.len(),
            detail.average.binaural_beat
        );
        result.push_section(SectionReport::new(section, detail));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::FULL_SECTION_LABEL;
    use crate::error::AnalyzerError;
    use crate::testgen::{generate_binaural, ToneSegment};

    #[test]
    fn test_short_buffer_falls_back_to_full_section() {
        let buffer = generate_binaural(4000, &[ToneSegment::new(5.0, 200.0, 210.0)]).unwrap();
        let result = analyze_buffer("short", &buffer, &AnalysisConfig::default()).unwrap();

        assert_eq!(result.sections.len(), 1);
        let section = &result.sections[0];
        assert_eq!(section.label, FULL_SECTION_LABEL);
        assert_eq!(section.start_time, 0.0);
        assert!((section.end_time - 5.0).abs() < 1e-9);
        assert!(section.chunks.is_empty());
        assert_eq!(section.average.binaural_beat, 0.0);
    }

    #[test]
    fn test_invalid_config_rejected_before_analysis() {
        let buffer = generate_binaural(4000, &[ToneSegment::new(5.0, 200.0, 210.0)]).unwrap();
        let config = AnalysisConfig {
            overlap: 30.0,
            ..AnalysisConfig::default()
        };
        let err = analyze_buffer("bad", &buffer, &config).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidConfig { .. }));
    }

    #[test]
    fn test_steady_tone_single_section() {
        let buffer = generate_binaural(4000, &[ToneSegment::new(120.0, 200.0, 210.0)]).unwrap();
        let result = analyze_buffer("steady", &buffer, &AnalysisConfig::default()).unwrap();

        assert_eq!(result.sections.len(), 1);
        assert_eq!(result.sections[0].label, "section_1_alpha");
        assert!((result.sections[0].average.binaural_beat - 10.0).abs() < 0.5);
        assert_eq!(result.source, "steady");
        assert_eq!(result.sample_rate, 4000);
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let err = BinauralAnalyzer::builder()
            .chunk_duration(0.0)
            .build("/unused/path.wav")
            .err()
            .unwrap();
        assert!(matches!(err, AnalyzerError::InvalidConfig { .. }));
    }
}
