//! Assembled output of one analysis run

use serde::Serialize;

use crate::core::analysis::{Chunk, FrequencyAverages, Section, SectionDetail};

/// Per-section output: time range, chunk detail and chunk averages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionReport {
    pub label: String,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    pub chunks: Vec<Chunk>,
    pub average: FrequencyAverages,
}

impl SectionReport {
    pub fn new(section: &Section, detail: SectionDetail) -> Self {
        Self {
            label: section.label.clone(),
            start_time: section.start_time,
            end_time: section.end_time,
            duration: section.duration,
            chunks: detail.chunks,
            average: detail.average,
        }
    }
}

/// Complete analysis result for one recording
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Source identifier, usually the file path
    #[serde(rename = "file")]
    pub source: String,
    /// Duration in seconds
    pub duration: f64,
    pub sample_rate: u32,
    pub sections: Vec<SectionReport>,
}

impl AnalysisResult {
    pub fn new(source: impl Into<String>, duration: f64, sample_rate: u32) -> Self {
        Self {
            source: source.into(),
            duration,
            sample_rate,
            sections: Vec::new(),
        }
    }

    pub fn push_section(&mut self, section: SectionReport) {
        self.sections.push(section);
    }

    pub fn total_chunks(&self) -> usize {
        self.sections.iter().map(|s| s.chunks.len()).sum()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.label.as_str())
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> AnalysisResult {
        let section = Section::full(8.0);
        let mut result = AnalysisResult::new("demo.wav", 8.0, 44100);
        result.push_section(SectionReport::new(
            &section,
            SectionDetail {
                chunks: Vec::new(),
                average: FrequencyAverages::default(),
            },
        ));
        result
    }

    #[test]
    fn test_json_shape() {
        let json = sample_result().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["file"], "demo.wav");
        assert_eq!(value["sample_rate"], 44100);
        assert_eq!(value["sections"][0]["label"], "full");
        assert_eq!(value["sections"][0]["end_time"], 8.0);
        assert_eq!(value["sections"][0]["average"]["binaural_beat"], 0.0);
        assert!(value["sections"][0]["chunks"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_helpers() {
        let result = sample_result();
        assert_eq!(result.total_chunks(), 0);
        assert_eq!(result.labels().collect::<Vec<_>>(), vec!["full"]);
    }
}
