// src/core/analysis/sections.rs
//
// Turns boundary indices into labeled sections with timeline averages.

use serde::Serialize;

use super::bands::{BrainwaveBand, LabelCase};
use super::timeline::TimelinePoint;
use crate::core::dsp::mean_by;

/// A first or last section quieter than this fraction of the global mean
/// amplitude is labeled intro/outro
pub const QUIET_SECTION_RATIO: f64 = 0.7;

/// Label used when the recording is too short for a timeline
pub const FULL_SECTION_LABEL: &str = "full";

/// A contiguous stretch of the recording with stable beat characteristics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub label: String,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    pub avg_binaural_beat: f64,
    pub avg_left_freq: f64,
    pub avg_amplitude: f64,
}

impl Section {
    /// Single section spanning the whole recording, with zeroed averages
    pub fn full(duration: f64) -> Self {
        Self {
            label: FULL_SECTION_LABEL.to_string(),
            start_time: 0.0,
            end_time: duration,
            duration,
            avg_binaural_beat: 0.0,
            avg_left_freq: 0.0,
            avg_amplitude: 0.0,
        }
    }
}

/// Labels sections from timeline boundaries
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionClassifier;

impl SectionClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Build one section per adjacent pair of `boundaries`.
    ///
    /// Averages include both boundary points. The last section is stretched
    /// to `total_duration` so the sections cover the whole recording.
    pub fn classify(
        &self,
        boundaries: &[usize],
        timeline: &[TimelinePoint],
        total_duration: f64,
    ) -> Vec<Section> {
        if timeline.is_empty() || boundaries.len() < 2 {
            return vec![Section::full(total_duration)];
        }

        let global_amplitude = mean_by(timeline, |p| p.amplitude);
        let count = boundaries.len() - 1;

        boundaries
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                let (start_idx, end_idx) = (pair[0], pair[1].min(timeline.len() - 1));
                let points = &timeline[start_idx..=end_idx];

                let avg_binaural_beat = mean_by(points, |p| p.binaural_beat);
                let avg_left_freq = mean_by(points, |p| p.left_freq);
                let avg_amplitude = mean_by(points, |p| p.amplitude);

                let start_time = timeline[start_idx].time;
                let end_time = if i + 1 == count {
                    total_duration
                } else {
                    timeline[end_idx].time
                };

                Section {
                    label: section_label(i, count, avg_amplitude, global_amplitude, avg_binaural_beat),
                    start_time,
                    end_time,
                    duration: end_time - start_time,
                    avg_binaural_beat,
                    avg_left_freq,
                    avg_amplitude,
                }
            })
            .collect()
    }
}

/// Label for section `index` (0-based) of `count`.
///
/// Quiet first sections are "intro", quiet last sections "outro" (intro wins
/// when both apply); everything else is `section_<n>_<band>`.
pub fn section_label(
    index: usize,
    count: usize,
    avg_amplitude: f64,
    global_amplitude: f64,
    avg_beat: f64,
) -> String {
    let quiet = avg_amplitude < global_amplitude * QUIET_SECTION_RATIO;

    if index == 0 && quiet {
        "intro".to_string()
    } else if index + 1 == count && quiet {
        "outro".to_string()
    } else {
        format!(
            "section_{}_{}",
            index + 1,
            BrainwaveBand::from_beat(avg_beat).name(LabelCase::Lower)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(time: f64, beat: f64, amplitude: f64) -> TimelinePoint {
        TimelinePoint {
            time,
            left_freq: 200.0,
            right_freq: 200.0 + beat,
            binaural_beat: beat,
            amplitude,
        }
    }

    #[test]
    fn test_band_labels() {
        assert_eq!(section_label(1, 3, 1.0, 1.0, 4.0), "section_2_theta");
        assert_eq!(section_label(0, 1, 1.0, 1.0, 2.5), "section_1_delta");
        assert_eq!(section_label(2, 4, 1.0, 1.0, 10.0), "section_3_alpha");
        assert_eq!(section_label(0, 2, 1.0, 1.0, 18.0), "section_1_beta");
        assert_eq!(section_label(1, 2, 1.0, 1.0, 40.0), "section_2_gamma");
    }

    #[test]
    fn test_intro_outro() {
        assert_eq!(section_label(0, 3, 0.1, 1.0, 10.0), "intro");
        assert_eq!(section_label(2, 3, 0.1, 1.0, 10.0), "outro");
        assert_eq!(section_label(1, 3, 0.1, 1.0, 10.0), "section_2_alpha");
        // Exactly 70% is not quiet
        assert_eq!(section_label(0, 3, 0.7, 1.0, 10.0), "section_1_alpha");
    }

    #[test]
    fn test_single_quiet_section_is_intro() {
        assert_eq!(section_label(0, 1, 0.1, 1.0, 10.0), "intro");
    }

    #[test]
    fn test_sections_partition_duration() {
        let timeline: Vec<TimelinePoint> = (0..20)
            .map(|i| point(i as f64 * 5.0, if i < 10 { 5.0 } else { 20.0 }, 0.5))
            .collect();
        let sections = SectionClassifier::new().classify(&[0, 9, 19], &timeline, 105.0);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].start_time, 0.0);
        assert_eq!(sections[0].end_time, sections[1].start_time);
        assert_eq!(sections[1].end_time, 105.0);
        assert_eq!(sections[0].label, "section_1_theta");
        assert!(sections[1].label.ends_with("beta"));
        for s in &sections {
            assert!((s.duration - (s.end_time - s.start_time)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_averages_include_both_boundaries() {
        let timeline = vec![point(0.0, 2.0, 0.5), point(5.0, 4.0, 0.5), point(10.0, 9.0, 0.5)];
        let sections = SectionClassifier::new().classify(&[0, 1, 2], &timeline, 20.0);
        assert!((sections[0].avg_binaural_beat - 3.0).abs() < 1e-12);
        assert!((sections[1].avg_binaural_beat - 6.5).abs() < 1e-12);
    }

    #[test]
    fn test_quiet_intro_uses_global_mean() {
        let mut timeline: Vec<TimelinePoint> = (0..30).map(|i| point(i as f64 * 5.0, 6.0, 1.0)).collect();
        for p in timeline.iter_mut().take(8) {
            p.amplitude = 0.1;
        }
        let sections = SectionClassifier::new().classify(&[0, 8, 29], &timeline, 150.0);
        assert_eq!(sections[0].label, "intro");
        assert_eq!(sections[1].label, "section_2_theta");
    }

    #[test]
    fn test_empty_timeline_falls_back_to_full() {
        let sections = SectionClassifier::new().classify(&[], &[], 8.5);
        assert_eq!(sections, vec![Section::full(8.5)]);
        assert_eq!(sections[0].label, FULL_SECTION_LABEL);
    }

    #[test]
    fn test_single_point_timeline() {
        let timeline = vec![point(0.0, 5.0, 0.4)];
        let sections = SectionClassifier::new().classify(&[0, 0], &timeline, 12.0);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].end_time, 12.0);
        assert_eq!(sections[0].label, "section_1_theta");
    }
}
