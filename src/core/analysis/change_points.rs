// src/core/analysis/change_points.rs
//
// Section boundary detection on the coarse timeline.
//
// The beat and left-carrier series are smoothed, indices where a jump is
// followed by a sustained shift are flagged, and flags closer than 30 s to
// the previously kept boundary are dropped.

use log::debug;

use super::timeline::TimelinePoint;
use crate::core::dsp::{mean, odd_window_len, savgol_filter};

/// Minimum step between consecutive smoothed beat values (Hz)
pub const BEAT_JUMP_HZ: f64 = 2.0;
/// Minimum sustained beat shift (Hz)
pub const BEAT_SUSTAIN_HZ: f64 = 1.5;
/// Minimum step between consecutive smoothed carrier values (Hz)
pub const CARRIER_JUMP_HZ: f64 = 20.0;
/// Minimum sustained carrier shift (Hz)
pub const CARRIER_SUSTAIN_HZ: f64 = 15.0;
/// Boundaries closer than this to the previous kept boundary are dropped (s)
pub const MIN_SECTION_GAP_SECS: f64 = 30.0;

const SMOOTHING_MAX_WINDOW: usize = 11;
const SMOOTHING_POLYORDER: usize = 3;
/// Series of this many points or fewer are used raw
const SMOOTHING_MIN_POINTS: usize = 5;
/// Points averaged on each side of a candidate
const SUSTAIN_SPAN: usize = 3;

/// Finds section boundaries in a timeline
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangePointDetector;

impl ChangePointDetector {
    pub fn new() -> Self {
        Self
    }

    /// Boundary indices into `timeline`, always starting at 0 and ending at
    /// the last index. A single-point timeline yields `[0, 0]`; an empty one
    /// yields nothing.
    pub fn detect(&self, timeline: &[TimelinePoint]) -> Vec<usize> {
        if timeline.is_empty() {
            return Vec::new();
        }

        let beat: Vec<f64> = timeline.iter().map(|p| p.binaural_beat).collect();
        let carrier: Vec<f64> = timeline.iter().map(|p| p.left_freq).collect();
        let times: Vec<f64> = timeline.iter().map(|p| p.time).collect();

        let candidates = find_change_candidates(&smooth_series(&beat), &smooth_series(&carrier));
        debug!("Change point candidates: {:?}", candidates);

        let boundaries = merge_change_points(&candidates, &times);
        debug!("Section boundaries: {:?}", boundaries);
        boundaries
    }
}

/// Savitzky-Golay smoothing (cubic, window up to 11) for series longer than 5 points
pub fn smooth_series(series: &[f64]) -> Vec<f64> {
    if series.len() > SMOOTHING_MIN_POINTS {
        let window = odd_window_len(series.len(), SMOOTHING_MAX_WINDOW);
        savgol_filter(series, window, SMOOTHING_POLYORDER)
    } else {
        series.to_vec()
    }
}

/// Indices where a jump in the smoothed series is followed by a sustained shift.
///
/// The carrier series is only checked where the beat series did not jump.
pub fn find_change_candidates(beat: &[f64], carrier: &[f64]) -> Vec<usize> {
    let n = beat.len().min(carrier.len());
    let mut candidates = Vec::new();

    for i in 1..n {
        let has_room = i + 2 < n;

        if (beat[i] - beat[i - 1]).abs() > BEAT_JUMP_HZ {
            if has_room && sustained_shift(beat, i) > BEAT_SUSTAIN_HZ {
                candidates.push(i);
            }
        } else if (carrier[i] - carrier[i - 1]).abs() > CARRIER_JUMP_HZ
            && has_room
            && sustained_shift(carrier, i) > CARRIER_SUSTAIN_HZ
        {
            candidates.push(i);
        }
    }

    candidates
}

/// Difference between the mean of the next few points (from `i`) and the
/// previous few points (before `i`)
fn sustained_shift(series: &[f64], i: usize) -> f64 {
    let forward = mean(&series[i..(i + SUSTAIN_SPAN).min(series.len())]);
    let backward = mean(&series[i.saturating_sub(SUSTAIN_SPAN)..i]);
    (forward - backward).abs()
}

/// Seed with index 0, keep each interior candidate more than 30 s after the
/// last kept one, then close with the last index.
pub fn merge_change_points(candidates: &[usize], times: &[f64]) -> Vec<usize> {
    if times.is_empty() {
        return Vec::new();
    }

    let last = times.len() - 1;
    let mut kept = vec![0usize];

    for &cp in candidates {
        if cp == 0 || cp >= last {
            continue;
        }
        let prev = kept[kept.len() - 1];
        if times[cp] - times[prev] > MIN_SECTION_GAP_SECS {
            kept.push(cp);
        }
    }

    kept.push(last);
    kept
}
