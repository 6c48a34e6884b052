//! Window function implementations

use std::f64::consts::PI;

/// Symmetric Hann window, zero at both ends.
///
/// A single-point window is `[1.0]`.
pub fn hann(size: usize) -> Vec<f64> {
    match size {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let denom = (size - 1) as f64;
            (0..size)
                .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / denom).cos())
                .collect()
        }
    }
}
