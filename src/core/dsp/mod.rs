//! Digital Signal Processing utilities
//!
//! - `fft` - planned real FFT with Hann windowing
//! - `filters` - Savitzky-Golay smoothing
//! - `peaks` - local maxima detection
//! - `stats` - RMS and means
//! - `windows` - window functions

pub mod fft;
pub mod filters;
pub mod peaks;
pub mod stats;
pub mod windows;

pub use fft::{bin_frequency, FftProcessor};
pub use filters::{odd_window_len, savgol_filter};
pub use peaks::find_peaks;
pub use stats::{mean, mean_by, rms};
pub use windows::hann;
