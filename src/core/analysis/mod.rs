//! Binaural analysis pipeline stages
//!
//! - `spectral` - dominant carrier and peaks of one channel segment
//! - `timeline` - coarse 10 s / 5 s frequency timeline
//! - `change_points` - smoothing, change detection and boundary merging
//! - `sections` - section averages and labels
//! - `chunks` - per-section chunk analysis
//! - `bands` - brainwave band classification shared by sections and chunks

pub mod bands;
pub mod change_points;
pub mod chunks;
pub mod sections;
pub mod spectral;
pub mod timeline;

pub use bands::{BrainwaveBand, LabelCase};
pub use change_points::{
    find_change_candidates, merge_change_points, smooth_series, ChangePointDetector,
};
pub use chunks::{Chunk, FrequencyAverages, SectionAnalyzer, SectionDetail};
pub use sections::{section_label, Section, SectionClassifier, FULL_SECTION_LABEL};
pub use spectral::{FrequencyPeak, SpectralAnalyzer, SpectralSample};
pub use timeline::{TimelineBuilder, TimelinePoint, TIMELINE_HOP_SECS, TIMELINE_WINDOW_SECS};
