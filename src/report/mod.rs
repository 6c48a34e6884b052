//! Analysis result types

mod result;

pub use result::{AnalysisResult, SectionReport};
