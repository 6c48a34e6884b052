// src/cli/mod.rs
//
// Command-line interface module

mod args;
mod output;

pub use args::{Args, DEFAULT_MAX_CHUNKS};
pub use output::{format_json, format_report, format_summary, print_report};
