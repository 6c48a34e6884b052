//! Output formatting for CLI results

use colorful::Colorful;

use crate::core::analysis::Chunk;
use crate::error::Result;
use crate::report::{AnalysisResult, SectionReport};

/// Format analysis result for terminal output, showing up to `max_chunks`
/// chunk rows per section
pub fn format_report(result: &AnalysisResult, max_chunks: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} {}\n", "File:".bold(), result.source.as_str().cyan()));
    output.push_str(&format!(
        "  Duration: {:.2}s ({:.1} min)\n",
        result.duration,
        result.duration / 60.0
    ));
    output.push_str(&format!("  Sample rate: {} Hz\n", result.sample_rate));
    output.push_str(&format!("  Sections: {}\n", result.sections.len()));

    for section in &result.sections {
        output.push('\n');
        output.push_str(&format_section(section, max_chunks));
    }

    output
}

fn format_section(section: &SectionReport, max_chunks: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "  {} {:.1}s - {:.1}s ({:.1}s)\n",
        section.label.to_uppercase().as_str().green().bold(),
        section.start_time,
        section.end_time,
        section.duration
    ));
    output.push_str(&format!(
        "    Average: left {:.2} Hz | right {:.2} Hz | beat {:.2} Hz\n",
        section.average.left_freq, section.average.right_freq, section.average.binaural_beat
    ));

    if section.chunks.is_empty() {
        output.push_str(&format!("    {}\n", "(section shorter than one chunk)".dim()));
        return output;
    }

    output.push_str(&format!(
        "    {}\n",
        format!(
            "{:>8}  {:>10}  {:>10}  {:>8}  {:<6}  {:>9}",
            "Time", "Left Hz", "Right Hz", "Beat Hz", "Wave", "Amplitude"
        )
        .as_str()
        .dim()
    ));

    for chunk in section.chunks.iter().take(max_chunks) {
        output.push_str(&format_chunk(chunk));
    }

    let hidden = section.chunks.len().saturating_sub(max_chunks);
    if hidden > 0 {
        output.push_str(&format!("    ... ({} more chunks)\n", hidden));
    }

    output
}

fn format_chunk(chunk: &Chunk) -> String {
    format!(
        "    {:>7.1}s  {:>10.2}  {:>10.2}  {:>8.2}  {:<6}  {:>9.4}\n",
        chunk.time,
        chunk.left_freq,
        chunk.right_freq,
        chunk.binaural_beat,
        chunk.wave_type.to_string(),
        chunk.amplitude
    )
}

/// Print the text report to stdout
pub fn print_report(result: &AnalysisResult, max_chunks: usize) {
    print!("{}", format_report(result, max_chunks));
}

/// Format analysis result as JSON
pub fn format_json(result: &AnalysisResult) -> Result<String> {
    Ok(result.to_json()?)
}

/// Format a summary for multiple files
pub fn format_summary(results: &[AnalysisResult], failed: usize) -> String {
    let mut output = String::new();

    let sections: usize = results.iter().map(|r| r.sections.len()).sum();
    let minutes: f64 = results.iter().map(|r| r.duration).sum::<f64>() / 60.0;

    output.push_str(&format!("\n{}\n", "Summary:".bold()));
    output.push_str(&format!(
        "  {} file(s) analyzed, {:.1} min of audio\n",
        results.len(),
        minutes
    ));
    output.push_str(&format!("  {} section(s) detected\n", sections));
    if failed > 0 {
        output.push_str(&format!("  {}\n", format!("✗ {} failed", failed).as_str().red()));
    }

    output
}
