// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use colorful::Colorful;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

use binaural_analyzer::cli::{format_json, format_summary, print_report, Args};
use binaural_analyzer::core::decoder::is_audio_file;
use binaural_analyzer::testgen::write_demo;
use binaural_analyzer::{AnalysisConfig, AnalysisResult, AnalyzerError, BinauralAnalyzer};

const DEMO_SAMPLE_RATE: u32 = 44100;

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("{} {:#}", "Error:".red(), e);
        let input_error = e
            .downcast_ref::<AnalyzerError>()
            .map(|err| err.is_input_error())
            .unwrap_or(false);
        std::process::exit(if input_error { 2 } else { 1 });
    }
}

fn run(args: &Args) -> Result<()> {
    if let Some(path) = &args.generate_demo {
        let buffer = write_demo(path, DEMO_SAMPLE_RATE)
            .with_context(|| format!("Failed to write demo to {}", path.display()))?;
        println!(
            "Demo written to {} ({:.0}s, {} Hz)",
            path.display().to_string().cyan(),
            buffer.duration(),
            buffer.sample_rate()
        );
        return Ok(());
    }

    let input = args
        .input
        .as_deref()
        .context("No input file or directory given")?;
    let config = args.to_config().context("Invalid configuration")?;

    if input.is_dir() {
        run_directory(input, &config, args)
    } else {
        let result = analyze_file(input, &config)?;
        emit(&result, args.output.as_deref(), args)
    }
}

fn run_directory(dir: &Path, config: &AnalysisConfig, args: &Args) -> Result<()> {
    let audio_files = collect_audio_files(dir);

    if audio_files.is_empty() {
        println!("{}", "No audio files found!".red());
        return Ok(());
    }

    if let Some(out_dir) = &args.output {
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    }

    eprintln!("Found {} audio file(s)\n", audio_files.len());

    let mut results = Vec::new();
    let mut failed = 0;

    for file_path in &audio_files {
        match analyze_file(file_path, config) {
            Ok(result) => {
                let output = args.output.as_ref().map(|dir| json_path_for(dir, file_path));
                emit(&result, output.as_deref(), args)?;
                results.push(result);
            }
            Err(e) => {
                eprintln!("{} {}: {:#}", "✗".red(), file_path.display(), e);
                failed += 1;
            }
        }
    }

    if !args.json {
        print!("{}", format_summary(&results, failed));
    }

    Ok(())
}

fn collect_audio_files(path: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_audio_file(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

fn json_path_for(out_dir: &Path, file_path: &Path) -> PathBuf {
    let stem = file_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "analysis".to_string());
    out_dir.join(format!("{}.json", stem))
}

fn analyze_file(file_path: &Path, config: &AnalysisConfig) -> Result<AnalysisResult> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Decoding {}", file_path.display()));

    let outcome = BinauralAnalyzer::with_config(file_path, config.clone()).and_then(|analyzer| {
        spinner.set_message(format!("Analyzing {}", file_path.display()));
        analyzer.analyze()
    });
    spinner.finish_and_clear();

    outcome.with_context(|| format!("Failed to analyze {}", file_path.display()))
}

fn emit(result: &AnalysisResult, output: Option<&Path>, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", format_json(result)?);
    } else {
        print_report(result, args.max_chunks);
        println!();
    }

    if let Some(path) = output {
        std::fs::write(path, format_json(result)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        if !args.json {
            println!("  Results saved to: {}", path.display().to_string().green());
        }
    }

    Ok(())
}
