//! CLI argument parsing

use std::path::PathBuf;

use clap::Parser;

use crate::config::{AnalysisConfig, DecoderBackend};
use crate::error::Result;

/// Default number of chunk rows printed per section
pub const DEFAULT_MAX_CHUNKS: usize = 10;

#[derive(Parser, Debug, Clone)]
#[command(name = "binaural-analyzer", version)]
#[command(about = "Recover binaural carrier tones and segment recordings by brainwave band")]
pub struct Args {
    /// Input audio file or directory
    #[arg(required_unless_present = "generate_demo")]
    pub input: Option<PathBuf>,

    /// Write JSON results here (a directory when INPUT is a directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Chunk length in seconds for per-section analysis
    #[arg(short, long)]
    pub chunk_duration: Option<f64>,

    /// Overlap between consecutive chunks in seconds
    #[arg(long)]
    pub overlap: Option<f64>,

    /// JSON configuration file; flags override its values
    #[arg(long, env = "BINAURAL_ANALYZER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Resample decoded audio to this rate (Hz) before analysis
    #[arg(long, value_name = "HZ")]
    pub resample: Option<u32>,

    /// Decode through an external ffmpeg process
    #[arg(long)]
    pub ffmpeg: bool,

    /// Disable parallel window and chunk analysis
    #[arg(long)]
    pub sequential: bool,

    /// Print JSON to stdout instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Chunk rows shown per section in the text report
    #[arg(long, default_value_t = DEFAULT_MAX_CHUNKS)]
    pub max_chunks: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write a synthetic binaural demo WAV to PATH and exit
    #[arg(long, value_name = "PATH")]
    pub generate_demo: Option<PathBuf>,
}

impl Args {
    /// Merge the optional config file with command-line overrides, then validate
    pub fn to_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(chunk) = self.chunk_duration {
            config.chunk_duration = chunk;
        }
        if let Some(overlap) = self.overlap {
            config.overlap = overlap;
        }
        if let Some(rate) = self.resample {
            config.target_sample_rate = Some(rate);
        }
        if self.ffmpeg {
            config.decoder = DecoderBackend::Ffmpeg;
        }
        if self.sequential {
            config.parallel = false;
        }

        config.validate()?;
        Ok(config)
    }

    /// Log filter matching the number of `-v` flags
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzerError;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("binaural-analyzer").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["session.flac"]);
        assert_eq!(args.max_chunks, DEFAULT_MAX_CHUNKS);
        assert_eq!(args.log_level(), log::LevelFilter::Warn);

        let config = args.to_config().unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&[
            "session.flac",
            "-c",
            "20",
            "--overlap",
            "5",
            "--resample",
            "8000",
            "--ffmpeg",
            "--sequential",
            "-vv",
        ]);
        let config = args.to_config().unwrap();
        assert_eq!(config.chunk_duration, 20.0);
        assert_eq!(config.overlap, 5.0);
        assert_eq!(config.target_sample_rate, Some(8000));
        assert_eq!(config.decoder, DecoderBackend::Ffmpeg);
        assert!(!config.parallel);
        assert_eq!(args.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_overlap_rejected() {
        let args = parse(&["session.flac", "--overlap", "30"]);
        assert!(matches!(
            args.to_config(),
            Err(AnalyzerError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_input_required_without_demo() {
        assert!(Args::try_parse_from(["binaural-analyzer"]).is_err());
        let args = parse(&["--generate-demo", "demo.wav"]);
        assert!(args.input.is_none());
        assert_eq!(args.generate_demo, Some(PathBuf::from("demo.wav")));
    }
}
