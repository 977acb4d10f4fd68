//! Configuration management for DXX conversion

use crate::error::{DxxError, Result};
use crate::audio::wav::DEFAULT_SAMPLE_RATE;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub wav: WavConfig,
    pub batch: BatchConfig,
    pub processing: ProcessingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WavConfig {
    pub sample_rate: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub overwrite: bool,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wav: WavConfig::default(),
            batch: BatchConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl Default for WavConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: utils::cpu_count(),
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            overwrite: true,
            verbose: false,
        }
    }
}

impl Config {
    /// Get WAV sample rate (convenience method)
    pub fn sample_rate(&self) -> u32 {
        self.wav.sample_rate
    }

    pub fn workers(&self) -> usize {
        self.batch.workers
    }

    pub fn overwrite(&self) -> bool {
        self.processing.overwrite
    }

    pub fn verbose(&self) -> bool {
        self.processing.verbose
    }
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "dxxconv",
    about = "convert .DXX or .wav file.",
    long_about = "convert .DXX or .wav file.\n\
                  dxxconv can handle {.DSA, .DFA, .DDA, .DSB, .DFB, .DDB, .wav}.",
    version,
    author
)]
pub struct Args {
    #[arg(
        value_name = "FILE",
        required_unless_present = "list_formats",
        help = "INPUT OUTPUT, or the input files when --to is given"
    )]
    pub paths: Vec<PathBuf>,

    #[arg(short = 't', long = "to", value_name = "EXT", help = "Convert every FILE to this extension (DSA, DFA, DDA, DSB, DFB, DDB or wav)")]
    pub to: Option<String>,

    #[arg(short = 'o', long = "out-dir", help = "Directory for batch outputs (defaults to next to each input)")]
    pub out_dir: Option<PathBuf>,

    #[arg(short = 'r', long = "sample-rate", help = "Required WAV sample rate (Hz)")]
    pub sample_rate: Option<u32>,

    #[arg(short = 'w', long = "workers", help = "Parallel workers for batch conversion")]
    pub workers: Option<usize>,

    #[arg(long = "no-overwrite", help = "Skip outputs that already exist")]
    pub no_overwrite: bool,

    #[arg(short = 'c', long = "config", help = "Config file path (TOML format)")]
    pub config_file: Option<PathBuf>,

    #[arg(short = 'v', long = "verbose", help = "Enable verbose output mode")]
    pub verbose: bool,

    #[arg(long = "list-formats", help = "Print the supported DXX extensions and exit")]
    pub list_formats: bool,
}

impl Config {
    /// Create config from command line arguments and config file
    pub fn from_args_and_config(args: &Args) -> Result<Self> {
        // First load config file (if provided)
        let mut config = if let Some(config_path) = &args.config_file {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };

        // Command line arguments override config file settings
        if let Some(rate) = args.sample_rate {
            config.wav.sample_rate = rate;
        }
        if let Some(workers) = args.workers {
            config.batch.workers = workers;
        }
        if args.no_overwrite {
            config.processing.overwrite = false;
        }
        if args.verbose {
            config.processing.verbose = true;
        }

        config.validate()?;

        Ok(config)
    }

    /// Load config from TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DxxError::config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| DxxError::config(format!("Failed to parse config file: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.wav.sample_rate == 0 {
            return Err(DxxError::config("Sample rate must be greater than 0"));
        }
        if self.wav.sample_rate > 192000 {
            return Err(DxxError::config("Sample rate cannot exceed 192000 Hz"));
        }

        if self.batch.workers == 0 {
            return Err(DxxError::config("Worker count must be greater than 0"));
        }
        if self.batch.workers > utils::cpu_count() * 2 {
            return Err(DxxError::config("Worker count cannot exceed 2x logical CPU cores"));
        }

        Ok(())
    }

    /// Save config to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DxxError::config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| DxxError::config(format!("Failed to write config file: {}", e)))
    }
}

pub mod utils {
    pub fn cpu_count() -> usize {
        num_cpus::get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["dxxconv"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sample_rate(), 48000);
        assert_eq!(config.workers(), utils::cpu_count());
        assert!(config.overwrite());
        assert!(!config.verbose());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.wav.sample_rate = 0;
        assert!(config.validate().is_err());
        config.wav.sample_rate = 200000;
        assert!(config.validate().is_err());
        config.wav.sample_rate = 48000;

        config.batch.workers = 0;
        assert!(config.validate().is_err());
        config.batch.workers = utils::cpu_count() * 2 + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.wav.sample_rate = 44100;
        config.batch.workers = 1;

        assert!(config.save_to_file(&config_path).is_ok());
        assert!(config_path.exists());

        let loaded = Config::from_file(&config_path).unwrap();
        assert_eq!(loaded.sample_rate(), 44100);
        assert_eq!(loaded.workers(), 1);
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        std::fs::write(&config_path, "[wav]\nsample_rate = 16000\n").unwrap();

        let loaded = Config::from_file(&config_path).unwrap();
        assert_eq!(loaded.sample_rate(), 16000);
        assert!(loaded.overwrite());
    }

    #[test]
    fn test_bad_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.toml");
        std::fs::write(&config_path, "[wav\n").unwrap();

        assert!(matches!(Config::from_file(&config_path), Err(DxxError::Config { .. })));
        assert!(Config::from_file(temp_dir.path().join("none.toml")).is_err());
    }

    #[test]
    fn test_args_override_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[wav]\nsample_rate = 16000\n[batch]\nworkers = 1\n").unwrap();
        let config_arg = config_path.to_string_lossy().into_owned();

        let parsed = args(&["-c", &config_arg, "-r", "48000", "--no-overwrite", "in.DSB", "out.DSA"]);
        let config = Config::from_args_and_config(&parsed).unwrap();
        assert_eq!(config.sample_rate(), 48000);
        assert_eq!(config.workers(), 1);
        assert!(!config.overwrite());
    }

    #[test]
    fn test_args_parsing() {
        let parsed = args(&["--to", "DFB", "a.DSB", "b.DSB", "c.wav"]);
        assert_eq!(parsed.to.as_deref(), Some("DFB"));
        assert_eq!(parsed.paths.len(), 3);

        let parsed = args(&["--list-formats"]);
        assert!(parsed.list_formats);
        assert!(parsed.paths.is_empty());

        assert!(Args::try_parse_from(["dxxconv"]).is_err());
    }
}
