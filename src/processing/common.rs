//! Helpers shared by the single-file and batch converters

use std::path::{Path, PathBuf};

use crate::audio::{self, SampleBuffer};
use crate::codec;
use crate::config::Config;
use crate::error::{DxxError, Result};
use crate::format::{self, DxxFormat};

/// One side of a conversion: a DXX file or a WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Dxx(DxxFormat),
    Wav,
}

impl Endpoint {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if audio::wav::is_wav_path(path) {
            return Ok(Endpoint::Wav);
        }
        DxxFormat::from_filename(path).map(Endpoint::Dxx)
    }

    /// Parse a bare extension as accepted by `--to`, with or without a
    /// leading dot.
    pub fn from_extension(ext: &str) -> Result<Self> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        if ext == "wav" {
            return Ok(Endpoint::Wav);
        }
        ext.parse::<DxxFormat>().map(Endpoint::Dxx)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Endpoint::Dxx(format) => format.name(),
            Endpoint::Wav => "wav",
        }
    }

    pub fn read(&self, path: &Path, config: &Config) -> Result<SampleBuffer> {
        match self {
            Endpoint::Dxx(_) => codec::read(path),
            Endpoint::Wav => audio::read_wav(path, config.sample_rate()),
        }
    }

    pub fn write(&self, path: &Path, buffer: &SampleBuffer, config: &Config) -> Result<()> {
        match self {
            Endpoint::Dxx(_) => codec::write(path, buffer),
            Endpoint::Wav => audio::write_wav(path, buffer, config.sample_rate()),
        }
    }
}

/// Replace the extension of `path` with `target`, optionally relocating the
/// file into `out_dir`.
pub fn swap_extension(path: &Path, target: Endpoint, out_dir: Option<&Path>) -> Result<PathBuf> {
    let stem = path
        .file_stem()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DxxError::unsupported(format::extension_of(path)))?;

    let mut name = stem.to_os_string();
    name.push(".");
    name.push(target.extension());

    Ok(match out_dir {
        Some(dir) => dir.join(name),
        None => path.with_file_name(name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_path() {
        assert_eq!(Endpoint::from_path("a.wav").unwrap(), Endpoint::Wav);
        assert_eq!(Endpoint::from_path("a.DFA").unwrap(), Endpoint::Dxx(DxxFormat::Dfa));
        assert!(Endpoint::from_path("a.flac").unwrap_err().is_unsupported_format());
    }

    #[test]
    fn test_endpoint_from_extension() {
        assert_eq!(Endpoint::from_extension("DDB").unwrap(), Endpoint::Dxx(DxxFormat::Ddb));
        assert_eq!(Endpoint::from_extension(".DSA").unwrap(), Endpoint::Dxx(DxxFormat::Dsa));
        assert_eq!(Endpoint::from_extension("wav").unwrap(), Endpoint::Wav);
        assert!(Endpoint::from_extension("ddb").is_err());
    }

    #[test]
    fn test_swap_extension() {
        let out = swap_extension(Path::new("takes/a.DSB"), Endpoint::Dxx(DxxFormat::Dfa), None).unwrap();
        assert_eq!(out, PathBuf::from("takes/a.DFA"));

        let out = swap_extension(Path::new("takes/a.DSB"), Endpoint::Wav, Some(Path::new("out"))).unwrap();
        assert_eq!(out, PathBuf::from("out/a.wav"));

        let out = swap_extension(Path::new("b"), Endpoint::Wav, None).unwrap();
        assert_eq!(out, PathBuf::from("b.wav"));
    }
}
