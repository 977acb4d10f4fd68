//! Single-file conversion

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::Config;
use crate::error::Result;
use crate::format::ElementType;
use crate::processing::common::Endpoint;

#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub input_type: ElementType,
    pub sample_count: usize,
    pub processing_time_secs: f64,
    pub skipped: bool,
}

#[derive(Debug, Clone)]
pub struct DxxProcessor {
    config: Config,
}

impl DxxProcessor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Read `input` (DXX or WAV) and write it to `output` (DXX or WAV).
    pub fn process_file(&self, input_path: &Path, output_path: &Path) -> Result<ConversionResult> {
        let start_time = Instant::now();

        let source = Endpoint::from_path(input_path)?;
        let target = Endpoint::from_path(output_path)?;

        if !self.config.overwrite() && output_path.exists() {
            log::info!("Skipping existing output: {}", output_path.display());
            return Ok(ConversionResult {
                input_path: input_path.to_path_buf(),
                output_path: output_path.to_path_buf(),
                input_type: match source {
                    Endpoint::Dxx(format) => format.element_type(),
                    Endpoint::Wav => ElementType::Int16,
                },
                sample_count: 0,
                processing_time_secs: start_time.elapsed().as_secs_f64(),
                skipped: true,
            });
        }

        let buffer = source.read(input_path, &self.config)?;
        if self.config.verbose() {
            log::info!(
                "Loaded {}: {} {} samples",
                input_path.display(),
                buffer.len(),
                buffer.element_type()
            );
        }

        target.write(output_path, &buffer, &self.config)?;
        if self.config.verbose() {
            log::info!("Saved: {}", output_path.display());
        }

        Ok(ConversionResult {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            input_type: buffer.element_type(),
            sample_count: buffer.len(),
            processing_time_secs: start_time.elapsed().as_secs_f64(),
            skipped: false,
        })
    }
}
