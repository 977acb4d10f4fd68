//! Conversion Pipeline

pub mod common;
pub mod processor;
pub mod parallel_processor;

pub use common::{swap_extension, Endpoint};
pub use processor::{ConversionResult, DxxProcessor};
pub use parallel_processor::{BatchReport, ConversionJob, JobOutcome, ParallelConverter};
