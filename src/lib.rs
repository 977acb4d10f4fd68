//! dxx - IO and conversion for `.DXX` raw audio sample files
//!
//! Six formats share one layout: mono samples stored either as text (one
//! value per line) or as raw native-endian binary.
//!
//! ```no_run
//! let data = dxx::read("example.DSB")?;
//! dxx::write("example.DFA", &data)?;
//! # Ok::<(), dxx::DxxError>(())
//! ```

pub mod audio;
pub mod codec;
pub mod config;
pub mod error;
pub mod format;
pub mod processing;

pub use audio::SampleBuffer;
pub use codec::{file_sample_count, read, write};
pub use config::{Args, Config};
pub use error::{DxxError, Result};
pub use format::{list_names, resolve, DxxFormat, ElementType, Encoding, FormatDescriptor};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

pub fn init_logging(verbose: bool) {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .format_timestamp(None)
        .try_init()
        .ok();
}

pub fn get_library_info() -> LibraryInfo {
    LibraryInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: DESCRIPTION.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct LibraryInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl std::fmt::Display for LibraryInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{} - {}", self.name, self.version, self.description)
    }
}
