//! Audio Sample Module
//!
//! Typed sample buffers, amplitude rescaling between sample representations,
//! and the WAV bridge.

pub mod buffer;
pub mod converter;
pub mod wav;

pub use buffer::SampleBuffer;
pub use converter::AudioConverter;
pub use wav::{read_wav, write_wav};
