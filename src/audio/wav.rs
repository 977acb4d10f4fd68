//! WAV bridge
//!
//! DXX files carry no header, so WAV input is held to the layout every DXX
//! file is assumed to have: mono at a fixed sample rate. Samples are brought
//! to 16-bit PCM on read.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use ndarray::Array1;

use crate::audio::{AudioConverter, SampleBuffer};
use crate::error::{DxxError, Result};

/// Sample rate every DXX recording is made at.
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;

pub fn is_wav_path<P: AsRef<Path>>(path: P) -> bool {
    crate::format::extension_of(path.as_ref()) == "wav"
}

fn pcm16_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Bring an integer PCM sample of `bits` width to 16 bits.
fn narrow_to_int16(sample: i32, bits: u16) -> i16 {
    if bits >= 16 {
        (sample >> (bits - 16)) as i16
    } else {
        (sample << (16 - bits)) as i16
    }
}

/// Full scale float to int16, clipping outside [-1.0, 1.0].
fn float_to_pcm16(sample: f32) -> i16 {
    (sample * 32767.0).round().clamp(-32768.0, 32767.0) as i16
}

/// Read a mono WAV file into an int16 buffer.
///
/// 16-bit PCM is taken as is; 8/24/32-bit PCM is shifted to 16 bits and
/// 32-bit float is scaled by 32767 with clipping.
pub fn read_wav<P: AsRef<Path>>(path: P, expected_rate: u32) -> Result<SampleBuffer> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| DxxError::from_io(e, path))?;
    let mut reader = WavReader::new(std::io::BufReader::new(file))
        .map_err(|e| DxxError::audio(format!("Cannot create WAV reader for {}: {}", path.display(), e)))?;

    let spec = reader.spec();
    if spec.sample_rate != expected_rate {
        return Err(DxxError::audio(format!(
            "sampling rate of input data is invalid. want: {}, got: {}",
            expected_rate, spec.sample_rate
        )));
    }
    if spec.channels != 1 {
        return Err(DxxError::audio(format!(
            "number of channels of input data is invalid. want: 1, got: {}",
            spec.channels
        )));
    }
    let samples: Vec<i16> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 16) => reader.samples::<i16>().collect::<std::result::Result<_, _>>()?,
        (SampleFormat::Int, bits @ (8 | 24 | 32)) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| narrow_to_int16(v, bits)))
            .collect::<std::result::Result<_, _>>()?,
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .map(|s| s.map(float_to_pcm16))
            .collect::<std::result::Result<_, _>>()?,
        (format, bits) => {
            return Err(DxxError::audio(format!(
                "Unsupported WAV sample format: {:?} {}-bit",
                format, bits
            )));
        }
    };

    log::debug!("Read {} samples from {}", samples.len(), path.display());
    Ok(SampleBuffer::Int16(Array1::from(samples)))
}

/// Write a buffer as 16-bit PCM mono. Float buffers are rescaled to int16
/// first.
pub fn write_wav<P: AsRef<Path>>(path: P, buffer: &SampleBuffer, sample_rate: u32) -> Result<()> {
    let path = path.as_ref();

    let converted;
    let data = match buffer {
        SampleBuffer::Int16(data) => data,
        _ => {
            converted = AudioConverter::float_to_int16(buffer)?;
            &converted
        }
    };

    let file = File::create(path)?;
    let mut writer = WavWriter::new(BufWriter::new(file), pcm16_spec(sample_rate))?;
    for &sample in data.iter() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    log::debug!("Wrote {} samples to {}", data.len(), path.display());
    Ok(())
}
