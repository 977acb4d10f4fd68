//! DXX file reading and writing
//!
//! Text formats (`DXA`) hold one sample per line; binary formats (`DXB`) are
//! a bare array of native-endian samples with no header.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use ndarray::Array1;

use crate::audio::{AudioConverter, SampleBuffer};
use crate::error::{DxxError, Result};
use crate::format::{self, ElementType};

/// Number of samples stored in a DXX file, derived from its size on disk.
///
/// A trailing partial sample is not counted. For text formats this is the
/// file size divided by the element width, not the number of values the file
/// holds; use [`read`] to count those.
pub fn file_sample_count<P: AsRef<Path>>(filename: P) -> Result<usize> {
    let path = filename.as_ref();
    let desc = format::resolve(path)?;
    let meta = fs::metadata(path).map_err(|e| DxxError::from_io(e, path))?;
    Ok(meta.len() as usize / desc.byte_width())
}

/// Read a DXX file into a buffer tagged with the format's element type.
pub fn read<P: AsRef<Path>>(filename: P) -> Result<SampleBuffer> {
    let path = filename.as_ref();
    let desc = format::resolve(path)?;

    let buffer = if desc.is_text() {
        let bytes = fs::read(path).map_err(|e| DxxError::from_io(e, path))?;
        let content = decode_text(path, &bytes, desc.element_type)?;
        match desc.element_type {
            ElementType::Int16 => SampleBuffer::Int16(parse_text(path, content, desc.element_type)?),
            ElementType::Float32 => SampleBuffer::Float32(parse_text(path, content, desc.element_type)?),
            ElementType::Float64 => SampleBuffer::Float64(parse_text(path, content, desc.element_type)?),
        }
    } else {
        let bytes = fs::read(path).map_err(|e| DxxError::from_io(e, path))?;
        match desc.element_type {
            ElementType::Int16 => SampleBuffer::Int16(decode_binary(&bytes, i16::from_ne_bytes)),
            ElementType::Float32 => SampleBuffer::Float32(decode_binary(&bytes, f32::from_ne_bytes)),
            ElementType::Float64 => SampleBuffer::Float64(decode_binary(&bytes, f64::from_ne_bytes)),
        }
    };

    log::debug!("Read {} {} samples from {}", buffer.len(), desc.name, path.display());
    Ok(buffer)
}

/// Write `buffer` to a DXX file, rescaling it to the target element type
/// first if the types differ.
///
/// Fails with [`DxxError::BadConversion`] before touching the file when no
/// rescaling exists between the two types.
pub fn write<P: AsRef<Path>>(filename: P, buffer: &SampleBuffer) -> Result<()> {
    let path = filename.as_ref();
    let desc = format::resolve(path)?;

    let converted;
    let data = if buffer.element_type() == desc.element_type {
        buffer
    } else {
        log::debug!(
            "Rescaling {} -> {} for {}",
            buffer.element_type(),
            desc.element_type,
            path.display()
        );
        converted = AudioConverter::convert(buffer, desc.element_type)?;
        &converted
    };

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    if desc.is_text() {
        write_text(&mut writer, data, desc.text_format)?;
    } else {
        write_binary(&mut writer, data)?;
        log::debug!("{} bytes of raw {} data", data.byte_len(), data.element_type());
    }
    writer.flush()?;

    log::debug!("Wrote {} {} samples to {}", data.len(), desc.name, path.display());
    Ok(())
}

/// Render a float the way C's `%e` does: six fractional digits and a signed
/// exponent of at least two digits.
pub fn format_exponential(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }

    let rendered = format!("{:.6e}", value);
    match rendered.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => format!(
                "{}e{}{:02}",
                mantissa,
                if exp < 0 { '-' } else { '+' },
                exp.unsigned_abs()
            ),
            Err(_) => rendered,
        },
        None => rendered,
    }
}

/// Text files must be UTF-8; an invalid byte is reported as a parse error on
/// the line holding it.
fn decode_text<'a>(path: &Path, bytes: &'a [u8], element: ElementType) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|e| {
        let valid = &bytes[..e.valid_up_to()];
        let line_start = valid.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
        let line_end = bytes[valid.len()..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(bytes.len(), |i| valid.len() + i);
        DxxError::Parse {
            path: path.to_path_buf(),
            line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
            token: String::from_utf8_lossy(&bytes[line_start..line_end]).trim().to_string(),
            element,
        }
    })
}

fn parse_text<T: FromStr>(path: &Path, content: &str, element: ElementType) -> Result<Array1<T>> {
    let mut values = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        for token in line.split_whitespace() {
            let value = token.parse::<T>().map_err(|_| DxxError::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                token: token.to_string(),
                element,
            })?;
            values.push(value);
        }
    }
    Ok(Array1::from(values))
}

fn decode_binary<T, const N: usize>(bytes: &[u8], from_ne: fn([u8; N]) -> T) -> Array1<T> {
    bytes
        .chunks_exact(N)
        .map(|chunk| {
            let mut raw = [0u8; N];
            raw.copy_from_slice(chunk);
            from_ne(raw)
        })
        .collect()
}

/// One value per line in the descriptor's printf conversion: `%d` for
/// integers, `%e`/`%le` for floats.
fn write_text<W: Write>(writer: &mut W, data: &SampleBuffer, text_format: &str) -> Result<()> {
    match (text_format, data) {
        ("%d", SampleBuffer::Int16(values)) => {
            for v in values.iter() {
                writeln!(writer, "{}", v)?;
            }
        }
        ("%e" | "%le", SampleBuffer::Float32(values)) => {
            for &v in values.iter() {
                writeln!(writer, "{}", format_exponential(f64::from(v)))?;
            }
        }
        ("%e" | "%le", SampleBuffer::Float64(values)) => {
            for &v in values.iter() {
                writeln!(writer, "{}", format_exponential(v))?;
            }
        }
        _ => {
            return Err(DxxError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("cannot render {} samples with {}", data.element_type(), text_format),
            )));
        }
    }
    Ok(())
}

fn write_binary<W: Write>(writer: &mut W, data: &SampleBuffer) -> Result<()> {
    match data {
        SampleBuffer::Int16(values) => {
            for v in values.iter() {
                writer.write_all(&v.to_ne_bytes())?;
            }
        }
        SampleBuffer::Float32(values) => {
            for v in values.iter() {
                writer.write_all(&v.to_ne_bytes())?;
            }
        }
        SampleBuffer::Float64(values) => {
            for v in values.iter() {
                writer.write_all(&v.to_ne_bytes())?;
            }
        }
    }
    Ok(())
}
