//! Amplitude rescaling between int16 and float sample representations
//!
//! Both directions normalize against the minimum and maximum *absolute*
//! sample value of the whole buffer:
//!
//! ```text
//! y = (x - min|x|) / (max|x| - min|x|) * amp
//! ```
//!
//! so every output sample depends on the entire input and a conversion needs
//! one pass for the extrema and one to rescale.

use std::ops::{Div, Mul, Sub};

use ndarray::Array1;

use crate::audio::SampleBuffer;
use crate::error::{DxxError, Result};
use crate::format::ElementType;

/// Target amplitude when converting to int16 (`2^15 - 1`).
pub const INT16_AMP: f64 = 32767.0;

/// Target amplitude when converting to float32/float64.
pub const FLOAT_AMP: f64 = 10000.0;

trait RescaleFloat:
    Copy + PartialOrd + Sub<Output = Self> + Div<Output = Self> + Mul<Output = Self>
{
    fn magnitude(self) -> Self;
    fn finite(self) -> bool;
    fn from_f64(v: f64) -> Self;
    fn from_i16(v: i16) -> Self;
    fn to_i16(self) -> i16;
}

macro_rules! impl_rescale_float {
    ($t:ty) => {
        impl RescaleFloat for $t {
            fn magnitude(self) -> Self { self.abs() }
            fn finite(self) -> bool { self.is_finite() }
            fn from_f64(v: f64) -> Self { v as $t }
            fn from_i16(v: i16) -> Self { v as $t }
            // `as` truncates toward zero and saturates at the int16 bounds; NaN maps to 0.
            fn to_i16(self) -> i16 { self as i16 }
        }
    };
}

impl_rescale_float!(f32);
impl_rescale_float!(f64);

pub struct AudioConverter;

impl AudioConverter {
    /// Rescale a float32 or float64 buffer into int16.
    pub fn float_to_int16(buffer: &SampleBuffer) -> Result<Array1<i16>> {
        match buffer {
            SampleBuffer::Float32(data) => Self::rescale_to_int16(data),
            SampleBuffer::Float64(data) => Self::rescale_to_int16(data),
            SampleBuffer::Int16(_) => Err(DxxError::BadConversion {
                from: ElementType::Int16,
                to: ElementType::Int16,
            }),
        }
    }

    pub fn int16_to_float32(data: &Array1<i16>) -> Result<Array1<f32>> {
        Self::rescale_to_float(data)
    }

    pub fn int16_to_float64(data: &Array1<i16>) -> Result<Array1<f64>> {
        Self::rescale_to_float(data)
    }

    /// Convert `buffer` to `target`, applying amplitude rescaling where a
    /// rescaling is defined.
    ///
    /// Same-type requests return a copy. float32 <-> float64 has no defined
    /// rescaling and fails with [`DxxError::BadConversion`].
    pub fn convert(buffer: &SampleBuffer, target: ElementType) -> Result<SampleBuffer> {
        let source = buffer.element_type();
        if source == target {
            return Ok(buffer.clone());
        }

        match (buffer, target) {
            (SampleBuffer::Float32(_) | SampleBuffer::Float64(_), ElementType::Int16) => {
                Ok(SampleBuffer::Int16(Self::float_to_int16(buffer)?))
            }
            (SampleBuffer::Int16(data), ElementType::Float32) => {
                Ok(SampleBuffer::Float32(Self::int16_to_float32(data)?))
            }
            (SampleBuffer::Int16(data), ElementType::Float64) => {
                Ok(SampleBuffer::Float64(Self::int16_to_float64(data)?))
            }
            _ => Err(DxxError::BadConversion { from: source, to: target }),
        }
    }

    fn rescale_to_int16<T: RescaleFloat>(data: &Array1<T>) -> Result<Array1<i16>> {
        let (min, max) = Self::abs_extrema(data)?;
        let range = max - min;
        let amp = T::from_f64(INT16_AMP);
        Ok(data.mapv(|x| ((x - min) / range * amp).to_i16()))
    }

    fn rescale_to_float<T: RescaleFloat>(data: &Array1<i16>) -> Result<Array1<T>> {
        let data: Array1<T> = data.mapv(T::from_i16);
        let (min, max) = Self::abs_extrema(&data)?;
        let range = max - min;
        let amp = T::from_f64(FLOAT_AMP);
        Ok(data.mapv(|x| (x - min) / range * amp))
    }

    fn abs_extrema<T: RescaleFloat>(data: &Array1<T>) -> Result<(T, T)> {
        if data.is_empty() {
            return Err(DxxError::degenerate("cannot rescale an empty buffer"));
        }

        let mut min = T::from_f64(f64::INFINITY);
        let mut max = T::from_f64(f64::NEG_INFINITY);
        for &x in data.iter() {
            let m = x.magnitude();
            if m < min {
                min = m;
            }
            if m > max {
                max = m;
            }
        }

        let range = max - min;
        if !(range > T::from_f64(0.0)) || !range.finite() {
            return Err(DxxError::degenerate(format!(
                "{} samples have no dynamic range in absolute value",
                data.len()
            )));
        }

        Ok((min, max))
    }
}
