//! Typed sample buffer

use ndarray::Array1;

use crate::format::ElementType;

/// Mono sample sequence tagged with its element type.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleBuffer {
    Int16(Array1<i16>),
    Float32(Array1<f32>),
    Float64(Array1<f64>),
}

impl SampleBuffer {
    pub fn element_type(&self) -> ElementType {
        match self {
            SampleBuffer::Int16(_) => ElementType::Int16,
            SampleBuffer::Float32(_) => ElementType::Float32,
            SampleBuffer::Float64(_) => ElementType::Float64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SampleBuffer::Int16(data) => data.len(),
            SampleBuffer::Float32(data) => data.len(),
            SampleBuffer::Float64(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_int16(&self) -> Option<&Array1<i16>> {
        match self {
            SampleBuffer::Int16(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_float32(&self) -> Option<&Array1<f32>> {
        match self {
            SampleBuffer::Float32(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_float64(&self) -> Option<&Array1<f64>> {
        match self {
            SampleBuffer::Float64(data) => Some(data),
            _ => None,
        }
    }

    /// Size in bytes of the raw binary representation.
    pub fn byte_len(&self) -> usize {
        self.len() * self.element_type().byte_width()
    }
}

impl From<Vec<i16>> for SampleBuffer {
    fn from(data: Vec<i16>) -> Self {
        SampleBuffer::Int16(Array1::from(data))
    }
}

impl From<Vec<f32>> for SampleBuffer {
    fn from(data: Vec<f32>) -> Self {
        SampleBuffer::Float32(Array1::from(data))
    }
}

impl From<Vec<f64>> for SampleBuffer {
    fn from(data: Vec<f64>) -> Self {
        SampleBuffer::Float64(Array1::from(data))
    }
}

impl From<Array1<i16>> for SampleBuffer {
    fn from(data: Array1<i16>) -> Self {
        SampleBuffer::Int16(data)
    }
}

impl From<Array1<f32>> for SampleBuffer {
    fn from(data: Array1<f32>) -> Self {
        SampleBuffer::Float32(data)
    }
}

impl From<Array1<f64>> for SampleBuffer {
    fn from(data: Array1<f64>) -> Self {
        SampleBuffer::Float64(data)
    }
}
