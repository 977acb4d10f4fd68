//! End-to-end read/write scenarios on full-length recordings.

use std::fs;

use dxx::audio::AudioConverter;
use dxx::{file_sample_count, read, write, DxxError, ElementType, SampleBuffer};
use rand::Rng;
use tempfile::TempDir;

const SAMPLING_FREQ: usize = 48000;
const MOCK_SAMPLES: usize = 5 * SAMPLING_FREQ;

/// `0..240000` cast to int16, wrapping like a numpy `arange(..., dtype=int16)`.
fn mock_data() -> SampleBuffer {
    SampleBuffer::from((0..MOCK_SAMPLES).map(|i| i as i16).collect::<Vec<i16>>())
}

#[test]
fn test_mock_dsb_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mock.DSB");
    let data = mock_data();

    write(&path, &data).unwrap();

    assert_eq!(file_sample_count(&path).unwrap(), MOCK_SAMPLES);
    assert_eq!(fs::metadata(&path).unwrap().len() as usize, MOCK_SAMPLES * 2);
    let loaded = read(&path).unwrap();
    assert_eq!(loaded.len(), MOCK_SAMPLES);
    assert_eq!(loaded, data);
}

#[test]
fn test_mock_dsa_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mock.DSA");
    let data = mock_data();

    write(&path, &data).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), MOCK_SAMPLES);
    assert!(lines.iter().all(|l| l.parse::<i16>().is_ok()));
    assert_eq!(lines[1], "1");

    assert_eq!(read(&path).unwrap(), data);
}

#[test]
fn test_sample_count_matches_read_for_every_format() {
    let dir = TempDir::new().unwrap();
    let data = SampleBuffer::from(vec![-4i16, 9, 0, 1, 2, 3, 250]);

    for name in dxx::list_names() {
        let path = dir.path().join(format!("take.{name}"));
        write(&path, &data).unwrap();

        let loaded = read(&path).unwrap();
        assert_eq!(loaded.element_type(), dxx::resolve(&path).unwrap().element_type);
        if dxx::resolve(&path).unwrap().is_binary() {
            assert_eq!(file_sample_count(&path).unwrap(), loaded.len(), "{name}");
        }
        assert_eq!(loaded.len(), data.len(), "{name}");
    }
}

#[test]
fn test_random_float_buffer_to_dsb() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("noise.DSB");
    let mut rng = rand::thread_rng();
    let mut samples: Vec<f64> = (0..1024).map(|_| rng.gen_range(-1.0..1.0)).collect();
    // pin the magnitude extrema so the range is never degenerate
    samples[0] = 0.0;
    samples[1] = 1.0;

    write(&path, &SampleBuffer::from(samples.clone())).unwrap();
    let loaded = read(&path).unwrap();
    let ints = loaded.as_int16().unwrap();

    assert_eq!(ints.len(), samples.len());
    assert_eq!(ints[0], 0);
    assert_eq!(ints[1], 32767);
    for (&x, &y) in samples.iter().zip(ints.iter()) {
        assert_eq!(y, (x * 32767.0) as i16);
    }
}

#[test]
fn test_conversion_chain_is_lossy() {
    let original = SampleBuffer::from(vec![0.01f32, 0.2, -0.7, 0.33, 0.9]);
    let ints = AudioConverter::convert(&original, ElementType::Int16).unwrap();
    let floats = AudioConverter::convert(&ints, ElementType::Float32).unwrap();
    let floats = floats.as_float32().unwrap();

    assert!(floats.iter().all(|x| x.abs() <= 10000.0 * 2.0));
    assert_ne!(floats, original.as_float32().unwrap());
}

#[test]
fn test_degenerate_writes_are_refused() {
    let dir = TempDir::new().unwrap();

    let single = SampleBuffer::from(vec![0.75f32]);
    let err = write(dir.path().join("one.DSB"), &single).unwrap_err();
    assert!(matches!(err, DxxError::DegenerateBuffer { .. }));

    let flat = SampleBuffer::from(vec![-300i16, 300, 300]);
    let err = write(dir.path().join("flat.DDA"), &flat).unwrap_err();
    assert!(matches!(err, DxxError::DegenerateBuffer { .. }));
}
