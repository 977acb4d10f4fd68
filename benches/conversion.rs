use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dxx::audio::AudioConverter;
use dxx::{ElementType, SampleBuffer};

fn ramp_float(len: usize) -> SampleBuffer {
    SampleBuffer::from((0..len).map(|i| (i as f64 / len as f64) * 2.0 - 1.0).collect::<Vec<f64>>())
}

fn ramp_int(len: usize) -> SampleBuffer {
    SampleBuffer::from((0..len).map(|i| i as i16).collect::<Vec<i16>>())
}

fn bench_conversion(c: &mut Criterion) {
    // five seconds at 48 kHz
    let floats = ramp_float(240_000);
    let ints = ramp_int(240_000);

    c.bench_function("float64_to_int16", |b| {
        b.iter(|| AudioConverter::convert(black_box(&floats), ElementType::Int16))
    });
    c.bench_function("int16_to_float32", |b| {
        b.iter(|| AudioConverter::convert(black_box(&ints), ElementType::Float32))
    });
}

criterion_group!(benches, bench_conversion);
criterion_main!(benches);
