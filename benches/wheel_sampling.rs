use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hexwheel::ColorWheel;

fn benchmark_wheel(c: &mut Criterion) {
    c.bench_function("render_wheel_256", |b| {
        b.iter(|| ColorWheel::new(black_box(256)))
    });

    let wheel = ColorWheel::new(256);
    c.bench_function("sample_position", |b| {
        b.iter(|| wheel.color_for_position(black_box(200.0), black_box(128.0)))
    });
}

criterion_group!(benches, benchmark_wheel);
criterion_main!(benches);
