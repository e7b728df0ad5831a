use criterion::{criterion_group, criterion_main, Criterion};
use landscape_metrics::processing::labeling::{label_components, Connectivity};
use landscape_metrics::processing::{calculate_local_metrics, MetricsProcessor};
use landscape_metrics::ClassifiedRaster;
use std::hint::black_box;

/// Synthetic land-cover raster: blocky classes with scattered nodata
fn synthetic_raster(size: usize) -> ClassifiedRaster {
    let data = (0..size * size)
        .map(|i| {
            let (row, col) = (i / size, i % size);
            if (row * 31 + col * 17) % 97 == 0 {
                -1
            } else {
                ((row / 16 + col / 24) % 6) as i64
            }
        })
        .collect();

    ClassifiedRaster::new(size, size, data, 30.0, Some(-1)).unwrap()
}

/// Benchmark the labelling of one binary mask
fn benchmark_labeling(c: &mut Criterion) {
    let raster = synthetic_raster(1024);
    let mask: Vec<bool> = raster.data().iter().map(|&v| v == 2).collect();

    c.bench_function("label_components_8", |b| {
        b.iter(|| label_components(black_box(&mask), 1024, 1024, Connectivity::Eight).unwrap())
    });
}

/// Benchmark the full metrics calculation, default pool and a single thread
fn benchmark_metrics(c: &mut Criterion) {
    let raster = synthetic_raster(1024);

    c.bench_function("local_metrics", |b| {
        b.iter(|| calculate_local_metrics(black_box(&raster)))
    });

    let single = MetricsProcessor::new(Some(1)).unwrap();
    c.bench_function("local_metrics_single_thread", |b| {
        b.iter(|| single.compute(black_box(&raster)))
    });
}

criterion_group!(benches, benchmark_labeling, benchmark_metrics);
criterion_main!(benches);
