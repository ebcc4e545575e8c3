//! Benchmarks for the analysis pipeline

use beam_core::{analyze, AnalysisSettings, BeamModel, Load, Support};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn create_overhang_model() -> BeamModel {
    let mut model = BeamModel::new(10.0, vec![Support::pin(2.0), Support::roller(8.0)]).unwrap();
    model.add_load(Load::point(1.0, 50.0)).unwrap();
    model.add_load(Load::point(6.0, 30.0)).unwrap();
    model.add_load(Load::point(9.0, 40.0)).unwrap();
    model
}

fn create_mixed_model(extra_loads: usize) -> BeamModel {
    let mut model = BeamModel::new(15.0, vec![Support::pin(4.0), Support::roller(11.0)]).unwrap();
    model.add_load(Load::uniform(0.0, 3.0, 12.0)).unwrap();
    model.add_load(Load::varying(8.0, 10.0, 0.0, 25.0)).unwrap();
    model.add_load(Load::varying(12.0, 15.0, 18.0, 8.0)).unwrap();

    // Spread point loads evenly along the beam
    for i in 0..extra_loads {
        let x = 15.0 * (i as f64 + 0.5) / extra_loads as f64;
        model.add_load(Load::point(x, 10.0)).unwrap();
    }
    model
}

fn benchmark_overhang(c: &mut Criterion) {
    let model = create_overhang_model();
    let settings = AnalysisSettings::default();
    c.bench_function("overhang_3_point_loads", |b| {
        b.iter(|| black_box(analyze(black_box(&model), &settings).unwrap()))
    });
}

fn benchmark_resolution(c: &mut Criterion) {
    let model = create_mixed_model(3);
    let mut group = c.benchmark_group("resolution");
    for resolution in [101, 1_000, 10_000] {
        let settings = AnalysisSettings::default().with_resolution(resolution);
        group.bench_with_input(BenchmarkId::from_parameter(resolution), &settings, |b, s| {
            b.iter(|| black_box(analyze(&model, s).unwrap()))
        });
    }
    group.finish();
}

fn benchmark_load_count(c: &mut Criterion) {
    let settings = AnalysisSettings::default();
    let mut group = c.benchmark_group("load_count");
    for count in [10, 50, 200] {
        let model = create_mixed_model(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &model, |b, m| {
            b.iter(|| black_box(analyze(m, &settings).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_overhang,
    benchmark_resolution,
    benchmark_load_count,
);

criterion_main!(benches);
