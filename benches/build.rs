use criterion::{AxisScale, BenchmarkId, Criterion, PlotConfiguration};

use hyperoctree::{build_tree, Adaptivity, Mode};
use rand::prelude::*;

fn random_points(mut rng: StdRng, n: usize, d: usize) -> Vec<f64> {
    (0..n * d).map(|_| rng.gen_range(-5000.0..5000.0)).collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut g = c.benchmark_group("hyperoctree");
    g.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic))
        .warm_up_time(std::time::Duration::from_secs(2))
        .measurement_time(std::time::Duration::from_secs(4))
        .sample_size(50);

    let point_count_iterator = (4..18).map(|i| 2usize.pow(i));

    for d in [2usize, 3] {
        for n in point_count_iterator.clone() {
            let x = random_points(StdRng::seed_from_u64(1808), n, d);
            let siz = vec![0.0; n];

            g.bench_function(BenchmarkId::new(format!("build_tree::point::{d}d"), n), |b| {
                b.iter(|| build_tree(&x, d, n, Mode::Point, &siz, 8, -1, &vec![0.0; d], Adaptivity::Adaptive).unwrap())
            });

            g.bench_function(BenchmarkId::new(format!("derive::{d}d"), n), |b| {
                b.iter_batched(
                    || build_tree(&x, d, n, Mode::Point, &siz, 8, -1, &vec![0.0; d], Adaptivity::Adaptive).unwrap(),
                    |mut tree| {
                        tree.child_data();
                        tree.geometry_data();
                        tree.neighbors(0);
                    },
                    criterion::BatchSize::LargeInput,
                )
            });
        }
    }

    g.finish();
}

criterion::criterion_group!(benches, criterion_benchmark);
criterion::criterion_main!(benches);
