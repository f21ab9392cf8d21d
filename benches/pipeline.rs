//! Pipeline benchmarks: extraction and aggregation
//!
//! Run with: cargo bench --bench pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lpwan_metrics::aggregate::{comparative_table, group_by, radar_scores, GroupDimension, RADAR_METRICS};
use lpwan_metrics::experiment::{Dataset, Direction, ExperimentRecord, Metric, Technology};
use lpwan_metrics::extract::Extractor;
use lpwan_metrics::ranking::rank_technologies;
use rand::{rngs::StdRng, Rng, SeedableRng};

const SMALL_SIZE: usize = 1_000;
const MEDIUM_SIZE: usize = 100_000;

const DISTANCES: [f64; 4] = [1000.0, 3000.0, 5000.0, 10000.0];
const DEVICES: [u64; 3] = [10, 50, 100];

fn random_dataset(rows: usize) -> Dataset {
    let mut rng = StdRng::seed_from_u64(42);
    (0..rows)
        .map(|i| {
            let pdr = rng.gen_range(40.0..100.0);
            ExperimentRecord::builder(Technology::ALL[i % 3])
                .execution((i % 10) as u64)
                .distance(DISTANCES[rng.gen_range(0..DISTANCES.len())])
                .devices(DEVICES[rng.gen_range(0..DEVICES.len())])
                .metric(Metric::Pdr, pdr)
                .metric(Metric::Plr, 100.0 - pdr)
                .metric(Metric::Vazao, rng.gen_range(100.0..5000.0))
                .metric(Metric::Energia, rng.gen_range(0.1..20.0))
                .metric(Metric::Atraso, rng.gen_range(0.01..8.0))
                .build()
        })
        .collect()
}

fn raw_block(record: &ExperimentRecord) -> String {
    let mut text = format!("=== RESULTADOS {} ===\n", record.technology);
    for metric in Metric::ALL {
        text.push_str(&format!("{}: {}\n", metric.label(), record.value(metric)));
    }
    text
}

/// Benchmark regex extraction of one raw block
fn bench_extract(c: &mut Criterion) {
    let extractor = Extractor::new().unwrap();
    let dataset = random_dataset(64);
    let blocks: Vec<String> = dataset.iter().map(raw_block).collect();

    c.bench_function("extract_block", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % blocks.len();
            extractor.extract(black_box(&blocks[i]), None).unwrap()
        });
    });

    let multi_run = blocks.concat();
    c.bench_function("extract_blocks_64_runs", |b| {
        b.iter(|| extractor.extract_blocks(black_box(&multi_run), None).unwrap());
    });
}

/// Benchmark grouping and the derived tables
fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in [SMALL_SIZE, MEDIUM_SIZE] {
        let dataset = random_dataset(size);

        group.bench_with_input(BenchmarkId::new("group_by_3_dims", size), &dataset, |b, d| {
            b.iter(|| {
                group_by(
                    black_box(d),
                    &[GroupDimension::Technology, GroupDimension::Distance, GroupDimension::Devices],
                )
                .len()
            });
        });

        group.bench_with_input(BenchmarkId::new("comparative_table", size), &dataset, |b, d| {
            b.iter(|| comparative_table(black_box(d)));
        });

        group.bench_with_input(BenchmarkId::new("rank_pdr", size), &dataset, |b, d| {
            b.iter(|| rank_technologies(black_box(d), Metric::Pdr, Direction::Maximize));
        });

        group.bench_with_input(BenchmarkId::new("radar_scores", size), &dataset, |b, d| {
            b.iter(|| radar_scores(black_box(d), &RADAR_METRICS).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extract, bench_aggregate);
criterion_main!(benches);
