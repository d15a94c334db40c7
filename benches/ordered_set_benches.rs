use coupled_set::linked_list::concurrent::{prelude::*, StringSet};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::Rng;
use rand::seq::SliceRandom;
use std::hint::black_box;
use std::sync::{Arc, Barrier};
use std::thread;

const SAMPLE_SIZE: usize = 2_000;

// Enum to define the workload mix
enum Workload {
    WriteHeavy, // 80% inserts, 20% lookups
    ReadHeavy,  // 20% inserts, 80% lookups
    Mixed,      // 50% inserts, 50% lookups
}

impl Workload {
    fn insert_ratio(&self) -> u32 {
        match self {
            Workload::WriteHeavy => 80,
            Workload::ReadHeavy => 20,
            Workload::Mixed => 50,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Workload::WriteHeavy => "write_heavy",
            Workload::ReadHeavy => "read_heavy",
            Workload::Mixed => "mixed",
        }
    }
}

fn keys() -> Vec<String> {
    (0..SAMPLE_SIZE).map(|i| format!("key{:05}", i)).collect()
}

// Half the keys are present up front; the other half get inserted by the run.
fn prefilled_set(keys: &[String]) -> StringSet {
    keys.iter().step_by(2).map(String::as_str).collect()
}

fn coupled_set_benchmark(c: &mut Criterion, threads: usize, workload: Workload) {
    let mut group = c.benchmark_group(format!("CoupledSet_{}_threads", threads));
    let insert_ratio = workload.insert_ratio();
    let keys = keys();

    group.throughput(Throughput::Elements(SAMPLE_SIZE as u64));

    group.bench_function(BenchmarkId::new(workload.name(), SAMPLE_SIZE), |b| {
        b.iter_with_setup(
            || {
                let set = Arc::new(prefilled_set(&keys));
                let barrier = Arc::new(Barrier::new(threads));
                let mut shuffled = keys.clone();
                shuffled.shuffle(&mut rand::rng());
                (set, barrier, Arc::new(shuffled))
            },
            |(set, barrier, keys)| {
                thread::scope(|s| {
                    for _ in 0..threads {
                        let set = Arc::clone(&set);
                        let barrier = Arc::clone(&barrier);
                        let keys = Arc::clone(&keys);

                        s.spawn(move || {
                            let mut rng = rand::rng();
                            barrier.wait();
                            for i in 0..SAMPLE_SIZE / threads {
                                let key = keys[i % keys.len()].as_str();
                                if rng.random_range(0..100) < insert_ratio {
                                    set.insert(key);
                                } else {
                                    black_box(set.find(key, false));
                                }
                            }
                        });
                    }
                });
            },
        );
    });

    group.finish();
}

fn iteration_benchmark(c: &mut Criterion) {
    let keys = keys();
    let set = prefilled_set(&keys);

    c.bench_function("CoupledSet_iterate", |b| {
        b.iter(|| black_box(set.iter().count()));
    });
}

fn coupled_set_small_pressure(c: &mut Criterion) {
    coupled_set_benchmark(c, 2, Workload::Mixed);
    coupled_set_benchmark(c, 2, Workload::ReadHeavy);
    coupled_set_benchmark(c, 2, Workload::WriteHeavy);
}

fn coupled_set_medium_pressure(c: &mut Criterion) {
    coupled_set_benchmark(c, 4, Workload::Mixed);
    coupled_set_benchmark(c, 4, Workload::ReadHeavy);
    coupled_set_benchmark(c, 4, Workload::WriteHeavy);
}

fn coupled_set_high_pressure(c: &mut Criterion) {
    coupled_set_benchmark(c, 8, Workload::Mixed);
    coupled_set_benchmark(c, 8, Workload::ReadHeavy);
    coupled_set_benchmark(c, 8, Workload::WriteHeavy);
}

criterion_group!(
    benches,
    coupled_set_small_pressure,
    coupled_set_medium_pressure,
    coupled_set_high_pressure,
    iteration_benchmark
);
criterion_main!(benches);
