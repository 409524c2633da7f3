use chm::striped::HashMap;

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

fn bench_single_thread_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("striped: single threaded insertion");

    for &numel in [8i64, 64, 512, 4096, 32768].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(numel), &numel, |b, &numel| {
            let map = HashMap::with_capacity(4096);

            for i in 0..numel {
                map.insert(i, i);
            }

            b.iter(|| map.insert(criterion::black_box(numel + 1), numel + 1))
        });
    }

    group.finish();
}

fn bench_multi_thread_insertion(c: &mut Criterion) {
    let num_threads = num_cpus::get();

    let map = Arc::new(HashMap::with_capacity(4096));
    let keep_going = Arc::new(AtomicBool::new(true));

    // Writers spread across buckets, so stripes mostly avoid each other.
    let threads: Vec<_> = (0..num_threads - 1)
        .map(|i| {
            let map = map.clone();
            let keep_going = keep_going.clone();

            thread::spawn(move || {
                while keep_going.load(Ordering::SeqCst) {
                    map.insert(criterion::black_box(i as i64), i as i64);
                }
            })
        })
        .collect();

    c.bench_function("striped: multithreaded insertion", move |b| {
        let key = num_threads as i64 + 1;

        b.iter(|| map.insert(criterion::black_box(key), key))
    });

    keep_going.store(false, Ordering::SeqCst);

    let _: Vec<_> = threads.into_iter().map(|t| t.join()).collect();
}

fn bench_multi_thread_contended_insertion(c: &mut Criterion) {
    let num_threads = num_cpus::get();

    let map = Arc::new(HashMap::with_capacity(4096));
    let keep_going = Arc::new(AtomicBool::new(true));

    // Key 0 for every writer forces all threads onto one bucket lock.
    let threads: Vec<_> = (0..num_threads - 1)
        .map(|_| {
            let map = map.clone();
            let keep_going = keep_going.clone();

            thread::spawn(move || {
                while keep_going.load(Ordering::SeqCst) {
                    map.insert(criterion::black_box(0), 0);
                }
            })
        })
        .collect();

    c.bench_function("striped: contended multithreaded insertion", move |b| {
        b.iter(|| map.insert(criterion::black_box(0), 0))
    });

    keep_going.store(false, Ordering::SeqCst);

    let _: Vec<_> = threads.into_iter().map(|t| t.join()).collect();
}

fn bench_random_mix(c: &mut Criterion) {
    let map = HashMap::with_capacity(64);
    let mut rng = rand::thread_rng();

    c.bench_function("striped: random put/get/del mix", move |b| {
        b.iter(|| {
            let r: u32 = rng.gen_range(0..10);
            let key = rng.gen_range(0..1024);

            if r < 5 {
                map.insert(key, key);
            } else if r < 8 {
                map.get(key);
            } else {
                map.remove(key);
            }
        })
    });
}

criterion_group!(
    benches,
    bench_single_thread_insertion,
    bench_multi_thread_insertion,
    bench_multi_thread_contended_insertion,
    bench_random_mix,
);
criterion_main!(benches);
