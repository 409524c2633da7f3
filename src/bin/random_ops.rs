// MIT License
//
// Copyright (c) 2026 the chm developers
//
// Permission is hereby granted, free of charge, to any person
// obtaining a copy of this software and associated documentation files
// (the "Software"), to deal in the Software without restriction,
// including without limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of the Software,
// and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS
// BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN
// ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Throughput driver: hammers one shared map with randomized operations
//! from N threads and reports wall-clock time per net operation.

use chm::HashMap;

use std::{env, process, sync::Arc, thread, time::Instant};

use rand::Rng;

const OPS_PER_THREAD: usize = 10_000;

fn usage(program: &str) -> ! {
    eprintln!(
        "usage: {} <num-threads> <capacity> <max-key> [--dump]",
        program
    );
    process::exit(1);
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 4 {
        usage(&args[0]);
    }

    let num_threads: usize = args[1].parse().unwrap_or_else(|_| usage(&args[0]));
    let capacity: usize = args[2].parse().unwrap_or_else(|_| usage(&args[0]));
    let max_key: i64 = args[3].parse().unwrap_or_else(|_| usage(&args[0]));
    let dump = args[4..].iter().any(|arg| arg == "--dump");

    if num_threads == 0 || capacity == 0 || max_key < 0 {
        usage(&args[0]);
    }

    let map = Arc::new(HashMap::with_capacity(capacity));

    let start = Instant::now();

    let threads: Vec<_> = (0..num_threads)
        .map(|_| {
            let map = map.clone();

            thread::spawn(move || {
                let mut rng = rand::thread_rng();

                // 50% put, 30% get, 20% del, keys uniform in [0, max_key].
                for _ in 0..OPS_PER_THREAD {
                    let r: u32 = rng.gen_range(0..10);
                    let key = rng.gen_range(0..=max_key);

                    if r < 5 {
                        map.insert(key, key);
                    } else if r < 8 {
                        map.get(key);
                    } else {
                        map.remove(key);
                    }
                }
            })
        })
        .collect();

    for result in threads.into_iter().map(|t| t.join()) {
        assert!(result.is_ok());
    }

    let elapsed = start.elapsed().as_secs_f64();
    let ops = map.operations();

    if dump {
        for (index, chain) in map.snapshot().into_iter().enumerate() {
            let rendered: Vec<String> = chain
                .iter()
                .map(|(key, value)| format!("({},{})", key, value))
                .collect();

            println!("[{}] -> {}", index, rendered.join(" -> "));
        }
    }

    println!("Number of ops = {}, time elapsed = {:.6} sec", ops, elapsed);
    println!("Time per op   = {:.6} ms", elapsed / ops as f64 * 1000.0);
}
