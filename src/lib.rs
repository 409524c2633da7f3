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

//! Fixed-capacity concurrent chained hash maps over integer keys, with a
//! built-in counter of net insert/delete operations for throughput
//! measurement. [`map::HashMap`] serializes everything behind one mutex;
//! [`striped::HashMap`] takes one mutex per bucket.

mod common;

pub mod map;
pub mod striped;

pub use map::HashMap;

#[cfg(test)]
mod tests {
    use super::*;

    use std::{
        sync::{Arc, Barrier},
        thread,
    };

    #[test]
    fn coarse_map_basics() {
        let map = HashMap::with_capacity(8);

        assert_eq!(map.insert(3, 5), None);
        assert_eq!(map.insert(11, 10), None);
        assert_eq!(map.insert(-3, 15), None);
        assert_eq!(map.insert(20, 20), None);

        assert_eq!(map.get(3), Some(5));
        assert_eq!(map.get(11), Some(10));
        assert_eq!(map.get(-3), Some(15));
        assert_eq!(map.get(20), Some(20));

        assert_eq!(map.insert(20, 5), Some(20));
        assert_eq!(map.insert(-3, 10), Some(15));
        assert_eq!(map.insert(11, 15), Some(10));
        assert_eq!(map.insert(3, 20), Some(5));

        assert_eq!(map.len(), 4);
        assert_eq!(map.operations(), 4);
    }

    #[test]
    fn striped_map_basics() {
        let map = striped::HashMap::with_capacity(8);

        assert_eq!(map.insert(3, 5), None);
        assert_eq!(map.insert(11, 10), None);

        assert_eq!(map.get(3), Some(5));
        assert_eq!(map.get(11), Some(10));

        assert_eq!(map.remove(3), Some(5));
        assert_eq!(map.get(3), None);
        assert_eq!(map.get(11), Some(10));

        assert_eq!(map.len(), 1);
        assert_eq!(map.operations(), 1);
    }

    #[test]
    fn implementations_agree_on_a_sequential_history() {
        let coarse = map::HashMap::with_capacity(4);
        let striped = striped::HashMap::with_capacity(4);

        let history: &[(u8, i64, i64)] = &[
            (0, 1, 100),
            (0, 5, 200),
            (0, -3, 300),
            (0, 1, 101),
            (1, 1, 0),
            (2, 5, 0),
            (2, 5, 0),
            (1, 5, 0),
            (0, 9, 900),
            (2, -3, 0),
            (0, 13, 1300),
        ];

        for &(op, key, value) in history {
            match op {
                0 => assert_eq!(coarse.insert(key, value), striped.insert(key, value)),
                1 => assert_eq!(coarse.get(key), striped.get(key)),
                _ => assert_eq!(coarse.remove(key), striped.remove(key)),
            }
        }

        assert_eq!(coarse.len(), striped.len());
        assert_eq!(coarse.operations(), striped.operations());
        assert_eq!(coarse.snapshot(), striped.snapshot());
    }

    #[test]
    fn both_maps_survive_disjoint_concurrent_insertion() {
        const MAX_VALUE: i64 = 256;
        const NUM_THREADS: usize = 8;
        const MAX_INSERTED_VALUE: i64 = (NUM_THREADS as i64) * MAX_VALUE;

        let coarse = Arc::new(map::HashMap::with_capacity(64));
        let striped = Arc::new(striped::HashMap::with_capacity(64));
        let barrier = Arc::new(Barrier::new(NUM_THREADS));

        let threads: Vec<_> = (0..NUM_THREADS)
            .map(|i| {
                let coarse = coarse.clone();
                let striped = striped.clone();
                let barrier = barrier.clone();

                thread::spawn(move || {
                    barrier.wait();

                    for j in (0..MAX_VALUE).map(|j| j + (i as i64 * MAX_VALUE)) {
                        assert_eq!(coarse.insert(j, j), None);
                        assert_eq!(striped.insert(j, j), None);
                    }
                })
            })
            .collect();

        for result in threads.into_iter().map(|t| t.join()) {
            assert!(result.is_ok());
        }

        assert_eq!(coarse.len(), MAX_INSERTED_VALUE as usize);
        assert_eq!(striped.len(), MAX_INSERTED_VALUE as usize);
        assert_eq!(coarse.operations(), MAX_INSERTED_VALUE);
        assert_eq!(striped.operations(), MAX_INSERTED_VALUE);
    }
}
