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

//! A coarse-locked concurrent hash map with separate chaining.

use crate::common::bucket::{self, Link};

use parking_lot::Mutex;

/// Number of buckets allocated by [`new`].
///
/// [`new`]: HashMap::new
pub const DEFAULT_CAPACITY: usize = 16;

/// A concurrent hash map of `i64` keys to `i64` values, guarded by a single
/// mutex.
///
/// The map owns a fixed-length table of bucket chains; collisions are
/// resolved by separate chaining, and a key's bucket is its value modulo the
/// table capacity (folded to be non-negative, so negative keys behave the
/// same on every platform). The table never grows: capacity is chosen at
/// construction and kept for the life of the map.
///
/// One [`Mutex`] protects the whole table, every chain, and both counters
/// for the full duration of each operation. That makes every operation a
/// short serialized critical section: no operation can observe a partially
/// linked chain, and no two mutating calls can race. Under heavy write
/// contention throughput is bounded by the single lock; see
/// [`striped::HashMap`] for the per-bucket-lock variant of the same map.
///
/// Alongside the element count, the map keeps an operation counter that
/// records net structural change: +1 for every insert of a new key, −1 for
/// every successful removal, and no change for overwrites, lookups, or
/// removals of absent keys. Benchmark drivers read it through
/// [`operations`] to compute time per operation.
///
/// [`Mutex`]: parking_lot::Mutex
/// [`striped::HashMap`]: crate::striped::HashMap
/// [`operations`]: HashMap::operations
pub struct HashMap {
    state: Mutex<State>,
    capacity: usize,
}

struct State {
    buckets: Box<[Link]>,
    len: usize,
    ops: i64,
}

impl HashMap {
    /// Creates an empty `HashMap` with [`DEFAULT_CAPACITY`] buckets.
    pub fn new() -> HashMap {
        HashMap::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty `HashMap` with exactly `capacity` buckets.
    ///
    /// The bucket count is fixed for the life of the map; chains grow
    /// instead of the table.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_capacity(capacity: usize) -> HashMap {
        assert!(capacity > 0);

        let buckets: Box<[Link]> = (0..capacity).map(|_| None).collect();

        HashMap {
            state: Mutex::new(State {
                buckets,
                len: 0,
                ops: 0,
            }),
            capacity,
        }
    }

    /// Returns the value associated with `key`, or `None` if `key` is not
    /// present.
    ///
    /// Absence is an ordinary outcome, not an error, and is always reported
    /// as `None` rather than a sentinel value.
    pub fn get(&self, key: i64) -> Option<i64> {
        let index = self.bucket_index(key);
        let state = self.state.lock();

        bucket::get(&state.buckets[index], key)
    }

    /// Inserts a key-value pair, returning the value previously associated
    /// with `key`.
    ///
    /// If `key` was already present its value is overwritten in place and
    /// the old value returned; the element and operation counters are
    /// unchanged. If `key` was new, the entry is appended at the tail of its
    /// bucket chain, both counters are incremented, and `None` is returned.
    pub fn insert(&self, key: i64, value: i64) -> Option<i64> {
        let index = self.bucket_index(key);
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let previous = bucket::insert(&mut state.buckets[index], key, value);

        if previous.is_none() {
            state.len += 1;
            state.ops += 1;
        }

        previous
    }

    /// Removes `key` from the map, returning the value that was associated
    /// with it.
    ///
    /// Returns `None`, with no state change, if `key` was not present.
    /// Otherwise the entry is unlinked from its chain and freed, and the
    /// element and operation counters are decremented.
    pub fn remove(&self, key: i64) -> Option<i64> {
        let index = self.bucket_index(key);
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let removed = bucket::remove(&mut state.buckets[index], key);

        if removed.is_some() {
            state.len -= 1;
            state.ops -= 1;
        }

        removed
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.state.lock().len
    }

    /// Returns true if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of buckets, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the net operation count: inserts of new keys minus
    /// successful removals.
    ///
    /// Overwrites, lookups, and removals of absent keys do not move this
    /// counter. Starting from an empty map, it equals `len() as i64` at any
    /// quiescent point.
    pub fn operations(&self) -> i64 {
        self.state.lock().ops
    }

    /// Copies out the contents of every bucket, in bucket-index order with
    /// entries in chain order.
    ///
    /// Taken under the map's lock, so the result is a point-in-time view.
    /// Intended for debugging and test assertions, not for iteration in hot
    /// paths.
    pub fn snapshot(&self) -> Vec<Vec<(i64, i64)>> {
        let state = self.state.lock();

        state.buckets.iter().map(bucket::entries).collect()
    }

    fn bucket_index(&self, key: i64) -> usize {
        bucket::index_for(key, self.capacity)
    }
}

impl Default for HashMap {
    fn default() -> HashMap {
        HashMap::new()
    }
}

impl Drop for State {
    fn drop(&mut self) {
        for head in self.buckets.iter_mut() {
            bucket::drain(head);
        }
    }
}
