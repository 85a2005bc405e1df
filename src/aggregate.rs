// Listenstat -- Aggregation engine for personal listening history
// Copyright 2026 The Listenstat Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! Generic grouping primitives that all views are built on.
//!
//! Every view in this crate is “group the records by some key, and sum or
//! count per group”. The primitives here implement that once, so the ordering
//! and tie-break rules are the same for every view:
//!
//! * Sums are reported in ascending key order, unless the caller asks for the
//!   order in which the keys were first encountered.
//! * Rankings sort by count descending. Among equal counts, the key that was
//!   encountered first while scanning the input ranks higher. The input order
//!   is the only thing that distinguishes such keys, and using it makes the
//!   ranking reproducible.
//! * A record for which the key or the value is undefined is skipped. Exports
//!   contain incomplete rows all the time, that is not an error.

use std::collections::HashMap;
use std::hash::Hash;

/// Ordered sequence of (key, total) pairs.
pub type KeyedTotal<K, V = u64> = Vec<(K, V)>;

/// Ordered sequence of (key, count) pairs, most frequent first.
pub type RankedCount<K> = Vec<(K, u64)>;

/// The order in which `sum_by` reports its groups.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Order {
    /// Ascending by key.
    Ascending,
    /// In the order in which the keys first occur in the input.
    FirstSeen,
}

/// A value that can be summed per group.
pub trait Amount: Copy + Default {
    /// Whether the value can take part in a sum. NaN and infinities can't.
    fn is_finite(&self) -> bool;

    /// Add `other` to the running total.
    fn add(&mut self, other: Self);
}

impl Amount for u64 {
    #[inline(always)]
    fn is_finite(&self) -> bool {
        true
    }

    /// Saturates at `u64::MAX` rather than wrapping.
    #[inline(always)]
    fn add(&mut self, other: u64) {
        *self = self.saturating_add(other);
    }
}

impl Amount for f64 {
    #[inline(always)]
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }

    #[inline(always)]
    fn add(&mut self, other: f64) {
        *self += other;
    }
}

/// Accumulates a value per key, remembering the order of first occurrence.
///
/// The map points into the vector, so the keys stay in first-seen order
/// without needing an ordered map, and the lookup is a single hash probe.
struct Tally<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K: Clone + Eq + Hash, V: Amount> Tally<K, V> {
    fn new() -> Tally<K, V> {
        Tally {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn add(&mut self, key: K, value: V) {
        if let Some(&i) = self.index.get(&key) {
            self.entries[i].1.add(value);
            return
        }
        let i = self.entries.len();
        self.index.insert(key.clone(), i);
        self.entries.push((key, value));
    }

    fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

/// Sum `value_fn` over the records, grouped by `key_fn`.
///
/// Records where either function returns `None`, or where the value is not
/// finite, do not contribute. Keys that never occur are absent from the
/// result; there is no zero-filling here. Views over a fixed key domain fill
/// in the missing keys themselves.
pub fn sum_by<I, K, V, FK, FV>(
    records: I,
    order: Order,
    mut key_fn: FK,
    mut value_fn: FV,
) -> KeyedTotal<K, V>
where
    I: IntoIterator,
    I::Item: Copy,
    K: Clone + Eq + Hash + Ord,
    V: Amount,
    FK: FnMut(I::Item) -> Option<K>,
    FV: FnMut(I::Item) -> Option<V>,
{
    let mut tally = Tally::new();

    for record in records {
        let key = match key_fn(record) {
            Some(k) => k,
            None => continue,
        };
        let value = match value_fn(record) {
            Some(v) if v.is_finite() => v,
            _ => continue,
        };
        tally.add(key, value);
    }

    let mut entries = tally.into_entries();
    if order == Order::Ascending {
        entries.sort_by(|a, b| a.0.cmp(&b.0));
    }
    entries
}

/// Return the string unless it is empty.
///
/// Every `Some` key counts, including `Some("")`. String key extractors pass
/// their field through this, so that an empty field is skipped like a missing
/// one.
#[inline]
pub fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Count the records per key, in order of first occurrence.
///
/// This is the unranked intermediate of a ranking, see `rank_counts`. An empty
/// string is a key like any other, wrap string extractors in `non_empty`.
pub fn count_by<I, K, FK>(records: I, mut key_fn: FK) -> Vec<(K, u64)>
where
    I: IntoIterator,
    K: Clone + Eq + Hash,
    FK: FnMut(I::Item) -> Option<K>,
{
    let mut tally = Tally::new();
    for record in records {
        if let Some(key) = key_fn(record) {
            tally.add(key, 1_u64);
        }
    }
    tally.into_entries()
}

/// Sort counts descending, keep the first `n`.
///
/// The counts must be in first-seen order, as `count_by` returns them. The
/// sort is stable, so that order decides among equal counts.
pub fn rank_counts<K>(mut counts: Vec<(K, u64)>, n: usize) -> RankedCount<K> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts
}
