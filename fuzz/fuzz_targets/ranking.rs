#![no_main]

use std::collections::HashMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use listenstat::ranking::top_n;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    n: u8,
    // Small keys so that there are plenty of ties. None stands for a play
    // where the ranked field is absent.
    keys: Vec<Option<u8>>,
}

fuzz_target!(|input: FuzzInput| {
    let n = input.n as usize;
    let ranked = top_n(input.keys.iter(), |k| *k, n);

    // Count occurrences and first occurrence from the definition.
    let mut counts = HashMap::<u8, u64>::new();
    let mut first_seen = HashMap::<u8, usize>::new();
    for (i, key) in input.keys.iter().enumerate() {
        if let Some(k) = key {
            *counts.entry(*k).or_insert(0) += 1;
            first_seen.entry(*k).or_insert(i);
        }
    }

    assert_eq!(ranked.len(), n.min(counts.len()));

    for &(key, count) in &ranked {
        assert_eq!(counts[&key], count);
    }

    // Descending by count, equal counts by first occurrence.
    for pair in ranked.windows(2) {
        let (k0, c0) = pair[0];
        let (k1, c1) = pair[1];
        assert!(c0 > c1 || (c0 == c1 && first_seen[&k0] < first_seen[&k1]));
    }

    // Nothing that was left out ranks above the last entry.
    if let Some(&(last_key, last_count)) = ranked.last() {
        for (key, count) in counts.iter() {
            if ranked.iter().any(|(k, _)| k == key) {
                continue
            }
            let outranks = *count > last_count
                || (*count == last_count && first_seen[key] < first_seen[&last_key]);
            assert!(!outranks);
        }
    }
});
