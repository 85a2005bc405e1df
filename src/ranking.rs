// Listenstat -- Aggregation engine for personal listening history
// Copyright 2026 The Listenstat Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! Top-n rankings of artists, tracks, and albums by number of plays.

use std::hash::Hash;

use crate::aggregate::{count_by, rank_counts, RankedCount};
use crate::filter;
use crate::prim::PlayEvent;

/// Number of entries in the top artists and top songs rankings.
pub const TOP_N: usize = 10;

/// Number of entries in the top songs ranking of a subject deep dive.
pub const SUBJECT_TOP_SONGS: usize = 15;

/// Number of entries in the top albums ranking of a subject deep dive.
pub const SUBJECT_TOP_ALBUMS: usize = 10;

/// Return the `n` most frequent keys with their counts.
///
/// Records where `key_fn` returns `None` are not counted, an empty string is
/// counted unless `key_fn` goes through `aggregate::non_empty`. Equal counts are
/// ordered by the first occurrence of the key in `records`. The result has
/// fewer than `n` entries if there are fewer distinct keys.
pub fn top_n<I, K, FK>(records: I, key_fn: FK, n: usize) -> RankedCount<K>
where
    I: IntoIterator,
    K: Clone + Eq + Hash,
    FK: FnMut(I::Item) -> Option<K>,
{
    rank_counts(count_by(records, key_fn), n)
}

pub fn top_artists<'a, I>(plays: I, n: usize) -> RankedCount<&'a str>
where
    I: IntoIterator<Item = &'a PlayEvent>,
{
    top_n(plays, PlayEvent::artist, n)
}

pub fn top_tracks<'a, I>(plays: I, n: usize) -> RankedCount<&'a str>
where
    I: IntoIterator<Item = &'a PlayEvent>,
{
    top_n(plays, PlayEvent::track, n)
}

pub fn top_albums<'a, I>(plays: I, n: usize) -> RankedCount<&'a str>
where
    I: IntoIterator<Item = &'a PlayEvent>,
{
    top_n(plays, PlayEvent::album, n)
}

/// Top tracks among the plays by artists matching `subject`.
///
/// This is exactly `filter::by_artist` followed by `top_tracks`, there is no
/// special casing for subsets.
pub fn subject_top_tracks<'a, I>(plays: I, subject: &str, n: usize) -> RankedCount<&'a str>
where
    I: IntoIterator<Item = &'a PlayEvent>,
{
    top_tracks(filter::by_artist(plays, subject), n)
}

/// Top albums among the plays by artists matching `subject`.
pub fn subject_top_albums<'a, I>(plays: I, subject: &str, n: usize) -> RankedCount<&'a str>
where
    I: IntoIterator<Item = &'a PlayEvent>,
{
    top_albums(filter::by_artist(plays, subject), n)
}
