// Listenstat -- Aggregation engine for personal listening history
// Copyright 2026 The Listenstat Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! Selecting a subset of the plays.
//!
//! Filters return the selected plays by reference, in their original order,
//! so the result can be fed into any view or ranker unchanged. That is how the
//! artist deep dive works: filter first, then compute the regular views on the
//! subset.

use crate::prim::PlayEvent;
use crate::string_utils::fold_case;

/// Select plays where `field_fn` contains `needle`, ignoring case.
///
/// Plays where the field is absent never match. An empty needle matches every
/// play where the field is present.
pub fn filter_by_substring<'a, I, F>(plays: I, mut field_fn: F, needle: &str) -> Vec<&'a PlayEvent>
where
    I: IntoIterator<Item = &'a PlayEvent>,
    F: FnMut(&'a PlayEvent) -> Option<&'a str>,
{
    let needle = fold_case(needle);
    plays
        .into_iter()
        .filter(|play| match field_fn(*play) {
            Some(value) => fold_case(value).contains(&needle[..]),
            None => false,
        })
        .collect()
}

/// Select plays by an artist whose name contains `needle`, ignoring case.
pub fn by_artist<'a, I>(plays: I, needle: &str) -> Vec<&'a PlayEvent>
where
    I: IntoIterator<Item = &'a PlayEvent>,
{
    filter_by_substring(plays, PlayEvent::artist, needle)
}

/// Select plays from one of the given years.
///
/// An empty selection means “all years”, and keeps every play, also the ones
/// without a year. A non-empty selection drops plays without a year.
pub fn filter_years<'a, I>(plays: I, years: &[i32]) -> Vec<&'a PlayEvent>
where
    I: IntoIterator<Item = &'a PlayEvent>,
{
    if years.is_empty() {
        return plays.into_iter().collect()
    }
    plays
        .into_iter()
        .filter(|play| match play.year {
            Some(year) => years.contains(&year),
            None => false,
        })
        .collect()
}

#[cfg(test)]
mod test {
    use crate::prim::PlayEvent;
    use super::{by_artist, filter_by_substring, filter_years};

    fn play(artist: Option<&str>, album: Option<&str>, year: Option<i32>) -> PlayEvent {
        PlayEvent {
            artist: artist.map(String::from),
            album: album.map(String::from),
            year: year,
            ..PlayEvent::default()
        }
    }

    #[test]
    fn by_artist_is_case_insensitive_substring() {
        let plays = vec![
            play(Some("BTS"), None, None),
            play(Some("Jung Kook"), None, None),
            play(None, None, None),
            play(Some("RM & bts"), None, None),
            play(Some("Abtsy"), None, None),
        ];
        let selected = by_artist(&plays, "bts");
        assert_eq!(selected.len(), 3);
        assert!(std::ptr::eq(selected[0], &plays[0]));
        assert!(std::ptr::eq(selected[1], &plays[3]));
        assert!(std::ptr::eq(selected[2], &plays[4]));
    }

    #[test]
    fn filter_by_substring_works_on_other_fields() {
        let plays = vec![
            play(Some("BTS"), Some("Map of the Soul: 7"), None),
            play(Some("BTS"), Some("BE"), None),
        ];
        let selected = filter_by_substring(&plays, PlayEvent::album, "SOUL");
        assert_eq!(selected, vec![&plays[0]]);
    }

    #[test]
    fn empty_needle_matches_present_fields_only() {
        let plays = vec![play(Some("BTS"), None, None), play(None, None, None)];
        assert_eq!(by_artist(&plays, "").len(), 1);
    }

    #[test]
    fn filter_years_with_empty_selection_keeps_everything() {
        let plays = vec![play(None, None, Some(2019)), play(None, None, None)];
        assert_eq!(filter_years(&plays, &[]).len(), 2);
    }

    #[test]
    fn filter_years_drops_other_and_unknown_years() {
        let plays = vec![
            play(None, None, Some(2019)),
            play(None, None, None),
            play(None, None, Some(2020)),
            play(None, None, Some(2021)),
        ];
        let selected = filter_years(&plays, &[2019, 2021]);
        assert_eq!(selected, vec![&plays[0], &plays[3]]);
    }
}
