// Listenstat -- Aggregation engine for personal listening history
// Copyright 2026 The Listenstat Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! Headline figures derived from the plays and from the other views.

use std::collections::HashSet;

use chrono::Weekday;

use crate::prim::PlayEvent;
use crate::ranking;
use crate::temporal::{self, ms_to_hours};

/// Total listening time in milliseconds, saturating at `u64::MAX`.
pub fn total_ms<'a, I>(plays: I) -> u64
where
    I: IntoIterator<Item = &'a PlayEvent>,
{
    plays
        .into_iter()
        .filter_map(|p| p.ms_played)
        .fold(0, u64::saturating_add)
}

/// Number of distinct non-empty values of a field.
fn count_distinct<'a, I, F>(plays: I, mut field_fn: F) -> u64
where
    I: IntoIterator<Item = &'a PlayEvent>,
    F: FnMut(&'a PlayEvent) -> Option<&'a str>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    for play in plays {
        if let Some(value) = field_fn(play) {
            seen.insert(value);
        }
    }
    seen.len() as u64
}

#[derive(Clone, Debug, PartialEq)]
pub struct Overview<'a> {
    pub total_ms: u64,

    /// Total listening time in hours, not rounded.
    pub total_hours: f64,

    /// Total listening time in days of 24 hours, not rounded.
    pub total_days: f64,

    /// Total hours divided by the number of years with plays, not rounded.
    pub avg_hours_per_year: Option<f64>,

    pub distinct_artists: u64,
    pub distinct_tracks: u64,

    /// The most played artist and its play count, if there are any artists.
    pub top_artist: Option<(&'a str, u64)>,

    /// The most played track and its play count, if there are any tracks.
    pub top_track: Option<(&'a str, u64)>,
}

pub fn overview<'a>(plays: &[&'a PlayEvent]) -> Overview<'a> {
    let ms = total_ms(plays.iter().copied());
    let hours = ms_to_hours(ms);
    let n_years = temporal::by_year(plays.iter().copied()).len();
    Overview {
        total_ms: ms,
        total_hours: hours,
        total_days: hours / 24.0,
        avg_hours_per_year: match n_years {
            0 => None,
            n => Some(hours / n as f64),
        },
        distinct_artists: count_distinct(plays.iter().copied(), PlayEvent::artist),
        distinct_tracks: count_distinct(plays.iter().copied(), PlayEvent::track),
        top_artist: ranking::top_artists(plays.iter().copied(), 1).into_iter().next(),
        top_track: ranking::top_tracks(plays.iter().copied(), 1).into_iter().next(),
    }
}

/// Return the key with the largest total; the first one among equals.
fn first_max<K: Copy>(totals: &[(K, u64)]) -> Option<K> {
    let mut best: Option<(K, u64)> = None;
    for &(k, v) in totals {
        match best {
            Some((_, best_v)) if best_v >= v => continue,
            _ => best = Some((k, v)),
        }
    }
    best.map(|(k, _)| k)
}

/// The hour of the day with the most listening time.
///
/// Takes the output of `temporal::by_hour`, which is ascending, so on a tie
/// the earliest hour wins.
pub fn peak_hour(by_hour: &[(u32, u64)]) -> Option<u32> {
    first_max(by_hour)
}

/// The day of the week with the most listening time.
///
/// Takes the output of `temporal::by_day_of_week`, so on a tie the earliest
/// day, starting from Monday, wins. Because that view is zero-filled, this is
/// Monday when there are no plays at all.
pub fn most_active_day(by_day: &[(Weekday, u64)]) -> Option<Weekday> {
    first_max(by_day)
}

/// The first and last month with plays, from the output of `temporal::by_month`.
pub fn data_span(by_month: &[(String, u64)]) -> Option<(&str, &str)> {
    match (by_month.first(), by_month.last()) {
        (Some(first), Some(last)) => Some((&first.0[..], &last.0[..])),
        _ => None,
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SubjectStats {
    pub plays: u64,
    pub total_ms: u64,
    pub distinct_tracks: u64,
    pub distinct_albums: u64,
}

/// Summarize a set of plays, typically the result of `filter::by_artist`.
pub fn subject_stats<'a, I>(plays: I) -> SubjectStats
where
    I: IntoIterator<Item = &'a PlayEvent>,
{
    let plays: Vec<&PlayEvent> = plays.into_iter().collect();
    SubjectStats {
        plays: plays.len() as u64,
        total_ms: total_ms(plays.iter().copied()),
        distinct_tracks: count_distinct(plays.iter().copied(), PlayEvent::track),
        distinct_albums: count_distinct(plays.iter().copied(), PlayEvent::album),
    }
}

#[cfg(test)]
mod test {
    use chrono::Weekday;

    use crate::filter;
    use crate::prim::PlayEvent;
    use crate::temporal;
    use super::{data_span, most_active_day, overview, peak_hour, subject_stats, total_ms};

    fn play(artist: &str, track: &str, album: &str, ms: u64) -> PlayEvent {
        PlayEvent {
            artist: Some(artist.to_string()),
            track: Some(track.to_string()),
            album: Some(album.to_string()),
            ms_played: Some(ms),
            ..PlayEvent::default()
        }
    }

    #[test]
    fn total_ms_skips_unknown_durations() {
        let plays = vec![
            play("BTS", "Butter", "Butter", 1000),
            PlayEvent::default(),
            play("IU", "Celebrity", "LILAC", 500),
        ];
        assert_eq!(total_ms(&plays), 1500);
    }

    #[test]
    fn overview_reports_totals_and_leaders() {
        let plays = vec![
            play("IU", "Celebrity", "LILAC", 3_600_000),
            play("BTS", "Butter", "Butter", 3_600_000 * 23),
            play("BTS", "Dynamite", "BE", 0),
        ];
        let all: Vec<&PlayEvent> = plays.iter().collect();
        let o = overview(&all);
        assert_eq!(o.total_ms, 86_400_000);
        assert_eq!(o.total_hours, 24.0);
        assert_eq!(o.total_days, 1.0);
        assert_eq!(o.distinct_artists, 2);
        assert_eq!(o.distinct_tracks, 3);
        assert_eq!(o.top_artist, Some(("BTS", 2)));
        // All tracks are tied, the first one seen wins.
        assert_eq!(o.top_track, Some(("Celebrity", 1)));
    }

    #[test]
    fn overview_of_nothing_has_no_leaders() {
        let o = overview(&[]);
        assert_eq!(o.total_ms, 0);
        assert_eq!(o.avg_hours_per_year, None);
        assert_eq!(o.distinct_artists, 0);
        assert_eq!(o.top_artist, None);
        assert_eq!(o.top_track, None);
    }

    #[test]
    fn overview_averages_hours_over_years_with_plays() {
        let mut plays = vec![
            play("IU", "Celebrity", "LILAC", 3_600_000),
            play("BTS", "Butter", "Butter", 7_200_000),
            play("BTS", "Butter", "Butter", 3_600_000),
        ];
        plays[0].year = Some(2019);
        plays[1].year = Some(2021);
        // Without a year, it still counts towards the total hours.
        plays[2].year = None;
        let all: Vec<&PlayEvent> = plays.iter().collect();
        let o = overview(&all);
        assert_eq!(o.total_hours, 4.0);
        assert_eq!(o.avg_hours_per_year, Some(2.0));
        assert_eq!(o.distinct_artists, 2);
        assert_eq!(o.distinct_tracks, 2);
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let big = i64::MAX as u64;
        let plays = vec![
            play("BTS", "Butter", "Butter", big),
            play("BTS", "Butter", "Butter", big),
            play("BTS", "Butter", "Butter", big),
        ];
        assert_eq!(total_ms(&plays), u64::MAX);
        assert_eq!(subject_stats(&plays).total_ms, u64::MAX);
    }

    #[test]
    fn peak_hour_prefers_earliest_on_tie() {
        assert_eq!(peak_hour(&[(3, 10), (9, 30), (21, 30), (22, 5)]), Some(9));
        assert_eq!(peak_hour(&[]), None);
    }

    #[test]
    fn most_active_day_is_monday_without_plays() {
        let empty: Vec<PlayEvent> = Vec::new();
        let days = temporal::by_day_of_week(&empty);
        assert_eq!(most_active_day(&days), Some(Weekday::Mon));
        assert_eq!(most_active_day(&[]), None);

        let plays = vec![
            PlayEvent { day_of_week: Some(Weekday::Sat), ms_played: Some(7), ..PlayEvent::default() },
            PlayEvent { day_of_week: Some(Weekday::Tue), ms_played: Some(7), ..PlayEvent::default() },
        ];
        let days = temporal::by_day_of_week(&plays);
        assert_eq!(most_active_day(&days), Some(Weekday::Tue));
    }

    #[test]
    fn data_span_takes_first_and_last_month() {
        let months = vec![
            ("2019-04".to_string(), 1),
            ("2020-01".to_string(), 1),
            ("2023-12".to_string(), 1),
        ];
        assert_eq!(data_span(&months), Some(("2019-04", "2023-12")));
        assert_eq!(data_span(&[]), None);
    }

    #[test]
    fn subject_stats_counts_distinct_tracks_and_albums() {
        let plays = vec![
            play("BTS", "Butter", "Butter", 100),
            play("BTS", "Butter", "Butter", 100),
            play("IU", "Celebrity", "LILAC", 100),
            play("BTS", "Dynamite", "BE", 50),
            play("BTS", "Life Goes On", "BE", 25),
        ];
        let stats = subject_stats(filter::by_artist(&plays, "bts"));
        assert_eq!(stats.plays, 4);
        assert_eq!(stats.total_ms, 275);
        assert_eq!(stats.distinct_tracks, 3);
        assert_eq!(stats.distinct_albums, 2);
    }
}
