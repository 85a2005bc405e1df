// Listenstat -- Aggregation engine for personal listening history
// Copyright 2026 The Listenstat Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! Logic for serializing the views to json.
//!
//! Listening time is written both as the exact number of milliseconds, and as
//! hours rounded to one decimal, which is what gets displayed.

use serde_json;

use std::io;
use std::io::Write;

use chrono::Weekday;

use crate::context::{ClusterViews, Insights};
use crate::insights::{Overview, SubjectStats};
use crate::prim::weekday_name;
use crate::temporal::{hours_rounded, round_tenth};

/// A value that can be written as a json value.
pub trait JsonValue {
    fn write_json<W: Write>(&self, w: W) -> io::Result<()>;
}

impl JsonValue for i32 {
    fn write_json<W: Write>(&self, mut w: W) -> io::Result<()> {
        write!(w, "{}", self)
    }
}

impl JsonValue for u32 {
    fn write_json<W: Write>(&self, mut w: W) -> io::Result<()> {
        write!(w, "{}", self)
    }
}

impl JsonValue for i64 {
    fn write_json<W: Write>(&self, mut w: W) -> io::Result<()> {
        write!(w, "{}", self)
    }
}

impl JsonValue for u64 {
    fn write_json<W: Write>(&self, mut w: W) -> io::Result<()> {
        write!(w, "{}", self)
    }
}

impl JsonValue for f64 {
    fn write_json<W: Write>(&self, w: W) -> io::Result<()> {
        // Writes null for NaN and infinities.
        serde_json::to_writer(w, self)?;
        Ok(())
    }
}

impl JsonValue for str {
    fn write_json<W: Write>(&self, w: W) -> io::Result<()> {
        serde_json::to_writer(w, self)?;
        Ok(())
    }
}

impl JsonValue for String {
    fn write_json<W: Write>(&self, w: W) -> io::Result<()> {
        self[..].write_json(w)
    }
}

impl<'a, T: JsonValue + ?Sized> JsonValue for &'a T {
    fn write_json<W: Write>(&self, w: W) -> io::Result<()> {
        (**self).write_json(w)
    }
}

impl JsonValue for Weekday {
    fn write_json<W: Write>(&self, w: W) -> io::Result<()> {
        weekday_name(*self).write_json(w)
    }
}

impl<T: JsonValue> JsonValue for Option<T> {
    fn write_json<W: Write>(&self, mut w: W) -> io::Result<()> {
        match self {
            Some(v) => v.write_json(w),
            None => write!(w, "null"),
        }
    }
}

/// Write a per-key listening time view, e.g. `temporal::by_year`.
///
/// Every entry is an object with the key under `key_name`.
pub fn write_totals_json<W: Write, K: JsonValue>(
    mut w: W,
    key_name: &str,
    totals: &[(K, u64)],
) -> io::Result<()> {
    write!(w, "[")?;
    let mut first = true;
    for (key, ms) in totals {
        if !first { write!(w, ",")?; }
        write!(w, "{{")?;
        key_name.write_json(&mut w)?;
        write!(w, ":")?;
        key.write_json(&mut w)?;
        write!(w, r#","ms_played":{},"hours":"#, ms)?;
        hours_rounded(*ms).write_json(&mut w)?;
        write!(w, "}}")?;
        first = false;
    }
    write!(w, "]")
}

/// Write the listening abroad view, keyed on year and country.
pub fn write_abroad_json<W: Write>(mut w: W, totals: &[((i32, &str), u64)]) -> io::Result<()> {
    write!(w, "[")?;
    let mut first = true;
    for &((year, country), ms) in totals {
        if !first { write!(w, ",")?; }
        write!(w, r#"{{"year":{},"country":"#, year)?;
        country.write_json(&mut w)?;
        write!(w, r#","ms_played":{},"hours":"#, ms)?;
        hours_rounded(ms).write_json(&mut w)?;
        write!(w, "}}")?;
        first = false;
    }
    write!(w, "]")
}

/// Write a ranking as objects with the key under `key_name`, and `plays`.
pub fn write_ranking_json<W: Write>(
    mut w: W,
    key_name: &str,
    ranking: &[(&str, u64)],
) -> io::Result<()> {
    write!(w, "[")?;
    let mut first = true;
    for &(key, count) in ranking {
        if !first { write!(w, ",")?; }
        write!(w, "{{")?;
        key_name.write_json(&mut w)?;
        write!(w, ":")?;
        key.write_json(&mut w)?;
        write!(w, r#","plays":{}}}"#, count)?;
        first = false;
    }
    write!(w, "]")
}

/// Write the cluster views, or `null` if there are no clusters yet.
pub fn write_clusters_json<W: Write>(mut w: W, views: Option<&ClusterViews>) -> io::Result<()> {
    let views = match views {
        Some(v) => v,
        None => return write!(w, "null"),
    };

    write!(w, r#"{{"clusters":["#)?;
    let mut first = true;
    for (cluster, stats) in views.stats.iter() {
        if !first { write!(w, ",")?; }
        write!(w, r#"{{"cluster":{},"count":{},"mean_duration":"#, cluster, stats.count)?;
        stats.mean_duration.write_json(&mut w)?;
        write!(w, r#","mean_duration_rounded":"#)?;
        round_tenth(stats.mean_duration).write_json(&mut w)?;
        write!(w, r#","mean_hour":"#)?;
        stats.mean_hour.write_json(&mut w)?;
        write!(w, r#","mean_hour_rounded":"#)?;
        round_tenth(stats.mean_hour).write_json(&mut w)?;
        write!(w, r#","weekdays":{{"#)?;
        let mut first_day = true;
        for (day, n) in stats.weekday_histogram.iter() {
            if !first_day { write!(w, ",")?; }
            day.write_json(&mut w)?;
            write!(w, ":{}", n)?;
            first_day = false;
        }
        write!(w, r#"}},"points":["#)?;
        let points = views.points.get(cluster).map(|ps| &ps[..]).unwrap_or(&[]);
        let mut first_point = true;
        for &(hour, duration) in points {
            if !first_point { write!(w, ",")?; }
            write!(w, "[")?;
            hour.write_json(&mut w)?;
            write!(w, ",")?;
            duration.write_json(&mut w)?;
            write!(w, "]")?;
            first_point = false;
        }
        write!(w, "]}}")?;
        first = false;
    }

    write!(w, r#"],"distribution":["#)?;
    let mut first = true;
    for &(cluster, count) in views.distribution.iter() {
        if !first { write!(w, ",")?; }
        write!(w, r#"{{"cluster":{},"sessions":{}}}"#, cluster, count)?;
        first = false;
    }
    write!(w, "]}}")
}

fn write_overview_fields<W: Write>(mut w: W, overview: &Overview) -> io::Result<()> {
    write!(w, r#""ms_played":{},"hours":"#, overview.total_ms)?;
    round_tenth(overview.total_hours).write_json(&mut w)?;
    write!(w, r#","days":"#)?;
    round_tenth(overview.total_days).write_json(&mut w)?;
    write!(w, r#","avg_hours_per_year":"#)?;
    overview.avg_hours_per_year.map(round_tenth).write_json(&mut w)?;
    write!(
        w,
        r#","distinct_artists":{},"distinct_songs":{}"#,
        overview.distinct_artists, overview.distinct_tracks,
    )?;
    write!(w, r#","top_artist":"#)?;
    overview.top_artist.map(|(artist, _)| artist).write_json(&mut w)?;
    write!(w, r#","top_artist_plays":"#)?;
    overview.top_artist.map(|(_, n)| n).write_json(&mut w)?;
    write!(w, r#","top_song":"#)?;
    overview.top_track.map(|(track, _)| track).write_json(&mut w)?;
    write!(w, r#","top_song_plays":"#)?;
    overview.top_track.map(|(_, n)| n).write_json(&mut w)
}

pub fn write_overview_json<W: Write>(mut w: W, overview: &Overview) -> io::Result<()> {
    write!(w, "{{")?;
    write_overview_fields(&mut w, overview)?;
    write!(w, "}}")
}

pub fn write_insights_json<W: Write>(mut w: W, insights: &Insights) -> io::Result<()> {
    write!(w, "{{")?;
    write_overview_fields(&mut w, &insights.overview)?;
    write!(w, r#","peak_hour":"#)?;
    insights.peak_hour.write_json(&mut w)?;
    write!(w, r#","most_active_day":"#)?;
    insights.most_active_day.write_json(&mut w)?;
    write!(w, r#","first_month":"#)?;
    insights.first_month.write_json(&mut w)?;
    write!(w, r#","last_month":"#)?;
    insights.last_month.write_json(&mut w)?;
    write!(w, "}}")
}

/// Write the deep dive into one artist.
pub fn write_subject_json<W: Write>(
    mut w: W,
    subject: &str,
    stats: &SubjectStats,
    by_year: &[(i32, u64)],
    top_songs: &[(&str, u64)],
    top_albums: &[(&str, u64)],
) -> io::Result<()> {
    write!(w, r#"{{"subject":"#)?;
    subject.write_json(&mut w)?;
    write!(
        w,
        r#","plays":{},"ms_played":{},"distinct_songs":{},"distinct_albums":{},"hours":"#,
        stats.plays, stats.total_ms, stats.distinct_tracks, stats.distinct_albums,
    )?;
    hours_rounded(stats.total_ms).write_json(&mut w)?;
    write!(w, r#","years":"#)?;
    write_totals_json(&mut w, "year", by_year)?;
    write!(w, r#","top_songs":"#)?;
    write_ranking_json(&mut w, "song", top_songs)?;
    write!(w, r#","top_albums":"#)?;
    write_ranking_json(&mut w, "album", top_albums)?;
    write!(w, "}}")
}
