// Listenstat -- Aggregation engine for personal listening history
// Copyright 2026 The Listenstat Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! Primitive data types for listening history.

use chrono::Weekday;

use crate::aggregate::non_empty;

// Stats of a typical export at this point:
//
//     ~150k plays over ~6 years
//      ~12k distinct tracks
//       ~4k distinct artists
//       ~1k clustered sessions
//
// Everything fits in memory many times over, so records own their strings and
// the views borrow from them. There is no interning like in an index that has
// to be built once and queried for hours; here every view is a single linear
// scan, and the scan is cheap compared to reading the export in the first
// place.

/// The days of the week, in the order in which views report them.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Return the canonical English name of the day, e.g. “Monday”.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a canonical weekday name.
///
/// Unlike `Weekday::from_str`, this accepts only the full names as they appear
/// in the exports (“Monday”, not “mon” or “MONDAY”). Anything else is not one
/// of the seven days as far as the views are concerned.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    WEEKDAYS.iter().copied().find(|day| weekday_name(*day) == name)
}

/// One row of listening history: a track that was played at some moment.
///
/// Every field is optional, because exports routinely contain incomplete rows.
/// A view that needs a field that is absent skips the play; other views still
/// count it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayEvent {
    pub artist: Option<String>,
    pub track: Option<String>,
    pub album: Option<String>,

    /// Country code of the connection the play was streamed over.
    pub country: Option<String>,

    pub year: Option<i32>,

    /// Month of the year, 1 through 12.
    pub month: Option<u32>,

    /// Hour of the day, 0 through 23.
    pub hour: Option<u32>,

    pub day_of_week: Option<Weekday>,

    /// Duration of the playback in milliseconds.
    pub ms_played: Option<u64>,
}

impl PlayEvent {
    #[inline]
    pub fn artist(&self) -> Option<&str> {
        non_empty(self.artist.as_deref())
    }

    #[inline]
    pub fn track(&self) -> Option<&str> {
        non_empty(self.track.as_deref())
    }

    #[inline]
    pub fn album(&self) -> Option<&str> {
        non_empty(self.album.as_deref())
    }

    #[inline]
    pub fn country(&self) -> Option<&str> {
        non_empty(self.country.as_deref())
    }

    /// Return the month as `YYYY-MM`, if both the year and month are known.
    ///
    /// The month is zero-padded, so sorting the keys as strings sorts them
    /// chronologically.
    pub fn month_key(&self) -> Option<String> {
        match (self.year, self.month) {
            (Some(year), Some(month)) => Some(format!("{}-{:02}", year, month)),
            _ => None,
        }
    }
}

/// A listening session, labelled with a cluster by the offline clustering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusteredSession {
    pub cluster: Option<i64>,
    pub duration_minutes: Option<f64>,

    /// Average hour of the day of the plays in the session.
    ///
    /// This is fractional, a session that spans 22:00 to 23:00 has hour 22.5.
    pub hour: Option<f64>,

    pub day_of_week: Option<Weekday>,
}

#[cfg(test)]
mod test {
    use chrono::Weekday;
    use super::{PlayEvent, parse_weekday, weekday_name, WEEKDAYS};

    #[test]
    fn weekday_names_roundtrip_only_for_canonical_names() {
        for day in WEEKDAYS.iter() {
            assert_eq!(parse_weekday(weekday_name(*day)), Some(*day));
        }
        assert_eq!(parse_weekday("monday"), None);
        assert_eq!(parse_weekday("Mon"), None);
        assert_eq!(parse_weekday(""), None);
    }

    #[test]
    fn weekdays_start_on_monday() {
        assert_eq!(WEEKDAYS[0], Weekday::Mon);
        assert_eq!(WEEKDAYS[6], Weekday::Sun);
    }

    #[test]
    fn empty_strings_are_absent() {
        let play = PlayEvent {
            artist: Some("".to_string()),
            track: Some("Spring Day".to_string()),
            ..PlayEvent::default()
        };
        assert_eq!(play.artist(), None);
        assert_eq!(play.track(), Some("Spring Day"));
        assert_eq!(play.album(), None);
    }

    #[test]
    fn month_key_is_zero_padded() {
        let play = PlayEvent {
            year: Some(2021),
            month: Some(3),
            ..PlayEvent::default()
        };
        assert_eq!(play.month_key(), Some("2021-03".to_string()));

        let no_month = PlayEvent { year: Some(2021), ..PlayEvent::default() };
        assert_eq!(no_month.month_key(), None);
    }
}
