// Listenstat -- Aggregation engine for personal listening history
// Copyright 2026 The Listenstat Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! Listening time per year, month, hour, and day of the week.
//!
//! All views here sum `ms_played` and report raw milliseconds. Conversion to
//! hours is a presentation concern, but it has to be done the same way
//! everywhere, so it lives here too, see `hours_rounded`.

use chrono::Weekday;

use crate::aggregate::{sum_by, KeyedTotal, Order};
use crate::prim::{PlayEvent, WEEKDAYS};
use crate::weekday_table::WeekdayTable;

pub const MS_PER_HOUR: u64 = 3_600_000;

/// Convert milliseconds to (fractional) hours.
#[inline]
pub fn ms_to_hours(ms: u64) -> f64 {
    ms as f64 / MS_PER_HOUR as f64
}

/// Round to one decimal, with halves rounding up.
///
/// This is `Math.round(x * 10) / 10` as the charts have always displayed it.
/// Note that this is neither `f64::round` (which rounds halves away from zero,
/// that differs for negative numbers) nor banker’s rounding: 0.25 becomes 0.3.
#[inline]
pub fn round_tenth(x: f64) -> f64 {
    (x * 10.0 + 0.5).floor() / 10.0
}

/// Convert milliseconds to hours, rounded to one decimal for display.
pub fn hours_rounded(ms: u64) -> f64 {
    round_tenth(ms_to_hours(ms))
}

/// Listening time per year, ascending by year.
pub fn by_year<'a, I>(plays: I) -> KeyedTotal<i32>
where
    I: IntoIterator<Item = &'a PlayEvent>,
{
    sum_by(plays, Order::Ascending, |p| p.year, |p| p.ms_played)
}

/// Listening time per month, keyed `YYYY-MM`, in chronological order.
///
/// Plays with an unknown year or month are left out. Months without plays are
/// absent, not zero.
pub fn by_month<'a, I>(plays: I) -> KeyedTotal<String>
where
    I: IntoIterator<Item = &'a PlayEvent>,
{
    sum_by(plays, Order::Ascending, PlayEvent::month_key, |p| p.ms_played)
}

/// Listening time per hour of the day, ascending.
///
/// Hours without plays are absent, not zero.
pub fn by_hour<'a, I>(plays: I) -> KeyedTotal<u32>
where
    I: IntoIterator<Item = &'a PlayEvent>,
{
    sum_by(plays, Order::Ascending, |p| p.hour, |p| p.ms_played)
}

/// Listening time per day of the week, always all seven days, Monday first.
///
/// Unlike the other views, days without plays are reported with a total of 0.
/// A weekly pattern with a missing day cannot be read.
pub fn by_day_of_week<'a, I>(plays: I) -> KeyedTotal<Weekday>
where
    I: IntoIterator<Item = &'a PlayEvent>,
{
    // Weekday is not `Ord`, group by its index and map back.
    let sums = sum_by(
        plays,
        Order::Ascending,
        |p| p.day_of_week.map(|d| d.num_days_from_monday()),
        |p| p.ms_played,
    );

    let mut table = WeekdayTable::<u64>::new();
    for (i, ms) in sums {
        *table.get_mut(WEEKDAYS[i as usize]) = ms;
    }
    table.to_vec()
}

/// Listening time outside the home country, per year and country.
///
/// Plays without a country, or from the home country, are left out. The
/// comparison with `home_country` is exact, country codes are upper case.
pub fn abroad_by_year_and_country<'a, I>(plays: I, home_country: &str) -> KeyedTotal<(i32, &'a str)>
where
    I: IntoIterator<Item = &'a PlayEvent>,
{
    sum_by(
        plays,
        Order::Ascending,
        |p| match (p.year, p.country()) {
            (Some(year), Some(country)) if country != home_country => Some((year, country)),
            _ => None,
        },
        |p| p.ms_played,
    )
}
