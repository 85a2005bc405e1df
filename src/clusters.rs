// Listenstat -- Aggregation engine for personal listening history
// Copyright 2026 The Listenstat Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! Statistics per listening-session cluster.
//!
//! The cluster labels come from an offline clustering run; this module only
//! summarizes the sessions per label.

use std::collections::BTreeMap;

use crate::aggregate::{sum_by, KeyedTotal, Order};
use crate::prim::ClusteredSession;
use crate::weekday_table::WeekdayTable;

#[derive(Clone, Debug, PartialEq)]
pub struct ClusterStats {
    /// Number of sessions in the cluster.
    pub count: u64,

    /// Mean duration in minutes, over the sessions with a finite duration.
    pub mean_duration: f64,

    /// Mean hour of the day, over the sessions with a finite hour.
    pub mean_hour: f64,

    /// Number of sessions per day of the week.
    pub weekday_histogram: WeekdayTable<u64>,
}

/// Running sum and count, for a mean that ignores undefined samples.
#[derive(Copy, Clone, Default)]
struct Mean {
    sum: f64,
    n: u64,
}

impl Mean {
    fn push(&mut self, x: Option<f64>) {
        if let Some(x) = x {
            if x.is_finite() {
                self.sum += x;
                self.n += 1;
            }
        }
    }

    /// Return the mean, or 0 if there were no samples.
    fn get(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.sum / self.n as f64
        }
    }
}

#[derive(Default)]
struct Accumulator {
    count: u64,
    duration: Mean,
    hour: Mean,
    weekdays: WeekdayTable<u64>,
}

/// Summarize the sessions per cluster, in ascending cluster order.
///
/// Sessions without a cluster label are ignored entirely. A session with a
/// label but with an undefined duration or hour still counts, it is only left
/// out of that particular mean.
pub fn summarize_clusters(sessions: &[ClusteredSession]) -> BTreeMap<i64, ClusterStats> {
    let mut accs: BTreeMap<i64, Accumulator> = BTreeMap::new();

    for session in sessions {
        let cluster = match session.cluster {
            Some(c) => c,
            None => continue,
        };
        let acc = accs.entry(cluster).or_default();
        acc.count += 1;
        acc.duration.push(session.duration_minutes);
        acc.hour.push(session.hour);
        if let Some(day) = session.day_of_week {
            *acc.weekdays.get_mut(day) += 1;
        }
    }

    accs
        .into_iter()
        .map(|(cluster, acc)| {
            let stats = ClusterStats {
                count: acc.count,
                mean_duration: acc.duration.get(),
                mean_hour: acc.hour.get(),
                weekday_histogram: acc.weekdays,
            };
            (cluster, stats)
        })
        .collect()
}

/// Number of sessions per cluster, in ascending cluster order.
pub fn cluster_distribution(sessions: &[ClusteredSession]) -> KeyedTotal<i64> {
    sum_by(sessions, Order::Ascending, |s| s.cluster, |_| Some(1_u64))
}

/// The (hour, duration) pairs per cluster, for plotting duration against time
/// of day.
///
/// Sessions where either coordinate is undefined or not finite are left out,
/// there is no sensible place to plot them.
pub fn cluster_points(sessions: &[ClusteredSession]) -> BTreeMap<i64, Vec<(f64, f64)>> {
    let mut points: BTreeMap<i64, Vec<(f64, f64)>> = BTreeMap::new();
    for session in sessions {
        match (session.cluster, session.hour, session.duration_minutes) {
            (Some(c), Some(h), Some(d)) if h.is_finite() && d.is_finite() => {
                points.entry(c).or_default().push((h, d));
            }
            _ => continue,
        }
    }
    points
}
