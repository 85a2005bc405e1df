// Listenstat -- Aggregation engine for personal listening history
// Copyright 2026 The Listenstat Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! The loaded records, and the views over them.

use std::collections::BTreeMap;

use chrono::Weekday;

use crate::aggregate::{KeyedTotal, RankedCount};
use crate::clusters::{self, ClusterStats};
use crate::filter;
use crate::insights::{self, Overview, SubjectStats};
use crate::prim::{ClusteredSession, PlayEvent};
use crate::ranking;
use crate::temporal;

/// Holds the records that all views are computed from.
///
/// The context is built once after loading. Views borrow from it and are
/// recomputed on every call; to see new data, load a new context.
pub struct Context {
    plays: Vec<PlayEvent>,

    /// The clustered sessions, or `None` if the clustering has not been run.
    sessions: Option<Vec<ClusteredSession>>,

    /// The years that the play views are restricted to, empty for all years.
    years: Vec<i32>,
}

/// The result of the cluster views together.
#[derive(Debug)]
pub struct ClusterViews {
    pub stats: BTreeMap<i64, ClusterStats>,
    pub distribution: KeyedTotal<i64>,
    pub points: BTreeMap<i64, Vec<(f64, f64)>>,
}

/// The headline figures for the current selection.
#[derive(Debug)]
pub struct Insights<'a> {
    pub overview: Overview<'a>,
    pub peak_hour: Option<u32>,
    pub most_active_day: Option<Weekday>,
    pub first_month: Option<String>,
    pub last_month: Option<String>,
}

impl Context {
    pub fn new(plays: Vec<PlayEvent>, sessions: Option<Vec<ClusteredSession>>) -> Context {
        Context {
            plays: plays,
            sessions: sessions,
            years: Vec::new(),
        }
    }

    /// Restrict the play views to the given years. Empty selects all years.
    pub fn with_years(mut self, years: Vec<i32>) -> Context {
        self.years = years;
        self
    }

    pub fn sessions(&self) -> Option<&[ClusteredSession]> {
        self.sessions.as_deref()
    }

    /// The plays in the selected years, in their original order.
    pub fn selected(&self) -> Vec<&PlayEvent> {
        filter::filter_years(&self.plays, &self.years)
    }

    pub fn overview(&self) -> Overview {
        insights::overview(&self.selected())
    }

    pub fn by_year(&self) -> KeyedTotal<i32> {
        temporal::by_year(self.selected())
    }

    pub fn by_month(&self) -> KeyedTotal<String> {
        temporal::by_month(self.selected())
    }

    pub fn by_hour(&self) -> KeyedTotal<u32> {
        temporal::by_hour(self.selected())
    }

    pub fn by_day_of_week(&self) -> KeyedTotal<Weekday> {
        temporal::by_day_of_week(self.selected())
    }

    pub fn abroad(&self, home_country: &str) -> KeyedTotal<(i32, &str)> {
        temporal::abroad_by_year_and_country(self.selected(), home_country)
    }

    pub fn top_artists(&self, n: usize) -> RankedCount<&str> {
        ranking::top_artists(self.selected(), n)
    }

    pub fn top_tracks(&self, n: usize) -> RankedCount<&str> {
        ranking::top_tracks(self.selected(), n)
    }

    /// The plays by artists matching `subject`, within the selected years.
    pub fn subject(&self, subject: &str) -> Vec<&PlayEvent> {
        filter::by_artist(self.selected(), subject)
    }

    pub fn subject_stats(&self, subject: &str) -> SubjectStats {
        insights::subject_stats(self.subject(subject))
    }

    pub fn subject_top_tracks(&self, subject: &str, n: usize) -> RankedCount<&str> {
        ranking::subject_top_tracks(self.selected(), subject, n)
    }

    pub fn subject_top_albums(&self, subject: &str, n: usize) -> RankedCount<&str> {
        ranking::subject_top_albums(self.selected(), subject, n)
    }

    /// Listening time per year for the subject.
    pub fn subject_by_year(&self, subject: &str) -> KeyedTotal<i32> {
        temporal::by_year(self.subject(subject))
    }

    /// The cluster views, or `None` if there are no clusters yet.
    ///
    /// The sessions are not restricted by the year selection; they carry no
    /// year.
    pub fn clusters(&self) -> Option<ClusterViews> {
        let sessions = self.sessions()?;
        let views = ClusterViews {
            stats: clusters::summarize_clusters(sessions),
            distribution: clusters::cluster_distribution(sessions),
            points: clusters::cluster_points(sessions),
        };
        Some(views)
    }

    pub fn insights(&self) -> Insights {
        let by_month = self.by_month();
        let span = insights::data_span(&by_month);
        Insights {
            overview: self.overview(),
            peak_hour: insights::peak_hour(&self.by_hour()),
            most_active_day: insights::most_active_day(&self.by_day_of_week()),
            first_month: span.map(|(first, _)| first.to_string()),
            last_month: span.map(|(_, last)| last.to_string()),
        }
    }
}
