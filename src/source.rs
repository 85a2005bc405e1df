// Listenstat -- Aggregation engine for personal listening history
// Copyright 2026 The Listenstat Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! Reading the exported plays and sessions tables.
//!
//! Both tables are csv files with a header row. Columns are found by name,
//! unknown columns are ignored. Values are coerced into typed records here,
//! once; a value that cannot be coerced becomes an absent field, not an error,
//! so that one odd cell does not cost us the entire row.

use std::collections::HashMap;
use std::convert::TryFrom;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::prim::{parse_weekday, ClusteredSession, PlayEvent};

/// Maps column names to their index.
struct Header {
    columns: HashMap<String, usize>,
}

impl Header {
    fn new(fields: &StringRecord) -> Header {
        let mut columns = HashMap::new();
        for (i, name) in fields.iter().enumerate() {
            // On a duplicate column, the first one wins.
            let name = name.trim_start_matches('\u{feff}').trim();
            columns.entry(name.to_string()).or_insert(i);
        }
        Header { columns: columns }
    }

    /// Return the index of the first of `names` that is a column.
    fn find(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|name| self.columns.get(*name).copied())
    }
}

/// Return the value in the given column, if there is a non-empty one.
fn field(record: &StringRecord, column: Option<usize>) -> Option<&str> {
    let value = record.get(column?)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_string(record: &StringRecord, column: Option<usize>) -> Option<String> {
    field(record, column).map(String::from)
}

/// Parse an integer, also when it is written as an integral float.
///
/// A column with missing values is a float column in a dataframe, so a year
/// can come out as `2020.0`. Fractional values do not coerce.
pub fn parse_integer(value: &str) -> Option<i64> {
    if let Ok(n) = i64::from_str(value) {
        return Some(n)
    }
    let x = f64::from_str(value).ok()?;
    // The bounds are exact powers of two, so the comparison is exact too.
    let in_range = x >= -9_223_372_036_854_775_808.0 && x < 9_223_372_036_854_775_808.0;
    if x.is_finite() && x.fract() == 0.0 && in_range {
        Some(x as i64)
    } else {
        None
    }
}

/// Parse a finite float.
pub fn parse_float(value: &str) -> Option<f64> {
    match f64::from_str(value) {
        Ok(x) if x.is_finite() => Some(x),
        _ => None,
    }
}

fn parse_in_range<T: TryFrom<i64>>(value: Option<&str>, min: i64, max: i64) -> Option<T> {
    match value.and_then(parse_integer) {
        Some(n) if n >= min && n <= max => T::try_from(n).ok(),
        _ => None,
    }
}

fn csv_error(err: csv::Error) -> Error {
    let line = err.position().map(|pos| pos.line() as usize).unwrap_or(0);
    match err.into_kind() {
        csv::ErrorKind::Io(io_err) => Error::IoError(io_err),
        csv::ErrorKind::Utf8 { .. } => Error::InvalidCsv(line, "Invalid utf-8."),
        _ => Error::InvalidCsv(line, "Malformed record."),
    }
}

/// Read the header and all records of a csv table.
///
/// Quoted fields may contain commas, doubled quotes, and line breaks. Rows may
/// be shorter or longer than the header, missing cells are absent. Returns
/// `None` when there is not even a header.
fn read_table<R: io::Read>(reader: R) -> Result<Option<(Header, Vec<StringRecord>)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header_record = reader.headers().map_err(csv_error)?;
    if header_record.is_empty() {
        return Ok(None)
    }
    let header = Header::new(header_record);

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record.map_err(csv_error)?);
    }

    Ok(Some((header, rows)))
}

/// Parse the plays table.
pub fn parse_plays<R: io::Read>(reader: R) -> Result<Vec<PlayEvent>> {
    let (header, rows) = match read_table(reader)? {
        Some(table) => table,
        None => return Ok(Vec::new()),
    };

    let col_artist = header.find(&["artist"]);
    let col_track = header.find(&["track"]);
    let col_album = header.find(&["album"]);
    let col_country = header.find(&["country"]);
    let col_year = header.find(&["year"]);
    let col_month = header.find(&["month"]);
    let col_hour = header.find(&["hour"]);
    let col_day = header.find(&["day_of_week"]);
    let col_ms = header.find(&["ms_played"]);

    let mut plays = Vec::with_capacity(rows.len());
    let mut n_without_duration = 0_usize;

    for record in rows {
        let play = PlayEvent {
            artist: parse_string(&record, col_artist),
            track: parse_string(&record, col_track),
            album: parse_string(&record, col_album),
            country: parse_string(&record, col_country),
            year: parse_in_range(field(&record, col_year), i32::MIN as i64, i32::MAX as i64),
            month: parse_in_range(field(&record, col_month), 1, 12),
            hour: parse_in_range(field(&record, col_hour), 0, 23),
            day_of_week: field(&record, col_day).and_then(parse_weekday),
            ms_played: parse_in_range(field(&record, col_ms), 0, i64::MAX),
        };
        if play.ms_played.is_none() {
            n_without_duration += 1;
        }
        plays.push(play);
    }

    if n_without_duration > 0 {
        debug!(count = n_without_duration, "Plays without a valid duration, skipped in sums.");
    }

    Ok(plays)
}

/// Parse the clustered sessions table.
///
/// Returns `None` when the table has no `cluster` column, which is what the
/// sessions table looks like before the clustering has been run.
pub fn parse_sessions<R: io::Read>(reader: R) -> Result<Option<Vec<ClusteredSession>>> {
    let (header, rows) = match read_table(reader)? {
        Some(table) => table,
        None => return Ok(None),
    };

    let col_cluster = header.find(&["cluster"]);
    if col_cluster.is_none() {
        return Ok(None)
    }
    let col_duration = header.find(&["duration_minutes", "session_duration_minutes"]);
    let col_hour = header.find(&["hour", "avg_hour"]);
    let col_day = header.find(&["day_of_week"]);

    let mut sessions = Vec::with_capacity(rows.len());
    let mut n_unlabelled = 0_usize;

    for record in rows {
        let session = ClusteredSession {
            cluster: field(&record, col_cluster).and_then(parse_integer),
            duration_minutes: field(&record, col_duration).and_then(parse_float),
            hour: field(&record, col_hour).and_then(parse_float),
            day_of_week: field(&record, col_day).and_then(parse_weekday),
        };
        if session.cluster.is_none() {
            n_unlabelled += 1;
        }
        sessions.push(session);
    }

    if n_unlabelled > 0 {
        debug!(count = n_unlabelled, "Sessions without a cluster label, skipped in cluster views.");
    }

    Ok(Some(sessions))
}

/// Read and parse the plays table from a file.
pub fn load_plays(path: &Path) -> Result<Vec<PlayEvent>> {
    let file = fs::File::open(path)?;
    let plays = parse_plays(io::BufReader::new(file))?;
    info!(path = %path.display(), count = plays.len(), "Loaded plays.");
    Ok(plays)
}

/// Read and parse the sessions table from a file.
///
/// A file that does not exist is not an error, it means that there are no
/// clusters yet, the same as a file without a `cluster` column.
pub fn load_sessions(path: &Path) -> Result<Option<Vec<ClusteredSession>>> {
    let file = match fs::File::open(path) {
        Ok(f) => f,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Sessions file does not exist, no clusters yet.");
            return Ok(None)
        }
        Err(err) => return Err(err.into()),
    };

    let sessions = parse_sessions(io::BufReader::new(file))?;
    match sessions.as_ref() {
        Some(ss) => info!(path = %path.display(), count = ss.len(), "Loaded sessions."),
        None => warn!(path = %path.display(), "Sessions file has no cluster column, no clusters yet."),
    }
    Ok(sessions)
}

#[cfg(test)]
mod test {
    use chrono::Weekday;

    use crate::error::Error;
    use crate::prim::{ClusteredSession, PlayEvent};
    use super::{parse_integer, parse_plays, parse_sessions};

    #[test]
    fn parse_integer_accepts_integral_floats() {
        assert_eq!(parse_integer("2020"), Some(2020));
        assert_eq!(parse_integer("2020.0"), Some(2020));
        assert_eq!(parse_integer("-3"), Some(-3));
        assert_eq!(parse_integer("2020.5"), None);
        assert_eq!(parse_integer("NaN"), None);
        assert_eq!(parse_integer("inf"), None);
        assert_eq!(parse_integer("1e30"), None);
        assert_eq!(parse_integer("twenty"), None);
    }

    #[test]
    fn parse_plays_reads_columns_by_name() {
        let data = concat!(
            "ts,ms_played,country,artist,track,album,year,month,hour,day_of_week\n",
            r#"2020-03-01T22:10:00Z,215000,KR,BTS,"Black Swan","Map of the Soul: 7",2020,3,22,Sunday"#,
            "\n",
        );
        let plays = parse_plays(data.as_bytes()).unwrap();
        assert_eq!(plays, vec![PlayEvent {
            artist: Some("BTS".into()),
            track: Some("Black Swan".into()),
            album: Some("Map of the Soul: 7".into()),
            country: Some("KR".into()),
            year: Some(2020),
            month: Some(3),
            hour: Some(22),
            day_of_week: Some(Weekday::Sun),
            ms_played: Some(215_000),
        }]);
    }

    #[test]
    fn parse_plays_keeps_commas_inside_quotes() {
        let data = concat!(
            "artist,track,ms_played\n",
            r#""Tyler, The Creator","Say ""Hi""",180000"#,
        );
        let plays = parse_plays(data.as_bytes()).unwrap();
        assert_eq!(plays[0].artist(), Some("Tyler, The Creator"));
        assert_eq!(plays[0].track(), Some(r#"Say "Hi""#));
        assert_eq!(plays[0].ms_played, Some(180_000));
    }

    #[test]
    fn parse_plays_reads_line_breaks_inside_quotes() {
        let data = "artist,track,ms_played\nBTS,\"Intro\nSkit\",1000\nIU,Blueming,2000\n";
        let plays = parse_plays(data.as_bytes()).unwrap();
        assert_eq!(plays.len(), 2);
        assert_eq!(plays[0].track(), Some("Intro\nSkit"));
        assert_eq!(plays[0].ms_played, Some(1000));
        assert_eq!(plays[1].artist(), Some("IU"));
        assert_eq!(plays[1].ms_played, Some(2000));
    }

    #[test]
    fn parse_plays_coerces_or_drops_fields() {
        let data = concat!(
            "artist,year,month,hour,day_of_week,ms_played\n",
            "IU,2021.0,13,24,monday,-5\n",
            ",,2.0,0.0,Friday,1000.0\n",
            "\n",
            "BTS,2019,x,,Sunday,12.5\n",
        );
        let plays = parse_plays(data.as_bytes()).unwrap();
        assert_eq!(plays.len(), 3);

        assert_eq!(plays[0].artist(), Some("IU"));
        assert_eq!(plays[0].year, Some(2021));
        assert_eq!(plays[0].month, None);
        assert_eq!(plays[0].hour, None);
        assert_eq!(plays[0].day_of_week, None);
        assert_eq!(plays[0].ms_played, None);

        assert_eq!(plays[1].artist, None);
        assert_eq!(plays[1].year, None);
        assert_eq!(plays[1].month, Some(2));
        assert_eq!(plays[1].hour, Some(0));
        assert_eq!(plays[1].day_of_week, Some(Weekday::Fri));
        assert_eq!(plays[1].ms_played, Some(1000));

        assert_eq!(plays[2].month, None);
        assert_eq!(plays[2].ms_played, None);
    }

    #[test]
    fn parse_plays_handles_short_rows_and_bom() {
        let data = "\u{feff}artist,track,ms_played\r\nBTS\r\n";
        let plays = parse_plays(data.as_bytes()).unwrap();
        assert_eq!(plays.len(), 1);
        assert_eq!(plays[0].artist(), Some("BTS"));
        assert_eq!(plays[0].track, None);
    }

    #[test]
    fn parse_plays_of_empty_file_is_empty() {
        assert!(parse_plays("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn parse_plays_rejects_invalid_utf8() {
        let data: &[u8] = b"artist,track\nBTS,Butter\nBTS,\xff\xfe\n";
        match parse_plays(data) {
            Err(Error::InvalidCsv(..)) => {}
            other => panic!("Expected invalid csv, got {:?}", other),
        }
    }

    #[test]
    fn parse_sessions_uses_fallback_headers() {
        let data = concat!(
            "session_id,session_duration_minutes,avg_hour,day_of_week,cluster\n",
            "1,42.5,21.5,Friday,2\n",
            "2,10,8,Monday,\n",
            "3,nan,9,Tuesday,0.0\n",
        );
        let sessions = parse_sessions(data.as_bytes()).unwrap().unwrap();
        assert_eq!(sessions, vec![
            ClusteredSession {
                cluster: Some(2),
                duration_minutes: Some(42.5),
                hour: Some(21.5),
                day_of_week: Some(Weekday::Fri),
            },
            ClusteredSession {
                cluster: None,
                duration_minutes: Some(10.0),
                hour: Some(8.0),
                day_of_week: Some(Weekday::Mon),
            },
            ClusteredSession {
                cluster: Some(0),
                duration_minutes: None,
                hour: Some(9.0),
                day_of_week: Some(Weekday::Tue),
            },
        ]);
    }

    #[test]
    fn parse_sessions_without_cluster_column_is_none() {
        let data = "session_id,duration_minutes,hour\n1,20,22\n";
        assert_eq!(parse_sessions(data.as_bytes()).unwrap(), None);
        assert_eq!(parse_sessions("".as_bytes()).unwrap(), None);
    }

    #[test]
    fn parse_sessions_with_cluster_column_but_no_rows_is_empty() {
        let data = "cluster,duration_minutes,hour,day_of_week\n";
        assert_eq!(parse_sessions(data.as_bytes()).unwrap(), Some(Vec::new()));
    }
}
