// Listenstat -- Aggregation engine for personal listening history
// Copyright 2026 The Listenstat Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! Configuration file parser.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::ranking::{SUBJECT_TOP_ALBUMS, SUBJECT_TOP_SONGS, TOP_N};

#[derive(Debug, Clone)]
pub struct Config {
    pub plays_path: PathBuf,
    pub sessions_path: Option<PathBuf>,
    pub subject: String,
    pub home_country: String,

    /// Years to restrict the views to. Empty means all years.
    pub years: Vec<i32>,

    pub top_artists: usize,
    pub top_songs: usize,
    pub subject_top_songs: usize,
    pub subject_top_albums: usize,
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "  plays_path         = {}\n", self.plays_path.to_string_lossy())?;
        match self.sessions_path.as_ref() {
            Some(path) => write!(f, "  sessions_path      = {}\n", path.to_string_lossy())?,
            None => write!(f, "  sessions_path      is not set\n")?,
        }
        write!(f, "  subject            = {}\n", self.subject)?;
        write!(f, "  home_country       = {}\n", self.home_country)?;
        if self.years.is_empty() {
            write!(f, "  years              is not set, using all years\n")?;
        } else {
            write!(f, "  years              = ")?;
            for (i, year) in self.years.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", year)?;
            }
            write!(f, "\n")?;
        }
        write!(f, "  top_artists        = {}\n", self.top_artists)?;
        write!(f, "  top_songs          = {}\n", self.top_songs)?;
        write!(f, "  subject_top_songs  = {}\n", self.subject_top_songs)?;
        write!(f, "  subject_top_albums = {}", self.subject_top_albums)?;

        Ok(())
    }
}

/// Parse a comma-separated list of years, e.g. `2019, 2020`.
fn parse_years(value: &str) -> Option<Vec<i32>> {
    let mut years = Vec::new();
    for part in value.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue
        }
        years.push(i32::from_str(part).ok()?);
    }
    Some(years)
}

fn parse_count(value: &str, lineno: usize, msg: &'static str) -> Result<usize> {
    match usize::from_str(value) {
        Ok(n) => Ok(n),
        Err(_) => Err(Error::InvalidConfig(lineno, msg)),
    }
}

impl Config {
    pub fn parse<I, S>(lines: I) -> Result<Config>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut plays_path = None;
        let mut sessions_path = None;
        let mut subject = String::from("bts");
        let mut home_country = String::from("US");
        let mut years = Vec::new();
        let mut top_artists = TOP_N;
        let mut top_songs = TOP_N;
        let mut subject_top_songs = SUBJECT_TOP_SONGS;
        let mut subject_top_albums = SUBJECT_TOP_ALBUMS;

        for (i, line_raw) in lines.into_iter().enumerate() {
            let lineno = i + 1;
            let line = line_raw.as_ref().trim();

            // Allow empty lines in the config file.
            if line.is_empty() {
                continue
            }

            // Skip lines starting with '#' to allow comments.
            if line.starts_with('#') {
                continue
            }

            if let Some(n) = line.find('=') {
                let key = line[..n].trim();
                let value = line[n + 1..].trim();
                match key {
                    "plays_path" => plays_path = Some(PathBuf::from(value)),
                    "sessions_path" => sessions_path = Some(PathBuf::from(value)),
                    "subject" => subject = String::from(value),
                    "home_country" => home_country = String::from(value),
                    "years" => match parse_years(value) {
                        Some(ys) => years = ys,
                        None => {
                            let msg = "Invalid years value, must be a comma-separated list of years.";
                            return Err(Error::InvalidConfig(lineno, msg));
                        }
                    }
                    "top_artists" => top_artists = parse_count(
                        value, lineno, "Invalid top_artists value, must be a non-negative integer.",
                    )?,
                    "top_songs" => top_songs = parse_count(
                        value, lineno, "Invalid top_songs value, must be a non-negative integer.",
                    )?,
                    "subject_top_songs" => subject_top_songs = parse_count(
                        value, lineno, "Invalid subject_top_songs value, must be a non-negative integer.",
                    )?,
                    "subject_top_albums" => subject_top_albums = parse_count(
                        value, lineno, "Invalid subject_top_albums value, must be a non-negative integer.",
                    )?,
                    _ => {
                        let msg = "Unknown key. See the configuration docs for supported keys.";
                        return Err(Error::InvalidConfig(lineno, msg))
                    }
                }
            } else {
                let msg = "Line contains no '='. \
                    Expected key-value pair like 'plays_path = all_music.csv'.";
                return Err(Error::InvalidConfig(lineno, msg))
            }
        }

        let config = Config {
            plays_path: match plays_path {
                Some(p) => p,
                None => return Err(Error::IncompleteConfig(
                    "Plays path not set. Expected 'plays_path ='-line."
                )),
            },
            sessions_path: sessions_path,
            subject: subject,
            home_country: home_country,
            years: years,
            top_artists: top_artists,
            top_songs: top_songs,
            subject_top_songs: subject_top_songs,
            subject_top_albums: subject_top_albums,
        };

        Ok(config)
    }
}
