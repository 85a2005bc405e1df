// Listenstat -- Aggregation engine for personal listening history
// Copyright 2026 The Listenstat Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use std::fs;
use std::io::{BufRead, Write};
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use tracing::{error, info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use listenstat::config::Config;
use listenstat::error;
use listenstat::serialization;
use listenstat::source;
use listenstat::Context;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum View {
    /// Total listening time, and the top artist and song.
    Overview,
    /// Listening time per year.
    Years,
    /// Listening time per month.
    Months,
    /// Listening time per hour of the day.
    Hours,
    /// Listening time per day of the week.
    Weekdays,
    /// Listening time outside the home country, per year and country.
    Abroad,
    /// The most played artists.
    TopArtists,
    /// The most played songs.
    TopSongs,
    /// Deep dive into the configured subject artist.
    Subject,
    /// Statistics per listening-session cluster.
    Clusters,
    /// Peak hour, most active day, and data span.
    Insights,
}

/// Compute summary views of exported listening history, and print them as json.
#[derive(Parser, Debug)]
struct CliArgs {
    /// The view to compute.
    #[arg(value_enum)]
    view: View,

    /// Path to the configuration file.
    config: PathBuf,
}

fn load_config(config_fname: &Path) -> error::Result<Config> {
    let f = fs::File::open(config_fname)?;
    let buf_reader = io::BufReader::new(f);
    let lines: io::Result<Vec<String>> = buf_reader.lines().collect();
    Config::parse(lines?.iter())
}

fn load_context(config: &Config, view: View) -> error::Result<Context> {
    let plays = source::load_plays(&config.plays_path)?;

    // Only the cluster view needs the sessions.
    let sessions = match (view, config.sessions_path.as_ref()) {
        (View::Clusters, Some(path)) => source::load_sessions(path)?,
        (View::Clusters, None) => {
            warn!("No sessions_path configured, no clusters yet.");
            None
        }
        _ => None,
    };

    Ok(Context::new(plays, sessions).with_years(config.years.clone()))
}

fn write_view<W: Write>(mut w: W, ctx: &Context, config: &Config, view: View) -> io::Result<()> {
    match view {
        View::Overview => serialization::write_overview_json(&mut w, &ctx.overview())?,
        View::Years => serialization::write_totals_json(&mut w, "year", &ctx.by_year())?,
        View::Months => serialization::write_totals_json(&mut w, "month", &ctx.by_month())?,
        View::Hours => serialization::write_totals_json(&mut w, "hour", &ctx.by_hour())?,
        View::Weekdays => serialization::write_totals_json(&mut w, "day", &ctx.by_day_of_week())?,
        View::Abroad => serialization::write_abroad_json(&mut w, &ctx.abroad(&config.home_country))?,
        View::TopArtists => serialization::write_ranking_json(
            &mut w, "artist", &ctx.top_artists(config.top_artists),
        )?,
        View::TopSongs => serialization::write_ranking_json(
            &mut w, "song", &ctx.top_tracks(config.top_songs),
        )?,
        View::Subject => {
            let subject = &config.subject[..];
            serialization::write_subject_json(
                &mut w,
                subject,
                &ctx.subject_stats(subject),
                &ctx.subject_by_year(subject),
                &ctx.subject_top_tracks(subject, config.subject_top_songs),
                &ctx.subject_top_albums(subject, config.subject_top_albums),
            )?
        }
        View::Clusters => serialization::write_clusters_json(&mut w, ctx.clusters().as_ref())?,
        View::Insights => serialization::write_insights_json(&mut w, &ctx.insights())?,
    }
    writeln!(w)
}

fn run(args: &CliArgs) -> error::Result<()> {
    let config = load_config(&args.config)?;
    info!("Configuration:\n{}", config);

    let ctx = load_context(&config, args.view)?;

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    write_view(&mut out, &ctx, &config, args.view)?;
    out.flush()?;

    Ok(())
}

fn main() {
    let cli_args = CliArgs::parse();

    // Logs go to stderr, stdout is for the json output.
    let subscriber_result = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init();

    if let Err(err) = subscriber_result {
        eprintln!("Failed to initialize logging: {}", err);
    }

    if let Err(err) = run(&cli_args) {
        error!("{}", err);
        process::exit(1);
    }
}
