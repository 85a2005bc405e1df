// Listenstat -- Aggregation engine for personal listening history
// Copyright 2026 The Listenstat Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use std::io;
use std::result;

use thiserror::Error;

/// Errors at the boundary: reading the config and the exported tables.
///
/// The views themselves never fail, incomplete records are skipped.
#[derive(Debug, Error)]
pub enum Error {
    /// Error in config file on a given (1-based) line.
    #[error("Invalid config on line {0}: {1}")]
    InvalidConfig(usize, &'static str),

    /// A key is missing in the config.
    #[error("Incomplete config: {0}")]
    IncompleteConfig(&'static str),

    /// Malformed row in a csv file, on a given (1-based) line, 0 if unknown.
    #[error("Invalid csv on line {0}: {1}")]
    InvalidCsv(usize, &'static str),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

pub type Result<T> = result::Result<T, Error>;
