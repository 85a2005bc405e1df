// Listenstat -- Aggregation engine for personal listening history
// Copyright 2026 The Listenstat Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

//! Turns exported listening history into the summary views of a stats site.
//!
//! The engine is the set of pure view functions in `temporal`, `ranking`,
//! `filter`, `clusters`, and `insights`, all built on the grouping primitives
//! in `aggregate`. They take records and return fresh results; they never
//! fail. Reading the exports (`source`), the configuration (`config`), and
//! writing results (`serialization`) live around the engine, and are the only
//! parts that can return an `Error`.

pub mod aggregate;
pub mod clusters;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod insights;
pub mod prim;
pub mod ranking;
pub mod serialization;
pub mod source;
pub mod string_utils;
pub mod temporal;
pub mod weekday_table;

pub use crate::context::Context;
pub use crate::error::{Error, Result};
pub use crate::prim::{ClusteredSession, PlayEvent};
