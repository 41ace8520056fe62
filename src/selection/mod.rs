// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Selection of timeline events.
//!
//! This module provides:
//! - Rectangular time/track range queries that respect group locking
//! - The selection set with toggle and live refresh

pub mod query;
pub mod set;

pub use query::{select_range, SelectionRect};
pub use set::SelectionSet;
