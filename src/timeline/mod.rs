// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timeline data model.
//!
//! This module provides:
//! - Events with rounded start/end times and stable ids
//! - Screen geometry and the seconds/pixel layout
//! - Per-track event lanes that report their own geometry

pub mod event;
pub mod geometry;
pub mod lane;

pub use event::{round2, Event, EventId, GroupId, InstanceHandle};
pub use geometry::{BoundingBox, TimelineLayout};
pub use lane::EventLane;
