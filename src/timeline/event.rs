// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timed events and their identifiers.
//!
//! Times are seconds as `f64`, rounded to two decimal places on every
//! write so that values survive save/load and comparison unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Round a time value to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Unique event identifier, immutable for the event's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EventId {
    fn from(id: u64) -> Self {
        EventId(id)
    }
}

/// Overlap group identifier, derived from the sorted member event ids
///
/// Ids `[9, 3, 7]` always produce `"3-7-9"`, so a group keeps its id
/// across recomputation for as long as its membership is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Derive a group id from member event ids in any order
    pub fn from_members<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = EventId>,
    {
        let mut ids: Vec<EventId> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join("-");
        GroupId(joined)
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupId {
    fn from(id: &str) -> Self {
        GroupId(id.to_string())
    }
}

/// Opaque handle to the playback object owned by the audio engine
///
/// Never serialized; reconstructed by the caller when a beat is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceHandle(pub u64);

/// A single playable sound occurrence on a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event identifier
    pub id: EventId,
    /// Name of the owning track
    pub instrument_name: String,
    /// Start time in seconds
    start_time: f64,
    /// End time in seconds
    end_time: f64,
    /// Playback handle, passed through untouched
    #[serde(skip)]
    pub instance: Option<InstanceHandle>,
    /// Group currently containing this event
    #[serde(default)]
    pub parent_id: Option<GroupId>,
    /// Lock flag inherited from the containing group
    #[serde(default)]
    pub locked: bool,
}

impl Event {
    /// Create a new ungrouped event
    ///
    /// Times are rounded and swapped if given in reverse order.
    pub fn new(
        id: EventId,
        instrument_name: impl Into<String>,
        start_time: f64,
        end_time: f64,
    ) -> Self {
        let mut event = Self {
            id,
            instrument_name: instrument_name.into(),
            start_time: 0.0,
            end_time: 0.0,
            instance: None,
            parent_id: None,
            locked: false,
        };
        event.set_times(start_time, end_time);
        event
    }

    /// Attach a playback handle
    pub fn with_instance(mut self, instance: InstanceHandle) -> Self {
        self.instance = Some(instance);
        self
    }

    /// Start time in seconds
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// End time in seconds
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Duration in seconds
    pub fn length(&self) -> f64 {
        round2(self.end_time - self.start_time)
    }

    /// Set both times, rounding each
    pub fn set_times(&mut self, start_time: f64, end_time: f64) {
        let (start, end) = if end_time < start_time {
            (end_time, start_time)
        } else {
            (start_time, end_time)
        };
        self.start_time = round2(start);
        self.end_time = round2(end);
    }

    /// Move the event to a new start time, keeping its length
    ///
    /// Negative start times clamp to zero.
    pub fn shift_to(&mut self, new_start: f64) {
        let length = self.length();
        let start = new_start.max(0.0);
        self.set_times(start, start + length);
    }

    /// Copy of this event detached from any group
    pub fn detached(&self) -> Self {
        Self {
            parent_id: None,
            locked: false,
            ..self.clone()
        }
    }
}
