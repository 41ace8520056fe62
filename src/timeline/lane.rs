// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Raw per-track event records.
//!
//! An `EventLane` owns the events of one track and lays them out on
//! the timeline, so it can serve as the geometry source for that track.

use std::cell::RefCell;

use super::event::{Event, EventId};
use super::geometry::{BoundingBox, TimelineLayout};
use crate::registry::{GeometrySource, TrackElement};

/// The event collection of one track
#[derive(Debug, Clone)]
pub struct EventLane {
    /// Track name
    name: String,
    /// Events in insertion order
    events: Vec<Event>,
    /// Layout used to compute element geometry
    layout: TimelineLayout,
}

impl EventLane {
    /// Create an empty lane
    pub fn new(name: impl Into<String>, layout: TimelineLayout) -> Self {
        Self {
            name: name.into(),
            events: Vec::new(),
            layout,
        }
    }

    /// Get track name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the lane has no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Add an event, stored detached from any group
    ///
    /// The event's track name is rewritten to this lane's name.
    pub fn push(&mut self, event: Event) {
        let mut event = event.detached();
        event.instrument_name = self.name.clone();
        self.events.push(event);
    }

    /// Find an event by id
    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Find an event by id for mutation
    pub fn get_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == id)
    }

    /// Remove an event by id
    pub fn remove(&mut self, id: EventId) -> Option<Event> {
        let index = self.events.iter().position(|e| e.id == id)?;
        Some(self.events.remove(index))
    }

    /// Replace all events
    pub fn replace_events<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = Event>,
    {
        self.events.clear();
        for event in events {
            self.push(event);
        }
    }

    /// Bounding box of an event within this lane
    pub fn bounds_of(&self, event: &Event) -> BoundingBox {
        BoundingBox::new(
            self.layout.seconds_to_x(event.start_time()),
            0.0,
            self.layout.seconds_to_x(event.length()),
            self.layout.band_height,
        )
    }
}

impl GeometrySource for RefCell<EventLane> {
    fn elements(&self) -> Vec<TrackElement> {
        let lane = self.borrow();
        lane.events
            .iter()
            .map(|event| TrackElement::new(lane.bounds_of(event), event.clone()))
            .collect()
    }
}
