// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The user's current multi-selection.

use std::collections::BTreeMap;

use tracing::debug;

use crate::grouping::GroupedState;
use crate::timeline::{Event, EventId, TimelineLayout};

/// Selected events keyed by id
///
/// Selected copies are always re-read from the live grouped state, so
/// they never carry stale times or group ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    events: BTreeMap<EventId, Event>,
    highest_y_level: Option<f64>,
}

impl SelectionSet {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from events
    pub(crate) fn from_events(events: BTreeMap<EventId, Event>) -> Self {
        Self {
            events,
            highest_y_level: None,
        }
    }

    /// Selected events keyed by id
    pub fn events(&self) -> &BTreeMap<EventId, Event> {
        &self.events
    }

    /// Selected ids in ascending order
    pub fn ids(&self) -> Vec<EventId> {
        self.events.keys().copied().collect()
    }

    /// Look up a selected event
    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    /// Check if an id is selected
    pub fn contains(&self, id: EventId) -> bool {
        self.events.contains_key(&id)
    }

    /// Number of selected events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Top of the lowest track band holding a selected event
    ///
    /// Measured from below the header; `None` when nothing is selected.
    pub fn highest_y_level(&self) -> Option<f64> {
        self.highest_y_level
    }

    /// Flip membership of each id
    ///
    /// Selected ids are removed. Unselected ids are looked up in `state`
    /// and inserted with their live data; ids missing from `state` are
    /// ignored.
    pub fn toggle<I>(&mut self, ids: I, state: &GroupedState)
    where
        I: IntoIterator<Item = EventId>,
    {
        for id in ids {
            if self.events.remove(&id).is_some() {
                continue;
            }
            match state.find_event(id) {
                Some(event) => {
                    self.events.insert(id, event.clone());
                }
                None => debug!("Cannot select event {}: not in grouped state", id),
            }
        }
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.events.clear();
        self.highest_y_level = None;
    }

    /// Re-read selected events from `state` and recompute the band level
    ///
    /// Ids no longer present are dropped. Returns how many were dropped.
    pub fn refresh(
        &mut self,
        state: &GroupedState,
        track_order: &[String],
        layout: &TimelineLayout,
    ) -> usize {
        let before = self.events.len();
        self.events = self
            .events
            .keys()
            .filter_map(|&id| state.find_event(id).map(|event| (id, event.clone())))
            .collect();
        let dropped = before - self.events.len();
        if dropped > 0 {
            debug!("Dropped {} stale selected events", dropped);
        }

        self.highest_y_level = self
            .events
            .values()
            .filter_map(|event| {
                track_order
                    .iter()
                    .position(|track| *track == event.instrument_name)
            })
            .max()
            .map(|index| layout.band_top(index));

        dropped
    }
}
