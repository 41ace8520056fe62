// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Track reference registry.
//!
//! Maps track names to the geometry sources mounted for them and pulls
//! a snapshot of every track's on-screen elements for clustering.
//! The registry is an explicit object owned by the editor; tracks are
//! registered on mount and unregistered on unmount.

use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::timeline::{BoundingBox, Event};

/// An on-screen element reported by a geometry source
#[derive(Debug, Clone, PartialEq)]
pub struct TrackElement {
    /// Current screen rectangle
    pub bounds: BoundingBox,
    /// Underlying event, if the element carries one
    pub event: Option<Event>,
}

impl TrackElement {
    /// Create an element carrying an event
    pub fn new(bounds: BoundingBox, event: Event) -> Self {
        Self {
            bounds,
            event: Some(event),
        }
    }

    /// Create an element with no recoverable event
    pub fn orphan(bounds: BoundingBox) -> Self {
        Self {
            bounds,
            event: None,
        }
    }
}

/// An event paired with its current bounding box
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEvent {
    pub event: Event,
    pub bounds: BoundingBox,
}

impl PlacedEvent {
    /// Pair an event with its bounding box
    pub fn new(event: Event, bounds: BoundingBox) -> Self {
        Self { event, bounds }
    }
}

/// Per-track placed events, in element order
pub type GeometrySnapshot = BTreeMap<String, Vec<PlacedEvent>>;

/// Something that can report the current elements of one track
pub trait GeometrySource {
    /// Current elements, in on-screen order
    fn elements(&self) -> Vec<TrackElement>;
}

/// Shared handle to a geometry source
pub type SourceHandle = Rc<dyn GeometrySource>;

/// Registry of mounted tracks
#[derive(Default)]
pub struct TrackRegistry {
    handles: BTreeMap<String, SourceHandle>,
}

impl TrackRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the handle for a track
    pub fn register(&mut self, track: impl Into<String>, handle: SourceHandle) {
        let track = track.into();
        match self.handles.get(&track) {
            Some(existing) if Rc::ptr_eq(existing, &handle) => {
                debug!("Track {} already registered with this handle", track);
                return;
            }
            Some(_) => debug!("Replacing handle for track {}", track),
            None => debug!("Registered track {}", track),
        }
        self.handles.insert(track, handle);
    }

    /// Remove a track's handle, returning whether it was registered
    pub fn unregister(&mut self, track: &str) -> bool {
        let removed = self.handles.remove(track).is_some();
        if removed {
            debug!("Unregistered track {}", track);
        }
        removed
    }

    /// Check whether a track is registered
    pub fn contains(&self, track: &str) -> bool {
        self.handles.contains_key(track)
    }

    /// Names of registered tracks, sorted
    pub fn tracks(&self) -> impl Iterator<Item = &str> {
        self.handles.keys().map(String::as_str)
    }

    /// Number of registered tracks
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Check if no tracks are registered
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Query every registered track for its placed events
    ///
    /// Every registered track gets an entry, empty if it has no elements.
    /// Elements without an event payload are skipped.
    pub fn snapshot(&self) -> GeometrySnapshot {
        let mut snapshot = GeometrySnapshot::new();
        for (track, handle) in &self.handles {
            let mut placed = Vec::new();
            for (index, element) in handle.elements().into_iter().enumerate() {
                match element.event {
                    Some(event) => placed.push(PlacedEvent::new(event, element.bounds)),
                    None => warn!(
                        "Skipping element {} on track {}: no event payload",
                        index, track
                    ),
                }
            }
            snapshot.insert(track.clone(), placed);
        }
        snapshot
    }
}
