// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Rectangular range selection over the grouped state.
//!
//! A query rectangle spans a time range (seconds) and a vertical range
//! (pixels, including the header). Tracks occupy fixed-height bands in
//! mount order. Locked groups are selected whole; unlocked groups are
//! resolved member by member.

use std::collections::BTreeMap;

use super::set::SelectionSet;
use crate::grouping::{GroupedState, Node};
use crate::timeline::{Event, EventId, TimelineLayout};

/// A time x vertical query rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    /// Start of the time range in seconds
    pub start_x: f64,
    /// End of the time range in seconds
    pub end_x: f64,
    /// Top of the vertical range in pixels
    pub start_y: f64,
    /// Bottom of the vertical range in pixels
    pub end_y: f64,
}

impl SelectionRect {
    /// Create a rectangle, normalizing reversed bounds
    pub fn new(start_x: f64, end_x: f64, start_y: f64, end_y: f64) -> Self {
        Self {
            start_x: start_x.min(end_x),
            end_x: start_x.max(end_x),
            start_y: start_y.min(end_y),
            end_y: start_y.max(end_y),
        }
    }

    /// Create a rectangle from pixel coordinates on both axes
    pub fn from_pixels(
        start_x: f64,
        end_x: f64,
        start_y: f64,
        end_y: f64,
        layout: &TimelineLayout,
    ) -> Self {
        Self::new(
            layout.x_to_seconds(start_x),
            layout.x_to_seconds(end_x),
            start_y,
            end_y,
        )
    }

    /// Check whether the rectangle has neither width nor height
    ///
    /// This is what a click without drag movement produces.
    pub fn is_point(&self) -> bool {
        self.start_x == self.end_x && self.start_y == self.end_y
    }

    fn covers_time(&self, node: &Node<'_>) -> bool {
        node.start_time() <= self.end_x && node.end_time() >= self.start_x
    }

    fn covers_band(&self, y_level: f64, layout: &TimelineLayout) -> bool {
        let top = self.start_y - layout.header_offset;
        let bottom = self.end_y - layout.header_offset;
        y_level <= bottom && y_level + layout.band_height >= top
    }
}

/// Resolve a query rectangle into the individual events it covers
///
/// `track_order` gives each track's band; tracks not listed there are
/// not selectable. The returned selection has its band level computed.
pub fn select_range(
    state: &GroupedState,
    track_order: &[String],
    rect: &SelectionRect,
    layout: &TimelineLayout,
) -> SelectionSet {
    let mut hits = BTreeMap::new();

    for (index, track) in track_order.iter().enumerate() {
        let Some(groups) = state.track(track) else {
            continue;
        };
        let y_level = layout.band_top(index);
        for group in groups.values() {
            collect(Node::Group(group), y_level, rect, layout, &mut hits);
        }
    }

    let mut selection = SelectionSet::from_events(hits);
    selection.refresh(state, track_order, layout);
    selection
}

fn collect(
    node: Node<'_>,
    y_level: f64,
    rect: &SelectionRect,
    layout: &TimelineLayout,
    hits: &mut BTreeMap<EventId, Event>,
) {
    if !rect.covers_time(&node) || !rect.covers_band(y_level, layout) {
        return;
    }

    match node {
        Node::Event(event) => {
            hits.insert(event.id, event.clone());
        }
        Node::Group(group) if group.locked() => {
            for event in group.events().values() {
                hits.insert(event.id, event.clone());
            }
        }
        Node::Group(group) => {
            for event in group.events().values() {
                collect(Node::Event(event), y_level, rect, layout, hits);
            }
        }
    }
}
