// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Overlap groups and the grouped state tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::timeline::{round2, Event, EventId, GroupId};

/// A maximal cluster of transitively overlapping events on one track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapGroup {
    /// Id derived from the sorted member ids
    pub id: GroupId,
    /// Name of the owning track
    pub instrument_name: String,
    /// Earliest member start
    start_time: f64,
    /// Latest member end
    end_time: f64,
    /// Member copies keyed by event id
    events: BTreeMap<EventId, Event>,
    /// Whether the group acts as one atomic unit
    #[serde(default)]
    locked: bool,
}

impl OverlapGroup {
    /// Build a group from its members
    ///
    /// Returns `None` for an empty member list. Member copies get their
    /// `parent_id` and `locked` flag from the group.
    pub fn from_members<I>(instrument_name: impl Into<String>, members: I, locked: bool) -> Option<Self>
    where
        I: IntoIterator<Item = Event>,
    {
        let members: Vec<Event> = members.into_iter().collect();
        if members.is_empty() {
            return None;
        }

        let id = GroupId::from_members(members.iter().map(|e| e.id));
        let start_time = members
            .iter()
            .map(Event::start_time)
            .fold(f64::INFINITY, f64::min);
        let end_time = members
            .iter()
            .map(Event::end_time)
            .fold(f64::NEG_INFINITY, f64::max);

        let events = members
            .into_iter()
            .map(|mut event| {
                event.set_times(event.start_time(), event.end_time());
                event.parent_id = Some(id.clone());
                event.locked = locked;
                (event.id, event)
            })
            .collect();

        Some(Self {
            id,
            instrument_name: instrument_name.into(),
            start_time: round2(start_time),
            end_time: round2(end_time),
            events,
            locked,
        })
    }

    /// Earliest member start time
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Latest member end time
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Member events keyed by id
    pub fn events(&self) -> &BTreeMap<EventId, Event> {
        &self.events
    }

    /// Look up a member
    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    /// Check membership
    pub fn contains(&self, id: EventId) -> bool {
        self.events.contains_key(&id)
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the group has no members
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether the group is locked
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Lock or unlock the group and its member copies
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        for event in self.events.values_mut() {
            event.locked = locked;
        }
    }

    /// Re-derive id, span and member fields from the current members
    pub fn rebuild(self) -> Option<Self> {
        let locked = self.locked;
        Self::from_members(self.instrument_name, self.events.into_values(), locked)
    }
}

/// Groups of one track keyed by group id
pub type TrackGroups = BTreeMap<GroupId, OverlapGroup>;

/// A selectable timeline node: a plain event or an overlap group
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Event(&'a Event),
    Group(&'a OverlapGroup),
}

impl Node<'_> {
    /// Start time of the node
    pub fn start_time(&self) -> f64 {
        match self {
            Node::Event(event) => event.start_time(),
            Node::Group(group) => group.start_time(),
        }
    }

    /// End time of the node
    pub fn end_time(&self) -> f64 {
        match self {
            Node::Event(event) => event.end_time(),
            Node::Group(group) => group.end_time(),
        }
    }
}

/// Per-track, per-group derived state
///
/// This is the unit rendered, queried and kept in history. Cloning
/// produces a fully independent copy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupedState {
    tracks: BTreeMap<String, TrackGroups>,
}

impl GroupedState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups of one track
    pub fn track(&self, name: &str) -> Option<&TrackGroups> {
        self.tracks.get(name)
    }

    /// Iterate tracks and their groups
    pub fn tracks(&self) -> impl Iterator<Item = (&str, &TrackGroups)> {
        self.tracks.iter().map(|(name, groups)| (name.as_str(), groups))
    }

    /// Names of all tracks
    pub fn track_names(&self) -> impl Iterator<Item = &str> {
        self.tracks.keys().map(String::as_str)
    }

    /// Set the groups of one track
    pub fn insert_track(&mut self, name: impl Into<String>, groups: TrackGroups) {
        self.tracks.insert(name.into(), groups);
    }

    /// Remove a track
    pub fn remove_track(&mut self, name: &str) -> Option<TrackGroups> {
        self.tracks.remove(name)
    }

    /// Total number of groups across tracks
    pub fn group_count(&self) -> usize {
        self.tracks.values().map(|groups| groups.len()).sum()
    }

    /// Total number of events across tracks
    pub fn event_count(&self) -> usize {
        self.tracks
            .values()
            .flat_map(|groups| groups.values())
            .map(OverlapGroup::len)
            .sum()
    }

    /// Find a group by id on any track
    pub fn find_group(&self, id: &GroupId) -> Option<&OverlapGroup> {
        self.tracks.values().find_map(|groups| groups.get(id))
    }

    /// Find a group by id for mutation
    pub fn find_group_mut(&mut self, id: &GroupId) -> Option<&mut OverlapGroup> {
        self.tracks.values_mut().find_map(|groups| groups.get_mut(id))
    }

    /// Find the live copy of an event
    pub fn find_event(&self, id: EventId) -> Option<&Event> {
        self.tracks
            .values()
            .flat_map(|groups| groups.values())
            .find_map(|group| group.get(id))
    }

    /// Find the group containing an event
    pub fn group_of(&self, id: EventId) -> Option<&OverlapGroup> {
        self.tracks
            .values()
            .flat_map(|groups| groups.values())
            .find(|group| group.contains(id))
    }

    /// Rebuild every group from its members
    ///
    /// Used after deserializing: empty groups are dropped and ids, spans
    /// and member fields are re-derived.
    pub fn normalized(self) -> Self {
        let tracks = self
            .tracks
            .into_iter()
            .map(|(name, groups)| {
                let groups = groups
                    .into_values()
                    .filter_map(OverlapGroup::rebuild)
                    .map(|group| (group.id.clone(), group))
                    .collect();
                (name, groups)
            })
            .collect();
        Self { tracks }
    }

    /// Detached events of every track, ordered by start time then id
    pub fn events_by_track(&self) -> BTreeMap<String, Vec<Event>> {
        self.tracks
            .iter()
            .map(|(name, groups)| {
                let mut events: Vec<Event> = groups
                    .values()
                    .flat_map(|group| group.events().values())
                    .map(Event::detached)
                    .collect();
                events.sort_by(|a, b| {
                    a.start_time()
                        .total_cmp(&b.start_time())
                        .then(a.id.cmp(&b.id))
                });
                (name.clone(), events)
            })
            .collect()
    }
}
