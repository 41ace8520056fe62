// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Editing session.
//!
//! Owns the raw per-track event lanes and everything derived from them:
//! the track registry feeding clustering, the grouped state history and
//! the current selection. Every mutation edits the lanes and re-clusters;
//! the history only records passes that actually changed the grouped
//! state.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::config::{BeatFile, EditorConfig};
use crate::error::{EditorError, EditorResult};
use crate::grouping::{cluster_snapshot, GroupedState, TrackGroups};
use crate::history::History;
use crate::registry::{SourceHandle, TrackRegistry};
use crate::selection::{select_range, SelectionRect, SelectionSet};
use crate::timeline::{round2, Event, EventId, EventLane, GroupId, InstanceHandle, TimelineLayout};

type SharedLane = Rc<RefCell<EventLane>>;

/// A multi-track editing session
pub struct Editor {
    /// Editor settings
    config: EditorConfig,
    /// Layout derived from the settings
    layout: TimelineLayout,
    /// Raw event records per track
    lanes: BTreeMap<String, SharedLane>,
    /// Tracks in mount (band) order
    track_order: Vec<String>,
    /// Geometry sources of mounted tracks
    registry: TrackRegistry,
    /// Grouped state with undo/redo
    history: History<GroupedState>,
    /// Current multi-selection
    selection: SelectionSet,
    /// Next event id to hand out
    next_id: u64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an empty session
    pub fn new(config: EditorConfig) -> Self {
        let layout = config.layout();
        let history = History::with_limit(GroupedState::new(), config.history_limit);
        Self {
            config,
            layout,
            lanes: BTreeMap::new(),
            track_order: Vec::new(),
            registry: TrackRegistry::new(),
            history,
            selection: SelectionSet::new(),
            next_id: 1,
        }
    }

    /// Get editor settings
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Get timeline layout
    pub fn layout(&self) -> &TimelineLayout {
        &self.layout
    }

    /// Current grouped state
    pub fn state(&self) -> &GroupedState {
        self.history.current()
    }

    /// Mounted tracks in band order
    pub fn tracks(&self) -> &[String] {
        &self.track_order
    }

    /// Raw events of a track, in insertion order
    pub fn events(&self, track: &str) -> Option<Vec<Event>> {
        self.lanes
            .get(track)
            .map(|lane| lane.borrow().events().to_vec())
    }

    /// Current selection
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Top of the lowest band holding a selected event
    pub fn highest_y_level(&self) -> Option<f64> {
        self.selection.highest_y_level()
    }

    /// Number of undo steps
    pub fn undo_len(&self) -> usize {
        self.history.undo_len()
    }

    /// Number of redo steps
    pub fn redo_len(&self) -> usize {
        self.history.redo_len()
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // Track lifecycle

    /// Mount a track
    ///
    /// Returns `false` if the track is already mounted. Mounting does not
    /// create a history entry.
    pub fn add_track(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.lanes.contains_key(&name) {
            return false;
        }

        let lane: SharedLane = Rc::new(RefCell::new(EventLane::new(name.clone(), self.layout)));
        let handle: SourceHandle = lane.clone();
        self.registry.register(name.clone(), handle);
        self.lanes.insert(name.clone(), lane);
        self.track_order.push(name.clone());
        info!("Mounted track {}", name);

        self.recluster_untracked();
        self.history.rewrite(|state| {
            if state.track(&name).is_none() {
                state.insert_track(name.clone(), TrackGroups::new());
            }
        });
        true
    }

    /// Unmount a track and drop its events
    ///
    /// Returns `false` if the track was not mounted. Unmounting does not
    /// create a history entry.
    pub fn remove_track(&mut self, name: &str) -> bool {
        if self.lanes.remove(name).is_none() {
            return false;
        }
        self.registry.unregister(name);
        self.track_order.retain(|track| track != name);
        info!("Unmounted track {}", name);

        self.recluster_untracked();
        self.history.rewrite(|state| {
            state.remove_track(name);
        });
        true
    }

    // Clustering

    /// Re-cluster all tracks and commit the result if it changed
    ///
    /// Returns whether a history entry was recorded.
    pub fn recompute(&mut self) -> bool {
        let snapshot = self.registry.snapshot();
        let next = cluster_snapshot(&snapshot, self.history.current());
        let changed = self.history.commit(next);
        if !changed {
            debug!("Clustering pass left the grouped state unchanged");
        }
        self.refresh_selection();
        changed
    }

    fn recluster_untracked(&mut self) {
        let snapshot = self.registry.snapshot();
        let next = cluster_snapshot(&snapshot, self.history.current());
        self.history.rebase(next);
        self.refresh_selection();
    }

    fn refresh_selection(&mut self) {
        self.selection
            .refresh(self.history.current(), &self.track_order, &self.layout);
    }

    fn lane_of(&self, id: EventId) -> Option<&SharedLane> {
        self.lanes
            .values()
            .find(|lane| lane.borrow().get(id).is_some())
    }

    fn allocate_id(&mut self) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;
        id
    }

    // Mutation input

    /// Add an event to a track
    pub fn insert_event(
        &mut self,
        track: &str,
        start_time: f64,
        end_time: f64,
        instance: Option<InstanceHandle>,
    ) -> EditorResult<EventId> {
        if !self.lanes.contains_key(track) {
            return Err(EditorError::UnknownTrack(track.to_string()));
        }
        let id = self.allocate_id();
        let mut event = Event::new(id, track, start_time.max(0.0), end_time.max(0.0));
        event.instance = instance;
        if let Some(lane) = self.lanes.get(track) {
            lane.borrow_mut().push(event);
        }
        self.recompute();
        Ok(id)
    }

    /// Move an event to a new start time, keeping its length
    ///
    /// Returns whether the grouped state changed.
    pub fn shift_event(&mut self, id: EventId, new_start: f64) -> EditorResult<bool> {
        let lane = self.lane_of(id).ok_or(EditorError::UnknownEvent(id))?.clone();
        if let Some(event) = lane.borrow_mut().get_mut(id) {
            event.shift_to(new_start);
        }
        Ok(self.recompute())
    }

    /// Move every member of a group so the group starts at `new_start`
    ///
    /// Returns whether the grouped state changed.
    pub fn shift_group(&mut self, id: &GroupId, new_start: f64) -> EditorResult<bool> {
        let group = self
            .state()
            .find_group(id)
            .ok_or_else(|| EditorError::UnknownGroup(id.clone()))?;
        let delta = new_start.max(0.0) - group.start_time();
        let shifts: Vec<(EventId, f64)> = group
            .events()
            .values()
            .map(|event| (event.id, event.start_time() + delta))
            .collect();

        self.apply_shifts(&shifts);
        Ok(self.recompute())
    }

    /// Move every selected event by `delta` seconds
    ///
    /// The delta is limited so no selected event starts before zero.
    /// Returns whether the grouped state changed.
    pub fn shift_selection(&mut self, delta: f64) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let earliest = self
            .selection
            .events()
            .values()
            .map(Event::start_time)
            .fold(f64::INFINITY, f64::min);
        let delta = delta.max(-earliest);
        let shifts: Vec<(EventId, f64)> = self
            .selection
            .events()
            .values()
            .map(|event| (event.id, event.start_time() + delta))
            .collect();

        self.apply_shifts(&shifts);
        self.recompute()
    }

    fn apply_shifts(&mut self, shifts: &[(EventId, f64)]) {
        for &(id, start) in shifts {
            if let Some(lane) = self.lane_of(id) {
                if let Some(event) = lane.borrow_mut().get_mut(id) {
                    event.shift_to(round2(start));
                }
            }
        }
    }

    /// Delete events by id, ignoring ids that do not exist
    ///
    /// Returns how many events were removed.
    pub fn delete_events(&mut self, ids: &[EventId]) -> usize {
        let mut removed = 0;
        for &id in ids {
            if let Some(lane) = self.lane_of(id).cloned() {
                if lane.borrow_mut().remove(id).is_some() {
                    removed += 1;
                }
            }
        }
        if removed > 0 {
            debug!("Deleted {} events", removed);
            self.recompute();
        }
        removed
    }

    /// Delete every selected event
    pub fn delete_selection(&mut self) -> usize {
        let ids = self.selection.ids();
        self.delete_events(&ids)
    }

    /// Copy events onto their own tracks, right after the copied span
    ///
    /// Each copy gets a fresh id and keeps its playback handle. Unknown
    /// ids are ignored. Returns the new ids in the order of `ids`.
    pub fn duplicate_events(&mut self, ids: &[EventId]) -> Vec<EventId> {
        let originals: Vec<Event> = ids
            .iter()
            .filter_map(|&id| self.lane_of(id).and_then(|lane| lane.borrow().get(id).cloned()))
            .collect();
        if originals.is_empty() {
            return Vec::new();
        }

        let earliest = originals
            .iter()
            .map(Event::start_time)
            .fold(f64::INFINITY, f64::min);
        let latest = originals
            .iter()
            .map(Event::end_time)
            .fold(f64::NEG_INFINITY, f64::max);
        let span = round2(latest - earliest);

        let mut created = Vec::with_capacity(originals.len());
        for original in originals {
            let id = self.allocate_id();
            let mut copy = Event::new(
                id,
                original.instrument_name.clone(),
                original.start_time() + span,
                original.end_time() + span,
            );
            copy.instance = original.instance;
            if let Some(lane) = self.lanes.get(&original.instrument_name) {
                lane.borrow_mut().push(copy);
                created.push(id);
            }
        }
        self.recompute();
        created
    }

    /// Duplicate every selected event
    pub fn duplicate_selection(&mut self) -> Vec<EventId> {
        let ids = self.selection.ids();
        self.duplicate_events(&ids)
    }

    // Locking input

    /// Flip a group's lock flag
    ///
    /// Returns the new lock state.
    pub fn lock_group(&mut self, id: &GroupId) -> EditorResult<bool> {
        let mut next = self.history.current().clone();
        let group = next
            .find_group_mut(id)
            .ok_or_else(|| EditorError::UnknownGroup(id.clone()))?;
        let locked = !group.locked();
        group.set_locked(locked);
        debug!("Group {} locked = {}", id, locked);

        self.history.commit(next);
        self.refresh_selection();
        Ok(locked)
    }

    // History

    /// Step back one history entry
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        self.sync_lanes();
        true
    }

    /// Step forward one history entry
    ///
    /// Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        self.sync_lanes();
        true
    }

    /// Rewrite the raw lanes from the current grouped state
    fn sync_lanes(&mut self) {
        let mut by_track = self.history.current().events_by_track();
        for (name, lane) in &self.lanes {
            let events = by_track.remove(name).unwrap_or_default();
            lane.borrow_mut().replace_events(events);
        }
        self.recluster_untracked();
    }

    // Selection

    /// Replace the selection with the events covered by `rect`
    pub fn select_range(&mut self, rect: &SelectionRect) -> &SelectionSet {
        self.selection = select_range(self.state(), &self.track_order, rect, &self.layout);
        &self.selection
    }

    /// Apply a drag-select gesture
    ///
    /// A drag with no movement leaves the current selection untouched.
    pub fn drag_select(&mut self, rect: &SelectionRect) -> &SelectionSet {
        if rect.is_point() {
            return &self.selection;
        }
        self.select_range(rect)
    }

    /// Flip selection membership of the given events
    pub fn toggle_selection(&mut self, ids: &[EventId]) -> &SelectionSet {
        self.selection
            .toggle(ids.iter().copied(), self.history.current());
        self.refresh_selection();
        &self.selection
    }

    /// Clear the selection
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // Persistence

    /// Snapshot the session as a named beat
    pub fn to_beat(&self, name: impl Into<String>) -> BeatFile {
        BeatFile::new(name, self.track_order.clone(), self.state().clone())
    }

    /// Replace the session with a saved beat
    ///
    /// `reconstruct` is asked for a playback handle for every loaded event.
    /// History and selection start empty.
    pub fn load_beat<F>(&mut self, beat: &BeatFile, mut reconstruct: F)
    where
        F: FnMut(&Event) -> Option<InstanceHandle>,
    {
        for track in self.track_order.clone() {
            self.remove_track(&track);
        }

        let mut order: Vec<String> = Vec::with_capacity(beat.track_order.len());
        for track in &beat.track_order {
            if order.contains(track) {
                warn!("Beat {:?} lists track {} more than once", beat.name, track);
                continue;
            }
            order.push(track.clone());
        }
        for track in beat.state.track_names() {
            if !order.iter().any(|t| t == track) {
                order.push(track.to_string());
            }
        }

        let mut by_track = beat.state.events_by_track();
        let mut max_id = 0;
        for track in &order {
            let lane = EventLane::new(track.clone(), self.layout);
            let lane: SharedLane = Rc::new(RefCell::new(lane));
            for mut event in by_track.remove(track).unwrap_or_default() {
                event.instance = reconstruct(&event);
                max_id = max_id.max(event.id.0);
                lane.borrow_mut().push(event);
            }
            let handle: SourceHandle = lane.clone();
            self.registry.register(track.clone(), handle);
            self.lanes.insert(track.clone(), lane);
        }
        self.track_order = order;
        self.next_id = max_id + 1;

        let snapshot = self.registry.snapshot();
        let state = cluster_snapshot(&snapshot, &beat.state);
        self.history.reset(state);
        self.selection.clear();
        info!(
            "Loaded beat {:?}: {} tracks, {} events",
            beat.name,
            self.track_order.len(),
            self.state().event_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snare_editor() -> Editor {
        let mut editor = Editor::default();
        editor.add_track("Snare");
        editor.insert_event("Snare", 0.0, 0.5, None).unwrap();
        editor.insert_event("Snare", 0.3, 0.8, None).unwrap();
        editor.insert_event("Snare", 2.0, 2.2, None).unwrap();
        editor
    }

    fn group_ids(editor: &Editor, track: &str) -> Vec<String> {
        editor
            .state()
            .track(track)
            .map(|groups| groups.keys().map(|id| id.to_string()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_add_track_creates_empty_entry_without_history() {
        let mut editor = Editor::default();
        assert!(editor.add_track("Kick"));
        assert!(!editor.add_track("Kick"));

        assert!(editor.state().track("Kick").unwrap().is_empty());
        assert_eq!(editor.undo_len(), 0);
        assert_eq!(editor.tracks(), &["Kick".to_string()]);
    }

    #[test]
    fn test_insert_unknown_track() {
        let mut editor = Editor::default();
        assert_eq!(
            editor.insert_event("Nope", 0.0, 1.0, None),
            Err(EditorError::UnknownTrack("Nope".to_string()))
        );
    }

    #[test]
    fn test_insert_clusters() {
        let editor = snare_editor();
        assert_eq!(group_ids(&editor, "Snare"), vec!["1-2", "3"]);
        assert_eq!(editor.undo_len(), 3);
    }

    #[test]
    fn test_shift_event_regroups() {
        let mut editor = snare_editor();
        assert!(editor.shift_event(EventId(3), 0.6).unwrap());
        assert_eq!(group_ids(&editor, "Snare"), vec!["1-2-3"]);

        let moved = editor.state().find_event(EventId(3)).unwrap();
        assert_eq!(moved.start_time(), 0.6);
        assert_eq!(moved.end_time(), 0.8);
    }

    #[test]
    fn test_shift_unknown_event() {
        let mut editor = snare_editor();
        assert_eq!(
            editor.shift_event(EventId(42), 1.0),
            Err(EditorError::UnknownEvent(EventId(42)))
        );
    }

    #[test]
    fn test_shift_to_same_place_records_nothing() {
        let mut editor = snare_editor();
        let before = editor.undo_len();
        assert!(!editor.shift_event(EventId(3), 2.0).unwrap());
        assert_eq!(editor.undo_len(), before);
    }

    #[test]
    fn test_shift_group_moves_members() {
        let mut editor = snare_editor();
        editor.shift_group(&GroupId::from("1-2"), 4.0).unwrap();

        let state = editor.state();
        let group = state.find_group(&GroupId::from("1-2")).unwrap();
        assert_eq!(group.start_time(), 4.0);
        assert_eq!(group.end_time(), 4.8);
        assert_eq!(state.find_event(EventId(2)).unwrap().start_time(), 4.3);
    }

    #[test]
    fn test_shift_group_clamps_at_zero() {
        let mut editor = snare_editor();
        editor.shift_group(&GroupId::from("3"), -1.0).unwrap();
        assert_eq!(editor.state().find_event(EventId(3)).unwrap().start_time(), 0.0);
        assert_eq!(group_ids(&editor, "Snare"), vec!["1-2-3"]);
    }

    #[test]
    fn test_lock_survives_recompute() {
        let mut editor = snare_editor();
        assert!(editor.lock_group(&GroupId::from("1-2")).unwrap());

        editor.recompute();
        editor.shift_event(EventId(3), 3.0).unwrap();
        let group = editor.state().find_group(&GroupId::from("1-2")).unwrap();
        assert!(group.locked());
        assert!(group.events().values().all(|e| e.locked));

        assert!(!editor.lock_group(&GroupId::from("1-2")).unwrap());
    }

    #[test]
    fn test_lock_unknown_group() {
        let mut editor = snare_editor();
        assert!(matches!(
            editor.lock_group(&GroupId::from("9")),
            Err(EditorError::UnknownGroup(_))
        ));
    }

    #[test]
    fn test_delete_prunes_groups_and_selection() {
        let mut editor = snare_editor();
        editor.toggle_selection(&[EventId(1), EventId(3)]);
        assert_eq!(editor.selection().len(), 2);

        assert_eq!(editor.delete_events(&[EventId(1), EventId(77)]), 1);
        assert_eq!(group_ids(&editor, "Snare"), vec!["2", "3"]);
        assert_eq!(editor.selection().ids(), vec![EventId(3)]);
    }

    #[test]
    fn test_delete_selection() {
        let mut editor = snare_editor();
        editor.toggle_selection(&[EventId(1), EventId(2)]);
        assert_eq!(editor.delete_selection(), 2);
        assert_eq!(group_ids(&editor, "Snare"), vec!["3"]);
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_duplicate_follows_span() {
        let mut editor = snare_editor();
        let created = editor.duplicate_events(&[EventId(1), EventId(2)]);
        assert_eq!(created, vec![EventId(4), EventId(5)]);

        let copy = editor.state().find_event(EventId(4)).unwrap();
        assert_eq!(copy.start_time(), 0.8);
        assert_eq!(copy.end_time(), 1.3);
        assert_eq!(group_ids(&editor, "Snare"), vec!["1-2", "3", "4-5"]);
    }

    #[test]
    fn test_undo_redo_restores_lanes() {
        let mut editor = snare_editor();
        let before = editor.state().clone();
        editor.shift_event(EventId(3), 0.6).unwrap();
        let after = editor.state().clone();

        assert!(editor.undo());
        assert_eq!(editor.state(), &before);
        let raw = editor.events("Snare").unwrap();
        let three = raw.iter().find(|e| e.id == EventId(3)).unwrap();
        assert_eq!(three.start_time(), 2.0);

        // An incidental recompute must not invalidate redo
        assert!(!editor.recompute());
        assert!(editor.can_redo());

        assert!(editor.redo());
        assert_eq!(editor.state(), &after);
    }

    #[test]
    fn test_undo_empty_is_noop() {
        let mut editor = Editor::default();
        assert!(!editor.undo());
        assert!(!editor.redo());
    }

    #[test]
    fn test_drag_without_movement_keeps_selection() {
        let mut editor = snare_editor();
        editor.toggle_selection(&[EventId(3)]);

        editor.drag_select(&SelectionRect::new(5.0, 5.0, 45.0, 45.0));
        assert_eq!(editor.selection().ids(), vec![EventId(3)]);

        editor.drag_select(&SelectionRect::new(5.0, 6.0, 45.0, 60.0));
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_shift_selection_clamps() {
        let mut editor = snare_editor();
        editor.toggle_selection(&[EventId(2), EventId(3)]);
        assert!(editor.shift_selection(-5.0));

        let state = editor.state();
        assert_eq!(state.find_event(EventId(2)).unwrap().start_time(), 0.0);
        assert_eq!(state.find_event(EventId(3)).unwrap().start_time(), 1.7);
        assert_eq!(editor.selection().get(EventId(3)).unwrap().start_time(), 1.7);
    }

    #[test]
    fn test_remove_track() {
        let mut editor = snare_editor();
        editor.add_track("Kick");
        assert!(editor.remove_track("Snare"));
        assert!(!editor.remove_track("Snare"));
        assert!(editor.state().track("Snare").is_none());
        assert_eq!(editor.tracks(), &["Kick".to_string()]);
    }

    #[test]
    fn test_undo_after_remove_track_changes_state() {
        let mut editor = Editor::default();
        editor.add_track("Kick");
        editor.add_track("Snare");
        editor.insert_event("Kick", 0.0, 0.5, None).unwrap();
        editor.insert_event("Snare", 1.0, 1.5, None).unwrap();
        assert_eq!(editor.undo_len(), 2);

        assert!(editor.remove_track("Snare"));
        // The Snare insert no longer has anything to undo
        assert_eq!(editor.undo_len(), 1);

        let before = editor.state().clone();
        assert!(editor.undo());
        assert_ne!(editor.state(), &before);
        assert!(editor.state().track("Kick").unwrap().is_empty());
        assert!(editor.state().track("Snare").is_none());
        assert!(!editor.undo());

        assert!(editor.redo());
        assert_eq!(editor.state(), &before);
        assert!(!editor.can_redo());
    }

    #[test]
    fn test_redo_after_add_track_keeps_new_track() {
        let mut editor = snare_editor();
        editor.shift_event(EventId(3), 4.0).unwrap();
        assert!(editor.undo());

        editor.add_track("Kick");
        assert_eq!(editor.redo_len(), 1);
        assert!(editor.redo());
        assert!(editor.state().track("Kick").unwrap().is_empty());
        assert_eq!(editor.state().find_event(EventId(3)).unwrap().start_time(), 4.0);
    }

    #[test]
    fn test_load_beat_with_repeated_track() {
        let mut beat = snare_editor().to_beat("Groove");
        beat.track_order.push("Snare".to_string());
        let beat = BeatFile::from_yaml(&beat.to_yaml().unwrap()).unwrap();
        assert_eq!(beat.track_order.len(), 2);

        let mut restored = Editor::default();
        restored.load_beat(&beat, |_| None);

        assert_eq!(restored.tracks(), &["Snare".to_string()]);
        assert_eq!(restored.state().event_count(), 3);
        assert_eq!(restored.events("Snare").unwrap().len(), 3);
    }

    #[test]
    fn test_beat_round_trip() {
        let mut editor = snare_editor();
        editor.add_track("Kick");
        editor
            .insert_event("Kick", 1.0, 1.25, Some(InstanceHandle(5)))
            .unwrap();
        editor.lock_group(&GroupId::from("1-2")).unwrap();

        let beat = editor.to_beat("Groove");
        let yaml = beat.to_yaml().unwrap();
        let loaded = BeatFile::from_yaml(&yaml).unwrap();

        let mut restored = Editor::default();
        restored.load_beat(&loaded, |event| Some(InstanceHandle(event.id.0 * 10)));

        assert_eq!(restored.tracks(), editor.tracks());
        assert_eq!(restored.undo_len(), 0);
        assert!(restored
            .state()
            .find_group(&GroupId::from("1-2"))
            .unwrap()
            .locked());
        assert_eq!(
            restored.state().find_event(EventId(4)).unwrap().instance,
            Some(InstanceHandle(40))
        );

        let next = restored.insert_event("Kick", 3.0, 3.5, None).unwrap();
        assert_eq!(next, EventId(5));
    }
}
