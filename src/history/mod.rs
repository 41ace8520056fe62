// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Linear undo/redo history over state snapshots.
//!
//! Every stored entry is an owned copy, so later edits to the current
//! state can never reach back into the stacks. Commits that would not
//! change the state are rejected, keeping no-ops out of the undo stack.

use std::collections::VecDeque;

use tracing::{debug, trace};

/// Snapshot history with a change-detection gate
#[derive(Debug, Clone)]
pub struct History<S> {
    /// Current state
    current: S,
    /// Past states, oldest first
    undo_stack: VecDeque<S>,
    /// Undone states, oldest first
    redo_stack: Vec<S>,
    /// Maximum undo depth (0 = unlimited)
    limit: usize,
}

impl<S: Clone + PartialEq> History<S> {
    /// Create a history starting at `initial`
    pub fn new(initial: S) -> Self {
        Self::with_limit(initial, 0)
    }

    /// Create a history with a bounded undo depth (0 = unlimited)
    pub fn with_limit(initial: S, limit: usize) -> Self {
        Self {
            current: initial,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    /// Current state
    pub fn current(&self) -> &S {
        &self.current
    }

    /// Check whether `state` differs from the current state
    pub fn differs(&self, state: &S) -> bool {
        *state != self.current
    }

    /// Make `state` current, pushing the previous state for undo
    ///
    /// Returns `false` and records nothing when `state` equals the
    /// current state. A successful commit clears the redo stack.
    pub fn commit(&mut self, state: S) -> bool {
        if !self.differs(&state) {
            trace!("Ignoring commit of unchanged state");
            return false;
        }

        let previous = std::mem::replace(&mut self.current, state);
        self.undo_stack.push_back(previous);
        if self.limit > 0 {
            while self.undo_stack.len() > self.limit {
                self.undo_stack.pop_front();
            }
        }
        self.redo_stack.clear();
        debug!("Committed state ({} undo entries)", self.undo_stack.len());
        true
    }

    /// Replace the current state without recording history
    ///
    /// Used for structural changes that are not user edits.
    pub fn rebase(&mut self, state: S) {
        self.current = state;
    }

    /// Apply `edit` to every stacked entry
    ///
    /// Entries that end up equal to their neighbour in the timeline are
    /// dropped, so every remaining undo or redo step still changes the
    /// state. The current state is left alone.
    pub fn rewrite<F: FnMut(&mut S)>(&mut self, mut edit: F) {
        self.undo_stack.iter_mut().for_each(&mut edit);
        self.redo_stack.iter_mut().for_each(&mut edit);

        let mut undo = std::mem::take(&mut self.undo_stack);
        let mut kept_undo: VecDeque<S> = VecDeque::with_capacity(undo.len());
        while let Some(entry) = undo.pop_back() {
            let newer = kept_undo.front().unwrap_or(&self.current);
            if entry != *newer {
                kept_undo.push_front(entry);
            }
        }

        let mut kept_redo: Vec<S> = Vec::with_capacity(self.redo_stack.len());
        for entry in std::mem::take(&mut self.redo_stack).into_iter().rev() {
            let older = kept_redo.last().unwrap_or(&self.current);
            if entry != *older {
                kept_redo.push(entry);
            }
        }
        kept_redo.reverse();

        debug!(
            "Rewrote history ({} undo, {} redo entries)",
            kept_undo.len(),
            kept_redo.len()
        );
        self.undo_stack = kept_undo;
        self.redo_stack = kept_redo;
    }

    /// Restore the most recent undo entry
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop_back() {
            Some(previous) => {
                let undone = std::mem::replace(&mut self.current, previous);
                self.redo_stack.push(undone);
                true
            }
            None => false,
        }
    }

    /// Restore the most recently undone state
    ///
    /// Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(next) => {
                let replaced = std::mem::replace(&mut self.current, next);
                self.undo_stack.push_back(replaced);
                true
            }
            None => false,
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undo steps
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redo steps
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop all history, keeping the current state
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Reset to a new state with empty stacks
    pub fn reset(&mut self, state: S) {
        self.current = state;
        self.clear();
    }
}
