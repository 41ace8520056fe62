// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Beatgrid - overlap grouping and timeline state for a multi-track beat editor.
//!
//! Events on each track are clustered into overlap groups with stable,
//! content-derived ids. Groups can be locked to act as one unit, range
//! selections resolve against the grouped structure, and every change to
//! the grouped state is kept in a linear undo/redo history.

pub mod config;
pub mod editor;
pub mod error;
pub mod grouping;
pub mod history;
pub mod registry;
pub mod selection;
pub mod timeline;

pub use config::{BeatFile, EditorConfig};
pub use editor::Editor;
pub use error::{EditorError, EditorResult};
pub use grouping::{GroupedState, OverlapGroup};
pub use history::History;
pub use registry::{GeometrySource, TrackRegistry};
pub use selection::{SelectionRect, SelectionSet};
pub use timeline::{Event, EventId, GroupId};
