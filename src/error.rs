// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Editor error types.

use thiserror::Error;

use crate::timeline::{EventId, GroupId};

/// Errors returned for editing requests that name something unknown
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EditorError {
    /// No track mounted under this name
    #[error("Unknown track: {0}")]
    UnknownTrack(String),

    /// No event with this id on any track
    #[error("Unknown event: {0}")]
    UnknownEvent(EventId),

    /// No group with this id in the grouped state
    #[error("Unknown group: {0}")]
    UnknownGroup(GroupId),
}

/// Result alias for editor operations
pub type EditorResult<T> = std::result::Result<T, EditorError>;
