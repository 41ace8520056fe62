// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Overlap grouping.
//!
//! This module provides:
//! - Overlap groups with content-derived ids
//! - The grouped state tree (track -> group id -> group)
//! - The clustering pass that rebuilds the tree from geometry

pub mod cluster;
pub mod group;

pub use cluster::{cluster_snapshot, cluster_track, overlap_clusters};
pub use group::{GroupedState, Node, OverlapGroup, TrackGroups};
