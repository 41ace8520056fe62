// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Overlap clustering.
//!
//! Elements are first assigned greedily to the first cluster they touch,
//! then clusters are merged until no two clusters contain a pair of
//! intersecting elements. The result is the set of maximal transitive
//! overlap clusters regardless of input order.

use tracing::{debug, trace};

use super::group::{GroupedState, OverlapGroup, TrackGroups};
use crate::registry::{GeometrySnapshot, PlacedEvent};
use crate::timeline::{BoundingBox, GroupId};

/// Partition boxes into maximal transitively intersecting clusters
///
/// Returns clusters as lists of indices into `boxes`.
pub fn overlap_clusters(boxes: &[BoundingBox]) -> Vec<Vec<usize>> {
    let mut clusters: Vec<Vec<usize>> = Vec::new();

    for (index, bounds) in boxes.iter().enumerate() {
        let touched = clusters
            .iter_mut()
            .find(|cluster| cluster.iter().any(|&other| bounds.intersects(&boxes[other])));
        match touched {
            Some(cluster) => cluster.push(index),
            None => clusters.push(vec![index]),
        }
    }

    let mut passes = 0;
    loop {
        passes += 1;
        let mut merged = false;
        let mut a = 0;
        while a < clusters.len() {
            let mut b = a + 1;
            while b < clusters.len() {
                if clusters_touch(&clusters[a], &clusters[b], boxes) {
                    let absorbed = clusters.remove(b);
                    clusters[a].extend(absorbed);
                    merged = true;
                } else {
                    b += 1;
                }
            }
            a += 1;
        }
        if !merged {
            break;
        }
    }
    trace!("Clustered {} boxes in {} merge passes", boxes.len(), passes);

    clusters
}

fn clusters_touch(a: &[usize], b: &[usize], boxes: &[BoundingBox]) -> bool {
    a.iter()
        .any(|&i| b.iter().any(|&j| boxes[i].intersects(&boxes[j])))
}

/// Cluster the placed events of one track into overlap groups
///
/// `locked` is carried forward from any group in `previous` with the
/// same derived id; new groups start unlocked.
pub fn cluster_track(
    track: &str,
    elements: &[PlacedEvent],
    previous: Option<&TrackGroups>,
) -> TrackGroups {
    let boxes: Vec<BoundingBox> = elements.iter().map(|p| p.bounds).collect();
    let mut groups = TrackGroups::new();

    for cluster in overlap_clusters(&boxes) {
        let id = GroupId::from_members(cluster.iter().map(|&i| elements[i].event.id));
        let locked = previous
            .and_then(|groups| groups.get(&id))
            .map(OverlapGroup::locked)
            .unwrap_or(false);
        let members = cluster.iter().map(|&i| elements[i].event.clone());
        if let Some(group) = OverlapGroup::from_members(track, members, locked) {
            groups.insert(group.id.clone(), group);
        }
    }

    groups
}

/// Cluster every track of a geometry snapshot
///
/// Tracks without elements map to an empty group set.
pub fn cluster_snapshot(snapshot: &GeometrySnapshot, previous: &GroupedState) -> GroupedState {
    let mut state = GroupedState::new();
    for (track, elements) in snapshot {
        let groups = cluster_track(track, elements, previous.track(track));
        debug!(
            "Track {}: {} events in {} groups",
            track,
            elements.len(),
            groups.len()
        );
        state.insert_track(track.clone(), groups);
    }
    state
}
