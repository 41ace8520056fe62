// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration and beat persistence.
//!
//! This module provides data structures for loading editor settings
//! (TOML) and saving/loading named beats (YAML).

pub mod watcher;

pub use watcher::{validate_beat, BeatEvent, BeatWatcher};

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::grouping::GroupedState;
use crate::timeline::TimelineLayout;

/// Editor settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorConfig {
    /// Horizontal pixels per second of audio
    #[serde(default = "default_pixels_per_second")]
    pub pixels_per_second: f64,
    /// Height of one track band in pixels
    #[serde(default = "default_band_height")]
    pub band_height: f64,
    /// Height of the timeline header in pixels
    #[serde(default = "default_header_offset")]
    pub header_offset: f64,
    /// Maximum undo depth (0 = unlimited)
    #[serde(default)]
    pub history_limit: usize,
}

fn default_pixels_per_second() -> f64 {
    100.0
}
fn default_band_height() -> f64 {
    50.0
}
fn default_header_offset() -> f64 {
    40.0
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            pixels_per_second: default_pixels_per_second(),
            band_height: default_band_height(),
            header_offset: default_header_offset(),
            history_limit: 0,
        }
    }
}

impl EditorConfig {
    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read editor config: {:?}", path.as_ref()))?;
        Self::from_toml(&contents)
    }

    /// Parse settings from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse editor config")
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize editor config")
    }

    /// Timeline layout described by these settings
    pub fn layout(&self) -> TimelineLayout {
        TimelineLayout {
            pixels_per_second: self.pixels_per_second,
            band_height: self.band_height,
            header_offset: self.header_offset,
        }
    }
}

/// A saved, named beat
///
/// Playback handles are not stored; they are reconstructed on load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BeatFile {
    /// Beat name
    pub name: String,
    /// Tracks in band order
    #[serde(default)]
    pub track_order: Vec<String>,
    /// Grouped events per track
    #[serde(default)]
    pub state: GroupedState,
}

impl BeatFile {
    /// Create a beat file
    pub fn new(name: impl Into<String>, track_order: Vec<String>, state: GroupedState) -> Self {
        Self {
            name: name.into(),
            track_order,
            state,
        }
    }

    /// Load a beat from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read beat file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a beat from a YAML string
    ///
    /// The grouped state is normalized: empty groups are dropped and
    /// group ids, spans and member fields are re-derived.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let beat: BeatFile = serde_yaml::from_str(yaml).context("Failed to parse beat YAML")?;
        Ok(Self {
            state: beat.state.normalized(),
            ..beat
        })
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize beat to YAML")
    }

    /// Save the beat to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write beat file: {:?}", path.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::{OverlapGroup, TrackGroups};
    use crate::timeline::{Event, EventId, GroupId, InstanceHandle};

    #[test]
    fn test_parse_editor_config() {
        let toml = r#"
pixels_per_second = 200.0
band_height = 64.0
header_offset = 32.0
history_limit = 50
"#;
        let config = EditorConfig::from_toml(toml).unwrap();
        assert_eq!(config.pixels_per_second, 200.0);
        assert_eq!(config.band_height, 64.0);
        assert_eq!(config.header_offset, 32.0);
        assert_eq!(config.history_limit, 50);

        let layout = config.layout();
        assert_eq!(layout.band_height, 64.0);
    }

    #[test]
    fn test_editor_config_defaults() {
        let config = EditorConfig::from_toml("band_height = 20.0").unwrap();
        assert_eq!(config.pixels_per_second, 100.0);
        assert_eq!(config.band_height, 20.0);
        assert_eq!(config.header_offset, 40.0);
        assert_eq!(config.history_limit, 0);
    }

    #[test]
    fn test_editor_config_toml_round_trip() {
        let config = EditorConfig {
            history_limit: 10,
            ..Default::default()
        };
        let text = config.to_toml().unwrap();
        assert_eq!(EditorConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_editor_config() {
        assert!(EditorConfig::from_toml("pixels_per_second = \"fast\"").is_err());
    }

    #[test]
    fn test_parse_beat() {
        let yaml = r#"
name: "Four on the floor"
track_order: [Kick, Snare]
state:
  Kick:
    "1":
      id: "1"
      instrument_name: Kick
      start_time: 0.0
      end_time: 0.25
      events:
        1:
          id: 1
          instrument_name: Kick
          start_time: 0.0
          end_time: 0.25
  Snare: {}
"#;
        let beat = BeatFile::from_yaml(yaml).unwrap();
        assert_eq!(beat.name, "Four on the floor");
        assert_eq!(beat.track_order, vec!["Kick", "Snare"]);
        assert_eq!(beat.state.event_count(), 1);
        assert!(beat.state.track("Snare").unwrap().is_empty());

        let kick = beat.state.find_event(EventId(1)).unwrap();
        assert_eq!(kick.parent_id, Some(GroupId::from("1")));
        assert_eq!(kick.instance, None);
    }

    #[test]
    fn test_beat_skips_instance_handles() {
        let event = Event::new(EventId(3), "Hat", 1.0, 1.1).with_instance(InstanceHandle(77));
        let group = OverlapGroup::from_members("Hat", vec![event], true).unwrap();
        let mut groups = TrackGroups::new();
        groups.insert(group.id.clone(), group);
        let mut state = GroupedState::new();
        state.insert_track("Hat", groups);

        let beat = BeatFile::new("Hats", vec!["Hat".to_string()], state);
        let yaml = beat.to_yaml().unwrap();
        assert!(!yaml.contains("instance"));

        let loaded = BeatFile::from_yaml(&yaml).unwrap();
        let hat = loaded.state.find_event(EventId(3)).unwrap();
        assert_eq!(hat.instance, None);
        assert!(hat.locked);
        assert!(loaded.state.find_group(&GroupId::from("3")).unwrap().locked());
    }

    #[test]
    fn test_invalid_beat() {
        assert!(BeatFile::from_yaml("name: [").is_err());
    }
}
