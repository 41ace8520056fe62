// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! File watcher for saved beats.
//!
//! Watches a beat file or a directory of beats and reloads beats that
//! change on disk, so an editor can pick up edits made elsewhere.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

use super::BeatFile;

/// Events emitted by the beat watcher
#[derive(Debug, Clone)]
pub enum BeatEvent {
    /// A beat file was modified and successfully reloaded
    Reloaded(PathBuf, Box<BeatFile>),
    /// A beat file was modified but failed to parse
    Error(String),
    /// A new file was created in the watch directory
    FileCreated(PathBuf),
    /// A file was deleted from the watch directory
    FileDeleted(PathBuf),
}

/// Beat file watcher with debouncing
pub struct BeatWatcher {
    _watcher: RecommendedWatcher,
    event_receiver: Receiver<BeatEvent>,
    watched_path: PathBuf,
}

fn is_beat_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "yaml" || ext == "yml")
        .unwrap_or(false)
}

fn reload(path: &Path) -> BeatEvent {
    match BeatFile::load(path) {
        Ok(beat) => {
            debug!("Reloaded beat {:?} from {:?}", beat.name, path);
            BeatEvent::Reloaded(path.to_path_buf(), Box::new(beat))
        }
        Err(e) => {
            warn!("Failed to reload beat {:?}: {:#}", path, e);
            BeatEvent::Error(format!("Failed to load {:?}: {}", path, e))
        }
    }
}

impl BeatWatcher {
    /// Create a new watcher for a beat file or directory
    ///
    /// # Arguments
    /// * `path` - Path to watch (file or directory)
    /// * `debounce_ms` - Debounce duration in milliseconds (default: 500)
    pub fn new<P: AsRef<Path>>(path: P, debounce_ms: Option<u64>) -> Result<Self> {
        let watched_path = path.as_ref().to_path_buf();
        let debounce_duration = Duration::from_millis(debounce_ms.unwrap_or(500));

        let (event_tx, event_rx): (Sender<BeatEvent>, Receiver<BeatEvent>) = mpsc::channel();
        let (notify_tx, notify_rx): (Sender<Event>, Receiver<Event>) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    let _ = notify_tx.send(event);
                }
            },
            Config::default(),
        )
        .map_err(|e| anyhow!("Failed to create file watcher: {}", e))?;

        let mode = if watched_path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher
            .watch(&watched_path, mode)
            .map_err(|e| anyhow!("Failed to watch path {:?}: {}", watched_path, e))?;

        let root = watched_path.clone();
        std::thread::spawn(move || {
            let mut last_event_time: Option<Instant> = None;
            let mut pending_paths: Vec<PathBuf> = Vec::new();

            loop {
                match notify_rx.recv_timeout(Duration::from_millis(100)) {
                    Ok(event) => match event.kind {
                        EventKind::Create(_) => {
                            for path in event.paths {
                                let _ = event_tx.send(BeatEvent::FileCreated(path));
                            }
                        }
                        EventKind::Remove(_) => {
                            for path in event.paths {
                                let _ = event_tx.send(BeatEvent::FileDeleted(path));
                            }
                        }
                        EventKind::Modify(_) => {
                            for path in event.paths {
                                if !pending_paths.contains(&path) {
                                    pending_paths.push(path);
                                }
                            }
                            last_event_time = Some(Instant::now());
                        }
                        _ => {}
                    },
                    Err(mpsc::RecvTimeoutError::Timeout) => {
                        let settled = last_event_time
                            .map(|t| t.elapsed() >= debounce_duration)
                            .unwrap_or(false);
                        if settled {
                            for path in pending_paths.drain(..) {
                                if is_beat_file(&path) || path == root {
                                    let _ = event_tx.send(reload(&path));
                                }
                            }
                            last_event_time = None;
                        }
                    }
                    Err(mpsc::RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        Ok(Self {
            _watcher: watcher,
            event_receiver: event_rx,
            watched_path,
        })
    }

    /// Block until the next beat event
    ///
    /// Returns `None` once the watcher thread has stopped.
    pub fn recv(&self) -> Option<BeatEvent> {
        self.event_receiver.recv().ok()
    }

    /// Try to receive the next beat event (non-blocking)
    pub fn try_recv(&self) -> Option<BeatEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Receive all pending beat events
    pub fn recv_all(&self) -> Vec<BeatEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }

    /// Get the path being watched
    pub fn watched_path(&self) -> &Path {
        &self.watched_path
    }
}

/// Parse a beat file without applying it
pub fn validate_beat<P: AsRef<Path>>(path: P) -> Result<BeatFile> {
    BeatFile::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;

    const BEAT: &str = r#"
name: "Initial"
track_order: [Kick]
state:
  Kick: {}
"#;

    #[test]
    fn test_validate_beat() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("beat.yaml");
        fs::write(&file_path, BEAT).unwrap();

        let beat = validate_beat(&file_path).unwrap();
        assert_eq!(beat.name, "Initial");
        assert_eq!(beat.track_order, vec!["Kick"]);
    }

    #[test]
    fn test_validate_invalid_beat() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("invalid.yaml");
        fs::write(&file_path, "this is not valid yaml: [").unwrap();

        assert!(validate_beat(&file_path).is_err());
    }

    #[test]
    fn test_validate_missing_file() {
        let dir = tempdir().unwrap();
        assert!(validate_beat(dir.path().join("missing.yaml")).is_err());
    }

    #[test]
    fn test_is_beat_file() {
        assert!(is_beat_file(Path::new("beats/groove.yaml")));
        assert!(is_beat_file(Path::new("groove.yml")));
        assert!(!is_beat_file(Path::new("groove.toml")));
        assert!(!is_beat_file(Path::new("groove")));
    }

    #[test]
    fn test_watcher_creation() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("watch.yaml"), BEAT).unwrap();

        let watcher = BeatWatcher::new(dir.path(), Some(100)).unwrap();
        assert_eq!(watcher.watched_path(), dir.path());
    }

    #[test]
    fn test_watcher_detects_changes() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("detect.yaml");
        fs::write(&file_path, BEAT).unwrap();

        let watcher = BeatWatcher::new(dir.path(), Some(100)).unwrap();
        std::thread::sleep(Duration::from_millis(50));

        let modified = BEAT.replace("Initial", "Modified");
        let mut file = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&file_path)
            .unwrap();
        file.write_all(modified.as_bytes()).unwrap();
        file.flush().unwrap();
        drop(file);

        std::thread::sleep(Duration::from_millis(300));

        let events = watcher.recv_all();
        let reloaded = events
            .iter()
            .find(|e| matches!(e, BeatEvent::Reloaded(_, _)));
        if let Some(BeatEvent::Reloaded(_, beat)) = reloaded {
            assert_eq!(beat.name, "Modified");
        }
        // Filesystem notifications are not guaranteed to arrive in time on
        // every platform, so a missing event is not a failure.
    }
}
