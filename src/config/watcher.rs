// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! File watcher for hot-reloading pattern libraries.
//!
//! Watches a pattern file (or a directory of them) and reloads a file once
//! writes to it have settled, so long-running tools can pick up new scale
//! patterns without restarting.
//!
//! The `tonal` binary drives this through `--watch`; other callers use
//! [`PatternWatcher`] directly as library API.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::warn;

use super::PatternFile;

/// Events emitted by the pattern watcher
#[derive(Debug, Clone)]
pub enum PatternEvent {
    /// A pattern file was modified and successfully reloaded
    Reloaded(PathBuf, Box<PatternFile>),
    /// A pattern file was modified but failed to parse
    Error(PathBuf, String),
    /// A new file was created in the watch directory
    FileCreated(PathBuf),
    /// A file was deleted from the watch directory
    FileDeleted(PathBuf),
}

/// Pattern library watcher with debouncing
pub struct PatternWatcher {
    _watcher: RecommendedWatcher,
    event_receiver: Receiver<PatternEvent>,
    watched_path: PathBuf,
}

impl PatternWatcher {
    /// Watch a file or directory; modifications are reported once no further
    /// writes arrive for `debounce_ms` (500 ms by default)
    pub fn new<P: AsRef<Path>>(path: P, debounce_ms: Option<u64>) -> Result<Self> {
        let watched_path = path.as_ref().to_path_buf();
        let debounce = Duration::from_millis(debounce_ms.unwrap_or(500));

        let (event_tx, event_rx) = mpsc::channel();
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
        std::thread::spawn(move || debounce_loop(notify_rx, event_tx, root, debounce));

        Ok(Self {
            _watcher: watcher,
            event_receiver: event_rx,
            watched_path,
        })
    }

    /// Try to receive the next event (non-blocking)
    pub fn try_recv(&self) -> Option<PatternEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Receive all pending events
    pub fn recv_all(&self) -> Vec<PatternEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    /// Block until the next event is received
    pub fn recv(&self) -> Option<PatternEvent> {
        self.event_receiver.recv().ok()
    }

    pub fn watched_path(&self) -> &Path {
        &self.watched_path
    }
}

fn debounce_loop(
    notify_rx: Receiver<Event>,
    event_tx: Sender<PatternEvent>,
    root: PathBuf,
    debounce: Duration,
) {
    let mut last_event_time: Option<Instant> = None;
    let mut pending_paths: Vec<PathBuf> = Vec::new();

    loop {
        match notify_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => match event.kind {
                EventKind::Create(_) => {
                    for path in event.paths {
                        let _ = event_tx.send(PatternEvent::FileCreated(path));
                    }
                }
                EventKind::Remove(_) => {
                    for path in event.paths {
                        let _ = event_tx.send(PatternEvent::FileDeleted(path));
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
                if last_event_time.is_some_and(|t| t.elapsed() >= debounce) {
                    for path in pending_paths.drain(..) {
                        if is_pattern_file(&path) || path == root {
                            let _ = event_tx.send(reload(path));
                        }
                    }
                    last_event_time = None;
                }
            }
            // Watcher was dropped
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }
}

fn is_pattern_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml" || ext == "toml")
}

fn reload(path: PathBuf) -> PatternEvent {
    match PatternFile::load(&path) {
        Ok(file) => PatternEvent::Reloaded(path, Box::new(file)),
        Err(e) => {
            warn!(?path, error = %e, "pattern file reload failed");
            PatternEvent::Error(path, format!("{:#}", e))
        }
    }
}

/// Load a pattern file without applying it to any registry
pub fn validate_patterns<P: AsRef<Path>>(path: P) -> Result<PatternFile> {
    PatternFile::load(path)
}
