//! Terminal status board.
//!
//! The Rust rendition of the original multi-line spinner display: every
//! account owns one entry, keyed by account id, and the newest `put` fully
//! replaces the previous text. A background task repaints all visible
//! entries in account insertion order.

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::broadcast;
use tokio::time;

use crate::config::BoardConfig;
use crate::status::types::{StatusSink, StatusUpdate};

struct Entry {
    text: String,
    removed: bool,
}

/// Shared, concurrently writable status board.
pub struct StatusBoard {
    entries: DashMap<String, Entry>,
    /// Insertion order of keys; defines display order.
    order: Mutex<Vec<String>>,
    config: BoardConfig,
}

impl StatusBoard {
    pub fn new(config: BoardConfig) -> Arc<Self> {
        Arc::new(Self {
            entries: DashMap::new(),
            order: Mutex::new(Vec::new()),
            config,
        })
    }

    /// Render the current frame and purge entries marked removed.
    ///
    /// Removal timing is the worker's concern: it lingers on the final text
    /// before sending the `removed` update, so the board hides the entry at
    /// the next repaint.
    pub fn frame(&self) -> String {
        let order = self.order.lock().expect("status board order poisoned");
        let mut lines = Vec::new();
        let mut purge = Vec::new();

        for key in order.iter() {
            if let Some(entry) = self.entries.get(key) {
                if entry.removed {
                    purge.push(key.clone());
                } else {
                    lines.push(entry.text.clone());
                }
            }
        }
        drop(order);

        for key in purge {
            self.entries.remove(&key);
            let mut order = self.order.lock().expect("status board order poisoned");
            order.retain(|k| k != &key);
        }

        lines.join("\n")
    }

    /// Repaint loop. Runs until the shutdown signal fires.
    pub async fn run(self: Arc<Self>, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = time::interval(Duration::from_millis(self.config.refresh_ms));
        let mut painted_lines = 0usize;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    painted_lines = self.repaint(painted_lines);
                }
                _ = shutdown.recv() => {
                    tracing::debug!("status board received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    fn repaint(&self, previous_lines: usize) -> usize {
        let frame = self.frame();
        let mut stdout = std::io::stdout().lock();
        if previous_lines > 0 {
            // Move the cursor back over the previous frame and clear it.
            let _ = write!(stdout, "\x1b[{}A\x1b[0J", previous_lines);
        }
        if !frame.is_empty() {
            let _ = writeln!(stdout, "{}", frame);
        }
        let _ = stdout.flush();
        if frame.is_empty() {
            0
        } else {
            frame.lines().count()
        }
    }
}

impl StatusSink for StatusBoard {
    fn put(&self, key: &str, update: StatusUpdate) {
        let is_new = !self.entries.contains_key(key);
        self.entries.insert(
            key.to_string(),
            Entry {
                text: update.text,
                removed: update.removed,
            },
        );
        if is_new {
            let mut order = self.order.lock().expect("status board order poisoned");
            order.push(key.to_string());
        }
    }
}
