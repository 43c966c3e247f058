use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;

/// Interaction events forwarded to the analytics collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TrackEvent {
    PageView {
        scenario: String,
        page: usize,
        tab: String,
    },
    TabChange {
        scenario: String,
        tab: String,
    },
    Pagination {
        scenario: String,
        page: usize,
    },
    Search {
        scenario: String,
        query: String,
    },
    ResultClick {
        scenario: String,
        result_id: String,
        platform: String,
        display_name: String,
    },
}

impl TrackEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TrackEvent::PageView { .. } => "page_view",
            TrackEvent::TabChange { .. } => "tab_change",
            TrackEvent::Pagination { .. } => "pagination",
            TrackEvent::Search { .. } => "search",
            TrackEvent::ResultClick { .. } => "result_click",
        }
    }
}

/// Fire-and-forget sink. Implementations swallow their own failures.
pub trait Tracker {
    fn track(&self, event: &TrackEvent);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NullTracker;

impl Tracker for NullTracker {
    fn track(&self, _event: &TrackEvent) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LogTracker;

impl Tracker for LogTracker {
    fn track(&self, event: &TrackEvent) {
        match event {
            TrackEvent::PageView {
                scenario,
                page,
                tab,
            } => tracing::info!(event = "page_view", %scenario, page, %tab, "track"),
            TrackEvent::TabChange { scenario, tab } => {
                tracing::info!(event = "tab_change", %scenario, %tab, "track")
            }
            TrackEvent::Pagination { scenario, page } => {
                tracing::info!(event = "pagination", %scenario, page, "track")
            }
            TrackEvent::Search { scenario, query } => {
                tracing::info!(event = "search", %scenario, %query, "track")
            }
            TrackEvent::ResultClick {
                scenario,
                result_id,
                platform,
                display_name,
            } => tracing::info!(
                event = "result_click",
                %scenario,
                %result_id,
                %platform,
                %display_name,
                "track"
            ),
        }
    }
}

#[derive(Serialize)]
struct JsonlRecord<'a> {
    ts: String,
    #[serde(flatten)]
    event: &'a TrackEvent,
}

/// Appends one JSON object per event to a file.
#[derive(Debug)]
pub struct JsonlTracker {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonlTracker {
    pub fn open(path: &Path) -> Result<Self, String> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| format!("failed to open tracking file '{}': {e}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }
}

impl Tracker for JsonlTracker {
    fn track(&self, event: &TrackEvent) {
        let record = JsonlRecord {
            ts: chrono::Utc::now().to_rfc3339(),
            event,
        };
        let mut line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode tracking event");
                return;
            }
        };
        line.push('\n');
        let Ok(mut file) = self.file.lock() else {
            tracing::warn!(path = %self.path.display(), "tracking file lock poisoned");
            return;
        };
        if let Err(e) = file.write_all(line.as_bytes()) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write tracking event");
        }
    }
}

/// Keeps every event in a shared buffer. Clones share the same buffer.
#[derive(Clone, Debug, Default)]
pub struct MemoryTracker {
    events: Arc<Mutex<Vec<TrackEvent>>>,
}

impl MemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TrackEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events().iter().map(TrackEvent::name).collect()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl Tracker for MemoryTracker {
    fn track(&self, event: &TrackEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Forwards every event to each inner tracker in order.
pub struct FanoutTracker {
    inner: Vec<Box<dyn Tracker>>,
}

impl FanoutTracker {
    pub fn new(inner: Vec<Box<dyn Tracker>>) -> Self {
        Self { inner }
    }
}

impl Tracker for FanoutTracker {
    fn track(&self, event: &TrackEvent) {
        for t in self.inner.iter() {
            t.track(event);
        }
    }
}
