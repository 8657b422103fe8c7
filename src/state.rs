use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};

use crate::data::loader::LoadOutcome;
use crate::data::model::{ChartData, PivotResult};
use crate::data::pivot::aggregate;

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Categories,
    Analytics,
    Chat,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Categories, Page::Analytics, Page::Chat];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Categories => "Categories",
            Page::Analytics => "Analytics",
            Page::Chat => "Chat",
        }
    }
}

// ---------------------------------------------------------------------------
// Chart status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// The data loaded but nothing pivoted into a row.
    NoUsableRows,
    LoadFailed(String),
}

/// Analytics page status. Exactly one of these holds at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartStatus {
    Loading,
    Ready {
        chart: ChartData,
        /// Category totals in first-encounter order.
        totals: Vec<(String, f64)>,
    },
    Fallback {
        chart: ChartData,
        reason: FallbackReason,
    },
}

impl ChartStatus {
    /// Turn a finished load into what the page shows.
    pub fn from_outcome(outcome: LoadOutcome) -> Self {
        match outcome {
            LoadOutcome::Records(records) => {
                let result = aggregate(&records);
                log::info!(
                    "Aggregated {} records into {} yearly rows for {:?}",
                    records.len(),
                    result.rows.len(),
                    result.categories.labels()
                );
                Self::from_pivot(result)
            }
            LoadOutcome::Empty => {
                log::warn!("Dataset has no rows, showing fallback data");
                Self::fallback(FallbackReason::NoUsableRows)
            }
            LoadOutcome::Failed(e) => {
                log::error!("Failed to load dataset: {e:#}");
                Self::fallback(FallbackReason::LoadFailed(e.to_string()))
            }
        }
    }

    pub fn from_pivot(result: PivotResult) -> Self {
        if result.rows.is_empty() {
            log::warn!("No usable rows in dataset, showing fallback data");
            return Self::fallback(FallbackReason::NoUsableRows);
        }
        ChartStatus::Ready {
            chart: ChartData::from(&result),
            totals: result.totals,
        }
    }

    fn fallback(reason: FallbackReason) -> Self {
        ChartStatus::Fallback {
            chart: ChartData::fallback(),
            reason,
        }
    }

    /// Chart to draw, if the load has finished.
    pub fn chart(&self) -> Option<&ChartData> {
        match self {
            ChartStatus::Loading => None,
            ChartStatus::Ready { chart, .. } | ChartStatus::Fallback { chart, .. } => Some(chart),
        }
    }

    /// Inline notice for a failed load.
    pub fn notice(&self) -> Option<&str> {
        match self {
            ChartStatus::Fallback {
                reason: FallbackReason::LoadFailed(msg),
                ..
            } => Some(msg),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub page: Page,

    /// Free-text query on the Categories page.
    pub search_query: String,

    /// CSV backing the Analytics page.
    pub dataset_path: PathBuf,

    pub chart: ChartStatus,

    /// Pending background load, if any.
    pending: Option<Receiver<LoadOutcome>>,

    /// Set when a page change or button asks for a fresh load.
    reload_requested: bool,
}

impl AppState {
    pub fn new(dataset_path: PathBuf) -> Self {
        Self {
            page: Page::Home,
            search_query: String::new(),
            dataset_path,
            chart: ChartStatus::Loading,
            pending: None,
            reload_requested: false,
        }
    }

    /// Switch page. Entering Analytics always reloads the dataset.
    pub fn navigate(&mut self, page: Page) {
        if page == Page::Analytics && self.page != Page::Analytics {
            self.request_reload();
        }
        self.page = page;
    }

    pub fn request_reload(&mut self) {
        self.reload_requested = true;
    }

    /// Point the Analytics page at another file and reload.
    pub fn set_dataset_path(&mut self, path: PathBuf) {
        self.dataset_path = path;
        self.request_reload();
    }

    /// Take a pending reload request, marking the chart as loading.
    pub fn take_reload_request(&mut self) -> bool {
        if !self.reload_requested {
            return false;
        }
        self.reload_requested = false;
        self.chart = ChartStatus::Loading;
        true
    }

    /// Track a newly started load. A previous one still in flight is dropped.
    pub fn begin_load(&mut self, rx: Receiver<LoadOutcome>) {
        self.chart = ChartStatus::Loading;
        self.pending = Some(rx);
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Check the pending load without blocking.
    pub fn poll_load(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };
        match rx.try_recv() {
            Ok(outcome) => {
                self.pending = None;
                self.apply_outcome(outcome);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                self.chart = ChartStatus::fallback(FallbackReason::LoadFailed(
                    "loader stopped unexpectedly".to_string(),
                ));
            }
        }
    }

    pub fn apply_outcome(&mut self, outcome: LoadOutcome) {
        self.chart = ChartStatus::from_outcome(outcome);
    }
}
