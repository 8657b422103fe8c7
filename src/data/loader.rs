use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use eframe::egui;

use super::error::LoadError;
use super::model::{CellValue, RawRecord};

// ---------------------------------------------------------------------------
// Outcome of one load
// ---------------------------------------------------------------------------

/// What a load produced. Callers pick fallback data on anything but
/// [`LoadOutcome::Records`].
#[derive(Debug)]
pub enum LoadOutcome {
    Records(Vec<RawRecord>),
    /// Header present, no data rows.
    Empty,
    Failed(LoadError),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load `path` and classify the result. Never fails past this boundary.
pub fn fetch(path: &Path) -> LoadOutcome {
    match load_records(path) {
        Ok(records) if records.is_empty() => LoadOutcome::Empty,
        Ok(records) => LoadOutcome::Records(records),
        Err(e) => LoadOutcome::Failed(e),
    }
}

/// Run [`fetch`] on a worker thread. The receiver yields exactly one
/// outcome; dropping it discards a stale load.
pub fn spawn_fetch(path: PathBuf, ctx: egui::Context) -> Receiver<LoadOutcome> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        log::info!("Loading {}", path.display());
        let outcome = fetch(&path);
        // The UI may have moved on to a newer load.
        if tx.send(outcome).is_ok() {
            ctx.request_repaint();
        }
    });
    rx
}

/// Read every row of a CSV file into [`RawRecord`]s.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(file)
}

/// CSV layout: header row with column names, then one record per line.
/// Empty lines are skipped; short rows leave trailing columns absent.
pub fn read_records<R: Read>(input: R) -> Result<Vec<RawRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .map_err(LoadError::Headers)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.map_err(|source| LoadError::Row {
            row: row_no,
            source,
        })?;

        let mut record = RawRecord::new();
        for (col_name, value) in headers.iter().zip(row.iter()) {
            record.insert(col_name.clone(), CellValue::guess(value));
        }
        records.push(record);
    }

    log_sample_keys(&records);
    Ok(records)
}

fn log_sample_keys(records: &[RawRecord]) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    let mut keys: Vec<&str> = records
        .iter()
        .take(3)
        .flat_map(|r| r.cells.keys().map(String::as_str))
        .collect();
    keys.sort_unstable();
    keys.dedup();
    log::debug!("sample keys: {keys:?}");
}
