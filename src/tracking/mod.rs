// src/tracking/mod.rs
//
// File-backed experiment tracking. Each run gets its own directory under the
// store root holding `meta.json` (id, timestamps, status) and, once closed,
// `metrics.json` with the named metrics logged during the run.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Running,
    Finished,
    Failed,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunMeta {
    pub run_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: RunStatus,
}

/// Store of runs under a root directory, created if needed.
pub struct Tracker {
    runs_dir: PathBuf,
}

impl Tracker {
    pub fn new(runs_dir: impl Into<PathBuf>) -> Result<Self> {
        let runs_dir = runs_dir.into();
        fs::create_dir_all(&runs_dir)
            .with_context(|| format!("creating runs directory {:?}", &runs_dir))?;
        Ok(Self { runs_dir })
    }

    /// Open a new run. The returned handle is a scoped resource: call
    /// [`Run::finish`] on success; a handle dropped any other way closes
    /// the run as `Failed`.
    pub fn start_run(&self) -> Result<Run> {
        let start_time = Utc::now();
        // Random suffix keeps ids unique across processes started in the
        // same microsecond; create_dir (not create_dir_all) makes any
        // remaining collision an error instead of a shared directory.
        let run_id = format!(
            "{}-{:04x}",
            start_time.timestamp_micros(),
            rand::random::<u16>()
        );
        let dir = self.runs_dir.join(&run_id);
        fs::create_dir(&dir).with_context(|| format!("creating run directory {:?}", &dir))?;

        let meta = RunMeta {
            run_id,
            start_time,
            end_time: None,
            status: RunStatus::Running,
        };
        write_json(&dir.join("meta.json"), &meta)?;

        info!(run_id = %meta.run_id, "started tracking run");
        Ok(Run {
            dir,
            meta,
            metrics: BTreeMap::new(),
            closed: false,
        })
    }
}

/// One open run. Metrics accumulate in memory and are persisted when the
/// run closes.
pub struct Run {
    dir: PathBuf,
    meta: RunMeta,
    metrics: BTreeMap<String, f64>,
    closed: bool,
}

impl Run {
    pub fn id(&self) -> &str {
        &self.meta.run_id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Record a named numeric metric. Logging the same name twice keeps
    /// the latest value.
    pub fn log_metric(&mut self, name: &str, value: f64) {
        info!(run_id = %self.meta.run_id, metric = name, value, "metric");
        self.metrics.insert(name.to_string(), value);
    }

    /// Close the run as finished, persisting metrics and final metadata.
    pub fn finish(mut self) -> Result<()> {
        self.close(RunStatus::Finished)
    }

    fn close(&mut self, status: RunStatus) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.meta.end_time = Some(Utc::now());
        self.meta.status = status;

        write_json(&self.dir.join("metrics.json"), &self.metrics)?;
        write_json(&self.dir.join("meta.json"), &self.meta)?;
        info!(run_id = %self.meta.run_id, ?status, "closed tracking run");
        Ok(())
    }
}

impl Drop for Run {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(e) = self.close(RunStatus::Failed) {
                warn!(run_id = %self.meta.run_id, "failed to close run: {e:#}");
            }
        }
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value).context("serializing tracking record")?;
    fs::write(path, body).with_context(|| format!("writing {:?}", path))
}
