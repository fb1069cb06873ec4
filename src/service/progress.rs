//! Progress registry for tracking long-running operations.
//!
//! Each record is keyed by a caller-chosen progress token and lives from
//! `start` until `complete`. There is no expiry: a token that is never
//! completed stays registered for the life of the process.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use std::time::Instant;
use tracing::debug;

use crate::error::{Error, Result};

/// State of one tracked operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    /// Display label, fixed at creation
    pub title: String,
    /// Current progress value
    pub current: f64,
    /// Target value, if known
    pub total: Option<f64>,
    /// Latest annotation supplied by an update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Wall-clock creation time (ISO 8601 when serialized)
    pub started_at: DateTime<Utc>,
    #[serde(skip)]
    started: Instant,
}

impl ProgressRecord {
    fn new(title: String, total: Option<f64>) -> Self {
        Self {
            title,
            current: 0.0,
            total,
            message: None,
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }

    /// Seconds since the record was started, with two decimals.
    pub fn elapsed_secs(&self) -> String {
        format!("{:.2}", self.started.elapsed().as_secs_f64())
    }
}

/// How an update treats the stored total.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum TotalUpdate {
    /// Leave the stored total untouched.
    #[default]
    Keep,
    /// Replace the stored total (`None` clears it).
    Set(Option<f64>),
}

/// A record removed by `complete`, with its formatted elapsed time.
#[derive(Debug, Clone)]
pub struct CompletedProgress {
    pub record: ProgressRecord,
    /// Elapsed seconds, always two decimals (e.g. `"1.05"`).
    pub duration: String,
}

/// Registry of in-flight progress operations.
///
/// Every operation is atomic with respect to its token, so a registry can be
/// shared across concurrently running tool calls behind an `Arc`.
#[derive(Debug, Default)]
pub struct ProgressRegistry {
    records: DashMap<String, ProgressRecord>,
}

impl ProgressRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a new operation.
    pub fn start(
        &self,
        token: &str,
        title: impl Into<String>,
        total: Option<f64>,
    ) -> Result<ProgressRecord> {
        match self.records.entry(token.to_string()) {
            Entry::Occupied(_) => Err(Error::ProgressAlreadyExists(token.to_string())),
            Entry::Vacant(slot) => {
                let record = ProgressRecord::new(title.into(), total);
                slot.insert(record.clone());
                debug!("Started progress {} ({})", token, record.title);
                Ok(record)
            }
        }
    }

    /// Record new progress for an existing operation.
    pub fn update(
        &self,
        token: &str,
        current: f64,
        total: TotalUpdate,
        message: Option<String>,
    ) -> Result<ProgressRecord> {
        let mut record = self
            .records
            .get_mut(token)
            .ok_or_else(|| Error::ProgressNotFound(token.to_string()))?;

        record.current = current;
        if let TotalUpdate::Set(total) = total {
            record.total = total;
        }
        if message.is_some() {
            record.message = message;
        }

        Ok(record.value().clone())
    }

    /// Finish an operation, removing it from the registry.
    pub fn complete(&self, token: &str) -> Result<CompletedProgress> {
        let (_, record) = self
            .records
            .remove(token)
            .ok_or_else(|| Error::ProgressNotFound(token.to_string()))?;

        let duration = record.elapsed_secs();
        debug!("Completed progress {} in {}s", token, duration);

        Ok(CompletedProgress { record, duration })
    }

    /// Get a snapshot of a record.
    pub fn get(&self, token: &str) -> Option<ProgressRecord> {
        self.records.get(token).map(|r| r.value().clone())
    }

    /// Check if a token is registered.
    pub fn has(&self, token: &str) -> bool {
        self.records.contains_key(token)
    }

    /// Remove every record, returning how many were dropped.
    pub fn clear(&self) -> usize {
        let count = self.records.len();
        self.records.clear();
        count
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
