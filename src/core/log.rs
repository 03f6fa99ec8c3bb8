//! Dispatch log: a record of fired transitions over time.
//!
//! Logging is opt-in on the machine (dispatch itself allocates nothing).
//! The log is immutable - `record` returns a new log with the entry added.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single fired transition.
///
/// For an internal transition (no destination) `to` equals `from` and
/// `internal` is set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// Index of the region that transitioned
    pub region: usize,
    /// State the region was in when the event arrived
    pub from: String,
    /// State the region ended up in
    pub to: String,
    /// Name of the event class that triggered the transition
    pub event: String,
    /// Whether this was an internal transition (action ran, state unchanged)
    pub internal: bool,
    /// When the transition fired
    pub timestamp: DateTime<Utc>,
}

/// Ordered log of fired transitions across all regions.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use trellis::{DispatchLog, DispatchRecord};
///
/// let log = DispatchLog::new();
/// let log = log.record(DispatchRecord {
///     region: 0,
///     from: "Disconnected".to_string(),
///     to: "Connecting".to_string(),
///     event: "connect".to_string(),
///     internal: false,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(log.records().len(), 1);
/// assert_eq!(log.path(0), vec!["Disconnected", "Connecting"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DispatchLog {
    records: Vec<DispatchRecord>,
}

impl Default for DispatchLog {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a fired transition, returning a new log.
    ///
    /// Does not mutate the existing log.
    pub fn record(&self, record: DispatchRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// All records in firing order.
    pub fn records(&self) -> &[DispatchRecord] {
        &self.records
    }

    /// The path of states one region traversed.
    ///
    /// Returns the region's state before its first logged transition, then
    /// the state after each of its transitions. Internal transitions appear
    /// as repeated states. Empty if the region never fired.
    pub fn path(&self, region: usize) -> Vec<&str> {
        let mut path = Vec::new();
        for record in self.records.iter().filter(|r| r.region == region) {
            if path.is_empty() {
                path.push(record.from.as_str());
            }
            path.push(record.to.as_str());
        }
        path
    }

    /// Elapsed time between the first and last logged transition.
    ///
    /// `None` if the log is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether any transition has been logged.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(region: usize, from: &str, to: &str, event: &str) -> DispatchRecord {
        DispatchRecord {
            region,
            from: from.to_string(),
            to: to.to_string(),
            event: event.to_string(),
            internal: from == to,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_log_is_empty() {
        let log = DispatchLog::new();
        assert!(log.is_empty());
        assert!(log.path(0).is_empty());
        assert!(log.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let log = DispatchLog::new();
        let new_log = log.record(record(0, "a", "b", "e"));

        assert_eq!(log.len(), 0);
        assert_eq!(new_log.len(), 1);
    }

    #[test]
    fn path_follows_one_region() {
        let log = DispatchLog::new()
            .record(record(0, "a", "b", "e1"))
            .record(record(1, "x", "y", "e1"))
            .record(record(0, "b", "c", "e2"));

        assert_eq!(log.path(0), vec!["a", "b", "c"]);
        assert_eq!(log.path(1), vec!["x", "y"]);
        assert!(log.path(2).is_empty());
    }

    #[test]
    fn internal_transition_repeats_state_in_path() {
        let log = DispatchLog::new()
            .record(record(0, "a", "b", "e1"))
            .record(record(0, "b", "b", "ping"));

        assert_eq!(log.path(0), vec!["a", "b", "b"]);
        assert!(log.records()[1].internal);
    }

    #[test]
    fn duration_spans_first_to_last() {
        let log = DispatchLog::new()
            .record(record(0, "a", "b", "e1"))
            .record(record(0, "b", "c", "e2"));

        assert!(log.duration().is_some());
    }

    #[test]
    fn log_round_trips_through_json() {
        let log = DispatchLog::new().record(record(0, "a", "b", "e1"));

        let json = serde_json::to_string(&log).unwrap();
        let deserialized: DispatchLog = serde_json::from_str(&json).unwrap();

        assert_eq!(log.records(), deserialized.records());
    }
}
