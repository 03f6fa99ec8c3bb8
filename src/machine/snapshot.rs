//! Snapshot and restore for state machines.
//!
//! Guards and actions are code and cannot be serialized; a snapshot captures
//! the mutable side of a machine - its region states and dispatch log - so a
//! caller who can rebuild the same table can resume where it left off.

use crate::core::DispatchLog;
use crate::machine::StateMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur during snapshot operations
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot region count does not match the machine's
    #[error("Snapshot has {found} region states, machine has {expected} regions")]
    RegionCountMismatch { found: usize, expected: usize },

    /// Snapshot names a state absent from the machine's table
    #[error("Snapshot names state `{0}` which is not part of this transition table")]
    UnknownState(String),
}

/// Serializable capture of a machine's mutable state.
///
/// Region states are stored by name, so a snapshot survives any table
/// rebuild that keeps the same state names.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Current state name of each region, in region order
    pub region_states: Vec<String>,

    /// The dispatch log, if logging was enabled
    pub log: Option<DispatchLog>,
}

impl Snapshot {
    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }

    /// Serialize to compact binary bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from binary bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }
}

impl StateMachine {
    /// Capture the machine's current region states and log.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            region_states: self
                .current_states()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            log: self.log().cloned(),
        }
    }

    /// Restore region states and log from a snapshot.
    ///
    /// The snapshot is validated against this machine's table before any
    /// state is touched: on error the machine is unchanged.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        if snapshot.region_states.len() != self.regions.len() {
            return Err(SnapshotError::RegionCountMismatch {
                found: snapshot.region_states.len(),
                expected: self.regions.len(),
            });
        }

        let mut regions = Vec::with_capacity(snapshot.region_states.len());
        for name in &snapshot.region_states {
            match self.registry.id(name) {
                Some(id) => regions.push(id),
                None => return Err(SnapshotError::UnknownState(name.clone())),
            }
        }

        self.regions = regions;
        self.log = snapshot.log.clone();
        Ok(())
    }
}
