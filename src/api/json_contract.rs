use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};
use crate::render::Renderer;

use super::{TimelineEngine, TimelineSnapshot};

pub const TIMELINE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: TimelineSnapshot,
}

impl TimelineSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> TimelineResult<String> {
        let payload = TimelineSnapshotJsonContractV1 {
            schema_version: TIMELINE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> TimelineResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<TimelineSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: TimelineSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                TimelineError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != TIMELINE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(TimelineError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<D, R: Renderer> TimelineEngine<D, R> {
    pub fn snapshot_json_contract_v1_pretty(&self) -> TimelineResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
