use crate::errors::CoreError;
use crate::models::state::AlertState;

use super::format;

/// Snapshot encoding for the state aggregate: save/load to/from the
/// portable SWAL byte format.
pub struct StorageManager;

impl StorageManager {
    /// Serialize the aggregate to snapshot bytes.
    ///
    /// Flow: AlertState → bincode → SWAL format bytes
    pub fn save_to_bytes(state: &AlertState) -> Result<Vec<u8>, CoreError> {
        let payload = bincode::serialize(state)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize alert state: {e}")))?;

        Ok(format::write_snapshot(format::CURRENT_VERSION, &payload))
    }

    /// Deserialize an aggregate from snapshot bytes.
    ///
    /// Flow: SWAL bytes → parse header → bincode → AlertState
    pub fn load_from_bytes(data: &[u8]) -> Result<AlertState, CoreError> {
        let (_header, payload) = format::read_snapshot(data)?;

        let state: AlertState = bincode::deserialize(payload).map_err(|e| {
            CoreError::Deserialization(format!("Failed to deserialize alert state: {e}"))
        })?;

        Ok(state)
    }
}
