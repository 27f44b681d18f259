use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LedgerError, Result};

/// Key-value state and event emission, as seen from chaincode
pub trait ChaincodeStub {
    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<()>;

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// All entries whose key starts with `prefix`, in key order
    fn get_state_by_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>>;

    fn set_event(&mut self, name: &str, payload: &[u8]) -> Result<()>;
}

/// An event emitted by chaincode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    pub sequence: u64,
    pub name: String,
    pub payload: String,
}

/// In-process ledger: ordered state plus an append-only event log
#[derive(Debug, Default, Clone)]
pub struct MemoryStub {
    state: BTreeMap<String, Vec<u8>>,
    events: Vec<LedgerEvent>,
}

impl MemoryStub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Keys currently in state, in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.state.keys().map(String::as_str)
    }
}

impl ChaincodeStub for MemoryStub {
    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<()> {
        if key.is_empty() {
            return Err(LedgerError::InvalidArgument("state key is empty".into()));
        }
        debug!(key, bytes = value.len(), "put_state");
        self.state.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.state.get(key).cloned())
    }

    fn get_state_by_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>> {
        Ok(self
            .state
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }

    fn set_event(&mut self, name: &str, payload: &[u8]) -> Result<()> {
        if name.is_empty() {
            return Err(LedgerError::InvalidArgument("event name is empty".into()));
        }
        let payload = String::from_utf8(payload.to_vec())
            .map_err(|_| LedgerError::State(format!("payload of event {} is not UTF-8", name)))?;

        let event = LedgerEvent {
            sequence: self.events.len() as u64 + 1,
            name: name.to_string(),
            payload,
        };
        debug!(name = %event.name, sequence = event.sequence, "set_event");
        self.events.push(event);
        Ok(())
    }
}

/// Store `value` at `key` as JSON
pub(crate) fn put_json<S, T>(stub: &mut S, key: &str, value: &T) -> Result<Vec<u8>>
where
    S: ChaincodeStub + ?Sized,
    T: Serialize,
{
    let bytes = serde_json::to_vec(value).map_err(|e| LedgerError::State(e.to_string()))?;
    stub.put_state(key, &bytes)?;
    Ok(bytes)
}

/// Decode a JSON record stored by [`put_json`]
pub(crate) fn decode_json<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes)
        .map_err(|e| LedgerError::State(format!("corrupt record at {}: {}", key, e)))
}
