//! Opaque action-state payloads.

use serde::de::DeserializeOwned;

/// A fatal decode failure.
///
/// A malformed payload means the producer broke the action-state contract;
/// callers must propagate this rather than show stale or partial state.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed action state: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid action state: {0}")]
    Invalid(String),
}

/// The state value of a named action.
///
/// The payload stays opaque until a consumer decodes it into a concrete
/// type, deferring deserialization the same way the wire layer defers
/// message payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionValue(serde_json::Value);

impl ActionValue {
    /// Wraps a raw JSON value.
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Decodes the payload into the given type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        Ok(serde_json::from_value(self.0.clone())?)
    }

    /// The raw JSON value.
    pub fn get(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for ActionValue {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}
