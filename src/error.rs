use thiserror::Error;

/// Returned by lookups that require the key to be present in the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("key not found")]
pub struct KeyError;
