//! Topology-subsystem error type.

use thiserror::Error;

use tp_core::StationId;

/// Errors produced by `tp-topology`.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("no station named `{0}`")]
    UnknownName(String),

    #[error("station {0} not found in topology")]
    UnknownIndex(StationId),

    #[error("no path from {from} to {to}")]
    Unreachable { from: StationId, to: StationId },

    #[error("no station is reachable from {0}")]
    NoRoute(StationId),

    #[error("line would connect {0} to itself")]
    SelfLoop(StationId),

    #[error("station name `{0}` is already taken")]
    DuplicateName(String),

    #[error("route is empty")]
    EmptyRoute,

    #[error("route hop {from} -> {to} has no line")]
    InvalidRoute { from: StationId, to: StationId },

    #[error("invalid topology spec: {0}")]
    InvalidSpec(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TopologyError {
    /// `true` for the name/index lookup failures.
    pub fn is_lookup(&self) -> bool {
        matches!(self, TopologyError::UnknownName(_) | TopologyError::UnknownIndex(_))
    }
}

pub type TopologyResult<T> = Result<T, TopologyError>;
