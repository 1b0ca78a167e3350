use thiserror::Error;

use tp_core::{StationId, TpError};
use tp_entity::EntityError;
use tp_topology::TopologyError;

#[derive(Debug, Error)]
pub enum SimError {
    /// A station name or index that the topology does not know.
    #[error("invalid station {0}")]
    InvalidStation(String),

    /// An explicit route that is empty, does not start at the origin, or
    /// contains a hop without a line.
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    #[error("no path from {from} to {to}")]
    Unreachable { from: StationId, to: StationId },

    #[error("no station is reachable from {0}")]
    NoRoute(StationId),

    /// Unknown car or passenger id.
    #[error("lookup failed: {0}")]
    Lookup(String),

    /// Internal state broke an invariant.  The step that hit it was rolled
    /// back.
    #[error("consistency error: {0}")]
    Consistency(String),

    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("topology error: {0}")]
    Topology(TopologyError),
}

impl SimError {
    /// `true` when the simulation state can no longer be trusted to make
    /// progress.  Every other variant is a rejected request.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SimError::Consistency(_))
    }
}

impl From<TopologyError> for SimError {
    fn from(e: TopologyError) -> Self {
        match e {
            TopologyError::UnknownName(name) => SimError::InvalidStation(format!("`{name}`")),
            TopologyError::UnknownIndex(id)  => SimError::InvalidStation(id.to_string()),
            TopologyError::Unreachable { from, to } => SimError::Unreachable { from, to },
            TopologyError::NoRoute(from) => SimError::NoRoute(from),
            TopologyError::EmptyRoute => SimError::InvalidRoute("route is empty".into()),
            e @ TopologyError::InvalidRoute { .. } => SimError::InvalidRoute(e.to_string()),
            other => SimError::Topology(other),
        }
    }
}

impl From<EntityError> for SimError {
    fn from(e: EntityError) -> Self {
        SimError::Consistency(e.to_string())
    }
}

impl From<TpError> for SimError {
    fn from(e: TpError) -> Self {
        SimError::Config(e.to_string())
    }
}

pub type SimResult<T> = Result<T, SimError>;
