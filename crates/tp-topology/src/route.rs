//! Validated station sequences.

use std::fmt;

use tp_core::StationId;

/// An ordered, non-empty sequence of stations where every consecutive pair
/// is joined by at least one line.
///
/// Routes are only produced by [`Topology::validate_route`],
/// [`Topology::shortest_path`] and the [`Router`](crate::Router), so holding
/// a `Route` means the adjacency check has already passed against the
/// topology that produced it.
///
/// [`Topology::validate_route`]: crate::Topology::validate_route
/// [`Topology::shortest_path`]: crate::Topology::shortest_path
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    stations: Vec<StationId>,
}

impl Route {
    /// Wrap a sequence that the caller has already checked.
    pub(crate) fn from_checked(stations: Vec<StationId>) -> Self {
        debug_assert!(!stations.is_empty());
        Self { stations }
    }

    /// First station.
    #[inline]
    pub fn origin(&self) -> StationId {
        self.stations[0]
    }

    /// Last station.
    #[inline]
    pub fn destination(&self) -> StationId {
        self.stations[self.stations.len() - 1]
    }

    /// Number of stations (always ≥ 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Always `false`; present for API symmetry with collections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of line traversals (`len() - 1`).
    #[inline]
    pub fn hop_count(&self) -> usize {
        self.stations.len() - 1
    }

    /// `true` when origin and destination coincide.
    pub fn is_trivial(&self) -> bool {
        self.stations.len() == 1
    }

    #[inline]
    pub fn get(&self, position: usize) -> Option<StationId> {
        self.stations.get(position).copied()
    }

    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    /// Stations strictly after `position`.
    pub fn ahead_of(&self, position: usize) -> &[StationId] {
        self.stations.get(position + 1..).unwrap_or(&[])
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, s) in self.stations.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", s.0)?;
        }
        f.write_str("]")
    }
}
