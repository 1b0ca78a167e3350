//! Path queries over a [`Topology`]: shortest path, reachability, random
//! destinations, and route validation.
//!
//! # Determinism
//!
//! Shortest paths use Dijkstra over line weights.  The heap is keyed on
//! `(cost, station)` and a node's predecessor is replaced on an equal-cost
//! relaxation when the new predecessor has a lower index, so among all
//! shortest paths the one through lowest-index predecessors is returned,
//! independent of insertion order.
//!
//! Every half-edge is relaxed, so a hop between stations joined by parallel
//! lines costs the lightest of them.  That is the line
//! [`Topology::line_between`] returns and the one a car actually drives.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use tp_core::{SimRng, StationId};

use crate::{Route, Topology, TopologyError, TopologyResult};

impl Topology {
    /// Shortest route from `from` to `to` by total line weight.
    ///
    /// `from == to` yields the single-station route.
    pub fn shortest_path(&self, from: StationId, to: StationId) -> TopologyResult<Route> {
        self.check(from)?;
        self.check(to)?;
        if from == to {
            return Ok(Route::from_checked(vec![from]));
        }

        let n = self.station_count();
        let mut dist = vec![u64::MAX; n];
        let mut prev = vec![StationId::INVALID; n];
        dist[from.index()] = 0;

        let mut heap: BinaryHeap<Reverse<(u64, StationId)>> = BinaryHeap::new();
        heap.push(Reverse((0, from)));

        while let Some(Reverse((cost, node))) = heap.pop() {
            if node == to {
                return Ok(reconstruct(&prev, from, to));
            }
            if cost > dist[node.index()] {
                continue;
            }
            for (neighbor, line) in self.half_edges(node) {
                let weight = self.line_weight[line.index()] as u64;
                let new_cost = cost.saturating_add(weight);
                let slot = neighbor.index();
                if new_cost < dist[slot] {
                    dist[slot] = new_cost;
                    prev[slot] = node;
                    heap.push(Reverse((new_cost, neighbor)));
                } else if new_cost == dist[slot] && node < prev[slot] {
                    prev[slot] = node;
                }
            }
        }

        Err(TopologyError::Unreachable { from, to })
    }

    /// Every station reachable from `from`, excluding `from`, ascending.
    pub fn reachable_from(&self, from: StationId) -> TopologyResult<Vec<StationId>> {
        self.check(from)?;
        let mut seen = vec![false; self.station_count()];
        seen[from.index()] = true;
        let mut queue = VecDeque::from([from]);
        let mut out = Vec::new();

        while let Some(node) = queue.pop_front() {
            for (neighbor, _) in self.half_edges(node) {
                if !seen[neighbor.index()] {
                    seen[neighbor.index()] = true;
                    out.push(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }
        out.sort_unstable();
        Ok(out)
    }

    /// A destination drawn uniformly from the stations reachable from `from`
    /// (never `from` itself).
    pub fn random_destination(&self, from: StationId, rng: &mut SimRng) -> TopologyResult<StationId> {
        let candidates = self.reachable_from(from)?;
        rng.choose(&candidates)
            .copied()
            .ok_or(TopologyError::NoRoute(from))
    }

    /// Check an explicit station sequence against this topology.
    pub fn validate_route(&self, stations: &[StationId]) -> TopologyResult<Route> {
        if stations.is_empty() {
            return Err(TopologyError::EmptyRoute);
        }
        for &s in stations {
            self.check(s)?;
        }
        for hop in stations.windows(2) {
            if self.line_between(hop[0], hop[1]).is_none() {
                return Err(TopologyError::InvalidRoute { from: hop[0], to: hop[1] });
            }
        }
        Ok(Route::from_checked(stations.to_vec()))
    }
}

fn reconstruct(prev: &[StationId], from: StationId, to: StationId) -> Route {
    let mut stations = vec![to];
    let mut cur = to;
    while cur != from {
        cur = prev[cur.index()];
        stations.push(cur);
    }
    stations.reverse();
    Route::from_checked(stations)
}
