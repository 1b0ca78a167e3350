//! Summary tables over the registry.
//!
//! Tables are typed rows; [`StatTable::records`] flattens them to strings
//! for CSV export or printing, labelling stations by index or by name.

use std::fmt;
use std::str::FromStr;

use tp_core::{CarId, PassengerId, StationId};
use tp_entity::{CarState, PassengerState, Registry};
use tp_topology::Topology;

use crate::SimError;

// ── Selectors ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum StatKind {
    Stations,
    Cars,
    Passengers,
}

impl StatKind {
    pub const ALL: [StatKind; 3] = [StatKind::Stations, StatKind::Cars, StatKind::Passengers];

    pub fn as_str(self) -> &'static str {
        match self {
            StatKind::Stations   => "stations",
            StatKind::Cars       => "cars",
            StatKind::Passengers => "passengers",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, SimError> {
        match s {
            "stations" | "net" => Ok(StatKind::Stations),
            "cars" | "car"     => Ok(StatKind::Cars),
            "passengers" | "pgr" => Ok(StatKind::Passengers),
            other => Err(SimError::Lookup(format!("unknown statistics kind `{other}`"))),
        }
    }
}

/// How station columns are rendered by [`StatTable::records`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Labels {
    #[default]
    Index,
    /// Station names.
    Names,
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StationRow {
    pub station: StationId,
    pub name:    String,
    pub degree:  usize,
    /// Passengers waiting here.
    pub waiting: usize,
    /// Pending or moving cars standing here.
    pub cars:    usize,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CarRow {
    pub car:         CarId,
    pub state:       CarState,
    pub station:     StationId,
    pub next:        Option<StationId>,
    pub destination: StationId,
    /// Line traversals left on the route.
    pub remaining:   usize,
    pub passengers:  usize,
    pub capacity:    usize,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PassengerRow {
    pub passenger:   PassengerId,
    pub state:       PassengerState,
    pub station:     StationId,
    pub origin:      StationId,
    pub destination: StationId,
    pub car:         Option<CarId>,
}

// ── StatTable ─────────────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum StatTable {
    Stations(Vec<StationRow>),
    Cars(Vec<CarRow>),
    Passengers(Vec<PassengerRow>),
}

impl StatTable {
    /// Build a table from a consistent view of `registry`.
    pub fn collect(kind: StatKind, topology: &Topology, registry: &Registry) -> Self {
        match kind {
            StatKind::Stations => StatTable::Stations(station_rows(topology, registry)),
            StatKind::Cars => StatTable::Cars(
                registry
                    .cars()
                    .map(|c| CarRow {
                        car:         c.id(),
                        state:       c.state(),
                        station:     c.station(),
                        next:        c.next_station(),
                        destination: c.destination(),
                        remaining:   c.remaining(),
                        passengers:  c.load(),
                        capacity:    c.capacity(),
                    })
                    .collect(),
            ),
            StatKind::Passengers => StatTable::Passengers(
                registry
                    .passengers()
                    .map(|p| PassengerRow {
                        passenger:   p.id(),
                        state:       p.state(),
                        station:     p.station(),
                        origin:      p.origin(),
                        destination: p.destination(),
                        car:         p.car(),
                    })
                    .collect(),
            ),
        }
    }

    pub fn kind(&self) -> StatKind {
        match self {
            StatTable::Stations(_)   => StatKind::Stations,
            StatTable::Cars(_)       => StatKind::Cars,
            StatTable::Passengers(_) => StatKind::Passengers,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            StatTable::Stations(rows)   => rows.len(),
            StatTable::Cars(rows)       => rows.len(),
            StatTable::Passengers(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            StatTable::Stations(_) => &["index", "name", "degree", "waiting", "cars"],
            StatTable::Cars(_) => &[
                "id", "state", "station", "next", "destination", "remaining", "passengers", "capacity",
            ],
            StatTable::Passengers(_) => &["id", "state", "station", "origin", "destination", "car"],
        }
    }

    /// Flatten to string records in header order.  Missing values (no next
    /// station, no car) render as an empty field.
    pub fn records(&self, topology: &Topology, labels: Labels) -> Vec<Vec<String>> {
        let station = |s: StationId| label(topology, labels, s);
        let opt_station = |s: Option<StationId>| s.map(|s| station(s)).unwrap_or_default();

        match self {
            StatTable::Stations(rows) => rows
                .iter()
                .map(|r| {
                    vec![
                        r.station.0.to_string(),
                        r.name.clone(),
                        r.degree.to_string(),
                        r.waiting.to_string(),
                        r.cars.to_string(),
                    ]
                })
                .collect(),
            StatTable::Cars(rows) => rows
                .iter()
                .map(|r| {
                    vec![
                        r.car.0.to_string(),
                        r.state.to_string(),
                        station(r.station),
                        opt_station(r.next),
                        station(r.destination),
                        r.remaining.to_string(),
                        r.passengers.to_string(),
                        r.capacity.to_string(),
                    ]
                })
                .collect(),
            StatTable::Passengers(rows) => rows
                .iter()
                .map(|r| {
                    vec![
                        r.passenger.0.to_string(),
                        r.state.to_string(),
                        station(r.station),
                        station(r.origin),
                        station(r.destination),
                        r.car.map(|c| c.0.to_string()).unwrap_or_default(),
                    ]
                })
                .collect(),
        }
    }
}

fn station_rows(topology: &Topology, registry: &Registry) -> Vec<StationRow> {
    let n = topology.station_count();
    let mut waiting = vec![0usize; n];
    let mut cars = vec![0usize; n];
    for p in registry.passengers() {
        if p.state() == PassengerState::Waiting {
            if let Some(slot) = waiting.get_mut(p.station().index()) {
                *slot += 1;
            }
        }
    }
    for c in registry.cars() {
        if c.state().is_active() {
            if let Some(slot) = cars.get_mut(c.station().index()) {
                *slot += 1;
            }
        }
    }

    topology
        .stations()
        .map(|s| StationRow {
            station: s,
            name:    label(topology, Labels::Names, s),
            degree:  topology.degree(s).unwrap_or(0),
            waiting: waiting[s.index()],
            cars:    cars[s.index()],
        })
        .collect()
}

fn label(topology: &Topology, labels: Labels, station: StationId) -> String {
    match labels {
        Labels::Index => station.0.to_string(),
        Labels::Names => topology
            .station_name(station)
            .map(str::to_owned)
            .unwrap_or_else(|_| station.0.to_string()),
    }
}
