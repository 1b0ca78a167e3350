//! Station/line graph and builder.
//!
//! # Data layout
//!
//! Lines are undirected, so every line contributes two *half-edges*, one per
//! endpoint.  Half-edges are stored in **Compressed Sparse Row (CSR)** format.
//! Given a `StationId s`, its half-edges occupy the slice:
//!
//! ```text
//! half_to[ adj_start[s] .. adj_start[s+1] ]
//! ```
//!
//! Within a station's slice, half-edges are sorted by `(neighbor, line)`, so
//! iterating a station's adjacency visits neighbours in ascending index
//! order.  Path search relies on this for reproducible tie-breaking.
//!
//! # Names
//!
//! Every station has a unique name.  `names[s]` and `name_index[name]` form
//! a bijection that never changes after `build()`.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap;
use std::fmt;

use log::debug;

use tp_core::{LineId, StationId};

use crate::{TopologyError, TopologyResult};

#[cfg(feature = "fx-hash")]
type NameIndex = rustc_hash::FxHashMap<String, StationId>;
#[cfg(not(feature = "fx-hash"))]
type NameIndex = HashMap<String, StationId>;

// ── StationRef ────────────────────────────────────────────────────────────────

/// A station addressed either by index or by name.
///
/// All external entry points (spawning, route specs) accept `StationRef` so
/// callers can use whichever alias they hold.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StationRef {
    Index(StationId),
    Name(String),
}

impl From<StationId> for StationRef {
    fn from(id: StationId) -> Self {
        StationRef::Index(id)
    }
}

impl From<u32> for StationRef {
    fn from(i: u32) -> Self {
        StationRef::Index(StationId(i))
    }
}

impl From<&str> for StationRef {
    fn from(name: &str) -> Self {
        StationRef::Name(name.to_owned())
    }
}

impl From<String> for StationRef {
    fn from(name: String) -> Self {
        StationRef::Name(name)
    }
}

impl fmt::Display for StationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationRef::Index(id) => write!(f, "{id}"),
            StationRef::Name(n)   => write!(f, "`{n}`"),
        }
    }
}

// ── Topology ──────────────────────────────────────────────────────────────────

/// Immutable undirected transport graph.
///
/// Do not construct directly; use [`TopologyBuilder`] or
/// [`TopologySpec::build`](crate::TopologySpec::build).
#[derive(Debug)]
pub struct Topology {
    // ── Station data ──────────────────────────────────────────────────────
    names:      Vec<String>,
    name_index: NameIndex,

    // ── CSR half-edge adjacency ───────────────────────────────────────────
    /// Half-edges of station `s` are at `adj_start[s] .. adj_start[s+1]`.
    /// Length = `station_count + 1`.
    adj_start: Vec<u32>,
    /// Far endpoint of each half-edge.
    half_to:   Vec<StationId>,
    /// Line each half-edge belongs to.
    half_line: Vec<LineId>,

    // ── Line data (indexed by LineId) ─────────────────────────────────────
    line_ends:   Vec<(StationId, StationId)>,
    pub(crate) line_weight: Vec<u32>,
}

impl Topology {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn station_count(&self) -> usize {
        self.names.len()
    }

    pub fn line_count(&self) -> usize {
        self.line_ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All station ids in ascending order.
    pub fn stations(&self) -> impl Iterator<Item = StationId> + '_ {
        (0..self.names.len()).map(|i| StationId(i as u32))
    }

    #[inline]
    pub fn contains(&self, station: StationId) -> bool {
        station.index() < self.names.len()
    }

    // ── Name ↔ index lookup ───────────────────────────────────────────────

    /// Index of the station called `name`.
    pub fn station_index(&self, name: &str) -> TopologyResult<StationId> {
        self.name_index
            .get(name)
            .copied()
            .ok_or_else(|| TopologyError::UnknownName(name.to_owned()))
    }

    /// Name of `station`.
    pub fn station_name(&self, station: StationId) -> TopologyResult<&str> {
        self.names
            .get(station.index())
            .map(String::as_str)
            .ok_or(TopologyError::UnknownIndex(station))
    }

    /// Resolve a name-or-index reference to a known station.
    pub fn resolve(&self, station: &StationRef) -> TopologyResult<StationId> {
        match station {
            StationRef::Index(id) => {
                self.check(*id)?;
                Ok(*id)
            }
            StationRef::Name(name) => self.station_index(name),
        }
    }

    #[inline]
    pub(crate) fn check(&self, station: StationId) -> TopologyResult<()> {
        if self.contains(station) {
            Ok(())
        } else {
            Err(TopologyError::UnknownIndex(station))
        }
    }

    // ── Adjacency ─────────────────────────────────────────────────────────

    /// `(neighbor, line)` pairs incident to `station`, ascending by neighbor
    /// then line.  Contiguous index range; no allocation.
    #[inline]
    pub(crate) fn half_edges(&self, station: StationId) -> impl Iterator<Item = (StationId, LineId)> + '_ {
        let start = self.adj_start[station.index()] as usize;
        let end   = self.adj_start[station.index() + 1] as usize;
        (start..end).map(move |i| (self.half_to[i], self.half_line[i]))
    }

    /// Distinct neighbours of `station`, ascending.
    pub fn neighbors(&self, station: StationId) -> TopologyResult<Vec<StationId>> {
        self.check(station)?;
        let mut out: Vec<StationId> = self.half_edges(station).map(|(n, _)| n).collect();
        out.dedup(); // already sorted
        Ok(out)
    }

    /// Number of lines incident to `station` (parallel lines counted).
    pub fn degree(&self, station: StationId) -> TopologyResult<usize> {
        self.check(station)?;
        let start = self.adj_start[station.index()] as usize;
        let end   = self.adj_start[station.index() + 1] as usize;
        Ok(end - start)
    }

    /// All lines joining `a` and `b`, ascending by id.
    pub fn lines_between(&self, a: StationId, b: StationId) -> impl Iterator<Item = LineId> + '_ {
        let valid = self.contains(a) && self.contains(b);
        let (start, end) = if valid {
            (self.adj_start[a.index()] as usize, self.adj_start[a.index() + 1] as usize)
        } else {
            (0, 0)
        };
        (start..end)
            .filter(move |&i| self.half_to[i] == b)
            .map(move |i| self.half_line[i])
    }

    /// The line a route traverses between `a` and `b`: the lightest line
    /// joining them, lowest id among equals, or `None` if they are not
    /// adjacent.  Shortest paths are priced on this same line.
    pub fn line_between(&self, a: StationId, b: StationId) -> Option<LineId> {
        self.lines_between(a, b)
            .min_by_key(|line| (self.line_weight[line.index()], *line))
    }

    /// Endpoints of `line` in the order they were added.
    pub fn line_endpoints(&self, line: LineId) -> Option<(StationId, StationId)> {
        self.line_ends.get(line.index()).copied()
    }

    /// Routing weight of `line`.
    pub fn line_weight(&self, line: LineId) -> Option<u32> {
        self.line_weight.get(line.index()).copied()
    }
}

// ── TopologyBuilder ───────────────────────────────────────────────────────────

/// Construct a [`Topology`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use tp_topology::TopologyBuilder;
///
/// let mut b = TopologyBuilder::new();
/// let a = b.add_station("A").unwrap();
/// let c = b.add_station("C").unwrap();
/// b.add_line(a, c).unwrap();
/// let net = b.build();
/// assert_eq!(net.station_count(), 2);
/// assert_eq!(net.line_count(), 1);
/// ```
#[derive(Default)]
pub struct TopologyBuilder {
    names:      Vec<String>,
    name_index: NameIndex,
    lines:      Vec<RawLine>,
}

struct RawLine {
    a:      StationId,
    b:      StationId,
    weight: u32,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for the expected number of stations and lines.
    pub fn with_capacity(stations: usize, lines: usize) -> Self {
        let mut name_index = NameIndex::default();
        name_index.reserve(stations);
        Self {
            names: Vec::with_capacity(stations),
            name_index,
            lines: Vec::with_capacity(lines),
        }
    }

    /// Add a station and return its `StationId` (sequential from 0).
    pub fn add_station(&mut self, name: impl Into<String>) -> TopologyResult<StationId> {
        let name = name.into();
        if self.name_index.contains_key(&name) {
            return Err(TopologyError::DuplicateName(name));
        }
        let id = StationId(self.names.len() as u32);
        self.name_index.insert(name.clone(), id);
        self.names.push(name);
        Ok(id)
    }

    /// Look up a station added earlier by name.
    pub fn station(&self, name: &str) -> TopologyResult<StationId> {
        self.name_index
            .get(name)
            .copied()
            .ok_or_else(|| TopologyError::UnknownName(name.to_owned()))
    }

    /// Add an undirected line of weight 1.
    pub fn add_line(&mut self, a: StationId, b: StationId) -> TopologyResult<LineId> {
        self.add_weighted_line(a, b, 1)
    }

    /// Add an undirected line with an explicit routing weight (≥ 1).
    pub fn add_weighted_line(&mut self, a: StationId, b: StationId, weight: u32) -> TopologyResult<LineId> {
        for s in [a, b] {
            if s.index() >= self.names.len() {
                return Err(TopologyError::UnknownIndex(s));
            }
        }
        if a == b {
            return Err(TopologyError::SelfLoop(a));
        }
        if weight == 0 {
            return Err(TopologyError::InvalidSpec(format!("line {a}-{b} has zero weight")));
        }
        let id = LineId(self.lines.len() as u32);
        self.lines.push(RawLine { a, b, weight });
        Ok(id)
    }

    pub fn station_count(&self) -> usize { self.names.len() }
    pub fn line_count(&self) -> usize { self.lines.len() }

    /// Consume the builder and produce a [`Topology`].
    ///
    /// Time complexity: O(L log L) for the half-edge sort.
    pub fn build(self) -> Topology {
        let station_count = self.names.len();

        let mut halves: Vec<(StationId, StationId, LineId)> = Vec::with_capacity(self.lines.len() * 2);
        for (i, l) in self.lines.iter().enumerate() {
            let id = LineId(i as u32);
            halves.push((l.a, l.b, id));
            halves.push((l.b, l.a, id));
        }
        halves.sort_unstable();

        let mut adj_start = vec![0u32; station_count + 1];
        for (from, _, _) in &halves {
            adj_start[from.index() + 1] += 1;
        }
        for i in 1..=station_count {
            adj_start[i] += adj_start[i - 1];
        }
        debug_assert_eq!(adj_start[station_count] as usize, halves.len());

        let half_to   = halves.iter().map(|h| h.1).collect();
        let half_line = halves.iter().map(|h| h.2).collect();

        debug!(
            "topology built: {} stations, {} lines",
            station_count,
            self.lines.len()
        );

        Topology {
            names:       self.names,
            name_index:  self.name_index,
            adj_start,
            half_to,
            half_line,
            line_ends:   self.lines.iter().map(|l| (l.a, l.b)).collect(),
            line_weight: self.lines.iter().map(|l| l.weight).collect(),
        }
    }
}
