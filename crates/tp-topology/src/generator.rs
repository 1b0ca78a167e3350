//! Declarative topology specifications.
//!
//! A [`TopologySpec`] is either an explicit list of station names and lines
//! or a named generator pattern with parameters.  Specs deserialize from
//! JSON, tagged by `kind`:
//!
//! ```json
//! { "kind": "explicit",
//!   "stations": ["A", "B", "C"],
//!   "lines": [ { "a": "A", "b": "B" }, { "a": "B", "b": "C", "weight": 3 } ] }
//!
//! { "kind": "grid", "rows": 3, "cols": 4 }
//! { "kind": "random", "size": 10, "max_lines": 15, "seed": 7 }
//! ```
//!
//! Generated stations are named `S0`, `S1`, … except grids, whose stations
//! are named `R{row}C{col}`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use tp_core::{SimRng, StationId};

use crate::{Topology, TopologyBuilder, TopologyError, TopologyResult};

fn default_weight() -> u32 {
    1
}

/// One undirected line in an explicit spec, endpoints given by name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSpec {
    pub a: String,
    pub b: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

impl LineSpec {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self { a: a.into(), b: b.into(), weight: 1 }
    }

    pub fn weighted(a: impl Into<String>, b: impl Into<String>, weight: u32) -> Self {
        Self { a: a.into(), b: b.into(), weight }
    }
}

/// How to construct a [`Topology`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopologySpec {
    /// Named stations and the lines between them.
    Explicit {
        stations: Vec<String>,
        #[serde(default)]
        lines: Vec<LineSpec>,
    },
    /// `S0 - S1 - … - S{n-1} - S0`.  Requires `size >= 3`.
    Ring { size: usize },
    /// `S0 - S1 - … - S{n-1}`.
    Line { size: usize },
    /// `rows × cols` lattice, 4-neighbourhood.
    Grid { rows: usize, cols: usize },
    /// `S0` joined to every other station.
    Star { size: usize },
    /// Every pair joined once.
    Complete { size: usize },
    /// `max_lines` lines between uniformly sampled distinct station pairs
    /// (default `2 * size`).  Duplicate pairs become parallel lines.
    Random {
        size: usize,
        #[serde(default)]
        max_lines: Option<usize>,
        #[serde(default)]
        seed: u64,
    },
}

impl TopologySpec {
    /// Parse a spec from a JSON string.
    pub fn from_json_str(json: &str) -> TopologyResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a spec from a JSON file.
    pub fn from_json_path(path: &Path) -> TopologyResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Build the topology described by this spec.
    pub fn build(&self) -> TopologyResult<Topology> {
        match self {
            TopologySpec::Explicit { stations, lines } => explicit(stations, lines),
            TopologySpec::Ring { size } => {
                if *size < 3 {
                    return Err(TopologyError::InvalidSpec(format!("ring needs at least 3 stations, got {size}")));
                }
                let (mut b, ids) = numbered(*size)?;
                for i in 0..*size {
                    b.add_line(ids[i], ids[(i + 1) % size])?;
                }
                Ok(b.build())
            }
            TopologySpec::Line { size } => {
                non_empty(*size, "line")?;
                let (mut b, ids) = numbered(*size)?;
                for pair in ids.windows(2) {
                    b.add_line(pair[0], pair[1])?;
                }
                Ok(b.build())
            }
            TopologySpec::Grid { rows, cols } => grid(*rows, *cols),
            TopologySpec::Star { size } => {
                non_empty(*size, "star")?;
                let (mut b, ids) = numbered(*size)?;
                for &leaf in &ids[1..] {
                    b.add_line(ids[0], leaf)?;
                }
                Ok(b.build())
            }
            TopologySpec::Complete { size } => {
                non_empty(*size, "complete graph")?;
                let (mut b, ids) = numbered(*size)?;
                for i in 0..ids.len() {
                    for j in i + 1..ids.len() {
                        b.add_line(ids[i], ids[j])?;
                    }
                }
                Ok(b.build())
            }
            TopologySpec::Random { size, max_lines, seed } => {
                if *size < 2 {
                    return Err(TopologyError::InvalidSpec(format!("random topology needs at least 2 stations, got {size}")));
                }
                let (mut b, ids) = numbered(*size)?;
                let mut rng = SimRng::new(*seed);
                for _ in 0..max_lines.unwrap_or(size * 2) {
                    let pair = rng.sample_indices(*size, 2);
                    b.add_line(ids[pair[0]], ids[pair[1]])?;
                }
                Ok(b.build())
            }
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn non_empty(size: usize, what: &str) -> TopologyResult<()> {
    if size == 0 {
        return Err(TopologyError::InvalidSpec(format!("{what} needs at least 1 station")));
    }
    Ok(())
}

fn numbered(size: usize) -> TopologyResult<(TopologyBuilder, Vec<StationId>)> {
    let mut b = TopologyBuilder::with_capacity(size, size * 2);
    let ids = (0..size)
        .map(|i| b.add_station(format!("S{i}")))
        .collect::<TopologyResult<Vec<_>>>()?;
    Ok((b, ids))
}

fn explicit(stations: &[String], lines: &[LineSpec]) -> TopologyResult<Topology> {
    let mut b = TopologyBuilder::with_capacity(stations.len(), lines.len());
    for name in stations {
        b.add_station(name.as_str())?;
    }
    for line in lines {
        let a = b.station(&line.a)?;
        let c = b.station(&line.b)?;
        b.add_weighted_line(a, c, line.weight)?;
    }
    Ok(b.build())
}

fn grid(rows: usize, cols: usize) -> TopologyResult<Topology> {
    if rows == 0 || cols == 0 {
        return Err(TopologyError::InvalidSpec(format!("grid must be at least 1x1, got {rows}x{cols}")));
    }
    let mut b = TopologyBuilder::with_capacity(rows * cols, rows * cols * 2);
    for r in 0..rows {
        for c in 0..cols {
            b.add_station(format!("R{r}C{c}"))?;
        }
    }
    let at = |r: usize, c: usize| StationId((r * cols + c) as u32);
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                b.add_line(at(r, c), at(r, c + 1))?;
            }
            if r + 1 < rows {
                b.add_line(at(r, c), at(r + 1, c))?;
            }
        }
    }
    Ok(b.build())
}
