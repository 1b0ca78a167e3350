//! `tp-topology` — station/line graph, generators, and routing.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`network`]   | `Topology` (CSR adjacency + name index), `TopologyBuilder` |
//! | [`path`]      | shortest path, random destination, route validation        |
//! | [`route`]     | `Route`: validated, non-empty station sequence            |
//! | [`router`]    | `Router` trait, `ShortestPathRouter`                       |
//! | [`generator`] | `TopologySpec`: explicit and pattern-generated networks   |
//! | [`error`]     | `TopologyError`, `TopologyResult<T>`                       |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | Station name index uses `FxHashMap` instead of `HashMap`.  |

pub mod error;
pub mod generator;
pub mod network;
pub mod path;
pub mod route;
pub mod router;


pub use error::{TopologyError, TopologyResult};
pub use generator::{LineSpec, TopologySpec};
pub use network::{StationRef, Topology, TopologyBuilder};
pub use route::Route;
pub use router::{Router, ShortestPathRouter};
