//! `tp-core` — foundational types for the `tpnet` transport simulation.
//!
//! This crate is a dependency of every other `tp-*` crate.  It has no `tp-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `StationId`, `LineId`, `CarId`, `PassengerId`         |
//! | [`step`]        | `Step`, `SimClock`                                    |
//! | [`config`]      | `SimConfig`, `CarArrivalPolicy`                       |
//! | [`rng`]         | `SimRng` (seedable, injected into routers)            |
//! | [`error`]       | `TpError`, `TpResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod step;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CarArrivalPolicy, SimConfig};
pub use error::{TpError, TpResult};
pub use ids::{CarId, LineId, PassengerId, StationId};
pub use rng::SimRng;
pub use step::{SimClock, Step};
