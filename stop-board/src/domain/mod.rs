//! Domain types for the stop page engine.
//!
//! This module contains the core domain model: validated identifiers,
//! departure board snapshots, and the pure wait-time projection. All types
//! enforce their invariants at construction time, so code that receives
//! these types can trust their validity.

mod estimate;
mod route;
mod snapshot;
mod stop;

pub use estimate::estimate;
pub(crate) use estimate::reproject;
pub use route::{InvalidRouteId, RouteId};
pub use snapshot::{Departure, DepartureSnapshot, ServiceDeparture};
pub use stop::{InvalidStopId, StopId};
