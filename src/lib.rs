//! AR-Indoor-Navigation Engine.
//! Kernlogik (Wegpunktgraph, Verankerung, Platzierung, Distanz,
//! Ankunft) als Library exportiert für Tests und Host-Integrationen.

pub mod app;
pub mod core;
pub mod error;
pub mod net;
pub mod shared;
pub mod store;

pub use app::{AuthoringControls, AuthoringPhase, NavCommand, NavController, NavState};
pub use core::{
    AnchorLatch, ArrivalEvent, ArrivalState, ArrivalWatch, CancelToken, PositionSource, Route,
    RouteDistance, Waypoint, WaypointGraph, WaypointKind,
};
pub use error::{NavError, NavResult};
pub use net::{DestinationInfo, InMemoryRouteService, NetError, RouteService};
pub use shared::NavOptions;
pub use store::RouteStore;
