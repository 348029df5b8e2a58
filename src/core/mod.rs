//! Core-Domänentypen: Wegpunkte, Routen, Verankerung, Platzierung,
//! Distanz und Ankunftsüberwachung.

pub mod arrival;
pub mod distance;
pub mod frame;
pub mod graph;
pub mod placement;
pub mod route;
pub mod waypoint;

pub use arrival::{ArrivalEvent, ArrivalState, ArrivalWatch, CancelToken, PositionSource};
pub use distance::{checkpoint_instruction, distance_to_destination, RouteDistance};
pub use frame::{chain_transform, compose_chain, translation_of, AnchorLatch};
pub use placement::{
    plot_route, should_place, ArrowAnnotation, FloorLine, PlacedNode, PlottedRoute,
};
pub use graph::WaypointGraph;
pub use route::{Route, RoutePayload};
pub use waypoint::{Waypoint, WaypointKind, LABEL_LENGTH};
