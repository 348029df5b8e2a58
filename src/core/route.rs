//! Persistierte Routen und das Wire-Format des Routen-Servers.

use super::{Waypoint, WaypointKind};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Eine gespeicherte, benannte Route: geordnete Wegpunktfolge plus die
/// Identität des Beacons, an dem sie verankert wurde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Name des Ziels (vom User beim Speichern vergeben)
    pub destination_name: String,
    /// Name des Markers, an dem die Route beginnt
    pub beacon_name: String,
    /// Geordnete Wegpunktfolge (Traversierungsreihenfolge)
    pub waypoints: Vec<Waypoint>,
}

impl Route {
    /// Erstellt eine Route aus einer Wegpunktfolge.
    pub fn new(
        destination_name: impl Into<String>,
        beacon_name: impl Into<String>,
        waypoints: Vec<Waypoint>,
    ) -> Self {
        Self {
            destination_name: destination_name.into(),
            beacon_name: beacon_name.into(),
            waypoints,
        }
    }

    /// Anzahl der Wegpunkte.
    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    /// Prüft die Start/Destination-Invariante einer finalisierten Route:
    /// höchstens ein Start (erstes Element), höchstens eine Destination
    /// (letztes Element), dazwischen nur Intermediates.
    pub fn is_well_formed(&self) -> bool {
        for (i, wp) in self.waypoints.iter().enumerate() {
            let expected_last = self.waypoints.len().saturating_sub(1);
            match wp.kind {
                WaypointKind::Start if i != 0 => return false,
                WaypointKind::Destination if i != expected_last => return false,
                _ => {}
            }
        }
        true
    }

    /// Baut die Route aus einem Server-Payload.
    ///
    /// Erster und letzter Eintrag werden unabhängig vom gelieferten
    /// `type`-Feld als Start bzw. Destination getaggt (node_count−1-Regel);
    /// alles dazwischen wird Intermediate.
    pub fn from_payload(payload: RoutePayload) -> Self {
        let node_count = payload.node_count;
        let waypoints = payload
            .nodes
            .index
            .into_iter()
            .enumerate()
            .map(|(i, node)| {
                let kind = if i == 0 {
                    WaypointKind::Start
                } else if i + 1 == node_count {
                    WaypointKind::Destination
                } else {
                    WaypointKind::Intermediate
                };
                Waypoint::new(
                    kind,
                    Vec3::new(node.x_offset, node.y_offset, node.z_offset),
                    node.descript,
                )
            })
            .collect();

        Self {
            destination_name: payload.destination,
            beacon_name: payload.beacon_name,
            waypoints,
        }
    }

    /// Serialisiert die Route ins Wire-Format (Upload und lokaler Store).
    pub fn to_payload(&self) -> RoutePayload {
        RoutePayload {
            destination: self.destination_name.clone(),
            beacon_name: self.beacon_name.clone(),
            node_count: self.waypoints.len(),
            nodes: NodeListPayload {
                index: self
                    .waypoints
                    .iter()
                    .map(|wp| NodePayload {
                        kind: wp.kind,
                        x_offset: wp.offset.x,
                        y_offset: wp.offset.y,
                        z_offset: wp.offset.z,
                        descript: wp.label.clone(),
                    })
                    .collect(),
            },
        }
    }
}

// ── Wire-Format ─────────────────────────────────────────────────────

/// Routen-Payload wie vom Server geliefert bzw. hochgeladen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePayload {
    pub destination: String,
    pub beacon_name: String,
    pub node_count: usize,
    pub nodes: NodeListPayload,
}

/// Umschlag um die Knotenliste (`{"nodes": {"index": [...]}}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeListPayload {
    pub index: Vec<NodePayload>,
}

/// Einzelner Knoten im Wire-Format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodePayload {
    #[serde(rename = "type")]
    pub kind: WaypointKind,
    pub x_offset: f32,
    pub y_offset: f32,
    pub z_offset: f32,
    pub descript: String,
}
