//! Netzwerk-Boundary: Routen-Server als injizierter Dienst.
//!
//! Die Engine spricht nie direkt HTTP; sie hängt nur vom
//! `RouteService`-Trait ab. Der Host injiziert seine Implementierung,
//! Tests und die Demo-Binary verwenden den In-Memory-Dienst.

use crate::core::{Route, RoutePayload};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Fehler an der Netzwerk-Grenze.
#[derive(Debug, Error)]
pub enum NetError {
    /// Transportfehler oder Nicht-Erfolgs-Status vom Server
    #[error("Anfrage fehlgeschlagen: {0}")]
    RequestFailed(String),

    /// Antwort kam an, war aber kein gültiges JSON im erwarteten Schema
    #[error("Antwort nicht dekodierbar: {0}")]
    Decode(#[from] serde_json::Error),

    /// Server kennt die angefragte Route nicht
    #[error("unbekanntes Ziel: {0}")]
    UnknownDestination(String),
}

/// Eintrag des Zielverzeichnisses (Name plus Standortbeschreibung).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationInfo {
    pub name: String,
    pub details: String,
}

/// Dekodiert eine Server-Antwort in eine Route.
pub fn decode_route(body: &str) -> Result<Route, NetError> {
    let payload: RoutePayload = serde_json::from_str(body)?;
    Ok(Route::from_payload(payload))
}

/// Kodiert eine Route als Upload-Body.
pub fn encode_route(route: &Route) -> Result<String, NetError> {
    Ok(serde_json::to_string(&route.to_payload())?)
}

/// Dekodiert das Zielverzeichnis.
pub fn decode_directory(body: &str) -> Result<Vec<DestinationInfo>, NetError> {
    Ok(serde_json::from_str(body)?)
}

/// Routen-Server aus Sicht der Engine.
///
/// Implementierungen kapseln Transport und Timeout (Host-seitig
/// `REQUEST_TIMEOUT_SECS`); die Engine sieht nur fertige Ergebnisse.
pub trait RouteService: Send + Sync {
    /// Lädt die Route zu einem Zielnamen.
    ///
    /// `scanned_beacon` ist der Name des erkannten Markers, sofern die
    /// Anfrage aus einer Scan-Situation stammt (Navigations-Fetch);
    /// Bibliotheks-Downloads fragen ohne Marker an.
    fn fetch_route(
        &self,
        destination: &str,
        scanned_beacon: Option<&str>,
    ) -> Result<Route, NetError>;

    /// Listet die Namen der vom Nutzer `uid` hochgeladenen Routen.
    fn fetch_route_names(&self, uid: &str) -> Result<Vec<String>, NetError>;

    /// Lädt eine Route hoch; gibt die Statusmeldung des Servers zurück.
    fn upload_route(&self, uid: &str, route: &Route) -> Result<String, NetError>;

    /// Lädt das Zielverzeichnis (Name + Standortbeschreibung).
    fn fetch_destination_directory(&self) -> Result<Vec<DestinationInfo>, NetError>;
}

/// In-Memory-Routen-Server für Tests und die Demo-Binary.
///
/// Simuliert das Serververhalten inklusive Replace-by-Name beim Upload.
#[derive(Debug, Default)]
pub struct InMemoryRouteService {
    routes: std::sync::Mutex<HashMap<String, Route>>,
    owners: std::sync::Mutex<HashMap<String, Vec<String>>>,
    directory: std::sync::Mutex<Vec<DestinationInfo>>,
}

impl InMemoryRouteService {
    /// Erstellt einen leeren Dienst.
    pub fn new() -> Self {
        Self::default()
    }

    /// Legt eine Route serverseitig an (Testvorbereitung).
    pub fn seed_route(&self, route: Route) {
        self.routes
            .lock()
            .unwrap()
            .insert(route.destination_name.clone(), route);
    }

    /// Legt einen Verzeichniseintrag an (Testvorbereitung).
    pub fn seed_directory(&self, info: DestinationInfo) {
        self.directory.lock().unwrap().push(info);
    }
}

impl RouteService for InMemoryRouteService {
    fn fetch_route(
        &self,
        destination: &str,
        scanned_beacon: Option<&str>,
    ) -> Result<Route, NetError> {
        let route = self
            .routes
            .lock()
            .unwrap()
            .get(destination)
            .cloned()
            .ok_or_else(|| NetError::UnknownDestination(destination.to_string()))?;
        if let Some(beacon) = scanned_beacon {
            if beacon != route.beacon_name {
                log::debug!(
                    "Route '{destination}' erwartet Marker '{}', angefragt mit '{beacon}'",
                    route.beacon_name
                );
            }
        }
        Ok(route)
    }

    fn fetch_route_names(&self, uid: &str) -> Result<Vec<String>, NetError> {
        Ok(self
            .owners
            .lock()
            .unwrap()
            .get(uid)
            .cloned()
            .unwrap_or_default())
    }

    fn upload_route(&self, uid: &str, route: &Route) -> Result<String, NetError> {
        let name = route.destination_name.clone();
        self.routes.lock().unwrap().insert(name.clone(), route.clone());

        let mut owners = self.owners.lock().unwrap();
        let names = owners.entry(uid.to_string()).or_default();
        if !names.contains(&name) {
            names.push(name.clone());
        }
        log::info!("Route '{name}' hochgeladen (uid={uid})");
        Ok(format!("Route '{name}' gespeichert"))
    }

    fn fetch_destination_directory(&self) -> Result<Vec<DestinationInfo>, NetError> {
        Ok(self.directory.lock().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Waypoint, WaypointKind};
    use glam::Vec3;

    fn sample_route(name: &str) -> Route {
        Route {
            destination_name: name.to_string(),
            beacon_name: "book".to_string(),
            waypoints: vec![
                Waypoint::new(WaypointKind::Start, Vec3::ZERO, "s"),
                Waypoint::new(WaypointKind::Destination, Vec3::new(1.0, 0.0, 0.0), "d"),
            ],
        }
    }

    #[test]
    fn decode_route_reads_wire_schema() {
        let body = r#"{
            "destination": "lab",
            "beacon_name": "book",
            "node_count": 2,
            "nodes": {
                "index": [
                    {"type": "start", "x_offset": 0.0, "y_offset": 0.0, "z_offset": 0.0, "descript": "s"},
                    {"type": "destination", "x_offset": 1.0, "y_offset": 0.0, "z_offset": 0.0, "descript": "d"}
                ]
            }
        }"#;
        let route = decode_route(body).unwrap();
        assert_eq!(route.destination_name, "lab");
        assert_eq!(route.waypoints.len(), 2);
        assert_eq!(route.waypoints[1].kind, WaypointKind::Destination);
    }

    #[test]
    fn decode_rejects_invalid_json() {
        assert!(matches!(decode_route("kein json"), Err(NetError::Decode(_))));
    }

    #[test]
    fn upload_replaces_route_with_same_name() {
        let service = InMemoryRouteService::new();
        let mut first = sample_route("lab");
        service.upload_route("uid-1", &first).unwrap();

        first.beacon_name = "poster".to_string();
        service.upload_route("uid-1", &first).unwrap();

        let fetched = service.fetch_route("lab", None).unwrap();
        assert_eq!(fetched.beacon_name, "poster");
        // Name erscheint nur einmal in der Besitzerliste
        assert_eq!(service.fetch_route_names("uid-1").unwrap(), vec!["lab"]);
    }

    #[test]
    fn unknown_destination_is_an_error() {
        let service = InMemoryRouteService::new();
        assert!(matches!(
            service.fetch_route("nirgendwo", Some("book")),
            Err(NetError::UnknownDestination(_))
        ));
    }

    #[test]
    fn fetch_with_mismatched_beacon_still_returns_route() {
        let service = InMemoryRouteService::new();
        service.seed_route(sample_route("lab"));

        let route = service.fetch_route("lab", Some("poster")).unwrap();
        assert_eq!(route.beacon_name, "book");
    }

    #[test]
    fn directory_roundtrip() {
        let body = r#"[{"name": "lab", "details": "2. Stock, links"}]"#;
        let dir = decode_directory(body).unwrap();
        assert_eq!(dir[0].name, "lab");
        assert_eq!(dir[0].details, "2. Stock, links");
    }
}
