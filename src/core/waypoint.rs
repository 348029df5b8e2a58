//! Wegpunkt-Domänentypen: Rolle, relativer Offset, opakes Label.

use glam::Vec3;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Länge der zufällig erzeugten opaken Labels.
pub const LABEL_LENGTH: usize = 10;

/// Rolle eines Wegpunkts innerhalb einer Route.
///
/// Eine finalisierte Route hat höchstens einen `Start` (erstes Element)
/// und höchstens eine `Destination` (letztes Element).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointKind {
    Start,
    Intermediate,
    Destination,
}

/// Ein logischer Routenpunkt: Rolle, relativer Offset (Meter) und Label.
///
/// Der Offset ist relativ zum jeweils vorhergehenden platzierten Knoten
/// (beim Start: relativ zum Anker), nicht absolut. Einmal erzeugt ist ein
/// Wegpunkt unveränderlich; die Reihenfolge in der Liste ist die
/// Traversierungsreihenfolge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Rolle innerhalb der Route
    pub kind: WaypointKind,
    /// Relativer Offset zum Vorgänger in Metern
    pub offset: Vec3,
    /// Opakes Label zur internen Korrelation (Undo, Distanz-Lookup).
    /// Nicht der Zielname — der wird erst beim Speichern der Route vergeben.
    pub label: String,
}

impl Waypoint {
    /// Erstellt einen Wegpunkt mit explizitem Label.
    pub fn new(kind: WaypointKind, offset: Vec3, label: impl Into<String>) -> Self {
        Self {
            kind,
            offset,
            label: label.into(),
        }
    }

    /// Erstellt einen Wegpunkt mit zufälligem opakem Label.
    pub fn with_random_label(kind: WaypointKind, offset: Vec3) -> Self {
        Self::new(kind, offset, random_label())
    }
}

/// Erzeugt ein zufälliges alphanumerisches Label fester Länge.
pub fn random_label() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(LABEL_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_labels_have_fixed_length() {
        let label = random_label();
        assert_eq!(label.len(), LABEL_LENGTH);
        assert!(label.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn random_labels_differ() {
        // Kollision bei 62^10 Möglichkeiten praktisch ausgeschlossen
        assert_ne!(random_label(), random_label());
    }

    #[test]
    fn kind_serializes_to_wire_strings() {
        assert_eq!(
            serde_json::to_string(&WaypointKind::Start).unwrap(),
            "\"start\""
        );
        assert_eq!(
            serde_json::to_string(&WaypointKind::Intermediate).unwrap(),
            "\"intermediate\""
        );
        assert_eq!(
            serde_json::to_string(&WaypointKind::Destination).unwrap(),
            "\"destination\""
        );
    }
}
