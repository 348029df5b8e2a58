//! Platzierung von Wegpunkten als sichtbare Knoten: Monotonie-Filter,
//! Bodenlinien und Richtungspfeile.

use super::frame::{chain_transform, compose_chain, translation_of};
use super::{Waypoint, WaypointKind};
use glam::{Mat4, Quat, Vec3};

/// Vorwärtsachse der Pfeil-Geometrie (−Z, Blickrichtung der Szene).
pub const ARROW_FORWARD: Vec3 = Vec3::NEG_Z;

/// Ein materialisierter Wegpunkt innerhalb der laufenden Session.
///
/// Nicht persistiert; wird bei jedem Navigationsaufbau neu berechnet und
/// beim Session-Reset verworfen.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    /// Label des zugrundeliegenden Wegpunkts
    pub label: String,
    /// Rolle des zugrundeliegenden Wegpunkts
    pub kind: WaypointKind,
    /// Absolute Welt-Transformation (gekettet ab dem Anker)
    pub transform: Mat4,
    /// Index des Vorgängers in der Platzierungsliste (None = Anker)
    pub parent: Option<usize>,
    /// Bodenlinie vom Vorgänger zu diesem Knoten (None beim Start)
    pub incoming_line: Option<FloorLine>,
}

impl PlacedNode {
    /// Absolute Position des Knotens.
    pub fn position(&self) -> Vec3 {
        translation_of(self.transform)
    }
}

/// Bodenlinien-Segment zwischen zwei platzierten Knoten.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorLine {
    pub from: Vec3,
    pub to: Vec3,
}

impl FloorLine {
    /// Erstellt ein Segment zwischen zwei Positionen.
    pub fn between(from: Vec3, to: Vec3) -> Self {
        Self { from, to }
    }

    /// Mittelpunkt des Segments (Platzierungspunkt der Geometrie).
    pub fn midpoint(&self) -> Vec3 {
        (self.from + self.to) * 0.5
    }

    /// Länge des Segments.
    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }
}

/// Richtungspfeil über einem platzierten Knoten, ausgerichtet auf den
/// Nachfolger (Look-at-Semantik). Der letzte Knoten hat keinen Pfeil.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowAnnotation {
    /// Position des Pfeils (über dem Quellknoten)
    pub position: Vec3,
    /// Rotation, die `ARROW_FORWARD` auf den Nachfolger ausrichtet
    pub rotation: Quat,
}

impl ArrowAnnotation {
    /// Richtet einen Pfeil von `from` auf `to` aus.
    ///
    /// Degeneriert (`from == to`): Identitätsrotation.
    pub fn pointing(from: Vec3, to: Vec3) -> Self {
        let dir = to - from;
        let rotation = if dir.length_squared() > f32::EPSILON {
            Quat::from_rotation_arc(ARROW_FORWARD, dir.normalize())
        } else {
            Quat::IDENTITY
        };
        Self {
            position: from,
            rotation,
        }
    }
}

/// Monotonie-Filter für Checkpoint-Platzierung.
///
/// Ein Kandidat wird nur materialisiert, wenn er dem Ziel strikt näher
/// ist als der zuletzt platzierte Knoten (volle 3D-Distanz). Der Filter
/// unterdrückt verrauschte oder redundante Offsets aus Server- oder
/// Authoring-Daten: nur Vorwärtsfortschritt wird sichtbar.
pub fn should_place(candidate: Vec3, last_placed: Vec3, destination: Vec3) -> bool {
    candidate.distance(destination) < last_placed.distance(destination)
}

/// Ergebnis eines Navigationsaufbaus.
#[derive(Debug, Clone, Default)]
pub struct PlottedRoute {
    /// Materialisierte Knoten in Platzierungsreihenfolge
    pub nodes: Vec<PlacedNode>,
    /// Richtungspfeile zwischen benachbarten platzierten Knoten
    pub arrows: Vec<ArrowAnnotation>,
    /// Anzahl der unterdrückten (nicht platzierten) Wegpunkte
    pub suppressed: usize,
}

impl PlottedRoute {
    /// Position des letzten platzierten Knotens (Ziel der Ankunftsprüfung).
    pub fn last_position(&self) -> Option<Vec3> {
        self.nodes.last().map(|n| n.position())
    }
}

/// Plottet eine Wegpunktfolge ab der Anker-Pose.
///
/// Ablauf pro Wegpunkt:
/// 1. Kandidaten-Transformation relativ zum zuletzt platzierten Knoten
///    (`chain_transform`), beim ersten Wegpunkt relativ zum Anker.
/// 2. Monotonie-Test gegen die absolute Zielposition. Der Start wird
///    immer platziert — der Anker selbst dient als initialer Vergleich.
/// 3. Bei Platzierung: Bodenlinie zum Vorgänger (nicht beim Start),
///    um `floor_drop` unter die Knoten abgesenkt; der Knoten wird
///    neuer "last placed".
///
/// Pfeile werden nach der Platzierung zwischen benachbarten platzierten
/// Knoten erzeugt; der letzte Knoten bekommt keinen.
pub fn plot_route(
    anchor: Mat4,
    waypoints: &[Waypoint],
    arrow_height: f32,
    floor_drop: f32,
) -> PlottedRoute {
    let mut plotted = PlottedRoute::default();
    if waypoints.is_empty() {
        return plotted;
    }

    // Absolute Zielposition vorab über die naive Komposition
    let offsets: Vec<Vec3> = waypoints.iter().map(|wp| wp.offset).collect();
    let destination = translation_of(compose_chain(anchor, &offsets));

    let mut last_transform = anchor;
    let mut last_position = translation_of(anchor);
    let drop = Vec3::new(0.0, 0.0, floor_drop);

    for waypoint in waypoints {
        let candidate_transform = chain_transform(last_transform, waypoint.offset);
        let candidate_position = translation_of(candidate_transform);

        let is_start = plotted.nodes.is_empty();
        if !is_start && !should_place(candidate_position, last_position, destination) {
            plotted.suppressed += 1;
            continue;
        }

        let incoming_line = if is_start {
            None
        } else {
            Some(FloorLine::between(
                last_position - drop,
                candidate_position - drop,
            ))
        };
        let parent = plotted.nodes.len().checked_sub(1);

        plotted.nodes.push(PlacedNode {
            label: waypoint.label.clone(),
            kind: waypoint.kind,
            transform: candidate_transform,
            parent,
            incoming_line,
        });

        last_transform = candidate_transform;
        last_position = candidate_position;
    }

    // Pfeile: node[i] zeigt auf node[i+1], angehoben um arrow_height
    let lift = Vec3::new(0.0, 0.0, arrow_height);
    for pair in plotted.nodes.windows(2) {
        plotted
            .arrows
            .push(ArrowAnnotation::pointing(pair[0].position() + lift, pair[1].position()));
    }

    plotted
}
