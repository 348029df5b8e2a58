//! Die zentrale Wegpunktgraph-Struktur: geordnete Route plus der in der
//! Session materialisierte Zustand (platzierte Knoten, Bodenlinien).

use super::frame::translation_of;
use super::placement::{FloorLine, PlacedNode};
use super::{Waypoint, WaypointKind};
use glam::{Mat4, Vec3};

/// Geordneter Wegpunktgraph der aktiven Session.
///
/// Hält die autoritative Routenfolge (Einfügereihenfolge =
/// Traversierungsreihenfolge) sowie den daraus abgeleiteten
/// Laufzeitzustand. Mutation nur über `push_*`/`pop_last`; beide halten
/// den "last placed"-Zeiger konsistent. Nicht für nebenläufige Mutation
/// ausgelegt — Zugriff ist auf den Interaktiv-Thread beschränkt.
#[derive(Debug, Default)]
pub struct WaypointGraph {
    waypoints: Vec<Waypoint>,
    placed: Vec<PlacedNode>,
    /// Name des Markers, an dem die Session verankert wurde
    beacon_name: Option<String>,
    /// Ob bereits ein Start-Wegpunkt gesetzt wurde (Authoring)
    start_is_set: bool,
    /// Ob bereits ein Ziel-Wegpunkt gesetzt wurde (Authoring)
    destination_is_set: bool,
    /// Ob die Route bereits vom Server geladen wurde (Navigation)
    route_loaded: bool,
}

impl WaypointGraph {
    /// Erstellt einen leeren Graphen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Setzt den Graphen auf den Ruhezustand zurück.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // ── Wegpunkte ───────────────────────────────────────────────────

    /// Hängt einen Wegpunkt an die Route an.
    pub fn push_waypoint(&mut self, waypoint: Waypoint) {
        match waypoint.kind {
            WaypointKind::Start => self.start_is_set = true,
            WaypointKind::Destination => self.destination_is_set = true,
            WaypointKind::Intermediate => {}
        }
        self.waypoints.push(waypoint);
    }

    /// Ersetzt die komplette Wegpunktfolge (Server-Route).
    pub fn set_waypoints(&mut self, waypoints: Vec<Waypoint>) {
        self.start_is_set = waypoints.iter().any(|w| w.kind == WaypointKind::Start);
        self.destination_is_set = waypoints
            .iter()
            .any(|w| w.kind == WaypointKind::Destination);
        self.waypoints = waypoints;
    }

    /// Geordnete Wegpunktfolge (read-only).
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Letzter Wegpunkt der Route.
    pub fn last_waypoint(&self) -> Option<&Waypoint> {
        self.waypoints.last()
    }

    /// Anzahl der Wegpunkte.
    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    /// Prüft ob der Graph leer ist.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    // ── Platzierte Knoten ───────────────────────────────────────────

    /// Hängt einen materialisierten Knoten an.
    pub fn push_placed(&mut self, node: PlacedNode) {
        self.placed.push(node);
    }

    /// Ersetzt die materialisierten Knoten (Navigationsaufbau).
    pub fn set_placed(&mut self, nodes: Vec<PlacedNode>) {
        self.placed = nodes;
    }

    /// Materialisierte Knoten in Platzierungsreihenfolge.
    pub fn placed_nodes(&self) -> &[PlacedNode] {
        &self.placed
    }

    /// Anzahl der materialisierten Knoten.
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    /// Transformation des zuletzt platzierten Knotens, oder `fallback`
    /// (die Anker-Pose) wenn noch nichts platziert wurde.
    pub fn last_placed_transform(&self, fallback: Mat4) -> Mat4 {
        self.placed.last().map_or(fallback, |n| n.transform)
    }

    /// Position des zuletzt platzierten Knotens, oder die Anker-Position.
    pub fn last_placed_position(&self, anchor: Mat4) -> Vec3 {
        translation_of(self.last_placed_transform(anchor))
    }

    /// Bodenlinien aller platzierten Knoten (für Host-Rendering).
    pub fn floor_lines(&self) -> impl Iterator<Item = &FloorLine> {
        self.placed.iter().filter_map(|n| n.incoming_line.as_ref())
    }

    // ── Undo ────────────────────────────────────────────────────────

    /// Entfernt den zuletzt angehängten Wegpunkt samt materialisiertem
    /// Knoten und Bodenlinie.
    ///
    /// Exakte Umkehrung des letzten `push`: der "last placed"-Zeiger
    /// zeigt danach auf das neue Listenende (bzw. wieder auf den Anker,
    /// wenn die Liste leer wurde). Auf leerem Graphen: No-op, `None`.
    pub fn pop_last(&mut self) -> Option<Waypoint> {
        let waypoint = self.waypoints.pop()?;
        self.placed.pop();

        match waypoint.kind {
            WaypointKind::Start => self.start_is_set = false,
            WaypointKind::Destination => self.destination_is_set = false,
            WaypointKind::Intermediate => {}
        }
        if self.waypoints.is_empty() {
            self.start_is_set = false;
        }
        Some(waypoint)
    }

    // ── Session-Metadaten ───────────────────────────────────────────

    /// Verknüpft den Graphen mit der Marker-Identität der Session.
    pub fn set_beacon_name(&mut self, name: impl Into<String>) {
        self.beacon_name = Some(name.into());
    }

    /// Name des Session-Markers, falls bereits erkannt.
    pub fn beacon_name(&self) -> Option<&str> {
        self.beacon_name.as_deref()
    }

    /// Ob der Start-Wegpunkt gesetzt ist.
    pub fn start_is_set(&self) -> bool {
        self.start_is_set
    }

    /// Ob der Ziel-Wegpunkt gesetzt ist.
    pub fn destination_is_set(&self) -> bool {
        self.destination_is_set
    }

    /// Markiert die Route als vom Server geladen.
    pub fn set_route_loaded(&mut self, loaded: bool) {
        self.route_loaded = loaded;
    }

    /// Ob die Route bereits geladen wurde (verhindert Doppel-Fetch).
    pub fn route_loaded(&self) -> bool {
        self.route_loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::placement::PlacedNode;

    fn wp(kind: WaypointKind, x: f32, label: &str) -> Waypoint {
        Waypoint::new(kind, Vec3::new(x, 0.0, 0.0), label)
    }

    fn placed(label: &str, x: f32) -> PlacedNode {
        PlacedNode {
            label: label.to_string(),
            kind: WaypointKind::Intermediate,
            transform: Mat4::from_translation(Vec3::new(x, 0.0, 0.0)),
            parent: None,
            incoming_line: None,
        }
    }

    #[test]
    fn push_tracks_start_and_destination_flags() {
        let mut graph = WaypointGraph::new();
        assert!(!graph.start_is_set());

        graph.push_waypoint(wp(WaypointKind::Start, 0.0, "s"));
        assert!(graph.start_is_set());
        assert!(!graph.destination_is_set());

        graph.push_waypoint(wp(WaypointKind::Destination, 1.0, "d"));
        assert!(graph.destination_is_set());
    }

    #[test]
    fn pop_last_is_inverse_of_push() {
        let mut graph = WaypointGraph::new();
        graph.push_waypoint(wp(WaypointKind::Start, 0.0, "s"));

        let before = graph.waypoints().to_vec();
        graph.push_waypoint(wp(WaypointKind::Intermediate, 1.0, "i"));
        graph.push_placed(placed("i", 1.0));

        let popped = graph.pop_last().expect("Wegpunkt erwartet");
        assert_eq!(popped.label, "i");
        assert_eq!(graph.waypoints(), before.as_slice());
        assert_eq!(graph.placed_count(), 0);
    }

    #[test]
    fn pop_on_empty_graph_is_noop() {
        let mut graph = WaypointGraph::new();
        assert!(graph.pop_last().is_none());
        assert!(graph.is_empty());
    }

    #[test]
    fn pop_destination_clears_destination_flag() {
        let mut graph = WaypointGraph::new();
        graph.push_waypoint(wp(WaypointKind::Start, 0.0, "s"));
        graph.push_waypoint(wp(WaypointKind::Destination, 1.0, "d"));

        graph.pop_last();
        assert!(!graph.destination_is_set());
        assert!(graph.start_is_set());
    }

    #[test]
    fn pop_to_empty_clears_start_flag() {
        let mut graph = WaypointGraph::new();
        graph.push_waypoint(wp(WaypointKind::Start, 0.0, "s"));
        graph.pop_last();
        assert!(!graph.start_is_set());
    }

    #[test]
    fn last_placed_falls_back_to_anchor() {
        let mut graph = WaypointGraph::new();
        let anchor = Mat4::from_translation(Vec3::new(7.0, 0.0, 0.0));
        assert_eq!(graph.last_placed_transform(anchor), anchor);

        graph.push_placed(placed("a", 3.0));
        assert_eq!(
            graph.last_placed_position(anchor),
            Vec3::new(3.0, 0.0, 0.0)
        );

        // Undo: Zeiger fällt auf den Anker zurück
        graph.push_waypoint(wp(WaypointKind::Start, 3.0, "a"));
        graph.pop_last();
        assert_eq!(graph.last_placed_transform(anchor), anchor);
    }

    #[test]
    fn reset_returns_to_resting_state() {
        let mut graph = WaypointGraph::new();
        graph.push_waypoint(wp(WaypointKind::Start, 0.0, "s"));
        graph.push_placed(placed("s", 0.0));
        graph.set_beacon_name("book");
        graph.set_route_loaded(true);

        graph.reset();
        assert!(graph.is_empty());
        assert_eq!(graph.placed_count(), 0);
        assert!(graph.beacon_name().is_none());
        assert!(!graph.route_loaded());
        assert!(!graph.start_is_set());
    }
}
