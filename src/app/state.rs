//! Zentraler Session-Zustand der Navigations-Engine.

use crate::core::{AnchorLatch, ArrivalWatch, ArrowAnnotation, WaypointGraph};
use crate::net::DestinationInfo;
use crate::shared::NavOptions;
use crate::store::RouteStore;
use std::path::PathBuf;

/// Sitzungs-Flags, die das Host-UI spiegelt.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionFlags {
    /// Aktive Navigations-Session
    pub is_navigating: bool,
    /// Aktive Authoring-Session
    pub is_creating_map: bool,
    /// Weltursprung wurde in dieser Session gesetzt
    pub is_anchor_found: bool,
    /// Upload läuft gerade
    pub is_uploading: bool,
    /// Zielname der aktiven Navigation
    pub destination_name: Option<String>,
}

/// Phasen der Routenerstellung.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AuthoringPhase {
    /// Keine Authoring-Session aktiv
    #[default]
    NotStarted,
    /// Session gestartet, Marker noch nicht erkannt
    AwaitingAnchor,
    /// Anker gesetzt, Start-Wegpunkt fehlt noch
    AwaitingStart,
    /// Start gesetzt, Zwischenpunkte können angehängt werden
    BuildingIntermediate,
    /// Ziel gesetzt, Route kann gespeichert werden
    AwaitingSave,
}

/// Freigeschaltete Authoring-Aktionen, abgeleitet aus der Phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AuthoringControls {
    pub can_add_start: bool,
    pub can_add_intermediate: bool,
    pub can_add_destination: bool,
    pub can_undo: bool,
    pub can_save: bool,
}

/// Gesamter veränderlicher Zustand einer Geräte-Session.
///
/// Session-gebundene Teile (Flags, Anker, Graph, Phase, Pfeile,
/// Ankunftsüberwachung) werden von `reset_session` verworfen; die
/// Bibliothek, das Zielverzeichnis und die Optionen überleben Sessions.
pub struct NavState {
    pub flags: SessionFlags,
    pub anchor: AnchorLatch,
    pub graph: WaypointGraph,
    pub phase: AuthoringPhase,
    /// Richtungspfeile des letzten Navigationsaufbaus
    pub arrows: Vec<ArrowAnnotation>,
    pub options: NavOptions,
    pub library: RouteStore,
    /// Persistenzpfad der Bibliothek (None = nur im Speicher)
    pub library_path: Option<PathBuf>,
    /// Zielverzeichnis vom Server (Name + Standortbeschreibung)
    pub directory: Vec<DestinationInfo>,
    /// Namen der eigenen Server-Routen (letzter Abruf)
    pub route_names: Vec<String>,
    status: Option<String>,
    alert: Option<String>,
    pub arrival: Option<ArrivalWatch>,
}

impl NavState {
    /// Erstellt den Ruhezustand mit den gegebenen Optionen.
    pub fn new(options: NavOptions) -> Self {
        Self {
            flags: SessionFlags::default(),
            anchor: AnchorLatch::new(),
            graph: WaypointGraph::new(),
            phase: AuthoringPhase::NotStarted,
            arrows: Vec::new(),
            options,
            library: RouteStore::new(),
            library_path: None,
            directory: Vec::new(),
            route_names: Vec::new(),
            status: None,
            alert: None,
            arrival: None,
        }
    }

    /// Verwirft den session-gebundenen Zustand; Bibliothek,
    /// Verzeichnis und Optionen bleiben erhalten.
    pub fn reset_session(&mut self) {
        if let Some(watch) = self.arrival.take() {
            watch.cancel();
        }
        self.flags = SessionFlags::default();
        self.anchor = AnchorLatch::new();
        self.graph.reset();
        self.phase = AuthoringPhase::NotStarted;
        self.arrows.clear();
    }

    /// Setzt die transiente Statuszeile.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Holt die Statuszeile ab (einmalig).
    pub fn take_status(&mut self) -> Option<String> {
        self.status.take()
    }

    /// Hinterlegt einen Alert für das Host-UI.
    pub fn set_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    /// Holt den Alert ab (einmalig).
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    /// Leitet die freigeschalteten Authoring-Aktionen aus der Phase ab.
    pub fn authoring_controls(&self) -> AuthoringControls {
        match self.phase {
            AuthoringPhase::NotStarted | AuthoringPhase::AwaitingAnchor => {
                AuthoringControls::default()
            }
            AuthoringPhase::AwaitingStart => AuthoringControls {
                can_add_start: true,
                ..AuthoringControls::default()
            },
            AuthoringPhase::BuildingIntermediate => AuthoringControls {
                can_add_intermediate: true,
                can_add_destination: true,
                can_undo: !self.graph.is_empty(),
                ..AuthoringControls::default()
            },
            AuthoringPhase::AwaitingSave => AuthoringControls {
                can_undo: true,
                can_save: true,
                ..AuthoringControls::default()
            },
        }
    }
}

impl Default for NavState {
    fn default() -> Self {
        Self::new(NavOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    #[test]
    fn reset_session_keeps_library_and_options() {
        let mut state = NavState::default();
        state.flags.is_navigating = true;
        state.anchor.set(Mat4::IDENTITY);
        state.route_names.push("lab".to_string());

        state.reset_session();
        assert_eq!(state.flags, SessionFlags::default());
        assert!(!state.anchor.is_set());
        // Nicht session-gebunden
        assert_eq!(state.route_names, vec!["lab"]);
    }

    #[test]
    fn controls_follow_phase() {
        let mut state = NavState::default();
        assert_eq!(state.authoring_controls(), AuthoringControls::default());

        state.phase = AuthoringPhase::AwaitingStart;
        assert!(state.authoring_controls().can_add_start);
        assert!(!state.authoring_controls().can_save);

        state.phase = AuthoringPhase::AwaitingSave;
        let controls = state.authoring_controls();
        assert!(controls.can_save);
        assert!(controls.can_undo);
        assert!(!controls.can_add_intermediate);
    }

    #[test]
    fn status_and_alert_are_taken_once() {
        let mut state = NavState::default();
        state.set_alert("Ziel erreicht");
        assert_eq!(state.take_alert().as_deref(), Some("Ziel erreicht"));
        assert!(state.take_alert().is_none());
    }
}
