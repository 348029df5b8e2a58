//! Application Controller für zentrale Kommando-Verarbeitung.

use super::{NavCommand, NavState};
use crate::core::PositionSource;
use crate::error::NavError;
use crate::net::RouteService;
use std::sync::Arc;

/// Orchestriert Host-Kommandos und Use-Cases auf dem `NavState`.
///
/// Hält die injizierten Boundary-Dienste (Routen-Server, Positions-
/// Quelle); der Zustand selbst gehört dem Aufrufer.
pub struct NavController {
    service: Arc<dyn RouteService>,
    positions: Arc<dyn PositionSource>,
}

impl NavController {
    /// Erstellt einen Controller mit den injizierten Diensten.
    pub fn new(service: Arc<dyn RouteService>, positions: Arc<dyn PositionSource>) -> Self {
        Self { service, positions }
    }

    /// Führt ein Kommando auf dem `NavState` aus.
    ///
    /// Fachliche Fehler (ungültiger Schritt, Server nicht erreichbar)
    /// werden als Alert in den Zustand geschrieben und brechen den
    /// Kommandofluss nicht ab.
    pub fn handle_command(&mut self, state: &mut NavState, command: NavCommand) {
        if let Err(e) = self.dispatch(state, command) {
            log::warn!("Kommando fehlgeschlagen: {e}");
            state.set_alert(e.to_string());
        }
    }

    fn dispatch(&mut self, state: &mut NavState, command: NavCommand) -> Result<(), NavError> {
        use super::use_cases::{authoring, library, navigation};

        match command {
            // === Navigation ===
            NavCommand::BeginNavigation { destination } => {
                navigation::begin_navigation(state, destination)
            }
            NavCommand::MarkerDetected { name, pose } => navigation::marker_detected(
                state,
                self.service.as_ref(),
                &self.positions,
                &name,
                pose,
            ),
            NavCommand::PumpArrival => navigation::pump_arrival(state),
            NavCommand::EndNavigation => navigation::end_navigation(state),

            // === Authoring ===
            NavCommand::BeginAuthoring => authoring::begin_authoring(state),
            NavCommand::AddStartWaypoint { user_position } => {
                authoring::add_start(state, user_position)
            }
            NavCommand::AddIntermediateWaypoint { position } => {
                authoring::add_intermediate(state, position)
            }
            NavCommand::AddDestinationWaypoint { position } => {
                authoring::add_destination(state, position)
            }
            NavCommand::UndoLastWaypoint => authoring::undo_last(state),
            NavCommand::SaveAuthoredRoute { destination_name } => {
                authoring::save_route(state, destination_name)
            }
            NavCommand::CancelAuthoring => authoring::cancel_authoring(state),

            // === Bibliothek & Server ===
            NavCommand::RefreshRouteNames { uid } => {
                library::refresh_route_names(state, self.service.as_ref(), &uid)
            }
            NavCommand::DownloadRoute { destination } => {
                library::download_route(state, self.service.as_ref(), &destination)
            }
            NavCommand::UploadRoute { uid, destination } => {
                library::upload_route(state, self.service.as_ref(), &uid, &destination)
            }
            NavCommand::RefreshDestinationDirectory => {
                library::refresh_directory(state, self.service.as_ref())
            }
            NavCommand::DeleteLibraryRoute { index } => library::delete_route(state, index),
        }
    }
}
