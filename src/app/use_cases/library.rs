//! Use-Case: Routenbibliothek und Server-Abgleich.

use crate::app::state::NavState;
use crate::error::{NavError, NavResult};
use crate::net::RouteService;

/// Lädt die Namen der eigenen Server-Routen neu.
pub fn refresh_route_names(
    state: &mut NavState,
    service: &dyn RouteService,
    uid: &str,
) -> NavResult<()> {
    state.route_names = service.fetch_route_names(uid)?;
    log::info!("{} Server-Routen für uid={uid}", state.route_names.len());
    Ok(())
}

/// Lädt eine Route vom Server in die Bibliothek (Replace-by-Name).
pub fn download_route(
    state: &mut NavState,
    service: &dyn RouteService,
    destination: &str,
) -> NavResult<()> {
    let route = service.fetch_route(destination, None)?;
    state.library.upsert(route);
    persist_library(state);
    state.set_status(format!("Route '{destination}' heruntergeladen"));
    Ok(())
}

/// Lädt eine Bibliotheks-Route zum Server hoch.
///
/// Das `is_uploading`-Flag ist während des Aufrufs gesetzt; die
/// Statusmeldung des Servers landet in der Statuszeile.
pub fn upload_route(
    state: &mut NavState,
    service: &dyn RouteService,
    uid: &str,
    destination: &str,
) -> NavResult<()> {
    let route = state
        .library
        .find(destination)
        .cloned()
        .ok_or_else(|| NavError::RouteNotFound(destination.to_string()))?;

    state.flags.is_uploading = true;
    let result = service.upload_route(uid, &route);
    state.flags.is_uploading = false;

    let message = result?;
    state.set_status(message);
    Ok(())
}

/// Lädt das Zielverzeichnis neu.
pub fn refresh_directory(state: &mut NavState, service: &dyn RouteService) -> NavResult<()> {
    state.directory = service.fetch_destination_directory()?;
    log::info!("Zielverzeichnis: {} Einträge", state.directory.len());
    Ok(())
}

/// Löscht die Route an einer Listenposition aus der Bibliothek.
pub fn delete_route(state: &mut NavState, index: usize) -> NavResult<()> {
    let removed = state
        .library
        .remove_at(index)
        .ok_or_else(|| NavError::RouteNotFound(format!("Position {index}")))?;
    log::info!("Route '{}' gelöscht", removed.destination_name);
    persist_library(state);
    Ok(())
}

/// Schreibt die Bibliothek auf den konfigurierten Pfad.
///
/// Schreibfehler brechen den Ablauf nicht ab; die In-Memory-Bibliothek
/// bleibt die Wahrheit der Session.
pub(crate) fn persist_library(state: &NavState) {
    let Some(path) = &state.library_path else {
        return;
    };
    if let Err(e) = state.library.save_to_file(path) {
        log::warn!("Routenbibliothek nicht gespeichert: {e}");
    }
}
