//! Use-Case: Navigations-Session (Marker → Anker → Route → Ankunft).

use crate::app::state::{AuthoringPhase, NavState};
use crate::core::{plot_route, ArrivalWatch, CancelToken, PositionSource};
use crate::error::{NavError, NavResult};
use crate::net::RouteService;
use glam::Mat4;
use std::sync::Arc;

/// Startet eine Navigations-Session zu einem Zielnamen.
///
/// Eine eventuell laufende Session (Navigation oder Authoring) wird
/// verworfen; der Graph wartet danach auf die erste Marker-Erkennung.
pub fn begin_navigation(state: &mut NavState, destination: String) -> NavResult<()> {
    state.reset_session();
    state.flags.is_navigating = true;
    state.flags.destination_name = Some(destination.clone());
    log::info!("Navigation gestartet: Ziel '{destination}'");
    state.set_status("Marker suchen, um die Route zu laden");
    Ok(())
}

/// Verarbeitet eine Marker-Erkennung der AR-Plattform.
///
/// Außerhalb einer Session ist die Erkennung ein No-op. Der erste
/// Marker einer Session gewinnt den Weltursprung; weitere Erkennungen
/// ändern ihn nicht mehr. In der Navigation löst der gesetzte Anker
/// (einmalig) das Laden und Plotten der Route sowie den Start der
/// Ankunftsüberwachung aus.
pub fn marker_detected(
    state: &mut NavState,
    service: &dyn RouteService,
    positions: &Arc<dyn PositionSource>,
    name: &str,
    pose: Mat4,
) -> NavResult<()> {
    if !state.flags.is_navigating && !state.flags.is_creating_map {
        log::debug!("Marker '{name}' außerhalb einer Session ignoriert");
        return Ok(());
    }

    if state.anchor.set(pose) {
        state.flags.is_anchor_found = true;
        state.graph.set_beacon_name(name);
        log::info!("Weltursprung gesetzt durch Marker '{name}'");
    } else {
        log::debug!("Weiterer Marker '{name}' ignoriert, Anker steht bereits");
    }

    if state.flags.is_creating_map {
        if state.phase == AuthoringPhase::AwaitingAnchor && state.anchor.is_set() {
            state.phase = AuthoringPhase::AwaitingStart;
            state.set_status("Anker gesetzt, Startpunkt wählen");
        }
        return Ok(());
    }

    if state.graph.route_loaded() {
        return Ok(());
    }
    load_and_plot_route(state, service, positions, name)
}

/// Lädt die Route zum aktiven Ziel und materialisiert sie ab dem Anker.
fn load_and_plot_route(
    state: &mut NavState,
    service: &dyn RouteService,
    positions: &Arc<dyn PositionSource>,
    marker_name: &str,
) -> NavResult<()> {
    let destination = state
        .flags
        .destination_name
        .clone()
        .ok_or(NavError::NotNavigating)?;

    let route = service.fetch_route(&destination, Some(marker_name))?;

    // Session kann während des Abrufs beendet worden sein
    if !state.flags.is_navigating {
        log::info!("Route '{destination}' verworfen, Session wurde beendet");
        return Ok(());
    }

    if route.beacon_name != marker_name {
        log::warn!(
            "Route '{destination}' erwartet Marker '{}', erkannt wurde '{marker_name}'",
            route.beacon_name
        );
    }
    if !route.is_well_formed() {
        return Err(NavError::MalformedRoute(format!(
            "Route '{destination}' hat keine gültige Start/Ziel-Struktur"
        )));
    }

    let anchor_pose = state.anchor.pose().ok_or(NavError::AnchorNotSet)?;
    let plotted = plot_route(
        anchor_pose,
        &route.waypoints,
        state.options.arrow_height_offset,
        state.options.floor_line_drop,
    );
    let target = plotted
        .last_position()
        .ok_or_else(|| NavError::MalformedRoute(format!("Route '{destination}' ist leer")))?;

    log::info!(
        "Route '{destination}' geplottet: {} Knoten, {} unterdrückt",
        plotted.nodes.len(),
        plotted.suppressed
    );

    state.graph.set_waypoints(route.waypoints);
    state.graph.set_placed(plotted.nodes);
    state.graph.set_route_loaded(true);
    state.arrows = plotted.arrows;

    state.arrival = Some(ArrivalWatch::spawn(
        positions.clone(),
        target,
        state.options.arrival_threshold,
        state.options.poll_interval(),
        CancelToken::new(),
    ));
    state.set_status(format!("Route zu '{destination}' aktiv"));
    Ok(())
}

/// Holt eine anstehende Ankunftsmeldung ab und liefert sie als Alert.
///
/// Nach der Ankunft wird die Session zurückgesetzt; ohne aktive
/// Navigation verfällt die Meldung.
pub fn pump_arrival(state: &mut NavState) -> NavResult<()> {
    let Some(event) = state.arrival.as_ref().and_then(|w| w.try_arrival()) else {
        return Ok(());
    };

    if state.flags.is_navigating {
        let destination = state.flags.destination_name.clone().unwrap_or_default();
        log::info!(
            "Ziel '{destination}' erreicht (Distanz {:.2} m)",
            event.distance
        );
        state.reset_session();
        state.set_alert(format!("Ziel '{destination}' erreicht"));
    }
    Ok(())
}

/// Beendet die Navigation und setzt die Session zurück.
pub fn end_navigation(state: &mut NavState) -> NavResult<()> {
    log::info!("Navigation beendet");
    state.reset_session();
    Ok(())
}
