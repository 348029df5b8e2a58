//! Use-Case: Routenerstellung (Anker → Start → Zwischenpunkte → Ziel →
//! Speichern), mit Undo über den Graphen.

use crate::app::state::{AuthoringPhase, NavState};
use crate::core::{chain_transform, FloorLine, PlacedNode, Route, Waypoint, WaypointKind};
use crate::error::{NavError, NavResult};
use glam::Vec3;

/// Startet eine Authoring-Session.
///
/// Eine laufende Session wird verworfen; der nächste erkannte Marker
/// setzt den Anker und schaltet die Startpunkt-Wahl frei.
pub fn begin_authoring(state: &mut NavState) -> NavResult<()> {
    state.reset_session();
    state.flags.is_creating_map = true;
    state.phase = AuthoringPhase::AwaitingAnchor;
    log::info!("Routenerstellung gestartet");
    state.set_status("Marker suchen, um den Weltursprung zu setzen");
    Ok(())
}

/// Setzt den Start-Wegpunkt an der Nutzerposition.
///
/// Offset = Nutzerposition − Ankerposition (Weltachsen); die
/// Materialisierung kettet ihn an die Anker-Pose.
pub fn add_start(state: &mut NavState, user_position: Vec3) -> NavResult<()> {
    if state.phase != AuthoringPhase::AwaitingStart {
        return Err(NavError::InvalidAuthoringStep(
            "Startpunkt nur direkt nach der Marker-Erkennung",
        ));
    }
    let anchor_pose = state.anchor.pose().ok_or(NavError::AnchorNotSet)?;
    let anchor_position = anchor_pose.w_axis.truncate();

    let offset = user_position - anchor_position;
    let waypoint = Waypoint::with_random_label(WaypointKind::Start, offset);
    let transform = chain_transform(anchor_pose, offset);

    state.graph.push_placed(PlacedNode {
        label: waypoint.label.clone(),
        kind: waypoint.kind,
        transform,
        parent: None,
        incoming_line: None,
    });
    state.graph.push_waypoint(waypoint);
    state.phase = AuthoringPhase::BuildingIntermediate;
    log::info!("Startpunkt gesetzt (Offset {offset})");
    Ok(())
}

/// Hängt einen Zwischenpunkt an einer Weltposition an.
pub fn add_intermediate(state: &mut NavState, position: Vec3) -> NavResult<()> {
    if state.phase != AuthoringPhase::BuildingIntermediate {
        return Err(NavError::InvalidAuthoringStep(
            "Zwischenpunkt erst nach dem Startpunkt",
        ));
    }
    append_waypoint(state, WaypointKind::Intermediate, position)?;
    Ok(())
}

/// Setzt den Ziel-Wegpunkt und schaltet das Speichern frei.
pub fn add_destination(state: &mut NavState, position: Vec3) -> NavResult<()> {
    if state.phase != AuthoringPhase::BuildingIntermediate {
        return Err(NavError::InvalidAuthoringStep(
            "Zielpunkt erst nach dem Startpunkt",
        ));
    }
    append_waypoint(state, WaypointKind::Destination, position)?;
    state.phase = AuthoringPhase::AwaitingSave;
    log::info!("Zielpunkt gesetzt, Route kann gespeichert werden");
    Ok(())
}

/// Hängt einen Wegpunkt relativ zum zuletzt platzierten Knoten an.
fn append_waypoint(state: &mut NavState, kind: WaypointKind, position: Vec3) -> NavResult<()> {
    let anchor_pose = state.anchor.pose().ok_or(NavError::AnchorNotSet)?;
    let last_transform = state.graph.last_placed_transform(anchor_pose);
    let last_position = state.graph.last_placed_position(anchor_pose);

    let offset = position - last_position;
    let waypoint = Waypoint::with_random_label(kind, offset);
    let transform = chain_transform(last_transform, offset);
    let new_position = transform.w_axis.truncate();

    // Bodenlinie um floor_line_drop unter die Knoten abgesenkt
    let drop = Vec3::new(0.0, 0.0, state.options.floor_line_drop);
    state.graph.push_placed(PlacedNode {
        label: waypoint.label.clone(),
        kind,
        transform,
        parent: state.graph.placed_count().checked_sub(1),
        incoming_line: Some(FloorLine::between(last_position - drop, new_position - drop)),
    });
    state.graph.push_waypoint(waypoint);
    Ok(())
}

/// Entfernt den zuletzt gesetzten Wegpunkt und repariert die Phase.
///
/// Ziel entfernt → wieder `BuildingIntermediate`; letzter Wegpunkt
/// entfernt → wieder `AwaitingStart`.
pub fn undo_last(state: &mut NavState) -> NavResult<()> {
    if !state.flags.is_creating_map {
        return Err(NavError::NotAuthoring);
    }
    let popped = state
        .graph
        .pop_last()
        .ok_or(NavError::InvalidAuthoringStep("nichts rückgängig zu machen"))?;
    log::info!("Wegpunkt '{}' entfernt ({:?})", popped.label, popped.kind);

    state.phase = if state.graph.is_empty() {
        AuthoringPhase::AwaitingStart
    } else {
        AuthoringPhase::BuildingIntermediate
    };
    Ok(())
}

/// Übernimmt die fertige Route unter einem Zielnamen in die Bibliothek.
///
/// Gleichnamige Einträge bleiben erhalten — ersetzt wird nur beim
/// Download. Danach ist die Session zurückgesetzt.
pub fn save_route(state: &mut NavState, destination_name: String) -> NavResult<()> {
    if state.phase != AuthoringPhase::AwaitingSave {
        return Err(NavError::InvalidAuthoringStep(
            "Speichern erst wenn der Zielpunkt gesetzt ist",
        ));
    }
    let beacon_name = state
        .graph
        .beacon_name()
        .ok_or(NavError::AnchorNotSet)?
        .to_string();

    let route = Route {
        destination_name: destination_name.clone(),
        beacon_name,
        waypoints: state.graph.waypoints().to_vec(),
    };
    if !route.is_well_formed() {
        return Err(NavError::MalformedRoute(format!(
            "Route '{destination_name}' hat keine gültige Start/Ziel-Struktur"
        )));
    }

    state.library.push(route);
    super::library::persist_library(state);
    state.reset_session();
    log::info!("Route '{destination_name}' in die Bibliothek übernommen");
    state.set_status(format!("Route '{destination_name}' gespeichert"));
    Ok(())
}

/// Bricht die Routenerstellung ab und setzt die Session zurück.
pub fn cancel_authoring(state: &mut NavState) -> NavResult<()> {
    log::info!("Routenerstellung abgebrochen");
    state.reset_session();
    Ok(())
}
