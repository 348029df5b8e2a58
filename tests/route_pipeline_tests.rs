//! Pipeline-Tests: Wire-Payload → Route → Platzierung → Distanz.

use ar_indoor_nav::core::{
    checkpoint_instruction, compose_chain, distance_to_destination, plot_route, translation_of,
    RouteDistance,
};
use ar_indoor_nav::net::decode_route;
use ar_indoor_nav::WaypointKind;
use approx::assert_relative_eq;
use glam::{Mat4, Quat, Vec3};

const WIRE_BODY: &str = r#"{
    "destination": "lab",
    "beacon_name": "book",
    "node_count": 4,
    "nodes": {
        "index": [
            {"type": "intermediate", "x_offset": 0.0, "y_offset": 0.0, "z_offset": 0.0, "descript": "n0"},
            {"type": "intermediate", "x_offset": 3.0, "y_offset": 0.0, "z_offset": 0.0, "descript": "n1"},
            {"type": "intermediate", "x_offset": 0.0, "y_offset": 4.0, "z_offset": 0.0, "descript": "n2"},
            {"type": "intermediate", "x_offset": 1.0, "y_offset": 0.0, "z_offset": 0.0, "descript": "n3"}
        ]
    }
}"#;

#[test]
fn test_wire_route_is_retagged_and_plottable() {
    let route = decode_route(WIRE_BODY).expect("Payload sollte dekodierbar sein");

    // node_count−1-Regel: erster/letzter Eintrag werden umgetaggt
    assert_eq!(route.waypoints[0].kind, WaypointKind::Start);
    assert_eq!(route.waypoints[3].kind, WaypointKind::Destination);
    assert!(route.is_well_formed());

    let plotted = plot_route(Mat4::IDENTITY, &route.waypoints, 0.1, 0.0);
    assert_eq!(plotted.nodes.len(), 4);
    assert_eq!(plotted.suppressed, 0);
    assert_eq!(plotted.last_position(), Some(Vec3::new(4.0, 4.0, 0.0)));
}

#[test]
fn test_rotated_anchor_rotates_whole_route() {
    let route = decode_route(WIRE_BODY).unwrap();
    let anchor = Mat4::from_rotation_translation(
        Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        Vec3::new(10.0, 0.0, 0.0),
    );

    let plotted = plot_route(anchor, &route.waypoints, 0.1, 0.0);
    let offsets: Vec<Vec3> = route.waypoints.iter().map(|w| w.offset).collect();
    let expected = translation_of(compose_chain(anchor, &offsets));

    // 90° um Z: Netto-Offset (4,4,0) landet bei (10−4, 4, 0)
    assert_relative_eq!(expected.x, 6.0, epsilon = 1e-5);
    assert_relative_eq!(expected.y, 4.0, epsilon = 1e-5);

    let last = plotted.last_position().expect("Knoten erwartet");
    assert_relative_eq!(last.distance(expected), 0.0, epsilon = 1e-5);
}

#[test]
fn test_distance_and_instruction_from_decoded_route() {
    let route = decode_route(WIRE_BODY).unwrap();

    // Ab n1: 2D-Segmente (0,4) und (1,0) → 4 + 1 = 5
    assert_eq!(
        distance_to_destination(&route.waypoints[1], &route.waypoints),
        RouteDistance::Known(5.0)
    );

    let text = checkpoint_instruction(&route.waypoints[1], &route.waypoints);
    assert!(text.contains("n1"), "Text war: {text}");
    assert!(text.contains("n3"), "Text war: {text}");
    assert!(text.contains("5.00"), "Text war: {text}");
}

#[test]
fn test_noisy_route_suppresses_backtracking_nodes() {
    // n1 entfernt sich nach n0 wieder vom Ziel
    let body = r#"{
        "destination": "lab",
        "beacon_name": "book",
        "node_count": 4,
        "nodes": {
            "index": [
                {"type": "start", "x_offset": 2.0, "y_offset": 0.0, "z_offset": 0.0, "descript": "n0"},
                {"type": "intermediate", "x_offset": -1.0, "y_offset": 0.0, "z_offset": 0.0, "descript": "n1"},
                {"type": "intermediate", "x_offset": 0.0, "y_offset": 0.0, "z_offset": 0.0, "descript": "n2"},
                {"type": "destination", "x_offset": 3.0, "y_offset": 0.0, "z_offset": 0.0, "descript": "n3"}
            ]
        }
    }"#;
    let route = decode_route(body).unwrap();
    let plotted = plot_route(Mat4::IDENTITY, &route.waypoints, 0.1, 0.0);

    let labels: Vec<&str> = plotted.nodes.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, vec!["n0", "n3"]);
    assert_eq!(plotted.suppressed, 2);

    // Bodenlinie überbrückt die unterdrückten Knoten; der letzte Offset
    // kettet an den zuletzt platzierten Knoten (x=2), nicht an n2
    let line = plotted.nodes[1]
        .incoming_line
        .as_ref()
        .expect("Linie erwartet");
    assert_relative_eq!(line.from.x, 2.0);
    assert_relative_eq!(line.to.x, 5.0);
}
