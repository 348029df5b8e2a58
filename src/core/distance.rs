//! Kumulative Routen-Distanz für die Anzeige "noch N Meter bis zum Ziel".

use super::Waypoint;

/// Ergebnis der Distanzberechnung.
///
/// `Unknown` ersetzt das stillschweigende Aufsummieren der Gesamtliste,
/// wenn der Ausgangs-Wegpunkt nicht gefunden wird: statt einer falschen
/// Zahl bekommt der Aufrufer ein explizites Sentinel. Die degenerierte
/// Summe wird für Diagnosezwecke mitgeführt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteDistance {
    /// Distanz in Metern, auf 2 Nachkommastellen abgeschnitten
    Known(f32),
    /// `from` nicht in der Liste gefunden; Summe über die Gesamtliste
    Unknown { degenerate_sum: f32 },
}

impl RouteDistance {
    /// Anzeigetext für das UI ("12.34" bzw. "unbekannt").
    pub fn display(&self) -> String {
        match self {
            RouteDistance::Known(meters) => format!("{meters:.2}"),
            RouteDistance::Unknown { .. } => "unbekannt".to_string(),
        }
    }
}

/// Kumulative 2D-Pfaddistanz von `from` bis zum Ziel (Listenende).
///
/// Traversiert die Wegpunktfolge vom Ende rückwärts und akkumuliert die
/// euklidische Distanz (x, y — Höhe wird ignoriert) zwischen
/// aufeinanderfolgenden Offsets. Sobald ein Wegpunkt mit dem Label von
/// `from` erreicht ist, wird die bis dahin akkumulierte Summe
/// zurückgegeben. Wird `from` nie gefunden, ist das Ergebnis `Unknown`.
pub fn distance_to_destination(from: &Waypoint, waypoints: &[Waypoint]) -> RouteDistance {
    let mut sum = 0.0f32;

    for i in (1..waypoints.len()).rev() {
        if waypoints[i].label == from.label {
            return RouteDistance::Known(truncate_2(sum));
        }
        sum += segment_2d(&waypoints[i], &waypoints[i - 1]);
    }

    if waypoints.first().is_some_and(|wp| wp.label == from.label) {
        RouteDistance::Known(truncate_2(sum))
    } else {
        RouteDistance::Unknown {
            degenerate_sum: truncate_2(sum),
        }
    }
}

/// Baut den Checkpoint-Hinweistext ("Your are at … Distance: … away from …").
pub fn checkpoint_instruction(from: &Waypoint, waypoints: &[Waypoint]) -> String {
    let destination_label = waypoints
        .last()
        .map(|wp| wp.label.as_str())
        .unwrap_or_default();
    let distance = distance_to_destination(from, waypoints);
    format!(
        "Your are at: {} — Distance: {}m away from {}.",
        from.label,
        distance.display(),
        destination_label
    )
}

/// 2D-Distanz (x, y) zwischen zwei aufeinanderfolgenden Offsets.
fn segment_2d(a: &Waypoint, b: &Waypoint) -> f32 {
    let xd = a.offset.x - b.offset.x;
    let yd = a.offset.y - b.offset.y;
    (xd * xd + yd * yd).sqrt()
}

/// Schneidet auf 2 Nachkommastellen ab (kein Runden — Anzeige-Konvention).
fn truncate_2(value: f32) -> f32 {
    (value * 100.0).trunc() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WaypointKind;
    use glam::Vec3;

    fn wp(x: f32, y: f32, label: &str) -> Waypoint {
        Waypoint::new(WaypointKind::Intermediate, Vec3::new(x, y, 0.0), label)
    }

    #[test]
    fn sums_segments_from_start_to_destination() {
        // (0,0) → (3,0) → (3,4): 3 + 4 = 7
        let route = vec![wp(0.0, 0.0, "a"), wp(3.0, 0.0, "b"), wp(3.0, 4.0, "c")];
        assert_eq!(
            distance_to_destination(&route[0], &route),
            RouteDistance::Known(7.0)
        );
    }

    #[test]
    fn distance_from_destination_is_zero() {
        let route = vec![wp(0.0, 0.0, "a"), wp(3.0, 0.0, "b")];
        assert_eq!(
            distance_to_destination(&route[1], &route),
            RouteDistance::Known(0.0)
        );
    }

    #[test]
    fn partial_distance_stops_at_from() {
        let route = vec![wp(0.0, 0.0, "a"), wp(3.0, 0.0, "b"), wp(3.0, 4.0, "c")];
        assert_eq!(
            distance_to_destination(&route[1], &route),
            RouteDistance::Known(4.0)
        );
    }

    #[test]
    fn elevation_is_ignored() {
        let mut a = wp(0.0, 0.0, "a");
        a.offset.z = 10.0;
        let b = wp(3.0, 4.0, "b");
        let route = vec![a.clone(), b];
        assert_eq!(
            distance_to_destination(&a, &route),
            RouteDistance::Known(5.0)
        );
    }

    #[test]
    fn unknown_from_yields_sentinel_not_wrong_number() {
        let route = vec![wp(0.0, 0.0, "a"), wp(3.0, 0.0, "b")];
        let stranger = wp(9.0, 9.0, "nicht-da");
        match distance_to_destination(&stranger, &route) {
            RouteDistance::Unknown { degenerate_sum } => assert_eq!(degenerate_sum, 3.0),
            other => panic!("Unknown erwartet, war {other:?}"),
        }
    }

    #[test]
    fn display_truncates_to_two_decimals() {
        // 1.0/3.0 ≈ 0.3333… → "0.33"
        let route = vec![wp(0.0, 0.0, "a"), wp(1.0 / 3.0, 0.0, "b")];
        let d = distance_to_destination(&route[0], &route);
        assert_eq!(d.display(), "0.33");
        assert_eq!(RouteDistance::Unknown { degenerate_sum: 1.0 }.display(), "unbekannt");
    }

    #[test]
    fn instruction_names_current_and_destination() {
        let route = vec![wp(0.0, 0.0, "hier"), wp(3.0, 4.0, "ziel")];
        let text = checkpoint_instruction(&route[0], &route);
        assert!(text.contains("hier"));
        assert!(text.contains("ziel"));
        assert!(text.contains("5.00"));
    }

    #[test]
    fn empty_route_is_unknown() {
        let stranger = wp(0.0, 0.0, "x");
        assert!(matches!(
            distance_to_destination(&stranger, &[]),
            RouteDistance::Unknown { .. }
        ));
    }
}
