//! AR-Indoor-Navigation Demo-Binary.
//!
//! Spielt eine komplette Session gegen den In-Memory-Routen-Server
//! durch: Route erstellen, hochladen, navigieren, ankommen. Dient als
//! ausführbares Beispiel der Engine-API; die AR-Plattform selbst wird
//! durch eine geskriptete Positionsquelle ersetzt.

use ar_indoor_nav::core::PositionSource;
use ar_indoor_nav::{
    DestinationInfo, InMemoryRouteService, NavCommand, NavController, NavOptions, NavState,
    RouteStore,
};
use glam::{Mat4, Vec3};
use std::sync::{Arc, Mutex};

/// Geskriptete Positionsquelle: läuft eine feste Punktfolge ab und
/// bleibt am letzten Punkt stehen.
struct ScriptedWalk {
    path: Mutex<(Vec<Vec3>, usize)>,
}

impl ScriptedWalk {
    fn new(path: Vec<Vec3>) -> Self {
        Self {
            path: Mutex::new((path, 0)),
        }
    }
}

impl PositionSource for ScriptedWalk {
    fn position(&self) -> Vec3 {
        let mut guard = self.path.lock().unwrap();
        let (path, index) = &mut *guard;
        let pos = path[(*index).min(path.len() - 1)];
        *index += 1;
        pos
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut options = NavOptions::load_from_file(&NavOptions::config_path());
    // Demo läuft ohne Echtzeit: schnelles Poll-Intervall
    options.poll_interval_ms = 10;

    let service = Arc::new(InMemoryRouteService::new());
    service.seed_directory(DestinationInfo {
        name: "lab".to_string(),
        details: "2. Stock, links vom Treppenhaus".to_string(),
    });

    let walk = Arc::new(ScriptedWalk::new(vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(6.0, 0.0, 0.0),
    ]));

    let mut controller = NavController::new(service.clone(), walk);
    let mut state = NavState::new(options);
    state.library = RouteStore::load_from_file(&RouteStore::store_path());
    state.library_path = Some(RouteStore::store_path());

    // ── Route erstellen und hochladen ───────────────────────────────
    controller.handle_command(&mut state, NavCommand::BeginAuthoring);
    controller.handle_command(
        &mut state,
        NavCommand::MarkerDetected {
            name: "book".to_string(),
            pose: Mat4::IDENTITY,
        },
    );
    controller.handle_command(
        &mut state,
        NavCommand::AddStartWaypoint {
            user_position: Vec3::new(0.0, 0.0, 0.0),
        },
    );
    controller.handle_command(
        &mut state,
        NavCommand::AddIntermediateWaypoint {
            position: Vec3::new(3.0, 0.0, 0.0),
        },
    );
    controller.handle_command(
        &mut state,
        NavCommand::AddDestinationWaypoint {
            position: Vec3::new(6.0, 0.0, 0.0),
        },
    );
    controller.handle_command(
        &mut state,
        NavCommand::SaveAuthoredRoute {
            destination_name: "lab".to_string(),
        },
    );
    controller.handle_command(
        &mut state,
        NavCommand::UploadRoute {
            uid: "demo-device".to_string(),
            destination: "lab".to_string(),
        },
    );
    if let Some(status) = state.take_status() {
        println!("{status}");
    }

    // ── Navigieren ──────────────────────────────────────────────────
    controller.handle_command(
        &mut state,
        NavCommand::BeginNavigation {
            destination: "lab".to_string(),
        },
    );
    controller.handle_command(
        &mut state,
        NavCommand::MarkerDetected {
            name: "book".to_string(),
            pose: Mat4::IDENTITY,
        },
    );

    // Linien sind bereits um floor_line_drop abgesenkt
    for line in state.graph.floor_lines() {
        println!(
            "Bodenlinie: ({:.1}, {:.1}, {:.1}) → ({:.1}, {:.1}, {:.1}), Länge {:.2} m",
            line.from.x, line.from.y, line.from.z, line.to.x, line.to.y, line.to.z,
            line.length()
        );
    }

    // Ankunftsmeldung abholen (die geskriptete Positionsquelle läuft
    // derweil auf das Ziel zu)
    loop {
        controller.handle_command(&mut state, NavCommand::PumpArrival);
        if let Some(alert) = state.take_alert() {
            println!("{alert}");
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(5));
    }

    Ok(())
}
