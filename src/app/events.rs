//! Command-Enum für den Datenfluss Host-UI → Engine.

use glam::{Mat4, Vec3};

/// Mutierende Kommandos auf dem `NavState`.
///
/// Jede Host-Interaktion (Tap, Marker-Erkennung, Listen-Aktion) wird in
/// genau ein Kommando übersetzt und vom `NavController` ausgeführt.
#[derive(Debug, Clone)]
pub enum NavCommand {
    // === Navigation ===
    /// Navigation zu einem Ziel starten
    BeginNavigation { destination: String },
    /// AR-Plattform hat einen Marker erkannt
    MarkerDetected { name: String, pose: Mat4 },
    /// Anstehende Ankunftsmeldung abholen und als Alert ausliefern
    PumpArrival,
    /// Navigation beenden und Session zurücksetzen
    EndNavigation,

    // === Authoring ===
    /// Routenerstellung starten
    BeginAuthoring,
    /// Start-Wegpunkt an der Nutzerposition setzen
    AddStartWaypoint { user_position: Vec3 },
    /// Zwischenpunkt an einer Weltposition anhängen
    AddIntermediateWaypoint { position: Vec3 },
    /// Ziel-Wegpunkt an einer Weltposition setzen
    AddDestinationWaypoint { position: Vec3 },
    /// Letzten Wegpunkt entfernen
    UndoLastWaypoint,
    /// Fertige Route unter einem Zielnamen in die Bibliothek übernehmen
    SaveAuthoredRoute { destination_name: String },
    /// Routenerstellung abbrechen und Session zurücksetzen
    CancelAuthoring,

    // === Bibliothek & Server ===
    /// Namen der eigenen Server-Routen neu laden
    RefreshRouteNames { uid: String },
    /// Route vom Server in die Bibliothek übernehmen (Replace-by-Name)
    DownloadRoute { destination: String },
    /// Route aus der Bibliothek zum Server hochladen
    UploadRoute { uid: String, destination: String },
    /// Zielverzeichnis neu laden
    RefreshDestinationDirectory,
    /// Route an Listenposition aus der Bibliothek löschen
    DeleteLibraryRoute { index: usize },
}
