//! Lokale Routenbibliothek: JSON-Datei neben der Binary.
//!
//! Hält die selbst erstellten und heruntergeladenen Routen des Geräts.
//! Lesefehler degradieren zu einer leeren Bibliothek, Schreibfehler
//! werden dem Aufrufer gemeldet.

use crate::core::Route;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persistente Routenbibliothek des Geräts.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RouteStore {
    routes: Vec<Route>,
}

impl RouteStore {
    /// Erstellt eine leere Bibliothek.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lädt die Bibliothek aus einer JSON-Datei. Bei Fehler: leer.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(store) => {
                    log::info!("Routenbibliothek geladen aus: {}", path.display());
                    store
                }
                Err(e) => {
                    log::warn!("Routenbibliothek fehlerhaft, starte leer: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Routenbibliothek gefunden, starte leer");
                Self::default()
            }
        }
    }

    /// Speichert die Bibliothek als JSON-Datei.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!(
            "Routenbibliothek gespeichert ({} Routen) nach: {}",
            self.routes.len(),
            path.display()
        );
        Ok(())
    }

    /// Ermittelt den Pfad zur Bibliotheks-Datei neben der Binary.
    pub fn store_path() -> PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| PathBuf::from("ar_indoor_nav"))
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("ar_indoor_nav_routes.json")
    }

    /// Alle Routen in Bibliotheksreihenfolge.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Anzahl der Routen.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Prüft ob die Bibliothek leer ist.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Sucht eine Route über ihren Zielnamen.
    pub fn find(&self, destination_name: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|r| r.destination_name == destination_name)
    }

    /// Hängt eine Route unverändert an; gleichnamige Einträge bleiben
    /// bestehen (Semantik des einfachen Speicherns).
    pub fn push(&mut self, route: Route) {
        log::info!("Route '{}' angehängt", route.destination_name);
        self.routes.push(route);
    }

    /// Fügt eine Route ein; eine vorhandene Route mit gleichem
    /// Zielnamen wird ersetzt (Download-Semantik).
    pub fn upsert(&mut self, route: Route) {
        if let Some(existing) = self
            .routes
            .iter_mut()
            .find(|r| r.destination_name == route.destination_name)
        {
            log::info!("Route '{}' ersetzt", route.destination_name);
            *existing = route;
        } else {
            log::info!("Route '{}' hinzugefügt", route.destination_name);
            self.routes.push(route);
        }
    }

    /// Entfernt die Route an Position `index` (Listen-UI-Semantik).
    pub fn remove_at(&mut self, index: usize) -> Option<Route> {
        if index < self.routes.len() {
            Some(self.routes.remove(index))
        } else {
            None
        }
    }
}
