//! Zentrale Konfiguration für die Navigations-Engine.
//!
//! `NavOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Ankunft ─────────────────────────────────────────────────────────

/// Ankunftsschwelle: 3D-Distanz zum Zielknoten in Metern.
pub const ARRIVAL_THRESHOLD: f32 = 1.5;
/// Poll-Intervall der Ankunftsüberwachung in Millisekunden.
pub const POLL_INTERVAL_MS: u64 = 500;

// ── Netzwerk ────────────────────────────────────────────────────────

/// Request-Timeout für Server-Aufrufe in Sekunden.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// ── Platzierung ─────────────────────────────────────────────────────

/// Höhenversatz der Richtungspfeile über dem Knoten (Meter).
pub const ARROW_HEIGHT_OFFSET: f32 = 0.1;
/// Absenkung der Bodenlinien unter den Knoten (Meter).
pub const FLOOR_LINE_DROP: f32 = 0.8;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Navigations-Optionen.
/// Wird als `ar_indoor_nav.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavOptions {
    // ── Ankunft ─────────────────────────────────────────────────
    /// Ankunftsschwelle in Metern (3D-Distanz zum Zielknoten)
    pub arrival_threshold: f32,
    /// Poll-Intervall der Ankunftsüberwachung in Millisekunden
    pub poll_interval_ms: u64,

    // ── Netzwerk ────────────────────────────────────────────────
    /// Request-Timeout für Server-Aufrufe in Sekunden
    pub request_timeout_secs: u64,

    // ── Platzierung ─────────────────────────────────────────────
    /// Höhenversatz der Richtungspfeile über dem Knoten
    #[serde(default = "default_arrow_height_offset")]
    pub arrow_height_offset: f32,
    /// Absenkung der Bodenlinien unter den Knoten
    #[serde(default = "default_floor_line_drop")]
    pub floor_line_drop: f32,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            arrival_threshold: ARRIVAL_THRESHOLD,
            poll_interval_ms: POLL_INTERVAL_MS,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            arrow_height_offset: ARROW_HEIGHT_OFFSET,
            floor_line_drop: FLOOR_LINE_DROP,
        }
    }
}

/// Serde-Default für `arrow_height_offset` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_arrow_height_offset() -> f32 {
    ARROW_HEIGHT_OFFSET
}

/// Serde-Default für `floor_line_drop` (Abwärtskompatibilität).
fn default_floor_line_drop() -> f32 {
    FLOOR_LINE_DROP
}

impl NavOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("ar_indoor_nav"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("ar_indoor_nav.toml")
    }

    /// Poll-Intervall als `Duration`.
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let opts = NavOptions::default();
        assert_eq!(opts.arrival_threshold, ARRIVAL_THRESHOLD);
        assert_eq!(opts.poll_interval_ms, POLL_INTERVAL_MS);
        assert_eq!(opts.request_timeout_secs, REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn toml_roundtrip_preserves_options() {
        let mut opts = NavOptions::default();
        opts.arrival_threshold = 2.0;
        opts.poll_interval_ms = 250;

        let text = toml::to_string_pretty(&opts).unwrap();
        let back: NavOptions = toml::from_str(&text).unwrap();
        assert_eq!(back, opts);
    }

    #[test]
    fn missing_placement_fields_fall_back_to_defaults() {
        // Ältere Options-Datei ohne die Platzierungsfelder
        let text = "arrival_threshold = 1.5\npoll_interval_ms = 500\nrequest_timeout_secs = 10\n";
        let opts: NavOptions = toml::from_str(text).unwrap();
        assert_eq!(opts.arrow_height_offset, ARROW_HEIGHT_OFFSET);
        assert_eq!(opts.floor_line_drop, FLOOR_LINE_DROP);
    }
}
