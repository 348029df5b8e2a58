//! Fehler-Taxonomie der Navigations-Engine.
//!
//! Boundary-Fehler (Netzwerk, Persistenz) werden hier zu einem
//! Engine-Fehler zusammengeführt; `anyhow` bleibt der äußeren
//! Binary-Schicht vorbehalten.

use thiserror::Error;

/// Fehler der Navigations- und Authoring-Abläufe.
#[derive(Debug, Error)]
pub enum NavError {
    /// Operation benötigt einen gesetzten Weltursprung
    #[error("Weltursprung nicht gesetzt: erst einen Marker erkennen")]
    AnchorNotSet,

    /// Operation benötigt eine aktive Navigations-Session
    #[error("keine aktive Navigation")]
    NotNavigating,

    /// Operation benötigt eine aktive Authoring-Session
    #[error("keine aktive Routenerstellung")]
    NotAuthoring,

    /// Authoring-Schritt in falscher Phase (z.B. Zwischenpunkt vor Start)
    #[error("ungültiger Authoring-Schritt: {0}")]
    InvalidAuthoringStep(&'static str),

    /// Route vom Server konnte nicht geladen werden
    #[error("Route konnte nicht geladen werden: {0}")]
    RouteFetch(#[from] crate::net::NetError),

    /// Server-Antwort war syntaktisch gültig, aber inhaltlich unbrauchbar
    #[error("Route unbrauchbar: {0}")]
    MalformedRoute(String),

    /// Route nicht in der lokalen Bibliothek
    #[error("Route '{0}' nicht in der Bibliothek")]
    RouteNotFound(String),
}

/// Engine-weiter Result-Alias.
pub type NavResult<T> = Result<T, NavError>;
