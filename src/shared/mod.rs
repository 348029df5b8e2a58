//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Konfiguration und Konstanten, die zwischen `app`, `core`
//! und den Boundary-Schichten geteilt werden.

pub mod options;

pub use options::NavOptions;
pub use options::{ARRIVAL_THRESHOLD, POLL_INTERVAL_MS, REQUEST_TIMEOUT_SECS};
