//! Weltkoordinaten-Verankerung und Ketten-Transformation.
//!
//! Der Anker ist die Pose des ersten erkannten Markers einer Session.
//! Alle platzierten Knoten werden direkt oder transitiv relativ zu ihm
//! berechnet, indem pro Knoten eine reine Translations-Matrix auf die
//! Transformation des Vorgängers rechtsmultipliziert wird.

use glam::{Mat4, Vec3};
use std::sync::OnceLock;

/// Write-once-Latch für den Weltursprung ("first beacon wins").
///
/// `set` hat Compare-and-Set-Semantik: genau ein Aufruf pro Session
/// gewinnt, alle weiteren Marker-Erkennungen sind No-ops. Damit bleibt
/// die Guard-Bedingung auch auf einem Multi-Thread-Host korrekt.
#[derive(Debug, Default)]
pub struct AnchorLatch {
    pose: OnceLock<Mat4>,
}

impl AnchorLatch {
    /// Erstellt einen ungesetzten Latch.
    pub fn new() -> Self {
        Self {
            pose: OnceLock::new(),
        }
    }

    /// Versucht den Weltursprung zu setzen.
    ///
    /// Gibt `true` zurück wenn dieser Aufruf gewonnen hat, `false` wenn
    /// der Anker bereits gesetzt war (Pose bleibt dann unverändert).
    pub fn set(&self, pose: Mat4) -> bool {
        self.pose.set(pose).is_ok()
    }

    /// Gibt die Anker-Pose zurück, falls gesetzt.
    pub fn pose(&self) -> Option<Mat4> {
        self.pose.get().copied()
    }

    /// Gibt die Anker-Position (Translationsanteil) zurück, falls gesetzt.
    pub fn position(&self) -> Option<Vec3> {
        self.pose().map(|m| m.w_axis.truncate())
    }

    /// Prüft ob der Weltursprung gesetzt ist.
    pub fn is_set(&self) -> bool {
        self.pose.get().is_some()
    }
}

/// Kettet einen relativen Offset an die Transformation des Vorgängers.
///
/// `previous * translation(offset)` — jeder Knoten ist relativ zu seinem
/// unmittelbaren Vorgänger definiert, nicht direkt zum Anker. Drift und
/// Rotation des Vorgängers tragen sich dadurch bewusst fort (entspricht
/// dem physischen Abschreiten der Wegpunkte).
pub fn chain_transform(previous: Mat4, offset: Vec3) -> Mat4 {
    previous * Mat4::from_translation(offset)
}

/// Referenz-Komposition: kettet alle Offsets nacheinander an den Anker.
///
/// Äquivalent zu wiederholtem `chain_transform`; dient als naive
/// Vergleichsimplementierung und zur Vorab-Berechnung der absoluten
/// Zielposition vor der Platzierung.
pub fn compose_chain(anchor: Mat4, offsets: &[Vec3]) -> Mat4 {
    offsets
        .iter()
        .fold(anchor, |acc, &offset| chain_transform(acc, offset))
}

/// Extrahiert die Position (Translationsanteil) einer Transformation.
pub fn translation_of(transform: Mat4) -> Vec3 {
    transform.w_axis.truncate()
}
