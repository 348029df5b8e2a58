//! Ankunftsüberwachung: Polling-Loop auf einem Worker-Thread.
//!
//! Der Monitor ist der einzige bewusst nebenläufige Teil der Engine. Er
//! liest nur die Live-Position und ein Cancel-Token; Graph- und
//! Platzierungszustand werden vom Worker nie mutiert.

use glam::Vec3;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

/// Quelle der Live-Position (AR-Plattform-Boundary). Beliebig oft
/// abfragbar; Implementierungen müssen thread-sicher lesbar sein.
pub trait PositionSource: Send + Sync {
    /// Aktuelle Kamera-/Nutzerposition in Weltkoordinaten.
    fn position(&self) -> Vec3;
}

/// Abbruch-Token, an den Session-Lebenszyklus gebunden.
///
/// Der Worker beobachtet das Token und beendet sich selbst; es gibt
/// keine erzwungene Thread-Terminierung.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Erstellt ein nicht ausgelöstes Token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Löst den Abbruch aus (idempotent).
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Prüft ob der Abbruch ausgelöst wurde.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Zustände der Ankunftsüberwachung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalState {
    Idle,
    Polling,
    Arrived,
    /// Session wurde vor Ankunft abgebrochen
    Cancelled,
}

/// Einmalige Ankunftsmeldung an die UI-Schicht.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrivalEvent {
    /// Distanz zum Zielknoten beim auslösenden Sample
    pub distance: f32,
}

/// Prüft das Ankunftskriterium: 3D-Distanz ≤ Schwellwert.
pub fn has_arrived(position: Vec3, target: Vec3, threshold: f32) -> bool {
    position.distance(target) <= threshold
}

/// Laufende Ankunftsüberwachung.
///
/// Hält den Worker-Thread und den Empfangskanal für die (höchstens
/// eine) Ankunftsmeldung.
pub struct ArrivalWatch {
    cancel: CancelToken,
    events: mpsc::Receiver<ArrivalEvent>,
    worker: Option<thread::JoinHandle<ArrivalState>>,
}

impl ArrivalWatch {
    /// Startet die Überwachung: pollt `source` im Intervall und
    /// vergleicht die 3D-Distanz zum Zielknoten gegen `threshold`.
    ///
    /// Der Loop endet bei Ankunft oder wenn `cancel` ausgelöst wird —
    /// im Abbruchfall ohne Meldung. Kein eigener Timeout: er läuft bis
    /// Ankunft oder Abbruch.
    pub fn spawn(
        source: Arc<dyn PositionSource>,
        target: Vec3,
        threshold: f32,
        poll_interval: Duration,
        cancel: CancelToken,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker_cancel = cancel.clone();

        let worker = thread::spawn(move || {
            let mut state = ArrivalState::Polling;
            loop {
                if worker_cancel.is_cancelled() {
                    state = ArrivalState::Cancelled;
                    break;
                }

                let distance = source.position().distance(target);
                if distance <= threshold {
                    state = ArrivalState::Arrived;
                    // Nur melden wenn die Session noch aktiv ist
                    if !worker_cancel.is_cancelled() {
                        let _ = tx.send(ArrivalEvent { distance });
                    }
                    break;
                }

                thread::sleep(poll_interval);
            }
            log::debug!("Ankunfts-Loop beendet: {state:?}");
            state
        });

        Self {
            cancel,
            events: rx,
            worker: Some(worker),
        }
    }

    /// Holt eine anstehende Ankunftsmeldung ab (nicht blockierend).
    pub fn try_arrival(&self) -> Option<ArrivalEvent> {
        self.events.try_recv().ok()
    }

    /// Wartet blockierend auf Ankunft oder Loop-Ende.
    pub fn wait_arrival(&self) -> Option<ArrivalEvent> {
        self.events.recv().ok()
    }

    /// Löst den Abbruch aus; der Worker beendet sich selbst.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wartet auf das Loop-Ende und gibt den Endzustand zurück.
    pub fn join(mut self) -> ArrivalState {
        self.worker
            .take()
            .and_then(|w| w.join().ok())
            .unwrap_or(ArrivalState::Idle)
    }
}

impl Drop for ArrivalWatch {
    fn drop(&mut self) {
        // Nicht abgeholte Watches dürfen keinen Thread leaken
        self.cancel.cancel();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
