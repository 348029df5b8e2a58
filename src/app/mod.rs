//! Application-Schicht: Zustand, Kommandos, Controller und Use-Cases.

pub mod controller;
pub mod events;
pub mod state;
pub mod use_cases;

pub use controller::NavController;
pub use events::NavCommand;
pub use state::{AuthoringControls, AuthoringPhase, NavState, SessionFlags};
