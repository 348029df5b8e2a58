//! Use-Cases: fachliche Abläufe auf dem `NavState`.

pub mod authoring;
pub mod library;
pub mod navigation;
