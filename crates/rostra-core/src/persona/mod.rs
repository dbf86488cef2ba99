//! Persona domain module.
//!
//! Personas are the named debating styles the AI partner impersonates.

pub mod model;
pub mod preset;

pub use model::Persona;
pub use preset::{builtin_personas, find_persona};
