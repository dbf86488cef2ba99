//! Saved media analyses.
//!
//! Per-user topic analyses persisted alongside the session data. Not part
//! of the debate lifecycle; stored through the same snapshot-shaped store.

pub mod model;
pub mod repository;

pub use model::MediaAnalysis;
pub use repository::AnalysisRepository;
