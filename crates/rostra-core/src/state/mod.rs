//! Application state module: the current-session pointer.

pub mod repository;

pub use repository::StateRepository;
