//! Rostra infrastructure: JSON-file storage for the session core.
//!
//! Implements the snapshot-shaped repository traits from `rostra-core`
//! over one JSON document per collection, with atomic replacement,
//! advisory locking, artificial latency, and the salted credential
//! hasher.

pub mod credential;
pub mod latency;
pub mod paths;
pub mod repository;
pub mod state_repository;
pub mod storage;
pub mod store;

pub use credential::Sha256CredentialHasher;
pub use latency::Latency;
pub use paths::RostraPaths;
pub use repository::{
    JsonAccountRepository, JsonAnalysisRepository, JsonDebateRepository, JsonMessageRepository,
    JsonProfileRepository,
};
pub use state_repository::JsonStateRepository;
pub use store::LocalStore;
