//! Identity & session management.
//!
//! Account creation, sign-in/out, and the current-session pointer, built
//! on the injected collection repositories. The only module that sees
//! accounts and credentials.

pub mod credential;
pub mod service;

pub use credential::CredentialHasher;
pub use service::IdentityManager;
