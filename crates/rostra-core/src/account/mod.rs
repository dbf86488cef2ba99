//! Account domain module.
//!
//! Accounts are owned exclusively by the identity layer; nothing outside
//! `crate::identity` should construct or expose them.

pub mod model;
pub mod repository;

pub use model::Account;
pub use repository::AccountRepository;
