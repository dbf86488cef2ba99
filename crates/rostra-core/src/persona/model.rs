//! Persona domain model.

use serde::{Deserialize, Serialize};

/// A named AI debating style the partner impersonates.
///
/// The name is also the label persisted on debate records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Display name of the persona
    pub name: String,
    /// Description of how this persona argues.
    pub style: String,
}

impl Persona {
    pub fn new(name: &str, style: &str) -> Self {
        Self {
            name: name.to_string(),
            style: style.to_string(),
        }
    }
}
