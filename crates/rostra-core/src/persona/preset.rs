//! Built-in persona catalog.

use super::model::Persona;

/// The personas offered on the selection screen.
pub fn builtin_personas() -> Vec<Persona> {
    vec![
        Persona::new(
            "Pragmatic Scientist",
            "Focuses on data, evidence, and logical reasoning. Avoids emotional arguments.",
        ),
        Persona::new(
            "Passionate Activist",
            "Appeals to emotion, ethics, and social impact. Uses strong, persuasive language.",
        ),
        Persona::new(
            "Skeptical Journalist",
            "Questions everything, probes for weaknesses in arguments, and demands clarification.",
        ),
        Persona::new(
            "Optimistic Technologist",
            "Highlights the benefits of progress and innovation, often downplaying risks.",
        ),
    ]
}

/// Looks a built-in persona up by name, case-insensitively.
pub fn find_persona(name: &str) -> Option<Persona> {
    builtin_personas()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_distinct_names() {
        let personas = builtin_personas();
        assert_eq!(personas.len(), 4);
        let mut names: Vec<&str> = personas.iter().map(|p| p.name.as_str()).collect();
        names.dedup();
        assert_eq!(names.len(), personas.len());
    }

    #[test]
    fn test_find_persona_is_case_insensitive() {
        assert!(find_persona("pragmatic scientist").is_some());
        assert!(find_persona("Unknown Orator").is_none());
    }
}
