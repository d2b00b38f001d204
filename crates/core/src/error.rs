/// Domain-level error shared by every crate in the workspace.
///
/// Storage and HTTP layers wrap this rather than inventing their own
/// not-found / validation variants. Conflicts and backend failures belong to
/// the storage layer and live on its error type.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} at {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_includes_entity_and_key() {
        let err = CoreError::NotFound {
            entity: "Machine",
            key: "floor 2, pos 0".into(),
        };
        assert_eq!(err.to_string(), "Entity not found: Machine at floor 2, pos 0");
    }

    #[test]
    fn validation_display() {
        let err = CoreError::Validation("loc format is invalid".into());
        assert_eq!(err.to_string(), "Validation failed: loc format is invalid");
    }
}
