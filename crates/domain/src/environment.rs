//! Environment — a named scope that automations belong to.
//!
//! Environments are leaf records: created once, never updated or deleted,
//! referenced by zero or more automations. Name uniqueness is enforced by
//! the storage layer.

use serde::{Deserialize, Serialize};

use crate::error::{AutorankError, ValidationError};
use crate::id::EnvironmentId;
use crate::time::Timestamp;

/// A named scope such as `production` or `staging`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub id: EnvironmentId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

impl Environment {
    /// Create a builder for constructing an [`Environment`].
    #[must_use]
    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AutorankError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), AutorankError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Environment`].
#[derive(Debug, Default)]
pub struct EnvironmentBuilder {
    id: Option<EnvironmentId>,
    name: Option<String>,
    description: Option<String>,
    created_at: Option<Timestamp>,
}

impl EnvironmentBuilder {
    #[must_use]
    pub fn id(mut self, id: EnvironmentId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder, validate, and return an [`Environment`].
    ///
    /// # Errors
    ///
    /// Returns [`AutorankError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Environment, AutorankError> {
        let environment = Environment {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description,
            created_at: self.created_at.unwrap_or_else(crate::time::now),
        };
        environment.validate()?;
        Ok(environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_valid_environment_when_name_provided() {
        let env = Environment::builder().name("production").build().unwrap();
        assert_eq!(env.name, "production");
        assert!(env.description.is_none());
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = Environment::builder().build();
        assert!(matches!(
            result,
            Err(AutorankError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_build_environment_with_description() {
        let env = Environment::builder()
            .name("staging")
            .description("pre-production mirror")
            .build()
            .unwrap();
        assert_eq!(env.description.as_deref(), Some("pre-production mirror"));
    }

    #[test]
    fn should_set_custom_id_via_builder() {
        let id = EnvironmentId::new();
        let env = Environment::builder()
            .id(id)
            .name("production")
            .build()
            .unwrap();
        assert_eq!(env.id, id);
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let env = Environment::builder().name("qa").build().unwrap();
        let json = serde_json::to_string(&env).unwrap();
        let parsed: Environment = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, env.id);
        assert_eq!(parsed.name, env.name);
    }
}
