//! Automation — a named record carrying a critical ratio and a derived rank.
//!
//! The `critical_ratio` is user-supplied and constrained to `[0, 1]`. The
//! `criticality` field is owned by the ranking logic in [`crate::rank`]:
//! nothing else may set it. A value of `0` only exists in the window between
//! insertion and the first completed recompute; callers never observe it
//! because every mutation recomputes ranks before returning.

use serde::{Deserialize, Serialize};

use crate::error::{AutorankError, ValidationError};
use crate::id::{AutomationId, EnvironmentId};
use crate::time::Timestamp;

/// A tracked automation, scoped to one environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Automation {
    pub id: AutomationId,
    pub name: String,
    /// Set at creation, never reassigned.
    pub environment_id: EnvironmentId,
    /// Priority score in `[0, 1]` driving the rank.
    pub critical_ratio: f64,
    /// Dense rank over all automations, 1 = highest ratio. Derived.
    pub criticality: u32,
    pub created_at: Timestamp,
}

impl Automation {
    /// Create a builder for constructing an [`Automation`].
    #[must_use]
    pub fn builder() -> AutomationBuilder {
        AutomationBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AutorankError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `critical_ratio` is outside `[0, 1]` or NaN
    ///   ([`ValidationError::RatioOutOfRange`])
    pub fn validate(&self) -> Result<(), AutorankError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        validate_ratio(self.critical_ratio)?;
        Ok(())
    }
}

/// Check that a critical ratio lies within the closed interval `[0, 1]`.
///
/// NaN is rejected: `contains` is false for NaN on both bounds.
///
/// # Errors
///
/// Returns [`ValidationError::RatioOutOfRange`] carrying the offending value.
pub fn validate_ratio(critical_ratio: f64) -> Result<(), ValidationError> {
    if !(0.0..=1.0).contains(&critical_ratio) {
        return Err(ValidationError::RatioOutOfRange(critical_ratio));
    }
    Ok(())
}

/// Step-by-step builder for [`Automation`].
#[derive(Debug, Default)]
pub struct AutomationBuilder {
    id: Option<AutomationId>,
    name: Option<String>,
    environment_id: Option<EnvironmentId>,
    critical_ratio: Option<f64>,
    criticality: Option<u32>,
    created_at: Option<Timestamp>,
}

impl AutomationBuilder {
    #[must_use]
    pub fn id(mut self, id: AutomationId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn environment_id(mut self, environment_id: EnvironmentId) -> Self {
        self.environment_id = Some(environment_id);
        self
    }

    #[must_use]
    pub fn critical_ratio(mut self, critical_ratio: f64) -> Self {
        self.critical_ratio = Some(critical_ratio);
        self
    }

    #[must_use]
    pub fn criticality(mut self, criticality: u32) -> Self {
        self.criticality = Some(criticality);
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder, validate, and return an [`Automation`].
    ///
    /// # Errors
    ///
    /// Returns [`AutorankError::Validation`] if required fields are missing
    /// or invalid. The environment reference and critical ratio have no
    /// defaults; omitting them is an error.
    pub fn build(self) -> Result<Automation, AutorankError> {
        let Some(environment_id) = self.environment_id else {
            return Err(ValidationError::MissingEnvironment.into());
        };
        let Some(critical_ratio) = self.critical_ratio else {
            return Err(ValidationError::MissingCriticalRatio.into());
        };
        let automation = Automation {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            environment_id,
            critical_ratio,
            criticality: self.criticality.unwrap_or(0),
            created_at: self.created_at.unwrap_or_else(crate::time::now),
        };
        automation.validate()?;
        Ok(automation)
    }
}
