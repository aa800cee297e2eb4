//! List queries — sort field, direction, and pagination.
//!
//! The sortable fields form a closed enum mapped to explicit comparators,
//! so callers can never request a sort over an arbitrary field name.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::automation::Automation;
use crate::error::{AutorankError, ValidationError};

/// Fields an automation listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    CriticalRatio,
    Criticality,
}

impl SortField {
    /// Compare two automations on this field, ascending.
    #[must_use]
    pub fn compare(self, a: &Automation, b: &Automation) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::CriticalRatio => a.critical_ratio.total_cmp(&b.critical_ratio),
            Self::Criticality => a.criticality.cmp(&b.criticality),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Apply this direction to an ascending [`Ordering`].
    #[must_use]
    pub fn order(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// A validated listing request: sort plus 1-based pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub sort_by: SortField,
    pub sort_direction: SortDirection,
    /// 1-based page number.
    pub page: u32,
    /// Page size, at least 1.
    pub limit: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            sort_by: SortField::Criticality,
            sort_direction: SortDirection::Asc,
            page: 1,
            limit: 10,
        }
    }
}

impl ListQuery {
    /// Check pagination invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AutorankError::Validation`] when `page` or `limit` is zero.
    pub fn validate(&self) -> Result<(), AutorankError> {
        if self.page == 0 {
            return Err(ValidationError::ZeroPage.into());
        }
        if self.limit == 0 {
            return Err(ValidationError::ZeroLimit.into());
        }
        Ok(())
    }

    /// Number of records to skip before the requested page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Compare two automations according to this query's sort.
    #[must_use]
    pub fn compare(&self, a: &Automation, b: &Automation) -> Ordering {
        self.sort_direction.order(self.sort_by.compare(a, b))
    }
}
