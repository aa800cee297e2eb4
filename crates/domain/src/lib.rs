//! # autorank-domain
//!
//! Pure domain model for the autorank criticality tracking system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Environments** (named scopes that automations belong to)
//! - Define **Automations** (named records carrying a critical ratio and a
//!   derived criticality rank)
//! - Define the **dense ranking** algorithm that turns critical ratios into
//!   criticality ranks
//! - Define list queries (sort field, direction, pagination)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod automation;
pub mod environment;
pub mod query;
pub mod rank;
