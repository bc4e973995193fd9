//! Pronostiek domain core.
//!
//! Pure team-selection logic with no database or HTTP dependencies: the
//! rider catalog, per-variant rulesets, roster validation and the
//! [`team_builder::TeamBuilder`] that ties them together.

pub mod catalog;
pub mod error;
pub mod naming;
pub mod rider;
pub mod roster;
pub mod ruleset;
pub mod team_builder;
pub mod types;
