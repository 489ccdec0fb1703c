//! Alerts module
//!
//! Turns a weather reading into prioritized condition cards:
//! - Card and severity types
//! - Configurable rule thresholds
//! - The rule engine that evaluates every alert family

pub mod card;
pub mod engine;
pub mod thresholds;

pub use card::{CardKind, ConditionCard, Severity};
pub use engine::ConditionRuleEngine;
pub use thresholds::RuleThresholds;
