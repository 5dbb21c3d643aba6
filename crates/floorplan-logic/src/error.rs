//! Crate-wide error type.

use thiserror::Error;

use crate::plan::PlanError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FloorError>;

/// Errors surfaced by floor generation.
///
/// Stage exhaustion is not an error: it is reported through
/// [`crate::floor::StageOutcome`] so callers still get the partial floor.
#[derive(Debug, Error)]
pub enum FloorError {
    #[error("weighted draw over a pool with zero total weight")]
    DegenerateDraw,
    #[error("invalid floor plan: {}", format_plan_errors(.0))]
    InvalidPlan(Vec<PlanError>),
    #[error("plan parse error: {0}")]
    PlanParse(#[from] serde_json::Error),
}

fn format_plan_errors(errors: &[PlanError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
