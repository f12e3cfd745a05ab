use thiserror::Error;

use crate::config::ConfigError;
use crate::geometry::Violation;

/// Result alias for solver entry points.
pub type Result<T> = std::result::Result<T, SolveError>;

/// Request-level failures. Per-room failures never surface here; they end up
/// in [`crate::layout::Layout::unplaced`].
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("house bounds {width}x{depth} must both be positive")]
    NonPositiveBounds { width: f64, depth: f64 },
    #[error("floor plan has no rooms")]
    NoRooms,
    #[error("invalid solver config: {}", join(.0))]
    InvalidConfig(Vec<ConfigError>),
    #[error("layout failed final validation: {}", join(.0))]
    InvariantViolated(Vec<Violation>),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Per-room outcome of the randomized placer.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PlacementError {
    #[error("footprint {width}x{height} exceeds the house")]
    BoundsInfeasible { width: f64, height: f64 },
    #[error("no free position after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
