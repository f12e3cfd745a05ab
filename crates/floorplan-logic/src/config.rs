//! Solver configuration and validation.
//!
//! Every tunable of the strategy chain lives in [`SolverConfig`]. The
//! defaults reproduce the reference behavior: 50 random attempts, a 5 px
//! (0.25 ft) grid inset, a 5 ft dimension floor and a 4×4 fallback lattice.
//!
//! ```
//! use floorplan_logic::config::{validate_config, SolverConfig};
//!
//! let config = SolverConfig {
//!     seed: Some(7),
//!     ..SolverConfig::default()
//! };
//! assert!(validate_config(&config).is_empty());
//! ```

use crate::constants::placement;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tunables for one solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Randomized placer attempts per room.
    pub max_attempts: u32,
    /// Cosmetic inset per side of a grid cell, in feet.
    pub grid_margin_ft: f64,
    /// Parsed dimensions below this fall back to the type default, in feet.
    pub min_dimension_ft: f64,
    /// Fallback lattice rows.
    pub lattice_rows: u32,
    /// Fallback lattice columns.
    pub lattice_cols: u32,
    /// Slot side as a fraction of its lattice cell, exclusive (0, 1).
    pub lattice_slot_fill: f64,
    /// Seed for the randomized placer (None = entropy).
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_attempts: placement::MAX_RANDOM_ATTEMPTS,
            grid_margin_ft: placement::GRID_MARGIN_FT,
            min_dimension_ft: placement::MIN_DIMENSION_FT,
            lattice_rows: placement::LATTICE_ROWS,
            lattice_cols: placement::LATTICE_COLS,
            lattice_slot_fill: placement::LATTICE_SLOT_FILL,
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Default configuration with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Total number of fallback slots.
    pub fn lattice_capacity(&self) -> usize {
        self.lattice_rows as usize * self.lattice_cols as usize
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConfigError {
    /// Randomized placer would never sample.
    ZeroAttempts,
    /// Grid margin negative or not finite.
    InvalidGridMargin(f64),
    /// Minimum dimension not strictly positive.
    InvalidMinDimension(f64),
    /// Lattice has no slots.
    EmptyLattice { rows: u32, cols: u32 },
    /// Slot fill outside (0, 1).
    InvalidSlotFill(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroAttempts => write!(f, "max_attempts must be at least 1"),
            ConfigError::InvalidGridMargin(m) => write!(f, "grid margin {m} must be >= 0"),
            ConfigError::InvalidMinDimension(d) => {
                write!(f, "minimum dimension {d} must be > 0")
            }
            ConfigError::EmptyLattice { rows, cols } => {
                write!(f, "lattice {rows}x{cols} has no slots")
            }
            ConfigError::InvalidSlotFill(v) => {
                write!(f, "lattice slot fill {v} must lie strictly between 0 and 1")
            }
        }
    }
}

/// Validate a solver configuration, returning all errors found.
pub fn validate_config(config: &SolverConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.max_attempts == 0 {
        errors.push(ConfigError::ZeroAttempts);
    }
    if !config.grid_margin_ft.is_finite() || config.grid_margin_ft < 0.0 {
        errors.push(ConfigError::InvalidGridMargin(config.grid_margin_ft));
    }
    if !config.min_dimension_ft.is_finite() || config.min_dimension_ft <= 0.0 {
        errors.push(ConfigError::InvalidMinDimension(config.min_dimension_ft));
    }
    if config.lattice_rows == 0 || config.lattice_cols == 0 {
        errors.push(ConfigError::EmptyLattice {
            rows: config.lattice_rows,
            cols: config.lattice_cols,
        });
    }
    let fill = config.lattice_slot_fill;
    if !(fill > 0.0 && fill < 1.0) {
        errors.push(ConfigError::InvalidSlotFill(fill));
    }

    errors
}
