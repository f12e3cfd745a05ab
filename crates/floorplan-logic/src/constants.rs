//! Layout constants — house defaults, placement limits, unit scale.
//!
//! Plain `const` values with no dependencies. Tunables that callers may
//! override live in [`crate::config::SolverConfig`]; these are its defaults.

pub mod house {
    /// House width used when the specification omits `house_dimensions` (ft).
    pub const DEFAULT_WIDTH_FT: f64 = 60.0;
    /// House depth used when the specification omits `house_dimensions` (ft).
    pub const DEFAULT_DEPTH_FT: f64 = 40.0;

    /// Base width for a house synthesized from a free-text description (ft).
    pub const SYNTH_BASE_WIDTH_FT: f64 = 60.0;
    /// Base depth for a house synthesized from a free-text description (ft).
    pub const SYNTH_BASE_DEPTH_FT: f64 = 40.0;
    /// Extra width per synthesized room (ft).
    pub const SYNTH_WIDTH_PER_ROOM_FT: f64 = 10.0;
    /// Extra depth per synthesized room (ft).
    pub const SYNTH_DEPTH_PER_ROOM_FT: f64 = 8.0;
    /// Cap on bedrooms or bathrooms read from a description.
    pub const MAX_DESCRIBED_ROOMS_PER_TYPE: u32 = 9;
}

pub mod placement {
    /// Randomized placer attempt cap per room.
    pub const MAX_RANDOM_ATTEMPTS: u32 = 50;
    /// Rooms narrower than this on either axis get their type default (ft).
    pub const MIN_DIMENSION_FT: f64 = 5.0;
    /// Grid cell inset per side: 5 px at the renderer's 20 px/ft.
    pub const GRID_MARGIN_FT: f64 = 5.0 / super::units::PIXELS_PER_FOOT;
    /// Largest grid side honored from a request; larger values are clamped.
    pub const MAX_GRID_SIDE: u32 = 64;
    /// Fixed-lattice slot rows.
    pub const LATTICE_ROWS: u32 = 4;
    /// Fixed-lattice slot columns.
    pub const LATTICE_COLS: u32 = 4;
    /// Slot side as a fraction of its lattice cell.
    pub const LATTICE_SLOT_FILL: f64 = 0.5;
}

pub mod units {
    /// Renderer scale. The solver works in feet; this only derives pixel margins.
    pub const PIXELS_PER_FOOT: f64 = 20.0;
}

/// Geometric comparison tolerance in feet.
///
/// Rooms that touch within this distance share an edge rather than overlap.
/// Containment in the house is exact and does not use it.
pub const EPSILON: f64 = 1e-6;
