//! Layout solver: validates a request and runs the placement chain.
//!
//! Strategies run in priority order (explicit, grid, random, lattice), each
//! taking only the rooms still pending. The finished layout is re-validated
//! before it is returned, so a successful result always has every room
//! inside the house and no two rooms overlapping.

use crate::config::{validate_config, SolverConfig};
use crate::error::{Result, SolveError};
use crate::geometry::validate_layout;
use crate::layout::Layout;
use crate::placement::explicit::ExplicitPlacer;
use crate::placement::grid::GridPlacer;
use crate::placement::lattice::LatticePlacer;
use crate::placement::scatter::ScatterPlacer;
use crate::placement::{PlacementStrategy, PlanState};
use crate::random::{RandomSource, SeededSource};
use crate::requirements::{normalize_spec, FloorPlanRequest, FloorPlanSpec};

/// Solve with randomness seeded from `config.seed` (entropy when unset).
pub fn solve(request: &FloorPlanRequest, config: &SolverConfig) -> Result<Layout> {
    let mut source = SeededSource::from_option(config.seed);
    solve_with(request, config, &mut source)
}

/// Normalize a raw specification and solve it.
pub fn solve_spec(spec: &FloorPlanSpec, config: &SolverConfig) -> Result<Layout> {
    let request = normalize_spec(spec, config);
    solve(&request, config)
}

/// Parse a JSON specification and solve it.
pub fn solve_json(json: &str, config: &SolverConfig) -> Result<Layout> {
    let spec = FloorPlanSpec::from_json(json)?;
    solve_spec(&spec, config)
}

/// Solve with an explicit random source.
///
/// Fails only on an invalid request or config. Rooms that cannot be placed
/// are reported in [`Layout::unplaced`] instead.
pub fn solve_with(
    request: &FloorPlanRequest,
    config: &SolverConfig,
    source: &mut dyn RandomSource,
) -> Result<Layout> {
    let config_errors = validate_config(config);
    if !config_errors.is_empty() {
        return Err(SolveError::InvalidConfig(config_errors));
    }
    if !request.bounds.is_valid() {
        return Err(SolveError::NonPositiveBounds {
            width: request.bounds.width,
            depth: request.bounds.depth,
        });
    }
    if request.rooms.is_empty() {
        return Err(SolveError::NoRooms);
    }

    log::info!(
        "solving {} rooms in {:.1}x{:.1} ft house",
        request.rooms.len(),
        request.bounds.width,
        request.bounds.depth
    );

    let mut state = PlanState::new(request, config);

    let mut explicit = ExplicitPlacer;
    let mut grid = GridPlacer;
    let mut scatter = ScatterPlacer::new(source);
    let mut lattice = LatticePlacer;
    let chain: [&mut dyn PlacementStrategy; 4] = [&mut explicit, &mut grid, &mut scatter, &mut lattice];

    for strategy in chain {
        if !state.has_pending() {
            break;
        }
        log::debug!(
            "{:?} placement: {} rooms pending",
            strategy.kind(),
            state.pending().len()
        );
        strategy.apply(&mut state);
    }

    let layout = state.into_layout();
    let violations = validate_layout(&layout.bounds, &layout.rooms);
    if !violations.is_empty() {
        log::error!("layout failed final validation with {} violation(s)", violations.len());
        return Err(SolveError::InvariantViolated(violations));
    }

    log::info!(
        "layout complete: {} placed, {} unplaced",
        layout.rooms.len(),
        layout.unplaced.len()
    );
    Ok(layout)
}
