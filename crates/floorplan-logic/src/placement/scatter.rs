//! Randomized placement at the requested size.

use super::{PlacementStrategy, PlanState};
use crate::error::PlacementError;
use crate::geometry::{is_free, HouseBounds, Rect};
use crate::layout::{Strategy, UnplacedReason};
use crate::random::RandomSource;

/// Sample top-left corners uniformly from `[0, W - w] × [0, D - h]` until one
/// is clear of `placed`, giving up after `max_attempts`.
pub fn place_randomly(
    source: &mut dyn RandomSource,
    bounds: &HouseBounds,
    width: f64,
    height: f64,
    placed: &[Rect],
    max_attempts: u32,
) -> Result<Rect, PlacementError> {
    if !bounds.fits(width, height) {
        return Err(PlacementError::BoundsInfeasible { width, height });
    }
    for _ in 0..max_attempts {
        let x = source.uniform(0.0, bounds.width - width);
        let y = source.uniform(0.0, bounds.depth - height);
        let candidate = Rect::new(x, y, width, height);
        if is_free(bounds, &candidate, placed) {
            return Ok(candidate);
        }
    }
    Err(PlacementError::Exhausted {
        attempts: max_attempts,
    })
}

/// Places every pending room by bounded random sampling, in request order.
/// Rooms that exhaust their attempts stay pending for the lattice.
pub struct ScatterPlacer<'r> {
    source: &'r mut dyn RandomSource,
}

impl<'r> ScatterPlacer<'r> {
    pub fn new(source: &'r mut dyn RandomSource) -> Self {
        Self { source }
    }
}

impl PlacementStrategy for ScatterPlacer<'_> {
    fn kind(&self) -> Strategy {
        Strategy::Random
    }

    fn apply(&mut self, state: &mut PlanState<'_>) {
        let request = state.request;
        let bounds = request.bounds;
        let max_attempts = state.config.max_attempts;
        let mut placed = state.placed_rects();

        for i in state.pending() {
            let req = &request.rooms[i];
            let (w, h) = req.footprint();
            match place_randomly(&mut *self.source, &bounds, w, h, &placed, max_attempts) {
                Ok(rect) => {
                    placed.push(rect);
                    state.place(i, rect, Strategy::Random);
                }
                Err(e @ PlacementError::Exhausted { .. }) => {
                    log::warn!("{}: {e}; using fallback lattice", req.name);
                }
                Err(e @ PlacementError::BoundsInfeasible { .. }) => {
                    log::warn!("{}: {e}", req.name);
                    state.mark_unplaced(i, UnplacedReason::BoundsInfeasible);
                }
            }
        }
    }
}
