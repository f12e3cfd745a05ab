//! Last-resort placement in a fixed lattice of slots.
//!
//! The lattice divides the house into rows×cols cells and centers one slot
//! per cell, scaled by the configured fill fraction. Slots are strictly
//! smaller than their cells, so no two slots touch and every slot is inside
//! the house.

use super::{PlacementStrategy, PlanState};
use crate::config::SolverConfig;
use crate::geometry::{is_free, HouseBounds, Rect};
use crate::layout::{Strategy, UnplacedReason};

#[derive(Debug, Clone, PartialEq)]
pub struct FixedLattice {
    slots: Vec<Rect>,
}

impl FixedLattice {
    /// Lattice over `bounds` with slots in row-major order.
    pub fn over(bounds: &HouseBounds, config: &SolverConfig) -> Self {
        let rows = config.lattice_rows.max(1);
        let cols = config.lattice_cols.max(1);
        let cell_w = bounds.width / cols as f64;
        let cell_h = bounds.depth / rows as f64;
        let slot_w = cell_w * config.lattice_slot_fill;
        let slot_h = cell_h * config.lattice_slot_fill;
        let pad_x = (cell_w - slot_w) / 2.0;
        let pad_y = (cell_h - slot_h) / 2.0;

        let slots = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .map(|(r, c)| {
                bounds.clip(&Rect::new(
                    c as f64 * cell_w + pad_x,
                    r as f64 * cell_h + pad_y,
                    slot_w,
                    slot_h,
                ))
            })
            .collect();
        Self { slots }
    }

    pub fn slots(&self) -> &[Rect] {
        &self.slots
    }
}

/// Assigns pending rooms to lattice slots in request order, skipping slots
/// that collide with rooms already placed. Rooms left over when the slots
/// run out are reported as [`UnplacedReason::LatticeExhausted`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LatticePlacer;

impl PlacementStrategy for LatticePlacer {
    fn kind(&self) -> Strategy {
        Strategy::Lattice
    }

    fn apply(&mut self, state: &mut PlanState<'_>) {
        let pending = state.pending();
        if pending.is_empty() {
            return;
        }
        let bounds = state.request.bounds;
        let lattice = FixedLattice::over(&bounds, state.config);
        let mut placed = state.placed_rects();
        let mut free_slots = lattice.slots().iter().copied();

        for i in pending {
            let slot = free_slots.find(|slot| is_free(&bounds, slot, &placed));
            match slot {
                Some(rect) => {
                    log::warn!("{} placed in fallback lattice slot", state.request.rooms[i].name);
                    placed.push(rect);
                    state.place(i, rect, Strategy::Lattice);
                }
                None => {
                    log::warn!("{}: fallback lattice exhausted", state.request.rooms[i].name);
                    state.mark_unplaced(i, UnplacedReason::LatticeExhausted);
                }
            }
        }
    }
}
