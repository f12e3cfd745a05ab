//! Placement strategies and the shared in-progress plan they fill.
//!
//! Each strategy sees the same [`PlanState`]: one slot per requirement, in
//! requirement order. A strategy only fills `Pending` slots, so the chain
//! can run them in priority order and stop as soon as nothing is pending.
//!
//! | Strategy | Takes |
//! |----------|-------|
//! | [`explicit::ExplicitPlacer`] | every room, verbatim, if all carry coordinates and they validate |
//! | [`grid::GridPlacer`] | hinted rooms, or all rooms when coordinates are absent or rejected |
//! | [`scatter::ScatterPlacer`] | remaining rooms at their requested size, by bounded random sampling |
//! | [`lattice::LatticePlacer`] | whatever is left, in fixed non-overlapping slots |

pub mod explicit;
pub mod grid;
pub mod lattice;
pub mod scatter;

use crate::config::SolverConfig;
use crate::geometry::Rect;
use crate::layout::{Layout, PlacedRoom, Strategy, UnplacedReason, UnplacedRoom};
use crate::requirements::FloorPlanRequest;

/// A placement strategy in the chain.
pub trait PlacementStrategy {
    fn kind(&self) -> Strategy;

    /// Fill any pending slots this strategy is responsible for.
    fn apply(&mut self, state: &mut PlanState<'_>);
}

/// Resolution state of one requirement.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Pending,
    Placed(PlacedRoom),
    Unplaced(UnplacedReason),
}

/// The layout being built for one request.
#[derive(Debug)]
pub struct PlanState<'a> {
    pub request: &'a FloorPlanRequest,
    pub config: &'a SolverConfig,
    slots: Vec<Slot>,
    /// Explicit coordinates failed validation; later strategies ignore them.
    pub explicit_rejected: bool,
}

impl<'a> PlanState<'a> {
    /// Start a plan. Rooms whose footprint exceeds the house are marked
    /// [`UnplacedReason::BoundsInfeasible`] up front.
    pub fn new(request: &'a FloorPlanRequest, config: &'a SolverConfig) -> Self {
        let slots = request
            .rooms
            .iter()
            .map(|req| {
                let (w, h) = req.footprint();
                if request.bounds.fits(w, h) {
                    Slot::Pending
                } else {
                    log::warn!(
                        "{}: footprint {:.1}x{:.1} ft exceeds house {:.1}x{:.1} ft",
                        req.name,
                        w,
                        h,
                        request.bounds.width,
                        request.bounds.depth
                    );
                    Slot::Unplaced(UnplacedReason::BoundsInfeasible)
                }
            })
            .collect();
        Self {
            request,
            config,
            slots,
            explicit_rejected: false,
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn has_pending(&self) -> bool {
        self.slots.iter().any(|s| matches!(s, Slot::Pending))
    }

    /// Pending requirement indices in requirement order.
    pub fn pending(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, Slot::Pending))
            .map(|(i, _)| i)
            .collect()
    }

    /// Rectangles of every placed room, in requirement order.
    pub fn placed_rects(&self) -> Vec<Rect> {
        self.slots
            .iter()
            .filter_map(|s| match s {
                Slot::Placed(room) => Some(room.rect()),
                _ => None,
            })
            .collect()
    }

    pub fn place(&mut self, index: usize, rect: Rect, placed_by: Strategy) {
        let req = &self.request.rooms[index];
        log::debug!(
            "{} placed by {:?} at ({:.2}, {:.2}) {:.2}x{:.2}",
            req.name,
            placed_by,
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
        self.slots[index] = Slot::Placed(PlacedRoom::from_requirement(req, rect, placed_by));
    }

    /// Return a placed room to pending so a later strategy can retry it.
    pub fn evict(&mut self, index: usize) {
        if matches!(self.slots[index], Slot::Placed(_)) {
            self.slots[index] = Slot::Pending;
        }
    }

    pub fn mark_unplaced(&mut self, index: usize, reason: UnplacedReason) {
        self.slots[index] = Slot::Unplaced(reason);
    }

    /// Collect the plan into a layout, preserving requirement order.
    ///
    /// Slots still pending count as lattice-exhausted.
    pub fn into_layout(self) -> Layout {
        let mut rooms = Vec::new();
        let mut unplaced = Vec::new();
        for (req, slot) in self.request.rooms.iter().zip(self.slots) {
            match slot {
                Slot::Placed(room) => rooms.push(room),
                Slot::Unplaced(reason) => unplaced.push(UnplacedRoom {
                    name: req.name.clone(),
                    reason,
                }),
                Slot::Pending => unplaced.push(UnplacedRoom {
                    name: req.name.clone(),
                    reason: UnplacedReason::LatticeExhausted,
                }),
            }
        }
        Layout {
            bounds: self.request.bounds,
            style: self.request.style.clone(),
            rooms,
            unplaced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::HouseBounds;
    use crate::rooms::{RoomRequirement, RoomType};

    #[test]
    fn oversized_rooms_are_infeasible_up_front() {
        let request = FloorPlanRequest::new(
            HouseBounds::new(60.0, 40.0),
            vec![
                RoomRequirement::of_type("Bed", RoomType::Bedroom),
                RoomRequirement::sized("Hall", RoomType::Other, 70.0, 10.0),
            ],
        );
        let config = SolverConfig::default();
        let state = PlanState::new(&request, &config);
        assert_eq!(state.pending(), vec![0]);
        assert_eq!(
            state.slots()[1],
            Slot::Unplaced(UnplacedReason::BoundsInfeasible)
        );
    }

    #[test]
    fn evict_and_layout_order() {
        let request = FloorPlanRequest::new(
            HouseBounds::new(60.0, 40.0),
            vec![
                RoomRequirement::of_type("A", RoomType::Bedroom),
                RoomRequirement::of_type("B", RoomType::Kitchen),
            ],
        );
        let config = SolverConfig::default();
        let mut state = PlanState::new(&request, &config);
        state.place(1, Rect::new(20.0, 0.0, 15.0, 12.0), Strategy::Random);
        state.place(0, Rect::new(0.0, 0.0, 12.0, 12.0), Strategy::Random);
        assert!(!state.has_pending());
        state.evict(1);
        assert_eq!(state.pending(), vec![1]);
        state.evict(1);
        assert_eq!(state.pending(), vec![1]);

        let layout = state.into_layout();
        assert_eq!(layout.rooms.len(), 1);
        assert_eq!(layout.rooms[0].name, "A");
        assert_eq!(layout.unplaced_names(), vec!["B"]);
    }
}
