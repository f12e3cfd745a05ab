//! Explicit-coordinate placement: trust the specification's geometry.

use super::{PlacementStrategy, PlanState};
use crate::geometry::{validate_layout, Rect};
use crate::layout::{PlacedRoom, Strategy};
use crate::requirements::FloorPlanRequest;

/// Copies coordinates verbatim when every room carries them.
///
/// The set is validated as a whole. Any violation rejects all of it and sets
/// [`PlanState::explicit_rejected`], so the grid takes over every room.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExplicitPlacer;

impl ExplicitPlacer {
    /// Every room in the request has coordinates.
    pub fn applies(request: &FloorPlanRequest) -> bool {
        !request.rooms.is_empty() && request.rooms.iter().all(|r| r.explicit_position.is_some())
    }
}

impl PlacementStrategy for ExplicitPlacer {
    fn kind(&self) -> Strategy {
        Strategy::Explicit
    }

    fn apply(&mut self, state: &mut PlanState<'_>) {
        if !Self::applies(state.request) {
            return;
        }

        let candidates: Vec<(usize, Rect)> = state
            .pending()
            .into_iter()
            .filter_map(|i| {
                state.request.rooms[i]
                    .explicit_position
                    .map(|p| (i, Rect::new(p.x, p.y, p.width, p.height)))
            })
            .collect();

        let rooms: Vec<PlacedRoom> = candidates
            .iter()
            .map(|(i, rect)| {
                PlacedRoom::from_requirement(&state.request.rooms[*i], *rect, Strategy::Explicit)
            })
            .collect();

        let violations = validate_layout(&state.request.bounds, &rooms);
        if !violations.is_empty() {
            for v in &violations {
                log::warn!("explicit coordinates rejected: {v}");
            }
            log::warn!(
                "{} violation(s) in explicit coordinates; falling back to grid placement",
                violations.len()
            );
            state.explicit_rejected = true;
            return;
        }

        log::info!("using explicit coordinates for {} rooms", candidates.len());
        for (i, rect) in candidates {
            state.place(i, rect, Strategy::Explicit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfig;
    use crate::geometry::HouseBounds;
    use crate::placement::Slot;
    use crate::rooms::{ExplicitPosition, RoomRequirement, RoomType};

    fn at(name: &str, x: f64, y: f64, w: f64, h: f64) -> RoomRequirement {
        RoomRequirement::of_type(name, RoomType::Bedroom).with_position(ExplicitPosition {
            x,
            y,
            width: w,
            height: h,
        })
    }

    #[test]
    fn consistent_coordinates_are_copied_verbatim() {
        let request = FloorPlanRequest::new(
            HouseBounds::new(60.0, 40.0),
            vec![at("A", 0.0, 0.0, 12.5, 10.0), at("B", 12.5, 0.0, 8.0, 10.0)],
        );
        let config = SolverConfig::default();
        let mut state = PlanState::new(&request, &config);
        ExplicitPlacer.apply(&mut state);

        assert!(!state.has_pending());
        assert!(!state.explicit_rejected);
        match &state.slots()[1] {
            Slot::Placed(room) => {
                assert_eq!(room.rect(), Rect::new(12.5, 0.0, 8.0, 10.0));
                assert_eq!(room.placed_by, Strategy::Explicit);
            }
            other => panic!("expected placed, got {other:?}"),
        }
    }

    #[test]
    fn overlapping_coordinates_reject_the_whole_set() {
        let request = FloorPlanRequest::new(
            HouseBounds::new(60.0, 40.0),
            vec![at("A", 0.0, 0.0, 12.0, 12.0), at("B", 6.0, 6.0, 12.0, 12.0)],
        );
        let config = SolverConfig::default();
        let mut state = PlanState::new(&request, &config);
        ExplicitPlacer.apply(&mut state);

        assert!(state.explicit_rejected);
        assert_eq!(state.pending(), vec![0, 1]);
    }

    #[test]
    fn partial_coordinates_do_not_apply() {
        let request = FloorPlanRequest::new(
            HouseBounds::new(60.0, 40.0),
            vec![
                at("A", 0.0, 0.0, 12.0, 12.0),
                RoomRequirement::of_type("B", RoomType::Kitchen),
            ],
        );
        assert!(!ExplicitPlacer::applies(&request));
        let config = SolverConfig::default();
        let mut state = PlanState::new(&request, &config);
        ExplicitPlacer.apply(&mut state);
        assert_eq!(state.pending(), vec![0, 1]);
        assert!(!state.explicit_rejected);
    }
}
