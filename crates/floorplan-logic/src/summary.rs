//! Per-layout statistics for reports and the harness.

use crate::layout::{Layout, Strategy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSummary {
    pub placed: usize,
    pub unplaced: usize,
    pub explicit: usize,
    pub grid: usize,
    pub random: usize,
    pub lattice: usize,
    /// Sum of placed room areas, sq ft.
    pub room_area: f64,
    /// `room_area` over house area, 0..=1 for a valid layout.
    pub coverage: f64,
}

impl LayoutSummary {
    pub fn count(&self, strategy: Strategy) -> usize {
        match strategy {
            Strategy::Explicit => self.explicit,
            Strategy::Grid => self.grid,
            Strategy::Random => self.random,
            Strategy::Lattice => self.lattice,
        }
    }
}

pub fn summarize(layout: &Layout) -> LayoutSummary {
    let mut summary = LayoutSummary {
        placed: layout.rooms.len(),
        unplaced: layout.unplaced.len(),
        explicit: 0,
        grid: 0,
        random: 0,
        lattice: 0,
        room_area: 0.0,
        coverage: 0.0,
    };
    for room in &layout.rooms {
        match room.placed_by {
            Strategy::Explicit => summary.explicit += 1,
            Strategy::Grid => summary.grid += 1,
            Strategy::Random => summary.random += 1,
            Strategy::Lattice => summary.lattice += 1,
        }
        summary.room_area += room.width * room.height;
    }
    let house_area = layout.bounds.area();
    if house_area > 0.0 {
        summary.coverage = summary.room_area / house_area;
    }
    summary
}
