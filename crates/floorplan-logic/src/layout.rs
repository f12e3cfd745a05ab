//! Resolved layout types handed to the renderer.

use crate::geometry::{HouseBounds, Rect};
use crate::rooms::{RoomRequirement, RoomType};
use serde::{Deserialize, Serialize};

/// Which strategy produced a placed room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Coordinates copied from the specification.
    Explicit,
    /// Row/column cell of the house grid.
    Grid,
    /// Randomized retry sampling.
    Random,
    /// Fixed-lattice fallback slot. Size and position fidelity are lost.
    Lattice,
}

/// Open-plan vs. walled layout, carried through for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStyle {
    Open,
    #[default]
    Traditional,
    Other(String),
}

impl LayoutStyle {
    /// Anything mentioning "open" is open-plan; blank text is traditional.
    pub fn parse(text: &str) -> LayoutStyle {
        let t = text.trim().to_lowercase();
        if t.contains("open") {
            LayoutStyle::Open
        } else if t.is_empty() || t.contains("traditional") {
            LayoutStyle::Traditional
        } else {
            LayoutStyle::Other(text.trim().to_string())
        }
    }
}

/// A room with resolved geometry in feet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRoom {
    pub name: String,
    pub room_type: RoomType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub features: Vec<String>,
    pub placed_by: Strategy,
}

impl PlacedRoom {
    pub fn from_requirement(req: &RoomRequirement, rect: Rect, placed_by: Strategy) -> Self {
        Self {
            name: req.name.clone(),
            room_type: req.room_type,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            features: req.features.clone(),
            placed_by,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Why a room is missing from the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnplacedReason {
    /// Requested footprint is wider or deeper than the house.
    BoundsInfeasible,
    /// Every strategy failed and no lattice slot was free.
    LatticeExhausted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnplacedRoom {
    pub name: String,
    pub reason: UnplacedReason,
}

/// A validated floor plan.
///
/// `rooms` follows the requirement order. Callers must check
/// [`Layout::is_complete`] before treating the plan as final.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub bounds: HouseBounds,
    pub style: LayoutStyle,
    pub rooms: Vec<PlacedRoom>,
    pub unplaced: Vec<UnplacedRoom>,
}

impl Layout {
    /// No room was left out.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    pub fn unplaced_names(&self) -> Vec<&str> {
        self.unplaced.iter().map(|u| u.name.as_str()).collect()
    }

    pub fn room(&self, name: &str) -> Option<&PlacedRoom> {
        self.rooms.iter().find(|r| r.name == name)
    }

    /// Distinct room types in first-seen order, for the styling-advice service.
    pub fn distinct_room_types(&self) -> Vec<RoomType> {
        let mut seen = Vec::new();
        for r in &self.rooms {
            if !seen.contains(&r.room_type) {
                seen.push(r.room_type);
            }
        }
        seen
    }

    /// Rooms that only the lattice fallback could place.
    pub fn degraded_rooms(&self) -> impl Iterator<Item = &PlacedRoom> {
        self.rooms
            .iter()
            .filter(|r| r.placed_by == Strategy::Lattice)
    }
}
