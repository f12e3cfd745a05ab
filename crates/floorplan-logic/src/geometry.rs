//! Geometry primitives and layout validation.
//!
//! Pure functions over plain rectangles: containment in the house bounds and
//! pairwise overlap. No placement logic lives here, so every strategy and the
//! final layout check share one definition of "valid".

use crate::constants::EPSILON;
use crate::layout::PlacedRoom;
use serde::{Deserialize, Serialize};
use std::fmt;

/// House footprint in feet. Origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseBounds {
    pub width: f64,
    pub depth: f64,
}

impl HouseBounds {
    pub fn new(width: f64, depth: f64) -> Self {
        Self { width, depth }
    }

    /// Both sides strictly positive and finite.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.depth.is_finite() && self.width > 0.0 && self.depth > 0.0
    }

    pub fn area(&self) -> f64 {
        self.width * self.depth
    }

    /// Whether a footprint of this size can fit at all, ignoring other rooms.
    pub fn fits(&self, width: f64, height: f64) -> bool {
        width > 0.0 && height > 0.0 && width <= self.width && height <= self.depth
    }

    /// Exact containment. No tolerance: a room a hair past a wall is outside.
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= 0.0 && r.y >= 0.0 && r.right() <= self.width && r.bottom() <= self.depth
    }

    /// Pull the far edges of `r` back inside the walls. Cells computed from
    /// the bounds can round a few ulps past the wall; origins are untouched.
    pub fn clip(&self, r: &Rect) -> Rect {
        Rect::new(
            r.x,
            r.y,
            extent_within(r.x, r.width, self.width),
            extent_within(r.y, r.height, self.depth),
        )
    }
}

/// Largest extent no greater than `extent` with `origin + extent <= limit`.
fn extent_within(origin: f64, extent: f64, limit: f64) -> f64 {
    let mut e = extent.min(limit - origin);
    while e > 0.0 && origin + e > limit {
        e = f64::from_bits(e.to_bits() - 1);
    }
    e
}

/// Axis-aligned rectangle in feet, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Interiors intersect with positive area. Shared edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let overlap_x = self.x < other.right() - EPSILON && other.x < self.right() - EPSILON;
        let overlap_y = self.y < other.bottom() - EPSILON && other.y < self.bottom() - EPSILON;
        overlap_x && overlap_y
    }

    /// Shrink by `margin` on every side. Returns `self` unchanged when the
    /// inset would leave no interior.
    pub fn inset(&self, margin: f64) -> Rect {
        if margin <= 0.0 || self.width <= 2.0 * margin || self.height <= 2.0 * margin {
            return *self;
        }
        Rect::new(
            self.x + margin,
            self.y + margin,
            self.width - 2.0 * margin,
            self.height - 2.0 * margin,
        )
    }
}

/// A broken layout invariant. Indices refer to the checked room slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Violation {
    OutOfBounds {
        index: usize,
        room: String,
    },
    Overlap {
        first: usize,
        second: usize,
        room_a: String,
        room_b: String,
    },
}

impl Violation {
    /// Index of the room that should yield: the out-of-bounds room, or the
    /// later room of an overlapping pair.
    pub fn offender(&self) -> usize {
        match self {
            Violation::OutOfBounds { index, .. } => *index,
            Violation::Overlap { second, .. } => *second,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::OutOfBounds { room, .. } => write!(f, "{room} extends outside the house"),
            Violation::Overlap { room_a, room_b, .. } => write!(f, "{room_a} overlaps {room_b}"),
        }
    }
}

// ── Checks ──────────────────────────────────────────────────────────────

/// Rooms that are not fully inside the house.
pub fn check_rooms_within_bounds(bounds: &HouseBounds, rooms: &[PlacedRoom]) -> Vec<Violation> {
    rooms
        .iter()
        .enumerate()
        .filter(|(_, r)| !bounds.contains(&r.rect()))
        .map(|(index, r)| Violation::OutOfBounds {
            index,
            room: r.name.clone(),
        })
        .collect()
}

/// Every overlapping pair, O(n²) over the room list.
pub fn check_room_overlaps(rooms: &[PlacedRoom]) -> Vec<Violation> {
    let mut errors = Vec::new();
    for i in 0..rooms.len() {
        let a = rooms[i].rect();
        for j in (i + 1)..rooms.len() {
            if a.overlaps(&rooms[j].rect()) {
                errors.push(Violation::Overlap {
                    first: i,
                    second: j,
                    room_a: rooms[i].name.clone(),
                    room_b: rooms[j].name.clone(),
                });
            }
        }
    }
    errors
}

/// Run containment and overlap checks and return combined results.
pub fn validate_layout(bounds: &HouseBounds, rooms: &[PlacedRoom]) -> Vec<Violation> {
    let mut all = check_rooms_within_bounds(bounds, rooms);
    all.extend(check_room_overlaps(rooms));
    all
}

/// True when `rect` is contained and clear of every rectangle in `placed`.
pub fn is_free(bounds: &HouseBounds, rect: &Rect, placed: &[Rect]) -> bool {
    bounds.contains(rect) && placed.iter().all(|p| !rect.overlaps(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Strategy;
    use crate::rooms::RoomType;

    fn make_room(name: &str, x: f64, y: f64, w: f64, h: f64) -> PlacedRoom {
        PlacedRoom {
            name: name.to_string(),
            room_type: RoomType::Bedroom,
            x,
            y,
            width: w,
            height: h,
            features: Vec::new(),
            placed_by: Strategy::Explicit,
        }
    }

    #[test]
    fn test_valid_rooms_no_errors() {
        let bounds = HouseBounds::new(60.0, 40.0);
        let rooms = vec![
            make_room("A", 0.0, 0.0, 10.0, 8.0),
            make_room("B", 10.0, 0.0, 10.0, 8.0),
        ];
        assert!(validate_layout(&bounds, &rooms).is_empty());
    }

    #[test]
    fn test_room_outside_bounds() {
        let bounds = HouseBounds::new(60.0, 40.0);
        let rooms = vec![make_room("Wide", 0.0, 0.0, 70.0, 10.0)];
        let errs = check_rooms_within_bounds(&bounds, &rooms);
        assert_eq!(errs.len(), 1);
        assert!(matches!(&errs[0], Violation::OutOfBounds { room, .. } if room == "Wide"));
    }

    #[test]
    fn test_negative_origin_is_out_of_bounds() {
        let bounds = HouseBounds::new(60.0, 40.0);
        let rooms = vec![make_room("Neg", -1.0, 5.0, 10.0, 10.0)];
        assert_eq!(check_rooms_within_bounds(&bounds, &rooms).len(), 1);
    }

    #[test]
    fn test_room_flush_with_far_edge_is_contained() {
        let bounds = HouseBounds::new(60.0, 40.0);
        let rooms = vec![make_room("Corner", 48.0, 28.0, 12.0, 12.0)];
        assert!(check_rooms_within_bounds(&bounds, &rooms).is_empty());
    }

    #[test]
    fn test_overlapping_rooms() {
        let rooms = vec![
            make_room("A", 0.0, 0.0, 10.0, 10.0),
            make_room("B", 5.0, 5.0, 10.0, 10.0),
        ];
        let errs = check_room_overlaps(&rooms);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].offender(), 1);
        assert_eq!(errs[0].to_string(), "A overlaps B");
    }

    #[test]
    fn test_no_overlap_adjacent() {
        let rooms = vec![
            make_room("A", 0.0, 0.0, 10.0, 10.0),
            make_room("B", 10.0, 0.0, 10.0, 10.0),
            make_room("C", 0.0, 10.0, 10.0, 10.0),
        ];
        assert!(check_room_overlaps(&rooms).is_empty());
    }

    #[test]
    fn test_overlap_on_one_axis_only_is_fine() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 20.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_contained_room_overlaps() {
        let outer = Rect::new(0.0, 0.0, 20.0, 20.0);
        let inner = Rect::new(5.0, 5.0, 2.0, 2.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_inset_shrinks_each_side() {
        let r = Rect::new(0.0, 0.0, 10.0, 8.0).inset(0.25);
        assert_eq!(r, Rect::new(0.25, 0.25, 9.5, 7.5));
        let tiny = Rect::new(0.0, 0.0, 0.4, 0.4);
        assert_eq!(tiny.inset(0.25), tiny);
    }

    #[test]
    fn test_bounds_validity() {
        assert!(HouseBounds::new(60.0, 40.0).is_valid());
        assert!(!HouseBounds::new(0.0, 40.0).is_valid());
        assert!(!HouseBounds::new(60.0, -1.0).is_valid());
        assert!(!HouseBounds::new(f64::NAN, 40.0).is_valid());
    }

    #[test]
    fn test_containment_is_exact() {
        let bounds = HouseBounds::new(60.0, 40.0);
        assert!(!bounds.contains(&Rect::new(-5e-7, 0.0, 10.0, 10.0)));
        assert!(!bounds.contains(&Rect::new(50.0, 0.0, 10.0 + 5e-7, 10.0)));
        assert!(bounds.contains(&Rect::new(0.0, 0.0, 60.0, 40.0)));
        assert!(!bounds.fits(60.0000004, 10.0));
        assert!(bounds.fits(60.0, 40.0));
    }

    #[test]
    fn test_clip_pulls_far_edge_inside() {
        let bounds = HouseBounds::new(0.3, 1.0);
        let r = bounds.clip(&Rect::new(0.1, 0.0, 0.2 + 1e-15, 1.0));
        assert!(r.right() <= 0.3);
        assert!(bounds.contains(&r));
        let inside = Rect::new(1.0, 1.0, 2.0, 2.0);
        assert_eq!(HouseBounds::new(10.0, 10.0).clip(&inside), inside);
    }

    #[test]
    fn test_is_free() {
        let bounds = HouseBounds::new(30.0, 30.0);
        let placed = vec![Rect::new(0.0, 0.0, 10.0, 10.0)];
        assert!(is_free(&bounds, &Rect::new(10.0, 0.0, 10.0, 10.0), &placed));
        assert!(!is_free(&bounds, &Rect::new(9.0, 0.0, 10.0, 10.0), &placed));
        assert!(!is_free(&bounds, &Rect::new(25.0, 0.0, 10.0, 10.0), &placed));
    }
}
