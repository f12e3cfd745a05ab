//! Room types and canonical room requirements.
//!
//! Room type text from the specification service is free-form ("Master
//! Bedroom", "pooja room", "Bath"). It is mapped once onto the closed
//! [`RoomType`] enum; every type-dependent default is then a table lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of room types the solver distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Bedroom,
    Bathroom,
    Kitchen,
    Living,
    Dining,
    Garage,
    Pooja,
    Utility,
    Verandah,
    Other,
}

impl RoomType {
    /// All variants in declaration order.
    pub const ALL: [RoomType; 10] = [
        RoomType::Bedroom,
        RoomType::Bathroom,
        RoomType::Kitchen,
        RoomType::Living,
        RoomType::Dining,
        RoomType::Garage,
        RoomType::Pooja,
        RoomType::Utility,
        RoomType::Verandah,
        RoomType::Other,
    ];

    /// Classify free-form type text by keyword, case-insensitively.
    ///
    /// The first keyword that matches wins, so "bedroom with attached bath"
    /// is a bedroom and "living/dining" is a living room.
    pub fn classify(text: &str) -> RoomType {
        let t = text.to_lowercase();
        if t.contains("bedroom") || t.contains("bed room") {
            RoomType::Bedroom
        } else if t.contains("bath") || t.contains("toilet") || t.contains("washroom") {
            RoomType::Bathroom
        } else if t.contains("kitchen") {
            RoomType::Kitchen
        } else if t.contains("living") || t.contains("lounge") || t.contains("family room") {
            RoomType::Living
        } else if t.contains("dining") {
            RoomType::Dining
        } else if t.contains("garage") || t.contains("carport") {
            RoomType::Garage
        } else if t.contains("pooja") || t.contains("puja") || t.contains("prayer") {
            RoomType::Pooja
        } else if t.contains("utility") || t.contains("laundry") {
            RoomType::Utility
        } else if t.contains("verandah") || t.contains("veranda") || t.contains("balcony") {
            RoomType::Verandah
        } else {
            RoomType::Other
        }
    }

    /// Default footprint `(width, height)` in feet for this type.
    pub fn default_size(self) -> (f64, f64) {
        match self {
            RoomType::Bedroom => (12.0, 12.0),
            RoomType::Bathroom => (8.0, 10.0),
            RoomType::Kitchen => (15.0, 12.0),
            RoomType::Living => (18.0, 15.0),
            RoomType::Dining => (14.0, 12.0),
            RoomType::Garage => (20.0, 20.0),
            RoomType::Pooja => (8.0, 8.0),
            RoomType::Utility => (8.0, 10.0),
            RoomType::Verandah => (10.0, 6.0),
            RoomType::Other => (10.0, 10.0),
        }
    }

    /// Upper-case display label used when a room arrives without a name.
    pub fn label(self) -> &'static str {
        match self {
            RoomType::Bedroom => "BEDROOM",
            RoomType::Bathroom => "BATHROOM",
            RoomType::Kitchen => "KITCHEN",
            RoomType::Living => "LIVING ROOM",
            RoomType::Dining => "DINING ROOM",
            RoomType::Garage => "GARAGE",
            RoomType::Pooja => "POOJA ROOM",
            RoomType::Utility => "UTILITY",
            RoomType::Verandah => "VERANDAH",
            RoomType::Other => "ROOM",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Absolute room geometry supplied by the specification service (ft, top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplicitPosition {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Grid cell request: origin cell plus optional span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridHint {
    pub row: i64,
    pub col: i64,
    pub row_span: i64,
    pub col_span: i64,
}

/// A normalized room request. Built once per layout request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRequirement {
    /// Display name; not guaranteed unique.
    pub name: String,
    pub room_type: RoomType,
    /// Requested width in feet (always at least the configured minimum).
    pub requested_width: f64,
    /// Requested height in feet (always at least the configured minimum).
    pub requested_height: f64,
    pub explicit_position: Option<ExplicitPosition>,
    pub grid_hint: Option<GridHint>,
    pub features: Vec<String>,
}

impl RoomRequirement {
    /// Requirement of the given type at its default size.
    pub fn of_type(name: impl Into<String>, room_type: RoomType) -> Self {
        let (w, h) = room_type.default_size();
        Self::sized(name, room_type, w, h)
    }

    /// Requirement with an explicit requested size.
    pub fn sized(name: impl Into<String>, room_type: RoomType, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            room_type,
            requested_width: width,
            requested_height: height,
            explicit_position: None,
            grid_hint: None,
            features: Vec::new(),
        }
    }

    pub fn with_position(mut self, position: ExplicitPosition) -> Self {
        self.explicit_position = Some(position);
        self
    }

    pub fn with_grid_hint(mut self, hint: GridHint) -> Self {
        self.grid_hint = Some(hint);
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Footprint the room needs: explicit geometry wins over the requested size.
    pub fn footprint(&self) -> (f64, f64) {
        match self.explicit_position {
            Some(p) => (p.width, p.height),
            None => (self.requested_width, self.requested_height),
        }
    }
}
