//! Specification-service input and the room requirement normalizer.
//!
//! The specification service returns loosely typed JSON: dimension strings
//! such as `"12' x 14'"`, missing sizes, partial coordinates. Everything here
//! is lenient. Malformed pieces fall back to defaults and never fail the
//! request; only the solver decides whether a request is unusable.

use crate::config::SolverConfig;
use crate::constants::{house, placement::MAX_GRID_SIDE};
use crate::description;
use crate::geometry::HouseBounds;
use crate::layout::LayoutStyle;
use crate::rooms::{ExplicitPosition, GridHint, RoomRequirement, RoomType};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

// ── Raw schema ──────────────────────────────────────────────────────────

/// Top-level specification as produced by the external service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorPlanSpec {
    pub rooms: Vec<RawRoom>,
    pub house_dimensions: Option<RawHouseDimensions>,
    pub layout_style: Option<String>,
    pub grid_size: Option<RawGridSize>,
    /// Original free-text description, used only when `rooms` is empty.
    pub description: Option<String>,
}

impl FloorPlanSpec {
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRoom {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<String>,
    pub dimensions: Option<RawDimensions>,
    pub coordinates: Option<RawCoordinates>,
    pub grid_position: Option<RawGridPosition>,
    /// Non-string entries are dropped during normalization.
    pub features: Vec<serde_json::Value>,
}

/// Dimension field: usually text, occasionally a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDimensions {
    Text(String),
    Number(f64),
}

/// Explicit geometry in feet. Missing fields take the service defaults
/// (origin 0, size 10).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCoordinates {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawGridPosition {
    pub row: Option<i64>,
    pub col: Option<i64>,
    pub rowspan: Option<i64>,
    pub colspan: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawHouseDimensions {
    pub width: Option<f64>,
    pub depth: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawGridSize {
    pub rows: Option<i64>,
    pub cols: Option<i64>,
}

// ── Normalized request ──────────────────────────────────────────────────

/// Explicit grid shape requested by the specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: u32,
    pub cols: u32,
}

/// Canonical input to the solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanRequest {
    pub bounds: HouseBounds,
    pub rooms: Vec<RoomRequirement>,
    pub grid: Option<GridSize>,
    pub style: LayoutStyle,
}

impl FloorPlanRequest {
    pub fn new(bounds: HouseBounds, rooms: Vec<RoomRequirement>) -> Self {
        Self {
            bounds,
            rooms,
            grid: None,
            style: LayoutStyle::default(),
        }
    }

    pub fn with_grid(mut self, rows: u32, cols: u32) -> Self {
        self.grid = Some(GridSize { rows, cols });
        self
    }

    pub fn with_style(mut self, style: LayoutStyle) -> Self {
        self.style = style;
        self
    }
}

// ── Dimension parsing ───────────────────────────────────────────────────

/// `W x H` with optional unit marks after the first number. The separator
/// is `x`, `×`, `*` or `by`.
const BY_PATTERN: &str =
    r#"(?i)(\d+(?:\.\d+)?)\s*(?:'|"|’|feet|ft\.?)?\s*(?:x|×|\*|by)\s*(\d+(?:\.\d+)?)"#;
const NUMBER_PATTERN: &str = r"\d+(?:\.\d+)?";

static BY_RE: OnceLock<Option<Regex>> = OnceLock::new();
static NUMBER_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

/// Parse free-text dimensions into `(width, height)` feet.
///
/// Tries a "W x H" pair first, then the first two numbers in order, then a
/// single number as a square. Returns `None` when the text has no numbers.
pub fn parse_dimensions(text: &str) -> Option<(f64, f64)> {
    if let Some(caps) = compiled(&BY_RE, BY_PATTERN).and_then(|re| re.captures(text)) {
        let w = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok());
        let h = caps.get(2).and_then(|m| m.as_str().parse::<f64>().ok());
        if let (Some(w), Some(h)) = (w, h) {
            return Some((w, h));
        }
    }
    let numbers: Vec<f64> = compiled(&NUMBER_RE, NUMBER_PATTERN)?
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .take(2)
        .collect();
    match numbers.as_slice() {
        [] => None,
        [side] => Some((*side, *side)),
        [w, h, ..] => Some((*w, *h)),
    }
}

/// Requested size for a room: parsed text when it clears the floor on both
/// axes, otherwise the type default.
pub fn requested_size(
    dimensions: Option<&RawDimensions>,
    room_type: RoomType,
    min_dimension: f64,
) -> (f64, f64) {
    let parsed = match dimensions {
        Some(RawDimensions::Text(text)) => parse_dimensions(text),
        Some(RawDimensions::Number(n)) => Some((*n, *n)),
        None => None,
    };
    match parsed {
        Some((w, h)) if w.is_finite() && h.is_finite() && w >= min_dimension && h >= min_dimension => {
            (w, h)
        }
        _ => room_type.default_size(),
    }
}

// ── Normalization ───────────────────────────────────────────────────────

fn normalize_coordinates(raw: &RawCoordinates) -> Option<ExplicitPosition> {
    let pos = ExplicitPosition {
        x: raw.x.unwrap_or(0.0),
        y: raw.y.unwrap_or(0.0),
        width: raw.width.unwrap_or(10.0),
        height: raw.height.unwrap_or(10.0),
    };
    let finite = [pos.x, pos.y, pos.width, pos.height]
        .iter()
        .all(|v| v.is_finite());
    if finite && pos.width > 0.0 && pos.height > 0.0 {
        Some(pos)
    } else {
        None
    }
}

fn normalize_grid_position(raw: &RawGridPosition) -> GridHint {
    GridHint {
        row: raw.row.unwrap_or(0),
        col: raw.col.unwrap_or(0),
        row_span: raw.rowspan.unwrap_or(1),
        col_span: raw.colspan.unwrap_or(1),
    }
}

/// Normalize one raw room. `type_counts` numbers unnamed rooms per type.
pub fn normalize_room(
    raw: &RawRoom,
    min_dimension: f64,
    type_counts: &mut HashMap<RoomType, u32>,
) -> RoomRequirement {
    let type_text = raw.room_type.as_deref().unwrap_or("");
    let mut room_type = RoomType::classify(type_text);
    if room_type == RoomType::Other {
        // Services sometimes leave `type` blank and put it in the name.
        if let Some(name) = raw.name.as_deref() {
            room_type = RoomType::classify(name);
        }
    }

    let count = type_counts.entry(room_type).or_insert(0);
    *count += 1;
    let name = match raw.name.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => format!("{} {}", room_type.label(), count),
    };

    let (requested_width, requested_height) =
        requested_size(raw.dimensions.as_ref(), room_type, min_dimension);

    let explicit_position = raw.coordinates.as_ref().and_then(|c| {
        let pos = normalize_coordinates(c);
        if pos.is_none() {
            log::warn!("{name}: ignoring unusable coordinates {c:?}");
        }
        pos
    });

    let features = raw
        .features
        .iter()
        .filter_map(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    RoomRequirement {
        name,
        room_type,
        requested_width,
        requested_height,
        explicit_position,
        grid_hint: raw.grid_position.as_ref().map(normalize_grid_position),
        features,
    }
}

/// Turn an untrusted specification into a solver request.
///
/// Missing house dimensions default to 60×40 ft. An empty room list with a
/// description falls back to keyword extraction. Non-positive dimensions are
/// passed through so the solver can reject them.
pub fn normalize_spec(spec: &FloorPlanSpec, config: &SolverConfig) -> FloorPlanRequest {
    let style = spec
        .layout_style
        .as_deref()
        .map(LayoutStyle::parse)
        .unwrap_or_default();

    let grid = spec.grid_size.and_then(|g| match (g.rows, g.cols) {
        (Some(rows), Some(cols)) if rows > 0 && cols > 0 => {
            let side_max = i64::from(MAX_GRID_SIDE);
            if rows > side_max || cols > side_max {
                log::warn!("grid {rows}x{cols} exceeds {MAX_GRID_SIDE} per side; clamping");
            }
            Some(GridSize {
                rows: rows.min(side_max) as u32,
                cols: cols.min(side_max) as u32,
            })
        }
        _ => None,
    });

    let explicit_bounds = spec.house_dimensions.map(|d| {
        HouseBounds::new(
            d.width.unwrap_or(house::DEFAULT_WIDTH_FT),
            d.depth.unwrap_or(house::DEFAULT_DEPTH_FT),
        )
    });

    if spec.rooms.is_empty() {
        if let Some(text) = spec.description.as_deref().filter(|t| !t.trim().is_empty()) {
            log::info!("specification has no rooms; deriving them from the description");
            let plan = description::plan_from_description(text);
            let style = if spec.layout_style.is_some() {
                style
            } else {
                plan.style
            };
            return FloorPlanRequest {
                bounds: explicit_bounds.unwrap_or(plan.bounds),
                rooms: plan.rooms,
                grid,
                style,
            };
        }
    }

    let mut type_counts = HashMap::new();
    let rooms = spec
        .rooms
        .iter()
        .map(|r| normalize_room(r, config.min_dimension_ft, &mut type_counts))
        .collect();

    FloorPlanRequest {
        bounds: explicit_bounds
            .unwrap_or_else(|| HouseBounds::new(house::DEFAULT_WIDTH_FT, house::DEFAULT_DEPTH_FT)),
        rooms,
        grid,
        style,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_room(name: &str, room_type: &str, dims: Option<&str>) -> RawRoom {
        RawRoom {
            name: Some(name.to_string()),
            room_type: Some(room_type.to_string()),
            dimensions: dims.map(|d| RawDimensions::Text(d.to_string())),
            ..RawRoom::default()
        }
    }

    #[test]
    fn parse_w_x_h_variants() {
        assert_eq!(parse_dimensions("12x14"), Some((12.0, 14.0)));
        assert_eq!(parse_dimensions("12 X 14"), Some((12.0, 14.0)));
        assert_eq!(parse_dimensions("12' x 14'"), Some((12.0, 14.0)));
        assert_eq!(parse_dimensions("12 ft x 14 ft"), Some((12.0, 14.0)));
        assert_eq!(parse_dimensions("10.5 by 9"), Some((10.5, 9.0)));
    }

    #[test]
    fn parse_prefers_by_pair_over_leading_numbers() {
        assert_eq!(
            parse_dimensions("room 2 on floor 1, 16 x 12"),
            Some((16.0, 12.0))
        );
    }

    #[test]
    fn parse_accepts_unicode_times_and_feet_marks() {
        assert_eq!(parse_dimensions("13×11"), Some((13.0, 11.0)));
        assert_eq!(parse_dimensions("9 feet * 7"), Some((9.0, 7.0)));
    }

    #[test]
    fn parse_falls_back_to_first_two_numbers() {
        assert_eq!(parse_dimensions("width 11, length 13"), Some((11.0, 13.0)));
    }

    #[test]
    fn parse_single_number_is_square() {
        assert_eq!(parse_dimensions("about 9 feet"), Some((9.0, 9.0)));
    }

    #[test]
    fn parse_without_numbers_fails() {
        assert_eq!(parse_dimensions("spacious"), None);
        assert_eq!(parse_dimensions(""), None);
    }

    #[test]
    fn small_or_missing_dimensions_use_type_default() {
        let bath = RawDimensions::Text("4x6".into());
        assert_eq!(
            requested_size(Some(&bath), RoomType::Bathroom, 5.0),
            (8.0, 10.0)
        );
        assert_eq!(requested_size(None, RoomType::Kitchen, 5.0), (15.0, 12.0));
        let junk = RawDimensions::Text("large".into());
        assert_eq!(requested_size(Some(&junk), RoomType::Other, 5.0), (10.0, 10.0));
        assert_eq!(
            requested_size(Some(&RawDimensions::Number(11.0)), RoomType::Bedroom, 5.0),
            (11.0, 11.0)
        );
    }

    #[test]
    fn normalize_room_names_unnamed_rooms_by_type() {
        let mut counts = HashMap::new();
        let unnamed = RawRoom {
            room_type: Some("bedroom".into()),
            ..RawRoom::default()
        };
        let first = normalize_room(&unnamed, 5.0, &mut counts);
        let second = normalize_room(&unnamed, 5.0, &mut counts);
        assert_eq!(first.name, "BEDROOM 1");
        assert_eq!(second.name, "BEDROOM 2");
    }

    #[test]
    fn normalize_room_keeps_string_features_only() {
        let mut counts = HashMap::new();
        let mut raw = raw_room("Master", "bedroom", Some("14x12"));
        raw.features = vec![
            serde_json::json!("window"),
            serde_json::json!(3),
            serde_json::json!("closet"),
        ];
        let req = normalize_room(&raw, 5.0, &mut counts);
        assert_eq!(req.features, vec!["window", "closet"]);
        assert_eq!((req.requested_width, req.requested_height), (14.0, 12.0));
    }

    #[test]
    fn normalize_room_type_from_name_when_type_blank() {
        let mut counts = HashMap::new();
        let raw = raw_room("Guest Bathroom", "", None);
        assert_eq!(normalize_room(&raw, 5.0, &mut counts).room_type, RoomType::Bathroom);
    }

    #[test]
    fn coordinates_default_missing_fields_and_drop_degenerate() {
        let partial = RawCoordinates {
            x: Some(4.0),
            ..RawCoordinates::default()
        };
        assert_eq!(
            normalize_coordinates(&partial),
            Some(ExplicitPosition {
                x: 4.0,
                y: 0.0,
                width: 10.0,
                height: 10.0
            })
        );
        let flat = RawCoordinates {
            width: Some(0.0),
            ..RawCoordinates::default()
        };
        assert_eq!(normalize_coordinates(&flat), None);
    }

    #[test]
    fn normalize_spec_from_json() {
        let json = r#"{
            "rooms": [
                {"name": "Master Bedroom", "type": "bedroom", "dimensions": "14 x 12",
                 "coordinates": {"x": 0, "y": 0, "width": 14, "height": 12},
                 "grid_position": {"row": 0, "col": 1, "rowspan": 2},
                 "features": ["window", "closet"]},
                {"name": "Kitchen", "type": "kitchen", "dimensions": null}
            ],
            "house_dimensions": {"width": 50, "depth": 35},
            "layout_style": "open floor plan",
            "grid_size": {"rows": 3, "cols": 4}
        }"#;
        let spec = FloorPlanSpec::from_json(json).unwrap();
        let req = normalize_spec(&spec, &SolverConfig::default());
        assert_eq!(req.bounds, HouseBounds::new(50.0, 35.0));
        assert_eq!(req.style, LayoutStyle::Open);
        assert_eq!(req.grid, Some(GridSize { rows: 3, cols: 4 }));
        assert_eq!(req.rooms.len(), 2);
        let master = &req.rooms[0];
        assert_eq!(
            master.grid_hint,
            Some(GridHint {
                row: 0,
                col: 1,
                row_span: 2,
                col_span: 1
            })
        );
        assert!(master.explicit_position.is_some());
        assert_eq!(req.rooms[1].footprint(), (15.0, 12.0));
    }

    #[test]
    fn missing_house_dimensions_default() {
        let spec = FloorPlanSpec {
            rooms: vec![raw_room("Bed", "bedroom", None)],
            ..FloorPlanSpec::default()
        };
        let req = normalize_spec(&spec, &SolverConfig::default());
        assert_eq!(req.bounds, HouseBounds::new(60.0, 40.0));
        assert_eq!(req.style, LayoutStyle::Traditional);
        assert_eq!(req.grid, None);
    }

    #[test]
    fn non_positive_grid_size_ignored() {
        let spec = FloorPlanSpec {
            rooms: vec![raw_room("Bed", "bedroom", None)],
            grid_size: Some(RawGridSize {
                rows: Some(0),
                cols: Some(3),
            }),
            ..FloorPlanSpec::default()
        };
        assert_eq!(normalize_spec(&spec, &SolverConfig::default()).grid, None);
    }

    #[test]
    fn huge_grid_size_is_clamped() {
        let json = r#"{
            "rooms": [{"name": "Bed", "type": "bedroom"}],
            "grid_size": {"rows": 4294967295, "cols": 4294967295}
        }"#;
        let spec = FloorPlanSpec::from_json(json).unwrap();
        let req = normalize_spec(&spec, &SolverConfig::default());
        assert_eq!(
            req.grid,
            Some(GridSize {
                rows: MAX_GRID_SIDE,
                cols: MAX_GRID_SIDE
            })
        );
    }

    #[test]
    fn empty_rooms_use_description() {
        let spec = FloorPlanSpec {
            description: Some("A 2 bedroom house with a kitchen and garage".into()),
            ..FloorPlanSpec::default()
        };
        let req = normalize_spec(&spec, &SolverConfig::default());
        let names: Vec<_> = req.rooms.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["BEDROOM 1", "BEDROOM 2", "BATHROOM 1", "KITCHEN", "GARAGE"]
        );
        assert_eq!(req.bounds, HouseBounds::new(110.0, 80.0));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(FloorPlanSpec::from_json("{rooms: [").is_err());
    }
}
