//! Keyword fallback for when the specification service returns no rooms.
//!
//! Reads room counts and presence flags straight out of the free-text house
//! description ("3 bedroom, 2 bathroom house with a garage") and builds a
//! default-sized requirement list plus a house footprint scaled to it.

use crate::constants::house;
use crate::geometry::HouseBounds;
use crate::layout::LayoutStyle;
use crate::rooms::{RoomRequirement, RoomType};

/// Rooms, bounds and style derived from a description.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionPlan {
    pub rooms: Vec<RoomRequirement>,
    pub bounds: HouseBounds,
    pub style: LayoutStyle,
}

const NUMBER_WORDS: [(&str, u32); 6] = [
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
];

fn parse_count(word: &str) -> Option<u32> {
    word.parse::<u32>().ok().or_else(|| {
        NUMBER_WORDS
            .iter()
            .find(|(w, _)| *w == word)
            .map(|(_, n)| *n)
    })
}

/// Count preceding a keyword, e.g. `"3 bedroom"`, `"two-bathroom"`, `"2 bhk"`.
///
/// Returns the first match in the text.
fn count_before(text: &str, keyword: &str) -> Option<u32> {
    let words: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || c == '-' || c == ',')
        .filter(|w| !w.is_empty())
        .collect();
    words.windows(2).find_map(|pair| {
        if pair[1].starts_with(keyword) {
            parse_count(pair[0]).filter(|n| *n > 0)
        } else {
            None
        }
    })
}

/// Clamp a described count to what a single house plausibly holds.
fn bounded_count(room_type: RoomType, count: u32) -> u32 {
    if count > house::MAX_DESCRIBED_ROOMS_PER_TYPE {
        log::warn!(
            "description asks for {count} {} rooms; using {}",
            room_type.label().to_lowercase(),
            house::MAX_DESCRIBED_ROOMS_PER_TYPE
        );
        house::MAX_DESCRIBED_ROOMS_PER_TYPE
    } else {
        count
    }
}

fn numbered(room_type: RoomType, count: u32) -> impl Iterator<Item = RoomRequirement> {
    (1..=bounded_count(room_type, count))
        .map(move |i| RoomRequirement::of_type(format!("{} {}", room_type.label(), i), room_type))
}

/// Derive a floor plan request from a free-text house description.
///
/// Bedrooms and bathrooms default to one each and are capped at
/// [`house::MAX_DESCRIBED_ROOMS_PER_TYPE`]. Kitchen, living, dining and
/// garage appear only when mentioned.
pub fn plan_from_description(description: &str) -> DescriptionPlan {
    let text = description.to_lowercase();

    let bedrooms = count_before(&text, "bedroom")
        .or_else(|| count_before(&text, "bhk"))
        .unwrap_or(1);
    let bathrooms = count_before(&text, "bathroom")
        .or_else(|| count_before(&text, "bath"))
        .unwrap_or(1);
    let has_kitchen = text.contains("kitchen");
    let has_living = text.contains("living room") || text.contains("living area");
    let has_dining = text.contains("dining room") || text.contains("dining area");
    let has_garage = text.contains("garage");
    let open = text.contains("open floor") || text.contains("open plan") || text.contains("open concept");

    let mut rooms: Vec<RoomRequirement> = numbered(RoomType::Bedroom, bedrooms)
        .chain(numbered(RoomType::Bathroom, bathrooms))
        .collect();
    if has_kitchen {
        rooms.push(RoomRequirement::of_type("KITCHEN", RoomType::Kitchen));
    }
    if has_living {
        rooms.push(RoomRequirement::of_type("LIVING ROOM", RoomType::Living));
    }
    if has_dining {
        rooms.push(RoomRequirement::of_type("DINING ROOM", RoomType::Dining));
    }
    if has_garage {
        rooms.push(RoomRequirement::of_type("GARAGE", RoomType::Garage));
    }

    DescriptionPlan {
        bounds: estimate_bounds(rooms.len()),
        rooms,
        style: if open {
            LayoutStyle::Open
        } else {
            LayoutStyle::Traditional
        },
    }
}

/// House footprint that grows with the room count.
pub fn estimate_bounds(room_count: usize) -> HouseBounds {
    let n = room_count as f64;
    HouseBounds::new(
        house::SYNTH_BASE_WIDTH_FT + house::SYNTH_WIDTH_PER_ROOM_FT * n,
        house::SYNTH_BASE_DEPTH_FT + house::SYNTH_DEPTH_PER_ROOM_FT * n,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(plan: &DescriptionPlan) -> Vec<&str> {
        plan.rooms.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn counts_bedrooms_and_bathrooms() {
        let plan = plan_from_description("Modern 3 bedroom, 2 bathroom home with a kitchen");
        assert_eq!(
            names(&plan),
            vec![
                "BEDROOM 1",
                "BEDROOM 2",
                "BEDROOM 3",
                "BATHROOM 1",
                "BATHROOM 2",
                "KITCHEN"
            ]
        );
    }

    #[test]
    fn absurd_counts_are_capped() {
        let plan = plan_from_description("4000000000 bedroom house with 12 bathrooms");
        let count = |t: RoomType| plan.rooms.iter().filter(|r| r.room_type == t).count();
        assert_eq!(count(RoomType::Bedroom), house::MAX_DESCRIBED_ROOMS_PER_TYPE as usize);
        assert_eq!(count(RoomType::Bathroom), house::MAX_DESCRIBED_ROOMS_PER_TYPE as usize);
        assert_eq!(plan.rooms.last().map(|r| r.name.as_str()), Some("BATHROOM 9"));
    }

    #[test]
    fn number_words_and_hyphens() {
        let plan = plan_from_description("A cozy two-bedroom cottage");
        assert_eq!(plan.rooms.iter().filter(|r| r.room_type == RoomType::Bedroom).count(), 2);
    }

    #[test]
    fn defaults_to_one_bedroom_one_bathroom() {
        let plan = plan_from_description("small cabin");
        assert_eq!(names(&plan), vec!["BEDROOM 1", "BATHROOM 1"]);
        assert_eq!(plan.bounds, HouseBounds::new(80.0, 56.0));
        assert_eq!(plan.style, LayoutStyle::Traditional);
    }

    #[test]
    fn presence_flags_and_open_plan() {
        let plan = plan_from_description(
            "Open concept house with living area, dining room and a two car garage",
        );
        let types: Vec<_> = plan.rooms.iter().map(|r| r.room_type).collect();
        assert!(types.contains(&RoomType::Living));
        assert!(types.contains(&RoomType::Dining));
        assert!(types.contains(&RoomType::Garage));
        assert!(!types.contains(&RoomType::Kitchen));
        assert_eq!(plan.style, LayoutStyle::Open);
    }

    #[test]
    fn rooms_use_type_default_sizes() {
        let plan = plan_from_description("1 bedroom flat with garage");
        let garage = plan.rooms.iter().find(|r| r.name == "GARAGE").unwrap();
        assert_eq!(garage.footprint(), (20.0, 20.0));
    }
}
