//! Pure layout logic for floor plan generation.
//!
//! This crate turns a room-by-room house specification into non-overlapping
//! rectangles inside the house footprint. It does no I/O: functions take
//! plain data and return results, so the renderer, the harness and tests all
//! drive the same code.
//!
//! ```
//! use floorplan_logic::config::SolverConfig;
//! use floorplan_logic::solver::solve_json;
//!
//! let json = r#"{
//!     "house_dimensions": {"width": 60, "depth": 40},
//!     "rooms": [
//!         {"name": "Bedroom", "dimensions": "12x12"},
//!         {"name": "Kitchen", "dimensions": "15 x 12"}
//!     ]
//! }"#;
//! let layout = solve_json(json, &SolverConfig::seeded(1)).unwrap();
//! assert!(layout.is_complete());
//! assert_eq!(layout.rooms.len(), 2);
//! ```
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Solver tunables and their validation |
//! | [`constants`] | Default house size, attempt caps, margins, lattice shape |
//! | [`description`] | Room list synthesized from a free-text house description |
//! | [`error`] | Request-level and per-room error types |
//! | [`geometry`] | Rectangles, house bounds, containment/overlap validation |
//! | [`layout`] | Placed rooms, unplaced reports, the resolved layout |
//! | [`placement`] | Explicit, grid, randomized and lattice placers |
//! | [`random`] | Injectable uniform sampling for the randomized placer |
//! | [`requirements`] | Raw specification schema and normalization |
//! | [`rooms`] | Room types, default sizes, normalized room requirements |
//! | [`solver`] | Strategy chain and final validation |
//! | [`summary`] | Placement counts and coverage of a layout |

pub mod config;
pub mod constants;
pub mod description;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod placement;
pub mod random;
pub mod requirements;
pub mod rooms;
pub mod solver;
pub mod summary;
