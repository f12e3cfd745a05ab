//! Floor Plan Headless Layout Harness
//!
//! Validates the layout solver against sample specifications and seeded
//! sweeps. Runs entirely in-process, no rendering.
//!
//! Usage:
//!   cargo run -p floorplan-simtest
//!   cargo run -p floorplan-simtest -- --verbose
//!   cargo run -p floorplan-simtest -- --spec path/to/spec.json [--seed 7]

use floorplan_logic::config::SolverConfig;
use floorplan_logic::geometry::{validate_layout, HouseBounds};
use floorplan_logic::layout::{Layout, Strategy, UnplacedReason};
use floorplan_logic::requirements::{FloorPlanRequest, FloorPlanSpec};
use floorplan_logic::rooms::{ExplicitPosition, GridHint, RoomRequirement, RoomType};
use floorplan_logic::solver::{solve, solve_spec};
use floorplan_logic::summary::{summarize, LayoutSummary};
use serde::{Deserialize, Serialize};

// ── Sample specifications ───────────────────────────────────────────────
const SAMPLE_SPECS_JSON: &str = include_str!("../../../data/sample_specs.json");

#[derive(Debug, Deserialize)]
struct SampleSpec {
    label: String,
    expect_complete: bool,
    spec: FloorPlanSpec,
}

/// Output of `--spec`: the resolved layout plus its summary.
#[derive(Debug, Serialize)]
struct SpecReport<'a> {
    layout: &'a Layout,
    summary: LayoutSummary,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let seed = arg_value(&args, "--seed").and_then(|s| s.parse::<u64>().ok());

    if let Some(path) = arg_value(&args, "--spec") {
        std::process::exit(solve_spec_file(&path, seed));
    }

    println!("=== Floor Plan Layout Harness ===\n");

    let mut results = Vec::new();

    // 1. Sample specifications
    results.extend(validate_sample_specs(verbose));

    // 2. Seeded invariant sweep
    results.extend(validate_seed_sweep(verbose));

    // 3. Determinism
    results.extend(validate_determinism(verbose));

    // 4. Grid clamping
    results.extend(validate_grid_clamping(verbose));

    // 5. Fallback lattice under crowding
    results.extend(validate_fallback(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── --spec mode ─────────────────────────────────────────────────────────

fn solve_spec_file(path: &str, seed: Option<u64>) -> i32 {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("cannot read {}: {}", path, e);
            return 2;
        }
    };
    let spec = match FloorPlanSpec::from_json(&text) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("invalid specification: {}", e);
            return 2;
        }
    };
    let config = SolverConfig {
        seed,
        ..SolverConfig::default()
    };
    let layout = match solve_spec(&spec, &config) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("layout failed: {}", e);
            return 1;
        }
    };
    let report = SpecReport {
        layout: &layout,
        summary: summarize(&layout),
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("cannot serialize layout: {}", e);
            return 1;
        }
    }
    if layout.is_complete() {
        0
    } else {
        for u in &layout.unplaced {
            eprintln!("unplaced: {} ({:?})", u.name, u.reason);
        }
        3
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn scenario_request() -> FloorPlanRequest {
    FloorPlanRequest::new(
        HouseBounds::new(60.0, 40.0),
        vec![
            RoomRequirement::sized("Bedroom 1", RoomType::Bedroom, 12.0, 12.0),
            RoomRequirement::sized("Bedroom 2", RoomType::Bedroom, 12.0, 12.0),
            RoomRequirement::sized("Bathroom", RoomType::Bathroom, 8.0, 10.0),
            RoomRequirement::sized("Kitchen", RoomType::Kitchen, 12.0, 15.0),
        ],
    )
}

/// The scenario with one room pinned to coordinates, which keeps the others
/// off the grid and on the randomized placer.
fn mixed_request() -> FloorPlanRequest {
    let mut request = scenario_request();
    request.rooms.push(
        RoomRequirement::of_type("Porch", RoomType::Verandah).with_position(ExplicitPosition {
            x: 0.0,
            y: 34.0,
            width: 10.0,
            height: 6.0,
        }),
    );
    request
}

fn strategy_counts(summary: &LayoutSummary) -> String {
    [
        Strategy::Explicit,
        Strategy::Grid,
        Strategy::Random,
        Strategy::Lattice,
    ]
    .iter()
    .map(|s| format!("{:?}={}", s, summary.count(*s)))
    .collect::<Vec<_>>()
    .join(" ")
}

// ── 1. Sample Specifications ────────────────────────────────────────────

fn validate_sample_specs(verbose: bool) -> Vec<TestResult> {
    println!("--- Sample Specifications ---");
    let mut results = Vec::new();

    let samples: Vec<SampleSpec> = match serde_json::from_str(SAMPLE_SPECS_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "samples_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "samples_not_empty".into(),
        passed: !samples.is_empty(),
        detail: format!("{} samples", samples.len()),
    });

    for sample in &samples {
        let layout = match solve_spec(&sample.spec, &SolverConfig::seeded(42)) {
            Ok(l) => l,
            Err(e) => {
                results.push(TestResult {
                    name: format!("{}_solves", sample.label),
                    passed: false,
                    detail: e.to_string(),
                });
                continue;
            }
        };
        let violations = validate_layout(&layout.bounds, &layout.rooms);
        results.push(TestResult {
            name: format!("{}_valid", sample.label),
            passed: violations.is_empty(),
            detail: format!("{} violations", violations.len()),
        });
        results.push(TestResult {
            name: format!("{}_completeness", sample.label),
            passed: layout.is_complete() == sample.expect_complete,
            detail: format!(
                "{} placed, unplaced {:?}",
                layout.rooms.len(),
                layout.unplaced_names()
            ),
        });

        if verbose {
            let summary = summarize(&layout);
            println!(
                "  {:32} {:>5.1}x{:<5.1} {} coverage {:.0}%",
                sample.label,
                layout.bounds.width,
                layout.bounds.depth,
                strategy_counts(&summary),
                summary.coverage * 100.0
            );
        }
    }

    results
}

// ── 2. Seeded Invariant Sweep ───────────────────────────────────────────

fn validate_seed_sweep(verbose: bool) -> Vec<TestResult> {
    println!("--- Seeded Invariant Sweep ---");
    let mut results = Vec::new();
    let request = mixed_request();

    let mut failures = 0;
    let mut incomplete = 0;
    let mut lattice_rooms = 0;
    let seeds = 500;
    for seed in 0..seeds {
        match solve(&request, &SolverConfig::seeded(seed)) {
            Ok(layout) => {
                if !validate_layout(&layout.bounds, &layout.rooms).is_empty() {
                    failures += 1;
                }
                if !layout.is_complete() {
                    incomplete += 1;
                }
                lattice_rooms += layout.degraded_rooms().count();
            }
            Err(_) => failures += 1,
        }
    }

    results.push(TestResult {
        name: "sweep_no_violations".into(),
        passed: failures == 0,
        detail: format!("{} failures over {} seeds", failures, seeds),
    });
    results.push(TestResult {
        name: "sweep_all_complete".into(),
        passed: incomplete == 0,
        detail: format!("{} incomplete layouts", incomplete),
    });

    if verbose {
        println!(
            "  {} seeds, {} rooms placed by the fallback lattice",
            seeds, lattice_rooms
        );
    }

    results
}

// ── 3. Determinism ──────────────────────────────────────────────────────

fn validate_determinism(_verbose: bool) -> Vec<TestResult> {
    println!("--- Determinism ---");
    let mut results = Vec::new();
    let request = mixed_request();
    let config = SolverConfig::seeded(2024);

    let a = solve(&request, &config);
    let b = solve(&request, &config);
    let same = matches!((&a, &b), (Ok(x), Ok(y)) if x == y);
    results.push(TestResult {
        name: "same_seed_same_layout".into(),
        passed: same,
        detail: "seed 2024 solved twice".into(),
    });

    let explicit = FloorPlanRequest::new(
        HouseBounds::new(40.0, 20.0),
        vec![
            RoomRequirement::of_type("West", RoomType::Bedroom).with_position(ExplicitPosition {
                x: 0.0,
                y: 0.0,
                width: 20.0,
                height: 20.0,
            }),
            RoomRequirement::of_type("East", RoomType::Bedroom).with_position(ExplicitPosition {
                x: 20.0,
                y: 0.0,
                width: 20.0,
                height: 20.0,
            }),
        ],
    );
    let verbatim = match solve(&explicit, &config) {
        Ok(layout) => layout
            .rooms
            .iter()
            .zip(&explicit.rooms)
            .all(|(room, req)| match req.explicit_position {
                Some(p) => {
                    room.placed_by == Strategy::Explicit
                        && (room.x, room.y, room.width, room.height)
                            == (p.x, p.y, p.width, p.height)
                }
                None => false,
            }),
        Err(_) => false,
    };
    results.push(TestResult {
        name: "explicit_coordinates_verbatim".into(),
        passed: verbatim,
        detail: "two rooms sharing a wall".into(),
    });

    results
}

// ── 4. Grid Clamping ────────────────────────────────────────────────────

fn validate_grid_clamping(verbose: bool) -> Vec<TestResult> {
    println!("--- Grid Clamping ---");
    let mut results = Vec::new();

    let hints = [(5, 0, 10, 1), (-4, -4, 0, 0), (3, 3, 3, 3), (0, 9, 1, 1)];
    for (row, col, row_span, col_span) in hints {
        let request = FloorPlanRequest::new(
            HouseBounds::new(40.0, 40.0),
            vec![RoomRequirement::of_type("Hinted", RoomType::Other).with_grid_hint(GridHint {
                row,
                col,
                row_span,
                col_span,
            })],
        )
        .with_grid(4, 4);
        let (passed, detail) = match solve(&request, &SolverConfig::seeded(1)) {
            Ok(layout) => match layout.room("Hinted") {
                Some(r) => (
                    r.placed_by == Strategy::Grid && layout.bounds.contains(&r.rect()),
                    format!("at ({:.2}, {:.2}) {:.2}x{:.2}", r.x, r.y, r.width, r.height),
                ),
                None => (false, "not placed".to_string()),
            },
            Err(e) => (false, e.to_string()),
        };
        if verbose {
            println!("  hint ({row}, {col}, {row_span}, {col_span}) -> {detail}");
        }
        results.push(TestResult {
            name: format!("grid_clamp_{}_{}_{}_{}", row, col, row_span, col_span),
            passed,
            detail,
        });
    }

    results
}

// ── 5. Fallback Lattice ─────────────────────────────────────────────────

fn validate_fallback(verbose: bool) -> Vec<TestResult> {
    println!("--- Fallback Lattice ---");
    let mut results = Vec::new();

    // Six 12 ft squares in a 20 ft house: at most one fits by sampling.
    let mut rooms = vec![RoomRequirement::of_type("Closet", RoomType::Utility).with_position(
        ExplicitPosition {
            x: 0.0,
            y: 0.0,
            width: 2.0,
            height: 2.0,
        },
    )];
    rooms.extend(
        (1..=6).map(|i| RoomRequirement::sized(format!("Bedroom {}", i), RoomType::Bedroom, 12.0, 12.0)),
    );
    let request = FloorPlanRequest::new(HouseBounds::new(20.0, 20.0), rooms);

    match solve(&request, &SolverConfig::seeded(9)) {
        Ok(layout) => {
            let violations = validate_layout(&layout.bounds, &layout.rooms);
            let summary = summarize(&layout);
            results.push(TestResult {
                name: "fallback_no_overlap".into(),
                passed: violations.is_empty(),
                detail: format!("{} violations", violations.len()),
            });
            results.push(TestResult {
                name: "fallback_uses_lattice".into(),
                passed: summary.lattice >= 5,
                detail: strategy_counts(&summary),
            });
            let reasons_ok = layout
                .unplaced
                .iter()
                .all(|u| u.reason == UnplacedReason::LatticeExhausted);
            results.push(TestResult {
                name: "fallback_unplaced_reported".into(),
                passed: reasons_ok && summary.placed + summary.unplaced == request.rooms.len(),
                detail: format!("{} placed, {} unplaced", summary.placed, summary.unplaced),
            });
            if verbose {
                for r in layout.degraded_rooms() {
                    println!(
                        "  {:12} lattice slot ({:.2}, {:.2}) {:.2}x{:.2}",
                        r.name, r.x, r.y, r.width, r.height
                    );
                }
            }
        }
        Err(e) => results.push(TestResult {
            name: "fallback_solves".into(),
            passed: false,
            detail: e.to_string(),
        }),
    }

    results
}
