//! Floorplan Headless Generation Harness
//!
//! Builds floors over a sweep of seeds and checks the invariants every build
//! must keep. Runs entirely in-process, no rendering.
//!
//! Usage:
//!   cargo run -p floorplan-simtest
//!   cargo run -p floorplan-simtest -- --verbose --seeds 50
//!   cargo run -p floorplan-simtest -- --walls      (dump walls of seed 0 as JSON)
//!
//! Set `RUST_LOG=debug` to see per-attempt generation logs.

use floorplan_logic::constants::markers;
use floorplan_logic::floor::{Floor, Stage, StageOutcome};
use floorplan_logic::plan::{self, FloorPlan};
use floorplan_logic::room::RoomType;
use floorplan_logic::validation::Severity;
use floorplan_logic::walls::{self, WallKind};

// ── Sample plan (same JSON a host would hand the generator) ─────────────
const HOUSE_PLAN_JSON: &str = include_str!("../../../data/house_plan.json");

/// Cut-out corner so the sweep always exercises outside cells.
const HOUSE_OUTSIDE: &[(usize, usize)] = &[(0, 0), (1, 0), (0, 1), (11, 9)];

const DEFAULT_SEEDS: u64 = 20;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let dump_walls = args.iter().any(|a| a == "--walls");
    let seeds = args
        .iter()
        .position(|a| a == "--seeds")
        .and_then(|i| args.get(i + 1))
        .and_then(|n| n.parse::<u64>().ok())
        .unwrap_or(DEFAULT_SEEDS);

    println!("=== Floorplan Generation Harness ===\n");

    let plan = match FloorPlan::from_json(HOUSE_PLAN_JSON) {
        Ok(plan) => plan,
        Err(e) => {
            println!("  ✗ plan_parse: {}", e);
            std::process::exit(1);
        }
    };

    if dump_walls {
        dump_wall_json(&plan);
        return;
    }

    let mut results = Vec::new();

    // 1. Plan diagnostics
    results.extend(validate_plan_data(&plan, verbose));

    // 2. Zone split on the minimal grid
    results.extend(validate_zone_split(seeds, verbose));

    // 3. Full house sweep
    results.extend(validate_house_sweep(&plan, seeds, verbose));

    // 4. Determinism
    results.extend(validate_determinism(&plan, verbose));

    // 5. Wall extraction
    results.extend(validate_walls(&plan, verbose));

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

// ── 1. Plan ─────────────────────────────────────────────────────────────

fn validate_plan_data(plan: &FloorPlan, verbose: bool) -> Vec<TestResult> {
    println!("--- Plan ---");
    let mut results = Vec::new();

    let problems = plan::validate_plan(plan);
    results.push(TestResult {
        name: "plan_valid".into(),
        passed: problems.is_empty(),
        detail: if problems.is_empty() {
            format!(
                "{}×{} grid, {} private + {} public rooms",
                plan.grid_width,
                plan.grid_height,
                plan.private_rooms.len(),
                plan.public_rooms.len()
            )
        } else {
            problems
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    });

    let outside_problems = plan::validate_outside(plan, HOUSE_OUTSIDE);
    results.push(TestResult {
        name: "plan_outside_in_bounds".into(),
        passed: outside_problems.is_empty(),
        detail: format!("{} outside cells", HOUSE_OUTSIDE.len()),
    });

    let has_hallway = plan
        .private_rooms
        .iter()
        .any(|r| r.room_type == RoomType::Hallway);
    results.push(TestResult {
        name: "plan_has_private_hallway".into(),
        passed: has_hallway,
        detail: "hallway seeds must reach the public zone".into(),
    });

    if verbose {
        for spec in plan.private_rooms.iter().chain(plan.public_rooms.iter()) {
            println!(
                "  {:<12} ratio {} next to {:?}",
                spec.room_type.name(),
                spec.area_ratio,
                spec.neighbours
            );
        }
    }

    results
}

// ── 2. Zone split ───────────────────────────────────────────────────────

fn validate_zone_split(seeds: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Zone Split (5×3) ---");
    let mut results = Vec::new();
    let plan = FloorPlan::zones_only(5, 3, 1, 1);

    let mut committed = 0;
    let mut worst_attempts = 0;
    for seed in 0..seeds {
        let floor = match Floor::generate(seed, &plan, &[]) {
            Ok(f) => f,
            Err(e) => {
                results.push(TestResult {
                    name: format!("zones_seed_{}", seed),
                    passed: false,
                    detail: e.to_string(),
                });
                continue;
            }
        };
        let grid = floor.grid();
        let covered = grid.count(markers::UNASSIGNED) == 0
            && grid.count(markers::PRIVATE) > 0
            && grid.count(markers::PUBLIC) > 0;
        if let StageOutcome::Committed { attempts } = floor.report().zone_split {
            if covered {
                committed += 1;
            }
            worst_attempts = worst_attempts.max(attempts);
        }
        if verbose && seed == 0 {
            print!("{}", walls::render_ascii(&floor));
        }
    }

    results.push(TestResult {
        name: "zones_full_coverage".into(),
        passed: committed == seeds,
        detail: format!(
            "{}/{} seeds committed, worst case {} attempts",
            committed, seeds, worst_attempts
        ),
    });

    results
}

// ── 3. House sweep ──────────────────────────────────────────────────────

fn validate_house_sweep(plan: &FloorPlan, seeds: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- House Sweep ({} seeds) ---", seeds);
    let mut results = Vec::new();

    let mut complete = 0;
    let mut zones_committed = 0;
    let mut hard_errors: Vec<String> = Vec::new();
    let mut warnings = 0;

    for seed in 0..seeds {
        let floor = match Floor::generate(seed, plan, HOUSE_OUTSIDE) {
            Ok(f) => f,
            Err(e) => {
                hard_errors.push(format!("seed {}: {}", seed, e));
                continue;
            }
        };
        if floor.is_complete() {
            complete += 1;
        }
        if matches!(
            floor.report().outcome(Stage::ZoneSplit),
            StageOutcome::Committed { .. }
        ) {
            zones_committed += 1;
        }

        for issue in floor.audit() {
            // Coverage and adjacency gaps are expected on exhausted stages.
            let structural = matches!(issue.category, "outside" | "markers");
            match issue.severity {
                Severity::Error if structural => hard_errors.push(format!(
                    "seed {}: [{}] {}",
                    seed, issue.category, issue.message
                )),
                _ => warnings += 1,
            }
        }

        if verbose && seed == 0 {
            println!("  seed 0 report: {:?}", floor.report());
            print!("{}", walls::render_ascii(&floor));
        }
    }

    results.push(TestResult {
        name: "house_zones_committed".into(),
        passed: zones_committed == seeds,
        detail: format!("{}/{} seeds", zones_committed, seeds),
    });

    results.push(TestResult {
        name: "house_structural_invariants".into(),
        passed: hard_errors.is_empty(),
        detail: if hard_errors.is_empty() {
            "outside cells preserved, every marker known".into()
        } else {
            hard_errors.join("; ")
        },
    });

    results.push(TestResult {
        name: "house_completion_rate".into(),
        passed: complete > 0,
        detail: format!(
            "{}/{} floors complete, {} soft audit findings",
            complete, seeds, warnings
        ),
    });

    results
}

// ── 4. Determinism ──────────────────────────────────────────────────────

fn validate_determinism(plan: &FloorPlan, _verbose: bool) -> Vec<TestResult> {
    println!("--- Determinism ---");
    let mut results = Vec::new();

    for seed in [0u64, 7, 12345] {
        let a = Floor::generate(seed, plan, HOUSE_OUTSIDE);
        let b = Floor::generate(seed, plan, HOUSE_OUTSIDE);
        let same = match (&a, &b) {
            (Ok(a), Ok(b)) => a.grid() == b.grid() && a.report() == b.report(),
            _ => false,
        };
        results.push(TestResult {
            name: format!("deterministic_seed_{}", seed),
            passed: same,
            detail: if same {
                "identical grids and reports".into()
            } else {
                "builds diverged".into()
            },
        });
    }

    results
}

// ── 5. Walls ────────────────────────────────────────────────────────────

fn validate_walls(plan: &FloorPlan, verbose: bool) -> Vec<TestResult> {
    println!("--- Walls ---");
    let mut results = Vec::new();

    let floor = match Floor::generate(0, plan, HOUSE_OUTSIDE) {
        Ok(f) => f,
        Err(e) => {
            results.push(TestResult {
                name: "walls_build".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    let segments = walls::extract_walls(floor.grid());
    let exterior = segments
        .iter()
        .filter(|w| w.kind == WallKind::Exterior)
        .count();
    let interior = segments.len() - exterior;

    // Corner cut-outs never shorten the outline.
    let perimeter = 2 * (plan.grid_width + plan.grid_height);
    results.push(TestResult {
        name: "walls_enclose_building".into(),
        passed: exterior >= perimeter,
        detail: format!("{} exterior segments", exterior),
    });

    results.push(TestResult {
        name: "walls_split_rooms".into(),
        passed: interior > 0,
        detail: format!("{} interior segments", interior),
    });

    if verbose {
        println!("  {} wall segments total", segments.len());
    }

    results
}

fn dump_wall_json(plan: &FloorPlan) {
    match Floor::generate(0, plan, HOUSE_OUTSIDE) {
        Ok(floor) => {
            let segments = walls::extract_walls(floor.grid());
            match serde_json::to_string_pretty(&segments) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    log::error!("failed to serialise walls: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            log::error!("generation failed: {}", e);
            std::process::exit(1);
        }
    }
}
