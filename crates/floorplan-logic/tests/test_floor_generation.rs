//! Integration tests for the full floor generation pipeline.
//!
//! Exercises: FloorPlan JSON → zone split → private rooms → public rooms
//! → audits and wall extraction.
//!
//! All tests are pure logic, no rendering.

use floorplan_logic::constants::markers;
use floorplan_logic::floor::{Floor, StageOutcome};
use floorplan_logic::plan::{FloorPlan, PlanError};
use floorplan_logic::room::RoomType;
use floorplan_logic::validation::Severity;
use floorplan_logic::walls::{extract_walls, render_ascii, WallKind};
use floorplan_logic::FloorError;

// ── Helpers ────────────────────────────────────────────────────────────

const HOUSE_PLAN_JSON: &str = include_str!("../../../data/house_plan.json");

const CUT_CORNER: &[(usize, usize)] = &[(0, 0), (1, 0), (0, 1)];

fn house() -> FloorPlan {
    FloorPlan::from_json(HOUSE_PLAN_JSON).expect("bundled plan parses")
}

fn build(seed: u64) -> Floor {
    Floor::generate(seed, &house(), CUT_CORNER).expect("bundled plan is valid")
}

// ── Plan loading ───────────────────────────────────────────────────────

#[test]
fn bundled_plan_loads() {
    let plan = house();
    assert_eq!((plan.grid_width, plan.grid_height), (12, 10));
    assert_eq!(plan.private_rooms.len(), 3);
    assert_eq!(plan.public_rooms.len(), 3);
    assert_eq!(plan.limits.max_stage_attempts, 100);
}

#[test]
fn plan_round_trips_through_json() {
    let plan = house();
    let json = plan.to_json_pretty().unwrap();
    assert_eq!(FloorPlan::from_json(&json).unwrap(), plan);
}

#[test]
fn empty_grid_plan_is_rejected() {
    let json = r#"{ "grid_width": 0, "grid_height": 4,
                    "private_area_ratio": 1, "public_area_ratio": 1 }"#;
    match FloorPlan::from_json(json) {
        Err(FloorError::InvalidPlan(errors)) => assert!(errors.contains(&PlanError::EmptyGrid)),
        other => panic!("expected invalid plan, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        FloorPlan::from_json("{ not json"),
        Err(FloorError::PlanParse(_))
    ));
}

// ── Pipeline invariants ────────────────────────────────────────────────

#[test]
fn zone_split_always_commits_on_the_house() {
    for seed in 0..10 {
        let floor = build(seed);
        assert!(
            matches!(floor.report().zone_split, StageOutcome::Committed { .. }),
            "seed {seed}: {:?}",
            floor.report()
        );
    }
}

#[test]
fn structural_audits_pass_for_every_seed() {
    for seed in 0..10 {
        let floor = build(seed);
        let structural: Vec<_> = floor
            .audit()
            .into_iter()
            .filter(|i| i.severity == Severity::Error)
            .filter(|i| matches!(i.category, "outside" | "markers"))
            .collect();
        assert!(structural.is_empty(), "seed {seed}: {structural:?}");
    }
}

#[test]
fn outside_cells_stay_outside() {
    let floor = build(4);
    for &(x, y) in CUT_CORNER {
        let i = floor.grid().index(x, y);
        assert_eq!(floor.grid().get(i), markers::OUTSIDE);
        assert_eq!(floor.room_type_at(i), None);
    }
    assert_eq!(floor.grid().count(markers::OUTSIDE), CUT_CORNER.len());
}

#[test]
fn complete_floors_are_fully_covered_and_adjacent() {
    let mut complete = 0;
    for seed in 0..10 {
        let floor = build(seed);
        if !floor.is_complete() {
            continue;
        }
        complete += 1;

        let grid = floor.grid();
        assert_eq!(grid.count(markers::UNASSIGNED), 0, "seed {seed}");
        assert_eq!(grid.count(markers::PRIVATE), 0, "seed {seed}");
        assert_eq!(grid.count(markers::PUBLIC), 0, "seed {seed}");

        let gaps: Vec<_> = floor
            .audit()
            .into_iter()
            .filter(|i| matches!(i.category, "coverage" | "adjacency"))
            .collect();
        assert!(gaps.is_empty(), "seed {seed}: {gaps:?}");

        for room in floor.rooms() {
            let cells = floor.room_cells(room.marker());
            assert!(!cells.is_empty());
            for &required in &room.spec().neighbours {
                let touches = cells
                    .iter()
                    .any(|&c| grid.neighbours(c).any(|n| floor.room_type_at(n) == Some(required)));
                assert!(
                    touches,
                    "seed {seed}: {:?} misses {required:?}",
                    room.room_type()
                );
            }
        }
    }
    assert!(complete >= 5, "only {complete}/10 seeds produced a complete floor");
}

#[test]
fn hallway_reaches_a_public_room() {
    let mut checked = 0;
    for seed in 0..10 {
        let floor = build(seed);
        if !floor.is_complete() {
            continue;
        }
        checked += 1;
        let hallway = floor
            .rooms()
            .find(|r| r.room_type() == RoomType::Hallway)
            .unwrap();
        let public: Vec<i32> = floor.public_rooms().iter().map(|r| r.marker()).collect();
        let grid = floor.grid();
        let touches_public = floor
            .room_cells(hallway.marker())
            .into_iter()
            .any(|c| grid.neighbours(c).any(|n| public.contains(&grid.get(n))));
        assert!(touches_public, "seed {seed}\n{}", render_ascii(&floor));
    }
    assert!(checked > 0, "no complete floor to check");
}

#[test]
fn markers_are_assigned_private_first() {
    let floor = build(0);
    let private: Vec<i32> = floor.private_rooms().iter().map(|r| r.marker()).collect();
    let public: Vec<i32> = floor.public_rooms().iter().map(|r| r.marker()).collect();
    assert_eq!(private, vec![3, 4, 5]);
    assert_eq!(public, vec![6, 7, 8]);
    assert_eq!(floor.room(7).unwrap().room_type(), RoomType::Kitchen);
}

// ── Determinism ────────────────────────────────────────────────────────

#[test]
fn same_seed_same_floor() {
    let a = build(99);
    let b = build(99);
    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.report(), b.report());
    assert_eq!(render_ascii(&a), render_ascii(&b));
}

#[test]
fn seeds_produce_different_floors() {
    let layouts: Vec<String> = (0..5).map(|s| render_ascii(&build(s))).collect();
    assert!(layouts.iter().any(|l| l != &layouts[0]));
}

// ── Limits ─────────────────────────────────────────────────────────────

#[test]
fn single_attempt_budget_is_respected() {
    let mut plan = house();
    plan.limits.max_stage_attempts = 1;
    let floor = Floor::generate(5, &plan, CUT_CORNER).unwrap();
    for outcome in [
        floor.report().zone_split,
        floor.report().private_rooms,
        floor.report().public_rooms,
    ] {
        assert_eq!(outcome.attempts(), 1, "{outcome:?}");
    }
}

// ── Walls ──────────────────────────────────────────────────────────────

#[test]
fn walls_cover_the_outline() {
    let floor = build(1);
    let walls = extract_walls(floor.grid());
    let exterior = walls
        .iter()
        .filter(|w| w.kind == WallKind::Exterior)
        .count();
    // A staircase cut-out keeps the outline length of the full rectangle.
    assert_eq!(exterior, 2 * (12 + 10));
}
