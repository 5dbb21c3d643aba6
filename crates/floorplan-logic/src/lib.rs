//! Seeded floor-plan generation.
//!
//! This crate partitions a rectangular cell grid into a building floor: it
//! splits the interior into a private and a public zone, then fills each zone
//! with rooms drawn from a plan, honouring area ratios and adjacency
//! requirements. Every random draw comes from one seeded generator, so a seed
//! plus a plan always reproduces the same floor.
//!
//! Nothing here renders anything. Functions take plain data and return
//! results, which keeps the whole pipeline unit-testable and lets any viewer
//! consume the finished [`floor::Floor`].
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Zone markers and default generation limits |
//! | [`error`] | `FloorError`, the crate-wide error type |
//! | [`floor`] | Stage orchestration (zones → private → public) with rollback |
//! | [`grid`] | Flat row-major marker grid, coordinates, neighbourhoods |
//! | [`growth`] | Rectangular then L-shaped region growing |
//! | [`plan`] | Declarative floor plan (JSON) and plan validation |
//! | [`room`] | Room categories, room specs, per-build room state |
//! | [`seeding`] | Weighted seed-cell selection per room |
//! | [`validation`] | Coverage/adjacency checks and post-build audits |
//! | [`walls`] | Wall extraction and ASCII rendering |
//! | [`weighted`] | Cumulative-weight random choice |
//!
//! ```
//! use floorplan_logic::floor::Floor;
//! use floorplan_logic::plan::FloorPlan;
//!
//! let plan = FloorPlan::zones_only(5, 3, 1, 1);
//! let floor = Floor::generate(42, &plan, &[]).unwrap();
//! assert_eq!(floor.grid().len(), 15);
//! ```

pub mod constants;
pub mod error;
pub mod floor;
pub mod grid;
pub mod growth;
pub mod plan;
pub mod room;
pub mod seeding;
pub mod validation;
pub mod walls;
pub mod weighted;

pub use error::{FloorError, Result};
