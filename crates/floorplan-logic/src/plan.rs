//! Declarative floor plan.
//!
//! A plan names the grid size, the private/public zone ratio and the rooms to
//! place in each zone. It is authored as JSON:
//!
//! ```
//! use floorplan_logic::plan::{validate_plan, FloorPlan};
//!
//! let plan = FloorPlan::from_json(r#"{
//!     "grid_width": 8,
//!     "grid_height": 6,
//!     "private_area_ratio": 1,
//!     "public_area_ratio": 1,
//!     "private_rooms": [{ "room_type": "Bedroom", "area_ratio": 2 }],
//!     "public_rooms": [{ "room_type": "Kitchen", "area_ratio": 1 }]
//! }"#).unwrap();
//! assert_eq!(plan.limits.max_stage_attempts, 100);
//! assert!(validate_plan(&plan).is_empty());
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::limits;
use crate::error::{FloorError, Result};
use crate::room::{RoomSpec, RoomType};

/// Retry and iteration bounds for one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationLimits {
    /// Room picks per growth phase.
    pub max_grow_iterations: u32,
    /// Seed/grow/validate attempts per stage.
    pub max_stage_attempts: u32,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            max_grow_iterations: limits::MAX_GROW_ITERATIONS,
            max_stage_attempts: limits::MAX_STAGE_ATTEMPTS,
        }
    }
}

/// Everything a build needs apart from the seed and the outside cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorPlan {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Private zone share. Values ≤ 0 count as 1.
    pub private_area_ratio: i32,
    /// Public zone share. Values ≤ 0 count as 1.
    pub public_area_ratio: i32,
    #[serde(default)]
    pub private_rooms: Vec<RoomSpec>,
    #[serde(default)]
    pub public_rooms: Vec<RoomSpec>,
    #[serde(default)]
    pub limits: GenerationLimits,
}

impl FloorPlan {
    /// A plan that only splits the grid into the two zones.
    pub fn zones_only(
        grid_width: usize,
        grid_height: usize,
        private_area_ratio: i32,
        public_area_ratio: i32,
    ) -> Self {
        Self {
            grid_width,
            grid_height,
            private_area_ratio,
            public_area_ratio,
            private_rooms: Vec::new(),
            public_rooms: Vec::new(),
            limits: GenerationLimits::default(),
        }
    }

    /// Parse a JSON plan and reject it if it has fatal problems.
    pub fn from_json(json: &str) -> Result<Self> {
        let plan: FloorPlan = serde_json::from_str(json)?;
        let fatal: Vec<PlanError> = validate_plan(&plan)
            .into_iter()
            .filter(PlanError::is_fatal)
            .collect();
        if fatal.is_empty() {
            Ok(plan)
        } else {
            Err(FloorError::InvalidPlan(fatal))
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Placeholder spec standing in for the private zone during the split.
    pub fn private_zone(&self) -> RoomSpec {
        RoomSpec::new(RoomType::Empty, self.private_area_ratio)
    }

    /// Placeholder spec standing in for the public zone during the split.
    pub fn public_zone(&self) -> RoomSpec {
        RoomSpec::new(RoomType::Empty, self.public_area_ratio)
    }

    pub fn cell_count(&self) -> usize {
        self.grid_width * self.grid_height
    }

    fn all_rooms(&self) -> impl Iterator<Item = &RoomSpec> {
        self.private_rooms.iter().chain(self.public_rooms.iter())
    }
}

/// Plan problem. Fatal ones stop a build; the rest are reported and the build
/// runs anyway, typically ending in an exhausted stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("grid has no cells")]
    EmptyGrid,
    #[error("outside cell ({x}, {y}) is not on the grid")]
    OutsideOutOfBounds { x: usize, y: usize },
    #[error("every cell is outside")]
    AllCellsOutside,
    #[error("stage attempt limit is zero")]
    NoStageAttempts,
    #[error("{room:?} has non-positive area ratio {ratio}, treated as 1")]
    NonPositiveRatio { room: RoomType, ratio: i32 },
    #[error("{room:?} must touch {required:?} but the plan has no such room")]
    UnknownNeighbour { room: RoomType, required: RoomType },
    #[error("{room:?} must touch another {room:?} but the plan has only one")]
    LonelySelfNeighbour { room: RoomType },
    #[error("room #{room} uses the zone placeholder category")]
    EmptyRoomType { room: usize },
}

impl PlanError {
    /// Whether a build can not proceed at all.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PlanError::EmptyGrid
                | PlanError::OutsideOutOfBounds { .. }
                | PlanError::AllCellsOutside
                | PlanError::NoStageAttempts
        )
    }
}

/// Validate a plan, returning all problems found.
pub fn validate_plan(plan: &FloorPlan) -> Vec<PlanError> {
    let mut errors = Vec::new();

    if plan.cell_count() == 0 {
        errors.push(PlanError::EmptyGrid);
    }
    if plan.limits.max_stage_attempts == 0 {
        errors.push(PlanError::NoStageAttempts);
    }

    for (i, room) in plan.all_rooms().enumerate() {
        if room.area_ratio <= 0 {
            errors.push(PlanError::NonPositiveRatio {
                room: room.room_type,
                ratio: room.area_ratio,
            });
        }
        if room.room_type == RoomType::Empty {
            errors.push(PlanError::EmptyRoomType { room: i });
        }
    }

    let present: BTreeSet<RoomType> = plan.all_rooms().map(|r| r.room_type).collect();
    for room in plan.all_rooms() {
        for &required in &room.neighbours {
            if required == room.room_type {
                let instances = plan
                    .all_rooms()
                    .filter(|r| r.room_type == required)
                    .count();
                if instances < 2 {
                    errors.push(PlanError::LonelySelfNeighbour {
                        room: room.room_type,
                    });
                }
            } else if !present.contains(&required) {
                errors.push(PlanError::UnknownNeighbour {
                    room: room.room_type,
                    required,
                });
            }
        }
    }

    errors
}

/// Validate the outside cells against the plan's grid.
pub fn validate_outside(plan: &FloorPlan, outside: &[(usize, usize)]) -> Vec<PlanError> {
    let mut errors = Vec::new();
    let mut distinct = BTreeSet::new();
    for &(x, y) in outside {
        if x >= plan.grid_width || y >= plan.grid_height {
            errors.push(PlanError::OutsideOutOfBounds { x, y });
        } else {
            distinct.insert((x, y));
        }
    }
    if plan.cell_count() > 0 && distinct.len() == plan.cell_count() {
        errors.push(PlanError::AllCellsOutside);
    }
    errors
}
