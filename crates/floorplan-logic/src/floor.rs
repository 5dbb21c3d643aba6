//! Floor construction.
//!
//! A build runs three stages strictly in order:
//!   1. zone split      -- interior cells become `PRIVATE` or `PUBLIC`
//!   2. private rooms   -- private zone cells become room markers
//!   3. public rooms    -- public zone cells become room markers
//!
//! Each stage is a bounded loop of seed → grow → validate attempts wrapped in a
//! [`StageTransaction`]: the grid is rolled back after every failed attempt and
//! only a validated attempt is committed. When the attempt budget runs out the
//! best attempt seen is kept and the stage reports [`StageOutcome::Exhausted`].

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::markers;
use crate::error::{FloorError, Result};
use crate::grid::{Grid, GridSnapshot};
use crate::growth::grow_rooms;
use crate::plan::{validate_outside, validate_plan, FloorPlan, GenerationLimits, PlanError};
use crate::room::{total_weight, GrowthState, RoomInstance, RoomSpec, RoomType};
use crate::seeding::find_room_seeds;
use crate::validation::{self, check_stage, StageCheck, ValidationIssue};

/// The three allocation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ZoneSplit,
    PrivateRooms,
    PublicRooms,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::ZoneSplit => "zone split",
            Stage::PrivateRooms => "private rooms",
            Stage::PublicRooms => "public rooms",
        }
    }
}

/// How a stage ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// An attempt passed validation.
    Committed { attempts: u32 },
    /// No attempt passed; the best one was kept.
    Exhausted { attempts: u32, best: StageCheck },
    /// Every attempt ended in a degenerate seed draw; the grid is unchanged.
    Failed { attempts: u32 },
    /// Nothing to place.
    Skipped,
}

impl StageOutcome {
    /// Committed or skipped.
    pub fn is_success(&self) -> bool {
        matches!(self, StageOutcome::Committed { .. } | StageOutcome::Skipped)
    }

    pub fn attempts(&self) -> u32 {
        match *self {
            StageOutcome::Committed { attempts }
            | StageOutcome::Exhausted { attempts, .. }
            | StageOutcome::Failed { attempts } => attempts,
            StageOutcome::Skipped => 0,
        }
    }
}

/// Per-stage outcomes of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    pub zone_split: StageOutcome,
    pub private_rooms: StageOutcome,
    pub public_rooms: StageOutcome,
}

impl BuildReport {
    pub fn outcome(&self, stage: Stage) -> StageOutcome {
        match stage {
            Stage::ZoneSplit => self.zone_split,
            Stage::PrivateRooms => self.private_rooms,
            Stage::PublicRooms => self.public_rooms,
        }
    }

    /// True when every stage committed or had nothing to do.
    pub fn is_complete(&self) -> bool {
        self.zone_split.is_success()
            && self.private_rooms.is_success()
            && self.public_rooms.is_success()
    }
}

/// Snapshot-backed stage attempt bookkeeping.
///
/// `rollback` returns the grid to the pre-stage state between attempts;
/// `record` remembers the best failed attempt; `settle` leaves the grid holding
/// that best attempt (or the pre-stage state if there was none).
struct StageTransaction {
    before: GridSnapshot,
    best: Option<(StageCheck, GridSnapshot, Vec<RoomInstance>)>,
}

impl StageTransaction {
    fn begin(grid: &Grid) -> Self {
        Self {
            before: grid.snapshot(),
            best: None,
        }
    }

    fn rollback(&self, grid: &mut Grid) {
        grid.restore(&self.before);
    }

    fn record(&mut self, check: StageCheck, grid: &Grid, rooms: &[RoomInstance]) {
        let better = self.best.as_ref().map_or(true, |(best, _, _)| check < *best);
        if better {
            self.best = Some((check, grid.snapshot(), rooms.to_vec()));
        }
    }

    fn settle(self, grid: &mut Grid, rooms: &mut Vec<RoomInstance>) -> Option<StageCheck> {
        match self.best {
            Some((check, snapshot, best_rooms)) => {
                grid.restore(&snapshot);
                *rooms = best_rooms;
                Some(check)
            }
            None => {
                grid.restore(&self.before);
                for room in rooms.iter_mut() {
                    room.state = GrowthState::default();
                }
                None
            }
        }
    }
}

/// Mutable state owned by one in-progress build.
struct BuildContext {
    grid: Grid,
    rng: StdRng,
    limits: GenerationLimits,
}

impl BuildContext {
    /// Seed, claim seeds, grow. The grid must be at the stage's start state.
    fn attempt(&mut self, valid_placement: i32, rooms: &mut [RoomInstance]) -> Result<()> {
        let available = self.grid.count(valid_placement);
        let total = total_weight(rooms);
        for room in rooms.iter_mut() {
            room.reset(available, total);
        }

        let seeds = find_room_seeds(&self.grid, &mut self.rng, valid_placement, rooms)?;
        for (room, &seed) in rooms.iter().zip(seeds.iter()) {
            self.grid.set(seed, room.marker());
        }

        let report = grow_rooms(
            &mut self.grid,
            &mut self.rng,
            rooms,
            valid_placement,
            self.limits.max_grow_iterations,
        );
        if !report.rectangular_settled || !report.l_shaped_settled {
            log::trace!("growth hit its iteration bound: {:?}", report);
        }
        Ok(())
    }

    /// Run one stage to commit or exhaustion.
    fn run_stage(
        &mut self,
        stage: Stage,
        valid_placement: i32,
        rooms: &mut Vec<RoomInstance>,
        committed: &[RoomInstance],
    ) -> StageOutcome {
        if rooms.is_empty() {
            log::debug!("{}: no rooms, skipped", stage.name());
            return StageOutcome::Skipped;
        }

        let mut tx = StageTransaction::begin(&self.grid);
        let max_attempts = self.limits.max_stage_attempts;

        for attempt in 1..=max_attempts {
            tx.rollback(&mut self.grid);

            match self.attempt(valid_placement, rooms) {
                Ok(()) => {}
                Err(FloorError::DegenerateDraw) => {
                    log::debug!("{} attempt {}: no valid seed cell", stage.name(), attempt);
                    continue;
                }
                Err(e) => {
                    log::debug!("{} attempt {}: {}", stage.name(), attempt, e);
                    continue;
                }
            }

            let check = check_stage(&self.grid, valid_placement, rooms, committed);
            if check.passed() {
                log::debug!("{}: committed after {} attempts", stage.name(), attempt);
                return StageOutcome::Committed { attempts: attempt };
            }
            log::debug!(
                "{} attempt {}: {} cells uncovered, {} adjacency requirements unmet",
                stage.name(),
                attempt,
                check.uncovered_cells,
                check.unmet_adjacency
            );
            tx.record(check, &self.grid, rooms);
        }

        match tx.settle(&mut self.grid, rooms) {
            Some(best) => {
                log::warn!(
                    "{}: no valid layout in {} attempts, keeping best ({} uncovered, {} unmet)",
                    stage.name(),
                    max_attempts,
                    best.uncovered_cells,
                    best.unmet_adjacency
                );
                StageOutcome::Exhausted {
                    attempts: max_attempts,
                    best,
                }
            }
            None => {
                log::warn!(
                    "{}: every one of {} attempts failed to seed",
                    stage.name(),
                    max_attempts
                );
                StageOutcome::Failed {
                    attempts: max_attempts,
                }
            }
        }
    }
}

/// A generated floor. Immutable once built.
#[derive(Debug, Clone)]
pub struct Floor {
    seed: u64,
    grid: Grid,
    outside: Vec<usize>,
    private_rooms: Vec<RoomInstance>,
    public_rooms: Vec<RoomInstance>,
    report: BuildReport,
}

impl Floor {
    /// Build a floor from a seed, a plan and the cells that are not part of
    /// the building. Duplicate outside cells are ignored.
    ///
    /// Only fatal plan problems return an error. A stage that cannot satisfy
    /// its constraints still yields a floor; check [`Floor::is_complete`].
    pub fn generate(seed: u64, plan: &FloorPlan, outside: &[(usize, usize)]) -> Result<Self> {
        let mut problems = validate_plan(plan);
        problems.extend(validate_outside(plan, outside));
        let (fatal, warnings): (Vec<PlanError>, Vec<PlanError>) =
            problems.into_iter().partition(PlanError::is_fatal);
        if !fatal.is_empty() {
            return Err(FloorError::InvalidPlan(fatal));
        }
        for warning in &warnings {
            log::warn!("plan: {}", warning);
        }

        log::info!(
            "Generating floor: seed {} ({}×{}, {} private rooms, {} public rooms)",
            seed,
            plan.grid_width,
            plan.grid_height,
            plan.private_rooms.len(),
            plan.public_rooms.len()
        );

        let mut grid = Grid::new(plan.grid_width, plan.grid_height);
        for &(x, y) in outside {
            let i = grid.index(x, y);
            grid.set(i, markers::OUTSIDE);
        }
        let outside_cells: Vec<usize> = grid.cells_with(markers::OUTSIDE).collect();

        let mut ctx = BuildContext {
            grid,
            rng: StdRng::seed_from_u64(seed),
            limits: plan.limits,
        };

        let mut zones = vec![
            RoomInstance::new(plan.private_zone(), markers::PRIVATE),
            RoomInstance::new(plan.public_zone(), markers::PUBLIC),
        ];
        let zone_split = ctx.run_stage(Stage::ZoneSplit, markers::UNASSIGNED, &mut zones, &[]);

        let mut next_marker = markers::FIRST_ROOM;
        let mut instantiate = |specs: &[RoomSpec]| -> Vec<RoomInstance> {
            specs
                .iter()
                .map(|spec| {
                    let room = RoomInstance::new(spec.clone(), next_marker);
                    next_marker += 1;
                    room
                })
                .collect()
        };
        let mut private_rooms = instantiate(&plan.private_rooms);
        let mut public_rooms = instantiate(&plan.public_rooms);

        let private_outcome =
            ctx.run_stage(Stage::PrivateRooms, markers::PRIVATE, &mut private_rooms, &[]);
        let public_outcome = ctx.run_stage(
            Stage::PublicRooms,
            markers::PUBLIC,
            &mut public_rooms,
            &private_rooms,
        );

        let report = BuildReport {
            zone_split,
            private_rooms: private_outcome,
            public_rooms: public_outcome,
        };
        log::info!(
            "Floor generated: seed {}, complete: {} (attempts {}/{}/{})",
            seed,
            report.is_complete(),
            zone_split.attempts(),
            private_outcome.attempts(),
            public_outcome.attempts()
        );

        Ok(Self {
            seed,
            grid: ctx.grid,
            outside: outside_cells,
            private_rooms,
            public_rooms,
            report,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn private_rooms(&self) -> &[RoomInstance] {
        &self.private_rooms
    }

    pub fn public_rooms(&self) -> &[RoomInstance] {
        &self.public_rooms
    }

    /// Private rooms followed by public rooms.
    pub fn rooms(&self) -> impl Iterator<Item = &RoomInstance> {
        self.private_rooms.iter().chain(self.public_rooms.iter())
    }

    /// Flat indices of the cells that were outside at construction.
    pub fn outside_cells(&self) -> &[usize] {
        &self.outside
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Whether every stage committed (or had nothing to place).
    pub fn is_complete(&self) -> bool {
        self.report.is_complete()
    }

    /// Room owning `marker`.
    pub fn room(&self, marker: i32) -> Option<&RoomInstance> {
        self.rooms().find(|r| r.marker() == marker)
    }

    /// Category of the room covering a cell, if any.
    pub fn room_type_at(&self, index: usize) -> Option<RoomType> {
        self.room(self.grid.get(index)).map(RoomInstance::room_type)
    }

    /// Cells owned by `marker`, ascending.
    pub fn room_cells(&self, marker: i32) -> Vec<usize> {
        self.grid.cells_with(marker).collect()
    }

    /// Run every post-build audit and return the issues found.
    pub fn audit(&self) -> Vec<ValidationIssue> {
        let rooms: Vec<RoomInstance> = self.rooms().cloned().collect();
        let mut issues = validation::check_outside_preserved(&self.grid, &self.outside);
        issues.extend(validation::check_markers_known(&self.grid, &rooms));
        issues.extend(validation::check_coverage(
            &self.grid,
            !self.private_rooms.is_empty(),
            !self.public_rooms.is_empty(),
        ));
        issues.extend(validation::check_adjacency(&self.grid, &rooms));
        issues.extend(validation::check_contiguity(&self.grid, &rooms));
        issues.extend(validation::check_rectangular_capacity(&rooms));
        issues
    }
}
