//! Stage validation and post-build audits.
//!
//! [`check_stage`] is what the orchestrator runs after every attempt: full
//! coverage of the zone plus every adjacency requirement of every room in the
//! stage. The `check_*` audit functions below it take a finished grid and
//! return every issue found, so a harness can report them all at once.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::constants::markers;
use crate::grid::Grid;
use crate::room::{RoomInstance, RoomType};

/// Outcome of validating one stage attempt. Ordered so the smaller value is
/// the better attempt: fewer uncovered cells first, then fewer unmet
/// adjacency requirements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct StageCheck {
    /// Cells in the zone still holding the placement marker.
    pub uncovered_cells: usize,
    /// Adjacency requirements that could not be resolved or are not met.
    pub unmet_adjacency: usize,
}

impl StageCheck {
    pub fn passed(&self) -> bool {
        self.uncovered_cells == 0 && self.unmet_adjacency == 0
    }
}

/// Category → room markers, in the order the rooms were placed.
pub type TypeIndex = BTreeMap<RoomType, Vec<i32>>;

/// Build the category lookup used to resolve adjacency requirements.
pub fn type_index<'a>(rooms: impl IntoIterator<Item = &'a RoomInstance>) -> TypeIndex {
    let mut index = TypeIndex::new();
    for room in rooms {
        index.entry(room.room_type()).or_default().push(room.marker());
    }
    index
}

/// Number of `room`'s adjacency requirements left unmet.
///
/// Each required category resolves to the first room of that category other
/// than `room` itself. A category with no such room counts as unmet. The
/// resolved markers are then struck off while scanning the orthogonal
/// neighbours of every cell the room owns.
pub fn unmet_requirements(grid: &Grid, room: &RoomInstance, index: &TypeIndex) -> usize {
    let mut unresolved = 0;
    let mut pending: BTreeSet<i32> = BTreeSet::new();
    for required in &room.spec().neighbours {
        let resolved = index
            .get(required)
            .and_then(|markers| markers.iter().copied().find(|&m| m != room.marker()));
        match resolved {
            Some(marker) => {
                pending.insert(marker);
            }
            None => unresolved += 1,
        }
    }

    if !pending.is_empty() {
        'scan: for cell in grid.cells_with(room.marker()) {
            for n in grid.neighbours(cell) {
                pending.remove(&grid.get(n));
                if pending.is_empty() {
                    break 'scan;
                }
            }
        }
    }

    unresolved + pending.len()
}

/// Validate a stage attempt: coverage of `valid_placement` plus adjacency of
/// every room in `stage_rooms`. `committed_rooms` are rooms from earlier stages
/// that requirements may also resolve to.
pub fn check_stage(
    grid: &Grid,
    valid_placement: i32,
    stage_rooms: &[RoomInstance],
    committed_rooms: &[RoomInstance],
) -> StageCheck {
    let index = type_index(committed_rooms.iter().chain(stage_rooms.iter()));
    StageCheck {
        uncovered_cells: grid.count(valid_placement),
        unmet_adjacency: stage_rooms
            .iter()
            .map(|room| unmet_requirements(grid, room, &index))
            .sum(),
    }
}

/// Whether the cells holding `marker` form one 4-connected region.
/// An absent marker counts as contiguous.
pub fn is_contiguous(grid: &Grid, marker: i32) -> bool {
    let cells: Vec<usize> = grid.cells_with(marker).collect();
    let Some(&start) = cells.first() else {
        return true;
    };
    let mut seen = vec![false; grid.len()];
    let mut queue = VecDeque::from([start]);
    seen[start] = true;
    let mut reached = 1;
    while let Some(cell) = queue.pop_front() {
        for n in grid.neighbours(cell) {
            if !seen[n] && grid.get(n) == marker {
                seen[n] = true;
                reached += 1;
                queue.push_back(n);
            }
        }
    }
    reached == cells.len()
}

// ── Post-build audits ───────────────────────────────────────────────────

/// A problem found in a finished floor.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Issue severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Outside cells must still be outside, and nothing else may be.
pub fn check_outside_preserved(grid: &Grid, outside: &[usize]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let expected: BTreeSet<usize> = outside.iter().copied().collect();
    for &cell in &expected {
        if grid.get(cell) != markers::OUTSIDE {
            issues.push(ValidationIssue {
                category: "outside",
                severity: Severity::Error,
                message: format!(
                    "outside cell {:?} was reassigned to marker {}",
                    grid.coord(cell),
                    grid.get(cell)
                ),
            });
        }
    }
    for cell in grid.cells_with(markers::OUTSIDE) {
        if !expected.contains(&cell) {
            issues.push(ValidationIssue {
                category: "outside",
                severity: Severity::Error,
                message: format!("interior cell {:?} became outside", grid.coord(cell)),
            });
        }
    }
    issues
}

/// Every cell must hold a zone marker or the marker of a known room.
pub fn check_markers_known(grid: &Grid, rooms: &[RoomInstance]) -> Vec<ValidationIssue> {
    let known: BTreeSet<i32> = rooms.iter().map(RoomInstance::marker).collect();
    let mut issues = Vec::new();
    for (i, &m) in grid.cells().iter().enumerate() {
        if markers::is_room(m) && !known.contains(&m) {
            issues.push(ValidationIssue {
                category: "markers",
                severity: Severity::Error,
                message: format!("cell {:?} holds unknown room marker {}", grid.coord(i), m),
            });
        } else if m < markers::OUTSIDE {
            issues.push(ValidationIssue {
                category: "markers",
                severity: Severity::Error,
                message: format!("cell {:?} holds invalid marker {}", grid.coord(i), m),
            });
        }
    }
    issues
}

/// Cells left holding a zone marker. With `rooms_expected` false the zone
/// markers themselves are a valid final state and only `UNASSIGNED` counts.
pub fn check_coverage(
    grid: &Grid,
    private_rooms_expected: bool,
    public_rooms_expected: bool,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut leftover = |marker: i32, label: &str| {
        let count = grid.count(marker);
        if count > 0 {
            issues.push(ValidationIssue {
                category: "coverage",
                severity: Severity::Error,
                message: format!("{count} cells left {label}"),
            });
        }
    };
    leftover(markers::UNASSIGNED, "unassigned");
    if private_rooms_expected {
        leftover(markers::PRIVATE, "in the private zone without a room");
    }
    if public_rooms_expected {
        leftover(markers::PUBLIC, "in the public zone without a room");
    }
    issues
}

/// Adjacency requirements of every room, resolved against all rooms.
pub fn check_adjacency(grid: &Grid, rooms: &[RoomInstance]) -> Vec<ValidationIssue> {
    let index = type_index(rooms);
    rooms
        .iter()
        .filter_map(|room| {
            let unmet = unmet_requirements(grid, room, &index);
            (unmet > 0).then(|| ValidationIssue {
                category: "adjacency",
                severity: Severity::Error,
                message: format!(
                    "{} (marker {}) misses {} of {} required neighbours",
                    room.room_type().name(),
                    room.marker(),
                    unmet,
                    room.spec().neighbours.len()
                ),
            })
        })
        .collect()
}

/// Rooms should be a single 4-connected region with a non-empty footprint.
pub fn check_contiguity(grid: &Grid, rooms: &[RoomInstance]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for room in rooms {
        if grid.count(room.marker()) == 0 {
            issues.push(ValidationIssue {
                category: "room_geometry",
                severity: Severity::Warning,
                message: format!(
                    "{} (marker {}) claimed no cells",
                    room.room_type().name(),
                    room.marker()
                ),
            });
        } else if !is_contiguous(grid, room.marker()) {
            issues.push(ValidationIssue {
                category: "room_geometry",
                severity: Severity::Error,
                message: format!(
                    "{} (marker {}) is split into several regions",
                    room.room_type().name(),
                    room.marker()
                ),
            });
        }
    }
    issues
}

/// Phase A must stay within `max_area`; Phase B may grow past it.
/// Flags rooms whose area at the end of Phase A is over the cap.
pub fn check_rectangular_capacity(rooms: &[RoomInstance]) -> Vec<ValidationIssue> {
    rooms
        .iter()
        .filter(|room| room.state.rectangular_area > room.state.max_area.max(1))
        .map(|room| ValidationIssue {
            category: "capacity",
            severity: Severity::Warning,
            message: format!(
                "{} (marker {}) left Phase A with {} cells, cap {}",
                room.room_type().name(),
                room.marker(),
                room.state.rectangular_area,
                room.state.max_area
            ),
        })
        .collect()
}
