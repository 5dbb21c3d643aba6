//! Region growing.
//!
//! Rooms grow from their seed cell in two phases, both driven by the same
//! loop: pick a room from a pending pool (weighted by area ratio), let it try
//! one expansion, and drop it from the pool once it cannot grow.
//!
//! - **Phase A** only accepts runs that keep the footprint an axis-aligned
//!   rectangle and fit the room's remaining capacity.
//! - **Phase B** keeps taking rectangular runs while it can, then starts a
//!   one-run-wide tail off the bounding box and pushes that run outward in a
//!   locked direction until it hits something.
//!
//! An expansion candidate ("run") is a maximal contiguous strip of free cells
//! orthogonally adjacent to the room.

use std::collections::BTreeSet;

use rand::Rng;

use crate::grid::{Grid, NEIGHBOUR_OFFSETS};
use crate::room::{Direction, RoomInstance};
use crate::weighted::{pick_uniform, weighted_choice};

/// Whether each phase emptied its pool before hitting the iteration bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthReport {
    pub rectangular_settled: bool,
    pub l_shaped_settled: bool,
}

/// Axis-aligned bounding box of a footprint, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl BoundingBox {
    /// Bounding box of `cells`, or `None` when empty.
    pub fn of(grid: &Grid, cells: &[usize]) -> Option<Self> {
        let mut iter = cells.iter().map(|&i| grid.coord(i));
        let (x, y) = iter.next()?;
        let mut bb = BoundingBox {
            min_x: x as i32,
            max_x: x as i32,
            min_y: y as i32,
            max_y: y as i32,
        };
        for (x, y) in iter {
            bb.min_x = bb.min_x.min(x as i32);
            bb.max_x = bb.max_x.max(x as i32);
            bb.min_y = bb.min_y.min(y as i32);
            bb.max_y = bb.max_y.max(y as i32);
        }
        Some(bb)
    }

    pub fn width(&self) -> usize {
        (self.max_x - self.min_x + 1) as usize
    }

    pub fn height(&self) -> usize {
        (self.max_y - self.min_y + 1) as usize
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }
}

/// Orientation of a run's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Single { x: i32, y: i32 },
    Row { y: i32, min_x: i32, max_x: i32 },
    Column { x: i32, min_y: i32, max_y: i32 },
}

fn axis_of(grid: &Grid, run: &[usize]) -> Axis {
    let coords: Vec<(i32, i32)> = run
        .iter()
        .map(|&i| {
            let (x, y) = grid.coord(i);
            (x as i32, y as i32)
        })
        .collect();
    let (x0, y0) = coords[0];
    if coords.len() == 1 {
        return Axis::Single { x: x0, y: y0 };
    }
    if coords.iter().all(|&(_, y)| y == y0) {
        let min_x = coords.iter().map(|c| c.0).min().unwrap_or(x0);
        let max_x = coords.iter().map(|c| c.0).max().unwrap_or(x0);
        Axis::Row { y: y0, min_x, max_x }
    } else {
        let min_y = coords.iter().map(|c| c.1).min().unwrap_or(y0);
        let max_y = coords.iter().map(|c| c.1).max().unwrap_or(y0);
        Axis::Column { x: x0, min_y, max_y }
    }
}

/// Cells owned by `marker`, ascending.
pub fn footprint(grid: &Grid, marker: i32) -> Vec<usize> {
    grid.cells_with(marker).collect()
}

/// Maximal runs of `valid_placement` cells orthogonally adjacent to `marker`.
///
/// Cells are consumed lowest index first. A cell whose right neighbour (same
/// row) is also free starts a horizontal run, otherwise one whose lower
/// neighbour is free starts a vertical run, otherwise it stands alone.
pub fn expansion_runs(grid: &Grid, marker: i32, valid_placement: i32) -> Vec<Vec<usize>> {
    let mut free: BTreeSet<usize> = BTreeSet::new();
    for cell in grid.cells_with(marker) {
        free.extend(grid.neighbours(cell).filter(|&n| grid.get(n) == valid_placement));
    }

    let mut runs = Vec::new();
    while let Some(start) = free.pop_first() {
        let step = if grid.offset(start, 1, 0).is_some_and(|n| free.contains(&n)) {
            Some((1, 0))
        } else if grid.offset(start, 0, 1).is_some_and(|n| free.contains(&n)) {
            Some((0, 1))
        } else {
            None
        };

        let mut run = vec![start];
        if let Some((dx, dy)) = step {
            let mut cur = start;
            while let Some(next) = grid.offset(cur, dx, dy) {
                if !free.remove(&next) {
                    break;
                }
                run.push(next);
                cur = next;
            }
        }
        runs.push(run);
    }
    runs
}

/// Whether claiming `run` leaves a rectangular footprint a rectangle: the
/// run must cover one full side of the bounding box, directly outside it.
pub fn is_rectangle_preserving(
    grid: &Grid,
    bbox: &BoundingBox,
    footprint_len: usize,
    run: &[usize],
) -> bool {
    if footprint_len != bbox.area() {
        return false;
    }
    let spans_row = |y: i32, min_x: i32, max_x: i32| {
        (y == bbox.min_y - 1 || y == bbox.max_y + 1) && min_x == bbox.min_x && max_x == bbox.max_x
    };
    let spans_column = |x: i32, min_y: i32, max_y: i32| {
        (x == bbox.min_x - 1 || x == bbox.max_x + 1) && min_y == bbox.min_y && max_y == bbox.max_y
    };
    match axis_of(grid, run) {
        Axis::Single { x, y } => spans_row(y, x, x) || spans_column(x, y, y),
        Axis::Row { y, min_x, max_x } => spans_row(y, min_x, max_x),
        Axis::Column { x, min_y, max_y } => spans_column(x, min_y, max_y),
    }
}

/// Whether `run` lies just outside one side of the bounding box and within
/// that side's extent. Looser than [`is_rectangle_preserving`]: partial sides
/// qualify.
pub fn touches_bounding_edge(grid: &Grid, bbox: &BoundingBox, run: &[usize]) -> bool {
    let on_row = |y: i32, min_x: i32, max_x: i32| {
        (y == bbox.min_y - 1 || y == bbox.max_y + 1) && min_x >= bbox.min_x && max_x <= bbox.max_x
    };
    let on_column = |x: i32, min_y: i32, max_y: i32| {
        (x == bbox.min_x - 1 || x == bbox.max_x + 1) && min_y >= bbox.min_y && max_y <= bbox.max_y
    };
    match axis_of(grid, run) {
        Axis::Single { x, y } => on_row(y, x, x) || on_column(x, y, y),
        Axis::Row { y, min_x, max_x } => on_row(y, min_x, max_x),
        Axis::Column { x, min_y, max_y } => on_column(x, min_y, max_y),
    }
}

/// Largest candidate, ties broken uniformly.
fn pick_largest(rng: &mut impl Rng, mut candidates: Vec<Vec<usize>>) -> Option<Vec<usize>> {
    let best = candidates.iter().map(Vec::len).max()?;
    candidates.retain(|c| c.len() == best);
    let i = pick_uniform(rng, candidates.len())?;
    Some(candidates.swap_remove(i))
}

fn claim(grid: &mut Grid, room: &mut RoomInstance, run: &[usize]) {
    for &cell in run {
        grid.set(cell, room.marker());
    }
    room.state.current_area += run.len();
}

/// Direction pointing away from the room body that `run` was claimed against.
fn lock_direction(grid: &Grid, marker: i32, run: &[usize]) -> Option<Direction> {
    let first = *run.first()?;
    let offsets: &[(i32, i32)] = match axis_of(grid, run) {
        Axis::Single { .. } => &NEIGHBOUR_OFFSETS,
        Axis::Row { .. } => &NEIGHBOUR_OFFSETS[..2],
        Axis::Column { .. } => &NEIGHBOUR_OFFSETS[2..],
    };
    offsets.iter().find_map(|&(dx, dy)| {
        let owned = grid.offset(first, dx, dy)?;
        if grid.get(owned) == marker {
            Direction::from_delta(dx, dy).map(Direction::opposite)
        } else {
            None
        }
    })
}

/// One Phase A step: claim the largest rectangle-preserving run that fits.
pub fn grow_rectangular_step(
    grid: &mut Grid,
    rng: &mut impl Rng,
    room: &mut RoomInstance,
    valid_placement: i32,
) -> bool {
    let remaining = room.state.remaining();
    claim_rectangle_run(grid, rng, room, valid_placement, Some(remaining))
}

/// Claim the largest rectangle-preserving run, no longer than `limit` when set.
fn claim_rectangle_run(
    grid: &mut Grid,
    rng: &mut impl Rng,
    room: &mut RoomInstance,
    valid_placement: i32,
    limit: Option<usize>,
) -> bool {
    let cells = footprint(grid, room.marker());
    let Some(bbox) = BoundingBox::of(grid, &cells) else {
        return false;
    };
    let candidates: Vec<Vec<usize>> = expansion_runs(grid, room.marker(), valid_placement)
        .into_iter()
        .filter(|run| limit.map_or(true, |limit| run.len() <= limit))
        .filter(|run| is_rectangle_preserving(grid, &bbox, cells.len(), run))
        .collect();

    match pick_largest(rng, candidates) {
        Some(run) => {
            claim(grid, room, &run);
            true
        }
        None => false,
    }
}

/// One Phase B step: rectangular growth while possible, then an L-shaped tail.
///
/// The capacity cap only binds Phase A; here rectangles keep growing until no
/// full side is free.
pub fn grow_l_step(
    grid: &mut Grid,
    rng: &mut impl Rng,
    room: &mut RoomInstance,
    valid_placement: i32,
) -> bool {
    if room.state.l_started {
        return extend_tail(grid, room, valid_placement);
    }

    if claim_rectangle_run(grid, rng, room, valid_placement, None) {
        return true;
    }

    let cells = footprint(grid, room.marker());
    let Some(bbox) = BoundingBox::of(grid, &cells) else {
        return false;
    };
    let candidates: Vec<Vec<usize>> = expansion_runs(grid, room.marker(), valid_placement)
        .into_iter()
        .filter(|run| touches_bounding_edge(grid, &bbox, run))
        .collect();
    let Some(run) = pick_largest(rng, candidates) else {
        return false;
    };

    let direction = lock_direction(grid, room.marker(), &run);
    claim(grid, room, &run);
    room.state.l_started = true;
    room.state.direction = direction;
    room.state.last_run = run;
    true
}

/// Push the last tail run one step further in the locked direction.
fn extend_tail(grid: &mut Grid, room: &mut RoomInstance, valid_placement: i32) -> bool {
    let Some(direction) = room.state.direction else {
        return false;
    };
    let (dx, dy) = direction.delta();

    let mut next = Vec::with_capacity(room.state.last_run.len());
    for &cell in &room.state.last_run {
        // Off the grid edge: stop rather than wrap into another row.
        let Some(moved) = grid.offset(cell, dx, dy) else {
            return false;
        };
        if grid.get(moved) != valid_placement {
            return false;
        }
        next.push(moved);
    }

    claim(grid, room, &next);
    room.state.last_run = next;
    true
}

/// Shared room-picking loop. Returns `true` if the pool emptied before
/// `max_iterations` picks.
fn run_phase<R: Rng>(
    grid: &mut Grid,
    rng: &mut R,
    rooms: &mut [RoomInstance],
    max_iterations: u32,
    mut step: impl FnMut(&mut Grid, &mut R, &mut RoomInstance) -> bool,
) -> bool {
    let mut pool: Vec<usize> = (0..rooms.len()).collect();
    for _ in 0..max_iterations {
        if pool.is_empty() {
            return true;
        }
        let Ok(k) = weighted_choice(rng, &pool, |&r| rooms[r].weight()) else {
            break;
        };
        if !step(grid, rng, &mut rooms[pool[k]]) {
            pool.remove(k);
        }
    }
    if pool.is_empty() {
        return true;
    }
    log::trace!(
        "growth loop hit {} iterations with {} rooms still growable",
        max_iterations,
        pool.len()
    );
    false
}

/// Phase A over a batch.
pub fn grow_rectangular(
    grid: &mut Grid,
    rng: &mut impl Rng,
    rooms: &mut [RoomInstance],
    valid_placement: i32,
    max_iterations: u32,
) -> bool {
    run_phase(grid, rng, rooms, max_iterations, |g, r, room| {
        grow_rectangular_step(g, r, room, valid_placement)
    })
}

/// Phase B over a batch.
pub fn grow_l_shaped(
    grid: &mut Grid,
    rng: &mut impl Rng,
    rooms: &mut [RoomInstance],
    valid_placement: i32,
    max_iterations: u32,
) -> bool {
    run_phase(grid, rng, rooms, max_iterations, |g, r, room| {
        grow_l_step(g, r, room, valid_placement)
    })
}

/// Run Phase A then Phase B on rooms whose seeds are already claimed.
pub fn grow_rooms(
    grid: &mut Grid,
    rng: &mut impl Rng,
    rooms: &mut [RoomInstance],
    valid_placement: i32,
    max_iterations: u32,
) -> GrowthReport {
    let rectangular_settled = grow_rectangular(grid, rng, rooms, valid_placement, max_iterations);
    for room in rooms.iter_mut() {
        room.state.rectangular_area = room.state.current_area;
    }
    let l_shaped_settled = grow_l_shaped(grid, rng, rooms, valid_placement, max_iterations);
    GrowthReport {
        rectangular_settled,
        l_shaped_settled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::markers;
    use crate::room::{RoomSpec, RoomType};
    use crate::validation::is_contiguous;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const FREE: i32 = markers::UNASSIGNED;

    fn room_at(
        grid: &mut Grid,
        marker: i32,
        cells: &[(usize, usize)],
        max_area: usize,
    ) -> RoomInstance {
        let mut room = RoomInstance::new(RoomSpec::new(RoomType::Bedroom, 1), marker);
        for &(x, y) in cells {
            let i = grid.index(x, y);
            grid.set(i, marker);
        }
        room.state.max_area = max_area;
        room.state.current_area = cells.len();
        room
    }

    fn sorted_lengths(runs: &[Vec<usize>]) -> Vec<usize> {
        let mut lens: Vec<usize> = runs.iter().map(Vec::len).collect();
        lens.sort_unstable();
        lens
    }

    #[test]
    fn single_seed_has_four_singleton_runs() {
        let mut grid = Grid::new(5, 5);
        grid.set(12, 3);
        let runs = expansion_runs(&grid, 3, FREE);
        assert_eq!(sorted_lengths(&runs), vec![1, 1, 1, 1]);
    }

    #[test]
    fn domino_runs_merge_along_long_sides() {
        let mut grid = Grid::new(6, 5);
        let _ = room_at(&mut grid, 3, &[(2, 2), (3, 2)], 10);
        let runs = expansion_runs(&grid, 3, FREE);
        assert_eq!(sorted_lengths(&runs), vec![1, 1, 2, 2]);
    }

    #[test]
    fn runs_never_wrap_across_rows() {
        // Free cells 4 (end of row 0) and 5 (start of row 1) are consecutive
        // indices but not neighbours.
        let mut grid = Grid::new(5, 3);
        grid.set(0, 3);
        grid.set(9, 3);
        let runs = expansion_runs(&grid, 3, FREE);
        for run in &runs {
            assert!(
                !(run.contains(&4) && run.contains(&5)),
                "run {run:?} wraps a row boundary"
            );
        }
        assert_eq!(sorted_lengths(&runs), vec![1, 1, 1, 1, 1]);
    }

    #[test]
    fn rectangle_preserving_requires_full_side() {
        let mut grid = Grid::new(6, 6);
        let _ = room_at(&mut grid, 3, &[(2, 2), (3, 2), (2, 3), (3, 3)], 20);
        let cells = footprint(&grid, 3);
        let bbox = BoundingBox::of(&grid, &cells).unwrap();
        assert_eq!(bbox.area(), 4);

        let full_top = vec![grid.index(2, 1), grid.index(3, 1)];
        let half_top = vec![grid.index(2, 1)];
        let full_left = vec![grid.index(1, 2), grid.index(1, 3)];
        assert!(is_rectangle_preserving(&grid, &bbox, 4, &full_top));
        assert!(!is_rectangle_preserving(&grid, &bbox, 4, &half_top));
        assert!(is_rectangle_preserving(&grid, &bbox, 4, &full_left));

        assert!(touches_bounding_edge(&grid, &bbox, &half_top));
        assert!(touches_bounding_edge(&grid, &bbox, &full_top));
    }

    #[test]
    fn single_cell_preserves_only_a_one_wide_side() {
        let mut grid = Grid::new(6, 6);
        let _ = room_at(&mut grid, 3, &[(2, 1), (2, 2), (2, 3)], 20);
        let cells = footprint(&grid, 3);
        let bbox = BoundingBox::of(&grid, &cells).unwrap();
        // Above the column: the side is one cell wide.
        assert!(is_rectangle_preserving(&grid, &bbox, 3, &[grid.index(2, 0)]));
        // Beside the corner cell: only part of a three-cell side.
        assert!(!is_rectangle_preserving(&grid, &bbox, 3, &[grid.index(1, 1)]));
    }

    #[test]
    fn non_rectangular_footprint_never_preserves() {
        let mut grid = Grid::new(6, 6);
        let _ = room_at(&mut grid, 3, &[(1, 1), (2, 1), (1, 2)], 20);
        let cells = footprint(&grid, 3);
        let bbox = BoundingBox::of(&grid, &cells).unwrap();
        let below = vec![grid.index(1, 3), grid.index(2, 3)];
        assert!(!is_rectangle_preserving(&grid, &bbox, cells.len(), &below));
    }

    #[test]
    fn rectangular_step_respects_capacity() {
        let mut grid = Grid::new(6, 6);
        let mut room = room_at(&mut grid, 3, &[(2, 2), (3, 2), (2, 3), (3, 3)], 5);
        let mut rng = StdRng::seed_from_u64(1);
        // Every side run is two cells; one cell of capacity is left.
        assert!(!grow_rectangular_step(&mut grid, &mut rng, &mut room, FREE));
        assert_eq!(room.state.current_area, 4);

        room.state.max_area = 6;
        assert!(grow_rectangular_step(&mut grid, &mut rng, &mut room, FREE));
        assert_eq!(room.state.current_area, 6);
        assert_eq!(grid.count(3), 6);
        let cells = footprint(&grid, 3);
        assert_eq!(BoundingBox::of(&grid, &cells).unwrap().area(), 6);
    }

    #[test]
    fn l_tail_locks_direction_and_stops_at_edge() {
        // row0: R R X .
        // row1: X . . .
        // row2: . . . .
        let mut grid = Grid::new(4, 3);
        grid.set(grid.index(2, 0), markers::OUTSIDE);
        grid.set(grid.index(0, 1), markers::OUTSIDE);
        let mut room = room_at(&mut grid, 3, &[(0, 0), (1, 0)], 2);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(grow_l_step(&mut grid, &mut rng, &mut room, FREE));
        assert!(room.state.l_started);
        assert_eq!(room.state.direction, Some(Direction::Down));
        assert_eq!(room.state.last_run, vec![grid.index(1, 1)]);

        assert!(grow_l_step(&mut grid, &mut rng, &mut room, FREE));
        assert_eq!(room.state.last_run, vec![grid.index(1, 2)]);

        assert!(!grow_l_step(&mut grid, &mut rng, &mut room, FREE));
        assert_eq!(room.state.current_area, 4);
        assert_eq!(
            footprint(&grid, 3),
            vec![grid.index(0, 0), grid.index(1, 0), grid.index(1, 1), grid.index(1, 2)]
        );
    }

    #[test]
    fn l_step_grows_rectangles_past_capacity() {
        let mut grid = Grid::new(6, 6);
        let mut room = room_at(&mut grid, 3, &[(2, 2), (3, 2), (2, 3), (3, 3)], 4);
        let mut rng = StdRng::seed_from_u64(2);
        assert!(!grow_rectangular_step(&mut grid, &mut rng, &mut room, FREE));

        assert!(grow_l_step(&mut grid, &mut rng, &mut room, FREE));
        assert!(!room.state.l_started);
        assert_eq!(room.state.current_area, 6);
        let cells = footprint(&grid, 3);
        assert_eq!(BoundingBox::of(&grid, &cells).unwrap().area(), 6);
    }

    #[test]
    fn l_tail_translates_multi_cell_runs() {
        // row0: R R R X .
        // row1: . . X . .
        // row2: . . . . .
        // row3: . . . . .
        let mut grid = Grid::new(5, 4);
        grid.set(grid.index(3, 0), markers::OUTSIDE);
        grid.set(grid.index(2, 1), markers::OUTSIDE);
        let mut room = room_at(&mut grid, 3, &[(0, 0), (1, 0), (2, 0)], 3);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(grow_l_step(&mut grid, &mut rng, &mut room, FREE));
        assert!(room.state.l_started);
        assert_eq!(room.state.direction, Some(Direction::Down));
        assert_eq!(room.state.last_run, vec![grid.index(0, 1), grid.index(1, 1)]);

        assert!(grow_l_step(&mut grid, &mut rng, &mut room, FREE));
        assert_eq!(room.state.last_run, vec![grid.index(0, 2), grid.index(1, 2)]);
        assert!(grow_l_step(&mut grid, &mut rng, &mut room, FREE));
        assert_eq!(room.state.last_run, vec![grid.index(0, 3), grid.index(1, 3)]);

        assert!(!grow_l_step(&mut grid, &mut rng, &mut room, FREE));
        assert_eq!(room.state.current_area, 9);
        assert_eq!(grid.count(3), 9);
        assert!(is_contiguous(&grid, 3));
    }

    #[test]
    fn column_tail_locks_sideways() {
        // R . .
        // R . .
        // R X .
        // X . .
        let mut grid = Grid::new(3, 4);
        grid.set(grid.index(1, 2), markers::OUTSIDE);
        grid.set(grid.index(0, 3), markers::OUTSIDE);
        let mut room = room_at(&mut grid, 3, &[(0, 0), (0, 1), (0, 2)], 3);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(grow_l_step(&mut grid, &mut rng, &mut room, FREE));
        assert_eq!(room.state.direction, Some(Direction::Right));
        assert_eq!(room.state.last_run, vec![grid.index(1, 0), grid.index(1, 1)]);

        assert!(grow_l_step(&mut grid, &mut rng, &mut room, FREE));
        assert_eq!(room.state.last_run, vec![grid.index(2, 0), grid.index(2, 1)]);
        assert!(!grow_l_step(&mut grid, &mut rng, &mut room, FREE));
        assert_eq!(grid.count(3), 7);
    }

    #[test]
    fn l_tail_stops_at_claimed_cells() {
        // row0: R R R X .
        // row1: . . X . .
        // row2: . . . . .
        // row3: . 4 . . .
        let mut grid = Grid::new(5, 4);
        grid.set(grid.index(3, 0), markers::OUTSIDE);
        grid.set(grid.index(2, 1), markers::OUTSIDE);
        grid.set(grid.index(1, 3), 4);
        let mut room = room_at(&mut grid, 3, &[(0, 0), (1, 0), (2, 0)], 3);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(grow_l_step(&mut grid, &mut rng, &mut room, FREE));
        assert!(grow_l_step(&mut grid, &mut rng, &mut room, FREE));
        assert!(!grow_l_step(&mut grid, &mut rng, &mut room, FREE));
        assert_eq!(grid.count(3), 7);
        assert_eq!(grid.get(grid.index(0, 3)), FREE);
    }

    #[test]
    fn rectangular_phase_keeps_rectangles_within_capacity() {
        for seed in 0..30 {
            let mut grid = Grid::new(12, 9);
            let mut rooms = vec![
                RoomInstance::new(RoomSpec::new(RoomType::Bedroom, 3), 3),
                RoomInstance::new(RoomSpec::new(RoomType::Kitchen, 2), 4),
                RoomInstance::new(RoomSpec::new(RoomType::Bathroom, 1), 5),
            ];
            let available = grid.count(FREE);
            let seeds = [grid.index(1, 1), grid.index(8, 2), grid.index(4, 7)];
            for (room, &cell) in rooms.iter_mut().zip(seeds.iter()) {
                room.reset(available, 6);
                grid.set(cell, room.marker());
            }
            let mut rng = StdRng::seed_from_u64(seed);
            grow_rectangular(&mut grid, &mut rng, &mut rooms, FREE, 100);

            for room in &rooms {
                let cells = footprint(&grid, room.marker());
                assert_eq!(cells.len(), room.state.current_area);
                assert!(cells.len() <= room.state.max_area.max(1));
                let bbox = BoundingBox::of(&grid, &cells).unwrap();
                assert_eq!(bbox.area(), cells.len(), "seed {seed}: not a rectangle");
            }
        }
    }

    #[test]
    fn grown_rooms_stay_contiguous() {
        for seed in 0..30 {
            let mut grid = Grid::new(10, 8);
            let mut rooms = vec![
                RoomInstance::new(RoomSpec::new(RoomType::Bedroom, 2), 3),
                RoomInstance::new(RoomSpec::new(RoomType::LivingRoom, 2), 4),
            ];
            let available = grid.count(FREE);
            for (room, cell) in rooms.iter_mut().zip([grid.index(2, 2), grid.index(7, 5)]) {
                room.reset(available, 4);
                grid.set(cell, room.marker());
            }
            let mut rng = StdRng::seed_from_u64(seed);
            grow_rooms(&mut grid, &mut rng, &mut rooms, FREE, 100);
            for room in &rooms {
                assert!(is_contiguous(&grid, room.marker()), "seed {seed}");
                assert_eq!(grid.count(room.marker()), room.state.current_area);
                assert!(room.state.rectangular_area <= room.state.max_area.max(1));
            }
        }
    }
}
