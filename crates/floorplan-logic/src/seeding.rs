//! Seed-cell selection.
//!
//! Each room in a batch gets one founding cell, picked in batch order by a
//! weighted draw over the cells still holding the stage's placement marker.
//! Weights encode three preferences:
//! - keep a clearance from walls that grows with the room's share of area;
//! - seed next to (but not on top of) an earlier room this one must touch,
//!   and stay off the 3×3 block around unrelated earlier seeds;
//! - hallways must start on a cell touching the public zone.

use rand::Rng;

use crate::constants::{markers, tuning};
use crate::error::Result;
use crate::grid::Grid;
use crate::room::{total_weight, RoomInstance, RoomType};
use crate::weighted::weighted_index;

/// Pick one seed cell per room, in order. The grid is not modified.
pub fn find_room_seeds(
    grid: &Grid,
    rng: &mut impl Rng,
    valid_placement: i32,
    rooms: &[RoomInstance],
) -> Result<Vec<usize>> {
    let available_area = grid.count(valid_placement);
    let total = total_weight(rooms);
    let mut seeds: Vec<usize> = Vec::with_capacity(rooms.len());

    for room in rooms {
        let area_to_take = room.weight() as f32 / total.max(1) as f32 * available_area as f32;
        let wall_dist = (tuning::WALL_CLEARANCE_FACTOR * area_to_take.sqrt()) as i32;

        let mut weights = vec![0u32; grid.len()];
        for (i, w) in weights.iter_mut().enumerate() {
            if grid.get(i) == valid_placement && has_clearance(grid, i, valid_placement, wall_dist)
            {
                *w = 1;
            }
        }

        for (earlier, &seed) in rooms.iter().zip(seeds.iter()) {
            if room.spec().requires(earlier.room_type()) {
                apply_adjacency_bonus(grid, &mut weights, seed, valid_placement);
            } else {
                suppress_around(grid, &mut weights, seed);
            }
        }

        if room.room_type() == RoomType::Hallway {
            for (i, w) in weights.iter_mut().enumerate() {
                *w = if grid.get(i) == valid_placement && grid.touches(i, markers::PUBLIC) {
                    (*w).max(1)
                } else {
                    0
                };
            }
        }

        for &seed in &seeds {
            weights[seed] = 0;
        }

        let seed = weighted_index(rng, &weights)?;
        log::trace!(
            "seeded {:?} (marker {}) at {:?}, wall clearance {}",
            room.room_type(),
            room.marker(),
            grid.coord(seed),
            wall_dist
        );
        seeds.push(seed);
    }

    Ok(seeds)
}

/// Whether the square of radius `wall_dist` around `index` lies fully inside
/// the grid and fully on `valid_placement` cells.
fn has_clearance(grid: &Grid, index: usize, valid_placement: i32, wall_dist: i32) -> bool {
    for dy in -wall_dist..=wall_dist {
        for dx in -wall_dist..=wall_dist {
            match grid.offset(index, dx, dy) {
                Some(n) if grid.get(n) == valid_placement => {}
                _ => return false,
            }
        }
    }
    true
}

/// Replace weights in the Chebyshev ring around `seed` with
/// `(distance - 1) * ADJACENCY_BONUS`: zero right next to it, a strong pull
/// one cell further out.
fn apply_adjacency_bonus(grid: &Grid, weights: &mut [u32], seed: usize, valid_placement: i32) {
    let r = tuning::ADJACENCY_RADIUS;
    for dy in -r..=r {
        for dx in -r..=r {
            let Some(n) = grid.offset(seed, dx, dy) else {
                continue;
            };
            if grid.get(n) != valid_placement {
                continue;
            }
            let distance = dx.abs().max(dy.abs());
            weights[n] = ((distance - 1).max(0) as u32) * tuning::ADJACENCY_BONUS;
        }
    }
}

/// Zero the 3×3 block centred on `seed`.
fn suppress_around(grid: &Grid, weights: &mut [u32], seed: usize) {
    for dy in -1..=1 {
        for dx in -1..=1 {
            if let Some(n) = grid.offset(seed, dx, dy) {
                weights[n] = 0;
            }
        }
    }
}
