//! Wall extraction and ASCII rendering.
//!
//! Renderer-agnostic: a viewer turns [`WallSegment`]s into meshes, the
//! simulation harness prints [`render_ascii`]. Nothing here touches the grid.

use serde::{Deserialize, Serialize};

use crate::constants::markers;
use crate::floor::Floor;
use crate::grid::Grid;

/// Cell side a wall runs along. `North` is towards row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    North,
    South,
    West,
    East,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::West, Side::East];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Side::North => (0, -1),
            Side::South => (0, 1),
            Side::West => (-1, 0),
            Side::East => (1, 0),
        }
    }
}

/// What a wall separates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallKind {
    /// Between the building and the grid edge or an outside cell.
    Exterior,
    /// Between two regions with different markers.
    Interior,
}

/// One unit-length wall on one side of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallSegment {
    pub x: usize,
    pub y: usize,
    pub side: Side,
    pub kind: WallKind,
}

/// Every wall of the grid, row-major.
///
/// A wall between two inside cells is reported once, on the north or west
/// side of the later cell.
pub fn extract_walls(grid: &Grid) -> Vec<WallSegment> {
    let mut walls = Vec::new();
    for index in 0..grid.len() {
        let marker = grid.get(index);
        if marker == markers::OUTSIDE {
            continue;
        }
        let (x, y) = grid.coord(index);
        for side in Side::ALL {
            let (dx, dy) = side.delta();
            let kind = match grid.offset(index, dx, dy).map(|n| grid.get(n)) {
                None | Some(markers::OUTSIDE) => WallKind::Exterior,
                Some(other) if other != marker => {
                    if matches!(side, Side::South | Side::East) {
                        continue;
                    }
                    WallKind::Interior
                }
                Some(_) => continue,
            };
            walls.push(WallSegment { x, y, side, kind });
        }
    }
    walls
}

/// Glyph for one cell of a finished floor.
fn cell_glyph(floor: &Floor, marker: i32) -> char {
    match marker {
        markers::OUTSIDE => '#',
        markers::UNASSIGNED => '.',
        markers::PRIVATE => '-',
        markers::PUBLIC => '+',
        m => floor
            .room(m)
            .map(|room| room.room_type().glyph())
            .unwrap_or('?'),
    }
}

/// One line per row, one glyph per cell: `#` outside, `.` unassigned,
/// `-`/`+` private/public zone, room-type glyphs for rooms.
pub fn render_ascii(floor: &Floor) -> String {
    let grid = floor.grid();
    let mut out = String::with_capacity(grid.len() + grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            out.push(cell_glyph(floor, grid.get(grid.index(x, y))));
        }
        out.push('\n');
    }
    out
}
