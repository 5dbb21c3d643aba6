//! Flat marker grid.
//!
//! Cells are stored row-major (`index = y * width + x`). Every cell holds
//! exactly one marker from [`crate::constants::markers`] or a room marker.
//! Neighbour lookups are bounds-checked in coordinate space so a step off the
//! end of a row never lands on the start of the next one.

use serde::{Deserialize, Serialize};

use crate::constants::markers;

/// Orthogonal neighbour offsets: up, down, left, right.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Row-major grid of zone/room markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<i32>,
}

/// Saved copy of the marker array, restored when a stage attempt is rolled back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    cells: Vec<i32>,
}

impl Grid {
    /// Create a grid with every cell [`markers::UNASSIGNED`].
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![markers::UNASSIGNED; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of `(x, y)`. Callers must pass in-bounds coordinates.
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Coordinates of a flat index. Exact inverse of [`Grid::index`].
    pub fn coord(&self, index: usize) -> (usize, usize) {
        let y = index / self.width;
        (index - y * self.width, y)
    }

    /// Whether signed coordinates fall inside the grid.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Index of the cell at `(dx, dy)` from `index`, or `None` past any edge.
    pub fn offset(&self, index: usize, dx: i32, dy: i32) -> Option<usize> {
        let (x, y) = self.coord(index);
        let nx = x as i32 + dx;
        let ny = y as i32 + dy;
        if self.contains(nx, ny) {
            Some(self.index(nx as usize, ny as usize))
        } else {
            None
        }
    }

    /// In-bounds orthogonal neighbours of `index`.
    pub fn neighbours(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        NEIGHBOUR_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| self.offset(index, dx, dy))
    }

    /// Whether any orthogonal neighbour of `index` holds `marker`.
    pub fn touches(&self, index: usize, marker: i32) -> bool {
        self.neighbours(index).any(|n| self.cells[n] == marker)
    }

    pub fn get(&self, index: usize) -> i32 {
        self.cells[index]
    }

    pub fn set(&mut self, index: usize, marker: i32) {
        self.cells[index] = marker;
    }

    /// Raw marker array.
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    /// Number of cells holding `marker`.
    pub fn count(&self, marker: i32) -> usize {
        self.cells.iter().filter(|&&m| m == marker).count()
    }

    /// Indices of cells holding `marker`, ascending.
    pub fn cells_with(&self, marker: i32) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, &m)| m == marker)
            .map(|(i, _)| i)
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            cells: self.cells.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: &GridSnapshot) {
        self.cells.clone_from(&snapshot.cells);
    }
}
