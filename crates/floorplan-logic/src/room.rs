//! Room categories, immutable room specs and per-build room state.
//!
//! A [`RoomSpec`] is what a plan declares. A [`RoomInstance`] pairs a spec with
//! the marker it owns on the grid and a [`GrowthState`] that the grower mutates
//! during a build. The `RoomSpec` itself is never touched after construction.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Semantic room category. Geometry never depends on it; it only drives
/// adjacency requirements, the hallway seeding rule and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoomType {
    /// Placeholder used for the private/public zone split.
    Empty,
    Bedroom,
    Bathroom,
    Hallway,
    LivingRoom,
    DiningRoom,
    Kitchen,
}

impl RoomType {
    pub fn name(self) -> &'static str {
        match self {
            RoomType::Empty => "Empty",
            RoomType::Bedroom => "Bedroom",
            RoomType::Bathroom => "Bathroom",
            RoomType::Hallway => "Hallway",
            RoomType::LivingRoom => "Living Room",
            RoomType::DiningRoom => "Dining Room",
            RoomType::Kitchen => "Kitchen",
        }
    }

    /// Single-character glyph for ASCII dumps.
    pub fn glyph(self) -> char {
        match self {
            RoomType::Empty => ' ',
            RoomType::Bedroom => 'B',
            RoomType::Bathroom => 'W',
            RoomType::Hallway => 'H',
            RoomType::LivingRoom => 'L',
            RoomType::DiningRoom => 'D',
            RoomType::Kitchen => 'K',
        }
    }
}

/// Declared room: category, area weight and required neighbour categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub room_type: RoomType,
    /// Relative share of the zone's area. Values ≤ 0 count as 1.
    pub area_ratio: i32,
    /// Categories this room must touch (4-adjacency) once placed.
    #[serde(default)]
    pub neighbours: BTreeSet<RoomType>,
}

impl RoomSpec {
    pub fn new(room_type: RoomType, area_ratio: i32) -> Self {
        Self {
            room_type,
            area_ratio,
            neighbours: BTreeSet::new(),
        }
    }

    /// Builder-style helper adding a required neighbour category.
    pub fn next_to(mut self, room_type: RoomType) -> Self {
        self.neighbours.insert(room_type);
        self
    }

    /// Area weight with non-positive ratios coerced to 1.
    pub fn weight(&self) -> u32 {
        self.area_ratio.max(1) as u32
    }

    pub fn requires(&self, room_type: RoomType) -> bool {
        self.neighbours.contains(&room_type)
    }
}

/// Locked growth direction of an L-shaped tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Cell offset `(dx, dy)` of one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Mutable state the grower keeps per room during one stage attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrowthState {
    /// Cap on Phase A rectangular growth. Counts the seed cell.
    pub max_area: usize,
    /// Cells claimed so far, seed included.
    pub current_area: usize,
    /// Area when Phase A finished, before Phase B grew the room further.
    pub rectangular_area: usize,
    /// Whether the L-shaped tail has started.
    pub l_started: bool,
    /// Last run claimed by the tail, in run order.
    pub last_run: Vec<usize>,
    /// Direction the tail keeps growing in.
    pub direction: Option<Direction>,
}

impl GrowthState {
    /// Fresh state for a room whose seed was just claimed.
    pub fn seeded(max_area: usize) -> Self {
        Self {
            max_area,
            current_area: 1,
            ..Self::default()
        }
    }

    /// Cells rectangular growth may still claim.
    pub fn remaining(&self) -> usize {
        self.max_area.saturating_sub(self.current_area)
    }
}

/// A room placed on the grid during a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInstance {
    spec: RoomSpec,
    marker: i32,
    pub state: GrowthState,
}

impl RoomInstance {
    pub fn new(spec: RoomSpec, marker: i32) -> Self {
        Self {
            spec,
            marker,
            state: GrowthState::default(),
        }
    }

    pub fn spec(&self) -> &RoomSpec {
        &self.spec
    }

    /// Grid marker owned by this room.
    pub fn marker(&self) -> i32 {
        self.marker
    }

    pub fn room_type(&self) -> RoomType {
        self.spec.room_type
    }

    pub fn weight(&self) -> u32 {
        self.spec.weight()
    }

    /// Cells claimed in the last build attempt.
    pub fn area(&self) -> usize {
        self.state.current_area
    }

    /// Clear growth state and set the rectangular cap from the zone's free area.
    ///
    /// `max_area = floor(0.5 * available_area * weight / total_weight)`.
    pub fn reset(&mut self, available_area: usize, total_weight: u32) {
        let share = available_area as f32 * self.weight() as f32 / total_weight.max(1) as f32;
        let max_area = (crate::constants::tuning::CAPACITY_FACTOR * share) as usize;
        self.state = GrowthState::seeded(max_area);
    }
}

/// Sum of area weights over a batch.
pub fn total_weight(rooms: &[RoomInstance]) -> u32 {
    rooms.iter().map(RoomInstance::weight).sum()
}
