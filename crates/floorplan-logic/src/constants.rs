//! Zone markers and generation tuning constants.
//!
//! Every grid cell holds one `i32` marker. The four zone markers come first;
//! room markers are handed out from [`markers::FIRST_ROOM`] upwards, shared by
//! private and public rooms so indices never collide.

pub mod markers {
    /// Not part of the building. Set once at construction, never reassigned.
    pub const OUTSIDE: i32 = -1;
    /// Interior cell not yet claimed by either zone.
    pub const UNASSIGNED: i32 = 0;
    pub const PUBLIC: i32 = 1;
    pub const PRIVATE: i32 = 2;
    /// First marker handed to a room.
    pub const FIRST_ROOM: i32 = 3;

    /// True for markers that belong to a placed room.
    pub fn is_room(marker: i32) -> bool {
        marker >= FIRST_ROOM
    }
}

pub mod limits {
    /// Room picks per growth phase before the loop gives up.
    pub const MAX_GROW_ITERATIONS: u32 = 100;
    /// Seed/grow/validate attempts per stage.
    pub const MAX_STAGE_ATTEMPTS: u32 = 100;
}

pub mod tuning {
    /// Wall clearance is `floor(WALL_CLEARANCE_FACTOR * sqrt(area_to_take))`.
    pub const WALL_CLEARANCE_FACTOR: f32 = 0.2;
    /// Rectangular growth stops at this fraction of a room's area share.
    pub const CAPACITY_FACTOR: f32 = 0.5;
    /// Weight per Chebyshev step beyond the first around a required neighbour's seed.
    pub const ADJACENCY_BONUS: u32 = 7;
    /// Chebyshev radius of the adjacency bonus ring.
    pub const ADJACENCY_RADIUS: i32 = 2;
}
