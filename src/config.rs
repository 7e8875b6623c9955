//! Compile-time game constants and the runtime timing knobs the driver uses.

// --- Field ---
pub const FIELD_WIDTH: u8 = 8;
pub const FIELD_HEIGHT: u8 = 16;
pub const TOP_ROW: u8 = FIELD_HEIGHT - 1;

// --- Base ---
pub const BASE_START: u8 = 3;
pub const BASE_MAX: u8 = FIELD_WIDTH - 1;

// --- Projectiles ---
pub const MAX_PROJECTILES: usize = 4;
/// Projectiles appear two rows above the base row.
pub const PROJECTILE_SPAWN_ROW: u8 = 2;

// --- Obstacles ---
pub const MAX_OBSTACLES: usize = 20;
/// Lowest row an obstacle may occupy when a game starts.
pub const INITIAL_OBSTACLE_MIN_ROW: u8 = 3;
/// Random draws tried before placement falls back to a scan.
pub const PLACEMENT_ATTEMPTS: u8 = 32;

// --- Score / lives ---
pub const MAX_LIFE_LOSSES: u8 = 4;
pub const SCORE_PER_HIT: u32 = 1;

// --- Timing (ms) ---
pub const PROJECTILE_INTERVAL_MS: u32 = 500;
pub const OBSTACLE_INTERVAL_MS: u32 = 500;
pub const DIFFICULTY_STEP_MS: u32 = 10;
pub const DIFFICULTY_SCORE_THRESHOLD: u32 = 10;
pub const MAX_DIFFICULTY_OFFSET_MS: u32 = 200;

/// Advance intervals and difficulty scaling used by [`crate::driver::GameLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub projectile_interval_ms: u32,
    pub obstacle_interval_ms: u32,
    pub difficulty_step_ms: u32,
    pub difficulty_threshold: u32,
    pub max_difficulty_offset_ms: u32,
}

impl Timing {
    /// Shortest obstacle interval this timing can reach.
    pub const fn obstacle_floor_ms(&self) -> u32 {
        self.obstacle_interval_ms
            .saturating_sub(self.max_difficulty_offset_ms)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            projectile_interval_ms: PROJECTILE_INTERVAL_MS,
            obstacle_interval_ms: OBSTACLE_INTERVAL_MS,
            difficulty_step_ms: DIFFICULTY_STEP_MS,
            difficulty_threshold: DIFFICULTY_SCORE_THRESHOLD,
            max_difficulty_offset_ms: MAX_DIFFICULTY_OFFSET_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_floor_is_300ms() {
        assert_eq!(Timing::default().obstacle_floor_ms(), 300);
    }

    #[test]
    fn floor_never_underflows() {
        let timing = Timing {
            max_difficulty_offset_ms: 10_000,
            ..Timing::default()
        };
        assert_eq!(timing.obstacle_floor_ms(), 0);
    }
}
