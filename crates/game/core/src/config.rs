/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Map dimensions in cells.
    pub map_width: u32,
    pub map_height: u32,

    /// Turns between minion spawn waves.
    pub minion_spawn_interval: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of skills a champion carries.
    pub const MAX_SKILLS: usize = 3;

    // ===== simulation constants =====
    /// Numerator of the initiative delay formula: `delay = 100 / speed`.
    pub const BASE_ACTION_DELAY: u64 = 100;
    /// Champion level cap.
    pub const MAX_LEVEL: u32 = 20;
    /// Experience awarded to each nearby enemy champion on a champion kill.
    pub const KILL_EXPERIENCE: u32 = 50;
    /// Manhattan radius within which a champion kill awards experience.
    pub const EXPERIENCE_RADIUS: u32 = 3;
    /// Stat increments applied on each level-up.
    pub const LEVEL_HEALTH_BONUS: u32 = 20;
    pub const LEVEL_MANA_BONUS: u32 = 10;
    pub const LEVEL_ATTACK_BONUS: u32 = 5;
    /// Respawn countdown: `RESPAWN_BASE + RESPAWN_PER_LEVEL * level` turns.
    pub const RESPAWN_BASE: u32 = 10;
    pub const RESPAWN_PER_LEVEL: u32 = 2;
    /// Number of lanes on each side of the map.
    pub const LANES: usize = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAP_WIDTH: u32 = 70;
    pub const DEFAULT_MAP_HEIGHT: u32 = 35;
    pub const DEFAULT_SPAWN_INTERVAL: u32 = 10;

    pub fn new() -> Self {
        Self {
            map_width: Self::DEFAULT_MAP_WIDTH,
            map_height: Self::DEFAULT_MAP_HEIGHT,
            minion_spawn_interval: Self::DEFAULT_SPAWN_INTERVAL,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
