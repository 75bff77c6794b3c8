//! Game constants configuration

use gear_core::Resistance;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use super::ConfigError;

/// Global game constants instance
static GAME_CONSTANTS: OnceLock<GameConstants> = OnceLock::new();

/// Initialize the global game constants from a TOML file
///
/// Must be called once at startup before creatures are built or attacks
/// resolved. Returns error if already initialized or if loading fails.
pub fn init_constants(path: &Path) -> Result<(), ConfigError> {
    let constants = GameConstants::load_from_path(path)?;
    GAME_CONSTANTS
        .set(constants)
        .map_err(|_| ConfigError::ValidationError("GameConstants already initialized".to_string()))
}

/// Initialize the global game constants with default values
///
/// Useful for tests or when no config file is available.
pub fn init_constants_default() -> Result<(), ConfigError> {
    GAME_CONSTANTS
        .set(GameConstants::default())
        .map_err(|_| ConfigError::ValidationError("GameConstants already initialized".to_string()))
}

/// Get a reference to the global game constants
///
/// Panics if constants have not been initialized via `init_constants()` or
/// `init_constants_default()`.
pub fn constants() -> &'static GameConstants {
    GAME_CONSTANTS
        .get()
        .expect("GameConstants not initialized - call init_constants() or init_constants_default() first")
}

/// Check if constants have been initialized
pub fn constants_initialized() -> bool {
    GAME_CONSTANTS.get().is_some()
}

/// Ensure constants are initialized with defaults (idempotent, useful for tests)
pub fn ensure_constants_initialized() {
    GAME_CONSTANTS.get_or_init(GameConstants::default);
}

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub buildup: BuildupConstants,
    #[serde(default)]
    pub level: LevelConstants,
    #[serde(default)]
    pub pools: PoolConstants,
}

impl GameConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let constants: GameConstants = toml::from_str(&content)?;
        Ok(constants)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildupConstants {
    /// Meter ceiling; reaching it triggers the overload debuff
    #[serde(default = "default_overload_threshold")]
    pub overload_threshold: i32,
    /// Per-turn decay is (decay_offset - damage_scale) / decay_divisor
    #[serde(default = "default_decay_offset")]
    pub decay_offset: i32,
    #[serde(default = "default_decay_divisor")]
    pub decay_divisor: i32,
    /// Debuff property id applied when a meter overloads, per damage type;
    /// unmapped types just reset their meter
    #[serde(default = "default_overload_properties")]
    pub overload_properties: HashMap<Resistance, u32>,
}

impl Default for BuildupConstants {
    fn default() -> Self {
        BuildupConstants {
            overload_threshold: 100,
            decay_offset: 200,
            decay_divisor: 10,
            overload_properties: default_overload_properties(),
        }
    }
}

fn default_overload_threshold() -> i32 {
    100
}
fn default_decay_offset() -> i32 {
    200
}
fn default_decay_divisor() -> i32 {
    10
}
fn default_overload_properties() -> HashMap<Resistance, u32> {
    // Bleed from slashing overload; other mappings come from config
    let mut map = HashMap::new();
    map.insert(Resistance::Slashing, 2334);
    map
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConstants {
    #[serde(default = "default_max_level")]
    pub max_level: u32,
    /// XP to next level is slope * level + base
    #[serde(default = "default_xp_slope")]
    pub xp_slope: u64,
    #[serde(default = "default_xp_base")]
    pub xp_base: u64,
    /// Unspent attribute points granted per level
    #[serde(default = "default_stat_points_per_level")]
    pub stat_points_per_level: u32,
}

impl Default for LevelConstants {
    fn default() -> Self {
        LevelConstants {
            max_level: 30,
            xp_slope: 20,
            xp_base: 10,
            stat_points_per_level: 2,
        }
    }
}

impl LevelConstants {
    /// XP required to go from `level` to `level + 1`
    pub fn xp_for_next_level(&self, level: u32) -> u64 {
        self.xp_slope * level as u64 + self.xp_base
    }

    /// Total XP required to reach `level` from level 0
    pub fn total_xp_for_level(&self, level: u32) -> u64 {
        let l = level as u64;
        self.xp_slope * (l * (l.saturating_sub(1)) / 2) + self.xp_base * l
    }
}

fn default_max_level() -> u32 {
    30
}
fn default_xp_slope() -> u64 {
    20
}
fn default_xp_base() -> u64 {
    10
}
fn default_stat_points_per_level() -> u32 {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConstants {
    /// Multiplier per point of positive attribute bonus
    #[serde(default = "default_growth_factor")]
    pub growth_factor: f64,
    /// Multiplier per point of negative attribute bonus
    #[serde(default = "default_shrink_factor")]
    pub shrink_factor: f64,
    /// Max HP never drops below this
    #[serde(default = "default_hp_floor")]
    pub hp_floor: i32,
    /// Max mana and max stamina never drop below this
    #[serde(default = "default_mana_stamina_floor")]
    pub mana_stamina_floor: i32,
}

impl Default for PoolConstants {
    fn default() -> Self {
        PoolConstants {
            growth_factor: 1.1,
            shrink_factor: 0.9,
            hp_floor: 1,
            mana_stamina_floor: 25,
        }
    }
}

fn default_growth_factor() -> f64 {
    1.1
}
fn default_shrink_factor() -> f64 {
    0.9
}
fn default_hp_floor() -> i32 {
    1
}
fn default_mana_stamina_floor() -> i32 {
    25
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = GameConstants::default();
        assert_eq!(constants.buildup.overload_threshold, 100);
        assert_eq!(constants.level.max_level, 30);
        assert_eq!(
            constants.buildup.overload_properties[&Resistance::Slashing],
            2334
        );
        assert!((constants.pools.growth_factor - 1.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_xp_curve() {
        let level = LevelConstants::default();
        assert_eq!(level.xp_for_next_level(0), 10);
        assert_eq!(level.xp_for_next_level(1), 30);
        assert_eq!(level.xp_for_next_level(5), 110);
        assert_eq!(level.total_xp_for_level(0), 0);
        assert_eq!(level.total_xp_for_level(1), 10);
        // 10 + 30 = 40
        assert_eq!(level.total_xp_for_level(2), 40);
        // Cumulative sums of per-level requirements must agree
        let mut sum = 0;
        for l in 0..30 {
            sum += level.xp_for_next_level(l);
            assert_eq!(level.total_xp_for_level(l + 1), sum);
        }
    }

    #[test]
    fn test_parse_constants() {
        let toml = r#"
[buildup]
overload_threshold = 100
decay_offset = 200
decay_divisor = 10

[buildup.overload_properties]
slashing = 2334
fire = 2400

[level]
max_level = 30
xp_slope = 20
xp_base = 10

[pools]
growth_factor = 1.1
shrink_factor = 0.9
"#;
        let constants: GameConstants = toml::from_str(toml).unwrap();
        assert_eq!(constants.buildup.overload_properties[&Resistance::Fire], 2400);
        assert_eq!(constants.level.xp_slope, 20);
        assert_eq!(constants.pools.hp_floor, 1);
    }
}
