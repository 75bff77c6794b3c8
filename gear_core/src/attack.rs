//! Attack templates
//!
//! An attack is a reusable description of one swing/shot/burst: how many
//! sub-hits it makes, its dice, its damage types and the modifiers the
//! resolution engine folds in. Templates come from game data, so every
//! numeric field carries a serde default and the crit modifier is parsed
//! defensively.

use crate::types::Resistance;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attack {
    pub name: String,
    /// Number of sub-hits, each rolled and avoided independently
    #[serde(default = "default_times")]
    pub times: u32,
    /// Selection weight when picking among a creature's attacks
    #[serde(default = "default_weight")]
    pub weight: u32,
    /// Flat to-hit bonus for the physical channel
    #[serde(default)]
    pub accuracy: i32,
    /// Flat to-hit bonus for the magic channel
    #[serde(default)]
    pub magic_accuracy: i32,
    /// Physical damage dice, e.g. "1d8"; blank rolls 0
    #[serde(default)]
    pub phys_dice: String,
    /// Secondary physical dice, riding the primary channel's outcome
    #[serde(default)]
    pub phys_dice2: String,
    /// Magic damage dice; the magic channel only runs when these are
    /// non-blank or the weapon carries a magic element
    #[serde(default)]
    pub magic_dice: String,
    /// Secondary magic dice, riding the magic channel's outcome
    #[serde(default)]
    pub magic_dice2: String,
    /// Physical damage type for natural attacks (weapon type wins if armed)
    #[serde(default)]
    pub damage_type: Option<Resistance>,
    /// Magic damage type for natural attacks (weapon element wins if armed)
    #[serde(default)]
    pub magic_type: Option<Resistance>,
    /// Crit chance modifier in percentage points, as written in game data
    /// ("+10", "5", "-25"); unparseable values count as 0
    #[serde(default)]
    pub crit_mod: String,
    /// Multiplier on the flat post-roll physical stat damage
    #[serde(default)]
    pub damage_multiplier: f64,
    /// Multiplier on the flat post-roll magic stat damage
    #[serde(default)]
    pub magic_damage_multiplier: f64,
    /// Buildup added to the defender's physical meter when the channel lands
    #[serde(default)]
    pub phys_build_up_mod: i32,
    /// Buildup added to the defender's magic meter when the channel lands
    #[serde(default)]
    pub magic_build_up_mod: i32,
    /// Property applied on a landed physical channel (one extra roll)
    #[serde(default)]
    pub phys_on_hit_property: Option<String>,
    /// Property applied on a landed magic channel (one extra roll)
    #[serde(default)]
    pub magic_on_hit_property: Option<String>,
}

fn default_times() -> u32 {
    1
}
fn default_weight() -> u32 {
    1
}

impl Attack {
    /// A minimal attack with the given name and physical dice
    pub fn new(name: impl Into<String>, phys_dice: impl Into<String>) -> Self {
        Attack {
            name: name.into(),
            times: 1,
            weight: 1,
            accuracy: 0,
            magic_accuracy: 0,
            phys_dice: phys_dice.into(),
            phys_dice2: String::new(),
            magic_dice: String::new(),
            magic_dice2: String::new(),
            damage_type: None,
            magic_type: None,
            crit_mod: String::new(),
            damage_multiplier: 0.0,
            magic_damage_multiplier: 0.0,
            phys_build_up_mod: 0,
            magic_build_up_mod: 0,
            phys_on_hit_property: None,
            magic_on_hit_property: None,
        }
    }

    /// Crit modifier in percentage points; game data writes these as strings
    /// like "+10", so tolerate a leading '+' and fall back to 0
    pub fn crit_mod_value(&self) -> f64 {
        let trimmed = self.crit_mod.trim();
        let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
        trimmed.parse::<f64>().unwrap_or(0.0)
    }

    /// Whether this attack can drive a magic channel on its own
    /// (a weapon's magic element can also force one)
    pub fn has_magic_dice(&self) -> bool {
        !self.magic_dice.trim().is_empty()
    }
}
