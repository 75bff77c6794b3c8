//! Creature aggregate: stats, pools, equipment, properties, buildup
//!
//! A `Creature` is the single mutable aggregate the rules core operates on.
//! Templates deserialize straight into it (every field has a default) and
//! [`Creature::finalize_after_load`] settles the derived state: max pools,
//! cached bonuses, starting properties and the XP replay that turns a
//! loaded level back into a consistent level/xp pair.
//!
//! The impl is split by concern: `stats` (primaries, bonuses, derived
//! attributes, pools), `equipment` (slots + inventory), `properties`
//! (buff/debuff/trait engine) and `defense` (damage-scale table and
//! buildup meters).

mod defense;
mod equipment;
mod properties;
mod stats;

pub use defense::Buildup;
pub use equipment::{Inventory, INVENTORY_CAPACITY_PER_CATEGORY};
pub use properties::ActiveProperty;

use crate::config;
use crate::property::PropertyCatalog;
use gear_core::{Attack, EquipmentSlot, Item, Resistance, Stat};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Contributions to combat attributes from one source family (equipment or
/// properties), kept separate from base values so removal is exact
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct AttributeMods {
    pub crit: f64,
    pub dodge: f64,
    pub block: f64,
    pub magic_resist: f64,
    pub accuracy: i32,
    pub magic_accuracy: i32,
    pub vision_range: i32,
    pub hp_regen: i32,
    pub mana_regen: i32,
    pub stamina_regen: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Creature {
    pub id: u32,
    pub name: String,
    pub level: u32,
    pub xp: u64,
    pub unspent_stat_points: u32,

    // === Primary stats ===
    /// Raw values; missing entries read as 10 (Luck: 1)
    pub(crate) stats: HashMap<Stat, i32>,
    /// Cached bonuses, recomputed on every stat write
    #[serde(skip)]
    pub(crate) stat_bonuses: HashMap<Stat, i32>,

    // === Resource pools ===
    /// Max-HP contribution before level and Constitution
    pub base_hp: i32,
    /// Per-level HP growth die size from the template
    pub hp_dice: i32,
    pub max_hp: i32,
    pub current_hp: i32,
    pub base_max_mana: i32,
    pub max_mana: i32,
    pub current_mana: i32,
    pub base_max_stamina: i32,
    pub max_stamina: i32,
    pub current_stamina: i32,

    // === Combat attribute bases ===
    pub base_crit: f64,
    pub base_dodge: f64,
    pub base_block: f64,
    pub base_magic_resist: f64,
    pub base_accuracy: i32,
    pub base_magic_accuracy: i32,
    pub base_stamina_regen: i32,
    pub base_hp_regen: i32,
    pub base_mana_regen: i32,
    pub base_vision_range: i32,

    // Derived attributes (base + stat portion); equipment and property
    // contributions layer on top in the computed_* getters
    #[serde(skip)]
    pub(crate) crit: f64,
    #[serde(skip)]
    pub(crate) dodge: f64,
    #[serde(skip)]
    pub(crate) block: f64,
    #[serde(skip)]
    pub(crate) magic_resist: f64,
    #[serde(skip)]
    pub(crate) stamina_regen: i32,

    // === Defense ===
    /// Damage-scale percentages; missing entries read as 100 (neutral)
    pub(crate) damage_scale: HashMap<Resistance, i32>,
    /// Buildup meters; missing entries read as 0
    #[serde(skip)]
    pub(crate) buildup: HashMap<Resistance, Buildup>,
    /// Meters raised since the last decay pass, which skips them once
    #[serde(skip)]
    pub(crate) buildup_fresh: HashSet<Resistance>,

    // === Source accumulators ===
    #[serde(skip)]
    pub(crate) equip_mods: AttributeMods,
    #[serde(skip)]
    pub(crate) prop_mods: AttributeMods,

    // === Equipment & inventory (runtime state, not template data) ===
    #[serde(skip)]
    pub(crate) equipment: HashMap<EquipmentSlot, Item>,
    #[serde(skip)]
    pub inventory: Inventory,

    // === Properties ===
    #[serde(skip)]
    pub(crate) buffs: HashMap<u32, ActiveProperty>,
    #[serde(skip)]
    pub(crate) debuffs: HashMap<u32, ActiveProperty>,
    #[serde(skip)]
    pub(crate) traits: HashMap<u32, ActiveProperty>,
    /// Property ids applied by `finalize_after_load`
    pub starting_properties: Vec<u32>,

    /// Attacks available without a weapon (claws, bites, punches)
    pub natural_attacks: Vec<Attack>,
}

impl Creature {
    /// A blank creature with settled pools and derived state
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        config::ensure_constants_initialized();
        let mut creature = Creature {
            id,
            name: name.into(),
            ..Creature::default()
        };
        creature.recompute_bonuses();
        creature.update_max_hp();
        creature.current_hp = creature.max_hp;
        creature.update_max_mana();
        creature.update_max_stamina();
        creature.current_mana = creature.max_mana;
        creature.current_stamina = creature.max_stamina;
        creature.recalc_derived();
        creature
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Shift current HP, clamped to [0, max]
    pub fn modify_hp(&mut self, delta: i32) {
        self.current_hp = (self.current_hp + delta).clamp(0, self.max_hp);
    }

    /// Shift current mana, clamped to [0, max]
    pub fn modify_mana(&mut self, delta: i32) {
        self.current_mana = (self.current_mana + delta).clamp(0, self.max_mana);
    }

    /// Shift current stamina, clamped to [0, max]
    pub fn modify_stamina(&mut self, delta: i32) {
        self.current_stamina = (self.current_stamina + delta).clamp(0, self.max_stamina);
    }

    // === Lifecycle ===

    /// Settle derived state after template deserialization.
    ///
    /// Re-derives max HP from base + level + Constitution, captures base
    /// pool sizes from loaded maxes when the template omitted them, fills
    /// the pools, applies starting properties through the catalog and
    /// replays the loaded level as XP so level-up side effects (stat
    /// points, HP growth) are consistent.
    pub fn finalize_after_load(&mut self, catalog: &dyn PropertyCatalog) {
        config::ensure_constants_initialized();
        self.recompute_bonuses();

        // Capture base pool sizes from loaded maxes when the template
        // wrote only the max
        if self.base_max_mana <= 0 {
            self.base_max_mana = self.max_mana;
        }
        if self.base_max_stamina <= 0 {
            self.base_max_stamina = self.max_stamina;
        }

        // Replay the loaded level as XP so each level-up applies its side
        // effects; loaded partial XP carries through unchanged
        let total = self.xp + config::constants().level.total_xp_for_level(self.level);
        self.level = 0;
        self.xp = 0;
        self.unspent_stat_points = 0;
        self.add_xp(total);

        self.update_max_hp();
        self.update_max_mana();
        self.update_max_stamina();
        self.current_hp = self.max_hp;
        self.current_mana = self.max_mana;
        self.current_stamina = self.max_stamina;
        self.recalc_derived();

        // Starting properties land on settled pools so their deltas stick
        for id in self.starting_properties.clone() {
            match catalog.property_by_id(id) {
                Some(def) => {
                    let def = def.clone();
                    self.add_property(&def, catalog);
                }
                None => warn!(property_id = id, creature = %self.name, "unknown starting property"),
            }
        }
    }

    // === Level & XP ===

    /// XP needed to reach the next level from the current one
    pub fn xp_for_next_level(&self) -> u64 {
        config::constants().level.xp_for_next_level(self.level)
    }

    /// Add XP, applying as many level-ups as it covers. Each level grants
    /// unspent stat points and refreshes max HP. XP past the level cap
    /// accumulates but triggers no further levels.
    pub fn add_xp(&mut self, amount: u64) {
        self.xp += amount;
        let level_constants = &config::constants().level;
        while self.level < level_constants.max_level {
            let needed = level_constants.xp_for_next_level(self.level);
            if self.xp < needed {
                break;
            }
            self.xp -= needed;
            self.level += 1;
            self.unspent_stat_points += level_constants.stat_points_per_level;
            self.update_max_hp();
        }
    }

    /// Spend one unspent point to raise a primary stat
    pub fn spend_stat_point(&mut self, stat: Stat) -> bool {
        if self.unspent_stat_points == 0 {
            return false;
        }
        self.unspent_stat_points -= 1;
        self.modify_stat(stat, 1);
        true
    }

    // === Attack selection ===

    /// The item wielded in the weapon slot, if any
    pub fn weapon(&self) -> Option<&Item> {
        self.equipment.get(&EquipmentSlot::Weapon)
    }

    /// Whether the wielded weapon occupies both hands
    pub fn wielded_two_handed(&self) -> bool {
        match (
            self.equipment.get(&EquipmentSlot::Weapon),
            self.equipment.get(&EquipmentSlot::Offhand),
        ) {
            (Some(weapon), Some(offhand)) => weapon.id == offhand.id,
            _ => false,
        }
    }

    /// Pick an attack from the weapon's active list plus natural attacks,
    /// proportionally to each attack's weight
    pub fn select_attack(&self, rng: &mut impl Rng) -> Option<&Attack> {
        let mut pool: Vec<&Attack> = Vec::new();
        if let Some(weapon) = self.weapon() {
            pool.extend(weapon.active_attacks(self.wielded_two_handed()));
        }
        pool.extend(self.natural_attacks.iter());
        gear_core::weighted::pick_weighted(&pool, |a| a.weight as f64, rng).copied()
    }
}
