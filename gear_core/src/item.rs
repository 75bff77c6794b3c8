//! Item and equipment definitions
//!
//! Items are plain data hydrated from game files by an external loader. The
//! combat core applies their deltas through its equipment accumulators and
//! reverses them exactly on unequip, so every modifier here is a signed
//! delta from neutral.

use crate::attack::Attack;
use crate::types::{EquipmentSlot, ItemCategory, Resistance, Stat, WeaponClass};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub category: ItemCategory,
    /// Slot this item occupies when equipped; None for unequippable items
    #[serde(default)]
    pub slot: Option<EquipmentSlot>,

    // === Weapon handling ===
    #[serde(default)]
    pub weapon_class: WeaponClass,
    /// Occupies both Weapon and Offhand
    #[serde(default)]
    pub two_handed: bool,
    /// May be wielded one- or two-handed; the wielder chooses at equip time
    #[serde(default)]
    pub versatile: bool,
    /// Scales with the better of Strength and Dexterity
    #[serde(default)]
    pub finesse: bool,
    /// Physical damage type this weapon deals
    #[serde(default)]
    pub damage_type: Option<Resistance>,
    /// Secondary physical damage type (rides the primary channel)
    #[serde(default)]
    pub damage_type2: Option<Resistance>,
    /// Magic element; its presence alone opens the magic channel
    #[serde(default)]
    pub magic_element: Option<Resistance>,
    /// Secondary magic element
    #[serde(default)]
    pub magic_element2: Option<Resistance>,
    /// Candidate stats for magic scaling; the wielder's best bonus wins
    #[serde(default)]
    pub magic_scaling: Vec<Stat>,
    /// Attacks granted while wielding this weapon
    #[serde(default)]
    pub attacks: Vec<Attack>,
    /// Attacks used instead of `attacks` when a versatile weapon is
    /// wielded two-handed
    #[serde(default)]
    pub versatile_attacks: Vec<Attack>,

    // === Equip deltas ===
    #[serde(default)]
    pub stat_modifiers: HashMap<Stat, i32>,
    /// Damage-scale deltas in percentage points
    #[serde(default)]
    pub resistance_modifiers: HashMap<Resistance, i32>,
    #[serde(default)]
    pub crit: f64,
    #[serde(default)]
    pub dodge: f64,
    #[serde(default)]
    pub block: f64,
    #[serde(default)]
    pub magic_resist: f64,
    #[serde(default)]
    pub accuracy: i32,
    #[serde(default)]
    pub magic_accuracy: i32,
    #[serde(default)]
    pub vision_range: i32,
    #[serde(default)]
    pub hp_regen: i32,
    #[serde(default)]
    pub mana_regen: i32,
    #[serde(default)]
    pub stamina_regen: i32,
}

impl Item {
    /// A bare item with no modifiers, useful as a starting point
    pub fn new(id: u32, name: impl Into<String>, category: ItemCategory) -> Self {
        Item {
            id,
            name: name.into(),
            category,
            slot: None,
            weapon_class: WeaponClass::default(),
            two_handed: false,
            versatile: false,
            finesse: false,
            damage_type: None,
            damage_type2: None,
            magic_element: None,
            magic_element2: None,
            magic_scaling: Vec::new(),
            attacks: Vec::new(),
            versatile_attacks: Vec::new(),
            stat_modifiers: HashMap::new(),
            resistance_modifiers: HashMap::new(),
            crit: 0.0,
            dodge: 0.0,
            block: 0.0,
            magic_resist: 0.0,
            accuracy: 0,
            magic_accuracy: 0,
            vision_range: 0,
            hp_regen: 0,
            mana_regen: 0,
            stamina_regen: 0,
        }
    }

    /// A weapon for the Weapon slot with one attack
    pub fn new_weapon(
        id: u32,
        name: impl Into<String>,
        class: WeaponClass,
        damage_type: Resistance,
        attack: Attack,
    ) -> Self {
        let mut item = Item::new(id, name, ItemCategory::Weapon);
        item.slot = Some(EquipmentSlot::Weapon);
        item.weapon_class = class;
        item.damage_type = Some(damage_type);
        item.attacks = vec![attack];
        item
    }

    pub fn is_weapon(&self) -> bool {
        self.slot == Some(EquipmentSlot::Weapon)
    }

    /// Whether equipping occupies both hands, given the wielder's choice
    /// for versatile weapons
    pub fn occupies_both_hands(&self, wield_two_handed: bool) -> bool {
        self.two_handed || (self.versatile && wield_two_handed)
    }

    /// The attack list active for the given grip
    pub fn active_attacks(&self, wielded_two_handed: bool) -> &[Attack] {
        if self.versatile && wielded_two_handed && !self.versatile_attacks.is_empty() {
            &self.versatile_attacks
        } else {
            &self.attacks
        }
    }
}
