//! Equipment ledger and inventory
//!
//! Equipping applies an item's deltas (raw stats and damage scale through
//! their cascades, combat attributes through the equipment accumulator) and
//! unequipping reverses them exactly once, even for two-handed weapons that
//! occupy both hand slots. Displaced items return to the inventory, which
//! caps each category and drops overflow with a warning.

use super::Creature;
use gear_core::{EquipmentSlot, Item, ItemCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

pub const INVENTORY_CAPACITY_PER_CATEGORY: usize = 5;

/// Carried items, bucketed by category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    items: HashMap<ItemCategory, Vec<Item>>,
}

impl Inventory {
    pub fn new() -> Self {
        Inventory::default()
    }

    /// Add an item; a full category rejects it with a warning
    pub fn add(&mut self, item: Item) -> bool {
        let bucket = self.items.entry(item.category).or_default();
        if bucket.len() >= INVENTORY_CAPACITY_PER_CATEGORY {
            warn!(item = %item.name, category = ?item.category, "inventory full, item dropped");
            return false;
        }
        bucket.push(item);
        true
    }

    pub fn remove_by_id(&mut self, id: u32) -> Option<Item> {
        for bucket in self.items.values_mut() {
            if let Some(pos) = bucket.iter().position(|item| item.id == id) {
                return Some(bucket.remove(pos));
            }
        }
        None
    }

    pub fn contains_id(&self, id: u32) -> bool {
        self.items
            .values()
            .any(|bucket| bucket.iter().any(|item| item.id == id))
    }

    pub fn count(&self, category: ItemCategory) -> usize {
        self.items.get(&category).map_or(0, |bucket| bucket.len())
    }

    pub fn items_in(&self, category: ItemCategory) -> &[Item] {
        self.items
            .get(&category)
            .map_or(&[], |bucket| bucket.as_slice())
    }
}

impl Creature {
    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.equipment.get(&slot)
    }

    /// Equip an item into its declared slot, displacing whatever occupied
    /// it into the inventory. A two-handed weapon (or a versatile one
    /// wielded two-handed) claims both hand slots. Returns false for items
    /// with no slot.
    pub fn equip(&mut self, item: Item, wield_two_handed: bool) -> bool {
        let slot = match item.slot {
            Some(slot) => slot,
            None => {
                warn!(item = %item.name, "item has no equipment slot");
                return false;
            }
        };

        if slot == EquipmentSlot::Weapon && item.occupies_both_hands(wield_two_handed) {
            self.unequip(EquipmentSlot::Weapon);
            self.unequip(EquipmentSlot::Offhand);
            self.apply_item_effects(&item, 1);
            self.equipment.insert(EquipmentSlot::Offhand, item.clone());
            self.equipment.insert(EquipmentSlot::Weapon, item);
        } else {
            self.unequip(slot);
            self.apply_item_effects(&item, 1);
            self.equipment.insert(slot, item);
        }
        true
    }

    /// Equip an item currently in the inventory, by id
    pub fn equip_from_inventory(&mut self, id: u32, wield_two_handed: bool) -> bool {
        let item = match self.inventory.remove_by_id(id) {
            Some(item) => item,
            None => return false,
        };
        if item.slot.is_none() {
            // Not equippable; put it back untouched
            self.inventory.add(item);
            return false;
        }
        self.equip(item, wield_two_handed)
    }

    /// Remove the item in a slot, reversing its effects exactly once and
    /// returning it to the inventory. A duplicate id already in the
    /// inventory drops the removed copy with a warning.
    pub fn unequip(&mut self, slot: EquipmentSlot) -> bool {
        let item = match self.equipment.remove(&slot) {
            Some(item) => item,
            None => return false,
        };

        // A weapon filling both hands appears in both slots; clear the
        // paired entry without reversing twice
        let paired = match slot {
            EquipmentSlot::Weapon => Some(EquipmentSlot::Offhand),
            EquipmentSlot::Offhand => Some(EquipmentSlot::Weapon),
            _ => None,
        };
        if let Some(paired_slot) = paired {
            if self
                .equipment
                .get(&paired_slot)
                .map(|other| other.id == item.id)
                .unwrap_or(false)
            {
                self.equipment.remove(&paired_slot);
            }
        }

        self.apply_item_effects(&item, -1);

        if self.inventory.contains_id(item.id) {
            warn!(item = %item.name, "duplicate item id in inventory, dropped");
        } else {
            self.inventory.add(item);
        }
        true
    }

    fn apply_item_effects(&mut self, item: &Item, sign: i32) {
        for (&stat, &delta) in &item.stat_modifiers {
            self.modify_stat(stat, sign * delta);
        }
        for (&damage_type, &delta) in &item.resistance_modifiers {
            self.modify_damage_scale(damage_type, sign * delta);
        }

        let factor = sign as f64;
        self.equip_mods.crit += factor * item.crit;
        self.equip_mods.dodge += factor * item.dodge;
        self.equip_mods.block += factor * item.block;
        self.equip_mods.magic_resist += factor * item.magic_resist;
        self.equip_mods.accuracy += sign * item.accuracy;
        self.equip_mods.magic_accuracy += sign * item.magic_accuracy;
        self.equip_mods.vision_range += sign * item.vision_range;
        self.equip_mods.hp_regen += sign * item.hp_regen;
        self.equip_mods.mana_regen += sign * item.mana_regen;
        self.equip_mods.stamina_regen += sign * item.stamina_regen;
    }
}
