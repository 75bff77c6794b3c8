//! Property engine: applying, reversing, ticking and expiring
//!
//! Applying a property pushes its deltas into the creature (raw stats and
//! damage scale mutate through their normal cascades; combat attributes go
//! through the property accumulator) and stores a private copy of the
//! definition. Removal walks the same deltas in reverse, restoring saved
//! buildup meters for immunities, so add-then-remove is a no-op.

use super::{Buildup, Creature};
use crate::property::{BuildupMod, Property, PropertyCatalog, PropertyKind};
use gear_core::{dice, Resistance};
use rand::Rng;
use std::collections::HashMap;

/// A property a creature currently holds: the definition copy plus the
/// per-instance state needed for exact reversal
#[derive(Debug, Clone)]
pub struct ActiveProperty {
    pub def: Property,
    /// Turns left; None never expires
    pub remaining: Option<u32>,
    /// Meters as they were before an immunity overwrote them
    saved_buildup: HashMap<Resistance, Buildup>,
}

impl Creature {
    fn bucket_mut(&mut self, kind: PropertyKind) -> &mut HashMap<u32, ActiveProperty> {
        match kind {
            PropertyKind::Buff => &mut self.buffs,
            PropertyKind::Debuff => &mut self.debuffs,
            PropertyKind::Trait => &mut self.traits,
        }
    }

    pub fn has_property(&self, id: u32) -> bool {
        self.buffs.contains_key(&id)
            || self.debuffs.contains_key(&id)
            || self.traits.contains_key(&id)
    }

    pub fn property_count(&self) -> usize {
        self.buffs.len() + self.debuffs.len() + self.traits.len()
    }

    pub fn property(&self, id: u32) -> Option<&ActiveProperty> {
        self.buffs
            .get(&id)
            .or_else(|| self.debuffs.get(&id))
            .or_else(|| self.traits.get(&id))
    }

    /// Apply a property. Adding an id the creature already holds is a
    /// no-op; the engine stores its own copy of the definition.
    pub fn add_property(&mut self, def: &Property, catalog: &dyn PropertyCatalog) {
        if self.bucket_mut(def.kind).contains_key(&def.id) {
            return;
        }

        let mut active = ActiveProperty {
            def: def.clone(),
            remaining: def.duration,
            saved_buildup: HashMap::new(),
        };

        for (&stat, &delta) in &def.stat_modifiers {
            self.modify_stat(stat, delta);
        }
        for (&damage_type, &delta) in &def.resistance_modifiers {
            self.modify_damage_scale(damage_type, delta);
        }

        self.prop_mods.crit += def.crit;
        self.prop_mods.dodge += def.dodge;
        self.prop_mods.block += def.block;
        self.prop_mods.magic_resist += def.magic_resist;
        self.prop_mods.accuracy += def.accuracy;
        self.prop_mods.magic_accuracy += def.magic_accuracy;
        self.prop_mods.vision_range += def.vision_range;
        self.prop_mods.hp_regen += def.hp_regen;
        self.prop_mods.mana_regen += def.mana_regen;
        self.prop_mods.stamina_regen += def.stamina_regen;

        self.modify_max_hp_flat(def.max_hp);
        self.modify_max_mana_flat(def.max_mana);
        self.modify_max_stamina_flat(def.max_stamina);

        for (&damage_type, &modifier) in &def.buildup_modifiers {
            match modifier {
                BuildupMod::Immune => {
                    active
                        .saved_buildup
                        .insert(damage_type, self.buildup(damage_type));
                    self.set_buildup_meter(damage_type, Buildup::Immune);
                }
                BuildupMod::Delta(delta) => {
                    self.modify_buildup(damage_type, delta, catalog);
                }
            }
        }

        self.bucket_mut(def.kind).insert(def.id, active);
    }

    /// Remove a property by id, reversing every delta it applied.
    /// Returns false when the creature does not hold it.
    pub fn remove_property(&mut self, id: u32, catalog: &dyn PropertyCatalog) -> bool {
        let active = match self
            .buffs
            .remove(&id)
            .or_else(|| self.debuffs.remove(&id))
            .or_else(|| self.traits.remove(&id))
        {
            Some(active) => active,
            None => return false,
        };
        let def = &active.def;

        for (&damage_type, &modifier) in &def.buildup_modifiers {
            match modifier {
                BuildupMod::Immune => {
                    let saved = active
                        .saved_buildup
                        .get(&damage_type)
                        .copied()
                        .unwrap_or_default();
                    self.set_buildup_meter(damage_type, saved);
                }
                BuildupMod::Delta(delta) => {
                    self.modify_buildup(damage_type, -delta, catalog);
                }
            }
        }

        self.modify_max_hp_flat(-def.max_hp);
        self.modify_max_mana_flat(-def.max_mana);
        self.modify_max_stamina_flat(-def.max_stamina);

        self.prop_mods.crit -= def.crit;
        self.prop_mods.dodge -= def.dodge;
        self.prop_mods.block -= def.block;
        self.prop_mods.magic_resist -= def.magic_resist;
        self.prop_mods.accuracy -= def.accuracy;
        self.prop_mods.magic_accuracy -= def.magic_accuracy;
        self.prop_mods.vision_range -= def.vision_range;
        self.prop_mods.hp_regen -= def.hp_regen;
        self.prop_mods.mana_regen -= def.mana_regen;
        self.prop_mods.stamina_regen -= def.stamina_regen;

        for (&damage_type, &delta) in &def.resistance_modifiers {
            self.modify_damage_scale(damage_type, -delta);
        }
        for (&stat, &delta) in &def.stat_modifiers {
            self.modify_stat(stat, -delta);
        }

        true
    }

    /// Advance one turn of held properties:
    /// 1. apply HP/mana/stamina regen once, from all sources
    /// 2. roll each buff's and debuff's tick damage against this creature
    /// 3. decrement finite durations and remove the expired, after the
    ///    full scan, reversing their deltas
    /// 4. decay the buildup meters
    ///
    /// Traits never tick and never expire.
    pub fn tick_properties(&mut self, catalog: &dyn PropertyCatalog, rng: &mut impl Rng) {
        // Step 1: regen
        self.modify_hp(self.computed_hp_regen());
        self.modify_mana(self.computed_mana_regen());
        self.modify_stamina(self.computed_stamina_regen());

        // Step 2: tick damage, scaled like any incoming damage
        let dots: Vec<(String, Option<Resistance>)> = self
            .buffs
            .values()
            .chain(self.debuffs.values())
            .filter(|active| !active.def.damage_dice.trim().is_empty())
            .map(|active| (active.def.damage_dice.clone(), active.def.damage_type))
            .collect();
        for (dice_expr, damage_type) in dots {
            let raw = dice::roll_str(&dice_expr, rng);
            let dealt = self.scale_damage(damage_type.unwrap_or(Resistance::True), raw);
            if dealt > 0 {
                self.modify_hp(-dealt);
            }
        }

        // Step 3: durations, expired removed after the scan
        let mut expired: Vec<u32> = Vec::new();
        for bucket in [&mut self.buffs, &mut self.debuffs] {
            for (&id, active) in bucket.iter_mut() {
                if let Some(turns) = active.remaining {
                    if turns > 0 {
                        let left = turns - 1;
                        active.remaining = Some(left);
                        if left == 0 {
                            expired.push(id);
                        }
                    }
                }
            }
        }
        for id in expired {
            self.remove_property(id, catalog);
        }

        // Step 4: buildup decay
        self.decay_buildups();
    }
}
