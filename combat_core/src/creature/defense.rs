//! Damage-scale table and buildup meters
//!
//! Each damage type has a scale percentage on the defender: 100 is neutral,
//! below 100 reduces incoming damage of that type, above 100 amplifies it.
//! Alongside the scale sits a buildup meter: landed hits push it up, and at
//! the overload threshold it resets and inflicts the mapped debuff. Meters
//! decay each turn, faster the weaker the defense, except meters raised
//! since the last decay pass, which skip exactly one.

use super::Creature;
use crate::config;
use crate::property::PropertyCatalog;
use gear_core::Resistance;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A buildup meter: a value in [0, 100] or outright immunity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Buildup {
    Immune,
    Value(u8),
}

impl Default for Buildup {
    fn default() -> Self {
        Buildup::Value(0)
    }
}

impl Creature {
    // === Damage scale ===

    /// Scale percentage applied to incoming damage of this type
    pub fn damage_scale(&self, damage_type: Resistance) -> i32 {
        self.damage_scale.get(&damage_type).copied().unwrap_or(100)
    }

    pub fn set_damage_scale(&mut self, damage_type: Resistance, value: i32) {
        self.damage_scale.insert(damage_type, value);
    }

    pub fn modify_damage_scale(&mut self, damage_type: Resistance, delta: i32) {
        if delta == 0 {
            return;
        }
        let current = self.damage_scale(damage_type);
        self.damage_scale.insert(damage_type, current + delta);
    }

    /// Scale a raw damage total by the defender's percentage for its type,
    /// flooring toward negative infinity
    pub fn scale_damage(&self, damage_type: Resistance, raw: i32) -> i32 {
        (raw * self.damage_scale(damage_type)).div_euclid(100)
    }

    // === Buildup meters ===

    pub fn buildup(&self, damage_type: Resistance) -> Buildup {
        self.buildup.get(&damage_type).copied().unwrap_or_default()
    }

    /// Set a meter outright: negative means immune, anything else clamps
    /// to [0, threshold]. Setting never triggers an overload.
    pub fn set_buildup(&mut self, damage_type: Resistance, raw: i32) {
        let meter = if raw < 0 {
            Buildup::Immune
        } else {
            let threshold = config::constants().buildup.overload_threshold;
            Buildup::Value(raw.min(threshold) as u8)
        };
        self.buildup.insert(damage_type, meter);
    }

    pub(crate) fn set_buildup_meter(&mut self, damage_type: Resistance, meter: Buildup) {
        self.buildup.insert(damage_type, meter);
    }

    /// Shift a meter by a delta. Immune meters ignore it entirely. An
    /// increase marks the meter fresh, skipping the next decay pass.
    /// Reaching the overload threshold resets the meter to 0 and applies
    /// the mapped debuff to this creature exactly once.
    pub fn modify_buildup(
        &mut self,
        damage_type: Resistance,
        delta: i32,
        catalog: &dyn PropertyCatalog,
    ) {
        let current = match self.buildup(damage_type) {
            Buildup::Immune => return,
            Buildup::Value(v) => v as i32,
        };
        if delta == 0 {
            return;
        }

        let threshold = config::constants().buildup.overload_threshold;
        let next = (current + delta).clamp(0, threshold);
        if delta > 0 {
            self.buildup_fresh.insert(damage_type);
        }

        if next >= threshold {
            self.buildup
                .insert(damage_type, Buildup::Value(0));
            self.apply_overload(damage_type, catalog);
        } else {
            self.buildup.insert(damage_type, Buildup::Value(next as u8));
        }
    }

    fn apply_overload(&mut self, damage_type: Resistance, catalog: &dyn PropertyCatalog) {
        let mapped = config::constants()
            .buildup
            .overload_properties
            .get(&damage_type)
            .copied();
        let id = match mapped {
            Some(id) => id,
            // Unmapped types just reset their meter
            None => return,
        };
        match catalog.property_by_id(id) {
            Some(def) => {
                let def = def.clone();
                self.add_property(&def, catalog);
            }
            None => warn!(
                property_id = id,
                %damage_type,
                "overload debuff missing from catalog"
            ),
        }
    }

    /// Per-turn meter decay: (decay_offset - damage_scale) / decay_divisor,
    /// so weaker defenses shed buildup faster. Immune meters never decay;
    /// meters raised since the last pass skip this one and lose the flag.
    pub fn decay_buildups(&mut self) {
        let buildup_constants = &config::constants().buildup;
        for damage_type in Resistance::ALL {
            let value = match self.buildup(damage_type) {
                Buildup::Immune => continue,
                Buildup::Value(v) => v as i32,
            };
            if self.buildup_fresh.remove(&damage_type) {
                continue;
            }
            if value == 0 {
                continue;
            }
            let decay = (buildup_constants.decay_offset - self.damage_scale(damage_type))
                / buildup_constants.decay_divisor;
            if decay > 0 {
                let next = (value - decay).max(0);
                self.buildup
                    .insert(damage_type, Buildup::Value(next as u8));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{Property, PropertyKind, PropertyRegistry};

    fn catalog_with_bleed() -> PropertyRegistry {
        let mut registry = PropertyRegistry::new();
        let mut bleed = Property::new(2334, "Bleed1", PropertyKind::Debuff);
        bleed.duration = Some(3);
        registry.insert(bleed);
        registry
    }

    #[test]
    fn test_scale_damage_floor() {
        let mut creature = Creature::new(1, "Dummy");
        assert_eq!(creature.scale_damage(Resistance::Fire, 10), 10);

        creature.set_damage_scale(Resistance::Fire, 50);
        assert_eq!(creature.scale_damage(Resistance::Fire, 7), 3);

        creature.set_damage_scale(Resistance::Fire, 150);
        assert_eq!(creature.scale_damage(Resistance::Fire, 7), 10);

        // Floor division, not truncation
        creature.set_damage_scale(Resistance::Fire, -50);
        assert_eq!(creature.scale_damage(Resistance::Fire, 7), -4);
    }

    #[test]
    fn test_buildup_clamps() {
        let registry = catalog_with_bleed();
        let mut creature = Creature::new(1, "Dummy");

        creature.modify_buildup(Resistance::Piercing, 30, &registry);
        assert_eq!(creature.buildup(Resistance::Piercing), Buildup::Value(30));

        creature.modify_buildup(Resistance::Piercing, -100, &registry);
        assert_eq!(creature.buildup(Resistance::Piercing), Buildup::Value(0));
    }

    #[test]
    fn test_overload_applies_mapped_debuff_once() {
        let registry = catalog_with_bleed();
        let mut creature = Creature::new(1, "Dummy");

        creature.modify_buildup(Resistance::Slashing, 60, &registry);
        assert!(!creature.has_property(2334));

        creature.modify_buildup(Resistance::Slashing, 40, &registry);
        // Meter reset and debuff applied
        assert_eq!(creature.buildup(Resistance::Slashing), Buildup::Value(0));
        assert!(creature.has_property(2334));
    }

    #[test]
    fn test_overload_unmapped_type_just_resets() {
        let registry = catalog_with_bleed();
        let mut creature = Creature::new(1, "Dummy");

        creature.modify_buildup(Resistance::Fire, 120, &registry);
        assert_eq!(creature.buildup(Resistance::Fire), Buildup::Value(0));
        assert!(creature.property_count() == 0);
    }

    #[test]
    fn test_immune_meter_ignores_buildup() {
        let registry = catalog_with_bleed();
        let mut creature = Creature::new(1, "Golem");
        creature.set_buildup(Resistance::Slashing, -1);

        creature.modify_buildup(Resistance::Slashing, 500, &registry);
        assert_eq!(creature.buildup(Resistance::Slashing), Buildup::Immune);
        assert!(!creature.has_property(2334));
    }

    #[test]
    fn test_set_buildup_clamps_without_overload() {
        let registry = catalog_with_bleed();
        let mut creature = Creature::new(1, "Dummy");
        creature.set_buildup(Resistance::Slashing, 250);
        assert_eq!(creature.buildup(Resistance::Slashing), Buildup::Value(100));
        assert!(!creature.has_property(2334));
        let _ = registry;
    }

    #[test]
    fn test_decay_scales_with_defense() {
        let mut creature = Creature::new(1, "Dummy");
        creature.set_buildup(Resistance::Slashing, 50);
        creature.set_buildup(Resistance::Piercing, 50);
        creature.set_damage_scale(Resistance::Piercing, 50);

        creature.decay_buildups();
        // Neutral scale decays (200-100)/10 = 10; scale 50 decays 15
        assert_eq!(creature.buildup(Resistance::Slashing), Buildup::Value(40));
        assert_eq!(creature.buildup(Resistance::Piercing), Buildup::Value(35));
    }

    #[test]
    fn test_fresh_meter_skips_one_decay() {
        let registry = catalog_with_bleed();
        let mut creature = Creature::new(1, "Dummy");

        creature.modify_buildup(Resistance::Slashing, 50, &registry);
        creature.decay_buildups();
        // Raised this turn: untouched
        assert_eq!(creature.buildup(Resistance::Slashing), Buildup::Value(50));

        creature.decay_buildups();
        // Flag consumed, normal decay resumes
        assert_eq!(creature.buildup(Resistance::Slashing), Buildup::Value(40));
    }

    #[test]
    fn test_decay_never_goes_negative() {
        let mut creature = Creature::new(1, "Dummy");
        creature.set_buildup(Resistance::Slashing, 5);
        creature.decay_buildups();
        assert_eq!(creature.buildup(Resistance::Slashing), Buildup::Value(0));
    }
}
