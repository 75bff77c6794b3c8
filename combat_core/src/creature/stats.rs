//! Primary stats, cached bonuses, derived attributes and resource pools

use super::Creature;
use crate::config;
use gear_core::Stat;

impl Creature {
    /// Default raw value for a stat absent from the template
    fn default_stat_value(stat: Stat) -> i32 {
        match stat {
            Stat::Luck => 1,
            _ => 10,
        }
    }

    /// Bonus derived from a raw value: value - 10, except Luck which
    /// contributes its raw value directly
    fn bonus_of(stat: Stat, value: i32) -> i32 {
        match stat {
            Stat::Luck => value,
            _ => value - 10,
        }
    }

    pub fn stat(&self, stat: Stat) -> i32 {
        self.stats
            .get(&stat)
            .copied()
            .unwrap_or_else(|| Self::default_stat_value(stat))
    }

    /// Cached bonus for a stat
    pub fn stat_bonus(&self, stat: Stat) -> i32 {
        self.stat_bonuses
            .get(&stat)
            .copied()
            .unwrap_or_else(|| Self::bonus_of(stat, self.stat(stat)))
    }

    /// Set a raw stat, stored as given, and cascade the change:
    /// Constitution touches max HP and max stamina, Intelligence max mana,
    /// and the derived attributes always refresh
    pub fn set_stat(&mut self, stat: Stat, value: i32) {
        self.stats.insert(stat, value);
        self.recompute_bonuses();
        match stat {
            Stat::Constitution => {
                self.recalc_max_hp();
                self.update_max_stamina();
            }
            Stat::Intelligence => self.update_max_mana(),
            _ => {}
        }
        self.recalc_derived();
    }

    /// Shift a raw stat by a delta
    pub fn modify_stat(&mut self, stat: Stat, delta: i32) {
        if delta == 0 {
            return;
        }
        self.set_stat(stat, self.stat(stat) + delta);
    }

    pub(crate) fn recompute_bonuses(&mut self) {
        for stat in Stat::ALL {
            let value = self.stat(stat);
            self.stat_bonuses.insert(stat, Self::bonus_of(stat, value));
        }
    }

    /// Refresh the derived combat attributes from bases and stat bonuses
    pub(crate) fn recalc_derived(&mut self) {
        let luck = self.stat_bonus(Stat::Luck) as f64;
        let dex = self.stat_bonus(Stat::Dexterity) as f64;
        let wis = self.stat_bonus(Stat::Wisdom) as f64;
        let con = self.stat_bonus(Stat::Constitution) as f64;

        self.crit = self.base_crit + 5.0 * luck;
        self.dodge = self.base_dodge + 2.5 * dex;
        self.block = self.base_block;
        self.magic_resist = self.base_magic_resist + 5.0 * wis + 2.5 * con;
        self.stamina_regen = self.base_stamina_regen + ((2.5 * wis).floor() as i32).max(1);
    }

    // === Computed attribute getters (base + equipment + properties) ===

    pub fn computed_crit(&self) -> f64 {
        self.crit + self.equip_mods.crit + self.prop_mods.crit
    }

    pub fn computed_dodge(&self) -> f64 {
        self.dodge + self.equip_mods.dodge + self.prop_mods.dodge
    }

    pub fn computed_block(&self) -> f64 {
        self.block + self.equip_mods.block + self.prop_mods.block
    }

    pub fn computed_magic_resist(&self) -> f64 {
        self.magic_resist + self.equip_mods.magic_resist + self.prop_mods.magic_resist
    }

    pub fn computed_accuracy(&self) -> i32 {
        self.base_accuracy + self.equip_mods.accuracy + self.prop_mods.accuracy
    }

    pub fn computed_magic_accuracy(&self) -> i32 {
        self.base_magic_accuracy + self.equip_mods.magic_accuracy + self.prop_mods.magic_accuracy
    }

    pub fn computed_vision_range(&self) -> i32 {
        self.base_vision_range + self.equip_mods.vision_range + self.prop_mods.vision_range
    }

    pub fn computed_hp_regen(&self) -> i32 {
        self.base_hp_regen + self.equip_mods.hp_regen + self.prop_mods.hp_regen
    }

    pub fn computed_mana_regen(&self) -> i32 {
        self.base_mana_regen + self.equip_mods.mana_regen + self.prop_mods.mana_regen
    }

    pub fn computed_stamina_regen(&self) -> i32 {
        self.stamina_regen + self.equip_mods.stamina_regen + self.prop_mods.stamina_regen
    }

    // === Resource pool maintenance ===

    /// Growth multiplier for a pool from its governing attribute bonus
    fn pool_factor(bonus: i32) -> f64 {
        let pools = &config::constants().pools;
        if bonus > 0 {
            pools.growth_factor.powi(bonus)
        } else if bonus < 0 {
            pools.shrink_factor.powi(-bonus)
        } else {
            1.0
        }
    }

    /// Reset max HP from base + level + Constitution, clamping current HP
    pub(crate) fn update_max_hp(&mut self) {
        let con = self.stat_bonus(Stat::Constitution);
        let growth = ((self.level as i32 + 1) * (self.hp_dice + con)).max(1);
        self.max_hp = self.base_hp + growth;
        if self.current_hp > self.max_hp {
            self.current_hp = self.max_hp;
        }
    }

    /// Recompute max HP preserving the current/max ratio (on stat changes)
    pub(crate) fn recalc_max_hp(&mut self) {
        let con = self.stat_bonus(Stat::Constitution);
        let hp_floor = config::constants().pools.hp_floor;
        let new_max =
            (self.base_hp + (self.level as i32 + 1) * (self.hp_dice + con)).max(hp_floor);
        self.rescale_hp(new_max);
    }

    /// Recompute max mana from its base scaled by the Intelligence bonus
    pub(crate) fn update_max_mana(&mut self) {
        let bonus = self.stat_bonus(Stat::Intelligence);
        let floor = config::constants().pools.mana_stamina_floor;
        let new_max = ((self.base_max_mana as f64 * Self::pool_factor(bonus)).floor() as i32)
            .max(floor);
        let ratio = if self.max_mana > 0 {
            self.current_mana as f64 / self.max_mana as f64
        } else {
            1.0
        };
        self.max_mana = new_max;
        self.current_mana = ((new_max as f64 * ratio).floor() as i32).max(1);
    }

    /// Recompute max stamina from its base scaled by the Constitution
    /// bonus; base stamina regen tracks the new max
    pub(crate) fn update_max_stamina(&mut self) {
        let bonus = self.stat_bonus(Stat::Constitution);
        let floor = config::constants().pools.mana_stamina_floor;
        let new_max = ((self.base_max_stamina as f64 * Self::pool_factor(bonus)).floor() as i32)
            .max(floor);
        let ratio = if self.max_stamina > 0 {
            self.current_stamina as f64 / self.max_stamina as f64
        } else {
            1.0
        };
        self.max_stamina = new_max;
        self.current_stamina = ((new_max as f64 * ratio).floor() as i32).max(1);
        self.base_stamina_regen = (new_max / 5).max(1);
        self.recalc_derived();
    }

    fn rescale_hp(&mut self, new_max: i32) {
        let ratio = if self.max_hp > 0 {
            self.current_hp as f64 / self.max_hp as f64
        } else {
            1.0
        };
        self.max_hp = new_max;
        self.current_hp = ((new_max as f64 * ratio).floor() as i32).max(1);
    }

    /// Shift a flat max-HP delta (from properties), clamping current HP
    pub(crate) fn modify_max_hp_flat(&mut self, delta: i32) {
        if delta == 0 {
            return;
        }
        self.max_hp = (self.max_hp + delta).max(1);
        if self.current_hp > self.max_hp {
            self.current_hp = self.max_hp;
        }
    }

    pub(crate) fn modify_max_mana_flat(&mut self, delta: i32) {
        if delta == 0 {
            return;
        }
        self.max_mana = (self.max_mana + delta).max(1);
        if self.current_mana > self.max_mana {
            self.current_mana = self.max_mana;
        }
    }

    pub(crate) fn modify_max_stamina_flat(&mut self, delta: i32) {
        if delta == 0 {
            return;
        }
        self.max_stamina = (self.max_stamina + delta).max(1);
        if self.current_stamina > self.max_stamina {
            self.current_stamina = self.max_stamina;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_formulas() {
        let mut creature = Creature::new(1, "Hero");
        creature.set_stat(Stat::Strength, 15);
        assert_eq!(creature.stat_bonus(Stat::Strength), 5);
        creature.set_stat(Stat::Strength, 7);
        assert_eq!(creature.stat_bonus(Stat::Strength), -3);

        // Luck contributes its raw value
        creature.set_stat(Stat::Luck, 6);
        assert_eq!(creature.stat_bonus(Stat::Luck), 6);
    }

    #[test]
    fn test_raw_stats_are_unclamped() {
        let mut creature = Creature::new(1, "Hero");
        creature.modify_stat(Stat::Strength, -100);
        assert_eq!(creature.stat(Stat::Strength), -90);
        assert_eq!(creature.stat_bonus(Stat::Strength), -100);
        creature.set_stat(Stat::Strength, -5);
        assert_eq!(creature.stat(Stat::Strength), -5);
    }

    #[test]
    fn test_derived_attributes() {
        let mut creature = Creature::new(1, "Hero");
        creature.base_crit = 5.0;
        creature.base_dodge = 10.0;
        creature.base_block = 8.0;
        creature.base_magic_resist = 0.0;

        creature.set_stat(Stat::Luck, 6);
        creature.set_stat(Stat::Dexterity, 18);
        creature.set_stat(Stat::Wisdom, 14);
        creature.set_stat(Stat::Constitution, 12);

        assert_eq!(creature.computed_crit(), 5.0 + 30.0);
        assert_eq!(creature.computed_dodge(), 10.0 + 20.0);
        assert_eq!(creature.computed_block(), 8.0);
        assert_eq!(creature.computed_magic_resist(), 5.0 * 4.0 + 2.5 * 2.0);
    }

    #[test]
    fn test_base_accuracy_feeds_computed() {
        let mut creature = Creature::new(1, "Marksman");
        creature.base_accuracy = 7;
        creature.base_magic_accuracy = 4;
        assert_eq!(creature.computed_accuracy(), 7);
        assert_eq!(creature.computed_magic_accuracy(), 4);

        // Equipment and property contributions stack on the base
        creature.equip_mods.accuracy = 3;
        creature.prop_mods.magic_accuracy = -2;
        assert_eq!(creature.computed_accuracy(), 10);
        assert_eq!(creature.computed_magic_accuracy(), 2);
    }

    #[test]
    fn test_stamina_regen_floor() {
        let mut creature = Creature::new(1, "Hero");
        creature.base_stamina_regen = 0;
        // Negative Wisdom bonus still yields the +1 floor
        creature.set_stat(Stat::Wisdom, 6);
        assert_eq!(creature.computed_stamina_regen(), 1);

        creature.set_stat(Stat::Wisdom, 14);
        // floor(2.5 * 4) = 10
        assert_eq!(creature.computed_stamina_regen(), 10);
    }

    #[test]
    fn test_mana_pool_scales_with_intelligence() {
        let mut creature = Creature::new(1, "Mage");
        creature.base_max_mana = 100;
        creature.update_max_mana();
        creature.current_mana = creature.max_mana;
        assert_eq!(creature.max_mana, 100);

        creature.set_stat(Stat::Intelligence, 12);
        // 100 * 1.1^2 = 121
        assert_eq!(creature.max_mana, 121);

        creature.set_stat(Stat::Intelligence, 8);
        // 100 * 0.9^2 = 81
        assert_eq!(creature.max_mana, 81);
    }

    #[test]
    fn test_pool_floor() {
        let mut creature = Creature::new(1, "Mage");
        creature.base_max_mana = 10;
        creature.set_stat(Stat::Intelligence, 1);
        assert_eq!(creature.max_mana, 25);
    }

    #[test]
    fn test_pool_rescale_preserves_ratio() {
        let mut creature = Creature::new(1, "Mage");
        creature.base_max_mana = 100;
        creature.update_max_mana();
        creature.current_mana = 50;

        creature.set_stat(Stat::Intelligence, 12);
        assert_eq!(creature.max_mana, 121);
        // 50/100 ratio preserved: floor(121 * 0.5) = 60
        assert_eq!(creature.current_mana, 60);
    }

    #[test]
    fn test_constitution_cascades_to_hp_and_stamina() {
        let mut creature = Creature::new(1, "Tank");
        creature.base_hp = 10;
        creature.hp_dice = 8;
        creature.base_max_stamina = 50;
        creature.update_max_hp();
        creature.current_hp = creature.max_hp;
        creature.update_max_stamina();

        // Level 0: 10 + 1 * (8 + 0) = 18
        assert_eq!(creature.max_hp, 18);

        creature.set_stat(Stat::Constitution, 14);
        // 10 + 1 * (8 + 4) = 22
        assert_eq!(creature.max_hp, 22);
        // 50 * 1.1^4 = 73.2 -> 73
        assert_eq!(creature.max_stamina, 73);
        // Base regen tracks the new max: max(1, 73/5) = 14
        assert_eq!(creature.base_stamina_regen, 14);
    }

    #[test]
    fn test_update_max_stamina_regen_floor() {
        let mut creature = Creature::new(1, "Wisp");
        creature.base_max_stamina = 0;
        creature.update_max_stamina();
        assert_eq!(creature.max_stamina, 25);
        assert_eq!(creature.base_stamina_regen, 5);
    }
}
