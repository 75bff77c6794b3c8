//! Attack resolution reports

use gear_core::{Resistance, Stat};

/// Outcome of one damage channel of an attack
#[derive(Debug, Clone, Default)]
pub struct ChannelReport {
    pub damage_type: Option<Resistance>,
    /// Sub-hits attempted
    pub attempts: u32,
    pub hits: u32,
    pub misses_dodge: u32,
    /// Misses against the channel's second defense (block, or magic resist)
    pub misses_avoid: u32,
    pub crits: u32,
    /// Dice + stat totals before crits
    pub raw_total: i32,
    /// Totals including crit doubling and the flat stat bonus
    pub after_crit: i32,
    /// Damage actually dealt after the defender's scale percentage
    pub after_resist: i32,
    pub secondary_type: Option<Resistance>,
    pub secondary_after_resist: i32,
    /// Total buildup pushed onto the defender's meter, one mod per landed
    /// sub-hit
    pub buildup_applied: i32,
    /// On-hit property that stuck, if any
    pub on_hit_property: Option<String>,
}

impl ChannelReport {
    /// Whether at least one sub-hit connected
    pub fn landed(&self) -> bool {
        self.hits > 0
    }

    /// Damage dealt by this channel, both damage types combined
    /// (only positive totals reach the defender's HP)
    pub fn total_dealt(&self) -> i32 {
        self.after_resist.max(0) + self.secondary_after_resist.max(0)
    }
}

/// Full outcome of one resolved attack
#[derive(Debug, Clone, Default)]
pub struct AttackReport {
    pub attack_name: String,
    pub physical: Option<ChannelReport>,
    pub magic: Option<ChannelReport>,
    /// The attribute the magic channel scaled with
    pub magic_stat: Option<Stat>,
    pub total_dealt: i32,
    pub defender_hp_after: i32,
}

impl AttackReport {
    pub fn landed(&self) -> bool {
        self.physical.as_ref().map_or(false, ChannelReport::landed)
            || self.magic.as_ref().map_or(false, ChannelReport::landed)
    }
}
