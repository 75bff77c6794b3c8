//! Attack resolution - resolve an attack template against a defender
//!
//! One engine handles every damage channel through a channel descriptor:
//! the physical channel (weapon or natural damage type, avoided by dodge +
//! block, or dodge alone for true damage) and the magic channel (weapon
//! element or attack magic type, avoided by dodge + magic resist). The
//! channels are fully independent: separate to-hit rolls, separate crit
//! rolls, separate buildup. A weapon's secondary damage types ride their
//! primary channel's hit and crit outcomes instead of re-rolling.

use super::report::{AttackReport, ChannelReport};
use crate::creature::Creature;
use crate::property::PropertyCatalog;
use gear_core::{dice, Attack, DamageClass, Resistance, Stat};
use rand::Rng;
use tracing::warn;

/// Resolve an attack with a fresh thread-local RNG
pub fn resolve_attack(
    attacker: &Creature,
    defender: &mut Creature,
    attack: &Attack,
    catalog: &dyn PropertyCatalog,
) -> AttackReport {
    let mut rng = rand::thread_rng();
    resolve_attack_with_rng(attacker, defender, attack, catalog, &mut rng)
}

/// Observer notified with the finished report of every resolved attack,
/// for surfaces (UI, combat log) that are not the resolving caller
pub trait AttackListener {
    fn on_attack(&mut self, report: &AttackReport);
}

/// Resolve an attack and hand the finished report to a listener as well
/// as returning it
pub fn resolve_attack_with_listener(
    attacker: &Creature,
    defender: &mut Creature,
    attack: &Attack,
    catalog: &dyn PropertyCatalog,
    rng: &mut impl Rng,
    listener: &mut dyn AttackListener,
) -> AttackReport {
    let report = resolve_attack_with_rng(attacker, defender, attack, catalog, rng);
    listener.on_attack(&report);
    report
}

/// Resolve an attack with a provided RNG (for deterministic testing)
///
/// Runs the physical channel when the attack's damage type classifies as
/// physical or true damage, and the magic channel when the weapon carries a
/// magic element or the attack declares a magic type with non-blank dice.
pub fn resolve_attack_with_rng(
    attacker: &Creature,
    defender: &mut Creature,
    attack: &Attack,
    catalog: &dyn PropertyCatalog,
    rng: &mut impl Rng,
) -> AttackReport {
    let mut report = AttackReport {
        attack_name: attack.name.clone(),
        ..AttackReport::default()
    };
    let weapon = attacker.weapon();

    // Step 1: physical channel
    let phys_type = weapon.and_then(|w| w.damage_type).or(attack.damage_type);
    if let Some(damage_type) = phys_type {
        if matches!(
            damage_type.class(),
            DamageClass::Physical | DamageClass::True
        ) {
            let stat_bonus = physical_stat_bonus(attacker);
            let spec = ChannelSpec {
                damage_type,
                secondary_type: weapon.and_then(|w| w.damage_type2),
                dice: &attack.phys_dice,
                dice2: &attack.phys_dice2,
                times: attack.times,
                to_hit_stat: stat_bonus,
                accuracy: attacker.computed_accuracy() + attack.accuracy,
                damage_bonus: stat_bonus.max(0),
                avoid: if damage_type.class() == DamageClass::True {
                    AvoidMode::DodgeOnly
                } else {
                    AvoidMode::DodgeBlock
                },
                crit_chance: crit_chance(attacker, attack),
                flat_bonus: if weapon.is_some() {
                    flat_stat_damage(stat_bonus, attack.damage_multiplier)
                } else {
                    0
                },
                buildup_mod: attack.phys_build_up_mod,
                on_hit_property: attack.phys_on_hit_property.as_deref(),
            };
            report.physical = Some(resolve_channel(defender, &spec, catalog, rng));
        }
    }

    // Step 2: magic channel
    let magic_active = weapon.map_or(false, |w| w.magic_element.is_some())
        || (attack.magic_type.is_some() && attack.has_magic_dice());
    if magic_active {
        if let Some(element) = weapon.and_then(|w| w.magic_element).or(attack.magic_type) {
            let (stat, bonus) = magic_scaling_stat(attacker);
            report.magic_stat = Some(stat);
            let spec = ChannelSpec {
                damage_type: element,
                secondary_type: weapon.and_then(|w| w.magic_element2),
                dice: &attack.magic_dice,
                dice2: &attack.magic_dice2,
                times: attack.times,
                to_hit_stat: bonus.max(0) * 5,
                accuracy: attacker.computed_magic_accuracy() + attack.magic_accuracy,
                damage_bonus: bonus.max(0),
                avoid: AvoidMode::DodgeResist,
                crit_chance: crit_chance(attacker, attack),
                flat_bonus: flat_stat_damage(bonus, attack.magic_damage_multiplier),
                buildup_mod: attack.magic_build_up_mod,
                on_hit_property: attack.magic_on_hit_property.as_deref(),
            };
            report.magic = Some(resolve_channel(defender, &spec, catalog, rng));
        }
    }

    report.total_dealt = report
        .physical
        .as_ref()
        .map_or(0, ChannelReport::total_dealt)
        + report.magic.as_ref().map_or(0, ChannelReport::total_dealt);
    report.defender_hp_after = defender.current_hp;
    report
}

/// How a channel's to-hit is contested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AvoidMode {
    /// True damage: dodge is the only defense
    DodgeOnly,
    DodgeBlock,
    DodgeResist,
}

struct ChannelSpec<'a> {
    damage_type: Resistance,
    secondary_type: Option<Resistance>,
    dice: &'a str,
    dice2: &'a str,
    times: u32,
    /// Stat portion of to-hit, also used alone for on-hit property rolls
    to_hit_stat: i32,
    /// Attacker plus attack accuracy
    accuracy: i32,
    /// Added to every sub-hit's dice roll, never negative
    damage_bonus: i32,
    avoid: AvoidMode,
    crit_chance: f64,
    /// Added once after the sub-hits
    flat_bonus: i32,
    /// Pushed onto the defender's meter per landed sub-hit
    buildup_mod: i32,
    on_hit_property: Option<&'a str>,
}

enum Miss {
    Dodged,
    Avoided,
}

/// Test one to-hit value against the channel's defenses; None is a hit
fn check_avoid(defender: &Creature, mode: AvoidMode, to_hit: i32) -> Option<Miss> {
    let to_hit = to_hit as f64;
    let dodge = defender.computed_dodge().clamp(0.0, 100.0);
    match mode {
        AvoidMode::DodgeOnly => {
            if to_hit <= dodge {
                Some(Miss::Dodged)
            } else {
                None
            }
        }
        AvoidMode::DodgeBlock | AvoidMode::DodgeResist => {
            let second = match mode {
                AvoidMode::DodgeBlock => defender.computed_block(),
                _ => defender.computed_magic_resist(),
            }
            .clamp(0.0, 100.0);
            let avoid = (dodge + second).min(100.0);
            if to_hit > avoid {
                return None;
            }
            // The stronger defense claims the window above the weaker one
            if dodge >= second {
                if to_hit <= second {
                    Some(Miss::Avoided)
                } else {
                    Some(Miss::Dodged)
                }
            } else if to_hit <= dodge {
                Some(Miss::Dodged)
            } else {
                Some(Miss::Avoided)
            }
        }
    }
}

fn resolve_channel(
    defender: &mut Creature,
    spec: &ChannelSpec<'_>,
    catalog: &dyn PropertyCatalog,
    rng: &mut impl Rng,
) -> ChannelReport {
    let mut channel = ChannelReport {
        damage_type: Some(spec.damage_type),
        attempts: spec.times,
        ..ChannelReport::default()
    };
    let mut primary_total = 0i32;
    let mut secondary_total = 0i32;
    // Secondary dice need a weapon-declared secondary type to land on
    let roll_secondary = spec.secondary_type.is_some() && !spec.dice2.trim().is_empty();

    for _ in 0..spec.times {
        let roll = (rng.gen::<f64>() * 100.0).round() as i32;
        let to_hit = roll + spec.to_hit_stat + spec.accuracy;
        match check_avoid(defender, spec.avoid, to_hit) {
            Some(Miss::Dodged) => {
                channel.misses_dodge += 1;
                continue;
            }
            Some(Miss::Avoided) => {
                channel.misses_avoid += 1;
                continue;
            }
            None => {}
        }
        channel.hits += 1;

        if spec.buildup_mod != 0 {
            defender.modify_buildup(spec.damage_type, spec.buildup_mod, catalog);
            channel.buildup_applied += spec.buildup_mod;
        }

        let mut damage = dice::roll_str(spec.dice, rng) + spec.damage_bonus;
        let mut damage2 = if roll_secondary {
            dice::roll_str(spec.dice2, rng)
        } else {
            0
        };
        channel.raw_total += damage;

        if rng.gen::<f64>() < spec.crit_chance {
            channel.crits += 1;
            damage *= 2;
            damage2 *= 2;
        }
        primary_total += damage;
        secondary_total += damage2;
    }

    primary_total += spec.flat_bonus;
    channel.after_crit = primary_total;
    channel.after_resist = defender.scale_damage(spec.damage_type, primary_total);
    if channel.after_resist > 0 {
        defender.modify_hp(-channel.after_resist);
    }

    if secondary_total != 0 {
        if let Some(secondary_type) = spec.secondary_type {
            channel.secondary_type = Some(secondary_type);
            channel.secondary_after_resist = defender.scale_damage(secondary_type, secondary_total);
            if channel.secondary_after_resist > 0 {
                defender.modify_hp(-channel.secondary_after_resist);
            }
        }
    }

    if channel.landed() {
        if let Some(name) = spec.on_hit_property {
            // One extra roll, stat bonus only
            let roll = (rng.gen::<f64>() * 100.0).round() as i32;
            let to_hit = roll + spec.to_hit_stat;
            if check_avoid(defender, spec.avoid, to_hit).is_none() {
                match catalog.property_by_name(name) {
                    Some(def) => {
                        let def = def.clone();
                        defender.add_property(&def, catalog);
                        channel.on_hit_property = Some(name.to_string());
                    }
                    None => warn!(property = name, "on-hit property missing from catalog"),
                }
            }
        }
    }

    channel
}

/// Stat bonus a physical attack scales with: finesse weapons take the
/// better of Strength and Dexterity, otherwise the weapon class decides;
/// unarmed attacks use Strength. Never negative.
fn physical_stat_bonus(attacker: &Creature) -> i32 {
    match attacker.weapon() {
        Some(weapon) if weapon.finesse => attacker
            .stat_bonus(Stat::Strength)
            .max(attacker.stat_bonus(Stat::Dexterity))
            .max(0),
        Some(weapon) => attacker.stat_bonus(weapon.weapon_class.scaling_stat()).max(0),
        None => attacker.stat_bonus(Stat::Strength).max(0),
    }
}

/// The stat the magic channel scales with: the attacker's best bonus among
/// the weapon's candidates, or Intelligence without one
fn magic_scaling_stat(attacker: &Creature) -> (Stat, i32) {
    let candidates: &[Stat] = match attacker.weapon() {
        Some(weapon) if !weapon.magic_scaling.is_empty() => &weapon.magic_scaling,
        _ => &[Stat::Intelligence],
    };
    let mut best = candidates[0];
    for &stat in &candidates[1..] {
        if attacker.stat_bonus(stat) > attacker.stat_bonus(best) {
            best = stat;
        }
    }
    (best, attacker.stat_bonus(best))
}

fn crit_chance(attacker: &Creature, attack: &Attack) -> f64 {
    (attacker.computed_crit() + attack.crit_mod_value()).clamp(0.0, 100.0) / 100.0
}

/// Flat post-roll stat damage. The bonus is taken as-is: physical channels
/// pass an already-floored bonus, the magic channel lets a negative chosen
/// bonus drag the total down.
fn flat_stat_damage(stat_bonus: i32, multiplier: f64) -> i32 {
    (stat_bonus as f64 * 5.0 * multiplier.max(0.0)).floor() as i32
}
