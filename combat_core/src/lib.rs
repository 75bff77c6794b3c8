//! combat_core - Combat and character rules core
//!
//! This library provides:
//! - Creature: the stat/pool/equipment/property aggregate the rules act on
//! - Property engine: buffs, debuffs and traits with exact-inverse removal
//! - Buildup meters with overload debuffs and per-turn decay
//! - Attack resolution: channel-based to-hit, crits, damage scaling
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use combat_core::prelude::*;
//! use gear_core::{Attack, Item, Resistance, WeaponClass};
//!
//! init_constants_default().unwrap();
//! let catalog = PropertyRegistry::new();
//!
//! let mut attacker = Creature::new(1, "hero");
//! let sword = Item::new_weapon(
//!     10, "iron_sword", WeaponClass::Melee,
//!     Resistance::Slashing, Attack::new("Slash", "1d8"),
//! );
//! attacker.equip(sword, false);
//!
//! let mut goblin = Creature::new(2, "goblin");
//! let mut rng = rand::thread_rng();
//! if let Some(attack) = attacker.select_attack(&mut rng) {
//!     let report = resolve_attack(&attacker, &mut goblin, attack, &catalog);
//!     println!("Dealt {} damage!", report.total_dealt);
//! }
//! ```

pub mod combat;
pub mod config;
pub mod creature;
pub mod prelude;
pub mod property;

// Core API - what most users need
pub use combat::{
    resolve_attack, resolve_attack_with_listener, resolve_attack_with_rng, AttackListener,
    AttackReport, ChannelReport,
};
pub use creature::{Buildup, Creature, Inventory};
pub use property::{Property, PropertyCatalog, PropertyKind, PropertyRegistry};

// Configuration
pub use config::{init_constants, init_constants_default};

// Re-export commonly needed gear_core types
pub use gear_core::{Attack, EquipmentSlot, Item, Resistance, Stat, WeaponClass};
