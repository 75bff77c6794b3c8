//! Convenient re-exports for common usage.
//!
//! ```rust,ignore
//! use combat_core::prelude::*;
//! ```

// Creatures and pools
pub use crate::creature::{Buildup, Creature, Inventory};

// Attack resolution
pub use crate::combat::{
    resolve_attack, resolve_attack_with_listener, resolve_attack_with_rng, AttackListener,
    AttackReport, ChannelReport,
};

// Properties
pub use crate::property::{Property, PropertyCatalog, PropertyKind, PropertyRegistry};

// Configuration
pub use crate::config::{
    ensure_constants_initialized, init_constants, init_constants_default, ConfigError,
    GameConstants,
};

// Gear types most call sites need alongside creatures
pub use gear_core::{
    Attack, DiceExpr, EquipmentSlot, Item, ItemCategory, Resistance, Stat, WeaponClass,
};
