//! gear_core - Shared item, attack and dice primitives
//!
//! This library provides the data types that the combat rules core consumes
//! but does not own:
//! - Stat / Resistance / slot / weapon-class enums shared across crates
//! - DiceExpr: `NdM[+K]` dice expressions with lenient call-site rolling
//! - Weighted random selection over arbitrary weighted entries
//! - Item: equipment and weapon definitions, including attack templates
//!
//! All types derive serde so an external loader can hydrate them from game
//! data files; this crate performs no I/O itself.

pub mod attack;
pub mod dice;
pub mod item;
pub mod types;
pub mod weighted;

pub use attack::Attack;
pub use dice::{DiceExpr, DiceParseError};
pub use item::Item;
pub use types::{DamageClass, EquipmentSlot, ItemCategory, Resistance, Stat, WeaponClass};
pub use weighted::pick_weighted;
