//! Property definitions: buffs, debuffs and traits
//!
//! A property is a bundle of deltas a creature carries: stat and
//! damage-scale modifiers, combat attributes, regen, buildup immunities and
//! an optional per-tick damage roll. Definitions are plain data; the
//! [`crate::creature::Creature`] property engine owns application, exact
//! reversal, ticking and expiry.
//!
//! The core never loads property files. Lookups go through the
//! [`PropertyCatalog`] trait, implemented by whatever registry the host
//! hydrates; [`PropertyRegistry`] is the plain in-memory implementation.

use gear_core::{Resistance, Stat};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// What a property is, which controls its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    /// Ticks and expires
    Buff,
    /// Ticks and expires; the kind overloaded meters apply
    Debuff,
    /// Permanent, never ticks down
    Trait,
}

/// A buildup-meter modifier carried by a property
///
/// Game data writes immunity as -1 and anything else as a signed delta, so
/// the wire format is a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildupMod {
    /// The meter stops accumulating entirely while this property is held
    Immune,
    /// Shift the meter by this many points on apply, reversed on remove
    Delta(i32),
}

impl Serialize for BuildupMod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BuildupMod::Immune => serializer.serialize_i32(-1),
            BuildupMod::Delta(d) => serializer.serialize_i32(*d),
        }
    }
}

impl<'de> Deserialize<'de> for BuildupMod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i32::deserialize(deserializer)?;
        if raw == -1 {
            Ok(BuildupMod::Immune)
        } else {
            Ok(BuildupMod::Delta(raw))
        }
    }
}

/// A property definition as hydrated from game data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: u32,
    pub name: String,
    pub kind: PropertyKind,
    #[serde(default)]
    pub description: String,
    /// Remaining turns; None is permanent. Traits ignore this entirely.
    #[serde(default)]
    pub duration: Option<u32>,

    // === Deltas applied on add, exactly reversed on remove ===
    #[serde(default)]
    pub stat_modifiers: HashMap<Stat, i32>,
    /// Damage-scale deltas in percentage points
    #[serde(default)]
    pub resistance_modifiers: HashMap<Resistance, i32>,
    #[serde(default)]
    pub buildup_modifiers: HashMap<Resistance, BuildupMod>,
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
    pub max_hp: i32,
    #[serde(default)]
    pub max_mana: i32,
    #[serde(default)]
    pub max_stamina: i32,

    // === Per-tick behavior ===
    #[serde(default)]
    pub hp_regen: i32,
    #[serde(default)]
    pub mana_regen: i32,
    #[serde(default)]
    pub stamina_regen: i32,
    /// Damage rolled each tick, scaled by the victim's damage-scale percent
    #[serde(default)]
    pub damage_dice: String,
    #[serde(default)]
    pub damage_type: Option<Resistance>,
}

impl Property {
    pub fn new(id: u32, name: impl Into<String>, kind: PropertyKind) -> Self {
        Property {
            id,
            name: name.into(),
            kind,
            description: String::new(),
            duration: None,
            stat_modifiers: HashMap::new(),
            resistance_modifiers: HashMap::new(),
            buildup_modifiers: HashMap::new(),
            crit: 0.0,
            dodge: 0.0,
            block: 0.0,
            magic_resist: 0.0,
            accuracy: 0,
            magic_accuracy: 0,
            vision_range: 0,
            max_hp: 0,
            max_mana: 0,
            max_stamina: 0,
            hp_regen: 0,
            mana_regen: 0,
            stamina_regen: 0,
            damage_dice: String::new(),
            damage_type: None,
        }
    }
}

/// Name and id lookups for property definitions, supplied by the host
pub trait PropertyCatalog {
    fn property_by_id(&self, id: u32) -> Option<&Property>;
    fn property_by_name(&self, name: &str) -> Option<&Property>;
}

/// In-memory property catalog
#[derive(Debug, Clone, Default)]
pub struct PropertyRegistry {
    by_id: HashMap<u32, Property>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        PropertyRegistry::default()
    }

    /// Insert a definition, replacing any previous one with the same id
    pub fn insert(&mut self, property: Property) {
        self.by_id.insert(property.id, property);
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl PropertyCatalog for PropertyRegistry {
    fn property_by_id(&self, id: u32) -> Option<&Property> {
        self.by_id.get(&id)
    }

    fn property_by_name(&self, name: &str) -> Option<&Property> {
        self.by_id.values().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buildup_mod_wire_format() {
        let immune: BuildupMod = serde_json::from_str("-1").unwrap();
        assert_eq!(immune, BuildupMod::Immune);
        let delta: BuildupMod = serde_json::from_str("15").unwrap();
        assert_eq!(delta, BuildupMod::Delta(15));
        let negative: BuildupMod = serde_json::from_str("-20").unwrap();
        assert_eq!(negative, BuildupMod::Delta(-20));

        assert_eq!(serde_json::to_string(&BuildupMod::Immune).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&BuildupMod::Delta(15)).unwrap(), "15");
    }

    #[test]
    fn test_deserialize_property() {
        let json = r#"{
            "id": 2334,
            "name": "Bleed1",
            "kind": "debuff",
            "duration": 3,
            "damage_dice": "1d4",
            "damage_type": "true",
            "buildup_modifiers": {"slashing": -1}
        }"#;
        let prop: Property = serde_json::from_str(json).unwrap();
        assert_eq!(prop.kind, PropertyKind::Debuff);
        assert_eq!(prop.duration, Some(3));
        assert_eq!(
            prop.buildup_modifiers[&Resistance::Slashing],
            BuildupMod::Immune
        );
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = PropertyRegistry::new();
        registry.insert(Property::new(1000, "Blessed", PropertyKind::Buff));
        registry.insert(Property::new(3700, "Darkvision", PropertyKind::Trait));

        assert_eq!(registry.property_by_id(1000).unwrap().name, "Blessed");
        assert_eq!(registry.property_by_name("Darkvision").unwrap().id, 3700);
        assert!(registry.property_by_id(9999).is_none());
        assert!(registry.property_by_name("Missing").is_none());
    }
}
