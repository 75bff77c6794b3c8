use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary creature attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
    Luck,
}

impl Stat {
    pub const ALL: [Stat; 7] = [
        Stat::Strength,
        Stat::Dexterity,
        Stat::Constitution,
        Stat::Intelligence,
        Stat::Wisdom,
        Stat::Charisma,
        Stat::Luck,
    ];
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Strength => write!(f, "Strength"),
            Stat::Dexterity => write!(f, "Dexterity"),
            Stat::Constitution => write!(f, "Constitution"),
            Stat::Intelligence => write!(f, "Intelligence"),
            Stat::Wisdom => write!(f, "Wisdom"),
            Stat::Charisma => write!(f, "Charisma"),
            Stat::Luck => write!(f, "Luck"),
        }
    }
}

/// Damage channels, which double as the keys of a creature's damage-scale
/// table (100 = neutral, below 100 reduced, above 100 amplified)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resistance {
    Fire,
    Water,
    Wind,
    Ice,
    Nature,
    Lightning,
    Light,
    Darkness,
    Bludgeoning,
    Piercing,
    Slashing,
    True,
}

impl Resistance {
    pub const ALL: [Resistance; 12] = [
        Resistance::Fire,
        Resistance::Water,
        Resistance::Wind,
        Resistance::Ice,
        Resistance::Nature,
        Resistance::Lightning,
        Resistance::Light,
        Resistance::Darkness,
        Resistance::Bludgeoning,
        Resistance::Piercing,
        Resistance::Slashing,
        Resistance::True,
    ];

    /// Which resolution rules apply to damage of this type
    pub fn class(&self) -> DamageClass {
        match self {
            Resistance::Bludgeoning | Resistance::Piercing | Resistance::Slashing => {
                DamageClass::Physical
            }
            Resistance::True => DamageClass::True,
            _ => DamageClass::Magical,
        }
    }
}

impl fmt::Display for Resistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resistance::Fire => "Fire",
            Resistance::Water => "Water",
            Resistance::Wind => "Wind",
            Resistance::Ice => "Ice",
            Resistance::Nature => "Nature",
            Resistance::Lightning => "Lightning",
            Resistance::Light => "Light",
            Resistance::Darkness => "Darkness",
            Resistance::Bludgeoning => "Bludgeoning",
            Resistance::Piercing => "Piercing",
            Resistance::Slashing => "Slashing",
            Resistance::True => "True",
        };
        write!(f, "{}", name)
    }
}

/// Broad rule families for damage types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DamageClass {
    /// Avoided by dodge + block
    Physical,
    /// Avoided by dodge + magic resist
    Magical,
    /// Avoided by dodge only
    True,
}

/// Equipment slots on a creature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Helmet,
    Armor,
    Legwear,
    Weapon,
    Offhand,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 5] = [
        EquipmentSlot::Helmet,
        EquipmentSlot::Armor,
        EquipmentSlot::Legwear,
        EquipmentSlot::Weapon,
        EquipmentSlot::Offhand,
    ];
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EquipmentSlot::Helmet => "Helmet",
            EquipmentSlot::Armor => "Armor",
            EquipmentSlot::Legwear => "Legwear",
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Offhand => "Offhand",
        };
        write!(f, "{}", name)
    }
}

/// Weapon handling class, which determines the attribute a weapon scales with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeaponClass {
    #[default]
    Melee,
    Ranged,
    Magic,
}

impl WeaponClass {
    /// The attribute this class scales damage and to-hit with
    pub fn scaling_stat(&self) -> Stat {
        match self {
            WeaponClass::Melee => Stat::Strength,
            WeaponClass::Ranged => Stat::Dexterity,
            WeaponClass::Magic => Stat::Intelligence,
        }
    }
}

/// Inventory storage categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Weapon,
    Offhand,
    Armor,
    Consumable,
    Misc,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 5] = [
        ItemCategory::Weapon,
        ItemCategory::Offhand,
        ItemCategory::Armor,
        ItemCategory::Consumable,
        ItemCategory::Misc,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_class_partition() {
        let physical: Vec<_> = Resistance::ALL
            .iter()
            .filter(|r| r.class() == DamageClass::Physical)
            .collect();
        assert_eq!(
            physical,
            vec![
                &Resistance::Bludgeoning,
                &Resistance::Piercing,
                &Resistance::Slashing
            ]
        );
        assert_eq!(Resistance::True.class(), DamageClass::True);
        assert_eq!(Resistance::Fire.class(), DamageClass::Magical);
    }

    #[test]
    fn test_weapon_class_scaling() {
        assert_eq!(WeaponClass::Melee.scaling_stat(), Stat::Strength);
        assert_eq!(WeaponClass::Ranged.scaling_stat(), Stat::Dexterity);
        assert_eq!(WeaponClass::Magic.scaling_stat(), Stat::Intelligence);
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Resistance::Bludgeoning).unwrap();
        assert_eq!(json, "\"bludgeoning\"");
        let stat: Stat = serde_json::from_str("\"luck\"").unwrap();
        assert_eq!(stat, Stat::Luck);
    }
}
