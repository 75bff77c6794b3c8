//! Dice expression parsing and rolling
//!
//! Expressions use the `NdM`, `NdM+K`, `NdM-K` notation. Parsing is strict;
//! the resolution layer uses [`roll_str`] which treats anything unparseable
//! as a zero roll, matching the rules core's non-fatal error policy.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiceParseError {
    #[error("empty dice expression")]
    Empty,
    #[error("malformed dice expression: {0}")]
    Malformed(String),
    #[error("dice expression has zero count or sides: {0}")]
    Degenerate(String),
}

/// A parsed dice expression, e.g. `2d6+1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpr {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

impl DiceExpr {
    pub fn new(count: u32, sides: u32, modifier: i32) -> Self {
        DiceExpr {
            count,
            sides,
            modifier,
        }
    }

    /// Roll the expression with the provided RNG
    pub fn roll(&self, rng: &mut impl Rng) -> i32 {
        let mut total = self.modifier;
        for _ in 0..self.count {
            total += rng.gen_range(1..=self.sides) as i32;
        }
        total
    }

    /// Minimum possible roll
    pub fn min(&self) -> i32 {
        self.count as i32 + self.modifier
    }

    /// Maximum possible roll
    pub fn max(&self) -> i32 {
        (self.count * self.sides) as i32 + self.modifier
    }
}

impl FromStr for DiceExpr {
    type Err = DiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DiceParseError::Empty);
        }

        let (count_str, rest) = s
            .split_once(['d', 'D'])
            .ok_or_else(|| DiceParseError::Malformed(s.to_string()))?;

        let (sides_str, modifier) = if let Some(pos) = rest.find(['+', '-']) {
            let (sides, modifier_str) = rest.split_at(pos);
            let modifier: i32 = modifier_str
                .parse()
                .map_err(|_| DiceParseError::Malformed(s.to_string()))?;
            (sides, modifier)
        } else {
            (rest, 0)
        };

        let count: u32 = count_str
            .parse()
            .map_err(|_| DiceParseError::Malformed(s.to_string()))?;
        let sides: u32 = sides_str
            .parse()
            .map_err(|_| DiceParseError::Malformed(s.to_string()))?;

        if count == 0 || sides == 0 {
            return Err(DiceParseError::Degenerate(s.to_string()));
        }

        Ok(DiceExpr::new(count, sides, modifier))
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modifier {
            0 => write!(f, "{}d{}", self.count, self.sides),
            m if m > 0 => write!(f, "{}d{}+{}", self.count, self.sides, m),
            m => write!(f, "{}d{}{}", self.count, self.sides, m),
        }
    }
}

/// Roll a dice string leniently: empty, blank or malformed input rolls 0
pub fn roll_str(expr: &str, rng: &mut impl Rng) -> i32 {
    match expr.parse::<DiceExpr>() {
        Ok(dice) => dice.roll(rng),
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_parse_basic() {
        let dice: DiceExpr = "2d6".parse().unwrap();
        assert_eq!(dice, DiceExpr::new(2, 6, 0));
    }

    #[test]
    fn test_parse_with_modifier() {
        assert_eq!("1d8+3".parse::<DiceExpr>().unwrap(), DiceExpr::new(1, 8, 3));
        assert_eq!(
            "3d4-2".parse::<DiceExpr>().unwrap(),
            DiceExpr::new(3, 4, -2)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<DiceExpr>(), Err(DiceParseError::Empty));
        assert!("d6".parse::<DiceExpr>().is_err());
        assert!("2d".parse::<DiceExpr>().is_err());
        assert!("two d six".parse::<DiceExpr>().is_err());
        assert!("0d6".parse::<DiceExpr>().is_err());
        assert!("2d0".parse::<DiceExpr>().is_err());
    }

    #[test]
    fn test_roll_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let dice: DiceExpr = "3d6+2".parse().unwrap();
        for _ in 0..200 {
            let roll = dice.roll(&mut rng);
            assert!(roll >= dice.min() && roll <= dice.max());
        }
    }

    #[test]
    fn test_roll_1d1_is_deterministic() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let dice: DiceExpr = "1d1".parse().unwrap();
        assert_eq!(dice.roll(&mut rng), 1);
    }

    #[test]
    fn test_roll_str_lenient() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(roll_str("", &mut rng), 0);
        assert_eq!(roll_str("   ", &mut rng), 0);
        assert_eq!(roll_str("not dice", &mut rng), 0);
        assert_eq!(roll_str("1d1+4", &mut rng), 5);
    }

    #[test]
    fn test_display_round_trip() {
        for s in ["2d6", "1d8+3", "3d4-2"] {
            let dice: DiceExpr = s.parse().unwrap();
            assert_eq!(dice.to_string(), s);
        }
    }
}
