//! Weighted random selection

use rand::Rng;

/// Pick an index from a slice of weights, proportionally to each weight.
///
/// Negative weights are treated as zero. Returns `None` when the slice is
/// empty or the total weight is not positive.
pub fn pick_weighted_index<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let total: f64 = weights.iter().map(|w| w.max(0.0)).sum();
    if total <= 0.0 {
        return None;
    }

    let mut roll = rng.gen::<f64>() * total;
    let mut selected = 0;
    for (i, &w) in weights.iter().enumerate() {
        let w = w.max(0.0);
        if w <= 0.0 {
            continue;
        }
        selected = i;
        roll -= w;
        if roll <= 0.0 {
            break;
        }
    }
    Some(selected)
}

/// Pick an entry from a slice, weighted by a per-entry weight function
pub fn pick_weighted<'a, T, R, F>(entries: &'a [T], weight_of: F, rng: &mut R) -> Option<&'a T>
where
    R: Rng,
    F: Fn(&T) -> f64,
{
    let weights: Vec<f64> = entries.iter().map(weight_of).collect();
    pick_weighted_index(&weights, rng).map(|i| &entries[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_empty_and_zero_total() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(pick_weighted_index(&[], &mut rng), None);
        assert_eq!(pick_weighted_index(&[0.0, 0.0], &mut rng), None);
        assert_eq!(pick_weighted_index(&[-3.0, -1.0], &mut rng), None);
    }

    #[test]
    fn test_single_positive_weight_always_wins() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            assert_eq!(pick_weighted_index(&[0.0, 2.5, 0.0], &mut rng), Some(1));
        }
    }

    #[test]
    fn test_negative_weight_never_selected() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..200 {
            let picked = pick_weighted_index(&[-5.0, 1.0, 1.0], &mut rng).unwrap();
            assert_ne!(picked, 0);
        }
    }

    #[test]
    fn test_proportional_distribution() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let weights = [1.0, 3.0];
        let mut counts = [0u32; 2];
        for _ in 0..10000 {
            counts[pick_weighted_index(&weights, &mut rng).unwrap()] += 1;
        }
        // Index 1 should land about 3x as often as index 0
        let ratio = counts[1] as f64 / counts[0] as f64;
        assert!(ratio > 2.5 && ratio < 3.5, "ratio was {}", ratio);
    }

    #[test]
    fn test_pick_weighted_by_field() {
        struct Opt {
            name: &'static str,
            weight: f64,
        }
        let opts = [
            Opt {
                name: "never",
                weight: 0.0,
            },
            Opt {
                name: "always",
                weight: 1.0,
            },
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let picked = pick_weighted(&opts, |o| o.weight, &mut rng).unwrap();
        assert_eq!(picked.name, "always");
    }
}
