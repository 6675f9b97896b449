//! Cumulative-weight selection.

use rand::Rng;

/// Anything with a relative selection weight.
pub trait Weighted {
    fn weight(&self) -> f64;
}

/// Effective weight: non-finite and non-positive weights count as zero.
fn effective(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Draws `r` in `[0, total)` and returns the index of the first entry whose
/// cumulative weight exceeds `r`.
///
/// Exactly one index is returned for any non-empty slice: if rounding leaves `r`
/// unconsumed the last positively weighted entry is chosen, and a table with no
/// positive weight falls back to its last entry.
pub fn select_index<T, R>(entries: &[T], rng: &mut R) -> Option<usize>
where
    T: Weighted,
    R: Rng + ?Sized,
{
    if entries.is_empty() {
        return None;
    }
    let total: f64 = entries.iter().map(|entry| effective(entry.weight())).sum();
    let fallback = entries
        .iter()
        .rposition(|entry| effective(entry.weight()) > 0.0)
        .unwrap_or(entries.len() - 1);
    if total <= 0.0 {
        return Some(fallback);
    }

    let r = rng.gen_range(0.0..total);
    let mut cumulative = 0.0;
    for (index, entry) in entries.iter().enumerate() {
        cumulative += effective(entry.weight());
        if cumulative > r {
            return Some(index);
        }
    }
    Some(fallback)
}

pub fn select<'a, T, R>(entries: &'a [T], rng: &mut R) -> Option<&'a T>
where
    T: Weighted,
    R: Rng + ?Sized,
{
    select_index(entries, rng).map(|index| &entries[index])
}

/// One row of an outcome table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutcomeWeight {
    pub label: String,
    pub weight: f64,
    pub multiplier: f64,
}

impl Weighted for OutcomeWeight {
    fn weight(&self) -> f64 {
        self.weight
    }
}

/// Selected outcome of a table draw.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    pub label: String,
    pub multiplier: f64,
}

/// Weighted outcome table; weights need not be normalized.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OutcomeTable {
    pub entries: Vec<OutcomeWeight>,
}

impl OutcomeTable {
    pub fn new(entries: Vec<OutcomeWeight>) -> Self {
        Self { entries }
    }

    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Outcome> {
        select(&self.entries, rng).map(|entry| Outcome {
            label: entry.label.clone(),
            multiplier: entry.multiplier,
        })
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|entry| effective(entry.weight)).sum()
    }

    /// Expected multiplier of one draw.
    pub fn expected_multiplier(&self) -> f64 {
        let total = self.total_weight();
        if total <= 0.0 {
            return 0.0;
        }
        self.entries
            .iter()
            .map(|entry| effective(entry.weight) * entry.multiplier)
            .sum::<f64>()
            / total
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn table(weights: &[f64]) -> OutcomeTable {
        OutcomeTable::new(
            weights
                .iter()
                .enumerate()
                .map(|(i, weight)| OutcomeWeight {
                    label: format!("face {}", i + 1),
                    weight: *weight,
                    multiplier: 1.0,
                })
                .collect(),
        )
    }

    #[test]
    fn uniform_weights_converge_to_uniform() {
        let table = table(&[1.0; 6]);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut counts = [0u32; 6];
        let draws = 60_000;
        for _ in 0..draws {
            counts[select_index(&table.entries, &mut rng).unwrap()] += 1;
        }
        let expected = f64::from(draws) / 6.0;
        for count in counts {
            let deviation = (f64::from(count) - expected).abs() / expected;
            assert!(deviation < 0.05, "counts {counts:?}");
        }
    }

    #[test]
    fn single_nonzero_weight_always_wins() {
        let table = table(&[0.0, 0.0, 3.0, 0.0]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..1_000 {
            assert_eq!(select_index(&table.entries, &mut rng), Some(2));
        }
    }

    #[test]
    fn degenerate_tables_still_select_one_entry() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(select_index(&table(&[]).entries, &mut rng), None);
        assert_eq!(select_index(&table(&[0.0, 0.0]).entries, &mut rng), Some(1));
        assert_eq!(
            select_index(&table(&[f64::NAN, -1.0, 2.0]).entries, &mut rng),
            Some(2)
        );
    }
}
