use rand::{seq::index, Rng};
use std::collections::HashSet;

/// Samples up to `amount` distinct numbers uniformly from `candidates` minus `excluded`.
///
/// Duplicate candidates count once. When fewer than `amount` numbers remain
/// available, all of them are returned.
pub fn sample_distinct<R, I>(
    candidates: I,
    excluded: &HashSet<u32>,
    amount: usize,
    rng: &mut R,
) -> Vec<u32>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = u32>,
{
    let mut seen = HashSet::new();
    let available: Vec<u32> = candidates
        .into_iter()
        .filter(|n| !excluded.contains(n) && seen.insert(*n))
        .collect();

    let amount = amount.min(available.len());
    index::sample(rng, available.len(), amount)
        .into_iter()
        .map(|i| available[i])
        .collect()
}
