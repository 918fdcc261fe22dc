//! Recommendation strategy engine
//!
//! Pure, synchronous selection of a number set for one lottery type. The engine
//! reads a statistics snapshot, never mutates it, and draws all randomness from
//! the generator passed in by the caller, so a seeded generator reproduces the
//! same selection.

use rand::Rng;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{LotteryTypeConfig, NumberStatistic, StatisticBasis, Strategy};

pub mod sampling;
pub mod scoring;

use sampling::sample_distinct;

/// Output of one engine run, before narrative text is attached
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Ascending and distinct
    pub numbers: Vec<u32>,
    pub special_number: Option<u32>,
    pub confidence_score: f64,
    pub statistics_basis: BTreeMap<u32, StatisticBasis>,
}

/// Statistics restricted to one lottery's universe.
///
/// Entries outside `1..=max_number` are dropped and only the first entry for a
/// number is kept, so every number the engine reads from here is selectable.
pub struct StatisticsView<'a> {
    entries: Vec<&'a NumberStatistic>,
    by_number: HashMap<u32, &'a NumberStatistic>,
}

impl<'a> StatisticsView<'a> {
    pub fn new(config: &LotteryTypeConfig, statistics: &'a [NumberStatistic]) -> Self {
        let mut entries = Vec::with_capacity(statistics.len());
        let mut by_number = HashMap::with_capacity(statistics.len());

        for stat in statistics {
            if !config.contains(stat.number) || by_number.contains_key(&stat.number) {
                continue;
            }
            by_number.insert(stat.number, stat);
            entries.push(stat);
        }

        Self { entries, by_number }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, number: u32) -> Option<&'a NumberStatistic> {
        self.by_number.get(&number).copied()
    }

    /// Numbers ordered by frequency; ties keep their supplied order
    pub fn ranked_by_frequency(&self, descending: bool) -> Vec<u32> {
        let mut ranked = self.entries.clone();
        if descending {
            ranked.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        } else {
            ranked.sort_by(|a, b| a.frequency.cmp(&b.frequency));
        }
        ranked.into_iter().map(|stat| stat.number).collect()
    }

    /// Numbers whose current gap exceeds their average gap, in supplied order
    pub fn overdue(&self) -> Vec<u32> {
        self.entries
            .iter()
            .filter(|stat| stat.is_overdue())
            .map(|stat| stat.number)
            .collect()
    }
}

/// Runs `strategy` for `config` over `statistics`.
///
/// Always returns exactly `numbers_count` distinct numbers within the universe;
/// short candidate pools are topped up from the unused universe.
pub fn select<R: Rng + ?Sized>(
    config: &LotteryTypeConfig,
    strategy: Strategy,
    statistics: &[NumberStatistic],
    rng: &mut R,
) -> Selection {
    let view = StatisticsView::new(config, statistics);

    let mut numbers = match strategy {
        Strategy::Random => pick_random(config, rng),
        Strategy::Hot => pick_ranked(config, &view, true, rng),
        Strategy::Cold => pick_ranked(config, &view, false, rng),
        Strategy::Overdue => pick_overdue(config, &view, rng),
        Strategy::Balanced => pick_balanced(config, &view, rng),
    };
    numbers.sort_unstable();

    let special_number = config
        .has_special
        .then(|| rng.random_range(1..=config.special_upper_bound()));

    let confidence_score = scoring::confidence_score(&numbers, &view, config.numbers_count);
    let statistics_basis = scoring::statistics_basis(&numbers, &view);

    tracing::debug!(
        lottery_type = %config.key,
        strategy = %strategy,
        statistics = view.len(),
        confidence_score,
        "Selection completed"
    );

    Selection {
        numbers,
        special_number,
        confidence_score,
        statistics_basis,
    }
}

fn quota(config: &LotteryTypeConfig) -> usize {
    config.numbers_count as usize
}

/// Tops `chosen` up to the quota from the universe, skipping `chosen` itself
fn fill_from_universe<R: Rng + ?Sized>(
    config: &LotteryTypeConfig,
    mut chosen: Vec<u32>,
    rng: &mut R,
) -> Vec<u32> {
    let missing = quota(config).saturating_sub(chosen.len());
    if missing > 0 {
        let excluded: HashSet<u32> = chosen.iter().copied().collect();
        chosen.extend(sample_distinct(1..=config.max_number, &excluded, missing, rng));
    }
    chosen
}

fn pick_random<R: Rng + ?Sized>(config: &LotteryTypeConfig, rng: &mut R) -> Vec<u32> {
    sample_distinct(1..=config.max_number, &HashSet::new(), quota(config), rng)
}

fn pick_ranked<R: Rng + ?Sized>(
    config: &LotteryTypeConfig,
    view: &StatisticsView<'_>,
    descending: bool,
    rng: &mut R,
) -> Vec<u32> {
    let quota = quota(config);
    let pool: Vec<u32> = view
        .ranked_by_frequency(descending)
        .into_iter()
        .take(quota * 2)
        .collect();

    if pool.len() < quota {
        return pick_random(config, rng);
    }
    sample_distinct(pool, &HashSet::new(), quota, rng)
}

fn pick_overdue<R: Rng + ?Sized>(
    config: &LotteryTypeConfig,
    view: &StatisticsView<'_>,
    rng: &mut R,
) -> Vec<u32> {
    let quota = quota(config);
    let eligible = view.overdue();

    if eligible.len() >= quota {
        return sample_distinct(eligible, &HashSet::new(), quota, rng);
    }
    fill_from_universe(config, eligible, rng)
}

/// Share sizes of the balanced strategy: (hot, cold)
fn balanced_shares(numbers_count: u32) -> (usize, usize) {
    let n = numbers_count as usize;
    let hot = (n * 2 / 5).max(1).min(n);
    let cold = (n * 3 / 10).max(1).min(n - hot);
    (hot, cold)
}

fn pick_balanced<R: Rng + ?Sized>(
    config: &LotteryTypeConfig,
    view: &StatisticsView<'_>,
    rng: &mut R,
) -> Vec<u32> {
    let (hot_share, cold_share) = balanced_shares(config.numbers_count);

    let hot_pool: Vec<u32> = view
        .ranked_by_frequency(true)
        .into_iter()
        .take(hot_share * 2)
        .collect();
    let mut chosen = sample_distinct(hot_pool, &HashSet::new(), hot_share, rng);

    if cold_share > 0 {
        let cold_pool: Vec<u32> = view
            .ranked_by_frequency(false)
            .into_iter()
            .take(cold_share * 2)
            .collect();
        let excluded: HashSet<u32> = chosen.iter().copied().collect();
        chosen.extend(sample_distinct(cold_pool, &excluded, cold_share, rng));
    }

    fill_from_universe(config, chosen, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn big_lottery() -> LotteryTypeConfig {
        LotteryTypeConfig::new("big_lottery", "大樂透", 6, 49).with_special(49)
    }

    fn daily_539() -> LotteryTypeConfig {
        LotteryTypeConfig::new("daily_539", "今彩539", 5, 39)
    }

    fn super_lotto() -> LotteryTypeConfig {
        LotteryTypeConfig::new("super_lotto", "雙贏彩", 12, 24)
    }

    /// Statistics for every number: frequency rises with the number,
    /// even numbers are overdue.
    fn full_statistics(max_number: u32) -> Vec<NumberStatistic> {
        (1..=max_number)
            .map(|n| {
                let current = if n % 2 == 0 { 20 } else { 2 };
                NumberStatistic::new(n, n * 3, current).with_average_interval(8.0)
            })
            .collect()
    }

    fn assert_valid(config: &LotteryTypeConfig, selection: &Selection) {
        assert_eq!(selection.numbers.len(), config.numbers_count as usize);
        assert!(selection.numbers.windows(2).all(|w| w[0] < w[1]));
        assert!(selection.numbers.iter().all(|n| config.contains(*n)));
        match selection.special_number {
            Some(special) => {
                assert!(config.has_special);
                assert!((1..=config.special_upper_bound()).contains(&special));
            }
            None => assert!(!config.has_special),
        }
        assert!((0.0..=1.0).contains(&selection.confidence_score));
    }

    #[test]
    fn test_every_strategy_yields_valid_selection() {
        let configs = [
            big_lottery(),
            daily_539(),
            super_lotto(),
            LotteryTypeConfig::new("power_lottery", "威力彩", 6, 38).with_special(8),
        ];
        for config in &configs {
            for stats in [Vec::new(), full_statistics(config.max_number), full_statistics(3)] {
                for strategy in Strategy::ALL {
                    for seed in 0..20 {
                        let mut rng = StdRng::seed_from_u64(seed);
                        let selection = select(config, strategy, &stats, &mut rng);
                        assert_valid(config, &selection);
                    }
                }
            }
        }
    }

    #[test]
    fn test_random_without_statistics() {
        let config = daily_539();
        let mut rng = StdRng::seed_from_u64(7);
        let selection = select(&config, Strategy::Random, &[], &mut rng);
        assert_valid(&config, &selection);
        assert_eq!(selection.confidence_score, 0.5);
        assert_eq!(selection.special_number, None);
        assert!(selection.statistics_basis.is_empty());
    }

    #[test]
    fn test_hot_includes_top_number_when_pool_equals_quota() {
        let config = big_lottery();
        let mut stats = vec![NumberStatistic::new(7, 120, 40).with_average_interval(10.0)];
        stats.extend([11, 19, 23, 31, 44].map(|n| NumberStatistic::new(n, 50, 3).with_average_interval(9.0)));

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select(&config, Strategy::Hot, &stats, &mut rng);
            assert_valid(&config, &selection);
            assert!(selection.numbers.contains(&7));
            assert_eq!(
                selection.statistics_basis[&7],
                StatisticBasis {
                    frequency: 120,
                    current_interval: 40,
                    average_interval: Some(10.0),
                }
            );
        }
    }

    #[test]
    fn test_hot_draws_from_top_frequencies() {
        let config = daily_539();
        let stats = full_statistics(39);
        let mut rng = StdRng::seed_from_u64(11);
        let selection = select(&config, Strategy::Hot, &stats, &mut rng);
        // top 10 by frequency are 30..=39
        assert!(selection.numbers.iter().all(|n| *n >= 30));
    }

    #[test]
    fn test_cold_draws_from_bottom_frequencies() {
        let config = daily_539();
        let stats = full_statistics(39);
        let mut rng = StdRng::seed_from_u64(12);
        let selection = select(&config, Strategy::Cold, &stats, &mut rng);
        assert!(selection.numbers.iter().all(|n| *n <= 10));
    }

    #[test]
    fn test_hot_with_short_pool_falls_back_to_random() {
        let config = daily_539();
        let stats = full_statistics(3);
        let mut rng = StdRng::seed_from_u64(13);
        let selection = select(&config, Strategy::Hot, &stats, &mut rng);
        assert_valid(&config, &selection);
    }

    #[test]
    fn test_overdue_keeps_all_eligible_when_short() {
        let config = daily_539();
        let stats = vec![
            NumberStatistic::new(4, 10, 30).with_average_interval(8.0),
            NumberStatistic::new(9, 10, 30).with_average_interval(8.0),
            NumberStatistic::new(12, 10, 1).with_average_interval(8.0),
            // no average interval, never eligible
            NumberStatistic::new(20, 10, 99),
        ];
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select(&config, Strategy::Overdue, &stats, &mut rng);
            assert_valid(&config, &selection);
            assert!(selection.numbers.contains(&4));
            assert!(selection.numbers.contains(&9));
        }
    }

    #[test]
    fn test_overdue_ignores_zero_average_interval() {
        let config = LotteryTypeConfig::new("pick_one", "Pick One", 1, 100);
        let stats = vec![
            NumberStatistic::new(3, 1, 1).with_average_interval(0.0),
            NumberStatistic::new(5, 4, 10).with_average_interval(2.0),
        ];
        assert_eq!(StatisticsView::new(&config, &stats).overdue(), vec![5]);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select(&config, Strategy::Overdue, &stats, &mut rng);
            assert_eq!(selection.numbers, vec![5]);
        }
    }

    #[test]
    fn test_overdue_samples_only_eligible_when_plentiful() {
        let config = daily_539();
        let stats = full_statistics(39);
        let mut rng = StdRng::seed_from_u64(14);
        let selection = select(&config, Strategy::Overdue, &stats, &mut rng);
        assert!(selection.numbers.iter().all(|n| n % 2 == 0));
    }

    #[test]
    fn test_overdue_selected_numbers_appear_in_basis() {
        let config = big_lottery();
        let stats = full_statistics(49);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select(&config, Strategy::Overdue, &stats, &mut rng);
            for n in &selection.numbers {
                let stat = stats.iter().find(|s| s.number == *n).unwrap();
                if stat.is_overdue() {
                    assert!(selection.statistics_basis.contains_key(n));
                }
            }
        }
    }

    #[test]
    fn test_balanced_shares() {
        assert_eq!(balanced_shares(5), (2, 1));
        assert_eq!(balanced_shares(6), (2, 1));
        assert_eq!(balanced_shares(12), (4, 3));
        assert_eq!(balanced_shares(2), (1, 1));
        assert_eq!(balanced_shares(1), (1, 0));
    }

    #[test]
    fn test_balanced_mixes_hot_and_cold() {
        let config = super_lotto();
        let stats = full_statistics(24);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select(&config, Strategy::Balanced, &stats, &mut rng);
            assert_valid(&config, &selection);
            // hot share of 4 from the top 8 (17..=24)
            assert!(selection.numbers.iter().filter(|n| **n >= 17).count() >= 4);
            // cold share of 3 from the bottom 6 (1..=6)
            assert!(selection.numbers.iter().filter(|n| **n <= 6).count() >= 3);
        }
    }

    #[test]
    fn test_single_number_game() {
        let config = LotteryTypeConfig::new("one", "One", 1, 1);
        let stats = full_statistics(1);
        for strategy in Strategy::ALL {
            let mut rng = StdRng::seed_from_u64(0);
            let selection = select(&config, strategy, &stats, &mut rng);
            assert_eq!(selection.numbers, vec![1]);
        }
    }

    #[test]
    fn test_whole_universe_requested() {
        let config = LotteryTypeConfig::new("all", "All", 10, 10);
        let stats = full_statistics(10);
        for strategy in Strategy::ALL {
            let mut rng = StdRng::seed_from_u64(5);
            let selection = select(&config, strategy, &stats, &mut rng);
            assert_eq!(selection.numbers, (1..=10).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_out_of_range_statistics_are_ignored() {
        let config = daily_539();
        let stats: Vec<NumberStatistic> = (40..=60)
            .map(|n| NumberStatistic::new(n, 500, 50).with_average_interval(2.0))
            .collect();
        for strategy in Strategy::ALL {
            let mut rng = StdRng::seed_from_u64(21);
            let selection = select(&config, strategy, &stats, &mut rng);
            assert_valid(&config, &selection);
            assert!(selection.statistics_basis.is_empty());
            assert_eq!(selection.confidence_score, 0.5);
        }
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let config = big_lottery();
        let stats = full_statistics(49);
        for strategy in Strategy::ALL {
            let a = select(&config, strategy, &stats, &mut StdRng::seed_from_u64(99));
            let b = select(&config, strategy, &stats, &mut StdRng::seed_from_u64(99));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_ranking_is_stable_for_ties() {
        let config = daily_539();
        let stats: Vec<NumberStatistic> = [5, 3, 8].map(|n| NumberStatistic::new(n, 10, 0)).to_vec();
        let view = StatisticsView::new(&config, &stats);
        assert_eq!(view.ranked_by_frequency(true), vec![5, 3, 8]);
        assert_eq!(view.ranked_by_frequency(false), vec![5, 3, 8]);
    }

    #[test]
    fn test_view_keeps_first_duplicate() {
        let config = daily_539();
        let stats = vec![NumberStatistic::new(5, 10, 0), NumberStatistic::new(5, 99, 0)];
        let view = StatisticsView::new(&config, &stats);
        assert_eq!(view.len(), 1);
        assert_eq!(view.get(5).map(|s| s.frequency), Some(10));
    }
}
