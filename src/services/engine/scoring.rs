use std::collections::BTreeMap;

use super::StatisticsView;
use crate::models::StatisticBasis;

/// Score reported when no statistics back the selection
pub const NEUTRAL_CONFIDENCE: f64 = 0.5;

const OVERDUE_WEIGHT: f64 = 0.5;
const REGULAR_WEIGHT: f64 = 0.3;

/// Heuristic support score of a selection, in [0, 1].
///
/// Each selected number with statistics contributes a frequency component
/// (`min(frequency / 100, 1) * 0.5`) plus an interval component (0.5 when
/// overdue, 0.3 otherwise). The sum is averaged over `numbers_count` and
/// rounded to two decimals.
pub fn confidence_score(numbers: &[u32], view: &StatisticsView<'_>, numbers_count: u32) -> f64 {
    if view.is_empty() || numbers_count == 0 {
        return NEUTRAL_CONFIDENCE;
    }

    let total: f64 = numbers
        .iter()
        .filter_map(|n| view.get(*n))
        .map(|stat| {
            let frequency_component = (f64::from(stat.frequency) / 100.0).min(1.0) * 0.5;
            let interval_component = if stat.is_overdue() {
                OVERDUE_WEIGHT
            } else {
                REGULAR_WEIGHT
            };
            frequency_component + interval_component
        })
        .sum();

    round2(total / f64::from(numbers_count))
}

/// Statistic fields of every selected number that has statistics
pub fn statistics_basis(numbers: &[u32], view: &StatisticsView<'_>) -> BTreeMap<u32, StatisticBasis> {
    numbers
        .iter()
        .filter_map(|n| view.get(*n).map(|stat| (*n, StatisticBasis::from(stat))))
        .collect()
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
