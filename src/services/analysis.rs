use serde::Serialize;

use crate::{
    models::{LotteryTypeConfig, NumberStatistic},
    services::engine::{scoring::round2, StatisticsView},
};

/// Size of the hot and cold lists in a report
const REPORT_SIZE: usize = 10;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NumberFrequency {
    pub number: u32,
    pub frequency: u32,
    /// Share of draws the number appeared in, 0-100 with two decimals
    pub percentage: f64,
}

/// Hot, cold and overdue numbers of one lottery type
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LotteryAnalysis {
    pub lottery_type: String,
    pub total_draws: u32,
    /// Most frequent first
    pub hot_numbers: Vec<NumberFrequency>,
    /// Least frequent first
    pub cold_numbers: Vec<NumberFrequency>,
    /// Ascending
    pub overdue_numbers: Vec<u32>,
}

/// Builds the analysis report for a statistics snapshot
pub fn analyze(
    config: &LotteryTypeConfig,
    statistics: &[NumberStatistic],
    total_draws: u32,
) -> LotteryAnalysis {
    let view = StatisticsView::new(config, statistics);

    let to_frequency = |number: u32| {
        let frequency = view.get(number).map(|s| s.frequency).unwrap_or_default();
        let percentage = if total_draws > 0 {
            round2(f64::from(frequency) / f64::from(total_draws) * 100.0)
        } else {
            0.0
        };
        NumberFrequency {
            number,
            frequency,
            percentage,
        }
    };

    let hot_numbers = view
        .ranked_by_frequency(true)
        .into_iter()
        .take(REPORT_SIZE)
        .map(to_frequency)
        .collect();
    let cold_numbers = view
        .ranked_by_frequency(false)
        .into_iter()
        .take(REPORT_SIZE)
        .map(to_frequency)
        .collect();

    let mut overdue_numbers = view.overdue();
    overdue_numbers.sort_unstable();

    LotteryAnalysis {
        lottery_type: config.key.clone(),
        total_draws,
        hot_numbers,
        cold_numbers,
        overdue_numbers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LotteryTypeConfig {
        LotteryTypeConfig::new("daily_539", "今彩539", 5, 39)
    }

    #[test]
    fn test_empty_statistics() {
        let report = analyze(&config(), &[], 120);
        assert_eq!(report.total_draws, 120);
        assert!(report.hot_numbers.is_empty());
        assert!(report.cold_numbers.is_empty());
        assert!(report.overdue_numbers.is_empty());
    }

    #[test]
    fn test_hot_and_cold_lists() {
        let stats: Vec<NumberStatistic> = (1..=39)
            .map(|n| NumberStatistic::new(n, n, 0))
            .collect();
        let report = analyze(&config(), &stats, 200);

        assert_eq!(report.hot_numbers.len(), 10);
        assert_eq!(report.hot_numbers[0].number, 39);
        assert_eq!(report.hot_numbers[0].percentage, 19.5);
        assert_eq!(report.cold_numbers.len(), 10);
        assert_eq!(report.cold_numbers[0].number, 1);
        assert_eq!(report.cold_numbers[0].percentage, 0.5);
    }

    #[test]
    fn test_zero_draws_gives_zero_percentage() {
        let stats = vec![NumberStatistic::new(4, 9, 0)];
        let report = analyze(&config(), &stats, 0);
        assert_eq!(report.hot_numbers[0].percentage, 0.0);
    }

    #[test]
    fn test_overdue_numbers_sorted() {
        let stats = vec![
            NumberStatistic::new(30, 5, 20).with_average_interval(7.0),
            NumberStatistic::new(2, 5, 20).with_average_interval(7.0),
            NumberStatistic::new(15, 5, 1).with_average_interval(7.0),
            NumberStatistic::new(9, 5, 40),
        ];
        let report = analyze(&config(), &stats, 50);
        assert_eq!(report.overdue_numbers, vec![2, 30]);
    }
}
