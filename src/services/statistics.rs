use std::collections::HashSet;

use crate::{
    error::{AppError, AppResult},
    models::{DrawRecord, LotteryTypeConfig, NumberStatistic},
};

/// Derives per-number statistics from a draw history ordered newest first.
///
/// Returns one entry per number of the universe, ascending:
/// - `current_interval` counts draws since the latest appearance (0 when the
///   number is in the newest draw, the history length when never drawn);
/// - `average_interval` and `max_interval` are taken over the gaps between
///   consecutive appearances and stay empty below two appearances.
pub fn derive_statistics(
    config: &LotteryTypeConfig,
    draws: &[DrawRecord],
) -> AppResult<Vec<NumberStatistic>> {
    validate_draws(config, draws)?;

    let statistics = (1..=config.max_number)
        .map(|number| {
            let positions: Vec<usize> = draws
                .iter()
                .enumerate()
                .filter(|(_, draw)| draw.numbers.contains(&number))
                .map(|(t, _)| t)
                .collect();

            let gaps: Vec<usize> = positions.windows(2).map(|w| w[1] - w[0]).collect();
            let average_interval = (!gaps.is_empty())
                .then(|| gaps.iter().sum::<usize>() as f64 / gaps.len() as f64);

            NumberStatistic {
                number,
                frequency: positions.len() as u32,
                current_interval: positions.first().copied().unwrap_or(draws.len()) as u32,
                average_interval,
                max_interval: gaps.iter().max().map(|gap| *gap as u32),
                last_appeared: positions.first().and_then(|t| draws[*t].draw_date),
            }
        })
        .collect();

    Ok(statistics)
}

fn validate_draws(config: &LotteryTypeConfig, draws: &[DrawRecord]) -> AppResult<()> {
    for (index, draw) in draws.iter().enumerate() {
        let label = draw
            .draw_number
            .clone()
            .unwrap_or_else(|| format!("#{}", index));

        if let Some(number) = draw.numbers.iter().find(|n| !config.contains(**n)) {
            return Err(AppError::InvalidInput(format!(
                "Draw {}: number {} is outside 1..={}",
                label, number, config.max_number
            )));
        }

        let unique: HashSet<u32> = draw.numbers.iter().copied().collect();
        if unique.len() != draw.numbers.len() {
            return Err(AppError::InvalidInput(format!(
                "Draw {}: numbers must be distinct",
                label
            )));
        }

        if let Some(special) = draw.special_number {
            if !config.has_special || !(1..=config.special_upper_bound()).contains(&special) {
                return Err(AppError::InvalidInput(format!(
                    "Draw {}: invalid special number {}",
                    label, special
                )));
            }
        }
    }
    Ok(())
}
