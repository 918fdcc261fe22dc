use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display};

use super::NumberStatistic;

/// Named rule for choosing the candidate number set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Random,
    Hot,
    Cold,
    Overdue,
    #[default]
    Balanced,
}

impl Strategy {
    /// Declaration order, which is also the listing order
    pub const ALL: [Strategy; 5] = [
        Strategy::Random,
        Strategy::Hot,
        Strategy::Cold,
        Strategy::Overdue,
        Strategy::Balanced,
    ];

    /// Normalizes a free-form strategy name.
    ///
    /// Matching ignores case and surrounding whitespace. Anything unrecognized,
    /// including an empty name, selects `Balanced`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "random" => Strategy::Random,
            "hot" => Strategy::Hot,
            "cold" => Strategy::Cold,
            "overdue" => Strategy::Overdue,
            _ => Strategy::Balanced,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::Hot => "hot",
            Strategy::Cold => "cold",
            Strategy::Overdue => "overdue",
            Strategy::Balanced => "balanced",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Strategy::Random => "random strategy",
            Strategy::Hot => "hot-number strategy",
            Strategy::Cold => "cold-number strategy",
            Strategy::Overdue => "overdue-number strategy",
            Strategy::Balanced => "balanced strategy",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Strategy::Random => "Draws every number uniformly at random",
            Strategy::Hot => "Prefers numbers that have appeared most often",
            Strategy::Cold => "Prefers numbers that have appeared least often",
            Strategy::Overdue => "Prefers numbers whose current gap exceeds their average gap",
            Strategy::Balanced => "Mixes hot, cold and random numbers",
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Statistic fields that supported the choice of one number
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatisticBasis {
    pub frequency: u32,
    pub current_interval: u32,
    pub average_interval: Option<f64>,
}

impl From<&NumberStatistic> for StatisticBasis {
    fn from(stat: &NumberStatistic) -> Self {
        Self {
            frequency: stat.frequency,
            current_interval: stat.current_interval,
            average_interval: stat.average_interval,
        }
    }
}

/// One generated recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    pub lottery_type: String,
    pub strategy: Strategy,
    /// Ascending, distinct, within the lottery's universe
    pub numbers: Vec<u32>,
    pub special_number: Option<u32>,
    /// Heuristic support score in [0, 1], not a probability
    pub confidence_score: f64,
    pub analysis: String,
    /// Keyed by selected number; numbers without statistics are omitted
    pub statistics_basis: BTreeMap<u32, StatisticBasis>,
}
