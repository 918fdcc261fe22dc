use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Historical statistics of one number within one lottery type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumberStatistic {
    pub number: u32,
    /// Historical appearance count
    #[serde(default)]
    pub frequency: u32,
    /// Draws since the number last appeared
    #[serde(default)]
    pub current_interval: u32,
    /// Mean gap between appearances
    #[serde(default)]
    pub average_interval: Option<f64>,
    #[serde(default)]
    pub max_interval: Option<u32>,
    #[serde(default)]
    pub last_appeared: Option<DateTime<Utc>>,
}

impl NumberStatistic {
    pub fn new(number: u32, frequency: u32, current_interval: u32) -> Self {
        Self {
            number,
            frequency,
            current_interval,
            average_interval: None,
            max_interval: None,
            last_appeared: None,
        }
    }

    pub fn with_average_interval(mut self, average_interval: f64) -> Self {
        self.average_interval = Some(average_interval);
        self
    }

    /// Current gap exceeds the historical mean gap.
    /// Numbers without a positive mean gap are never overdue.
    pub fn is_overdue(&self) -> bool {
        self.average_interval
            .filter(|average| *average > 0.0)
            .is_some_and(|average| f64::from(self.current_interval) > average)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_overdue() {
        assert!(NumberStatistic::new(7, 120, 40).with_average_interval(10.0).is_overdue());
        assert!(!NumberStatistic::new(7, 120, 10).with_average_interval(10.0).is_overdue());
        assert!(!NumberStatistic::new(7, 120, 40).is_overdue());
    }

    #[test]
    fn test_zero_average_interval_is_never_overdue() {
        assert!(!NumberStatistic::new(3, 1, 1).with_average_interval(0.0).is_overdue());
        assert!(!NumberStatistic::new(3, 1, 50).with_average_interval(0.0).is_overdue());
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let stat: NumberStatistic = serde_json::from_str(r#"{"number": 12}"#).unwrap();
        assert_eq!(stat, NumberStatistic::new(12, 0, 0));
    }

    #[test]
    fn test_deserialize_full_record() {
        let stat: NumberStatistic = serde_json::from_str(
            r#"{
                "number": 3,
                "frequency": 41,
                "current_interval": 2,
                "average_interval": 7.5,
                "max_interval": 30,
                "last_appeared": "2024-03-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(stat.average_interval, Some(7.5));
        assert_eq!(stat.max_interval, Some(30));
        assert!(stat.last_appeared.is_some());
    }
}
