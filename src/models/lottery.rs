use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};

/// Rules of one supported game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LotteryTypeConfig {
    /// Lookup key (e.g., "big_lottery")
    pub key: String,
    /// Display name
    pub name: String,
    /// How many main numbers are drawn
    pub numbers_count: u32,
    /// Inclusive upper bound of the main number universe (lower bound is 1)
    pub max_number: u32,
    /// Whether the game draws a special number
    pub has_special: bool,
    /// Inclusive upper bound of the special number, defaults to `max_number`
    #[serde(default)]
    pub special_max: Option<u32>,
}

impl LotteryTypeConfig {
    pub fn new(key: &str, name: &str, numbers_count: u32, max_number: u32) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            numbers_count,
            max_number,
            has_special: false,
            special_max: None,
        }
    }

    /// Enables the special number with the given upper bound
    pub fn with_special(mut self, special_max: u32) -> Self {
        self.has_special = true;
        self.special_max = Some(special_max);
        self
    }

    /// Effective upper bound of the special number
    pub fn special_upper_bound(&self) -> u32 {
        self.special_max.unwrap_or(self.max_number)
    }

    /// Whether `number` belongs to the main number universe
    pub fn contains(&self, number: u32) -> bool {
        (1..=self.max_number).contains(&number)
    }

    fn validate(&self) -> AppResult<()> {
        if self.numbers_count == 0 {
            return Err(AppError::InvalidInput(format!(
                "{}: numbers_count must be at least 1",
                self.key
            )));
        }
        if self.numbers_count > self.max_number {
            return Err(AppError::InvalidInput(format!(
                "{}: numbers_count {} exceeds max_number {}",
                self.key, self.numbers_count, self.max_number
            )));
        }
        if self.has_special && self.special_upper_bound() == 0 {
            return Err(AppError::InvalidInput(format!(
                "{}: special_max must be at least 1",
                self.key
            )));
        }
        Ok(())
    }
}

/// Table of lottery types, fixed for the life of the process
#[derive(Debug, Clone)]
pub struct LotteryCatalog {
    entries: BTreeMap<String, LotteryTypeConfig>,
}

impl Default for LotteryCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LotteryCatalog {
    /// Builds a catalog from explicit entries, validating each one
    pub fn from_entries(entries: Vec<LotteryTypeConfig>) -> AppResult<Self> {
        let mut map = BTreeMap::new();
        for entry in entries {
            entry.validate()?;
            if map.contains_key(&entry.key) {
                return Err(AppError::InvalidInput(format!(
                    "Duplicate lottery type: {}",
                    entry.key
                )));
            }
            map.insert(entry.key.clone(), entry);
        }
        Ok(Self { entries: map })
    }

    /// The four games supported out of the box
    pub fn builtin() -> Self {
        let entries = [
            LotteryTypeConfig::new("big_lottery", "大樂透", 6, 49).with_special(49),
            LotteryTypeConfig::new("power_lottery", "威力彩", 6, 38).with_special(8),
            LotteryTypeConfig::new("daily_539", "今彩539", 5, 39),
            LotteryTypeConfig::new("super_lotto", "雙贏彩", 12, 24),
        ];

        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.key.clone(), entry))
                .collect(),
        }
    }

    /// Parses a JSON array of lottery types
    pub fn from_json(json: &str) -> AppResult<Self> {
        let entries: Vec<LotteryTypeConfig> = serde_json::from_str(json)
            .map_err(|e| AppError::InvalidInput(format!("Invalid lottery catalog: {}", e)))?;
        Self::from_entries(entries)
    }

    /// Loads the catalog from `path`, or the built-in table when no path is given
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let catalog = Self::from_json(&json)?;
                tracing::info!(path = %path, entries = catalog.len(), "Loaded lottery catalog");
                Ok(catalog)
            }
            None => Ok(Self::builtin()),
        }
    }

    /// Looks up a lottery type by key
    pub fn get(&self, key: &str) -> AppResult<&LotteryTypeConfig> {
        self.entries
            .get(key)
            .ok_or_else(|| AppError::UnknownLotteryType(key.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LotteryTypeConfig> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
