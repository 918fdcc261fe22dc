use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One historical draw result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrawRecord {
    /// Issue number printed by the operator (e.g., "113000045")
    #[serde(default)]
    pub draw_number: Option<String>,
    #[serde(default)]
    pub draw_date: Option<DateTime<Utc>>,
    /// Main numbers
    pub numbers: Vec<u32>,
    #[serde(default)]
    pub special_number: Option<u32>,
}

impl DrawRecord {
    pub fn new(numbers: Vec<u32>) -> Self {
        Self {
            draw_number: None,
            draw_date: None,
            numbers,
            special_number: None,
        }
    }
}
