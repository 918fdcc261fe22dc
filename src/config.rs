use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// API key for the narrative (chat completions) service.
    /// When unset, recommendations use the templated analysis text.
    #[serde(default)]
    pub narrative_api_key: Option<String>,

    /// Narrative service base URL
    #[serde(default = "default_narrative_api_url")]
    pub narrative_api_url: String,

    /// Model name sent to the narrative service
    #[serde(default = "default_narrative_model")]
    pub narrative_model: String,

    /// Upper bound on a single narrative call, in seconds
    #[serde(default = "default_narrative_timeout_secs")]
    pub narrative_timeout_secs: u64,

    /// Credits charged per generated recommendation
    #[serde(default = "default_recommendation_cost")]
    pub recommendation_cost: u32,

    /// Maximum recommendations generated by one request
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: u32,

    /// Optional JSON file replacing the built-in lottery catalog
    #[serde(default)]
    pub lottery_catalog_path: Option<String>,

    /// Allowed CORS origins (comma separated in the environment)
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_narrative_api_url() -> String {
    "https://api.manus.ai/v1".to_string()
}

fn default_narrative_model() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_narrative_timeout_secs() -> u64 {
    10
}

fn default_recommendation_cost() -> u32 {
    10
}

fn default_max_recommendations() -> u32 {
    10
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:8000".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            narrative_api_key: None,
            narrative_api_url: default_narrative_api_url(),
            narrative_model: default_narrative_model(),
            narrative_timeout_secs: default_narrative_timeout_secs(),
            recommendation_cost: default_recommendation_cost(),
            max_recommendations: default_max_recommendations(),
            lottery_catalog_path: None,
            cors_origins: default_cors_origins(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Narrative key, treating a blank value as absent
    pub fn narrative_key(&self) -> Option<&str> {
        self.narrative_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
