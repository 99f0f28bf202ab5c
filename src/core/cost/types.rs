//! Pricing table types

use crate::utils::error::{MeterError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Price of one model, USD per one million tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    /// Input (prompt) tokens
    pub input: f64,
    /// Output (completion) tokens
    #[serde(default)]
    pub output: f64,
}

impl ModelPricing {
    pub const fn new(input: f64, output: f64) -> Self {
        Self { input, output }
    }

    fn is_valid(&self) -> bool {
        self.input.is_finite() && self.output.is_finite() && self.input >= 0.0 && self.output >= 0.0
    }
}

#[derive(Deserialize)]
struct RawPricingTable {
    default_model: String,
    models: HashMap<String, ModelPricing>,
}

/// Versioned pricing data with a fallback model for unknown names
///
/// The table always contains an entry for its default model, so lookups
/// never fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPricingTable")]
pub struct PricingTable {
    default_model: String,
    models: HashMap<String, ModelPricing>,
}

impl TryFrom<RawPricingTable> for PricingTable {
    type Error = MeterError;

    fn try_from(raw: RawPricingTable) -> Result<Self> {
        Self::new(raw.default_model, raw.models)
    }
}

impl Default for PricingTable {
    /// Reference OpenAI pricing (November 2024)
    fn default() -> Self {
        let models = HashMap::from([
            ("gpt-4o-mini".to_string(), ModelPricing::new(0.150, 0.600)),
            ("gpt-4o".to_string(), ModelPricing::new(2.50, 10.00)),
            ("text-embedding-3-small".to_string(), ModelPricing::new(0.020, 0.0)),
            ("text-embedding-3-large".to_string(), ModelPricing::new(0.130, 0.0)),
        ]);

        Self {
            default_model: "gpt-4o-mini".to_string(),
            models,
        }
    }
}

impl PricingTable {
    /// Build a table, checking that the default model is priced
    pub fn new(default_model: String, models: HashMap<String, ModelPricing>) -> Result<Self> {
        if !models.contains_key(&default_model) {
            return Err(MeterError::config(format!(
                "pricing table has no entry for default model '{}'",
                default_model
            )));
        }
        if let Some((name, _)) = models.iter().find(|(_, p)| !p.is_valid()) {
            return Err(MeterError::config(format!(
                "pricing for model '{}' must be non-negative",
                name
            )));
        }

        Ok(Self {
            default_model,
            models,
        })
    }

    /// Load a table from a JSON or YAML file, chosen by extension
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading pricing table from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await?;
        let table: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };

        debug!("Loaded pricing for {} models", table.models.len());
        Ok(table)
    }

    /// Name of the fallback model
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Priced model names
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Pricing for `model`, or the default model's pricing when unknown
    pub fn pricing_for(&self, model: &str) -> ModelPricing {
        self.models
            .get(model)
            .or_else(|| self.models.get(&self.default_model))
            .copied()
            .unwrap_or_default()
    }
}
