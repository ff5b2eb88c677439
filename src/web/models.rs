use serde::{Deserialize, Serialize};

use crate::model::ModelSummary;

/// Raw `POST /predict` body, kept as posted pairs.
///
/// Nothing is required at this layer so a missing field reaches the handler
/// and gets the form-data message instead of a framework rejection. A
/// repeated key resolves to its first occurrence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ShipmentForm(Vec<(String, String)>);

impl ShipmentForm {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }
}

/// Query string carried by the redirect to `/result`.
#[derive(Debug, Serialize)]
pub struct ResultLocation<'a> {
    pub result: &'a str,
    pub reach_prob: f64,
    pub no_reach_prob: f64,
}

/// `GET /result` parameters as received. Parsed by the handler.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultParams {
    pub result: Option<String>,
    pub reach_prob: Option<String>,
    pub no_reach_prob: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub model: ModelSummary,
}
