use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A food item as listed by `/all_items` and `/recommendations`.
///
/// The identity is assigned locally on decode; the service does not send one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(deserialize_with = "non_empty_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,
}

impl CatalogItem {
    pub fn new(name: impl Into<String>, image_link: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            image_link,
        }
    }
}

/// Result of `/classify` for a single food name. Not cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityAssessment {
    pub name: String,
    pub label: String,
    // no bound is enforced by the service; 0-10 is only a display convention
    pub eco_score: f64,
    pub rationale: String,
    pub components: BTreeMap<String, f64>,
    pub total_emissions: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,
}

impl SustainabilityAssessment {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.eco_score)
    }
}

/// Request body for `/classify`.
#[derive(Debug, Serialize)]
pub struct ClassifyRequest<'a> {
    pub food_name: &'a str,
}

/// Coarse rating used to colour scores: green, yellow, red.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Moderate,
    Low,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 7.0 {
            ScoreBand::High
        } else if score >= 4.0 {
            ScoreBand::Moderate
        } else {
            ScoreBand::Low
        }
    }
}

pub fn format_score(score: f64) -> String {
    format!("Eco-Score: {:.1}/10", score)
}

fn non_empty_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    if name.trim().is_empty() {
        return Err(serde::de::Error::custom("item name must not be empty"));
    }
    Ok(name)
}
