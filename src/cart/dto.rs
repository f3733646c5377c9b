use uuid::Uuid;

use crate::catalog::{CatalogItem, SustainabilityAssessment};

/// Score given to items added without a classification, e.g. recipe ingredients.
pub const PLACEHOLDER_SCORE: f64 = 0.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: Uuid,
    pub name: String,
    /// Empty when there is no image.
    pub image: String,
    pub description: String,
    pub score: f64,
}

impl CartItem {
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        description: impl Into<String>,
        score: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            image: image.into(),
            description: description.into(),
            score,
        }
    }

    /// An ingredient pulled in from a recipe: no image, no description, placeholder score.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self::new(name, "", "", PLACEHOLDER_SCORE)
    }

    pub fn from_assessment(item: &CatalogItem, assessment: &SustainabilityAssessment) -> Self {
        Self::new(
            item.name.clone(),
            item.image_link.clone().unwrap_or_default(),
            "",
            assessment.eco_score,
        )
    }
}
