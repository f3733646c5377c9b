pub mod dto;
pub mod services;

pub use dto::{format_score, CatalogItem, ScoreBand, SustainabilityAssessment};
pub use services::{rationale_sections, search, RationaleSection};
