//! Client-side core of the eco shopping assistant: catalog and score types,
//! the cart, recipe/cart reconciliation and the HTTP client for the
//! classification and recipe service.

pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod recipes;
pub mod state;

pub use api::{ApiError, ApiResult, EcoApi, HttpEcoApi};
pub use cart::{CartItem, CartStore};
pub use catalog::{CatalogItem, SustainabilityAssessment};
pub use config::AppConfig;
pub use recipes::{CartMeals, Recipe};
pub use state::{MealSuggestion, Session};
