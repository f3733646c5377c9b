pub mod dto;
pub mod services;

pub use dto::{CartMeals, MealList, Recipe};
pub use services::{add_missing_to_cart, missing_items};
