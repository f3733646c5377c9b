pub mod dto;
pub mod services;

pub use dto::{CartItem, PLACEHOLDER_SCORE};
pub use services::CartStore;
