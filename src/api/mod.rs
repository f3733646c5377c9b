pub mod client;
pub mod dispatch;
pub mod dto;
pub mod error;

pub use client::{EcoApi, HttpEcoApi};
pub use dispatch::{dispatch, Pending};
pub use dto::HealthStatus;
pub use error::{ApiError, ApiResult};
