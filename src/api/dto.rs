use serde::Deserialize;

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

pub(crate) mod paths {
    pub const ALL_ITEMS: &str = "/all_items";
    pub const RECOMMENDATIONS: &str = "/recommendations";
    pub const CLASSIFY: &str = "/classify";
    pub const RANDOM_MEALS: &str = "/generate_random_meals";
    pub const CART_MEALS: &str = "/generate_cart_meals";
    pub const HEALTH: &str = "/health";
}
