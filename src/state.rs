use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::api::{ApiResult, EcoApi, HttpEcoApi};
use crate::cart::{CartItem, CartStore};
use crate::catalog::{CatalogItem, SustainabilityAssessment};
use crate::config::AppConfig;
use crate::recipes::{self, CartMeals, Recipe};

/// A recipe together with the ingredients the cart is still missing.
#[derive(Debug, Clone, PartialEq)]
pub struct MealSuggestion {
    pub recipe: Recipe,
    pub missing: Vec<String>,
}

/// Owns one configured API client and the cart for a shopping session.
#[derive(Clone)]
pub struct Session {
    pub api: Arc<dyn EcoApi>,
    cart: Arc<Mutex<CartStore>>,
}

impl Session {
    pub fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let api = Arc::new(HttpEcoApi::new(&config.api)?) as Arc<dyn EcoApi>;
        info!(base_url = %config.api.base_url, "session ready");
        Ok(Self::from_parts(api, CartStore::new()))
    }

    pub fn from_parts(api: Arc<dyn EcoApi>, cart: CartStore) -> Self {
        Self {
            api,
            cart: Arc::new(Mutex::new(cart)),
        }
    }

    /// Adds a classified catalog item with its real eco-score.
    pub async fn add_catalog_item(
        &self,
        item: &CatalogItem,
        assessment: &SustainabilityAssessment,
    ) -> bool {
        self.add(CartItem::from_assessment(item, assessment)).await
    }

    /// The duplicate check and the insert happen under one lock.
    pub async fn add(&self, item: CartItem) -> bool {
        self.cart.lock().await.add(item)
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.cart.lock().await.remove(id)
    }

    pub async fn average_score(&self) -> f64 {
        self.cart.lock().await.average_score()
    }

    pub async fn cart_snapshot(&self) -> CartStore {
        self.cart.lock().await.clone()
    }

    pub async fn cart_names(&self) -> Vec<String> {
        self.cart.lock().await.names().map(str::to_string).collect()
    }

    /// Classifies `item` and adds it to the cart with the returned score.
    #[instrument(skip(self, item), fields(name = %item.name))]
    pub async fn classify_and_add(
        &self,
        item: &CatalogItem,
    ) -> ApiResult<(SustainabilityAssessment, bool)> {
        let assessment = self.api.classify(&item.name).await?;
        let added = self.add_catalog_item(item, &assessment).await;
        Ok((assessment, added))
    }

    /// Asks the service for meals built from the cart and pairs each one with
    /// the ingredients still missing from it.
    #[instrument(skip(self))]
    pub async fn meal_suggestions_for_cart(&self) -> ApiResult<(CartMeals, Vec<MealSuggestion>)> {
        let names = self.cart_names().await;
        let envelope = self.api.generate_recipes_for_cart(&names).await?;
        let suggestions = self.suggest(envelope.recipes()).await;
        Ok((envelope, suggestions))
    }

    #[instrument(skip(self))]
    pub async fn random_meal_suggestions(&self) -> ApiResult<Vec<MealSuggestion>> {
        let recipes = self.api.generate_random_recipes().await?;
        Ok(self.suggest(&recipes).await)
    }

    pub async fn suggest(&self, recipes: &[Recipe]) -> Vec<MealSuggestion> {
        let cart = self.cart.lock().await;
        recipes
            .iter()
            .map(|recipe| MealSuggestion {
                missing: recipes::missing_items(recipe, &cart),
                recipe: recipe.clone(),
            })
            .collect()
    }

    /// Puts the recipe's missing ingredients in the cart as placeholders.
    pub async fn add_missing_for(&self, recipe: &Recipe) -> usize {
        let mut cart = self.cart.lock().await;
        let missing = recipes::missing_items(recipe, &cart);
        recipes::add_missing_to_cart(&missing, &mut cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, HealthStatus};
    use crate::recipes::MealList;
    use async_trait::async_trait;
    use std::collections::BTreeMap;

    struct FakeApi {
        meals: Vec<Recipe>,
    }

    #[async_trait]
    impl EcoApi for FakeApi {
        async fn fetch_catalog(&self) -> ApiResult<Vec<CatalogItem>> {
            Ok(vec![CatalogItem::new("Oats", None)])
        }
        async fn fetch_recommendations(&self) -> ApiResult<Vec<CatalogItem>> {
            Ok(vec![])
        }
        async fn classify(&self, name: &str) -> ApiResult<SustainabilityAssessment> {
            if name.is_empty() {
                return Err(ApiError::EmptyResponse);
            }
            Ok(SustainabilityAssessment {
                name: name.to_string(),
                label: "Low impact".into(),
                eco_score: 8.0,
                rationale: String::new(),
                components: BTreeMap::new(),
                total_emissions: 1.2,
                image_link: None,
            })
        }
        async fn generate_random_recipes(&self) -> ApiResult<Vec<Recipe>> {
            Ok(self.meals.clone())
        }
        async fn generate_recipes_for_cart(
            &self,
            ingredient_names: &[String],
        ) -> ApiResult<CartMeals> {
            Ok(CartMeals {
                used_cart_items: ingredient_names.to_vec(),
                added_recommendations: vec![],
                final_ingredients_used: ingredient_names.to_vec(),
                meals: MealList {
                    meals: self.meals.clone(),
                },
            })
        }
        async fn health(&self) -> ApiResult<HealthStatus> {
            Ok(HealthStatus {
                status: "ok".into(),
            })
        }
    }

    fn session(meals: Vec<Recipe>) -> Session {
        Session::from_parts(Arc::new(FakeApi { meals }), CartStore::new())
    }

    fn chili() -> Recipe {
        Recipe::new(
            "Chili",
            "Beans and corn",
            vec!["Rice".into(), "Beans".into(), "Corn".into()],
        )
    }

    #[tokio::test]
    async fn classify_and_add_uses_real_score() {
        let s = session(vec![]);
        let oats = CatalogItem::new("Oats", Some("https://img/oats.png".into()));
        let (assessment, added) = s.classify_and_add(&oats).await.unwrap();
        assert!(added);
        assert_eq!(assessment.eco_score, 8.0);

        let cart = s.cart_snapshot().await;
        assert_eq!(cart.items()[0].image, "https://img/oats.png");
        assert_eq!(cart.average_score(), 8.0);
    }

    #[tokio::test]
    async fn classify_failure_leaves_cart_untouched() {
        let s = session(vec![]);
        let res = s.classify_and_add(&CatalogItem::new("", None)).await;
        assert!(matches!(res, Err(ApiError::EmptyResponse)));
        assert!(s.cart_snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn suggestions_compute_missing_live() {
        let s = session(vec![chili()]);
        s.add(CartItem::new(" beans ", "", "", 6.0)).await;

        let (envelope, suggestions) = s.meal_suggestions_for_cart().await.unwrap();
        assert_eq!(envelope.used_cart_items, vec![" beans "]);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].missing, vec!["Rice", "Corn"]);
    }

    #[tokio::test]
    async fn add_missing_closes_the_loop() {
        let s = session(vec![chili()]);
        s.add(CartItem::new("Beans", "", "", 6.0)).await;

        assert_eq!(s.add_missing_for(&chili()).await, 2);
        assert_eq!(s.add_missing_for(&chili()).await, 0);

        let suggestions = s.random_meal_suggestions().await.unwrap();
        assert!(suggestions[0].missing.is_empty());
        assert_eq!(s.average_score().await, 2.0);
    }

    #[tokio::test]
    async fn concurrent_adds_keep_names_unique() {
        let s = session(vec![]);
        let mut handles = Vec::new();
        for _ in 0..16 {
            let s = s.clone();
            handles.push(tokio::spawn(async move {
                s.add(CartItem::placeholder("Kale")).await
            }));
        }
        let mut inserted = 0;
        for h in handles {
            if h.await.unwrap() {
                inserted += 1;
            }
        }
        assert_eq!(inserted, 1);
        assert_eq!(s.cart_snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn remove_through_session() {
        let s = session(vec![]);
        let item = CartItem::new("Tofu", "", "", 9.0);
        let id = item.id;
        s.add(item).await;
        assert!(s.remove(id).await);
        assert_eq!(s.average_score().await, 0.0);
    }
}
