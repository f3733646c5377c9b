use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated meal. `missing_items` is whatever the service sent; the live
/// value is recomputed against the cart by [`super::services::missing_items`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(rename = "meal_name")]
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_items: Option<Vec<String>>,
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        ingredients: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            ingredients,
            missing_items: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealList {
    pub meals: Vec<Recipe>,
}

/// Response of `/generate_cart_meals`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartMeals {
    /// Cart ingredients the service actually used.
    pub used_cart_items: Vec<String>,
    /// Ingredients the service added on top of the cart.
    pub added_recommendations: Vec<String>,
    pub final_ingredients_used: Vec<String>,
    pub meals: MealList,
}

impl CartMeals {
    pub fn recipes(&self) -> &[Recipe] {
        &self.meals.meals
    }

    pub fn into_recipes(self) -> Vec<Recipe> {
        self.meals.meals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_decodes_wire_names() {
        let body = r#"{"meal_name":"Chili","description":"Hearty","ingredients":["Beans","Corn"]}"#;
        let r: Recipe = serde_json::from_str(body).unwrap();
        assert_eq!(r.name, "Chili");
        assert_eq!(r.ingredients, vec!["Beans", "Corn"]);
        assert_eq!(r.missing_items, None);
    }

    #[test]
    fn recipe_with_empty_ingredients_is_valid() {
        let body = r#"{"meal_name":"Air","description":"","ingredients":[],"missing_items":[]}"#;
        let r: Recipe = serde_json::from_str(body).unwrap();
        assert!(r.ingredients.is_empty());
        assert_eq!(r.missing_items, Some(vec![]));
    }

    #[test]
    fn cart_meals_keeps_envelope_fields() {
        let body = r#"{
            "used_cart_items": ["Rice"],
            "added_recommendations": ["Lentils"],
            "final_ingredients_used": ["Rice", "Lentils"],
            "meals": {"meals": [
                {"meal_name":"Dal","description":"Spiced","ingredients":["Lentils","Rice"]}
            ]}
        }"#;
        let env: CartMeals = serde_json::from_str(body).unwrap();
        assert_eq!(env.used_cart_items, vec!["Rice"]);
        assert_eq!(env.added_recommendations, vec!["Lentils"]);
        assert_eq!(env.final_ingredients_used, vec!["Rice", "Lentils"]);
        assert_eq!(env.recipes().len(), 1);
        assert_eq!(env.into_recipes()[0].name, "Dal");
    }

    #[test]
    fn serialized_recipe_uses_meal_name() {
        let r = Recipe::new("Soup", "Warm", vec!["Leek".into()]);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["meal_name"], "Soup");
        assert!(json.get("missing_items").is_none());
        assert!(json.get("id").is_none());
    }
}
