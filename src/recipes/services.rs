use std::collections::HashSet;

use tracing::debug;

use super::dto::Recipe;
use crate::cart::{CartItem, CartStore};

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Ingredients of `recipe` not present in `cart`, in recipe order.
/// Comparison ignores case and surrounding whitespace.
pub fn missing_items(recipe: &Recipe, cart: &CartStore) -> Vec<String> {
    let have: HashSet<String> = cart.names().map(normalize).collect();
    recipe
        .ingredients
        .iter()
        .filter(|ingredient| !have.contains(&normalize(ingredient)))
        .cloned()
        .collect()
}

/// Adds each name as a placeholder item. Names already in the cart are
/// skipped, so repeating the call leaves the cart unchanged.
pub fn add_missing_to_cart<S: AsRef<str>>(names: &[S], cart: &mut CartStore) -> usize {
    let mut added = 0;
    for name in names {
        let name = name.as_ref();
        if cart.contains(name) {
            continue;
        }
        if cart.add(CartItem::placeholder(name)) {
            added += 1;
        }
    }
    debug!(added, requested = names.len(), "missing ingredients added to cart");
    added
}
