use tracing::debug;
use uuid::Uuid;

use super::dto::CartItem;

/// In-memory cart. Names are unique (exact, case-sensitive match).
#[derive(Debug, Default, Clone)]
pub struct CartStore {
    items: Vec<CartItem>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `item` unless an item with the same name is already present.
    /// Returns whether the cart changed; a duplicate is not an error.
    pub fn add(&mut self, item: CartItem) -> bool {
        if self.contains(&item.name) {
            debug!(name = %item.name, "cart add ignored: duplicate name");
            return false;
        }
        debug!(name = %item.name, id = %item.id, score = item.score, "cart add");
        self.items.push(item);
        true
    }

    /// Removes the item with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        let removed = self.items.len() != before;
        if removed {
            debug!(%id, "cart remove");
        }
        removed
    }

    /// Mean of all item scores, or 0.0 for an empty cart.
    pub fn average_score(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        let total: f64 = self.items.iter().map(|i| i.score).sum();
        total / self.items.len() as f64
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|i| i.name == name)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|i| i.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, score: f64) -> CartItem {
        CartItem::new(name, "", "", score)
    }

    #[test]
    fn empty_cart_average_is_zero() {
        assert_eq!(CartStore::new().average_score(), 0.0);
    }

    #[test]
    fn average_of_two_scores() {
        let mut cart = CartStore::new();
        cart.add(item("Oats", 6.0));
        cart.add(item("Lentils", 8.0));
        assert_eq!(cart.average_score(), 7.0);
    }

    #[test]
    fn duplicate_names_are_ignored() {
        let mut cart = CartStore::new();
        assert!(cart.add(item("Rice", 5.0)));
        assert!(!cart.add(item("Rice", 9.0)));
        assert!(cart.add(item("Beans", 4.0)));
        assert!(!cart.add(item("Beans", 1.0)));
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].score, 5.0);
    }

    #[test]
    fn uniqueness_is_case_sensitive() {
        let mut cart = CartStore::new();
        cart.add(item("rice", 1.0));
        cart.add(item("Rice", 1.0));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn at_most_one_item_per_name_for_any_order() {
        let names = ["a", "b", "a", "c", "b", "b", "c", "a"];
        let mut forward = CartStore::new();
        let mut backward = CartStore::new();
        for n in names {
            forward.add(item(n, 1.0));
        }
        for n in names.iter().rev() {
            backward.add(item(n, 1.0));
        }
        assert_eq!(forward.len(), 3);
        assert_eq!(backward.len(), 3);
    }

    #[test]
    fn remove_by_id() {
        let mut cart = CartStore::new();
        let beans = item("Beans", 3.0);
        let id = beans.id;
        cart.add(beans);
        cart.add(item("Corn", 5.0));

        assert!(cart.remove(id));
        assert!(!cart.contains("Beans"));
        assert_eq!(cart.average_score(), 5.0);
        assert!(!cart.remove(id));
    }

    #[test]
    fn removing_last_item_empties_cart() {
        let mut cart = CartStore::new();
        let only = item("Tofu", 8.0);
        let id = only.id;
        cart.add(only);
        assert!(!cart.is_empty());
        cart.remove(id);
        assert!(cart.is_empty());
        assert_eq!(cart.average_score(), 0.0);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut cart = CartStore::new();
        cart.add(item("Tofu", 8.0));
        assert!(!cart.remove(Uuid::new_v4()));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn placeholder_item_shape() {
        let p = CartItem::placeholder("Garlic");
        assert_eq!(p.image, "");
        assert_eq!(p.description, "");
        assert_eq!(p.score, 0.0);
    }
}
