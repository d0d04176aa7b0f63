//! Shopping list items and the fixed category buckets.

use serde::{Deserialize, Serialize};

/// A single shopping list item.
///
/// The `name` is the match key for the availability merge - case-sensitive,
/// exact. Duplicate names are tolerated (first match wins), never
/// deduplicated.
///
/// `available` is a tri-state: `None` means the shop has not reviewed the
/// item yet, `Some(true)` in stock, `Some(false)` out of stock. The field is
/// omitted from the stored document while unreviewed so that a merge can
/// distinguish "never looked at" from "looked at and decided".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Item name; the case-sensitive merge key.
    pub name: String,
    /// Quantity in the given unit.
    pub quantity: f64,
    /// Unit of measure (e.g. "g", "kg").
    pub unit: String,
    /// Tri-state shop annotation; absent until the shop reviews the item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl Item {
    /// Create an unreviewed item.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            available: None,
        }
    }
}

/// Category of shop an owner runs, deciding which list bucket they receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreType {
    /// Packaged goods only.
    Grocery,
    /// Fresh produce only.
    #[serde(rename = "Vegetable & Fruits")]
    VegetableAndFruits,
    /// Carries both buckets.
    Supermarket,
}

impl std::fmt::Display for StoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grocery => write!(f, "Grocery"),
            Self::VegetableAndFruits => write!(f, "Vegetable & Fruits"),
            Self::Supermarket => write!(f, "Supermarket"),
        }
    }
}

/// A generated shopping list, split into two fixed category buckets.
///
/// Category membership is decided once - at generation time or by a manual
/// edit - and never re-derived from item names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    /// Fresh produce bucket.
    #[serde(rename = "VegetableShop")]
    pub vegetable_shop: Vec<Item>,
    /// Packaged goods bucket.
    #[serde(rename = "GroceryShop")]
    pub grocery_shop: Vec<Item>,
}

impl ShoppingList {
    /// The subset of the list relevant to a shop of the given type.
    ///
    /// Supermarkets receive the union of both buckets, vegetables first.
    #[must_use]
    pub fn items_for(&self, store_type: StoreType) -> Vec<Item> {
        match store_type {
            StoreType::Grocery => self.grocery_shop.clone(),
            StoreType::VegetableAndFruits => self.vegetable_shop.clone(),
            StoreType::Supermarket => {
                let mut items = self.vegetable_shop.clone();
                items.extend(self.grocery_shop.iter().cloned());
                items
            }
        }
    }

    /// Whether both buckets are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vegetable_shop.is_empty() && self.grocery_shop.is_empty()
    }
}
