//! Recipe generation exchange types.
//!
//! These model the boundary with the external recipe generator. The core
//! never calls the generator itself; the sync crate's client does, and a
//! failure there is terminal for that attempt (the user resubmits).

use serde::{Deserialize, Serialize};

use super::item::ShoppingList;

/// What the customer asked to cook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRequest {
    /// Dish to generate a recipe for.
    #[serde(rename = "dishName")]
    pub dish_name: String,
    /// Number of people to scale portions for.
    #[serde(rename = "peopleCount")]
    pub people_count: u32,
    /// Free-text dietary restrictions, empty if none.
    #[serde(default)]
    pub restrictions: String,
}

/// Per-serving nutrition estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// A culinary-units ingredient line as shown in the recipe itself.
///
/// Distinct from [`Item`](super::item::Item): the recipe speaks in
/// tbsp/cups, the shopping list in grams and kilograms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Ingredient name.
    pub name: String,
    /// Free-form amount ("2 tbsp", "1 cup").
    pub amount: String,
}

/// A generated recipe plus its derived, categorized shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeResponse {
    /// Recipe title.
    #[serde(rename = "recipeTitle")]
    pub recipe_title: String,
    /// Human-readable cook time.
    #[serde(rename = "cookTime")]
    pub cook_time: String,
    /// Per-serving nutrition estimate.
    pub nutrition: Nutrition,
    /// Culinary-units ingredient lines.
    pub ingredients: Vec<RecipeIngredient>,
    /// Preparation steps in order.
    pub steps: Vec<String>,
    /// Suggested substitutions.
    pub substitutions: Vec<String>,
    /// The derived shopping list, already split into category buckets.
    #[serde(rename = "shoppingList")]
    pub shopping_list: ShoppingList,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_response_wire_shape() {
        let json = serde_json::json!({
            "recipeTitle": "Aloo Gobi",
            "cookTime": "35 minutes",
            "nutrition": {"calories": 220.0, "protein": 6.0, "carbs": 30.0, "fat": 9.0},
            "ingredients": [{"name": "Potato", "amount": "2 cups"}],
            "steps": ["Heat ghee.", "Add hing."],
            "substitutions": ["Use oil instead of ghee."],
            "shoppingList": {
                "VegetableShop": [{"name": "Potato", "quantity": 500.0, "unit": "g"}],
                "GroceryShop": [{"name": "Hing", "quantity": 100.0, "unit": "g"}]
            }
        });

        let resp: RecipeResponse = serde_json::from_value(json).unwrap();
        assert_eq!(resp.recipe_title, "Aloo Gobi");
        assert_eq!(resp.shopping_list.vegetable_shop.len(), 1);
        assert_eq!(resp.shopping_list.grocery_shop[0].name, "Hing");
        assert!(resp.shopping_list.grocery_shop[0].available.is_none());
    }
}
