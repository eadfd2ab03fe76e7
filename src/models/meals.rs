//! Recipes and meal plans.

use serde::{Deserialize, Serialize};

use super::NamedMap;

/// A recipe definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub ingredients: Vec<String>,
}

/// One day of a meal plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Day number, starting at 1
    pub day: u32,

    /// Recipe name at the time the plan was generated
    pub meal: String,
}

/// The meal planner document (`meal_data.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealDocument {
    #[serde(default)]
    pub recipes: NamedMap<Recipe>,

    #[serde(default)]
    pub current_plan: Vec<PlanEntry>,
}
