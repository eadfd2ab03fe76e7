//! Recipe, meal plan and shopping list operations on the meal document.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::BTreeSet;

use super::{Document, validate_name};
use crate::models::{MealDocument, PlanEntry, Recipe};
use crate::{Error, Result};

/// Longest meal plan `generate_plan` will build.
pub const MAX_PLAN_DAYS: u32 = 366;

impl Document for MealDocument {
    const FILE_NAME: &'static str = "meal_data.json";
}

/// Outcome of generating a meal plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPlan {
    pub plan: Vec<PlanEntry>,
    /// Fewer recipes than days, so some meals may repeat
    pub repeats_possible: bool,
    pub recipe_count: usize,
}

impl MealDocument {
    /// Add a recipe. Names are unique.
    pub fn add_recipe(&mut self, name: &str, ingredients: Vec<String>) -> Result<(String, Recipe)> {
        let name = validate_name("Recipe", name)?;
        if self.recipes.contains(&name) {
            return Err(Error::AlreadyExists(format!(
                "Recipe '{}' already exists",
                name
            )));
        }
        if ingredients.is_empty() {
            return Err(Error::InvalidInput(format!(
                "Recipe '{}' needs at least one ingredient",
                name
            )));
        }
        let recipe = Recipe { ingredients };
        self.recipes.insert(name.clone(), recipe.clone());
        Ok((name, recipe))
    }

    /// Replace the current plan with `days` recipes drawn uniformly with replacement.
    pub fn generate_plan<R: Rng + ?Sized>(&mut self, days: u32, rng: &mut R) -> Result<GeneratedPlan> {
        if days == 0 {
            return Err(Error::InvalidInput(
                "A meal plan needs at least one day".to_string(),
            ));
        }
        if days > MAX_PLAN_DAYS {
            return Err(Error::InvalidInput(format!(
                "A meal plan can cover at most {} days, got {}",
                MAX_PLAN_DAYS, days
            )));
        }

        let names: Vec<&str> = self.recipes.names().collect();
        if names.is_empty() {
            return Err(Error::InvalidInput(
                "No recipes available to generate a plan. Please add some recipes first."
                    .to_string(),
            ));
        }

        let repeats_possible = names.len() < days as usize;
        if repeats_possible {
            tracing::warn!(
                recipes = names.len(),
                days,
                "fewer recipes than days, some meals might repeat"
            );
        }

        let plan: Vec<PlanEntry> = (1..=days)
            .filter_map(|day| {
                names.choose(rng).map(|meal| PlanEntry {
                    day,
                    meal: meal.to_string(),
                })
            })
            .collect();
        let recipe_count = names.len();

        self.current_plan = plan.clone();
        Ok(GeneratedPlan {
            plan,
            repeats_possible,
            recipe_count,
        })
    }

    /// Ingredients for every plan entry whose recipe still exists.
    ///
    /// Ingredients are deduplicated case-insensitively, sorted, and shown
    /// with a leading capital.
    pub fn shopping_list(&self) -> Result<Vec<String>> {
        if self.current_plan.is_empty() {
            return Err(Error::InvalidInput(
                "No meal plan generated yet. Use 'generate-plan' to create one.".to_string(),
            ));
        }

        let items: BTreeSet<String> = self
            .current_plan
            .iter()
            .filter_map(|entry| self.recipes.get(&entry.meal))
            .flat_map(|recipe| recipe.ingredients.iter())
            .map(|ingredient| ingredient.trim().to_lowercase())
            .filter(|ingredient| !ingredient.is_empty())
            .collect();

        Ok(items.iter().map(|item| capitalize(item)).collect())
    }
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ingredients(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_recipe_duplicate_rejected() {
        let mut doc = MealDocument::default();
        doc.add_recipe("Tacos", ingredients(&["Tortillas", "Beef"]))
            .unwrap();
        assert!(matches!(
            doc.add_recipe("Tacos", ingredients(&["Fish"])),
            Err(Error::AlreadyExists(_))
        ));
        assert_eq!(doc.recipes.get("Tacos").unwrap().ingredients.len(), 2);
    }

    #[test]
    fn test_add_recipe_requires_ingredients() {
        let mut doc = MealDocument::default();
        assert!(matches!(
            doc.add_recipe("Air", Vec::new()),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(doc.recipes.names().count(), 0);
    }

    #[test]
    fn test_generate_plan_without_recipes_fails() {
        let mut doc = MealDocument::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            doc.generate_plan(7, &mut rng),
            Err(Error::InvalidInput(_))
        ));
        assert!(doc.current_plan.is_empty());
    }

    #[test]
    fn test_generate_plan_without_recipes_writes_nothing() {
        let env = TestEnv::new();
        let store = env.store::<MealDocument>();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(store.mutate(|doc| doc.generate_plan(3, &mut rng)).is_err());
        assert!(!store.exists());
    }

    #[test]
    fn test_generate_plan_days_and_references() {
        let mut doc = MealDocument::default();
        doc.add_recipe("Tacos", ingredients(&["Tortillas"])).unwrap();
        doc.add_recipe("Curry", ingredients(&["Rice"])).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let generated = doc.generate_plan(5, &mut rng).unwrap();
        assert!(generated.repeats_possible);
        assert_eq!(generated.plan.len(), 5);
        let days: Vec<u32> = generated.plan.iter().map(|e| e.day).collect();
        assert_eq!(days, vec![1, 2, 3, 4, 5]);
        assert!(generated.plan.iter().all(|e| doc.recipes.contains(&e.meal)));
        assert_eq!(doc.current_plan, generated.plan);
    }

    #[test]
    fn test_generate_plan_rejects_oversized_plan() {
        let mut doc = MealDocument::default();
        doc.add_recipe("Tacos", ingredients(&["Tortillas"])).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(doc.generate_plan(MAX_PLAN_DAYS, &mut rng).unwrap().plan.len(), 366);
        assert!(matches!(
            doc.generate_plan(4_000_000_000, &mut rng),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(doc.current_plan.len(), 366);
    }

    #[test]
    fn test_add_recipe_keeps_exact_name() {
        let mut doc = MealDocument::default();
        doc.add_recipe(" Tacos", ingredients(&["Tortillas"])).unwrap();
        assert!(doc.recipes.contains(" Tacos"));
        assert!(!doc.recipes.contains("Tacos"));
    }

    #[test]
    fn test_generate_plan_zero_days_rejected() {
        let mut doc = MealDocument::default();
        doc.add_recipe("Tacos", ingredients(&["Tortillas"])).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(doc.generate_plan(0, &mut rng).is_err());
    }

    #[test]
    fn test_shopping_list_case_insensitive_dedupe() {
        let mut doc = MealDocument::default();
        doc.add_recipe("Curry", ingredients(&["Rice", "Chicken"])).unwrap();
        doc.add_recipe("Burrito", ingredients(&["rice", "Beans"])).unwrap();
        doc.current_plan = vec![
            PlanEntry {
                day: 1,
                meal: "Curry".to_string(),
            },
            PlanEntry {
                day: 2,
                meal: "Burrito".to_string(),
            },
        ];

        let list = doc.shopping_list().unwrap();
        assert_eq!(list, vec!["Beans", "Chicken", "Rice"]);
        assert_eq!(list.iter().filter(|i| i.as_str() == "Rice").count(), 1);
    }

    #[test]
    fn test_shopping_list_skips_unknown_recipes() {
        let mut doc = MealDocument::default();
        doc.add_recipe("Curry", ingredients(&["Rice"])).unwrap();
        doc.current_plan = vec![
            PlanEntry {
                day: 1,
                meal: "Curry".to_string(),
            },
            PlanEntry {
                day: 2,
                meal: "Salad".to_string(),
            },
        ];

        assert_eq!(doc.shopping_list().unwrap(), vec!["Rice"]);
    }

    #[test]
    fn test_shopping_list_without_plan_fails() {
        let doc = MealDocument::default();
        assert!(matches!(doc.shopping_list(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("olive OIL"), "Olive oil");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }
}
