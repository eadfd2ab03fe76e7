use serde::Serialize;
use std::path::Path;

use super::{Output, json};
use crate::models::{MealDocument, PlanEntry};
use crate::storage::meals::GeneratedPlan;
use crate::storage::{Store, split_list};
use crate::{Error, Result};

#[derive(Serialize)]
pub struct RecipeEntry {
    pub name: String,
    pub ingredients: Vec<String>,
}

impl Output for RecipeEntry {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Recipe '{}' added with ingredients: {}",
            self.name,
            self.ingredients.join(", ")
        )
    }
}

/// Add a recipe from a comma-separated ingredient list.
pub fn meals_add_recipe(data_dir: &Path, name: &str, ingredients: &str) -> Result<RecipeEntry> {
    let ingredients = split_list(ingredients);
    let store: Store<MealDocument> = Store::new(data_dir);
    let (name, recipe) = store.mutate(|doc| doc.add_recipe(name, ingredients))?;
    Ok(RecipeEntry {
        name,
        ingredients: recipe.ingredients,
    })
}

#[derive(Serialize)]
pub struct RecipeList {
    pub recipes: Vec<RecipeEntry>,
    pub count: usize,
}

impl Output for RecipeList {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.recipes.is_empty() {
            return "No recipes added yet.".to_string();
        }
        let mut lines = vec![format!("{} recipe(s):", self.count)];
        lines.extend(
            self.recipes
                .iter()
                .map(|r| format!("- {}: {}", r.name, r.ingredients.join(", "))),
        );
        lines.join("\n")
    }
}

pub fn meals_list_recipes(data_dir: &Path) -> Result<RecipeList> {
    let store: Store<MealDocument> = Store::new(data_dir);
    let doc = store.load()?;
    let recipes: Vec<RecipeEntry> = doc
        .recipes
        .iter()
        .map(|(name, recipe)| RecipeEntry {
            name: name.to_string(),
            ingredients: recipe.ingredients.clone(),
        })
        .collect();
    Ok(RecipeList {
        count: recipes.len(),
        recipes,
    })
}

#[derive(Serialize)]
pub struct PlanGenerated {
    pub days: u32,
    #[serde(flatten)]
    pub generated: GeneratedPlan,
}

impl Output for PlanGenerated {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut lines = Vec::new();
        if self.generated.repeats_possible {
            lines.push(format!(
                "Warning: Only {} recipes available, but requested a {}-day plan. Some meals might repeat.",
                self.generated.recipe_count, self.days
            ));
        }
        lines.push(format!("Generated a {}-day meal plan.", self.days));
        lines.extend(plan_lines(&self.generated.plan));
        lines.join("\n")
    }
}

fn plan_lines(plan: &[PlanEntry]) -> impl Iterator<Item = String> + '_ {
    plan.iter()
        .map(|entry| format!("Day {}: {}", entry.day, entry.meal))
}

/// Generate a new plan of `days` days, replacing the current one.
pub fn meals_generate_plan(data_dir: &Path, days: u32) -> Result<PlanGenerated> {
    let store: Store<MealDocument> = Store::new(data_dir);
    let generated = store.mutate(|doc| doc.generate_plan(days, &mut rand::thread_rng()))?;
    Ok(PlanGenerated { days, generated })
}

#[derive(Serialize)]
pub struct PlanShown {
    pub plan: Vec<PlanEntry>,
}

impl Output for PlanShown {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec!["Current meal plan:".to_string()];
        lines.extend(plan_lines(&self.plan));
        lines.join("\n")
    }
}

pub fn meals_show_plan(data_dir: &Path) -> Result<PlanShown> {
    let store: Store<MealDocument> = Store::new(data_dir);
    let plan = store.load()?.current_plan;
    if plan.is_empty() {
        return Err(Error::InvalidInput(
            "No meal plan generated yet. Use 'generate-plan' to create one.".to_string(),
        ));
    }
    Ok(PlanShown { plan })
}

#[derive(Serialize)]
pub struct ShoppingList {
    pub items: Vec<String>,
    pub count: usize,
}

impl Output for ShoppingList {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.items.is_empty() {
            return "No ingredients found for the current meal plan.".to_string();
        }
        let mut lines = vec!["Shopping list:".to_string()];
        lines.extend(self.items.iter().map(|item| format!("- {}", item)));
        lines.join("\n")
    }
}

pub fn meals_shopping_list(data_dir: &Path) -> Result<ShoppingList> {
    let store: Store<MealDocument> = Store::new(data_dir);
    let items = store.load()?.shopping_list()?;
    Ok(ShoppingList {
        count: items.len(),
        items,
    })
}
