//! Integration tests for the meal planner commands.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_add_and_list_recipes() {
    let env = TestEnv::new();

    let recipe = env.json(&[
        "meals", "add-recipe", "Tacos", "--ingredients", "tortillas, beef ,salsa",
    ]);
    assert_eq!(
        recipe["ingredients"],
        serde_json::json!(["tortillas", "beef", "salsa"])
    );
    env.json(&["meals", "add-recipe", "Curry", "--ingredients", "rice, chicken"]);

    let list = env.json(&["meals", "list-recipes"]);
    assert_eq!(list["count"], 2);
    assert_eq!(list["recipes"][0]["name"], "Tacos");
    assert_eq!(list["recipes"][1]["name"], "Curry");
}

#[test]
fn test_duplicate_recipe_fails() {
    let env = TestEnv::new();
    env.json(&["meals", "add-recipe", "Tacos", "--ingredients", "tortillas"]);
    env.lk()
        .args(["meals", "add-recipe", "Tacos", "--ingredients", "beef"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Recipe 'Tacos' already exists"));
}

#[test]
fn test_generate_plan_without_recipes_fails() {
    let env = TestEnv::new();
    env.lk()
        .args(["meals", "generate-plan"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No recipes available"));

    assert!(!env.data_path().join("meal_data.json").exists());
}

#[test]
fn test_generate_plan_days() {
    let env = TestEnv::new();
    env.json(&["meals", "add-recipe", "Tacos", "--ingredients", "tortillas"]);
    env.json(&["meals", "add-recipe", "Curry", "--ingredients", "rice"]);

    let result = env.json(&["meals", "generate-plan", "--days", "3"]);
    let plan = result["plan"].as_array().unwrap();
    assert_eq!(plan.len(), 3);
    for (i, entry) in plan.iter().enumerate() {
        assert_eq!(entry["day"], i as u64 + 1);
        let meal = entry["meal"].as_str().unwrap();
        assert!(meal == "Tacos" || meal == "Curry");
    }
    assert_eq!(result["repeats_possible"], true);

    let shown = env.json(&["meals", "show-plan"]);
    assert_eq!(shown["plan"], result["plan"]);
}

#[test]
fn test_generate_plan_default_days_from_config() {
    let env = TestEnv::new();
    env.write_config("default-plan-days 2\n");
    env.json(&["meals", "add-recipe", "Tacos", "--ingredients", "tortillas"]);

    let result = env.json(&["meals", "generate-plan"]);
    assert_eq!(result["plan"].as_array().unwrap().len(), 2);
}

#[test]
fn test_generate_plan_warns_on_repeats() {
    let env = TestEnv::new();
    env.json(&["meals", "add-recipe", "Tacos", "--ingredients", "tortillas"]);

    env.lk()
        .args(["meals", "generate-plan", "--days", "2", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Some meals might repeat"))
        .stdout(predicate::str::contains("Day 2: Tacos"));
}

#[test]
fn test_show_plan_before_generating_fails() {
    let env = TestEnv::new();
    env.lk()
        .args(["meals", "show-plan"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No meal plan generated yet"));
}

#[test]
fn test_shopping_list_dedupes_case_insensitively() {
    let env = TestEnv::new();
    env.json(&[
        "meals", "add-recipe", "Burrito", "--ingredients", "Rice, beans, rice, SALSA",
    ]);
    env.json(&["meals", "generate-plan", "--days", "2"]);

    let list = env.json(&["meals", "shopping-list"]);
    assert_eq!(list["items"], serde_json::json!(["Beans", "Rice", "Salsa"]));
    assert_eq!(list["count"], 3);
}

#[test]
fn test_generate_plan_rejects_huge_day_count() {
    let env = TestEnv::new();
    env.json(&["meals", "add-recipe", "Tacos", "--ingredients", "tortillas"]);

    env.lk()
        .args(["meals", "generate-plan", "--days", "4000000000"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("at most 366 days"));

    let doc = env.read_doc("meal_data.json");
    assert_eq!(doc["current_plan"], serde_json::json!([]));
}
