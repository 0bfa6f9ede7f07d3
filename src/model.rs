// File: src/model.rs
//! Domain records shared by the stores, the clients and the UI bindings.
//!
//! Every remote API has its own wire shape (see [`dto`]); the adapters in
//! `adapter` translate those into the types below, filling in defaults.
pub mod adapter;
pub mod dto;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Anything that can be ranked against a pantry: a title plus ingredient names.
pub trait Rankable {
    fn id(&self) -> String;
    fn title(&self) -> &str;
    fn ingredient_names(&self) -> Vec<&str>;
}

/// Progressive load state handed to UI consumers.
#[derive(Debug, Clone, PartialEq)]
pub enum Response<T> {
    Loading,
    Success(T),
    Error(String),
}

/// Where a list of recipes came from. Also the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecipeSource {
    TheMealDb,
    DummyJson,
    Spoonacular,
}

impl RecipeSource {
    pub fn cache_key(&self) -> &'static str {
        match self {
            RecipeSource::TheMealDb => "themealdb",
            RecipeSource::DummyJson => "dummyjson",
            RecipeSource::Spoonacular => "spoonacular",
        }
    }
}

// --- TheMealDB ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub thumbnail: Option<String>,
    pub youtube: Option<String>,
    pub ingredients: Vec<String>,
    pub measures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub measure: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealDetails {
    pub id: String,
    pub name: String,
    pub category: String,
    pub area: String,
    pub instructions: String,
    pub image_url: String,
    pub tags: Vec<String>,
    pub youtube_url: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub source_url: Option<String>,
}

impl MealDetails {
    /// Instruction text split into non-blank steps.
    pub fn steps(&self) -> Vec<&str> {
        self.instructions
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }
}

// --- DummyJSON ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u64,
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    pub servings: u32,
    pub difficulty: String,
    pub cuisine: String,
    pub calories_per_serving: u32,
    pub tags: Vec<String>,
    pub user_id: u64,
    pub image: String,
    pub rating: f64,
    pub review_count: u32,
    pub meal_type: Vec<String>,
}

impl Recipe {
    pub fn total_time_minutes(&self) -> u32 {
        self.prep_time_minutes + self.cook_time_minutes
    }
}

// --- Spoonacular ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedIngredient {
    pub id: u64,
    pub aisle: String,
    pub consistency: String,
    pub name: String,
    pub name_clean: String,
    pub original: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepLength {
    pub number: u32,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub number: u32,
    pub step: String,
    pub ingredients: Vec<String>,
    pub equipment: Vec<String>,
    pub length: Option<StepLength>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedInstruction {
    pub name: String,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpoonRecipe {
    pub id: u64,
    pub title: String,
    pub image: String,
    pub image_type: String,
    pub ready_in_minutes: u32,
    pub servings: u32,
    pub source_url: String,
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
    pub very_healthy: bool,
    pub cheap: bool,
    pub very_popular: bool,
    pub health_score: f64,
    pub price_per_serving: f64,
    pub summary: String,
    pub cuisines: Vec<String>,
    pub dish_types: Vec<String>,
    pub diets: Vec<String>,
    pub instructions: String,
    pub extended_ingredients: Vec<ExtendedIngredient>,
    pub analyzed_instructions: Vec<AnalyzedInstruction>,
    pub spoonacular_source_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarRecipe {
    pub id: u64,
    pub title: String,
    pub image_type: String,
    pub ready_in_minutes: u32,
    pub servings: u32,
    pub source_url: String,
}

// --- Accounts ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rankable for Meal {
    fn id(&self) -> String {
        self.id.clone()
    }
    fn title(&self) -> &str {
        &self.name
    }
    fn ingredient_names(&self) -> Vec<&str> {
        self.ingredients.iter().map(String::as_str).collect()
    }
}

impl Rankable for MealDetails {
    fn id(&self) -> String {
        self.id.clone()
    }
    fn title(&self) -> &str {
        &self.name
    }
    fn ingredient_names(&self) -> Vec<&str> {
        self.ingredients.iter().map(|i| i.name.as_str()).collect()
    }
}

impl Rankable for Recipe {
    fn id(&self) -> String {
        self.id.to_string()
    }
    fn title(&self) -> &str {
        &self.name
    }
    fn ingredient_names(&self) -> Vec<&str> {
        self.ingredients.iter().map(String::as_str).collect()
    }
}

impl Rankable for SpoonRecipe {
    fn id(&self) -> String {
        self.id.to_string()
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn ingredient_names(&self) -> Vec<&str> {
        self.extended_ingredients
            .iter()
            .map(|i| i.name.as_str())
            .collect()
    }
}
