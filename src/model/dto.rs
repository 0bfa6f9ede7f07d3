// File: src/model/dto.rs
//! Wire records as the remote APIs send them. Nearly everything is optional:
//! the public APIs omit or null fields freely.
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// TheMealDB answers `{"meals": null}` when nothing matched.
#[derive(Deserialize, Debug, Default)]
pub struct MealsResponse {
    #[serde(default)]
    pub meals: Option<Vec<MealDto>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MealDto {
    pub id_meal: String,
    pub str_meal: Option<String>,
    pub str_category: Option<String>,
    pub str_area: Option<String>,
    pub str_instructions: Option<String>,
    pub str_meal_thumb: Option<String>,
    pub str_tags: Option<String>,
    pub str_youtube: Option<String>,
    pub str_source: Option<String>,
    /// `strIngredient1..20`, `strMeasure1..20` and anything else we do not name.
    #[serde(flatten)]
    pub slots: HashMap<String, Value>,
}

pub const MEAL_SLOTS: usize = 20;

impl MealDto {
    /// Numbered slot such as `strIngredient3`, `None` when absent, null or not a string.
    pub fn slot(&self, prefix: &str, index: usize) -> Option<&str> {
        self.slots
            .get(&format!("{}{}", prefix, index))
            .and_then(Value::as_str)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct RecipesResponse {
    #[serde(default)]
    pub recipes: Vec<RecipeDto>,
    #[serde(default)]
    pub total: u32,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDto {
    pub id: u64,
    pub name: Option<String>,
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub instructions: Vec<String>,
    pub prep_time_minutes: Option<u32>,
    pub cook_time_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Option<String>,
    pub cuisine: Option<String>,
    pub calories_per_serving: Option<u32>,
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub user_id: u64,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub meal_type: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct SpoonRecipeResponse {
    #[serde(default)]
    pub recipes: Vec<SpoonRecipeDto>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SpoonRecipeDto {
    pub id: u64,
    pub title: Option<String>,
    pub image: Option<String>,
    pub image_type: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: u32,
    #[serde(default)]
    pub servings: u32,
    pub source_url: Option<String>,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub gluten_free: bool,
    #[serde(default)]
    pub dairy_free: bool,
    #[serde(default)]
    pub very_healthy: bool,
    #[serde(default)]
    pub cheap: bool,
    #[serde(default)]
    pub very_popular: bool,
    #[serde(default)]
    pub health_score: f64,
    #[serde(default)]
    pub price_per_serving: f64,
    pub summary: Option<String>,
    /// Spoonacular documents these as strings but has sent other shapes.
    #[serde(default)]
    pub cuisines: Vec<Value>,
    pub dish_types: Option<Vec<String>>,
    pub diets: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub extended_ingredients: Option<Vec<ExtendedIngredientDto>>,
    pub analyzed_instructions: Option<Vec<AnalyzedInstructionDto>>,
    pub spoonacular_source_url: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedIngredientDto {
    #[serde(default)]
    pub id: u64,
    pub aisle: Option<String>,
    pub consistency: Option<String>,
    pub name: Option<String>,
    pub name_clean: Option<String>,
    pub original: Option<String>,
    #[serde(default)]
    pub amount: f64,
    pub unit: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AnalyzedInstructionDto {
    pub name: Option<String>,
    pub steps: Option<Vec<StepDto>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct StepDto {
    #[serde(default)]
    pub number: u32,
    pub step: Option<String>,
    pub ingredients: Option<Vec<NamedItemDto>>,
    pub equipment: Option<Vec<NamedItemDto>>,
    pub length: Option<LengthDto>,
}

/// Step ingredients and equipment share this shape.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NamedItemDto {
    #[serde(default)]
    pub id: u64,
    pub name: Option<String>,
    pub localized_name: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct LengthDto {
    #[serde(default)]
    pub number: u32,
    pub unit: Option<String>,
}

/// `recipes/{id}/similar` is documented as a bare array; older clients
/// expected a `recipes` wrapper. Accept both.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum SimilarRecipeResponse {
    List(Vec<SimilarRecipeDto>),
    Wrapped { recipes: Vec<SimilarRecipeDto> },
}

impl SimilarRecipeResponse {
    pub fn into_recipes(self) -> Vec<SimilarRecipeDto> {
        match self {
            SimilarRecipeResponse::List(r) => r,
            SimilarRecipeResponse::Wrapped { recipes } => recipes,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SimilarRecipeDto {
    pub id: u64,
    pub title: Option<String>,
    pub image_type: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: u32,
    #[serde(default)]
    pub servings: u32,
    pub source_url: Option<String>,
}
