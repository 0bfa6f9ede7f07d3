// File: src/model/adapter.rs
use crate::model::dto::{
    AnalyzedInstructionDto, ExtendedIngredientDto, MEAL_SLOTS, MealDto, RecipeDto,
    SimilarRecipeDto, SpoonRecipeDto, StepDto,
};
use crate::model::{
    AnalyzedInstruction, ExtendedIngredient, Ingredient, Meal, MealDetails, Recipe,
    SimilarRecipe, SpoonRecipe, Step, StepLength,
};
use serde_json::Value;

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl MealDto {
    fn slot_list(&self, prefix: &str) -> Vec<String> {
        (1..=MEAL_SLOTS)
            .filter_map(|i| non_blank(self.slot(prefix, i)))
            .collect()
    }

    /// Detail view: an ingredient is kept only when both name and measure are present.
    pub fn into_details(self) -> MealDetails {
        let ingredients = (1..=MEAL_SLOTS)
            .filter_map(|i| {
                let name = non_blank(self.slot("strIngredient", i))?;
                let measure = non_blank(self.slot("strMeasure", i))?;
                Some(Ingredient { name, measure })
            })
            .collect();

        let tags = self
            .str_tags
            .as_deref()
            .map(|t| {
                t.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        MealDetails {
            id: self.id_meal,
            name: self.str_meal.unwrap_or_default(),
            category: self.str_category.unwrap_or_default(),
            area: self.str_area.unwrap_or_default(),
            instructions: self.str_instructions.unwrap_or_default(),
            image_url: self.str_meal_thumb.unwrap_or_default(),
            tags,
            youtube_url: non_blank(self.str_youtube.as_deref()),
            ingredients,
            source_url: non_blank(self.str_source.as_deref()),
        }
    }
}

impl From<MealDto> for Meal {
    fn from(dto: MealDto) -> Self {
        let ingredients = dto.slot_list("strIngredient");
        let measures = dto.slot_list("strMeasure");
        Meal {
            id: dto.id_meal,
            name: dto.str_meal.unwrap_or_default(),
            category: dto.str_category,
            area: dto.str_area,
            instructions: dto.str_instructions,
            thumbnail: dto.str_meal_thumb,
            youtube: non_blank(dto.str_youtube.as_deref()),
            ingredients,
            measures,
        }
    }
}

impl From<RecipeDto> for Recipe {
    fn from(dto: RecipeDto) -> Self {
        Recipe {
            id: dto.id,
            name: dto.name.unwrap_or_else(|| "Unknown".to_string()),
            ingredients: dto.ingredients.unwrap_or_default(),
            instructions: dto.instructions,
            prep_time_minutes: dto.prep_time_minutes.unwrap_or(0),
            cook_time_minutes: dto.cook_time_minutes.unwrap_or(0),
            servings: dto.servings.unwrap_or(1),
            difficulty: dto.difficulty.unwrap_or_else(|| "Unknown".to_string()),
            cuisine: dto.cuisine.unwrap_or_else(|| "Various".to_string()),
            calories_per_serving: dto.calories_per_serving.unwrap_or(0),
            tags: dto.tags.unwrap_or_default(),
            user_id: dto.user_id,
            image: dto.image.unwrap_or_default(),
            rating: dto.rating.unwrap_or(0.0),
            review_count: dto.review_count.unwrap_or(0),
            meal_type: dto.meal_type.unwrap_or_default(),
        }
    }
}

impl From<ExtendedIngredientDto> for ExtendedIngredient {
    fn from(dto: ExtendedIngredientDto) -> Self {
        let name = dto.name.unwrap_or_else(|| "Unknown".to_string());
        ExtendedIngredient {
            id: dto.id,
            aisle: dto.aisle.unwrap_or_default(),
            consistency: dto.consistency.unwrap_or_else(|| "solid".to_string()),
            name_clean: dto.name_clean.unwrap_or_else(|| name.clone()),
            name,
            original: dto.original.unwrap_or_default(),
            amount: dto.amount,
            unit: dto.unit.unwrap_or_default(),
        }
    }
}

impl From<StepDto> for Step {
    fn from(dto: StepDto) -> Self {
        let names = |items: Option<Vec<crate::model::dto::NamedItemDto>>| -> Vec<String> {
            items
                .unwrap_or_default()
                .into_iter()
                .map(|i| {
                    i.name
                        .or(i.localized_name)
                        .unwrap_or_else(|| "Unknown".to_string())
                })
                .collect()
        };
        Step {
            number: dto.number,
            step: dto.step.unwrap_or_else(|| "Step not available".to_string()),
            ingredients: names(dto.ingredients),
            equipment: names(dto.equipment),
            length: dto.length.map(|l| StepLength {
                number: l.number,
                unit: l.unit.unwrap_or_default(),
            }),
        }
    }
}

impl From<AnalyzedInstructionDto> for AnalyzedInstruction {
    fn from(dto: AnalyzedInstructionDto) -> Self {
        AnalyzedInstruction {
            name: dto.name.unwrap_or_default(),
            steps: dto
                .steps
                .unwrap_or_default()
                .into_iter()
                .map(Step::from)
                .collect(),
        }
    }
}

impl From<SpoonRecipeDto> for SpoonRecipe {
    fn from(dto: SpoonRecipeDto) -> Self {
        SpoonRecipe {
            id: dto.id,
            title: dto.title.unwrap_or_else(|| "Untitled Recipe".to_string()),
            image: dto.image.unwrap_or_default(),
            image_type: dto.image_type.unwrap_or_else(|| "jpg".to_string()),
            ready_in_minutes: dto.ready_in_minutes,
            servings: dto.servings,
            source_url: dto.source_url.unwrap_or_default(),
            vegetarian: dto.vegetarian,
            vegan: dto.vegan,
            gluten_free: dto.gluten_free,
            dairy_free: dto.dairy_free,
            very_healthy: dto.very_healthy,
            cheap: dto.cheap,
            very_popular: dto.very_popular,
            health_score: dto.health_score,
            price_per_serving: dto.price_per_serving,
            summary: dto
                .summary
                .unwrap_or_else(|| "No summary available".to_string()),
            cuisines: dto
                .cuisines
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            dish_types: dto.dish_types.unwrap_or_default(),
            diets: dto.diets.unwrap_or_default(),
            instructions: dto
                .instructions
                .unwrap_or_else(|| "Instructions not available".to_string()),
            extended_ingredients: dto
                .extended_ingredients
                .unwrap_or_default()
                .into_iter()
                .map(ExtendedIngredient::from)
                .collect(),
            analyzed_instructions: dto
                .analyzed_instructions
                .unwrap_or_default()
                .into_iter()
                .map(AnalyzedInstruction::from)
                .collect(),
            spoonacular_source_url: dto.spoonacular_source_url.unwrap_or_default(),
        }
    }
}

impl From<SimilarRecipeDto> for SimilarRecipe {
    fn from(dto: SimilarRecipeDto) -> Self {
        SimilarRecipe {
            id: dto.id,
            title: dto.title.unwrap_or_else(|| "Untitled Recipe".to_string()),
            image_type: dto.image_type.unwrap_or_else(|| "jpg".to_string()),
            ready_in_minutes: dto.ready_in_minutes,
            servings: dto.servings,
            source_url: dto.source_url.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dto::{MealsResponse, RecipesResponse, SimilarRecipeResponse};

    const MEAL_JSON: &str = r#"{"meals":[{
        "idMeal":"52772",
        "strMeal":"Teriyaki Chicken Casserole",
        "strCategory":"Chicken",
        "strArea":"Japanese",
        "strInstructions":"Preheat oven.\r\n\r\nCombine soy sauce.",
        "strMealThumb":"https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
        "strTags":"Meat, Casserole",
        "strYoutube":"",
        "strIngredient1":"soy sauce",
        "strIngredient2":"water",
        "strIngredient3":"  ",
        "strIngredient4":"garlic",
        "strIngredient5":null,
        "strMeasure1":"3/4 cup",
        "strMeasure2":"1/2 cup",
        "strMeasure3":"",
        "strMeasure4":"",
        "strSource":null,
        "dateModified":null
    }]}"#;

    #[test]
    fn test_meal_drops_blank_slots() {
        let resp: MealsResponse = serde_json::from_str(MEAL_JSON).unwrap();
        let dto = resp.meals.unwrap().remove(0);
        let meal = Meal::from(dto);
        assert_eq!(meal.id, "52772");
        assert_eq!(meal.ingredients, vec!["soy sauce", "water", "garlic"]);
        assert_eq!(meal.measures, vec!["3/4 cup", "1/2 cup"]);
        assert_eq!(meal.youtube, None);
    }

    #[test]
    fn test_meal_details_requires_name_and_measure() {
        let resp: MealsResponse = serde_json::from_str(MEAL_JSON).unwrap();
        let details = resp.meals.unwrap().remove(0).into_details();
        // garlic has no measure, so only the first two survive
        assert_eq!(details.ingredients.len(), 2);
        assert_eq!(details.ingredients[0].name, "soy sauce");
        assert_eq!(details.tags, vec!["Meat", "Casserole"]);
        assert_eq!(details.source_url, None);
        assert_eq!(details.steps(), vec!["Preheat oven.", "Combine soy sauce."]);
    }

    #[test]
    fn test_null_meals_is_none() {
        let resp: MealsResponse = serde_json::from_str(r#"{"meals":null}"#).unwrap();
        assert!(resp.meals.is_none());
    }

    #[test]
    fn test_recipe_defaults() {
        let resp: RecipesResponse =
            serde_json::from_str(r#"{"recipes":[{"id":7,"name":null}],"total":1}"#).unwrap();
        let recipe = Recipe::from(resp.recipes.into_iter().next().unwrap());
        assert_eq!(recipe.name, "Unknown");
        assert_eq!(recipe.cuisine, "Various");
        assert_eq!(recipe.servings, 1);
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_spoon_recipe_defaults_and_steps() {
        let json = r#"{
            "id": 715538,
            "readyInMinutes": 35,
            "cuisines": ["Italian", null],
            "extendedIngredients": [{"id": 1, "name": "bow tie pasta", "amount": 2.0}],
            "analyzedInstructions": [{"name": "", "steps": [
                {"number": 1, "step": "Boil water.", "equipment": [{"id": 3, "name": "pot"}],
                 "length": {"number": 10, "unit": "minutes"}}
            ]}]
        }"#;
        let dto: SpoonRecipeDto = serde_json::from_str(json).unwrap();
        let recipe = SpoonRecipe::from(dto);
        assert_eq!(recipe.title, "Untitled Recipe");
        assert_eq!(recipe.cuisines, vec!["Italian"]);
        assert_eq!(recipe.extended_ingredients[0].name_clean, "bow tie pasta");
        assert_eq!(recipe.extended_ingredients[0].consistency, "solid");
        let step = &recipe.analyzed_instructions[0].steps[0];
        assert_eq!(step.equipment, vec!["pot"]);
        assert_eq!(step.length.as_ref().unwrap().number, 10);
    }

    #[test]
    fn test_similar_accepts_both_shapes() {
        let bare: SimilarRecipeResponse =
            serde_json::from_str(r#"[{"id": 1, "title": "A"}]"#).unwrap();
        let wrapped: SimilarRecipeResponse =
            serde_json::from_str(r#"{"recipes": [{"id": 2}]}"#).unwrap();
        assert_eq!(bare.into_recipes()[0].id, 1);
        let r = SimilarRecipe::from(wrapped.into_recipes().remove(0));
        assert_eq!(r.title, "Untitled Recipe");
    }
}
