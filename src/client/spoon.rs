// File: src/client/spoon.rs
use crate::client::core::HttpClient;
use crate::client::{ClientError, join_url};
use crate::model::dto::{SimilarRecipeResponse, SpoonRecipeResponse};
use crate::model::{SimilarRecipe, SpoonRecipe};

pub const DEFAULT_RANDOM_COUNT: u32 = 20;
pub const DEFAULT_SIMILAR_COUNT: u32 = 10;

#[derive(Clone, Debug)]
pub struct SpoonacularClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl SpoonacularClient {
    pub fn new(http: HttpClient, base_url: &str, api_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn key(&self) -> Result<&str, ClientError> {
        if self.api_key.is_empty() {
            return Err(ClientError::MissingApiKey("Spoonacular"));
        }
        Ok(&self.api_key)
    }

    pub async fn random_recipes(&self, number: u32) -> Result<Vec<SpoonRecipe>, ClientError> {
        let url = join_url(
            &self.base_url,
            &format!("recipes/random?apiKey={}&number={}", self.key()?, number),
        );
        let resp: SpoonRecipeResponse = self.http.get_json(&url).await?;
        log::debug!("Spoonacular returned {} random recipes", resp.recipes.len());
        Ok(resp.recipes.into_iter().map(SpoonRecipe::from).collect())
    }

    pub async fn similar(&self, recipe_id: u64, number: u32) -> Result<Vec<SimilarRecipe>, ClientError> {
        let url = join_url(
            &self.base_url,
            &format!(
                "recipes/{}/similar?apiKey={}&number={}",
                recipe_id,
                self.key()?,
                number
            ),
        );
        let resp: SimilarRecipeResponse = self.http.get_json(&url).await?;
        Ok(resp
            .into_recipes()
            .into_iter()
            .map(SimilarRecipe::from)
            .collect())
    }
}
