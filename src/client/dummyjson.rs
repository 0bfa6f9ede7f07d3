// File: src/client/dummyjson.rs
use crate::client::core::HttpClient;
use crate::client::{ClientError, join_url};
use crate::model::Recipe;
use crate::model::dto::RecipesResponse;

#[derive(Clone, Debug)]
pub struct DummyJsonClient {
    http: HttpClient,
    base_url: String,
}

impl DummyJsonClient {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }

    /// First page of the public recipe collection.
    pub async fn all_recipes(&self) -> Result<Vec<Recipe>, ClientError> {
        let resp: RecipesResponse = self
            .http
            .get_json(&join_url(&self.base_url, "recipes"))
            .await?;
        log::debug!(
            "DummyJSON returned {} of {} recipes",
            resp.recipes.len(),
            resp.total
        );
        Ok(resp.recipes.into_iter().map(Recipe::from).collect())
    }
}
