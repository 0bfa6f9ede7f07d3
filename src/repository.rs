// File: src/repository.rs
//! Remote loading with the on-disk cache as fallback.
use crate::cache::Cache;
use crate::client::meal::Progress;
use crate::client::spoon::{DEFAULT_RANDOM_COUNT, DEFAULT_SIMILAR_COUNT};
use crate::client::{
    ClientError, DummyJsonClient, HttpClient, IdentityClient, MealDbClient, SpoonacularClient,
};
use crate::config::Config;
use crate::favorites::Favorites;
use crate::model::{Meal, MealDetails, Recipe, RecipeSource, Response, SimilarRecipe, SpoonRecipe};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;

pub const OFFLINE_WARNING: &str = "Offline Mode";

/// A loaded list, flagged when it came from the cache instead of the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub items: Vec<T>,
    pub warning: Option<String>,
}

impl<T> Loaded<T> {
    pub fn is_offline(&self) -> bool {
        self.warning.is_some()
    }
}

pub struct RecipeRepository {
    config: Config,
    http: HttpClient,
    meals: MealDbClient,
    dummyjson: DummyJsonClient,
    spoon: SpoonacularClient,
    cache: Cache,
}

impl RecipeRepository {
    pub fn new(config: Config, http: HttpClient, cache: Cache) -> Self {
        let meals = MealDbClient::new(http.clone(), &config.themealdb_url);
        let dummyjson = DummyJsonClient::new(http.clone(), &config.dummyjson_url);
        let spoon = SpoonacularClient::new(
            http.clone(),
            &config.spoonacular_url,
            &config.spoonacular_api_key,
        );
        Self {
            config,
            http,
            meals,
            dummyjson,
            spoon,
            cache,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = HttpClient::from_config(config)?;
        Ok(Self::new(config.clone(), http, Cache::open()?))
    }

    /// Identity client sharing this repository's connection pool.
    pub fn identity_client(&self) -> IdentityClient {
        IdentityClient::new(
            self.http.clone(),
            &self.config.identity_url,
            &self.config.identity_api_key,
        )
    }

    async fn with_fallback<T, Fut>(
        &self,
        source: RecipeSource,
        fetch: Fut,
    ) -> Result<Loaded<T>, ClientError>
    where
        T: Serialize + DeserializeOwned,
        Fut: Future<Output = Result<Vec<T>, ClientError>>,
    {
        let key = source.cache_key();
        match fetch.await {
            Ok(items) => {
                if let Err(e) = self.cache.save(key, &items) {
                    log::warn!("Could not cache {} recipes: {}", key, e);
                }
                Ok(Loaded {
                    items,
                    warning: None,
                })
            }
            Err(err) => match self.cache.load::<T>(key) {
                Ok(Some(items)) => {
                    log::warn!(
                        "{} {} ({}), using {} cached recipes",
                        key,
                        if err.is_offline() { "unreachable" } else { "failed" },
                        err,
                        items.len()
                    );
                    Ok(Loaded {
                        items,
                        warning: Some(OFFLINE_WARNING.to_string()),
                    })
                }
                Ok(None) => Err(err),
                Err(cache_err) => {
                    log::warn!("Could not read {} cache: {}", key, cache_err);
                    Err(err)
                }
            },
        }
    }

    /// Distinct random meals. Progress snapshots go to `progress`; a cached
    /// fallback is sent there as a final `Success`.
    pub async fn load_meals(&self, progress: Option<&Progress>) -> Result<Loaded<Meal>, ClientError> {
        let loaded = self
            .with_fallback(
                RecipeSource::TheMealDb,
                self.meals.collect_unique(&self.config.random_meals, progress),
            )
            .await?;
        if loaded.is_offline()
            && let Some(tx) = progress
        {
            let _ = tx.send(Response::Success(loaded.items.clone()));
        }
        Ok(loaded)
    }

    pub async fn load_recipes(&self) -> Result<Loaded<Recipe>, ClientError> {
        self.with_fallback(RecipeSource::DummyJson, self.dummyjson.all_recipes())
            .await
    }

    pub async fn load_spoon(&self) -> Result<Loaded<SpoonRecipe>, ClientError> {
        self.with_fallback(
            RecipeSource::Spoonacular,
            self.spoon.random_recipes(DEFAULT_RANDOM_COUNT),
        )
        .await
    }

    pub async fn similar(&self, recipe_id: u64) -> Result<Vec<SimilarRecipe>, ClientError> {
        self.spoon.similar(recipe_id, DEFAULT_SIMILAR_COUNT).await
    }

    pub async fn meal_details(&self, meal_id: &str) -> Result<MealDetails, ClientError> {
        self.meals.lookup(meal_id).await
    }

    /// Details for every favorite id that still resolves.
    pub async fn favorite_meals(&self, favorites: &Favorites) -> Vec<MealDetails> {
        self.meals
            .lookup_many(&favorites.all(), self.config.random_meals.concurrency)
            .await
    }
}
