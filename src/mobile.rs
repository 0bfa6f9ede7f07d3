// File: ./src/mobile.rs
use crate::auth::{Accounts, AuthError, RemoteAuth};
use crate::client::ClientError;
use crate::config::Config;
use crate::favorites::Favorites;
use crate::model::{Meal, MealDetails, Rankable, Recipe, SimilarRecipe, SpoonRecipe, User};
use crate::pantry::{Pantry, PantryError};
use crate::paths::AppPaths;
use crate::repository::{Loaded, RecipeRepository};
use crate::store::{self, FilterOptions};
use std::sync::Arc;
use tokio::sync::Mutex;

#[cfg(target_os = "android")]
use android_logger::Config as LogConfig;
#[cfg(target_os = "android")]
use log::LevelFilter;

#[derive(Debug, uniffi::Error)]
#[uniffi(flat_error)]
pub enum MobileError {
    Generic(String),
}
impl From<String> for MobileError {
    fn from(e: String) -> Self {
        Self::Generic(e)
    }
}
impl From<&str> for MobileError {
    fn from(e: &str) -> Self {
        Self::Generic(e.to_string())
    }
}
impl From<anyhow::Error> for MobileError {
    fn from(e: anyhow::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
impl From<ClientError> for MobileError {
    fn from(e: ClientError) -> Self {
        Self::Generic(e.to_string())
    }
}
impl From<AuthError> for MobileError {
    fn from(e: AuthError) -> Self {
        Self::Generic(e.to_string())
    }
}
impl From<PantryError> for MobileError {
    fn from(e: PantryError) -> Self {
        Self::Generic(e.to_string())
    }
}
impl std::fmt::Display for MobileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MobileError::Generic(s) => s,
            }
        )
    }
}
impl std::error::Error for MobileError {}

// --- DTOs ---

/// One card in a ranked list, whatever API it came from.
#[derive(uniffi::Record)]
pub struct MobileRecipe {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub subtitle: String,
    pub matched: u32,
    pub total: u32,
    pub percentage: u32,
    pub is_favorite: bool,
}

#[derive(uniffi::Record)]
pub struct MobileIngredient {
    pub name: String,
    pub measure: String,
    pub in_pantry: bool,
}

#[derive(uniffi::Record)]
pub struct MobileMealDetails {
    pub id: String,
    pub name: String,
    pub category: String,
    pub area: String,
    pub image_url: String,
    pub tags: Vec<String>,
    pub steps: Vec<String>,
    pub youtube_url: Option<String>,
    pub ingredients: Vec<MobileIngredient>,
    pub is_favorite: bool,
}

#[derive(uniffi::Record)]
pub struct MobileSimilar {
    pub id: u64,
    pub title: String,
    pub ready_in_minutes: u32,
    pub servings: u32,
    pub source_url: String,
}

#[derive(uniffi::Record)]
pub struct MobileUser {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub created_at_iso: String,
}

#[derive(uniffi::Record)]
pub struct MobileConfig {
    pub spoonacular_api_key: String,
    pub identity_api_key: String,
    pub allow_insecure: bool,
    pub timeout_secs: u64,
    pub target_meals: u32,
}

fn to_mobile<R: Rankable>(
    r: &R,
    image_url: &str,
    subtitle: String,
    pantry: &[String],
    favorites: &Favorites,
) -> MobileRecipe {
    let summary = store::match_summary(r, pantry);
    let id = r.id();
    MobileRecipe {
        is_favorite: favorites.is_favorite(&id),
        id,
        title: r.title().to_string(),
        image_url: image_url.to_string(),
        subtitle,
        matched: summary.matched as u32,
        total: summary.total as u32,
        percentage: summary.percentage,
    }
}

fn details_to_mobile(m: MealDetails, pantry: &[String], favorites: &Favorites) -> MobileMealDetails {
    MobileMealDetails {
        steps: m.steps().into_iter().map(str::to_string).collect(),
        ingredients: m
            .ingredients
            .iter()
            .map(|i| MobileIngredient {
                in_pantry: store::ingredient_matches(&i.name, pantry),
                name: i.name.clone(),
                measure: i.measure.clone(),
            })
            .collect(),
        is_favorite: favorites.is_favorite(&m.id),
        id: m.id,
        name: m.name,
        category: m.category,
        area: m.area,
        image_url: m.image_url,
        tags: m.tags,
        youtube_url: m.youtube_url,
    }
}

fn user_to_mobile(u: User) -> MobileUser {
    MobileUser {
        uid: u.uid,
        name: u.name,
        email: u.email,
        photo_url: u.photo_url,
        created_at_iso: u.created_at.to_rfc3339(),
    }
}

fn status_of<T>(loaded: &Loaded<T>) -> String {
    loaded
        .warning
        .clone()
        .unwrap_or_else(|| format!("Loaded {} recipes", loaded.items.len()))
}

// --- MAIN OBJECT ---

#[derive(uniffi::Object)]
pub struct KusinaMobile {
    repo: Arc<Mutex<Option<Arc<RecipeRepository>>>>,
    meals: Arc<Mutex<Vec<Meal>>>,
    recipes: Arc<Mutex<Vec<Recipe>>>,
    spoon: Arc<Mutex<Vec<SpoonRecipe>>>,
}

#[uniffi::export(async_runtime = "tokio")]
impl KusinaMobile {
    #[uniffi::constructor]
    pub fn new(android_files_dir: String) -> Self {
        #[cfg(target_os = "android")]
        android_logger::init_once(
            LogConfig::default()
                .with_max_level(LevelFilter::Debug)
                .with_tag("KusinaRust"),
        );
        AppPaths::init_android_path(android_files_dir);
        Self {
            repo: Arc::new(Mutex::new(None)),
            meals: Arc::new(Mutex::new(Vec::new())),
            recipes: Arc::new(Mutex::new(Vec::new())),
            spoon: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_config(&self) -> MobileConfig {
        let c = Config::load().unwrap_or_default();
        MobileConfig {
            spoonacular_api_key: c.spoonacular_api_key,
            identity_api_key: c.identity_api_key,
            allow_insecure: c.allow_insecure_certs,
            timeout_secs: c.timeout_secs,
            target_meals: c.random_meals.target as u32,
        }
    }

    pub async fn save_config(
        &self,
        spoonacular_api_key: String,
        identity_api_key: String,
        insecure: bool,
    ) -> Result<(), MobileError> {
        let mut c = Config::load().unwrap_or_default();
        if !spoonacular_api_key.is_empty() {
            c.spoonacular_api_key = spoonacular_api_key;
        }
        if !identity_api_key.is_empty() {
            c.identity_api_key = identity_api_key;
        }
        c.allow_insecure_certs = insecure;
        c.save().map_err(MobileError::from)?;
        // Rebuild clients with the new settings on next use.
        *self.repo.lock().await = None;
        Ok(())
    }

    // --- Pantry ---

    pub fn get_pantry(&self) -> Result<Vec<String>, MobileError> {
        Ok(Pantry::open()?.list().to_vec())
    }

    pub fn add_pantry_item(&self, name: String) -> Result<bool, MobileError> {
        Ok(Pantry::open()?.add(&name)?)
    }

    pub fn remove_pantry_item(&self, name: String) -> Result<bool, MobileError> {
        Ok(Pantry::open()?.remove(&name)?)
    }

    pub fn clear_pantry(&self) -> Result<(), MobileError> {
        Ok(Pantry::open()?.clear()?)
    }

    // --- Recipe lists ---

    pub async fn load_meals(&self) -> Result<String, MobileError> {
        let repo = self.repository().await?;
        let loaded = repo.load_meals(None).await?;
        let status = status_of(&loaded);
        *self.meals.lock().await = loaded.items;
        Ok(status)
    }

    pub async fn load_recipes(&self) -> Result<String, MobileError> {
        let repo = self.repository().await?;
        let loaded = repo.load_recipes().await?;
        let status = status_of(&loaded);
        *self.recipes.lock().await = loaded.items;
        Ok(status)
    }

    pub async fn load_spoon(&self) -> Result<String, MobileError> {
        let repo = self.repository().await?;
        let loaded = repo.load_spoon().await?;
        let status = status_of(&loaded);
        *self.spoon.lock().await = loaded.items;
        Ok(status)
    }

    pub async fn get_ranked_meals(&self, search_query: String) -> Result<Vec<MobileRecipe>, MobileError> {
        let (pantry, favorites) = Self::ranking_context()?;
        let meals = self.meals.lock().await;
        Ok(Self::rank(&meals, &search_query, &pantry)
            .iter()
            .map(|m| {
                let subtitle = match (&m.category, &m.area) {
                    (Some(c), Some(a)) => format!("{} · {}", c, a),
                    (Some(c), None) => c.clone(),
                    (None, Some(a)) => a.clone(),
                    (None, None) => String::new(),
                };
                let image = m.thumbnail.clone().unwrap_or_default();
                to_mobile(m, &image, subtitle, &pantry, &favorites)
            })
            .collect())
    }

    pub async fn get_ranked_recipes(
        &self,
        search_query: String,
    ) -> Result<Vec<MobileRecipe>, MobileError> {
        let (pantry, favorites) = Self::ranking_context()?;
        let recipes = self.recipes.lock().await;
        Ok(Self::rank(&recipes, &search_query, &pantry)
            .iter()
            .map(|r| {
                let subtitle = format!("{} · {} min", r.cuisine, r.total_time_minutes());
                to_mobile(r, &r.image, subtitle, &pantry, &favorites)
            })
            .collect())
    }

    pub async fn get_ranked_spoon(&self, search_query: String) -> Result<Vec<MobileRecipe>, MobileError> {
        let (pantry, favorites) = Self::ranking_context()?;
        let spoon = self.spoon.lock().await;
        Ok(Self::rank(&spoon, &search_query, &pantry)
            .iter()
            .map(|r| {
                let subtitle = format!("{} min · serves {}", r.ready_in_minutes, r.servings);
                to_mobile(r, &r.image, subtitle, &pantry, &favorites)
            })
            .collect())
    }

    pub async fn get_similar(&self, recipe_id: u64) -> Result<Vec<MobileSimilar>, MobileError> {
        let repo = self.repository().await?;
        Ok(repo
            .similar(recipe_id)
            .await?
            .into_iter()
            .map(|s: SimilarRecipe| MobileSimilar {
                id: s.id,
                title: s.title,
                ready_in_minutes: s.ready_in_minutes,
                servings: s.servings,
                source_url: s.source_url,
            })
            .collect())
    }

    pub async fn get_meal_details(&self, meal_id: String) -> Result<MobileMealDetails, MobileError> {
        let repo = self.repository().await?;
        let details = repo.meal_details(&meal_id).await?;
        let (pantry, favorites) = Self::ranking_context()?;
        Ok(details_to_mobile(details, &pantry, &favorites))
    }

    // --- Favorites ---

    pub fn toggle_favorite(&self, recipe_id: String) -> Result<bool, MobileError> {
        Ok(Favorites::open()?.toggle(&recipe_id)?)
    }

    pub async fn get_favorite_meals(&self) -> Result<Vec<MobileMealDetails>, MobileError> {
        let repo = self.repository().await?;
        let (pantry, favorites) = Self::ranking_context()?;
        Ok(repo
            .favorite_meals(&favorites)
            .await
            .into_iter()
            .map(|m| details_to_mobile(m, &pantry, &favorites))
            .collect())
    }

    // --- Local accounts ---

    pub fn register_local(&self, name: String, password: String) -> Result<u32, MobileError> {
        Ok(Accounts::open()?.register(&name, &password)?)
    }

    pub fn login_local(&self, name: String, password: String) -> Result<String, MobileError> {
        Ok(Accounts::open()?.login(&name, &password)?.name)
    }

    pub fn logout_local(&self) -> Result<(), MobileError> {
        Ok(Accounts::open()?.logout()?)
    }

    pub fn current_local_user(&self) -> Option<String> {
        Accounts::open()
            .ok()
            .and_then(|a| a.current_user().map(|u| u.name.clone()))
    }

    // --- Remote identity ---

    pub async fn sign_in_with_email(
        &self,
        email: String,
        password: String,
    ) -> Result<MobileUser, MobileError> {
        let mut auth = self.remote_auth().await?;
        Ok(user_to_mobile(auth.sign_in_with_email(&email, &password).await?))
    }

    pub async fn sign_up_with_email(
        &self,
        email: String,
        password: String,
        name: String,
    ) -> Result<MobileUser, MobileError> {
        let mut auth = self.remote_auth().await?;
        Ok(user_to_mobile(
            auth.sign_up_with_email(&email, &password, &name).await?,
        ))
    }

    pub async fn sign_in_with_google(&self, id_token: String) -> Result<MobileUser, MobileError> {
        let mut auth = self.remote_auth().await?;
        Ok(user_to_mobile(auth.sign_in_with_google(&id_token).await?))
    }

    pub async fn delete_account(&self) -> Result<(), MobileError> {
        let mut auth = self.remote_auth().await?;
        Ok(auth.delete_account().await?)
    }

    pub async fn sign_out(&self) -> Result<(), MobileError> {
        Ok(self.remote_auth().await?.sign_out()?)
    }

    pub async fn current_user(&self) -> Option<MobileUser> {
        self.remote_auth()
            .await
            .ok()
            .and_then(|a| a.current_user())
            .map(user_to_mobile)
    }
}

impl KusinaMobile {
    async fn repository(&self) -> Result<Arc<RecipeRepository>, MobileError> {
        let mut guard = self.repo.lock().await;
        if let Some(repo) = &*guard {
            return Ok(repo.clone());
        }
        let config = Config::load().unwrap_or_default();
        let repo = Arc::new(RecipeRepository::from_config(&config)?);
        *guard = Some(repo.clone());
        Ok(repo)
    }

    async fn remote_auth(&self) -> Result<RemoteAuth, MobileError> {
        let repo = self.repository().await?;
        Ok(RemoteAuth::open(repo.identity_client())?)
    }

    fn ranking_context() -> Result<(Vec<String>, Favorites), MobileError> {
        Ok((Pantry::open()?.list().to_vec(), Favorites::open()?))
    }

    fn rank<R: Rankable + Clone>(items: &[R], search: &str, pantry: &[String]) -> Vec<R> {
        store::filter_and_rank(
            items,
            FilterOptions {
                search_term: search,
                pantry,
            },
        )
    }
}
