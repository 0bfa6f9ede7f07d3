// File: src/client/meal.rs
//! TheMealDB. The free API only serves one random meal per request and has no
//! bulk endpoint, so lists are assembled from many concurrent single calls.
use crate::client::core::HttpClient;
use crate::client::{ClientError, join_url};
use crate::config::RandomMealConfig;
use crate::model::dto::MealsResponse;
use crate::model::{Meal, MealDetails, Response};

use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tokio::sync::mpsc::UnboundedSender;

pub type Progress = UnboundedSender<Response<Vec<Meal>>>;

#[derive(Clone, Debug)]
pub struct MealDbClient {
    http: HttpClient,
    base_url: String,
}

impl MealDbClient {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }

    pub async fn random_meal(&self) -> Result<Option<Meal>, ClientError> {
        let resp: MealsResponse = self
            .http
            .get_json(&join_url(&self.base_url, "random.php"))
            .await?;
        Ok(resp
            .meals
            .and_then(|m| m.into_iter().next())
            .map(Meal::from))
    }

    pub async fn lookup(&self, meal_id: &str) -> Result<MealDetails, ClientError> {
        let url = join_url(&self.base_url, &format!("lookup.php?i={}", meal_id.trim()));
        let resp: MealsResponse = self.http.get_json(&url).await?;
        resp.meals
            .and_then(|m| m.into_iter().next())
            .map(|dto| dto.into_details())
            .ok_or_else(|| ClientError::NotFound(format!("No meal found with ID: {}", meal_id)))
    }

    /// Details for every id that resolves, in the order given. Failures are logged and skipped.
    pub async fn lookup_many(&self, meal_ids: &[String], concurrency: usize) -> Vec<MealDetails> {
        let mut stream = stream::iter(meal_ids.iter().map(|id| async move {
            (id, self.lookup(id).await)
        }))
        .buffered(concurrency.max(1));

        let mut found = Vec::new();
        while let Some((id, res)) = stream.next().await {
            match res {
                Ok(details) => found.push(details),
                Err(e) => log::warn!("Could not fetch meal {}: {}", id, e),
            }
        }
        log::debug!("Fetched {} of {} meals", found.len(), meal_ids.len());
        found
    }

    // `size` concurrent random calls. Returns whatever succeeded plus the last failure.
    async fn fetch_batch(&self, size: usize, concurrency: usize) -> (Vec<Meal>, Option<ClientError>) {
        let mut stream = stream::iter((0..size).map(|_| self.random_meal()))
            .buffer_unordered(concurrency.max(1));

        let mut meals = Vec::with_capacity(size);
        let mut last_error = None;
        while let Some(res) = stream.next().await {
            match res {
                Ok(Some(meal)) => meals.push(meal),
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Random meal request failed: {}", e);
                    last_error = Some(e);
                }
            }
        }
        (meals, last_error)
    }

    /// Build a list of distinct meals by polling `random.php` in batches until
    /// `target` is reached or `max_batches` have been spent. Each time new
    /// meals arrive a snapshot is sent on `progress`.
    pub async fn collect_unique(
        &self,
        tuning: &RandomMealConfig,
        progress: Option<&Progress>,
    ) -> Result<Vec<Meal>, ClientError> {
        let emit = |update: Response<Vec<Meal>>| {
            if let Some(tx) = progress {
                let _ = tx.send(update);
            }
        };
        emit(Response::Loading);

        let mut meals: Vec<Meal> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        let mut absorb = |batch: Vec<Meal>, meals: &mut Vec<Meal>| -> usize {
            let before = meals.len();
            for meal in batch {
                if meals.len() >= tuning.target {
                    break;
                }
                if seen.insert(meal.id.clone()) {
                    meals.push(meal);
                }
            }
            meals.len() - before
        };

        let (first, mut last_error) = self
            .fetch_batch(tuning.initial_batch, tuning.concurrency)
            .await;
        if absorb(first, &mut meals) > 0 {
            emit(Response::Success(meals.clone()));
        }

        let mut batches = 1;
        while meals.len() < tuning.target && batches < tuning.max_batches {
            let size = tuning.batch_cap.min((tuning.target - meals.len()) * 2);
            let (batch, err) = self.fetch_batch(size, tuning.concurrency).await;
            if err.is_some() {
                last_error = err;
            }
            let added = absorb(batch, &mut meals);
            log::debug!(
                "Batch {}: {} new meals ({} total)",
                batches + 1,
                added,
                meals.len()
            );
            if added > 0 {
                emit(Response::Success(meals.clone()));
            }
            batches += 1;
        }

        if meals.is_empty() {
            let err = last_error
                .unwrap_or_else(|| ClientError::Empty("No unique meals retrieved".to_string()));
            emit(Response::Error(err.to_string()));
            return Err(err);
        }

        log::info!("Collected {} unique meals in {} batches", meals.len(), batches);
        Ok(meals)
    }
}
