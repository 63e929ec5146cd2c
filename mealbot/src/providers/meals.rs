//! Meal dataset and ranking boundary
//!
//! Two collaborators feed fulfillment: a loader that produces the raw meal
//! dataset, and a ranker that orders candidates by proximity and
//! time-window feasibility. The core never inspects a [`MealRecord`]; it
//! only indexes into the ordered sequence of [`Meal`]s the ranker returns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::providers::geocoder::Location;

/// Opaque dataset row handed from the loader to the ranker
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MealRecord {
    pub id: String,
    pub payload: serde_json::Value,
}

/// A ranked meal service as presented to the user
pub trait Meal: Send + Sync {
    fn organization_name(&self) -> &str;
    fn address(&self) -> &str;
    fn phone_number(&self) -> &str;
    /// Phrasing for when the meal starts; `is_now` selects the wording for
    /// a user who wants a meal right away
    fn starts_in_text(&self, is_now: bool) -> String;
    fn walk_time_text(&self) -> String;
}

/// Ranking inputs assembled by the fulfillment controller
#[derive(Clone, Debug)]
pub struct RankingQuery {
    pub location: Location,
    pub time: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
}

/// Errors from meal dataset and ranking collaborators
#[derive(Debug, thiserror::Error)]
pub enum MealSourceError {
    #[error("meal dataset load failed: {0}")]
    Load(String),
    #[error("meal ranking failed: {0}")]
    Ranking(String),
}

/// Trait for the dataset loader collaborator
#[async_trait]
pub trait MealDataLoader: Send + Sync {
    async fn load_meals(&self) -> Result<Vec<MealRecord>, MealSourceError>;
}

/// Trait for the ranking collaborator. Results come back nearest/soonest
/// first; an empty result is a valid answer, not an error.
#[async_trait]
pub trait MealRanker: Send + Sync {
    async fn find(
        &self,
        meals: Vec<MealRecord>,
        query: &RankingQuery,
    ) -> Result<Vec<Box<dyn Meal>>, MealSourceError>;
}

// ============================================================================
// Static Meal Source
// ============================================================================

/// A fixed meal entry served by [`StaticMealSource`]
#[derive(Clone, Debug)]
pub struct StaticMeal {
    pub organization_name: String,
    pub address: String,
    pub phone_number: String,
    /// Relative start phrasing, e.g. "in 20 minutes"
    pub starts_in: String,
    /// Walk duration phrasing, e.g. "10 minute"
    pub walk_time: String,
}

impl StaticMeal {
    pub fn new(
        organization_name: &str,
        address: &str,
        phone_number: &str,
        starts_in: &str,
        walk_time: &str,
    ) -> Self {
        Self {
            organization_name: organization_name.to_string(),
            address: address.to_string(),
            phone_number: phone_number.to_string(),
            starts_in: starts_in.to_string(),
            walk_time: walk_time.to_string(),
        }
    }
}

impl Meal for StaticMeal {
    fn organization_name(&self) -> &str {
        &self.organization_name
    }

    fn address(&self) -> &str {
        &self.address
    }

    fn phone_number(&self) -> &str {
        &self.phone_number
    }

    fn starts_in_text(&self, is_now: bool) -> String {
        if is_now {
            format!("starts {}", self.starts_in)
        } else {
            format!("will start {}", self.starts_in)
        }
    }

    fn walk_time_text(&self) -> String {
        self.walk_time.clone()
    }
}

/// In-memory meal source for tests and offline runs: implements both the
/// loader and the ranker, serving a fixed list in insertion order
/// regardless of the query.
pub struct StaticMealSource {
    meals: Vec<StaticMeal>,
}

impl StaticMealSource {
    pub fn new(meals: Vec<StaticMeal>) -> Self {
        Self { meals }
    }

    /// A small fixed dataset for demos
    pub fn sample() -> Self {
        Self::new(vec![
            StaticMeal::new(
                "Community Food Centre",
                "1884 Davenport Rd",
                "416-533-7046",
                "in 20 minutes",
                "10 minute",
            ),
            StaticMeal::new(
                "Out of the Cold",
                "188 Carlton St",
                "416-923-8137",
                "in 45 minutes",
                "15 minute",
            ),
            StaticMeal::new(
                "Good Shepherd Centre",
                "412 Queen St E",
                "416-869-3619",
                "in an hour",
                "25 minute",
            ),
        ])
    }
}

#[async_trait]
impl MealDataLoader for StaticMealSource {
    async fn load_meals(&self) -> Result<Vec<MealRecord>, MealSourceError> {
        Ok(self
            .meals
            .iter()
            .enumerate()
            .map(|(index, meal)| MealRecord {
                id: index.to_string(),
                payload: serde_json::json!({
                    "organizationName": meal.organization_name,
                    "address": meal.address,
                }),
            })
            .collect())
    }
}

#[async_trait]
impl MealRanker for StaticMealSource {
    async fn find(
        &self,
        _meals: Vec<MealRecord>,
        _query: &RankingQuery,
    ) -> Result<Vec<Box<dyn Meal>>, MealSourceError> {
        Ok(self
            .meals
            .iter()
            .cloned()
            .map(|meal| Box::new(meal) as Box<dyn Meal>)
            .collect())
    }
}
