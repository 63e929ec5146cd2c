// Fulfillment: ranked meal lookup and show-more pagination
//
// Runs once the validator is satisfied. Collaborator failures here are not
// downgraded: a turn that cannot load or rank the dataset reports an error
// instead of an action. The pagination cursor has no in-process home; it
// rides the session attributes so any serving process can pick up the next
// turn.

use std::sync::Arc;

use super::actions::{Button, DialogAction};
use super::location::LocationResolver;
use super::types::{DialogEvent, SESSION_MEAL_COUNTER};
use crate::config::ServiceConfig;
use crate::providers::geocoder::Geocoder;
use crate::providers::meals::{Meal, MealDataLoader, MealRanker, MealSourceError, RankingQuery};

/// Errors from the fulfillment phase
#[derive(Debug, thiserror::Error)]
pub enum FulfillmentError {
    #[error("no usable location at fulfillment time")]
    LocationUnavailable,
    #[error(transparent)]
    MealSource(#[from] MealSourceError),
}

/// Produces the next meal suggestion for a satisfied intent
pub struct FulfillmentController {
    resolver: LocationResolver,
    loader: Arc<dyn MealDataLoader>,
    ranker: Arc<dyn MealRanker>,
}

impl FulfillmentController {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        loader: Arc<dyn MealDataLoader>,
        ranker: Arc<dyn MealRanker>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            resolver: LocationResolver::new(geocoder, config),
            loader,
            ranker,
        }
    }

    pub async fn run(&self, event: &mut DialogEvent) -> Result<DialogAction, FulfillmentError> {
        let location = self
            .resolver
            .resolve(event)
            .await
            .ok_or(FulfillmentError::LocationUnavailable)?;

        let meals = self.loader.load_meals().await?;
        let slots = event.current_intent.slots.clone();
        let query = RankingQuery {
            location,
            time: slots.time.clone(),
            age: slots.age.clone(),
            gender: slots.gender.clone(),
        };
        let ranked = self.ranker.find(meals, &query).await?;

        if ranked.is_empty() {
            return Ok(DialogAction::fulfill(
                "There are no meals available within an hour.",
            ));
        }

        // the cursor compares against the previous turn's value; it only
        // moves when the user explicitly asked for more
        let mut cursor = stored_cursor(event);
        if slots.show_more_requested() {
            cursor += 1;
        }

        let Some(meal) = ranked.get(cursor) else {
            return Ok(DialogAction::fulfill("That's all meals I could find"));
        };

        if slots.show_more_satisfied() {
            return Ok(DialogAction::fulfill("Perfect!"));
        }

        let summary = render_summary(meal.as_ref(), slots.wants_now());
        log::debug!("offering meal {} of {}", cursor + 1, ranked.len());

        let mut session_attributes = event.session_attributes.clone();
        session_attributes.insert(SESSION_MEAL_COUNTER.to_string(), cursor.to_string());

        Ok(DialogAction::button_elicit_slot(
            session_attributes,
            event.current_intent.name.clone(),
            event.current_intent.slots.clone(),
            "ShowMore",
            summary,
            "Would you like to see other options?",
            vec![
                Button::new("Yes Please!", "More"),
                Button::new("No thanks, I like this one!", "Good"),
            ],
        ))
    }
}

/// Previous turn's cursor; absent or unreadable means the first meal
fn stored_cursor(event: &DialogEvent) -> usize {
    event
        .session_attributes
        .get(SESSION_MEAL_COUNTER)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0)
}

fn render_summary(meal: &dyn Meal, is_now: bool) -> String {
    format!(
        "The meal closest to you is {} at {}. The meal {}, and it's a {} walk \
         from where you are. If you like to, dial {} to inquire about today's menu.",
        meal.organization_name(),
        meal.address(),
        meal.starts_in_text(is_now),
        meal.walk_time_text(),
        meal.phone_number()
    )
}
