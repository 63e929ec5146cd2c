// Turn entry points
//
// One `MealDialog` instance serves many turns; each turn arrives as its own
// `DialogEvent` and leaves as exactly one `DialogAction` or one error. The
// caller routes turns: `validate_turn` during slot collection,
// `fulfill_turn` once the intent is ready.

use std::sync::Arc;

use super::actions::DialogAction;
use super::fulfillment::{FulfillmentController, FulfillmentError};
use super::types::DialogEvent;
use super::validator::DialogValidator;
use crate::config::ServiceConfig;
use crate::providers::geocoder::Geocoder;
use crate::providers::meals::{MealDataLoader, MealRanker};
use crate::providers::timeparse::{ClockTimeParser, DigitalClockParser};

/// Boundary error for a dialog turn
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error(transparent)]
    Fulfillment(#[from] FulfillmentError),
}

/// The meal-finding dialog core
pub struct MealDialog {
    validator: DialogValidator,
    fulfillment: FulfillmentController,
}

impl MealDialog {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        loader: Arc<dyn MealDataLoader>,
        ranker: Arc<dyn MealRanker>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            validator: DialogValidator::new(
                geocoder.clone(),
                Arc::new(DigitalClockParser),
                config.clone(),
            ),
            fulfillment: FulfillmentController::new(geocoder, loader, ranker, config),
        }
    }

    /// Replace the transcript time parser (defaults to [`DigitalClockParser`])
    pub fn with_time_parser(mut self, time_parser: Arc<dyn ClockTimeParser>) -> Self {
        self.validator = self.validator.with_time_parser(time_parser);
        self
    }

    /// Slot-collection entry point: decide what to ask next
    pub async fn validate_turn(&self, event: &mut DialogEvent) -> Result<DialogAction, TurnError> {
        let action = self.validator.validate(event).await;
        log::debug!("validate turn -> {}", action.kind());
        Ok(action)
    }

    /// Fulfillment entry point: produce the next meal suggestion
    pub async fn fulfill_turn(&self, event: &mut DialogEvent) -> Result<DialogAction, TurnError> {
        let action = self.fulfillment.run(event).await?;
        log::debug!("fulfill turn -> {}", action.kind());
        Ok(action)
    }
}
