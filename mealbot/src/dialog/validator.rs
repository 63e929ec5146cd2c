// Slot-filling state machine: decides the next dialog action for a turn
//
// The elicitation phase is an ordered rule list; the first rule whose guard
// fires decides the turn. Rules never mutate the event. Once the rules are
// exhausted the async phase resolves a location, stamps "now", and walks
// the confirmation sub-machine. The whole function is idempotent for an
// unchanged event: the only slot writes are the time stamp, the transcript
// time extraction, and the final confirmation write.

use std::sync::Arc;

use super::actions::{Button, DialogAction};
use super::location::LocationResolver;
use super::time::TimeNormalizer;
use super::types::{ConfirmationStatus, DialogEvent};
use crate::config::ServiceConfig;
use crate::providers::geocoder::{Geocoder, Location};
use crate::providers::timeparse::ClockTimeParser;

/// Ordered elicitation rules; order is the slot dependency order
const ELICITATION_RULES: [fn(&DialogEvent) -> Option<DialogAction>; 4] = [
    elicit_meal_now,
    elicit_eligibility,
    elicit_age,
    elicit_gender,
];

/// Decides what the dialog still needs to ask before fulfillment can run
pub struct DialogValidator {
    resolver: LocationResolver,
    normalizer: TimeNormalizer,
    time_parser: Arc<dyn ClockTimeParser>,
    config: ServiceConfig,
}

impl DialogValidator {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        time_parser: Arc<dyn ClockTimeParser>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            resolver: LocationResolver::new(geocoder, config.clone()),
            normalizer: TimeNormalizer::new(&config),
            time_parser,
            config,
        }
    }

    /// Replace the transcript time parser
    pub fn with_time_parser(mut self, time_parser: Arc<dyn ClockTimeParser>) -> Self {
        self.time_parser = time_parser;
        self
    }

    /// Decide the next dialog action for this turn
    pub async fn validate(&self, event: &mut DialogEvent) -> DialogAction {
        for rule in ELICITATION_RULES {
            if let Some(action) = rule(event) {
                return action;
            }
        }

        let location = self.resolver.resolve(event).await;
        self.normalizer.stamp(&mut event.current_intent.slots);

        if event.current_intent.slots.date.is_none() {
            // cannot derive a date here; the dialog manager has to ask
            return DialogAction::delegate(
                event.session_attributes.clone(),
                event.current_intent.slots.clone(),
            );
        }

        if event.current_intent.slots.time.is_none() {
            event.current_intent.slots.time =
                self.time_parser.parse_clock_time(&event.input_transcript);
        }
        if event.current_intent.slots.time.is_none() {
            return DialogAction::delegate(
                event.session_attributes.clone(),
                event.current_intent.slots.clone(),
            );
        }

        self.validate_location(event, location)
    }

    /// Confirmation sub-machine for a resolved (or missing) location
    fn validate_location(
        &self,
        event: &mut DialogEvent,
        location: Option<Location>,
    ) -> DialogAction {
        let Some(location) = location else {
            if event.current_intent.slots.wants_now() {
                // no location and no further question makes sense
                return DialogAction::delegate(
                    event.session_attributes.clone(),
                    event.current_intent.slots.clone(),
                );
            }
            return DialogAction::elicit_slot(
                event.session_attributes.clone(),
                event.current_intent.name.clone(),
                event.current_intent.slots.clone(),
                "Intersection",
                "Where will you be at that time?",
            );
        };

        if location.is_unknown() {
            return DialogAction::fulfill(self.config.unknown_location_message());
        }

        if location.is_outside_service_area() {
            return DialogAction::fail(self.config.outside_service_area_message());
        }

        let confirmed = event.current_intent.slots.confirmed_flag();
        match event.current_intent.confirmation_status {
            ConfirmationStatus::None if !confirmed => DialogAction::confirm_address(
                event.session_attributes.clone(),
                event.current_intent.name.clone(),
                event.current_intent.slots.clone(),
                location.address,
            ),
            ConfirmationStatus::Denied if !confirmed => DialogAction::elicit_slot(
                event.session_attributes.clone(),
                event.current_intent.name.clone(),
                event.current_intent.slots.clone(),
                "Intersection",
                "Oops, I'm sorry about that! Can you tell me where you are? \
                 You can share an address, intersection, or landmark.",
            ),
            _ => {
                // confirmed: the resolved point becomes the canonical slots
                let slots = &mut event.current_intent.slots;
                slots.confirmed = Some("true".to_string());
                slots.latitude = Some(location.latitude.to_string());
                slots.longitude = Some(location.longitude.to_string());
                slots.intersection = Some(location.address);
                DialogAction::delegate(event.session_attributes.clone(), slots.clone())
            }
        }
    }
}

fn elicit_meal_now(event: &DialogEvent) -> Option<DialogAction> {
    if event.current_intent.slots.meal_now.is_some() {
        return None;
    }
    Some(DialogAction::button_elicit_slot(
        event.session_attributes.clone(),
        event.current_intent.name.clone(),
        event.current_intent.slots.clone(),
        "mealNow",
        "Are you looking for meals now?",
        "now or later?",
        vec![
            Button::new("Yes, it's for now.", "Now"),
            Button::new("No, it's for a later time.", "Later"),
        ],
    ))
}

fn elicit_eligibility(event: &DialogEvent) -> Option<DialogAction> {
    if event.current_intent.slots.eligibility.is_some() {
        return None;
    }
    Some(DialogAction::button_elicit_slot(
        event.session_attributes.clone(),
        event.current_intent.name.clone(),
        event.current_intent.slots.clone(),
        "Eligibility",
        "Before we find a meal for you, you can answer a few more questions that \
         might help us find a better option for you, based on your identity. \
         Would you like to answer a few questions?",
        "Feel free to skip any questions you don't feel comfortable answering.",
        vec![Button::new("Yes", "Yes"), Button::new("No", "No")],
    ))
}

fn elicit_age(event: &DialogEvent) -> Option<DialogAction> {
    let slots = &event.current_intent.slots;
    if slots.eligibility.as_deref() != Some("Yes") || slots.age.is_some() || slots.gender.is_some()
    {
        return None;
    }
    Some(DialogAction::elicit_slot(
        event.session_attributes.clone(),
        event.current_intent.name.clone(),
        slots.clone(),
        "Age",
        "How old are you?",
    ))
}

fn elicit_gender(event: &DialogEvent) -> Option<DialogAction> {
    let slots = &event.current_intent.slots;
    if slots.eligibility.as_deref() != Some("Yes") || slots.age.is_none() || slots.gender.is_some()
    {
        return None;
    }
    Some(DialogAction::button_elicit_slot(
        event.session_attributes.clone(),
        event.current_intent.name.clone(),
        slots.clone(),
        "Gender",
        "What is your gender?",
        "Feel free to skip any questions you don't feel comfortable answering.",
        vec![
            Button::new("Male", "male"),
            Button::new("Female", "female"),
            Button::new("Trans", "trans"),
            Button::new("LGBT", "LGBT"),
            Button::new("Skip", "mix"),
        ],
    ))
}
