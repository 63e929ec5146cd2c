// Core types for the meal dialog: one turn's conversation state

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Session attribute carrying the browser-reported GPS position as JSON
pub const SESSION_USER_POSITION: &str = "userPosition";

/// Session attribute carrying the pagination cursor between turns
pub const SESSION_MEAL_COUNTER: &str = "mealCounter";

/// Confirmation state reported by the dialog manager for the current intent
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmationStatus {
    #[default]
    None,
    Confirmed,
    Denied,
}

/// The slot values collected so far. Unset slots are `None`; the wire
/// format keys them by their original names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotSet {
    /// "Now" or "Later"
    #[serde(rename = "mealNow", default)]
    pub meal_now: Option<String>,
    /// "Yes" or "No": whether the user opted into demographic questions
    #[serde(rename = "Eligibility", default)]
    pub eligibility: Option<String>,
    #[serde(rename = "Age", default)]
    pub age: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    /// Free-text address, intersection, or landmark
    #[serde(rename = "Intersection", default)]
    pub intersection: Option<String>,
    #[serde(rename = "Latitude", default)]
    pub latitude: Option<String>,
    #[serde(rename = "Longitude", default)]
    pub longitude: Option<String>,
    /// `%Y-%m-%d`
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    /// 24-hour `%H:%M`
    #[serde(rename = "Time", default)]
    pub time: Option<String>,
    /// "true" once the resolved address has been confirmed
    #[serde(rename = "Confirmed", default)]
    pub confirmed: Option<String>,
    /// "More" or "Good" during result pagination
    #[serde(rename = "ShowMore", default)]
    pub show_more: Option<String>,
}

impl SlotSet {
    pub fn wants_now(&self) -> bool {
        self.meal_now.as_deref() == Some("Now")
    }

    pub fn confirmed_flag(&self) -> bool {
        self.confirmed.as_deref() == Some("true")
    }

    pub fn show_more_requested(&self) -> bool {
        self.show_more.as_deref() == Some("More")
    }

    pub fn show_more_satisfied(&self) -> bool {
        self.show_more.as_deref() == Some("Good")
    }
}

/// Summary of the in-flight intent as reported by the dialog manager
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentSummary {
    pub name: String,
    #[serde(default)]
    pub slots: SlotSet,
    #[serde(rename = "confirmationStatus", default)]
    pub confirmation_status: ConfirmationStatus,
}

/// One turn's worth of conversation state. Constructed per turn from the
/// incoming request; anything that must survive the turn travels back out
/// through the slots and session attributes of the returned action.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogEvent {
    pub current_intent: IntentSummary,
    #[serde(default)]
    pub session_attributes: HashMap<String, String>,
    #[serde(default)]
    pub input_transcript: String,
}

impl DialogEvent {
    pub fn new(intent_name: impl Into<String>) -> Self {
        Self {
            current_intent: IntentSummary {
                name: intent_name.into(),
                slots: SlotSet::default(),
                confirmation_status: ConfirmationStatus::None,
            },
            session_attributes: HashMap::new(),
            input_transcript: String::new(),
        }
    }
}
