// Meal-finding dialog core
//
// The dialog is driven one turn at a time: during slot collection each turn
// goes through the validator's state machine, and once every required slot
// is satisfied the turn goes through the fulfillment controller. Both paths
// produce exactly one DialogAction for the external response channel.

pub mod actions;
pub mod engine;
pub mod fulfillment;
pub mod location;
pub mod time;
pub mod types;
pub mod validator;


pub use actions::{Button, DialogAction};
pub use engine::{MealDialog, TurnError};
pub use fulfillment::{FulfillmentController, FulfillmentError};
pub use location::LocationResolver;
pub use time::TimeNormalizer;
pub use types::*;
pub use validator::DialogValidator;
