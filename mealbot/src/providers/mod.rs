//! External collaborator boundaries
//!
//! Everything the dialog core consumes from the outside world lives behind
//! the traits in this module: geocoding, the meal dataset, proximity
//! ranking, and free-text time extraction. Stub implementations ship
//! alongside the traits for tests and offline runs.

pub mod geocoder;
pub mod meals;
pub mod timeparse;

// Re-export main types for easy access
pub use geocoder::{GeocodeError, Geocoder, Location, LocationClass, StubGeocoder};
pub use meals::{
    Meal, MealDataLoader, MealRanker, MealRecord, MealSourceError, RankingQuery, StaticMeal,
    StaticMealSource,
};
pub use timeparse::{ClockTimeParser, DigitalClockParser, NullClockTimeParser};
