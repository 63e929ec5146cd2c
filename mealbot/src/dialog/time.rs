// "Now" date/time stamping

use chrono::Utc;
use chrono_tz::Tz;

use super::types::SlotSet;
use crate::config::ServiceConfig;

/// Stamps the current service-city date and time into the slot set when the
/// user asked for a meal right away. A user planning ahead keeps whatever
/// Date/Time slots the dialog manager collected.
pub struct TimeNormalizer {
    timezone: Tz,
}

impl TimeNormalizer {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            timezone: config.timezone,
        }
    }

    /// Overwrite `Date` and `Time` when `mealNow == "Now"`; no-op otherwise
    pub fn stamp(&self, slots: &mut SlotSet) {
        if !slots.wants_now() {
            return;
        }

        let local = Utc::now().with_timezone(&self.timezone);
        slots.date = Some(local.format("%Y-%m-%d").to_string());
        slots.time = Some(local.format("%H:%M").to_string());
    }
}
