// Location resolution: ordered fallback over the available sources
//
// Three sources can tell us where the user is, in strict priority order:
// explicit coordinate slots, a GPS position carried in the session, and a
// free-text intersection. Each source answers with absence rather than an
// error; a collaborator failure during lookup is logged and swallowed so
// the chain falls through to the next source.

use std::sync::Arc;

use serde::Deserialize;

use super::types::{DialogEvent, SESSION_USER_POSITION};
use crate::config::ServiceConfig;
use crate::providers::geocoder::{Geocoder, Location};

/// The sources a location can come from, tried in this order
const SOURCE_ORDER: [LocationSource; 3] = [
    LocationSource::CoordinateSlots,
    LocationSource::SessionGps,
    LocationSource::IntersectionText,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LocationSource {
    CoordinateSlots,
    SessionGps,
    IntersectionText,
}

/// GPS payload carried in the `userPosition` session attribute
#[derive(Debug, Deserialize)]
struct GpsPosition {
    latitude: f64,
    longitude: f64,
}

/// Resolves the user's location by trying each source in order and keeping
/// the first hit
pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
    config: ServiceConfig,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>, config: ServiceConfig) -> Self {
        Self { geocoder, config }
    }

    /// First source that produces a location wins; `None` when all three
    /// miss, which downstream logic treats as a normal state
    pub async fn resolve(&self, event: &DialogEvent) -> Option<Location> {
        for source in SOURCE_ORDER {
            if let Some(location) = self.try_source(source, event).await {
                log::debug!("location resolved via {:?}: {}", source, location.address);
                return Some(location);
            }
        }
        None
    }

    async fn try_source(&self, source: LocationSource, event: &DialogEvent) -> Option<Location> {
        match source {
            LocationSource::CoordinateSlots => self.from_coordinate_slots(event).await,
            LocationSource::SessionGps => self.from_session_gps(event).await,
            LocationSource::IntersectionText => self.from_intersection_text(event).await,
        }
    }

    async fn from_coordinate_slots(&self, event: &DialogEvent) -> Option<Location> {
        let slots = &event.current_intent.slots;
        let latitude: f64 = slots.latitude.as_deref()?.parse().ok()?;
        let longitude: f64 = slots.longitude.as_deref()?.parse().ok()?;

        match self.geocoder.from_coordinates(latitude, longitude).await {
            Ok(location) => Some(location),
            Err(err) => {
                log::debug!("coordinate slot lookup failed: {}", err);
                None
            }
        }
    }

    async fn from_session_gps(&self, event: &DialogEvent) -> Option<Location> {
        let raw = event.session_attributes.get(SESSION_USER_POSITION)?;
        let position: GpsPosition = match serde_json::from_str(raw) {
            Ok(position) => position,
            Err(err) => {
                log::debug!("unreadable userPosition attribute: {}", err);
                return None;
            }
        };

        match self
            .geocoder
            .from_coordinates(position.latitude, position.longitude)
            .await
        {
            Ok(location) => Some(location),
            Err(err) => {
                log::debug!("session GPS lookup failed: {}", err);
                None
            }
        }
    }

    async fn from_intersection_text(&self, event: &DialogEvent) -> Option<Location> {
        let text = event.current_intent.slots.intersection.as_deref()?;
        let query = format!("{} {}", text, self.config.city);

        match self.geocoder.from_address(&query).await {
            Ok(location) => Some(location),
            Err(err) => {
                log::debug!("address lookup failed for {:?}: {}", query, err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::geocoder::GeocodeError;
    use async_trait::async_trait;

    /// Geocoder whose answers identify which lookup produced them
    struct TracingGeocoder;

    #[async_trait]
    impl Geocoder for TracingGeocoder {
        async fn from_coordinates(
            &self,
            latitude: f64,
            longitude: f64,
        ) -> Result<Location, GeocodeError> {
            Ok(Location::known(
                latitude,
                longitude,
                format!("coords {} {}", latitude, longitude),
            ))
        }

        async fn from_address(&self, text: &str) -> Result<Location, GeocodeError> {
            Ok(Location::known(0.0, 0.0, format!("address {}", text)))
        }
    }

    /// Geocoder that fails every lookup
    struct DownGeocoder;

    #[async_trait]
    impl Geocoder for DownGeocoder {
        async fn from_coordinates(&self, _: f64, _: f64) -> Result<Location, GeocodeError> {
            Err(GeocodeError::Backend("unreachable".to_string()))
        }

        async fn from_address(&self, text: &str) -> Result<Location, GeocodeError> {
            Err(GeocodeError::NoResult(text.to_string()))
        }
    }

    fn resolver(geocoder: impl Geocoder + 'static) -> LocationResolver {
        LocationResolver::new(Arc::new(geocoder), ServiceConfig::default())
    }

    fn event_with_coords() -> DialogEvent {
        let mut event = DialogEvent::new("FindMeals");
        event.current_intent.slots.latitude = Some("43.65".to_string());
        event.current_intent.slots.longitude = Some("-79.38".to_string());
        event
    }

    #[test]
    fn test_coordinate_slots_beat_session_gps() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let mut event = event_with_coords();
            event.session_attributes.insert(
                SESSION_USER_POSITION.to_string(),
                "{\"latitude\":10.0,\"longitude\":20.0}".to_string(),
            );

            let location = resolver(TracingGeocoder).resolve(&event).await.unwrap();

            assert_eq!(location.latitude, 43.65);
            assert_eq!(location.longitude, -79.38);
        });
    }

    #[test]
    fn test_session_gps_used_when_slots_absent() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let mut event = DialogEvent::new("FindMeals");
            event.session_attributes.insert(
                SESSION_USER_POSITION.to_string(),
                "{\"latitude\":10.0,\"longitude\":20.0}".to_string(),
            );

            let location = resolver(TracingGeocoder).resolve(&event).await.unwrap();

            assert_eq!(location.latitude, 10.0);
        });
    }

    #[test]
    fn test_malformed_coordinates_fall_through_to_address() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let mut event = DialogEvent::new("FindMeals");
            event.current_intent.slots.latitude = Some("not-a-number".to_string());
            event.current_intent.slots.longitude = Some("-79.38".to_string());
            event.current_intent.slots.intersection = Some("Queen and Spadina".to_string());

            let location = resolver(TracingGeocoder).resolve(&event).await.unwrap();

            assert_eq!(location.address, "address Queen and Spadina Toronto");
        });
    }

    #[test]
    fn test_malformed_gps_json_is_absence() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let mut event = DialogEvent::new("FindMeals");
            event
                .session_attributes
                .insert(SESSION_USER_POSITION.to_string(), "{broken".to_string());

            assert!(resolver(TracingGeocoder).resolve(&event).await.is_none());
        });
    }

    #[test]
    fn test_collaborator_failure_is_absence_not_error() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let mut event = event_with_coords();
            event.current_intent.slots.intersection = Some("Queen and Spadina".to_string());

            assert!(resolver(DownGeocoder).resolve(&event).await.is_none());
        });
    }

    #[test]
    fn test_no_sources_is_none() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let event = DialogEvent::new("FindMeals");

            assert!(resolver(TracingGeocoder).resolve(&event).await.is_none());
        });
    }
}
