//! Geocoding boundary
//!
//! The dialog never talks to a geocoding service directly; it goes through
//! the [`Geocoder`] trait and receives [`Location`] values back. A location
//! carries its own classification so downstream logic can branch on "we
//! know where this is" versus "we resolved something, but not usefully"
//! without re-querying.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// How a resolved location relates to the service area
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationClass {
    /// Resolved to a usable point inside the service area
    Known,
    /// The backend returned something it could not place
    Unknown,
    /// Resolved, but outside the bounded geography we serve
    OutsideServiceArea,
}

/// A resolved user location. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Human-readable address, used verbatim for confirmation prompts
    pub address: String,
    pub classification: LocationClass,
}

impl Location {
    pub fn new(
        latitude: f64,
        longitude: f64,
        address: impl Into<String>,
        classification: LocationClass,
    ) -> Self {
        Self {
            latitude,
            longitude,
            address: address.into(),
            classification,
        }
    }

    /// A usable location inside the service area
    pub fn known(latitude: f64, longitude: f64, address: impl Into<String>) -> Self {
        Self::new(latitude, longitude, address, LocationClass::Known)
    }

    /// A location the backend could not place. Coordinates are zeroed;
    /// callers must check the classification before using them.
    pub fn unknown(address: impl Into<String>) -> Self {
        Self::new(0.0, 0.0, address, LocationClass::Unknown)
    }

    /// A resolved location that falls outside the service area
    pub fn outside_service_area(
        latitude: f64,
        longitude: f64,
        address: impl Into<String>,
    ) -> Self {
        Self::new(latitude, longitude, address, LocationClass::OutsideServiceArea)
    }

    pub fn is_unknown(&self) -> bool {
        self.classification == LocationClass::Unknown
    }

    pub fn is_outside_service_area(&self) -> bool {
        self.classification == LocationClass::OutsideServiceArea
    }
}

/// Errors from geocoder collaborators
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("geocoding backend error: {0}")]
    Backend(String),
    #[error("no result for query: {0}")]
    NoResult(String),
}

/// Trait for geocoding collaborators
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a coordinate pair to a classified location
    async fn from_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Location, GeocodeError>;

    /// Resolve free text (address, intersection, landmark) to a location
    async fn from_address(&self, text: &str) -> Result<Location, GeocodeError>;
}

// ============================================================================
// Stub Geocoder
// ============================================================================

/// Deterministic geocoder for tests and offline runs. By default it echoes
/// coordinate lookups back as known locations and resolves free text to a
/// fixed downtown point; either answer can be replaced through the builders.
pub struct StubGeocoder {
    coordinate_result: Option<Location>,
    address_result: Option<Location>,
}

impl StubGeocoder {
    pub fn new() -> Self {
        Self {
            coordinate_result: None,
            address_result: None,
        }
    }

    /// Answer every coordinate lookup with this location
    pub fn with_coordinate_result(mut self, location: Location) -> Self {
        self.coordinate_result = Some(location);
        self
    }

    /// Answer every address lookup with this location
    pub fn with_address_result(mut self, location: Location) -> Self {
        self.address_result = Some(location);
        self
    }
}

impl Default for StubGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn from_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Location, GeocodeError> {
        match &self.coordinate_result {
            Some(location) => Ok(location.clone()),
            None => Ok(Location::known(
                latitude,
                longitude,
                format!("{:.4}, {:.4}", latitude, longitude),
            )),
        }
    }

    async fn from_address(&self, text: &str) -> Result<Location, GeocodeError> {
        match &self.address_result {
            Some(location) => Ok(location.clone()),
            None => Ok(Location::known(43.6532, -79.3832, text)),
        }
    }
}
