use crate::error::TripError;
use crate::fare::FareStrategy;
use crate::trip::Trip;

// used for assembling a trip field by field
#[derive(Debug, Default)]
pub struct TripBuilder {
    rider_name: Option<String>,
    pickup_location: Option<String>,
    dropoff_location: Option<String>,
    distance_miles: Option<f64>,
    fare_strategy: Option<FareStrategy>,
}

impl TripBuilder {
    /// Construct an empty builder. Every field is required by `build`.
    pub fn new() -> Self {
        Self::default()
    }
    pub fn rider(mut self, rider_name: impl Into<String>) -> Self {
        self.rider_name = Some(rider_name.into());
        self
    }
    pub fn pickup(mut self, location: impl Into<String>) -> Self {
        self.pickup_location = Some(location.into());
        self
    }
    pub fn dropoff(mut self, location: impl Into<String>) -> Self {
        self.dropoff_location = Some(location.into());
        self
    }
    pub fn distance_miles(mut self, distance_miles: f64) -> Self {
        self.distance_miles = Some(distance_miles);
        self
    }
    pub fn fare_strategy(mut self, fare_strategy: FareStrategy) -> Self {
        self.fare_strategy = Some(fare_strategy);
        self
    }

    pub fn build(self) -> Result<Trip, TripError> {
        let rider_name = self
            .rider_name
            .ok_or_else(|| TripError::invalid("Rider name is not set"))?;
        let pickup_location = self
            .pickup_location
            .ok_or_else(|| TripError::invalid("Pickup location is not set"))?;
        let dropoff_location = self
            .dropoff_location
            .ok_or_else(|| TripError::invalid("Dropoff location is not set"))?;
        let distance_miles = self
            .distance_miles
            .ok_or_else(|| TripError::invalid("Distance is not set"))?;
        let fare_strategy = self
            .fare_strategy
            .ok_or_else(|| TripError::invalid("Fare strategy cannot be null"))?;

        Trip::new(
            rider_name,
            pickup_location,
            dropoff_location,
            distance_miles,
            fare_strategy,
        )
    }
}
