//! Fare strategies. Each one turns a trip's distance into a fare in cents precision.
use crate::error::TripError;
use crate::trip::Trip;
use crate::utils::{priced, require_non_negative, require_positive_distance};

/// Base fare plus a per-mile rate.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardFare {
    base_fare: f64,
    per_mile_rate: f64,
}

/// Multiplier applied on top of another strategy's fare.
#[derive(Debug, Clone, PartialEq)]
pub struct SurgeFare {
    base: Box<FareStrategy>,
    multiplier: f64,
}

/// Standard pricing with a shared-ride discount in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedRideFare {
    base_fare: f64,
    per_mile_rate: f64,
    discount_rate: f64,
}

/// The active pricing policy of a trip, resolved when the trip completes.
#[derive(Debug, Clone, PartialEq)]
pub enum FareStrategy {
    Standard(StandardFare),
    Surge(SurgeFare),
    SharedRide(SharedRideFare),
}

impl StandardFare {
    pub fn new(base_fare: f64, per_mile_rate: f64) -> Result<Self, TripError> {
        require_non_negative(base_fare, "Base fare")?;
        require_non_negative(per_mile_rate, "Per mile rate")?;
        Ok(Self {
            base_fare,
            per_mile_rate,
        })
    }
    pub fn base_fare(&self) -> f64 {
        self.base_fare
    }
    pub fn per_mile_rate(&self) -> f64 {
        self.per_mile_rate
    }
    fn fare_for_distance(&self, distance_miles: f64) -> Result<f64, TripError> {
        require_positive_distance(distance_miles)?;
        priced(self.base_fare + distance_miles * self.per_mile_rate)
    }
}

impl SurgeFare {
    pub fn new(base: FareStrategy, multiplier: f64) -> Result<Self, TripError> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(TripError::invalid("Multiplier must be greater than 0"));
        }
        Ok(Self {
            base: Box::new(base),
            multiplier,
        })
    }
    pub fn base(&self) -> &FareStrategy {
        &self.base
    }
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }
    /// Same multiplier over a different base. `self` is left as it was.
    pub fn with_base(&self, base: FareStrategy) -> Self {
        Self {
            base: Box::new(base),
            multiplier: self.multiplier,
        }
    }
    fn fare_for_distance(&self, distance_miles: f64) -> Result<f64, TripError> {
        let base_fare = self.base.fare_for_distance(distance_miles)?;
        priced(base_fare * self.multiplier)
    }
}

impl SharedRideFare {
    pub fn new(base_fare: f64, per_mile_rate: f64, discount_rate: f64) -> Result<Self, TripError> {
        require_non_negative(base_fare, "Base fare")?;
        require_non_negative(per_mile_rate, "Per mile rate")?;
        if !(0.0..=1.0).contains(&discount_rate) {
            return Err(TripError::invalid("Discount rate must be between 0 and 1"));
        }
        Ok(Self {
            base_fare,
            per_mile_rate,
            discount_rate,
        })
    }
    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }
    fn fare_for_distance(&self, distance_miles: f64) -> Result<f64, TripError> {
        require_positive_distance(distance_miles)?;
        let undiscounted = self.base_fare + distance_miles * self.per_mile_rate;
        priced(undiscounted * (1.0 - self.discount_rate))
    }
}

impl FareStrategy {
    pub fn standard(base_fare: f64, per_mile_rate: f64) -> Result<Self, TripError> {
        StandardFare::new(base_fare, per_mile_rate).map(Self::Standard)
    }
    pub fn surge(base: FareStrategy, multiplier: f64) -> Result<Self, TripError> {
        SurgeFare::new(base, multiplier).map(Self::Surge)
    }
    pub fn shared_ride(
        base_fare: f64,
        per_mile_rate: f64,
        discount_rate: f64,
    ) -> Result<Self, TripError> {
        SharedRideFare::new(base_fare, per_mile_rate, discount_rate).map(Self::SharedRide)
    }

    /// Compute the fare for `trip`. The distance is checked again here rather
    /// than trusting the caller.
    pub fn calculate_fare(&self, trip: &Trip) -> Result<f64, TripError> {
        self.fare_for_distance(trip.distance_miles())
    }

    pub fn fare_for_distance(&self, distance_miles: f64) -> Result<f64, TripError> {
        match self {
            Self::Standard(s) => s.fare_for_distance(distance_miles),
            Self::Surge(s) => s.fare_for_distance(distance_miles),
            Self::SharedRide(s) => s.fare_for_distance(distance_miles),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard(_) => "StandardFare",
            Self::Surge(_) => "SurgeFare",
            Self::SharedRide(_) => "SharedRideFare",
        }
    }
}

impl From<StandardFare> for FareStrategy {
    fn from(value: StandardFare) -> Self {
        Self::Standard(value)
    }
}

impl From<SurgeFare> for FareStrategy {
    fn from(value: SurgeFare) -> Self {
        Self::Surge(value)
    }
}

impl From<SharedRideFare> for FareStrategy {
    fn from(value: SharedRideFare) -> Self {
        Self::SharedRide(value)
    }
}
