//! The trip aggregate: identity, lifecycle state machine and event dispatch
use std::fmt;
use std::rc::Rc;

use crate::error::TripError;
use crate::event::{TripEvent, TripEventType};
use crate::fare::FareStrategy;
use crate::observer::{Subscribers, TripObserver};
use crate::types::{TripId, TripStatus};
use crate::utils::{require_positive_distance, require_text};

pub struct Trip {
    id: TripId,
    rider_name: String,
    pickup_location: String,
    dropoff_location: String,
    distance_miles: f64,
    status: TripStatus,
    fare_strategy: FareStrategy,
    driver_name: Option<String>, // set on accept
    last_fare: Option<f64>,      // set on complete
    subscribers: Subscribers,
}

impl Trip {
    /// Create a trip in `Created` status. Names must not be blank and the
    /// distance must be greater than zero.
    pub fn new(
        rider_name: impl Into<String>,
        pickup_location: impl Into<String>,
        dropoff_location: impl Into<String>,
        distance_miles: f64,
        fare_strategy: FareStrategy,
    ) -> Result<Self, TripError> {
        let rider_name = rider_name.into();
        let pickup_location = pickup_location.into();
        let dropoff_location = dropoff_location.into();

        require_text(&rider_name, "Rider name")?;
        require_text(&pickup_location, "Pickup location")?;
        require_text(&dropoff_location, "Dropoff location")?;
        require_positive_distance(distance_miles)?;

        let trip = Self {
            id: TripId::new(),
            rider_name,
            pickup_location,
            dropoff_location,
            distance_miles,
            status: TripStatus::Created,
            fare_strategy,
            driver_name: None,
            last_fare: None,
            subscribers: Subscribers::new(),
        };
        tracing::debug!(
            trip_id = %trip.id,
            strategy = trip.fare_strategy.name(),
            "trip created"
        );

        Ok(trip)
    }

    pub fn id(&self) -> &TripId {
        &self.id
    }
    pub fn rider_name(&self) -> &str {
        &self.rider_name
    }
    pub fn pickup_location(&self) -> &str {
        &self.pickup_location
    }
    pub fn dropoff_location(&self) -> &str {
        &self.dropoff_location
    }
    pub fn distance_miles(&self) -> f64 {
        self.distance_miles
    }
    pub fn status(&self) -> TripStatus {
        self.status
    }
    pub fn fare_strategy(&self) -> &FareStrategy {
        &self.fare_strategy
    }
    pub fn driver_name(&self) -> Option<&str> {
        self.driver_name.as_deref()
    }
    pub fn last_fare(&self) -> Option<f64> {
        self.last_fare
    }

    /// Replace the pricing policy. Takes effect if the trip has not completed yet.
    pub fn set_fare_strategy(&mut self, fare_strategy: FareStrategy) {
        tracing::debug!(
            trip_id = %self.id,
            from = self.fare_strategy.name(),
            to = fare_strategy.name(),
            status = %self.status,
            "fare strategy swapped"
        );
        self.fare_strategy = fare_strategy;
    }

    pub fn add_observer(&self, observer: Rc<dyn TripObserver>) {
        self.subscribers.add(observer);
    }

    /// Unsubscribe the first occurrence of `observer`. Unknown observers are ignored.
    pub fn remove_observer<O: TripObserver + ?Sized>(&self, observer: &Rc<O>) -> bool {
        self.subscribers.remove(observer)
    }

    /// Shared handle to this trip's subscriptions, usable from inside a callback.
    pub fn subscribers(&self) -> Subscribers {
        self.subscribers.clone()
    }

    pub fn request(&mut self) -> Result<(), TripError> {
        self.guard("request", |status| status == TripStatus::Created)?;
        self.advance(TripStatus::Requested, TripEventType::Requested, None);
        Ok(())
    }

    pub fn accept(&mut self, driver_name: impl Into<String>) -> Result<(), TripError> {
        self.guard("accept", |status| status == TripStatus::Requested)?;
        let driver_name = driver_name.into();
        require_text(&driver_name, "Driver name")?;

        self.driver_name = Some(driver_name);
        self.advance(TripStatus::Accepted, TripEventType::Accepted, None);
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), TripError> {
        self.guard("start", |status| status == TripStatus::Accepted)?;
        self.advance(TripStatus::Started, TripEventType::Started, None);
        Ok(())
    }

    /// Price the trip with the strategy active right now and finish it.
    pub fn complete(&mut self) -> Result<f64, TripError> {
        self.guard("complete", |status| status == TripStatus::Started)?;
        let fare = self.fare_strategy.calculate_fare(self)?;

        self.last_fare = Some(fare);
        self.advance(TripStatus::Completed, TripEventType::Completed, Some(fare));
        Ok(fare)
    }

    pub fn cancel(&mut self) -> Result<(), TripError> {
        self.guard("cancel", |status| status.is_cancellable())?;
        self.advance(TripStatus::Cancelled, TripEventType::Cancelled, None);
        Ok(())
    }

    fn guard(
        &self,
        operation: &'static str,
        allowed: impl Fn(TripStatus) -> bool,
    ) -> Result<(), TripError> {
        if allowed(self.status) {
            return Ok(());
        }
        Err(TripError::IllegalTransition {
            operation,
            status: self.status,
        })
    }

    fn advance(&mut self, status: TripStatus, event_type: TripEventType, fare: Option<f64>) {
        tracing::debug!(
            trip_id = %self.id,
            from = %self.status,
            to = %status,
            "trip transition"
        );
        self.status = status;

        let event = TripEvent::new(
            &self.id,
            event_type,
            &self.rider_name,
            self.driver_name.as_deref(),
            fare,
        );
        self.subscribers.notify(&event);
    }
}

impl fmt::Debug for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trip")
            .field("id", &self.id.to_string())
            .field("rider_name", &self.rider_name)
            .field("pickup_location", &self.pickup_location)
            .field("dropoff_location", &self.dropoff_location)
            .field("distance_miles", &self.distance_miles)
            .field("status", &self.status)
            .field("fare_strategy", &self.fare_strategy.name())
            .field("driver_name", &self.driver_name)
            .field("last_fare", &self.last_fare)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn standard() -> FareStrategy {
        FareStrategy::standard(2.50, 1.75).unwrap()
    }

    fn started_trip(distance: f64) -> Trip {
        let mut trip = Trip::new("Riley", "A", "B", distance, standard()).unwrap();
        trip.request().unwrap();
        trip.accept("D1").unwrap();
        trip.start().unwrap();
        trip
    }

    #[test]
    fn happy_path_completes_with_standard_fare() {
        let mut trip = started_trip(10.0);
        let fare = trip.complete().unwrap();

        assert!((fare - 20.0).abs() < 1e-9);
        assert_eq!(trip.last_fare(), Some(fare));
        assert_eq!(trip.status(), TripStatus::Completed);
        assert_eq!(trip.driver_name(), Some("D1"));
    }

    #[test]
    fn out_of_order_call_keeps_status() {
        let mut trip = Trip::new("Pat", "A", "B", 3.0, standard()).unwrap();
        let err = trip.start().unwrap_err();

        assert_eq!(err.status(), Some(TripStatus::Created));
        assert_eq!(trip.status(), TripStatus::Created);
    }

    #[test]
    fn accept_rejects_blank_driver_without_advancing() {
        let mut trip = Trip::new("Pat", "A", "B", 3.0, standard()).unwrap();
        trip.request().unwrap();

        assert!(trip.accept("  ").unwrap_err().is_parameter_error());
        assert_eq!(trip.status(), TripStatus::Requested);
        assert!(trip.driver_name().is_none());
    }

    #[test]
    fn events_carry_driver_after_acceptance() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut trip = Trip::new("Casey", "A", "B", 2.0, standard()).unwrap();

        let sink = seen.clone();
        trip.add_observer(Rc::new(move |event: &TripEvent| {
            sink.borrow_mut().push(event.clone())
        }));

        trip.request().unwrap();
        trip.accept("Ava").unwrap();
        trip.cancel().unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert!(seen[0].driver_name().is_none());
        assert_eq!(seen[1].driver_name(), Some("Ava"));
        assert_eq!(seen[2].event_type(), TripEventType::Cancelled);
        assert!(seen.iter().all(|e| e.fare().is_none()));
        assert!(trip.last_fare().is_none());
    }
}
