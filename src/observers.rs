//! Observers shipped with the crate: logging, revenue, app notifications and an
//! encoded event journal.
use std::cell::{Cell, RefCell};

use crate::event::{TripEvent, TripEventType};
use crate::observer::TripObserver;

// a missing fare is shown as such, never as $0.00
fn dollars(fare: Option<f64>) -> String {
    fare.map_or_else(|| "n/a".to_owned(), |fare| format!("${fare:.2}"))
}

/// Logs every event at info level.
#[derive(Debug, Default)]
pub struct TripLogger;

impl TripObserver for TripLogger {
    fn on_trip_event(&self, event: &TripEvent) -> anyhow::Result<()> {
        tracing::info!(
            timestamp = %event.timestamp(),
            trip_id = event.trip_id(),
            driver = event.driver_name(),
            fare = event.fare(),
            "trip -> {}",
            event.event_type()
        );
        Ok(())
    }
}

/// Running revenue over completed trips.
#[derive(Debug, Default)]
pub struct RevenueTracker {
    total_revenue: Cell<f64>,
    completed_trips: Cell<u32>,
}

impl RevenueTracker {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn total_revenue(&self) -> f64 {
        self.total_revenue.get()
    }
    pub fn completed_trips(&self) -> u32 {
        self.completed_trips.get()
    }
}

impl TripObserver for RevenueTracker {
    fn on_trip_event(&self, event: &TripEvent) -> anyhow::Result<()> {
        if event.event_type() != TripEventType::Completed {
            return Ok(());
        }
        let fare = event
            .fare()
            .ok_or_else(|| anyhow::anyhow!("completed event for {} has no fare", event.trip_id()))?;

        self.total_revenue.set(self.total_revenue.get() + fare);
        self.completed_trips.set(self.completed_trips.get() + 1);
        tracing::info!(
            fare,
            total_revenue = self.total_revenue(),
            trips = self.completed_trips(),
            "revenue recorded"
        );
        Ok(())
    }
}

/// Rider app notifications.
#[derive(Debug)]
pub struct RiderNotifier {
    rider_name: String,
}

impl RiderNotifier {
    pub fn new(rider_name: impl Into<String>) -> Self {
        Self {
            rider_name: rider_name.into(),
        }
    }

    pub fn message_for(&self, event: &TripEvent) -> String {
        let body = match event.event_type() {
            TripEventType::Requested => "Trip requested. Finding a driver...".to_owned(),
            TripEventType::Accepted => format!(
                "Driver {} accepted your trip.",
                event.driver_name().unwrap_or("unknown")
            ),
            TripEventType::Started => "Trip started. Enjoy the ride!".to_owned(),
            TripEventType::Completed => format!("Trip completed. Total: {}", dollars(event.fare())),
            TripEventType::Cancelled => "Trip cancelled.".to_owned(),
        };
        format!("RIDER APP ({}): {body}", self.rider_name)
    }
}

impl TripObserver for RiderNotifier {
    fn on_trip_event(&self, event: &TripEvent) -> anyhow::Result<()> {
        let message = self.message_for(event);
        tracing::info!(target: "rideshare::rider_app", "{message}");
        Ok(())
    }
}

/// Driver app notifications. Drivers hear nothing about a trip before they accept it.
#[derive(Debug)]
pub struct DriverNotifier {
    driver_name: String,
}

impl DriverNotifier {
    pub fn new(driver_name: impl Into<String>) -> Self {
        Self {
            driver_name: driver_name.into(),
        }
    }

    pub fn message_for(&self, event: &TripEvent) -> Option<String> {
        let body = match event.event_type() {
            TripEventType::Requested => return None,
            TripEventType::Accepted => format!(
                "You accepted trip {}. Navigate to pickup.",
                event.trip_id()
            ),
            TripEventType::Started => "Trip started. Drive safely.".to_owned(),
            TripEventType::Completed => {
                format!("Trip completed. Earnings: {}", dollars(event.fare()))
            }
            TripEventType::Cancelled => "Trip was cancelled.".to_owned(),
        };
        Some(format!("DRIVER APP ({}): {body}", self.driver_name))
    }
}

impl TripObserver for DriverNotifier {
    fn on_trip_event(&self, event: &TripEvent) -> anyhow::Result<()> {
        if let Some(message) = self.message_for(event) {
            tracing::info!(target: "rideshare::driver_app", "{message}");
        }
        Ok(())
    }
}

/// Keeps the CBOR encoding of each event it sees, keyed by its sha256 digest.
#[derive(Debug, Default)]
pub struct EventJournal {
    entries: RefCell<Vec<(String, Vec<u8>)>>,
}

impl EventJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn digests(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .map(|(hash, _)| hash.clone())
            .collect()
    }

    /// Decode every recorded event, verifying each digest on the way.
    pub fn events(&self) -> anyhow::Result<Vec<TripEvent>> {
        self.entries
            .borrow()
            .iter()
            .map(|(hash, cbor)| {
                if sha256::digest(cbor.as_slice()) != *hash {
                    anyhow::bail!("journal entry {hash} does not match its contents");
                }
                TripEvent::decode(cbor)
            })
            .collect()
    }
}

impl TripObserver for EventJournal {
    fn on_trip_event(&self, event: &TripEvent) -> anyhow::Result<()> {
        let entry = event.encode()?;
        self.entries.borrow_mut().push(entry);
        Ok(())
    }
}
