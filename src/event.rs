//! Trip lifecycle events handed to observers
use std::fmt;

use chrono::Utc;

use crate::types::{TimeStamp, TripId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub enum TripEventType {
    #[n(0)]
    Requested,
    #[n(1)]
    Accepted,
    #[n(2)]
    Started,
    #[n(3)]
    Completed,
    #[n(4)]
    Cancelled,
}

impl fmt::Display for TripEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Requested => "REQUESTED",
            Self::Accepted => "ACCEPTED",
            Self::Started => "STARTED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        };
        f.write_str(label)
    }
}

/// One lifecycle transition. Built fresh per transition, never stored by the trip.
#[derive(Debug, Clone, PartialEq, minicbor::Encode, minicbor::Decode)]
pub struct TripEvent {
    #[n(0)]
    trip_id: String, // bech32 form of the TripId
    #[n(1)]
    event_type: TripEventType,
    #[n(2)]
    timestamp: TimeStamp<Utc>,
    #[n(3)]
    rider_name: String,
    #[n(4)]
    driver_name: Option<String>,
    #[n(5)]
    fare: Option<f64>, // only set on Completed
}

impl TripEvent {
    pub(crate) fn new(
        trip_id: &TripId,
        event_type: TripEventType,
        rider_name: &str,
        driver_name: Option<&str>,
        fare: Option<f64>,
    ) -> Self {
        Self {
            trip_id: trip_id.to_string(),
            event_type,
            timestamp: TimeStamp::new(),
            rider_name: rider_name.to_owned(),
            driver_name: driver_name.map(str::to_owned),
            fare,
        }
    }

    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }
    pub fn event_type(&self) -> TripEventType {
        self.event_type
    }
    pub fn timestamp(&self) -> &TimeStamp<Utc> {
        &self.timestamp
    }
    pub fn rider_name(&self) -> &str {
        &self.rider_name
    }
    pub fn driver_name(&self) -> Option<&str> {
        self.driver_name.as_deref()
    }
    pub fn fare(&self) -> Option<f64> {
        self.fare
    }

    /// Serialise to CBOR, returning the sha256 digest of the encoding alongside it.
    pub fn encode(&self) -> anyhow::Result<(String, Vec<u8>)> {
        let cbor = minicbor::to_vec(self)?;
        let hash = sha256::digest(cbor.as_slice());

        Ok((hash, cbor))
    }

    pub fn decode(bytes: &[u8]) -> anyhow::Result<Self> {
        Ok(minicbor::decode(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_event_survives_encoding() {
        let id = TripId::new();
        let event = TripEvent::new(&id, TripEventType::Completed, "Riley", Some("D1"), Some(20.0));

        let (hash, cbor) = event.encode().unwrap();
        assert_eq!(hash, sha256::digest(cbor.as_slice()));

        let decoded = TripEvent::decode(&cbor).unwrap();
        assert_eq!(decoded, event);
        assert_eq!(decoded.trip_id(), id.to_string());
        assert_eq!(decoded.fare(), Some(20.0));
    }

    #[test]
    fn requested_event_has_no_driver_or_fare() {
        let event = TripEvent::new(&TripId::new(), TripEventType::Requested, "Riley", None, None);
        assert!(event.driver_name().is_none());
        assert!(event.fare().is_none());
    }
}
