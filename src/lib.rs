//! Ride-hailing trip lifecycle with swappable fare strategies and synchronous
//! event notification.

pub mod builder;
pub mod config;
pub mod error;
pub mod event;
pub mod fare;
pub mod observer;
pub mod observers;
pub mod trip;
pub mod types;
pub mod utils;

pub use builder::TripBuilder;
pub use error::{ConfigError, TripError};
pub use event::{TripEvent, TripEventType};
pub use fare::{FareStrategy, SharedRideFare, StandardFare, SurgeFare};
pub use observer::{Subscribers, TripObserver};
pub use trip::Trip;
pub use types::{TimeStamp, TripId, TripStatus};
