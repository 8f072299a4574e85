//! Observer capability and the subscription list a trip dispatches through
use std::cell::RefCell;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use crate::event::TripEvent;

/// Receives trip lifecycle events. Returning `Err` only reports a failure; it
/// never reaches the trip or the other observers.
pub trait TripObserver {
    fn on_trip_event(&self, event: &TripEvent) -> anyhow::Result<()>;
}

impl<F> TripObserver for F
where
    F: Fn(&TripEvent),
{
    fn on_trip_event(&self, event: &TripEvent) -> anyhow::Result<()> {
        self(event);
        Ok(())
    }
}

/// Ordered subscription list. Clones share the same list, so an observer holding
/// a handle can subscribe or unsubscribe others while an event is in flight.
#[derive(Clone, Default)]
pub struct Subscribers {
    inner: Rc<RefCell<Vec<Rc<dyn TripObserver>>>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `observer`. The same observer may be subscribed more than once.
    pub fn add(&self, observer: Rc<dyn TripObserver>) {
        self.inner.borrow_mut().push(observer);
    }

    /// Removes the first subscription of `observer`, compared by identity.
    /// Returns false when it was not subscribed.
    pub fn remove<O: TripObserver + ?Sized>(&self, observer: &Rc<O>) -> bool {
        let mut observers = self.inner.borrow_mut();
        let position = observers
            .iter()
            .position(|existing| std::ptr::addr_eq(Rc::as_ptr(existing), Rc::as_ptr(observer)));

        match position {
            Some(index) => {
                observers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains<O: TripObserver + ?Sized>(&self, observer: &Rc<O>) -> bool {
        self.inner
            .borrow()
            .iter()
            .any(|existing| std::ptr::addr_eq(Rc::as_ptr(existing), Rc::as_ptr(observer)))
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Copy of the current list. Later changes to the subscriptions do not affect it.
    pub fn snapshot(&self) -> Vec<Rc<dyn TripObserver>> {
        self.inner.borrow().clone()
    }

    /// Deliver `event` to every observer subscribed when the call began, in
    /// subscription order. Failing or panicking observers are logged and skipped.
    /// Returns how many observers handled the event without failing.
    pub fn notify(&self, event: &TripEvent) -> usize {
        // the borrow is released before any callback runs
        let snapshot = self.snapshot();
        let mut delivered = 0;

        for (position, observer) in snapshot.iter().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| observer.on_trip_event(event))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(err)) => tracing::warn!(
                    trip_id = event.trip_id(),
                    event = %event.event_type(),
                    position,
                    error = %err,
                    "observer failed to handle trip event"
                ),
                Err(_) => tracing::warn!(
                    trip_id = event.trip_id(),
                    event = %event.event_type(),
                    position,
                    "observer panicked while handling trip event"
                ),
            }
        }

        delivered
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.len())
            .finish()
    }
}
