//! Event subscription: [`EventBus`], [`Subscription`] and [`Listener`].
//!
//! Every menu session subscribes to its host's bus independently and holds
//! the returned [`Subscription`]; dropping the handle unsubscribes. Dispatch
//! iterates a snapshot of the listener table, so a handler may unsubscribe
//! itself or register new listeners while an event is in flight.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::events::Event;

/// A bus listener, invoked for every dispatched event.
pub type Listener = Rc<dyn Fn(&mut Event)>;

#[derive(Default)]
struct BusState {
    listeners: Vec<(u64, Listener)>,
    next_id: u64,
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Single-threaded event fan-out with explicit registration handles.
#[derive(Clone, Default)]
pub struct EventBus {
    state: Rc<RefCell<BusState>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`. It stays registered for as long as the returned
    /// handle lives.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.push((id, listener));
        Subscription {
            id,
            bus: Rc::downgrade(&self.state),
        }
    }

    /// Deliver `event` to every registered listener, in subscription order.
    ///
    /// Listeners unsubscribed mid-dispatch are skipped; listeners subscribed
    /// mid-dispatch do not see the in-flight event.
    pub fn dispatch(&self, event: &mut Event) {
        let snapshot: Vec<(u64, Listener)> = self.state.borrow().listeners.clone();
        for (id, listener) in snapshot {
            let live = self.state.borrow().listeners.iter().any(|(l, _)| *l == id);
            if live {
                listener(event);
            }
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus").field("listeners", &self.len()).finish()
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// Registration handle returned by [`EventBus::subscribe`].
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    bus: Weak<RefCell<BusState>>,
}

impl Subscription {
    /// Unregister the listener now. Equivalent to dropping the handle.
    pub fn release(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.bus.upgrade() {
            state.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owner::OwnerId;
    use std::cell::Cell;

    fn quit(owner: u64) -> Event {
        Event::Quit {
            owner: OwnerId::new(owner),
        }
    }

    #[test]
    fn subscribe_and_release() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));

        let counter = Rc::clone(&hits);
        let sub = bus.subscribe(Rc::new(move |_| counter.set(counter.get() + 1)));
        assert_eq!(bus.len(), 1);

        bus.dispatch(&mut quit(1));
        assert_eq!(hits.get(), 1);

        sub.release();
        assert!(bus.is_empty());
        bus.dispatch(&mut quit(1));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn drop_unsubscribes() {
        let bus = EventBus::new();
        {
            let _sub = bus.subscribe(Rc::new(|_| {}));
            assert_eq!(bus.len(), 1);
        }
        assert!(bus.is_empty());
    }

    #[test]
    fn unsubscribed_mid_dispatch_is_skipped() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let second: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        // First listener releases the second one while the event is in
        // flight; the second must not run.
        let victim = Rc::clone(&second);
        let _first = bus.subscribe(Rc::new(move |_| {
            if let Some(sub) = victim.borrow_mut().take() {
                sub.release();
            }
        }));
        let counter = Rc::clone(&hits);
        *second.borrow_mut() = Some(bus.subscribe(Rc::new(move |_| counter.set(counter.get() + 1))));

        bus.dispatch(&mut quit(1));
        assert_eq!(hits.get(), 0);
        assert_eq!(bus.len(), 1);
    }

    #[test]
    fn subscribed_mid_dispatch_misses_inflight_event() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let late: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let inner_bus = bus.clone();
        let slot = Rc::clone(&late);
        let counter = Rc::clone(&hits);
        let _first = bus.subscribe(Rc::new(move |_| {
            if slot.borrow().is_none() {
                let counter = Rc::clone(&counter);
                *slot.borrow_mut() =
                    Some(inner_bus.subscribe(Rc::new(move |_| counter.set(counter.get() + 1))));
            }
        }));

        bus.dispatch(&mut quit(1));
        assert_eq!(hits.get(), 0);
        bus.dispatch(&mut quit(1));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn dispatch_order_follows_subscription_order() {
        let bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let a = Rc::clone(&order);
        let _s1 = bus.subscribe(Rc::new(move |_| a.borrow_mut().push(1)));
        let b = Rc::clone(&order);
        let _s2 = bus.subscribe(Rc::new(move |_| b.borrow_mut().push(2)));

        bus.dispatch(&mut quit(1));
        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn release_after_bus_dropped_is_harmless() {
        let bus = EventBus::new();
        let sub = bus.subscribe(Rc::new(|_| {}));
        drop(bus);
        sub.release();
    }
}
