use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::mem;

use log::debug;

use crate::signal::Node;

/// Handle of a registered listener, used to unsubscribe it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SubscriptionId(u64);

type AddListener = Box<dyn FnMut(Node)>;

/// Event bus of a network.
///
/// Listeners are invoked synchronously, in registration order, right after a new
/// gate is appended and before the creating call returns.
///
/// While listeners run, they are moved out of the bus (see [`Events::dispatch_add`]),
/// so a listener may subscribe and unsubscribe listeners, including itself.
/// Listeners subscribed during a dispatch are first called on the next event.
#[derive(Default)]
pub struct Events {
    on_add: Vec<(SubscriptionId, AddListener)>,
    // Listeners currently moved out for a dispatch.
    in_flight: Vec<SubscriptionId>,
    next_id: u64,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_add<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(Node) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.on_add.push((id, Box::new(listener)));
        debug!("subscribed add listener {:?}", id);
        id
    }

    /// Remove the listener registered under `id`.
    ///
    /// Returns `false` if no such listener exists (e.g. it was already removed).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.on_add.len();
        self.on_add.retain(|(other, _)| *other != id);
        let mut removed = self.on_add.len() != before;
        if !removed {
            if let Some(pos) = self.in_flight.iter().position(|&other| other == id) {
                self.in_flight.remove(pos);
                removed = true;
            }
        }
        if removed {
            debug!("unsubscribed add listener {:?}", id);
        }
        removed
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.in_flight.contains(&id) || self.on_add.iter().any(|(other, _)| *other == id)
    }

    pub fn num_listeners(&self) -> usize {
        self.on_add.len() + self.in_flight.len()
    }

    fn begin_dispatch(&mut self) -> Vec<(SubscriptionId, AddListener)> {
        self.in_flight.extend(self.on_add.iter().map(|(id, _)| *id));
        mem::take(&mut self.on_add)
    }

    fn end_dispatch(&mut self, mut listeners: Vec<(SubscriptionId, AddListener)>) {
        listeners.retain(|(id, _)| self.in_flight.contains(id));
        self.in_flight.retain(|id| !listeners.iter().any(|(other, _)| other == id));
        listeners.append(&mut self.on_add);
        self.on_add = listeners;
    }

    /// Call every add listener of `events` with `node`.
    ///
    /// No borrow of `events` is held while a listener runs.
    pub fn dispatch_add(events: &RefCell<Events>, node: Node) {
        let mut listeners = events.borrow_mut().begin_dispatch();
        for (id, listener) in listeners.iter_mut() {
            // Unsubscribed by an earlier listener of this dispatch.
            if !events.borrow().is_subscribed(*id) {
                continue;
            }
            listener(node);
        }
        events.borrow_mut().end_dispatch(listeners);
    }
}

impl Debug for Events {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Events")
            .field("on_add", &self.on_add.iter().map(|(id, _)| *id).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_notify_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let events = RefCell::new(Events::new());

        let first = log.clone();
        events.borrow_mut().subscribe_add(move |n| first.borrow_mut().push(("first", n)));
        let second = log.clone();
        events.borrow_mut().subscribe_add(move |n| second.borrow_mut().push(("second", n)));

        Events::dispatch_add(&events, 3);
        assert_eq!(*log.borrow(), vec![("first", 3), ("second", 3)]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let events = RefCell::new(Events::new());

        let c = count.clone();
        let id = events.borrow_mut().subscribe_add(move |_| *c.borrow_mut() += 1);
        Events::dispatch_add(&events, 1);
        assert!(events.borrow_mut().unsubscribe(id));
        assert!(!events.borrow_mut().unsubscribe(id));
        Events::dispatch_add(&events, 2);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(events.borrow().num_listeners(), 0);
    }

    #[test]
    fn test_listeners_may_resubscribe_during_dispatch() {
        let events = Rc::new(RefCell::new(Events::new()));
        let log = Rc::new(RefCell::new(Vec::new()));

        // The first listener removes the second and registers a third.
        let second_id = Rc::new(RefCell::new(None));
        let (bus, id_cell, l) = (events.clone(), second_id.clone(), log.clone());
        let first = events.borrow_mut().subscribe_add(move |n| {
            l.borrow_mut().push(("first", n));
            if let Some(id) = id_cell.borrow_mut().take() {
                assert!(bus.borrow_mut().unsubscribe(id));
                let l = l.clone();
                bus.borrow_mut().subscribe_add(move |n| l.borrow_mut().push(("third", n)));
            }
        });
        let l = log.clone();
        let second = events.borrow_mut().subscribe_add(move |n| l.borrow_mut().push(("second", n)));
        *second_id.borrow_mut() = Some(second);

        Events::dispatch_add(&events, 1);
        assert_eq!(*log.borrow(), vec![("first", 1)]);
        assert!(!events.borrow().is_subscribed(second));
        assert_eq!(events.borrow().num_listeners(), 2);

        Events::dispatch_add(&events, 2);
        assert_eq!(*log.borrow(), vec![("first", 1), ("first", 2), ("third", 2)]);

        assert!(events.borrow_mut().unsubscribe(first));
        assert_eq!(events.borrow().num_listeners(), 1);
    }

    #[test]
    fn test_listener_unsubscribes_itself() {
        let events = Rc::new(RefCell::new(Events::new()));
        let count = Rc::new(RefCell::new(0));
        let own_id = Rc::new(RefCell::new(None));

        let (bus, id_cell, c) = (events.clone(), own_id.clone(), count.clone());
        let id = events.borrow_mut().subscribe_add(move |_| {
            *c.borrow_mut() += 1;
            if let Some(id) = *id_cell.borrow() {
                assert!(bus.borrow_mut().unsubscribe(id));
            }
        });
        *own_id.borrow_mut() = Some(id);

        Events::dispatch_add(&events, 1);
        Events::dispatch_add(&events, 2);
        assert_eq!(*count.borrow(), 1);
        assert_eq!(events.borrow().num_listeners(), 0);
    }
}
