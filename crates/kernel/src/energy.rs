use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::config::DEFAULT_ENERGY_LEVEL;

/// Handle returned by [`EnergyState::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Subscriber = Rc<dyn Fn(f32)>;

struct Inner {
    level: Cell<f32>,
    next_id: Cell<u64>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber)>>,
}

/// The shared energy register.
///
/// One scalar with a setter and a synchronous one-to-many fan-out. Cloning
/// the handle shares the register, which is how the overlay (writer) and the
/// reactor (reader) see the same value. The handle is `Rc`-backed and so
/// `!Send`: the register lives on the frame/event thread only.
///
/// The setter does not clamp. Values outside `[0, 100]` flow straight into
/// color interpolation and speed.
#[derive(Clone)]
pub struct EnergyState {
    inner: Rc<Inner>,
}

impl EnergyState {
    pub fn new(initial: f32) -> Self {
        Self {
            inner: Rc::new(Inner {
                level: Cell::new(initial),
                next_id: Cell::new(0),
                subscribers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Most recently written level.
    pub fn get(&self) -> f32 {
        self.inner.level.get()
    }

    /// Overwrite the level and notify every subscriber, in subscription
    /// order, before returning.
    ///
    /// Callbacks see the subscriber list as it was when `set` was called:
    /// one that subscribes or unsubscribes from inside a callback takes
    /// effect from the next `set`.
    pub fn set(&self, level: f32) {
        if !level.is_finite() {
            tracing::warn!(level, "non-finite energy level written");
        }
        self.inner.level.set(level);
        tracing::debug!(level, "energy level set");

        let snapshot: Vec<Subscriber> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, notify)| Rc::clone(notify))
            .collect();
        for notify in snapshot {
            notify(level);
        }
    }

    /// Register a callback invoked with the new level on every `set`.
    pub fn subscribe(&self, callback: impl Fn(f32) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(callback)));
        id
    }

    /// Remove a subscriber. Returns false if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.inner.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// True if both handles refer to the same register.
    pub fn shares_register_with(&self, other: &EnergyState) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for EnergyState {
    fn default() -> Self {
        Self::new(DEFAULT_ENERGY_LEVEL)
    }
}

impl fmt::Debug for EnergyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnergyState")
            .field("level", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_fifty() {
        assert_eq!(EnergyState::default().get(), 50.0);
    }

    #[test]
    fn get_returns_last_write_for_all_levels() {
        let state = EnergyState::default();
        for level in 0..=100 {
            state.set(level as f32);
            assert_eq!(state.get(), level as f32);
        }
    }

    #[test]
    fn setter_does_not_clamp() {
        let state = EnergyState::default();
        state.set(120.0);
        assert_eq!(state.get(), 120.0);
        state.set(-15.0);
        assert_eq!(state.get(), -15.0);
    }

    #[test]
    fn clones_share_the_register() {
        let writer = EnergyState::default();
        let reader = writer.clone();
        writer.set(73.0);
        assert_eq!(reader.get(), 73.0);
        assert!(reader.shares_register_with(&writer));
        assert!(!reader.shares_register_with(&EnergyState::default()));
    }

    #[test]
    fn subscribers_notified_synchronously_in_order() {
        let state = EnergyState::default();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let s1 = seen.clone();
        state.subscribe(move |level| s1.borrow_mut().push(("first", level)));
        let s2 = seen.clone();
        state.subscribe(move |level| s2.borrow_mut().push(("second", level)));

        state.set(10.0);
        assert_eq!(
            *seen.borrow(),
            vec![("first", 10.0), ("second", 10.0)]
        );
    }

    #[test]
    fn subscriber_sees_new_value_through_handle() {
        let state = EnergyState::default();
        let observed = Rc::new(Cell::new(0.0));
        let handle = state.clone();
        let out = observed.clone();
        state.subscribe(move |_| out.set(handle.get()));
        state.set(42.0);
        assert_eq!(observed.get(), 42.0);
    }

    #[test]
    fn one_shot_subscriber_can_unsubscribe_itself() {
        let state = EnergyState::default();
        let count = Rc::new(Cell::new(0));
        let own_id = Rc::new(Cell::new(None));

        let handle = state.clone();
        let c = count.clone();
        let slot = own_id.clone();
        let id = state.subscribe(move |_| {
            c.set(c.get() + 1);
            if let Some(id) = slot.get() {
                handle.unsubscribe(id);
            }
        });
        own_id.set(Some(id));

        let later = Rc::new(Cell::new(0.0));
        let l = later.clone();
        state.subscribe(move |level| l.set(level));

        state.set(5.0);
        state.set(6.0);
        assert_eq!(count.get(), 1);
        assert_eq!(later.get(), 6.0);
        assert_eq!(state.subscriber_count(), 1);
    }

    #[test]
    fn subscribing_inside_a_callback_applies_from_next_set() {
        let state = EnergyState::default();
        let seen = Rc::new(Cell::new(0));
        let handle = state.clone();
        let s = seen.clone();
        state.subscribe(move |_| {
            let inner = s.clone();
            handle.subscribe(move |_| inner.set(inner.get() + 1));
        });

        state.set(1.0);
        assert_eq!(seen.get(), 0);
        state.set(2.0);
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let state = EnergyState::default();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let id = state.subscribe(move |_| c.set(c.get() + 1));

        state.set(1.0);
        assert!(state.unsubscribe(id));
        state.set(2.0);
        assert_eq!(count.get(), 1);
        assert!(!state.unsubscribe(id));
        assert_eq!(state.subscriber_count(), 0);
    }
}
