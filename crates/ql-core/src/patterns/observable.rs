//! Observer / Observable pattern (translates `ql/patterns/observable.hpp`).
//!
//! QuantLib's core notification mechanism, expressed as an explicit
//! publish/subscribe registry:
//! * An **Observable** keeps a registry of subscribers and calls
//!   `notify()` whenever its state changes.
//! * Each subscribed **Observer** reacts synchronously in `on_changed()`,
//!   before the mutating call on the observable returns.
//!
//! The model is single-threaded: subscribers are held as `std::rc::Weak`
//! references so that an observable never keeps its dependents alive, and the
//! registry uses `RefCell` so that subscription and notification work through
//! `&self` references (matching QuantLib's shared-pointer usage).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// An object that can notify interested parties when it changes.
pub trait Observable {
    /// Register an observer to receive future change notifications.
    fn subscribe(&self, observer: Weak<dyn Observer>);

    /// Remove a previously registered observer.
    fn unsubscribe(&self, observer: &Weak<dyn Observer>);

    /// Notify all currently registered observers that this object has changed.
    fn notify(&self);
}

/// An object that reacts to changes in the [`Observable`]s it subscribed to.
pub trait Observer {
    /// Called by every observable this observer is subscribed to when that
    /// observable changes state.
    fn on_changed(&self);
}

/// Subscriber registry that can be embedded in any type to provide the
/// standard [`Observable`] behaviour (equivalent to `Observable::Impl` in
/// QuantLib).
#[derive(Default)]
pub struct ObservableImpl {
    observers: RefCell<Vec<Weak<dyn Observer>>>,
}

impl ObservableImpl {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer.  Registering the same observer twice is a no-op.
    pub fn subscribe(&self, observer: Weak<dyn Observer>) {
        let mut observers = self.observers.borrow_mut();
        if !observers.iter().any(|o| Weak::ptr_eq(o, &observer)) {
            observers.push(observer);
        }
    }

    /// Remove an observer (by pointer equality of the `Weak`).
    pub fn unsubscribe(&self, observer: &Weak<dyn Observer>) {
        self.observers
            .borrow_mut()
            .retain(|o| !Weak::ptr_eq(o, observer));
    }

    /// Notify all live observers, removing dead `Weak` references as we go.
    ///
    /// Observers are called outside the registry borrow, so an observer may
    /// subscribe or unsubscribe from within `on_changed`.
    pub fn notify(&self) {
        let observers: Vec<Rc<dyn Observer>> = {
            let mut registry = self.observers.borrow_mut();
            registry.retain(|w| w.strong_count() > 0);
            registry.iter().filter_map(Weak::upgrade).collect()
        };
        for obs in observers {
            obs.on_changed();
        }
    }

    /// Number of live subscribers.
    pub fn observer_count(&self) -> usize {
        self.observers
            .borrow()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }
}

impl std::fmt::Debug for ObservableImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableImpl")
            .field("observers", &self.observer_count())
            .finish()
    }
}

impl Observable for ObservableImpl {
    fn subscribe(&self, observer: Weak<dyn Observer>) {
        ObservableImpl::subscribe(self, observer);
    }

    fn unsubscribe(&self, observer: &Weak<dyn Observer>) {
        ObservableImpl::unsubscribe(self, observer);
    }

    fn notify(&self) {
        ObservableImpl::notify(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingObserver {
        count: Cell<u32>,
    }

    impl Observer for CountingObserver {
        fn on_changed(&self) {
            self.count.set(self.count.get() + 1);
        }
    }

    fn weak(obs: &Rc<CountingObserver>) -> Weak<dyn Observer> {
        Rc::downgrade(obs) as Weak<dyn Observer>
    }

    #[test]
    fn subscribe_and_notify() {
        let obs = Rc::new(CountingObserver::default());
        let observable = ObservableImpl::new();
        observable.subscribe(weak(&obs));
        observable.notify();
        assert_eq!(obs.count.get(), 1);
        observable.notify();
        assert_eq!(obs.count.get(), 2);
    }

    #[test]
    fn duplicate_subscription_notifies_once() {
        let obs = Rc::new(CountingObserver::default());
        let observable = ObservableImpl::new();
        observable.subscribe(weak(&obs));
        observable.subscribe(weak(&obs));
        observable.notify();
        assert_eq!(obs.count.get(), 1);
        assert_eq!(observable.observer_count(), 1);
    }

    #[test]
    fn dead_observer_pruned() {
        let observable = ObservableImpl::new();
        {
            let obs = Rc::new(CountingObserver::default());
            observable.subscribe(weak(&obs));
        }
        // obs dropped — notify should prune it
        observable.notify();
        assert_eq!(observable.observers.borrow().len(), 0);
    }

    #[test]
    fn unsubscribe() {
        let obs = Rc::new(CountingObserver::default());
        let observable = ObservableImpl::new();
        observable.subscribe(weak(&obs));
        observable.unsubscribe(&weak(&obs));
        observable.notify();
        assert_eq!(obs.count.get(), 0);
    }

    struct Chained {
        downstream: ObservableImpl,
    }

    impl Observer for Chained {
        fn on_changed(&self) {
            self.downstream.notify();
        }
    }

    #[test]
    fn notifications_propagate_synchronously() {
        let leaf = Rc::new(CountingObserver::default());
        let middle = Rc::new(Chained {
            downstream: ObservableImpl::new(),
        });
        middle.downstream.subscribe(weak(&leaf));

        let source = ObservableImpl::new();
        source.subscribe(Rc::downgrade(&middle) as Weak<dyn Observer>);
        source.notify();
        assert_eq!(leaf.count.get(), 1);
    }
}
