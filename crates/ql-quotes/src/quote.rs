//! `Quote` trait and `SimpleQuote` implementation.
//!
//! Translates `ql/quote.hpp` and `ql/quotes/simplequote.hpp`.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use ql_core::{Observable, ObservableImpl, Observer, Real};

/// A market-observable value.
///
/// Corresponds to `QuantLib::Quote`.
pub trait Quote: Observable + std::fmt::Debug {
    /// Return the current value.
    ///
    /// Returns `None` if the quote is not currently valid / set.
    fn value(&self) -> Option<Real>;

    /// Return `true` if the quote is currently valid.
    fn is_valid(&self) -> bool {
        self.value().is_some()
    }
}

/// Shared reference to a quote, as held by dependent curves and surfaces.
pub type QuoteHandle = Rc<dyn Quote>;

/// A simple, mutable market quote.
///
/// Corresponds to `QuantLib::SimpleQuote`.
#[derive(Debug, Default)]
pub struct SimpleQuote {
    value: Cell<Option<Real>>,
    observable: ObservableImpl,
}

impl SimpleQuote {
    /// Create a new quote with the given value.
    pub fn new(value: Real) -> Self {
        Self {
            value: Cell::new(Some(value)),
            observable: ObservableImpl::new(),
        }
    }

    /// Create an empty (invalid) quote.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set a new value, notifying observers if it differs from the current
    /// one.  Returns the difference between the new and the old value (zero
    /// when the quote was empty).
    pub fn set_value(&self, value: Real) -> Real {
        let old = self.value.get();
        let diff = old.map_or(0.0, |o| value - o);
        if old != Some(value) {
            self.value.set(Some(value));
            tracing::trace!(value, "quote changed");
            self.observable.notify();
        }
        diff
    }

    /// Clear the value, making the quote invalid, and notify observers.
    pub fn reset(&self) {
        self.value.set(None);
        tracing::trace!("quote reset");
        self.observable.notify();
    }
}

impl Observable for SimpleQuote {
    fn subscribe(&self, observer: Weak<dyn Observer>) {
        self.observable.subscribe(observer);
    }

    fn unsubscribe(&self, observer: &Weak<dyn Observer>) {
        self.observable.unsubscribe(observer);
    }

    fn notify(&self) {
        self.observable.notify();
    }
}

impl Quote for SimpleQuote {
    fn value(&self) -> Option<Real> {
        self.value.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        hits: Cell<u32>,
    }

    impl Observer for Counter {
        fn on_changed(&self) {
            self.hits.set(self.hits.get() + 1);
        }
    }

    #[test]
    fn simple_quote() {
        let q = SimpleQuote::new(1.05);
        assert!(q.is_valid());
        assert_eq!(q.value(), Some(1.05));
    }

    #[test]
    fn empty_quote() {
        let q = SimpleQuote::empty();
        assert!(!q.is_valid());
        assert_eq!(q.value(), None);
    }

    #[test]
    fn set_value_notifies_only_on_change() {
        let q = SimpleQuote::new(0.25);
        let counter = Rc::new(Counter::default());
        q.subscribe(Rc::downgrade(&counter) as Weak<dyn Observer>);

        assert_eq!(q.set_value(0.25), 0.0);
        assert_eq!(counter.hits.get(), 0);

        let diff = q.set_value(0.5);
        assert!((diff - 0.25).abs() < 1e-15);
        assert_eq!(counter.hits.get(), 1);
        assert_eq!(q.value(), Some(0.5));
    }

    #[test]
    fn reset_invalidates_and_notifies() {
        let q = SimpleQuote::new(0.3);
        let counter = Rc::new(Counter::default());
        q.subscribe(Rc::downgrade(&counter) as Weak<dyn Observer>);
        q.reset();
        assert!(!q.is_valid());
        assert_eq!(counter.hits.get(), 1);
        // setting a value on an empty quote reports no difference
        assert_eq!(q.set_value(0.4), 0.0);
        assert_eq!(counter.hits.get(), 2);
    }

    #[test]
    fn handle_is_shared() {
        let q = Rc::new(SimpleQuote::new(1.0));
        let handle: QuoteHandle = q.clone();
        q.set_value(2.0);
        assert_eq!(handle.value(), Some(2.0));
    }
}
