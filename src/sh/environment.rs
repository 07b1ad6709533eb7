use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, warn};

use super::{ShCoefficients, DEFAULT_COEFFICIENTS, SH_COEFFICIENT_COUNT};
use crate::error::{ShError, ShResult};

/// Receives a push after every accepted coefficient change.
///
/// Implementors should only record that new coefficients exist; the values
/// themselves are read from the environment when the next frame is shaded.
pub trait Refresh {
    fn refresh(&self);
}

/// The single shared SH light environment of a session.
///
/// Single-threaded by construction (`Rc`/`Cell`). The session owns it behind
/// an `Rc`; shading instances hold clones and register themselves as weak
/// subscribers so that dropping an instance never leaks through the list.
pub struct ShEnvironment {
    coefficients: Cell<ShCoefficients>,
    generation: Cell<u64>,
    subscribers: RefCell<Vec<Weak<dyn Refresh>>>,
}

impl ShEnvironment {
    pub fn new(coefficients: ShCoefficients) -> Self {
        Self {
            coefficients: Cell::new(coefficients),
            generation: Cell::new(0),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Snapshot of all nine coefficients.
    pub fn get(&self) -> ShCoefficients {
        self.coefficients.get()
    }

    /// Number of successful `set` calls so far.
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Replace one coefficient and notify every live subscriber.
    ///
    /// Out-of-range indices and non-finite values are rejected with the prior
    /// state intact and no notification sent.
    pub fn set(&self, index: usize, value: f32) -> ShResult<()> {
        if index >= SH_COEFFICIENT_COUNT {
            warn!("rejected coefficient write at index {}", index);
            return Err(ShError::IndexOutOfRange { index });
        }
        if !value.is_finite() {
            warn!("rejected non-finite value {} for coefficient {}", value, index);
            return Err(ShError::InvalidValue { index, value });
        }

        let mut coefficients = self.coefficients.get();
        coefficients[index] = value;
        self.coefficients.set(coefficients);
        self.generation.set(self.generation.get() + 1);
        debug!("coefficient {} = {}", index, value);

        self.broadcast();
        Ok(())
    }

    pub fn subscribe(&self, subscriber: Weak<dyn Refresh>) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|s| s.strong_count() > 0);
        subscribers.push(subscriber);
    }

    /// Subscribers that are still alive.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .borrow()
            .iter()
            .filter(|s| s.strong_count() > 0)
            .count()
    }

    fn broadcast(&self) {
        // Upgrade first and release the borrow, so a subscriber may subscribe
        // or read the environment from inside `refresh`.
        let live: Vec<Rc<dyn Refresh>> = {
            let mut subscribers = self.subscribers.borrow_mut();
            subscribers.retain(|s| s.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        for subscriber in &live {
            subscriber.refresh();
        }
    }
}

impl Default for ShEnvironment {
    fn default() -> Self {
        Self::new(DEFAULT_COEFFICIENTS)
    }
}

impl fmt::Debug for ShEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShEnvironment")
            .field("coefficients", &self.get())
            .field("generation", &self.generation())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(Cell<u32>);

    impl Refresh for Counter {
        fn refresh(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn counter() -> Rc<Counter> {
        Rc::new(Counter(Cell::new(0)))
    }

    #[test]
    fn test_default_vector() {
        assert_eq!(ShEnvironment::default().get(), DEFAULT_COEFFICIENTS);
    }

    #[test]
    fn test_set_notifies_once_per_accepted_write() {
        let env = ShEnvironment::default();
        let c = counter();
        let weak: Weak<dyn Refresh> = Rc::downgrade(&c) as Weak<dyn Refresh>;
        env.subscribe(weak);

        env.set(0, 2.0).unwrap();
        env.set(4, -0.5).unwrap();
        assert_eq!(c.0.get(), 2);
        assert_eq!(env.generation(), 2);

        assert!(env.set(9, 1.0).is_err());
        assert!(env.set(1, f32::NAN).is_err());
        assert_eq!(c.0.get(), 2);
        assert_eq!(env.generation(), 2);
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let env = ShEnvironment::default();
        let kept = counter();
        {
            let dropped = counter();
            env.subscribe(Rc::downgrade(&dropped) as Weak<dyn Refresh>);
            env.subscribe(Rc::downgrade(&kept) as Weak<dyn Refresh>);
            assert_eq!(env.subscriber_count(), 2);
        }
        assert_eq!(env.subscriber_count(), 1);

        env.set(2, 0.0).unwrap();
        assert_eq!(kept.0.get(), 1);
        assert_eq!(env.subscribers.borrow().len(), 1);
    }

    #[test]
    fn test_subscribe_prunes_without_a_write() {
        let env = ShEnvironment::default();
        for _ in 0..100 {
            let transient = counter();
            env.subscribe(Rc::downgrade(&transient) as Weak<dyn Refresh>);
        }
        assert_eq!(env.generation(), 0);
        assert!(env.subscribers.borrow().len() <= 1);
        assert_eq!(env.subscriber_count(), 0);
    }

    #[test]
    fn test_errors_carry_context() {
        let env = ShEnvironment::default();
        assert_eq!(env.set(12, 0.0), Err(ShError::IndexOutOfRange { index: 12 }));
        match env.set(3, f32::INFINITY) {
            Err(ShError::InvalidValue { index, value }) => {
                assert_eq!(index, 3);
                assert!(value.is_infinite());
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
