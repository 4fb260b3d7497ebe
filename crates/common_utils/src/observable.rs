//! A value cell that pushes every change to its subscribers.
//!
//! Form items expose their mutable state (current input, title, optionality) through
//! [`Observable`] so the rendering layer and dependent components react to changes instead of
//! polling.

use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, PoisonError, RwLock,
    },
};

type Subscriber<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Observable::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubscriptionId(u64);

struct Inner<T> {
    value: RwLock<T>,
    subscribers: RwLock<Vec<(SubscriptionId, Subscriber<T>)>>,
    next_id: AtomicU64,
}

/// A shared value with synchronous change notification.
///
/// Clones share the same cell. Subscribers run on the thread calling [`Observable::set`], after
/// the new value is stored, and must not subscribe or unsubscribe on the same cell from inside
/// the callback.
pub struct Observable<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.inner.value.read().unwrap_or_else(PoisonError::into_inner);
        let subscribers = self
            .inner
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("Observable")
            .field("value", &*value)
            .field("subscribers", &subscribers)
            .finish()
    }
}

impl<T: Default + Clone + PartialEq> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + PartialEq> Observable<T> {
    /// Creates a cell holding `value` with no subscribers.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: RwLock::new(value),
                subscribers: RwLock::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.inner
            .value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stores `value` and notifies subscribers if it differs from the current one.
    ///
    /// Returns whether the value changed.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self
                .inner
                .value
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if *current == value {
                return false;
            }
            *current = value.clone();
        }

        let subscribers = self
            .inner
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        for (_, subscriber) in subscribers.iter() {
            subscriber(&value);
        }
        true
    }

    /// Registers `subscriber` to be called with every new value.
    pub fn subscribe<F>(&self, subscriber: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Box::new(subscriber)));
        id
    }

    /// Removes a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self
            .inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(subscription, _)| *subscription != id);
        subscribers.len() != before
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Mutex;

    use super::*;

    #[test]
    fn notifies_only_on_change() {
        let observable = Observable::new(String::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        observable.subscribe(move |value: &String| sink.lock().unwrap().push(value.clone()));

        assert!(observable.set("4111".to_string()));
        assert!(!observable.set("4111".to_string()));
        assert!(observable.set("41111".to_string()));

        assert_eq!(*seen.lock().unwrap(), vec!["4111", "41111"]);
        assert_eq!(observable.get(), "41111");
    }

    #[test]
    fn clones_share_the_cell() {
        let observable = Observable::new(false);
        let clone = observable.clone();
        let calls = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&calls);
        let id = clone.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        observable.set(true);
        assert!(clone.get());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(clone.unsubscribe(id));
        assert!(!clone.unsubscribe(id));
        observable.set(false);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
