use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct SignalInner<T> {
    value: RwLock<T>,
    subscribers: Mutex<Vec<(u64, Subscriber<T>)>>,
    next_subscriber_id: AtomicU64,
}

/// A reactive state cell that can be read and written from any thread.
///
/// Signals are the core primitive of the portal handshake. Unlike an implicit
/// dependency-tracking runtime, subscriptions are explicit: callers register a
/// callback with [`Signal::subscribe`] and hold the returned [`Subscription`]
/// for as long as they want notifications. Writes that do not change the value
/// (by `PartialEq`) notify nobody.
///
/// # Thread Safety
/// Values can be read and written from any thread. Subscribers run on the
/// writing thread, after the value lock has been released.
#[derive(Clone)]
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(SignalInner {
                value: RwLock::new(value),
                subscribers: Mutex::new(Vec::new()),
                next_subscriber_id: AtomicU64::new(1),
            }),
        }
    }

    pub fn split(self) -> (ReadSignal<T>, WriteSignal<T>) {
        (
            ReadSignal {
                inner: self.inner.clone(),
            },
            WriteSignal { inner: self.inner },
        )
    }

    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.inner.value.read().expect("signal lock poisoned"))
    }
}

impl<T: Clone> Signal<T> {
    pub fn get(&self) -> T {
        self.inner
            .value
            .read()
            .expect("signal lock poisoned")
            .clone()
    }
}

impl<T: Clone> Signal<T> {
    /// Sets the signal's value and notifies subscribers unconditionally, even
    /// when the new value compares equal to the old one.
    ///
    /// Used where a re-commit of an identical value must still restart
    /// downstream work.
    pub fn set_always(&self, value: T) {
        {
            let Ok(mut guard) = self.inner.value.write() else {
                return; // Lock poisoned, skip update silently
            };
            *guard = value.clone();
        }
        notify(&self.inner, &value);
    }
}

impl<T: Clone + PartialEq> Signal<T> {
    /// Sets the signal's value, notifying subscribers only if it actually changed.
    pub fn set(&self, value: T) {
        let changed = {
            let Ok(mut guard) = self.inner.value.write() else {
                return; // Lock poisoned, skip update silently
            };
            if *guard != value {
                *guard = value.clone();
                true
            } else {
                false
            }
        };
        if changed {
            notify(&self.inner, &value);
        }
    }

    /// Updates the signal's value using a closure, notifying only on change.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let new_value = {
            let Ok(mut guard) = self.inner.value.write() else {
                return; // Lock poisoned, skip update silently
            };
            let old_value = guard.clone();
            f(&mut guard);
            if *guard != old_value {
                Some(guard.clone())
            } else {
                None
            }
        };
        if let Some(value) = new_value {
            notify(&self.inner, &value);
        }
    }
}

impl<T: Send + Sync + 'static> Signal<T> {
    /// Register a callback invoked with the new value after every change.
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// dropped. Subscribing does not invoke the callback immediately; use
    /// [`crate::reactive::watch`] for run-now-and-on-change semantics.
    pub fn subscribe<F>(&self, f: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.inner.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .push((id, Arc::new(f)));

        let weak: Weak<SignalInner<T>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                if let Ok(mut subs) = inner.subscribers.lock() {
                    subs.retain(|(sub_id, _)| *sub_id != id);
                }
            }
        })
    }
}

fn notify<T>(inner: &Arc<SignalInner<T>>, value: &T) {
    // Snapshot the subscriber list so callbacks may subscribe/unsubscribe
    // without deadlocking.
    let subscribers: Vec<Subscriber<T>> = {
        let Ok(subs) = inner.subscribers.lock() else {
            return;
        };
        subs.iter().map(|(_, f)| f.clone()).collect()
    };
    for subscriber in subscribers {
        subscriber(value);
    }
}

/// Read-only handle to a signal.
#[derive(Clone)]
pub struct ReadSignal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T: Clone> ReadSignal<T> {
    pub fn get(&self) -> T {
        self.inner
            .value
            .read()
            .expect("signal lock poisoned")
            .clone()
    }
}

impl<T> ReadSignal<T> {
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.inner.value.read().expect("signal lock poisoned"))
    }
}

/// Write-only handle to a signal.
#[derive(Clone)]
pub struct WriteSignal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T: Clone + PartialEq> WriteSignal<T> {
    /// Sets the signal's value, notifying subscribers only if it actually changed.
    pub fn set(&self, value: T) {
        let changed = {
            let Ok(mut guard) = self.inner.value.write() else {
                return; // Lock poisoned, skip update silently
            };
            if *guard != value {
                *guard = value.clone();
                true
            } else {
                false
            }
        };
        if changed {
            notify(&self.inner, &value);
        }
    }
}

/// Guard for an active signal subscription.
///
/// Dropping it unregisters the callback.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub(crate) fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

pub fn create_signal<T>(value: T) -> Signal<T> {
    Signal::new(value)
}
