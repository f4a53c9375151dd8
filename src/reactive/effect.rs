use super::signal::{Signal, Subscription};

/// Run `f` with the signal's current value immediately, then again on every
/// change, until the returned [`Subscription`] is dropped.
pub fn watch<T, F>(signal: &Signal<T>, f: F) -> Subscription
where
    T: Clone + Send + Sync + 'static,
    F: Fn(&T) + Send + Sync + 'static,
{
    signal.with(|value| f(value));
    signal.subscribe(f)
}
