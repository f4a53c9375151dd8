pub mod effect;
pub mod signal;

pub use effect::watch;
pub use signal::{create_signal, ReadSignal, Signal, Subscription, WriteSignal};
