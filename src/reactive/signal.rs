use std::sync::{Arc, RwLock};

use super::runtime::{self, SignalId};
use crate::frame::request_frame;

struct SignalInner<T> {
    id: SignalId,
    value: RwLock<T>,
}

/// A reactive cell holding one value.
///
/// Signals are the only mutation channel between the state core and the
/// rendering surface: the animation engine writes target properties through
/// them, the surface reads them when it repaints. When a signal's value
/// changes, effects that read it during their last run are re-run and a
/// frame is requested.
///
/// Cloning a signal clones the handle, not the value; all clones share the
/// same cell.
#[derive(Clone)]
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(SignalInner {
                id: runtime::allocate_signal(),
                value: RwLock::new(value),
            }),
        }
    }
}

impl<T: Clone> Signal<T> {
    pub fn get(&self) -> T {
        runtime::track_read(self.inner.id);
        self.inner
            .value
            .read()
            .expect("signal lock poisoned")
            .clone()
    }

    pub fn get_untracked(&self) -> T {
        self.inner
            .value
            .read()
            .expect("signal lock poisoned")
            .clone()
    }
}

impl<T: PartialEq> Signal<T> {
    /// Sets the signal's value, only triggering updates if the value actually changed.
    pub fn set(&self, value: T) {
        let Ok(mut guard) = self.inner.value.write() else {
            log::warn!("signal lock poisoned, skipping write");
            return;
        };
        if *guard != value {
            *guard = value;
            drop(guard);
            runtime::notify_write(self.inner.id);
            request_frame();
        }
    }
}

impl<T: PartialEq + Clone> Signal<T> {
    /// Updates the signal's value using a closure, only triggering updates if the value changed.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let Ok(mut guard) = self.inner.value.write() else {
            log::warn!("signal lock poisoned, skipping update");
            return;
        };
        let old_value = guard.clone();
        f(&mut *guard);
        if *guard != old_value {
            drop(guard);
            runtime::notify_write(self.inner.id);
            request_frame();
        }
    }
}

impl<T> Signal<T> {
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        runtime::track_read(self.inner.id);
        f(&self.inner.value.read().expect("signal lock poisoned"))
    }

    pub fn with_untracked<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.inner.value.read().expect("signal lock poisoned"))
    }
}

pub fn create_signal<T>(value: T) -> Signal<T> {
    Signal::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_signal_and_get() {
        let signal = create_signal(42);
        assert_eq!(signal.get(), 42);
    }

    #[test]
    fn test_set_updates_value() {
        let signal = create_signal(10);
        signal.set(20);
        assert_eq!(signal.get(), 20);
    }

    #[test]
    fn test_update_with_closure() {
        let signal = create_signal(5);
        signal.update(|v| *v += 10);
        assert_eq!(signal.get(), 15);
    }

    #[test]
    fn test_with_for_borrowing() {
        let signal = create_signal(String::from("hello"));
        let length = signal.with(|s| s.len());
        assert_eq!(length, 5);
    }

    #[test]
    fn test_clone_shares_underlying_value() {
        let signal1 = create_signal(50);
        let signal2 = signal1.clone();

        signal1.set(75);
        assert_eq!(signal2.get(), 75);

        signal2.set(100);
        assert_eq!(signal1.get(), 100);
    }

    #[test]
    fn test_set_only_triggers_on_change() {
        let signal = create_signal(5);
        signal.set(5); // No actual change
        assert_eq!(signal.get(), 5);
        signal.set(10); // Actual change
        assert_eq!(signal.get(), 10);
    }
}
