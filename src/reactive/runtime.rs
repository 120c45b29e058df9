//! Thread-local reactive graph: signals on one side, effects on the other.
//!
//! Reads inside a running effect are recorded as dependencies; writes mark
//! the subscribed effects pending and flush them. Dependencies are re-tracked
//! on every run, so conditional reads stay accurate.

use std::cell::RefCell;
use std::collections::HashSet;

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::default());
}

pub(crate) type SignalId = usize;
pub(crate) type EffectId = usize;

#[derive(Default)]
struct Runtime {
    current_effect: Option<EffectId>,
    pending: HashSet<EffectId>,
    callbacks: Vec<Option<Box<dyn FnMut()>>>,
    dependencies: Vec<HashSet<SignalId>>,
    subscribers: Vec<HashSet<EffectId>>,
    disposed: HashSet<EffectId>,
    next_signal: SignalId,
    flushing: bool,
}

fn with_runtime<F, R>(f: F) -> R
where
    F: FnOnce(&mut Runtime) -> R,
{
    RUNTIME.with(|rt| f(&mut rt.borrow_mut()))
}

pub(crate) fn allocate_signal() -> SignalId {
    with_runtime(|rt| {
        let id = rt.next_signal;
        rt.next_signal += 1;
        rt.subscribers.push(HashSet::new());
        id
    })
}

pub(crate) fn allocate_effect(callback: Box<dyn FnMut()>) -> EffectId {
    with_runtime(|rt| {
        let id = rt.callbacks.len();
        rt.callbacks.push(Some(callback));
        rt.dependencies.push(HashSet::new());
        id
    })
}

/// Record a signal read against the currently running effect, if any.
/// Signals created on another thread land in that thread's runtime; the
/// bounds check makes a cross-thread read a harmless untracked one.
pub(crate) fn track_read(signal_id: SignalId) {
    with_runtime(|rt| {
        if signal_id >= rt.subscribers.len() {
            return;
        }
        if let Some(effect_id) = rt.current_effect {
            rt.subscribers[signal_id].insert(effect_id);
            rt.dependencies[effect_id].insert(signal_id);
        }
    });
}

/// Mark the signal's subscribers pending and flush unless a flush is already
/// draining the queue higher up the stack.
pub(crate) fn notify_write(signal_id: SignalId) {
    let should_flush = with_runtime(|rt| {
        if signal_id >= rt.subscribers.len() {
            return false;
        }
        let subscribers: Vec<_> = rt.subscribers[signal_id].iter().copied().collect();
        rt.pending.extend(subscribers);
        if rt.flushing || rt.pending.is_empty() {
            false
        } else {
            rt.flushing = true;
            true
        }
    });
    if should_flush {
        flush_pending();
    }
}

fn flush_pending() {
    loop {
        let next = with_runtime(|rt| {
            let id = rt.pending.iter().next().copied();
            if let Some(id) = id {
                rt.pending.remove(&id);
            }
            id
        });
        match next {
            Some(id) => run_effect(id),
            None => break,
        }
    }
    with_runtime(|rt| rt.flushing = false);
}

/// Run one effect with dependency tracking.
///
/// The callback is taken out of the runtime and invoked without holding the
/// runtime borrow, so the effect body can freely read and write signals.
pub(crate) fn run_effect(effect_id: EffectId) {
    let taken = with_runtime(|rt| {
        if rt.disposed.contains(&effect_id) {
            return None;
        }
        let callback = rt.callbacks[effect_id].take()?;
        // Re-track from scratch each run
        let old_deps = std::mem::take(&mut rt.dependencies[effect_id]);
        for signal_id in old_deps {
            rt.subscribers[signal_id].remove(&effect_id);
        }
        let previous = rt.current_effect.replace(effect_id);
        Some((callback, previous))
    });

    let Some((mut callback, previous)) = taken else {
        return;
    };
    callback();

    with_runtime(|rt| {
        rt.current_effect = previous;
        if !rt.disposed.contains(&effect_id) {
            rt.callbacks[effect_id] = Some(callback);
        }
    });
}

pub(crate) fn dispose_effect(effect_id: EffectId) {
    with_runtime(|rt| {
        rt.disposed.insert(effect_id);
        rt.pending.remove(&effect_id);
        if effect_id < rt.callbacks.len() {
            rt.callbacks[effect_id] = None;
            let deps = std::mem::take(&mut rt.dependencies[effect_id]);
            for signal_id in deps {
                if signal_id < rt.subscribers.len() {
                    rt.subscribers[signal_id].remove(&effect_id);
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_effect_reruns_on_notified_write() {
        let signal_id = allocate_signal();
        let runs = Rc::new(Cell::new(0));
        let runs_inner = runs.clone();
        let effect_id = allocate_effect(Box::new(move || {
            track_read(signal_id);
            runs_inner.set(runs_inner.get() + 1);
        }));
        run_effect(effect_id);
        assert_eq!(runs.get(), 1);

        notify_write(signal_id);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_disposed_effect_stops_running() {
        let signal_id = allocate_signal();
        let runs = Rc::new(Cell::new(0));
        let runs_inner = runs.clone();
        let effect_id = allocate_effect(Box::new(move || {
            track_read(signal_id);
            runs_inner.set(runs_inner.get() + 1);
        }));
        run_effect(effect_id);
        dispose_effect(effect_id);
        notify_write(signal_id);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_untracked_signal_has_no_subscribers() {
        let signal_id = allocate_signal();
        // No effect running; read is untracked.
        track_read(signal_id);
        notify_write(signal_id); // must not panic or loop
    }
}
