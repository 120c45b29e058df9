//! Frame scheduling: the binding between the host's render clock and the
//! animation engine.
//!
//! The crate never owns an event loop. The host render loop polls
//! [`take_frame_request`] to decide whether to repaint, and calls [`tick`]
//! once per frame with the elapsed seconds; `tick` advances every live
//! timeline. Timelines are held weakly, so dropping a timeline (unmount)
//! releases its scheduled work without an explicit cancel call.

use std::cell::{Cell, RefCell};
use std::rc::Weak;

use crate::timeline::TimelineInner;

thread_local! {
    /// Flag indicating a frame is requested, owned by the UI thread.
    static FRAME_REQUESTED: Cell<bool> = const { Cell::new(false) };
    static TICKER: RefCell<Vec<Weak<RefCell<TimelineInner>>>> = const { RefCell::new(Vec::new()) };
}

/// Request that the host render loop process a frame.
pub fn request_frame() {
    FRAME_REQUESTED.with(|flag| flag.set(true));
}

/// Check if a frame has been requested and clear the flag.
pub fn take_frame_request() -> bool {
    FRAME_REQUESTED.with(|flag| flag.replace(false))
}

/// Register a timeline with the ticker. Called once at build.
pub(crate) fn register_timeline(timeline: Weak<RefCell<TimelineInner>>) {
    TICKER.with(|ticker| ticker.borrow_mut().push(timeline));
}

/// Advance every live timeline by `dt` seconds and apply the resulting
/// property samples. Dead registrations are pruned.
///
/// Returns `true` while any timeline is still mid-flight, so the host knows
/// to keep scheduling frames.
pub fn tick(dt: f32) -> bool {
    // Step state first, then sample outside the ticker borrow: sampling
    // writes signals, and their effects may reach back into a timeline.
    let samples = TICKER.with(|ticker| {
        let mut registered = ticker.borrow_mut();
        let mut samples = Vec::new();
        registered.retain(|weak| match weak.upgrade() {
            Some(timeline) => {
                if let Some(sample) = timeline.borrow_mut().step(dt) {
                    samples.push(sample);
                }
                true
            }
            None => false,
        });
        samples
    });

    for sample in &samples {
        sample.apply();
    }

    has_animations()
}

/// Whether any registered timeline is currently mid-flight.
pub fn has_animations() -> bool {
    TICKER.with(|ticker| {
        ticker
            .borrow()
            .iter()
            .filter_map(|weak| weak.upgrade())
            .any(|timeline| timeline.borrow().is_active())
    })
}
