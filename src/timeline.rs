//! The sequence engine: a paused, scrubbable, reversible timeline of
//! property tweens.
//!
//! A [`Timeline`] is built once per mount with [`TimelineBuilder`] and then
//! only commanded: [`Timeline::play`] runs it toward the fully-played end,
//! [`Timeline::reverse`] back toward the start, always from whatever time is
//! current when the command lands. Every track samples as a pure function of
//! timeline time, so reversing mid-flight is nothing more than running the
//! clock backwards, with no endpoint reset and no jump-cut.
//!
//! The timeline never advances itself; [`crate::frame::tick`] drives it from
//! the host's render clock.

use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::{Animatable, Transition};
use crate::frame;
use crate::reactive::Signal;

/// One target-property tween placed on the timeline.
trait Track {
    /// Write the property value for the given timeline time.
    fn sample(&self, time: f32);
    fn start(&self) -> f32;
    fn end(&self) -> f32;
}

struct Tween<T: Animatable> {
    property: Signal<T>,
    from: T,
    to: T,
    start: f32,
    transition: Transition,
}

impl<T: Animatable> Track for Tween<T> {
    fn sample(&self, time: f32) {
        let local = if self.transition.duration <= f32::EPSILON {
            if time < self.start {
                0.0
            } else {
                1.0
            }
        } else {
            ((time - self.start) / self.transition.duration).clamp(0.0, 1.0)
        };
        let eased = self.transition.timing.evaluate(local);
        self.property.set(T::lerp(&self.from, &self.to, eased));
    }

    fn start(&self) -> f32 {
        self.start
    }

    fn end(&self) -> f32 {
        self.start + self.transition.duration
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// A property sample batch: the track list frozen at build time plus the
/// time to sample it at. Applied outside any timeline borrow.
pub(crate) struct SampleBatch {
    tracks: Rc<[Box<dyn Track>]>,
    time: f32,
}

impl SampleBatch {
    pub(crate) fn apply(&self) {
        for track in self.tracks.iter() {
            track.sample(self.time);
        }
    }
}

pub(crate) struct TimelineInner {
    tracks: Rc<[Box<dyn Track>]>,
    duration: f32,
    time: f32,
    direction: Direction,
    active: bool,
}

impl TimelineInner {
    /// Advance by `dt` seconds in the current direction.
    /// Returns the sample to apply, or `None` when paused.
    pub(crate) fn step(&mut self, dt: f32) -> Option<SampleBatch> {
        if !self.active {
            return None;
        }
        let dt = dt.max(0.0);
        self.time = match self.direction {
            Direction::Forward => (self.time + dt).min(self.duration),
            Direction::Backward => (self.time - dt).max(0.0),
        };
        let at_endpoint = match self.direction {
            Direction::Forward => self.time >= self.duration,
            Direction::Backward => self.time <= 0.0,
        };
        if at_endpoint {
            self.active = false;
            log::trace!("timeline reached {:?} endpoint", self.direction);
        }
        Some(SampleBatch {
            tracks: self.tracks.clone(),
            time: self.time,
        })
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }
}

/// Handle to a built sequence. Clones share the same underlying state.
#[derive(Clone)]
pub struct Timeline {
    inner: Rc<RefCell<TimelineInner>>,
}

impl Timeline {
    /// Run toward the fully-played end, continuing from the current time.
    pub fn play(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.direction = Direction::Forward;
        inner.active = inner.time < inner.duration;
        log::trace!("timeline play from t={:.3}", inner.time);
        if inner.active {
            frame::request_frame();
        }
    }

    /// Run back toward the start, continuing from the current time.
    pub fn reverse(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.direction = Direction::Backward;
        inner.active = inner.time > 0.0;
        log::trace!("timeline reverse from t={:.3}", inner.time);
        if inner.active {
            frame::request_frame();
        }
    }

    /// Normalized play position: 0 at fully reversed, 1 at fully played.
    pub fn progress(&self) -> f32 {
        let inner = self.inner.borrow();
        if inner.duration <= f32::EPSILON {
            // Zero-length sequence: always at the commanded endpoint.
            return match inner.direction {
                Direction::Forward => 1.0,
                Direction::Backward => 0.0,
            };
        }
        inner.time / inner.duration
    }

    /// Total duration in seconds.
    pub fn duration(&self) -> f32 {
        self.inner.borrow().duration
    }

    /// Whether the timeline is currently mid-flight.
    pub fn is_active(&self) -> bool {
        self.inner.borrow().active
    }
}

/// Builds a paused [`Timeline`], phase by phase.
///
/// A position cursor tracks the end of the most recently appended phase;
/// each phase starts at `cursor + transition.offset`. Negative offsets
/// overlap the new phase with the previous one.
pub struct TimelineBuilder {
    tracks: Vec<Box<dyn Track>>,
    cursor: f32,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            cursor: 0.0,
        }
    }

    /// Write a property immediately, before playback. Used for one-time
    /// baseline setup (pinning items to their hidden position). Runs exactly
    /// once, at build, regardless of how the timeline is later commanded.
    pub fn set<T: Animatable>(self, property: &Signal<T>, value: T) -> Self {
        property.set(value);
        self
    }

    /// Append a tween of `property` toward `to`. The starting value is the
    /// property's current value, read once here.
    pub fn to<T: Animatable>(
        mut self,
        property: &Signal<T>,
        to: T,
        transition: Transition,
    ) -> Self {
        let start = (self.cursor + transition.offset).max(0.0);
        let from = property.get_untracked();
        self.cursor = start + transition.duration;
        self.tracks.push(Box::new(Tween {
            property: property.clone(),
            from,
            to,
            start,
            transition,
        }));
        self
    }

    /// Append one tween per property, with successive start times spaced by
    /// `stagger` seconds, in the order the properties are given. An empty
    /// list is a valid degenerate phase: nothing is appended and the cursor
    /// does not move.
    pub fn to_staggered<T: Animatable>(
        mut self,
        properties: &[Signal<T>],
        to: T,
        transition: Transition,
        stagger: f32,
    ) -> Self {
        if properties.is_empty() {
            log::debug!("staggered phase with no targets, skipping");
            return self;
        }
        let base = (self.cursor + transition.offset).max(0.0);
        for (index, property) in properties.iter().enumerate() {
            let start = base + index as f32 * stagger;
            let from = property.get_untracked();
            self.tracks.push(Box::new(Tween {
                property: property.clone(),
                from,
                to: to.clone(),
                start,
                transition: transition.clone(),
            }));
        }
        self.cursor = base + transition.duration + (properties.len() - 1) as f32 * stagger;
        self
    }

    /// Finish the sequence: paused, at time 0, registered with the frame
    /// ticker. The track layout is frozen from here on.
    pub fn build(self) -> Timeline {
        let duration = self
            .tracks
            .iter()
            .map(|track| track.end())
            .fold(0.0_f32, f32::max);
        log::debug!(
            "built timeline: {} tracks, {:.3}s total",
            self.tracks.len(),
            duration
        );
        let inner = Rc::new(RefCell::new(TimelineInner {
            tracks: self.tracks.into(),
            duration,
            time: 0.0,
            direction: Direction::Backward,
            active: false,
        }));
        frame::register_timeline(Rc::downgrade(&inner));
        Timeline { inner }
    }
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::TimingFunction;
    use crate::reactive::create_signal;

    fn drive(timeline: &Timeline, dt: f32, frames: usize) {
        for _ in 0..frames {
            if let Some(sample) = timeline.inner.borrow_mut().step(dt) {
                sample.apply();
            }
        }
    }

    #[test]
    fn test_build_starts_paused_at_zero() {
        let value = create_signal(0.0_f32);
        let timeline = TimelineBuilder::new()
            .to(&value, 10.0, Transition::new(1.0, TimingFunction::Linear))
            .build();
        assert!(!timeline.is_active());
        assert_eq!(timeline.progress(), 0.0);
        assert_eq!(value.get_untracked(), 0.0);
    }

    #[test]
    fn test_set_applies_immediately() {
        let value = create_signal(0.0_f32);
        let _timeline = TimelineBuilder::new().set(&value, 100.0).build();
        assert_eq!(value.get_untracked(), 100.0);
    }

    #[test]
    fn test_to_reads_from_current_value() {
        let value = create_signal(0.0_f32);
        let timeline = TimelineBuilder::new()
            .set(&value, 100.0)
            .to(&value, 0.0, Transition::new(1.0, TimingFunction::Linear))
            .build();
        timeline.play();
        drive(&timeline, 0.5, 1);
        assert_eq!(value.get_untracked(), 50.0);
    }

    #[test]
    fn test_play_clamps_at_duration() {
        let value = create_signal(0.0_f32);
        let timeline = TimelineBuilder::new()
            .to(&value, 10.0, Transition::new(1.0, TimingFunction::Linear))
            .build();
        timeline.play();
        drive(&timeline, 0.4, 5);
        assert_eq!(timeline.progress(), 1.0);
        assert!(!timeline.is_active());
        assert_eq!(value.get_untracked(), 10.0);
    }

    #[test]
    fn test_reverse_continues_from_current_time() {
        let value = create_signal(0.0_f32);
        let timeline = TimelineBuilder::new()
            .to(&value, 10.0, Transition::new(1.0, TimingFunction::Linear))
            .build();
        timeline.play();
        drive(&timeline, 0.3, 1);
        let progress_before = timeline.progress();
        assert!(progress_before > 0.0 && progress_before < 1.0);

        timeline.reverse();
        drive(&timeline, 0.1, 1);
        let progress_after = timeline.progress();
        assert!(progress_after < progress_before);
        assert!(progress_after > 0.0);
    }

    #[test]
    fn test_reverse_at_start_is_inert() {
        let value = create_signal(0.0_f32);
        let timeline = TimelineBuilder::new()
            .to(&value, 10.0, Transition::new(1.0, TimingFunction::Linear))
            .build();
        timeline.reverse();
        assert!(!timeline.is_active());
        assert_eq!(timeline.progress(), 0.0);
    }

    #[test]
    fn test_negative_offset_overlaps_phases() {
        let a = create_signal(0.0_f32);
        let b = create_signal(0.0_f32);
        let timeline = TimelineBuilder::new()
            .to(&a, 1.0, Transition::new(1.25, TimingFunction::Linear))
            .to(&b, 1.0, Transition::new(1.0, TimingFunction::Linear).offset(-0.75))
            .build();
        // Second phase starts at 0.5 and ends at 1.5.
        assert_eq!(timeline.duration(), 1.5);
        timeline.play();
        drive(&timeline, 0.75, 1);
        // Both phases are mid-flight at t=0.75.
        assert!(a.get_untracked() > 0.0 && a.get_untracked() < 1.0);
        assert!(b.get_untracked() > 0.0 && b.get_untracked() < 1.0);
    }

    #[test]
    fn test_stagger_spaces_starts_evenly() {
        let properties: Vec<_> = (0..5).map(|_| create_signal(100.0_f32)).collect();
        let builder = TimelineBuilder::new().to_staggered(
            &properties,
            0.0,
            Transition::new(1.0, TimingFunction::Linear).offset(0.5),
            0.1,
        );
        let starts: Vec<f32> = builder.tracks.iter().map(|track| track.start()).collect();
        for (index, start) in starts.iter().enumerate() {
            assert_eq!(*start, 0.5 + index as f32 * 0.1);
        }
        // Cursor lands on the last track's end.
        assert_eq!(builder.cursor, 0.5 + 1.0 + 4.0 * 0.1);
    }

    #[test]
    fn test_empty_stagger_is_degenerate_phase() {
        let overlay = create_signal(0.0_f32);
        let none: Vec<Signal<f32>> = Vec::new();
        let timeline = TimelineBuilder::new()
            .to(&overlay, 1.0, Transition::new(1.25, TimingFunction::Linear))
            .to_staggered(
                &none,
                0.0,
                Transition::new(1.0, TimingFunction::Linear).offset(-0.75),
                0.1,
            )
            .build();
        assert_eq!(timeline.duration(), 1.25);
    }

    #[test]
    fn test_zero_duration_timeline_reports_commanded_endpoint() {
        let timeline = TimelineBuilder::new().build();
        assert_eq!(timeline.progress(), 0.0);
        timeline.play();
        assert_eq!(timeline.progress(), 1.0);
        assert!(!timeline.is_active());
        timeline.reverse();
        assert_eq!(timeline.progress(), 0.0);
    }
}
