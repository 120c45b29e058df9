mod animatable;
mod timing;

pub use animatable::Animatable;
pub use timing::TimingFunction;

/// Configuration for one timed property transition inside a sequence.
#[derive(Clone, Debug)]
pub struct Transition {
    /// Duration of the transition in seconds
    pub duration: f32,
    /// Timing function controlling the animation curve
    pub timing: TimingFunction,
    /// Start offset in seconds, relative to the end of the previous phase.
    /// Negative values start this phase before the previous one finishes.
    pub offset: f32,
}

impl Transition {
    /// Create a new transition with the given duration and timing function
    pub fn new(duration: f32, timing: TimingFunction) -> Self {
        Self {
            duration,
            timing,
            offset: 0.0,
        }
    }

    /// Set the start offset relative to the previous phase's end
    pub fn offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    /// Set the duration of the transition
    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Set the timing function
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }
}
