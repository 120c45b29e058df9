use super::runtime::{self, EffectId};

/// A tracked side-effecting computation.
///
/// The closure runs once on creation, recording every signal it reads, and
/// re-runs whenever one of those signals changes. Dropping the `Effect`
/// disposes it; it will never run again.
pub struct Effect {
    id: EffectId,
}

impl Effect {
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let id = runtime::allocate_effect(Box::new(f));
        runtime::run_effect(id);
        Self { id }
    }
}

impl Drop for Effect {
    fn drop(&mut self) {
        runtime::dispose_effect(self.id);
    }
}

pub fn create_effect<F>(f: F) -> Effect
where
    F: FnMut() + 'static,
{
    Effect::new(f)
}
