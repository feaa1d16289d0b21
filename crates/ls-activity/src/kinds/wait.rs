use super::Step;

/// Explicit counting task.  Occupies the actor for `remaining` ticks and
/// completes on the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wait {
    pub remaining: u32,
}

impl Wait {
    pub fn new(ticks: u32) -> Self {
        Self { remaining: ticks }
    }

    pub(crate) fn tick(&mut self) -> Step {
        if self.remaining <= 1 {
            return Step::Complete;
        }
        self.remaining -= 1;
        Step::Continue
    }
}
