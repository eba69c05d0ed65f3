use std::collections::VecDeque;

use steer_core::TickContext;

use crate::RoutineError;

/// What a routine wants after one resumption.
pub enum Step {
    /// Suspend until the next tick.
    Yield,
    /// Suspend and hand control to `inner` until it completes; the parent resumes in the same
    /// tick the inner routine finishes.
    Await(Box<dyn Routine>),
    Done,
}

impl core::fmt::Debug for Step {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Step::Yield => f.write_str("Yield"),
            Step::Await(_) => f.write_str("Await(..)"),
            Step::Done => f.write_str("Done"),
        }
    }
}

/// A resumable step function.
pub trait Routine: 'static {
    fn resume(&mut self, ctx: &TickContext) -> Result<Step, RoutineError>;
}

/// Suspends for exactly `count` ticks after being started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitForCount {
    remaining: u32,
}

impl WaitForCount {
    pub fn new(count: u32) -> Self {
        Self { remaining: count }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl Routine for WaitForCount {
    fn resume(&mut self, _ctx: &TickContext) -> Result<Step, RoutineError> {
        if self.remaining == 0 {
            return Ok(Step::Done);
        }
        self.remaining -= 1;
        Ok(Step::Yield)
    }
}

/// Suspends until the accumulated tick deltas reach `seconds`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaitForSeconds {
    remaining: f32,
    started: bool,
}

impl WaitForSeconds {
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: if seconds.is_finite() { seconds } else { 0.0 },
            started: false,
        }
    }
}

impl Routine for WaitForSeconds {
    fn resume(&mut self, ctx: &TickContext) -> Result<Step, RoutineError> {
        // The starting resumption only suspends; time is counted from the next tick.
        if self.started {
            self.remaining -= ctx.dt();
        }
        self.started = true;
        if self.remaining <= 0.0 {
            Ok(Step::Done)
        } else {
            Ok(Step::Yield)
        }
    }
}

/// Routine backed by a closure.
pub struct FnRoutine<F> {
    f: F,
}

impl<F> Routine for FnRoutine<F>
where
    F: FnMut(&TickContext) -> Result<Step, RoutineError> + 'static,
{
    fn resume(&mut self, ctx: &TickContext) -> Result<Step, RoutineError> {
        (self.f)(ctx)
    }
}

pub fn from_fn<F>(f: F) -> FnRoutine<F>
where
    F: FnMut(&TickContext) -> Result<Step, RoutineError> + 'static,
{
    FnRoutine { f }
}

/// Runs routines one after another, e.g. "wait N ticks, then do X".
#[derive(Default)]
pub struct Chain {
    queue: VecDeque<Box<dyn Routine>>,
}

impl Chain {
    pub fn new(routines: Vec<Box<dyn Routine>>) -> Self {
        Self {
            queue: routines.into(),
        }
    }

    pub fn then(mut self, routine: impl Routine) -> Self {
        self.queue.push_back(Box::new(routine));
        self
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Routine for Chain {
    fn resume(&mut self, _ctx: &TickContext) -> Result<Step, RoutineError> {
        match self.queue.pop_front() {
            Some(next) => Ok(Step::Await(next)),
            None => Ok(Step::Done),
        }
    }
}
