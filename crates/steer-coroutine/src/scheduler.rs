use core::fmt;

use steer_core::TickContext;

use crate::{Routine, RoutineError, SchedulerError, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoutineId(pub u64);

impl fmt::Display for RoutineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "routine#{}", self.0)
    }
}

struct Task {
    id: RoutineId,
    /// Innermost awaited routine on top.
    stack: Vec<Box<dyn Routine>>,
}

/// Cooperative routine runner driven from the frame loop.
///
/// Routines are resumed in start order. A routine error is returned from [`Scheduler::tick`]
/// after dropping the failing routine; routines not yet resumed keep their place.
#[derive(Default)]
pub struct Scheduler {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `routine` and run it up to its first suspension point.
    ///
    /// A routine that completes synchronously is never registered; its id is still returned.
    pub fn start<R>(&mut self, ctx: &TickContext, routine: R) -> Result<RoutineId, SchedulerError>
    where
        R: Routine,
    {
        self.start_boxed(ctx, Box::new(routine))
    }

    pub fn start_boxed(
        &mut self,
        ctx: &TickContext,
        routine: Box<dyn Routine>,
    ) -> Result<RoutineId, SchedulerError> {
        let id = RoutineId(self.next_id);
        self.next_id += 1;

        let mut stack = vec![routine];
        match drive(&mut stack, ctx) {
            Ok(true) => {
                tracing::trace!(routine = id.0, "routine completed during start");
            }
            Ok(false) => self.tasks.push(Task { id, stack }),
            Err(source) => {
                tracing::debug!(routine = id.0, error = %source, "routine failed during start");
                return Err(SchedulerError::Routine { id, source });
            }
        }
        Ok(id)
    }

    /// Resume every registered routine once, dropping the ones that finish.
    pub fn tick(&mut self, ctx: &TickContext) -> Result<(), SchedulerError> {
        let mut i = 0;
        while i < self.tasks.len() {
            match drive(&mut self.tasks[i].stack, ctx) {
                Ok(false) => i += 1,
                Ok(true) => {
                    let task = self.tasks.remove(i);
                    tracing::trace!(routine = task.id.0, tick = ctx.tick, "routine completed");
                }
                Err(source) => {
                    let task = self.tasks.remove(i);
                    tracing::debug!(routine = task.id.0, error = %source, "routine failed");
                    return Err(SchedulerError::Routine {
                        id: task.id,
                        source,
                    });
                }
            }
        }
        Ok(())
    }

    /// Drop a routine between ticks. Returns `false` when it is not running.
    pub fn cancel(&mut self, id: RoutineId) -> bool {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        self.tasks.remove(pos);
        tracing::debug!(routine = id.0, "routine cancelled");
        true
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn is_running(&self, id: RoutineId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("running", &self.tasks.iter().map(|t| t.id).collect::<Vec<_>>())
            .field("next_id", &self.next_id)
            .finish()
    }
}

/// Resume the innermost routine until something suspends. Returns `true` once the whole stack
/// has completed.
fn drive(stack: &mut Vec<Box<dyn Routine>>, ctx: &TickContext) -> Result<bool, RoutineError> {
    loop {
        let Some(top) = stack.last_mut() else {
            return Ok(true);
        };
        match top.resume(ctx)? {
            Step::Yield => return Ok(false),
            Step::Await(inner) => stack.push(inner),
            Step::Done => {
                stack.pop();
            }
        }
    }
}
