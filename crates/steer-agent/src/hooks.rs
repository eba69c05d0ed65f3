use std::cell::Cell;
use std::rc::Rc;

use steer_control::SteerController;
use steer_core::{AgentId, TickContext, Vec3};
use steer_coroutine::{from_fn, Chain, Scheduler, Step, WaitForSeconds};
use steer_path::MovementClass;

use crate::{AgentError, AgentWorld, CrashConfig};

/// Everything a destruction reaction may touch.
pub struct DestroyedContext<'a> {
    pub agent: AgentId,
    pub class: MovementClass,
    pub position: Vec3,
    pub tick: &'a TickContext,
    pub world: &'a dyn AgentWorld,
    pub controller: &'a mut SteerController,
    pub scheduler: &'a mut Scheduler,
}

/// Vehicle-specific reactions to combat events.
pub trait AgentHooks {
    fn on_damaged(&mut self, _agent: AgentId, _amount: f32, _life: f32) {}

    /// Called once when life first drops to zero. The default stops in place.
    fn on_destroyed(&mut self, ctx: &mut DestroyedContext<'_>) -> Result<(), AgentError> {
        ctx.controller.clear();
        Ok(())
    }

    /// Whether visuals (rotors, tracks) should keep animating.
    fn animating(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StopInPlace;

impl AgentHooks for StopInPlace {}

/// Falls to the nearest ground point and spins the rotor down after a delay.
#[derive(Debug, Clone)]
pub struct HeliCrash {
    fall_speed: f32,
    rotor_stop_seconds: f32,
    rotor: Rc<Cell<bool>>,
}

impl HeliCrash {
    pub fn new(fall_speed: f32, rotor_stop_seconds: f32) -> Self {
        Self {
            fall_speed: fall_speed.max(0.0),
            rotor_stop_seconds: rotor_stop_seconds.max(0.0),
            rotor: Rc::new(Cell::new(true)),
        }
    }

    pub fn from_config(config: &CrashConfig) -> Self {
        Self::new(config.fall_speed, config.rotor_stop_seconds)
    }

    /// Shared rotor flag; `false` once the rotor has stopped.
    pub fn rotor_handle(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.rotor)
    }

    pub fn rotor_spinning(&self) -> bool {
        self.rotor.get()
    }
}

impl Default for HeliCrash {
    fn default() -> Self {
        Self::from_config(&CrashConfig::default())
    }
}

impl AgentHooks for HeliCrash {
    fn on_destroyed(&mut self, ctx: &mut DestroyedContext<'_>) -> Result<(), AgentError> {
        let ground = ctx
            .world
            .pathfinder()
            .and_then(|p| p.nearest_point(MovementClass::Ground, ctx.position))
            .unwrap_or(Vec3::new(ctx.position.x, 0.0, ctx.position.z));

        tracing::info!(
            agent = ctx.agent.0,
            ?ground,
            fall_speed = self.fall_speed,
            "heli going down"
        );
        ctx.controller.follow(&[ctx.position, ground], self.fall_speed);

        let rotor = Rc::clone(&self.rotor);
        let agent = ctx.agent.0;
        let halt = Chain::default()
            .then(WaitForSeconds::new(self.rotor_stop_seconds))
            .then(from_fn(move |_ctx| {
                rotor.set(false);
                tracing::debug!(agent, "rotor stopped");
                Ok(Step::Done)
            }));
        ctx.scheduler.start(ctx.tick, halt)?;
        Ok(())
    }

    fn animating(&self) -> bool {
        self.rotor.get()
    }
}
