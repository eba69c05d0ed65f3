use core::fmt;

use steer_control::{SteerController, SteerState};
use steer_core::{AgentId, Manipulator, TickContext, TraceEvent, TraceKind, Tracer, Vec3};
use steer_coroutine::Scheduler;
use steer_path::MovementClass;

use crate::{
    plan_route, AgentConfig, AgentError, AgentHooks, AgentKind, AgentView, AgentWorld,
    AttackStep, AttackTarget, BehaviorKind, BehaviorSet, DestroyedContext, HeliCrash,
    PatrolBehavior, PatrolStep, StopInPlace, WeaponConfig,
};

/// Combat notifications for the scene, drained with [`Agent::drain_events`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AgentEvent {
    Damaged { amount: f32, life: f32 },
    Destroyed,
}

/// A shot the combat collaborator should resolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackOrder {
    pub attacker: AgentId,
    pub target: AttackTarget,
    pub damage: f32,
    pub tick: u64,
}

/// A steerable combatant: behaviors on top of a steering controller plus its own routines.
///
/// The body is owned by the scene and handed into every call that moves the agent.
pub struct Agent {
    id: AgentId,
    owner: Option<AgentId>,
    kind: AgentKind,
    life: f32,
    max_life: f32,
    weapon: WeaponConfig,
    cooldown: f32,
    destroyed: bool,
    controller: SteerController,
    behaviors: BehaviorSet,
    scheduler: Scheduler,
    hooks: Box<dyn AgentHooks>,
    tracer: Tracer,
    events: Vec<AgentEvent>,
    attacks: Vec<AttackOrder>,
    position: Vec3,
}

impl Agent {
    pub fn new(id: AgentId, config: &AgentConfig) -> Result<Self, AgentError> {
        config.validate()?;

        let steer = config.steer;
        let (controller, hooks): (SteerController, Box<dyn AgentHooks>) = match config.kind {
            AgentKind::Standard => (SteerController::standard(steer), Box::new(StopInPlace)),
            AgentKind::Tank => (
                SteerController::tank(steer, config.turn_rate),
                Box::new(StopInPlace),
            ),
            AgentKind::Heli => (
                SteerController::heli(steer, config.rotor_dip),
                Box::new(HeliCrash::from_config(&config.crash)),
            ),
        };

        let mut behaviors = BehaviorSet::new();
        if !config.patrol.route.is_empty() {
            let patrol = PatrolBehavior::new(
                config.patrol.route.clone(),
                config.patrol.speed,
                config.patrol.dwell_seconds,
            )?
            .with_tolerance(config.patrol.tolerance);
            behaviors.set_patrol(patrol);
        }

        Ok(Self {
            id,
            owner: None,
            kind: config.kind,
            life: config.life,
            max_life: config.life,
            weapon: config.weapon,
            cooldown: 0.0,
            destroyed: false,
            controller,
            behaviors,
            scheduler: Scheduler::new(),
            hooks,
            tracer: Tracer::default(),
            events: Vec::new(),
            attacks: Vec::new(),
            position: Vec3::ZERO,
        })
    }

    pub fn with_hooks(mut self, hooks: impl AgentHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    pub fn with_owner(mut self, owner: AgentId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = tracer;
        self
    }

    /// Seed the cached position with where the scene spawned the body.
    pub fn spawn_at(mut self, position: Vec3) -> Self {
        if position.is_finite() {
            self.position = position;
        }
        self
    }

    pub fn with_patrol(mut self, patrol: PatrolBehavior) -> Self {
        self.behaviors.set_patrol(patrol);
        self
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn owner(&self) -> Option<AgentId> {
        self.owner
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn movement_class(&self) -> MovementClass {
        self.kind.movement_class()
    }

    pub fn life(&self) -> f32 {
        self.life
    }

    pub fn max_life(&self) -> f32 {
        self.max_life
    }

    pub fn is_alive(&self) -> bool {
        !self.destroyed
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn weapon(&self) -> &WeaponConfig {
        &self.weapon
    }

    /// Seconds until the weapon may fire again.
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Body position observed on the last call that was handed the body, or the spawn point.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn controller(&self) -> &SteerController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SteerController {
        &mut self.controller
    }

    pub fn behaviors(&self) -> &BehaviorSet {
        &self.behaviors
    }

    pub fn behaviors_mut(&mut self) -> &mut BehaviorSet {
        &mut self.behaviors
    }

    pub fn active_behavior(&self) -> BehaviorKind {
        self.behaviors.active()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    pub fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }

    pub fn is_animating(&self) -> bool {
        self.hooks.animating()
    }

    pub fn view(&self) -> AgentView {
        AgentView {
            id: self.id,
            position: self.position,
            class: self.movement_class(),
            weapon_range: self.weapon.range,
            attack_ready: !self.destroyed && self.cooldown <= 0.0,
        }
    }

    /// Alive, off cooldown, and `target_position` within weapon range.
    pub fn can_attack(&self, target_position: Vec3) -> bool {
        !self.destroyed
            && self.cooldown <= 0.0
            && self.position.distance(target_position) <= self.weapon.range
    }

    /// Route toward `point`; `refine` asks the world's pathfinder for the points.
    pub fn set_route_to_point(
        &mut self,
        point: Vec3,
        speed: f32,
        refine: bool,
        world: &dyn AgentWorld,
        body: &dyn Manipulator,
    ) {
        self.position = body.position();
        let points = plan_route(
            self.movement_class(),
            self.position,
            point,
            world.pathfinder(),
            refine,
        );
        tracing::debug!(agent = self.id.0, ?point, points = points.len(), "route set");
        self.controller.follow(&points, speed);
    }

    /// Activate the installed patrol and route to its current checkpoint.
    pub fn start_patrol(
        &mut self,
        ctx: &TickContext,
        world: &dyn AgentWorld,
        body: &dyn Manipulator,
    ) -> Result<(), AgentError> {
        if self.destroyed {
            return Ok(());
        }
        self.position = body.position();
        let view = self.view();
        self.behaviors.activate(BehaviorKind::Patrol);
        let patrol = self.behaviors.patrol_mut().ok_or(AgentError::EmptyRoute)?;
        patrol.resume(&view, world, &mut self.controller);
        let checkpoint = patrol.checkpoint();

        tracing::debug!(agent = self.id.0, checkpoint, "patrol started");
        self.trace(ctx, TraceKind::Patrol, checkpoint as u64);
        Ok(())
    }

    /// Switch to attacking `target`, holding position.
    pub fn attack(&mut self, target: AttackTarget) {
        if self.destroyed {
            return;
        }
        self.behaviors.attack_mut().set_target(target);
        self.behaviors.activate(BehaviorKind::Attack);
        self.controller.clear();
        tracing::debug!(agent = self.id.0, %target, "attack ordered");
    }

    pub fn update(
        &mut self,
        ctx: &TickContext,
        world: &dyn AgentWorld,
        body: &mut dyn Manipulator,
    ) -> Result<(), AgentError> {
        let dt = ctx.dt();
        self.position = body.position();

        if !self.destroyed {
            self.cooldown = (self.cooldown - dt).max(0.0);
            self.update_behaviors(ctx, world, body);
        }

        let before = self.controller.state();
        let state = self.controller.update_manipulator(dt, body);
        self.position = body.position();
        if state == SteerState::Arrived && before == SteerState::Following {
            self.trace(ctx, TraceKind::Arrived, 0);
        }

        self.scheduler.tick(ctx)?;
        Ok(())
    }

    fn update_behaviors(
        &mut self,
        ctx: &TickContext,
        world: &dyn AgentWorld,
        body: &mut dyn Manipulator,
    ) {
        let view = self.view();
        match self.behaviors.active() {
            BehaviorKind::Idle => {}
            BehaviorKind::Patrol => {
                let Some(patrol) = self.behaviors.patrol_mut() else {
                    return;
                };
                match patrol.update(ctx, &view, world, &mut self.controller) {
                    PatrolStep::Engage(target) => {
                        tracing::debug!(agent = self.id.0, %target, "target acquired");
                        self.trace(ctx, TraceKind::Engage, target.0);
                        self.attack(AttackTarget::Agent(target));
                    }
                    PatrolStep::Advanced { checkpoint } => {
                        tracing::debug!(agent = self.id.0, checkpoint, "checkpoint advanced");
                        self.trace(ctx, TraceKind::Checkpoint, checkpoint as u64);
                    }
                    PatrolStep::Watching | PatrolStep::Idle => {}
                }
            }
            BehaviorKind::Attack => match self.behaviors.attack_mut().update(&view, world) {
                AttackStep::Fire {
                    target,
                    target_position,
                } => {
                    body.rotate_to((target_position - view.position).horizontal());
                    self.cooldown = self.weapon.cooldown_seconds;
                    self.attacks.push(AttackOrder {
                        attacker: self.id,
                        target,
                        damage: self.weapon.damage,
                        tick: ctx.tick,
                    });
                    tracing::trace!(agent = self.id.0, %target, "fire");
                    self.trace(ctx, TraceKind::Fire, target_code(target));
                }
                AttackStep::Hold { .. } | AttackStep::Idle => {}
                AttackStep::Disengage => self.disengage(ctx, &view, world),
            },
        }
    }

    fn disengage(&mut self, ctx: &TickContext, view: &AgentView, world: &dyn AgentWorld) {
        let resumed = match self.behaviors.activate(BehaviorKind::Patrol) {
            BehaviorKind::Patrol => match self.behaviors.patrol_mut() {
                Some(patrol) => {
                    patrol.resume(view, world, &mut self.controller);
                    true
                }
                None => false,
            },
            _ => false,
        };
        if !resumed {
            self.behaviors.activate(BehaviorKind::Idle);
            self.controller.clear();
        }
        tracing::debug!(
            agent = self.id.0,
            next = %self.behaviors.active(),
            "attack disengaged"
        );
        self.trace(ctx, TraceKind::Disengage, u64::from(resumed));
    }

    /// Apply damage reported by the combat collaborator.
    ///
    /// Non-positive or non-finite amounts and hits on a destroyed agent are ignored.
    pub fn fire_damaged(
        &mut self,
        ctx: &TickContext,
        amount: f32,
        world: &dyn AgentWorld,
        body: &dyn Manipulator,
    ) -> Result<(), AgentError> {
        if self.destroyed || !amount.is_finite() || amount <= 0.0 {
            return Ok(());
        }
        self.position = body.position();
        self.life = (self.life - amount).max(0.0);
        self.events.push(AgentEvent::Damaged {
            amount,
            life: self.life,
        });
        self.hooks.on_damaged(self.id, amount, self.life);
        tracing::debug!(agent = self.id.0, amount, life = self.life, "damaged");

        if self.life <= 0.0 {
            self.fire_destroyed(ctx, world, body)?;
        }
        Ok(())
    }

    /// Mark the agent destroyed and run its destruction reaction from the body's current
    /// position. Idempotent.
    pub fn fire_destroyed(
        &mut self,
        ctx: &TickContext,
        world: &dyn AgentWorld,
        body: &dyn Manipulator,
    ) -> Result<(), AgentError> {
        if self.destroyed {
            return Ok(());
        }
        self.position = body.position();
        self.destroyed = true;
        self.life = 0.0;
        self.behaviors.activate(BehaviorKind::Idle);
        self.controller.clear();
        self.events.push(AgentEvent::Destroyed);
        tracing::info!(agent = self.id.0, kind = ?self.kind, tick = ctx.tick, "destroyed");
        self.trace(ctx, TraceKind::Destroyed, 0);

        let mut destroyed = DestroyedContext {
            agent: self.id,
            class: self.movement_class(),
            position: self.position,
            tick: ctx,
            world,
            controller: &mut self.controller,
            scheduler: &mut self.scheduler,
        };
        self.hooks.on_destroyed(&mut destroyed)
    }

    pub fn drain_events(&mut self) -> Vec<AgentEvent> {
        core::mem::take(&mut self.events)
    }

    pub fn drain_attacks(&mut self) -> Vec<AttackOrder> {
        core::mem::take(&mut self.attacks)
    }

    fn trace(&mut self, ctx: &TickContext, kind: TraceKind, value: u64) {
        self.tracer
            .emit(TraceEvent::new(ctx.tick, self.id, kind).with_value(value));
    }
}

fn target_code(target: AttackTarget) -> u64 {
    match target {
        AttackTarget::Agent(id) => id.0,
        AttackTarget::Point(_) => u64::MAX,
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("life", &self.life)
            .field("destroyed", &self.destroyed)
            .field("behaviors", &self.behaviors)
            .field("controller", &self.controller)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.destroyed {
            write!(f, "{} destroyed", self.id)
        } else {
            write!(f, "{} {}", self.id, self.behaviors)
        }
    }
}
