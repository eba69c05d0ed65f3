use core::fmt;

use steer_control::SteerController;
use steer_core::{AgentId, TickContext, Vec3};

use crate::{plan_route, AgentError, AgentView, AgentWorld};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
    Idle,
    Patrol,
    Attack,
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BehaviorKind::Idle => "idle",
            BehaviorKind::Patrol => "patrol",
            BehaviorKind::Attack => "attack",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackTarget {
    Agent(AgentId),
    Point(Vec3),
}

impl fmt::Display for AttackTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackTarget::Agent(id) => write!(f, "{id}"),
            AttackTarget::Point(p) => write!(f, "({:.1}, {:.1}, {:.1})", p.x, p.y, p.z),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackStep {
    /// Not active.
    Idle,
    /// Target valid but the weapon is cooling down.
    Hold { target_position: Vec3 },
    Fire {
        target: AttackTarget,
        target_position: Vec3,
    },
    /// Target died, vanished, or left weapon range; the behavior deactivated itself.
    Disengage,
}

/// Holds a single target while it stays alive and within weapon range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttackBehavior {
    active: bool,
    target: Option<AttackTarget>,
}

impl AttackBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn target(&self) -> Option<AttackTarget> {
        self.target
    }

    pub fn set_target(&mut self, target: AttackTarget) {
        self.target = Some(target);
        self.active = true;
    }

    pub fn update(&mut self, me: &AgentView, world: &dyn AgentWorld) -> AttackStep {
        if !self.active {
            return AttackStep::Idle;
        }

        let resolved = self.target.and_then(|target| match target {
            AttackTarget::Agent(id) => world
                .target(id)
                .filter(|state| state.is_alive())
                .map(|state| (target, state.position)),
            AttackTarget::Point(p) => Some((target, p)),
        });

        // Exactly at range stays engaged.
        let Some((target, target_position)) =
            resolved.filter(|(_, p)| me.position.distance(*p) <= me.weapon_range)
        else {
            self.active = false;
            return AttackStep::Disengage;
        };

        if me.attack_ready {
            AttackStep::Fire {
                target,
                target_position,
            }
        } else {
            AttackStep::Hold { target_position }
        }
    }
}

impl fmt::Display for AttackBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.active, self.target) {
            (true, Some(target)) => write!(f, "Attack({target})"),
            (false, Some(target)) => write!(f, "Attack({target}, inactive)"),
            (_, None) => f.write_str("Attack(none)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolStep {
    /// Not active.
    Idle,
    /// Nothing in range; still moving or dwelling.
    Watching,
    /// Dwell expired; routed toward the new checkpoint.
    Advanced { checkpoint: usize },
    /// A live target entered weapon range; the behavior deactivated itself.
    Engage(AgentId),
}

/// Cyclic waypoint patrol that hands over to attack when a target comes into range.
#[derive(Debug, Clone, PartialEq)]
pub struct PatrolBehavior {
    active: bool,
    route: Vec<Vec3>,
    checkpoint: usize,
    speed: f32,
    dwell_seconds: f32,
    targets: Vec<AgentId>,
    stationary_seconds: f32,
    last_position: Option<Vec3>,
    tolerance: f32,
    refine: bool,
}

impl PatrolBehavior {
    pub const DEFAULT_TOLERANCE: f32 = 1e-3;

    pub fn new(route: Vec<Vec3>, speed: f32, dwell_seconds: f32) -> Result<Self, AgentError> {
        if route.is_empty() {
            return Err(AgentError::EmptyRoute);
        }
        Ok(Self {
            active: false,
            route,
            checkpoint: 0,
            speed: speed.max(0.0),
            dwell_seconds: dwell_seconds.max(0.0),
            targets: Vec::new(),
            stationary_seconds: 0.0,
            last_position: None,
            tolerance: Self::DEFAULT_TOLERANCE,
            refine: true,
        })
    }

    pub fn with_targets(mut self, targets: Vec<AgentId>) -> Self {
        self.targets = targets;
        self
    }

    /// Movement below this distance per tick counts as stationary.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// Skip the pathfinder and route in straight lines.
    pub fn straight_routes(mut self) -> Self {
        self.refine = false;
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn route(&self) -> &[Vec3] {
        &self.route
    }

    pub fn checkpoint(&self) -> usize {
        self.checkpoint
    }

    pub fn current_waypoint(&self) -> Vec3 {
        self.route[self.checkpoint]
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn dwell_seconds(&self) -> f32 {
        self.dwell_seconds
    }

    pub fn stationary_seconds(&self) -> f32 {
        self.stationary_seconds
    }

    pub fn targets(&self) -> &[AgentId] {
        &self.targets
    }

    pub fn set_targets(&mut self, targets: Vec<AgentId>) {
        self.targets = targets;
    }

    pub fn add_target(&mut self, target: AgentId) {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
    }

    /// Reset dwell tracking and route toward the current checkpoint.
    pub fn resume(
        &mut self,
        me: &AgentView,
        world: &dyn AgentWorld,
        controller: &mut SteerController,
    ) {
        self.active = true;
        self.stationary_seconds = 0.0;
        self.last_position = Some(me.position);
        self.route_to_checkpoint(me, world, controller);
    }

    pub fn update(
        &mut self,
        ctx: &TickContext,
        me: &AgentView,
        world: &dyn AgentWorld,
        controller: &mut SteerController,
    ) -> PatrolStep {
        if !self.active {
            return PatrolStep::Idle;
        }

        if let Some(target) = self.acquire(me, world) {
            self.active = false;
            return PatrolStep::Engage(target);
        }

        match self.last_position {
            Some(last) if last.approx_eq(me.position, self.tolerance) => {
                self.stationary_seconds += ctx.dt();
            }
            _ => self.stationary_seconds = 0.0,
        }
        self.last_position = Some(me.position);

        if self.stationary_seconds > self.dwell_seconds {
            self.checkpoint = (self.checkpoint + 1) % self.route.len();
            self.stationary_seconds = 0.0;
            self.route_to_checkpoint(me, world, controller);
            return PatrolStep::Advanced {
                checkpoint: self.checkpoint,
            };
        }

        PatrolStep::Watching
    }

    /// First live target in list order within weapon range.
    fn acquire(&self, me: &AgentView, world: &dyn AgentWorld) -> Option<AgentId> {
        self.targets.iter().copied().find(|&id| {
            id != me.id
                && world.target(id).is_some_and(|state| {
                    state.is_alive() && me.position.distance(state.position) <= me.weapon_range
                })
        })
    }

    fn route_to_checkpoint(
        &self,
        me: &AgentView,
        world: &dyn AgentWorld,
        controller: &mut SteerController,
    ) {
        let waypoint = self.current_waypoint();
        let points = plan_route(
            me.class,
            me.position,
            waypoint,
            world.pathfinder(),
            self.refine,
        );
        tracing::debug!(
            agent = me.id.0,
            checkpoint = self.checkpoint,
            points = points.len(),
            "patrol routing to checkpoint"
        );
        controller.follow(&points, self.speed);
    }
}

impl fmt::Display for PatrolBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Patrol({}/{}{})",
            self.checkpoint + 1,
            self.route.len(),
            if self.active { "" } else { ", inactive" }
        )
    }
}

/// The agent's behaviors with at most one of them active.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BehaviorSet {
    patrol: Option<PatrolBehavior>,
    attack: AttackBehavior,
}

impl BehaviorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> BehaviorKind {
        if self.attack.is_active() {
            BehaviorKind::Attack
        } else if self.patrol.as_ref().is_some_and(|p| p.is_active()) {
            BehaviorKind::Patrol
        } else {
            BehaviorKind::Idle
        }
    }

    pub fn patrol(&self) -> Option<&PatrolBehavior> {
        self.patrol.as_ref()
    }

    pub fn patrol_mut(&mut self) -> Option<&mut PatrolBehavior> {
        self.patrol.as_mut()
    }

    /// Install (or replace) the patrol, inactive.
    pub fn set_patrol(&mut self, mut patrol: PatrolBehavior) {
        patrol.set_active(false);
        self.patrol = Some(patrol);
    }

    pub fn attack(&self) -> &AttackBehavior {
        &self.attack
    }

    pub fn attack_mut(&mut self) -> &mut AttackBehavior {
        &mut self.attack
    }

    /// Activate `kind`, deactivating every other behavior.
    ///
    /// Activating a patrol that was never installed falls back to idle. Returns the kind that
    /// is active afterwards.
    pub fn activate(&mut self, kind: BehaviorKind) -> BehaviorKind {
        self.attack.set_active(kind == BehaviorKind::Attack);
        if let Some(patrol) = self.patrol.as_mut() {
            patrol.set_active(kind == BehaviorKind::Patrol);
        }
        self.active()
    }
}

impl fmt::Display for BehaviorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.active() {
            BehaviorKind::Attack => write!(f, "{}", self.attack),
            BehaviorKind::Patrol => match &self.patrol {
                Some(patrol) => write!(f, "{patrol}"),
                None => f.write_str("Idle"),
            },
            BehaviorKind::Idle => f.write_str("Idle"),
        }
    }
}
