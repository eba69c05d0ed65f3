use std::collections::BTreeMap;

use steer_core::{AgentId, Vec3};
use steer_path::{MovementClass, Pathfinder};

/// What behaviors may observe about another agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetState {
    pub position: Vec3,
    pub life: f32,
}

impl TargetState {
    pub fn new(position: Vec3, life: f32) -> Self {
        Self { position, life }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Read-only world queries handed to behaviors each tick.
pub trait AgentWorld {
    fn target(&self, id: AgentId) -> Option<TargetState>;

    /// Optional pathfinding service; `None` means straight-line routes.
    fn pathfinder(&self) -> Option<&dyn Pathfinder> {
        None
    }
}

/// The owning agent as seen by its behaviors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentView {
    pub id: AgentId,
    pub position: Vec3,
    pub class: MovementClass,
    pub weapon_range: f32,
    /// Alive and off cooldown.
    pub attack_ready: bool,
}

/// Per-tick snapshot of agent states, ordered by id.
#[derive(Default)]
pub struct WorldSnapshot<'a> {
    targets: BTreeMap<AgentId, TargetState>,
    pathfinder: Option<&'a dyn Pathfinder>,
}

impl<'a> WorldSnapshot<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pathfinder(mut self, pathfinder: &'a dyn Pathfinder) -> Self {
        self.pathfinder = Some(pathfinder);
        self
    }

    pub fn insert(&mut self, id: AgentId, state: TargetState) {
        self.targets.insert(id, state);
    }

    pub fn remove(&mut self, id: AgentId) -> Option<TargetState> {
        self.targets.remove(&id)
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl AgentWorld for WorldSnapshot<'_> {
    fn target(&self, id: AgentId) -> Option<TargetState> {
        self.targets.get(&id).copied()
    }

    fn pathfinder(&self) -> Option<&dyn Pathfinder> {
        self.pathfinder
    }
}
