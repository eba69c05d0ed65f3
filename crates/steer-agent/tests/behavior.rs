use steer_agent::{
    AgentView, AttackBehavior, AttackStep, AttackTarget, BehaviorKind, BehaviorSet,
    PatrolBehavior, PatrolStep, TargetState, WorldSnapshot,
};
use steer_control::{SteerConfig, SteerController};
use steer_core::{AgentId, TickContext, Vec3};
use steer_path::MovementClass;

const ME: AgentId = AgentId(1);
const ENEMY: AgentId = AgentId(2);

fn view_at(position: Vec3) -> AgentView {
    AgentView {
        id: ME,
        position,
        class: MovementClass::Ground,
        weapon_range: 15.0,
        attack_ready: true,
    }
}

fn world_with(id: AgentId, position: Vec3, life: f32) -> WorldSnapshot<'static> {
    let mut world = WorldSnapshot::new();
    world.insert(id, TargetState::new(position, life));
    world
}

#[test]
fn attack_stays_engaged_exactly_at_range() {
    let mut attack = AttackBehavior::new();
    attack.set_target(AttackTarget::Agent(ENEMY));
    assert!(attack.is_active());

    let world = world_with(ENEMY, Vec3::new(15.0, 0.0, 0.0), 10.0);
    let step = attack.update(&view_at(Vec3::ZERO), &world);
    assert_eq!(
        step,
        AttackStep::Fire {
            target: AttackTarget::Agent(ENEMY),
            target_position: Vec3::new(15.0, 0.0, 0.0),
        }
    );
    assert!(attack.is_active());
}

#[test]
fn attack_disengages_just_past_range() {
    let mut attack = AttackBehavior::new();
    attack.set_target(AttackTarget::Agent(ENEMY));

    let world = world_with(ENEMY, Vec3::new(15.01, 0.0, 0.0), 10.0);
    assert_eq!(
        attack.update(&view_at(Vec3::ZERO), &world),
        AttackStep::Disengage
    );
    assert!(!attack.is_active());
    assert_eq!(
        attack.update(&view_at(Vec3::ZERO), &world),
        AttackStep::Idle
    );
}

#[test]
fn attack_disengages_on_dead_or_missing_target() {
    let mut attack = AttackBehavior::new();
    attack.set_target(AttackTarget::Agent(ENEMY));
    let dead = world_with(ENEMY, Vec3::new(1.0, 0.0, 0.0), 0.0);
    assert_eq!(attack.update(&view_at(Vec3::ZERO), &dead), AttackStep::Disengage);

    attack.set_target(AttackTarget::Agent(AgentId(99)));
    assert_eq!(
        attack.update(&view_at(Vec3::ZERO), &WorldSnapshot::new()),
        AttackStep::Disengage
    );
}

#[test]
fn attack_holds_while_cooling_down() {
    let mut attack = AttackBehavior::new();
    attack.set_target(AttackTarget::Point(Vec3::new(3.0, 0.0, 4.0)));
    let mut view = view_at(Vec3::ZERO);
    view.attack_ready = false;

    assert_eq!(
        attack.update(&view, &WorldSnapshot::new()),
        AttackStep::Hold {
            target_position: Vec3::new(3.0, 0.0, 4.0)
        }
    );
    assert!(attack.is_active());
}

#[test]
fn patrol_requires_a_waypoint() {
    assert!(matches!(
        PatrolBehavior::new(Vec::new(), 5.0, 1.0),
        Err(steer_agent::AgentError::EmptyRoute)
    ));
}

#[test]
fn patrol_cycles_back_to_start_after_one_dwell_per_checkpoint() {
    let route = vec![
        Vec3::ZERO,
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 10.0),
    ];
    let mut patrol = PatrolBehavior::new(route, 5.0, 1.0).expect("route");
    let mut controller = SteerController::standard(SteerConfig::default());
    let world = WorldSnapshot::new();
    let view = view_at(Vec3::new(-3.0, 0.0, 0.0));
    patrol.resume(&view, &world, &mut controller);

    let mut ctx = TickContext::new(0, 0.25);
    let mut visited = Vec::new();
    for _ in 0..100 {
        if let PatrolStep::Advanced { checkpoint } =
            patrol.update(&ctx, &view, &world, &mut controller)
        {
            visited.push(checkpoint);
            if visited.len() == 3 {
                break;
            }
        }
        ctx = ctx.next();
    }

    assert_eq!(visited, vec![1, 2, 0]);
    assert_eq!(patrol.checkpoint(), 0);
    assert_eq!(controller.target(), Some(Vec3::ZERO));
}

#[test]
fn patrol_does_not_advance_while_moving() {
    let mut patrol =
        PatrolBehavior::new(vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)], 5.0, 0.5).expect("route");
    let mut controller = SteerController::standard(SteerConfig::default());
    let world = WorldSnapshot::new();
    patrol.resume(&view_at(Vec3::ZERO), &world, &mut controller);

    let mut ctx = TickContext::new(0, 0.25);
    for i in 1..20 {
        let view = view_at(Vec3::new(i as f32 * 0.1, 0.0, 0.0));
        assert_eq!(
            patrol.update(&ctx, &view, &world, &mut controller),
            PatrolStep::Watching
        );
        ctx = ctx.next();
    }
    assert_eq!(patrol.checkpoint(), 0);
    assert_eq!(patrol.stationary_seconds(), 0.0);
}

#[test]
fn patrol_treats_jitter_below_tolerance_as_stationary() {
    let mut patrol = PatrolBehavior::new(vec![Vec3::ZERO, Vec3::X], 5.0, 0.5)
        .expect("route")
        .with_tolerance(0.01);
    let mut controller = SteerController::standard(SteerConfig::default());
    let world = WorldSnapshot::new();
    patrol.resume(&view_at(Vec3::ZERO), &world, &mut controller);

    let ctx = TickContext::new(0, 0.2);
    patrol.update(&ctx, &view_at(Vec3::new(0.001, 0.0, 0.0)), &world, &mut controller);
    patrol.update(&ctx, &view_at(Vec3::new(0.0, 0.0, 0.002)), &world, &mut controller);
    assert!((patrol.stationary_seconds() - 0.4).abs() < 1e-5);
}

#[test]
fn patrol_engages_first_live_target_in_list_order() {
    let mut patrol = PatrolBehavior::new(vec![Vec3::ZERO], 5.0, 1.0)
        .expect("route")
        .with_targets(vec![AgentId(7), ME, AgentId(3), AgentId(2)]);
    patrol.set_active(true);
    let mut controller = SteerController::standard(SteerConfig::default());

    let mut world = WorldSnapshot::new();
    world.insert(AgentId(7), TargetState::new(Vec3::new(1.0, 0.0, 0.0), 0.0));
    world.insert(ME, TargetState::new(Vec3::ZERO, 100.0));
    world.insert(AgentId(3), TargetState::new(Vec3::new(30.0, 0.0, 0.0), 100.0));
    world.insert(AgentId(2), TargetState::new(Vec3::new(14.0, 0.0, 0.0), 100.0));

    let step = patrol.update(
        &TickContext::new(0, 0.1),
        &view_at(Vec3::ZERO),
        &world,
        &mut controller,
    );
    assert_eq!(step, PatrolStep::Engage(AgentId(2)));
    assert!(!patrol.is_active());
}

#[test]
fn behavior_set_keeps_a_single_active_behavior() {
    let mut set = BehaviorSet::new();
    assert_eq!(set.activate(BehaviorKind::Patrol), BehaviorKind::Idle);

    set.set_patrol(PatrolBehavior::new(vec![Vec3::ZERO], 5.0, 1.0).expect("route"));
    assert_eq!(set.activate(BehaviorKind::Patrol), BehaviorKind::Patrol);
    assert_eq!(set.to_string(), "Patrol(1/1)");

    set.attack_mut().set_target(AttackTarget::Agent(ENEMY));
    assert_eq!(set.activate(BehaviorKind::Attack), BehaviorKind::Attack);
    assert!(!set.patrol().expect("patrol").is_active());
    assert_eq!(set.to_string(), "Attack(agent#2)");

    assert_eq!(set.activate(BehaviorKind::Idle), BehaviorKind::Idle);
    assert!(!set.attack().is_active());
    assert_eq!(set.to_string(), "Idle");
}
