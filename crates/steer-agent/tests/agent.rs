use steer_agent::{
    Agent, AgentConfig, AgentError, AgentEvent, AgentKind, AttackTarget, BehaviorKind,
    PatrolConfig, TargetState, WorldSnapshot,
};
use steer_control::SteerState;
use steer_core::{AgentId, Manipulator, TickContext, Tracer, Transform, Vec3};
use steer_path::{NavGrid, Path};

const DT: f32 = 0.1;

fn patrol_config(route: Vec<Vec3>) -> AgentConfig {
    AgentConfig {
        patrol: PatrolConfig {
            route,
            speed: 5.0,
            dwell_seconds: 1.0,
            ..PatrolConfig::default()
        },
        ..AgentConfig::default()
    }
}

#[test]
fn patrol_retargets_start_after_resting_at_far_checkpoint() {
    let far = Vec3::new(10.0, 0.0, 0.0);
    let mut agent =
        Agent::new(AgentId(1), &patrol_config(vec![Vec3::ZERO, far])).expect("agent");
    let mut body = Transform::at(Vec3::ZERO);
    let world = WorldSnapshot::new();
    let mut ctx = TickContext::new(0, DT);

    agent.start_patrol(&ctx, &world, &body).expect("patrol");
    assert_eq!(agent.active_behavior(), BehaviorKind::Patrol);

    let mut reached_tick = None;
    let mut retarget_tick = None;
    for tick in 0..400u32 {
        agent.update(&ctx, &world, &mut body).expect("update");
        ctx = ctx.next();

        if reached_tick.is_none() && body.position().distance(far) <= 0.1 {
            reached_tick = Some(tick);
        }
        if reached_tick.is_some()
            && agent
                .controller()
                .target()
                .is_some_and(|t| t.approx_eq(Vec3::ZERO, 1e-4))
        {
            retarget_tick = Some(tick);
            break;
        }
    }

    let reached = reached_tick.unwrap_or_else(|| panic!("never reached {far:?}: {agent:?}"));
    let retarget = retarget_tick.unwrap_or_else(|| panic!("never routed back: {agent:?}"));
    let rested = (retarget - reached) as f32 * DT;
    assert!(rested > 1.0, "left after {rested}s at the far checkpoint");
    assert!(rested < 1.5, "rested {rested}s, expected to leave once the dwell expired");
    assert_eq!(agent.behaviors().patrol().expect("patrol").checkpoint(), 0);
}

#[test]
fn live_target_in_range_flips_patrol_to_attack_on_next_update() {
    let mut agent = Agent::new(
        AgentId(1),
        &patrol_config(vec![Vec3::ZERO, Vec3::new(50.0, 0.0, 0.0)]),
    )
    .expect("agent")
    .with_tracer(Tracer::recording());
    agent
        .behaviors_mut()
        .patrol_mut()
        .expect("patrol")
        .add_target(AgentId(2));

    let mut body = Transform::at(Vec3::ZERO);
    let mut world = WorldSnapshot::new();
    world.insert(AgentId(2), TargetState::new(Vec3::new(8.0, 0.0, 0.0), 40.0));
    let mut ctx = TickContext::new(0, DT);

    agent.start_patrol(&ctx, &world, &body).expect("patrol");
    agent.update(&ctx, &world, &mut body).expect("update");
    assert_eq!(agent.active_behavior(), BehaviorKind::Attack);
    assert!(!agent.behaviors().patrol().expect("patrol").is_active());
    assert!(!agent.controller().has_path());

    ctx = ctx.next();
    agent.update(&ctx, &world, &mut body).expect("update");
    let orders = agent.drain_attacks();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].target, AttackTarget::Agent(AgentId(2)));
    assert_eq!(orders[0].damage, agent.weapon().damage);
    assert!(body.forward().approx_eq(Vec3::X, 1e-5));

    // Cooling down: no second shot on the next tick.
    ctx = ctx.next();
    agent.update(&ctx, &world, &mut body).expect("update");
    assert!(agent.drain_attacks().is_empty());

    // Target dies; the agent goes back to its route.
    world.insert(AgentId(2), TargetState::new(Vec3::new(8.0, 0.0, 0.0), 0.0));
    ctx = ctx.next();
    agent.update(&ctx, &world, &mut body).expect("update");
    assert_eq!(agent.active_behavior(), BehaviorKind::Patrol);

    let log = agent.tracer().log().expect("recording");
    let tags: Vec<&str> = log.tags().collect();
    assert_eq!(tags, vec!["patrol", "engage", "fire", "disengage"]);
}

#[test]
fn disengage_without_route_goes_idle() {
    let mut agent = Agent::new(AgentId(1), &AgentConfig::default()).expect("agent");
    let mut body = Transform::at(Vec3::ZERO);
    let world = WorldSnapshot::new();

    agent.attack(AttackTarget::Agent(AgentId(5)));
    assert_eq!(agent.active_behavior(), BehaviorKind::Attack);

    agent
        .update(&TickContext::new(0, DT), &world, &mut body)
        .expect("update");
    assert_eq!(agent.active_behavior(), BehaviorKind::Idle);
}

#[test]
fn start_patrol_without_route_is_an_error() {
    let mut agent = Agent::new(AgentId(1), &AgentConfig::default()).expect("agent");
    let body = Transform::default();
    let err = agent
        .start_patrol(&TickContext::new(0, DT), &WorldSnapshot::new(), &body)
        .expect_err("no route");
    assert!(matches!(err, AgentError::EmptyRoute));
}

#[test]
fn can_attack_checks_range_and_cooldown() {
    let mut agent = Agent::new(AgentId(1), &AgentConfig::default()).expect("agent");
    let mut body = Transform::at(Vec3::ZERO);
    let world = WorldSnapshot::new();
    let ctx = TickContext::new(0, DT);

    let range = agent.weapon().range;
    assert!(agent.can_attack(Vec3::new(range, 0.0, 0.0)));
    assert!(!agent.can_attack(Vec3::new(range + 0.5, 0.0, 0.0)));

    agent.attack(AttackTarget::Point(Vec3::new(1.0, 0.0, 0.0)));
    agent.update(&ctx, &world, &mut body).expect("update");
    assert_eq!(agent.drain_attacks().len(), 1);
    assert!(agent.cooldown() > 0.0);
    assert!(!agent.can_attack(Vec3::new(1.0, 0.0, 0.0)));
}

#[test]
fn set_route_to_point_uses_pathfinder_when_refined() {
    let mut grid = NavGrid::new(6, 6, 1.0);
    for z in 0..5 {
        grid.set_blocked(2, z, true);
    }
    let world = WorldSnapshot::new().with_pathfinder(&grid);
    let mut agent = Agent::new(AgentId(1), &AgentConfig::default()).expect("agent");
    let body = Transform::at(Vec3::new(0.5, 0.0, 0.5));
    let goal = Vec3::new(4.5, 0.0, 0.5);

    agent.set_route_to_point(goal, 3.0, true, &world, &body);
    let detour = agent.controller().path().expect("path").length();
    assert!(detour > 4.0 + 1.0, "expected a detour, got {detour}");
    assert_eq!(agent.controller().max_speed(), 3.0);

    agent.set_route_to_point(goal, 3.0, false, &world, &body);
    let straight = agent.controller().path().expect("path").length();
    assert!((straight - 4.0).abs() < 1e-5);
}

#[test]
fn damage_reduces_life_and_destruction_fires_once() {
    let mut agent = Agent::new(AgentId(1), &AgentConfig::default()).expect("agent");
    let world = WorldSnapshot::new();
    let body = Transform::at(Vec3::new(1.0, 0.0, 2.0));
    let ctx = TickContext::new(3, DT);

    agent.fire_damaged(&ctx, 30.0, &world, &body).expect("damage");
    agent.fire_damaged(&ctx, -5.0, &world, &body).expect("ignored");
    agent.fire_damaged(&ctx, f32::NAN, &world, &body).expect("ignored");
    assert_eq!(agent.life(), 70.0);

    agent.fire_damaged(&ctx, 500.0, &world, &body).expect("damage");
    agent.fire_damaged(&ctx, 10.0, &world, &body).expect("ignored");
    agent.fire_destroyed(&ctx, &world, &body).expect("idempotent");

    assert!(agent.is_destroyed());
    assert_eq!(agent.life(), 0.0);
    assert_eq!(
        agent.drain_events(),
        vec![
            AgentEvent::Damaged {
                amount: 30.0,
                life: 70.0
            },
            AgentEvent::Damaged {
                amount: 500.0,
                life: 0.0
            },
            AgentEvent::Destroyed,
        ]
    );
    assert!(agent.drain_events().is_empty());
    assert_eq!(agent.active_behavior(), BehaviorKind::Idle);
    assert!(!agent.controller().has_path());
    assert!(!agent.can_attack(Vec3::ZERO));
    assert_eq!(agent.position(), Vec3::new(1.0, 0.0, 2.0));
}

#[test]
fn destroyed_heli_falls_and_stops_rotor_after_delay() {
    let config = AgentConfig {
        kind: AgentKind::Heli,
        ..AgentConfig::default()
    };
    assert_eq!(config.crash.rotor_stop_seconds, 2.0);

    let mut agent = Agent::new(AgentId(4), &config).expect("agent");
    let mut body = Transform::at(Vec3::new(3.0, 10.0, 3.0));
    let world = WorldSnapshot::new();
    let mut ctx = TickContext::new(0, 0.5);

    agent.update(&ctx, &world, &mut body).expect("update");
    agent.fire_destroyed(&ctx, &world, &body).expect("destroyed");
    assert_eq!(agent.controller().target(), Some(Vec3::new(3.0, 0.0, 3.0)));
    assert!(agent.is_animating());
    assert_eq!(agent.scheduler().len(), 1);

    for _ in 0..3 {
        ctx = ctx.next();
        agent.update(&ctx, &world, &mut body).expect("update");
        assert!(agent.is_animating());
    }
    ctx = ctx.next();
    agent.update(&ctx, &world, &mut body).expect("update");
    assert!(!agent.is_animating());
    assert!(agent.scheduler().is_empty());
    assert!(body.position().y < 10.0);
}

#[test]
fn destroyed_heli_lands_on_nearest_free_ground_cell() {
    let grid = NavGrid::new(4, 4, 1.0);
    let world = WorldSnapshot::new().with_pathfinder(&grid);
    let config = AgentConfig {
        kind: AgentKind::Heli,
        ..AgentConfig::default()
    };
    let mut agent = Agent::new(AgentId(4), &config).expect("agent");
    let mut body = Transform::at(Vec3::new(10.0, 5.0, 10.0));
    let ctx = TickContext::new(0, DT);

    agent.update(&ctx, &world, &mut body).expect("update");
    agent.fire_destroyed(&ctx, &world, &body).expect("destroyed");
    assert_eq!(agent.controller().target(), Some(Vec3::new(3.5, 0.0, 3.5)));
}

#[test]
fn heli_destroyed_before_first_update_crashes_from_its_body() {
    let config = AgentConfig {
        kind: AgentKind::Heli,
        ..AgentConfig::default()
    };
    let mut agent = Agent::new(AgentId(4), &config).expect("agent");
    let mut body = Transform::at(Vec3::new(3.0, 10.0, 3.0));
    let world = WorldSnapshot::new();
    let mut ctx = TickContext::new(0, DT);

    agent.fire_destroyed(&ctx, &world, &body).expect("destroyed");
    assert_eq!(agent.controller().target(), Some(Vec3::new(3.0, 0.0, 3.0)));
    assert_eq!(agent.controller().state(), SteerState::Following);

    for _ in 0..100 {
        agent.update(&ctx, &world, &mut body).expect("update");
        ctx = ctx.next();
    }
    assert!(body.position().y < 1.0, "heli never fell: {:?}", body.position());
}

#[test]
fn lethal_damage_before_first_update_crashes_from_its_body() {
    let config = AgentConfig {
        kind: AgentKind::Heli,
        ..AgentConfig::default()
    };
    let mut agent = Agent::new(AgentId(4), &config).expect("agent");
    let body = Transform::at(Vec3::new(-2.0, 6.0, 5.0));

    agent
        .fire_damaged(&TickContext::new(0, DT), 1_000.0, &WorldSnapshot::new(), &body)
        .expect("damage");
    assert!(agent.is_destroyed());
    assert_eq!(agent.controller().target(), Some(Vec3::new(-2.0, 0.0, 5.0)));
}

#[test]
fn spawn_point_counts_for_range_before_first_update() {
    let spawn = Vec3::new(40.0, 0.0, 0.0);
    let agent = Agent::new(AgentId(1), &AgentConfig::default())
        .expect("agent")
        .spawn_at(spawn);
    let range = agent.weapon().range;

    assert_eq!(agent.position(), spawn);
    assert_eq!(agent.view().position, spawn);
    assert!(agent.can_attack(spawn + Vec3::new(range, 0.0, 0.0)));
    assert!(!agent.can_attack(Vec3::ZERO));
}

#[test]
fn display_reports_active_behavior() {
    let mut agent = Agent::new(
        AgentId(9),
        &patrol_config(vec![Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0)]),
    )
    .expect("agent");
    assert_eq!(agent.to_string(), "agent#9 Idle");

    let body = Transform::default();
    agent
        .start_patrol(&TickContext::new(0, DT), &WorldSnapshot::new(), &body)
        .expect("patrol");
    assert_eq!(agent.to_string(), "agent#9 Patrol(1/2)");
}
