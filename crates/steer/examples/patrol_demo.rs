//! Headless skirmish: a tank patrols between two checkpoints and engages a hovering heli.
//!
//! Run with `RUST_LOG=debug` to see behavior transitions.

use steer::agent::{
    Agent, AgentConfig, AgentKind, AttackTarget, PatrolConfig, TargetState, WorldSnapshot,
};
use steer::core::{AgentId, TickContext, Transform, Vec3};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    let tank_config = AgentConfig {
        kind: AgentKind::Tank,
        patrol: PatrolConfig {
            route: vec![Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0)],
            ..PatrolConfig::default()
        },
        ..AgentConfig::default()
    };
    let heli_config = AgentConfig {
        kind: AgentKind::Heli,
        life: 30.0,
        ..AgentConfig::default()
    };

    let mut tank = Agent::new(AgentId(1), &tank_config)?;
    let mut tank_body = Transform::at(Vec3::ZERO);
    let mut heli_body = Transform::at(Vec3::new(30.0, 5.0, 0.0));
    let mut heli = Agent::new(AgentId(2), &heli_config)?.spawn_at(heli_body.position);

    if let Some(patrol) = tank.behaviors_mut().patrol_mut() {
        patrol.add_target(heli.id());
    }

    let mut ctx = TickContext::new(0, 1.0 / 30.0);
    tank.start_patrol(&ctx, &WorldSnapshot::new(), &tank_body)?;

    for _ in 0..30 * 20 {
        let mut world = WorldSnapshot::new();
        world.insert(tank.id(), TargetState::new(tank_body.position, tank.life()));
        world.insert(heli.id(), TargetState::new(heli_body.position, heli.life()));

        tank.update(&ctx, &world, &mut tank_body)?;
        heli.update(&ctx, &world, &mut heli_body)?;

        for order in tank.drain_attacks() {
            if order.target == AttackTarget::Agent(heli.id()) {
                heli.fire_damaged(&ctx, order.damage, &world, &heli_body)?;
            }
        }

        if ctx.tick % 30 == 0 {
            tracing::info!(
                tick = ctx.tick,
                tank = %tank,
                tank_position = ?tank_body.position,
                heli = %heli,
                heli_altitude = heli_body.position.y,
                rotor = heli.is_animating(),
                "frame"
            );
        }
        ctx = ctx.next();
    }

    Ok(())
}
