//! Tests for the targeting strategies, the world container and the coordinator.

use rampart_core::commands::ShotKind;
use rampart_core::config::TargetingConfig;
use rampart_core::error::ConfigError;
use rampart_core::types::{Defender, Hostile, HostileId, Position};

use crate::coordinator::{CoordinatorState, TargetingCoordinator};
use crate::strategy::{ClusterStrategy, PrimaryStrategy, StrategyKind, TargetingStrategy};
use crate::world::{DefenseState, WorldState};

fn hostile(id: u32, x: f64, y: f64, health: u32) -> Hostile {
    Hostile::new(id, Position::new(x, y), 2.0, health)
}

fn world_with(config: &TargetingConfig, energy: f64, hostiles: &[Hostile]) -> DefenseState {
    let mut world = DefenseState::new(
        config.clone(),
        Defender {
            position: Position::new(0.0, 0.0),
            shoot_cooldown: 0.0,
            energy,
        },
    );
    for h in hostiles {
        world.insert_hostile(*h);
    }
    world
}

fn find(
    strategy: &impl TargetingStrategy,
    world: &DefenseState,
    last_target: Option<u32>,
    flight_time: f64,
) -> Option<HostileId> {
    strategy
        .find_target(
            world.hostiles(),
            world.defender(),
            last_target.map(HostileId),
            flight_time,
        )
        .map(|h| h.id)
}

// ---- Primary strategy ----

#[test]
fn test_primary_picks_nearest_approaching() {
    let config = TargetingConfig::default();
    let strategy = PrimaryStrategy::new(&config, 45.0);
    let world = world_with(
        &config,
        0.0,
        &[
            hostile(0, 90.0, 0.0, 10),
            hostile(1, 30.0, 4.0, 10),
            hostile(2, 60.0, 0.0, 10),
            hostile(3, -5.0, 0.0, 10),
            hostile(4, 0.0, 0.0, 10),
        ],
    );
    assert_eq!(find(&strategy, &world, None, 0.0), Some(HostileId(1)));
}

#[test]
fn test_primary_measures_offset_from_defender() {
    let config = TargetingConfig::default();
    let strategy = PrimaryStrategy::new(&config, 45.0);
    let mut world = world_with(
        &config,
        0.0,
        &[hostile(0, 40.0, 0.0, 10), hostile(1, 70.0, 0.0, 10)],
    );
    world.defender_mut().position = Position::new(50.0, 0.0);
    assert_eq!(find(&strategy, &world, None, 0.0), Some(HostileId(1)));
}

#[test]
fn test_primary_empty_roster() {
    let config = TargetingConfig::default();
    let strategy = PrimaryStrategy::new(&config, 45.0);
    let world = world_with(&config, 0.0, &[]);
    assert_eq!(find(&strategy, &world, None, 0.0), None);
}

#[test]
fn test_primary_skips_lethally_committed_target() {
    let config = TargetingConfig::default();
    let strategy = PrimaryStrategy::new(&config, 45.0);
    let world = world_with(
        &config,
        0.0,
        &[hostile(0, 20.0, 0.0, 10), hostile(1, 40.0, 0.0, 10)],
    );

    // Projectile in flight and one hit kills: move on.
    assert_eq!(find(&strategy, &world, Some(0), 0.1), Some(HostileId(1)));
    // Projectile has landed.
    assert_eq!(find(&strategy, &world, Some(0), 0.0), Some(HostileId(0)));
    // Different previous target.
    assert_eq!(find(&strategy, &world, Some(1), 0.1), Some(HostileId(0)));
}

#[test]
fn test_primary_retargets_hostile_that_survives_hit() {
    let config = TargetingConfig::default();
    let strategy = PrimaryStrategy::new(&config, 45.0);
    let world = world_with(
        &config,
        0.0,
        &[hostile(0, 20.0, 0.0, 25), hostile(1, 40.0, 0.0, 10)],
    );
    assert_eq!(find(&strategy, &world, Some(0), 0.1), Some(HostileId(0)));
}

#[test]
fn test_primary_shoots_solved_target() {
    let config = TargetingConfig::default();
    let strategy = PrimaryStrategy::new(&config, 45.0);
    let target = hostile(0, 100.0, 0.0, 10);
    let mut world = world_with(&config, 0.0, &[target]);

    let shot = strategy.try_shoot(&target, &mut world).unwrap();
    assert!(shot.solved);
    assert_eq!(shot.strategy, StrategyKind::Primary);
    assert_eq!(shot.target, HostileId(0));
    assert!((0.0..=100.0).contains(&shot.power));
    assert!(shot.flight_time > 0.0);

    let shots = world.shots();
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].kind, ShotKind::Normal);
    assert_eq!(shots[0].angle, 45.0);
    assert_eq!(shots[0].power, shot.power);
    assert_eq!(world.defender().shoot_cooldown, config.shoot_cooldown);
}

#[test]
fn test_primary_fires_at_fallback_power_when_unsolved() {
    let config = TargetingConfig::default();
    let strategy = PrimaryStrategy::new(&config, 45.0);
    let target = hostile(0, 10_000.0, 0.0, 10);
    let mut world = world_with(&config, 0.0, &[target]);

    let shot = strategy.try_shoot(&target, &mut world).unwrap();
    assert!(!shot.solved);
    assert_eq!(shot.power, config.fallback_power);
    assert_eq!(shot.flight_time, 0.0);
    assert_eq!(world.shots().len(), 1);
}

// ---- Cluster strategy ----

#[test]
fn test_cluster_needs_enough_total_shots() {
    let config = TargetingConfig::default();
    let strategy = ClusterStrategy::new(&config, 45.0);
    // Two stacked one-shot hostiles: roster total 2.
    let world = world_with(
        &config,
        100.0,
        &[hostile(0, 50.0, 0.0, 10), hostile(1, 50.0, 1.0, 10)],
    );
    assert_eq!(find(&strategy, &world, None, 0.0), None);
}

#[test]
fn test_cluster_selects_from_stack() {
    let config = TargetingConfig::default();
    let strategy = ClusterStrategy::new(&config, 45.0);
    let world = world_with(
        &config,
        100.0,
        &[
            hostile(0, 50.0, 0.0, 20),
            hostile(1, 50.0, 0.5, 20),
            hostile(2, 50.0, 1.0, 20),
        ],
    );
    assert_eq!(find(&strategy, &world, None, 0.0), Some(HostileId(0)));
}

#[test]
fn test_cluster_ignores_lone_weak_hostiles() {
    let config = TargetingConfig::default();
    let strategy = ClusterStrategy::new(&config, 45.0);
    // Roster total 3, but no cluster reaches 2.
    let world = world_with(
        &config,
        100.0,
        &[
            hostile(0, 30.0, 0.0, 10),
            hostile(1, 60.0, 0.0, 10),
            hostile(2, 90.0, 0.0, 10),
        ],
    );
    assert_eq!(find(&strategy, &world, None, 0.0), None);
}

#[test]
fn test_cluster_membership_tolerances() {
    let config = TargetingConfig::default();
    let strategy = ClusterStrategy::new(&config, 45.0);

    // Horizontal offsets must match exactly.
    let world = world_with(
        &config,
        100.0,
        &[
            hostile(0, 50.0, 0.0, 10),
            hostile(1, 50.1, 0.0, 10),
            hostile(2, 90.0, 0.0, 10),
        ],
    );
    assert_eq!(find(&strategy, &world, None, 0.0), None);

    // Vertical gap of more than one unit splits the cluster.
    let world = world_with(
        &config,
        100.0,
        &[
            hostile(0, 50.0, 0.0, 10),
            hostile(1, 50.0, 1.5, 10),
            hostile(2, 90.0, 0.0, 10),
        ],
    );
    assert_eq!(find(&strategy, &world, None, 0.0), None);

    // Exactly one unit apart still clusters.
    let world = world_with(
        &config,
        100.0,
        &[
            hostile(0, 50.0, 0.0, 10),
            hostile(1, 50.0, 1.0, 10),
            hostile(2, 90.0, 0.0, 10),
        ],
    );
    assert_eq!(find(&strategy, &world, None, 0.0), Some(HostileId(0)));
}

#[test]
fn test_cluster_prefers_nearer_cluster_of_three_or_more() {
    let config = TargetingConfig::default();
    let strategy = ClusterStrategy::new(&config, 45.0);
    let world = world_with(
        &config,
        100.0,
        &[
            // Far cluster, 4 shots.
            hostile(0, 80.0, 0.0, 20),
            hostile(1, 80.0, 0.5, 20),
            // Near cluster, 3 shots.
            hostile(2, 40.0, 0.0, 20),
            hostile(3, 40.0, 0.5, 10),
        ],
    );
    assert_eq!(find(&strategy, &world, None, 0.0), Some(HostileId(2)));
}

#[test]
fn test_cluster_prefers_larger_cluster_over_small_near_one() {
    let config = TargetingConfig::default();
    let strategy = ClusterStrategy::new(&config, 45.0);
    let world = world_with(
        &config,
        100.0,
        &[
            // Far cluster, 4 shots.
            hostile(0, 80.0, 0.0, 20),
            hostile(1, 80.0, 0.5, 20),
            // Near lone hostile, 2 shots.
            hostile(2, 40.0, 0.0, 20),
        ],
    );
    assert_eq!(find(&strategy, &world, None, 0.0), Some(HostileId(0)));
}

#[test]
fn test_cluster_larger_cluster_replaces_earlier_pick() {
    let config = TargetingConfig::default();
    let strategy = ClusterStrategy::new(&config, 45.0);
    let world = world_with(
        &config,
        100.0,
        &[
            // Near lone hostile, 2 shots, seen first.
            hostile(0, 40.0, 0.0, 20),
            // Far cluster, 4 shots.
            hostile(1, 80.0, 0.0, 20),
            hostile(2, 80.0, 0.5, 20),
        ],
    );
    assert_eq!(find(&strategy, &world, None, 0.0), Some(HostileId(1)));
}

#[test]
fn test_cluster_excludes_committed_hostile() {
    let config = TargetingConfig::default();
    let strategy = ClusterStrategy::new(&config, 45.0);
    let world = world_with(
        &config,
        100.0,
        &[
            hostile(0, 50.0, 0.0, 10),
            hostile(1, 50.0, 0.5, 10),
            hostile(2, 50.0, 1.0, 10),
        ],
    );
    assert_eq!(find(&strategy, &world, None, 0.0), Some(HostileId(0)));
    // Hostile 0 is about to die; the remaining two need only 2 shots.
    assert_eq!(find(&strategy, &world, Some(0), 0.1), None);
}

#[test]
fn test_cluster_totals_do_not_overflow() {
    let config = TargetingConfig {
        bullet_damage: 1,
        ..Default::default()
    };
    let strategy = ClusterStrategy::new(&config, 45.0);
    // u32::MAX + 1 shots: a u32 total would wrap to 0 and fail the roster gate.
    let world = world_with(
        &config,
        100.0,
        &[hostile(0, 50.0, 0.0, u32::MAX), hostile(1, 50.0, 0.5, 1)],
    );
    assert_eq!(find(&strategy, &world, None, 0.0), Some(HostileId(0)));

    let world = world_with(
        &config,
        100.0,
        &[
            hostile(0, 30.0, 0.0, 2),
            hostile(1, 80.0, 0.0, u32::MAX),
            hostile(2, 80.0, 1.0, u32::MAX),
            hostile(3, 80.0, 0.5, u32::MAX),
        ],
    );
    assert_eq!(find(&strategy, &world, None, 0.0), Some(HostileId(1)));
}

#[test]
fn test_cluster_refuses_without_energy() {
    let config = TargetingConfig::default();
    let strategy = ClusterStrategy::new(&config, 45.0);
    let target = hostile(0, 50.0, 0.0, 20);
    let mut world = world_with(&config, config.energy_threshold - 1.0, &[target]);

    assert!(strategy.try_shoot(&target, &mut world).is_none());
    assert!(world.shots().is_empty());
    assert_eq!(world.defender().energy, config.energy_threshold - 1.0);
}

#[test]
fn test_cluster_refuses_unsolved_shot() {
    let config = TargetingConfig::default();
    let strategy = ClusterStrategy::new(&config, 45.0);
    let target = hostile(0, 10_000.0, 0.0, 20);
    let mut world = world_with(&config, 150.0, &[target]);

    assert!(strategy.try_shoot(&target, &mut world).is_none());
    assert!(world.shots().is_empty());
    assert_eq!(world.defender().energy, 150.0);
    assert_eq!(world.defender().shoot_cooldown, 0.0);
}

#[test]
fn test_cluster_fires_special_shot() {
    let config = TargetingConfig::default();
    let strategy = ClusterStrategy::new(&config, 45.0);
    let target = hostile(0, 50.0, 0.0, 20);
    let mut world = world_with(&config, 150.0, &[target]);

    let shot = strategy.try_shoot(&target, &mut world).unwrap();
    assert_eq!(shot.strategy, StrategyKind::Cluster);
    assert!(shot.solved);
    assert!(shot.flight_time > 0.0);

    assert_eq!(world.shots().len(), 1);
    assert_eq!(world.shots()[0].kind, ShotKind::Special);
    assert_eq!(world.defender().energy, 150.0 - config.special_shot_cost);
    assert_eq!(world.defender().shoot_cooldown, config.shoot_cooldown);
}

// ---- World container ----

#[test]
fn test_defense_state_bookkeeping() {
    let config = TargetingConfig {
        shoot_cooldown: 0.5,
        special_shot_cost: 80.0,
        ..Default::default()
    };
    let mut world = world_with(&config, 50.0, &[hostile(3, 10.0, 0.0, 10)]);

    world.issue_special_shot(45.0, 10.0);
    assert_eq!(world.defender().energy, 0.0);
    assert_eq!(world.defender().shoot_cooldown, 0.5);

    world.advance(0.25);
    assert_eq!(world.defender().shoot_cooldown, 0.25);
    world.advance(1.0);
    assert_eq!(world.defender().shoot_cooldown, 0.0);

    world.issue_shot(45.0, 20.0);
    let shots = world.take_shots();
    assert_eq!(shots.len(), 2);
    assert_eq!(shots[0].kind, ShotKind::Special);
    assert_eq!(shots[1].kind, ShotKind::Normal);
    assert!(world.shots().is_empty());

    assert!(world.remove_hostile(HostileId(3)).is_some());
    assert!(world.hostiles().is_empty());
}

// ---- Coordinator ----

#[test]
fn test_coordinator_rejects_invalid_config() {
    let config = TargetingConfig {
        power_boost_max: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        TargetingCoordinator::with_default_strategies(&config),
        Err(ConfigError::InvalidPowerSpan(_))
    ));
}

#[test]
fn test_coordinator_default_priority_order() {
    let coordinator =
        TargetingCoordinator::with_default_strategies(&TargetingConfig::default()).unwrap();
    let kinds: Vec<StrategyKind> = coordinator.strategies().iter().map(|s| s.kind()).collect();
    assert_eq!(kinds, vec![StrategyKind::Cluster, StrategyKind::Primary]);
}

#[test]
fn test_coordinator_idle_when_paused() {
    let config = TargetingConfig::default();
    let mut coordinator = TargetingCoordinator::with_default_strategies(&config).unwrap();
    let mut world = world_with(&config, 0.0, &[hostile(0, 50.0, 0.0, 10)]);
    world.set_playing(false);

    let report = coordinator.tick(config.fixed_time_step, &mut world);
    assert_eq!(report.state, CoordinatorState::Idle);
    assert!(report.shot.is_none());
    assert!(world.shots().is_empty());
}

#[test]
fn test_coordinator_idle_during_cooldown() {
    let config = TargetingConfig::default();
    let mut coordinator = TargetingCoordinator::with_default_strategies(&config).unwrap();
    let mut world = world_with(&config, 0.0, &[hostile(0, 50.0, 0.0, 10)]);
    world.defender_mut().shoot_cooldown = 0.1;

    let report = coordinator.tick(config.fixed_time_step, &mut world);
    assert_eq!(report.state, CoordinatorState::Idle);
    assert_eq!(coordinator.state(), CoordinatorState::Idle);
    assert!(world.shots().is_empty());
}

#[test]
fn test_coordinator_one_shot_then_cooldown() {
    let config = TargetingConfig::default();
    let mut coordinator = TargetingCoordinator::with_default_strategies(&config).unwrap();
    let mut world = world_with(&config, 0.0, &[hostile(0, 50.0, 0.0, 10)]);

    let report = coordinator.tick(config.fixed_time_step, &mut world);
    assert_eq!(report.state, CoordinatorState::Evaluating);
    let shot = report.shot.unwrap();
    assert_eq!(shot.strategy, StrategyKind::Primary);
    assert_eq!(coordinator.last_target(), Some(HostileId(0)));
    assert_eq!(coordinator.flight_time(), shot.flight_time);

    // The shot reset the world's cooldown, so the next tick holds fire.
    let report = coordinator.tick(config.fixed_time_step, &mut world);
    assert_eq!(report.state, CoordinatorState::Idle);
    assert_eq!(world.shots().len(), 1);
}

#[test]
fn test_coordinator_accumulates_fixed_steps() {
    let config = TargetingConfig {
        fixed_time_step: 0.25,
        ..Default::default()
    };
    let mut coordinator = TargetingCoordinator::with_default_strategies(&config).unwrap();
    let mut world = world_with(&config, 0.0, &[]);

    assert_eq!(coordinator.tick(0.625, &mut world).steps, 2);
    assert_eq!(coordinator.tick(0.125, &mut world).steps, 1);
    assert_eq!(coordinator.tick(0.125, &mut world).steps, 0);
    assert_eq!(coordinator.tick(0.0, &mut world).steps, 0);
    assert_eq!(coordinator.tick(-1.0, &mut world).steps, 0);
    assert_eq!(coordinator.tick(f64::NAN, &mut world).steps, 0);
    assert_eq!(coordinator.tick(0.125, &mut world).steps, 1);
}

#[test]
fn test_coordinator_consumes_huge_stall_in_one_tick() {
    let config = TargetingConfig::default();
    let mut coordinator = TargetingCoordinator::with_default_strategies(&config).unwrap();
    let mut world = world_with(&config, 0.0, &[hostile(0, 100.0, 0.0, 10)]);

    coordinator.tick(0.0, &mut world).shot.unwrap();
    assert!(coordinator.flight_time() > 0.0);
    world.set_playing(false);

    let report = coordinator.tick(1e20, &mut world);
    assert_eq!(report.steps, u32::MAX);
    assert_eq!(coordinator.flight_time(), 0.0);
    assert_eq!(coordinator.tick(0.0, &mut world).steps, 0);

    coordinator.tick(f64::MAX, &mut world);
    coordinator.tick(f64::MAX, &mut world);
    assert_eq!(coordinator.tick(0.0, &mut world).steps, 0);
    assert_eq!(coordinator.tick(config.fixed_time_step, &mut world).steps, 1);
}

#[test]
fn test_coordinator_flight_timer_counts_down_per_step() {
    let config = TargetingConfig::default();
    let step = config.fixed_time_step;
    let mut coordinator = TargetingCoordinator::with_default_strategies(&config).unwrap();
    let mut world = world_with(&config, 0.0, &[hostile(0, 100.0, 0.0, 10)]);

    let shot = coordinator.tick(0.0, &mut world).shot.unwrap();
    assert!(shot.flight_time > step);
    world.set_playing(false);

    let mut previous = coordinator.flight_time();
    for _ in 0..100 {
        let report = coordinator.tick(step * 1.000_001, &mut world);
        let remaining = coordinator.flight_time();
        assert!(remaining >= 0.0);
        if previous >= step {
            assert_eq!(report.steps, 1);
            assert!((previous - remaining - step).abs() < 1e-12);
        } else {
            assert_eq!(remaining, 0.0);
        }
        previous = remaining;
    }
    assert_eq!(coordinator.flight_time(), 0.0);
}

#[test]
fn test_coordinator_skips_committed_target_next_round() {
    let config = TargetingConfig {
        shoot_cooldown: 0.0,
        ..Default::default()
    };
    let mut coordinator = TargetingCoordinator::with_default_strategies(&config).unwrap();
    let mut world = world_with(
        &config,
        0.0,
        &[hostile(0, 20.0, 0.0, 10), hostile(1, 40.0, 0.0, 10)],
    );

    let first = coordinator.tick(0.0, &mut world).shot.unwrap();
    assert_eq!(first.target, HostileId(0));
    assert!(coordinator.flight_time() > 0.0);

    let second = coordinator.tick(0.0, &mut world).shot.unwrap();
    assert_eq!(second.target, HostileId(1));
    assert_eq!(coordinator.last_target(), Some(HostileId(1)));
}

#[test]
fn test_tick_report_serializes() {
    let config = TargetingConfig::default();
    let mut coordinator = TargetingCoordinator::with_default_strategies(&config).unwrap();
    let mut world = world_with(&config, 0.0, &[hostile(0, 50.0, 0.0, 10)]);

    let report = coordinator.tick(0.0, &mut world);
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"Primary\""));
    assert!(json.contains("\"Evaluating\""));
}
