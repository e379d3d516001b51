//! Property tests for the agent and world invariants.

use genesis_sim::agent::ARRIVAL_RADIUS;
use genesis_sim::{Agent, AgentState, Position, RunState, World, WorldConfig};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone, Copy)]
enum Start {
    Idle,
    Moving(f64, f64),
    Working,
    Resting,
}

fn start_state() -> impl Strategy<Value = Start> {
    prop_oneof![
        Just(Start::Idle),
        (-50.0..250.0f64, -50.0..250.0f64).prop_map(|(x, y)| Start::Moving(x, y)),
        Just(Start::Working),
        Just(Start::Resting),
    ]
}

fn agent_in(start: Start, x: f64, y: f64, energy: f64, speed: f64) -> Agent {
    let mut agent = Agent::new(1, x, y).with_energy(energy).with_speed(speed);
    match start {
        Start::Idle => {}
        Start::Moving(tx, ty) => agent.set_target(tx, ty),
        Start::Working => agent.start_working(),
        Start::Resting => agent.rest(),
    }
    agent
}

#[derive(Debug, Clone, Copy)]
enum Control {
    Pause,
    Resume,
    Step,
    Tick(f64),
}

fn control() -> impl Strategy<Value = Control> {
    prop_oneof![
        Just(Control::Pause),
        Just(Control::Resume),
        Just(Control::Step),
        (0.0..5.0f64).prop_map(Control::Tick),
    ]
}

proptest! {
    #[test]
    fn energy_and_position_stay_in_bounds(
        start in start_state(),
        x in 0.0..=200.0f64,
        y in 0.0..=150.0f64,
        energy in 0.0..=100.0f64,
        speed in 0.0..500.0f64,
        deltas in prop::collection::vec(0.0..3.0f64, 1..40),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut agent = agent_in(start, x, y, energy, speed);
        for dt in deltas {
            agent.update(dt, 200, 150, &mut rng);
            prop_assert!((0.0..=100.0).contains(&agent.energy()));
            prop_assert!((0.0..=100.0).contains(&agent.health()));
            prop_assert!(agent.position().within(200, 150), "escaped to {}", agent.position());
            prop_assert_eq!(agent.target().is_some(), matches!(agent.state(), AgentState::Moving { .. }));
        }
    }

    #[test]
    fn close_targets_arrive_in_one_call(
        x in 10.0..90.0f64,
        y in 10.0..90.0f64,
        angle in 0.0..std::f64::consts::TAU,
        radius in 0.0..ARRIVAL_RADIUS,
        dt in 0.0..2.0f64,
    ) {
        let target = Position::new(x + radius * angle.cos(), y + radius * angle.sin());
        prop_assume!(Position::new(x, y).distance_to(target) < ARRIVAL_RADIUS);

        let mut agent = Agent::new(1, x, y);
        agent.set_target(target.x, target.y);
        agent.update(dt, 100, 100, &mut StdRng::seed_from_u64(0));

        prop_assert_eq!(agent.state(), AgentState::Idle);
        prop_assert_eq!(agent.target(), None);
        prop_assert_eq!(agent.position(), target);
    }

    #[test]
    fn world_clock_is_monotonic(controls in prop::collection::vec(control(), 1..60)) {
        let mut world = World::new(WorldConfig::default().with_time_scale(1.5));
        for control in controls {
            let (tick, time, state) = (world.current_tick(), world.current_time(), world.state());
            match control {
                Control::Pause => { world.pause(); }
                Control::Resume => { world.resume(); }
                Control::Step => { world.step(); }
                Control::Tick(dt) => {
                    let advanced = world.tick(dt);
                    prop_assert_eq!(advanced, state != RunState::Paused);
                    if state == RunState::Paused {
                        prop_assert_eq!(world.current_tick(), tick);
                        prop_assert_eq!(world.current_time(), time);
                    } else {
                        prop_assert_eq!(world.current_tick(), tick + 1);
                        prop_assert!(world.current_time() >= time);
                    }
                    if state == RunState::Step {
                        prop_assert_eq!(world.state(), RunState::Paused);
                    }
                }
            }
            prop_assert!(world.current_tick() >= tick);
            prop_assert!(world.current_time() >= time);
        }
    }

    #[test]
    fn time_scale_always_clamped(scale in -1.0e6..1.0e6f64) {
        let mut world = World::default();
        world.set_time_scale(scale);
        prop_assert!((0.0..=10.0).contains(&world.time_scale()));
    }
}
