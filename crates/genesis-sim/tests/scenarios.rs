//! End-to-end scenarios driving a whole simulation.

use genesis_sim::{
    Agent, AgentState, NpcId, Position, RunState, SimConfig, SimEventKind, Simulation, WorldConfig,
};

fn world_100() -> SimConfig {
    SimConfig::default()
        .with_world(WorldConfig::default().with_size(100, 100))
        .with_population(0)
}

#[test]
fn walker_crosses_the_world_and_stops() {
    let mut sim = Simulation::with_npcs(world_100(), vec![Agent::new(1, 0.0, 0.0)]);
    sim.npc_mut(NpcId(1)).unwrap().set_target(100.0, 0.0);

    sim.update(1.0);
    let npc = sim.npc(NpcId(1)).unwrap();
    assert_eq!(npc.position(), Position::new(50.0, 0.0));
    assert!(matches!(npc.state(), AgentState::Moving { .. }));

    sim.update(1.0);
    assert_eq!(sim.npc(NpcId(1)).unwrap().position(), Position::new(100.0, 0.0));

    sim.update(1.0);
    let npc = sim.npc(NpcId(1)).unwrap();
    assert_eq!(npc.position(), Position::new(100.0, 0.0));
    assert_eq!(npc.state(), AgentState::Idle);
    assert_eq!(npc.target(), None);
}

#[test]
fn worker_energy_ordering() {
    let mut worker = Agent::new(1, 0.0, 0.0).with_energy(3.0);
    worker.start_working();
    let mut sim = Simulation::with_npcs(world_100(), vec![worker]);

    sim.update(1.0);
    let npc = sim.npc(NpcId(1)).unwrap();
    assert!((npc.energy() - 8.0).abs() < 1e-9);
    assert_eq!(npc.state(), AgentState::Working);
}

#[test]
fn paused_world_keeps_time_but_agents_live() {
    let mut sim = Simulation::new(world_100().with_population(30));
    let before = sim.npcs().to_vec();
    for _ in 0..200 {
        sim.update(0.1);
    }
    assert_eq!(sim.world().current_tick(), 0);
    assert_eq!(sim.world().days_passed(), 0.0);
    assert_ne!(sim.npcs(), before.as_slice());
}

#[test]
fn running_world_tracks_days() {
    let mut sim = Simulation::new(world_100().with_population(10));
    sim.resume();
    sim.world_mut().set_time_scale(2.0);
    sim.run(10, 0.5);
    assert_eq!(sim.world().current_tick(), 10);
    assert!((sim.world().days_passed() - 10.0).abs() < 1e-9);
    assert_eq!(sim.world().state(), RunState::Running);
}

#[test]
fn idle_population_eventually_wanders() {
    let mut sim = Simulation::new(world_100().with_population(50).with_seed(11));
    sim.resume();
    sim.run(500, 1.0 / 60.0);
    let departures = sim
        .events()
        .events()
        .iter()
        .filter(|e| matches!(e.kind, SimEventKind::Departed { .. }))
        .count();
    assert!(departures > 0);
    for npc in sim.npcs() {
        assert!(npc.position().within(100, 100));
    }
}

#[test]
fn removing_unknown_id_keeps_population() {
    let mut sim = Simulation::new(world_100().with_population(12));
    sim.remove_npc(NpcId(12));
    assert_eq!(sim.npc_count(), 12);
    sim.remove_npc(NpcId(3));
    assert_eq!(sim.npc_count(), 11);
    assert!(sim.npcs().iter().all(|npc| npc.id() != NpcId(3)));
}

#[test]
fn snapshot_reflects_population() {
    let mut sim = Simulation::new(world_100().with_population(8));
    sim.npc_mut(NpcId(0)).unwrap().start_working();
    let snapshot = sim.snapshot();
    assert_eq!(snapshot.npc_count, 8);
    assert_eq!(snapshot.state_counts.total(), 8);
    assert_eq!(snapshot.state_counts.working, 1);
    assert_eq!(snapshot.npcs.len(), 8);
}
