use std::collections::BTreeMap;
use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tracing::debug;

use genesis_sim::{SimEventKind, Simulation, StateCounts};

/// Options for `genesis run`.
pub struct RunArgs {
    pub frames: u64,
    pub dt: Option<f64>,
    pub seed: Option<u64>,
    pub population: Option<usize>,
    pub time_scale: Option<f64>,
    pub config: Option<PathBuf>,
    pub paused: bool,
    pub json: bool,
    pub verbose: bool,
}

pub fn run(args: &RunArgs) -> Result<(), String> {
    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(population) = args.population {
        config = config.with_population(population);
    }
    if let Some(scale) = args.time_scale {
        config.world = config.world.with_time_scale(scale);
    }
    config.validate().map_err(|e| e.to_string())?;

    let dt = args.dt.unwrap_or_else(|| config.world.frame_delta());
    if !dt.is_finite() || dt < 0.0 {
        return Err(format!("frame delta must be a non-negative number, got {dt}"));
    }
    debug!(?config, dt, "starting run");

    let seed = config.seed;
    let mut sim = Simulation::new(config);
    if !args.paused {
        sim.resume();
    }
    sim.run(args.frames, dt);

    if args.json {
        let json = sim.snapshot().to_json().map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(());
    }

    print_summary(&sim, args.frames, seed, dt);
    if args.verbose {
        print_events(&sim);
    } else {
        print_movement(&sim);
    }
    print_states(&sim.state_counts());
    print_occupations(&sim);
    Ok(())
}

fn print_summary(sim: &Simulation, frames: u64, seed: u64, dt: f64) {
    let world = sim.world();
    println!(
        "  {} {}",
        "Simulation".bold(),
        format!(
            "({frames} frames, seed={seed}, dt={dt:.4}s, scale={}x)",
            world.time_scale()
        )
        .dimmed()
    );
    println!(
        "  {} NPCs in a {}x{} world, {} events logged",
        sim.npc_count(),
        world.width(),
        world.height(),
        sim.events().len()
    );
    println!(
        "  Tick {}, {:.2} days passed ({})",
        world.current_tick(),
        world.days_passed(),
        world.state()
    );
    println!();
}

fn print_events(sim: &Simulation) {
    println!("  {}", "Event Log".bold().underline());
    println!();
    for event in sim.events().events() {
        let tick_label = format!("[tick {:>5}]", event.tick).dimmed();
        let desc = colorize_event(&event.kind, &event.description);
        println!("  {tick_label} {desc}");
    }
    if sim.events().is_empty() {
        println!("  {}", "(no events)".dimmed());
    }
    println!();
}

fn print_movement(sim: &Simulation) {
    let (departures, arrivals) =
        sim.events()
            .events()
            .iter()
            .fold((0, 0), |(d, a), event| match event.kind {
                SimEventKind::Departed { .. } => (d + 1, a),
                SimEventKind::Arrived { .. } => (d, a + 1),
                _ => (d, a),
            });
    if departures > 0 || arrivals > 0 {
        println!(
            "  {} {} departures, {} arrivals",
            "MOVE".blue().bold(),
            departures,
            arrivals
        );
        println!();
    }
}

fn print_states(counts: &StateCounts) {
    println!("  {}", "Behavior".bold().underline());
    println!();

    let total = counts.total().max(1) as f64;
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["State", "NPCs", "Share"]);
    for (label, count) in [
        ("idle", counts.idle),
        ("moving", counts.moving),
        ("working", counts.working),
        ("resting", counts.resting),
    ] {
        table.add_row(vec![
            label.to_string(),
            count.to_string(),
            format!("{:>5.1}%", count as f64 / total * 100.0),
        ]);
    }
    println!("{table}");
    println!();
}

fn print_occupations(sim: &Simulation) {
    let mut groups: BTreeMap<String, (usize, f64, f64)> = BTreeMap::new();
    for npc in sim.npcs() {
        let entry = groups.entry(npc.occupation.to_string()).or_default();
        entry.0 += 1;
        entry.1 += npc.energy();
        entry.2 += npc.wealth;
    }
    if groups.is_empty() {
        println!("  {}", "(no NPCs)".dimmed());
        return;
    }

    println!("  {}", "Occupations".bold().underline());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Occupation", "NPCs", "Energy", "Wealth"]);
    for (occupation, (count, energy, wealth)) in &groups {
        let n = *count as f64;
        table.add_row(vec![
            occupation.clone(),
            count.to_string(),
            format_energy_bar(energy / n),
            format!("{:.0}", wealth / n),
        ]);
    }
    println!("{table}");
    println!();
}

fn colorize_event(kind: &SimEventKind, description: &str) -> colored::ColoredString {
    match kind {
        SimEventKind::Departed { .. } | SimEventKind::Arrived { .. } => description.blue(),
        SimEventKind::StateChanged { .. } => description.cyan(),
        SimEventKind::NpcAdded { .. } => description.green(),
        SimEventKind::NpcRemoved { .. } => description.red(),
        SimEventKind::RunStateChanged { .. } => description.yellow(),
    }
}

fn format_energy_bar(energy: f64) -> String {
    let fraction = (energy / 100.0).clamp(0.0, 1.0);
    let filled = (fraction * 10.0).round() as usize;
    let empty = 10_usize.saturating_sub(filled);
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(empty));

    if fraction <= 0.15 {
        format!("[{}] {:>3.0}", bar.red(), energy)
    } else if fraction <= 0.4 {
        format!("[{}] {:>3.0}", bar.yellow(), energy)
    } else {
        format!("[{}] {:>3.0}", bar.green(), energy)
    }
}
