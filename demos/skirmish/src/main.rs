//! skirmish — a small two-player lockstep scenario end to end.
//!
//! Loads a JSON scenario (the built-in one, or the path given as the first
//! argument), runs it to completion, then prints an event log, the final
//! actor table and an ASCII render of the map.
//!
//! Run from the workspace root:
//!
//! ```text
//! cargo run --release -p skirmish
//! cargo run --release -p skirmish -- path/to/scenario.json
//! SKIRMISH_LOG=debug cargo run -p skirmish
//! ```

mod scenario;

use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use ls_activity::{Effect, Target};
use ls_core::{ActorId, Tick};
use ls_order::{Dispatched, Order, OrderResult};
use ls_sim::{Sim, SimObserver};

use scenario::Scenario;

// ── Built-in scenario ─────────────────────────────────────────────────────────

/// Player 1 harvests and pushes east across the ridge; player 2 defends its
/// HQ and eventually sells its refinery.
const DEFAULT_SCENARIO: &str = r#"{
  "name": "ridge",
  "config": {
    "total_ticks": 160,
    "seed": 7,
    "snapshot_interval_ticks": 40,
    "path_retry_ticks": 4,
    "path_retry_limit": 3,
    "dock_retry_ticks": 6,
    "dock_ticks": 8,
    "sell_ticks": 6,
    "capture_ticks": 5,
    "attack_cooldown_ticks": 10
  },
  "connectivity": "eight",
  "map": [
    "................",
    "..........~~~...",
    "..........~~~...",
    "====....#.......",
    "....^^..#.......",
    "....^^..#.......",
    "........#..~~...",
    "................",
    "................",
    "................"
  ],
  "types": [
    { "name": "refinery", "size": [2, 2], "dock": [0, 2], "sellable": true },
    { "name": "hq",       "size": [2, 2], "capturable": true, "sellable": true },
    { "name": "truck",    "mover": "wheeled",  "harvester": true },
    { "name": "tank",     "mover": "wheeled",  "attack_range": 3 },
    { "name": "engineer", "mover": "infantry", "can_capture": true }
  ],
  "actors": [
    { "type": "refinery", "owner": 1, "at": [1, 0] },
    { "type": "truck",    "owner": 1, "at": [0, 5] },
    { "type": "truck",    "owner": 1, "at": [2, 7] },
    { "type": "tank",     "owner": 1, "at": [3, 8] },
    { "type": "engineer", "owner": 1, "at": [5, 8] },
    { "type": "hq",       "owner": 2, "at": [13, 7] },
    { "type": "tank",     "owner": 2, "at": [14, 4] },
    { "type": "refinery", "owner": 2, "at": [12, 3] }
  ],
  "orders": [
    { "tick": 0,  "kind": "dock",    "subject": 1, "target_actor": 0 },
    { "tick": 0,  "kind": "dock",    "subject": 2, "target_actor": 0 },
    { "tick": 2,  "kind": "attack",  "subject": 6, "target_actor": 3 },
    { "tick": 4,  "kind": "capture", "subject": 4, "target_actor": 5 },
    { "tick": 10, "kind": "move",    "subject": 3, "target_cell": [7, 8] },
    { "tick": 10, "kind": "attack",  "subject": 3, "target_actor": 6, "queued": true },
    { "tick": 60, "kind": "sell",    "subject": 7 },
    { "tick": 80, "kind": "stop",    "subject": 6 }
  ]
}"#;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints notable events as they happen and tallies the rest.
#[derive(Default)]
struct Narrator {
    orders:   usize,
    refused:  usize,
    shots:    usize,
    removed:  usize,
    captures: usize,
    docks:    usize,
    busiest:  usize,
}

impl SimObserver for Narrator {
    fn on_tick_end(&mut self, _tick: Tick, ticked: usize) {
        self.busiest = self.busiest.max(ticked);
    }

    fn on_order(&mut self, tick: Tick, order: &Order, result: &OrderResult<Dispatched>) {
        self.orders += 1;
        match result {
            Ok(Dispatched::Refused) => {
                self.refused += 1;
                println!("  [{:>4}] {order} refused", tick.0);
            }
            Ok(d) => println!("  [{:>4}] {order} -> {d:?}", tick.0),
            Err(e) => {
                self.refused += 1;
                println!("  [{:>4}] {order} rejected: {e}", tick.0);
            }
        }
    }

    fn on_effect(&mut self, tick: Tick, effect: &Effect) {
        match effect {
            Effect::Fire { .. } => self.shots += 1,
            Effect::TransferOwnership { actor, to } => {
                self.captures += 1;
                println!("  [{:>4}] {actor} now belongs to {to}", tick.0);
            }
            Effect::DockOccupant { dock, occupant: Some(a) } => {
                self.docks += 1;
                println!("  [{:>4}] {a} docked at {dock}", tick.0);
            }
            Effect::DockOccupant { dock, occupant: None } => {
                println!("  [{:>4}] {dock} dock cleared", tick.0);
            }
            Effect::Destroy(_) | Effect::Signal { .. } => {}
        }
    }

    fn on_actor_removed(&mut self, tick: Tick, actor: ActorId) {
        self.removed += 1;
        println!("  [{:>4}] {actor} removed", tick.0);
    }

    fn on_snapshot(&mut self, tick: Tick, actors: &ls_actor::ActorStore, stacks: &[ls_activity::ActivityStack]) {
        let busy = actors.live_ids().filter(|a| !stacks[a.index()].is_idle()).count();
        println!("  [{:>4}] snapshot: {} live, {busy} busy", tick.0, actors.live_ids().count());
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Actor glyph: first letter of the type name, upper-case for player 2 and
/// beyond.
fn glyph(sim: &Sim, actor: ActorId) -> char {
    let name = sim
        .actors
        .kind_of(actor)
        .and_then(|k| sim.rules.get(k))
        .map_or("?", |info| info.name.as_str());
    let c = name.chars().next().unwrap_or('?');
    match sim.actors.owner(actor) {
        Some(p) if p.0 >= 2 => c.to_ascii_uppercase(),
        _ => c,
    }
}

/// Terrain with actors drawn on top and `*` on every cell a live actor's
/// activities are heading for.
fn render(sim: &Sim) -> Vec<String> {
    let mut rows: Vec<Vec<char>> =
        sim.grid.to_rows().into_iter().map(|r| r.chars().collect()).collect();

    let mut put = |cell: ls_core::Cell, c: char| {
        if let Some(row) = usize::try_from(cell.y).ok().and_then(|y| rows.get_mut(y)) {
            if let Some(slot) = usize::try_from(cell.x).ok().and_then(|x| row.get_mut(x)) {
                *slot = c;
            }
        }
    };

    for actor in sim.actors.live_ids() {
        for target in sim.stacks[actor.index()].targets() {
            if let Target::Cell(cell) = target {
                put(cell, '*');
            }
        }
    }
    for actor in sim.actors.live_ids() {
        let c = glyph(sim, actor);
        for cell in sim.actors.occupied_cells(actor) {
            put(cell, c);
        }
    }

    rows.into_iter().map(|r| r.into_iter().collect()).collect()
}

// ── main ──────────────────────────────────────────────────────────────────────

/// Install a stderr subscriber filtered by `SKIRMISH_LOG` (default `warn`).
/// Library crates log through `log`; the subscriber's log bridge picks those
/// records up.
fn init_logging() -> Result<String> {
    let filter = EnvFilter::try_from_env("SKIRMISH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let shown = filter.to_string();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;
    Ok(shown)
}

fn main() -> Result<()> {
    let level = init_logging()?;

    println!("═══════════════════════════════════════════════════════════");
    println!("  lockstep — skirmish demo");
    println!("═══════════════════════════════════════════════════════════");
    println!("  log filter: {level}");

    // ── 1. Scenario ───────────────────────────────────────────────────────

    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => DEFAULT_SCENARIO.to_owned(),
    };
    let scenario = Scenario::from_json(&text)?;
    log::info!("loaded scenario {:?}", scenario.name);
    println!(
        "\n[1/3] Scenario {:?}: {} types, {} actors, {} orders",
        scenario.name,
        scenario.types.len(),
        scenario.actors.len(),
        scenario.orders.len(),
    );

    let t0 = Instant::now();
    let mut sim = scenario.into_builder()?.build().context("building sim")?;
    println!(
        "      {}x{} map, {} ticks, seed {}  ({:.1?})",
        sim.grid.width(),
        sim.grid.height(),
        sim.config.total_ticks,
        sim.config.seed,
        t0.elapsed(),
    );

    // ── 2. Run ────────────────────────────────────────────────────────────

    println!("\n[2/3] Running…");
    let mut narrator = Narrator::default();
    let t1 = Instant::now();
    sim.run(&mut narrator);
    let run_time = t1.elapsed();

    // ── 3. Report ─────────────────────────────────────────────────────────

    println!("\n[3/3] Final state at {}", sim.now());
    println!();
    println!("  {:<10} {:<9} {:>6} {:>8}  {}", "actor", "type", "owner", "cell", "doing");
    println!("  {}", "─".repeat(52));
    for actor in sim.actors.actor_ids() {
        let name = sim
            .actors
            .kind_of(actor)
            .and_then(|k| sim.rules.get(k))
            .map_or("?", |info| info.name.as_str());
        if !sim.actors.is_in_world(actor) {
            println!("  {:<10} {:<9} {:>6} {:>8}  removed", actor.to_string(), name, "-", "-");
            continue;
        }
        let owner = sim.actors.owner(actor).map_or(0, |p| p.0);
        let cell = sim.actors.position(actor).map_or_else(|| "-".to_owned(), |c| c.to_string());
        let doing = match sim.stacks[actor.index()].current() {
            Some(a) => format!("{} {}", a.kind.name(), a.kind.target()),
            None => "idle".to_owned(),
        };
        println!("  {:<10} {:<9} {:>6} {:>8}  {doing}", actor.to_string(), name, owner, cell);
    }

    println!();
    for row in render(&sim) {
        println!("    {row}");
    }

    println!();
    println!("  orders    : {} ({} refused or rejected)", narrator.orders, narrator.refused);
    println!("  shots     : {}", narrator.shots);
    println!("  captures  : {}", narrator.captures);
    println!("  dockings  : {}", narrator.docks);
    println!("  removed   : {}", narrator.removed);
    println!("  peak busy : {} actors in one tick", narrator.busiest);
    println!("  state hash: {:016x}", sim.state_hash());
    println!(
        "  run time  : {:.2?}  ({:.1} µs/tick)",
        run_time,
        run_time.as_secs_f64() * 1e6 / sim.config.total_ticks.max(1) as f64,
    );

    Ok(())
}
