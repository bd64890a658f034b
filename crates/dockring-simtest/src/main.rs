//! Dockring Headless Simulation Harness
//!
//! Drives the docking ring engine for a number of ticks and validates the
//! navigation graph and occupancy invariants along the way.
//! Runs entirely in-process with no rendering or input loop.
//!
//! Usage:
//!   cargo run -p dockring-simtest
//!   cargo run -p dockring-simtest -- --ticks 1000 --seed 7 --verbose
//!   cargo run -p dockring-simtest -- --config station.json --save run.bin

use std::cell::RefCell;
use std::fs::File;
use std::io::BufWriter;
use std::rc::Rc;

use dockring_core::persistence::read_config;
use dockring_core::prelude::*;
use dockring_logic::movement::{plan_step, Step};
use log::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_TICKS: u64 = 200;

// ── Command line ────────────────────────────────────────────────────────

struct Args {
    verbose: bool,
    ticks: u64,
    seed: Option<u64>,
    config: Option<String>,
    save: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        verbose: false,
        ticks: DEFAULT_TICKS,
        seed: None,
        config: None,
        save: None,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--verbose" | "-v" => args.verbose = true,
            "--ticks" => args.ticks = parse_value(&arg, it.next())?,
            "--seed" => args.seed = Some(parse_value(&arg, it.next())?),
            "--config" => args.config = Some(it.next().ok_or("--config needs a path")?),
            "--save" => args.save = Some(it.next().ok_or("--save needs a path")?),
            other => return Err(format!("unknown argument {other}")),
        }
    }
    Ok(args)
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    value
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| format!("{flag} needs a number"))
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    let mut config = match &args.config {
        Some(path) => match File::open(path).map_err(Into::into).and_then(read_config) {
            Ok(c) => c,
            Err(e) => {
                error!("Cannot load config {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => StationConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    println!("=== Dockring Simulation Harness ===\n");
    info!(
        "Station {} rings x {} segments, {} ticks, seed {:?}",
        config.ring_count, config.segment_count, args.ticks, config.seed
    );

    let dims = match config.dimensions() {
        Ok(d) => d,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    let mut results = Vec::new();

    // 1. Coordinate system
    results.extend(validate_coordinates(&dims));

    // 2. Adjacency rules
    results.extend(validate_adjacency(&dims));

    // 3. Admission on a fresh map
    results.extend(validate_admission(&config));

    // 4. Full tick run
    let (run_results, engine) = run_simulation(&config, args.ticks);
    results.extend(run_results);

    // 5. Persistence
    if let Some(engine) = &engine {
        results.extend(validate_persistence(engine));
        if let Some(path) = &args.save {
            match File::create(path).map(BufWriter::new) {
                Ok(w) => match engine.save(w) {
                    Ok(()) => info!("Saved final state to {}", path),
                    Err(e) => error!("Save to {} failed: {}", path, e),
                },
                Err(e) => error!("Cannot create {}: {}", path, e),
            }
        }
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Coordinates ──────────────────────────────────────────────────────

fn validate_coordinates(dims: &Dimensions) -> Vec<TestResult> {
    println!("--- Coordinate System ---");
    let mut results = Vec::new();
    let max = dims.max_index() as i64;

    let bad_round_trip = (0..=max)
        .filter(|&i| match dims.coordinate_of(i) {
            Ok(c) => dims.index_of(c.ring, c.segment as i64) as i64 != i,
            Err(_) => true,
        })
        .count();
    results.push(TestResult {
        name: "index_round_trip".into(),
        passed: bad_round_trip == 0,
        detail: format!("{} of {} indices failed round trip", bad_round_trip, max + 1),
    });

    let segments = dims.segment_count() as i64;
    let bad_wrap = (1..=dims.ring_count())
        .flat_map(|r| (-2 * segments..2 * segments).map(move |s| (r, s)))
        .filter(|&(r, s)| {
            dims.coordinate_of(dims.index_of(r, s) as i64).ok()
                != Some(Coordinate::new(r, s.rem_euclid(segments) as u32))
        })
        .count();
    results.push(TestResult {
        name: "segment_wrap".into(),
        passed: bad_wrap == 0,
        detail: format!("{} wrapped coordinates mismatched", bad_wrap),
    });

    results.push(TestResult {
        name: "dock_index_zero".into(),
        passed: [-5i64, 0, 1, 1_000].iter().all(|&s| dims.index_of(0, s) == 0),
        detail: "ring 0 maps to index 0 for any segment".into(),
    });

    results.push(TestResult {
        name: "out_of_range_rejected".into(),
        passed: dims.coordinate_of(-1).is_err() && dims.coordinate_of(max + 1).is_err(),
        detail: format!("-1 and {} rejected", max + 1),
    });

    results
}

// ── 2. Adjacency ────────────────────────────────────────────────────────

fn validate_adjacency(dims: &Dimensions) -> Vec<TestResult> {
    println!("--- Adjacency ---");
    let mut results = Vec::new();
    let map = NavigationMap::with_dimensions(*dims);
    let segments = dims.segment_count() as usize;
    let outer = dims.ring_count();

    results.push(TestResult {
        name: "dock_outbound_fan_out".into(),
        passed: map.valid_neighbors(Node::Dock, Direction::Outbound).len() == segments + 1,
        detail: format!("dock + {} ring-1 segments", segments),
    });
    results.push(TestResult {
        name: "dock_inbound_terminal".into(),
        passed: map.valid_neighbors(Node::Dock, Direction::Inbound) == vec![Node::Dock],
        detail: "inbound dock reaches only itself".into(),
    });

    let outer_node = Node::Ring(Coordinate::new(outer, 0));
    results.push(TestResult {
        name: "outer_ring_counts".into(),
        passed: map.valid_neighbors(outer_node, Direction::Inbound).len() == 4
            && map.valid_neighbors(outer_node, Direction::Outbound).len() == 3,
        detail: "outer ring: 4 inbound, 3 outbound".into(),
    });

    // Every planned advance must be a legal neighbor.
    let illegal = map
        .nodes()
        .into_iter()
        .flat_map(|n| [(n, Direction::Inbound), (n, Direction::Outbound)])
        .filter(|&(node, direction)| {
            let oncoming = |n: Node| (!n.is_dock()).then_some(direction.opposite());
            [
                plan_step(dims, node, direction, |_| None),
                plan_step(dims, node, direction, oncoming),
            ]
            .into_iter()
            .any(|step| match step {
                Step::Advance(target) | Step::Exchange(target) => {
                    !map.valid_neighbors(node, direction).contains(&target)
                }
                _ => false,
            })
        })
        .count();
    results.push(TestResult {
        name: "moves_follow_graph".into(),
        passed: illegal == 0,
        detail: format!("{} planned moves outside the neighbor set", illegal),
    });

    results
}

// ── 3. Admission ────────────────────────────────────────────────────────

fn validate_admission(config: &StationConfig) -> Vec<TestResult> {
    println!("--- Admission ---");
    let mut results = Vec::new();

    let mut engine = match StationEngine::new(StationConfig {
        inbound_spawn_chance: 0.0,
        outbound_spawn_chance: 0.0,
        ..config.clone()
    }) {
        Ok(e) => e,
        Err(e) => {
            results.push(TestResult {
                name: "admission_engine".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    let segments = config.segment_count;
    let admission_ring = engine.map().admission_ring_number();
    let mut rng = engine.rng().clone();
    let mut admitted = Vec::new();
    for _ in 0..segments {
        if let Some(id) = engine.map_mut().admit_inbound(&mut rng) {
            admitted.push(id);
        }
    }

    let in_order = admitted.iter().enumerate().all(|(s, id)| {
        engine.map().location(*id) == Some(Node::Ring(Coordinate::new(admission_ring, s as u32)))
    });
    results.push(TestResult {
        name: "admission_lowest_segment_first".into(),
        passed: admitted.len() == segments as usize && in_order,
        detail: format!("{} ships admitted on ring {}", admitted.len(), admission_ring),
    });

    let refused = !engine.map_mut().try_admit_inbound(&mut rng);
    results.push(TestResult {
        name: "admission_full_ring_refused".into(),
        passed: refused && engine.map().ship_count() == segments as usize,
        detail: "full admission ring refuses new ships".into(),
    });

    results.push(TestResult {
        name: "admission_singleton_routes".into(),
        passed: admitted.iter().all(|id| engine.map().route_of(*id).len() == 1),
        detail: "each admitted route has one entry".into(),
    });

    results
}

// ── 4. Simulation run ───────────────────────────────────────────────────

#[derive(Default)]
struct RunStats {
    ticks_seen: u64,
    admitted: usize,
    launched: usize,
    docked: usize,
    departed: usize,
    held: usize,
    out_of_order: bool,
}

fn run_simulation(config: &StationConfig, ticks: u64) -> (Vec<TestResult>, Option<StationEngine>) {
    println!("--- Simulation Run ---");
    let mut results = Vec::new();

    let mut engine = match StationEngine::new(config.clone()) {
        Ok(e) => e,
        Err(e) => {
            results.push(TestResult {
                name: "engine_new".into(),
                passed: false,
                detail: e.to_string(),
            });
            return (results, None);
        }
    };

    let stats = Rc::new(RefCell::new(RunStats::default()));
    let s = stats.clone();
    engine.subscribe(move |report: &TickReport| {
        let mut s = s.borrow_mut();
        if report.tick != s.ticks_seen + 1 {
            s.out_of_order = true;
        }
        s.ticks_seen = report.tick;
        s.admitted += report.admitted.is_some() as usize;
        s.launched += report.launched.is_some() as usize;
        s.docked += report.movement.docked.len();
        s.departed += report.movement.departed.len();
        s.held += report.movement.held.len();
    });

    // Every ship gets one ring closer within a few ticks, so a loaded
    // station that goes this long without an exit is stuck.
    let stall_limit = (20 * (config.ring_count as u64 + 1)).max(100);
    let mut idle_ticks = 0;
    let mut longest_stall = 0;
    let mut shared_nodes = 0;
    let mut broken_routes = 0;
    for _ in 0..ticks {
        let report = engine.next_tick();
        let map = engine.map();

        if report.movement.exited() > 0 || map.ship_count() == 0 {
            idle_ticks = 0;
        } else {
            idle_ticks += 1;
            longest_stall = longest_stall.max(idle_ticks);
        }

        let mut occupied: Vec<Node> = map
            .berths()
            .into_iter()
            .map(|(_, n)| n)
            .filter(|n| n.is_exclusive())
            .collect();
        let count = occupied.len();
        occupied.sort();
        occupied.dedup();
        shared_nodes += count - occupied.len();

        broken_routes += map
            .berths()
            .iter()
            .filter(|(ship, node)| map.route_of(ship.id).last() != Some(node))
            .count();
    }

    let s = stats.borrow();
    results.push(TestResult {
        name: "listener_every_tick".into(),
        passed: s.ticks_seen == ticks && !s.out_of_order,
        detail: format!("listener saw {} of {} ticks in order", s.ticks_seen, ticks),
    });
    results.push(TestResult {
        name: "ring_nodes_exclusive".into(),
        passed: shared_nodes == 0,
        detail: format!("{} shared ring nodes across run", shared_nodes),
    });
    results.push(TestResult {
        name: "routes_track_location".into(),
        passed: broken_routes == 0,
        detail: format!("{} routes not ending at current node", broken_routes),
    });
    results.push(TestResult {
        name: "dock_always_free".into(),
        passed: engine.map().is_free(Node::Dock),
        detail: format!("{} ships on dock", engine.map().docked_ships().len()),
    });
    results.push(TestResult {
        name: "traffic_summary".into(),
        passed: longest_stall < stall_limit,
        detail: format!(
            "admitted {}, launched {}, docked {}, departed {}, holds {}, on map {}, longest stall {} ticks (limit {})",
            s.admitted,
            s.launched,
            s.docked,
            s.departed,
            s.held,
            engine.map().ship_count(),
            longest_stall,
            stall_limit
        ),
    });
    drop(s);
    (results, Some(engine))
}

// ── 5. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(engine: &StationEngine) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let mut buffer = Vec::new();
    let saved = engine.save(&mut buffer);
    let mut loaded = match StationEngine::new(engine.config().clone()) {
        Ok(e) => e,
        Err(e) => {
            results.push(TestResult {
                name: "persistence_engine".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };
    let restored = saved.and_then(|_| loaded.load(&buffer[..]));

    let detail = match &restored {
        Ok(()) => format!("{} bytes, {} ships", buffer.len(), loaded.map().ship_count()),
        Err(e) => e.to_string(),
    };
    results.push(TestResult {
        name: "save_load_roundtrip".into(),
        passed: restored.is_ok()
            && loaded.current_tick() == engine.current_tick()
            && loaded.map().berths() == engine.map().berths()
            && loaded.map().routes() == engine.map().routes(),
        detail,
    });

    results
}
