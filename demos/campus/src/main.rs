//! campus — run one simulated day of students walking across campus.
//!
//! Without arguments, simulates four students on the embedded 16-junction
//! campus from 07:00 to 24:00 as fast as possible and writes CSV output to
//! `output/campus`.  `--matrix`/`--positions`/`--timetable` swap in other
//! data; `--realtime` paces the day at `tick_interval_ms` per minute.
//!
//! Set `RUST_LOG=debug` to see every departure and arrival.

mod network;

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use cn_agent::AgentStoreBuilder;
use cn_core::{AgentId, ClockTime, NodeId, SimConfig};
use cn_graph::{GraphError, Route, Router, load_graph_csv};
use cn_motion::{Frame, MotionStore};
use cn_output::{CsvWriter, OutputWriter, SimOutputObserver};
use cn_schedule::{Timetable, load_timetables_csv, load_timetables_reader};
use cn_sim::{DisplaySnapshot, Sim, SimBuilder, SimObserver, SimResult};

use network::build_campus;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file with `SimConfig` fields; missing fields take their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Square weight-matrix CSV (header row plus a label column).
    #[arg(long, requires = "positions")]
    matrix: Option<PathBuf>,

    /// `node,x,y` CSV for the nodes of `--matrix`.
    #[arg(long)]
    positions: Option<PathBuf>,

    /// `agent_id,departure,origin,destination` CSV.
    #[arg(short, long)]
    timetable: Option<PathBuf>,

    /// Directory for the output CSV files.
    #[arg(short, long, default_value = "output/campus")]
    output: PathBuf,

    /// Start time (`HH:MM`), overriding the config.
    #[arg(long)]
    start: Option<ClockTime>,

    /// Let entries missed while moving depart late.
    #[arg(long)]
    late_departures: bool,

    /// Pace the day in wall-clock time instead of running flat out.
    #[arg(long)]
    realtime: bool,

    /// Skip `agent_frames.csv` rows.
    #[arg(long)]
    no_frames: bool,
}

// ── Embedded timetable ────────────────────────────────────────────────────────

// Node labels are 1-based.  13 = dormitory D5e, 14 = dormitory D5f,
// 2 = library E3, 3 = teaching F3a, 4 = teaching F3b, 7 = canteen F5b,
// 8 = gym D6, 16 = canteen D5b.
const TIMETABLE_CSV: &str = "\
agent_id,departure,origin,destination\n\
0,08:40,13,4\n\
0,12:00,4,7\n\
0,12:40,7,13\n\
0,13:25,13,3\n\
0,17:05,3,16\n\
0,17:35,16,2\n\
0,21:30,2,13\n\
1,08:30,14,3\n\
1,12:10,3,16\n\
1,12:50,16,14\n\
1,13:35,14,2\n\
1,17:15,2,7\n\
1,17:45,7,2\n\
1,21:40,2,14\n\
2,10:30,14,4\n\
2,12:10,4,7\n\
2,12:55,7,14\n\
2,13:40,14,8\n\
2,16:00,8,14\n\
2,17:00,14,7\n\
2,17:45,7,14\n\
3,09:30,13,4\n\
3,10:20,4,13\n\
3,12:00,13,16\n\
3,12:40,16,13\n\
3,17:20,13,16\n\
3,17:50,16,8\n\
3,19:25,8,13\n\
";

// ── Console observer ──────────────────────────────────────────────────────────

/// Prints movements as they happen and forwards everything to the CSV
/// observer.
struct ConsoleObserver<W: OutputWriter> {
    inner:      SimOutputObserver<W>,
    departures: usize,
    arrivals:   usize,
    failures:   usize,
    frames:     usize,
}

impl<W: OutputWriter> ConsoleObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, departures: 0, arrivals: 0, failures: 0, frames: 0 }
    }
}

impl<W: OutputWriter> SimObserver for ConsoleObserver<W> {
    fn on_clock_tick(&mut self, tick: u64, display: &DisplaySnapshot, moving: usize) {
        self.inner.on_clock_tick(tick, display, moving);
    }

    fn on_phase_change(&mut self, time: ClockTime, is_night: bool) {
        println!("{time}  ── {} ──", if is_night { "night" } else { "day" });
        self.inner.on_phase_change(time, is_night);
    }

    fn on_departure(&mut self, agent: AgentId, time: ClockTime, route: &Route) {
        self.departures += 1;
        println!("{time}  student {} departs  {}", agent.0 + 1, labelled(route));
        self.inner.on_departure(agent, time, route);
    }

    fn on_frame(&mut self, agent: AgentId, time: ClockTime, now_ms: u64, frame: &Frame) {
        self.frames += 1;
        self.inner.on_frame(agent, time, now_ms, frame);
    }

    fn on_arrival(&mut self, agent: AgentId, time: ClockTime, node: NodeId) {
        self.arrivals += 1;
        println!("{time}  student {} arrives at node {}", agent.0 + 1, node.0 + 1);
        self.inner.on_arrival(agent, time, node);
    }

    fn on_route_failed(
        &mut self,
        agent:       AgentId,
        time:        ClockTime,
        origin:      NodeId,
        destination: NodeId,
        error:       &GraphError,
    ) {
        self.failures += 1;
        println!(
            "{time}  student {} cannot get from node {} to node {}",
            agent.0 + 1,
            origin.0 + 1,
            destination.0 + 1
        );
        self.inner.on_route_failed(agent, time, origin, destination, error);
    }

    fn on_snapshot(&mut self, tick: u64, time: ClockTime, agents: &cn_agent::AgentStore, motion: &MotionStore) {
        self.inner.on_snapshot(tick, time, agents, motion);
    }

    fn on_day_end(&mut self, display: &DisplaySnapshot) {
        println!("{display}");
        self.inner.on_day_end(display);
    }

    fn on_reset(&mut self, display: &DisplaySnapshot) {
        self.inner.on_reset(display);
    }
}

/// Route with 1-based node labels, as on the map.
fn labelled(route: &Route) -> String {
    let nodes: Vec<String> = route.nodes.iter().map(|n| (n.0 + 1).to_string()).collect();
    format!("{} (weight {:.0})", nodes.join(" → "), route.total_weight)
}

// ── Loading ───────────────────────────────────────────────────────────────────

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimConfig { output_interval_ticks: 30, ..SimConfig::default() },
    };
    if let Some(start) = args.start {
        config.start_time = start;
    }
    if args.late_departures {
        config.late_departures = true;
    }
    config.validate()?;
    Ok(config)
}

fn load_timetables(path: Option<&Path>) -> Result<Vec<Timetable>> {
    let timetables = match path {
        Some(path) => load_timetables_csv(path, None)
            .with_context(|| format!("loading timetable {}", path.display()))?,
        None => load_timetables_reader(Cursor::new(TIMETABLE_CSV), None)?,
    };
    Ok(timetables)
}

// ── Driving ───────────────────────────────────────────────────────────────────

/// Sleep until each timer or tick is due in wall time, then catch up.
fn run_realtime<R: Router, O: SimObserver>(sim: &mut Sim<R>, observer: &mut O) -> SimResult<()> {
    let t0 = Instant::now();
    while let Some(next_ms) = sim.next_event_ms() {
        let due = t0 + Duration::from_millis(next_ms);
        let now = Instant::now();
        if due > now {
            spin_sleep::sleep(due - now);
        }
        sim.advance_to(next_ms, observer)?;
    }
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("=== campus — rust_campus movement simulator ===");

    // 1. Map.
    let graph = match (&args.matrix, &args.positions) {
        (Some(matrix), positions) => load_graph_csv(matrix, positions.as_deref())
            .with_context(|| format!("loading map {}", matrix.display()))?,
        (None, _) => {
            let (graph, places) = build_campus()?;
            for (name, node) in places.legend() {
                println!("  node {:<3} {name}", node.0 + 1);
            }
            graph
        }
    };
    println!("Campus: {} nodes, {} edges", graph.node_count(), graph.edge_count());

    // 2. Configuration and timetables.
    let config = load_config(&args)?;
    let timetables = load_timetables(args.timetable.as_deref())?;
    let agent_count = timetables.len();
    let entries: usize = timetables.iter().map(Timetable::len).sum();
    println!("Students: {agent_count}  |  timetable entries: {entries}  |  start {}", config.start_time);
    println!();

    // 3. Simulation.
    let agents = AgentStoreBuilder::new().agents(timetables).build();
    let mut sim = SimBuilder::all_pairs(config, graph, agents).build()?;

    // 4. Output.
    let writer = CsvWriter::new(&args.output)?;
    let mut obs = ConsoleObserver::new(SimOutputObserver::new(writer).record_frames(!args.no_frames));

    // 5. Run the day.
    let t0 = Instant::now();
    sim.start();
    if args.realtime {
        run_realtime(&mut sim, &mut obs)?;
    } else {
        sim.run(&mut obs)?;
    }
    let elapsed = t0.elapsed();
    obs.inner.finish().context("writing output")?;

    // 6. Summary.
    println!();
    println!("Day complete in {:.3} s ({} ticks)", elapsed.as_secs_f64(), sim.clock().ticks());
    println!(
        "  departures {}  |  arrivals {}  |  abandoned {}  |  frames {}",
        obs.departures, obs.arrivals, obs.failures, obs.frames
    );
    println!("  output written to {}", args.output.display());
    println!();

    println!("{:<9} {:<9} {:<9} {:<12}", "Student", "State", "Done", "Position");
    println!("{}", "-".repeat(42));
    for (id, agent) in sim.agents().iter() {
        let position = sim
            .motion()
            .position(id)
            .map_or_else(|| "-".to_owned(), |p| format!("({:.0}, {:.0})", p.x, p.y));
        println!(
            "{:<9} {:<9} {:<9} {:<12}",
            id.0 + 1,
            agent.state().as_str(),
            format!("{}/{}", agent.cursor(), agent.timetable().len()),
            position,
        );
    }

    Ok(())
}
