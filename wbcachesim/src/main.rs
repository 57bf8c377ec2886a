use std::fs::File;
use std::io::BufReader;
use std::time::Instant;
use clap::{ArgGroup, Parser};
use log::{debug, LevelFilter};
use wbcache::config::{Geometry, GeometryConfig};
use wbcache::io::open_trace;
use wbcache::report::{ConfigurationDump, ContentDump, StatisticsDump};
use wbcache::simulator::CacheSimulator;

#[cfg(debug_assertions)]
const DEBUG_DEFAULT: bool = true;

#[cfg(not(debug_assertions))]
const DEBUG_DEFAULT: bool = false;

#[derive(Parser, Debug)]
#[command(about = String::from("Write-back LRU set-associative cache simulator"))]
#[command(group(ArgGroup::new("geometry").required(true).args(["config", "config_file"])))]
struct Args {
    /// Trace file, one `R <address>` or `W <address>` per line
    trace: String,

    /// Cache geometry as capacity:associativity:block_size, in bytes
    #[arg(short, long)]
    config: Option<String>,

    /// JSON geometry file with capacity, associativity and block_size
    #[arg(long)]
    config_file: Option<String>,

    /// Dump the content of every set and way after the run
    #[arg(short = 'x', long)]
    dump: bool,

    /// Print the statistics as JSON instead of the text report
    #[arg(short, long, conflicts_with = "dump")]
    json: bool,

    #[arg(short, long)]
    performance: bool,

    #[arg(short, long, default_value_t = DEBUG_DEFAULT)]
    debug: bool,
}

fn load_geometry(args: &Args) -> Result<Geometry, String> {
    let config = match (&args.config, &args.config_file) {
        (Some(config), _) => config.parse::<GeometryConfig>().map_err(|e| format!("Couldn't parse the geometry: {e}"))?,
        (None, Some(path)) => {
            let config_file = File::open(path).map_err(|e| format!("Couldn't open the config file at path {path}: {e}"))?;
            GeometryConfig::from_json_reader(BufReader::new(config_file)).map_err(|e| format!("Couldn't parse the config file: {e}"))?
        }
        (None, None) => return Err("A geometry is required, pass --config or --config-file".to_string()),
    };
    Geometry::try_from(config).map_err(|e| format!("Invalid cache geometry: {e}"))
}

fn main() -> Result<(), String> {
    let start = Instant::now();
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(if args.debug { LevelFilter::Debug } else { LevelFilter::Warn })
        .parse_default_env()
        .init();
    let geometry = load_geometry(&args)?;
    debug!("Parsed input configuration: {geometry:?}");
    let mut simulator = CacheSimulator::new(geometry);
    let trace_reader = open_trace(&args.trace).map_err(|e| format!("Couldn't open the trace file at path {}: {e}", args.trace))?;
    let result = simulator.simulate(trace_reader).map_err(|e| format!("Simulation of {} failed: {e}", args.trace))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(result).map_err(|e| format!("Couldn't serialise the output {e}"))?);
    } else {
        print!("{}", ConfigurationDump(simulator.geometry()));
        print!("{}", StatisticsDump(simulator.statistics()));
    }
    if args.dump {
        print!("{}", ContentDump::new(&simulator));
    }
    if args.performance {
        let end = Instant::now();
        let simulation_time = simulator.get_execution_time();
        let total_time = end - start;
        println!("Simulation time: {}s", simulation_time.as_nanos() as f64 / 1e9);
        println!("Total execution time (includes initial parsing, configuration, and output): {}s", total_time.as_nanos() as f64 / 1e9)
    }
    if args.debug {
        #[cfg(debug_assertions)]
        debug!("Running the debug binary, debug mode is enabled by default. If benchmarking, do not use this binary, re-compile with the --release argument when using cargo run");
        let store = simulator.store();
        debug!(
            "Uninitialised cache lines: {} of {}, access counter at {}",
            store.invalid_line_count(),
            geometry.line_count(),
            store.clock()
        );
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use clap::error::ErrorKind;
    use clap::Parser;
    use super::{load_geometry, Args};

    #[test]
    fn json_output_rejects_content_dump() {
        let error = Args::try_parse_from(["wbcachesim", "-c", "128:2:16", "-j", "-x", "trace"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ArgumentConflict);
        assert!(Args::try_parse_from(["wbcachesim", "-c", "128:2:16", "-j", "trace"]).is_ok());
        assert!(Args::try_parse_from(["wbcachesim", "-c", "128:2:16", "-x", "trace"]).is_ok());
    }

    #[test]
    fn geometry_is_required() {
        let error = Args::try_parse_from(["wbcachesim", "trace"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);
        let args = Args::try_parse_from(["wbcachesim", "--config", "96:2:16", "trace"]).unwrap();
        assert!(load_geometry(&args).is_err());
    }
}
