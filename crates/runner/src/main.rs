use harbor_runner::{
    DayReport, ReplayError, ReplayHarness, ReplaySummary, TradeLog, load_order_books,
    load_trades,
};
use harbor_strategy::SessionConfig;

fn print_help() {
    eprintln!(
        r#"Harbor Replay - replay recorded order books through the strategy engine

USAGE:
    harbor-replay [OPTIONS] --prices <PATH> [--prices <PATH> ...]

OPTIONS:
    --config <PATH>     Load session configuration from JSON file
    --prices <PATH>     Order book CSV for one day (repeatable, replayed in order)
    --trades <PATH>     Trade CSV for the matching --prices day (repeatable)
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    # Replay one day with the default session
    harbor-replay --prices prices_round_1_day_0.csv

    # Replay two days with their trades and a custom config
    harbor-replay --config session.json \
        --prices prices_day_-1.csv --trades trades_day_-1.csv \
        --prices prices_day_0.csv --trades trades_day_0.csv
"#
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut price_paths: Vec<String> = Vec::new();
    let mut trade_paths: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            flag @ ("--config" | "-c" | "--prices" | "--trades") => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: {} requires a path argument", flag);
                    std::process::exit(1);
                }
                let path = args[i].clone();
                match flag {
                    "--prices" => price_paths.push(path),
                    "--trades" => trade_paths.push(path),
                    _ => config_path = Some(path),
                }
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if price_paths.is_empty() {
        print_help();
        return Err(ReplayError::Usage("at least one --prices file is required".into()).into());
    }
    if trade_paths.len() > price_paths.len() {
        return Err(ReplayError::Usage("more --trades files than --prices files".into()).into());
    }

    let config = match config_path {
        Some(path) => {
            log::info!("Loading configuration from: {}", path);
            SessionConfig::from_file(&path)?
        }
        None => {
            log::info!("Using default configuration");
            SessionConfig::default()
        }
    };
    log::info!("Instruments: {}", config.instruments.len());

    let harness = ReplayHarness::new(config);
    let mut days: Vec<DayReport> = Vec::with_capacity(price_paths.len());

    for (day, prices) in price_paths.iter().enumerate() {
        log::info!("Day {}: {}", day, prices);
        let snapshots = load_order_books(prices)?;
        let trades = match trade_paths.get(day) {
            Some(path) => load_trades(path)?,
            None => TradeLog::new(),
        };
        days.push(harness.run_day(snapshots, &trades)?);
    }

    let summary = ReplaySummary::from_days(&days);

    println!("PnL Summary:");
    for (symbol, pnl) in &summary.pnl {
        println!("  {}: {}", symbol, pnl);
    }
    println!("  TOTAL: {}", summary.total_pnl());

    println!("Final Positions:");
    for (index, day) in days.iter().enumerate() {
        for (symbol, position) in &day.positions {
            println!("  day {} {}: {}", index, symbol, position);
        }
    }

    Ok(())
}
