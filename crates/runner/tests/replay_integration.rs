//! Integration test: CSV day files replayed through the full engine
//!
//! 1. Price and trade files are parsed from in-memory fixtures
//! 2. Each day runs through the dispatcher with settled positions fed back
//! 3. Day reports roll up into a summary

use harbor_runner::{ReplayHarness, ReplaySummary, read_order_books, read_trades};
use harbor_strategy::{InstrumentConfig, SessionConfig, StrategyKind};

const HEADER: &str = "day;timestamp;product;bid_price_1;bid_volume_1;bid_price_2;bid_volume_2;bid_price_3;bid_volume_3;ask_price_1;ask_volume_1;ask_price_2;ask_volume_2;ask_price_3;ask_volume_3;mid_price;profit_and_loss";

fn quiet_day(ticks: i64) -> String {
    let mut csv = String::from(HEADER);
    for tick in 0..ticks {
        csv.push_str(&format!(
            "\n0;{};KELP;2027;3;2026;25;;;2030;25;2031;2;;;2028.0;0.0",
            tick * 100
        ));
        csv.push_str(&format!(
            "\n0;{};RAINFOREST_RESIN;9998;2;9995;25;;;10002;2;10005;25;;;10000.0;0.0",
            tick * 100
        ));
    }
    csv.push('\n');
    csv
}

#[test]
fn test_replay_day_from_csv() {
    let _ = env_logger::try_init();

    let snapshots = read_order_books(quiet_day(5).as_bytes()).unwrap();
    assert_eq!(snapshots.len(), 5);

    let trades = read_trades(
        "timestamp;buyer;seller;symbol;currency;price;quantity\n100;;;KELP;SEASHELLS;2029.0;3\n"
            .as_bytes(),
    )
    .unwrap();

    let harness = ReplayHarness::new(SessionConfig::default());
    let report = harness.run_day(snapshots, &trades).unwrap();

    assert_eq!(report.ticks, 5);
    assert_eq!(report.timeline.len(), 5);
    assert_eq!(report.timeline[4].0, 400);
    assert_eq!(report.orders_discarded, 0);
    assert!(report.orders_settled > 0);

    // Every fill is settled immediately, so positions are the net of all orders
    assert!(report.positions.contains_key("KELP"));
    assert!(report.positions.contains_key("RAINFOREST_RESIN"));
    assert!(!report.positions.contains_key("SQUID_INK"));
}

#[test]
fn test_first_tick_quotes_balance_out() {
    let _ = env_logger::try_init();

    let snapshots = read_order_books(quiet_day(1).as_bytes()).unwrap();
    let harness = ReplayHarness::new(SessionConfig::with_instruments(vec![
        InstrumentConfig::new("KELP", 50),
    ]));
    let report = harness.run_day(snapshots, &Default::default()).unwrap();

    // Flat start: one bid at 2027 and one ask at 2029, both 20 lots
    assert_eq!(report.orders_settled, 2);
    assert_eq!(report.positions["KELP"], 0);
    assert_eq!(report.pnl["KELP"], 2 * 20);
}

#[test]
fn test_fixed_spread_replay() {
    let _ = env_logger::try_init();

    let config = SessionConfig::with_instruments(vec![
        InstrumentConfig::new("RAINFOREST_RESIN", 50)
            .with_strategy(StrategyKind::FixedSpread { offset: 1, size: 10 }),
    ]);
    let harness = ReplayHarness::new(config);

    let day = harness
        .run_day(
            read_order_books(quiet_day(3).as_bytes()).unwrap(),
            &Default::default(),
        )
        .unwrap();

    // 9999 bid and 10001 ask every tick
    assert_eq!(day.orders_settled, 6);
    assert_eq!(day.positions["RAINFOREST_RESIN"], 0);
    assert_eq!(day.pnl["RAINFOREST_RESIN"], 3 * 2 * 10);
    assert_eq!(day.timeline, vec![(0, 20), (100, 40), (200, 60)]);
}

#[test]
fn test_days_start_flat_and_roll_up() {
    let _ = env_logger::try_init();

    let harness = ReplayHarness::new(SessionConfig::default());
    let days: Vec<_> = (0..2)
        .map(|_| {
            harness
                .run_day(
                    read_order_books(quiet_day(4).as_bytes()).unwrap(),
                    &Default::default(),
                )
                .unwrap()
        })
        .collect();

    // Identical input and a fresh session each day give identical reports
    assert_eq!(days[0], days[1]);

    let summary = ReplaySummary::from_days(&days);
    assert_eq!(summary.days, 2);
    assert_eq!(summary.total_pnl(), 2 * days[0].total_pnl());
    assert_eq!(summary.timeline.len(), 8);
}
