//! End-to-end run over generated feeds: every sink file must exist and
//! every stage must see data.

use bondflow_runner::{generate_all, standard_sectors, RunnerConfig, TradingPipeline};
use bondflow_runner::pipeline::{
    EXECUTIONS_SINK, GUI_SINK, INQUIRIES_SINK, POSITIONS_SINK, RISK_SINK, STREAMING_SINK,
};
use std::fs;
use tempfile::TempDir;

fn small_config(dir: &TempDir) -> RunnerConfig {
    RunnerConfig {
        data_dir: dir.path().join("data"),
        result_dir: dir.path().join("results"),
        price_points: 20,
        depth_points: 20,
        trade_count: 14,
        inquiry_count: 14,
        ..RunnerConfig::default()
    }
}

#[test]
fn generated_feeds_drive_every_stage() {
    let dir = TempDir::new().unwrap();
    let config = small_config(&dir);
    generate_all(&config).unwrap();

    let mut pipeline = TradingPipeline::build(&config.result_dir).unwrap();
    let summary = pipeline.run(&config).unwrap();

    // 7 products per generated timestamp row
    assert_eq!(summary.prices, 20 * 7);
    assert_eq!(summary.depth_updates, 20 * 7);
    assert_eq!(summary.trades, 14);
    assert_eq!(summary.inquiries, 14);

    assert_eq!(summary.streams, 7);
    assert_eq!(summary.books, 7);
    // only the 14 feed trades land in the store; execution-derived trades
    // are notified downstream without being kept
    assert_eq!(summary.booked_trades, 14);
    assert_eq!(summary.positions, 7);
    assert_eq!(summary.risk_entries, 7);
    // auto-quoted inquiries complete and evict
    assert_eq!(summary.open_inquiries, 0);
}

#[test]
fn sink_files_receive_timestamped_lines() {
    let dir = TempDir::new().unwrap();
    let config = small_config(&dir);
    generate_all(&config).unwrap();

    let mut pipeline = TradingPipeline::build(&config.result_dir).unwrap();
    pipeline.run(&config).unwrap();

    for sink in [
        POSITIONS_SINK,
        RISK_SINK,
        EXECUTIONS_SINK,
        STREAMING_SINK,
        INQUIRIES_SINK,
        GUI_SINK,
    ] {
        let text = fs::read_to_string(config.result_dir.join(sink)).unwrap();
        assert!(!text.is_empty(), "{sink} is empty");
        for line in text.lines() {
            // timestamp prefix, then the record body
            assert!(
                line.len() > 24 && line.as_bytes()[23] == b',',
                "unexpected line shape in {sink}: {line}"
            );
        }
    }

    // each completed inquiry persists three lines
    let inquiries = fs::read_to_string(config.result_dir.join(INQUIRIES_SINK)).unwrap();
    assert_eq!(inquiries.lines().count(), 14 * 3);
}

#[test]
fn sector_risk_covers_the_whole_curve() {
    let dir = TempDir::new().unwrap();
    let config = small_config(&dir);
    generate_all(&config).unwrap();

    let mut pipeline = TradingPipeline::build(&config.result_dir).unwrap();
    pipeline.run(&config).unwrap();

    let sectors = pipeline.sector_risk();
    assert_eq!(sectors.len(), 3);
    assert_eq!(
        standard_sectors()
            .iter()
            .map(|s| s.cusips.len())
            .sum::<usize>(),
        7
    );
    for (bucket, sector) in sectors.iter().zip(standard_sectors()) {
        assert_eq!(bucket.sector, sector.name);
        assert!(bucket.pv01.is_finite());
    }
    assert!(
        sectors.iter().any(|b| b.quantity != 0),
        "no sector saw any risk"
    );
}

#[test]
fn identical_seeds_produce_identical_summaries() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    let config_a = small_config(&dir_a);
    let config_b = small_config(&dir_b);

    generate_all(&config_a).unwrap();
    generate_all(&config_b).unwrap();

    let summary_a = TradingPipeline::build(&config_a.result_dir)
        .unwrap()
        .run(&config_a)
        .unwrap();
    let summary_b = TradingPipeline::build(&config_b.result_dir)
        .unwrap()
        .run(&config_b)
        .unwrap();

    assert_eq!(
        serde_json::to_string(&summary_a).unwrap(),
        serde_json::to_string(&summary_b).unwrap()
    );
}
