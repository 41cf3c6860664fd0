//! Deterministic synthetic feed generation.
//!
//! Every file is reproducible from the configured seed. Prices live on
//! the 1/256 grid so the fractional codec round-trips exactly.

use crate::config::RunnerConfig;
use bondflow_core::fractional;
use bondflow_core::refdata::ReferenceData;
use bondflow_core::stages::BOOK_DEPTH;
use chrono::{Duration, NaiveDate};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const PRICES_FILE: &str = "prices.txt";
pub const MARKET_DATA_FILE: &str = "marketdata.txt";
pub const TRADES_FILE: &str = "trades.txt";
pub const INQUIRIES_FILE: &str = "inquiries.txt";

const GRID: f64 = 1.0 / 256.0;
const MID_LOW: f64 = 99.0;
const MID_HIGH: f64 = 101.0;

/// Write all four feed files under `config.data_dir`.
pub fn generate_all(config: &RunnerConfig) -> io::Result<()> {
    fs::create_dir_all(&config.data_dir)?;
    let refdata = ReferenceData::us_treasuries();
    let cusips: Vec<String> = refdata.cusips().map(str::to_string).collect();
    let mut rng = StdRng::seed_from_u64(config.seed);

    generate_prices(
        &config.data_dir.join(PRICES_FILE),
        &cusips,
        config.price_points,
        &mut rng,
    )?;
    generate_market_data(
        &config.data_dir.join(MARKET_DATA_FILE),
        &cusips,
        config.depth_points,
    )?;
    generate_trades(
        &config.data_dir.join(TRADES_FILE),
        &cusips,
        config.trade_count,
        &mut rng,
    )?;
    generate_inquiries(
        &config.data_dir.join(INQUIRIES_FILE),
        &cusips,
        config.inquiry_count,
        &mut rng,
    )
}

fn base_timestamp() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 28)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap_or_default()
}

fn random_id(rng: &mut StdRng) -> String {
    (0..12).map(|_| rng.sample(Alphanumeric) as char).collect()
}

/// Triangle-wave mid: 99 up to 101 by 1/256 steps, then back down.
fn oscillating_mid(step: usize) -> f64 {
    let span = ((MID_HIGH - MID_LOW) / GRID) as usize;
    let phase = step % (2 * span);
    let offset = if phase < span { phase } else { 2 * span - phase };
    MID_LOW + offset as f64 * GRID
}

/// `Timestamp,CUSIP,Bid,Ask,Spread` with header; spread drawn from the
/// 1/128..1/64 range on the 1/256 grid.
fn generate_prices(
    path: &Path,
    cusips: &[String],
    points: usize,
    rng: &mut StdRng,
) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "Timestamp,CUSIP,Bid,Ask,Spread")?;
    let base = base_timestamp();
    for step in 0..points {
        let timestamp = base + Duration::milliseconds(step as i64);
        let mid = oscillating_mid(step);
        for cusip in cusips {
            let spread = rng.gen_range(2..=4) as f64 * GRID;
            writeln!(
                out,
                "{},{},{},{},{}",
                timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
                cusip,
                fractional::format(mid - spread / 2.0),
                fractional::format(mid + spread / 2.0),
                fractional::format(spread),
            )?;
        }
    }
    out.flush()
}

/// `Timestamp,CUSIP,(Bid,BidSize,Ask,AskSize)×5` with header. The
/// top-of-book spread oscillates 1/128 → 1/32 by 1/128; deeper levels
/// sit a further 1/128 out per level with sizes 1M..5M.
fn generate_market_data(path: &Path, cusips: &[String], points: usize) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let mut header = vec!["Timestamp".to_string(), "CUSIP".to_string()];
    for level in 1..=BOOK_DEPTH {
        header.push(format!("Bid{level}"));
        header.push(format!("BidSize{level}"));
        header.push(format!("Ask{level}"));
        header.push(format!("AskSize{level}"));
    }
    writeln!(out, "{}", header.join(","))?;

    let base = base_timestamp();
    for step in 0..points {
        let timestamp = base + Duration::milliseconds(step as i64);
        let mid = oscillating_mid(step);
        let spread = (step % 4 + 1) as f64 * 2.0 * GRID;
        for cusip in cusips {
            let mut fields = vec![
                timestamp.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
                cusip.clone(),
            ];
            for level in 0..BOOK_DEPTH {
                let distance = spread / 2.0 + level as f64 * 2.0 * GRID;
                let size = (level as i64 + 1) * 1_000_000;
                fields.push(fractional::format(mid - distance));
                fields.push(size.to_string());
                fields.push(fractional::format(mid + distance));
                fields.push(size.to_string());
            }
            writeln!(out, "{}", fields.join(","))?;
        }
    }
    out.flush()
}

/// `CUSIP,TradeId,PriceFrac,Book,Quantity,Side`, no header. Sides
/// alternate; buys price 99..100, sells 100..101.
fn generate_trades(
    path: &Path,
    cusips: &[String],
    count: usize,
    rng: &mut StdRng,
) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let books = ["TRSY1", "TRSY2", "TRSY3"];
    for i in 0..count {
        let cusip = &cusips[i % cusips.len()];
        let buy = i % 2 == 0;
        let handle = if buy { 99.0 } else { 100.0 };
        let price = handle + rng.gen_range(0..256) as f64 * GRID;
        writeln!(
            out,
            "{},{},{},{},{},{}",
            cusip,
            random_id(rng),
            fractional::format(price),
            books[i % books.len()],
            (i % 5 + 1) * 1_000_000,
            if buy { "BUY" } else { "SELL" },
        )?;
    }
    out.flush()
}

/// `InquiryId,CUSIP,Side,Quantity,PriceFrac,State`, no header; every
/// inquiry arrives RECEIVED.
fn generate_inquiries(
    path: &Path,
    cusips: &[String],
    count: usize,
    rng: &mut StdRng,
) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for i in 0..count {
        let cusip = &cusips[i % cusips.len()];
        let price = 99.0 + rng.gen_range(0..512) as f64 * GRID;
        writeln!(
            out,
            "{},{},{},{},{},RECEIVED",
            random_id(rng),
            cusip,
            if i % 2 == 0 { "BUY" } else { "SELL" },
            (i % 5 + 1) * 1_000_000,
            fractional::format(price),
        )?;
    }
    out.flush()
}
