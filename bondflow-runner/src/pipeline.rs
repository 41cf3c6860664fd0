//! Full pipeline assembly and feed orchestration.
//!
//! Builds every stage, wires the listener graph, then drains the four
//! feed files in order: prices, market data, trades, inquiries. All
//! stage output lands in append-only sink files under the result
//! directory.

use crate::config::RunnerConfig;
use crate::datagen::{INQUIRIES_FILE, MARKET_DATA_FILE, PRICES_FILE, TRADES_FILE};
use bondflow_core::domain::{BucketedRisk, BucketedSector};
use bondflow_core::error::PipelineError;
use bondflow_core::feeds::{
    ingest_inquiries, ingest_market_data, ingest_prices, ingest_trades,
};
use bondflow_core::refdata::ReferenceData;
use bondflow_core::service::share;
use bondflow_core::sink::FileSink;
use bondflow_core::stages::{
    AlgoExecutionListener, AlgoExecutionService, AlgoStreamingListener, AlgoStreamingService,
    AutoQuoteResponder, DisplayListener, DisplayService, ExecutionListener, ExecutionService,
    HistoricalDataService, HistoricalListener, InquiryService, LogPublisher, LogRouter,
    MarketDataService, PositionListener, PositionService, PricingService, RiskListener,
    RiskService, SpreadCrossingFactory, StreamingListener, StreamingService, TradeBookingListener,
    TradeBookingService,
};
use serde::Serialize;
use std::cell::RefCell;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

pub const POSITIONS_SINK: &str = "positions.txt";
pub const RISK_SINK: &str = "risk.txt";
pub const EXECUTIONS_SINK: &str = "executions.txt";
pub const STREAMING_SINK: &str = "streaming.txt";
pub const INQUIRIES_SINK: &str = "allinquiries.txt";
pub const GUI_SINK: &str = "gui.txt";

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("pipeline failure: {0}")]
    Pipeline(#[from] PipelineError),
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Records ingested per feed plus final store sizes.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub prices: u64,
    pub depth_updates: u64,
    pub trades: u64,
    pub inquiries: u64,
    pub streams: usize,
    pub books: usize,
    pub booked_trades: usize,
    pub positions: usize,
    pub risk_entries: usize,
    pub open_inquiries: usize,
}

/// Every stage of the dataflow graph, wired and ready to ingest.
pub struct TradingPipeline {
    refdata: Rc<ReferenceData>,
    pricing: Rc<RefCell<PricingService>>,
    market_data: Rc<RefCell<MarketDataService>>,
    streaming: Rc<RefCell<StreamingService>>,
    booking: Rc<RefCell<TradeBookingService>>,
    positions: Rc<RefCell<PositionService>>,
    risk: Rc<RefCell<RiskService>>,
    inquiries: Rc<RefCell<InquiryService>>,
}

impl TradingPipeline {
    /// Build all stages and wire every listener edge. Sink files are
    /// opened append-only under `result_dir`.
    pub fn build(result_dir: &Path) -> Result<Self, RunnerError> {
        std::fs::create_dir_all(result_dir)?;
        let refdata = Rc::new(ReferenceData::us_treasuries());

        let pricing = Rc::new(RefCell::new(PricingService::new()));
        let algo_streaming = Rc::new(RefCell::new(AlgoStreamingService::new()));
        let streaming = Rc::new(RefCell::new(StreamingService::new(Box::new(LogPublisher))));
        let display = Rc::new(RefCell::new(DisplayService::new(Box::new(FileSink::open(
            &result_dir.join(GUI_SINK),
        )?))));

        let market_data = Rc::new(RefCell::new(MarketDataService::new(Rc::clone(&refdata))));
        let algo_execution = Rc::new(RefCell::new(AlgoExecutionService::new(Box::new(
            SpreadCrossingFactory,
        ))));
        let execution = Rc::new(RefCell::new(ExecutionService::new(Box::new(LogRouter))));
        let booking = Rc::new(RefCell::new(TradeBookingService::new()));
        let positions = Rc::new(RefCell::new(PositionService::new()));
        let risk = Rc::new(RefCell::new(RiskService::new(Rc::clone(&refdata))));
        let inquiries = Rc::new(RefCell::new(InquiryService::new(Box::new(
            AutoQuoteResponder,
        ))));

        let historical_streams = Rc::new(RefCell::new(HistoricalDataService::new(Box::new(
            FileSink::open(&result_dir.join(STREAMING_SINK))?,
        ))));
        let historical_executions = Rc::new(RefCell::new(HistoricalDataService::new(Box::new(
            FileSink::open(&result_dir.join(EXECUTIONS_SINK))?,
        ))));
        let historical_positions = Rc::new(RefCell::new(HistoricalDataService::new(Box::new(
            FileSink::open(&result_dir.join(POSITIONS_SINK))?,
        ))));
        let historical_risk = Rc::new(RefCell::new(HistoricalDataService::new(Box::new(
            FileSink::open(&result_dir.join(RISK_SINK))?,
        ))));
        let historical_inquiries = Rc::new(RefCell::new(HistoricalDataService::new(Box::new(
            FileSink::open(&result_dir.join(INQUIRIES_SINK))?,
        ))));

        // price path
        pricing
            .borrow_mut()
            .subscribe(share(AlgoStreamingListener::new(Rc::clone(
                &algo_streaming,
            ))));
        pricing
            .borrow_mut()
            .subscribe(share(DisplayListener::new(Rc::clone(&display))));
        algo_streaming
            .borrow_mut()
            .subscribe(share(StreamingListener::new(Rc::clone(&streaming))));
        streaming
            .borrow_mut()
            .subscribe(share(HistoricalListener::new(Rc::clone(
                &historical_streams,
            ))));

        // depth path
        market_data
            .borrow_mut()
            .subscribe(share(AlgoExecutionListener::new(Rc::clone(
                &algo_execution,
            ))));
        algo_execution
            .borrow_mut()
            .subscribe(share(ExecutionListener::new(Rc::clone(&execution))));
        execution
            .borrow_mut()
            .subscribe(share(TradeBookingListener::new(Rc::clone(&booking))));
        execution
            .borrow_mut()
            .subscribe(share(HistoricalListener::new(Rc::clone(
                &historical_executions,
            ))));

        // trade path
        booking
            .borrow_mut()
            .subscribe(share(PositionListener::new(Rc::clone(&positions))));
        positions
            .borrow_mut()
            .subscribe(share(RiskListener::new(Rc::clone(&risk))));
        positions
            .borrow_mut()
            .subscribe(share(HistoricalListener::new(Rc::clone(
                &historical_positions,
            ))));
        risk.borrow_mut()
            .subscribe(share(HistoricalListener::new(Rc::clone(&historical_risk))));

        // inquiry path
        inquiries
            .borrow_mut()
            .subscribe(share(HistoricalListener::new(Rc::clone(
                &historical_inquiries,
            ))));

        Ok(Self {
            refdata,
            pricing,
            market_data,
            streaming,
            booking,
            positions,
            risk,
            inquiries,
        })
    }

    /// Drain the four feed files in order and report what was processed.
    pub fn run(&mut self, config: &RunnerConfig) -> Result<RunSummary, RunnerError> {
        let policy = config.error_policy;

        let prices = ingest_prices(
            open(&config.data_dir.join(PRICES_FILE))?,
            &self.refdata,
            &self.pricing,
            policy,
        )?;
        tracing::info!(records = prices, "price feed drained");

        let depth_updates = ingest_market_data(
            open(&config.data_dir.join(MARKET_DATA_FILE))?,
            &self.market_data,
            policy,
        )?;
        tracing::info!(records = depth_updates, "market data feed drained");

        let trades = ingest_trades(
            open(&config.data_dir.join(TRADES_FILE))?,
            &self.refdata,
            &self.booking,
            policy,
        )?;
        tracing::info!(records = trades, "trade feed drained");

        let inquiries = ingest_inquiries(
            open(&config.data_dir.join(INQUIRIES_FILE))?,
            &self.refdata,
            &self.inquiries,
            policy,
        )?;
        tracing::info!(records = inquiries, "inquiry feed drained");

        Ok(RunSummary {
            prices,
            depth_updates,
            trades,
            inquiries,
            streams: self.streaming.borrow().len(),
            books: self.market_data.borrow().len(),
            booked_trades: self.booking.borrow().len(),
            positions: self.positions.borrow().len(),
            risk_entries: self.risk.borrow().len(),
            open_inquiries: self.inquiries.borrow().len(),
        })
    }

    /// Bucketed PV01 for the standard front-end / belly / long-end split.
    pub fn sector_risk(&self) -> Vec<BucketedRisk> {
        let risk = self.risk.borrow();
        standard_sectors()
            .iter()
            .map(|sector| risk.bucketed_risk(sector))
            .collect()
    }

    pub fn risk(&self) -> &Rc<RefCell<RiskService>> {
        &self.risk
    }
}

/// FrontEnd 2Y/3Y, Belly 5Y/7Y/10Y, LongEnd 20Y/30Y.
pub fn standard_sectors() -> Vec<BucketedSector> {
    vec![
        BucketedSector::new("FrontEnd", &["91282CAV3", "91282CBL4"]),
        BucketedSector::new("Belly", &["91282CCB5", "91282CCS8", "91282CDH2"]),
        BucketedSector::new("LongEnd", &["912810TM0", "912810TL2"]),
    ]
}

fn open(path: &Path) -> Result<BufReader<File>, RunnerError> {
    Ok(BufReader::new(File::open(path)?))
}
