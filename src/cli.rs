//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Duration;

use crate::adapters::console_report_adapter::ConsoleReportAdapter;
use crate::adapters::csv_replay_adapter::CsvReplayAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::paper_order_adapter::PaperOrderAdapter;
use crate::adapters::system_clock::SystemClock;
use crate::domain::config_validation::{
    validate_data_config, validate_driver_config, validate_engine_config, validate_strategy_config,
};
use crate::domain::engine::{CycleOutcome, EngineConfig, StrategyEngine};
use crate::domain::error::OscalpError;
use crate::domain::indicator::candle_from_history;
use crate::ports::config_port::ConfigPort;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::order_port::OrderPort;

#[derive(Parser, Debug)]
#[command(name = "oscalp", about = "Oscillator scalping strategy engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the strategy loop against a replay bar file
    Run {
        #[arg(short, long)]
        config: PathBuf,
        /// Override the configured symbol
        #[arg(long)]
        symbol: Option<String>,
        /// Stop after this many evaluation cycles
        #[arg(long)]
        cycles: Option<u64>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Print the current synthesized candle and exit
    Candle {
        #[arg(short, long)]
        config: PathBuf,
        /// Override the configured symbol
        #[arg(long)]
        symbol: Option<String>,
        /// Emit the candle as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Driver-level settings, separate from the per-cycle engine tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    pub symbol: String,
    pub poll_interval: Duration,
    pub cash_reserve: f64,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            config,
            symbol,
            cycles,
        } => run_strategy(&config, symbol.as_deref(), cycles),
        Command::Validate { config } => run_validate(&config),
        Command::Candle {
            config,
            symbol,
            json,
        } => run_candle(&config, symbol.as_deref(), json),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = OscalpError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn validate_all(adapter: &FileConfigAdapter) -> Result<(), OscalpError> {
    validate_engine_config(adapter)?;
    validate_strategy_config(adapter)?;
    validate_driver_config(adapter)?;
    validate_data_config(adapter)?;
    Ok(())
}

pub fn build_engine_config(config: &dyn ConfigPort) -> EngineConfig {
    let defaults = EngineConfig::default();
    EngineConfig {
        window: config.get_int("engine", "window", defaults.window as i64) as usize,
        smoothing: config.get_int("engine", "smoothing", defaults.smoothing as i64) as usize,
        oversold: config.get_double("strategy", "oversold", defaults.oversold),
        extra_check: config.get_double("strategy", "extra_check", defaults.extra_check),
        profit_pct: config.get_double("strategy", "profit_pct", defaults.profit_pct),
        confirm_interval: Duration::from_secs(
            config.get_int("strategy", "confirm_interval_secs", 300) as u64,
        ),
        exit_poll_interval: Duration::from_secs(
            config.get_int("strategy", "exit_poll_secs", 30) as u64
        ),
        settle_delay: Duration::from_secs(
            config.get_int("strategy", "settle_delay_secs", 15) as u64
        ),
        interval: config
            .get_string("engine", "interval")
            .unwrap_or(defaults.interval),
        span: config.get_string("engine", "span").unwrap_or(defaults.span),
        bounds: config
            .get_string("engine", "bounds")
            .unwrap_or(defaults.bounds),
        // The replay feed is finite, so the driver always bounds the
        // inner retry loops; a live gateway driver would leave this None.
        max_data_failures: Some(config.get_int("strategy", "max_data_failures", 25) as u32),
    }
}

pub fn build_driver_config(
    config: &dyn ConfigPort,
    symbol_override: Option<&str>,
) -> Result<DriverConfig, OscalpError> {
    let symbol = match symbol_override {
        Some(s) => s.to_string(),
        None => config
            .get_string("driver", "symbol")
            .ok_or_else(|| OscalpError::ConfigMissing {
                section: "driver".to_string(),
                key: "symbol".to_string(),
            })?,
    };
    Ok(DriverConfig {
        symbol,
        poll_interval: Duration::from_secs(
            config.get_int("driver", "poll_interval_secs", 300) as u64
        ),
        cash_reserve: config.get_double("driver", "cash_reserve", 1.0),
    })
}

fn build_replay(
    config: &dyn ConfigPort,
    engine_config: &EngineConfig,
) -> Result<Rc<CsvReplayAdapter>, OscalpError> {
    let csv_path = config
        .get_string("data", "csv_path")
        .ok_or_else(|| OscalpError::ConfigMissing {
            section: "data".to_string(),
            key: "csv_path".to_string(),
        })?;
    let warmup = config.get_int(
        "data",
        "warmup_bars",
        (engine_config.window + 2) as i64,
    ) as usize;
    let half_spread = config.get_double("data", "half_spread_pct", 0.0);
    Ok(Rc::new(CsvReplayAdapter::from_file(
        &csv_path,
        warmup,
        half_spread,
    )?))
}

fn run_strategy(config_path: &PathBuf, symbol: Option<&str>, cycles: Option<u64>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_all(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let engine_config = build_engine_config(&adapter);
    let driver = match build_driver_config(&adapter, symbol) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let replay = match build_replay(&adapter, &engine_config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let paper_cash = adapter.get_double("orders", "paper_cash", 1000.0);
    let orders = PaperOrderAdapter::new(Rc::clone(&replay), paper_cash);
    let clock = SystemClock;
    let report = ConsoleReportAdapter::new();

    let mut engine = StrategyEngine::new(
        driver.symbol.clone(),
        engine_config,
        replay.as_ref(),
        &orders,
        &clock,
        &report,
    );

    eprintln!(
        "Running {} with {:.2} paper cash, {} bars of replay",
        driver.symbol,
        paper_cash,
        replay.remaining()
    );

    let mut completed = 0u64;
    loop {
        let cash = match orders.available_cash() {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
        let capital = cash - driver.cash_reserve;
        if capital <= 0.0 {
            eprintln!(
                "Available cash {:.2} does not cover the {:.2} reserve, stopping",
                cash, driver.cash_reserve
            );
            return ExitCode::SUCCESS;
        }

        match engine.evaluate(capital) {
            Ok(CycleOutcome::Skipped) if replay.remaining() == 0 => {
                eprintln!("Replay exhausted after {} cycles", completed);
                return ExitCode::SUCCESS;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }

        completed += 1;
        if let Some(limit) = cycles {
            if completed >= limit {
                eprintln!("Cycle limit {} reached", limit);
                return ExitCode::SUCCESS;
            }
        }
        std::thread::sleep(driver.poll_interval);
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_all(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    println!("{} is valid", config_path.display());
    ExitCode::SUCCESS
}

fn run_candle(config_path: &PathBuf, symbol: Option<&str>, json: bool) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_all(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let engine_config = build_engine_config(&adapter);
    let driver = match build_driver_config(&adapter, symbol) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let replay = match build_replay(&adapter, &engine_config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let history = match replay.fetch_ohlc(
        &driver.symbol,
        &engine_config.interval,
        &engine_config.span,
        &engine_config.bounds,
    ) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let minimum = engine_config.window + 2;
    if history.len() < minimum {
        let e = OscalpError::InsufficientHistory {
            symbol: driver.symbol.clone(),
            bars: history.len(),
            minimum,
        };
        eprintln!("error: {e}");
        return (&e).into();
    }

    let candle = candle_from_history(&history, engine_config.window, engine_config.smoothing);
    if json {
        match serde_json::to_string_pretty(&candle) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("error: failed to serialize candle: {e}");
                return ExitCode::from(3);
            }
        }
    } else {
        println!(
            "{}: open {:.4} high {:.4} low {:.4} close {:.4} ({})",
            driver.symbol,
            candle.open,
            candle.high,
            candle.low,
            candle.close,
            if candle.is_green() { "green" } else { "red" }
        );
        if candle.low < engine_config.oversold {
            println!(
                "oversold: candle low {:.4} is below the {:.2} threshold",
                candle.low, engine_config.oversold
            );
        } else {
            println!(
                "no signal: candle low {:.4} is at or above the {:.2} threshold",
                candle.low, engine_config.oversold
            );
        }
    }
    ExitCode::SUCCESS
}
