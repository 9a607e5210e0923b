//! Configuration validation.
//!
//! Every tunable is checked before the engine starts; money is at stake,
//! so a half-read config never reaches the state machine.

use crate::domain::error::OscalpError;
use crate::ports::config_port::ConfigPort;

pub fn validate_engine_config(config: &dyn ConfigPort) -> Result<(), OscalpError> {
    validate_window(config)?;
    validate_smoothing(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), OscalpError> {
    validate_thresholds(config)?;
    validate_profit_pct(config)?;
    validate_intervals(config)?;
    Ok(())
}

pub fn validate_driver_config(config: &dyn ConfigPort) -> Result<(), OscalpError> {
    validate_symbol(config)?;
    validate_poll_interval(config)?;
    validate_cash_reserve(config)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), OscalpError> {
    if config.get_string("data", "csv_path").is_none() {
        return Err(OscalpError::ConfigMissing {
            section: "data".to_string(),
            key: "csv_path".to_string(),
        });
    }
    let half_spread = config.get_double("data", "half_spread_pct", 0.0);
    if half_spread < 0.0 {
        return Err(OscalpError::ConfigInvalid {
            section: "data".to_string(),
            key: "half_spread_pct".to_string(),
            reason: "half_spread_pct must be non-negative".to_string(),
        });
    }
    let paper_cash = config.get_double("orders", "paper_cash", 1000.0);
    if paper_cash <= 0.0 {
        return Err(OscalpError::ConfigInvalid {
            section: "orders".to_string(),
            key: "paper_cash".to_string(),
            reason: "paper_cash must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_window(config: &dyn ConfigPort) -> Result<(), OscalpError> {
    let window = config.get_int("engine", "window", 14);
    if window < 1 {
        return Err(OscalpError::ConfigInvalid {
            section: "engine".to_string(),
            key: "window".to_string(),
            reason: "window must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_smoothing(config: &dyn ConfigPort) -> Result<(), OscalpError> {
    let smoothing = config.get_int("engine", "smoothing", 1);
    if smoothing < 1 {
        return Err(OscalpError::ConfigInvalid {
            section: "engine".to_string(),
            key: "smoothing".to_string(),
            reason: "smoothing must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_thresholds(config: &dyn ConfigPort) -> Result<(), OscalpError> {
    let oversold = config.get_double("strategy", "oversold", 30.0);
    let extra_check = config.get_double("strategy", "extra_check", 45.0);
    if oversold <= 0.0 || oversold > 100.0 {
        return Err(OscalpError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "oversold".to_string(),
            reason: "oversold must be in (0, 100]".to_string(),
        });
    }
    if extra_check > 100.0 {
        return Err(OscalpError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "extra_check".to_string(),
            reason: "extra_check must be at most 100".to_string(),
        });
    }
    if extra_check <= oversold {
        return Err(OscalpError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "extra_check".to_string(),
            reason: "extra_check must be above oversold".to_string(),
        });
    }
    Ok(())
}

fn validate_profit_pct(config: &dyn ConfigPort) -> Result<(), OscalpError> {
    let profit_pct = config.get_double("strategy", "profit_pct", 0.25);
    if profit_pct <= 0.0 {
        return Err(OscalpError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "profit_pct".to_string(),
            reason: "profit_pct must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_intervals(config: &dyn ConfigPort) -> Result<(), OscalpError> {
    for key in ["confirm_interval_secs", "exit_poll_secs", "settle_delay_secs"] {
        let value = config.get_int("strategy", key, 1);
        if value < 1 {
            return Err(OscalpError::ConfigInvalid {
                section: "strategy".to_string(),
                key: key.to_string(),
                reason: format!("{key} must be at least 1 second"),
            });
        }
    }
    if config.get_int("strategy", "max_data_failures", 25) < 1 {
        return Err(OscalpError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "max_data_failures".to_string(),
            reason: "max_data_failures must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), OscalpError> {
    match config.get_string("driver", "symbol") {
        Some(symbol) if !symbol.trim().is_empty() => Ok(()),
        _ => Err(OscalpError::ConfigMissing {
            section: "driver".to_string(),
            key: "symbol".to_string(),
        }),
    }
}

fn validate_poll_interval(config: &dyn ConfigPort) -> Result<(), OscalpError> {
    let value = config.get_int("driver", "poll_interval_secs", 300);
    if value < 1 {
        return Err(OscalpError::ConfigInvalid {
            section: "driver".to_string(),
            key: "poll_interval_secs".to_string(),
            reason: "poll_interval_secs must be at least 1 second".to_string(),
        });
    }
    Ok(())
}

fn validate_cash_reserve(config: &dyn ConfigPort) -> Result<(), OscalpError> {
    let value = config.get_double("driver", "cash_reserve", 1.0);
    if value < 0.0 {
        return Err(OscalpError::ConfigInvalid {
            section: "driver".to_string(),
            key: "cash_reserve".to_string(),
            reason: "cash_reserve must be non-negative".to_string(),
        });
    }
    Ok(())
}
