//! Open-position state and entry economics.

use crate::domain::market::Quote;

/// Symmetric stop/target distance derived from the entry quote.
///
/// The trigger distance is the wider of "distance to the observed swing
/// low" and "minimum profit covering twice the one-sided spread", so the
/// stop never sits inside recent noise and the target always clears
/// transaction cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryLevels {
    pub trigger_pct: f64,
    pub take_profit: f64,
    pub stop_loss: f64,
}

impl EntryLevels {
    pub fn compute(quote: &Quote, swing_low: f64, profit_pct: f64) -> Self {
        let buy_spread = 1.0 - quote.ask / quote.midpoint();
        let trigger_pct =
            (1.0 - swing_low / quote.mark).max((profit_pct + 2.0 * buy_spread) / 100.0);
        EntryLevels {
            trigger_pct,
            take_profit: quote.mark * (1.0 + trigger_pct),
            stop_loss: quote.mark * (1.0 - trigger_pct),
        }
    }
}

/// A single open long position. Created when an entry order is
/// confirmed, held by the engine for the lifetime of the trade, dropped
/// on exit.
#[derive(Debug, Clone)]
pub struct Position {
    pub entry_price: f64,
    pub take_profit: f64,
    pub stop_loss: f64,
    pub swing_low: f64,
}

impl Position {
    pub fn open(entry_price: f64, levels: &EntryLevels, swing_low: f64) -> Self {
        Position {
            entry_price,
            take_profit: levels.take_profit,
            stop_loss: levels.stop_loss,
            swing_low,
        }
    }

    pub fn should_take_profit(&self, price: f64) -> bool {
        price >= self.take_profit
    }

    pub fn should_stop_loss(&self, price: f64) -> bool {
        price <= self.stop_loss
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        price - self.entry_price
    }
}
