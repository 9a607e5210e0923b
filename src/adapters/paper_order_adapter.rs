//! Paper trading order adapter implementing OrderPort.
//!
//! Simulates a cash account filled at the replay adapter's last served
//! price. Rejections mirror a real gateway: a buy beyond available cash
//! or a sell beyond the held quantity returns `OrderRejected`, which is
//! what makes the engine's duplicate-submission pattern observable in a
//! dry run.

use crate::adapters::csv_replay_adapter::CsvReplayAdapter;
use crate::domain::error::OscalpError;
use crate::domain::market::{OrderAck, OrderSide};
use crate::ports::order_port::OrderPort;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub struct PaperOrderAdapter {
    prices: Rc<CsvReplayAdapter>,
    cash: Cell<f64>,
    holdings: RefCell<f64>,
    next_order_id: Cell<u64>,
}

impl PaperOrderAdapter {
    pub fn new(prices: Rc<CsvReplayAdapter>, starting_cash: f64) -> Self {
        Self {
            prices,
            cash: Cell::new(starting_cash),
            holdings: RefCell::new(0.0),
            next_order_id: Cell::new(1),
        }
    }

    fn next_ack(&self) -> OrderAck {
        let id = self.next_order_id.get();
        self.next_order_id.set(id + 1);
        OrderAck {
            order_id: Some(format!("paper-{}", id)),
        }
    }
}

impl OrderPort for PaperOrderAdapter {
    fn buy_by_notional(&self, symbol: &str, notional: f64) -> Result<OrderAck, OscalpError> {
        if notional <= 0.0 || notional > self.cash.get() {
            return Err(OscalpError::OrderRejected {
                side: OrderSide::Buy,
                symbol: symbol.to_string(),
                reason: format!(
                    "insufficient funds: notional {:.2} exceeds cash {:.2}",
                    notional,
                    self.cash.get()
                ),
            });
        }
        let Some(fill_price) = self.prices.last_served_price() else {
            return Err(OscalpError::OrderRejected {
                side: OrderSide::Buy,
                symbol: symbol.to_string(),
                reason: "no replay price available yet".to_string(),
            });
        };
        self.cash.set(self.cash.get() - notional);
        *self.holdings.borrow_mut() += notional / fill_price;
        Ok(self.next_ack())
    }

    fn sell_by_quantity(&self, symbol: &str, quantity: f64) -> Result<OrderAck, OscalpError> {
        let held = *self.holdings.borrow();
        if quantity <= 0.0 || quantity > held {
            return Err(OscalpError::OrderRejected {
                side: OrderSide::Sell,
                symbol: symbol.to_string(),
                reason: format!(
                    "insufficient holdings: quantity {:.8} exceeds held {:.8}",
                    quantity, held
                ),
            });
        }
        let Some(fill_price) = self.prices.last_served_price() else {
            return Err(OscalpError::OrderRejected {
                side: OrderSide::Sell,
                symbol: symbol.to_string(),
                reason: "no replay price available yet".to_string(),
            });
        };
        *self.holdings.borrow_mut() -= quantity;
        self.cash.set(self.cash.get() + quantity * fill_price);
        Ok(self.next_ack())
    }

    fn held_quantity(&self, _symbol: &str) -> Result<f64, OscalpError> {
        Ok(*self.holdings.borrow())
    }

    fn available_cash(&self) -> Result<f64, OscalpError> {
        Ok(self.cash.get())
    }
}
