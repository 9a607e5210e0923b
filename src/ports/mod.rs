//! Port traits the domain depends on.

pub mod clock_port;
pub mod config_port;
pub mod market_data_port;
pub mod order_port;
pub mod report_port;
