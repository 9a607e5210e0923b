//! Concrete adapter implementations for ports.

pub mod console_report_adapter;
pub mod csv_replay_adapter;
pub mod file_config_adapter;
pub mod paper_order_adapter;
pub mod system_clock;
