//! Clock port trait.
//!
//! Every suspension point in the engine goes through this, so tests can
//! observe the wait schedule instead of actually sleeping.

use std::time::Duration;

pub trait ClockPort {
    fn sleep(&self, duration: Duration);
}
