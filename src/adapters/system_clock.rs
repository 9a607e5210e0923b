//! Wall clock adapter implementing ClockPort via `std::thread::sleep`.

use crate::ports::clock_port::ClockPort;
use std::time::Duration;

pub struct SystemClock;

impl ClockPort for SystemClock {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
