//! Wall-clock time source.

use chrono::{DateTime, Utc};

use crate::ports::outbound::Clock;

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
