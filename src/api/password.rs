//! STK password derivation
//!
//! The password is `base64(shortcode + passkey + timestamp)`. The same
//! timestamp string must be sent in the `Timestamp` field, so both values are
//! produced together from a single clock reading.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Local, NaiveDateTime};

/// Wire format of the `Timestamp` field (`YYYYMMDDHHMMSS`)
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Source of the current local time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Password and the timestamp embedded in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StkPassword {
    pub password: String,
    pub timestamp: String,
}

impl StkPassword {
    /// Derive the password for `short_code`/`pass_key` at the given instant
    pub fn at(short_code: u64, pass_key: &str, at: NaiveDateTime) -> Self {
        let timestamp = at.format(TIMESTAMP_FORMAT).to_string();
        let password = STANDARD.encode(format!("{}{}{}", short_code, pass_key, timestamp));
        Self {
            password,
            timestamp,
        }
    }

    /// Derive the password using one reading of `clock`
    pub fn generate(short_code: u64, pass_key: &str, clock: &dyn Clock) -> Self {
        Self::at(short_code, pass_key, clock.now())
    }
}
