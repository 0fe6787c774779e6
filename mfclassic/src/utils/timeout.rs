//! Frame waiting time helpers.
//!
//! ISO14443 expresses waiting times in carrier cycles (fc, 1/13.56 MHz).
//! These helpers convert between fc and `Duration` for configuration and
//! log output.

use std::time::Duration;

/// ISO14443 carrier frequency in Hz.
pub const CARRIER_FREQUENCY_HZ: u64 = 13_560_000;

/// Convert a number of carrier cycles to a Duration (rounded down to ns).
pub fn fc_to_duration(fc: u32) -> Duration {
    Duration::from_nanos(u64::from(fc) * 1_000_000_000 / CARRIER_FREQUENCY_HZ)
}

/// Convert a Duration to carrier cycles, saturating at `u32::MAX`.
pub fn duration_to_fc(duration: Duration) -> u32 {
    let fc = duration.as_nanos() * u128::from(CARRIER_FREQUENCY_HZ) / 1_000_000_000;
    u32::try_from(fc).unwrap_or(u32::MAX)
}
