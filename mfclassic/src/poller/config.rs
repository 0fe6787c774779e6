//! Poller configuration

use std::time::Duration;

use crate::constants::MF_CLASSIC_FWT_FC;
use crate::utils::fc_to_duration;

/// Settings applied to every exchange a poller issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    /// Frame waiting time in carrier cycles
    pub fwt_fc: u32,
}

impl PollerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fwt_fc(mut self, fwt_fc: u32) -> Self {
        self.fwt_fc = fwt_fc;
        self
    }

    /// Frame waiting time as wall-clock duration
    pub fn fwt(&self) -> Duration {
        fc_to_duration(self.fwt_fc)
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            fwt_fc: MF_CLASSIC_FWT_FC,
        }
    }
}
