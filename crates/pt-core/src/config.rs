//! Engine configuration.
//!
//! Constants of the reference behaviour (500 m radius, 2 s tick, slow-walk
//! step) are the defaults; tests shrink them for determinism.  Typically
//! loaded from a TOML file by the application crate and passed to the
//! engine or runtime constructor.

use std::time::Duration;

use crate::{CoreError, CoreResult};

/// Detection radius of the reference behaviour, metres.
pub const DEFAULT_DETECTION_RADIUS_M: f64 = 500.0;
/// Tick interval of the reference behaviour, milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 2_000;
/// Random-walk step scale, degrees of latitude-equivalent per tick.
pub const DEFAULT_STEP_SCALE_DEG: f64 = 0.000_05;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProximityConfig {
    /// Maximum distance (metres) at which an entity counts as nearby.
    pub detection_radius_m: f64,

    /// Wall-clock period between ticks when run on a timer.
    pub tick_interval_ms: u64,

    /// Each step is `step_scale_deg * (U + 0.5)` degrees, `U ~ [0, 1)`.
    pub step_scale_deg: f64,

    /// Root RNG seed.  The same seed always produces identical walks.
    pub seed: u64,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            detection_radius_m: DEFAULT_DETECTION_RADIUS_M,
            tick_interval_ms:   DEFAULT_TICK_INTERVAL_MS,
            step_scale_deg:     DEFAULT_STEP_SCALE_DEG,
            seed:               42,
        }
    }
}

impl ProximityConfig {
    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject zero, negative, or non-finite parameters.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.detection_radius_m.is_finite() && self.detection_radius_m > 0.0) {
            return Err(CoreError::Config(format!(
                "detection_radius_m must be positive, got {}",
                self.detection_radius_m
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(CoreError::Config("tick_interval_ms must be non-zero".into()));
        }
        if !(self.step_scale_deg.is_finite() && self.step_scale_deg > 0.0) {
            return Err(CoreError::Config(format!(
                "step_scale_deg must be positive, got {}",
                self.step_scale_deg
            )));
        }
        Ok(())
    }
}
