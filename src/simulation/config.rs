// src/simulation/config.rs

use crate::sampling::table::IntervalTable;
use thiserror::Error;

/// Arrivals keep being scheduled until this far past the stop time, so the
/// event list never empties while the run can still use an arrival.
pub const DEFAULT_ARRIVAL_CUTOFF_GRACE: f64 = 20.0;

/// Parameter rejection, raised before any run starts.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("stop time must not be negative, got {0}")]
    NegativeStopTime(f64),
    #[error("departure cap must be at least 1")]
    ZeroDepartureCap,
    #[error("customer count must be at least 1")]
    ZeroCustomers,
    #[error("simulation must cover at least 1 day")]
    ZeroDays,
    #[error("review cycle length must be at least 1 day")]
    ZeroCycleLength,
}

/// Parameters for one event-scheduling run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Wall-clock bound on the simulated run. Zero is legal: the run stops
    /// right after the bootstrap arrival is processed.
    pub stop_time: f64,
    /// Departure-count cap; whichever of the two bounds is hit first ends
    /// the run.
    pub max_departures: u32,
    pub interarrival: IntervalTable<u32>,
    pub service: IntervalTable<u32>,
    pub arrival_cutoff_grace: f64,
}

impl EngineConfig {
    pub fn new(
        stop_time: f64,
        max_departures: u32,
        interarrival: IntervalTable<u32>,
        service: IntervalTable<u32>,
    ) -> Result<Self, ConfigError> {
        if stop_time < 0.0 {
            return Err(ConfigError::NegativeStopTime(stop_time));
        }
        if max_departures == 0 {
            return Err(ConfigError::ZeroDepartureCap);
        }
        Ok(Self {
            stop_time,
            max_departures,
            interarrival,
            service,
            arrival_cutoff_grace: DEFAULT_ARRIVAL_CUTOFF_GRACE,
        })
    }
}
