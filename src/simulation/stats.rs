// src/simulation/stats.rs

/// Time-weighted accumulators for number-in-system and server-busy time.
///
/// Areas grow by `state * elapsed` at each state-changing instant; the
/// averages fall out at run end as `area / clock`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeWeightedStats {
    pub area_num_in_system: f64,
    pub area_server_busy: f64,
    pub last_update_time: f64,
}

impl TimeWeightedStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Charges the interval `[last_update_time, new_time]` with the state
    /// that held throughout it, then advances `last_update_time`.
    ///
    /// Call exactly once per elapsed interval, with the state as it was
    /// before the transition that ends the interval.
    pub fn observe(&mut self, num_in_system: u32, server_busy: bool, new_time: f64) {
        debug_assert!(
            new_time >= self.last_update_time,
            "observe must not move time backwards"
        );
        let elapsed = (new_time - self.last_update_time).max(0.0);
        self.area_num_in_system += f64::from(num_in_system) * elapsed;
        if server_busy {
            self.area_server_busy += elapsed;
        }
        self.last_update_time = new_time;
    }

    /// Average number in system over the run; 0 on a zero-length clock.
    pub fn avg_number_in_system(&self, clock: f64) -> f64 {
        if clock > 0.0 {
            self.area_num_in_system / clock
        } else {
            0.0
        }
    }

    /// Fraction of the run the server spent busy; 0 on a zero-length clock.
    pub fn utilization(&self, clock: f64) -> f64 {
        if clock > 0.0 {
            self.area_server_busy / clock
        } else {
            0.0
        }
    }

    /// Average queue length: the in-system area minus the in-service area,
    /// over the clock; 0 on a zero-length clock.
    pub fn avg_queue_length(&self, clock: f64) -> f64 {
        if clock > 0.0 {
            (self.area_num_in_system - self.area_server_busy) / clock
        } else {
            0.0
        }
    }
}
