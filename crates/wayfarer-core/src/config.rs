//! Planner configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Knobs for the controller loop and optimizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Hard cap on stage executions per session. The router/stage contract
    /// guarantees convergence in far fewer; exceeding this is a fatal
    /// internal error rather than a silent loop.
    pub max_stage_executions: usize,
    /// Stage-level timeout around each provider call, in seconds.
    pub search_timeout_secs: u64,
    /// Run the flight/hotel/activity searches concurrently when more than
    /// one is still pending.
    pub parallel_search: bool,
    /// Ceiling on the activity subset when the trip length is unknown;
    /// with known dates the optimizer caps at one activity per full day.
    pub max_activities: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_stage_executions: 16,
            search_timeout_secs: 20,
            parallel_search: true,
            max_activities: 8,
        }
    }
}

impl PlannerConfig {
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }
}
