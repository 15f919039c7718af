pub mod config;
pub mod engine;
pub mod fel;
pub mod stats;

pub use config::{ConfigError, EngineConfig};
pub use engine::{EventSchedulingSim, RunSummary, StopReason, TraceRow};
pub use fel::{EmptyListError, Event, EventKind, FutureEventList};
pub use stats::TimeWeightedStats;
