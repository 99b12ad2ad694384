//! Intersection simulation engine
//!
//! This module contains the queuing, discharge and signal scheduling logic
//! for a single four-way signalized intersection. It has no I/O of its own;
//! callers build a [`Simulation`] from a lane allocation and a [`SimConfig`]
//! and read back a [`SimulationReport`].

mod config;
mod lane;
mod report;
mod source;
mod types;
mod user;
mod world;

pub use config::{
    round_count, round_half_even, CategoryProfile, LaneConfig, RoundingPolicy, SimConfig,
    CAR_ARRIVAL_PERIOD, CAR_CLEAR_TIME, CAR_OVERLAP, CYCLIST_ARRIVAL_PERIOD, CYCLIST_CLEAR_TIME,
    CYCLIST_OVERLAP, EMERGENCY_ARRIVAL_PERIOD, EMERGENCY_CLEAR_TIME, EMERGENCY_OVERLAP,
    PEDESTRIAN_ARRIVAL_PERIOD, PEDESTRIAN_CLEAR_TIME, PEDESTRIAN_OVERLAP,
};
pub use lane::Lane;
pub use report::{average, CategoryReport, SimulationReport};
pub use source::Source;
pub use types::{
    Direction, LightPhase, UserCategory, UserId, DEFAULT_LIGHT_TIME, NO_SAMPLES,
    RARE_ARRIVAL_THRESHOLD, REPORT_COUNT_GRANULARITY,
};
pub use user::User;
pub use world::Simulation;
