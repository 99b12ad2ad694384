//! Run configuration for the intersection simulation
//!
//! Per-category timing constants, the light phase duration, the rounding
//! policy and the lane allocation of each approach. A configuration is
//! validated once when a simulation is built and is read-only afterwards.

use anyhow::{bail, Result};
use clap::ValueEnum;
use std::collections::BTreeMap;

use super::types::{Direction, UserCategory, DEFAULT_LIGHT_TIME};

/// Clear times in seconds
pub const CAR_CLEAR_TIME: u32 = 1;
pub const EMERGENCY_CLEAR_TIME: u32 = 2;
pub const CYCLIST_CLEAR_TIME: u32 = 5;
pub const PEDESTRIAN_CLEAR_TIME: u32 = 15;

/// Mean seconds between arrivals at a single approach
pub const CAR_ARRIVAL_PERIOD: u32 = 1;
pub const EMERGENCY_ARRIVAL_PERIOD: u32 = 60 * 4;
pub const CYCLIST_ARRIVAL_PERIOD: u32 = 10;
pub const PEDESTRIAN_ARRIVAL_PERIOD: u32 = 2;

/// How many users of a category can safely cross at the same time
pub const CAR_OVERLAP: u32 = 2;
pub const EMERGENCY_OVERLAP: u32 = 1;
pub const CYCLIST_OVERLAP: u32 = 6;
pub const PEDESTRIAN_OVERLAP: u32 = 18;

/// Timing constants for one category of road user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryProfile {
    /// Seconds one user needs to fully vacate the intersection
    pub clear_time: u32,
    /// Mean seconds between arrivals at one approach
    pub arrival_period: u32,
    /// Users that can occupy the intersection simultaneously
    pub overlap: u32,
}

impl CategoryProfile {
    pub const fn new(clear_time: u32, arrival_period: u32, overlap: u32) -> Self {
        Self {
            clear_time,
            arrival_period,
            overlap,
        }
    }

    /// Built-in constants for a category
    pub fn default_for(category: UserCategory) -> Self {
        match category {
            UserCategory::Car => Self::new(CAR_CLEAR_TIME, CAR_ARRIVAL_PERIOD, CAR_OVERLAP),
            UserCategory::EmergencyVehicle => Self::new(
                EMERGENCY_CLEAR_TIME,
                EMERGENCY_ARRIVAL_PERIOD,
                EMERGENCY_OVERLAP,
            ),
            UserCategory::Cyclist => {
                Self::new(CYCLIST_CLEAR_TIME, CYCLIST_ARRIVAL_PERIOD, CYCLIST_OVERLAP)
            }
            UserCategory::Pedestrian => Self::new(
                PEDESTRIAN_CLEAR_TIME,
                PEDESTRIAN_ARRIVAL_PERIOD,
                PEDESTRIAN_OVERLAP,
            ),
        }
    }

    /// Expected arrivals at one approach during a phase of `light_time` seconds
    pub fn expected_arrivals(&self, light_time: u32) -> f64 {
        f64::from(light_time) / f64::from(self.arrival_period)
    }

    /// Discharge quanta available to this category during one green phase
    pub fn quanta_per_phase(&self, light_time: u32) -> u64 {
        // Widened so any u32 light time and overlap fit; division floors
        u64::from(light_time) * u64::from(self.overlap) / u64::from(self.clear_time)
    }
}

/// How fractional clear-time shares are turned into whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RoundingPolicy {
    /// Accumulate exact shares; round the popped user's total once, ties to even
    #[default]
    RoundOnPop,
    /// Floor each per-quantum share before accumulating; never round totals
    FloorIncrement,
}

/// Process-wide constants for one simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Duration of one light phase in seconds
    pub light_time: u32,
    /// Timing constants, indexed by [`UserCategory::index`]
    profiles: [CategoryProfile; 4],
    pub rounding: RoundingPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self {
            light_time: DEFAULT_LIGHT_TIME,
            profiles: UserCategory::ALL.map(CategoryProfile::default_for),
            rounding: RoundingPolicy::default(),
        }
    }

    pub fn with_light_time(mut self, light_time: u32) -> Self {
        self.light_time = light_time;
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_profile(mut self, category: UserCategory, profile: CategoryProfile) -> Self {
        self.profiles[category.index()] = profile;
        self
    }

    pub fn profile(&self, category: UserCategory) -> &CategoryProfile {
        &self.profiles[category.index()]
    }

    /// Check that every constant can drive the simulation
    pub fn validate(&self) -> Result<()> {
        if self.light_time == 0 {
            bail!("Light time must be positive");
        }
        for category in UserCategory::ALL {
            let profile = self.profile(category);
            if profile.clear_time == 0 {
                bail!("Clear time for {} must be positive", category);
            }
            if profile.arrival_period == 0 {
                bail!("Arrival period for {} must be positive", category);
            }
            if profile.overlap == 0 {
                bail!("Overlap for {} must be positive", category);
            }
        }
        Ok(())
    }
}

/// Number of lanes per category at each approach
///
/// Categories that are never set have zero lanes: users of that category
/// arriving at that approach have nowhere to queue and are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneConfig {
    lanes: BTreeMap<Direction, BTreeMap<UserCategory, usize>>,
}

impl LaneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lane count for a category at one approach
    pub fn with_lanes(
        mut self,
        direction: Direction,
        category: UserCategory,
        count: usize,
    ) -> Self {
        self.set_lanes(direction, category, count);
        self
    }

    pub fn set_lanes(&mut self, direction: Direction, category: UserCategory, count: usize) {
        self.lanes
            .entry(direction)
            .or_default()
            .insert(category, count);
    }

    /// Lane count for a category at one approach (zero when unset)
    pub fn lanes(&self, direction: Direction, category: UserCategory) -> usize {
        self.lanes
            .get(&direction)
            .and_then(|by_category| by_category.get(&category))
            .copied()
            .unwrap_or(0)
    }

    /// Lane counts for one approach, in category order
    pub fn lanes_for(&self, direction: Direction) -> Vec<(UserCategory, usize)> {
        UserCategory::ALL
            .iter()
            .map(|&category| (category, self.lanes(direction, category)))
            .collect()
    }

    /// Total lanes across every approach
    pub fn total_lanes(&self) -> usize {
        self.lanes
            .values()
            .flat_map(|by_category| by_category.values())
            .sum()
    }
}

impl FromIterator<(Direction, UserCategory, usize)> for LaneConfig {
    fn from_iter<I: IntoIterator<Item = (Direction, UserCategory, usize)>>(iter: I) -> Self {
        let mut config = LaneConfig::new();
        for (direction, category, count) in iter {
            config.set_lanes(direction, category, count);
        }
        config
    }
}

/// Round to the nearest integer, ties to even
pub fn round_half_even(value: f64) -> f64 {
    value.round_ties_even()
}

/// Round a count to the nearest multiple of `granularity`, ties to even
pub fn round_count(count: usize, granularity: usize) -> usize {
    if granularity == 0 {
        return count;
    }
    let quotient = count / granularity;
    let remainder = count % granularity;
    let twice = remainder * 2;
    let rounded_up = twice > granularity || (twice == granularity && quotient % 2 == 1);
    if rounded_up {
        (quotient + 1) * granularity
    } else {
        quotient * granularity
    }
}
