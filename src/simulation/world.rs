//! The simulation driver that ties sources, lanes and users together
//!
//! Time advances in phase pairs: every pair runs a north-south green phase
//! followed by an east-west green phase. Each phase first generates arrivals
//! at all four approaches, then holds the red axis and discharges the green
//! axis.

use anyhow::{Context, Result};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::config::{round_half_even, CategoryProfile, LaneConfig, SimConfig};
use super::report::{CategoryReport, SimulationReport};
use super::source::Source;
use super::types::{Direction, LightPhase, UserCategory, UserId, RARE_ARRIVAL_THRESHOLD};
use super::user::User;

/// A four-way signalized intersection run to a fixed horizon
pub struct Simulation {
    /// Horizon in seconds
    stop_time: u64,

    /// Current simulated clock in seconds
    time: u64,

    /// Every user accepted into a lane, in arrival order
    users: Vec<User>,

    /// One source per direction, indexed by [`Direction::index`]
    sources: [Source; 4],

    config: SimConfig,

    /// Arrivals rejected because their approach had no lane for them
    users_dropped: usize,

    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,
}

impl Simulation {
    fn new_internal(
        stop_time: u64,
        lanes: &LaneConfig,
        config: SimConfig,
        rng: Option<StdRng>,
    ) -> Result<Self> {
        config.validate().context("Invalid simulation config")?;
        let sources =
            Direction::ALL.map(|direction| Source::new(direction, lanes.lanes_for(direction)));

        Ok(Self {
            stop_time,
            time: 0,
            users: Vec::new(),
            sources,
            config,
            users_dropped: 0,
            rng,
        })
    }

    pub fn new(stop_time: u64, lanes: &LaneConfig, config: SimConfig) -> Result<Self> {
        Self::new_internal(stop_time, lanes, config, None)
    }

    /// Create a simulation with a seeded RNG for reproducible runs
    pub fn new_with_seed(
        stop_time: u64,
        lanes: &LaneConfig,
        config: SimConfig,
        seed: u64,
    ) -> Result<Self> {
        Self::new_internal(stop_time, lanes, config, Some(StdRng::seed_from_u64(seed)))
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn stop_time(&self) -> u64 {
        self.stop_time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn users_dropped(&self) -> usize {
        self.users_dropped
    }

    pub fn source(&self, direction: Direction) -> &Source {
        &self.sources[direction.index()]
    }

    /// Uniform draw in `[0, 1)`, using seeded RNG if available
    fn random_unit(&mut self) -> f64 {
        match &mut self.rng {
            Some(rng) => rng.random::<f64>(),
            None => rand::rng().random::<f64>(),
        }
    }

    /// Number of users of one category arriving at one approach this phase
    ///
    /// Consumes exactly one draw.
    fn arrival_count(&mut self, profile: &CategoryProfile) -> usize {
        let expected = profile.expected_arrivals(self.config.light_time);
        let draw = self.random_unit();
        if expected < RARE_ARRIVAL_THRESHOLD {
            // Rare users arrive at most once per phase, with probability `expected`
            usize::from(draw < expected)
        } else {
            round_half_even(expected * 2.0 * draw) as usize
        }
    }

    /// Offer a new user to a source; returns whether it was queued
    fn admit(&mut self, direction: Direction, category: UserCategory) -> Result<bool> {
        let id = UserId(self.users.len());
        let user = User::new(category);
        let queued = self.sources[direction.index()].add(id, &user)?;
        if queued {
            self.users.push(user);
        } else {
            self.users_dropped += 1;
        }
        Ok(queued)
    }

    /// Generate arrivals at every approach, sources first then categories
    fn generate_arrivals(&mut self) -> Result<()> {
        let mut dropped = 0;
        for direction in Direction::ALL {
            for category in UserCategory::ALL {
                let profile = *self.config.profile(category);
                let count = self.arrival_count(&profile);
                for _ in 0..count {
                    if !self.admit(direction, category)? {
                        dropped += 1;
                    }
                }
            }
        }
        if dropped > 0 {
            debug!("Dropped {} arrivals with no lane at t={}s", dropped, self.time);
        }
        Ok(())
    }

    /// Run one light phase: arrivals, then hold the red axis and discharge the green axis
    pub fn light_session(&mut self, phase: LightPhase) -> Result<()> {
        self.generate_arrivals()?;

        let light_time = self.config.light_time;
        for direction in phase.red_axis() {
            self.sources[direction.index()].hold(&mut self.users, light_time);
        }

        let mut cleared = 0;
        for direction in phase.green_axis() {
            for category in UserCategory::ALL {
                let quanta = self.config.profile(category).quanta_per_phase(light_time);
                for _ in 0..quanta {
                    cleared += self.sources[direction.index()].discharge(
                        category,
                        &mut self.users,
                        &self.config,
                    );
                }
            }
        }
        trace!("{:?} phase at t={}s cleared {} users", phase, self.time, cleared);
        Ok(())
    }

    /// Advance the clock in phase pairs until the horizon is reached
    ///
    /// The clock moves a full pair before either phase runs, so the last pair
    /// may end past `stop_time`.
    pub fn play(&mut self) -> Result<()> {
        let pair = 2 * u64::from(self.config.light_time);
        while self.time < self.stop_time {
            self.time = self
                .time
                .checked_add(pair)
                .context("Simulation clock overflowed")?;
            self.light_session(LightPhase::NorthSouth)
                .with_context(|| format!("North-south phase failed at t={}s", self.time))?;
            self.light_session(LightPhase::EastWest)
                .with_context(|| format!("East-west phase failed at t={}s", self.time))?;
        }
        Ok(())
    }

    /// Summarise cleared users per category without advancing the clock
    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            categories: UserCategory::ALL
                .iter()
                .map(|&category| CategoryReport::collect(category, &self.users))
                .collect(),
            users_generated: self.users.len(),
            users_dropped: self.users_dropped,
            users_queued: self.sources.iter().map(Source::queued).sum(),
            final_time: self.time,
        }
    }

    /// Play the simulation to its horizon and report per-category statistics
    pub fn run(&mut self) -> Result<SimulationReport> {
        info!(
            "Running intersection simulation to t={}s (light time {}s, {:?})",
            self.stop_time, self.config.light_time, self.config.rounding
        );
        self.play()?;
        let report = self.report();
        info!(
            "Simulation complete at t={}s: {} users generated, {} dropped, {} still queued",
            report.final_time, report.users_generated, report.users_dropped, report.users_queued
        );
        Ok(report)
    }
}
