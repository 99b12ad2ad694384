//! Lane allocation policies compared by the command line tool

use clap::ValueEnum;

use crate::simulation::{Direction, LaneConfig, UserCategory};

/// Default horizon for scenario runs: twenty simulated hours
pub const DEFAULT_RUN_HOURS: u64 = 20;

/// A named lane allocation for the four approaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Three car lanes per approach, crossings on every side
    Standard,
    /// Two car lanes and two cycle lanes per approach
    CycleLanes,
    /// Cycle lanes, with one north-south pedestrian lane given over to right-of-way traffic
    TransitLanes,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::Standard,
        Scenario::CycleLanes,
        Scenario::TransitLanes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Standard => "standard",
            Scenario::CycleLanes => "cycle-lanes",
            Scenario::TransitLanes => "transit-lanes",
        }
    }

    pub fn lanes(self) -> LaneConfig {
        let mut config = LaneConfig::new();
        for direction in Direction::ALL {
            let north_south = matches!(direction, Direction::North | Direction::South);
            let allocation: &[(UserCategory, usize)] = match (self, north_south) {
                (Scenario::Standard, true) => {
                    &[(UserCategory::Car, 3), (UserCategory::Pedestrian, 2)]
                }
                (Scenario::Standard, false) => {
                    &[(UserCategory::Car, 3), (UserCategory::Pedestrian, 1)]
                }
                (Scenario::CycleLanes, true) => &[
                    (UserCategory::Car, 2),
                    (UserCategory::Cyclist, 2),
                    (UserCategory::Pedestrian, 2),
                ],
                (Scenario::CycleLanes, false) | (Scenario::TransitLanes, false) => &[
                    (UserCategory::Car, 2),
                    (UserCategory::Cyclist, 2),
                    (UserCategory::Pedestrian, 1),
                ],
                (Scenario::TransitLanes, true) => &[
                    (UserCategory::Car, 2),
                    (UserCategory::Cyclist, 2),
                    (UserCategory::EmergencyVehicle, 1),
                    (UserCategory::Pedestrian, 1),
                ],
            };
            for &(category, count) in allocation {
                config.set_lanes(direction, category, count);
            }
        }
        config
    }
}
