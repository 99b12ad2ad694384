//! Core types for the intersection simulation
//!
//! Road user categories, compass directions and light phases. These are
//! plain value types shared by every other module.

use std::fmt;

/// A handle to a user owned by the simulation
/// This is a simple wrapper around an index into the simulation's user list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub usize);

/// Category of road user
///
/// Cars and cyclists include similar vehicles (trucks count as cars,
/// scooters as cyclists).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UserCategory {
    Car,
    /// Emergency and other right-of-way vehicles (buses, trams)
    EmergencyVehicle,
    Cyclist,
    Pedestrian,
}

impl UserCategory {
    /// Every category, in the order arrivals are generated
    pub const ALL: [UserCategory; 4] = [
        UserCategory::Car,
        UserCategory::EmergencyVehicle,
        UserCategory::Cyclist,
        UserCategory::Pedestrian,
    ];

    /// Position of this category in [`UserCategory::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            UserCategory::Car => "car",
            UserCategory::EmergencyVehicle => "emergency",
            UserCategory::Cyclist => "cyclist",
            UserCategory::Pedestrian => "pedestrian",
        }
    }
}

impl fmt::Display for UserCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The four cardinal directions traffic can enter from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Every direction, in source iteration order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

/// The two phases of the traffic light
/// Each phase gives the green to one axis (two opposite directions)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightPhase {
    NorthSouth,
    EastWest,
}

impl LightPhase {
    /// Directions facing a green light during this phase
    pub fn green_axis(self) -> [Direction; 2] {
        match self {
            LightPhase::NorthSouth => [Direction::North, Direction::South],
            LightPhase::EastWest => [Direction::East, Direction::West],
        }
    }

    /// Directions facing a red light during this phase
    pub fn red_axis(self) -> [Direction; 2] {
        self.next().green_axis()
    }

    /// The phase that follows this one
    pub fn next(self) -> LightPhase {
        match self {
            LightPhase::NorthSouth => LightPhase::EastWest,
            LightPhase::EastWest => LightPhase::NorthSouth,
        }
    }
}

/// Default duration of one light phase in seconds (green to red)
pub const DEFAULT_LIGHT_TIME: u32 = 30;

/// Below this many expected arrivals per phase a category is treated as rare
/// and generates at most one user per phase
pub const RARE_ARRIVAL_THRESHOLD: f64 = 0.8;

/// Sample counts in reports are rounded to a multiple of this
pub const REPORT_COUNT_GRANULARITY: usize = 1000;

/// Mean reported for a category with no cleared users
pub const NO_SAMPLES: i64 = -1;
