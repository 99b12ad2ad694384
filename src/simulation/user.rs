//! Road users crossing the intersection

use super::config::SimConfig;
use super::types::UserCategory;

/// A single road user traversing the intersection once
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub category: UserCategory,
    /// Seconds spent at the intersection so far, waiting and crossing
    intersection_time: f64,
    /// Set once the user has been let through
    cleared: bool,
}

impl User {
    pub fn new(category: UserCategory) -> Self {
        Self {
            category,
            intersection_time: 0.0,
            cleared: false,
        }
    }

    pub fn intersection_time(&self) -> f64 {
        self.intersection_time
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// Total time spent waiting to cross (intersection time minus clear time)
    pub fn wait_time(&self, config: &SimConfig) -> f64 {
        self.intersection_time - f64::from(config.profile(self.category).clear_time)
    }

    /// Add elapsed seconds
    pub(crate) fn accrue(&mut self, seconds: f64) {
        debug_assert!(seconds >= 0.0, "negative accrual of {}s", seconds);
        self.intersection_time += seconds;
    }

    /// Mark the user as through the intersection, optionally settling its time
    pub(crate) fn clear(&mut self, settle: impl FnOnce(f64) -> f64) {
        debug_assert!(!self.cleared, "user cleared twice");
        self.intersection_time = settle(self.intersection_time);
        debug_assert!(self.intersection_time >= 0.0, "negative settled time");
        self.cleared = true;
    }
}
