//! Statistics gathered at the end of a simulation run

use std::fmt;

use super::config::{round_count, round_half_even};
use super::types::{UserCategory, NO_SAMPLES, REPORT_COUNT_GRANULARITY};
use super::user::User;

/// Intersection time statistics for one category of user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryReport {
    pub category: UserCategory,
    /// Cleared users, rounded to the nearest thousand
    pub sample_count: usize,
    /// Cleared users before rounding
    pub raw_count: usize,
    /// Mean intersection time in whole seconds, or [`NO_SAMPLES`]
    pub mean_intersection_time: i64,
}

impl CategoryReport {
    /// Summarise the cleared users of `category`; uncleared users are ignored
    pub fn collect(category: UserCategory, users: &[User]) -> Self {
        let times: Vec<f64> = users
            .iter()
            .filter(|user| user.is_cleared() && user.category == category)
            .map(User::intersection_time)
            .collect();

        Self {
            category,
            sample_count: round_count(times.len(), REPORT_COUNT_GRANULARITY),
            raw_count: times.len(),
            mean_intersection_time: average(&times)
                .map(|mean| round_half_even(mean) as i64)
                .unwrap_or(NO_SAMPLES),
        }
    }

    pub fn has_samples(&self) -> bool {
        self.raw_count > 0
    }
}

/// Mean of a sample, `None` when the sample is empty
pub fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Results of a full simulation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    /// Per-category statistics, in [`UserCategory::ALL`] order
    pub categories: Vec<CategoryReport>,
    /// Users accepted into a lane during the run
    pub users_generated: usize,
    /// Arrivals with no lane to queue in
    pub users_dropped: usize,
    /// Users still queued when the horizon was reached
    pub users_queued: usize,
    /// Simulated clock when the run stopped, in seconds
    pub final_time: u64,
}

impl SimulationReport {
    pub fn category(&self, category: UserCategory) -> &CategoryReport {
        &self.categories[category.index()]
    }

    /// `(sample_count, mean_intersection_time)` per category
    pub fn summary(&self) -> Vec<(UserCategory, usize, i64)> {
        self.categories
            .iter()
            .map(|report| {
                (
                    report.category,
                    report.sample_count,
                    report.mean_intersection_time,
                )
            })
            .collect()
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<12} {:>10} {:>14}", "category", "samples", "mean time (s)")?;
        for report in &self.categories {
            let mean = if report.has_samples() {
                report.mean_intersection_time.to_string()
            } else {
                "-".to_string()
            };
            writeln!(
                f,
                "{:<12} {:>10} {:>14}",
                report.category.name(),
                report.sample_count,
                mean
            )?;
        }
        write!(
            f,
            "generated={} dropped={} still queued={} time={}s",
            self.users_generated, self.users_dropped, self.users_queued, self.final_time
        )
    }
}
