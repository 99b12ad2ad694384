//! Traffic sources (the four approaches of the intersection)

use anyhow::{Context, Result};

use super::config::SimConfig;
use super::lane::Lane;
use super::types::{Direction, UserCategory, UserId};
use super::user::User;

/// One of the four approaches feeding traffic into the intersection
#[derive(Debug, Clone)]
pub struct Source {
    pub direction: Direction,
    lanes: Vec<Lane>,
}

impl Source {
    /// Create a source with `count` lanes for each `(category, count)` pair
    pub fn new(
        direction: Direction,
        lane_counts: impl IntoIterator<Item = (UserCategory, usize)>,
    ) -> Self {
        let lanes = lane_counts
            .into_iter()
            .flat_map(|(category, count)| (0..count).map(move |_| Lane::new(category)))
            .collect();
        Self { direction, lanes }
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Whether this source has at least one lane for the category
    pub fn accepts(&self, category: UserCategory) -> bool {
        self.lanes.iter().any(|lane| lane.category() == category)
    }

    /// Users currently queued across every lane
    pub fn queued(&self) -> usize {
        self.lanes.iter().map(Lane::len).sum()
    }

    /// Queue a user in the least loaded lane of its category
    ///
    /// Ties go to the lane created first. Returns `Ok(false)` when the source
    /// has no lane for the category; the caller is expected to drop the user.
    pub fn add(&mut self, id: UserId, user: &User) -> Result<bool> {
        let mut destination: Option<usize> = None;
        for (index, lane) in self.lanes.iter().enumerate() {
            if lane.category() != user.category {
                continue;
            }
            let shorter = match destination {
                Some(current) => lane.len() < self.lanes[current].len(),
                None => true,
            };
            if shorter {
                destination = Some(index);
            }
        }

        let Some(index) = destination else {
            return Ok(false);
        };
        let direction = self.direction;
        self.lanes[index]
            .add(id, user)
            .with_context(|| format!("Failed to queue user at {} source", direction))?;
        Ok(true)
    }

    /// Hold every lane for a red phase
    pub fn hold(&mut self, users: &mut [User], light_time: u32) {
        for lane in &mut self.lanes {
            lane.hold(users, light_time);
        }
    }

    /// Apply one discharge quantum to every lane of the category
    /// Returns the number of users let through
    pub fn discharge(
        &mut self,
        category: UserCategory,
        users: &mut [User],
        config: &SimConfig,
    ) -> usize {
        let mut cleared = 0;
        for lane in &mut self.lanes {
            if lane.category() == category && lane.discharge(users, config).is_some() {
                cleared += 1;
            }
        }
        cleared
    }
}
