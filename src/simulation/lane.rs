//! Lane queuing and discharge logic
//!
//! A lane is a FIFO of users of a single category. Lanes do not own users;
//! they hold handles into the simulation's user list, which is passed in
//! whenever queued users need updating.

use anyhow::{bail, Result};
use std::collections::VecDeque;

use super::config::{round_half_even, RoundingPolicy, SimConfig};
use super::types::{UserCategory, UserId};
use super::user::User;

/// A lane at one approach of the intersection
#[derive(Debug, Clone)]
pub struct Lane {
    category: UserCategory,
    /// Queued users, head first
    users: VecDeque<UserId>,
}

impl Lane {
    pub fn new(category: UserCategory) -> Self {
        Self {
            category,
            users: VecDeque::new(),
        }
    }

    pub fn category(&self) -> UserCategory {
        self.category
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Queued users, head first
    pub fn queued(&self) -> impl Iterator<Item = UserId> + '_ {
        self.users.iter().copied()
    }

    /// Append a user to the tail of the lane
    ///
    /// Fails if the user's category differs from the lane's. That can only
    /// happen through a routing bug, so callers should abort the run.
    pub fn add(&mut self, id: UserId, user: &User) -> Result<()> {
        if user.category != self.category {
            bail!(
                "Incompatible category: {} user {:?} routed into a {} lane",
                user.category,
                id,
                self.category
            );
        }
        self.users.push_back(id);
        Ok(())
    }

    /// Apply one quantum of service to the lane
    ///
    /// Every queued user is charged its share of the clear time, then the
    /// head of the queue (if any) is let through. Returns the cleared user.
    pub fn discharge(&mut self, users: &mut [User], config: &SimConfig) -> Option<UserId> {
        let profile = config.profile(self.category);
        let share = f64::from(profile.clear_time) / f64::from(profile.overlap);
        let increment = match config.rounding {
            RoundingPolicy::RoundOnPop => share,
            RoundingPolicy::FloorIncrement => share.floor(),
        };

        for id in &self.users {
            users[id.0].accrue(increment);
        }

        let id = self.users.pop_front()?;
        let user = &mut users[id.0];
        match config.rounding {
            RoundingPolicy::RoundOnPop => user.clear(round_half_even),
            RoundingPolicy::FloorIncrement => user.clear(|time| time),
        }
        Some(id)
    }

    /// Charge every queued user a full red phase
    pub fn hold(&mut self, users: &mut [User], light_time: u32) {
        let wait = f64::from(light_time);
        for id in &self.users {
            users[id.0].accrue(wait);
        }
    }
}
