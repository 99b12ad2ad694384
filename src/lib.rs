//! Intersection Simulation Library
//!
//! A discrete-event model of a four-way signalized intersection, used to
//! compare lane allocations by the mean time each category of road user
//! spends crossing.

pub mod scenarios;
pub mod simulation;
