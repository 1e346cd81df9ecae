//! Flight delay aggregation and health grading.
//!
//! This module groups flight records by airline, weekday, month, route and
//! weekday × hour, computes mean delays and rates per group, and scores
//! routes and airlines on a letter-graded health scale.

pub mod aggregate;
pub mod grade;
pub mod health;
pub mod types;
pub mod utility;
