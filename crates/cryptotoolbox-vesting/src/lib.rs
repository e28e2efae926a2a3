//! Token vesting calculator: a cliff followed by linear unlocking.
//!
//! Timestamps are whole seconds since the Unix epoch. A
//! [`VestingSchedule`] is validated once at construction and every
//! query afterwards is a pure function of the schedule and a timestamp.

pub mod schedule;

pub use schedule::{now_unix, VestingReport, VestingSchedule};
