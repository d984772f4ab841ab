#![forbid(unsafe_code)]

//! Core domain model and business logic for the Coach workout tracker.
//!
//! This crate provides:
//! - Domain types (sets, exercises, workouts, clients, history)
//! - Sample fixtures
//! - The in-memory workout store
//! - Progress aggregation
//! - The exercise stopwatch
//! - Navigation and role presentation

pub mod types;
pub mod error;
pub mod fixtures;
pub mod config;
pub mod logging;
pub mod progress;
pub mod store;
pub mod stopwatch;
pub mod nav;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use progress::{format_elapsed, history_summary, roster_summary, Progress};
pub use store::{update_set, WorkoutStore};
pub use stopwatch::{Stopwatch, StopwatchTask};
pub use nav::{nav_items, NavItem, Role, View};
