//! sklog - personal skill tracker
//!
//! Record skills with a proficiency level, category and notes, attach
//! learning resources, journal entries, certificates and practice time,
//! and derive streaks, heatmaps and gap reports from the collection.
//! Everything persists to a local key-value store.

pub mod app;
pub mod challenges;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod gap;
pub mod storage;
pub mod templates;
#[cfg(test)]
pub mod test_utils;
pub mod timer;
pub mod utils;
pub mod views;

pub use error::{Result, SklogError};
