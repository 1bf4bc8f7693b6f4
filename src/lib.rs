//! Bugboard - a live milestone board for issue-tracker bugs and kanban cards
//!
//! This library provides the core functionality for Bugboard, including:
//! - Milestone catalog and filter state for the board
//! - Visibility rules for bugs, tasks and milestone columns
//! - Snapshot storage in SQLite with a change revision counter
//! - A change feed that tells watchers to refetch
//! - CLI command parsing and rendering
//!
//! # Example
//!
//! ```no_run
//! use bugboard::cli::run;
//!
//! fn main() {
//!     if let Err(e) = run() {
//!         eprintln!("Error: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod filter;
pub mod models;
pub mod notify;
pub mod repo;
