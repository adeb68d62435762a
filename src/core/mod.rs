//! Core enrollment logic shared by the library and the CLI

pub mod catalog;
pub mod config;
pub mod credits;
pub mod error;
pub mod models;
pub mod reconcile;
pub mod store;
pub mod timetable;

/// Returns the current version of the `coursereg` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
