//! Student Registry Server library.
//!
//! Holds schools and their student registrations in memory, serves the
//! administrative dashboard and per-school registration forms, and exports
//! registrations as CSV.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
