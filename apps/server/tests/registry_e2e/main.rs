//! Registry E2E test suite.
//!
//! Drives the dashboard and registration APIs through an in-process actix app
//! with an in-memory registry and no simulated latency.
//!
//! Run with: cargo test --test registry_e2e

mod test_helpers;

mod test_dashboard;
mod test_export;
mod test_registration;
