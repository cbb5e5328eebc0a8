//! Business logic services.

pub mod commands;
pub mod csv_export;
pub mod registry;
pub mod seed;
pub mod session;
pub mod store;
pub mod view_mode;

pub use commands::{Command, CommandOutcome, Session};
pub use csv_export::CsvExporter;
pub use registry::Registry;
pub use session::{CsvDocument, DashboardGrant, DashboardSession, SchoolFormSession, Sessions};
pub use store::RegistryStore;
