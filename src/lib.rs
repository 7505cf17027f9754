// Module declarations
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod directory;
pub mod error;
pub mod formatting;
pub mod importer;
pub mod logging;
pub mod models;
pub mod spreadsheet;


// Re-export commonly used items
pub use client::ElabClient;
pub use config::Config;
pub use directory::Directory;
pub use error::{ImportError, ImportResult};
pub use importer::{ImportOptions, ImportSummary, Importer};
pub use models::*;
