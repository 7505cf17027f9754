pub mod import;

pub use import::{handle_import, run_import, ImportRequest};
