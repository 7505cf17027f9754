pub mod columns;
pub mod reader;

pub use columns::{ColumnMap, Field};
pub use reader::{read_assignments, rows_to_assignments, ReadOptions};
