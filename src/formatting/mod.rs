pub mod report;

pub use report::{print_banner, print_row_outcome, print_summary};
