pub mod assignment;
pub mod team;
pub mod user;

// Re-export commonly used types
pub use assignment::AssignmentRow;
pub use team::{GroupMember, Team, TeamGroup};
pub use user::User;
