pub const DEFAULT_USERLIST_FILE: &str = "userlist.xlsx";

pub const ENV_API_HOST_URL: &str = "ELAB_API_HOST_URL";
pub const ENV_API_KEY: &str = "ELAB_API_KEY";
pub const ENV_VERIFY_SSL: &str = "ELAB_VERIFY_SSL";

pub const LOG_DIR_NAME: &str = "elab-batch-import";

// Cell values treated as an empty cell
pub const NA_VALUES: &[&str] = &["NA"];

// Default header titles of the user list, as shipped with the example workbook
pub const DEFAULT_LASTNAME_HEADER: &str = "Nachname";
pub const DEFAULT_FIRSTNAME_HEADER: &str = "Vorname";
pub const DEFAULT_EMAIL_HEADER: &str = "E-Mail";
pub const DEFAULT_TEAM_HEADER: &str = "Team";
pub const DEFAULT_GROUP_HEADER: &str = "Gruppe";

pub const LASTNAME_ALIASES: &[&str] = &["Last name", "Lastname", "Surname"];
pub const FIRSTNAME_ALIASES: &[&str] = &["First name", "Firstname"];
pub const EMAIL_ALIASES: &[&str] = &["Email", "Mail"];
pub const TEAM_ALIASES: &[&str] = &[];
pub const GROUP_ALIASES: &[&str] = &["Group", "Teamgroup", "Team group"];
