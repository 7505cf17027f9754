use std::collections::HashMap;
use std::str::FromStr;

use crate::constants::*;
use crate::error::{ImportError, ImportResult};
use crate::import_error;

/// Fields of an assignment row that can be read from the user list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Email,
    Team,
    Group,
    FirstName,
    LastName,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Email,
        Field::Team,
        Field::Group,
        Field::FirstName,
        Field::LastName,
    ];
}

impl FromStr for Field {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" | "e-mail" | "mail" => Ok(Field::Email),
            "team" => Ok(Field::Team),
            "group" | "teamgroup" => Ok(Field::Group),
            "firstname" | "first" => Ok(Field::FirstName),
            "lastname" | "last" => Ok(Field::LastName),
            other => Err(import_error!(
                InvalidInput,
                "Unknown column field '{}'. Expected one of: email, team, group, firstname, lastname",
                other
            )),
        }
    }
}

/// Maps worksheet header titles to row fields. Header matching ignores case
/// and surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    headers: HashMap<Field, Vec<String>>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        let mut headers = HashMap::new();
        headers.insert(Field::LastName, titles(DEFAULT_LASTNAME_HEADER, LASTNAME_ALIASES));
        headers.insert(Field::FirstName, titles(DEFAULT_FIRSTNAME_HEADER, FIRSTNAME_ALIASES));
        headers.insert(Field::Email, titles(DEFAULT_EMAIL_HEADER, EMAIL_ALIASES));
        headers.insert(Field::Team, titles(DEFAULT_TEAM_HEADER, TEAM_ALIASES));
        headers.insert(Field::Group, titles(DEFAULT_GROUP_HEADER, GROUP_ALIASES));
        ColumnMap { headers }
    }
}

fn titles(primary: &str, aliases: &[&str]) -> Vec<String> {
    std::iter::once(primary)
        .chain(aliases.iter().copied())
        .map(str::to_string)
        .collect()
}

impl ColumnMap {
    /// Parse `field=Header` pairs separated by commas and apply them on top of the defaults.
    pub fn with_overrides(overrides: &str) -> ImportResult<Self> {
        let mut map = Self::default();

        for pair in overrides.split(',') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }

            let (field, header) = pair.split_once('=').ok_or_else(|| {
                ImportError::InvalidInput(format!(
                    "Invalid column mapping '{}'. Use field=Header, e.g. email=Mail",
                    pair
                ))
            })?;

            let header = header.trim();
            if header.is_empty() {
                return Err(import_error!(
                    InvalidInput,
                    "Column mapping for '{}' has an empty header",
                    field.trim()
                ));
            }

            map.set_header(field.parse()?, header);
        }

        Ok(map)
    }

    /// Replace all accepted titles of `field` with a single header. The header
    /// is no longer accepted for any other field.
    pub fn set_header(&mut self, field: Field, header: &str) {
        let header = header.trim().to_string();
        let lowered = header.to_lowercase();
        for titles in self.headers.values_mut() {
            titles.retain(|title| title.to_lowercase() != lowered);
        }
        self.headers.insert(field, vec![header]);
    }

    pub fn field_for_header(&self, header: &str) -> Option<Field> {
        let wanted = header.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        Field::ALL.into_iter().find(|field| {
            self.headers
                .get(field)
                .map(|titles| titles.iter().any(|t| t.to_lowercase() == wanted))
                .unwrap_or(false)
        })
    }

    pub fn primary_header(&self, field: Field) -> &str {
        self.headers
            .get(&field)
            .and_then(|titles| titles.first())
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers_are_german() {
        let map = ColumnMap::default();
        assert_eq!(map.field_for_header("E-Mail"), Some(Field::Email));
        assert_eq!(map.field_for_header("Gruppe"), Some(Field::Group));
        assert_eq!(map.field_for_header("Vorname"), Some(Field::FirstName));
        assert_eq!(map.field_for_header("Nachname"), Some(Field::LastName));
        assert_eq!(map.field_for_header("Team"), Some(Field::Team));
    }

    #[test]
    fn test_header_matching_ignores_case_and_padding() {
        let map = ColumnMap::default();
        assert_eq!(map.field_for_header("  e-mail "), Some(Field::Email));
        assert_eq!(map.field_for_header("GROUP"), Some(Field::Group));
        assert_eq!(map.field_for_header("Comment"), None);
        assert_eq!(map.field_for_header(""), None);
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let map = ColumnMap::with_overrides("email=Mailadresse, group=Arbeitsgruppe").unwrap();
        assert_eq!(map.field_for_header("Mailadresse"), Some(Field::Email));
        assert_eq!(map.field_for_header("E-Mail"), None);
        assert_eq!(map.field_for_header("Arbeitsgruppe"), Some(Field::Group));
        assert_eq!(map.field_for_header("Team"), Some(Field::Team));
        assert_eq!(map.primary_header(Field::Email), "Mailadresse");
    }

    #[test]
    fn test_override_takes_header_from_other_field() {
        let map = ColumnMap::with_overrides("email=Team").unwrap();
        assert_eq!(map.field_for_header("Team"), Some(Field::Email));
        assert_eq!(map.primary_header(Field::Team), "");

        let map = ColumnMap::with_overrides("team=Gruppe").unwrap();
        assert_eq!(map.field_for_header("gruppe"), Some(Field::Team));
        assert_eq!(map.field_for_header("Group"), Some(Field::Group));
        assert_eq!(map.primary_header(Field::Group), "Group");
    }

    #[test]
    fn test_overrides_reject_malformed_pairs() {
        assert!(matches!(
            ColumnMap::with_overrides("email"),
            Err(ImportError::InvalidInput(_))
        ));
        assert!(matches!(
            ColumnMap::with_overrides("phone=Telefon"),
            Err(ImportError::InvalidInput(_))
        ));
        assert!(matches!(
            ColumnMap::with_overrides("team="),
            Err(ImportError::InvalidInput(_))
        ));
    }
}
