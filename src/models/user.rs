use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize, Clone)]
pub struct User {
    pub userid: i64,
    pub email: String,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    // Depending on the server version this is an array of objects or a JSON encoded string
    #[serde(default)]
    pub teams: Option<Value>,
}

impl User {
    pub fn display_name(&self) -> String {
        match (&self.firstname, &self.lastname) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.email.clone(),
        }
    }

    /// Ids of the teams the user belongs to, as far as the server reports them.
    pub fn team_ids(&self) -> Vec<i64> {
        let teams = match &self.teams {
            Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
                Ok(parsed) => parsed,
                Err(_) => return Vec::new(),
            },
            Some(other) => other.clone(),
            None => return Vec::new(),
        };

        teams
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| entry.get("id").and_then(Value::as_i64))
                    .collect()
            })
            .unwrap_or_default()
    }
}
