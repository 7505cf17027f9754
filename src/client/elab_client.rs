use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::{ErrorContext, ImportError, ImportResult};
use crate::logging::{log_debug, log_warn};
use crate::models::*;

/// Thin async client for the parts of the eLabFTW v2 API the importer needs.
pub struct ElabClient {
    client: reqwest::Client,
    base_url: String,
}

impl ElabClient {
    pub fn new(config: &Config) -> ImportResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        // eLabFTW expects the bare key, without a "Bearer" prefix
        let mut auth = HeaderValue::from_str(&config.api_key).map_err(|_| {
            ImportError::InvalidConfig("API key contains characters not allowed in a header".to_string())
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        if !config.verify_ssl {
            log_warn("TLS certificate verification is disabled");
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_host_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> ImportResult<Response> {
        let url = self.url(path);
        log_debug(&format!("{} {}", method, url));

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ImportError::Api {
                status: status.as_u16(),
                message: extract_error_message(&error_text)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("no reason").to_string()),
            });
        }

        Ok(response)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ImportResult<T> {
        let response = self.send(Method::GET, path, None).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).with_context(|| format!("Unexpected response from {}", self.url(path)))
    }

    async fn patch(&self, path: &str, body: Value) -> ImportResult<()> {
        self.send(Method::PATCH, path, Some(body)).await?;
        Ok(())
    }

    pub async fn get_users(&self) -> ImportResult<Vec<User>> {
        self.get("users").await
    }

    pub async fn get_teams(&self) -> ImportResult<Vec<Team>> {
        self.get("teams").await
    }

    pub async fn get_team_groups(&self, team_id: i64) -> ImportResult<Vec<TeamGroup>> {
        self.get(&format!("teams/{}/teamgroups", team_id)).await
    }

    pub async fn add_user_to_team(&self, user_id: i64, team_id: i64) -> ImportResult<()> {
        self.patch(
            &format!("users/{}", user_id),
            json!({ "action": "add", "team": team_id }),
        )
        .await
    }

    pub async fn add_user_to_team_group(
        &self,
        team_id: i64,
        group_id: i64,
        user_id: i64,
    ) -> ImportResult<()> {
        self.patch(
            &format!("teams/{}/teamgroups/{}", team_id, group_id),
            json!({ "how": "add", "userid": user_id }),
        )
        .await
    }
}

// eLabFTW error bodies look like {"code": 400, "message": "...", "description": "..."}
fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = value.get("message").and_then(Value::as_str)?;
    match value.get("description").and_then(Value::as_str) {
        Some(description) if !description.is_empty() => {
            Some(format!("{} ({})", message, description))
        }
        _ => Some(message.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message_with_description() {
        let body = r#"{"code":400,"message":"Bad Request","description":"User is already in team"}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Bad Request (User is already in team)")
        );
    }

    #[test]
    fn test_extract_error_message_plain_text() {
        assert_eq!(extract_error_message("<html>gateway timeout</html>"), None);
    }

    #[test]
    fn test_url_joins_paths() {
        let config = Config {
            api_host_url: "https://elab.example.org/api/v2/".to_string(),
            api_key: "secret".to_string(),
            verify_ssl: true,
        };
        let client = ElabClient::new(&config).unwrap();
        assert_eq!(client.url("users"), "https://elab.example.org/api/v2/users");
        assert_eq!(client.url("/teams/3/teamgroups"), "https://elab.example.org/api/v2/teams/3/teamgroups");
    }

    #[test]
    fn test_rejects_key_with_newline() {
        let config = Config {
            api_host_url: "https://elab.example.org/api/v2".to_string(),
            api_key: "bad\nkey".to_string(),
            verify_ssl: true,
        };
        assert!(matches!(ElabClient::new(&config), Err(ImportError::InvalidConfig(_))));
    }
}
