//! Authenticated CRUD proxy to the Telemost conferencing API.

use std::env;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde_json::{Value, json};

use super::error::TelemostError;
use super::models::{
    Cohost, LiveStream, MAX_COHOSTS, MAX_STREAM_DESCRIPTION_CHARS, MAX_STREAM_TITLE_CHARS,
    clamp_chars, validate_cohosts, validate_email, validate_waiting_room_level,
};

const BASE_URL: &str = "https://cloud-api.yandex.net/v1/telemost-api";

/// Fixed per-request timeout. Not caller-configurable, a timeout
/// surfaces as a network `Api` error.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct TelemostClient {
    http: Client,
    base_url: String,
    token: String,
}

impl TelemostClient {
    /// Create a client with the given OAuth token, falling back to the
    /// `YANDEX_OAUTH_TOKEN` environment variable. A missing token is
    /// the only constructor failure mode.
    pub fn new(oauth_token: Option<String>) -> Result<Self, TelemostError> {
        let token = oauth_token
            .or_else(|| env::var("YANDEX_OAUTH_TOKEN").ok())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                TelemostError::Auth("YANDEX_OAUTH_TOKEN is not set".to_string())
            })?;

        tracing::info!("Telemost client initialized");

        Ok(Self {
            http: Client::new(),
            base_url: BASE_URL.to_string(),
            token,
        })
    }

    /// Point the client at a different API host. Used by tests to talk
    /// to a local mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Issue one HTTP call and translate the response.
    ///
    /// 401 maps to `Auth`, any other >=400 status maps to `Api` with
    /// the provider's `message` field when the body is JSON, and a
    /// successful response with an empty body becomes a
    /// `{"status": "success", "status_code": N}` marker.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        query: Option<&[(&str, String)]>,
    ) -> Result<Value, TelemostError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, &url)
            .header("Authorization", format!("OAuth {}", self.token))
            .timeout(REQUEST_TIMEOUT);
        if let Some(body) = body {
            request = request.json(&body);
        }
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TelemostError::Api(format!("network error: {e}")))?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(TelemostError::Auth(
                "unauthorized request, check the OAuth token".to_string(),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TelemostError::Api(format!("network error: {e}")))?;

        if status.as_u16() >= 400 {
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
                .unwrap_or_else(|| "request failed".to_string());
            return Err(TelemostError::Api(format!(
                "API error {}: {}",
                status.as_u16(),
                message
            )));
        }

        if bytes.is_empty() {
            return Ok(json!({"status": "success", "status_code": status.as_u16()}));
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| TelemostError::Api(format!("invalid JSON in response: {e}")))
    }

    /// Create a meeting. Inputs are validated before any network call;
    /// absent optionals are omitted from the request body entirely.
    pub async fn create_meeting(
        &self,
        waiting_room_level: &str,
        live_stream: Option<&LiveStream>,
        cohosts: Option<&[Cohost]>,
    ) -> Result<Value, TelemostError> {
        validate_waiting_room_level(waiting_room_level)?;
        if let Some(cohosts) = cohosts {
            validate_cohosts(cohosts)?;
        }
        if let Some(stream) = live_stream {
            stream.validate()?;
        }

        let mut body = json!({"waiting_room_level": waiting_room_level});
        if let Some(stream) = live_stream {
            body["live_stream"] = json!(stream);
        }
        if let Some(cohosts) = cohosts {
            body["cohosts"] = json!(cohosts);
        }

        tracing::info!("Creating meeting with level {}", waiting_room_level);
        let result = self
            .request(Method::POST, "conferences", Some(body), None)
            .await?;

        if let Some(id) = result.get("id").and_then(Value::as_str) {
            tracing::info!("Meeting created: {}", id);
        }
        Ok(result)
    }

    pub async fn get_meeting(&self, meeting_id: &str) -> Result<Value, TelemostError> {
        require_id(meeting_id, "meeting")?;
        tracing::info!("Fetching meeting: {}", meeting_id);
        self.request(Method::GET, &format!("conferences/{meeting_id}"), None, None)
            .await
    }

    /// Partial update. At least one of the optionals must be supplied.
    pub async fn update_meeting(
        &self,
        meeting_id: &str,
        waiting_room_level: Option<&str>,
        live_stream: Option<&LiveStream>,
    ) -> Result<Value, TelemostError> {
        require_id(meeting_id, "meeting")?;

        let mut body = serde_json::Map::new();
        if let Some(level) = waiting_room_level {
            validate_waiting_room_level(level)?;
            body.insert("waiting_room_level".to_string(), json!(level));
        }
        if let Some(stream) = live_stream {
            body.insert("live_stream".to_string(), json!(stream));
        }
        if body.is_empty() {
            return Err(TelemostError::Validation("nothing to update".to_string()));
        }

        tracing::info!("Updating meeting: {}", meeting_id);
        self.request(
            Method::PATCH,
            &format!("conferences/{meeting_id}"),
            Some(Value::Object(body)),
            None,
        )
        .await
    }

    pub async fn delete_meeting(&self, meeting_id: &str) -> Result<Value, TelemostError> {
        require_id(meeting_id, "meeting")?;
        tracing::info!("Deleting meeting: {}", meeting_id);
        self.request(
            Method::DELETE,
            &format!("conferences/{meeting_id}"),
            None,
            None,
        )
        .await
    }

    pub async fn list_meetings(&self, limit: u32, offset: u32) -> Result<Value, TelemostError> {
        if limit > 100 {
            return Err(TelemostError::Validation(
                "limit must be 100 or less".to_string(),
            ));
        }
        let query = [("limit", limit.to_string()), ("offset", offset.to_string())];
        tracing::info!("Listing meetings (limit {}, offset {})", limit, offset);
        self.request(Method::GET, "conferences", None, Some(&query))
            .await
    }

    pub async fn get_cohosts(&self, meeting_id: &str) -> Result<Value, TelemostError> {
        require_id(meeting_id, "meeting")?;
        self.request(
            Method::GET,
            &format!("conferences/{meeting_id}/cohosts"),
            None,
            None,
        )
        .await
    }

    /// Replace the full co-host list. Same cap and email validation as
    /// `create_meeting`.
    pub async fn replace_cohosts(
        &self,
        meeting_id: &str,
        cohosts: &[Cohost],
    ) -> Result<Value, TelemostError> {
        require_id(meeting_id, "meeting")?;
        validate_cohosts(cohosts)?;
        tracing::info!("Replacing cohosts for meeting: {}", meeting_id);
        self.request(
            Method::PUT,
            &format!("conferences/{meeting_id}/cohosts"),
            Some(json!({"cohosts": cohosts})),
            None,
        )
        .await
    }

    pub async fn add_cohost(&self, meeting_id: &str, email: &str) -> Result<Value, TelemostError> {
        require_id(meeting_id, "meeting")?;
        if !validate_email(email) {
            return Err(TelemostError::Validation(format!("invalid email: {email}")));
        }
        tracing::info!("Adding cohost {} to meeting: {}", email, meeting_id);
        self.request(
            Method::POST,
            &format!("conferences/{meeting_id}/cohosts"),
            Some(json!({"email": email})),
            None,
        )
        .await
    }

    pub async fn remove_cohost(
        &self,
        meeting_id: &str,
        cohost_id: &str,
    ) -> Result<Value, TelemostError> {
        require_id(meeting_id, "meeting")?;
        require_id(cohost_id, "cohost")?;
        tracing::info!("Removing cohost {} from meeting: {}", cohost_id, meeting_id);
        self.request(
            Method::DELETE,
            &format!("conferences/{meeting_id}/cohosts/{cohost_id}"),
            None,
            None,
        )
        .await
    }

    pub async fn get_default_settings(&self) -> Result<Value, TelemostError> {
        self.request(Method::GET, "default-settings", None, None)
            .await
    }

    pub async fn update_default_settings(
        &self,
        settings: &Value,
    ) -> Result<Value, TelemostError> {
        let empty = match settings {
            Value::Object(map) => map.is_empty(),
            Value::Null => true,
            _ => false,
        };
        if empty {
            return Err(TelemostError::Validation(
                "settings must not be empty".to_string(),
            ));
        }
        tracing::info!("Updating default settings");
        self.request(Method::PATCH, "default-settings", Some(settings.clone()), None)
            .await
    }

    // Convenience shortcuts. Unlike `create_meeting`, which rejects
    // over-length or over-long inputs, these clamp: stream fields are
    // truncated to the provider limits and the cohost list is capped at
    // the first 30 entries. Callers rely on this asymmetry.

    /// Create a public meeting with no stream or co-hosts.
    pub async fn create_simple_meeting(&self) -> Result<Value, TelemostError> {
        self.create_meeting("PUBLIC", None, None).await
    }

    /// Create a meeting with a live stream, clamping the title and
    /// description to the provider limits.
    pub async fn create_meeting_with_stream(
        &self,
        stream_title: &str,
        stream_description: &str,
        stream_access_level: &str,
        waiting_room_level: &str,
    ) -> Result<Value, TelemostError> {
        let stream = LiveStream {
            title: Some(clamp_chars(stream_title, MAX_STREAM_TITLE_CHARS)),
            description: Some(clamp_chars(
                stream_description,
                MAX_STREAM_DESCRIPTION_CHARS,
            )),
            access_level: Some(stream_access_level.to_string()),
        };
        self.create_meeting(waiting_room_level, Some(&stream), None)
            .await
    }

    /// Create a meeting with co-hosts, keeping only the first 30.
    pub async fn create_meeting_with_cohosts(
        &self,
        cohost_emails: &[String],
        waiting_room_level: &str,
    ) -> Result<Value, TelemostError> {
        let cohosts: Vec<Cohost> = cohost_emails
            .iter()
            .take(MAX_COHOSTS)
            .map(|email| Cohost::new(email))
            .collect();
        self.create_meeting(waiting_room_level, None, Some(&cohosts))
            .await
    }

    /// Create a meeting combining a stream and co-hosts, with the same
    /// clamping behavior as the other shortcuts.
    pub async fn create_advanced_meeting(
        &self,
        waiting_room_level: &str,
        stream_title: Option<&str>,
        stream_description: &str,
        stream_access_level: &str,
        cohost_emails: Option<&[String]>,
    ) -> Result<Value, TelemostError> {
        let live_stream = stream_title.map(|title| LiveStream {
            title: Some(clamp_chars(title, MAX_STREAM_TITLE_CHARS)),
            description: Some(clamp_chars(
                stream_description,
                MAX_STREAM_DESCRIPTION_CHARS,
            )),
            access_level: Some(stream_access_level.to_string()),
        });
        let cohosts: Option<Vec<Cohost>> = cohost_emails.map(|emails| {
            emails
                .iter()
                .take(MAX_COHOSTS)
                .map(|email| Cohost::new(email))
                .collect()
        });
        self.create_meeting(
            waiting_room_level,
            live_stream.as_ref(),
            cohosts.as_deref(),
        )
        .await
    }
}

fn require_id(id: &str, what: &str) -> Result<(), TelemostError> {
    if id.is_empty() {
        return Err(TelemostError::Validation(format!("{what} id is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;

    fn client(base_url: &str) -> TelemostClient {
        TelemostClient::new(Some("test-token".to_string()))
            .expect("Failed to construct client")
            .with_base_url(base_url)
    }

    #[test]
    fn test_missing_token_is_auth_error() {
        // Explicit empty token, no env fallback should apply
        let result = TelemostClient::new(Some(String::new()));
        match result {
            Err(TelemostError::Auth(_)) => {}
            _ => panic!("expected an auth error"),
        }
    }

    #[tokio::test]
    async fn it_rejects_invalid_waiting_room_level_before_any_call() {
        // No mock server: validation must fail before the network
        let client = client("http://127.0.0.1:1");
        let result = client.create_meeting("EVERYONE", None, None).await;
        assert!(matches!(result, Err(TelemostError::Validation(_))));
    }

    #[tokio::test]
    async fn it_rejects_more_than_30_cohosts_before_any_call() {
        let client = client("http://127.0.0.1:1");
        let cohosts: Vec<Cohost> = (0..31)
            .map(|i| Cohost::new(&format!("user{i}@example.com")))
            .collect();
        let result = client.create_meeting("PUBLIC", None, Some(&cohosts)).await;
        assert!(matches!(result, Err(TelemostError::Validation(_))));

        let result = client.replace_cohosts("abc123", &cohosts).await;
        assert!(matches!(result, Err(TelemostError::Validation(_))));
    }

    #[tokio::test]
    async fn it_accepts_exactly_30_cohosts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/conferences")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "abc123", "join_url": "https://telemost.yandex.ru/j/1"}"#)
            .create_async()
            .await;

        let cohosts: Vec<Cohost> = (0..30)
            .map(|i| Cohost::new(&format!("user{i}@example.com")))
            .collect();
        let result = client(&server.url())
            .create_meeting("PUBLIC", None, Some(&cohosts))
            .await;
        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_rejects_invalid_cohost_emails() {
        let client = client("http://127.0.0.1:1");
        let cohosts = vec![Cohost::new("not-an-email")];
        let result = client.create_meeting("PUBLIC", None, Some(&cohosts)).await;
        assert!(matches!(result, Err(TelemostError::Validation(_))));

        let result = client.add_cohost("abc123", "still-not-an-email").await;
        assert!(matches!(result, Err(TelemostError::Validation(_))));
    }

    #[tokio::test]
    async fn it_rejects_overlong_stream_fields() {
        let client = client("http://127.0.0.1:1");
        let stream = LiveStream {
            title: Some("a".repeat(1025)),
            description: None,
            access_level: None,
        };
        let result = client.create_meeting("PUBLIC", Some(&stream), None).await;
        assert!(matches!(result, Err(TelemostError::Validation(_))));
    }

    #[tokio::test]
    async fn it_omits_absent_optionals_from_the_create_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/conferences")
            .match_body(Matcher::Json(json!({"waiting_room_level": "PUBLIC"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "abc123"}"#)
            .create_async()
            .await;

        let result = client(&server.url()).create_meeting("PUBLIC", None, None).await;
        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_clamps_stream_title_in_the_shortcut() {
        let mut server = mockito::Server::new_async().await;
        // Direct create_meeting rejects a 1030-char title, the shortcut
        // sends exactly 1024 characters instead.
        let mock = server
            .mock("POST", "/conferences")
            .match_body(Matcher::Json(json!({
                "waiting_room_level": "PUBLIC",
                "live_stream": {
                    "title": "a".repeat(1024),
                    "description": "",
                    "access_level": "PUBLIC"
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "abc123"}"#)
            .create_async()
            .await;

        let result = client(&server.url())
            .create_meeting_with_stream(&"a".repeat(1030), "", "PUBLIC", "PUBLIC")
            .await;
        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_caps_cohosts_in_the_shortcut() {
        let mut server = mockito::Server::new_async().await;
        let expected: Vec<Value> = (0..30)
            .map(|i| json!({"email": format!("user{i}@example.com")}))
            .collect();
        let mock = server
            .mock("POST", "/conferences")
            .match_body(Matcher::Json(json!({
                "waiting_room_level": "PUBLIC",
                "cohosts": expected
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "abc123"}"#)
            .create_async()
            .await;

        let emails: Vec<String> = (0..40).map(|i| format!("user{i}@example.com")).collect();
        let result = client(&server.url())
            .create_meeting_with_cohosts(&emails, "PUBLIC")
            .await;
        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_requires_something_to_update() {
        let client = client("http://127.0.0.1:1");
        let result = client.update_meeting("abc123", None, None).await;
        assert!(matches!(result, Err(TelemostError::Validation(_))));

        let result = client.update_meeting("", Some("PUBLIC"), None).await;
        assert!(matches!(result, Err(TelemostError::Validation(_))));
    }

    #[tokio::test]
    async fn it_rejects_list_limits_over_100() {
        let client = client("http://127.0.0.1:1");
        let result = client.list_meetings(101, 0).await;
        assert!(matches!(result, Err(TelemostError::Validation(_))));
    }

    #[tokio::test]
    async fn it_sends_list_pagination_as_query_params() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/conferences")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("limit".into(), "25".into()),
                Matcher::UrlEncoded("offset".into(), "5".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"conferences": []}"#)
            .create_async()
            .await;

        let result = client(&server.url()).list_meetings(25, 5).await;
        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_maps_401_to_auth_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/conferences/abc123")
            .with_status(401)
            .create_async()
            .await;

        let result = client(&server.url()).get_meeting("abc123").await;
        assert!(matches!(result, Err(TelemostError::Auth(_))));
    }

    #[tokio::test]
    async fn it_maps_other_errors_to_api_error_with_provider_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/conferences/abc123")
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Access denied for this account"}"#)
            .create_async()
            .await;

        let result = client(&server.url()).get_meeting("abc123").await;
        match result {
            Err(TelemostError::Api(msg)) => {
                assert!(msg.contains("403"));
                assert!(msg.contains("Access denied for this account"));
            }
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn it_maps_empty_error_bodies_to_a_generic_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/conferences/abc123")
            .with_status(500)
            .create_async()
            .await;

        let result = client(&server.url()).get_meeting("abc123").await;
        match result {
            Err(TelemostError::Api(msg)) => assert!(msg.contains("500")),
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn it_turns_empty_success_bodies_into_a_marker() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/conferences/abc123")
            .with_status(204)
            .create_async()
            .await;

        let result = client(&server.url()).delete_meeting("abc123").await.unwrap();
        assert_eq!(result["status"], "success");
        assert_eq!(result["status_code"], 204);
    }

    #[tokio::test]
    async fn it_requires_ids_for_cohost_operations() {
        let client = client("http://127.0.0.1:1");
        assert!(matches!(
            client.get_cohosts("").await,
            Err(TelemostError::Validation(_))
        ));
        assert!(matches!(
            client.remove_cohost("abc123", "").await,
            Err(TelemostError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn it_rejects_empty_default_settings() {
        let client = client("http://127.0.0.1:1");
        let result = client.update_default_settings(&json!({})).await;
        assert!(matches!(result, Err(TelemostError::Validation(_))));
    }

    #[tokio::test]
    async fn it_round_trips_default_settings() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/default-settings")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"waiting_room_level": "PUBLIC"}"#)
            .create_async()
            .await;
        let patch = server
            .mock("PATCH", "/default-settings")
            .match_body(Matcher::Json(json!({"waiting_room_level": "ADMINS"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"waiting_room_level": "ADMINS"}"#)
            .create_async()
            .await;

        let client = client(&server.url());
        let settings = client.get_default_settings().await.unwrap();
        assert_eq!(settings["waiting_room_level"], "PUBLIC");

        let updated = client
            .update_default_settings(&json!({"waiting_room_level": "ADMINS"}))
            .await
            .unwrap();
        assert_eq!(updated["waiting_room_level"], "ADMINS");
        patch.assert_async().await;
    }

    #[tokio::test]
    async fn it_adds_a_single_cohost() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/conferences/abc123/cohosts")
            .match_body(Matcher::Json(json!({"email": "user@example.com"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "c1", "email": "user@example.com"}"#)
            .create_async()
            .await;

        let result = client(&server.url())
            .add_cohost("abc123", "user@example.com")
            .await;
        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_replaces_cohosts_with_a_put() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/conferences/abc123/cohosts")
            .match_body(Matcher::Json(
                json!({"cohosts": [{"email": "user@example.com"}]}),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"cohosts": [{"id": "c1", "email": "user@example.com"}]}"#)
            .create_async()
            .await;

        let result = client(&server.url())
            .replace_cohosts("abc123", &[Cohost::new("user@example.com")])
            .await;
        assert!(result.is_ok());
        mock.assert_async().await;
    }
}
