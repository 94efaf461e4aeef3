use crate::config::Config;
use crate::constants::LOGIN_PATH;
use crate::error::ApiError;
use crate::router::Navigator;
use crate::session::SessionStore;
use anyhow::{Context, Result};
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Single point of outbound HTTP communication. Two policies apply to
/// every request regardless of which endpoint helper issued it:
///
/// - before send, the current session token (if any) is attached as a
///   bearer credential;
/// - on a 401 response, the session is cleared and a navigation to the
///   login screen is forced, then the failure is returned to the caller.
pub struct ApiHttpClient {
    client: Client,
    base_url: String,
    upload_timeout: Duration,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiHttpClient {
    pub fn new(
        config: &Config,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api.base_url.clone(),
            upload_timeout: Duration::from_secs(config.api.upload_timeout),
            session,
            navigator,
        })
    }

    /// Timeout applied to multipart uploads unless the call overrides it.
    pub fn upload_timeout(&self) -> Duration {
        self.upload_timeout
    }

    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned + Debug>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Sending GET request to {}", url);

        let request = self.with_auth(self.client.get(&url));
        let response = request.send().await?;

        self.handle_response(response).await
    }

    #[instrument(skip(self, body))]
    pub async fn post<T: DeserializeOwned + Debug, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Sending POST request to {}", url);

        let request = self.with_auth(self.client.post(&url).json(body));
        let response = request.send().await?;

        self.handle_response(response).await
    }

    /// Multipart POST for file uploads. `timeout` overrides the upload
    /// default for this call only (large media can take minutes).
    #[instrument(skip(self, form, timeout))]
    pub async fn post_multipart<T: DeserializeOwned + Debug>(
        &self,
        endpoint: &str,
        form: Form,
        timeout: Option<Duration>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Sending multipart POST request to {}", url);

        let request = self
            .with_auth(self.client.post(&url).multipart(form))
            .timeout(timeout.unwrap_or(self.upload_timeout));
        let response = request.send().await?;

        self.handle_response(response).await
    }

    /// Request policy: attach the bearer credential iff a token exists at
    /// send time. No other header is touched.
    fn with_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Response policy: 2xx deserializes; 401 clears the session and
    /// forces navigation to the login screen before the failure is
    /// propagated; any other failure carries the backend status and body
    /// verbatim.
    async fn handle_response<T: DeserializeOwned + Debug>(
        &self,
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let body_text = response.text().await?;

        debug!("Response Status: {}", status);
        debug!("Response Body: {}", body_text);

        if status.is_success() {
            let body: T = serde_json::from_str(&body_text)?;
            return Ok(body);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            error!("Authorization failure, clearing session");
            self.session.logout();
            self.navigator.force_navigate(LOGIN_PATH);
            return Err(ApiError::Unauthorized { body: body_text });
        }

        error!("API request failed. Status: {}, Body: {}", status, body_text);
        Err(ApiError::Unexpected {
            status,
            body: body_text,
        })
    }
}

impl fmt::Display for ApiHttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"base_url\":\"{}\"}}", self.base_url)
    }
}

impl fmt::Debug for ApiHttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiHttpClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::router::Navigator;
    use std::sync::Mutex;

    /// Records forced navigations instead of performing them.
    #[derive(Debug, Default)]
    pub struct RecordingNavigator {
        pub visited: Mutex<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn force_navigate(&self, path: &str) {
            self.visited.lock().unwrap().push(path.to_string());
        }
    }
}

#[cfg(test)]
mod tests_api_http_client {
    use super::test_support::RecordingNavigator;
    use super::*;
    use crate::session::MemoryStorage;
    use crate::utils::logger::setup_logger;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use reqwest::multipart::Part;
    use serde_json::json;

    fn build_client(
        server: &Server,
        session: Arc<SessionStore>,
        navigator: Arc<RecordingNavigator>,
    ) -> ApiHttpClient {
        let mut config = Config::new();
        config.api.base_url = server.url();
        ApiHttpClient::new(&config, session, navigator).unwrap()
    }

    fn anonymous_session() -> Arc<SessionStore> {
        Arc::new(SessionStore::new(Box::new(MemoryStorage::new())))
    }

    #[tokio::test]
    async fn test_bearer_header_attached_when_token_present() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/test")
            .match_header("authorization", "Bearer tok_123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "ok"}"#)
            .create_async()
            .await;

        let session = anonymous_session();
        session.set_auth("tok_123", "user@example.com");
        let navigator = Arc::new(RecordingNavigator::default());
        let client = build_client(&server, session, navigator);

        let result: serde_json::Value = client.get("/test").await.unwrap();
        assert_eq!(result["message"], "ok");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_no_bearer_header_when_anonymous() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/test")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "ok"}"#)
            .create_async()
            .await;

        let navigator = Arc::new(RecordingNavigator::default());
        let client = build_client(&server, anonymous_session(), navigator);

        let result: serde_json::Value = client.get("/test").await.unwrap();
        assert_eq!(result["message"], "ok");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session_and_redirects() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/protected")
            .with_status(401)
            .with_body("token expired")
            .create_async()
            .await;

        let session = anonymous_session();
        session.set_auth("tok_stale", "user@example.com");
        let navigator = Arc::new(RecordingNavigator::default());
        let client = build_client(&server, session.clone(), navigator.clone());

        let result: Result<serde_json::Value, ApiError> = client.get("/protected").await;

        let err = result.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
        assert_eq!(session.email(), None);
        assert_eq!(*navigator.visited.lock().unwrap(), vec!["/login".to_string()]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized_on_post_also_redirects() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/anything")
            .with_status(401)
            .with_body("nope")
            .create_async()
            .await;

        let session = anonymous_session();
        session.set_auth("tok_stale", "user@example.com");
        let navigator = Arc::new(RecordingNavigator::default());
        let client = build_client(&server, session.clone(), navigator.clone());

        let result: Result<serde_json::Value, ApiError> =
            client.post("/anything", &json!({"k": "v"})).await;

        assert!(result.unwrap_err().is_unauthorized());
        assert!(!session.is_authenticated());
        assert_eq!(navigator.visited.lock().unwrap().len(), 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_other_failures_carry_status_and_body() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/boom")
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let session = anonymous_session();
        session.set_auth("tok_123", "user@example.com");
        let navigator = Arc::new(RecordingNavigator::default());
        let client = build_client(&server, session.clone(), navigator.clone());

        let result: Result<serde_json::Value, ApiError> = client.get("/boom").await;

        match result.unwrap_err() {
            ApiError::Unexpected { status, body } => {
                assert_eq!(status.as_u16(), 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("expected Unexpected, got {other:?}"),
        }
        // Non-401 failures must not touch the session.
        assert!(session.is_authenticated());
        assert!(navigator.visited.lock().unwrap().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/echo")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"email": "user@example.com"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "sent"}"#)
            .create_async()
            .await;

        let navigator = Arc::new(RecordingNavigator::default());
        let client = build_client(&server, anonymous_session(), navigator);

        let result: serde_json::Value = client
            .post("/echo", &json!({"email": "user@example.com"}))
            .await
            .unwrap();
        assert_eq!(result["message"], "sent");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_multipart_uploads_file() {
        setup_logger();
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/upload")
            .match_header(
                "content-type",
                Matcher::Regex("multipart/form-data.*".to_string()),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"url": "https://cdn.example.com/a.mp4", "key": "videos/a.mp4"}"#)
            .create_async()
            .await;

        let navigator = Arc::new(RecordingNavigator::default());
        let client = build_client(&server, anonymous_session(), navigator);

        let part = Part::bytes(vec![0u8; 16])
            .file_name("a.mp4")
            .mime_str("video/mp4")
            .unwrap();
        let form = Form::new().part("file", part);

        let result: serde_json::Value = client
            .post_multipart("/upload", form, Some(Duration::from_secs(120)))
            .await
            .unwrap();
        assert_eq!(result["key"], "videos/a.mp4");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_json_error() {
        setup_logger();
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("GET", "/weird")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let navigator = Arc::new(RecordingNavigator::default());
        let client = build_client(&server, anonymous_session(), navigator);

        let result: Result<serde_json::Value, ApiError> = client.get("/weird").await;
        assert!(matches!(result.unwrap_err(), ApiError::Json(_)));
    }
}
