use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::{
    application::models::auth::{
        LoginRequest, LoginResponse, MessageResponse, SendCodeRequest, TokenResponse,
        VerifyCodeRequest,
    },
    error::ApiError,
    session::SessionStore,
    transport::ApiHttpClient,
};

/// Authentication endpoints. Successful logins record the returned token
/// in the session store; everything else is a thin request builder.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Username/password login.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// Requests a one-time verification code for `email`.
    async fn send_code(&self, email: &str) -> Result<MessageResponse, ApiError>;

    /// Exchanges an email/code pair for a session token.
    async fn verify(&self, email: &str, code: &str) -> Result<TokenResponse, ApiError>;
}

pub struct AuthServiceImpl {
    client: Arc<ApiHttpClient>,
    session: Arc<SessionStore>,
}

impl AuthServiceImpl {
    pub fn new(client: Arc<ApiHttpClient>, session: Arc<SessionStore>) -> Self {
        Self { client, session }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        info!("Logging in user: {}", username);
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self.client.post("/auth/login", &request).await?;

        self.session.set_auth(&response.token, username);
        debug!("Login successful for {}", username);
        Ok(response)
    }

    async fn send_code(&self, email: &str) -> Result<MessageResponse, ApiError> {
        info!("Requesting verification code for {}", email);
        let request = SendCodeRequest {
            email: email.to_string(),
        };

        self.client.post("/auth/send-code", &request).await
    }

    async fn verify(&self, email: &str, code: &str) -> Result<TokenResponse, ApiError> {
        info!("Verifying code for {}", email);
        let request = VerifyCodeRequest {
            email: email.to_string(),
            code: code.to_string(),
        };

        let response: TokenResponse = self.client.post("/auth/verify", &request).await?;

        self.session.set_auth(&response.token, email);
        debug!("Verification successful for {}", email);
        Ok(response)
    }
}
