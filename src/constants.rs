/// Durable storage key for the session token.
pub const TOKEN_KEY: &str = "token";

/// Durable storage key for the session email.
pub const EMAIL_KEY: &str = "email";

/// Path of the login screen.
pub const LOGIN_PATH: &str = "/login";

/// Path of the default authenticated screen.
pub const HOME_PATH: &str = "/";

/// Path the root route forwards to.
pub const FACESWAP_PATH: &str = "/faceswap";

/// Fixed API root all endpoints hang under.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default timeout for multipart uploads in seconds. Large media files can
/// take minutes to transfer.
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 300;

/// Default location of the durable session file.
pub const DEFAULT_SESSION_FILE: &str = ".faceswap_session.json";
