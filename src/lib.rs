//! Client library for the face-swap platform API.
//!
//! Three cooperating pieces: a [`session::SessionStore`] persisted to a
//! local file, an [`transport::ApiHttpClient`] that attaches the bearer
//! credential to every request and forces a logout on 401, and a
//! [`router::Router`] whose guard keeps unauthenticated users on the
//! login screen. [`context::AppContext`] wires them together.

pub mod application;

pub mod config;

pub mod constants;

pub mod context;

pub mod error;

pub mod router;

pub mod session;

pub mod transport;

pub mod utils;
