//! Request and response bodies shared by the HTTP API and the remote
//! provider. Entity records travel as their model types.

use serde::{Deserialize, Serialize};

/// Body of `POST /v1/admin/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Body of `GET /v1/admin/session` and of a successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub authed: bool,
}

/// JSON error body: a machine-readable `error` code and a readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}
