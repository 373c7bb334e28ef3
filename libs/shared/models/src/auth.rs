use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub exp: Option<u64>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub iat: Option<u64>,
}

/// Caller identity derived from a verified credential. Write operations
/// trust `email` from here, never a caller-supplied body field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
