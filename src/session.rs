//! Login session
//!
//! The active user is an explicit `Session` value handed to the record
//! store. It is established at login, persisted to `session.json`, and
//! cleared at logout. When a backend token is supplied, the user id is read
//! from the token's `id` claim.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{GastosError, GastosResult};
use crate::models::UserId;
use crate::storage::file_io::{read_json, write_json_atomic};

/// Backend bearer token; wiped from memory when dropped
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken(***)")
    }
}

/// An authenticated user context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<SessionToken>,

    pub established_at: DateTime<Utc>,
}

impl Session {
    /// Establish a session for a known user id
    pub fn establish(user_id: UserId) -> Self {
        Self {
            user_id,
            token: None,
            established_at: Utc::now(),
        }
    }

    /// Establish a session from a backend token, taking the user id from its payload
    pub fn from_token(token: &str) -> GastosResult<Self> {
        let user_id = user_id_from_token(token)?;
        Ok(Self {
            user_id,
            token: Some(SessionToken::new(token.trim())),
            established_at: Utc::now(),
        })
    }
}

/// Read the `id` claim from the payload segment of a JWT
///
/// The signature is not checked; the backend does that on every request.
pub fn user_id_from_token(token: &str) -> GastosResult<UserId> {
    let payload = token
        .trim()
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| GastosError::Session("Token has no payload segment".into()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| GastosError::Session(format!("Token payload is not base64url: {}", e)))?;

    let claims: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| GastosError::Session(format!("Token payload is not JSON: {}", e)))?;

    let id = match claims.get("id") {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| GastosError::Session("Token payload has no numeric id claim".into()))?;

    Ok(UserId::new(id))
}

/// Persists the active session between invocations
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The stored session, if someone is logged in
    pub fn load(&self) -> GastosResult<Option<Session>> {
        read_json(&self.path)
    }

    /// The stored session, or an error telling the user to log in
    pub fn require(&self) -> GastosResult<Session> {
        self.load()?.ok_or_else(|| {
            GastosError::Session("Not logged in. Run 'gastos login <user-id>' first".into())
        })
    }

    pub fn save(&self, session: &Session) -> GastosResult<()> {
        write_json_atomic(&self.path, session)
    }

    /// Remove the stored session; returns whether one existed
    pub fn clear(&self) -> GastosResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)
            .map_err(|e| GastosError::Io(format!("Failed to remove session file: {}", e)))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn token_with_payload(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_user_id_from_token() {
        let token = token_with_payload(r#"{"id":42,"usuario":"ana"}"#);
        assert_eq!(user_id_from_token(&token).unwrap(), UserId::new(42));

        let token = token_with_payload(r#"{"id":"7"}"#);
        assert_eq!(user_id_from_token(&token).unwrap(), UserId::new(7));
    }

    #[test]
    fn test_bad_tokens_are_session_errors() {
        assert!(matches!(
            user_id_from_token("not-a-jwt"),
            Err(GastosError::Session(_))
        ));
        assert!(user_id_from_token("a.!!!.c").is_err());
        assert!(user_id_from_token(&token_with_payload(r#"{"sub":"x"}"#)).is_err());
    }

    #[test]
    fn test_session_from_token_keeps_token() {
        let token = token_with_payload(r#"{"id":3}"#);
        let session = Session::from_token(&token).unwrap();
        assert_eq!(session.user_id, UserId::new(3));
        assert_eq!(session.token.as_ref().unwrap().as_str(), token);
        assert_eq!(
            format!("{:?}", session.token.unwrap()),
            "SessionToken(***)"
        );
    }

    #[test]
    fn test_store_lifecycle() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::new(temp_dir.path().join("session.json"));

        assert!(store.load().unwrap().is_none());
        assert!(store.require().is_err());

        let session = Session::establish(UserId::new(9));
        store.save(&session).unwrap();
        assert_eq!(store.require().unwrap(), session);

        assert!(store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
        assert!(!store.clear().unwrap());
    }
}
