//! Session identity read from the persisted bearer token.
//!
//! The token is decoded without signature verification. The role it carries
//! is a display hint for navigation and screen gating only; the API server
//! re-checks permissions on every request.

use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use leptos::prelude::*;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::TokenError;
use crate::guard::{self, Access};

const ADMIN_CLAIM: &str = "Админ";
const TRAINER_CLAIM: &str = "Тренер";
const USER_CLAIM: &str = "Пользователь";

/// Privilege tier named by the token's `role` claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Trainer,
    User,
    /// A role string the client does not know about.
    Other(String),
}

impl Role {
    pub fn from_claim(claim: &str) -> Self {
        match claim.trim() {
            ADMIN_CLAIM => Role::Admin,
            TRAINER_CLAIM => Role::Trainer,
            USER_CLAIM => Role::User,
            other => Role::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Role::Admin => "Admin",
            Role::Trainer => "Trainer",
            Role::User => "User",
            Role::Other(name) => name,
        }
    }

    /// Admins and trainers manage trainings and schedules.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Trainer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decoded token payload. Unknown claims are kept in `extra`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Claims {
    #[serde(default)]
    pub role: String,
    /// Numeric user id; some issuers encode it as a string.
    #[serde(rename = "Id", default)]
    pub id: Option<serde_json::Value>,
    #[serde(rename = "Login", default)]
    pub login: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Claims {
    pub fn role(&self) -> Role {
        Role::from_claim(&self.role)
    }

    pub fn user_id(&self) -> Option<i64> {
        match self.id.as_ref()? {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Decode the payload segment of a JWT.
///
/// Accepts both base64 alphabets, with or without padding.
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or(TokenError::MissingPayload)?;

    let normalized: String = payload
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = URL_SAFE_NO_PAD.decode(normalized)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Where the bearer token lives between page loads.
pub trait TokenStore: Send + Sync {
    fn read(&self) -> Option<String>;
    fn write(&self, token: &str);
    fn clear(&self);
}

/// Browser `localStorage` under a fixed key.
pub struct BrowserStorage {
    key: &'static str,
}

impl BrowserStorage {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl TokenStore for BrowserStorage {
    fn read(&self) -> Option<String> {
        Self::storage()?
            .get_item(self.key)
            .ok()?
            .filter(|t| !t.is_empty())
    }

    fn write(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(self.key, token).is_err() {
                warn!("Failed to persist session token");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(self.key);
        }
    }
}

/// In-memory store for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    token: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: std::sync::Mutex::new(Some(token.to_string())),
        }
    }
}

#[cfg(test)]
impl TokenStore for MemoryStore {
    fn read(&self) -> Option<String> {
        self.token.lock().ok()?.clone()
    }

    fn write(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

/// Read and decode the stored token. A token that does not decode is
/// removed from the store.
pub fn resolve_identity(store: &dyn TokenStore) -> Option<Claims> {
    let token = store.read()?;
    match decode_claims(&token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            warn!("Discarding unreadable session token: {}", e);
            store.clear();
            None
        }
    }
}

/// Reactive session shared through Leptos context.
///
/// All token reads and writes go through this type.
#[derive(Clone, Copy)]
pub struct SessionContext {
    token: RwSignal<Option<String>>,
    store: StoredValue<Arc<dyn TokenStore>>,
}

impl SessionContext {
    /// Start from the persisted token, dropping it if it does not decode.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let token = RwSignal::new(resolve_identity(store.as_ref()).and_then(|_| store.read()));
        Self {
            token,
            store: StoredValue::new(store),
        }
    }

    pub fn token_untracked(&self) -> Option<String> {
        self.token.get_untracked()
    }

    pub fn claims(&self) -> Option<Claims> {
        self.token
            .with(|t| t.as_deref().and_then(|t| decode_claims(t).ok()))
    }

    pub fn role(&self) -> Option<Role> {
        self.claims().map(|c| c.role())
    }

    pub fn user_id(&self) -> Option<i64> {
        self.claims().and_then(|c| c.user_id())
    }

    /// Route decision for the current token.
    pub fn access(&self, allowed: &[Role]) -> Access {
        self.token.with(|t| guard::decide(t.as_deref(), allowed))
    }

    pub fn sign_in(&self, token: String) {
        self.store.with_value(|s| s.write(&token));
        self.token.set(Some(token));
        info!("Session started");
    }

    pub fn sign_out(&self) {
        self.store.with_value(|s| s.clear());
        self.token.set(None);
        info!("Session ended");
    }

    /// Drop a token that failed to decode without re-notifying readers
    /// that are already redirecting.
    pub fn discard_invalid(&self) {
        self.store.with_value(|s| s.clear());
        self.token.update_untracked(|t| *t = None);
    }

    /// Clear the session and reload the page; used on HTTP 401.
    pub fn force_logout(&self) {
        warn!("Server rejected the session token, logging out");
        self.store.with_value(|s| s.clear());
        self.token.update_untracked(|t| *t = None);
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    pub(crate) fn make_token(payload: &str) -> String {
        format!(
            "eyJhbGciOiJIUzI1NiJ9.{}.signature",
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_decode_role_and_known_claims() {
        let token = make_token(r#"{"role":"Тренер","Id":"42","Login":"coach","exp":1700000000}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.role(), Role::Trainer);
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.login.as_deref(), Some("coach"));
        assert_eq!(claims.extra.get("exp"), Some(&serde_json::json!(1700000000)));
    }

    #[test]
    fn test_decode_accepts_padded_standard_alphabet() {
        // '?' and '>' encode to '/' and '+' in the standard alphabet
        let payload = r#"{"role":"Админ","note":"??>>"}"#;
        let token = format!("h.{}.s", STANDARD.encode(payload));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.role(), Role::Admin);
    }

    #[test]
    fn test_numeric_id_claim() {
        let token = make_token(r#"{"role":"Пользователь","Id":17}"#);
        assert_eq!(decode_claims(&token).unwrap().user_id(), Some(17));
    }

    #[test]
    fn test_decode_missing_role_defaults_to_empty() {
        let token = make_token(r#"{"sub":"7"}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.role(), Role::Other(String::new()));
        assert_eq!(claims.user_id(), None);
    }

    #[test]
    fn test_decode_failures() {
        assert!(matches!(decode_claims("nodots"), Err(TokenError::MissingPayload)));
        assert!(matches!(decode_claims("a..b"), Err(TokenError::MissingPayload)));
        assert!(matches!(decode_claims("a.!!!.b"), Err(TokenError::Base64(_))));
        let not_json = format!("a.{}.b", URL_SAFE_NO_PAD.encode("hello"));
        assert!(matches!(decode_claims(&not_json), Err(TokenError::Json(_))));
    }

    #[test]
    fn test_role_from_claim() {
        assert_eq!(Role::from_claim("Админ"), Role::Admin);
        assert_eq!(Role::from_claim("Пользователь"), Role::User);
        assert_eq!(Role::from_claim("Guest"), Role::Other("Guest".to_string()));
        assert!(Role::Admin.is_staff());
        assert!(Role::Trainer.is_staff());
        assert!(!Role::User.is_staff());
        assert_eq!(Role::Other("Guest".into()).label(), "Guest");
    }

    #[test]
    fn test_resolve_identity_absent_token() {
        let store = MemoryStore::default();
        assert!(resolve_identity(&store).is_none());
    }

    #[test]
    fn test_resolve_identity_valid_token_kept() {
        let token = make_token(r#"{"role":"Пользователь","Id":"3"}"#);
        let store = MemoryStore::with_token(&token);
        let claims = resolve_identity(&store).unwrap();
        assert_eq!(claims.user_id(), Some(3));
        assert_eq!(store.read(), Some(token));
    }

    #[test]
    fn test_resolve_identity_clears_bad_token() {
        let store = MemoryStore::with_token("garbage");
        assert!(resolve_identity(&store).is_none());
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::default();
        store.write("abc");
        assert_eq!(store.read().as_deref(), Some("abc"));
        store.clear();
        assert_eq!(store.read(), None);
    }
}
