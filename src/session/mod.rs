//! Client Session
//!
//! The signed-in account as the front-end sees it: the bearer token, the
//! user and profile records returned at login, and the active role.
//!
//! ## Storage layout
//!
//! | key       | value                         |
//! |-----------|-------------------------------|
//! | `token`   | bare access token             |
//! | `user`    | JSON-encoded [`User`]         |
//! | `profile` | JSON-encoded [`Profile`]      |
//! | `role`    | role wire name (`doctor`, ...)|
//!
//! The session is read once when the app mounts ([`Session::load`]) and is
//! not re-read for the rest of the page life.

mod role;
mod store;

pub use role::{Role, UnknownRole};
pub use store::{KeyValueStore, MemoryStore, StoreError};

#[cfg(feature = "native")]
pub use store::FileStore;

use crate::api::{ApiError, LoginResponse, Profile, RecordId, User};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const PROFILE_KEY: &str = "profile";
pub const ROLE_KEY: &str = "role";

/// Avatar shown when the account has none
pub const DEFAULT_AVATAR: &str = "/9440461.webp";

/// Values read from the session store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
    pub profile: Option<Profile>,
    pub role: Option<Role>,
}

/// Whether the session has been read yet
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Initial read not finished; nothing session-dependent may render
    Loading,
    Loaded(Session),
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Loading
    }
}

impl SessionState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, SessionState::Loaded(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Loaded(session) => Some(session),
            SessionState::Loading => None,
        }
    }
}

/// Sidebar footer card for the signed-in account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCard {
    pub name: String,
    pub email: String,
    pub avatar: String,
}

fn parse_json<T: serde::de::DeserializeOwned>(key: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Ignoring malformed stored {}: {}", key, e);
            None
        }
    }
}

impl Session {
    /// Read the session from `store`.
    ///
    /// Malformed JSON values are treated as absent. When the stored user has
    /// at least one role, the first one is written back as the canonical
    /// `role` value and becomes the session role right away, rather than on
    /// the next load.
    pub fn load<S: KeyValueStore + ?Sized>(store: &mut S) -> Session {
        let token = store.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let user: Option<User> = parse_json(USER_KEY, store.get(USER_KEY));
        let profile: Option<Profile> = parse_json(PROFILE_KEY, store.get(PROFILE_KEY));

        let mut role_name = store.get(ROLE_KEY);
        if let Some(first) = user.as_ref().and_then(User::first_role) {
            if let Err(e) = store.set(ROLE_KEY, &first) {
                tracing::warn!("Failed to write back canonical role: {}", e);
            }
            role_name = Some(first);
        }

        let role = role_name.and_then(|name| match name.parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => {
                tracing::debug!("{}", e);
                None
            }
        });

        Session {
            token,
            user,
            profile,
            role,
        }
    }

    /// Persist a successful login and return the resulting session
    pub fn persist_login<S: KeyValueStore + ?Sized>(
        store: &mut S,
        response: &LoginResponse,
        role: Role,
    ) -> Result<Session, StoreError> {
        store.set(USER_KEY, &serde_json::to_string(&response.user)?)?;
        store.set(TOKEN_KEY, &response.access_token)?;
        store.set(PROFILE_KEY, &serde_json::to_string(&response.profile)?)?;
        store.set(ROLE_KEY, role.as_str())?;

        tracing::info!(role = %role, "Session persisted");

        Ok(Session {
            token: Some(response.access_token.clone()),
            user: Some(response.user.clone()),
            profile: response.profile.clone(),
            role: Some(role),
        })
    }

    /// Remove every session key (logout)
    pub fn clear<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
        for key in [TOKEN_KEY, USER_KEY, PROFILE_KEY, ROLE_KEY] {
            store.remove(key)?;
        }
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Token for the `Authorization: Bearer` header
    pub fn bearer(&self) -> Result<&str, ApiError> {
        self.token.as_deref().ok_or(ApiError::Unauthenticated)
    }

    /// Profile id, used as doctor id for reports and patient id for lookups
    pub fn profile_id(&self) -> Option<&RecordId> {
        self.profile.as_ref().and_then(|p| p.id.as_ref())
    }

    pub fn doctor_id(&self) -> Option<&RecordId> {
        self.profile_id()
    }

    pub fn patient_id(&self) -> Option<&RecordId> {
        self.profile_id()
    }

    pub fn display_user(&self) -> UserCard {
        let user = self.user.as_ref();
        let first = user
            .and_then(|u| u.first_name.as_deref())
            .unwrap_or("Invitado");
        let last = user.and_then(|u| u.last_name.as_deref()).unwrap_or("");

        UserCard {
            name: format!("{} {}", first, last).trim_end().to_string(),
            email: user
                .and_then(|u| u.email.clone())
                .unwrap_or_else(|| "—".to_string()),
            avatar: user
                .and_then(|u| u.avatar.clone())
                .unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_response() -> LoginResponse {
        serde_json::from_str(
            r#"{
                "user": {"id": 1, "first_name": "Luis", "last_name": "Rojas",
                         "email": "luis@example.com", "roles": ["doctor"]},
                "access_token": "tok-abc",
                "profile": {"id": 12, "cmp": "55555"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_store_loads_empty_session() {
        let mut store = MemoryStore::new();
        let session = Session::load(&mut store);
        assert_eq!(session, Session::default());
        assert!(session.bearer().is_err());
    }

    #[test]
    fn test_persist_then_load_roundtrip() {
        let mut store = MemoryStore::new();
        let persisted = Session::persist_login(&mut store, &login_response(), Role::Doctor).unwrap();

        assert_eq!(store.len(), 4);
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok-abc"));

        let loaded = Session::load(&mut store);
        assert_eq!(loaded, persisted);
        assert_eq!(loaded.bearer().unwrap(), "tok-abc");
        assert_eq!(loaded.doctor_id(), Some(&RecordId::new("12")));
    }

    #[test]
    fn test_malformed_json_is_treated_as_absent() {
        let mut store = MemoryStore::new();
        store.set(TOKEN_KEY, "tok").unwrap();
        store.set(USER_KEY, "{broken").unwrap();
        store.set(PROFILE_KEY, r#"{"id": 4}"#).unwrap();
        store.set(ROLE_KEY, "patient").unwrap();

        let session = Session::load(&mut store);
        assert!(session.user.is_none());
        assert_eq!(session.patient_id(), Some(&RecordId::new("4")));
        assert_eq!(session.role, Some(Role::Patient));
    }

    #[test]
    fn test_first_user_role_is_written_back() {
        let mut store = MemoryStore::new();
        store
            .set(USER_KEY, r#"{"roles": ["admin", "doctor"]}"#)
            .unwrap();
        store.set(ROLE_KEY, "patient").unwrap();

        let session = Session::load(&mut store);
        assert_eq!(session.role, Some(Role::Admin));
        assert_eq!(store.get(ROLE_KEY).as_deref(), Some("admin"));
    }

    #[test]
    fn test_string_profile_id_survives_storage() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"user": {}, "access_token": "tok", "profile": {"id": "007"}}"#,
        )
        .unwrap();
        let mut store = MemoryStore::new();
        Session::persist_login(&mut store, &response, Role::Doctor).unwrap();

        assert_eq!(store.get(PROFILE_KEY).as_deref(), Some(r#"{"id":"007"}"#));
        let session = Session::load(&mut store);
        assert_eq!(session.doctor_id().map(RecordId::as_str), Some("007"));
    }

    #[test]
    fn test_null_roles_keep_the_user() {
        let mut store = MemoryStore::new();
        store
            .set(USER_KEY, r#"{"first_name": "Ana", "roles": null}"#)
            .unwrap();
        store.set(ROLE_KEY, "patient").unwrap();

        let session = Session::load(&mut store);
        assert!(session.user.is_some());
        assert_eq!(session.display_user().name, "Ana");
        assert_eq!(session.role, Some(Role::Patient));
        assert_eq!(store.get(ROLE_KEY).as_deref(), Some("patient"));
    }

    #[test]
    fn test_unknown_role_is_absent() {
        let mut store = MemoryStore::new();
        store.set(ROLE_KEY, "student").unwrap();
        assert_eq!(Session::load(&mut store).role, None);
    }

    #[test]
    fn test_clear_removes_all_keys() {
        let mut store = MemoryStore::new();
        Session::persist_login(&mut store, &login_response(), Role::Doctor).unwrap();
        Session::clear(&mut store).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_display_user_defaults() {
        let card = Session::default().display_user();
        assert_eq!(card.name, "Invitado");
        assert_eq!(card.email, "—");
        assert_eq!(card.avatar, DEFAULT_AVATAR);

        let mut store = MemoryStore::new();
        let session = Session::persist_login(&mut store, &login_response(), Role::Doctor).unwrap();
        assert_eq!(session.display_user().name, "Luis Rojas");
    }

    #[test]
    fn test_session_state() {
        assert!(!SessionState::default().is_loaded());
        assert!(SessionState::default().session().is_none());
        let state = SessionState::Loaded(Session::default());
        assert!(state.is_loaded());
    }
}
