//! Login form

use std::time::Duration;

use super::{require, FormOutcome, GENERIC_FAILURE};
use crate::api::{ApiError, LoginRequest, LoginResponse};
use crate::nav::Route;
use crate::notify::Notification;
use crate::session::{KeyValueStore, Role, Session};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role,
        }
    }

    pub fn validate(&self) -> Result<LoginRequest, Notification> {
        require("Email", &self.email)?;
        require("Contraseña", &self.password)?;

        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role,
        })
    }

    /// Apply the API answer: persist the session on success and schedule the
    /// dashboard redirect.
    pub fn complete<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        result: Result<LoginResponse, ApiError>,
        redirect_delay: Duration,
    ) -> FormOutcome {
        match result {
            Ok(response) => match Session::persist_login(store, &response, self.role) {
                Ok(_) => FormOutcome::succeeded(
                    Notification::success("¡Inicio de sesión exitoso!")
                        .with_description("Redirigiendo a tu dashboard."),
                    Route::Dashboard,
                    redirect_delay,
                ),
                Err(e) => {
                    tracing::error!("Failed to persist session: {}", e);
                    FormOutcome::failed(vec![Notification::error(
                        "No se pudo guardar la sesión en este dispositivo",
                    )])
                }
            },
            Err(err) => {
                tracing::warn!("Login failed: {}", err);
                FormOutcome::failed(vec![err.notification(GENERIC_FAILURE)])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::CONNECTIVITY_MESSAGE;
    use crate::session::{MemoryStore, PROFILE_KEY, ROLE_KEY, TOKEN_KEY, USER_KEY};

    fn response() -> LoginResponse {
        serde_json::from_str(
            r#"{"user": {"id": 2, "roles": []}, "access_token": "t0k", "profile": {"id": 5}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_blank_fields_are_blocked() {
        let form = LoginForm::new("", "secret", Role::Patient);
        assert!(form.validate().is_err());
        let form = LoginForm::new("a@b.c", "  ", Role::Patient);
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_validate_builds_request() {
        let form = LoginForm::new(" a@b.c ", "secret", Role::Doctor);
        let request = form.validate().unwrap();
        assert_eq!(request.email, "a@b.c");
        assert_eq!(request.role, Role::Doctor);
    }

    #[test]
    fn test_success_persists_four_keys_and_redirects() {
        let mut store = MemoryStore::new();
        let form = LoginForm::new("a@b.c", "secret", Role::Patient);
        let outcome = form.complete(&mut store, Ok(response()), Duration::from_millis(2000));

        for key in [TOKEN_KEY, USER_KEY, PROFILE_KEY, ROLE_KEY] {
            assert!(store.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("t0k"));
        assert_eq!(store.get(ROLE_KEY).as_deref(), Some("patient"));

        let redirect = outcome.redirect.unwrap();
        assert_eq!(redirect.route.path(), "/dashboard");
        assert_eq!(redirect.delay, Duration::from_millis(2000));
    }

    #[test]
    fn test_server_rejection_surfaces_message() {
        let mut store = MemoryStore::new();
        let form = LoginForm::new("a@b.c", "wrong", Role::Patient);
        let err = ApiError::from_response(401, r#"{"message": "Credenciales incorrectas"}"#);
        let outcome = form.complete(&mut store, Err(err), Duration::ZERO);

        assert!(!outcome.is_success());
        assert_eq!(outcome.notifications[0].title, "Error: Credenciales incorrectas");
        assert!(store.is_empty());
    }

    #[test]
    fn test_network_failure_is_generic() {
        let mut store = MemoryStore::new();
        let form = LoginForm::new("a@b.c", "pw", Role::Patient);
        let outcome = form.complete(
            &mut store,
            Err(ApiError::Network("refused".into())),
            Duration::ZERO,
        );
        assert_eq!(outcome.notifications[0].title, CONNECTIVITY_MESSAGE);
    }
}
