//! Registration form
//!
//! Each role registers with its own extra fields. [`RoleFields`] carries only
//! the fields of the selected role, so switching role swaps the variant.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{require, FormOutcome, GENERIC_FAILURE};
use crate::api::ApiError;
use crate::nav::Route;
use crate::notify::Notification;
use crate::session::Role;

/// Role-specific registration fields.
///
/// Serialized as `{"<role>_fields": {...}}` so it can be flattened into the
/// request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleFields {
    #[serde(rename = "patient_fields")]
    Patient { dni: String, birth_date: String },
    #[serde(rename = "doctor_fields")]
    Doctor { cmp: String, specialty: String },
    #[serde(rename = "admin_fields")]
    Admin {
        position: String,
        responsible_area: String,
    },
}

impl RoleFields {
    /// Blank fields for `role`
    pub fn empty(role: Role) -> Self {
        match role {
            Role::Patient => RoleFields::Patient {
                dni: String::new(),
                birth_date: String::new(),
            },
            Role::Doctor => RoleFields::Doctor {
                cmp: String::new(),
                specialty: String::new(),
            },
            Role::Admin => RoleFields::Admin {
                position: String::new(),
                responsible_area: String::new(),
            },
        }
    }

    pub fn role(&self) -> Role {
        match self {
            RoleFields::Patient { .. } => Role::Patient,
            RoleFields::Doctor { .. } => Role::Doctor,
            RoleFields::Admin { .. } => Role::Admin,
        }
    }

    /// (label, value) pairs for every field of the variant
    pub fn labelled(&self) -> [(&'static str, &str); 2] {
        match self {
            RoleFields::Patient { dni, birth_date } => {
                [("DNI", dni), ("Fecha de Nacimiento", birth_date)]
            }
            RoleFields::Doctor { cmp, specialty } => [("CMP", cmp), ("Especialidad", specialty)],
            RoleFields::Admin {
                position,
                responsible_area,
            } => [("Cargo", position), ("Área Responsable", responsible_area)],
        }
    }

    fn validate(&self) -> Result<(), Notification> {
        for (label, value) in self.labelled() {
            require(label, value)?;
        }
        if let RoleFields::Patient { birth_date, .. } = self {
            if chrono::NaiveDate::parse_from_str(birth_date.trim(), "%Y-%m-%d").is_err() {
                return Err(Notification::error(
                    "La fecha de nacimiento debe tener el formato AAAA-MM-DD",
                ));
            }
        }
        Ok(())
    }
}

/// Registration request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub role: Role,
    #[serde(flatten)]
    pub fields: RoleFields,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub fields: RoleFields,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password: String::new(),
            password_confirmation: String::new(),
            fields: RoleFields::empty(Role::Patient),
        }
    }
}

impl RegisterForm {
    pub fn role(&self) -> Role {
        self.fields.role()
    }

    /// Switch role; fields of the previous role are dropped
    pub fn select_role(&mut self, role: Role) {
        if self.fields.role() != role {
            self.fields = RoleFields::empty(role);
        }
    }

    /// Client-side checks. The password confirmation is compared first, so a
    /// mismatch never reaches the network.
    pub fn validate(&self) -> Result<RegisterRequest, Notification> {
        if self.password != self.password_confirmation {
            return Err(Notification::error("Las contraseñas no coinciden"));
        }

        require("Nombres", &self.first_name)?;
        require("Apellidos", &self.last_name)?;
        require("Email", &self.email)?;
        require("Contraseña", &self.password)?;
        self.fields.validate()?;

        Ok(RegisterRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            password_confirmation: self.password_confirmation.clone(),
            role: self.role(),
            fields: self.fields.clone(),
        })
    }

    /// Apply the API answer. Success redirects to the login page.
    pub fn complete<T>(&self, result: Result<T, ApiError>, redirect_delay: Duration) -> FormOutcome {
        match result {
            Ok(_) => FormOutcome::succeeded(
                Notification::success("¡Registro exitoso!")
                    .with_description("Tu cuenta ha sido creada correctamente."),
                Route::Login,
                redirect_delay,
            ),
            Err(err) => {
                tracing::warn!("Registration failed: {}", err);
                FormOutcome::failed(err.field_notifications(GENERIC_FAILURE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RegisterForm {
        RegisterForm {
            first_name: "María".into(),
            last_name: "Quispe".into(),
            email: "maria@example.com".into(),
            password: "secreto123".into(),
            password_confirmation: "secreto123".into(),
            fields: RoleFields::Patient {
                dni: "81712601".into(),
                birth_date: "1975-08-21".into(),
            },
        }
    }

    #[test]
    fn test_password_mismatch_blocks() {
        let mut form = filled();
        form.password_confirmation = "otro".into();
        let err = form.validate().unwrap_err();
        assert_eq!(err.title, "Las contraseñas no coinciden");
    }

    #[test]
    fn test_missing_role_field_blocks() {
        let mut form = filled();
        form.select_role(Role::Doctor);
        let err = form.validate().unwrap_err();
        assert!(err.title.contains("CMP"));
    }

    #[test]
    fn test_select_role_swaps_variant() {
        let mut form = filled();
        form.select_role(Role::Patient);
        assert_eq!(form.fields, filled().fields);

        form.select_role(Role::Admin);
        assert_eq!(form.role(), Role::Admin);
        assert_eq!(form.fields, RoleFields::empty(Role::Admin));
    }

    #[test]
    fn test_request_body_is_flat_with_active_role_fields() {
        let request = filled().validate().unwrap();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["role"], "patient");
        assert_eq!(body["patient_fields"]["dni"], "81712601");
        assert_eq!(body["patient_fields"]["birth_date"], "1975-08-21");
        assert!(body.get("doctor_fields").is_none());
        assert!(body.get("admin_fields").is_none());
    }

    #[test]
    fn test_bad_birth_date_blocks() {
        let mut form = filled();
        form.fields = RoleFields::Patient {
            dni: "1".into(),
            birth_date: "21/08/1975".into(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_success_redirects_to_login() {
        let outcome = filled().complete(Ok(()), Duration::from_millis(2000));
        assert_eq!(outcome.redirect.unwrap().route, Route::Login);
    }

    #[test]
    fn test_field_errors_become_notifications() {
        let err = ApiError::from_response(
            422,
            r#"{"errors": {"dni": ["El DNI ya está registrado."], "email": ["Email inválido."]}}"#,
        );
        let outcome = filled().complete::<()>(Err(err), Duration::ZERO);
        assert_eq!(outcome.notifications.len(), 2);
    }
}
