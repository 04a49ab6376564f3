//! Endpoint paths of the clinic API, relative to the configured base URL.

use serde::Deserialize;

/// Placeholder substituted by [`Endpoints::diagnoses_for_patient`]
pub const PATIENT_ID_PLACEHOLDER: &str = ":patientId";

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_login")]
    pub login: String,
    #[serde(default = "default_register")]
    pub register: String,
    #[serde(default = "default_classify")]
    pub classify: String,
    #[serde(default = "default_report")]
    pub report: String,
    #[serde(default = "default_history_by_dni")]
    pub history_by_dni: String,
    #[serde(default = "default_diagnoses_by_patient")]
    pub diagnoses_by_patient: String,
}

fn default_login() -> String {
    "/api/auth/login".to_string()
}

fn default_register() -> String {
    "/api/auth/register".to_string()
}

fn default_classify() -> String {
    "/api/classify-image".to_string()
}

fn default_report() -> String {
    "/api/generate-report".to_string()
}

fn default_history_by_dni() -> String {
    "/api/medical-histories/showByDni".to_string()
}

fn default_diagnoses_by_patient() -> String {
    format!("/api/diagnoses/patient/{}", PATIENT_ID_PLACEHOLDER)
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: default_login(),
            register: default_register(),
            classify: default_classify(),
            report: default_report(),
            history_by_dni: default_history_by_dni(),
            diagnoses_by_patient: default_diagnoses_by_patient(),
        }
    }
}

impl Endpoints {
    /// Diagnoses path with the patient id filled in. The id must already be
    /// safe to place in a path segment.
    pub fn diagnoses_for_patient(&self, patient_id: &str) -> String {
        self.diagnoses_by_patient
            .replace(PATIENT_ID_PLACEHOLDER, patient_id)
    }
}

/// Join a base URL and an endpoint path without doubling slashes
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnoses_path_substitutes_patient_id() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.diagnoses_for_patient("12"),
            "/api/diagnoses/patient/12"
        );
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://127.0.0.1:8000/", "/api/auth/login"),
            "http://127.0.0.1:8000/api/auth/login"
        );
        assert_eq!(join_url("http://h", "api/x"), "http://h/api/x");
    }
}
