//! Data Transfer Objects
//!
//! Request and response types for the clinic API endpoints.
//! Response types are read-only mirrors of what the API returns.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::classify::PredictionResult;
use crate::session::Role;

// ============================================
// IDENTIFIERS
// ============================================

/// Record identifier that the API sends either as a number or a string.
/// It is written back in the form it arrived in, so `"007"` stays a string.
#[derive(Debug, Clone)]
pub struct RecordId {
    text: String,
    numeric: bool,
}

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            text: id.into(),
            numeric: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

// Equality ignores the wire form: `3` and `"3"` name the same record
impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for RecordId {}

impl std::hash::Hash for RecordId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self {
            text: id.to_string(),
            numeric: true,
        }
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => RecordId::from(n),
            Raw::Text(s) => RecordId::new(s),
        })
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.text.parse::<i64>() {
            Ok(n) if self.numeric => serializer.serialize_i64(n),
            _ => serializer.serialize_str(&self.text),
        }
    }
}

// ============================================
// AUTH DTOs
// ============================================

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Login response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
    #[serde(default)]
    pub profile: Option<Profile>,
}

/// Account record returned at login
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Either plain role names or `{ "name": ... }` objects. `null` or any
    /// other non-array value reads as no roles.
    #[serde(default, deserialize_with = "roles_or_empty")]
    pub roles: Vec<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn roles_or_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<serde_json::Value>, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(roles) => roles,
        _ => Vec::new(),
    })
}

impl User {
    /// Name of the first role attached to the account, if any
    pub fn first_role(&self) -> Option<String> {
        self.roles.first().and_then(|role| match role {
            serde_json::Value::String(name) => Some(name.clone()),
            serde_json::Value::Object(obj) => obj
                .get("name")
                .and_then(|n| n.as_str())
                .map(str::to_string),
            _ => None,
        })
    }
}

/// Role-specific profile (patient, doctor or admin record)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ============================================
// CLASSIFICATION DTOs
// ============================================

/// Classification response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifyResponse {
    pub prediction: PredictionResult,
}

/// Report generation request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportRequest {
    pub dni: String,
    pub doctor_id: RecordId,
    pub description: String,
}

// ============================================
// HISTORY DTOs
// ============================================

/// Medical history lookup request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DniLookupRequest {
    pub dni: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub id: i64,
    #[serde(default)]
    pub cmp: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Diagnosis {
    pub id: i64,
    pub description: String,
    pub diagnosis_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<Doctor>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalHistory {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<RecordId>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub diagnoses: Vec<Diagnosis>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub id: i64,
    pub birth_date: String,
    pub dni: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<MedicalHistory>,
}

impl Patient {
    /// Diagnoses in the order the API returned them
    pub fn diagnoses(&self) -> &[Diagnosis] {
        self.medical_history
            .as_ref()
            .map(|h| h.diagnoses.as_slice())
            .unwrap_or(&[])
    }
}

/// Response of both history lookup endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientEnvelope {
    pub patient: Patient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_accepts_numbers_and_strings() {
        let a: RecordId = serde_json::from_str("42").unwrap();
        let b: RecordId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), "42");

        let c: RecordId = serde_json::from_str("\"abc-1\"").unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"abc-1\"");
    }

    #[test]
    fn test_record_id_keeps_wire_form() {
        let padded: RecordId = serde_json::from_str("\"007\"").unwrap();
        assert_eq!(padded.as_str(), "007");
        assert_eq!(serde_json::to_string(&padded).unwrap(), "\"007\"");

        let quoted: RecordId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(serde_json::to_string(&quoted).unwrap(), "\"42\"");

        let number: RecordId = serde_json::from_str("42").unwrap();
        assert_eq!(serde_json::to_string(&number).unwrap(), "42");
        assert_eq!(quoted, number);
    }

    #[test]
    fn test_non_array_roles_read_as_empty() {
        let user: User = serde_json::from_str(r#"{"first_name": "Ana", "roles": null}"#).unwrap();
        assert_eq!(user.first_name.as_deref(), Some("Ana"));
        assert!(user.roles.is_empty());

        let user: User = serde_json::from_str(r#"{"roles": "doctor"}"#).unwrap();
        assert_eq!(user.first_role(), None);
    }

    #[test]
    fn test_login_response_keeps_unknown_user_fields() {
        let body = r#"{
            "user": {"id": 7, "first_name": "Ana", "email": "ana@example.com",
                     "roles": ["doctor"], "phone": "987654321"},
            "access_token": "tok-123",
            "profile": {"id": 3, "cmp": "CMP-001", "specialty": "Oftalmología"}
        }"#;
        let response: LoginResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.user.first_role().as_deref(), Some("doctor"));
        assert_eq!(response.user.extra.get("phone").unwrap(), "987654321");
        assert_eq!(
            response.profile.unwrap().id,
            Some(RecordId::new("3"))
        );
    }

    #[test]
    fn test_first_role_from_role_objects() {
        let user: User =
            serde_json::from_str(r#"{"roles": [{"id": 1, "name": "patient"}]}"#).unwrap();
        assert_eq!(user.first_role().as_deref(), Some("patient"));

        let nobody: User = serde_json::from_str("{}").unwrap();
        assert_eq!(nobody.first_role(), None);
    }

    #[test]
    fn test_patient_envelope_parses_nested_diagnoses() {
        let body = r#"{
            "patient": {
                "id": 1, "birth_date": "1980-05-10", "dni": "81712601", "user_id": "4",
                "medical_history": {
                    "id": 9, "patient_id": "1", "created_at": "2024-01-02T10:00:00.000000Z",
                    "diagnoses": [{
                        "id": 5, "description": "Retinopatía leve",
                        "diagnosis_date": "2024-03-05", "history_id": "9", "doctor_id": "2",
                        "doctor": {"id": 2, "cmp": "12345", "specialty": "Retina", "user_id": "3"}
                    }]
                }
            }
        }"#;
        let envelope: PatientEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.patient.diagnoses().len(), 1);
        assert_eq!(
            envelope.patient.diagnoses()[0].doctor.as_ref().unwrap().cmp,
            "12345"
        );
    }

    #[test]
    fn test_patient_without_history_has_no_diagnoses() {
        let patient: Patient =
            serde_json::from_str(r#"{"id": 1, "birth_date": "1990-01-01", "dni": "1"}"#).unwrap();
        assert!(patient.diagnoses().is_empty());
    }
}
