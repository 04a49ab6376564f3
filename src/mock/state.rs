//! Mock API State
//!
//! In-memory accounts, patients and generated reports shared by all
//! handlers. Seeded with one doctor and one patient so every page of the
//! dashboard has something to show.

use chrono::Utc;
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::api::{
    Diagnosis, Doctor, LoginResponse, MedicalHistory, Patient, Profile, RecordId, ReportRequest,
    User,
};
use crate::auth::{RegisterRequest, RoleFields};
use crate::session::Role;

pub const PASSWORD: &str = "gismondi123";
pub const DOCTOR_EMAIL: &str = "doctor@gismondi.pe";
pub const PATIENT_EMAIL: &str = "paciente@gismondi.pe";
pub const DOCTOR_TOKEN: &str = "mock-doctor-token";
pub const PATIENT_TOKEN: &str = "mock-patient-token";
pub const DOCTOR_PROFILE_ID: i64 = 12;
pub const PATIENT_PROFILE_ID: i64 = 31;
pub const KNOWN_DNI: &str = "81712601";

/// A registered account
#[derive(Debug, Clone)]
pub struct Account {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub token: String,
    pub user: User,
    pub profile: Profile,
}

impl Account {
    pub fn login_response(&self) -> LoginResponse {
        LoginResponse {
            user: self.user.clone(),
            access_token: self.token.clone(),
            profile: Some(self.profile.clone()),
        }
    }
}

/// Shared state for all mock handlers
#[derive(Clone, Default)]
pub struct MockState {
    accounts: Arc<RwLock<Vec<Account>>>,
    doctors: Arc<RwLock<Vec<Doctor>>>,
    patients: Arc<RwLock<Vec<Patient>>>,
    reports: Arc<RwLock<Vec<ReportRequest>>>,
    next_id: Arc<AtomicI64>,
}

fn user(id: i64, first: &str, last: &str, email: &str, role: Role) -> User {
    User {
        id: Some(RecordId::from(id)),
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        email: Some(email.to_string()),
        avatar: None,
        roles: vec![json!({ "id": id, "name": role.as_str() })],
        extra: Map::new(),
    }
}

fn profile(id: i64, fields: Value) -> Profile {
    let extra = match fields {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    Profile {
        id: Some(RecordId::from(id)),
        extra,
    }
}

impl MockState {
    /// Empty state
    pub fn new() -> Self {
        Self {
            next_id: Arc::new(AtomicI64::new(100)),
            ..Self::default()
        }
    }

    /// State seeded with a doctor, a patient and two past diagnoses
    pub fn with_fixtures() -> Self {
        let doctor = Doctor {
            id: DOCTOR_PROFILE_ID,
            cmp: "045871".to_string(),
            specialty: "Oftalmología".to_string(),
            user_id: Some(RecordId::from(2)),
        };

        let diagnoses = vec![
            Diagnosis {
                id: 1,
                description: "Retinopatía diabética leve. Control en 6 meses.".to_string(),
                diagnosis_date: "2024-09-12 10:30:00".to_string(),
                history_id: Some(RecordId::from(7)),
                doctor_id: Some(RecordId::from(DOCTOR_PROFILE_ID)),
                doctor: Some(doctor.clone()),
            },
            Diagnosis {
                id: 2,
                description: "Sin signos de retinopatía diabética.".to_string(),
                diagnosis_date: "2023-08-02 16:00:00".to_string(),
                history_id: Some(RecordId::from(7)),
                doctor_id: Some(RecordId::from(DOCTOR_PROFILE_ID)),
                doctor: Some(doctor.clone()),
            },
        ];

        let patient = Patient {
            id: PATIENT_PROFILE_ID,
            birth_date: "1975-08-21".to_string(),
            dni: KNOWN_DNI.to_string(),
            user_id: Some(RecordId::from(3)),
            medical_history: Some(MedicalHistory {
                id: 7,
                patient_id: Some(RecordId::from(PATIENT_PROFILE_ID)),
                created_at: "2023-08-02T16:00:00.000000Z".to_string(),
                diagnoses,
            }),
        };

        let accounts = vec![
            Account {
                email: DOCTOR_EMAIL.to_string(),
                password: PASSWORD.to_string(),
                role: Role::Doctor,
                token: DOCTOR_TOKEN.to_string(),
                user: user(2, "Luis", "Gismondi", DOCTOR_EMAIL, Role::Doctor),
                profile: profile(
                    DOCTOR_PROFILE_ID,
                    json!({ "cmp": doctor.cmp, "specialty": doctor.specialty }),
                ),
            },
            Account {
                email: PATIENT_EMAIL.to_string(),
                password: PASSWORD.to_string(),
                role: Role::Patient,
                token: PATIENT_TOKEN.to_string(),
                user: user(3, "María", "Quispe", PATIENT_EMAIL, Role::Patient),
                profile: profile(
                    PATIENT_PROFILE_ID,
                    json!({ "dni": KNOWN_DNI, "birth_date": patient.birth_date }),
                ),
            },
        ];

        Self {
            accounts: Arc::new(RwLock::new(accounts)),
            doctors: Arc::new(RwLock::new(vec![doctor])),
            patients: Arc::new(RwLock::new(vec![patient])),
            reports: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(100)),
        }
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Account matching the credentials
    pub async fn authenticate(&self, email: &str, password: &str) -> Option<Account> {
        self.accounts
            .read()
            .await
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email) && a.password == password)
            .cloned()
    }

    pub async fn account_for_token(&self, token: &str) -> Option<Account> {
        self.accounts
            .read()
            .await
            .iter()
            .find(|a| a.token == token)
            .cloned()
    }

    pub async fn email_taken(&self, email: &str) -> bool {
        self.accounts
            .read()
            .await
            .iter()
            .any(|a| a.email.eq_ignore_ascii_case(email))
    }

    pub async fn dni_taken(&self, dni: &str) -> bool {
        self.patients.read().await.iter().any(|p| p.dni == dni)
    }

    /// Create the account and its role record
    pub async fn register(&self, request: &RegisterRequest) -> Account {
        let user_id = self.next_id();
        let profile_id = self.next_id();

        let profile_fields = match &request.fields {
            RoleFields::Patient { dni, birth_date } => {
                self.patients.write().await.push(Patient {
                    id: profile_id,
                    birth_date: birth_date.clone(),
                    dni: dni.clone(),
                    user_id: Some(RecordId::from(user_id)),
                    medical_history: Some(MedicalHistory {
                        id: self.next_id(),
                        patient_id: Some(RecordId::from(profile_id)),
                        created_at: Utc::now().to_rfc3339(),
                        diagnoses: Vec::new(),
                    }),
                });
                json!({ "dni": dni, "birth_date": birth_date })
            }
            RoleFields::Doctor { cmp, specialty } => {
                self.doctors.write().await.push(Doctor {
                    id: profile_id,
                    cmp: cmp.clone(),
                    specialty: specialty.clone(),
                    user_id: Some(RecordId::from(user_id)),
                });
                json!({ "cmp": cmp, "specialty": specialty })
            }
            RoleFields::Admin {
                position,
                responsible_area,
            } => json!({ "position": position, "responsible_area": responsible_area }),
        };

        let account = Account {
            email: request.email.clone(),
            password: request.password.clone(),
            role: request.role,
            token: format!("mock-{}", uuid::Uuid::new_v4()),
            user: user(
                user_id,
                &request.first_name,
                &request.last_name,
                &request.email,
                request.role,
            ),
            profile: profile(profile_id, profile_fields),
        };

        self.accounts.write().await.push(account.clone());
        account
    }

    pub async fn patient_by_dni(&self, dni: &str) -> Option<Patient> {
        self.patients
            .read()
            .await
            .iter()
            .find(|p| p.dni == dni)
            .cloned()
    }

    pub async fn patient_by_id(&self, id: &str) -> Option<Patient> {
        self.patients
            .read()
            .await
            .iter()
            .find(|p| p.id.to_string() == id)
            .cloned()
    }

    /// Append a diagnosis for the report's patient. `None` when the DNI is
    /// unknown.
    pub async fn record_report(&self, report: &ReportRequest) -> Option<Diagnosis> {
        let doctor = self
            .doctors
            .read()
            .await
            .iter()
            .find(|d| d.id.to_string() == report.doctor_id.as_str())
            .cloned();

        let mut patients = self.patients.write().await;
        let patient = patients.iter_mut().find(|p| p.dni == report.dni)?;
        let patient_id = patient.id;
        let history = patient.medical_history.get_or_insert_with(|| MedicalHistory {
            id: self.next_id(),
            patient_id: Some(RecordId::from(patient_id)),
            created_at: Utc::now().to_rfc3339(),
            diagnoses: Vec::new(),
        });

        let diagnosis = Diagnosis {
            id: self.next_id(),
            description: report.description.clone(),
            diagnosis_date: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            history_id: Some(RecordId::from(history.id)),
            doctor_id: Some(report.doctor_id.clone()),
            doctor,
        };
        // Newest first, the order the dashboard expects
        history.diagnoses.insert(0, diagnosis.clone());
        drop(patients);

        self.reports.write().await.push(report.clone());
        Some(diagnosis)
    }

    pub async fn report_count(&self) -> usize {
        self.reports.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_accounts_authenticate() {
        let state = MockState::with_fixtures();
        let doctor = state.authenticate(DOCTOR_EMAIL, PASSWORD).await.unwrap();
        assert_eq!(doctor.role, Role::Doctor);
        assert!(state.authenticate(DOCTOR_EMAIL, "wrong").await.is_none());
        assert!(state.account_for_token(PATIENT_TOKEN).await.is_some());
    }

    #[tokio::test]
    async fn test_report_prepends_diagnosis() {
        let state = MockState::with_fixtures();
        let report = ReportRequest {
            dni: KNOWN_DNI.to_string(),
            doctor_id: RecordId::from(DOCTOR_PROFILE_ID),
            description: "Nuevo".to_string(),
        };
        let diagnosis = state.record_report(&report).await.unwrap();
        assert_eq!(diagnosis.doctor.unwrap().id, DOCTOR_PROFILE_ID);

        let patient = state.patient_by_dni(KNOWN_DNI).await.unwrap();
        assert_eq!(patient.diagnoses()[0].description, "Nuevo");
        assert_eq!(state.report_count().await, 1);

        let unknown = ReportRequest {
            dni: "000".to_string(),
            ..report
        };
        assert!(state.record_report(&unknown).await.is_none());
    }
}
