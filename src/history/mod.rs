//! Medical History and Diagnosis Lookup
//!
//! Doctors search a patient's medical history by DNI; patients load their
//! own diagnoses by profile id. Both answer with a [`PatientEnvelope`].
//! A 404 is reported as its own outcome, separate from other failures.

mod display;

pub use display::{
    age_from_str, age_on, format_api_date, format_api_datetime, format_date, format_datetime,
    parse_api_date, time_ago, time_ago_days, time_ago_str, DiagnosisSummary, SpecialtyShare,
};

use crate::api::{ApiError, Diagnosis, DniLookupRequest, Patient, PatientEnvelope, RecordId};
use crate::notify::{Notification, Notifier};
use crate::session::Session;

/// Where a lookup stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupStatus {
    #[default]
    Idle,
    Loading,
    Found,
    NotFound,
    Failed,
}

/// Shared result handling for both lookups
#[derive(Debug, Clone, Default, PartialEq)]
struct Lookup {
    status: LookupStatus,
    patient: Option<Patient>,
}

impl Lookup {
    fn start(&mut self) -> bool {
        if self.status == LookupStatus::Loading {
            return false;
        }
        self.status = LookupStatus::Loading;
        self.patient = None;
        true
    }

    fn finish(
        &mut self,
        result: Result<PatientEnvelope, ApiError>,
        notifier: &mut dyn Notifier,
        not_found: &str,
        fallback: &str,
    ) -> bool {
        if self.status != LookupStatus::Loading {
            tracing::warn!(status = ?self.status, "Lookup answer without a pending request");
            return false;
        }

        match result {
            Ok(envelope) => {
                tracing::debug!(
                    patient = envelope.patient.id,
                    diagnoses = envelope.patient.diagnoses().len(),
                    "Lookup succeeded"
                );
                self.patient = Some(envelope.patient);
                self.status = LookupStatus::Found;
                true
            }
            Err(ApiError::NotFound) => {
                self.status = LookupStatus::NotFound;
                notifier.notify(Notification::error(not_found));
                false
            }
            Err(err) => {
                tracing::warn!("Lookup failed: {}", err);
                self.status = LookupStatus::Failed;
                notifier.notify(err.notification(fallback));
                false
            }
        }
    }

    fn diagnoses(&self) -> &[Diagnosis] {
        self.patient.as_ref().map(Patient::diagnoses).unwrap_or(&[])
    }
}

// ============================================
// DOCTOR: SEARCH BY DNI
// ============================================

/// Medical-history search form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MedicalHistorySearch {
    pub dni: String,
    lookup: Lookup,
}

impl MedicalHistorySearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and start a search. Any previous result is cleared.
    pub fn begin(
        &mut self,
        session: &Session,
        notifier: &mut dyn Notifier,
    ) -> Option<DniLookupRequest> {
        let dni = self.dni.trim();
        if dni.is_empty() {
            notifier.notify(Notification::error("Por favor, ingresa un DNI válido"));
            return None;
        }
        if let Err(err) = session.bearer() {
            notifier.notify(err.notification(""));
            return None;
        }

        let request = DniLookupRequest {
            dni: dni.to_string(),
        };
        self.lookup.start().then_some(request)
    }

    pub fn finish(&mut self, result: Result<PatientEnvelope, ApiError>, notifier: &mut dyn Notifier) {
        let found = self.lookup.finish(
            result,
            notifier,
            "No se encontró historial médico para este DNI",
            "No se pudo obtener el historial médico",
        );
        if found {
            notifier.notify(Notification::success("Historial médico encontrado"));
        }
    }

    pub fn status(&self) -> LookupStatus {
        self.lookup.status
    }

    pub fn is_loading(&self) -> bool {
        self.lookup.status == LookupStatus::Loading
    }

    pub fn patient(&self) -> Option<&Patient> {
        self.lookup.patient.as_ref()
    }

    pub fn diagnoses(&self) -> &[Diagnosis] {
        self.lookup.diagnoses()
    }
}

// ============================================
// PATIENT: OWN DIAGNOSES
// ============================================

/// The signed-in patient's diagnoses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientDiagnoses {
    lookup: Lookup,
}

impl PatientDiagnoses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the lookup; returns the patient id to fetch
    pub fn begin(&mut self, session: &Session, notifier: &mut dyn Notifier) -> Option<RecordId> {
        if let Err(err) = session.bearer() {
            notifier.notify(err.notification(""));
            return None;
        }
        let Some(patient_id) = session.patient_id() else {
            notifier.notify(Notification::error(
                "No se pudo obtener la información del paciente",
            ));
            return None;
        };

        let patient_id = patient_id.clone();
        self.lookup.start().then_some(patient_id)
    }

    pub fn finish(&mut self, result: Result<PatientEnvelope, ApiError>, notifier: &mut dyn Notifier) {
        self.lookup.finish(
            result,
            notifier,
            "No se encontraron diagnósticos para este paciente",
            "No se pudieron obtener los diagnósticos",
        );
    }

    pub fn status(&self) -> LookupStatus {
        self.lookup.status
    }

    pub fn is_loading(&self) -> bool {
        self.lookup.status == LookupStatus::Loading
    }

    pub fn patient(&self) -> Option<&Patient> {
        self.lookup.patient.as_ref()
    }

    pub fn diagnoses(&self) -> &[Diagnosis] {
        self.lookup.diagnoses()
    }

    pub fn summary(&self) -> DiagnosisSummary {
        DiagnosisSummary::from_diagnoses(self.diagnoses())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::LoginResponse;
    use crate::notify::CONNECTIVITY_MESSAGE;
    use crate::session::{MemoryStore, Role};

    fn session(role: Role) -> Session {
        let response: LoginResponse = serde_json::from_str(
            r#"{"user": {}, "access_token": "tok", "profile": {"id": 31}}"#,
        )
        .unwrap();
        Session::persist_login(&mut MemoryStore::new(), &response, role).unwrap()
    }

    fn envelope() -> PatientEnvelope {
        serde_json::from_str(
            r#"{"patient": {"id": 31, "birth_date": "1975-08-21", "dni": "81712601",
                "medical_history": {"id": 2, "created_at": "2024-01-01", "diagnoses": [
                    {"id": 1, "description": "Leve", "diagnosis_date": "2024-02-01", "doctor_id": 5}
                ]}}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_blank_dni_blocks_search() {
        let mut search = MedicalHistorySearch::new();
        search.dni = "   ".into();
        let mut sink = Vec::new();
        assert!(search.begin(&session(Role::Doctor), &mut sink).is_none());
        assert_eq!(sink[0].title, "Por favor, ingresa un DNI válido");
        assert_eq!(search.status(), LookupStatus::Idle);
    }

    #[test]
    fn test_missing_token_blocks_search() {
        let mut search = MedicalHistorySearch::new();
        search.dni = "81712601".into();
        let mut sink = Vec::new();
        assert!(search.begin(&Session::default(), &mut sink).is_none());
        assert_eq!(sink[0].title, "No hay token de autenticación disponible");
    }

    #[test]
    fn test_found_history() {
        let mut search = MedicalHistorySearch::new();
        search.dni = " 81712601 ".into();
        let mut sink = Vec::new();

        let request = search.begin(&session(Role::Doctor), &mut sink).unwrap();
        assert_eq!(request.dni, "81712601");
        assert!(search.is_loading());

        search.finish(Ok(envelope()), &mut sink);
        assert_eq!(search.status(), LookupStatus::Found);
        assert_eq!(search.diagnoses().len(), 1);
        assert_eq!(sink.last().unwrap().title, "Historial médico encontrado");
    }

    #[test]
    fn test_not_found_is_distinct_from_network_failure() {
        let mut sink = Vec::new();
        let mut search = MedicalHistorySearch::new();
        search.dni = "1".into();
        search.begin(&session(Role::Doctor), &mut sink).unwrap();
        search.finish(Err(ApiError::from_lookup_response(404, "")), &mut sink);

        assert_eq!(search.status(), LookupStatus::NotFound);
        assert!(search.patient().is_none());
        assert_eq!(sink[0].title, "No se encontró historial médico para este DNI");

        search.begin(&session(Role::Doctor), &mut sink).unwrap();
        search.finish(Err(ApiError::Network("refused".into())), &mut sink);
        assert_eq!(search.status(), LookupStatus::Failed);
        assert_eq!(sink[1].title, CONNECTIVITY_MESSAGE);
    }

    #[test]
    fn test_new_search_clears_previous_result() {
        let mut sink = Vec::new();
        let mut search = MedicalHistorySearch::new();
        search.dni = "1".into();
        search.begin(&session(Role::Doctor), &mut sink).unwrap();
        search.finish(Ok(envelope()), &mut sink);
        search.begin(&session(Role::Doctor), &mut sink).unwrap();
        assert!(search.patient().is_none());
        assert!(search.begin(&session(Role::Doctor), &mut sink).is_none());
    }

    #[test]
    fn test_patient_diagnoses_use_profile_id() {
        let mut sink = Vec::new();
        let mut diagnoses = PatientDiagnoses::new();
        let id = diagnoses.begin(&session(Role::Patient), &mut sink).unwrap();
        assert_eq!(id, RecordId::new("31"));

        diagnoses.finish(Ok(envelope()), &mut sink);
        assert!(sink.is_empty());
        assert_eq!(diagnoses.summary().total, 1);
        assert_eq!(diagnoses.summary().distinct_doctors, 1);
    }

    #[test]
    fn test_patient_diagnoses_server_message() {
        let mut sink = Vec::new();
        let mut diagnoses = PatientDiagnoses::new();
        diagnoses.begin(&session(Role::Patient), &mut sink).unwrap();
        diagnoses.finish(Err(ApiError::from_lookup_response(500, "{}")), &mut sink);
        assert_eq!(sink[0].title, "Error: No se pudieron obtener los diagnósticos");
        assert!(diagnoses.diagnoses().is_empty());
    }
}
