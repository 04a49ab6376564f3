//! Native Drivers
//!
//! Glue between the sans-IO form and workflow state machines and a
//! [`ClinicApi`] implementation. Each driver runs the client-side checks,
//! performs at most one API call and feeds the answer back.

use std::time::Duration;

use crate::api::ClinicApi;
use crate::auth::{FormOutcome, LoginForm, RegisterForm};
use crate::classify::{ClassificationWorkflow, PreviewRegistry};
use crate::history::{MedicalHistorySearch, PatientDiagnoses};
use crate::notify::Notifier;
use crate::session::{KeyValueStore, Session};

/// Submit the login form; on success the session is persisted to `store`
pub async fn login<A, S>(
    api: &A,
    store: &mut S,
    form: &LoginForm,
    redirect_delay: Duration,
) -> FormOutcome
where
    A: ClinicApi + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let request = match form.validate() {
        Ok(request) => request,
        Err(notification) => return FormOutcome::failed(vec![notification]),
    };

    tracing::debug!(email = %request.email, role = %request.role, "Submitting login");
    let result = api.login(&request).await;
    form.complete(store, result, redirect_delay)
}

/// Submit the registration form
pub async fn register<A>(api: &A, form: &RegisterForm, redirect_delay: Duration) -> FormOutcome
where
    A: ClinicApi + ?Sized,
{
    let request = match form.validate() {
        Ok(request) => request,
        Err(notification) => return FormOutcome::failed(vec![notification]),
    };

    tracing::debug!(email = %request.email, role = %request.role, "Submitting registration");
    let result = api.register(&request).await;
    form.complete(result, redirect_delay)
}

/// Classify the selected image
pub async fn classify<A, P>(
    api: &A,
    session: &Session,
    workflow: &mut ClassificationWorkflow<Vec<u8>, P>,
    notifier: &mut dyn Notifier,
) where
    A: ClinicApi + ?Sized,
    P: PreviewRegistry<Vec<u8>>,
{
    let Some(request) = workflow.begin_classify(notifier) else {
        return;
    };

    let result = match session.bearer() {
        Ok(token) => api.classify_image(token, request).await,
        Err(e) => Err(e),
    };
    workflow.finish_classify(result, notifier);
}

/// Generate a report for the current prediction
pub async fn report<A, P>(
    api: &A,
    session: &Session,
    workflow: &mut ClassificationWorkflow<Vec<u8>, P>,
    notifier: &mut dyn Notifier,
) where
    A: ClinicApi + ?Sized,
    P: PreviewRegistry<Vec<u8>>,
{
    let Some(request) = workflow.begin_report(session, notifier) else {
        return;
    };

    let result = match session.bearer() {
        Ok(token) => api.generate_report(token, &request).await,
        Err(e) => Err(e),
    };
    workflow.finish_report(result, notifier);
}

/// Doctor lookup by DNI
pub async fn search_history<A>(
    api: &A,
    session: &Session,
    search: &mut MedicalHistorySearch,
    notifier: &mut dyn Notifier,
) where
    A: ClinicApi + ?Sized,
{
    let Some(request) = search.begin(session, notifier) else {
        return;
    };

    let result = match session.bearer() {
        Ok(token) => api.medical_history_by_dni(token, &request).await,
        Err(e) => Err(e),
    };
    search.finish(result, notifier);
}

/// Patient's own diagnoses
pub async fn load_diagnoses<A>(
    api: &A,
    session: &Session,
    diagnoses: &mut PatientDiagnoses,
    notifier: &mut dyn Notifier,
) where
    A: ClinicApi + ?Sized,
{
    let Some(patient_id) = diagnoses.begin(session, notifier) else {
        return;
    };

    let result = match session.bearer() {
        Ok(token) => api.diagnoses_for_patient(token, &patient_id).await,
        Err(e) => Err(e),
    };
    diagnoses.finish(result, notifier);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        ApiError, ApiResult, DniLookupRequest, ImageUpload, LoginRequest, LoginResponse,
        PatientEnvelope, RecordId, ReportRequest,
    };
    use crate::auth::{RegisterRequest, RoleFields};
    use crate::classify::{
        DrLabel, ImageCandidate, InMemoryPreviews, PredictionResult, SelectionSource,
        WorkflowState,
    };
    use crate::history::LookupStatus;
    use crate::nav::Route;
    use crate::session::{MemoryStore, Role, PROFILE_KEY, ROLE_KEY, TOKEN_KEY, USER_KEY};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeApi {
        calls: AtomicUsize,
        fail_lookups: bool,
    }

    impl FakeApi {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn hit(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl ClinicApi for FakeApi {
        async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
            self.hit();
            let body = format!(
                r#"{{"user": {{"id": 1, "email": "{}", "roles": ["{}"]}},
                    "access_token": "fake-token", "profile": {{"id": 12}}}}"#,
                request.email, request.role
            );
            Ok(serde_json::from_str(&body).unwrap())
        }

        async fn register(&self, _request: &RegisterRequest) -> ApiResult<()> {
            self.hit();
            Ok(())
        }

        async fn classify_image(&self, token: &str, _image: ImageUpload) -> ApiResult<PredictionResult> {
            self.hit();
            assert_eq!(token, "fake-token");
            Ok(PredictionResult {
                label: DrLabel::Severe,
                confidence: 91.2,
            })
        }

        async fn generate_report(&self, _token: &str, request: &ReportRequest) -> ApiResult<()> {
            self.hit();
            assert_eq!(request.doctor_id, RecordId::new("12"));
            Ok(())
        }

        async fn medical_history_by_dni(
            &self,
            _token: &str,
            _request: &DniLookupRequest,
        ) -> ApiResult<PatientEnvelope> {
            self.hit();
            Err(ApiError::NotFound)
        }

        async fn diagnoses_for_patient(
            &self,
            _token: &str,
            _patient_id: &RecordId,
        ) -> ApiResult<PatientEnvelope> {
            self.hit();
            if self.fail_lookups {
                return Err(ApiError::Network("down".into()));
            }
            Ok(serde_json::from_str(
                r#"{"patient": {"id": 12, "birth_date": "1990-01-01", "dni": "1"}}"#,
            )
            .unwrap())
        }
    }

    async fn signed_in(api: &FakeApi, role: Role) -> (MemoryStore, Session) {
        let mut store = MemoryStore::new();
        let form = LoginForm::new("doc@example.com", "secret", role);
        let outcome = login(api, &mut store, &form, Duration::ZERO).await;
        assert!(outcome.is_success());
        let session = Session::load(&mut store);
        (store, session)
    }

    #[tokio::test]
    async fn test_login_end_to_end() {
        let api = FakeApi::default();
        let mut store = MemoryStore::new();
        let form = LoginForm::new("doc@example.com", "secret", Role::Doctor);

        let outcome = login(&api, &mut store, &form, Duration::from_millis(2000)).await;

        assert_eq!(api.calls(), 1);
        for key in [TOKEN_KEY, USER_KEY, PROFILE_KEY, ROLE_KEY] {
            assert!(store.get(key).is_some());
        }
        let redirect = outcome.redirect.unwrap();
        assert_eq!(redirect.route, Route::Dashboard);
        assert_eq!(redirect.delay, Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_password_mismatch_makes_no_call() {
        let api = FakeApi::default();
        let form = RegisterForm {
            first_name: "A".into(),
            last_name: "B".into(),
            email: "a@b.c".into(),
            password: "uno".into(),
            password_confirmation: "dos".into(),
            fields: RoleFields::empty(Role::Patient),
        };

        let outcome = register(&api, &form, Duration::ZERO).await;

        assert_eq!(api.calls(), 0);
        assert!(!outcome.is_success());
        assert_eq!(outcome.notifications[0].title, "Las contraseñas no coinciden");
    }

    #[tokio::test]
    async fn test_classify_then_report() {
        let api = FakeApi::default();
        let (_store, session) = signed_in(&api, Role::Doctor).await;
        let mut workflow = ClassificationWorkflow::new(InMemoryPreviews::new());
        let mut sink = Vec::new();

        workflow.select_image(
            ImageCandidate::new("ojo.jpg", "image/jpeg", 3),
            vec![1, 2, 3],
            SelectionSource::Picker,
            &mut sink,
        );
        classify(&api, &session, &mut workflow, &mut sink).await;
        assert_eq!(workflow.state(), WorkflowState::Classified);

        workflow.open_report_dialog(&mut sink);
        workflow.set_report_dni("81712601");
        report(&api, &session, &mut workflow, &mut sink).await;

        assert_eq!(api.calls(), 3);
        assert!(!workflow.report_dialog_open());
        assert_eq!(sink.last().unwrap().title, "Reporte generado exitosamente");
    }

    #[tokio::test]
    async fn test_classify_without_token_fails_locally() {
        let api = FakeApi::default();
        let mut workflow = ClassificationWorkflow::new(InMemoryPreviews::new());
        let mut sink = Vec::new();
        workflow.select_image(
            ImageCandidate::new("ojo.jpg", "image/jpeg", 3),
            vec![1],
            SelectionSource::Drop,
            &mut sink,
        );

        classify(&api, &Session::default(), &mut workflow, &mut sink).await;

        assert_eq!(api.calls(), 0);
        assert_eq!(workflow.state(), WorkflowState::Loaded);
        assert_eq!(sink[0].title, "No hay token de autenticación disponible");
    }

    #[tokio::test]
    async fn test_history_not_found() {
        let api = FakeApi::default();
        let (_store, session) = signed_in(&api, Role::Doctor).await;
        let mut search = MedicalHistorySearch::new();
        search.dni = "000".into();
        let mut sink = Vec::new();

        search_history(&api, &session, &mut search, &mut sink).await;

        assert_eq!(search.status(), LookupStatus::NotFound);
        assert!(search.patient().is_none());
    }

    #[tokio::test]
    async fn test_diagnoses_network_failure() {
        let api = FakeApi {
            fail_lookups: true,
            ..FakeApi::default()
        };
        let (_store, session) = signed_in(&api, Role::Patient).await;
        let mut diagnoses = PatientDiagnoses::new();
        let mut sink = Vec::new();

        load_diagnoses(&api, &session, &mut diagnoses, &mut sink).await;

        assert_eq!(diagnoses.status(), LookupStatus::Failed);
        assert_eq!(sink.len(), 1);
    }
}
