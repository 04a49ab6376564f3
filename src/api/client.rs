//! Clinic API Client
//!
//! Native HTTP client for the clinic API. Every authenticated call sends the
//! bare session token as `Authorization: Bearer <token>`.

use async_trait::async_trait;
use reqwest::{multipart, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::dto::{
    ClassifyResponse, DniLookupRequest, LoginRequest, LoginResponse, PatientEnvelope, RecordId,
    ReportRequest,
};
use super::endpoints::{join_url, Endpoints};
use super::error::{ApiError, ApiResult};
use crate::auth::RegisterRequest;
use crate::classify::{ClassifyRequest, PredictionResult};

/// Image upload as sent by the native client
pub type ImageUpload = ClassifyRequest<Vec<u8>>;

/// Operations of the clinic API
#[async_trait]
pub trait ClinicApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse>;

    async fn register(&self, request: &RegisterRequest) -> ApiResult<()>;

    async fn classify_image(&self, token: &str, image: ImageUpload) -> ApiResult<PredictionResult>;

    async fn generate_report(&self, token: &str, request: &ReportRequest) -> ApiResult<()>;

    /// 404 maps to [`ApiError::NotFound`]
    async fn medical_history_by_dni(
        &self,
        token: &str,
        request: &DniLookupRequest,
    ) -> ApiResult<PatientEnvelope>;

    /// 404 maps to [`ApiError::NotFound`]
    async fn diagnoses_for_patient(
        &self,
        token: &str,
        patient_id: &RecordId,
    ) -> ApiResult<PatientEnvelope>;
}

/// reqwest-backed [`ClinicApi`]
#[derive(Debug, Clone)]
pub struct HttpClinicClient {
    client: Client,
    base_url: String,
    endpoints: Endpoints,
}

impl HttpClinicClient {
    pub fn new(
        base_url: impl Into<String>,
        endpoints: Endpoints,
        timeout: Duration,
    ) -> ApiResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            endpoints,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await?;
        tracing::debug!(
            status = response.status().as_u16(),
            url = %response.url(),
            "API response"
        );
        Ok(response)
    }
}

async fn error_body(response: Response) -> String {
    response.text().await.unwrap_or_default()
}

/// Decode a 2xx body or turn the answer into an error
async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    Err(ApiError::from_response(status.as_u16(), &error_body(response).await))
}

async fn decode_lookup<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    Err(ApiError::from_lookup_response(
        status.as_u16(),
        &error_body(response).await,
    ))
}

/// Status-only check for endpoints whose body the client ignores
async fn expect_success(response: Response) -> ApiResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    Err(ApiError::from_response(status.as_u16(), &error_body(response).await))
}

#[async_trait]
impl ClinicApi for HttpClinicClient {
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        let builder = self
            .client
            .post(self.url(&self.endpoints.login))
            .json(request);
        decode(self.send(builder).await?).await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<()> {
        let builder = self
            .client
            .post(self.url(&self.endpoints.register))
            .json(request);
        expect_success(self.send(builder).await?).await
    }

    async fn classify_image(&self, token: &str, image: ImageUpload) -> ApiResult<PredictionResult> {
        let part = multipart::Part::bytes(image.file)
            .file_name(image.file_name)
            .mime_str(&image.mime_type)
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        let form = multipart::Form::new().part("image", part);

        let builder = self
            .client
            .post(self.url(&self.endpoints.classify))
            .header(reqwest::header::ACCEPT, "application/json")
            .bearer_auth(token)
            .multipart(form);

        let body: ClassifyResponse = decode(self.send(builder).await?).await?;
        Ok(body.prediction)
    }

    async fn generate_report(&self, token: &str, request: &ReportRequest) -> ApiResult<()> {
        let builder = self
            .client
            .post(self.url(&self.endpoints.report))
            .bearer_auth(token)
            .json(request);
        expect_success(self.send(builder).await?).await
    }

    async fn medical_history_by_dni(
        &self,
        token: &str,
        request: &DniLookupRequest,
    ) -> ApiResult<PatientEnvelope> {
        let builder = self
            .client
            .post(self.url(&self.endpoints.history_by_dni))
            .bearer_auth(token)
            .json(request);
        decode_lookup(self.send(builder).await?).await
    }

    async fn diagnoses_for_patient(
        &self,
        token: &str,
        patient_id: &RecordId,
    ) -> ApiResult<PatientEnvelope> {
        let encoded = urlencoding::encode(patient_id.as_str());
        let path = self.endpoints.diagnoses_for_patient(&encoded);
        let builder = self.client.get(self.url(&path)).bearer_auth(token);
        decode_lookup(self.send(builder).await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{RegisterForm, RoleFields};
    use crate::classify::DrLabel;
    use crate::mock::{self, MockState, DOCTOR_TOKEN, KNOWN_DNI, PATIENT_TOKEN};
    use crate::session::Role;
    use std::net::SocketAddr;

    async fn client() -> HttpClinicClient {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let (bound, _handle) = mock::spawn(addr, MockState::with_fixtures()).await.unwrap();
        HttpClinicClient::new(
            format!("http://{}", bound),
            Endpoints::default(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn image() -> ImageUpload {
        ClassifyRequest {
            file: vec![0x89, b'P', b'N', b'G'],
            file_name: "fondo.png".into(),
            mime_type: "image/png".into(),
        }
    }

    #[tokio::test]
    async fn test_login_returns_session_material() {
        let api = client().await;
        let response = api
            .login(&LoginRequest {
                email: mock::DOCTOR_EMAIL.into(),
                password: mock::PASSWORD.into(),
                role: Role::Doctor,
            })
            .await
            .unwrap();

        assert_eq!(response.access_token, DOCTOR_TOKEN);
        assert_eq!(response.user.first_role().as_deref(), Some("doctor"));
        assert!(response.profile.and_then(|p| p.id).is_some());
    }

    #[tokio::test]
    async fn test_bad_credentials_surface_server_message() {
        let api = client().await;
        let err = api
            .login(&LoginRequest {
                email: mock::DOCTOR_EMAIL.into(),
                password: "nope".into(),
                role: Role::Doctor,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Server { status: 401, message: Some(_), .. }));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_reports_field_errors() {
        let api = client().await;
        let form = RegisterForm {
            first_name: "Ana".into(),
            last_name: "Torres".into(),
            email: mock::DOCTOR_EMAIL.into(),
            password: "secreto123".into(),
            password_confirmation: "secreto123".into(),
            fields: RoleFields::Doctor {
                cmp: "777".into(),
                specialty: "Retina".into(),
            },
        };
        let err = api.register(&form.validate().unwrap()).await.unwrap_err();
        assert_eq!(err.field_notifications("x").len(), 1);

        let mut fresh = form.clone();
        fresh.email = "nueva@gismondi.pe".into();
        api.register(&fresh.validate().unwrap()).await.unwrap();
    }

    #[tokio::test]
    async fn test_classify_requires_bearer() {
        let api = client().await;
        let prediction = api.classify_image(DOCTOR_TOKEN, image()).await.unwrap();
        assert!(prediction.label.is_known());
        assert!((0.0..=100.0).contains(&prediction.confidence));

        let err = api.classify_image("bogus", image()).await.unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_history_lookup_and_not_found() {
        let api = client().await;
        let found = api
            .medical_history_by_dni(
                DOCTOR_TOKEN,
                &DniLookupRequest {
                    dni: KNOWN_DNI.into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(found.patient.dni, KNOWN_DNI);

        let missing = api
            .medical_history_by_dni(DOCTOR_TOKEN, &DniLookupRequest { dni: "000".into() })
            .await
            .unwrap_err();
        assert!(missing.is_not_found());
    }

    #[tokio::test]
    async fn test_diagnoses_for_patient() {
        let api = client().await;
        let envelope = api
            .diagnoses_for_patient(PATIENT_TOKEN, &RecordId::from(mock::PATIENT_PROFILE_ID))
            .await
            .unwrap();
        assert!(!envelope.patient.diagnoses().is_empty());

        let err = api
            .diagnoses_for_patient(PATIENT_TOKEN, &RecordId::new("999"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_report_is_recorded() {
        let api = client().await;
        api.generate_report(
            DOCTOR_TOKEN,
            &ReportRequest {
                dni: KNOWN_DNI.into(),
                doctor_id: RecordId::from(mock::DOCTOR_PROFILE_ID),
                description: DrLabel::Mild.report_description(),
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let api = HttpClinicClient::new(
            "http://127.0.0.1:9",
            Endpoints::default(),
            Duration::from_secs(2),
        )
        .unwrap();
        let err = api
            .login(&LoginRequest {
                email: "a@b.c".into(),
                password: "x".into(),
                role: Role::Patient,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
