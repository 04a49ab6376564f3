//! HTTP API Client
//!
//! `gloo-net` calls to the clinic API. Errors use the core [`ApiError`]
//! taxonomy so forms and workflows handle them the same way as natively.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use gismondi::api::{
    join_url, ApiError, ApiResult, ClassifyResponse, DniLookupRequest, Endpoints, LoginRequest,
    LoginResponse, PatientEnvelope, RecordId, ReportRequest,
};
use gismondi::auth::RegisterRequest;
use gismondi::classify::{ClassifyRequest, PredictionResult};

use crate::state::get_api_base;

/// Upload handed to [`WebClient::classify_image`]
pub type BrowserUpload = ClassifyRequest<web_sys::File>;

/// Clinic API client for the browser
#[derive(Debug, Clone)]
pub struct WebClient {
    base_url: String,
    endpoints: Endpoints,
}

impl WebClient {
    pub fn new(base_url: impl Into<String>, endpoints: Endpoints) -> Self {
        Self {
            base_url: base_url.into(),
            endpoints,
        }
    }

    /// Client for the API base stored in local storage
    pub fn from_storage() -> Self {
        Self::new(get_api_base(), Endpoints::default())
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder
            .header("Authorization", &format!("Bearer {}", token))
            .header("Accept", "application/json")
    }

    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        let request = Request::post(&self.url(&self.endpoints.login))
            .header("Accept", "application/json")
            .json(request)
            .map_err(network)?;
        decode(send(request).await?, false).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<()> {
        let request = Request::post(&self.url(&self.endpoints.register))
            .header("Accept", "application/json")
            .json(request)
            .map_err(network)?;
        expect_success(send(request).await?).await
    }

    /// Multipart upload with the file in the `image` part
    pub async fn classify_image(
        &self,
        token: &str,
        upload: BrowserUpload,
    ) -> ApiResult<PredictionResult> {
        let form = web_sys::FormData::new().map_err(js_network)?;
        form.append_with_blob_and_filename("image", &upload.file, &upload.file_name)
            .map_err(js_network)?;

        let request = Self::authorized(Request::post(&self.url(&self.endpoints.classify)), token)
            .body(form)
            .map_err(network)?;
        let response: ClassifyResponse = decode(send(request).await?, false).await?;
        Ok(response.prediction)
    }

    pub async fn generate_report(&self, token: &str, request: &ReportRequest) -> ApiResult<()> {
        let request = Self::authorized(Request::post(&self.url(&self.endpoints.report)), token)
            .json(request)
            .map_err(network)?;
        expect_success(send(request).await?).await
    }

    pub async fn medical_history_by_dni(
        &self,
        token: &str,
        request: &DniLookupRequest,
    ) -> ApiResult<PatientEnvelope> {
        let request =
            Self::authorized(Request::post(&self.url(&self.endpoints.history_by_dni)), token)
                .json(request)
                .map_err(network)?;
        decode(send(request).await?, true).await
    }

    pub async fn diagnoses_for_patient(
        &self,
        token: &str,
        patient_id: &RecordId,
    ) -> ApiResult<PatientEnvelope> {
        let encoded = String::from(js_sys::encode_uri_component(patient_id.as_str()));
        let path = self.endpoints.diagnoses_for_patient(&encoded);
        let response = Self::authorized(Request::get(&self.url(&path)), token)
            .send()
            .await
            .map_err(network)?;
        decode(response, true).await
    }
}

fn network(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

fn js_network(err: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Network(format!("{:?}", err))
}

async fn send(request: Request) -> ApiResult<Response> {
    request.send().await.map_err(network)
}

/// Error for a non-2xx response; lookups map 404 to `NotFound`
async fn failure(response: Response, lookup: bool) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    web_sys::console::warn_1(&format!("API answered {}: {}", status, body).into());
    if lookup {
        ApiError::from_lookup_response(status, &body)
    } else {
        ApiError::from_response(status, &body)
    }
}

async fn decode<T: DeserializeOwned>(response: Response, lookup: bool) -> ApiResult<T> {
    if !response.ok() {
        return Err(failure(response, lookup).await);
    }
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn expect_success(response: Response) -> ApiResult<()> {
    if response.ok() {
        Ok(())
    } else {
        Err(failure(response, false).await)
    }
}
