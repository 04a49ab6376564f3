//! Clinic API
//!
//! Wire types, endpoint paths and the error taxonomy shared by every
//! client of the clinic API. The native HTTP client lives behind the
//! `native` feature; the browser UI talks to the same endpoints through
//! `gloo-net`.
//!
//! # Endpoints
//!
//! - `POST /api/auth/login` - Sign in, returns `{user, access_token, profile}`
//! - `POST /api/auth/register` - Create an account
//! - `POST /api/classify-image` - Multipart `image` upload (bearer)
//! - `POST /api/generate-report` - `{dni, doctor_id, description}` (bearer)
//! - `POST /api/medical-histories/showByDni` - `{dni}` (bearer)
//! - `GET /api/diagnoses/patient/:patientId` - (bearer)

pub mod dto;
pub mod endpoints;
pub mod error;

#[cfg(feature = "native")]
pub mod client;

pub use dto::{
    ClassifyResponse, Diagnosis, DniLookupRequest, Doctor, LoginRequest, LoginResponse,
    MedicalHistory, Patient, PatientEnvelope, Profile, RecordId, ReportRequest, User,
};
pub use endpoints::{join_url, Endpoints, DEFAULT_API_BASE, PATIENT_ID_PLACEHOLDER};
pub use error::{ApiError, ApiResult, ErrorBody};

#[cfg(feature = "native")]
pub use client::{ClinicApi, HttpClinicClient, ImageUpload};
