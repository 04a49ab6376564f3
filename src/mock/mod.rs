//! Development Clinic API
//!
//! A small in-memory stand-in for the clinic API, built with Axum. It
//! serves the same six endpoints as the real backend with canned data so
//! the UI and CLI can be exercised locally, and it backs the HTTP client
//! tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use gismondi::api::Endpoints;
//! use gismondi::mock::{serve, MockState};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let addr = "127.0.0.1:8000".parse().unwrap();
//!     serve(addr, MockState::with_fixtures(), &Endpoints::default()).await
//! }
//! ```

pub mod error;
pub mod routes;
pub mod state;

pub use error::{MockError, MockResult};
pub use state::{
    Account, MockState, DOCTOR_EMAIL, DOCTOR_PROFILE_ID, DOCTOR_TOKEN, KNOWN_DNI, PASSWORD,
    PATIENT_EMAIL, PATIENT_PROFILE_ID, PATIENT_TOKEN,
};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::task::JoinHandle;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::Endpoints;
use crate::classify::MAX_IMAGE_BYTES;

/// Build the router with every endpoint mounted at its configured path
pub fn build_router(state: MockState, endpoints: &Endpoints) -> Router {
    Router::new()
        .route(&endpoints.login, post(routes::login))
        .route(&endpoints.register, post(routes::register))
        .route(&endpoints.report, post(routes::generate_report))
        .route(&endpoints.history_by_dni, post(routes::history_by_dni))
        .route(&endpoints.diagnoses_by_patient, get(routes::diagnoses_by_patient))
        // Room for a 10 MiB image plus multipart framing
        .route(
            &endpoints.classify,
            post(routes::classify_image)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES as usize + 64 * 1024)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the mock API until Ctrl+C / SIGTERM
pub async fn serve(addr: SocketAddr, state: MockState, endpoints: &Endpoints) -> std::io::Result<()> {
    let router = build_router(state, endpoints);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Gismondi mock API listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gismondi mock API shut down gracefully");
    Ok(())
}

/// Serve in a background task with the default endpoints; returns the bound
/// address (useful with port 0)
pub async fn spawn(
    addr: SocketAddr,
    state: MockState,
) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
    let router = build_router(state, &Endpoints::default());
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!("Mock API task failed: {}", e);
        }
    });

    tracing::debug!("Mock API spawned on {}", bound);
    Ok((bound, handle))
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn app() -> Router {
        build_router(MockState::with_fixtures(), &Endpoints::default())
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_login_ok() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/login")
                    .header("Content-Type", "application/json")
                    .body(Body::from(format!(
                        r#"{{"email": "{}", "password": "{}", "role": "patient"}}"#,
                        PATIENT_EMAIL, PASSWORD
                    )))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["access_token"], PATIENT_TOKEN);
        assert_eq!(body["profile"]["id"], PATIENT_PROFILE_ID);
    }

    #[tokio::test]
    async fn test_login_wrong_role_is_forbidden() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/login")
                    .header("Content-Type", "application/json")
                    .body(Body::from(format!(
                        r#"{{"email": "{}", "password": "{}", "role": "doctor"}}"#,
                        PATIENT_EMAIL, PASSWORD
                    )))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(body_json(response).await["message"].is_string());
    }

    #[tokio::test]
    async fn test_history_requires_token() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/medical-histories/showByDni")
                    .header("Content-Type", "application/json")
                    .body(Body::from(format!(r#"{{"dni": "{}"}}"#, KNOWN_DNI)))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_dni_is_404() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/medical-histories/showByDni")
                    .header("Content-Type", "application/json")
                    .header("Authorization", format!("Bearer {}", DOCTOR_TOKEN))
                    .body(Body::from(r#"{"dni": "00000000"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_diagnoses_by_patient() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/diagnoses/patient/{}", PATIENT_PROFILE_ID))
                    .header("Authorization", format!("Bearer {}", PATIENT_TOKEN))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["patient"]["dni"], KNOWN_DNI);
    }

    #[tokio::test]
    async fn test_register_validation_errors_map() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/register")
                    .header("Content-Type", "application/json")
                    .body(Body::from(format!(
                        r#"{{"first_name": "A", "last_name": "B", "email": "x@y.z",
                            "password": "secreto123", "password_confirmation": "secreto123",
                            "role": "patient",
                            "patient_fields": {{"dni": "{}", "birth_date": "1990-01-01"}}}}"#,
                        KNOWN_DNI
                    )))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["errors"]["dni"][0], "El DNI ya está registrado.");
    }

    #[tokio::test]
    async fn test_patient_cannot_classify() {
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"a.png\"\r\nContent-Type: image/png\r\n\r\nPNG\r\n--{b}--\r\n",
            b = boundary
        );
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/classify-image")
                    .header(
                        "Content-Type",
                        format!("multipart/form-data; boundary={}", boundary),
                    )
                    .header("Authorization", format!("Bearer {}", PATIENT_TOKEN))
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
