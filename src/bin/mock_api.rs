//! Gismondi Mock API
//!
//! In-memory stand-in for the clinic API, for local development of the UI
//! and CLI.
//!
//! Run with: cargo run --bin gismondi-mock-api
//!
//! # Configuration
//!
//! Read from `config.toml` (see `gismondi config`), then environment:
//! - `GISMONDI_MOCK_HOST`: Host to bind to (default: 127.0.0.1)
//! - `GISMONDI_MOCK_PORT`: Port to listen on (default: 8000)
//! - `RUST_LOG`: Log filter (default: gismondi=info,tower_http=debug)
//!
//! # Seeded accounts
//!
//! Both use the password `gismondi123`:
//! - `doctor@gismondi.pe` (doctor)
//! - `paciente@gismondi.pe` (patient, DNI 81712601)

use gismondi::config::Config;
use gismondi::logging;
use gismondi::mock::{self, MockState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    logging::init(&config.logging, "tower_http=debug");

    tracing::info!("Starting Gismondi mock API v{}", env!("CARGO_PKG_VERSION"));

    let addr = config.mock.addr()?;
    let state = MockState::with_fixtures();
    tracing::info!(
        "Seeded accounts: {} / {} (password: {})",
        mock::DOCTOR_EMAIL,
        mock::PATIENT_EMAIL,
        mock::PASSWORD
    );

    mock::serve(addr, state, &config.endpoints).await?;

    tracing::info!("Gismondi mock API stopped");
    Ok(())
}
