//! # Gismondi
//!
//! Client core for the Clínica Oftalmológica Gismondi dashboard: sign-in and
//! registration, the session kept on the device, role-gated navigation, the
//! diabetic-retinopathy classification workflow and the medical-history
//! views.
//!
//! The core is free of I/O. Forms and workflows expose `begin`/`finish`
//! (or `validate`/`complete`) pairs; a driver performs the HTTP call in
//! between. The browser UI drives them with `gloo-net`, the CLI with the
//! `reqwest` client in [`api::client`].
//!
//! ## Modules
//!
//! - [`session`]: session store (`token`, `user`, `profile`, `role`)
//! - [`nav`]: routes and the role-filtered sidebar
//! - [`auth`]: login and registration forms
//! - [`classify`]: image selection, classification and reports
//! - [`history`]: medical-history search and patient diagnoses
//! - [`api`]: wire types, endpoints and errors
//!
//! With the default `native` feature:
//!
//! - [`config`]: TOML configuration with `GISMONDI_*` overrides
//! - [`driver`]: async glue between the state machines and [`api::ClinicApi`]
//! - [`mock`]: in-memory development API
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gismondi::api::{Endpoints, HttpClinicClient};
//! use gismondi::auth::LoginForm;
//! use gismondi::session::{FileStore, Role, Session};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpClinicClient::new(
//!         "http://127.0.0.1:8000",
//!         Endpoints::default(),
//!         Duration::from_secs(30),
//!     )?;
//!     let mut store = FileStore::open("session.json");
//!
//!     let form = LoginForm::new("doctor@gismondi.pe", "gismondi123", Role::Doctor);
//!     let outcome = gismondi::driver::login(&api, &mut store, &form, Duration::ZERO).await;
//!     for notification in &outcome.notifications {
//!         println!("{}", notification);
//!     }
//!
//!     let session = Session::load(&mut store);
//!     println!("Signed in as {:?}", session.role);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod classify;
pub mod history;
pub mod nav;
pub mod notify;
pub mod session;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod driver;
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod mock;

// Re-export top-level types for convenience
pub use api::{ApiError, ApiResult, Endpoints, RecordId};

pub use auth::{FormOutcome, LoginForm, Redirect, RegisterForm, RegisterRequest, RoleFields};

pub use classify::{
    ClassificationWorkflow, DrLabel, ImageCandidate, PredictionResult, PreviewRegistry,
    SelectionSource, WorkflowState,
};

pub use history::{DiagnosisSummary, LookupStatus, MedicalHistorySearch, PatientDiagnoses};

pub use nav::{filter_by_role, NavItem, Route, MAIN_NAV, SECONDARY_NAV};

pub use notify::{Notification, NotificationKind, Notifier};

pub use session::{KeyValueStore, MemoryStore, Role, Session, SessionState, StoreError};

#[cfg(feature = "native")]
pub use api::{ClinicApi, HttpClinicClient};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig};
