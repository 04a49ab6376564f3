//! Page Components
//!
//! Top-level route views.

pub mod classifier;
pub mod dashboard;
pub mod diagnoses;
pub mod help;
pub mod landing;
pub mod login;
pub mod medical_history;
pub mod register;
pub mod settings;

pub use classifier::Classifier;
pub use dashboard::Dashboard;
pub use diagnoses::Diagnoses;
pub use help::Help;
pub use landing::Landing;
pub use login::Login;
pub use medical_history::MedicalHistory;
pub use register::Register;
pub use settings::Settings;
