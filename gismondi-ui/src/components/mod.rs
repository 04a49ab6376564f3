//! UI Components
//!
//! Reusable Leptos components for the landing page and dashboard.

pub mod form;
pub mod loading;
pub mod navbar;
pub mod sidebar;
pub mod toast;

pub use form::{RoleSelect, TextField};
pub use loading::{InlineLoading, Loading};
pub use navbar::Navbar;
pub use sidebar::Sidebar;
pub use toast::Toasts;
