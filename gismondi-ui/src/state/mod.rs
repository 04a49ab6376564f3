//! State Management
//!
//! Global reactive state and browser-backed storage.

pub mod global;
pub mod storage;

pub use global::{provide_global_state, GlobalState, Toast};
pub use storage::{get_api_base, set_api_base, LocalStorage, ObjectUrls};
