//! Gismondi Clinic Web App
//!
//! Client-side rendered Leptos front-end for the Gismondi ophthalmology
//! clinic: landing page, sign-in and registration, and a role-gated
//! dashboard with the diabetic-retinopathy classifier, medical-history
//! search and the patient's own diagnoses.
//!
//! All business rules live in the `gismondi` core crate; this crate renders
//! its state machines and talks to the clinic API with `gloo-net`.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(|| view! { <app::App /> });
}
