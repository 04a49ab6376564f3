//! Classification page state machine
//!
//! ```text
//! Idle ──select──▶ Loaded ──begin_classify──▶ Classifying
//!                    ▲                          │      │
//!                    └──────── failure ─────────┘      │ success
//!                                                      ▼
//!          ReportPending ◀──begin_report── Classified
//!                │                             ▲
//!                └─────── finish_report ───────┘
//! ```
//!
//! Network calls happen outside: `begin_*` hands back the request to send,
//! `finish_*` takes the answer. While a request is in flight, new submits,
//! selections and resets are refused.

use super::image::{ImageCandidate, PreviewRegistry, SelectionSource, MAX_IMAGE_BYTES};
use super::PredictionResult;
use crate::api::{ApiError, ReportRequest};
use crate::notify::{Notification, Notifier};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Loaded,
    Classifying,
    Classified,
    ReportPending,
}

impl WorkflowState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, WorkflowState::Classifying | WorkflowState::ReportPending)
    }
}

/// The image currently selected
#[derive(Debug, Clone)]
pub struct SelectedImage<F> {
    pub candidate: ImageCandidate,
    pub file: F,
    pub preview_url: Option<String>,
}

/// Multipart upload to send for classification
#[derive(Debug, Clone)]
pub struct ClassifyRequest<F> {
    pub file: F,
    pub file_name: String,
    pub mime_type: String,
}

pub struct ClassificationWorkflow<F, P> {
    state: WorkflowState,
    image: Option<SelectedImage<F>>,
    prediction: Option<PredictionResult>,
    report_dialog_open: bool,
    report_dni: String,
    max_bytes: u64,
    previews: P,
}

impl<F: Clone, P: PreviewRegistry<F>> ClassificationWorkflow<F, P> {
    pub fn new(previews: P) -> Self {
        Self {
            state: WorkflowState::Idle,
            image: None,
            prediction: None,
            report_dialog_open: false,
            report_dni: String::new(),
            max_bytes: MAX_IMAGE_BYTES,
            previews,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    // ============================================
    // SELECTION
    // ============================================

    /// Accept a picked or dropped file. Returns whether it was taken.
    ///
    /// A rejected file leaves image, preview and prediction untouched and
    /// emits exactly one notification.
    pub fn select_image(
        &mut self,
        candidate: ImageCandidate,
        file: F,
        source: SelectionSource,
        notifier: &mut dyn Notifier,
    ) -> bool {
        if self.state.is_in_flight() {
            notifier.notify(Notification::info(
                "Espera a que termine la solicitud en curso",
            ));
            return false;
        }

        if let Err(rejection) = candidate.validate(self.max_bytes) {
            tracing::debug!(?source, name = %candidate.name, "Image rejected: {}", rejection);
            notifier.notify(Notification::error(rejection.to_string()));
            return false;
        }

        self.release_preview();
        let preview_url = self.previews.create(&file);
        if preview_url.is_none() {
            tracing::warn!(name = %candidate.name, "Could not create image preview");
        }

        tracing::debug!(?source, name = %candidate.name, size = candidate.size, "Image selected");
        self.image = Some(SelectedImage {
            candidate,
            file,
            preview_url,
        });
        self.prediction = None;
        self.report_dialog_open = false;
        self.state = WorkflowState::Loaded;
        true
    }

    // ============================================
    // CLASSIFICATION
    // ============================================

    /// Start a classification; `None` when there is nothing to send
    pub fn begin_classify(&mut self, notifier: &mut dyn Notifier) -> Option<ClassifyRequest<F>> {
        if self.state.is_in_flight() {
            return None;
        }

        let Some(image) = &self.image else {
            notifier.notify(Notification::error("Por favor, selecciona una imagen primero"));
            return None;
        };

        let request = ClassifyRequest {
            file: image.file.clone(),
            file_name: image.candidate.name.clone(),
            mime_type: image.candidate.mime_type.clone(),
        };

        self.prediction = None;
        self.report_dialog_open = false;
        self.state = WorkflowState::Classifying;
        Some(request)
    }

    pub fn finish_classify(
        &mut self,
        result: Result<PredictionResult, ApiError>,
        notifier: &mut dyn Notifier,
    ) {
        if self.state != WorkflowState::Classifying {
            tracing::warn!(state = ?self.state, "Classification answer without a pending request");
            return;
        }

        match result {
            Ok(prediction) => {
                tracing::info!(
                    label = %prediction.label,
                    confidence = prediction.confidence,
                    "Image classified"
                );
                self.prediction = Some(prediction);
                self.state = WorkflowState::Classified;
                notifier.notify(Notification::success("Imagen clasificada exitosamente"));
            }
            Err(err) => {
                tracing::warn!("Classification failed: {}", err);
                self.prediction = None;
                self.state = WorkflowState::Loaded;
                notifier.notify(err.notification("No se pudo clasificar la imagen"));
            }
        }
    }

    // ============================================
    // REPORT
    // ============================================

    pub fn open_report_dialog(&mut self, notifier: &mut dyn Notifier) -> bool {
        if self.prediction.is_none() {
            notifier.notify(Notification::error("Primero debes clasificar una imagen"));
            return false;
        }
        self.report_dialog_open = true;
        true
    }

    pub fn close_report_dialog(&mut self) {
        if self.state != WorkflowState::ReportPending {
            self.report_dialog_open = false;
        }
    }

    pub fn set_report_dni(&mut self, dni: impl Into<String>) {
        self.report_dni = dni.into();
    }

    /// Build the report request for the current prediction
    pub fn begin_report(
        &mut self,
        session: &Session,
        notifier: &mut dyn Notifier,
    ) -> Option<ReportRequest> {
        if self.state.is_in_flight() {
            return None;
        }

        let dni = self.report_dni.trim();
        if dni.is_empty() {
            notifier.notify(Notification::error("Por favor, ingresa el DNI del paciente"));
            return None;
        }

        let Some(prediction) = &self.prediction else {
            notifier.notify(Notification::error("Primero debes clasificar una imagen"));
            return None;
        };

        let Some(doctor_id) = session.doctor_id() else {
            notifier.notify(Notification::error(
                "No se pudo obtener la información del médico",
            ));
            return None;
        };

        let request = ReportRequest {
            dni: dni.to_string(),
            doctor_id: doctor_id.clone(),
            description: prediction.label.report_description(),
        };

        self.report_dialog_open = true;
        self.state = WorkflowState::ReportPending;
        Some(request)
    }

    pub fn finish_report<T>(&mut self, result: Result<T, ApiError>, notifier: &mut dyn Notifier) {
        if self.state != WorkflowState::ReportPending {
            tracing::warn!(state = ?self.state, "Report answer without a pending request");
            return;
        }

        self.state = WorkflowState::Classified;
        match result {
            Ok(_) => {
                tracing::info!("Report generated");
                self.report_dialog_open = false;
                self.report_dni.clear();
                notifier.notify(Notification::success("Reporte generado exitosamente"));
            }
            Err(err) => {
                tracing::warn!("Report generation failed: {}", err);
                notifier.notify(err.notification("No se pudo generar el reporte"));
            }
        }
    }

    // ============================================
    // RESET
    // ============================================

    /// Back to `Idle`, releasing the preview. Refused while a request is in
    /// flight.
    pub fn reset(&mut self) -> bool {
        if self.state.is_in_flight() {
            return false;
        }
        self.release_preview();
        self.image = None;
        self.prediction = None;
        self.report_dialog_open = false;
        self.report_dni.clear();
        self.state = WorkflowState::Idle;
        true
    }

    fn release_preview(&mut self) {
        if let Some(url) = self.image.as_mut().and_then(|img| img.preview_url.take()) {
            self.previews.revoke(&url);
        }
    }

    // ============================================
    // ACCESSORS
    // ============================================

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_in_flight()
    }

    pub fn image(&self) -> Option<&SelectedImage<F>> {
        self.image.as_ref()
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.image.as_ref().and_then(|img| img.preview_url.as_deref())
    }

    pub fn prediction(&self) -> Option<&PredictionResult> {
        self.prediction.as_ref()
    }

    pub fn report_dialog_open(&self) -> bool {
        self.report_dialog_open
    }

    pub fn report_dni(&self) -> &str {
        &self.report_dni
    }

    pub fn previews(&self) -> &P {
        &self.previews
    }
}
