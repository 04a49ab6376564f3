//! Diabetic-Retinopathy Classification
//!
//! Image selection, the classify/report state machine and the display
//! tables for the five retinopathy grades.

mod image;
mod labels;
mod workflow;

pub use image::{
    mime_from_extension, ImageCandidate, ImageRejection, InMemoryPreviews, PreviewRegistry,
    SelectionSource, MAX_IMAGE_BYTES,
};
pub use labels::{confidence_color, format_confidence, Color, DrLabel, LabelInfo};
pub use workflow::{
    ClassificationWorkflow, ClassifyRequest, SelectedImage, WorkflowState,
};

use serde::{Deserialize, Serialize};

/// Classifier answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: DrLabel,
    /// Percentage in [0, 100]
    pub confidence: f64,
}

impl PredictionResult {
    pub fn confidence_color(&self) -> Color {
        confidence_color(self.confidence)
    }

    pub fn confidence_text(&self) -> String {
        format_confidence(self.confidence)
    }
}
