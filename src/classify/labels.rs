//! Retinopathy grades and their display texts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display color, mapped to a CSS class by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Green,
    Blue,
    Yellow,
    Orange,
    Red,
    Gray,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
            Color::Red => "red",
            Color::Gray => "gray",
        }
    }

    /// Tailwind-style background class
    pub fn bg_class(&self) -> &'static str {
        match self {
            Color::Green => "bg-green-500",
            Color::Blue => "bg-blue-500",
            Color::Yellow => "bg-yellow-500",
            Color::Orange => "bg-orange-500",
            Color::Red => "bg-red-500",
            Color::Gray => "bg-gray-500",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diabetic-retinopathy grade returned by the classifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DrLabel {
    NoDr,
    Mild,
    Moderate,
    Severe,
    ProliferateDr,
    /// Code the client does not know about, kept verbatim
    Unknown(String),
}

/// Everything shown for one grade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelInfo {
    pub text: &'static str,
    pub description: &'static str,
    pub color: Color,
    pub recommendations: [&'static str; 3],
    pub report_description: &'static str,
}

const NO_DR: LabelInfo = LabelInfo {
    text: "Sin Retinopatía Diabética",
    description: "No se detectaron signos de retinopatía diabética",
    color: Color::Green,
    recommendations: [
        "✅ Continúa con tus chequeos regulares anuales",
        "✅ Mantén un buen control de tus niveles de glucosa",
        "✅ Sigue un estilo de vida saludable",
    ],
    report_description: "El análisis de retinopatía diabética no muestra signos de la enfermedad. Se recomienda continuar con controles anuales y mantener un buen control glucémico.",
};

const MILD: LabelInfo = LabelInfo {
    text: "Retinopatía Leve",
    description: "Etapa temprana de retinopatía diabética",
    color: Color::Blue,
    recommendations: [
        "🟡 Programa un seguimiento en 6-12 meses",
        "🟡 Controla cuidadosamente tu diabetes",
        "🟡 Consulta con tu oftalmólogo",
    ],
    report_description: "Se detectaron microaneurismas característicos de retinopatía diabética leve. Se sugiere seguimiento en 6-12 meses y control estricto de la diabetes.",
};

const MODERATE: LabelInfo = LabelInfo {
    text: "Retinopatía Moderada",
    description: "Etapa moderada que requiere seguimiento",
    color: Color::Yellow,
    recommendations: [
        "🟠 Consulta con un especialista en 3-6 meses",
        "🟠 Considera tratamiento preventivo",
        "🟠 Monitorea tu visión regularmente",
    ],
    report_description: "Presencia de microaneurismas, hemorragias puntiformes y exudados duros. Etapa moderada que requiere seguimiento cada 3-6 meses y posible tratamiento.",
};

const SEVERE: LabelInfo = LabelInfo {
    text: "Retinopatía Severa",
    description: "Etapa avanzada que necesita atención médica",
    color: Color::Orange,
    recommendations: [
        "🔴 Busca atención médica inmediata",
        "🔴 Tratamiento con láser puede ser necesario",
        "🔴 Seguimiento estrecho requerido",
    ],
    report_description: "Múltiples hemorragias en forma de mancha, anomalías microvasculares intraretinianas. Etapa severa que necesita intervención médica y seguimiento cercano.",
};

const PROLIFERATE_DR: LabelInfo = LabelInfo {
    text: "Retinopatía Proliferativa",
    description: "Etapa más avanzada, requiere tratamiento urgente",
    color: Color::Red,
    recommendations: [
        "🚨 Tratamiento urgente necesario",
        "🚨 Alto riesgo de pérdida de visión",
        "🚨 Intervención médica inmediata",
    ],
    report_description: "Presencia de neovasos, hemorragias vítreas y tejido fibroso. Etapa proliferativa que requiere tratamiento urgente con láser o intervención quirúrgica.",
};

impl DrLabel {
    /// The five known grades, mildest first
    pub const KNOWN: [DrLabel; 5] = [
        DrLabel::NoDr,
        DrLabel::Mild,
        DrLabel::Moderate,
        DrLabel::Severe,
        DrLabel::ProliferateDr,
    ];

    pub fn parse(code: &str) -> Self {
        match code {
            "No_DR" => DrLabel::NoDr,
            "Mild" => DrLabel::Mild,
            "Moderate" => DrLabel::Moderate,
            "Severe" => DrLabel::Severe,
            "Proliferate_DR" => DrLabel::ProliferateDr,
            other => DrLabel::Unknown(other.to_string()),
        }
    }

    /// Wire code as the classifier sends it
    pub fn code(&self) -> &str {
        match self {
            DrLabel::NoDr => "No_DR",
            DrLabel::Mild => "Mild",
            DrLabel::Moderate => "Moderate",
            DrLabel::Severe => "Severe",
            DrLabel::ProliferateDr => "Proliferate_DR",
            DrLabel::Unknown(code) => code,
        }
    }

    pub fn info(&self) -> Option<&'static LabelInfo> {
        match self {
            DrLabel::NoDr => Some(&NO_DR),
            DrLabel::Mild => Some(&MILD),
            DrLabel::Moderate => Some(&MODERATE),
            DrLabel::Severe => Some(&SEVERE),
            DrLabel::ProliferateDr => Some(&PROLIFERATE_DR),
            DrLabel::Unknown(_) => None,
        }
    }

    /// Display text; unknown codes are shown raw
    pub fn display_text(&self) -> &str {
        self.info().map(|i| i.text).unwrap_or_else(|| self.code())
    }

    pub fn description(&self) -> &str {
        self.info().map(|i| i.description).unwrap_or("")
    }

    pub fn color(&self) -> Color {
        self.info().map(|i| i.color).unwrap_or(Color::Gray)
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        match self.info() {
            Some(info) => &info.recommendations,
            None => &[],
        }
    }

    /// Text sent as the diagnosis description when a report is generated
    pub fn report_description(&self) -> String {
        match self.info() {
            Some(info) => info.report_description.to_string(),
            None => format!("Diagnóstico: {}", self.code()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, DrLabel::Unknown(_))
    }
}

impl From<String> for DrLabel {
    fn from(code: String) -> Self {
        match DrLabel::parse(&code) {
            DrLabel::Unknown(_) => DrLabel::Unknown(code),
            known => known,
        }
    }
}

impl From<DrLabel> for String {
    fn from(label: DrLabel) -> Self {
        match label {
            DrLabel::Unknown(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for DrLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Color of the confidence bar for a percentage in [0, 100]
pub fn confidence_color(confidence: f64) -> Color {
    if confidence >= 80.0 {
        Color::Green
    } else if confidence >= 60.0 {
        Color::Blue
    } else if confidence >= 40.0 {
        Color::Yellow
    } else if confidence >= 20.0 {
        Color::Orange
    } else {
        Color::Red
    }
}

/// `87.3456` -> `"87.35%"`
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_color_thresholds() {
        let colors: Vec<Color> = [10.0, 30.0, 50.0, 70.0, 90.0]
            .into_iter()
            .map(confidence_color)
            .collect();
        assert_eq!(
            colors,
            vec![Color::Red, Color::Orange, Color::Yellow, Color::Blue, Color::Green]
        );
        assert_eq!(confidence_color(80.0), Color::Green);
        assert_eq!(confidence_color(19.99), Color::Red);
    }

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(87.3456), "87.35%");
        assert_eq!(format_confidence(100.0), "100.00%");
    }

    #[test]
    fn test_known_labels_have_full_info() {
        for label in DrLabel::KNOWN {
            let info = label.info().unwrap();
            assert!(!info.text.is_empty());
            assert_eq!(label.recommendations().len(), 3);
            assert_eq!(DrLabel::parse(label.code()), label);
        }
        assert_eq!(DrLabel::ProliferateDr.color(), Color::Red);
        assert_eq!(DrLabel::NoDr.display_text(), "Sin Retinopatía Diabética");
    }

    #[test]
    fn test_unknown_label_falls_back_to_code() {
        let label: DrLabel = serde_json::from_str("\"Stage_X\"").unwrap();
        assert_eq!(label, DrLabel::Unknown("Stage_X".into()));
        assert_eq!(label.display_text(), "Stage_X");
        assert_eq!(label.report_description(), "Diagnóstico: Stage_X");
        assert!(label.recommendations().is_empty());
        assert_eq!(serde_json::to_string(&label).unwrap(), "\"Stage_X\"");
    }

    #[test]
    fn test_wire_codes() {
        let label: DrLabel = serde_json::from_str("\"Proliferate_DR\"").unwrap();
        assert_eq!(label, DrLabel::ProliferateDr);
        assert_eq!(serde_json::to_string(&DrLabel::NoDr).unwrap(), "\"No_DR\"");
    }
}
