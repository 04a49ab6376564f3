//! Static landing page content

/// Top bar anchors
pub const NAV_LINKS: &[(&str, &str)] = &[
    ("/#home", "Inicio"),
    ("/#servicios", "Servicios"),
    ("/#nosotros", "Nosotros"),
    ("/#faqs", "FAQs"),
    ("/#contacto", "Contacto"),
];

pub const HERO_FEATURES: [&str; 3] = [
    "Tecnología de última generación",
    "Equipo médico especializado",
    "Atención personalizada 24/7",
];

pub struct Service {
    pub title: &'static str,
    pub description: &'static str,
    pub features: [&'static str; 3],
    pub glyph: &'static str,
}

pub const SERVICES: [Service; 6] = [
    Service {
        title: "Cirugía de Cataratas",
        description: "Recupera tu visión con la técnica de facoemulsificación, procedimiento mínimamente invasivo con recuperación rápida.",
        features: ["Ambulatorio", "Sin dolor", "Resultados inmediatos"],
        glyph: "👁️",
    },
    Service {
        title: "Tratamiento de Glaucoma",
        description: "Diagnóstico precoz mediante tonometría y campimetría computarizada para preservar tu visión de manera efectiva.",
        features: ["Detección temprana", "Control continuo", "Prevención"],
        glyph: "🔬",
    },
    Service {
        title: "Enfermedades de la Retina",
        description: "Tratamiento especializado para desprendimiento de retina, retinopatía diabética y degeneración macular.",
        features: ["OCT avanzado", "Láser especializado", "Expertos certificados"],
        glyph: "🎯",
    },
    Service {
        title: "Cirugía Refractiva",
        description: "Corrección láser de miopía, hipermetropía y astigmatismo con tecnología LASIK de última generación.",
        features: ["Sin anteojos", "Procedimiento rápido", "Alta precisión"],
        glyph: "✨",
    },
    Service {
        title: "Estética Ocular",
        description: "Tratamientos especializados para blefaroplastia, ptosis palpebral y rejuvenecimiento de la zona periocular.",
        features: ["Resultados naturales", "Mínima invasión", "Expertos en estética"],
        glyph: "💫",
    },
    Service {
        title: "Consulta General",
        description: "Evaluación completa de tu salud visual con equipamiento de última generación y diagnóstico preciso.",
        features: ["Examen completo", "Diagnóstico preciso", "Plan personalizado"],
        glyph: "🏥",
    },
];

/// "Why us" cards: (title, description)
pub const VALUES: [(&str, &str); 6] = [
    ("Experiencia Comprobada", "Más de dos décadas liderando la oftalmología con resultados excepcionales y reconocimiento internacional."),
    ("Atención Personalizada", "Cada paciente es único. Diseñamos planes de tratamiento adaptados a tus necesidades específicas."),
    ("Tecnología Avanzada", "Equipamiento de última generación para diagnósticos precisos y tratamientos mínimamente invasivos."),
    ("Tratamientos Rápidos", "Procedimientos eficientes que respetan tu tiempo con recuperación acelerada y resultados inmediatos."),
    ("Equipo Especializado", "Oftalmólogos certificados y personal capacitado comprometidos con tu salud visual."),
    ("Garantía de Calidad", "Certificaciones internacionales y protocolos de seguridad que garantizan tu tranquilidad."),
];

/// Frequently asked questions: (question, answer)
pub const FAQS: [(&str, &str); 6] = [
    (
        "¿Cuánto dura una consulta oftalmológica completa?",
        "Una consulta oftalmológica completa tiene una duración aproximada de 30 a 45 minutos. Este tiempo incluye la historia clínica, exámenes diagnósticos como medición de agudeza visual, presión intraocular, y evaluación del fondo de ojo. Si se requieren estudios especializados como OCT o campimetría, el tiempo puede extenderse.",
    ),
    (
        "¿La cirugía de cataratas es dolorosa y requiere hospitalización?",
        "No, la cirugía de cataratas moderna es un procedimiento ambulatorio prácticamente indoloro. Se realiza con anestesia local en gotas, dura aproximadamente 15-20 minutos, y el paciente puede regresar a casa el mismo día. La recuperación es rápida y la mayoría de pacientes retoman sus actividades normales en pocos días.",
    ),
    (
        "¿Aceptan seguros médicos y cuál es el proceso?",
        "Sí, trabajamos con las principales aseguradoras del país incluyendo EsSalud, Pacífico, Rímac, Sanitas, y más. Para usar tu seguro, solo necesitas tu carta de garantía o autorización previa. Nuestro equipo administrativo te ayuda con todo el proceso de coordinación con tu aseguradora.",
    ),
    (
        "¿Con qué frecuencia debo realizar un examen visual?",
        "Para adultos sin problemas visuales, recomendamos un examen anual. En niños, especialmente en edad escolar, es ideal cada 6-12 meses. Personas con diabetes, glaucoma, miopía alta u otras condiciones requieren controles más frecuentes según indicación médica. La detección temprana es clave para preservar la salud visual.",
    ),
    (
        "¿Qué tecnología utilizan para los diagnósticos?",
        "Contamos con equipamiento de última generación incluyendo: OCT (Tomografía de Coherencia Óptica) para análisis detallado de retina, tonómetro de no contacto para medir presión ocular, campímetro computarizado para evaluar campo visual, topógrafo corneal, y microscopios de alta precisión. Todo calibrado según estándares internacionales.",
    ),
    (
        "¿Cuánto tiempo toma recuperarse de una cirugía refractiva LASIK?",
        "La recuperación visual es sorprendentemente rápida. La mayoría de pacientes notan mejora significativa en las primeras 24 horas. Puedes retomar actividades cotidianas en 2-3 días. La visión se estabiliza completamente entre 1-3 meses. Durante la primera semana debes usar gotas oftálmicas y evitar actividades de alto impacto.",
    ),
];

pub struct ContactInfo {
    pub title: &'static str,
    pub details: [&'static str; 2],
    pub link: &'static str,
    pub glyph: &'static str,
}

pub const CONTACT_INFO: [ContactInfo; 4] = [
    ContactInfo {
        title: "Teléfono",
        details: ["+51 043 123 456", "+51 987 654 321"],
        link: "tel:+51043123456",
        glyph: "📞",
    },
    ContactInfo {
        title: "Correo Electrónico",
        details: ["contacto@clinicagismondi.com", "citas@clinicagismondi.com"],
        link: "mailto:contacto@clinicagismondi.com",
        glyph: "✉️",
    },
    ContactInfo {
        title: "Ubicación",
        details: ["Av. Principal 123", "Chimbote, Ancash, Perú"],
        link: "#",
        glyph: "📍",
    },
    ContactInfo {
        title: "Horario de Atención",
        details: ["Lun - Vie: 8:00 AM - 6:00 PM", "Sábados: 8:00 AM - 1:00 PM"],
        link: "#",
        glyph: "🕗",
    },
];

/// Options of the contact form's service selector
pub const CONTACT_SERVICES: [&str; 7] = [
    "Consulta General",
    "Cirugía de Cataratas",
    "Tratamiento de Glaucoma",
    "Enfermedades de Retina",
    "Cirugía Refractiva",
    "Estética Ocular",
    "Otro",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_links_target_sections() {
        for (href, _) in NAV_LINKS {
            assert!(href.starts_with("/#"));
        }
    }

    #[test]
    fn test_faq_pairs_are_filled() {
        assert_eq!(FAQS.len(), 6);
        assert!(FAQS.iter().all(|(q, a)| q.starts_with('¿') && !a.is_empty()));
    }

    #[test]
    fn test_contact_selector_ends_with_other() {
        assert_eq!(CONTACT_SERVICES.last(), Some(&"Otro"));
    }
}
