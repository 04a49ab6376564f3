//! Routes and Role-Gated Navigation
//!
//! Every page of the app is a [`Route`]. The dashboard sidebar is a static
//! list of [`NavItem`]s, each optionally restricted to a set of roles, and is
//! filtered against the session role at render time.

use crate::session::Role;

const DOCTOR_ONLY: &[Role] = &[Role::Doctor];
const PATIENT_ONLY: &[Role] = &[Role::Patient];

/// Pages of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Register,
    Dashboard,
    Classifier,
    MedicalHistory,
    Diagnoses,
    Settings,
    Help,
}

impl Route {
    pub const ALL: [Route; 9] = [
        Route::Landing,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Classifier,
        Route::MedicalHistory,
        Route::Diagnoses,
        Route::Settings,
        Route::Help,
    ];

    pub const fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Classifier => "/dashboard/classifier",
            Route::MedicalHistory => "/dashboard/medical-history",
            Route::Diagnoses => "/dashboard/diagnoses",
            Route::Settings => "/dashboard/settings",
            Route::Help => "/dashboard/help",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    /// Page title shown in the dashboard header
    pub fn title(&self) -> &'static str {
        match self {
            Route::Landing => "Clínica Oftalmológica Gismondi",
            Route::Login => "Iniciar sesión",
            Route::Register => "Crear cuenta",
            Route::Dashboard => "Dashboard: Clínica Oftalmológica Gismondi",
            Route::Classifier => "Dashboard: Predicciones",
            Route::MedicalHistory => "Dashboard: Historiales Médicos",
            Route::Diagnoses => "Dashboard: Diagnósticos",
            Route::Settings => "Dashboard: Configuración",
            Route::Help => "Dashboard: Ayuda",
        }
    }

    /// Whether the page lives inside the signed-in dashboard
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Landing | Route::Login | Route::Register)
    }

    /// Roles allowed on this page; `None` means any signed-in role
    pub const fn required_roles(&self) -> Option<&'static [Role]> {
        match self {
            Route::Classifier | Route::MedicalHistory => Some(DOCTOR_ONLY),
            Route::Diagnoses => Some(PATIENT_ONLY),
            _ => None,
        }
    }

    pub fn allows(&self, role: Option<Role>) -> bool {
        role_matches(self.required_roles(), role)
    }
}

/// Sidebar glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Dashboard,
    Eye,
    History,
    Stethoscope,
    Settings,
    Help,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Dashboard => "🏠",
            Icon::Eye => "👁",
            Icon::History => "📋",
            Icon::Stethoscope => "🩺",
            Icon::Settings => "⚙️",
            Icon::Help => "❔",
        }
    }
}

/// A sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub title: &'static str,
    pub url: &'static str,
    pub icon: Icon,
    /// `None` means visible to everyone
    pub allowed_roles: Option<&'static [Role]>,
}

impl NavItem {
    const fn for_route(title: &'static str, route: Route, icon: Icon) -> Self {
        Self {
            title,
            url: route.path(),
            icon,
            allowed_roles: route.required_roles(),
        }
    }

    pub fn visible_to(&self, role: Option<Role>) -> bool {
        role_matches(self.allowed_roles, role)
    }
}

// Unrestricted entries are always visible; restricted ones need a known role
// that is listed. An unknown role sees only unrestricted entries.
fn role_matches(allowed: Option<&[Role]>, role: Option<Role>) -> bool {
    match (allowed, role) {
        (None, _) => true,
        (Some(roles), Some(role)) => roles.contains(&role),
        (Some(_), None) => false,
    }
}

/// Primary dashboard navigation
pub const MAIN_NAV: &[NavItem] = &[
    NavItem::for_route("Inicio", Route::Dashboard, Icon::Dashboard),
    NavItem::for_route("Clasificador", Route::Classifier, Icon::Eye),
    NavItem::for_route("Historiales Médicos", Route::MedicalHistory, Icon::History),
    NavItem::for_route("Mis Diagnósticos", Route::Diagnoses, Icon::Stethoscope),
];

/// Secondary navigation pinned to the bottom of the sidebar
pub const SECONDARY_NAV: &[NavItem] = &[
    NavItem::for_route("Configuración", Route::Settings, Icon::Settings),
    NavItem::for_route("Ayuda", Route::Help, Icon::Help),
];

/// Entries visible to `role`, in their original order
pub fn filter_by_role(items: &[NavItem], role: Option<Role>) -> Vec<NavItem> {
    items
        .iter()
        .filter(|item| item.visible_to(role))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(items: &[NavItem]) -> Vec<&'static str> {
        items.iter().map(|i| i.title).collect()
    }

    #[test]
    fn test_doctor_sees_doctor_entries() {
        let items = filter_by_role(MAIN_NAV, Some(Role::Doctor));
        assert_eq!(
            titles(&items),
            vec!["Inicio", "Clasificador", "Historiales Médicos"]
        );
    }

    #[test]
    fn test_patient_sees_patient_entries() {
        let items = filter_by_role(MAIN_NAV, Some(Role::Patient));
        assert_eq!(titles(&items), vec!["Inicio", "Mis Diagnósticos"]);
    }

    #[test]
    fn test_admin_sees_only_unrestricted() {
        let items = filter_by_role(MAIN_NAV, Some(Role::Admin));
        assert_eq!(titles(&items), vec!["Inicio"]);
    }

    #[test]
    fn test_unknown_role_is_fail_closed() {
        let items = filter_by_role(MAIN_NAV, None);
        assert_eq!(titles(&items), vec!["Inicio"]);
        assert_eq!(filter_by_role(SECONDARY_NAV, None).len(), SECONDARY_NAV.len());
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let lists: [&[NavItem]; 3] = [MAIN_NAV, SECONDARY_NAV, &[]];
        let roles = [None, Some(Role::Patient), Some(Role::Doctor), Some(Role::Admin)];

        for list in lists {
            for role in roles {
                let once = filter_by_role(list, role);
                let twice = filter_by_role(&once, role);
                assert_eq!(once, twice);
            }
        }
    }

    #[test]
    fn test_nav_items_agree_with_route_rules() {
        for item in MAIN_NAV.iter().chain(SECONDARY_NAV) {
            let route = Route::from_path(item.url).unwrap();
            assert_eq!(item.allowed_roles, route.required_roles());
            assert!(route.is_protected());
        }
    }

    #[test]
    fn test_route_from_path() {
        assert_eq!(Route::from_path("/"), Some(Route::Landing));
        assert_eq!(Route::from_path("/dashboard/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/nope"), None);
        assert!(Route::Diagnoses.allows(Some(Role::Patient)));
        assert!(!Route::Diagnoses.allows(Some(Role::Doctor)));
    }
}
