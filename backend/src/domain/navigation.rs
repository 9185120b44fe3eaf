//! Sidebar menus per role.

use serde::Serialize;
use utoipa::ToSchema;

use super::Role;

/// Icon shown beside a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum NavIcon {
    LayoutDashboard,
    Briefcase,
    ListChecks,
    Users,
    FileText,
    Upload,
    MessagesSquare,
    CheckSquare,
    #[serde(rename = "bar-chart-3")]
    BarChart3,
    Info,
}

/// One sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct NavEntry {
    #[schema(value_type = String, example = "Student Requests")]
    pub label: &'static str,
    #[schema(value_type = String, example = "/dashboard/mentor/requests")]
    pub path: &'static str,
    pub icon: NavIcon,
}

const fn entry(label: &'static str, path: &'static str, icon: NavIcon) -> NavEntry {
    NavEntry { label, path, icon }
}

/// Role-independent entry appended to every menu.
pub const ABOUT_US: NavEntry = entry("About Us", "/about-us", NavIcon::Info);

const MENTEE_MENU: [NavEntry; 7] = [
    entry("Dashboard", "/dashboard/mentee", NavIcon::LayoutDashboard),
    entry("My Projects", "/dashboard/mentee/projects", NavIcon::Briefcase),
    entry(
        "Available Projects",
        "/dashboard/mentee/available-projects",
        NavIcon::ListChecks,
    ),
    entry("Mentors", "/dashboard/mentee/mentors", NavIcon::Users),
    entry("Take Test", "/dashboard/mentee/tests", NavIcon::FileText),
    entry("Submit Project", "/dashboard/mentee/submit", NavIcon::Upload),
    entry("Feedback", "/dashboard/mentee/feedback", NavIcon::MessagesSquare),
];

const MENTOR_MENU: [NavEntry; 5] = [
    entry("Dashboard", "/dashboard/mentor", NavIcon::LayoutDashboard),
    entry("Student Requests", "/dashboard/mentor/requests", NavIcon::Users),
    entry("Test Creator", "/dashboard/mentor/test-creator", NavIcon::FileText),
    entry(
        "Review Submissions",
        "/dashboard/mentor/submissions",
        NavIcon::CheckSquare,
    ),
    entry("Give Feedback", "/dashboard/mentor/feedback", NavIcon::MessagesSquare),
];

const COORDINATOR_MENU: [NavEntry; 5] = [
    entry("Dashboard", "/dashboard/coordinator", NavIcon::LayoutDashboard),
    entry("All Projects", "/dashboard/coordinator/projects", NavIcon::Briefcase),
    entry(
        "Submission Review",
        "/dashboard/coordinator/submissions",
        NavIcon::CheckSquare,
    ),
    entry(
        "Feedback Panel",
        "/dashboard/coordinator/feedback",
        NavIcon::MessagesSquare,
    ),
    entry("Analytics", "/dashboard/coordinator/analytics", NavIcon::BarChart3),
];

/// Role-specific entries, without [`ABOUT_US`].
pub const fn role_menu(role: Role) -> &'static [NavEntry] {
    match role {
        Role::Mentee => &MENTEE_MENU,
        Role::Mentor => &MENTOR_MENU,
        Role::Coordinator => &COORDINATOR_MENU,
    }
}

/// Full sidebar for `role`; empty when the role is unknown.
///
/// # Examples
/// ```
/// use backend::domain::{navigation, Role, ABOUT_US};
///
/// let menu = navigation(Some(Role::Mentor));
/// assert_eq!(menu.last(), Some(&ABOUT_US));
/// assert!(navigation(None).is_empty());
/// ```
pub fn navigation(role: Option<Role>) -> Vec<NavEntry> {
    let Some(role) = role else {
        return Vec::new();
    };
    role_menu(role)
        .iter()
        .copied()
        .chain(std::iter::once(ABOUT_US))
        .collect()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn labels(role: Role) -> Vec<&'static str> {
        navigation(Some(role)).iter().map(|e| e.label).collect()
    }

    #[rstest]
    #[case(Role::Mentee)]
    #[case(Role::Mentor)]
    #[case(Role::Coordinator)]
    fn every_menu_ends_with_about_us(#[case] role: Role) {
        let menu = navigation(Some(role));
        assert!(menu.len() > 1);
        assert_eq!(menu.last(), Some(&ABOUT_US));
        assert_eq!(menu[0].path, role.default_path());
    }

    #[rstest]
    fn mentor_menu_offers_mentor_tools_only() {
        let labels = labels(Role::Mentor);
        assert!(labels.contains(&"Student Requests"));
        assert!(labels.contains(&"Test Creator"));
        assert!(!labels.contains(&"Take Test"));
    }

    #[rstest]
    #[case(Role::Mentee, vec!["Dashboard", "My Projects", "Available Projects", "Mentors", "Take Test", "Submit Project", "Feedback", "About Us"])]
    #[case(Role::Mentor, vec!["Dashboard", "Student Requests", "Test Creator", "Review Submissions", "Give Feedback", "About Us"])]
    #[case(Role::Coordinator, vec!["Dashboard", "All Projects", "Submission Review", "Feedback Panel", "Analytics", "About Us"])]
    fn menus_keep_their_order(#[case] role: Role, #[case] expected: Vec<&str>) {
        assert_eq!(labels(role), expected);
    }

    #[rstest]
    fn icons_serialise_as_icon_names() {
        let json = serde_json::to_value(ABOUT_US).expect("serialise");
        assert_eq!(
            json,
            serde_json::json!({ "label": "About Us", "path": "/about-us", "icon": "info" })
        );
        let chart = serde_json::to_value(NavIcon::BarChart3).expect("serialise");
        assert_eq!(chart, "bar-chart-3");
    }
}
