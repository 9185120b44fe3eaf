//! Page table used by the route guard.
//!
//! Restricted pages are exactly the entries of each role's menu, so a page is
//! reachable from the sidebar if and only if the guard admits it.

use super::Role;
use super::navigation::role_menu;

/// Pages open to everyone, signed in or not.
pub const PUBLIC_PAGES: [&str; 6] = ["/", "/about-us", "/auth", "/login", "/signup", "/forgot-password"];

/// Page the guard sends signed-out visitors to.
pub const LOGIN_PATH: &str = "/login";

/// Access rule for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRule {
    pub path: &'static str,
    /// Roles admitted; `None` means unrestricted.
    pub allowed: Option<&'static [Role]>,
}

const fn only(role: Role) -> &'static [Role] {
    match role {
        Role::Mentee => &[Role::Mentee],
        Role::Mentor => &[Role::Mentor],
        Role::Coordinator => &[Role::Coordinator],
    }
}

/// Trim whitespace and trailing slashes; the root stays `/`.
pub fn normalise_path(path: &str) -> &str {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Look up the rule for `path`; `None` for unknown pages.
///
/// # Examples
/// ```
/// use backend::domain::{find_page, Role};
///
/// let rule = find_page("/dashboard/mentor/requests/").expect("known page");
/// assert_eq!(rule.allowed, Some(&[Role::Mentor][..]));
/// assert!(find_page("/about-us").expect("public").allowed.is_none());
/// assert!(find_page("/nowhere").is_none());
/// ```
pub fn find_page(path: &str) -> Option<PageRule> {
    let path = normalise_path(path);
    if let Some(public) = PUBLIC_PAGES.into_iter().find(|page| *page == path) {
        return Some(PageRule {
            path: public,
            allowed: None,
        });
    }
    Role::ALL.into_iter().find_map(|role| {
        role_menu(role)
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| PageRule {
                path: entry.path,
                allowed: Some(only(role)),
            })
    })
}

/// Every known page.
pub fn all_pages() -> impl Iterator<Item = PageRule> {
    PUBLIC_PAGES
        .into_iter()
        .map(|path| PageRule {
            path,
            allowed: None,
        })
        .chain(Role::ALL.into_iter().flat_map(|role| {
            role_menu(role).iter().map(move |entry| PageRule {
                path: entry.path,
                allowed: Some(only(role)),
            })
        }))
}
