//! Dashboard page routes
//!
//! One page set, rendered under a locale prefix (`/{locale}/dashboard/...`).
//! Legacy paths without a prefix resolve to the same pages.

use serde::{Deserialize, Serialize};

use crate::types::{Id, Locale};

/// Every page of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    Login,
    Dashboard,
    Materials,
    MaterialCreate,
    MaterialDetail(Id),
    Inventory,
    Workshops,
    WorkshopCreate,
    WorkshopDetail(Id),
    Transfers,
    TransferCreate,
    TransferDetail(Id),
    Processes,
    ProcessCreate,
    ProcessDetail(Id),
    Users,
    UserCreate,
    UserDetail(Id),
    History,
    Settings,
}

/// A resolved path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub locale: Locale,
    pub page: Page,
    /// Path had no locale prefix
    pub legacy: bool,
}

impl Page {
    /// Path under `locale`
    pub fn path(&self, locale: Locale) -> String {
        format!("/{}{}", locale.code(), self.suffix())
    }

    fn suffix(&self) -> String {
        match self {
            Page::Login => "/login".to_string(),
            Page::Dashboard => "/dashboard".to_string(),
            Page::Materials => "/dashboard/materials".to_string(),
            Page::MaterialCreate => "/dashboard/materials/create".to_string(),
            Page::MaterialDetail(id) => format!("/dashboard/materials/{}", id),
            Page::Inventory => "/dashboard/inventory".to_string(),
            Page::Workshops => "/dashboard/workshops".to_string(),
            Page::WorkshopCreate => "/dashboard/workshops/create".to_string(),
            Page::WorkshopDetail(id) => format!("/dashboard/workshops/{}", id),
            Page::Transfers => "/dashboard/transfers".to_string(),
            Page::TransferCreate => "/dashboard/transfers/create".to_string(),
            Page::TransferDetail(id) => format!("/dashboard/transfers/{}", id),
            Page::Processes => "/dashboard/processes".to_string(),
            Page::ProcessCreate => "/dashboard/processes/create".to_string(),
            Page::ProcessDetail(id) => format!("/dashboard/processes/{}", id),
            Page::Users => "/dashboard/users".to_string(),
            Page::UserCreate => "/dashboard/users/create".to_string(),
            Page::UserDetail(id) => format!("/dashboard/users/{}", id),
            Page::History => "/dashboard/history".to_string(),
            Page::Settings => "/dashboard/settings".to_string(),
        }
    }

    /// Everything but the login screen sits behind the auth gate
    pub fn requires_session(&self) -> bool {
        !matches!(self, Page::Login)
    }

    /// Resolve a path, with or without a locale prefix
    pub fn parse(path: &str) -> Option<Route> {
        let mut segments: Vec<&str> = path
            .split('?')
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let (locale, legacy) = match segments.first().and_then(|s| Locale::from_code(s)) {
            Some(locale) => {
                segments.remove(0);
                (locale, false)
            }
            None => (Locale::default(), true),
        };

        let page = match segments.as_slice() {
            ["login"] => Page::Login,
            ["dashboard"] => Page::Dashboard,
            ["dashboard", section] => match *section {
                "materials" => Page::Materials,
                "inventory" => Page::Inventory,
                "workshops" => Page::Workshops,
                "transfers" => Page::Transfers,
                "processes" => Page::Processes,
                "users" => Page::Users,
                "history" => Page::History,
                "settings" => Page::Settings,
                _ => return None,
            },
            ["dashboard", section, "create"] => match *section {
                "materials" => Page::MaterialCreate,
                "workshops" => Page::WorkshopCreate,
                "transfers" => Page::TransferCreate,
                "processes" => Page::ProcessCreate,
                "users" => Page::UserCreate,
                _ => return None,
            },
            ["dashboard", section, id] => {
                let id: Id = id.parse().ok()?;
                match *section {
                    "materials" => Page::MaterialDetail(id),
                    "workshops" => Page::WorkshopDetail(id),
                    "transfers" => Page::TransferDetail(id),
                    "processes" => Page::ProcessDetail(id),
                    "users" => Page::UserDetail(id),
                    _ => return None,
                }
            }
            _ => return None,
        };

        Some(Route {
            locale,
            page,
            legacy,
        })
    }
}

impl Route {
    /// Canonical localized path of this route
    pub fn canonical(&self) -> String {
        self.page.path(self.locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_locale_prefixed() {
        assert_eq!(Page::Login.path(Locale::Ru), "/ru/login");
        assert_eq!(Page::TransferDetail(42).path(Locale::En), "/en/dashboard/transfers/42");
        assert_eq!(Page::ProcessCreate.path(Locale::Uz), "/uz/dashboard/processes/create");
    }

    #[test]
    fn test_legacy_and_localized_paths_resolve_to_same_page() {
        let legacy = Page::parse("/dashboard/materials/7").unwrap();
        let localized = Page::parse("/ru/dashboard/materials/7").unwrap();

        assert_eq!(legacy.page, Page::MaterialDetail(7));
        assert_eq!(legacy.page, localized.page);
        assert!(legacy.legacy);
        assert!(!localized.legacy);
        assert_eq!(legacy.canonical(), "/en/dashboard/materials/7");
    }

    #[test]
    fn test_every_page_round_trips() {
        let pages = [
            Page::Login,
            Page::Dashboard,
            Page::Materials,
            Page::MaterialCreate,
            Page::Inventory,
            Page::WorkshopDetail(3),
            Page::TransferCreate,
            Page::Processes,
            Page::UserDetail(9),
            Page::History,
            Page::Settings,
        ];
        for page in pages {
            for locale in Locale::ALL {
                let route = Page::parse(&page.path(locale)).unwrap();
                assert_eq!(route.page, page);
                assert_eq!(route.locale, locale);
            }
        }
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(Page::parse("/en/dashboard/unknown"), None);
        assert_eq!(Page::parse("/en/dashboard/materials/abc"), None);
        assert_eq!(Page::parse("/"), None);
    }

    #[test]
    fn test_query_string_is_ignored() {
        let route = Page::parse("/en/dashboard/transfers?status=pending").unwrap();
        assert_eq!(route.page, Page::Transfers);
    }

    #[test]
    fn test_only_login_is_public() {
        assert!(!Page::Login.requires_session());
        assert!(Page::Dashboard.requires_session());
    }
}
