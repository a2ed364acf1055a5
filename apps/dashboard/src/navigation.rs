//! # Navigation
//!
//! The dashboard's screens and the two redirect rules that sit between a
//! requested screen and what actually gets shown.
//!
//! ## Redirect Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  guard(route, user)                                                     │
//! │                                                                         │
//! │   signed out + dashboard screen  ──────────────► Login                  │
//! │   signed in  + Login / Register  ──────────────► Dashboard              │
//! │   otherwise                      ──────────────► route unchanged        │
//! │                                                                         │
//! │  after_save()                                                           │
//! │                                                                         │
//! │   NewItem / EditItem(id)         ──────────────► Items                  │
//! │   other screens save in place    ──────────────► unchanged              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use stockroom_core::User;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Items,
    NewItem,
    ItemDetail(String),
    EditItem(String),
    Categories,
    Suppliers,
    Transactions,
    Reports,
}

impl Route {
    /// Screens reachable without signing in.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }

    /// Where the screen goes once its form has been saved.
    pub fn after_save(&self) -> Route {
        match self {
            Route::NewItem | Route::EditItem(_) => Route::Items,
            other => other.clone(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".into(),
            Route::Register => "/register".into(),
            Route::Dashboard => "/dashboard".into(),
            Route::Items => "/dashboard/items".into(),
            Route::NewItem => "/dashboard/items/new".into(),
            Route::ItemDetail(id) => format!("/dashboard/items/{}", id),
            Route::EditItem(id) => format!("/dashboard/items/{}/edit", id),
            Route::Categories => "/dashboard/categories".into(),
            Route::Suppliers => "/dashboard/suppliers".into(),
            Route::Transactions => "/dashboard/transactions".into(),
            Route::Reports => "/dashboard/reports".into(),
        }
    }
}

/// Applies the sign-in redirect rules to a requested route.
pub fn guard(route: Route, user: Option<&User>) -> Route {
    match (user, route.is_public()) {
        (None, false) => Route::Login,
        (Some(_), true) => Route::Dashboard,
        _ => route,
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|p| !p.is_empty()).collect();

        let route = match segments.as_slice() {
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["dashboard"] => Route::Dashboard,
            ["dashboard", "items"] => Route::Items,
            ["dashboard", "items", "new"] => Route::NewItem,
            ["dashboard", "items", id] => Route::ItemDetail((*id).to_string()),
            ["dashboard", "items", id, "edit"] => Route::EditItem((*id).to_string()),
            ["dashboard", "categories"] => Route::Categories,
            ["dashboard", "suppliers"] => Route::Suppliers,
            ["dashboard", "transactions"] => Route::Transactions,
            ["dashboard", "reports"] => Route::Reports,
            _ => return Err(format!("Unknown route: {}", s)),
        };
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::Role;

    fn user() -> User {
        User {
            id: "1".into(),
            name: "Viewer User".into(),
            email: "viewer@example.com".into(),
            role: Role::Viewer,
        }
    }

    #[test]
    fn test_signed_out_goes_to_login() {
        assert_eq!(guard(Route::Items, None), Route::Login);
        assert_eq!(guard(Route::EditItem("3".into()), None), Route::Login);
        assert_eq!(guard(Route::Register, None), Route::Register);
    }

    #[test]
    fn test_signed_in_skips_login() {
        let user = user();
        assert_eq!(guard(Route::Login, Some(&user)), Route::Dashboard);
        assert_eq!(guard(Route::Reports, Some(&user)), Route::Reports);
    }

    #[test]
    fn test_item_forms_return_to_list() {
        assert_eq!(Route::NewItem.after_save(), Route::Items);
        assert_eq!(Route::EditItem("5".into()).after_save(), Route::Items);
        assert_eq!(Route::Suppliers.after_save(), Route::Suppliers);
    }

    #[test]
    fn test_paths_parse_back() {
        for route in [
            Route::Dashboard,
            Route::NewItem,
            Route::ItemDetail("7".into()),
            Route::EditItem("7".into()),
            Route::Transactions,
        ] {
            assert_eq!(route.path().parse::<Route>().unwrap(), route);
        }
        assert!("/dashboard/unknown".parse::<Route>().is_err());
    }
}
