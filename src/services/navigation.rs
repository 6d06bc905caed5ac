// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client route table and access guard.

use serde::Serialize;

use crate::models::User;

pub const LOGIN_PATH: &str = "/login";
pub const DEFAULT_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
    Admin,
}

/// Every path the client knows about.
pub const ROUTES: &[(&str, Access)] = &[
    ("/login", Access::Public),
    ("/register", Access::Public),
    ("/", Access::Protected),
    ("/report", Access::Protected),
    ("/cleanup", Access::Protected),
    ("/rewards", Access::Protected),
    ("/profile", Access::Protected),
    ("/admin", Access::Admin),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    Allow,
    RedirectToLogin,
    Deny,
    RedirectToDefault,
}

pub fn access_for(path: &str) -> Option<Access> {
    let path = normalize(path);
    ROUTES.iter().find(|(p, _)| *p == path).map(|(_, a)| *a)
}

/// Decide what happens when `user` navigates to `path`.
pub fn guard(path: &str, user: Option<&User>) -> RouteDecision {
    match (access_for(path), user) {
        (None, _) => RouteDecision::RedirectToDefault,
        (Some(Access::Public), _) => RouteDecision::Allow,
        (Some(_), None) => RouteDecision::RedirectToLogin,
        (Some(Access::Protected), Some(_)) => RouteDecision::Allow,
        (Some(Access::Admin), Some(u)) if u.is_admin() => RouteDecision::Allow,
        (Some(Access::Admin), Some(_)) => RouteDecision::Deny,
    }
}

/// Strip query/fragment and a trailing slash.
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::Utc;

    fn user(role: Role) -> User {
        User {
            id: "1".to_string(),
            name: "Test".to_string(),
            email: "t@example.com".to_string(),
            green_points: 0,
            role,
            avatar: None,
            joined_at: Utc::now(),
            password_hash: String::new(),
        }
    }

    #[test]
    fn test_unauthenticated_protected_paths_redirect_to_login() {
        for (path, access) in ROUTES {
            let expected = match access {
                Access::Public => RouteDecision::Allow,
                _ => RouteDecision::RedirectToLogin,
            };
            assert_eq!(guard(path, None), expected, "path {}", path);
        }
    }

    #[test]
    fn test_admin_path() {
        assert_eq!(guard("/admin", Some(&user(Role::User))), RouteDecision::Deny);
        assert_eq!(guard("/admin", Some(&user(Role::Admin))), RouteDecision::Allow);
    }

    #[test]
    fn test_authenticated_user_paths() {
        let u = user(Role::User);
        for path in ["/", "/report", "/cleanup", "/rewards", "/profile", "/login"] {
            assert_eq!(guard(path, Some(&u)), RouteDecision::Allow, "path {}", path);
        }
    }

    #[test]
    fn test_unknown_paths_redirect_to_default() {
        assert_eq!(guard("/nope", None), RouteDecision::RedirectToDefault);
        assert_eq!(
            guard("/admin/secret", Some(&user(Role::Admin))),
            RouteDecision::RedirectToDefault
        );
    }

    #[test]
    fn test_normalize() {
        assert_eq!(access_for("/rewards/"), Some(Access::Protected));
        assert_eq!(access_for("/report?x=1"), Some(Access::Protected));
        assert_eq!(access_for("/"), Some(Access::Protected));
    }
}
