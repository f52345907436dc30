//! Console routes: the addressable views of the application.
//!
//! A [`Route`] is what the navigator moves between and what the access
//! policy is keyed on. `parse` and `path` are inverses for every route except
//! [`Route::NotFound`], which keeps the path that failed to match.

use std::fmt;

/// A view of the console.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`: immediately redirects to the dashboard.
    Root,
    Login,
    ForgotPassword,
    /// `/reset-password/:token`. The token comes from the emailed link.
    ResetPassword { token: String },
    /// The authenticated landing page.
    Dashboard,
    Clients,
    Distributors,
    Employees,
    Machines,
    Reports,
    Profile,
    NotFound { path: String },
}

impl Route {
    /// Resolves a path (query string and trailing slash ignored).
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Self::Root,
            "/login" => Self::Login,
            "/forgot-password" => Self::ForgotPassword,
            "/dashboard" => Self::Dashboard,
            "/clients" => Self::Clients,
            "/distributors" => Self::Distributors,
            "/employees" => Self::Employees,
            "/machines" => Self::Machines,
            "/reports" => Self::Reports,
            "/profile" => Self::Profile,
            other => match other.strip_prefix("/reset-password/") {
                Some(token) if !token.is_empty() && !token.contains('/') => {
                    Self::ResetPassword {
                        token: token.to_string(),
                    }
                }
                _ => Self::NotFound {
                    path: path.to_string(),
                },
            },
        }
    }

    /// The canonical path of this route.
    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::ForgotPassword => "/forgot-password".to_string(),
            Self::ResetPassword { token } => format!("/reset-password/{token}"),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Clients => "/clients".to_string(),
            Self::Distributors => "/distributors".to_string(),
            Self::Employees => "/employees".to_string(),
            Self::Machines => "/machines".to_string(),
            Self::Reports => "/reports".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::NotFound { path } => path.clone(),
        }
    }

    /// Routes reachable without a session.
    ///
    /// `Root` and `NotFound` are public too: the former only redirects and
    /// the latter renders the same page for everyone.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Self::Root
                | Self::Login
                | Self::ForgotPassword
                | Self::ResetPassword { .. }
                | Self::NotFound { .. }
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_path_are_inverse() {
        let routes = [
            Route::Root,
            Route::Login,
            Route::ForgotPassword,
            Route::ResetPassword {
                token: "abc.def".into(),
            },
            Route::Dashboard,
            Route::Clients,
            Route::Distributors,
            Route::Employees,
            Route::Machines,
            Route::Reports,
            Route::Profile,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route, "{route}");
        }
    }

    #[test]
    fn test_parse_ignores_trailing_slash_and_query() {
        assert_eq!(Route::parse("/clients/"), Route::Clients);
        assert_eq!(Route::parse("/dashboard?tab=pending"), Route::Dashboard);
        assert_eq!(Route::parse(""), Route::Root);
    }

    #[test]
    fn test_parse_unknown_path_is_not_found() {
        assert_eq!(
            Route::parse("/settings"),
            Route::NotFound {
                path: "/settings".into()
            }
        );
    }

    #[test]
    fn test_reset_password_requires_single_segment_token() {
        assert!(matches!(
            Route::parse("/reset-password/"),
            Route::NotFound { .. }
        ));
        assert!(matches!(
            Route::parse("/reset-password/a/b"),
            Route::NotFound { .. }
        ));
    }

    #[test]
    fn test_public_routes() {
        assert!(Route::Login.is_public());
        assert!(Route::ForgotPassword.is_public());
        assert!(Route::parse("/reset-password/t").is_public());
        assert!(Route::parse("/nope").is_public());
        assert!(!Route::Dashboard.is_public());
        assert!(!Route::Profile.is_public());
        assert!(!Route::Distributors.is_public());
    }
}
