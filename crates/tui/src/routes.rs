//! Screen routing and the auth guard in front of it.

use crate::auth::AuthState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Signup,
    Dashboard,
    Transactions,
}

impl Route {
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Login",
            Self::Signup => "Sign up",
            Self::Dashboard => "Dashboard",
            Self::Transactions => "Transactions",
        }
    }

    pub fn is_protected(self) -> bool {
        matches!(self, Self::Dashboard | Self::Transactions)
    }

    /// Login and signup make no sense once logged in.
    pub fn is_auth_form(self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }
}

/// What the guard lets the user see for a requested route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Loading,
    Show(Route),
}

pub fn guard(requested: Route, auth: &AuthState) -> View {
    match auth {
        AuthState::Loading => View::Loading,
        AuthState::LoggedOut if requested.is_protected() => View::Show(Route::Login),
        AuthState::LoggedIn(_) if requested.is_auth_form() => View::Show(Route::Dashboard),
        AuthState::LoggedOut | AuthState::LoggedIn(_) => View::Show(requested),
    }
}
