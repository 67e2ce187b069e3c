use std::fmt;

use super::AuthProvider;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Content,
    Products,
    Settings,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Content => "/content",
            Route::Products => "/products",
            Route::Settings => "/settings",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        [
            Route::Login,
            Route::Dashboard,
            Route::Content,
            Route::Products,
            Route::Settings,
        ]
        .into_iter()
        .find(|r| r.path() == trimmed)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
    /// Auth status still resolving; show a loading state, do not redirect yet.
    Loading,
    NotFound,
}

/// Decides what a request for `path` shows given the auth state.
pub fn guard(path: &str, auth: &dyn AuthProvider) -> Navigation {
    if path.is_empty() || path == "/" {
        return protected(auth, || Navigation::Redirect(Route::Dashboard));
    }
    match Route::from_path(path) {
        Some(Route::Login) => Navigation::Render(Route::Login),
        Some(route) => protected(auth, || Navigation::Render(route)),
        None => Navigation::NotFound,
    }
}

fn protected(auth: &dyn AuthProvider, allowed: impl FnOnce() -> Navigation) -> Navigation {
    if auth.loading() {
        return Navigation::Loading;
    }
    match auth.current_user() {
        Some(_) => allowed(),
        None => Navigation::Redirect(Route::Login),
    }
}

#[cfg(test)]
#[path = "../tests/auth/guard_tests.rs"]
mod tests;
