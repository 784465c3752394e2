//! Client routes and the guard in front of protected views

use std::fmt;

use crate::auth::session::SessionContext;
use crate::constants::{
    ROUTE_LOGIN, ROUTE_PROJECTS, ROUTE_ROLES, ROUTE_ROOT, ROUTE_TASK_STATUS, ROUTE_USERS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Login,
    Projects,
    ProjectTasks(i64),
    Users,
    Roles,
    TaskStatus,
}

impl Route {
    /// Parse a client path. Unknown paths map to `Root`.
    pub fn parse(path: &str) -> Route {
        let path = path
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Root,
            ["login"] => Route::Login,
            ["projects"] => Route::Projects,
            ["projects", id, "tasks"] => id
                .parse()
                .map(Route::ProjectTasks)
                .unwrap_or(Route::Root),
            ["users"] => Route::Users,
            ["roles"] => Route::Roles,
            ["taskStatus"] => Route::TaskStatus,
            _ => Route::Root,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Root => ROUTE_ROOT.to_string(),
            Route::Login => ROUTE_LOGIN.to_string(),
            Route::Projects => ROUTE_PROJECTS.to_string(),
            Route::ProjectTasks(id) => format!("{}/{}/tasks", ROUTE_PROJECTS, id),
            Route::Users => ROUTE_USERS.to_string(),
            Route::Roles => ROUTE_ROLES.to_string(),
            Route::TaskStatus => ROUTE_TASK_STATUS.to_string(),
        }
    }

    /// Views that need a session
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Root | Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// What the shell should do with a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

/// Protected content renders iff a session exists
pub fn can_render(route: Route, authenticated: bool) -> bool {
    !route.is_protected() || authenticated
}

pub fn guard(route: Route, authenticated: bool) -> Navigation {
    match route {
        Route::Root if authenticated => Navigation::Redirect(Route::Projects),
        Route::Root => Navigation::Redirect(Route::Login),
        Route::Login if authenticated => Navigation::Redirect(Route::Projects),
        route if can_render(route, authenticated) => Navigation::Render(route),
        _ => Navigation::Redirect(Route::Login),
    }
}

/// Guard a raw path against the live session
pub fn navigate(path: &str, session: &SessionContext) -> Navigation {
    let route = Route::parse(path);
    let navigation = guard(route, session.is_authenticated());
    if let Navigation::Redirect(target) = navigation {
        log::debug!("Navigation to {} redirected to {}", path, target);
    }
    navigation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/"), Route::Root);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/projects/"), Route::Projects);
        assert_eq!(Route::parse("/projects/42/tasks?tab=open"), Route::ProjectTasks(42));
        assert_eq!(Route::parse("/taskStatus"), Route::TaskStatus);
        assert_eq!(Route::parse("/projects/abc/tasks"), Route::Root);
        assert_eq!(Route::parse("/nowhere"), Route::Root);
    }

    #[test]
    fn test_paths_round_trip() {
        for route in [
            Route::Login,
            Route::Projects,
            Route::ProjectTasks(9),
            Route::Users,
            Route::Roles,
            Route::TaskStatus,
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_guard_without_session() {
        assert_eq!(guard(Route::Projects, false), Navigation::Redirect(Route::Login));
        assert_eq!(guard(Route::ProjectTasks(1), false), Navigation::Redirect(Route::Login));
        assert_eq!(guard(Route::Login, false), Navigation::Render(Route::Login));
        assert_eq!(guard(Route::Root, false), Navigation::Redirect(Route::Login));
    }

    #[test]
    fn test_guard_with_session() {
        assert_eq!(guard(Route::Users, true), Navigation::Render(Route::Users));
        assert_eq!(guard(Route::Root, true), Navigation::Redirect(Route::Projects));
        assert_eq!(guard(Route::Login, true), Navigation::Redirect(Route::Projects));
    }
}
