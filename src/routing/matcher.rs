//! Route matching logic.
//!
//! # Responsibilities
//! - Walk the route table in registration order
//! - Descend into groups whose prefix matches on a segment boundary
//! - Collect path parameters and group middleware along the way
//!
//! # Design Decisions
//! - Linear scan, first match wins (no trie, no priorities)
//! - A group whose entries all miss falls through to the next entry
//! - Matching is pure: same table + same path always yields the same match

use std::fmt;
use std::sync::Arc;

use crate::http::middleware::Middleware;
use crate::routing::params::Params;
use crate::routing::route::{Entry, Route, RouteGroup};

/// A resolved route with its extracted parameters.
#[derive(Clone)]
pub struct Match {
    route: Arc<Route>,
    params: Params,
    middleware: Arc<[Arc<dyn Middleware>]>,
}

impl Match {
    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Group-scoped middleware enclosing the route, outermost first.
    pub fn middleware(&self) -> &[Arc<dyn Middleware>] {
        &self.middleware
    }
}

impl fmt::Debug for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("route", &self.route)
            .field("params", &self.params)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}

/// Resolve a normalized `path` against `table`.
pub fn match_route(table: &RouteGroup, path: &str) -> Option<Match> {
    let mut chain = Vec::new();
    walk(table, path, &mut chain)
}

fn walk(group: &RouteGroup, path: &str, chain: &mut Vec<Arc<dyn Middleware>>) -> Option<Match> {
    let rest = group.strip_prefix(path)?;
    let depth = chain.len();
    chain.extend(group.middleware().iter().cloned());

    for entry in group.entries() {
        match entry {
            Entry::Route(route) => {
                if let Some(params) = route.pattern().captures(rest) {
                    return Some(Match {
                        route: Arc::clone(route),
                        params,
                        middleware: chain.as_slice().into(),
                    });
                }
            }
            Entry::Group(nested) => {
                if let Some(found) = walk(nested, rest, chain) {
                    return Some(found);
                }
            }
        }
    }

    chain.truncate(depth);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::resource::Resource;

    struct Noop;
    impl Resource for Noop {}

    struct Marker;
    impl Middleware for Marker {}

    fn pattern_of(m: &Match) -> &str {
        m.route().pattern().as_str()
    }

    #[test]
    fn test_first_match_wins() {
        let mut table = RouteGroup::new("");
        table.add("/items/:id", Noop);
        table.add("/items/special", Noop);

        let found = match_route(&table, "/items/special").unwrap();
        assert_eq!(pattern_of(&found), "/items/:id");
        assert_eq!(found.params().get("id"), Some("special"));
    }

    #[test]
    fn test_duplicate_pattern_resolves_to_first() {
        let first: Arc<dyn Resource> = Arc::new(Noop);
        let second: Arc<dyn Resource> = Arc::new(Noop);

        let mut table = RouteGroup::new("");
        table.add_shared("/dup", Arc::clone(&first));
        table.add_shared("/dup", Arc::clone(&second));

        let found = match_route(&table, "/dup").unwrap();
        assert!(Arc::ptr_eq(found.route().resource(), &first));
    }

    #[test]
    fn test_group_descends_and_falls_through() {
        let mut group = RouteGroup::new("/api");
        group.add("/users/:id", Noop);

        let mut table = RouteGroup::new("");
        table.add_group(group);
        table.add("/api/status", Noop);

        let found = match_route(&table, "/api/users/7").unwrap();
        assert_eq!(pattern_of(&found), "/users/:id");
        assert_eq!(found.params().get("id"), Some("7"));

        // The group owns the prefix but has no /status route.
        let found = match_route(&table, "/api/status").unwrap();
        assert_eq!(pattern_of(&found), "/api/status");
    }

    #[test]
    fn test_group_root_route() {
        let mut group = RouteGroup::new("/docs");
        group.add("/", Noop);

        let mut table = RouteGroup::new("");
        table.add_group(group);

        assert!(match_route(&table, "/docs").is_some());
        assert!(match_route(&table, "/docsx").is_none());
    }

    #[test]
    fn test_group_middleware_collected() {
        let mut inner = RouteGroup::new("/inner");
        inner.insert(Marker).add("/leaf", Noop);

        let mut outer = RouteGroup::new("/outer");
        outer.insert(Marker).add_group(inner).add("/other", Noop);

        let mut table = RouteGroup::new("");
        table.add_group(outer);

        let deep = match_route(&table, "/outer/inner/leaf").unwrap();
        assert_eq!(deep.middleware().len(), 2);

        // Middleware of a group that missed is not carried over.
        let shallow = match_route(&table, "/outer/other").unwrap();
        assert_eq!(shallow.middleware().len(), 1);
    }

    #[test]
    fn test_no_match() {
        let mut table = RouteGroup::new("");
        table.add("/test", Noop);
        assert!(match_route(&table, "/route/not/match").is_none());
    }
}
