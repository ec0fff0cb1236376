//! Route table data model.
//!
//! # Design Decisions
//! - A route table is an ordered list; registration order is match priority
//! - Groups own their entries and strip their prefix before delegating
//! - Registration takes `&mut self`, so the table is frozen once shared

use std::fmt;
use std::sync::Arc;

use crate::http::resource::Resource;
use crate::http::middleware::Middleware;
use crate::routing::pattern::{normalize, Pattern, PatternError};

/// A single pattern bound to one resource.
pub struct Route {
    pattern: Pattern,
    resource: Arc<dyn Resource>,
}

impl Route {
    /// Parse `pattern` and bind it to `resource`.
    pub fn new(pattern: &str, resource: Arc<dyn Resource>) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: Pattern::parse(pattern)?,
            resource,
        })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn resource(&self) -> &Arc<dyn Resource> {
        &self.resource
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// One routable entry of a table.
pub(crate) enum Entry {
    Route(Arc<Route>),
    Group(RouteGroup),
}

/// A prefix-scoped, ordered collection of routes and nested groups.
///
/// Middleware inserted on a group only runs for requests resolved inside it.
pub struct RouteGroup {
    prefix: String,
    entries: Vec<Entry>,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl RouteGroup {
    /// Create an empty group mounted at `prefix`.
    ///
    /// # Panics
    /// If a non-empty prefix does not start with `/`.
    pub fn new(prefix: &str) -> Self {
        assert!(
            prefix.is_empty() || prefix.starts_with('/'),
            "route group prefix {prefix:?} must start with '/'"
        );
        let prefix = match normalize(prefix) {
            "/" => "",
            p => p,
        };
        Self {
            prefix: prefix.to_string(),
            entries: Vec::new(),
            middleware: Vec::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Bind `pattern` (relative to the prefix) to `resource`.
    ///
    /// # Panics
    /// If the pattern is malformed; see [`PatternError`].
    pub fn add(&mut self, pattern: &str, resource: impl Resource) -> &mut Self {
        self.add_shared(pattern, Arc::new(resource))
    }

    /// Like [`RouteGroup::add`] for a resource shared between several routes.
    pub fn add_shared(&mut self, pattern: &str, resource: Arc<dyn Resource>) -> &mut Self {
        let route = Route::new(pattern, resource).unwrap_or_else(|e| panic!("invalid route: {e}"));
        self.entries.push(Entry::Route(Arc::new(route)));
        self
    }

    /// Nest `group` under this one.
    pub fn add_group(&mut self, group: RouteGroup) -> &mut Self {
        self.entries.push(Entry::Group(group));
        self
    }

    /// Append group-scoped middleware.
    pub fn insert(&mut self, middleware: impl Middleware) -> &mut Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Number of direct entries (routes and groups).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn middleware_len(&self) -> usize {
        self.middleware.len()
    }

    /// Every reachable pattern with its enclosing prefixes applied, in match order.
    pub fn effective_patterns(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_patterns(&self.prefix, &mut out);
        out
    }

    fn collect_patterns(&self, base: &str, out: &mut Vec<String>) {
        for entry in &self.entries {
            match entry {
                Entry::Route(route) => out.push(format!("{base}{}", route.pattern())),
                Entry::Group(group) => {
                    group.collect_patterns(&format!("{base}{}", group.prefix), out)
                }
            }
        }
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub(crate) fn middleware(&self) -> &[Arc<dyn Middleware>] {
        &self.middleware
    }

    /// Remainder of `path` below this group's prefix, on a segment boundary.
    pub(crate) fn strip_prefix<'p>(&self, path: &'p str) -> Option<&'p str> {
        if self.prefix.is_empty() {
            return Some(path);
        }
        let rest = path.strip_prefix(self.prefix.as_str())?;
        if rest.is_empty() {
            Some("/")
        } else if rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }
}

impl fmt::Debug for RouteGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteGroup")
            .field("prefix", &self.prefix)
            .field("entries", &self.entries.len())
            .field("middleware", &self.middleware.len())
            .finish()
    }
}
