//! Route table construction and compilation.
//!
//! # Responsibilities
//! - Collect routes into nested groups sharing a prefix and middleware
//! - Flatten groups into concrete routes at startup
//! - Reject malformed, duplicate and conflicting registrations
//! - Freeze the result into an axum `Router`
//!
//! # Design Decisions
//! - Immutable after compilation (thread-safe without locks)
//! - Duplicates are an error, never silently shadowed
//! - Parent middleware runs before child middleware

use std::sync::Arc;

use axum::{
    handler::Handler,
    http::Method,
    routing::{self, MethodRouter},
    Router,
};
use thiserror::Error;

use crate::routing::middleware::{apply_chain, Middleware};
use crate::routing::pattern::{join_paths, PathPattern, PatternError};

/// Errors raised while compiling a route table.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern {
        pattern: String,
        reason: PatternError,
    },

    #[error("route {method} {path} is registered more than once")]
    DuplicateRoute { method: Method, path: String },

    #[error("route `{path}` names parameter `{ours}` where `{existing}` already uses `{theirs}`")]
    ParameterConflict {
        path: String,
        ours: String,
        existing: String,
        theirs: String,
    },
}

struct RouteEntry<S> {
    method: Method,
    path: String,
    endpoint: MethodRouter<S>,
}

/// A set of routes sharing a path prefix and a middleware chain.
pub struct RouteGroup<S = ()> {
    prefix: String,
    middleware: Vec<Arc<dyn Middleware>>,
    routes: Vec<RouteEntry<S>>,
    children: Vec<RouteGroup<S>>,
}

impl<S> RouteGroup<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            middleware: Vec::new(),
            routes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append a middleware to this group's chain.
    pub fn middleware<M: Middleware>(mut self, middleware: M) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Nest a child group under this group's prefix.
    pub fn group(mut self, child: RouteGroup<S>) -> Self {
        self.children.push(child);
        self
    }

    pub fn get<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.add(Method::GET, path, routing::get(handler))
    }

    pub fn post<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.add(Method::POST, path, routing::post(handler))
    }

    pub fn put<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.add(Method::PUT, path, routing::put(handler))
    }

    pub fn patch<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.add(Method::PATCH, path, routing::patch(handler))
    }

    pub fn delete<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.add(Method::DELETE, path, routing::delete(handler))
    }

    fn add(mut self, method: Method, path: &str, endpoint: MethodRouter<S>) -> Self {
        self.routes.push(RouteEntry {
            method,
            path: path.to_string(),
            endpoint,
        });
        self
    }

    fn flatten(
        self,
        parent_prefix: &str,
        parent_chain: &[Arc<dyn Middleware>],
        out: &mut Vec<CompiledRoute<S>>,
    ) -> Result<(), RoutingError> {
        let prefix = join_paths(parent_prefix, &self.prefix);
        let mut chain = parent_chain.to_vec();
        chain.extend(self.middleware);

        for route in self.routes {
            let full_path = join_paths(&prefix, &route.path);
            let pattern =
                PathPattern::parse(&full_path).map_err(|reason| RoutingError::InvalidPattern {
                    pattern: full_path.clone(),
                    reason,
                })?;
            out.push(CompiledRoute {
                method: route.method,
                pattern,
                chain: chain.clone(),
                endpoint: route.endpoint,
            });
        }

        for child in self.children {
            child.flatten(&prefix, &chain, out)?;
        }
        Ok(())
    }
}

struct CompiledRoute<S> {
    method: Method,
    pattern: PathPattern,
    chain: Vec<Arc<dyn Middleware>>,
    endpoint: MethodRouter<S>,
}

/// The root of all registered routes.
///
/// Built once during initialization, then compiled with
/// [`RouteTable::into_router`].
pub struct RouteTable<S = ()> {
    root: RouteGroup<S>,
}

impl<S> Default for RouteTable<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> RouteTable<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            root: RouteGroup::new(""),
        }
    }

    pub fn group(mut self, group: RouteGroup<S>) -> Self {
        self.root = self.root.group(group);
        self
    }

    pub fn get<H, T>(mut self, path: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.root = self.root.get(path, handler);
        self
    }

    pub fn post<H, T>(mut self, path: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.root = self.root.post(path, handler);
        self
    }

    pub fn delete<H, T>(mut self, path: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.root = self.root.delete(path, handler);
        self
    }

    /// Validate every route and build the router that serves them.
    pub fn into_router(self, state: S) -> Result<Router, RoutingError> {
        let mut routes = Vec::new();
        self.root.flatten("", &[], &mut routes)?;
        check_conflicts(&routes)?;

        let mut router = Router::new();
        for route in routes {
            let path = route.pattern.to_axum_path();
            tracing::debug!(
                method = %route.method,
                path = %path,
                middleware = ?route.chain.iter().map(|m| m.name()).collect::<Vec<_>>(),
                "Route registered"
            );
            router = router.route(&path, apply_chain(route.endpoint, &route.chain));
        }

        Ok(router.with_state(state))
    }
}

fn check_conflicts<S>(routes: &[CompiledRoute<S>]) -> Result<(), RoutingError> {
    for (i, route) in routes.iter().enumerate() {
        for earlier in &routes[..i] {
            if let Some((ours, theirs)) = route.pattern.param_name_clash(&earlier.pattern) {
                return Err(RoutingError::ParameterConflict {
                    path: route.pattern.to_string(),
                    ours: ours.to_string(),
                    existing: earlier.pattern.to_string(),
                    theirs: theirs.to_string(),
                });
            }
            if route.method == earlier.method && route.pattern.same_shape(&earlier.pattern) {
                return Err(RoutingError::DuplicateRoute {
                    method: route.method.clone(),
                    path: route.pattern.to_string(),
                });
            }
        }
    }
    Ok(())
}
