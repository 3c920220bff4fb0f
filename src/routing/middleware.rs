//! Request interceptors attached to route groups.

use std::sync::Arc;

use axum::{
    extract::Request,
    middleware::{from_fn, Next},
    response::Response,
    routing::MethodRouter,
};
use futures_util::future::BoxFuture;

/// A request interceptor.
///
/// Call `next.run(request)` to continue down the chain, or return a
/// response without calling it to short-circuit. Nothing after a
/// short-circuit runs, including the route handler.
pub trait Middleware: Send + Sync + 'static {
    /// Name used in route registration logs.
    fn name(&self) -> &'static str;

    fn handle(&self, request: Request, next: Next) -> BoxFuture<'static, Response>;
}

/// Wrap an endpoint so `chain` runs in order before it.
pub(crate) fn apply_chain<S>(
    mut endpoint: MethodRouter<S>,
    chain: &[Arc<dyn Middleware>],
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    // The last layer applied becomes the outermost, so walk backwards.
    for middleware in chain.iter().rev() {
        let middleware = Arc::clone(middleware);
        endpoint = endpoint.route_layer(from_fn(move |request: Request, next: Next| {
            middleware.handle(request, next)
        }));
    }
    endpoint
}
