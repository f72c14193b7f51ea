//! The middleware trait and chain.
//!
//! A [`Middleware`] sees the request before the host routes it and the
//! response after the host produces it. It receives the request-scoped
//! [`RequestState`], the request, and a [`Next`] it must invoke at most once:
//! calling [`Next::run`] continues toward the host handler (possibly with a
//! rewritten request URI); returning without calling it short-circuits the
//! chain with the middleware's own response.

use crate::state::RequestState;
use crate::types::{Request, Response};
use std::future::Future;
use std::pin::Pin;

/// A boxed future that returns a response.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A stage in the request-handling chain.
pub trait Middleware: Send + Sync + 'static {
    /// Returns the name of this stage, used in logs.
    fn name(&self) -> &'static str;

    /// Handles the request, invoking `next` to continue the chain.
    fn handle<'a>(
        &'a self,
        state: &'a mut RequestState,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, Response>;
}

/// The remainder of the chain after the current stage.
///
/// Consumed by [`Next::run`], so a stage can only continue once.
pub struct Next<'a> {
    inner: NextInner<'a>,
}

enum NextInner<'a> {
    Stage {
        middleware: &'a dyn Middleware,
        next: Box<Next<'a>>,
    },
    Handler(Box<dyn FnOnce(&mut RequestState, Request) -> BoxFuture<'static, Response> + Send + 'a>),
}

impl<'a> Next<'a> {
    /// Creates a `Next` that will invoke `middleware` before the rest of the
    /// chain.
    #[must_use]
    pub fn stage(middleware: &'a dyn Middleware, next: Next<'a>) -> Self {
        Self {
            inner: NextInner::Stage {
                middleware,
                next: Box::new(next),
            },
        }
    }

    /// Creates a terminal `Next` that invokes the host handler.
    #[must_use]
    pub fn handler<F>(f: F) -> Self
    where
        F: FnOnce(&mut RequestState, Request) -> BoxFuture<'static, Response> + Send + 'a,
    {
        Self {
            inner: NextInner::Handler(Box::new(f)),
        }
    }

    /// Invokes the next stage or the host handler.
    pub async fn run(self, state: &mut RequestState, request: Request) -> Response {
        match self.inner {
            NextInner::Stage { middleware, next } => {
                middleware.handle(state, request, *next).await
            }
            NextInner::Handler(handler) => handler(state, request).await,
        }
    }
}
