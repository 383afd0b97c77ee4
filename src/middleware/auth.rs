//! Shared-secret admin token middleware

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use futures::future::BoxFuture;
use std::{
    sync::Arc,
    task::{Context, Poll},
};
use subtle::ConstantTimeEq;
use tower::{Layer, Service};
use tracing::warn;

use crate::error::AppError;

/// Header carrying the admin token
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Admin token layer.
///
/// Built without a token, the layer lets every request through. That open
/// mode exists for local use; deployments must configure a token.
#[derive(Clone)]
pub struct AdminTokenLayer {
    token: Option<Arc<str>>,
}

impl AdminTokenLayer {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()).map(Arc::from),
        }
    }
}

impl<S> Layer<S> for AdminTokenLayer {
    type Service = AdminTokenMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AdminTokenMiddleware {
            inner,
            token: self.token.clone(),
        }
    }
}

/// Admin token middleware service
#[derive(Clone)]
pub struct AdminTokenMiddleware<S> {
    inner: S,
    token: Option<Arc<str>>,
}

impl<S> Service<Request<Body>> for AdminTokenMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        // No token configured, allow all requests
        let Some(expected) = self.token.as_deref() else {
            let future = self.inner.call(request);
            return Box::pin(async move { future.await });
        };

        let matches: Option<bool> = request
            .headers()
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(|token| token.as_bytes().ct_eq(expected.as_bytes()).into());

        match matches {
            Some(true) => {
                let future = self.inner.call(request);
                Box::pin(async move { future.await })
            }
            Some(false) => {
                warn!(path = %request.uri().path(), "Invalid admin token provided");
                Box::pin(async move {
                    Ok(AppError::Unauthorized("invalid admin token".to_string()).into_response())
                })
            }
            None => {
                warn!(path = %request.uri().path(), "No admin token provided");
                Box::pin(async move {
                    Ok(AppError::Unauthorized("admin token required".to_string()).into_response())
                })
            }
        }
    }
}
