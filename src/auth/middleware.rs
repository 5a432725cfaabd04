use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use log::debug;
use std::rc::Rc;

use crate::error::AppError;
use crate::models::User;
use crate::permissions::DenyReason;

/// Rejects requests that reach a protected path without an identity.
///
/// Must be wrapped inside whatever layer authenticates the request and
/// stores the [`User`] in the extensions. A public path, or any path below it,
/// passes through untouched.
#[derive(Debug, Clone, Default)]
pub struct RequireIdentity {
    public_paths: Rc<Vec<String>>,
}

impl RequireIdentity {
    pub fn new<I, S>(public_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            public_paths: Rc::new(public_paths.into_iter().map(Into::into).collect()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireIdentity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequireIdentityService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireIdentityService {
            service,
            public_paths: Rc::clone(&self.public_paths),
        }))
    }
}

pub struct RequireIdentityService<S> {
    service: S,
    public_paths: Rc<Vec<String>>,
}

impl<S> RequireIdentityService<S> {
    fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|public| is_under(path, public))
    }
}

/// True if `path` is `public` itself or lies below it. Matching stops at
/// segment boundaries, so `/health` does not cover `/healthz`.
fn is_under(path: &str, public: &str) -> bool {
    let public = public.trim_end_matches('/');
    match path.strip_prefix(public) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

impl<S, B> Service<ServiceRequest> for RequireIdentityService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Identity is attached upstream; here we only check it is present
        let authenticated = req.extensions().contains::<User>();
        if authenticated || self.is_public(req.path()) {
            return Box::pin(self.service.call(req));
        }

        // Handlers never see anonymous requests on protected paths
        debug!("{} {} rejected: no identity", req.method(), req.path());
        let error = AppError::from(DenyReason::Unauthenticated);
        Box::pin(async move { Err(error.into()) })
    }
}
