//! Request logging middleware.
//!
//! One line per request, tagged with the view mode the route serves. Link
//! tokens and school ids (a school id is its registration link) are masked in
//! the logged route, the query string is dropped, and the dashboard key is
//! only reported as present or absent.

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::StatusCode;
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use crate::config::ADMIN_KEY_HEADER;

/// Request logger middleware factory.
pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware { service }))
    }
}

pub struct RequestLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
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
        let start = Instant::now();
        let summary = RequestSummary::of(&req);
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            summary.log(res.status(), start.elapsed());
            Ok(res)
        })
    }
}

/// The parts of a request that are safe to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RequestSummary {
    method: String,
    mode: &'static str,
    route: String,
    dashboard_key: bool,
}

impl RequestSummary {
    pub(crate) fn of(req: &ServiceRequest) -> Self {
        let (mode, route) = mask_route(req.path());
        Self {
            method: req.method().to_string(),
            mode,
            route,
            dashboard_key: req.headers().contains_key(ADMIN_KEY_HEADER),
        }
    }

    fn log(&self, status: StatusCode, elapsed: Duration) {
        let status = status.as_u16();
        let duration_ms = elapsed.as_millis();

        if status >= 500 {
            error!(
                target: "api",
                method = %self.method,
                mode = self.mode,
                route = %self.route,
                dashboard_key = self.dashboard_key,
                status,
                duration_ms = %duration_ms,
                "Request failed"
            );
        } else if status >= 400 {
            warn!(
                target: "api",
                method = %self.method,
                mode = self.mode,
                route = %self.route,
                dashboard_key = self.dashboard_key,
                status,
                duration_ms = %duration_ms,
                "Request rejected"
            );
        } else {
            info!(
                target: "api",
                method = %self.method,
                mode = self.mode,
                route = %self.route,
                dashboard_key = self.dashboard_key,
                status,
                duration_ms = %duration_ms,
                "Request completed"
            );
        }
    }
}

/// View mode served by `path`, and `path` with link tokens and school ids masked.
fn mask_route(path: &str) -> (&'static str, String) {
    let mut mode = "public";
    let mut masked = Vec::new();
    let mut segments = path.split('/');

    while let Some(segment) = segments.next() {
        masked.push(segment);
        match segment {
            "view" => mode = "view",
            "dashboard" => mode = "dashboard",
            "register" => {
                mode = "school_form";
                if segments.next().is_some() {
                    masked.push("{token}");
                }
            }
            "schools" if mode == "dashboard" => {
                if segments.next().is_some() {
                    masked.push("{school_id}");
                }
            }
            _ => {}
        }
    }

    (mode, masked.join("/"))
}
