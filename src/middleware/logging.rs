use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, HttpMessage, HttpRequest};
use futures::future::{ok, Ready};
use std::future::Future;
use std::pin::Pin;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request id, stored in request extensions and echoed in `x-request-id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Id assigned by [`Logging`], or a fresh one when the middleware is absent.
    pub fn of(req: &HttpRequest) -> Self {
        req.extensions().get::<RequestId>().copied().unwrap_or_else(|| RequestId(Uuid::new_v4()))
    }
}

/// Access log: request id, peer, method, path, status and latency.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use coder_guard::middleware::Logging;
///
/// App::new()
///     .wrap(Logging);
/// ```
pub struct Logging;

impl<S, B> Transform<S, ServiceRequest> for Logging
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = LoggingMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(LoggingMiddleware { service })
    }
}

pub struct LoggingMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for LoggingMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(
        &self,
        ctx: &mut core::task::Context<'_>,
    ) -> core::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = std::time::Instant::now();
        let request_id = Uuid::new_v4();
        let peer = req.connection_info().realip_remote_addr().unwrap_or("-").to_string();
        let line = format!("{} {}", req.method(), req.path());
        req.extensions_mut().insert(RequestId(request_id));

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
                res.headers_mut().insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }

            let status = res.status();
            let elapsed = start.elapsed().as_millis();
            if status.is_server_error() {
                log::warn!("[{}] {} {} {} - {}ms", request_id, peer, line, status.as_u16(), elapsed);
            } else {
                log::info!("[{}] {} {} {} - {}ms", request_id, peer, line, status.as_u16(), elapsed);
            }
            Ok(res)
        })
    }
}
