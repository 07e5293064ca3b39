use crate::error::AppError;
use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error as ActixError,
};
use std::{future::Future, pin::Pin};

/// Turns errors escaping the service chain into the JSON error envelope.
pub fn error_handler() -> ErrorHandlerMiddleware {
    ErrorHandlerMiddleware
}

pub struct ErrorHandlerMiddleware;

impl<S, B> Transform<S, ServiceRequest> for ErrorHandlerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = ActixError;
    type Transform = ErrorHandlerService<S>;
    type InitError = ();
    type Future = Pin<Box<dyn Future<Output = Result<Self::Transform, Self::InitError>>>>;

    fn new_transform(&self, service: S) -> Self::Future {
        Box::pin(async move { Ok(ErrorHandlerService { service }) })
    }
}

pub struct ErrorHandlerService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ErrorHandlerService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = ActixError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(
        &self,
        ctx: &mut core::task::Context<'_>,
    ) -> core::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // The request must not be cloned across `call`: the router needs sole ownership.
        let method = req.method().to_string();
        let uri = req.uri().to_string();

        log::debug!("Handling request: method={}, uri={}", method, uri);

        let fut = self.service.call(req);

        Box::pin(async move {
            match fut.await {
                Ok(res) => Ok(res.map_into_boxed_body()),
                Err(err) => {
                    log::error!("Request failed: {} {}", method, uri);
                    log::debug!("Error details: {:?}", err);

                    Err(AppError::from(err).into())
                }
            }
        })
    }
}
