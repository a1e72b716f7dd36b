//! Prometheus middleware that can be switched off at runtime.
//!
//! `App::wrap` fixes the middleware type at compile time, so an absent
//! registry still needs a layer; both variants box the inner service.

use actix_service::boxed::{self, BoxService};
use actix_service::{Service, ServiceExt as _, Transform};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::PrometheusMetrics;
use futures_util::future::LocalBoxFuture;

type BoxedService = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;

#[derive(Clone)]
pub(crate) struct OptionalMetrics(Option<PrometheusMetrics>);

impl From<Option<PrometheusMetrics>> for OptionalMetrics {
    fn from(metrics: Option<PrometheusMetrics>) -> Self {
        Self(metrics)
    }
}

impl<S, B> Transform<S, ServiceRequest> for OptionalMetrics
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxedService;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let Some(metrics) = self.0.clone() else {
            let passthrough = service.map(ServiceResponse::map_into_boxed_body);
            return Box::pin(async move { Ok(boxed::service(passthrough)) });
        };
        let pending = Compat::new(metrics).new_transform(service);
        Box::pin(async move { Ok(boxed::service(pending.await?)) })
    }
}
