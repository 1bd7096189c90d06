use crate::auth::auth::authenticate;
use crate::config::Config;
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use serde_json::json;

/// Verifies the bearer token once per request and stores the caller in the
/// request extensions for the [`AuthUser`](crate::auth::auth::AuthUser) extractor.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;

    match authenticate(req.headers(), &config.jwt_secret) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.call(req).await
        }
        Err(err) => {
            tracing::debug!(error = %err, path = %req.path(), "Rejected unauthenticated request");
            let resp = HttpResponse::Unauthorized().json(json!({ "message": err.to_string() }));
            Ok(req.into_response(resp.map_into_boxed_body()))
        }
    }
}
