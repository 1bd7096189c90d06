use crate::auth::jwt::{TokenError, verify_token};
use crate::config::Config;
use crate::features::RequestContext;
use crate::{model::Role, models::Claims};
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{
    FromRequest, HttpMessage, HttpRequest, dev::Payload, error::ErrorUnauthorized, web::Data,
};
use futures::future::{Ready, ready};
use tokio_util::sync::CancellationToken;

/// The caller behind a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub role: Role,
    /// Child of the server's shutdown token when one is registered.
    cancellation: CancellationToken,
}

/// Why a request carried no usable bearer identity.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingHeader,
    #[error("Authorization header must be `Bearer <token>`")]
    MalformedHeader,
    #[error("Invalid or expired token: {0}")]
    Token(#[from] TokenError),
    #[error("Token carries an unknown role")]
    UnknownRole,
}

/// Resolves the bearer token in `headers` to a caller.
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthUser, AuthError> {
    let header = headers.get(AUTHORIZATION).ok_or(AuthError::MissingHeader)?;
    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::MalformedHeader)?;

    let claims = verify_token(token, secret)?;
    AuthUser::from_claims(claims).ok_or(AuthError::UnknownRole)
}

impl AuthUser {
    pub fn from_claims(claims: Claims) -> Option<Self> {
        let role = Role::from_id(claims.role)?;
        Some(AuthUser {
            username: claims.sub,
            role,
            cancellation: CancellationToken::new(),
        })
    }

    pub fn require_hr_or_admin(&self) -> actix_web::Result<()> {
        if self.role.manages_leave() {
            Ok(())
        } else {
            tracing::debug!(user = %self.username, role = %self.role, "HR/Admin route refused");
            Err(actix_web::error::ErrorForbidden("HR/Admin only"))
        }
    }

    /// Per-request context; the username becomes the audit actor.
    ///
    /// A dropped connection already drops the handler future, so the only
    /// live signal here is server shutdown: cancelling the
    /// `Data<CancellationToken>` registered on the app stops in-flight
    /// operations at their next repository call.
    pub fn context(&self) -> RequestContext {
        RequestContext::with_cancellation(self.username.clone(), self.cancellation.clone())
    }

    fn bind_shutdown(mut self, req: &HttpRequest) -> Self {
        if let Some(shutdown) = req.app_data::<Data<CancellationToken>>() {
            self.cancellation = shutdown.child_token();
        }
        self
    }
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // Already verified by the middleware
        if let Some(user) = req.extensions().get::<AuthUser>().cloned() {
            return ready(Ok(user.bind_shutdown(req)));
        }

        let Some(config) = req.app_data::<Data<Config>>() else {
            return ready(Err(actix_web::error::ErrorInternalServerError(
                "Config missing",
            )));
        };

        ready(
            authenticate(req.headers(), &config.jwt_secret)
                .map(|user| user.bind_shutdown(req))
                .map_err(ErrorUnauthorized),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApplicationError;
    use actix_web::http::header::HeaderValue;
    use actix_web::test::TestRequest;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn missing_header_is_reported() {
        let result = authenticate(&HeaderMap::new(), "secret");

        assert!(matches!(result, Err(AuthError::MissingHeader)));
    }

    #[test]
    fn non_bearer_scheme_is_malformed() {
        let result = authenticate(&headers("Basic dXNlcjpwYXNz"), "secret");

        assert!(matches!(result, Err(AuthError::MalformedHeader)));
    }

    #[test]
    fn garbage_token_is_a_token_error() {
        let result = authenticate(&headers("Bearer not-a-jwt"), "secret");

        assert!(matches!(result, Err(AuthError::Token(_))));
    }

    #[actix_web::test]
    async fn shutdown_cancels_contexts_of_extracted_users() {
        let shutdown = CancellationToken::new();
        let req = TestRequest::default()
            .app_data(Data::new(shutdown.clone()))
            .to_http_request();
        req.extensions_mut().insert(AuthUser {
            username: "hr.jane".to_string(),
            role: Role::Hr,
            cancellation: CancellationToken::new(),
        });

        let user = AuthUser::extract(&req).await.unwrap();
        let ctx = user.context();
        assert!(ctx.ensure_active().is_ok());

        shutdown.cancel();

        assert!(matches!(ctx.ensure_active(), Err(ApplicationError::Cancelled)));
    }
}
