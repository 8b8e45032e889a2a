//! Role-gating extractors.
//!
//! Every screen is reached through one of these. Rejections are redirects,
//! not errors: a missing or invalid session goes to `/login`, a valid
//! session with the wrong role goes back to `/`, which forwards to the
//! role's own landing page.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};

use crate::auth::{AuthService, Claims};

/// Any valid session, regardless of role.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

/// A session with the Pañol role.
#[derive(Debug, Clone)]
pub struct PanolUser(pub Claims);

/// A session with the Administrador role (or a superuser).
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

/// `Authorization: Bearer` header first, `token` cookie as fallback.
async fn token_from_parts<S: Send + Sync>(parts: &mut Parts, state: &S) -> Option<String> {
    if let Ok(TypedHeader(Authorization(bearer))) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
    {
        return Some(bearer.token().to_string());
    }

    CookieJar::from_headers(&parts.headers)
        .get("token")
        .map(|cookie| cookie.value().to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_service = Arc::<AuthService>::from_ref(state);

        let token = token_from_parts(parts, state)
            .await
            .ok_or_else(|| Redirect::to("/login"))?;

        let claims = auth_service.verify_token(&token).map_err(|e| {
            tracing::warn!(error = %e, "rejected session token");
            Redirect::to("/login")
        })?;

        Ok(AuthenticatedUser(claims))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PanolUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(claims) =
            AuthenticatedUser::from_request_parts(parts, state).await?;

        if !claims.es_panol() {
            return Err(Redirect::to("/"));
        }
        Ok(PanolUser(claims))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(claims) =
            AuthenticatedUser::from_request_parts(parts, state).await?;

        if !claims.es_admin() {
            return Err(Redirect::to("/"));
        }
        Ok(AdminUser(claims))
    }
}
