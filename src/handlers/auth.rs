//! Session handlers: login, logout, and the role-based home redirect.

use axum::{
    extract::State,
    http::StatusCode,
    response::Redirect,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::AuthError;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{ApiResponse, LoginRequest, LoginResponse};

/// Role-based landing redirect for `/`.
pub async fn home(AuthenticatedUser(claims): AuthenticatedUser) -> Redirect {
    if claims.es_admin() {
        Redirect::to("/admin/dashboard/")
    } else {
        Redirect::to("/prestamo/nuevo/")
    }
}

pub async fn login_page() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::ok("Ingrese usuario y contraseña."))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), (StatusCode, Json<ApiResponse<LoginResponse>>)> {
    if let Err(e) = request.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(e.to_string())),
        ));
    }

    match state.auth_service.login(&request).await {
        Ok((token, usuario)) => {
            let jar = jar.add(
                Cookie::build(("token", token.clone()))
                    .path("/")
                    .http_only(true),
            );
            Ok((
                jar,
                Json(ApiResponse::ok(LoginResponse {
                    token,
                    usuario: usuario.into(),
                })),
            ))
        }
        Err(e @ (AuthError::InvalidCredentials | AuthError::InactiveAccount)) => Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::err(e.to_string())),
        )),
        Err(e) => {
            tracing::error!(error = %e, "login failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err("Error al iniciar sesión.")),
            ))
        }
    }
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<()>>) {
    let jar = jar.remove(Cookie::build("token").path("/"));
    (jar, Json(ApiResponse::ok(())))
}
