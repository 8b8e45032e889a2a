//! Account CRUD for the Administrador role.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::middleware::auth::AdminUser;
use crate::models::{ApiResponse, UsuarioResponse};
use crate::usuario::{CrearUsuarioRequest, EditarUsuarioRequest, UsuarioError};

fn error_response<T>(e: UsuarioError) -> (StatusCode, Json<ApiResponse<T>>) {
    match e {
        UsuarioError::NoEncontrado => {
            (StatusCode::NOT_FOUND, Json(ApiResponse::err(e.to_string())))
        }
        UsuarioError::UsernameDuplicado => {
            (StatusCode::CONFLICT, Json(ApiResponse::err(e.to_string())))
        }
        UsuarioError::Database(e) => {
            tracing::error!(error = %e, "account query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err("Error interno.")),
            )
        }
        UsuarioError::Hash(e) => {
            tracing::error!(error = %e, "password hashing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err("Error interno.")),
            )
        }
    }
}

pub async fn listar_usuarios(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UsuarioResponse>>>, (StatusCode, Json<ApiResponse<Vec<UsuarioResponse>>>)>
{
    match state.usuario_service.listar().await {
        Ok(usuarios) => Ok(Json(ApiResponse::ok(
            usuarios.into_iter().map(UsuarioResponse::from).collect(),
        ))),
        Err(e) => Err(error_response(e)),
    }
}

pub async fn crear_usuario(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
    Json(request): Json<CrearUsuarioRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UsuarioResponse>>), (StatusCode, Json<ApiResponse<UsuarioResponse>>)>
{
    if let Err(e) = request.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(e.to_string())),
        ));
    }

    match state.usuario_service.crear(&request).await {
        Ok(usuario) => Ok((StatusCode::CREATED, Json(ApiResponse::ok(usuario.into())))),
        Err(e) => Err(error_response(e)),
    }
}

/// Edit-form load: the record as currently stored.
pub async fn obtener_usuario(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UsuarioResponse>>, (StatusCode, Json<ApiResponse<UsuarioResponse>>)> {
    match state.usuario_service.obtener(id).await {
        Ok(Some(usuario)) => Ok(Json(ApiResponse::ok(usuario.into()))),
        Ok(None) => Err(error_response(UsuarioError::NoEncontrado)),
        Err(e) => Err(error_response(e)),
    }
}

/// The role in the payload replaces the previous one wholesale.
pub async fn editar_usuario(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<EditarUsuarioRequest>,
) -> Result<Json<ApiResponse<UsuarioResponse>>, (StatusCode, Json<ApiResponse<UsuarioResponse>>)> {
    if let Err(e) = request.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(e.to_string())),
        ));
    }

    match state.usuario_service.actualizar(id, &request).await {
        Ok(usuario) => Ok(Json(ApiResponse::ok(usuario.into()))),
        Err(e) => Err(error_response(e)),
    }
}

/// Confirmation step: returns the record about to be deleted.
pub async fn confirmar_eliminar_usuario(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UsuarioResponse>>, (StatusCode, Json<ApiResponse<UsuarioResponse>>)> {
    match state.usuario_service.obtener(id).await {
        Ok(Some(usuario)) => Ok(Json(ApiResponse::ok(usuario.into()))),
        Ok(None) => Err(error_response(UsuarioError::NoEncontrado)),
        Err(e) => Err(error_response(e)),
    }
}

pub async fn eliminar_usuario(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.usuario_service.eliminar(id).await {
        Ok(()) => Ok(Json(ApiResponse::ok(()))),
        Err(e) => Err(error_response(e)),
    }
}
