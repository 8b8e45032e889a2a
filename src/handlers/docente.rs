//! Teacher catalog CRUD for the Administrador role.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::docente::{DocenteError, DocenteForm};
use crate::middleware::auth::AdminUser;
use crate::models::{ApiResponse, Docente};

fn error_response<T>(e: DocenteError) -> (StatusCode, Json<ApiResponse<T>>) {
    match e {
        DocenteError::NoEncontrado => (StatusCode::NOT_FOUND, Json(ApiResponse::err(e.to_string()))),
        DocenteError::RutDuplicado | DocenteError::EmailDuplicado => {
            (StatusCode::CONFLICT, Json(ApiResponse::err(e.to_string())))
        }
        DocenteError::Database(e) => {
            tracing::error!(error = %e, "docente catalog query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err("Error interno.")),
            )
        }
    }
}

pub async fn listar_docentes(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Docente>>>, (StatusCode, Json<ApiResponse<Vec<Docente>>>)> {
    match state.docente_service.listar().await {
        Ok(docentes) => Ok(Json(ApiResponse::ok(docentes))),
        Err(e) => Err(error_response(e)),
    }
}

pub async fn crear_docente(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
    Json(form): Json<DocenteForm>,
) -> Result<(StatusCode, Json<ApiResponse<Docente>>), (StatusCode, Json<ApiResponse<Docente>>)> {
    if let Err(e) = form.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(e.to_string())),
        ));
    }

    match state.docente_service.crear(&form).await {
        Ok(docente) => Ok((StatusCode::CREATED, Json(ApiResponse::ok(docente)))),
        Err(e) => Err(error_response(e)),
    }
}

/// Edit-form load: the record as currently stored.
pub async fn obtener_docente(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Docente>>, (StatusCode, Json<ApiResponse<Docente>>)> {
    match state.docente_service.obtener(id).await {
        Ok(Some(docente)) => Ok(Json(ApiResponse::ok(docente))),
        Ok(None) => Err(error_response(DocenteError::NoEncontrado)),
        Err(e) => Err(error_response(e)),
    }
}

pub async fn editar_docente(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<DocenteForm>,
) -> Result<Json<ApiResponse<Docente>>, (StatusCode, Json<ApiResponse<Docente>>)> {
    if let Err(e) = form.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(e.to_string())),
        ));
    }

    match state.docente_service.actualizar(id, &form).await {
        Ok(docente) => Ok(Json(ApiResponse::ok(docente))),
        Err(e) => Err(error_response(e)),
    }
}

/// Confirmation step: returns the record about to be deleted.
pub async fn confirmar_eliminar_docente(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Docente>>, (StatusCode, Json<ApiResponse<Docente>>)> {
    match state.docente_service.obtener(id).await {
        Ok(Some(docente)) => Ok(Json(ApiResponse::ok(docente))),
        Ok(None) => Err(error_response(DocenteError::NoEncontrado)),
        Err(e) => Err(error_response(e)),
    }
}

pub async fn eliminar_docente(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.docente_service.eliminar(id).await {
        Ok(()) => Ok(Json(ApiResponse::ok(()))),
        Err(e) => Err(error_response(e)),
    }
}
