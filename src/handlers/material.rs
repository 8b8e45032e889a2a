//! Material catalog CRUD for the Administrador role.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::material::{MaterialError, MaterialForm};
use crate::middleware::auth::AdminUser;
use crate::models::{ApiResponse, Material};

fn error_response<T>(e: MaterialError) -> (StatusCode, Json<ApiResponse<T>>) {
    match e {
        MaterialError::NoEncontrado => {
            (StatusCode::NOT_FOUND, Json(ApiResponse::err(e.to_string())))
        }
        MaterialError::Database(e) => {
            tracing::error!(error = %e, "material catalog query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err("Error interno.")),
            )
        }
    }
}

pub async fn listar_materiales(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Material>>>, (StatusCode, Json<ApiResponse<Vec<Material>>>)> {
    match state.material_service.listar().await {
        Ok(materiales) => Ok(Json(ApiResponse::ok(materiales))),
        Err(e) => Err(error_response(e)),
    }
}

pub async fn crear_material(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
    Json(form): Json<MaterialForm>,
) -> Result<(StatusCode, Json<ApiResponse<Material>>), (StatusCode, Json<ApiResponse<Material>>)> {
    if let Err(e) = form.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(e.to_string())),
        ));
    }

    match state.material_service.crear(&form).await {
        Ok(material) => Ok((StatusCode::CREATED, Json(ApiResponse::ok(material)))),
        Err(e) => Err(error_response(e)),
    }
}

/// Edit-form load: the record as currently stored.
pub async fn obtener_material(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Material>>, (StatusCode, Json<ApiResponse<Material>>)> {
    match state.material_service.obtener(id).await {
        Ok(Some(material)) => Ok(Json(ApiResponse::ok(material))),
        Ok(None) => Err(error_response(MaterialError::NoEncontrado)),
        Err(e) => Err(error_response(e)),
    }
}

pub async fn editar_material(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<MaterialForm>,
) -> Result<Json<ApiResponse<Material>>, (StatusCode, Json<ApiResponse<Material>>)> {
    if let Err(e) = form.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(e.to_string())),
        ));
    }

    match state.material_service.actualizar(id, &form).await {
        Ok(material) => Ok(Json(ApiResponse::ok(material))),
        Err(e) => Err(error_response(e)),
    }
}

/// Confirmation step: returns the record about to be deleted.
pub async fn confirmar_eliminar_material(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Material>>, (StatusCode, Json<ApiResponse<Material>>)> {
    match state.material_service.obtener(id).await {
        Ok(Some(material)) => Ok(Json(ApiResponse::ok(material))),
        Ok(None) => Err(error_response(MaterialError::NoEncontrado)),
        Err(e) => Err(error_response(e)),
    }
}

pub async fn eliminar_material(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.material_service.eliminar(id).await {
        Ok(()) => Ok(Json(ApiResponse::ok(()))),
        Err(e) => Err(error_response(e)),
    }
}
