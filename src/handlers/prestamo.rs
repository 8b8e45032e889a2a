//! Loan screens for the Pañol role.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use validator::Validate;

use crate::app_state::AppState;
use crate::middleware::auth::PanolUser;
use crate::models::{ApiResponse, Docente, Material, Prestamo, PrestamoDetalle};
use crate::prestamo::{PrestamoError, RegistrarPrestamoRequest};

/// Select options for the loan form: active teachers and materials only.
#[derive(Debug, Serialize)]
pub struct PrestamoFormData {
    pub docentes: Vec<Docente>,
    pub materiales: Vec<Material>,
}

pub async fn nuevo_prestamo_form(
    PanolUser(_claims): PanolUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PrestamoFormData>>, (StatusCode, Json<ApiResponse<PrestamoFormData>>)> {
    let docentes = match state.docente_service.listar_activos().await {
        Ok(docentes) => docentes,
        Err(e) => {
            tracing::error!(error = %e, "failed to load loan form teachers");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err("Error al cargar el formulario.")),
            ));
        }
    };

    let materiales = match state.material_service.listar_activos().await {
        Ok(materiales) => materiales,
        Err(e) => {
            tracing::error!(error = %e, "failed to load loan form materials");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err("Error al cargar el formulario.")),
            ));
        }
    };

    Ok(Json(ApiResponse::ok(PrestamoFormData {
        docentes,
        materiales,
    })))
}

/// Register a loan on behalf of the authenticated storekeeper.
pub async fn registrar_prestamo(
    PanolUser(claims): PanolUser,
    State(state): State<AppState>,
    Json(request): Json<RegistrarPrestamoRequest>,
) -> Result<Json<ApiResponse<Prestamo>>, (StatusCode, Json<ApiResponse<Prestamo>>)> {
    if let Err(e) = request.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(e.to_string())),
        ));
    }

    match state.prestamo_service.registrar(&request, claims.sub).await {
        Ok(prestamo) => Ok(Json(ApiResponse::ok(prestamo))),
        Err(e @ (PrestamoError::DocenteNoEncontrado | PrestamoError::MaterialNoEncontrado)) => {
            Err((StatusCode::NOT_FOUND, Json(ApiResponse::err(e.to_string()))))
        }
        Err(
            e @ (PrestamoError::CantidadInvalida
            | PrestamoError::DocenteInactivo
            | PrestamoError::MaterialInactivo
            | PrestamoError::StockInsuficiente { .. }),
        ) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::err(e.to_string())),
        )),
        Err(PrestamoError::Database(e)) => {
            tracing::error!(error = %e, "loan registration rolled back");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err("Error al registrar el préstamo.")),
            ))
        }
    }
}

pub async fn listar_prestamos(
    PanolUser(_claims): PanolUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PrestamoDetalle>>>, (StatusCode, Json<ApiResponse<Vec<PrestamoDetalle>>>)>
{
    match state.prestamo_service.listar().await {
        Ok(prestamos) => Ok(Json(ApiResponse::ok(prestamos))),
        Err(e) => {
            tracing::error!(error = %e, "failed to list loans");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err("Error al listar los préstamos.")),
            ))
        }
    }
}
