//! Admin dashboard counts.

use axum::{extract::State, http::StatusCode, Json};

use crate::app_state::AppState;
use crate::middleware::auth::AdminUser;
use crate::models::{ApiResponse, DashboardCounts, Rol};

pub async fn get_dashboard(
    AdminUser(_claims): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardCounts>>, (StatusCode, Json<ApiResponse<DashboardCounts>>)> {
    let counts = async {
        Ok::<_, anyhow::Error>(DashboardCounts {
            num_docentes: state.docente_service.contar().await?,
            num_materiales: state.material_service.contar().await?,
            num_panol: state.usuario_service.contar_por_rol(Rol::Panol).await?,
            num_admin: state
                .usuario_service
                .contar_por_rol(Rol::Administrador)
                .await?,
        })
    }
    .await;

    match counts {
        Ok(counts) => Ok(Json(ApiResponse::ok(counts))),
        Err(e) => {
            tracing::error!(error = %e, "dashboard counts failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err("Error al cargar el dashboard.")),
            ))
        }
    }
}
