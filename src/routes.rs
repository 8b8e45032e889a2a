//! Route definitions for the lending service

use axum::{
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;
use crate::handlers::*;

async fn health_check() -> &'static str {
    "OK"
}

/// Assemble the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .merge(auth_routes())
        .merge(prestamo_routes())
        .merge(admin_routes())
        .with_state(state)
}

// Session routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
}

// Pañol routes
pub fn prestamo_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/prestamo/nuevo/",
            get(nuevo_prestamo_form).post(registrar_prestamo),
        )
        .route("/prestamo/listado/", get(listar_prestamos))
}

// Administrador routes
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/dashboard/", get(get_dashboard))
        // Docentes
        .route("/admin/docentes/", get(listar_docentes))
        .route("/admin/docentes/nuevo/", post(crear_docente))
        .route(
            "/admin/docentes/editar/:id",
            get(obtener_docente).post(editar_docente),
        )
        .route(
            "/admin/docentes/eliminar/:id",
            get(confirmar_eliminar_docente).post(eliminar_docente),
        )
        // Materiales
        .route("/admin/materiales/", get(listar_materiales))
        .route("/admin/materiales/nuevo/", post(crear_material))
        .route(
            "/admin/materiales/editar/:id",
            get(obtener_material).post(editar_material),
        )
        .route(
            "/admin/materiales/eliminar/:id",
            get(confirmar_eliminar_material).post(eliminar_material),
        )
        // Usuarios
        .route("/admin/usuarios/", get(listar_usuarios))
        .route("/admin/usuarios/nuevo/", post(crear_usuario))
        .route(
            "/admin/usuarios/editar/:id",
            get(obtener_usuario).post(editar_usuario),
        )
        .route(
            "/admin/usuarios/eliminar/:id",
            get(confirmar_eliminar_usuario).post(eliminar_usuario),
        )
}
