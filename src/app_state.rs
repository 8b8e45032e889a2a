//! Application state shared across handlers

use std::sync::Arc;

use crate::auth::AuthService;
use crate::docente::DocenteService;
use crate::material::MaterialService;
use crate::prestamo::PrestamoService;
use crate::usuario::UsuarioService;

use axum::extract::FromRef;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub prestamo_service: Arc<PrestamoService>,
    pub docente_service: Arc<DocenteService>,
    pub material_service: Arc<MaterialService>,
    pub usuario_service: Arc<UsuarioService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        prestamo_service: Arc<PrestamoService>,
        docente_service: Arc<DocenteService>,
        material_service: Arc<MaterialService>,
        usuario_service: Arc<UsuarioService>,
        auth_service: Arc<AuthService>,
    ) -> Self {
        Self {
            prestamo_service,
            docente_service,
            material_service,
            usuario_service,
            auth_service,
        }
    }
}

impl FromRef<AppState> for Arc<PrestamoService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.prestamo_service.clone()
    }
}

impl FromRef<AppState> for Arc<DocenteService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.docente_service.clone()
    }
}

impl FromRef<AppState> for Arc<MaterialService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.material_service.clone()
    }
}

impl FromRef<AppState> for Arc<UsuarioService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.usuario_service.clone()
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}
