//! Request/response types for authentication and account management

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::Rol;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "El nombre de usuario es obligatorio."))]
    pub username: String,
    #[validate(length(min = 1, message = "La contraseña es obligatoria."))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub usuario: UsuarioResponse,
}

/// Account info sent to clients (never includes the password hash).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UsuarioResponse {
    pub id: Uuid,
    pub username: String,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub rol: Rol,
    pub activo: bool,
}
