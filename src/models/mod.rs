//! Data models for the lending service

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod auth;
pub use auth::*;

/// Account model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Usuario {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub rol: Rol,
    pub superusuario: bool,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Usuario> for UsuarioResponse {
    fn from(u: Usuario) -> Self {
        Self {
            id: u.id,
            username: u.username,
            nombre: u.nombre,
            apellido: u.apellido,
            email: u.email,
            rol: u.rol,
            activo: u.activo,
        }
    }
}

/// User roles
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    Panol,
    Administrador,
}

impl std::fmt::Display for Rol {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Rol::Panol => write!(f, "panol"),
            Rol::Administrador => write!(f, "administrador"),
        }
    }
}

impl std::str::FromStr for Rol {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "panol" => Ok(Rol::Panol),
            "administrador" => Ok(Rol::Administrador),
            _ => Err(()),
        }
    }
}

/// Teacher (borrower) model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Docente {
    pub id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub rut: String,
    pub email: String,
    pub activo: bool,
}

/// Lendable inventory item
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Material {
    pub id: Uuid,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub stock: i32,
    pub activo: bool,
}

/// Loan record. Loans are immutable once registered.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Prestamo {
    pub id: Uuid,
    pub docente_id: Uuid,
    pub material_id: Uuid,
    pub cantidad: i32,
    pub fecha_prestamo: DateTime<Utc>,
    pub usuario_id: Option<Uuid>,
}

/// Loan row joined with display names for the listing screen.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct PrestamoDetalle {
    pub id: Uuid,
    pub docente: String,
    pub material: String,
    pub cantidad: i32,
    pub fecha_prestamo: DateTime<Utc>,
    pub registrado_por: Option<String>,
}

/// Counts shown on the admin dashboard.
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardCounts {
    pub num_docentes: i64,
    pub num_materiales: i64,
    pub num_panol: i64,
    pub num_admin: i64,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rol_round_trips_through_str() {
        for rol in [Rol::Panol, Rol::Administrador] {
            let parsed: Rol = rol.to_string().parse().unwrap();
            assert_eq!(parsed, rol);
        }
        assert!("docente".parse::<Rol>().is_err());
    }
}
