//! Account management service.

use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Rol, Usuario};

/// Account management error
#[derive(Debug, thiserror::Error)]
pub enum UsuarioError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Usuario no encontrado.")]
    NoEncontrado,
    #[error("Ya existe un usuario con ese nombre.")]
    UsernameDuplicado,
    #[error("Password hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Account creation payload. The role is assigned at creation.
#[derive(Debug, Deserialize, Validate)]
pub struct CrearUsuarioRequest {
    #[validate(length(min = 1, max = 150, message = "El nombre de usuario es obligatorio."))]
    pub username: String,
    #[validate(length(min = 8, message = "La contraseña debe tener al menos 8 caracteres."))]
    pub password: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default)]
    pub email: String,
    pub rol: Rol,
}

/// Account edit payload. The role given here replaces the previous one
/// wholesale; the password is not editable through this form.
#[derive(Debug, Deserialize, Validate)]
pub struct EditarUsuarioRequest {
    #[validate(length(min = 1, max = 150, message = "El nombre de usuario es obligatorio."))]
    pub username: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_activo")]
    pub activo: bool,
    pub rol: Rol,
}

fn default_activo() -> bool {
    true
}

/// Account management service
pub struct UsuarioService {
    pool: Arc<PgPool>,
}

impl UsuarioService {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// List manageable accounts. Superusers are not shown in the admin
    /// screens, matching the original behavior.
    pub async fn listar(&self) -> Result<Vec<Usuario>, UsuarioError> {
        let usuarios = sqlx::query_as::<_, Usuario>(
            "SELECT * FROM usuarios WHERE NOT superusuario ORDER BY username",
        )
        .fetch_all(&*self.pool)
        .await?;
        Ok(usuarios)
    }

    pub async fn obtener(&self, id: Uuid) -> Result<Option<Usuario>, UsuarioError> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(usuario)
    }

    pub async fn crear(&self, req: &CrearUsuarioRequest) -> Result<Usuario, UsuarioError> {
        self.check_username(&req.username, None).await?;

        let password_hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)?;

        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (username, password_hash, nombre, apellido, email, rol)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&req.username)
        .bind(&password_hash)
        .bind(&req.nombre)
        .bind(&req.apellido)
        .bind(&req.email)
        .bind(req.rol)
        .fetch_one(&*self.pool)
        .await?;

        Ok(usuario)
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        req: &EditarUsuarioRequest,
    ) -> Result<Usuario, UsuarioError> {
        self.check_username(&req.username, Some(id)).await?;

        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            UPDATE usuarios
            SET username = $1, nombre = $2, apellido = $3, email = $4, activo = $5, rol = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&req.username)
        .bind(&req.nombre)
        .bind(&req.apellido)
        .bind(&req.email)
        .bind(req.activo)
        .bind(req.rol)
        .fetch_optional(&*self.pool)
        .await?
        .ok_or(UsuarioError::NoEncontrado)?;

        Ok(usuario)
    }

    /// Hard delete. Loans registered by the account keep existing with a
    /// null acting-user reference.
    pub async fn eliminar(&self, id: Uuid) -> Result<(), UsuarioError> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&*self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(UsuarioError::NoEncontrado);
        }
        Ok(())
    }

    pub async fn contar_por_rol(&self, rol: Rol) -> Result<i64, UsuarioError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuarios WHERE rol = $1")
            .bind(rol)
            .fetch_one(&*self.pool)
            .await?;
        Ok(count)
    }

    async fn check_username(&self, username: &str, exclude: Option<Uuid>) -> Result<(), UsuarioError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM usuarios WHERE username = $1 AND ($2::uuid IS NULL OR id <> $2)",
        )
        .bind(username)
        .bind(exclude)
        .fetch_one(&*self.pool)
        .await?;

        if count > 0 {
            return Err(UsuarioError::UsernameDuplicado);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_password_fails_validation() {
        let req = CrearUsuarioRequest {
            username: "panolero".to_string(),
            password: "corta".to_string(),
            nombre: String::new(),
            apellido: String::new(),
            email: String::new(),
            rol: Rol::Panol,
        };
        assert!(req.validate().is_err());
    }
}
