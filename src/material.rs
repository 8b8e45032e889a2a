//! Material catalog service.
//!
//! Stock is catalog data here; the only transactional stock mutation lives
//! in the loan service.

use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::models::Material;

/// Material catalog error
#[derive(Debug, thiserror::Error)]
pub enum MaterialError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Material no encontrado.")]
    NoEncontrado,
}

/// Create/edit form payload.
#[derive(Debug, Deserialize, Validate)]
pub struct MaterialForm {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
    pub descripcion: Option<String>,
    #[validate(range(min = 0, message = "El stock no puede ser negativo."))]
    #[serde(default)]
    pub stock: i32,
    #[serde(default = "default_activo")]
    pub activo: bool,
}

fn default_activo() -> bool {
    true
}

/// Material catalog service
pub struct MaterialService {
    pool: Arc<PgPool>,
}

impl MaterialService {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub async fn listar(&self) -> Result<Vec<Material>, MaterialError> {
        let materiales =
            sqlx::query_as::<_, Material>("SELECT * FROM materiales ORDER BY nombre")
                .fetch_all(&*self.pool)
                .await?;
        Ok(materiales)
    }

    /// Active materials only, for the loan form select.
    pub async fn listar_activos(&self) -> Result<Vec<Material>, MaterialError> {
        let materiales = sqlx::query_as::<_, Material>(
            "SELECT * FROM materiales WHERE activo ORDER BY nombre",
        )
        .fetch_all(&*self.pool)
        .await?;
        Ok(materiales)
    }

    pub async fn obtener(&self, id: Uuid) -> Result<Option<Material>, MaterialError> {
        let material = sqlx::query_as::<_, Material>("SELECT * FROM materiales WHERE id = $1")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(material)
    }

    pub async fn crear(&self, form: &MaterialForm) -> Result<Material, MaterialError> {
        let material = sqlx::query_as::<_, Material>(
            r#"
            INSERT INTO materiales (nombre, descripcion, stock, activo)
            VALUES ($1, $2, $3, $4)
            RETURNING id, nombre, descripcion, stock, activo
            "#,
        )
        .bind(&form.nombre)
        .bind(&form.descripcion)
        .bind(form.stock)
        .bind(form.activo)
        .fetch_one(&*self.pool)
        .await?;

        Ok(material)
    }

    pub async fn actualizar(&self, id: Uuid, form: &MaterialForm) -> Result<Material, MaterialError> {
        let material = sqlx::query_as::<_, Material>(
            r#"
            UPDATE materiales
            SET nombre = $1, descripcion = $2, stock = $3, activo = $4
            WHERE id = $5
            RETURNING id, nombre, descripcion, stock, activo
            "#,
        )
        .bind(&form.nombre)
        .bind(&form.descripcion)
        .bind(form.stock)
        .bind(form.activo)
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?
        .ok_or(MaterialError::NoEncontrado)?;

        Ok(material)
    }

    /// Hard delete. Loans referencing the material cascade away with it.
    pub async fn eliminar(&self, id: Uuid) -> Result<(), MaterialError> {
        let result = sqlx::query("DELETE FROM materiales WHERE id = $1")
            .bind(id)
            .execute(&*self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(MaterialError::NoEncontrado);
        }
        Ok(())
    }

    pub async fn contar(&self) -> Result<i64, MaterialError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM materiales")
            .fetch_one(&*self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_stock_fails_validation() {
        let form = MaterialForm {
            nombre: "Notebook".to_string(),
            descripcion: None,
            stock: -1,
            activo: true,
        };
        assert!(form.validate().is_err());
    }
}
