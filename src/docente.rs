//! Teacher catalog service.

use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::models::Docente;

/// Teacher catalog error
#[derive(Debug, thiserror::Error)]
pub enum DocenteError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Docente no encontrado.")]
    NoEncontrado,
    #[error("Ya existe un docente con ese RUT.")]
    RutDuplicado,
    #[error("Ya existe un docente con ese email.")]
    EmailDuplicado,
}

/// Create/edit form payload. Edits replace every field, as the original
/// admin form does.
#[derive(Debug, Deserialize, Validate)]
pub struct DocenteForm {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
    #[validate(length(min = 1, message = "El apellido es obligatorio."))]
    pub apellido: String,
    #[validate(length(min = 1, max = 12, message = "RUT inválido."))]
    pub rut: String,
    #[validate(email(message = "Email inválido."))]
    pub email: String,
    #[serde(default = "default_activo")]
    pub activo: bool,
}

fn default_activo() -> bool {
    true
}

/// Teacher catalog service
pub struct DocenteService {
    pool: Arc<PgPool>,
}

impl DocenteService {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub async fn listar(&self) -> Result<Vec<Docente>, DocenteError> {
        let docentes =
            sqlx::query_as::<_, Docente>("SELECT * FROM docentes ORDER BY apellido, nombre")
                .fetch_all(&*self.pool)
                .await?;
        Ok(docentes)
    }

    /// Active teachers only, for the loan form select.
    pub async fn listar_activos(&self) -> Result<Vec<Docente>, DocenteError> {
        let docentes = sqlx::query_as::<_, Docente>(
            "SELECT * FROM docentes WHERE activo ORDER BY apellido, nombre",
        )
        .fetch_all(&*self.pool)
        .await?;
        Ok(docentes)
    }

    pub async fn obtener(&self, id: Uuid) -> Result<Option<Docente>, DocenteError> {
        let docente = sqlx::query_as::<_, Docente>("SELECT * FROM docentes WHERE id = $1")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(docente)
    }

    pub async fn crear(&self, form: &DocenteForm) -> Result<Docente, DocenteError> {
        self.check_duplicados(&form.rut, &form.email, None).await?;

        let docente = sqlx::query_as::<_, Docente>(
            r#"
            INSERT INTO docentes (nombre, apellido, rut, email, activo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, nombre, apellido, rut, email, activo
            "#,
        )
        .bind(&form.nombre)
        .bind(&form.apellido)
        .bind(&form.rut)
        .bind(&form.email)
        .bind(form.activo)
        .fetch_one(&*self.pool)
        .await?;

        Ok(docente)
    }

    pub async fn actualizar(&self, id: Uuid, form: &DocenteForm) -> Result<Docente, DocenteError> {
        self.check_duplicados(&form.rut, &form.email, Some(id)).await?;

        let docente = sqlx::query_as::<_, Docente>(
            r#"
            UPDATE docentes
            SET nombre = $1, apellido = $2, rut = $3, email = $4, activo = $5
            WHERE id = $6
            RETURNING id, nombre, apellido, rut, email, activo
            "#,
        )
        .bind(&form.nombre)
        .bind(&form.apellido)
        .bind(&form.rut)
        .bind(&form.email)
        .bind(form.activo)
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?
        .ok_or(DocenteError::NoEncontrado)?;

        Ok(docente)
    }

    /// Hard delete. Loans referencing the teacher cascade away with it.
    pub async fn eliminar(&self, id: Uuid) -> Result<(), DocenteError> {
        let result = sqlx::query("DELETE FROM docentes WHERE id = $1")
            .bind(id)
            .execute(&*self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DocenteError::NoEncontrado);
        }
        Ok(())
    }

    pub async fn contar(&self) -> Result<i64, DocenteError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM docentes")
            .fetch_one(&*self.pool)
            .await?;
        Ok(count)
    }

    /// Unique-field pre-check; `exclude` skips the row being edited.
    async fn check_duplicados(
        &self,
        rut: &str,
        email: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), DocenteError> {
        let rut_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM docentes WHERE rut = $1 AND ($2::uuid IS NULL OR id <> $2)",
        )
        .bind(rut)
        .bind(exclude)
        .fetch_one(&*self.pool)
        .await?;
        if rut_count > 0 {
            return Err(DocenteError::RutDuplicado);
        }

        let email_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM docentes WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2)",
        )
        .bind(email)
        .bind(exclude)
        .fetch_one(&*self.pool)
        .await?;
        if email_count > 0 {
            return Err(DocenteError::EmailDuplicado);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_requires_valid_email() {
        let form = DocenteForm {
            nombre: "Ana".to_string(),
            apellido: "Soto".to_string(),
            rut: "12.345.678-9".to_string(),
            email: "no-es-un-email".to_string(),
            activo: true,
        };
        assert!(form.validate().is_err());
    }
}
