//! Loan registration service.
//!
//! This module owns the one transactional operation of the system: the
//! check-decrement-record sequence that hands material stock to a teacher.

use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Material, Prestamo, PrestamoDetalle};

/// Loan service error
#[derive(Debug, thiserror::Error)]
pub enum PrestamoError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("La cantidad debe ser mayor a cero.")]
    CantidadInvalida,
    #[error("Docente no encontrado.")]
    DocenteNoEncontrado,
    #[error("El docente no está activo.")]
    DocenteInactivo,
    #[error("Material no encontrado.")]
    MaterialNoEncontrado,
    #[error("El material no está activo.")]
    MaterialInactivo,
    #[error("No hay suficiente stock. Stock actual: {disponible}")]
    StockInsuficiente { disponible: i32 },
}

/// Loan registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegistrarPrestamoRequest {
    pub docente_id: Uuid,
    pub material_id: Uuid,
    #[validate(range(min = 1, message = "La cantidad debe ser mayor a cero."))]
    pub cantidad: i32,
}

/// Loan service
pub struct PrestamoService {
    pool: Arc<PgPool>,
}

impl PrestamoService {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Register a loan on behalf of the acting storekeeper.
    ///
    /// Runs in a single transaction. The stock decrement is the conditional
    /// form (`stock = stock - q WHERE … stock >= q`), so two concurrent
    /// registrations against the same material can never jointly overdraw
    /// the stock regardless of the store's isolation level.
    ///
    /// # Errors
    /// Returns a validation error without mutating state when the quantity
    /// is non-positive, the docente or material is missing or inactive, or
    /// the stock is insufficient.
    pub async fn registrar(
        &self,
        req: &RegistrarPrestamoRequest,
        usuario_id: Uuid,
    ) -> Result<Prestamo, PrestamoError> {
        if req.cantidad <= 0 {
            return Err(PrestamoError::CantidadInvalida);
        }

        let mut tx = self.pool.begin().await?;

        let docente_activo: Option<bool> =
            sqlx::query_scalar("SELECT activo FROM docentes WHERE id = $1")
                .bind(req.docente_id)
                .fetch_optional(&mut *tx)
                .await?;
        match docente_activo {
            None => return Err(PrestamoError::DocenteNoEncontrado),
            Some(false) => return Err(PrestamoError::DocenteInactivo),
            Some(true) => {}
        }

        let stock_restante: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE materiales
            SET stock = stock - $1
            WHERE id = $2 AND activo AND stock >= $1
            RETURNING stock
            "#,
        )
        .bind(req.cantidad)
        .bind(req.material_id)
        .fetch_optional(&mut *tx)
        .await?;

        // A miss means missing, inactive, or short on stock; re-read to
        // report which. The transaction is dropped unchanged either way.
        let stock_restante = match stock_restante {
            Some(stock) => stock,
            None => {
                let material =
                    sqlx::query_as::<_, Material>("SELECT * FROM materiales WHERE id = $1")
                        .bind(req.material_id)
                        .fetch_optional(&mut *tx)
                        .await?;
                return Err(match material {
                    None => PrestamoError::MaterialNoEncontrado,
                    Some(m) if !m.activo => PrestamoError::MaterialInactivo,
                    Some(m) => PrestamoError::StockInsuficiente { disponible: m.stock },
                });
            }
        };

        let prestamo = sqlx::query_as::<_, Prestamo>(
            r#"
            INSERT INTO prestamos (docente_id, material_id, cantidad, usuario_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, docente_id, material_id, cantidad, fecha_prestamo, usuario_id
            "#,
        )
        .bind(req.docente_id)
        .bind(req.material_id)
        .bind(req.cantidad)
        .bind(usuario_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            prestamo_id = %prestamo.id,
            material_id = %req.material_id,
            cantidad = req.cantidad,
            stock_restante,
            "préstamo registrado"
        );

        Ok(prestamo)
    }

    /// List all loans, newest first, with display names joined in.
    pub async fn listar(&self) -> Result<Vec<PrestamoDetalle>, PrestamoError> {
        let prestamos = sqlx::query_as::<_, PrestamoDetalle>(
            r#"
            SELECT p.id,
                   d.nombre || ' ' || d.apellido AS docente,
                   m.nombre AS material,
                   p.cantidad,
                   p.fecha_prestamo,
                   u.username AS registrado_por
            FROM prestamos p
            JOIN docentes d ON d.id = p.docente_id
            JOIN materiales m ON m.id = p.material_id
            LEFT JOIN usuarios u ON u.id = p.usuario_id
            ORDER BY p.fecha_prestamo DESC
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(prestamos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cantidad_cero_fails_validation() {
        let req = RegistrarPrestamoRequest {
            docente_id: Uuid::new_v4(),
            material_id: Uuid::new_v4(),
            cantidad: 0,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn cantidad_positiva_passes_validation() {
        let req = RegistrarPrestamoRequest {
            docente_id: Uuid::new_v4(),
            material_id: Uuid::new_v4(),
            cantidad: 4,
        };
        assert!(req.validate().is_ok());
    }
}
