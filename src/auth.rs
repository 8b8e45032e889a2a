//! Authentication service: credential checks and session tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{LoginRequest, Rol, Usuario};

/// Authentication error
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Usuario o contraseña incorrectos.")]
    InvalidCredentials,
    #[error("La cuenta está desactivada.")]
    InactiveAccount,
    #[error("Invalid or expired token")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("Password hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// JWT claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id)
    pub sub: Uuid,
    pub username: String,
    pub rol: Rol,
    pub superusuario: bool,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    pub fn new(usuario: &Usuario, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: usuario.id,
            username: usuario.username.clone(),
            rol: usuario.rol,
            superusuario: usuario.superusuario,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }

    pub fn es_panol(&self) -> bool {
        self.rol == Rol::Panol
    }

    /// Administrador role or superuser.
    pub fn es_admin(&self) -> bool {
        self.rol == Rol::Administrador || self.superusuario
    }
}

/// Authentication service
pub struct AuthService {
    pool: Arc<PgPool>,
    secret: String,
    expiration_hours: i64,
}

impl AuthService {
    pub fn new(pool: Arc<PgPool>, secret: String, expiration_hours: i64) -> Self {
        Self {
            pool,
            secret,
            expiration_hours,
        }
    }

    /// Verify credentials and issue a session token.
    pub async fn login(&self, req: &LoginRequest) -> Result<(String, Usuario), AuthError> {
        let usuario = sqlx::query_as::<_, Usuario>(
            "SELECT * FROM usuarios WHERE username = $1",
        )
        .bind(&req.username)
        .fetch_optional(&*self.pool)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

        if !bcrypt::verify(&req.password, &usuario.password_hash)? {
            tracing::warn!(username = %req.username, "failed login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        if !usuario.activo {
            return Err(AuthError::InactiveAccount);
        }

        let token = self.create_token(&usuario)?;
        Ok((token, usuario))
    }

    /// Create a signed token for a user.
    pub fn create_token(&self, usuario: &Usuario) -> Result<String, AuthError> {
        let claims = Claims::new(usuario, self.expiration_hours);
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        Ok(token)
    }

    /// Verify and decode a session token.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> AuthService {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/panol_unused")
            .unwrap();
        AuthService::new(Arc::new(pool), "test-secret".to_string(), 24)
    }

    fn test_usuario(rol: Rol, superusuario: bool) -> Usuario {
        Usuario {
            id: Uuid::new_v4(),
            username: "prueba".to_string(),
            password_hash: String::new(),
            nombre: "Ana".to_string(),
            apellido: "Soto".to_string(),
            email: "ana@example.com".to_string(),
            rol,
            superusuario,
            activo: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn token_round_trip() {
        let svc = test_service();
        let usuario = test_usuario(Rol::Panol, false);

        let token = svc.create_token(&usuario).unwrap();
        let claims = svc.verify_token(&token).unwrap();

        assert_eq!(claims.sub, usuario.id);
        assert_eq!(claims.username, "prueba");
        assert!(claims.es_panol());
        assert!(!claims.es_admin());
    }

    #[tokio::test]
    async fn garbage_token_rejected() {
        let svc = test_service();
        assert!(svc.verify_token("not-a-token").is_err());
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_rejected() {
        let svc = test_service();
        let usuario = test_usuario(Rol::Administrador, false);
        let token = svc.create_token(&usuario).unwrap();

        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/panol_unused")
            .unwrap();
        let other = AuthService::new(Arc::new(pool), "other-secret".to_string(), 24);
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn superuser_counts_as_admin() {
        let usuario = test_usuario(Rol::Panol, true);
        let claims = Claims::new(&usuario, 1);
        assert!(claims.es_admin());
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = bcrypt::hash("secreta123", 4).unwrap();
        assert!(bcrypt::verify("secreta123", &hash).unwrap());
        assert!(!bcrypt::verify("otra", &hash).unwrap());
    }
}
