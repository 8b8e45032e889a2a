//! API handlers for the lending service

pub mod auth;
pub mod dashboard;
pub mod docente;
pub mod material;
pub mod prestamo;
pub mod usuario;

pub use auth::*;
pub use dashboard::get_dashboard;
pub use docente::*;
pub use material::*;
pub use prestamo::*;
pub use usuario::*;

// Re-export the role extractors from middleware for handler use
pub use crate::middleware::auth::{AdminUser, AuthenticatedUser, PanolUser};
