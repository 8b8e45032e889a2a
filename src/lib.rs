//! Pañol lending service library
//!
//! This library exports the core modules for the computer-lab lending
//! server: role-gated CRUD over teachers, materials, and accounts, plus the
//! transactional loan registration that decrements stock.

pub mod app_state;
pub mod auth;
pub mod docente;
pub mod handlers;
pub mod material;
pub mod middleware;
pub mod models;
pub mod prestamo;
pub mod routes;
pub mod usuario;
