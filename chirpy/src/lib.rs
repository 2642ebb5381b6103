//! Chirpy: a small social-post backend.
//!
//! The core is a file-backed JSON document store ([`database::Db`]) holding
//! chirps, users and revoked tokens, a bcrypt [`credentials::PasswordHasher`],
//! and a JWT [`tokens::TokenService`] with access/refresh sessions. The
//! [`routes`] module exposes it over HTTP with axum.

pub mod auth;
pub mod config;
pub mod credentials;
pub mod database;
pub mod dto;
pub mod errors;
pub mod models;
pub mod routes;
pub mod states;
pub mod tokens;

pub use states::AppState;
