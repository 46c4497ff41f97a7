//! HTTP REST API interfaces
//!
//! - `common`: response envelope, error mapping, validated JSON
//! - `middleware`: bearer token authentication and role gate
//! - `crud`: generic catalog handlers
//! - `modules`: account, roles, health, metrics, request id
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod crud;
pub mod middleware;
pub mod modules;
pub mod openapi;
pub mod router;

pub use router::{create_api_router, ApiContext};

#[cfg(test)]
mod tests;
