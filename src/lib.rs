//! # TCTravel booking service
//!
//! REST backend for a travel company: vehicles, drivers, client companies,
//! customers, locations and the bookings tying them together, plus
//! account registration, email verification, login and role administration.
//!
//! ## Architecture
//!
//! - **domain**: identity aggregates, repository interfaces and errors
//! - **application**: generic catalog CRUD and the account/role use cases
//! - **infrastructure**: SeaORM database, crypto and outbound mail
//! - **interfaces**: axum HTTP API with Swagger documentation
//! - **shared**: shutdown coordination and input validation helpers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig};

pub use interfaces::http::{create_api_router, ApiContext};
