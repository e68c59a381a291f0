//! Users App
//!
//! A CRUD HTTP service for users and their orders, stored in PostgreSQL.
//! Every entity operation runs inside its own unit-of-work session that is
//! committed on success and rolled back on error.

pub mod api;
pub mod config;
pub mod database;
pub mod entities;
pub mod error;
pub mod executor;
pub mod repositories;
pub mod server;
pub mod telemetry;
pub mod unit_of_work;

pub use database::Database;
pub use entities::{Order, User};
pub use error::{StoreError, StoreResult};
pub use executor::Executor;
pub use repositories::{OrderRepository, UserRepository};
pub use unit_of_work::{PostgresSession, UnitOfWork, UnitOfWorkSession};
