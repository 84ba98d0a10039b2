#[macro_use]
extern crate tracing;

use axum::extract::FromRef;
use deadpool_diesel::postgres::{Object, Pool};

mod config;
pub mod controllers;
pub mod error;
pub mod interval;
pub mod models;
pub mod resolver;
pub mod routes;
pub mod schema;
pub mod schemas;

pub type DbPool = Pool;
pub type DbConn = Object;

pub use config::Config;
pub use error::Error;

/// Global application state
#[derive(Clone)]
pub struct AppState {
	pub config:        Config,
	pub database_pool: DbPool,
}

impl FromRef<AppState> for Config {
	fn from_ref(input: &AppState) -> Self { input.config.clone() }
}

impl FromRef<AppState> for DbPool {
	fn from_ref(input: &AppState) -> Self { input.database_pool.clone() }
}
