pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod migrate;
pub mod observability;
pub mod routes;

pub use config::Config;
pub use db::{create_pool, create_read_pool, create_write_pool};
pub use routes::{AppState, router};
