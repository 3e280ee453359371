mod date;
mod error;
mod meal;
mod validate;

pub use date::*;
pub use error::*;
pub use meal::*;
pub use validate::*;

#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
}
