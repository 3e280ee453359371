use std::ops::Deref;

mod candidate;
mod context;
mod nominate;
mod pick;
mod query;
pub(crate) mod repository;
mod session;
mod vote;

pub use candidate::*;
pub use context::*;
pub use nominate::*;
pub use pick::*;
pub use query::*;
pub use session::*;
pub use vote::*;

/// Most dishes one member can put on the wheel per session.
pub const MAX_NOMINATIONS: i64 = 2;

#[derive(Clone)]
pub struct Command(pub meal_planner_shared::State);

impl Deref for Command {
    type Target = meal_planner_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);
