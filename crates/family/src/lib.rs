use std::ops::Deref;

mod active_meal;
mod create;
mod invite;
mod join;
pub mod meal_code;
mod meal_times;
mod query;
mod remove;
pub(crate) mod repository;

pub use active_meal::*;
pub use create::*;
pub use invite::*;
pub use join::*;
pub use meal_times::*;
pub use query::*;
pub use remove::*;

#[derive(Clone)]
pub struct Command(pub meal_planner_shared::State);

impl Deref for Command {
    type Target = meal_planner_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
