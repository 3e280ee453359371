use std::ops::Deref;

mod login;
mod query;
mod register;
pub(crate) mod repository;
mod update;

pub use login::*;
pub use query::*;
pub use register::*;
pub use update::*;

#[derive(Clone)]
pub struct Command(pub meal_planner_shared::State);

impl Deref for Command {
    type Target = meal_planner_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
