use std::ops::Deref;

mod notify;
mod query;
mod send;

pub use notify::*;
pub use query::*;
pub use send::*;

pub const FAMILY_INVITATION: &str = "family_invitation";
pub const PLAN_GENERATED: &str = "plan_generated";

#[derive(Clone)]
pub struct Command(pub meal_planner_shared::State);

impl Deref for Command {
    type Target = meal_planner_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
