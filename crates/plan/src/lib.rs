use std::{ops::Deref, sync::Arc};

mod coerce;
mod create;
mod fallback;
mod feedback;
mod generate;
mod html;
mod model;
mod person;
mod postprocess;
mod prompt;
mod query;
mod regenerate;
mod remove;
pub(crate) mod repository;
mod schema;
mod theme;

pub use coerce::{coerce, format_plan_time, parse_dinner_time, youtube_search};
pub use create::*;
pub use fallback::*;
pub use generate::*;
pub use html::*;
pub use model::*;
pub use person::*;
pub use postprocess::*;
pub use prompt::{PromptInput, plan_prompt, recommended_dish_count};
pub use query::*;
pub use regenerate::*;
pub use schema::*;
pub use theme::*;

#[derive(Clone)]
pub struct Command {
    state: meal_planner_shared::State,
    generator: Generator,
}

impl Command {
    pub fn new(
        state: meal_planner_shared::State,
        model: Arc<dyn PlanModel>,
        debug: bool,
    ) -> Self {
        Self {
            state,
            generator: Generator::new(model, debug),
        }
    }
}

impl Deref for Command {
    type Target = meal_planner_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);
