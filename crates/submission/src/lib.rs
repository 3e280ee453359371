use std::ops::Deref;

pub mod preferences;
mod query;
mod submit;

pub use query::*;
pub use submit::*;

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

/// Stored preferences are JSON text; anything unreadable becomes `{}`.
pub(crate) fn parse_json_object(raw: Option<&str>) -> serde_json::Value {
    raw.and_then(|raw| serde_json::from_str::<serde_json::Value>(raw).ok())
        .filter(|value| !value.is_null())
        .unwrap_or_else(|| serde_json::Value::Object(Default::default()))
}
