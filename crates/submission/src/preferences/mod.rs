//! Long-lived cooking preferences of family members.
//!
//! Clients send loosely shaped objects (`isChef: "yes"`, `Tasks: ["Prework"]`,
//! `pre_work: 1`). [`normalize`] folds them into one stable shape before they
//! are stored and again when they are read back.

mod command;
mod query;

pub use command::*;
pub use query::*;

use serde_json::{Map, Value};

const TRUE_WORDS: [&str; 5] = ["true", "1", "y", "yes", "on"];

pub const PRE_WORK: &str = "pre_work";
pub const AFTER_WORK: &str = "after_work";

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(value) => *value,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(value) => !value.is_empty(),
        Value::Array(values) => !values.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::String(value) => Some(TRUE_WORDS.contains(&value.trim().to_lowercase().as_str())),
        other => Some(truthy(other)),
    }
}

/// Lowercases, snake-cases and maps synonyms onto the canonical task names.
pub fn normalize_task_name(value: &Value) -> Option<String> {
    if !truthy(value) {
        return None;
    }

    let raw = match value {
        Value::String(value) => value.to_owned(),
        other => other.to_string(),
    };
    let key = raw.trim().to_lowercase().replace(' ', "_");

    let name = match key.as_str() {
        "prework" | "before" | "before_work" => PRE_WORK.to_owned(),
        "cleanup" | "after" | "after_work" => AFTER_WORK.to_owned(),
        "cook" => "cooking".to_owned(),
        _ => key,
    };

    (!name.is_empty()).then_some(name)
}

fn rename(map: &mut Map<String, Value>, from: &str, to: &str) {
    if map.contains_key(to) {
        return;
    }

    if let Some(value) = map.remove(from) {
        map.insert(to.to_owned(), value);
    }
}

fn push_unique(tasks: &mut Vec<String>, task: String) {
    if !tasks.contains(&task) {
        tasks.push(task);
    }
}

pub fn normalize(preference: &Value) -> Value {
    let Value::Object(map) = preference else {
        return Value::Object(Map::new());
    };

    let mut map = map.clone();

    rename(&mut map, "isChef", "is_chef");
    rename(&mut map, "beforeTask", "before_task");
    rename(&mut map, "afterTask", "after_task");
    if map.get("Tasks").is_some_and(Value::is_array) {
        rename(&mut map, "Tasks", "tasks");
    }

    if let Some(value) = map.get_mut("is_chef") {
        *value = to_bool(value).map_or(Value::Null, Value::Bool);
    }

    let mut tasks = Vec::new();
    if let Some(Value::Array(values)) = map.get("tasks") {
        for task in values.iter().filter_map(normalize_task_name) {
            push_unique(&mut tasks, task);
        }
    }
    for flag in [PRE_WORK, AFTER_WORK] {
        if map.get(flag).and_then(to_bool).unwrap_or_default() {
            push_unique(&mut tasks, flag.to_owned());
        }
    }
    let has_tasks = !tasks.is_empty();

    for (key, role) in [("before_task", PRE_WORK), ("after_task", AFTER_WORK)] {
        let Some(value) = map.get(key).filter(|value| truthy(value)) else {
            continue;
        };

        let name = normalize_task_name(value);
        if name.as_deref().is_some_and(|name| name != "none") {
            push_unique(&mut tasks, role.to_owned());
        }
        map.insert(key.to_owned(), name.map_or(Value::Null, Value::String));
    }

    if has_tasks || !tasks.is_empty() {
        map.insert(
            "tasks".to_owned(),
            Value::Array(tasks.into_iter().map(Value::String).collect()),
        );
    }

    map.remove(PRE_WORK);
    map.remove(AFTER_WORK);

    Value::Object(map)
}
