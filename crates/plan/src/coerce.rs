use serde_json::{Map, Value};
use time::{
    OffsetDateTime, PrimitiveDateTime, Time,
    format_description::BorrowedFormatItem,
    macros::{format_description, time},
};

use crate::{Dish, Ingredient, Meta, PlanDocument, Role, Step};

const DATE_TIME_SECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const DATE_TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");
const PLAN_TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day],[hour]:[minute]");

/// Reads a JSON scalar as text. Containers and null read as empty.
pub(crate) fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(value)) => value.to_owned(),
        Some(Value::Number(value)) => value.to_string(),
        Some(Value::Bool(value)) => value.to_string(),
        _ => String::new(),
    }
}

/// First of `keys` holding a non-empty scalar.
pub(crate) fn first_text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .map(|key| text(object.get(*key)))
        .find(|value| !value.is_empty())
}

pub(crate) fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(value)) => *value,
        Some(Value::Number(value)) => value.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(value)) => !value.is_empty(),
        Some(Value::Array(value)) => !value.is_empty(),
        Some(Value::Object(value)) => !value.is_empty(),
        _ => false,
    }
}

/// A single value counts as a list of one.
fn as_list(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => vec![],
        Some(Value::Array(items)) => items.iter().collect(),
        Some(other) => vec![other],
    }
}

pub fn youtube_search(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return String::new();
    }

    let query: String = url::form_urlencoded::byte_serialize(name.as_bytes()).collect();

    format!("https://www.youtube.com/results?search_query={query}")
}

pub(crate) fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Lenient meal time parsing: `T` or `,` may separate date and time, a bare
/// date means 18:00 and garbage means the current hour.
pub fn parse_dinner_time(value: &str) -> PrimitiveDateTime {
    let normalized = value
        .trim()
        .replace('，', ",")
        .replace('：', ":")
        .replace(['T', ','], " ");
    let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");

    for format in [DATE_TIME_SECONDS, DATE_TIME] {
        if let Ok(parsed) = PrimitiveDateTime::parse(&normalized, format) {
            return parsed;
        }
    }

    if let Some(date) = normalized
        .get(..10)
        .and_then(|value| meal_planner_shared::parse_date(value).ok())
    {
        return PrimitiveDateTime::new(date, time!(18:00));
    }

    let now = OffsetDateTime::now_utc();
    let hour = Time::from_hms(now.hour(), 0, 0).unwrap_or(Time::MIDNIGHT);

    PrimitiveDateTime::new(now.date(), hour)
}

pub fn format_plan_time(value: PrimitiveDateTime) -> String {
    value.format(PLAN_TIME).unwrap_or_default()
}

fn coerce_role(value: &Value) -> Option<Role> {
    let role = value.as_object()?;

    Some(Role {
        person_role: first_text(role, &["person_role", "role"]),
        is_chef: truthy(role.get("is_chef")),
        tasks: as_list(role.get("tasks"))
            .into_iter()
            .map(|task| text(Some(task)))
            .filter(|task| !task.is_empty())
            .collect(),
        display_name: first_text(role, &["display_name", "name", "user_name"]).unwrap_or_default(),
        is_primary: truthy(role.get("is_primary")),
        age_group: first_text(role, &["age_group"]),
    })
}

fn coerce_ingredient(value: &Value) -> Option<Ingredient> {
    match value {
        Value::Object(item) => Some(Ingredient {
            name: text(item.get("name")),
            amount: text(item.get("amount")),
        }),
        Value::String(name) => Some(Ingredient {
            name: name.to_owned(),
            amount: String::new(),
        }),
        _ => None,
    }
}

fn coerce_step(value: &Value) -> Option<Step> {
    match value {
        Value::Object(step) => Some(Step {
            description: first_text(step, &["description", "step"]).unwrap_or_default(),
            time: text(step.get("time")),
        }),
        Value::String(description) => Some(Step {
            description: description.to_owned(),
            time: String::new(),
        }),
        _ => None,
    }
}

fn coerce_dish(value: &Value) -> Option<Dish> {
    let dish = value.as_object()?;
    let name = text(dish.get("name")).trim().to_owned();

    let mut coerced = Dish {
        category: text(dish.get("category")),
        ingredients: as_list(dish.get("ingredients"))
            .into_iter()
            .filter_map(coerce_ingredient)
            .collect(),
        steps: as_list(dish.get("steps"))
            .into_iter()
            .filter_map(coerce_step)
            .collect(),
        image_url: text(dish.get("image_url")),
        reason: text(dish.get("reason")),
        base_dish: text(dish.get("base_dish")),
        source: text(dish.get("source")),
        similarity_note: text(dish.get("similarity_note")),
        ..Default::default()
    };

    let video = first_text(dish, &["video_url", "videoUrl"])
        .map(|video| video.trim().to_owned())
        .filter(|video| is_http_url(video))
        .unwrap_or_else(|| youtube_search(&name));
    coerced.set_video(video);
    coerced.name = name;

    Some(coerced)
}

/// Normalizes whatever the model (or a client) produced into a
/// [`PlanDocument`]. Never fails; missing parts come out empty.
pub fn coerce(
    raw: &Value,
    dinner_time: &str,
    headcount: i64,
    family_id: &str,
    family_name: &str,
) -> PlanDocument {
    let empty = Map::new();
    let plan = raw.as_object().unwrap_or(&empty);
    let meta = plan.get("meta").and_then(Value::as_object).unwrap_or(&empty);

    let roles = match meta.get("roles") {
        Some(roles) if truthy(Some(roles)) => Some(roles),
        _ => plan.get("people"),
    };

    PlanDocument {
        meta: Meta {
            time: format_plan_time(parse_dinner_time(dinner_time)),
            headcount,
            roles: as_list(roles).into_iter().filter_map(coerce_role).collect(),
            family_id: family_id.to_owned(),
            family_name: family_name.to_owned(),
            ..Default::default()
        },
        dishes: as_list(plan.get("dishes"))
            .into_iter()
            .filter_map(coerce_dish)
            .collect(),
    }
}
