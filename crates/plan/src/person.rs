use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::{
    coerce::{text, truthy},
    extract_requested_dishes,
};

const PARTICIPANT_KEYS: [&str; 4] = [
    "participant_count",
    "participants",
    "Participant_Count",
    "headcount",
];

/// One diner as the generators see them, flattened from a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Person {
    #[serde(skip)]
    pub user_id: Option<String>,
    pub person_role: String,
    pub display_name: String,
    pub is_chef: bool,
    pub tasks: Vec<String>,
    pub food_style: String,
    pub likes: Vec<String>,
    pub dislikes: Vec<String>,
    pub allergies: String,
    pub remark: String,
    #[serde(skip)]
    pub participant_count: i64,
}

fn strings(value: Option<&Value>) -> Vec<String> {
    let items = match value {
        Some(Value::Array(items)) => items.iter().map(|item| text(Some(item))).collect(),
        Some(Value::String(list)) => list.split(',').map(str::to_owned).collect(),
        _ => Vec::new(),
    };

    items
        .into_iter()
        .map(|item| item.trim().to_owned())
        .filter(|item| !item.is_empty())
        .collect()
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    Some(text(value).trim().to_owned()).filter(|value| !value.is_empty())
}

/// Reads the first usable positive count from the known keys, defaulting to 1
/// and capped at `MAX_PARTICIPANTS`.
pub fn participant_count(submission: &Value) -> i64 {
    PARTICIPANT_KEYS
        .iter()
        .filter_map(|key| match submission.get(*key) {
            Some(Value::Number(count)) => count.as_i64(),
            Some(Value::String(count)) => count.trim().parse().ok(),
            _ => None,
        })
        .find(|count| *count > 0)
        .map_or(1, |count| count.min(meal_planner_shared::MAX_PARTICIPANTS))
}

impl Person {
    /// Builds a person from a submission object. Preferences may be an
    /// object or a JSON string; anything unreadable is treated as empty.
    pub fn from_submission(submission: &Value) -> Self {
        let preferences: Value = match submission.get("preferences") {
            Some(Value::String(raw)) => serde_json::from_str(raw).unwrap_or_default(),
            Some(value @ Value::Object(_)) => value.clone(),
            _ => Value::Null,
        };

        let user_id = non_empty(submission.get("user_id"));

        let mut likes = strings(preferences.get("likes"));
        if likes.is_empty() {
            likes = strings(preferences.get("liked_tastes"));
        }

        let allergies = match preferences.get("allergies") {
            Some(Value::Array(_)) => strings(preferences.get("allergies")).join(", "),
            other => text(other).trim().to_owned(),
        };

        Self {
            person_role: non_empty(submission.get("role"))
                .unwrap_or_else(|| meal_planner_shared::MEMBER.to_owned()),
            display_name: non_empty(submission.get("display_name"))
                .or_else(|| user_id.to_owned())
                .unwrap_or_else(|| meal_planner_shared::MEMBER.to_owned()),
            is_chef: truthy(preferences.get("is_chef")),
            tasks: strings(preferences.get("tasks")),
            food_style: text(preferences.get("food_style")).trim().to_owned(),
            likes,
            dislikes: strings(preferences.get("dislikes")),
            allergies,
            remark: text(submission.get("remark")).trim().to_owned(),
            participant_count: participant_count(submission),
            user_id,
        }
    }

    fn key(&self, index: usize) -> String {
        self.user_id
            .to_owned()
            .or_else(|| Some(self.display_name.to_owned()).filter(|name| !name.is_empty()))
            .unwrap_or_else(|| format!("#{index}"))
    }

    /// Whether the person took on something concrete for this meal.
    pub fn is_active(&self) -> bool {
        let role = self.person_role.trim().to_lowercase();

        (!role.is_empty() && role != meal_planner_shared::MEMBER)
            || self.is_chef
            || !self.tasks.is_empty()
            || !extract_requested_dishes(&self.remark).is_empty()
    }
}

/// Distinct active people, or every distinct person when nobody is active.
pub fn count_participants(people: &[Person]) -> i64 {
    let active: HashSet<String> = people
        .iter()
        .enumerate()
        .filter(|(_, person)| person.is_active())
        .map(|(index, person)| person.key(index))
        .collect();

    if !active.is_empty() {
        return active.len() as i64;
    }

    people
        .iter()
        .enumerate()
        .map(|(index, person)| person.key(index))
        .collect::<HashSet<_>>()
        .len() as i64
}

/// Headcount for the prompt: summed participant counts, else the requested
/// headcount, else one. Never above `MAX_HEADCOUNT`.
pub fn headcount_for(people: &[Person], requested: Option<i64>) -> i64 {
    let headcount = if people.is_empty() {
        requested.filter(|count| *count > 0).unwrap_or(1)
    } else {
        people
            .iter()
            .map(|person| person.participant_count.max(0))
            .fold(0_i64, i64::saturating_add)
    };

    headcount.clamp(1, meal_planner_shared::MAX_HEADCOUNT)
}
