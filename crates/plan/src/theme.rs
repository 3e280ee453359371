use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Value, json};

use crate::youtube_search;

static RE_THEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*THEME\s*:\s*(.+)$").expect("theme regex"));
static RE_REQUESTED_THEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Requested\s+dish\s*:\s*(.+)$").expect("requested regex"));
static RE_HEADCOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:人|people)").expect("headcount regex"));
static RE_REQUESTED_DISHES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Requested\s*dish(?:es)?\s*:\s*(.+)").expect("requested dishes regex")
});
static RE_DISHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Dishes?\s*:\s*(.+)").expect("dishes regex"));
static RE_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("spaces regex"));

pub const MENU_SIZE: usize = 4;

/// Theme requested by the first remark carrying `THEME:` or `Requested dish:`.
pub fn extract_theme<'a>(remarks: impl IntoIterator<Item = &'a str>) -> Option<String> {
    remarks.into_iter().find_map(|remark| {
        RE_THEME
            .captures(remark)
            .or_else(|| RE_REQUESTED_THEME.captures(remark))
            .map(|captures| captures[1].trim().to_owned())
            .filter(|theme| !theme.is_empty())
    })
}

/// Participant count hinted by a remark such as "6 people" or "6人".
pub fn remark_headcount(remark: &str) -> Option<i64> {
    RE_HEADCOUNT
        .captures(remark)
        .and_then(|captures| captures[1].parse::<i64>().ok())
        .map(|count| count.min(meal_planner_shared::MAX_HEADCOUNT))
}

pub fn extract_requested_dishes(remark: &str) -> Vec<String> {
    let Some(captures) = RE_REQUESTED_DISHES
        .captures(remark)
        .or_else(|| RE_DISHES.captures(remark))
    else {
        return vec![];
    };

    captures[1]
        .split([';', ',', '|'])
        .map(str::trim)
        .filter(|dish| !dish.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn norm_dish_name(value: &str) -> String {
    RE_SPACES.replace_all(value.trim(), " ").into_owned()
}

fn contains_any(value: &str, keys: &[&str]) -> bool {
    keys.iter().any(|key| value.contains(key))
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

/// Offline menu for a theme, used by the rule-based plan.
pub fn curated_theme_dishes(theme: &str) -> Vec<String> {
    let lower = theme.to_lowercase();

    let dishes = if contains_any(&lower, &["macaroni", "pasta", "noodle", "nui", "mì xào"]) {
        owned(&[
            "Stir-fried Macaroni with Beef",
            "Stir-fried Macaroni with Chicken",
            "Stir-fried Macaroni with Seafood",
            "Garlic Butter Vegetables",
            "Tomato Egg Soup",
        ])
    } else if contains_any(&lower, &["pho", "phở"]) {
        owned(&[
            "Pho Bo",
            "Pho Ga",
            "Vietnamese Fried Spring Rolls",
            "Pickled Vegetables",
            "Beef Salad with Herbs",
        ])
    } else if lower.contains("ramen") {
        owned(&[
            "Shoyu Ramen",
            "Miso Ramen",
            "Gyoza",
            "Edamame",
            "Chicken Karaage",
        ])
    } else if lower.contains("fried rice") {
        owned(&[
            "Yangzhou Fried Rice",
            "Shrimp & Egg Fried Rice",
            "Stir-fried Bok Choy",
            "Egg Drop Soup",
            "Cucumber Salad",
        ])
    } else {
        vec![
            format!("{theme} with Beef"),
            format!("{theme} with Chicken"),
            format!("{theme} with Seafood"),
            "Stir-fried Vegetables".to_owned(),
            "Light Soup".to_owned(),
        ]
    };

    dishes.into_iter().take(MENU_SIZE).collect()
}

/// Backup list for the theme menu when the model cannot be asked.
pub fn heuristic_theme_dishes(theme: &str) -> Vec<String> {
    let lower = theme.to_lowercase();

    if contains_any(
        &lower,
        &["nui xào", "nui xao", "macaroni", "pasta", "mì xào", "mi xao", "stir-fry noodle", "stir-fried noodle"],
    ) {
        return owned(&[
            "Stir-fried Macaroni with Beef",
            "Stir-fried Macaroni with Chicken",
            "Stir-fried Macaroni with Seafood",
            "Garlic Butter Vegetables",
            "Tomato Egg Soup",
        ]);
    }

    vec![
        format!("{theme} – Variant A"),
        format!("{theme} – Variant B"),
        format!("{theme} – Variant C"),
        "Simple Side Vegetables".to_owned(),
        "Light Soup".to_owned(),
    ]
}

/// Normalizes, de-duplicates and pads a theme list to exactly four names.
pub fn finalize_menu(theme: &str, candidates: &[String]) -> Vec<String> {
    let mut menu: Vec<String> = Vec::with_capacity(MENU_SIZE);

    for name in candidates.iter().map(|name| norm_dish_name(name)) {
        if menu.len() == MENU_SIZE {
            break;
        }
        if !name.is_empty() && !menu.iter().any(|seen| seen.to_lowercase() == name.to_lowercase()) {
            menu.push(name);
        }
    }

    while menu.len() < MENU_SIZE {
        menu.push(format!("{theme} – Variant {}", menu.len() + 1));
    }

    menu
}

pub fn category_for(index: usize) -> &'static str {
    match index {
        0 => "Hot dish",
        1 => "Appetizer",
        _ => "Soup",
    }
}

pub fn skeleton_ingredients() -> Value {
    json!([{"name": "Ingredient A", "amount": "100g"}])
}

pub fn skeleton_steps() -> Value {
    Value::Array(
        (1..=5)
            .map(|step| Value::String(format!("Step {step}: Instruction")))
            .collect(),
    )
}

/// Renames the model's dishes to exactly `menu`, in order, filling gaps with
/// skeleton dishes.
pub fn apply_forced_menu(plan: &mut Value, menu: &[String]) {
    let Some(first) = menu.first() else {
        return;
    };

    let mut names: Vec<String> = menu
        .iter()
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
        .collect();
    while names.len() < MENU_SIZE {
        names.push(format!("{first} – Variant {}", names.len() + 1));
    }
    names.truncate(MENU_SIZE);

    if !plan.is_object() {
        *plan = json!({});
    }

    let existing = match plan.get_mut("dishes").map(Value::take) {
        Some(Value::Array(dishes)) => dishes,
        _ => vec![],
    };

    let dishes = names
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            let mut dish = match existing.get(index) {
                Some(dish @ Value::Object(_)) => dish.clone(),
                _ => json!({
                    "category": category_for(index),
                    "ingredients": skeleton_ingredients(),
                    "steps": skeleton_steps(),
                    "image_url": "",
                }),
            };
            dish["video_url"] = Value::String(youtube_search(&name));
            dish["name"] = Value::String(name);
            dish
        })
        .collect();

    plan["dishes"] = Value::Array(dishes);
}

/// Picks a dish similar to `base` that is not in `forbid` (case-insensitive).
pub fn suggest_variant_name(base: &str, forbid: &[String]) -> String {
    let lower = base.to_lowercase();
    let forbidden: Vec<String> = forbid.iter().map(|name| name.trim().to_lowercase()).collect();
    let allowed = |name: &str| !forbidden.contains(&name.trim().to_lowercase());

    let candidates = if contains_any(&lower, &["phở", "pho"]) {
        owned(&["Pho Ga", "Pho Nam", "Pho Chay"])
    } else if lower.contains("bánh canh") {
        owned(&["Bánh canh cua", "Bánh canh giò heo", "Bánh canh chả cá"])
    } else if lower.contains("bún") {
        owned(&["Bún thịt nướng", "Bún bò Huế", "Bún chả giò"])
    } else {
        vec![
            format!("{base} – Chicken Variant"),
            format!("{base} – Beef Variant"),
            format!("{base} – Veggie Variant"),
        ]
    };

    if let Some(candidate) = candidates.into_iter().find(|name| allowed(name)) {
        return candidate;
    }

    (1..)
        .map(|index| format!("{base} – Variant {index}"))
        .find(|name| allowed(name))
        .unwrap_or_else(|| base.to_owned())
}
