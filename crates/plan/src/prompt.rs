use std::fmt::Write as _;

use meal_planner_shared::MealType;
use serde_json::json;

use crate::Person;

pub const PLAN_SYSTEM: &str = "You plan family meals. Answer with a single JSON object in English \
that follows the schema you are given. No prose outside the JSON.";

pub const RECIPE_SYSTEM: &str = "You are a home cooking assistant. Always answer in English: dish \
names, ingredients with units and numbered steps. Return JSON only.";

pub const THEME_SYSTEM: &str = "You plan themed family menus. English only. Answer with JSON only: \
{\"dishes\":[\"dish1\",\"dish2\",\"dish3\",\"dish4\",\"dish5\"]}. Include at least two direct \
variations of the theme and one or two complementary sides or soups.";

const RULES: &str = "Rules:
1. If remarks name dishes, cook exactly those. Otherwise plan the recommended number of dishes.
2. Balance meat and vegetables. Use the categories Appetizer, Hot dish and Soup.
3. Every dish lists ingredients with amounts and five to eight steps. image_url is empty and \
video_url is a YouTube search for the dish name.
4. Give every participant two to four tasks. A chef always gets \"Stir-frying (Chef)\".
5. Remarks have the highest priority.
6. Never return empty roles. Invent virtual members named \"member\" when submissions are missing.
7. Dish names are English only.";

/// What the main planning prompt is built from.
#[derive(Debug, Clone)]
pub struct PromptInput<'a> {
    pub meal_date: &'a str,
    pub meal_type: MealType,
    pub headcount: i64,
    pub people: &'a [Person],
    pub theme: Option<&'a str>,
    pub forced_menu: &'a [String],
    pub remark_hint: Option<i64>,
}

fn schema_example() -> String {
    let example = json!({
        "meta": {
            "Time": "2025-01-01,18:00",
            "headcount": 3,
            "roles": [
                {"display_name": "mom", "person_role": "holder", "is_chef": true, "tasks": ["Stir-frying (Chef)", "Washing"]},
                {"display_name": "member", "person_role": "member", "is_chef": false, "tasks": ["Setting the table", "Washing dishes"]}
            ]
        },
        "dishes": [
            {
                "name": "Kung Pao Chicken",
                "category": "Hot dish",
                "ingredients": [{"name": "Chicken breast", "amount": "300g"}, {"name": "Peanuts", "amount": "50g"}],
                "steps": ["Dice and marinate the chicken for 10 minutes", "Stir-fry the chicken for 5 minutes"],
                "image_url": "",
                "video_url": "https://www.youtube.com/results?search_query=Kung+Pao+Chicken"
            }
        ]
    });

    serde_json::to_string_pretty(&example).unwrap_or_default()
}

pub fn recommended_dish_count(headcount: i64) -> i64 {
    headcount.saturating_sub(1).max(2)
}

pub fn plan_prompt(input: &PromptInput<'_>) -> String {
    let recommended = if input.forced_menu.is_empty() {
        recommended_dish_count(input.headcount)
    } else {
        crate::MENU_SIZE as i64
    };

    let mut prompt = String::new();
    let _ = writeln!(prompt, "Plan a family meal.\n");
    let _ = writeln!(prompt, "- Date: {}", input.meal_date);
    let _ = writeln!(prompt, "- Meal type: {}", input.meal_type.title());
    let _ = writeln!(prompt, "- Diners: {}", input.headcount);
    let _ = writeln!(prompt, "- Submissions received: {}", input.people.len());
    let _ = writeln!(prompt, "- Recommended dishes: {recommended}");

    if let Some(hint) = input.remark_hint {
        let _ = writeln!(
            prompt,
            "- A remark mentions {hint} participants, more than the submissions received."
        );
    }

    if let Some(theme) = input.theme {
        let _ = writeln!(prompt, "\nTheme: center the whole meal around \"{theme}\".");
    }

    if !input.forced_menu.is_empty() {
        let _ = writeln!(prompt, "\nUse exactly these {} dishes and keep their names:", input.forced_menu.len());
        for dish in input.forced_menu {
            let _ = writeln!(prompt, "- {dish}");
        }
    }

    let requested: Vec<String> = input
        .people
        .iter()
        .filter(|person| !person.remark.is_empty())
        .map(|person| format!("- {}: {}", person.display_name, person.remark))
        .collect();
    if !requested.is_empty() {
        let _ = writeln!(prompt, "\nRemarks (every requested dish must be included):");
        let _ = writeln!(prompt, "{}", requested.join("\n"));
    }

    let _ = writeln!(prompt, "\nMembers:");
    for (index, person) in input.people.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {}", index + 1, person.display_name);
        let _ = writeln!(prompt, "   - Role: {}", person.person_role);
        let _ = writeln!(prompt, "   - Chef: {}", if person.is_chef { "yes" } else { "no" });
        if !person.tasks.is_empty() {
            let _ = writeln!(prompt, "   - Tasks: {}", person.tasks.join(", "));
        }
        if !person.food_style.is_empty() {
            let _ = writeln!(prompt, "   - Food style: {}", person.food_style);
        }
        if !person.likes.is_empty() {
            let _ = writeln!(prompt, "   - Likes: {}", person.likes.join(", "));
        }
        if !person.dislikes.is_empty() {
            let _ = writeln!(prompt, "   - Dislikes: {}", person.dislikes.join(", "));
        }
        if !person.allergies.is_empty() {
            let _ = writeln!(prompt, "   - Allergies: {}", person.allergies);
        }
        if !person.remark.is_empty() {
            let _ = writeln!(prompt, "   - Remark: {}", person.remark);
        }
    }

    let _ = writeln!(prompt, "\n{RULES}");
    let _ = writeln!(prompt, "\nSchema example:\n{}", schema_example());

    prompt
}

const RECIPE_SHAPE: &str = r#"{"name": "...", "ingredients": [{"name": "...", "quantity_metric": "200g"}], "steps": ["..."], "video_url": "https://www.youtube.com/results?search_query=...", "similarity_note": "..."}"#;

pub fn exact_recipe_prompt(dish: &str) -> String {
    format!(
        "Write one home recipe for exactly this dish: \"{dish}\". Keep the dish name unchanged.\n\
         Return JSON shaped like {RECIPE_SHAPE}. similarity_note may be empty."
    )
}

pub fn variant_recipe_prompt(base: &str, forbid: &[String], winner: &str) -> String {
    let mut forbidden: Vec<&str> = forbid.iter().map(String::as_str).collect();
    if !winner.is_empty() {
        forbidden.push(winner);
    }
    forbidden.sort_unstable();
    forbidden.dedup();

    format!(
        "Suggest one dish similar to \"{base}\" in style or main ingredients, and write its recipe.\n\
         The dish must not be any of: {}.\n\
         Return JSON shaped like {RECIPE_SHAPE}. similarity_note explains in one sentence how it relates to \"{base}\".",
        forbidden.join(", ")
    )
}

pub fn theme_prompt(theme: &str) -> String {
    format!("Theme: {theme}\nReturn 5 short dish names in English. JSON only.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_prompt_lists_members_and_menu() {
        let people = vec![Person {
            display_name: "mom".to_owned(),
            person_role: "holder".to_owned(),
            is_chef: true,
            likes: vec!["spicy".to_owned()],
            allergies: "peanut".to_owned(),
            remark: "Requested dish: Pho".to_owned(),
            ..Default::default()
        }];
        let menu = vec!["Pho Bo".to_owned(), "Pho Ga".to_owned()];

        let prompt = plan_prompt(&PromptInput {
            meal_date: "2025-03-01",
            meal_type: MealType::Dinner,
            headcount: 5,
            people: &people,
            theme: Some("Pho"),
            forced_menu: &menu,
            remark_hint: Some(5),
        });

        assert!(prompt.contains("- Meal type: Dinner"));
        assert!(prompt.contains("- Recommended dishes: 4"));
        assert!(prompt.contains("- Pho Ga"));
        assert!(prompt.contains("- mom: Requested dish: Pho"));
        assert!(prompt.contains("   - Allergies: peanut"));
        assert!(prompt.contains("\"Kung Pao Chicken\""));
    }

    #[test]
    fn variant_prompt_forbids_winner_once() {
        let prompt = variant_recipe_prompt("Pho", &["Pho Bo".to_owned(), "Pho Bo".to_owned()], "Pho Bo");

        assert!(prompt.contains("must not be any of: Pho Bo."));
        assert_eq!(recommended_dish_count(1), 2);
        assert_eq!(recommended_dish_count(6), 5);
    }
}
