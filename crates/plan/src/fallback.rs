use meal_planner_shared::MealType;
use serde_json::{Value, json};

use crate::{
    Person, category_for, curated_theme_dishes, extract_theme, skeleton_ingredients,
    skeleton_steps, youtube_search,
};

const TASK_POOL: [&str; 6] = [
    "Washing",
    "Preparing ingredients",
    "Stir-frying (Chef)",
    "Setting the table",
    "Clearing the table",
    "Washing dishes",
];

fn style_dishes(style: &str) -> &'static [&'static str] {
    match style.trim().to_lowercase().as_str() {
        "chinese" => &[
            "Fried rice",
            "Stir-fried vegetables",
            "Braised tofu",
            "Egg drop soup",
        ],
        "vietnamese" => &[
            "Broken rice",
            "Morning glory stir-fry",
            "Caramelized pork & eggs",
            "Sour fish soup",
        ],
        "western" => &[
            "Roasted chicken",
            "Mashed potatoes",
            "Pasta aglio e olio",
            "Garden salad",
        ],
        "japanese" => &[
            "Chicken teriyaki",
            "Miso soup",
            "Tamago",
            "Pickled cucumber",
        ],
        _ => &["Rice", "Sauteed veggies", "Egg omelette", "Tomato soup"],
    }
}

fn split_tokens(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
}

fn menu_without_theme(people: &[Person], headcount: i64) -> Vec<String> {
    let style = people
        .iter()
        .map(|person| person.food_style.as_str())
        .find(|style| !style.trim().is_empty())
        .unwrap_or_default();

    let mut avoid: Vec<String> = Vec::new();
    for person in people {
        avoid.extend(person.dislikes.iter().map(|dislike| dislike.trim().to_lowercase()));
        avoid.extend(split_tokens(&person.allergies));
    }
    avoid.retain(|token| !token.is_empty());

    let allowed = |dish: &str| {
        let dish = dish.to_lowercase();
        !avoid.iter().any(|token| dish.contains(token.as_str()))
    };

    let mut dishes: Vec<String> = style_dishes(style)
        .iter()
        .filter(|dish| allowed(**dish))
        .map(|dish| (*dish).to_owned())
        .collect();

    for like in people.iter().flat_map(|person| person.likes.iter()) {
        let like = like.trim();
        if !like.is_empty() && allowed(like) && !dishes.iter().any(|dish| dish == like) {
            dishes.push(like.to_owned());
        }
    }

    let target = usize::try_from(headcount.saturating_sub(1).max(2))
        .unwrap_or(2)
        .min(crate::MENU_SIZE);
    while dishes.len() < target {
        dishes.push(format!("Side dish {}", dishes.len() + 1));
    }
    dishes.truncate(crate::MENU_SIZE);

    dishes
}

/// Rule-based plan used when no model is reachable. Returns the same loose
/// JSON shape the model produces so it flows through `coerce` unchanged.
pub fn fallback_plan(people: &[Person], headcount: i64, meal_type: MealType) -> Value {
    let theme = extract_theme(people.iter().map(|person| person.remark.as_str()));

    let names = match &theme {
        Some(theme) => curated_theme_dishes(theme),
        None => menu_without_theme(people, headcount),
    };

    let dishes: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            json!({
                "name": name,
                "category": category_for(index),
                "ingredients": skeleton_ingredients(),
                "steps": skeleton_steps(),
                "image_url": "",
                "video_url": youtube_search(name),
            })
        })
        .collect();

    let mut role_names: Vec<String> = people
        .iter()
        .map(|person| {
            person
                .user_id
                .to_owned()
                .unwrap_or_else(|| person.display_name.to_owned())
        })
        .collect();
    if role_names.is_empty() {
        let virtual_members = usize::try_from(headcount.max(1))
            .unwrap_or(1)
            .min(TASK_POOL.len());
        role_names = vec![meal_planner_shared::MEMBER.to_owned(); virtual_members];
    }

    let roles: Vec<Value> = role_names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            json!({
                "person_role": meal_planner_shared::MEMBER,
                "display_name": name,
                "is_chef": index == 0,
                "tasks": [TASK_POOL[index % TASK_POOL.len()], TASK_POOL[(index + 2) % TASK_POOL.len()]],
            })
        })
        .collect();

    json!({
        "meta": {
            "meal_type": meal_type.to_string(),
            "headcount": headcount,
            "roles": roles,
        },
        "dishes": dishes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(user_id: &str) -> Person {
        Person {
            user_id: Some(user_id.to_owned()),
            person_role: "member".to_owned(),
            display_name: user_id.to_owned(),
            participant_count: 1,
            ..Default::default()
        }
    }

    fn names(plan: &Value) -> Vec<String> {
        plan["dishes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|dish| dish["name"].as_str().unwrap().to_owned())
            .collect()
    }

    #[test]
    fn themed_fallback_uses_curated_menu() {
        let mut mom = person("mom");
        mom.remark = "THEME: Fried rice party".to_owned();

        let plan = fallback_plan(&[mom], 2, MealType::Dinner);

        assert_eq!(
            names(&plan),
            vec![
                "Yangzhou Fried Rice",
                "Shrimp & Egg Fried Rice",
                "Stir-fried Bok Choy",
                "Egg Drop Soup"
            ]
        );
        assert_eq!(plan["dishes"][0]["category"], "Hot dish");
        assert_eq!(plan["dishes"][1]["category"], "Appetizer");
        assert_eq!(plan["dishes"][3]["category"], "Soup");
        assert_eq!(plan["dishes"][2]["steps"][4], "Step 5: Instruction");
    }

    #[test]
    fn style_dislikes_and_likes_shape_the_menu() {
        let mut mom = person("mom");
        mom.food_style = "Chinese".to_owned();
        mom.dislikes = vec!["tofu".to_owned()];
        mom.allergies = "Egg, ".to_owned();
        mom.likes = vec!["Dumplings".to_owned(), "Egg tart".to_owned()];

        let plan = fallback_plan(&[mom, person("kid")], 2, MealType::Lunch);

        assert_eq!(
            names(&plan),
            vec!["Fried rice", "Stir-fried vegetables", "Dumplings"]
        );
    }

    #[test]
    fn pads_to_target_and_caps_at_four() {
        let mut picky = person("picky");
        picky.dislikes = vec!["rice".to_owned(), "veggies".to_owned(), "egg".to_owned()];

        let plan = fallback_plan(&[picky], 4, MealType::Dinner);
        assert_eq!(names(&plan), vec!["Tomato soup", "Side dish 2", "Side dish 3"]);

        let plan = fallback_plan(&[person("a")], 12, MealType::Dinner);
        assert_eq!(names(&plan).len(), 4);
    }

    #[test]
    fn roles_rotate_tasks_and_fill_virtual_members() {
        let plan = fallback_plan(&[], 3, MealType::Breakfast);
        let roles = plan["meta"]["roles"].as_array().unwrap();

        assert_eq!(roles.len(), 3);
        assert_eq!(roles[0]["is_chef"], true);
        assert_eq!(roles[1]["is_chef"], false);
        assert_eq!(roles[0]["tasks"], json!(["Washing", "Stir-frying (Chef)"]));
        assert_eq!(
            roles[2]["tasks"],
            json!(["Stir-frying (Chef)", "Clearing the table"])
        );
        assert_eq!(roles[2]["display_name"], "member");
    }

    #[test]
    fn huge_headcount_stays_bounded() {
        let plan = fallback_plan(&[], i64::MAX, MealType::Dinner);
        assert_eq!(plan["meta"]["roles"].as_array().unwrap().len(), TASK_POOL.len());
        assert_eq!(names(&plan).len(), crate::MENU_SIZE);

        let plan = fallback_plan(&[person("mom")], 20_000_000, MealType::Dinner);
        assert_eq!(names(&plan).len(), crate::MENU_SIZE);
        assert_eq!(plan["meta"]["roles"].as_array().unwrap().len(), 1);
    }
}
