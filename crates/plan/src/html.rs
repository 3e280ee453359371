use askama::Template;

use crate::{PlanDocument, youtube_search};

struct DishView {
    name: String,
    category: String,
    source: String,
    reason: String,
    ingredients: Vec<(String, String)>,
    steps: Vec<String>,
    video_url: String,
    image_url: String,
}

#[derive(Template)]
#[template(path = "plan.html")]
struct PlanTemplate {
    family_name: String,
    family_id: String,
    time: String,
    headcount: i64,
    dishes: Vec<DishView>,
}

fn dish_view(dish: &crate::Dish) -> DishView {
    let reason = if !dish.reason.trim().is_empty() {
        dish.reason.to_owned()
    } else if !dish.base_dish.trim().is_empty() {
        format!("Similar to {} — same style/ingredients", dish.base_dish)
    } else {
        String::new()
    };

    let video_url = if dish.video_url.trim().is_empty() {
        youtube_search(&dish.name)
    } else {
        dish.video_url.to_owned()
    };

    DishView {
        name: dish.name.to_owned(),
        category: dish.category.to_owned(),
        source: dish.source.to_owned(),
        reason,
        ingredients: dish
            .ingredients
            .iter()
            .map(|item| (item.name.to_owned(), item.amount.to_owned()))
            .collect(),
        steps: dish
            .steps
            .iter()
            .map(|step| step.description.to_owned())
            .filter(|step| !step.trim().is_empty())
            .collect(),
        video_url,
        image_url: dish.image_url.to_owned(),
    }
}

/// Renders a self-contained HTML page for the plan. All text is escaped.
pub fn render_plan_html(doc: &PlanDocument) -> anyhow::Result<String> {
    let family_name = if doc.meta.family_name.trim().is_empty() {
        "Unknown Family".to_owned()
    } else {
        doc.meta.family_name.to_owned()
    };

    let template = PlanTemplate {
        family_name,
        family_id: doc.meta.family_id.to_owned(),
        time: doc.meta.time.to_owned(),
        headcount: doc.meta.headcount,
        dishes: doc.dishes.iter().map(dish_view).collect(),
    };

    Ok(template.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dish, Ingredient, Meta, Step};

    #[test]
    fn renders_escaped_dishes() {
        let doc = PlanDocument {
            meta: Meta {
                time: "2025-03-01,18:00".to_owned(),
                headcount: 3,
                family_id: "fam_1".to_owned(),
                family_name: "Smith <3".to_owned(),
                ..Default::default()
            },
            dishes: vec![Dish {
                name: "Mac & Cheese".to_owned(),
                category: "Hot dish".to_owned(),
                source: "wheel_variant".to_owned(),
                base_dish: "Pasta".to_owned(),
                ingredients: vec![Ingredient {
                    name: "Macaroni".to_owned(),
                    amount: "200g".to_owned(),
                }],
                steps: vec![Step {
                    description: "Boil <salted> water".to_owned(),
                    time: String::new(),
                }],
                ..Default::default()
            }],
        };

        let html = render_plan_html(&doc).unwrap();

        assert!(html.contains("Smith &#60;3") || html.contains("Smith &lt;3"));
        assert!(html.contains("Mac &#38; Cheese") || html.contains("Mac &amp; Cheese"));
        assert!(html.contains("Similar to Pasta — same style"));
        assert!(html.contains("Macaroni — 200g"));
        assert!(html.contains("search_query=Mac+%26+Cheese"));
        assert!(html.contains("Generated by Meal Planner"));
        assert!(!html.contains("<salted>"));
    }

    #[test]
    fn empty_family_name_reads_unknown() {
        let html = render_plan_html(&PlanDocument::default()).unwrap();

        assert!(html.contains("Unknown Family"));
    }
}
