use std::sync::Arc;

use meal_planner_shared::MealType;
use meal_planner_wheel::WheelContext;
use serde_json::{Value, json};

use crate::{
    Person, PlanModel, PromptInput, apply_forced_menu, extract_theme, fallback_plan,
    finalize_menu, heuristic_theme_dishes, prompt, remark_headcount, skeleton_steps,
    suggest_variant_name, youtube_search,
};

/// Runs the model calls behind plan generation and falls back to rules
/// whenever the model is unavailable.
#[derive(Clone)]
pub struct Generator {
    model: Arc<dyn PlanModel>,
    debug: bool,
}

/// Everything the LLM path needs about one meal.
#[derive(Debug, Clone)]
pub struct PlanRequest<'a> {
    pub meal_date: &'a str,
    pub meal_type: MealType,
    pub headcount: i64,
    pub people: &'a [Person],
}

/// The raw plan JSON plus what gets stored as `model_raw`.
#[derive(Debug, Clone)]
pub struct Generated {
    pub plan: Value,
    pub model_raw: String,
}

/// A wheel round reduced to what the wheel-first path needs.
#[derive(Debug, Clone)]
pub struct WheelRequest<'a> {
    pub context: &'a WheelContext,
    pub forced_winner: Option<&'a str>,
    pub meal_date: &'a str,
    pub meal_type: MealType,
    pub headcount: i64,
    pub people: &'a [Person],
}

fn parse_object(content: &str) -> anyhow::Result<Value> {
    let value: Value = serde_json::from_str(content.trim())?;
    if !value.is_object() {
        anyhow::bail!("model answered with a non-object JSON value");
    }

    Ok(value)
}

fn skeleton_recipe(name: &str) -> Value {
    json!({
        "name": name,
        "category": "Hot dish",
        "ingredients": [{"name": "Ingredient A", "amount": "100g"}],
        "steps": skeleton_steps(),
        "image_url": "",
        "video_url": youtube_search(name),
        "similarity_note": "",
    })
}

fn recipe_from(data: &Value, fallback_name: &str) -> Value {
    let name = data
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(fallback_name)
        .to_owned();

    let ingredients: Vec<Value> = data
        .get("ingredients")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match item {
                    Value::Object(item) => Some(json!({
                        "name": item.get("name").and_then(Value::as_str).unwrap_or_default(),
                        "amount": item
                            .get("quantity_metric")
                            .or_else(|| item.get("amount"))
                            .and_then(Value::as_str)
                            .unwrap_or_default(),
                    })),
                    Value::String(name) => Some(json!({"name": name, "amount": ""})),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    let steps: Vec<Value> = data
        .get("steps")
        .and_then(Value::as_array)
        .map(|steps| {
            steps
                .iter()
                .filter_map(|step| match step {
                    Value::String(step) => Some(Value::String(step.to_owned())),
                    Value::Object(step) => step
                        .get("description")
                        .or_else(|| step.get("step"))
                        .and_then(Value::as_str)
                        .map(|step| Value::String(step.to_owned())),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    let video = data
        .get("video_url")
        .and_then(Value::as_str)
        .filter(|video| crate::coerce::is_http_url(video))
        .map(str::to_owned)
        .unwrap_or_else(|| youtube_search(&name));

    json!({
        "name": name,
        "category": "Hot dish",
        "ingredients": ingredients,
        "steps": steps,
        "image_url": "",
        "video_url": video,
        "similarity_note": data.get("similarity_note").and_then(Value::as_str).unwrap_or_default(),
    })
}

fn set_text(value: &mut Value, key: &str, text: impl Into<String>) {
    value[key] = Value::String(text.into());
}

fn dish_name(value: &Value) -> String {
    value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_owned()
}

fn contains_folded(names: &[String], name: &str) -> bool {
    let name = name.trim().to_lowercase();
    names.iter().any(|known| known.trim().to_lowercase() == name)
}

impl Generator {
    pub fn new(model: Arc<dyn PlanModel>, debug: bool) -> Self {
        Self { model, debug }
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// One recipe from the model. Failures yield a skeleton recipe named
    /// `fallback_name`.
    pub async fn one_recipe(&self, prompt: &str, fallback_name: &str) -> Value {
        if self.debug {
            return skeleton_recipe(fallback_name);
        }

        let user = format!("{prompt}\n\nReturn all fields strictly in English.");
        let result = self
            .model
            .complete(prompt::RECIPE_SYSTEM, &user, 0.6, 900)
            .await
            .and_then(|content| parse_object(&content));

        match result {
            Ok(data) => recipe_from(&data, fallback_name),
            Err(err) => {
                tracing::warn!(err = %err, dish = fallback_name, "recipe request failed");
                skeleton_recipe(fallback_name)
            }
        }
    }

    /// Four dish names around `theme`, asking the model first.
    pub async fn theme_menu(&self, theme: &str) -> Vec<String> {
        if self.debug {
            return finalize_menu(theme, &heuristic_theme_dishes(theme));
        }

        let result = self
            .model
            .complete(prompt::THEME_SYSTEM, &prompt::theme_prompt(theme), 0.6, 300)
            .await
            .and_then(|content| parse_object(&content));

        let dishes: Vec<String> = match result {
            Ok(data) => data
                .get("dishes")
                .and_then(Value::as_array)
                .map(|dishes| {
                    dishes
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default(),
            Err(err) => {
                tracing::warn!(err = %err, theme, "theme menu request failed");
                heuristic_theme_dishes(theme)
            }
        };

        finalize_menu(theme, &dishes)
    }

    /// Asks the model for a whole plan, falling back to rules on any error.
    pub async fn llm_plan(&self, request: &PlanRequest<'_>) -> Generated {
        if self.debug {
            tracing::info!("debug mode, using the rule-based plan");

            return Generated {
                plan: fallback_plan(request.people, request.headcount, request.meal_type),
                model_raw: json!({"LLM": "mocked_debug"}).to_string(),
            };
        }

        let theme = extract_theme(request.people.iter().map(|person| person.remark.as_str()));

        let mut headcount = request.headcount;
        let mut remark_hint = None;
        if let Some(hinted) = request
            .people
            .iter()
            .filter_map(|person| remark_headcount(&person.remark))
            .find(|hinted| *hinted > headcount)
        {
            headcount = hinted;
            remark_hint = Some(hinted);
        }

        let forced_menu = match &theme {
            Some(theme) => self.theme_menu(theme).await,
            None => vec![],
        };

        let user_prompt = prompt::plan_prompt(&PromptInput {
            meal_date: request.meal_date,
            meal_type: request.meal_type,
            headcount,
            people: request.people,
            theme: theme.as_deref(),
            forced_menu: &forced_menu,
            remark_hint,
        });

        tracing::info!(
            headcount,
            theme = theme.as_deref().unwrap_or_default(),
            forced_menu = forced_menu.len(),
            "requesting plan from model"
        );

        let result = match self
            .model
            .complete(prompt::PLAN_SYSTEM, &user_prompt, 0.7, 4000)
            .await
        {
            Ok(content) => parse_object(&content).map(|plan| (plan, content)),
            Err(err) => Err(err),
        };

        match result {
            Ok((mut plan, content)) => {
                if !forced_menu.is_empty() {
                    apply_forced_menu(&mut plan, &forced_menu);
                }

                Generated {
                    plan,
                    model_raw: content,
                }
            }
            Err(err) => {
                tracing::error!(err = %err, "plan generation failed, using the rule-based plan");

                Generated {
                    plan: fallback_plan(request.people, request.headcount, request.meal_type),
                    model_raw: json!({"LLM": "fallback_due_to_error", "error": err.to_string()})
                        .to_string(),
                }
            }
        }
    }

    /// Builds the plan from the wheel: the winner first, then one similar
    /// dish per other participant. `None` when there is nothing to build on.
    pub async fn wheel_plan(&self, request: &WheelRequest<'_>) -> Option<Value> {
        let context = request.context;

        let forced = request
            .forced_winner
            .map(str::trim)
            .filter(|winner| !winner.is_empty());

        let (winner, winner_proposer) = match forced {
            Some(winner) => (
                winner.to_owned(),
                context
                    .proposer_of(winner)
                    .map(|candidate| candidate.proposer.to_owned()),
            ),
            None => (
                context.winner_dish.to_owned()?,
                context.winner_proposer.to_owned(),
            ),
        };

        if context.participants.is_empty() || winner.trim().is_empty() {
            return None;
        }

        let target = context.participants.len();
        let mut forbid = vec![winner.to_owned()];
        let mut already = vec![winner.to_owned()];
        let mut dishes = Vec::with_capacity(target);

        let mut exact = self
            .one_recipe(&prompt::exact_recipe_prompt(&winner), &winner)
            .await;
        let proposer_name = context
            .proposer_of(&winner)
            .map(|candidate| {
                if candidate.proposer_name.trim().is_empty() {
                    candidate.proposer.to_owned()
                } else {
                    candidate.proposer_name.to_owned()
                }
            })
            .filter(|name| !name.trim().is_empty());

        let reason = match proposer_name {
            Some(name) => format!("Picked by wheel (winner) — proposed by {name}"),
            None => "Picked by wheel (winner)".to_owned(),
        };
        set_text(&mut exact, "source", "wheel_winner");
        set_text(&mut exact, "base_dish", winner.to_owned());
        set_text(&mut exact, "reason", reason);

        let exact_name = dish_name(&exact);
        if !contains_folded(&forbid, &exact_name) {
            forbid.push(exact_name.to_owned());
        }
        if !already.contains(&exact_name) {
            already.push(exact_name);
        }
        dishes.push(exact);

        for user_id in &context.participants {
            if dishes.len() >= target {
                break;
            }
            if winner_proposer.as_deref() == Some(user_id.as_str()) {
                continue;
            }

            let Some(base) = context
                .nominations_of(user_id)
                .iter()
                .map(|nomination| nomination.dish.trim())
                .find(|dish| !dish.is_empty() && !forbid.iter().any(|name| name == dish))
                .map(str::to_owned)
            else {
                continue;
            };

            let mut recipe = self
                .one_recipe(&prompt::variant_recipe_prompt(&base, &forbid, &winner), "")
                .await;

            let mut name = dish_name(&recipe);
            if name.is_empty()
                || contains_folded(&forbid, &name)
                || name.to_lowercase() == base.to_lowercase()
            {
                name = suggest_variant_name(&base, &forbid);
                set_text(&mut recipe, "video_url", youtube_search(&name));
            }
            if already.contains(&name) {
                name = format!("{name}-{}", already.len() + 1);
            }
            set_text(&mut recipe, "name", name.to_owned());

            let note = recipe
                .get("similarity_note")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|note| !note.is_empty())
                .unwrap_or("same style/ingredients")
                .to_owned();
            set_text(&mut recipe, "source", "wheel_variant");
            set_text(&mut recipe, "base_dish", base.to_owned());
            set_text(&mut recipe, "reason", format!("Similar to {base} — {note}"));

            forbid.push(name.to_owned());
            already.push(name);
            dishes.push(recipe);
        }

        let meal_time = request.meal_type.plan_time();
        let headcount = request
            .headcount
            .max(i64::try_from(request.people.len()).unwrap_or(i64::MAX))
            .max(1);

        Some(json!({
            "meta": {
                "Time": format!("{}, {meal_time}", request.meal_date),
                "headcount": headcount,
                "roles": request.people,
            },
            "dishes": dishes,
        }))
    }
}
