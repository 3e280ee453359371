mod helpers;

use helpers::{DATE, ScriptedModel, generate_input, seed_family, setup_test_state, submit};
use meal_planner_plan::{Command, IngestInput, Query};
use meal_planner_shared::Error;
use serde_json::json;
use temp_dir::TempDir;

#[tokio::test]
async fn test_generate_falls_back_when_model_fails() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_test_state(dir.child("db.sqlite3")).await?;
    seed_family(&state, &["mom", "kid"]).await?;
    submit(&state, "mom", None).await?;
    submit(&state, "kid", None).await?;

    let model = ScriptedModel::new(vec![]);
    let command = Command::new(state.clone(), model.clone(), false);

    let plan = command
        .generate(meal_planner_plan::GenerateInput {
            feedback: Some("  less salt  ".to_owned()),
            ..generate_input()
        })
        .await?;

    assert_eq!(model.calls(), 1);
    assert_eq!(plan.family_id, "fam_1");
    assert_eq!(plan.meal_type, "dinner");
    assert_eq!(plan.plan_json.meta.family_name, "Smith");
    assert_eq!(plan.plan_json.meta.time, "2099-01-02,18:00");
    assert_eq!(plan.plan_json.meta.headcount, 2);
    assert_eq!(plan.plan_json.meta.participants_display, Some(2));
    assert_eq!(plan.plan_json.dishes.len(), 4);
    assert_eq!(plan.plan_json.dishes[0].name, "Rice");
    assert_eq!(plan.plan_json.meta.roles.len(), 2);
    assert!(plan.plan_json.meta.roles[0].is_chef);
    assert!(plan.plan_html.contains("Smith"));

    let stored = Query(state.read_db.clone())
        .latest(DATE)
        .await?
        .expect("plan for date");
    assert_eq!(stored.id, plan.plan_id);
    assert_eq!(stored.comment, "less salt");
    assert_eq!(stored.submission_cnt, 2);
    assert!(stored.plan_code.starts_with("fam_1_"));
    assert!(
        stored
            .model_raw
            .as_deref()
            .unwrap_or_default()
            .contains("fallback_due_to_error")
    );

    let fetched = Query(state.read_db.clone()).get(plan.plan_id).await?.unwrap();
    assert!(fetched.model_raw.is_none());
    assert_eq!(fetched.plan_json["dishes"][0]["name"], "Rice");

    Ok(())
}

#[tokio::test]
async fn test_generate_uses_model_plan_and_anchors() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_test_state(dir.child("db.sqlite3")).await?;
    seed_family(&state, &["mom"]).await?;

    let reply = json!({
        "meta": {"roles": [{"display_name": "mom", "person_role": "holder", "is_chef": true, "tasks": ["Stir-frying (Chef)"]}]},
        "dishes": [
            {"name": "Kung Pao Chicken", "category": "Hot dish", "ingredients": [{"name": "Chicken", "amount": "300g"}], "steps": ["Cook"]},
            {"name": "Curry", "category": "Hot dish"}
        ]
    });
    let model = ScriptedModel::new(vec![Ok(reply.to_string())]);
    let command = Command::new(state.clone(), model.clone(), false);

    let plan = command
        .generate(meal_planner_plan::GenerateInput {
            headcount: Some(3),
            submissions: Some(vec![json!({
                "user_id": "mom",
                "role": "holder",
                "preferences": {"is_chef": true, "food_style": "chinese"},
                "remark": "We are 5 people",
                "participant_count": 3
            })]),
            anchors: Some(vec!["curry".to_owned(), "Egg tart".to_owned()]),
            hard_lock: true,
            ..generate_input()
        })
        .await?;

    let prompts = model.prompts.lock().unwrap().clone();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("- Diners: 5"));
    assert!(prompts[0].contains("   - Food style: chinese"));

    let names: Vec<&str> = plan
        .plan_json
        .dishes
        .iter()
        .map(|dish| dish.name.as_str())
        .collect();
    assert_eq!(names, vec!["Egg tart", "Curry", "Kung Pao Chicken"]);
    assert_eq!(plan.plan_json.dishes[0].category, "Main");
    assert_eq!(plan.plan_json.dishes[0].locked, Some(true));
    assert_eq!(plan.plan_json.dishes[1].locked, Some(true));
    assert_eq!(plan.plan_json.dishes[2].locked, None);
    assert_eq!(plan.plan_json.meta.participants_display, Some(1));
    assert_eq!(plan.plan_json.meta.roles[0].person_role.as_deref(), Some("holder"));

    let stored = Query(state.read_db.clone()).latest(DATE).await?.unwrap();
    assert_eq!(stored.model_raw.as_deref(), Some(reply.to_string().as_str()));

    Ok(())
}

#[tokio::test]
async fn test_generate_starts_from_wheel_winner() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_test_state(dir.child("db.sqlite3")).await?;
    seed_family(&state, &["alice", "bob"]).await?;

    let wheel = meal_planner_wheel::Command(state.clone());
    for (user_id, dish) in [("alice", "Pho Bo"), ("bob", "Ramen")] {
        wheel
            .nominate(meal_planner_wheel::NominateInput {
                family_id: "fam_1".to_owned(),
                meal_date: DATE.to_owned(),
                meal_type: "dinner".to_owned(),
                user_id: user_id.to_owned(),
                dish: Some(dish.to_owned()),
                dishes: None,
            })
            .await?;
    }
    wheel
        .pick(meal_planner_wheel::PickInput {
            family_id: "fam_1".to_owned(),
            meal_date: DATE.to_owned(),
            meal_type: "dinner".to_owned(),
            winner_name: "Pho Bo".to_owned(),
            picked_by: "alice".to_owned(),
        })
        .await?;

    let exact = json!({"name": "Pho Bo", "ingredients": [{"name": "Beef", "quantity_metric": "200g"}], "steps": ["Simmer broth"]});
    let variant = json!({"name": "pho bo", "ingredients": [], "steps": ["Boil noodles"], "similarity_note": "same noodles"});
    let model = ScriptedModel::new(vec![Ok(exact.to_string()), Ok(variant.to_string())]);
    let command = Command::new(state.clone(), model.clone(), false);

    let plan = command.generate(generate_input()).await?;

    assert_eq!(model.calls(), 2);

    let dishes = &plan.plan_json.dishes;
    assert_eq!(dishes.len(), 2);
    assert_eq!(dishes[0].name, "Pho Bo");
    assert_eq!(dishes[0].source, "wheel_winner");
    assert_eq!(dishes[0].reason, "Picked by wheel (winner) — proposed by alice name");
    assert_eq!(dishes[0].ingredients[0].amount, "200g");
    assert_eq!(dishes[1].name, "Ramen – Chicken Variant");
    assert_eq!(dishes[1].source, "wheel_variant");
    assert_eq!(dishes[1].base_dish, "Ramen");
    assert_eq!(dishes[1].reason, "Similar to Ramen — same noodles");
    assert_eq!(plan.plan_json.meta.participants_display, Some(2));

    let reasons = plan.plan_json.meta.generation_reasons.clone().unwrap();
    assert_eq!(reasons[1].source.as_deref(), Some("wheel_variant"));

    let stored = Query(state.read_db.clone()).latest(DATE).await?.unwrap();
    assert_eq!(stored.model_raw.as_deref(), Some(r#"{"mode":"wheel-first"}"#));

    Ok(())
}

#[tokio::test]
async fn test_feedback_comment_regenerate_and_delete() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_test_state(dir.child("db.sqlite3")).await?;
    seed_family(&state, &["mom", "kid"]).await?;
    submit(&state, "kid", Some("THEME: Ramen")).await?;

    let model = ScriptedModel::new(vec![]);
    let command = Command::new(state.clone(), model.clone(), true);
    let query = Query(state.read_db.clone());

    let plan = command.generate(generate_input()).await?;
    assert_eq!(model.calls(), 0);
    assert_eq!(plan.plan_json.dishes[0].name, "Shoyu Ramen");

    let err = command.feedback(plan.plan_id, "  ").await.unwrap_err();
    assert!(matches!(err, Error::User(_)));
    let err = command.feedback(9999, "great").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    command.feedback(plan.plan_id, "great").await?;

    assert_eq!(command.comment(plan.plan_id, "mom", "more spicy").await?, "mom: more spicy");
    assert_eq!(
        command.comment(plan.plan_id, "kid", "no onions").await?,
        "mom: more spicy\nkid: no onions"
    );

    let err = command.regenerate(plan.plan_id, "kid").await.unwrap_err();
    assert_eq!(err.to_string(), "Only family holder can regenerate plans");

    let again = command.regenerate(plan.plan_id, "mom").await?;
    assert_ne!(again.plan_id, plan.plan_id);
    assert_eq!(again.plan_json.meta.headcount, again.plan_json.dishes.len() as i64);

    let stored = query.get(again.plan_id).await?.unwrap();
    assert_eq!(stored.comment, format!("Regenerated from plan #{}", plan.plan_id));

    let listed = query.by_family("fam_1", false).await?;
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, again.plan_id);
    assert!(listed[0].plan_json.is_null());

    let err = command.delete(plan.plan_id, "kid").await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));
    command.delete(plan.plan_id, "mom").await?;
    assert!(query.get(plan.plan_id).await?.is_none());

    let err = command.delete(plan.plan_id, "mom").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_regenerate_needs_submissions() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_test_state(dir.child("db.sqlite3")).await?;
    seed_family(&state, &["mom"]).await?;

    let command = Command::new(state.clone(), ScriptedModel::new(vec![]), true);
    let plan = command
        .generate(meal_planner_plan::GenerateInput {
            headcount: Some(3),
            ..generate_input()
        })
        .await?;
    assert_eq!(plan.plan_json.meta.headcount, 3);
    assert_eq!(plan.plan_json.meta.roles.len(), 3);

    let err = command.regenerate(plan.plan_id, "mom").await.unwrap_err();
    assert_eq!(err.to_string(), "No submissions found for regeneration");

    Ok(())
}

#[tokio::test]
async fn test_ingest_counts_dishes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_test_state(dir.child("db.sqlite3")).await?;
    seed_family(&state, &["mom", "kid"]).await?;
    submit(&state, "mom", None).await?;

    let command = Command::new(state.clone(), ScriptedModel::new(vec![]), false);

    let plan = command
        .ingest(IngestInput {
            family_id: "fam_1".to_owned(),
            meal_date: DATE.to_owned(),
            meal_type: "Lunch".to_owned(),
            headcount: None,
            payload: json!({"dishes": [{"name": "A"}, {"name": "B"}, {"name": "C"}]}),
        })
        .await?;

    assert_eq!(plan.meal_type, "lunch");
    assert_eq!(plan.submission_cnt, Some(1));
    assert_eq!(plan.plan_json.meta.headcount, 3);
    assert_eq!(plan.plan_json.meta.time, "2099-01-02,12:00");

    let err = command
        .ingest(IngestInput {
            family_id: "fam_1".to_owned(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Missing family_id / meal_date / meal_type");

    let by_code = Query(state.read_db.clone()).by_meal_code("").await?;
    assert_eq!(by_code.len(), 1);

    Ok(())
}

async fn nominate(
    state: &meal_planner_shared::State,
    meal_type: &str,
    user_id: &str,
    dish: &str,
) -> anyhow::Result<()> {
    meal_planner_wheel::Command(state.clone())
        .nominate(meal_planner_wheel::NominateInput {
            family_id: "fam_1".to_owned(),
            meal_date: DATE.to_owned(),
            meal_type: meal_type.to_owned(),
            user_id: user_id.to_owned(),
            dish: Some(dish.to_owned()),
            dishes: None,
        })
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_generate_forces_winner_from_first_anchor() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_test_state(dir.child("db.sqlite3")).await?;
    seed_family(&state, &["alice", "bob"]).await?;
    nominate(&state, "dinner", "alice", "Pho Bo").await?;
    nominate(&state, "dinner", "bob", "Ramen").await?;

    let exact = json!({"name": "Ramen", "ingredients": [{"name": "Noodles", "amount": "200g"}], "steps": ["Boil"]});
    let variant = json!({"name": "Pho Ga", "ingredients": [], "steps": ["Simmer"], "similarity_note": "noodle soup"});
    let model = ScriptedModel::new(vec![Ok(exact.to_string()), Ok(variant.to_string())]);
    let command = Command::new(state.clone(), model.clone(), false);

    let plan = command
        .generate(meal_planner_plan::GenerateInput {
            anchors: Some(vec!["  rAmEn ".to_owned()]),
            ..generate_input()
        })
        .await?;

    assert_eq!(model.calls(), 2);

    let dishes = &plan.plan_json.dishes;
    assert_eq!(dishes.len(), 2);
    assert_eq!(dishes[0].name, "Ramen");
    assert_eq!(dishes[0].source, "wheel_winner");
    assert_eq!(dishes[0].reason, "Picked by wheel (winner) — proposed by bob name");
    assert_eq!(dishes[1].name, "Pho Ga");
    assert_eq!(dishes[1].base_dish, "Pho Bo");
    assert_eq!(dishes[1].reason, "Similar to Pho Bo — noodle soup");

    Ok(())
}

#[tokio::test]
async fn test_generate_uses_model_when_session_has_no_wheel() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_test_state(dir.child("db.sqlite3")).await?;
    seed_family(&state, &["alice", "bob"]).await?;
    submit(&state, "alice", None).await?;
    nominate(&state, "lunch", "bob", "Ramen").await?;

    let reply = json!({"dishes": [{"name": "Curry", "category": "Hot dish"}, {"name": "Salad"}]});
    let model = ScriptedModel::new(vec![Ok(reply.to_string())]);
    let command = Command::new(state.clone(), model.clone(), false);

    let plan = command.generate(generate_input()).await?;

    assert_eq!(model.calls(), 1);
    let names: Vec<&str> = plan
        .plan_json
        .dishes
        .iter()
        .map(|dish| dish.name.as_str())
        .collect();
    assert_eq!(names, vec!["Curry", "Salad"]);

    let stored = Query(state.read_db.clone()).latest(DATE).await?.unwrap();
    assert_eq!(stored.model_raw.as_deref(), Some(reply.to_string().as_str()));

    Ok(())
}

#[tokio::test]
async fn test_generate_bounds_oversized_counts() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = setup_test_state(dir.child("db.sqlite3")).await?;
    seed_family(&state, &["mom", "kid"]).await?;

    let model = ScriptedModel::new(vec![]);
    let command = Command::new(state.clone(), model.clone(), false);

    let plan = command
        .generate(meal_planner_plan::GenerateInput {
            submissions: Some(vec![
                json!({"user_id": "mom", "participant_count": i64::MAX}),
                json!({"user_id": "kid", "participant_count": 1}),
            ]),
            ..generate_input()
        })
        .await?;

    let prompts = model.prompts.lock().unwrap().clone();
    assert!(prompts[0].contains(&format!(
        "- Diners: {}",
        meal_planner_shared::MAX_PARTICIPANTS + 1
    )));
    assert!(plan.plan_json.dishes.len() <= meal_planner_plan::MENU_SIZE);
    assert_eq!(plan.plan_json.meta.participants_display, Some(2));

    let debug = Command::new(state.clone(), ScriptedModel::new(vec![]), true);
    let plan = debug
        .generate(meal_planner_plan::GenerateInput {
            headcount: Some(i64::MAX),
            ..generate_input()
        })
        .await?;
    assert_eq!(plan.plan_json.meta.headcount, meal_planner_shared::MAX_HEADCOUNT);
    assert!(plan.plan_json.dishes.len() <= meal_planner_plan::MENU_SIZE);

    Ok(())
}
