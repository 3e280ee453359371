use meal_planner_family::{JoinInput, SetActiveMealInput};
use meal_planner_shared::{Error, MealType};
use temp_dir::TempDir;
use time::macros::datetime;

mod helpers;

fn set_input(user_id: &str, meal_type: &str) -> SetActiveMealInput {
    SetActiveMealInput {
        family_id: "fam_1".to_owned(),
        user_id: user_id.to_owned(),
        meal_date: "2025-06-01".to_owned(),
        meal_type: meal_type.to_owned(),
    }
}

#[tokio::test]
async fn only_holder_sets_active_meal() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_users(&state, &["alice", "bob"]).await?;
    let cmd = helpers::create_family(&state, "fam_1", "alice").await?;
    let query = meal_planner_family::Query(state.read_db.clone());

    cmd.join(JoinInput {
        family_id: "fam_1".to_owned(),
        user_id: "bob".to_owned(),
        role: None,
        display_name: None,
    })
    .await?;

    let err = cmd.set_active_meal(set_input("bob", "lunch")).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));
    assert_eq!(err.to_string(), "Only family holder can set active meal");

    let err = cmd
        .set_active_meal(set_input("alice", "supper"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid meal_type");

    let ctx = cmd.set_active_meal(set_input("alice", "Lunch")).await?;
    assert_eq!(ctx.meal_type, MealType::Lunch);

    let active = query.active_meal("fam_1").await?.unwrap();
    assert_eq!(active.meal_date.as_deref(), Some("2025-06-01"));
    assert_eq!(active.meal_type.as_deref(), Some("lunch"));
    assert_eq!(active.updated_by.as_deref(), Some("alice"));
    assert!(active.updated_at.is_some());

    let ctx = query
        .active_context("fam_1", datetime!(2025-07-01 20:00 UTC))
        .await?
        .unwrap();
    assert_eq!(ctx.meal_date, "2025-06-01");
    assert_eq!(ctx.meal_type, MealType::Lunch);

    Ok(())
}

#[tokio::test]
async fn active_context_is_inferred_from_meal_times() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_users(&state, &["alice"]).await?;
    helpers::create_family(&state, "fam_1", "alice").await?;
    let query = meal_planner_family::Query(state.read_db.clone());

    let ctx = query
        .active_context("fam_1", datetime!(2025-07-01 09:00 UTC))
        .await?
        .unwrap();
    assert_eq!(ctx.meal_date, "2025-07-01");
    assert_eq!(ctx.meal_type, MealType::Breakfast);

    let ctx = query
        .active_context("fam_1", datetime!(2025-07-01 12:00 UTC))
        .await?
        .unwrap();
    assert_eq!(ctx.meal_type, MealType::Lunch);

    assert!(
        query
            .active_context("nope", datetime!(2025-07-01 12:00 UTC))
            .await?
            .is_none()
    );

    Ok(())
}
