mod helpers;

use meal_planner_submission::{Command, Query, preferences::SavePreferenceInput};
use serde_json::json;
use temp_dir::TempDir;

#[tokio::test]
async fn save_and_list_family_preferences() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::seed_family(&state, "fam_1", &["alice", "bob", "carol"]).await?;

    let cmd = Command(state.clone());
    let query = Query(state.read_db.clone());

    cmd.save_preference(SavePreferenceInput {
        family_id: "fam_1".to_owned(),
        user_id: "bob".to_owned(),
        preference: json!({"isChef": "yes", "Tasks": ["Cook"]}),
        effective_date: Some("2099-01-01".to_owned()),
        ..Default::default()
    })
    .await?;
    cmd.save_preference(SavePreferenceInput {
        family_id: "fam_1".to_owned(),
        user_id: "bob".to_owned(),
        preference: json!({"is_chef": false}),
        effective_date: Some("2099-01-01".to_owned()),
        ..Default::default()
    })
    .await?;

    let listed = query.family_preferences("fam_1").await?;
    let ids = listed.iter().map(|m| m.user_id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["alice", "bob", "carol"]);
    assert!(listed[0].preference.is_none());
    assert_eq!(listed[1].preference, Some(json!({"is_chef": false})));
    assert_eq!(listed[1].user_name, "bob name");

    let stored: Option<String> =
        sqlx::query_scalar("SELECT display_name FROM cooking_preference WHERE user_id = 'bob'")
            .fetch_one(&state.read_db)
            .await?;
    assert_eq!(stored.as_deref(), Some("bob display"));

    assert!(query.family_preferences("fam_x").await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn merged_returns_latest_normalized() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::seed_family(&state, "fam_1", &["alice"]).await?;

    let cmd = Command(state.clone());
    let query = Query(state.read_db.clone());

    let empty = query.merged_preference("fam_1", "alice").await?;
    assert_eq!(empty.preference, json!({}));
    assert!(empty.updated_at.is_none());

    cmd.save_preference(SavePreferenceInput {
        family_id: "fam_1".to_owned(),
        user_id: "alice".to_owned(),
        preference: json!({"beforeTask": "Prework"}),
        display_name: Some("Mom".to_owned()),
        ..Default::default()
    })
    .await?;

    let merged = query.merged_preference("fam_1", "alice").await?;
    assert_eq!(
        merged.preference,
        json!({"before_task": "pre_work", "tasks": ["pre_work"]})
    );
    assert!(merged.updated_at.is_some());

    let err = cmd
        .save_preference(SavePreferenceInput {
            family_id: "fam_1".to_owned(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Missing family_id or user_id");

    Ok(())
}
