mod helpers;

use meal_planner_shared::{Error, MealType};
use meal_planner_submission::{Command, Query};
use temp_dir::TempDir;

#[tokio::test]
async fn submit_upserts_per_session() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::seed_family(&state, "fam_1", &["alice", "bob"]).await?;

    let cmd = Command(state.clone());
    let query = Query(state.read_db.clone());

    cmd.submit(helpers::submission("fam_1", "alice", "2099-01-02", "Dinner"))
        .await?;
    cmd.submit(meal_planner_submission::SubmitInput {
        remark: Some("THEME: pasta".to_owned()),
        participant_count: Some(3),
        ..helpers::submission("fam_1", "alice", "2099-01-02", "dinner")
    })
    .await?;
    cmd.submit(helpers::submission("fam_1", "bob", "2099-01-02", "lunch"))
        .await?;

    let session = query
        .for_session("fam_1", "2099-01-02", MealType::Dinner)
        .await?;
    assert_eq!(session.len(), 1);
    assert_eq!(session[0].remark.as_deref(), Some("THEME: pasta"));
    assert_eq!(session[0].participant_count, 3);
    assert_eq!(session[0].meal_type, "dinner");
    assert_eq!(session[0].preferences["likes"][0], "tofu");

    let day = query.at("fam_1", "2099-01-02").await?;
    let types = day.iter().map(|s| s.meal_type.as_str()).collect::<Vec<_>>();
    assert_eq!(types, vec!["dinner", "lunch"]);

    assert_eq!(query.count("fam_1").await?, 2);

    let listed = query.by_family("fam_1").await?;
    assert!(listed.iter().all(|s| s.user_name.is_some()));

    Ok(())
}

#[tokio::test]
async fn submit_rejects_bad_input() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = Command(state);

    let missing = cmd
        .submit(helpers::submission("fam_1", "", "2099-01-02", "dinner"))
        .await
        .unwrap_err();
    assert_eq!(missing.to_string(), "Missing required fields");

    let bad_type = cmd
        .submit(helpers::submission("fam_1", "alice", "2099-01-02", "brunch"))
        .await
        .unwrap_err();
    assert!(matches!(bad_type, Error::User(_)));

    let bad_count = cmd
        .submit(meal_planner_submission::SubmitInput {
            participant_count: Some(0),
            ..helpers::submission("fam_1", "alice", "2099-01-02", "dinner")
        })
        .await
        .unwrap_err();
    assert!(matches!(bad_count, Error::User(_)));

    let huge_count = cmd
        .submit(meal_planner_submission::SubmitInput {
            participant_count: Some(i64::MAX),
            ..helpers::submission("fam_1", "alice", "2099-01-02", "dinner")
        })
        .await
        .unwrap_err();
    assert_eq!(huge_count.to_string(), "participant_count must be at most 50");

    let retired = cmd.submit_by_meal_code("fam_100099010204").unwrap_err();
    assert!(matches!(retired, Error::Gone(_)));

    Ok(())
}

#[tokio::test]
async fn delete_requires_owner() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::seed_family(&state, "fam_1", &["alice", "bob"]).await?;

    let cmd = Command(state.clone());
    let query = Query(state.read_db.clone());

    cmd.submit(helpers::submission("fam_1", "alice", "2099-01-02", "dinner"))
        .await?;
    let id = query.list_my("all", "alice", 100).await?[0].id;

    let err = cmd.delete(id, "bob").await.unwrap_err();
    assert_eq!(err.to_string(), "Submission not found or not owned by user");

    let detail = query.get(id).await?.expect("submission exists");
    assert_eq!(detail.family_name.as_deref(), Some("fam_1 family"));
    assert_eq!(detail.user_name.as_deref(), Some("alice name"));

    cmd.delete(id, "alice").await?;
    assert!(query.get(id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn list_my_filters_family() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::seed_family(&state, "fam_1", &["alice"]).await?;
    helpers::seed_family(&state, "fam_2", &["alice"]).await?;

    let cmd = Command(state.clone());
    let query = Query(state.read_db.clone());

    cmd.submit(helpers::submission("fam_1", "alice", "2099-01-02", "dinner"))
        .await?;
    cmd.submit(helpers::submission("fam_2", "alice", "2099-01-03", "lunch"))
        .await?;

    assert_eq!(query.list_my("all", "alice", 100).await?.len(), 2);
    assert_eq!(query.list_my("all", "alice", 1).await?.len(), 1);

    let only = query.list_my("fam_2", "alice", 100).await?;
    assert_eq!(only.len(), 1);
    assert_eq!(only[0].family_name.as_deref(), Some("fam_2 family"));

    Ok(())
}
