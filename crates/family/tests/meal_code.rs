use meal_planner_family::meal_code::CreateMealCodeInput;
use meal_planner_shared::{Error, MealType};
use temp_dir::TempDir;

mod helpers;

fn code_input(meal_type: MealType, participants: u32) -> CreateMealCodeInput {
    CreateMealCodeInput {
        family_id: "fam_1".to_owned(),
        user_id: "alice".to_owned(),
        participant_count: participants,
        meal_time: "2099-01-02 18:00".to_owned(),
        meal_type,
    }
}

#[tokio::test]
async fn meal_codes_are_issued_once_per_session() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_users(&state, &["alice"]).await?;
    let cmd = helpers::create_family(&state, "fam_1", "alice").await?;
    let query = meal_planner_family::Query(state.read_db.clone());

    let first = cmd.create_meal_code(code_input(MealType::Lunch, 4)).await?;
    assert_eq!(first.meal_code, "fam_100099010204");

    let again = cmd.create_meal_code(code_input(MealType::Lunch, 7)).await?;
    assert_eq!(again.meal_code, first.meal_code);

    let lookup = query.lookup_meal_code(&first.meal_code).await?;
    assert_eq!(lookup.family_id, "fam_1");
    assert_eq!(lookup.family_name, "fam_1 family");
    assert_eq!(lookup.meal_date, "2099-01-02");
    assert_eq!(lookup.participant_count, 4);
    assert_eq!(lookup.meal_type, "lunch");

    let issued = query.issued_meal_code(&first.meal_code).await?.unwrap();
    assert_eq!(issued.meal_type, "lunch");
    assert!(query.issued_meal_code("ZZZZ000099010204").await?.is_none());

    let holder = query.holder_meal_codes("alice", "2025-01-01").await?;
    assert_eq!(holder.len(), 1);
    assert!(query.holder_meal_codes("alice", "2100-01-01").await?.is_empty());

    assert!(matches!(
        query.lookup_meal_code("short").await.unwrap_err(),
        Error::User(_)
    ));
    assert!(matches!(
        query.lookup_meal_code("ZZZZ000099010204").await.unwrap_err(),
        Error::NotFound(_)
    ));

    Ok(())
}
