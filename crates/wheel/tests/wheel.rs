mod helpers;

use meal_planner_shared::Error;
use meal_planner_wheel::{
    CandidateRef, Command, NominateInput, PickInput, Query, Session, VoteAction, VoteInput,
};
use temp_dir::TempDir;

fn session() -> Session {
    Session::new("fam_1", "2099-01-02", "dinner").unwrap()
}

#[tokio::test]
async fn nominate_limits_and_duplicates() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_users(&state, &["alice"]).await?;
    let cmd = Command(state.clone());

    cmd.nominate(helpers::nominate("alice", "Pho Bo")).await?;

    let dup = cmd
        .nominate(helpers::nominate("bob", "Pho Bo"))
        .await
        .unwrap_err();
    assert!(matches!(dup, Error::Conflict(_)));

    cmd.nominate(NominateInput {
        dish: None,
        dishes: Some(vec![" Ramen ".to_owned(), "Sushi".to_owned()]),
        ..helpers::nominate("alice", "")
    })
    .await?;

    let third = cmd
        .nominate(helpers::nominate("alice", "Tacos"))
        .await
        .unwrap_err();
    assert_eq!(third.to_string(), "You can add at most 2 dishes for this time");

    let missing = cmd
        .nominate(helpers::nominate("alice", "  "))
        .await
        .unwrap_err();
    assert_eq!(missing.to_string(), "Missing fields");

    let wheel = Query(state.read_db.clone()).state(&session(), Some("alice")).await?;
    let names = wheel
        .candidates
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Pho Bo", "Ramen"]);
    assert_eq!(wheel.candidates[0].proposer_name, "alice name");
    assert_eq!(wheel.user_summary.map(|s| s.ballots), Some(2));

    let unknown = cmd.nominate(helpers::nominate("zed", "Curry")).await?;
    let wheel = Query(state.read_db.clone()).state(&session(), None).await?;
    let zed = wheel
        .candidates
        .iter()
        .find(|c| c.id == unknown.to_string())
        .expect("zed's dish");
    assert_eq!(zed.proposer_name, "zed");
    assert!(wheel.user_summary.is_none());

    Ok(())
}

#[tokio::test]
async fn vote_toggles_within_ballots() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_users(&state, &["alice", "bob", "carol"]).await?;
    let cmd = Command(state.clone());
    let query = Query(state.read_db.clone());

    let pho = cmd.nominate(helpers::nominate("alice", "Pho Bo")).await?;
    let ramen = cmd.nominate(helpers::nominate("carol", "Ramen")).await?;
    cmd.nominate(helpers::nominate("bob", "Bun Cha")).await?;

    let own = cmd.vote(helpers::vote("alice", pho)).await.unwrap_err();
    assert_eq!(own.to_string(), "You cannot vote your own dish");

    assert_eq!(cmd.vote(helpers::vote("bob", pho)).await?, VoteAction::Vote);

    let no_ballots = cmd.vote(helpers::vote("bob", ramen)).await.unwrap_err();
    assert_eq!(no_ballots.to_string(), "No ballots left");

    let wheel = query.state(&session(), Some("bob")).await?;
    assert_eq!(wheel.candidates[0].name, "Pho Bo");
    assert_eq!(wheel.candidates[0].votes, 1);
    assert_eq!(wheel.candidates[0].voters, vec!["bob"]);
    let summary = wheel.user_summary.expect("summary");
    assert_eq!(summary.votes_used, 1);
    assert_eq!(summary.voted_candidate_ids, vec![pho.to_string()]);

    assert_eq!(cmd.vote(helpers::vote("bob", pho)).await?, VoteAction::Unvote);
    assert_eq!(
        cmd.vote(VoteInput {
            candidate_id: Some(CandidateRef::Text(ramen.to_string())),
            ..helpers::vote("bob", 0)
        })
        .await?,
        VoteAction::Vote
    );

    let other_session = cmd
        .vote(VoteInput {
            meal_type: "lunch".to_owned(),
            ..helpers::vote("bob", pho)
        })
        .await
        .unwrap_err();
    assert!(matches!(other_session, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn proposer_edits_and_deletes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_users(&state, &["alice", "bob"]).await?;
    let cmd = Command(state.clone());
    let query = Query(state.read_db.clone());

    let pho = cmd.nominate(helpers::nominate("alice", "Pho Bo")).await?;
    cmd.nominate(helpers::nominate("bob", "Ramen")).await?;
    cmd.vote(helpers::vote("bob", pho)).await?;

    let forbidden = cmd.rename_candidate(pho, "bob", "Pho Ga").await.unwrap_err();
    assert!(matches!(forbidden, Error::Forbidden(_)));

    let dup = cmd.rename_candidate(pho, "alice", "Ramen").await.unwrap_err();
    assert!(matches!(dup, Error::Conflict(_)));

    cmd.rename_candidate(pho, "alice", "Pho Ga").await?;

    let forbidden = cmd.delete_candidate(pho, "bob").await.unwrap_err();
    assert!(matches!(forbidden, Error::Forbidden(_)));

    cmd.delete_candidate(pho, "alice").await?;

    let missing = cmd.delete_candidate(pho, "alice").await.unwrap_err();
    assert!(matches!(missing, Error::NotFound(_)));

    let wheel = query.state(&session(), Some("bob")).await?;
    assert_eq!(wheel.candidates.len(), 1);
    assert_eq!(wheel.user_summary.map(|s| s.votes_used), Some(0));

    Ok(())
}

#[tokio::test]
async fn picks_drive_the_context() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_users(&state, &["alice", "bob"]).await?;
    let cmd = Command(state.clone());
    let query = Query(state.read_db.clone());

    assert!(query.latest_pick(&session()).await?.winner_name.is_none());

    let pho = cmd.nominate(helpers::nominate("alice", "Pho Bo")).await?;
    cmd.nominate(helpers::nominate("bob", "Ramen")).await?;
    cmd.vote(helpers::vote("bob", pho)).await?;

    let ctx = query.context(&session()).await?;
    assert_eq!(ctx.participants, vec!["alice", "bob"]);
    assert_eq!(ctx.winner_dish.as_deref(), Some("Pho Bo"));

    cmd.pick(PickInput {
        family_id: "fam_1".to_owned(),
        meal_date: "2099-01-02".to_owned(),
        meal_type: "Dinner".to_owned(),
        winner_name: "Ramen".to_owned(),
        picked_by: "alice".to_owned(),
    })
    .await?;

    let latest = query.latest_pick(&session()).await?;
    assert_eq!(latest.winner_name.as_deref(), Some("Ramen"));
    assert_eq!(latest.picked_by.as_deref(), Some("alice"));

    let ctx = query.context(&session()).await?;
    assert_eq!(ctx.winner_dish.as_deref(), Some("Ramen"));
    assert_eq!(ctx.winner_proposer.as_deref(), Some("bob"));

    Ok(())
}
